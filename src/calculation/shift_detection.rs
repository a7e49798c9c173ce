//! Shift detection.
//!
//! Chooses which day plan applies to a day: the assigned plan, or the first
//! of its alternatives whose arrival/departure windows match the observed
//! first come and last go.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::models::{
    MAX_ALTERNATIVE_PLANS, ScheduleConfig, ShiftDetectionConfig, ShiftDetectionResult,
    ShiftMatchKind, format_minutes,
};

/// Resolves day plans by id.
pub trait DayPlanLookup {
    /// The plan with `id`, if known.
    fn day_plan(&self, id: &str) -> Option<&ScheduleConfig>;
}

impl DayPlanLookup for HashMap<String, ScheduleConfig> {
    fn day_plan(&self, id: &str) -> Option<&ScheduleConfig> {
        self.get(id)
    }
}

impl DayPlanLookup for [ScheduleConfig] {
    fn day_plan(&self, id: &str) -> Option<&ScheduleConfig> {
        self.iter().find(|plan| plan.id == id)
    }
}

impl DayPlanLookup for Vec<ScheduleConfig> {
    fn day_plan(&self, id: &str) -> Option<&ScheduleConfig> {
        self.as_slice().day_plan(id)
    }
}

/// The plan selected for a day and how it was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftMatch<'a> {
    /// The plan to calculate the day with.
    pub plan: &'a ScheduleConfig,
    /// The detection outcome to record on the result.
    pub detection: ShiftDetectionResult,
}

/// Tests a plan's detection windows against the observed times.
///
/// Returns `None` when a configured window does not match, or when the plan
/// has no windows at all. When both windows are configured both must match.
pub fn match_detection_windows(
    detection: &ShiftDetectionConfig,
    first_come: Option<i32>,
    last_go: Option<i32>,
) -> Option<ShiftMatchKind> {
    let arrival_hit = |come: Option<i32>| {
        detection
            .arrival_window()
            .zip(come)
            .is_some_and(|(window, minute)| window.contains(minute))
    };
    let departure_hit = |go: Option<i32>| {
        detection
            .departure_window()
            .zip(go)
            .is_some_and(|(window, minute)| window.contains(minute))
    };

    match (detection.arrival_window(), detection.departure_window()) {
        (Some(_), Some(_)) => {
            (arrival_hit(first_come) && departure_hit(last_go)).then_some(ShiftMatchKind::Both)
        }
        (Some(_), None) => arrival_hit(first_come).then_some(ShiftMatchKind::Arrival),
        (None, Some(_)) => departure_hit(last_go).then_some(ShiftMatchKind::Departure),
        (None, None) => None,
    }
}

/// Selects the plan for a day.
///
/// A plan without detection windows is used unconditionally. Otherwise the
/// assigned plan is tested first, then up to six alternatives in configured
/// order; alternatives that are unknown or have no windows are skipped. If
/// nothing matches, the assigned plan is returned with `has_error` set.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use worktime_engine::calculation::detect_shift;
/// use worktime_engine::models::{ScheduleConfig, ShiftDetectionConfig};
///
/// let day = ScheduleConfig {
///     id: "DAY".to_string(),
///     target_minutes: 480,
///     shift_detection: ShiftDetectionConfig {
///         arrival_from: Some(480),
///         arrival_to: Some(600),
///         alternative_plans: vec!["EARLY".to_string()],
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// let early = ScheduleConfig {
///     id: "EARLY".to_string(),
///     target_minutes: 480,
///     shift_detection: ShiftDetectionConfig {
///         arrival_from: Some(360),
///         arrival_to: Some(480),
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// let plans: HashMap<String, ScheduleConfig> =
///     [(early.id.clone(), early)].into_iter().collect();
///
/// let selected = detect_shift(&day, Some(420), Some(900), &plans);
/// assert_eq!(selected.plan.id, "EARLY");
/// assert!(!selected.detection.is_original);
/// assert!(!selected.detection.has_error);
/// ```
pub fn detect_shift<'a, L>(
    assigned: &'a ScheduleConfig,
    first_come: Option<i32>,
    last_go: Option<i32>,
    plans: &'a L,
) -> ShiftMatch<'a>
where
    L: DayPlanLookup + ?Sized,
{
    let detection = &assigned.shift_detection;

    if !detection.has_windows() {
        return ShiftMatch {
            plan: assigned,
            detection: ShiftDetectionResult {
                matched_plan: assigned.id.clone(),
                is_original: true,
                match_kind: ShiftMatchKind::None,
                has_error: false,
                message: None,
            },
        };
    }

    if let Some(kind) = match_detection_windows(detection, first_come, last_go) {
        debug!(plan_id = %assigned.id, match_kind = ?kind, "assigned plan matched");
        return ShiftMatch {
            plan: assigned,
            detection: ShiftDetectionResult {
                matched_plan: assigned.id.clone(),
                is_original: true,
                match_kind: kind,
                has_error: false,
                message: None,
            },
        };
    }

    for alternative_id in detection.alternative_plans.iter().take(MAX_ALTERNATIVE_PLANS) {
        let Some(alternative) = plans.day_plan(alternative_id) else {
            warn!(
                plan_id = %assigned.id,
                alternative = %alternative_id,
                "unknown alternative plan skipped"
            );
            continue;
        };
        if !alternative.shift_detection.has_windows() {
            debug!(alternative = %alternative_id, "alternative without detection windows skipped");
            continue;
        }
        if let Some(kind) =
            match_detection_windows(&alternative.shift_detection, first_come, last_go)
        {
            debug!(
                plan_id = %assigned.id,
                alternative = %alternative.id,
                match_kind = ?kind,
                "alternative plan matched"
            );
            return ShiftMatch {
                plan: alternative,
                detection: ShiftDetectionResult {
                    matched_plan: alternative.id.clone(),
                    is_original: false,
                    match_kind: kind,
                    has_error: false,
                    message: None,
                },
            };
        }
    }

    let message = format!(
        "no plan matched arrival {} / departure {}; using assigned plan {}",
        describe(first_come),
        describe(last_go),
        assigned.id
    );
    warn!(plan_id = %assigned.id, detail = %message, "shift detection found no match");
    ShiftMatch {
        plan: assigned,
        detection: ShiftDetectionResult {
            matched_plan: assigned.id.clone(),
            is_original: true,
            match_kind: ShiftMatchKind::None,
            has_error: true,
            message: Some(message),
        },
    }
}

fn describe(minute: Option<i32>) -> String {
    minute.map_or_else(|| "none".to_string(), format_minutes)
}
