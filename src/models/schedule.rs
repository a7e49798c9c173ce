//! Day plan ("schedule") configuration.
//!
//! A [`ScheduleConfig`] is the declarative work-time policy for one kind of
//! calendar day: arrival/departure windows, tolerances, rounding, breaks,
//! net-time caps, holiday credits and alternative shift plans.

use serde::{Deserialize, Serialize};

use super::day_facts::{AbsenceFact, HolidayCategory};
use super::time_window::{MINUTES_PER_DAY, TimeWindow};
use crate::error::{EngineError, EngineResult};

/// Maximum number of alternative plans consulted by shift detection.
pub const MAX_ALTERNATIVE_PLANS: usize = 6;

/// The kind of day plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    /// Fixed working hours.
    #[default]
    Fixed,
    /// Flexible hours within windows, with an optional core time.
    Flextime,
}

/// How a booking time is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// No rounding.
    #[default]
    None,
    /// Round up to the next multiple of the interval.
    Up,
    /// Round down to the previous multiple of the interval.
    Down,
    /// Round to the closer multiple; halves round up.
    Nearest,
}

/// Rounding applied to one booking direction (come or go).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundingPolicy {
    /// The rounding mode.
    #[serde(default)]
    pub mode: RoundingMode,
    /// Rounding grid in minutes; unset or non-positive disables rounding.
    #[serde(default)]
    pub interval_minutes: Option<i32>,
    /// Signed offset added after rounding.
    #[serde(default)]
    pub offset_minutes: Option<i32>,
}

/// Grace bands around the planned arrival and departure.
///
/// Unset values mean "no tolerance" in that direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tolerance {
    /// Minutes an arrival may be late and still count as on time.
    #[serde(default)]
    pub come_plus: Option<i32>,
    /// Minutes an arrival may be early and still snap to the planned start.
    #[serde(default)]
    pub come_minus: Option<i32>,
    /// Minutes a departure may be late and still snap to the planned end.
    #[serde(default)]
    pub go_plus: Option<i32>,
    /// Minutes a departure may be early and still count as on time.
    #[serde(default)]
    pub go_minus: Option<i32>,
}

/// The kind-specific part of a break rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreakKind {
    /// Deducted whenever work overlaps the window, booked or not.
    Fixed {
        /// The break window.
        window: TimeWindow,
    },
    /// Booked breaks are used; otherwise optionally auto-deducted.
    Variable {
        /// Deduct the configured duration when no break was booked.
        #[serde(default)]
        auto_deduct: bool,
    },
    /// Statutory minimum once gross work exceeds a threshold.
    Minimum {
        /// Gross work minutes after which the minimum applies.
        after_work_minutes: i32,
        /// Deduct only the minutes worked beyond the threshold.
        #[serde(default)]
        proportional: bool,
    },
}

/// One configured break rule.
///
/// # Example
///
/// ```
/// use worktime_engine::models::{BreakKind, BreakRule, TimeWindow};
///
/// let lunch = BreakRule {
///     kind: BreakKind::Fixed { window: TimeWindow { from: 720, to: 750 } },
///     duration_minutes: 30,
///     is_paid: false,
/// };
/// assert!(lunch.validate("STD", 0).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakRule {
    /// Kind and kind-specific settings.
    #[serde(flatten)]
    pub kind: BreakKind,
    /// Break length in minutes.
    pub duration_minutes: i32,
    /// Paid breaks are never deducted.
    #[serde(default)]
    pub is_paid: bool,
}

impl BreakRule {
    /// Validates the rule at position `index` of plan `plan_id`.
    pub fn validate(&self, plan_id: &str, index: usize) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::InvalidBreakRule {
            plan_id: plan_id.to_string(),
            index,
            message: message.to_string(),
        };

        if self.duration_minutes <= 0 {
            return Err(invalid("duration must be positive"));
        }
        match self.kind {
            BreakKind::Fixed { window } => {
                window.validate(&format!("breaks[{}].window", index))?;
                if self.duration_minutes > window.duration() {
                    return Err(invalid("duration exceeds the break window"));
                }
            }
            BreakKind::Variable { .. } => {}
            BreakKind::Minimum {
                after_work_minutes, ..
            } => {
                if !(0..=MINUTES_PER_DAY).contains(&after_work_minutes) {
                    return Err(invalid("after_work_minutes must be within 0..=1440"));
                }
            }
        }
        Ok(())
    }
}

/// Minutes credited on a holiday, per holiday category.
///
/// Unset entries fall back to: full = target, half = target / 2, none = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HolidayCredits {
    /// Credit for category 1 holidays.
    #[serde(default)]
    pub full: Option<i32>,
    /// Credit for category 2 holidays.
    #[serde(default)]
    pub half: Option<i32>,
    /// Credit for category 3 holidays.
    #[serde(default)]
    pub none: Option<i32>,
}

impl HolidayCredits {
    /// Minutes credited for a holiday of `category` on a plan with `target_minutes`.
    pub fn credit_for(&self, category: HolidayCategory, target_minutes: i32) -> i32 {
        match category {
            HolidayCategory::Full => self.full.unwrap_or(target_minutes),
            HolidayCategory::Half => self.half.unwrap_or(target_minutes / 2),
            HolidayCategory::NoCredit => self.none.unwrap_or(0),
        }
    }
}

/// What to do with a planned day that has no bookings at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoBookingBehavior {
    /// Flag the day with `NO_BOOKINGS` and credit nothing.
    Error,
    /// Credit the full target time.
    CreditTarget,
    /// Credit nothing; the whole target becomes undertime.
    #[default]
    CreditZero,
    /// Produce no result for the day.
    Skip,
    /// Credit the configured fallback absence, or behave like `Error`.
    UseAbsence {
        /// The absence to credit.
        #[serde(default)]
        absence: Option<AbsenceFact>,
    },
}

/// Arrival/departure windows that identify this plan, plus alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShiftDetectionConfig {
    /// Earliest arrival matching this plan.
    #[serde(default)]
    pub arrival_from: Option<i32>,
    /// Arrival must be before this minute.
    #[serde(default)]
    pub arrival_to: Option<i32>,
    /// Earliest departure matching this plan.
    #[serde(default)]
    pub departure_from: Option<i32>,
    /// Departure must be before this minute.
    #[serde(default)]
    pub departure_to: Option<i32>,
    /// Ids of alternative plans, tried in order.
    #[serde(default)]
    pub alternative_plans: Vec<String>,
}

impl ShiftDetectionConfig {
    /// The arrival window, if both bounds are set.
    pub fn arrival_window(&self) -> Option<TimeWindow> {
        match (self.arrival_from, self.arrival_to) {
            (Some(from), Some(to)) => Some(TimeWindow { from, to }),
            _ => None,
        }
    }

    /// The departure window, if both bounds are set.
    pub fn departure_window(&self) -> Option<TimeWindow> {
        match (self.departure_from, self.departure_to) {
            (Some(from), Some(to)) => Some(TimeWindow { from, to }),
            _ => None,
        }
    }

    /// Whether any detection window is configured.
    pub fn has_windows(&self) -> bool {
        self.arrival_window().is_some() || self.departure_window().is_some()
    }
}

/// A day plan.
///
/// # Example
///
/// ```
/// use worktime_engine::models::ScheduleConfig;
///
/// let plan = ScheduleConfig {
///     id: "STD".to_string(),
///     target_minutes: 480,
///     come_from: Some(480),
///     go_from: Some(960),
///     ..Default::default()
/// };
/// assert!(plan.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Unique plan id.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Fixed or flextime.
    #[serde(default)]
    pub kind: PlanKind,
    /// Regular working time in minutes.
    pub target_minutes: i32,
    /// Planned/earliest arrival.
    #[serde(default)]
    pub come_from: Option<i32>,
    /// Latest arrival.
    #[serde(default)]
    pub come_to: Option<i32>,
    /// Planned/earliest departure.
    #[serde(default)]
    pub go_from: Option<i32>,
    /// Latest departure.
    #[serde(default)]
    pub go_to: Option<i32>,
    /// Core time that flextime days must cover.
    #[serde(default)]
    pub core_time: Option<TimeWindow>,
    /// Arrival/departure tolerance.
    #[serde(default)]
    pub tolerance: Tolerance,
    /// Rounding of work starts.
    #[serde(default)]
    pub come_rounding: RoundingPolicy,
    /// Rounding of work ends.
    #[serde(default)]
    pub go_rounding: RoundingPolicy,
    /// Break rules, evaluated in order.
    #[serde(default)]
    pub breaks: Vec<BreakRule>,
    /// Net time below this emits a warning.
    #[serde(default)]
    pub min_net_minutes: Option<i32>,
    /// Net time is capped at this value.
    #[serde(default)]
    pub max_net_minutes: Option<i32>,
    /// Holiday credit overrides.
    #[serde(default)]
    pub holiday_credits: HolidayCredits,
    /// Handling of days without bookings.
    #[serde(default)]
    pub no_booking_behavior: NoBookingBehavior,
    /// Shift detection windows and alternatives.
    #[serde(default)]
    pub shift_detection: ShiftDetectionConfig,
}

impl ScheduleConfig {
    /// Whether this is a flextime plan.
    pub fn is_flextime(&self) -> bool {
        self.kind == PlanKind::Flextime
    }

    /// Validates every field; the first violation is returned.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidDayPlan {
            plan_id: self.id.clone(),
            message,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id must not be empty".to_string()));
        }
        if !(0..=MINUTES_PER_DAY).contains(&self.target_minutes) {
            return Err(invalid(format!(
                "target_minutes {} is outside 0..=1440",
                self.target_minutes
            )));
        }

        validate_bounds("come", self.come_from, self.come_to, false)?;
        validate_bounds("go", self.go_from, self.go_to, false)?;
        if let Some(core) = self.core_time {
            core.validate("core_time")?;
        }

        let tolerances = [
            ("come_plus", self.tolerance.come_plus),
            ("come_minus", self.tolerance.come_minus),
            ("go_plus", self.tolerance.go_plus),
            ("go_minus", self.tolerance.go_minus),
        ];
        for (name, value) in tolerances {
            if value.is_some_and(|v| v < 0) {
                return Err(invalid(format!("tolerance {} must not be negative", name)));
            }
        }

        for (index, rule) in self.breaks.iter().enumerate() {
            rule.validate(&self.id, index)?;
        }

        let net_bounds = [
            ("min_net_minutes", self.min_net_minutes),
            ("max_net_minutes", self.max_net_minutes),
        ];
        for (name, value) in net_bounds {
            if value.is_some_and(|v| v < 0) {
                return Err(invalid(format!("{} must not be negative", name)));
            }
        }
        if let (Some(min), Some(max)) = (self.min_net_minutes, self.max_net_minutes) {
            if min > max {
                return Err(invalid(format!(
                    "min_net_minutes {} exceeds max_net_minutes {}",
                    min, max
                )));
            }
        }

        if let NoBookingBehavior::UseAbsence {
            absence: Some(absence),
        } = &self.no_booking_behavior
        {
            absence.validate()?;
        }

        let detection = &self.shift_detection;
        validate_bounds("arrival", detection.arrival_from, detection.arrival_to, true)?;
        validate_bounds(
            "departure",
            detection.departure_from,
            detection.departure_to,
            true,
        )?;
        if detection.alternative_plans.len() > MAX_ALTERNATIVE_PLANS {
            return Err(invalid(format!(
                "at most {} alternative plans are allowed, got {}",
                MAX_ALTERNATIVE_PLANS,
                detection.alternative_plans.len()
            )));
        }
        if detection.alternative_plans.contains(&self.id) {
            return Err(invalid("plan lists itself as an alternative".to_string()));
        }

        Ok(())
    }
}

/// Checks an optional `from`/`to` pair.
///
/// Set bounds must be within the day, and when both are set `from < to`.
/// Detection windows (`paired`) additionally need both bounds or neither.
fn validate_bounds(field: &str, from: Option<i32>, to: Option<i32>, paired: bool) -> EngineResult<()> {
    match (from, to) {
        (Some(from), Some(to)) => TimeWindow { from, to }.validate(field),
        (Some(value), None) | (None, Some(value)) => {
            if paired || !(0..=MINUTES_PER_DAY).contains(&value) {
                return Err(EngineError::InvalidTimeWindow {
                    field: field.to_string(),
                    from: from.unwrap_or(-1),
                    to: to.unwrap_or(-1),
                });
            }
            Ok(())
        }
        (None, None) => Ok(()),
    }
}
