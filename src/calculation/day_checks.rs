//! Error and warning detection on a computed day.
//!
//! Runs after the worked-day calculation and only inspects its inputs and
//! result. Absence, holiday, off and no-booking days are not checked.

use std::collections::BTreeSet;

use crate::models::{
    BookingPair, DailyResult, DayInput, DayIssues, DayKind, ErrorCode, ScheduleConfig, TimeWindow,
    WarningCode,
};

/// Minutes an arrival or departure may exceed the plan's window before it is an error.
pub const WINDOW_GRACE_MINUTES: i32 = 30;

/// Gross minutes above which a day is flagged as long.
pub const LONG_WORK_DAY_MINUTES: i32 = 600;

/// Finds policy errors and warnings on a worked day.
///
/// The returned issues are meant to be merged with
/// [`DailyResult::with_issues`], which ignores codes already present.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use worktime_engine::calculation::{calculate_day, detect_day_issues};
/// use worktime_engine::models::{BookingCategory, DayInput, ScheduleConfig, WarningCode};
///
/// let plan = ScheduleConfig {
///     id: "STD".to_string(),
///     target_minutes: 480,
///     come_from: Some(480),
///     ..Default::default()
/// };
/// let input = DayInput::new("emp_001", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), Some(plan.clone()))
///     .with_booking(BookingCategory::Come, 500)
///     .with_booking(BookingCategory::Go, 1000);
/// let result = calculate_day(&input).unwrap().unwrap();
///
/// let issues = detect_day_issues(&input, &plan, &result);
/// assert!(issues.warnings.contains(&WarningCode::LateArrival));
/// ```
pub fn detect_day_issues(input: &DayInput, plan: &ScheduleConfig, result: &DailyResult) -> DayIssues {
    let mut issues = DayIssues::default();
    if result.kind != DayKind::Worked {
        return issues;
    }

    let first_come = input.first_come();
    let last_go = input.last_go();

    // Window violations
    if let (Some(come), Some(earliest)) = (first_come, plan.come_from) {
        if come < earliest - WINDOW_GRACE_MINUTES {
            issues.errors.insert(ErrorCode::CameBeforeAllowed);
        }
    }
    if let (Some(go), Some(latest)) = (last_go, plan.go_to.or(plan.go_from)) {
        if go > latest + WINDOW_GRACE_MINUTES {
            issues.errors.insert(ErrorCode::LeftAfterAllowed);
        }
    }

    if plan.is_flextime() {
        if let Some(core) = plan.core_time {
            if !covers(&result.pairs, core) {
                issues.errors.insert(ErrorCode::MissedCoreTime);
            }
        }
    }

    let mut seen = BTreeSet::new();
    for booking in &input.bookings {
        if !seen.insert((booking.category, booking.effective_minutes())) {
            issues.errors.insert(ErrorCode::OverlappingBookings);
            break;
        }
    }

    if result.pairs.iter().any(|p| p.duration() < 0) {
        issues.errors.insert(ErrorCode::NegativeDuration);
    }

    // Warnings
    let planned_arrival = if plan.is_flextime() {
        plan.come_to
    } else {
        plan.come_from
    };
    if let (Some(come), Some(planned)) = (first_come, planned_arrival) {
        if come > planned + plan.tolerance.come_plus.unwrap_or(0) {
            issues.warnings.insert(WarningCode::LateArrival);
        }
    }
    if let (Some(go), Some(planned)) = (last_go, plan.go_from) {
        if go < planned - plan.tolerance.go_minus.unwrap_or(0) {
            issues.warnings.insert(WarningCode::EarlyDeparture);
        }
    }
    if result.gross_minutes > LONG_WORK_DAY_MINUTES {
        issues.warnings.insert(WarningCode::LongWorkDay);
    }
    if result.capped_minutes > 0 {
        issues.warnings.insert(WarningCode::NetTimeCapped);
    }
    if plan
        .min_net_minutes
        .is_some_and(|min| result.net_minutes < min)
    {
        issues.warnings.insert(WarningCode::BelowMinNetTime);
    }

    issues
}

/// Whether the union of the positive work pairs covers `window` completely.
fn covers(pairs: &[BookingPair], window: TimeWindow) -> bool {
    let mut intervals: Vec<(i32, i32)> = pairs
        .iter()
        .filter(|p| p.is_work() && p.duration() > 0)
        .map(|p| (p.start, p.end))
        .collect();
    intervals.sort_unstable();

    let mut covered_until = window.from;
    for (start, end) in intervals {
        if start > covered_until {
            break;
        }
        covered_until = covered_until.max(end);
        if covered_until >= window.to {
            return true;
        }
    }
    covered_until >= window.to
}
