//! Daily calculation.
//!
//! [`calculate_day`] dispatches a day to exactly one branch:
//!
//! 1. an absence (unless a holiday with strictly higher priority exists)
//! 2. a holiday
//! 3. an off day (no plan)
//! 4. a planned day without bookings, per the plan's [`NoBookingBehavior`]
//! 5. a worked day: pairing, normalization, break deduction, caps and checks
//!
//! Bookings are paired on every branch and their pairing errors are kept.

use tracing::debug;

use super::breaks::calculate_break_deduction;
use super::day_checks::detect_day_issues;
use super::normalize::normalize_pairs;
use super::pairing::{PairingResult, pair_bookings};
use super::shift_detection::{DayPlanLookup, detect_shift};
use crate::error::EngineResult;
use crate::models::{
    AbsenceFact, BookingPair, DailyResult, DayInput, DayKind, ErrorCode, HolidayFact,
    NoBookingBehavior, ScheduleConfig, WarningCode,
};

/// Calculates one day with its assigned plan.
///
/// The input is validated first; a malformed plan, booking or absence is an
/// error. Returns `Ok(None)` only when the plan's no-booking behaviour is
/// `skip` and the day has no bookings.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use worktime_engine::calculation::calculate_day;
/// use worktime_engine::models::{BookingCategory, DayInput, ScheduleConfig};
///
/// let plan = ScheduleConfig {
///     id: "STD".to_string(),
///     target_minutes: 480,
///     ..Default::default()
/// };
/// let input = DayInput::new("emp_001", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), Some(plan))
///     .with_booking(BookingCategory::Come, 480)
///     .with_booking(BookingCategory::Go, 1020);
///
/// let result = calculate_day(&input).unwrap().unwrap();
/// assert_eq!(result.gross_minutes, 540);
/// assert_eq!(result.net_minutes, 540);
/// assert_eq!(result.overtime_minutes, 60);
/// assert_eq!(result.undertime_minutes, 0);
/// ```
pub fn calculate_day(input: &DayInput) -> EngineResult<Option<DailyResult>> {
    input.validate()?;
    Ok(calculate_day_with_plan(input, input.day_plan.as_ref()))
}

/// Calculates one day after resolving its plan through shift detection.
///
/// Detection only runs on days that would be calculated from bookings (a
/// plan, bookings, no absence and no holiday). The detection outcome is
/// recorded on the result, and `NO_MATCHING_SHIFT` is added when neither the
/// assigned plan nor an alternative matched. A selected alternative plan is
/// validated like the assigned one.
pub fn calculate_day_with_shift_detection<L>(
    input: &DayInput,
    plans: &L,
) -> EngineResult<Option<DailyResult>>
where
    L: DayPlanLookup + ?Sized,
{
    let assigned = match input.day_plan.as_ref() {
        Some(plan)
            if !input.bookings.is_empty()
                && input.absence.is_none()
                && input.holiday.is_none() =>
        {
            plan
        }
        _ => return calculate_day(input),
    };

    input.validate()?;
    let selected = detect_shift(assigned, input.first_come(), input.last_go(), plans);
    selected.plan.validate()?;
    let Some(mut result) = calculate_day_with_plan(input, Some(selected.plan)) else {
        return Ok(None);
    };
    if selected.detection.has_error {
        result.errors.insert(ErrorCode::NoMatchingShift);
    }
    result.shift_detection = Some(selected.detection);
    Ok(Some(result))
}

fn calculate_day_with_plan(input: &DayInput, plan: Option<&ScheduleConfig>) -> Option<DailyResult> {
    let pairing = pair_bookings(&input.bookings);

    match (&input.absence, &input.holiday) {
        (Some(absence), Some(holiday)) if holiday.priority > absence.priority => {
            debug!(
                employee_id = %input.employee_id,
                date = %input.date,
                "holiday outranks absence"
            );
            let mut result = holiday_day(input, plan, *holiday, pairing);
            result.warnings.insert(WarningCode::AbsenceOnHoliday);
            return Some(result);
        }
        (Some(absence), holiday) => {
            debug!(
                employee_id = %input.employee_id,
                date = %input.date,
                absence = %absence.type_code,
                "absence day"
            );
            let mut result = absence_day(input, plan, absence, pairing);
            if holiday.is_some() {
                result.warnings.insert(WarningCode::AbsenceOnHoliday);
            }
            return Some(result);
        }
        (None, Some(holiday)) => {
            debug!(employee_id = %input.employee_id, date = %input.date, "holiday");
            return Some(holiday_day(input, plan, *holiday, pairing));
        }
        (None, None) => {}
    }

    let Some(plan) = plan else {
        debug!(employee_id = %input.employee_id, date = %input.date, "off day");
        let has_bookings = !input.bookings.is_empty();
        let mut result = special_day(input, None, DayKind::OffDay, pairing);
        if has_bookings {
            result.warnings.insert(WarningCode::WorkedOnOffDay);
        }
        return Some(result);
    };

    if input.bookings.is_empty() {
        return no_booking_day(input, plan);
    }

    Some(worked_day(input, plan, pairing))
}

/// A result for a credited (non-worked) day, carrying the booking pairs.
fn special_day(
    input: &DayInput,
    plan: Option<&ScheduleConfig>,
    kind: DayKind,
    pairing: PairingResult,
) -> DailyResult {
    let mut result = DailyResult::empty(&input.employee_id, input.date, kind);
    result.day_plan_id = plan.map(|p| p.id.clone());
    result.target_minutes = plan.map_or(0, |p| p.target_minutes);
    result.pairs = pairing.pairs;
    result.errors = pairing.errors;
    result
}

fn credit(mut result: DailyResult, minutes: i32) -> DailyResult {
    result.gross_minutes = minutes;
    result.net_minutes = minutes;
    result
}

fn absence_day(
    input: &DayInput,
    plan: Option<&ScheduleConfig>,
    absence: &AbsenceFact,
    pairing: PairingResult,
) -> DailyResult {
    let result = special_day(input, plan, DayKind::Absence, pairing);
    let credited = absence.credited_minutes(result.target_minutes);
    let mut result = credit(result, credited);
    result.absence = Some(absence.clone());
    result
}

fn holiday_day(
    input: &DayInput,
    plan: Option<&ScheduleConfig>,
    holiday: HolidayFact,
    pairing: PairingResult,
) -> DailyResult {
    let credited = plan.map_or(0, |p| {
        p.holiday_credits
            .credit_for(holiday.category, p.target_minutes)
    });
    credit(special_day(input, plan, DayKind::Holiday, pairing), credited)
}

fn no_booking_day(input: &DayInput, plan: &ScheduleConfig) -> Option<DailyResult> {
    debug!(
        employee_id = %input.employee_id,
        date = %input.date,
        plan_id = %plan.id,
        behavior = ?plan.no_booking_behavior,
        "planned day without bookings"
    );
    let result = special_day(input, Some(plan), DayKind::NoBookings, PairingResult::default());

    match &plan.no_booking_behavior {
        NoBookingBehavior::Skip => None,
        NoBookingBehavior::CreditTarget => {
            let target = result.target_minutes;
            Some(credit(result, target))
        }
        NoBookingBehavior::CreditZero => {
            let mut result = result;
            result.undertime_minutes = result.target_minutes;
            Some(result)
        }
        NoBookingBehavior::UseAbsence {
            absence: Some(absence),
        } => Some(absence_day(input, Some(plan), absence, PairingResult::default())),
        NoBookingBehavior::Error | NoBookingBehavior::UseAbsence { absence: None } => {
            let mut result = result;
            result.errors.insert(ErrorCode::NoBookings);
            Some(result)
        }
    }
}

fn worked_day(input: &DayInput, plan: &ScheduleConfig, pairing: PairingResult) -> DailyResult {
    let pairs = normalize_pairs(&pairing.pairs, plan);
    let work: Vec<&BookingPair> = pairs.iter().filter(|p| p.is_work()).collect();

    let gross: i32 = work.iter().map(|p| p.duration().max(0)).sum();
    let deduction = calculate_break_deduction(&plan.breaks, &pairs, gross);

    let mut net = (gross - deduction.total_minutes).max(0);
    let mut capped = 0;
    if let Some(max) = plan.max_net_minutes {
        if net > max {
            let max = max.max(0);
            capped = net - max;
            net = max;
        }
    }

    let first_come = work.iter().map(|p| p.start).min();
    let last_go = work.iter().map(|p| p.end).max();

    debug!(
        employee_id = %input.employee_id,
        date = %input.date,
        plan_id = %plan.id,
        gross,
        breaks = deduction.total_minutes,
        net,
        "worked day"
    );

    let mut result = DailyResult::empty(&input.employee_id, input.date, DayKind::Worked);
    result.day_plan_id = Some(plan.id.clone());
    result.gross_minutes = gross;
    result.break_minutes = deduction.total_minutes;
    result.net_minutes = net;
    result.capped_minutes = capped;
    result.target_minutes = plan.target_minutes;
    result.overtime_minutes = (net - plan.target_minutes).max(0);
    result.undertime_minutes = (plan.target_minutes - net).max(0);
    result.first_come = first_come;
    result.last_go = last_go;
    result.pairs = pairs;
    result.errors = pairing.errors;
    if deduction.auto_applied() {
        result.warnings.insert(WarningCode::AutoBreakApplied);
    }

    let issues = detect_day_issues(input, plan, &result);
    result.with_issues(issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{
        AbsenceCategory, BookingCategory, BreakKind, BreakRule, HolidayCategory, HolidayCredits,
        RoundingMode, RoundingPolicy, ShiftDetectionConfig, TimeWindow,
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn make_plan() -> ScheduleConfig {
        ScheduleConfig {
            id: "STD".to_string(),
            name: "Standard day".to_string(),
            target_minutes: 480,
            ..Default::default()
        }
    }

    fn lunch_break() -> BreakRule {
        BreakRule {
            kind: BreakKind::Fixed {
                window: TimeWindow { from: 720, to: 750 },
            },
            duration_minutes: 30,
            is_paid: false,
        }
    }

    fn make_input(plan: Option<ScheduleConfig>) -> DayInput {
        DayInput::new("emp_001", make_date(), plan)
    }

    fn standard_day(plan: ScheduleConfig) -> DayInput {
        make_input(Some(plan))
            .with_booking(BookingCategory::Come, 480)
            .with_booking(BookingCategory::Go, 1020)
    }

    // ==========================================================================
    // Worked days
    // ==========================================================================

    #[test]
    fn test_simple_day_overtime() {
        let result = calculate_day(&standard_day(make_plan())).unwrap().unwrap();
        assert_eq!(result.kind, DayKind::Worked);
        assert_eq!(result.gross_minutes, 540);
        assert_eq!(result.net_minutes, 540);
        assert_eq!(result.target_minutes, 480);
        assert_eq!(result.overtime_minutes, 60);
        assert_eq!(result.undertime_minutes, 0);
        assert_eq!(result.first_come, Some(480));
        assert_eq!(result.last_go, Some(1020));
        assert!(!result.has_error());
    }

    #[test]
    fn test_fixed_break_reduces_net() {
        let mut plan = make_plan();
        plan.breaks.push(lunch_break());
        let result = calculate_day(&standard_day(plan)).unwrap().unwrap();
        assert_eq!(result.break_minutes, 30);
        assert_eq!(result.net_minutes, 510);
        assert_eq!(result.overtime_minutes, 30);
    }

    #[test]
    fn test_undertime() {
        let input = make_input(Some(make_plan()))
            .with_booking(BookingCategory::Come, 480)
            .with_booking(BookingCategory::Go, 840);
        let result = calculate_day(&input).unwrap().unwrap();
        assert_eq!(result.net_minutes, 360);
        assert_eq!(result.overtime_minutes, 0);
        assert_eq!(result.undertime_minutes, 120);
    }

    #[test]
    fn test_missing_go_keeps_error_and_zero_time() {
        let input = make_input(Some(make_plan())).with_booking(BookingCategory::Come, 480);
        let result = calculate_day(&input).unwrap().unwrap();
        assert_eq!(result.kind, DayKind::Worked);
        assert!(result.pairs.is_empty());
        assert!(result.errors.contains(&ErrorCode::MissingGo));
        assert_eq!(result.gross_minutes, 0);
        assert_eq!(result.undertime_minutes, 480);
    }

    #[test]
    fn test_max_net_cap() {
        let mut plan = make_plan();
        plan.max_net_minutes = Some(500);
        let result = calculate_day(&standard_day(plan)).unwrap().unwrap();
        assert_eq!(result.net_minutes, 500);
        assert_eq!(result.capped_minutes, 40);
        assert!(result.warnings.contains(&WarningCode::NetTimeCapped));
    }

    #[test]
    fn test_min_net_warning() {
        let mut plan = make_plan();
        plan.min_net_minutes = Some(600);
        let result = calculate_day(&standard_day(plan)).unwrap().unwrap();
        assert!(result.warnings.contains(&WarningCode::BelowMinNetTime));
    }

    #[test]
    fn test_auto_deducted_break_warns() {
        let mut plan = make_plan();
        plan.breaks.push(BreakRule {
            kind: BreakKind::Variable { auto_deduct: true },
            duration_minutes: 30,
            is_paid: false,
        });
        let result = calculate_day(&standard_day(plan)).unwrap().unwrap();
        assert_eq!(result.net_minutes, 510);
        assert!(result.warnings.contains(&WarningCode::AutoBreakApplied));
    }

    #[test]
    fn test_rounding_applied_to_work_boundaries() {
        let mut plan = make_plan();
        plan.come_rounding = RoundingPolicy {
            mode: RoundingMode::Up,
            interval_minutes: Some(15),
            offset_minutes: None,
        };
        plan.go_rounding = RoundingPolicy {
            mode: RoundingMode::Down,
            interval_minutes: Some(15),
            offset_minutes: None,
        };
        let input = make_input(Some(plan))
            .with_booking(BookingCategory::Come, 487)
            .with_booking(BookingCategory::Go, 1012);
        let result = calculate_day(&input).unwrap().unwrap();
        assert_eq!(result.first_come, Some(495));
        assert_eq!(result.last_go, Some(1005));
        assert_eq!(result.gross_minutes, 510);
    }

    #[test]
    fn test_negative_duration_after_rounding_is_flagged() {
        let mut plan = make_plan();
        plan.come_rounding = RoundingPolicy {
            mode: RoundingMode::Up,
            interval_minutes: Some(60),
            offset_minutes: None,
        };
        plan.go_rounding = RoundingPolicy {
            mode: RoundingMode::Down,
            interval_minutes: Some(60),
            offset_minutes: None,
        };
        let input = make_input(Some(plan))
            .with_booking(BookingCategory::Come, 490)
            .with_booking(BookingCategory::Go, 530);
        let result = calculate_day(&input).unwrap().unwrap();
        assert_eq!(result.pairs[0].duration(), -60);
        assert!(result.errors.contains(&ErrorCode::NegativeDuration));
        assert_eq!(result.gross_minutes, 0);
        assert_eq!(result.net_minutes, 0);
    }

    #[test]
    fn test_recalculation_is_deterministic() {
        let input = standard_day(make_plan());
        assert_eq!(calculate_day(&input).unwrap().unwrap(), calculate_day(&input).unwrap().unwrap());
    }

    // ==========================================================================
    // Absence and holiday days
    // ==========================================================================

    #[test]
    fn test_full_day_absence_credits_target() {
        let mut input = make_input(Some(make_plan()));
        input.absence = Some(AbsenceFact::new("VAC", AbsenceCategory::Vacation, dec("1.0")));
        let result = calculate_day(&input).unwrap().unwrap();
        assert_eq!(result.kind, DayKind::Absence);
        assert_eq!(result.net_minutes, 480);
        assert_eq!(result.gross_minutes, 480);
        assert_eq!(result.overtime_minutes, 0);
        assert_eq!(result.undertime_minutes, 0);
        assert_eq!(result.absence.as_ref().map(|a| a.type_code.as_str()), Some("VAC"));
    }

    #[test]
    fn test_half_day_absence() {
        let mut input = make_input(Some(make_plan()));
        input.absence = Some(AbsenceFact::new("VAC", AbsenceCategory::Vacation, dec("0.5")));
        assert_eq!(calculate_day(&input).unwrap().unwrap().net_minutes, 240);
    }

    #[test]
    fn test_unpaid_absence_credits_nothing() {
        let mut input = make_input(Some(make_plan()));
        let mut absence = AbsenceFact::new("UNP", AbsenceCategory::Unpaid, dec("1"));
        absence.credits_hours = false;
        input.absence = Some(absence);
        let result = calculate_day(&input).unwrap().unwrap();
        assert_eq!(result.net_minutes, 0);
        assert_eq!(result.undertime_minutes, 0);
    }

    #[test]
    fn test_absence_keeps_pairing_errors() {
        let mut input = make_input(Some(make_plan())).with_booking(BookingCategory::Come, 480);
        input.absence = Some(AbsenceFact::new("SICK", AbsenceCategory::Illness, dec("1")));
        let result = calculate_day(&input).unwrap().unwrap();
        assert_eq!(result.kind, DayKind::Absence);
        assert!(result.errors.contains(&ErrorCode::MissingGo));
    }

    #[test]
    fn test_holiday_credit_by_category() {
        let mut input = make_input(Some(make_plan()));
        input.holiday = Some(HolidayFact::new(HolidayCategory::Full));
        assert_eq!(calculate_day(&input).unwrap().unwrap().net_minutes, 480);

        input.holiday = Some(HolidayFact::new(HolidayCategory::Half));
        assert_eq!(calculate_day(&input).unwrap().unwrap().net_minutes, 240);

        input.holiday = Some(HolidayFact::new(HolidayCategory::NoCredit));
        assert_eq!(calculate_day(&input).unwrap().unwrap().net_minutes, 0);
    }

    #[test]
    fn test_holiday_credit_override() {
        let mut plan = make_plan();
        plan.holiday_credits = HolidayCredits {
            half: Some(300),
            ..Default::default()
        };
        let mut input = make_input(Some(plan));
        input.holiday = Some(HolidayFact::new(HolidayCategory::Half));
        let result = calculate_day(&input).unwrap().unwrap();
        assert_eq!(result.kind, DayKind::Holiday);
        assert_eq!(result.net_minutes, 300);
    }

    #[test]
    fn test_absence_wins_over_holiday_by_default() {
        let mut input = make_input(Some(make_plan()));
        input.absence = Some(AbsenceFact::new("VAC", AbsenceCategory::Vacation, dec("0.5")));
        input.holiday = Some(HolidayFact::new(HolidayCategory::Full));
        let result = calculate_day(&input).unwrap().unwrap();
        assert_eq!(result.kind, DayKind::Absence);
        assert_eq!(result.net_minutes, 240);
        assert!(result.warnings.contains(&WarningCode::AbsenceOnHoliday));
    }

    #[test]
    fn test_higher_priority_holiday_wins() {
        let mut input = make_input(Some(make_plan()));
        input.absence = Some(AbsenceFact::new("VAC", AbsenceCategory::Vacation, dec("1")));
        input.holiday = Some(HolidayFact {
            category: HolidayCategory::Full,
            priority: 10,
        });
        let result = calculate_day(&input).unwrap().unwrap();
        assert_eq!(result.kind, DayKind::Holiday);
        assert!(result.absence.is_none());
        assert!(result.warnings.contains(&WarningCode::AbsenceOnHoliday));
    }

    // ==========================================================================
    // Off days and days without bookings
    // ==========================================================================

    #[test]
    fn test_off_day_is_all_zero() {
        let result = calculate_day(&make_input(None)).unwrap().unwrap();
        assert_eq!(result.kind, DayKind::OffDay);
        assert_eq!(result.day_plan_id, None);
        assert_eq!(result.net_minutes, 0);
        assert_eq!(result.undertime_minutes, 0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_bookings_on_off_day_warn() {
        let input = make_input(None)
            .with_booking(BookingCategory::Come, 480)
            .with_booking(BookingCategory::Go, 600);
        let result = calculate_day(&input).unwrap().unwrap();
        assert_eq!(result.pairs.len(), 1);
        assert_eq!(result.net_minutes, 0);
        assert!(result.warnings.contains(&WarningCode::WorkedOnOffDay));
    }

    #[test]
    fn test_no_bookings_default_reports_undertime() {
        let result = calculate_day(&make_input(Some(make_plan()))).unwrap().unwrap();
        assert_eq!(result.kind, DayKind::NoBookings);
        assert_eq!(result.undertime_minutes, 480);
        assert!(!result.has_error());
    }

    #[test]
    fn test_no_bookings_error_behavior() {
        let mut plan = make_plan();
        plan.no_booking_behavior = NoBookingBehavior::Error;
        let result = calculate_day(&make_input(Some(plan))).unwrap().unwrap();
        assert!(result.errors.contains(&ErrorCode::NoBookings));
        assert_eq!(result.net_minutes, 0);
        assert_eq!(result.undertime_minutes, 0);
    }

    #[test]
    fn test_no_bookings_credit_target() {
        let mut plan = make_plan();
        plan.no_booking_behavior = NoBookingBehavior::CreditTarget;
        let result = calculate_day(&make_input(Some(plan))).unwrap().unwrap();
        assert_eq!(result.net_minutes, 480);
        assert_eq!(result.undertime_minutes, 0);
    }

    #[test]
    fn test_no_bookings_skip() {
        let mut plan = make_plan();
        plan.no_booking_behavior = NoBookingBehavior::Skip;
        assert!(calculate_day(&make_input(Some(plan))).unwrap().is_none());
    }

    #[test]
    fn test_no_bookings_use_absence() {
        let mut plan = make_plan();
        plan.no_booking_behavior = NoBookingBehavior::UseAbsence {
            absence: Some(AbsenceFact::new("FLEX", AbsenceCategory::Special, dec("1"))),
        };
        let result = calculate_day(&make_input(Some(plan))).unwrap().unwrap();
        assert_eq!(result.kind, DayKind::Absence);
        assert_eq!(result.net_minutes, 480);

        let mut plan = make_plan();
        plan.no_booking_behavior = NoBookingBehavior::UseAbsence { absence: None };
        let result = calculate_day(&make_input(Some(plan))).unwrap().unwrap();
        assert!(result.errors.contains(&ErrorCode::NoBookings));
    }

    // ==========================================================================
    // Input validation
    // ==========================================================================

    #[test]
    fn test_out_of_range_booking_rejected() {
        let input = make_input(Some(make_plan()))
            .with_booking(BookingCategory::Come, -500)
            .with_booking(BookingCategory::Go, 3000);
        assert!(matches!(
            calculate_day(&input),
            Err(EngineError::InvalidBooking { minutes: -500, .. })
        ));
    }

    #[test]
    fn test_negative_max_net_rejected() {
        let mut plan = make_plan();
        plan.max_net_minutes = Some(-60);
        assert!(matches!(
            calculate_day(&standard_day(plan)),
            Err(EngineError::InvalidDayPlan { .. })
        ));
    }

    #[test]
    fn test_capped_net_never_negative() {
        let mut plan = make_plan();
        plan.max_net_minutes = Some(-60);
        let input = standard_day(plan.clone());
        let result = worked_day(&input, &plan, pair_bookings(&input.bookings));
        assert_eq!(result.net_minutes, 0);
        assert_eq!(result.capped_minutes, 540);
        assert_eq!(result.undertime_minutes, 480);
    }

    #[test]
    fn test_negative_absence_duration_rejected() {
        let mut input = make_input(Some(make_plan()));
        input.absence = Some(AbsenceFact::new("VAC", AbsenceCategory::Vacation, dec("-1")));
        assert!(matches!(
            calculate_day(&input),
            Err(EngineError::InvalidAbsence { .. })
        ));
    }

    #[test]
    fn test_shift_detection_validates_input() {
        let (day, plans) = detection_plans();
        let input = make_input(Some(day))
            .with_booking(BookingCategory::Come, 480)
            .with_booking(BookingCategory::Go, 1440);
        assert!(matches!(
            calculate_day_with_shift_detection(&input, &plans),
            Err(EngineError::InvalidBooking { minutes: 1440, .. })
        ));
    }

    // ==========================================================================
    // Shift detection
    // ==========================================================================

    fn detection_plans() -> (ScheduleConfig, HashMap<String, ScheduleConfig>) {
        let mut day = make_plan();
        day.id = "DAY".to_string();
        day.shift_detection = ShiftDetectionConfig {
            arrival_from: Some(480),
            arrival_to: Some(600),
            alternative_plans: vec!["EARLY".to_string()],
            ..Default::default()
        };
        let early = ScheduleConfig {
            id: "EARLY".to_string(),
            target_minutes: 450,
            shift_detection: ShiftDetectionConfig {
                arrival_from: Some(360),
                arrival_to: Some(480),
                ..Default::default()
            },
            ..Default::default()
        };
        let plans = [(day.id.clone(), day.clone()), (early.id.clone(), early)]
            .into_iter()
            .collect();
        (day, plans)
    }

    #[test]
    fn test_shift_detection_switches_plan() {
        let (day, plans) = detection_plans();
        let input = make_input(Some(day))
            .with_booking(BookingCategory::Come, 420)
            .with_booking(BookingCategory::Go, 900);
        let result = calculate_day_with_shift_detection(&input, &plans).unwrap().unwrap();

        assert_eq!(result.day_plan_id.as_deref(), Some("EARLY"));
        assert_eq!(result.target_minutes, 450);
        assert_eq!(result.overtime_minutes, 30);
        let detection = result.shift_detection.unwrap();
        assert!(!detection.is_original);
        assert!(!detection.has_error);
    }

    #[test]
    fn test_shift_detection_no_match_flags_error() {
        let (day, plans) = detection_plans();
        let input = make_input(Some(day))
            .with_booking(BookingCategory::Come, 700)
            .with_booking(BookingCategory::Go, 1200);
        let result = calculate_day_with_shift_detection(&input, &plans).unwrap().unwrap();

        assert_eq!(result.day_plan_id.as_deref(), Some("DAY"));
        assert!(result.errors.contains(&ErrorCode::NoMatchingShift));
        assert!(result.shift_detection.unwrap().has_error);
    }

    #[test]
    fn test_shift_detection_skipped_on_absence() {
        let (day, plans) = detection_plans();
        let mut input = make_input(Some(day)).with_booking(BookingCategory::Come, 700);
        input.absence = Some(AbsenceFact::new("VAC", AbsenceCategory::Vacation, dec("1")));
        let result = calculate_day_with_shift_detection(&input, &plans).unwrap().unwrap();
        assert!(result.shift_detection.is_none());
        assert!(!result.errors.contains(&ErrorCode::NoMatchingShift));
    }
}
