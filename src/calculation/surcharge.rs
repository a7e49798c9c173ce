//! Surcharge (bonus account) calculation.
//!
//! Each rule credits the minutes worked inside its `[time_from, time_to)`
//! window to a bonus account. Windows never cross midnight; overnight
//! windows are split beforehand with [`split_overnight_window`].

use crate::error::{EngineError, EngineResult};
use crate::models::{
    BookingPair, DailyResult, DayKind, HolidayCategory, MINUTES_PER_DAY, SurchargeResult,
    SurchargeRule, overlap_minutes,
};

/// Credits work pairs to bonus accounts.
///
/// `holiday` classifies the day: `None` for an ordinary working day. Rules
/// whose applicability does not match are skipped. Minutes are summed over
/// all work pairs, so split shifts are credited in full. Rules yielding zero
/// minutes produce no entry.
///
/// # Errors
///
/// [`EngineError::InvalidSurchargeRule`] for any rule whose window is empty,
/// out of range or crosses midnight.
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::calculate_surcharges;
/// use worktime_engine::models::{BookingPair, PairKind, SurchargeRule};
/// use uuid::Uuid;
///
/// let night = SurchargeRule {
///     account: "night".to_string(),
///     time_from: 1320,
///     time_to: 1440,
///     applies_on_workday: true,
///     applies_on_holiday: false,
///     holiday_categories: vec![],
/// };
/// let shift = BookingPair {
///     start_booking: Uuid::new_v4(),
///     end_booking: Uuid::new_v4(),
///     kind: PairKind::Work,
///     start: 1200,
///     end: 1380,
/// };
///
/// let results = calculate_surcharges(&[night], &[shift], None).unwrap();
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].minutes, 60);
/// ```
pub fn calculate_surcharges(
    rules: &[SurchargeRule],
    pairs: &[BookingPair],
    holiday: Option<HolidayCategory>,
) -> EngineResult<Vec<SurchargeResult>> {
    let mut results = Vec::new();

    for rule in rules {
        rule.validate()?;
        if !rule.applies_to(holiday) {
            continue;
        }

        let minutes: i32 = pairs
            .iter()
            .filter(|p| p.is_work())
            .map(|p| overlap_minutes(rule.time_from, rule.time_to, p.start, p.end))
            .sum();
        if minutes > 0 {
            results.push(SurchargeResult {
                account: rule.account.clone(),
                minutes,
            });
        }
    }

    Ok(results)
}

/// Credits a calculated day's work pairs.
///
/// Holiday days are classified by `holiday`; every other day kind counts as
/// a working day.
pub fn calculate_day_surcharges(
    rules: &[SurchargeRule],
    day: &DailyResult,
    holiday: Option<HolidayCategory>,
) -> EngineResult<Vec<SurchargeResult>> {
    let classification = match day.kind {
        DayKind::Holiday => holiday.or(Some(HolidayCategory::Full)),
        _ => holiday,
    };
    calculate_surcharges(rules, &day.pairs, classification)
}

/// Splits a window that crosses midnight into `[from, 1440)` and `[0, to)`.
///
/// A window that does not cross midnight is returned as is. Both parts keep
/// the account and applicability of the original.
///
/// # Example
///
/// ```
/// use worktime_engine::calculation::split_overnight_window;
/// use worktime_engine::models::SurchargeRule;
///
/// let night = SurchargeRule {
///     account: "night".to_string(),
///     time_from: 1320,
///     time_to: 360,
///     applies_on_workday: true,
///     applies_on_holiday: true,
///     holiday_categories: vec![],
/// };
/// let parts = split_overnight_window(&night).unwrap();
/// assert_eq!((parts[0].time_from, parts[0].time_to), (1320, 1440));
/// assert_eq!((parts[1].time_from, parts[1].time_to), (0, 360));
/// ```
pub fn split_overnight_window(rule: &SurchargeRule) -> EngineResult<Vec<SurchargeRule>> {
    if rule.time_from < rule.time_to {
        rule.validate()?;
        return Ok(vec![rule.clone()]);
    }
    if rule.time_from == rule.time_to
        || !(0..MINUTES_PER_DAY).contains(&rule.time_from)
        || !(0..=MINUTES_PER_DAY).contains(&rule.time_to)
    {
        return Err(EngineError::InvalidSurchargeRule {
            account: rule.account.clone(),
            message: format!(
                "window {}..{} cannot be split at midnight",
                rule.time_from, rule.time_to
            ),
        });
    }

    let mut parts = vec![SurchargeRule {
        time_to: MINUTES_PER_DAY,
        ..rule.clone()
    }];
    if rule.time_to > 0 {
        parts.push(SurchargeRule {
            time_from: 0,
            ..rule.clone()
        });
    }
    for part in &parts {
        part.validate()?;
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PairKind;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn make_rule(account: &str, from: i32, to: i32) -> SurchargeRule {
        SurchargeRule {
            account: account.to_string(),
            time_from: from,
            time_to: to,
            applies_on_workday: true,
            applies_on_holiday: false,
            holiday_categories: vec![],
        }
    }

    fn make_pair(kind: PairKind, start: i32, end: i32) -> BookingPair {
        BookingPair {
            start_booking: Uuid::new_v4(),
            end_booking: Uuid::new_v4(),
            kind,
            start,
            end,
        }
    }

    #[test]
    fn test_night_window_overlap() {
        let results = calculate_surcharges(
            &[make_rule("night", 1320, 1440)],
            &[make_pair(PairKind::Work, 1200, 1380)],
            None,
        )
        .unwrap();
        assert_eq!(
            results,
            vec![SurchargeResult {
                account: "night".to_string(),
                minutes: 60
            }]
        );
    }

    #[test]
    fn test_split_shift_sums_all_pairs() {
        let results = calculate_surcharges(
            &[make_rule("early", 300, 420)],
            &[
                make_pair(PairKind::Work, 330, 360),
                make_pair(PairKind::Work, 390, 600),
            ],
            None,
        )
        .unwrap();
        assert_eq!(results[0].minutes, 60);
    }

    #[test]
    fn test_break_pairs_ignored() {
        let results = calculate_surcharges(
            &[make_rule("night", 1320, 1440)],
            &[make_pair(PairKind::Break, 1320, 1380)],
            None,
        )
        .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_no_overlap_yields_no_entry() {
        let results = calculate_surcharges(
            &[make_rule("night", 1320, 1440)],
            &[make_pair(PairKind::Work, 480, 1020)],
            None,
        )
        .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_crossing_window_rejected() {
        let result = calculate_surcharges(
            &[make_rule("night", 1320, 360)],
            &[make_pair(PairKind::Work, 1200, 1380)],
            None,
        );
        assert!(matches!(result, Err(EngineError::InvalidSurchargeRule { .. })));
    }

    #[test]
    fn test_holiday_applicability() {
        let mut holiday_rule = make_rule("holiday", 0, 1440);
        holiday_rule.applies_on_workday = false;
        holiday_rule.applies_on_holiday = true;
        holiday_rule.holiday_categories = vec![HolidayCategory::Full];
        let pairs = [make_pair(PairKind::Work, 480, 720)];

        let workday = calculate_surcharges(&[holiday_rule.clone()], &pairs, None).unwrap();
        assert!(workday.is_empty());

        let full = calculate_surcharges(&[holiday_rule.clone()], &pairs, Some(HolidayCategory::Full))
            .unwrap();
        assert_eq!(full[0].minutes, 240);

        let half =
            calculate_surcharges(&[holiday_rule], &pairs, Some(HolidayCategory::Half)).unwrap();
        assert!(half.is_empty());
    }

    #[test]
    fn test_split_overnight_window() {
        let parts = split_overnight_window(&make_rule("night", 1320, 360)).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!((parts[0].time_from, parts[0].time_to), (1320, 1440));
        assert_eq!((parts[1].time_from, parts[1].time_to), (0, 360));
        assert!(parts.iter().all(|p| p.account == "night"));
    }

    #[test]
    fn test_split_window_ending_at_midnight() {
        let parts = split_overnight_window(&make_rule("late", 1320, 0)).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!((parts[0].time_from, parts[0].time_to), (1320, 1440));
    }

    #[test]
    fn test_split_keeps_plain_window() {
        let parts = split_overnight_window(&make_rule("day", 360, 1200)).unwrap();
        assert_eq!(parts, vec![make_rule("day", 360, 1200)]);
    }

    #[test]
    fn test_split_rejects_empty_window() {
        assert!(split_overnight_window(&make_rule("night", 600, 600)).is_err());
        assert!(split_overnight_window(&make_rule("night", 1500, 60)).is_err());
    }

    #[test]
    fn test_split_parts_credit_both_sides_of_midnight() {
        let parts = split_overnight_window(&make_rule("night", 1320, 360)).unwrap();
        let results = calculate_surcharges(
            &parts,
            &[
                make_pair(PairKind::Work, 0, 120),
                make_pair(PairKind::Work, 1380, 1440),
            ],
            None,
        )
        .unwrap();
        let total: i32 = results.iter().map(|r| r.minutes).sum();
        assert_eq!(total, 180);
    }

    #[test]
    fn test_day_surcharges_classify_holiday() {
        let mut rule = make_rule("holiday", 0, 1440);
        rule.applies_on_workday = false;
        rule.applies_on_holiday = true;

        let mut day = DailyResult::empty(
            "emp_001",
            NaiveDate::from_ymd_opt(2026, 12, 25).unwrap(),
            DayKind::Holiday,
        );
        day.pairs = vec![make_pair(PairKind::Work, 600, 720)];

        let results = calculate_day_surcharges(&[rule.clone()], &day, None).unwrap();
        assert_eq!(results[0].minutes, 120);

        day.kind = DayKind::Worked;
        assert!(calculate_day_surcharges(&[rule], &day, None).unwrap().is_empty());
    }
}
