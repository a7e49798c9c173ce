//! Vacation entitlement.
//!
//! The yearly entitlement is derived in fixed steps: months employed in the
//! period, pro-rating, part-time scaling, stackable special bonuses and
//! rounding to the nearest half day. All arithmetic is exact decimal.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    BonusKind, CalculationBasis, Employee, VacationCalcInput, VacationCalcOutput, VacationPolicy,
    completed_years,
};

const MONTHS_PER_YEAR: u32 = 12;

/// Computes the entitlement for one year.
///
/// # Errors
///
/// [`EngineError::InvalidVacationInput`] when standard weekly hours are not
/// positive, weekly hours or the base entitlement are negative, or the exit
/// date precedes the entry date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use worktime_engine::calculation::calculate_vacation_entitlement;
/// use worktime_engine::models::{CalculationBasis, VacationCalcInput};
///
/// let input = VacationCalcInput {
///     year: 2026,
///     birth_date: NaiveDate::from_ymd_opt(1990, 5, 10).unwrap(),
///     entry_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
///     exit_date: None,
///     weekly_hours: Decimal::new(40, 0),
///     standard_weekly_hours: Decimal::new(40, 0),
///     has_disability: false,
///     base_entitlement: Decimal::new(30, 0),
///     basis: CalculationBasis::CalendarYear,
///     special_rules: vec![],
/// };
///
/// let output = calculate_vacation_entitlement(&input).unwrap();
/// assert_eq!(output.months_employed, 6);
/// assert_eq!(output.total_entitlement, Decimal::new(15, 0));
/// ```
pub fn calculate_vacation_entitlement(input: &VacationCalcInput) -> EngineResult<VacationCalcOutput> {
    validate_input(input)?;

    let (period_start, period_end) = entitlement_period(input);
    let employed_from = period_start.max(input.entry_date);
    let employed_to = input
        .exit_date
        .map_or(period_end, |exit| exit.min(period_end));
    let months_employed = months_between(employed_from, employed_to);

    let prorated_entitlement =
        input.base_entitlement * Decimal::from(months_employed) / Decimal::from(MONTHS_PER_YEAR);
    let part_time_adjusted =
        prorated_entitlement * input.weekly_hours / input.standard_weekly_hours;

    let age = completed_years(input.birth_date, period_start);
    let tenure = completed_years(input.entry_date, period_start);

    let mut age_bonus = Decimal::ZERO;
    let mut tenure_bonus = Decimal::ZERO;
    let mut disability_bonus = Decimal::ZERO;
    for rule in &input.special_rules {
        let threshold = i32::try_from(rule.threshold).unwrap_or(i32::MAX);
        match rule.kind {
            BonusKind::Age if age >= threshold => age_bonus += rule.bonus_days,
            BonusKind::Tenure if tenure >= threshold => tenure_bonus += rule.bonus_days,
            BonusKind::Disability if input.has_disability => disability_bonus += rule.bonus_days,
            _ => {}
        }
    }

    let total_entitlement =
        round_to_half_day(part_time_adjusted + age_bonus + tenure_bonus + disability_bonus);

    Ok(VacationCalcOutput {
        base_entitlement: input.base_entitlement,
        months_employed,
        prorated_entitlement,
        part_time_adjusted,
        age_bonus,
        tenure_bonus,
        disability_bonus,
        total_entitlement,
    })
}

/// Computes an employee's entitlement under the configured policy.
pub fn calculate_employee_entitlement(
    policy: &VacationPolicy,
    employee: &Employee,
    year: i32,
) -> EngineResult<VacationCalcOutput> {
    calculate_vacation_entitlement(&policy.input_for(employee, year))
}

/// Days carried into the next year: `min(available, max_carryover)`, zero if
/// nothing is available.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use worktime_engine::calculation::calculate_carryover;
///
/// assert_eq!(calculate_carryover(Decimal::new(12, 0), Some(Decimal::new(10, 0))), Decimal::new(10, 0));
/// assert_eq!(calculate_carryover(Decimal::new(4, 0), Some(Decimal::new(10, 0))), Decimal::new(4, 0));
/// assert_eq!(calculate_carryover(Decimal::new(-2, 0), None), Decimal::ZERO);
/// ```
pub fn calculate_carryover(available: Decimal, max_carryover: Option<Decimal>) -> Decimal {
    if available <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match max_carryover {
        Some(max) => available.min(max.max(Decimal::ZERO)),
        None => available,
    }
}

/// Rounds to the nearest half day, halves away from zero.
pub fn round_to_half_day(days: Decimal) -> Decimal {
    (days * Decimal::TWO).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        / Decimal::TWO
}

fn validate_input(input: &VacationCalcInput) -> EngineResult<()> {
    let invalid = |field: &str, message: &str| EngineError::InvalidVacationInput {
        field: field.to_string(),
        message: message.to_string(),
    };

    if input.standard_weekly_hours <= Decimal::ZERO {
        return Err(invalid("standard_weekly_hours", "must be positive"));
    }
    if input.weekly_hours < Decimal::ZERO {
        return Err(invalid("weekly_hours", "must not be negative"));
    }
    if input.base_entitlement < Decimal::ZERO {
        return Err(invalid("base_entitlement", "must not be negative"));
    }
    if input.exit_date.is_some_and(|exit| exit < input.entry_date) {
        return Err(invalid("exit_date", "must not precede entry_date"));
    }
    Ok(())
}

/// First and last day of the entitlement period for `input.year`.
fn entitlement_period(input: &VacationCalcInput) -> (NaiveDate, NaiveDate) {
    match input.basis {
        CalculationBasis::CalendarYear => (
            first_of_year(input.year),
            first_of_year(input.year + 1) - chrono::Days::new(1),
        ),
        CalculationBasis::EntryDate => (
            anniversary(input.entry_date, input.year),
            anniversary(input.entry_date, input.year + 1) - chrono::Days::new(1),
        ),
    }
}

fn first_of_year(year: i32) -> NaiveDate {
    NaiveDate::from_yo_opt(year, 1).unwrap_or(NaiveDate::MIN)
}

/// The entry anniversary in `year`; Feb 29 falls back to Feb 28.
fn anniversary(entry: NaiveDate, year: i32) -> NaiveDate {
    entry
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, entry.month(), 28))
        .unwrap_or(NaiveDate::MIN)
}

/// Started months in `[start, end]`, capped at twelve.
///
/// A trailing partial month counts when `end` reaches the day of month of
/// `start`.
fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() >= start.day() {
        months += 1;
    }
    months.clamp(0, MONTHS_PER_YEAR as i32) as u32
}
