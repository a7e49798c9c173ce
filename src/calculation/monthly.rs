//! Monthly aggregation and the month close state machine.
//!
//! [`aggregate_month`] sums a month of daily results and evaluates the
//! flextime balance. [`MonthAccount`] holds one employee's month and enforces
//! `open -> closed -> open` transitions; a closed month rejects every write.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AbsenceCategory, CloseStamp, DailyResult, DayKind, FlextimeCreditType, MonthlyEvaluation,
    MonthlyResult,
};

/// Carried balance and forfeited minutes after evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlextimeEvaluation {
    /// Balance carried into the next month.
    pub carryover: i32,
    /// `start + change - carryover`: positive for dropped credit, negative
    /// for forgiven debt.
    pub forfeited: i32,
}

/// Applies the monthly evaluation rules to a flextime balance.
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::evaluate_flextime;
/// use worktime_engine::models::{FlextimeCreditType, MonthlyEvaluation};
///
/// let rules = MonthlyEvaluation {
///     credit_type: FlextimeCreditType::Complete,
///     max_monthly_credit: Some(600),
///     ..Default::default()
/// };
/// let evaluated = evaluate_flextime(120, 900, &rules);
/// assert_eq!(evaluated.carryover, 720);
/// assert_eq!(evaluated.forfeited, 300);
/// ```
pub fn evaluate_flextime(start: i32, change: i32, rules: &MonthlyEvaluation) -> FlextimeEvaluation {
    let end = start + change;
    let carryover = match rules.credit_type {
        FlextimeCreditType::NoEvaluation => end,
        FlextimeCreditType::NoCarryover => 0,
        FlextimeCreditType::Complete => apply_limits(start + capped_credit(change, rules), rules),
        FlextimeCreditType::AfterThreshold => {
            let credited = if change > 0 {
                (change - rules.threshold_minutes.unwrap_or(0)).max(0)
            } else {
                change
            };
            apply_limits(start + capped_credit(credited, rules), rules)
        }
    };
    FlextimeEvaluation {
        carryover,
        forfeited: end - carryover,
    }
}

fn capped_credit(change: i32, rules: &MonthlyEvaluation) -> i32 {
    match rules.max_monthly_credit {
        Some(max) if change > max => max,
        _ => change,
    }
}

fn apply_limits(balance: i32, rules: &MonthlyEvaluation) -> i32 {
    let mut balance = balance;
    if let Some(upper) = rules.upper_limit {
        balance = balance.min(upper);
    }
    if let Some(lower) = rules.lower_limit {
        balance = balance.max(-lower);
    }
    balance
}

/// Sums a month of daily results.
///
/// `days` should belong to one employee and one month; they are summed as
/// given.
pub fn aggregate_month<'a, I>(
    employee_id: &str,
    year: i32,
    month: u32,
    flextime_start: i32,
    rules: &MonthlyEvaluation,
    days: I,
) -> MonthlyResult
where
    I: IntoIterator<Item = &'a DailyResult>,
{
    let mut result = MonthlyResult::new(employee_id, year, month, flextime_start);

    for day in days {
        result.total_gross_minutes += day.gross_minutes;
        result.total_net_minutes += day.net_minutes;
        result.total_target_minutes += day.target_minutes;
        result.total_overtime_minutes += day.overtime_minutes;
        result.total_undertime_minutes += day.undertime_minutes;
        result.total_break_minutes += day.break_minutes;
        if day.kind == DayKind::Worked {
            result.work_days += 1;
        }
        if day.has_error() {
            result.error_days += 1;
        }
        if let Some(absence) = &day.absence {
            match absence.category {
                AbsenceCategory::Vacation => result.vacation_days += absence.duration,
                AbsenceCategory::Illness => result.sick_days += absence.duration,
                AbsenceCategory::Special | AbsenceCategory::Unpaid => {}
            }
        }
    }

    result.flextime_change = result.total_overtime_minutes - result.total_undertime_minutes;
    result.flextime_end = flextime_start + result.flextime_change;
    let evaluated = evaluate_flextime(flextime_start, result.flextime_change, rules);
    result.flextime_carryover = evaluated.carryover;
    result.flextime_forfeited = evaluated.forfeited;
    result
}

/// One employee's month: its daily results and the running totals.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use worktime_engine::calculation::MonthAccount;
/// use worktime_engine::models::{DailyResult, DayKind, MonthlyEvaluation};
///
/// let mut month = MonthAccount::new("emp_001", 2026, 3, 0, MonthlyEvaluation::default());
/// let mut day = DailyResult::empty("emp_001", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), DayKind::Worked);
/// day.overtime_minutes = 45;
/// month.upsert_day(day).unwrap();
///
/// let at = Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap();
/// let closed = month.close("admin", at).unwrap();
/// assert!(closed.is_closed);
/// assert_eq!(closed.flextime_end, 45);
/// assert!(month.close("admin", at).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthAccount {
    rules: MonthlyEvaluation,
    days: BTreeMap<NaiveDate, DailyResult>,
    result: MonthlyResult,
}

impl MonthAccount {
    /// An open, empty month.
    pub fn new(
        employee_id: &str,
        year: i32,
        month: u32,
        flextime_start: i32,
        rules: MonthlyEvaluation,
    ) -> Self {
        Self {
            rules,
            days: BTreeMap::new(),
            result: MonthlyResult::new(employee_id, year, month, flextime_start),
        }
    }

    /// The current totals.
    pub fn result(&self) -> &MonthlyResult {
        &self.result
    }

    /// Whether the month is closed.
    pub fn is_closed(&self) -> bool {
        self.result.is_closed
    }

    /// The stored daily results in date order.
    pub fn days(&self) -> impl Iterator<Item = &DailyResult> {
        self.days.values()
    }

    /// Inserts or replaces the result for `day.date` and refreshes the totals.
    ///
    /// # Errors
    ///
    /// [`EngineError::MonthAlreadyClosed`] while closed;
    /// [`EngineError::CalculationError`] for a day of another employee or month.
    pub fn upsert_day(&mut self, day: DailyResult) -> EngineResult<()> {
        self.ensure_open()?;
        if day.employee_id != self.result.employee_id
            || day.date.year() != self.result.year
            || day.date.month() != self.result.month
        {
            return Err(EngineError::CalculationError {
                message: format!(
                    "day {} of {} does not belong to {} {}-{:02}",
                    day.date, day.employee_id, self.result.employee_id, self.result.year,
                    self.result.month
                ),
            });
        }
        self.days.insert(day.date, day);
        self.recompute();
        Ok(())
    }

    /// Removes the result for `date`, if stored.
    pub fn remove_day(&mut self, date: NaiveDate) -> EngineResult<Option<DailyResult>> {
        self.ensure_open()?;
        let removed = self.days.remove(&date);
        self.recompute();
        Ok(removed)
    }

    /// Replaces the balance carried in from the previous month.
    pub fn set_flextime_start(&mut self, flextime_start: i32) -> EngineResult<()> {
        self.ensure_open()?;
        self.result.flextime_start = flextime_start;
        self.recompute();
        Ok(())
    }

    /// Recomputes the month from its days and freezes it.
    pub fn close(&mut self, actor: &str, at: DateTime<Utc>) -> EngineResult<&MonthlyResult> {
        if self.result.is_closed {
            warn!(
                employee_id = %self.result.employee_id,
                year = self.result.year,
                month = self.result.month,
                actor,
                "close rejected: month already closed"
            );
            return Err(self.already_closed());
        }
        self.recompute();
        self.result.is_closed = true;
        self.result.closed = Some(CloseStamp {
            actor: actor.to_string(),
            at,
        });
        info!(
            employee_id = %self.result.employee_id,
            year = self.result.year,
            month = self.result.month,
            actor,
            flextime_carryover = self.result.flextime_carryover,
            "month closed"
        );
        Ok(&self.result)
    }

    /// Reopens a closed month.
    pub fn reopen(&mut self, actor: &str, at: DateTime<Utc>) -> EngineResult<()> {
        if !self.result.is_closed {
            warn!(
                employee_id = %self.result.employee_id,
                year = self.result.year,
                month = self.result.month,
                actor,
                "reopen rejected: month not closed"
            );
            return Err(EngineError::MonthNotClosed {
                employee_id: self.result.employee_id.clone(),
                year: self.result.year,
                month: self.result.month,
            });
        }
        self.result.is_closed = false;
        self.result.reopened = Some(CloseStamp {
            actor: actor.to_string(),
            at,
        });
        info!(
            employee_id = %self.result.employee_id,
            year = self.result.year,
            month = self.result.month,
            actor,
            "month reopened"
        );
        Ok(())
    }

    fn ensure_open(&self) -> EngineResult<()> {
        if self.result.is_closed {
            warn!(
                employee_id = %self.result.employee_id,
                year = self.result.year,
                month = self.result.month,
                "write rejected: month closed"
            );
            return Err(self.already_closed());
        }
        Ok(())
    }

    fn already_closed(&self) -> EngineError {
        EngineError::MonthAlreadyClosed {
            employee_id: self.result.employee_id.clone(),
            year: self.result.year,
            month: self.result.month,
        }
    }

    fn recompute(&mut self) {
        let fresh = aggregate_month(
            &self.result.employee_id,
            self.result.year,
            self.result.month,
            self.result.flextime_start,
            &self.rules,
            self.days.values(),
        );
        self.result = MonthlyResult {
            is_closed: self.result.is_closed,
            closed: self.result.closed.take(),
            reopened: self.result.reopened.take(),
            ..fresh
        };
    }
}
