//! Monthly totals and flextime evaluation settings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Who changed a close state, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseStamp {
    /// The acting user.
    pub actor: String,
    /// When the transition happened.
    pub at: DateTime<Utc>,
}

/// How a month's flextime balance is carried into the next month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlextimeCreditType {
    /// Carry the raw balance, no caps.
    #[default]
    NoEvaluation,
    /// Carry the balance subject to the monthly credit cap and annual limits.
    Complete,
    /// Positive change counts only above the threshold, then as `Complete`.
    AfterThreshold,
    /// Nothing is carried over.
    NoCarryover,
}

/// Monthly flextime evaluation rules.
///
/// # Example
///
/// ```
/// use worktime_engine::models::{FlextimeCreditType, MonthlyEvaluation};
///
/// let rules: MonthlyEvaluation = serde_yaml::from_str("credit_type: complete\nupper_limit: 6000").unwrap();
/// assert_eq!(rules.credit_type, FlextimeCreditType::Complete);
/// assert_eq!(rules.upper_limit, Some(6000));
/// assert_eq!(rules.lower_limit, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthlyEvaluation {
    /// Carryover mode.
    #[serde(default)]
    pub credit_type: FlextimeCreditType,
    /// Largest positive change credited in one month.
    #[serde(default)]
    pub max_monthly_credit: Option<i32>,
    /// Positive change below this is not credited (`after_threshold`).
    #[serde(default)]
    pub threshold_minutes: Option<i32>,
    /// Highest balance carried over.
    #[serde(default)]
    pub upper_limit: Option<i32>,
    /// Magnitude of the lowest (negative) balance carried over.
    #[serde(default)]
    pub lower_limit: Option<i32>,
}

/// The aggregated result of one employee's month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyResult {
    /// Employee the month belongs to.
    pub employee_id: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Sum of daily gross time.
    pub total_gross_minutes: i32,
    /// Sum of daily net time.
    pub total_net_minutes: i32,
    /// Sum of daily target time.
    pub total_target_minutes: i32,
    /// Sum of daily overtime.
    pub total_overtime_minutes: i32,
    /// Sum of daily undertime.
    pub total_undertime_minutes: i32,
    /// Sum of daily break deductions.
    pub total_break_minutes: i32,
    /// Balance carried in from the previous month.
    pub flextime_start: i32,
    /// Overtime minus undertime of this month.
    pub flextime_change: i32,
    /// `flextime_start + flextime_change` before evaluation.
    pub flextime_end: i32,
    /// Balance carried into the next month after evaluation.
    pub flextime_carryover: i32,
    /// Minutes dropped by the evaluation rules.
    pub flextime_forfeited: i32,
    /// Days calculated from bookings.
    pub work_days: u32,
    /// Vacation days taken (half days count 0.5).
    pub vacation_days: Decimal,
    /// Sick days (half days count 0.5).
    pub sick_days: Decimal,
    /// Days carrying at least one error code.
    pub error_days: u32,
    /// Whether the month is frozen.
    pub is_closed: bool,
    /// The last close.
    #[serde(default)]
    pub closed: Option<CloseStamp>,
    /// The last reopen.
    #[serde(default)]
    pub reopened: Option<CloseStamp>,
}

impl MonthlyResult {
    /// An open month with all totals zero.
    pub fn new(employee_id: &str, year: i32, month: u32, flextime_start: i32) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            year,
            month,
            total_gross_minutes: 0,
            total_net_minutes: 0,
            total_target_minutes: 0,
            total_overtime_minutes: 0,
            total_undertime_minutes: 0,
            total_break_minutes: 0,
            flextime_start,
            flextime_change: 0,
            flextime_end: flextime_start,
            flextime_carryover: flextime_start,
            flextime_forfeited: 0,
            work_days: 0,
            vacation_days: Decimal::ZERO,
            sick_days: Decimal::ZERO,
            error_days: 0,
            is_closed: false,
            closed: None,
            reopened: None,
        }
    }
}
