//! Error types for the time-accounting engine.
//!
//! Only configuration problems, malformed calculation input and rejected
//! state transitions are reported as [`EngineError`]. Policy violations found
//! on a computed day (missing punches, uncovered core time, ...) are not
//! errors in this sense; they are collected as codes on the `DailyResult`.

use thiserror::Error;

use crate::models::AccountKind;

/// The main error type for the time-accounting engine.
///
/// # Example
///
/// ```
/// use worktime_engine::error::EngineError;
///
/// let error = EngineError::InvalidTimeWindow {
///     field: "core_time".to_string(),
///     from: 900,
///     to: 540,
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid time window 'core_time': 900..540 (from must be before to, both within 0..=1440)"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A time window is inverted or out of the day range.
    #[error(
        "Invalid time window '{field}': {from}..{to} (from must be before to, both within 0..=1440)"
    )]
    InvalidTimeWindow {
        /// The configuration field holding the window.
        field: String,
        /// The configured start minute.
        from: i32,
        /// The configured end minute.
        to: i32,
    },

    /// A day plan failed validation.
    #[error("Invalid day plan '{plan_id}': {message}")]
    InvalidDayPlan {
        /// The id of the offending day plan.
        plan_id: String,
        /// What made the plan invalid.
        message: String,
    },

    /// A break rule inside a day plan failed validation.
    #[error("Invalid break rule #{index} in day plan '{plan_id}': {message}")]
    InvalidBreakRule {
        /// The id of the day plan owning the rule.
        plan_id: String,
        /// Position of the rule in the plan's break list.
        index: usize,
        /// What made the rule invalid.
        message: String,
    },

    /// A surcharge rule failed validation.
    #[error("Invalid surcharge rule for account '{account}': {message}")]
    InvalidSurchargeRule {
        /// The target account of the rule.
        account: String,
        /// What made the rule invalid.
        message: String,
    },

    /// Vacation calculation input was inconsistent.
    #[error("Invalid vacation input '{field}': {message}")]
    InvalidVacationInput {
        /// The offending input field.
        field: String,
        /// What made the field invalid.
        message: String,
    },

    /// A booking time is outside the day.
    #[error("Invalid booking '{booking_id}': minute {minutes} is outside 0..1440")]
    InvalidBooking {
        /// The id of the offending booking.
        booking_id: String,
        /// The original or edited minute that is out of range.
        minutes: i32,
    },

    /// An absence fact failed validation.
    #[error("Invalid absence '{type_code}': {message}")]
    InvalidAbsence {
        /// The absence type code.
        type_code: String,
        /// What made the absence invalid.
        message: String,
    },

    /// A referenced day plan does not exist.
    #[error("Day plan not found: {plan_id}")]
    DayPlanNotFound {
        /// The id that could not be resolved.
        plan_id: String,
    },

    /// A write was attempted on a closed month.
    #[error("Month {year}-{month:02} of employee '{employee_id}' is already closed")]
    MonthAlreadyClosed {
        /// The employee owning the month.
        employee_id: String,
        /// Calendar year.
        year: i32,
        /// Calendar month (1-12).
        month: u32,
    },

    /// A reopen was attempted on a month that is not closed.
    #[error("Month {year}-{month:02} of employee '{employee_id}' is not closed")]
    MonthNotClosed {
        /// The employee owning the month.
        employee_id: String,
        /// Calendar year.
        year: i32,
        /// Calendar month (1-12).
        month: u32,
    },

    /// A write was attempted on a closed account year.
    #[error("Account '{account}' of employee '{employee_id}' is already closed for {year}")]
    YearAlreadyClosed {
        /// The employee owning the account.
        employee_id: String,
        /// The account kind.
        account: AccountKind,
        /// The closed year.
        year: i32,
    },

    /// A reopen was attempted on an account year that is not closed.
    #[error("Account '{account}' of employee '{employee_id}' is not closed for {year}")]
    YearNotClosed {
        /// The employee owning the account.
        employee_id: String,
        /// The account kind.
        account: AccountKind,
        /// The year that was expected to be closed.
        year: i32,
    },

    /// No ledger entry exists for the key.
    #[error("No ledger entry for account '{account}' of employee '{employee_id}' in {year}")]
    LedgerEntryNotFound {
        /// The employee owning the account.
        employee_id: String,
        /// The account kind.
        account: AccountKind,
        /// The requested year.
        year: i32,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
