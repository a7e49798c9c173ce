//! Per-day calculation output.
//!
//! A [`DailyResult`] is produced once per (employee, date) and recomputed,
//! never patched, whenever an input changes. Error and warning codes are kept
//! in ordered sets so that merging the same finding twice is a no-op.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::booking::BookingPair;
use super::day_facts::AbsenceFact;

/// Policy errors found on a computed day; they block approval, not calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A go booking without a preceding come.
    MissingCome,
    /// A come booking without a following go.
    MissingGo,
    /// A break end without a preceding break start.
    MissingBreakStart,
    /// A break start without a following break end.
    MissingBreakEnd,
    /// First arrival is more than the grace period before the allowed window.
    CameBeforeAllowed,
    /// Last departure is more than the grace period after the allowed window.
    LeftAfterAllowed,
    /// Flextime work did not cover the core time.
    MissedCoreTime,
    /// Two bookings of the same category at the same minute.
    OverlappingBookings,
    /// A pair ended before it started after normalization.
    NegativeDuration,
    /// A planned day had no bookings and the plan treats that as an error.
    NoBookings,
    /// Neither the assigned plan nor any alternative matched the bookings.
    NoMatchingShift,
}

impl ErrorCode {
    /// The wire code, e.g. `MISSING_GO`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingCome => "MISSING_COME",
            ErrorCode::MissingGo => "MISSING_GO",
            ErrorCode::MissingBreakStart => "MISSING_BREAK_START",
            ErrorCode::MissingBreakEnd => "MISSING_BREAK_END",
            ErrorCode::CameBeforeAllowed => "CAME_BEFORE_ALLOWED",
            ErrorCode::LeftAfterAllowed => "LEFT_AFTER_ALLOWED",
            ErrorCode::MissedCoreTime => "MISSED_CORE_TIME",
            ErrorCode::OverlappingBookings => "OVERLAPPING_BOOKINGS",
            ErrorCode::NegativeDuration => "NEGATIVE_DURATION",
            ErrorCode::NoBookings => "NO_BOOKINGS",
            ErrorCode::NoMatchingShift => "NO_MATCHING_SHIFT",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-blocking findings on a computed day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// Arrived after the planned start plus tolerance.
    LateArrival,
    /// Left before the planned end minus tolerance.
    EarlyDeparture,
    /// More than ten hours gross.
    LongWorkDay,
    /// Net time was cut to the plan's maximum.
    NetTimeCapped,
    /// Net time stayed below the plan's minimum.
    BelowMinNetTime,
    /// A break was deducted without a booking.
    AutoBreakApplied,
    /// Bookings exist on a day without a plan.
    WorkedOnOffDay,
    /// An absence and a holiday fell on the same day.
    AbsenceOnHoliday,
}

impl WarningCode {
    /// The wire code, e.g. `LATE_ARRIVAL`.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::LateArrival => "LATE_ARRIVAL",
            WarningCode::EarlyDeparture => "EARLY_DEPARTURE",
            WarningCode::LongWorkDay => "LONG_WORK_DAY",
            WarningCode::NetTimeCapped => "NET_TIME_CAPPED",
            WarningCode::BelowMinNetTime => "BELOW_MIN_NET_TIME",
            WarningCode::AutoBreakApplied => "AUTO_BREAK_APPLIED",
            WarningCode::WorkedOnOffDay => "WORKED_ON_OFF_DAY",
            WarningCode::AbsenceOnHoliday => "ABSENCE_ON_HOLIDAY",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which branch of the daily calculation produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// Credited from an absence.
    Absence,
    /// Credited from a holiday.
    Holiday,
    /// No plan assigned.
    OffDay,
    /// Planned, but nothing booked.
    NoBookings,
    /// Calculated from bookings.
    Worked,
}

/// How a shift plan was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftMatchKind {
    /// Matched on the arrival window only.
    Arrival,
    /// Matched on the departure window only.
    Departure,
    /// Matched on both windows.
    Both,
    /// No windows involved (no detection configured, or no match).
    None,
}

/// Outcome of shift detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDetectionResult {
    /// Id of the plan that applies.
    pub matched_plan: String,
    /// Whether the matched plan is the assigned one.
    pub is_original: bool,
    /// Which windows produced the match.
    pub match_kind: ShiftMatchKind,
    /// Set when nothing matched and the assigned plan was used as fallback.
    pub has_error: bool,
    /// Explanation for manual correction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Errors and warnings found on a day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayIssues {
    /// Blocking findings.
    pub errors: BTreeSet<ErrorCode>,
    /// Informational findings.
    pub warnings: BTreeSet<WarningCode>,
}

impl DayIssues {
    /// Whether nothing was found.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// The computed metrics for one employee on one day.
///
/// # Example
///
/// ```
/// use worktime_engine::models::{DailyResult, DayKind, ErrorCode};
/// use chrono::NaiveDate;
///
/// let mut result = DailyResult::empty("emp_001", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), DayKind::OffDay);
/// assert!(!result.has_error());
/// result.errors.insert(ErrorCode::MissingGo);
/// result.errors.insert(ErrorCode::MissingGo);
/// assert_eq!(result.errors.len(), 1);
/// assert!(result.has_error());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyResult {
    /// Employee the result belongs to.
    pub employee_id: String,
    /// The calculated day.
    pub date: NaiveDate,
    /// The plan used, if any.
    pub day_plan_id: Option<String>,
    /// The branch that produced this result.
    pub kind: DayKind,
    /// Worked (or credited) time before breaks.
    pub gross_minutes: i32,
    /// Worked (or credited) time after breaks and caps.
    pub net_minutes: i32,
    /// Planned time.
    pub target_minutes: i32,
    /// `max(0, net - target)` on worked days.
    pub overtime_minutes: i32,
    /// `max(0, target - net)` on worked days.
    pub undertime_minutes: i32,
    /// Deducted break minutes.
    pub break_minutes: i32,
    /// Minutes removed by the maximum net time cap.
    pub capped_minutes: i32,
    /// Earliest normalized work start.
    pub first_come: Option<i32>,
    /// Latest normalized work end.
    pub last_go: Option<i32>,
    /// Normalized work pairs and booked break pairs.
    pub pairs: Vec<BookingPair>,
    /// The absence credited, if the absence branch applied.
    pub absence: Option<AbsenceFact>,
    /// Shift detection outcome, when detection ran.
    pub shift_detection: Option<ShiftDetectionResult>,
    /// Blocking findings.
    pub errors: BTreeSet<ErrorCode>,
    /// Informational findings.
    pub warnings: BTreeSet<WarningCode>,
}

impl DailyResult {
    /// An all-zero result of the given kind.
    pub fn empty(employee_id: &str, date: NaiveDate, kind: DayKind) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            date,
            day_plan_id: None,
            kind,
            gross_minutes: 0,
            net_minutes: 0,
            target_minutes: 0,
            overtime_minutes: 0,
            undertime_minutes: 0,
            break_minutes: 0,
            capped_minutes: 0,
            first_come: None,
            last_go: None,
            pairs: Vec::new(),
            absence: None,
            shift_detection: None,
            errors: BTreeSet::new(),
            warnings: BTreeSet::new(),
        }
    }

    /// Whether any error code is present.
    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Overtime minus undertime.
    pub fn balance_minutes(&self) -> i32 {
        self.overtime_minutes - self.undertime_minutes
    }

    /// Merges findings into the result; merging twice changes nothing.
    pub fn with_issues(mut self, issues: DayIssues) -> Self {
        self.errors.extend(issues.errors);
        self.warnings.extend(issues.warnings);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn test_error_code_wire_format_matches_display() {
        let codes = [
            ErrorCode::MissingCome,
            ErrorCode::MissingGo,
            ErrorCode::MissingBreakStart,
            ErrorCode::MissingBreakEnd,
            ErrorCode::CameBeforeAllowed,
            ErrorCode::LeftAfterAllowed,
            ErrorCode::MissedCoreTime,
            ErrorCode::OverlappingBookings,
            ErrorCode::NegativeDuration,
            ErrorCode::NoBookings,
            ErrorCode::NoMatchingShift,
        ];
        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code));
        }
    }

    #[test]
    fn test_warning_code_wire_format_matches_display() {
        let codes = [
            WarningCode::LateArrival,
            WarningCode::EarlyDeparture,
            WarningCode::LongWorkDay,
            WarningCode::NetTimeCapped,
            WarningCode::BelowMinNetTime,
            WarningCode::AutoBreakApplied,
            WarningCode::WorkedOnOffDay,
            WarningCode::AbsenceOnHoliday,
        ];
        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code));
        }
    }

    #[test]
    fn test_with_issues_is_idempotent() {
        let mut issues = DayIssues::default();
        issues.errors.insert(ErrorCode::MissedCoreTime);
        issues.warnings.insert(WarningCode::LateArrival);

        let once = DailyResult::empty("emp_001", make_date(), DayKind::Worked)
            .with_issues(issues.clone());
        let twice = once.clone().with_issues(issues);

        assert_eq!(once, twice);
        assert_eq!(twice.errors.len(), 1);
        assert_eq!(twice.warnings.len(), 1);
    }

    #[test]
    fn test_has_error_follows_error_set() {
        let mut result = DailyResult::empty("emp_001", make_date(), DayKind::Worked);
        result.warnings.insert(WarningCode::LongWorkDay);
        assert!(!result.has_error());
        result.errors.insert(ErrorCode::NegativeDuration);
        assert!(result.has_error());
    }

    #[test]
    fn test_daily_result_serialization() {
        let mut result = DailyResult::empty("emp_001", make_date(), DayKind::Worked);
        result.errors.insert(ErrorCode::MissingGo);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"errors\":[\"MISSING_GO\"]"));
        assert!(json.contains("\"kind\":\"worked\""));

        let deserialized: DailyResult = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, result);
    }
}
