//! Minute-of-day values and time windows.
//!
//! All clock values in the engine are integer minutes from midnight.
//! Instants live in `0..1440`, window ends may be `1440` (end of day).

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of minutes in a day; the largest valid window end.
pub const MINUTES_PER_DAY: i32 = 1440;

/// A non-wrapping window `[from, to)` within a single day.
///
/// # Example
///
/// ```
/// use worktime_engine::models::TimeWindow;
///
/// let core = TimeWindow::new("core_time", 540, 900).unwrap();
/// assert_eq!(core.duration(), 360);
/// assert!(core.contains(540));
/// assert!(!core.contains(900));
/// assert!(TimeWindow::new("core_time", 900, 540).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start minute (inclusive).
    pub from: i32,
    /// End minute (exclusive).
    pub to: i32,
}

impl TimeWindow {
    /// Creates a validated window; `field` names the window in the error.
    pub fn new(field: &str, from: i32, to: i32) -> EngineResult<Self> {
        let window = Self { from, to };
        window.validate(field)?;
        Ok(window)
    }

    /// Checks `0 <= from < to <= 1440`.
    pub fn validate(&self, field: &str) -> EngineResult<()> {
        if self.from < 0 || self.to > MINUTES_PER_DAY || self.from >= self.to {
            return Err(EngineError::InvalidTimeWindow {
                field: field.to_string(),
                from: self.from,
                to: self.to,
            });
        }
        Ok(())
    }

    /// Length of the window in minutes.
    pub fn duration(&self) -> i32 {
        self.to - self.from
    }

    /// Whether `minute` falls in `[from, to)`.
    pub fn contains(&self, minute: i32) -> bool {
        minute >= self.from && minute < self.to
    }

    /// Minutes shared by this window and `[start, end)`.
    pub fn overlap(&self, start: i32, end: i32) -> i32 {
        overlap_minutes(self.from, self.to, start, end)
    }
}

/// Minutes shared by `[a_start, a_end)` and `[b_start, b_end)`, never negative.
pub fn overlap_minutes(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> i32 {
    (a_end.min(b_end) - a_start.max(b_start)).max(0)
}

/// Formats a minute-of-day value as `HH:MM`.
pub fn format_minutes(minutes: i32) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let abs = minutes.abs();
    format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
}
