//! Surcharge (bonus account) rules and results.

use serde::{Deserialize, Serialize};

use super::day_facts::HolidayCategory;
use super::time_window::MINUTES_PER_DAY;
use crate::error::{EngineError, EngineResult};

/// Credits minutes worked inside `[time_from, time_to)` to a bonus account.
///
/// Windows never wrap midnight; a night window such as 22:00-06:00 is
/// configured as two rules (see `split_overnight_window`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeRule {
    /// Target bonus account code (e.g. "night").
    pub account: String,
    /// Window start minute (inclusive).
    pub time_from: i32,
    /// Window end minute (exclusive).
    pub time_to: i32,
    /// Applies on ordinary working days.
    #[serde(default)]
    pub applies_on_workday: bool,
    /// Applies on holidays.
    #[serde(default)]
    pub applies_on_holiday: bool,
    /// Restricts holiday application to these categories; empty means all.
    #[serde(default)]
    pub holiday_categories: Vec<HolidayCategory>,
}

impl SurchargeRule {
    /// Checks the account code and `0 <= time_from < time_to <= 1440`.
    ///
    /// # Example
    ///
    /// ```
    /// use worktime_engine::models::SurchargeRule;
    ///
    /// let overnight = SurchargeRule {
    ///     account: "night".to_string(),
    ///     time_from: 1320,
    ///     time_to: 360,
    ///     applies_on_workday: true,
    ///     applies_on_holiday: true,
    ///     holiday_categories: vec![],
    /// };
    /// assert!(overnight.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidSurchargeRule {
            account: self.account.clone(),
            message,
        };

        if self.account.trim().is_empty() {
            return Err(invalid("account must not be empty".to_string()));
        }
        if self.time_from < 0 || self.time_to > MINUTES_PER_DAY {
            return Err(invalid(format!(
                "window {}..{} is outside 0..=1440",
                self.time_from, self.time_to
            )));
        }
        if self.time_from >= self.time_to {
            return Err(invalid(format!(
                "window {}..{} must not cross midnight or be empty; split it at 00:00",
                self.time_from, self.time_to
            )));
        }
        Ok(())
    }

    /// Whether the rule applies to a day classified by `holiday`.
    pub fn applies_to(&self, holiday: Option<HolidayCategory>) -> bool {
        match holiday {
            None => self.applies_on_workday,
            Some(category) => {
                self.applies_on_holiday
                    && (self.holiday_categories.is_empty()
                        || self.holiday_categories.contains(&category))
            }
        }
    }
}

/// Minutes credited to a bonus account for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeResult {
    /// The bonus account.
    pub account: String,
    /// Credited minutes.
    pub minutes: i32,
}
