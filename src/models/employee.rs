//! Employee model.
//!
//! Only the employment facts the engine needs are modelled here; identity,
//! contracts and tenant data live in the surrounding system.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employment facts of one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's date of birth.
    pub date_of_birth: NaiveDate,
    /// First day of employment.
    pub entry_date: NaiveDate,
    /// Last day of employment, if known.
    #[serde(default)]
    pub exit_date: Option<NaiveDate>,
    /// Contracted weekly hours.
    pub weekly_hours: Decimal,
    /// Whether a recognised severe disability applies.
    #[serde(default)]
    pub has_disability: bool,
}

impl Employee {
    /// Age in completed years on `date`.
    ///
    /// # Examples
    ///
    /// ```
    /// use worktime_engine::models::Employee;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     date_of_birth: NaiveDate::from_ymd_opt(1976, 6, 15).unwrap(),
    ///     entry_date: NaiveDate::from_ymd_opt(2010, 4, 1).unwrap(),
    ///     exit_date: None,
    ///     weekly_hours: Decimal::new(40, 0),
    ///     has_disability: false,
    /// };
    /// assert_eq!(employee.age_on(NaiveDate::from_ymd_opt(2026, 6, 14).unwrap()), 49);
    /// assert_eq!(employee.age_on(NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()), 50);
    /// ```
    pub fn age_on(&self, date: NaiveDate) -> i32 {
        completed_years(self.date_of_birth, date)
    }

    /// Completed years of service on `date`.
    pub fn tenure_on(&self, date: NaiveDate) -> i32 {
        completed_years(self.entry_date, date)
    }
}

/// Completed years between `since` and `on`; zero if `on` is earlier.
pub(crate) fn completed_years(since: NaiveDate, on: NaiveDate) -> i32 {
    if on < since {
        return 0;
    }
    let mut years = on.year() - since.year();
    if (on.month(), on.day()) < (since.month(), since.day()) {
        years -= 1;
    }
    years
}
