//! The input of one daily calculation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::booking::{BookingCategory, BookingEvent};
use super::day_facts::{AbsenceFact, HolidayFact};
use super::schedule::ScheduleConfig;
use crate::error::EngineResult;

/// Everything known about one employee's day.
///
/// `day_plan` is `None` on off days. Bookings may be in any order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayInput {
    /// The employee.
    pub employee_id: String,
    /// The calculated day.
    pub date: NaiveDate,
    /// The assigned plan.
    #[serde(default)]
    pub day_plan: Option<ScheduleConfig>,
    /// The day's bookings.
    #[serde(default)]
    pub bookings: Vec<BookingEvent>,
    /// A registered absence.
    #[serde(default)]
    pub absence: Option<AbsenceFact>,
    /// A holiday on this date.
    #[serde(default)]
    pub holiday: Option<HolidayFact>,
}

impl DayInput {
    /// A day with a plan and no bookings, absences or holidays.
    pub fn new(employee_id: &str, date: NaiveDate, day_plan: Option<ScheduleConfig>) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            date,
            day_plan,
            bookings: Vec::new(),
            absence: None,
            holiday: None,
        }
    }

    /// Adds an unedited booking.
    pub fn with_booking(mut self, category: BookingCategory, minutes: i32) -> Self {
        self.bookings.push(BookingEvent::new(category, minutes));
        self
    }

    /// Checks the plan, every booking and the absence.
    pub fn validate(&self) -> EngineResult<()> {
        if let Some(plan) = &self.day_plan {
            plan.validate()?;
        }
        for booking in &self.bookings {
            booking.validate()?;
        }
        if let Some(absence) = &self.absence {
            absence.validate()?;
        }
        Ok(())
    }

    /// Earliest effective come booking.
    pub fn first_come(&self) -> Option<i32> {
        self.effective_times(BookingCategory::Come).min()
    }

    /// Latest effective go booking.
    pub fn last_go(&self) -> Option<i32> {
        self.effective_times(BookingCategory::Go).max()
    }

    fn effective_times(&self, category: BookingCategory) -> impl Iterator<Item = i32> + '_ {
        self.bookings
            .iter()
            .filter(move |b| b.category == category)
            .map(BookingEvent::effective_minutes)
    }
}
