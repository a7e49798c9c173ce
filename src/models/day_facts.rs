//! Absence and holiday facts for a single day.
//!
//! These are supplied by the caller next to the bookings; the engine never
//! looks them up itself.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The kind of absence, used for monthly day counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceCategory {
    /// Paid vacation.
    Vacation,
    /// Sickness.
    Illness,
    /// Special leave (training, bereavement, ...).
    Special,
    /// Unpaid leave.
    Unpaid,
}

/// An absence registered for the day.
///
/// # Example
///
/// ```
/// use worktime_engine::models::{AbsenceCategory, AbsenceFact};
/// use rust_decimal::Decimal;
///
/// let half_day = AbsenceFact::new("UL", AbsenceCategory::Vacation, Decimal::new(5, 1));
/// assert_eq!(half_day.credited_minutes(480), 240);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceFact {
    /// The absence type code (e.g. "UL" for vacation).
    pub type_code: String,
    /// The category of the absence.
    pub category: AbsenceCategory,
    /// Whether the absence credits the day's target time.
    #[serde(default = "default_true")]
    pub credits_hours: bool,
    /// Portion of the day covered: 1.0 for a full day, 0.5 for half.
    #[serde(default = "default_full_day")]
    pub duration: Decimal,
    /// Conflict priority against a holiday on the same day (higher wins).
    #[serde(default)]
    pub priority: i32,
}

fn default_true() -> bool {
    true
}

fn default_full_day() -> Decimal {
    Decimal::ONE
}

impl AbsenceFact {
    /// Creates a crediting absence with priority 0.
    pub fn new(type_code: &str, category: AbsenceCategory, duration: Decimal) -> Self {
        Self {
            type_code: type_code.to_string(),
            category,
            credits_hours: true,
            duration,
            priority: 0,
        }
    }

    /// Checks that `duration` is a full (1.0) or half (0.5) day.
    pub fn validate(&self) -> EngineResult<()> {
        let half_day = Decimal::new(5, 1);
        if self.duration != Decimal::ONE && self.duration != half_day {
            return Err(EngineError::InvalidAbsence {
                type_code: self.type_code.clone(),
                message: format!("duration {} must be 1.0 or 0.5", self.duration),
            });
        }
        Ok(())
    }

    /// Minutes credited for `target_minutes`, rounded half away from zero.
    ///
    /// Non-crediting absences credit nothing.
    pub fn credited_minutes(&self, target_minutes: i32) -> i32 {
        if !self.credits_hours {
            return 0;
        }
        minutes_of_fraction(target_minutes, self.duration)
    }
}

/// `minutes * fraction` rounded to whole minutes.
fn minutes_of_fraction(minutes: i32, fraction: Decimal) -> i32 {
    (Decimal::from(minutes) * fraction)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i32()
        .unwrap_or(0)
}

/// Holiday category as defined in the holiday calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayCategory {
    /// Category 1: full holiday.
    #[default]
    Full,
    /// Category 2: half or partially credited holiday.
    Half,
    /// Category 3: holiday without time credit.
    #[serde(rename = "none")]
    NoCredit,
}

/// A holiday falling on the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HolidayFact {
    /// The holiday category.
    #[serde(default)]
    pub category: HolidayCategory,
    /// Conflict priority against an absence on the same day (higher wins).
    #[serde(default)]
    pub priority: i32,
}

impl HolidayFact {
    /// A holiday of the given category with priority 0.
    pub fn new(category: HolidayCategory) -> Self {
        Self {
            category,
            priority: 0,
        }
    }
}
