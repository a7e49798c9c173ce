//! Booking events and the pairs built from them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time_window::MINUTES_PER_DAY;
use crate::error::{EngineError, EngineResult};

/// The category of a raw booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingCategory {
    /// Clock-in.
    Come,
    /// Clock-out.
    Go,
    /// Start of a booked break.
    BreakStart,
    /// End of a booked break.
    BreakEnd,
}

impl std::fmt::Display for BookingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingCategory::Come => write!(f, "come"),
            BookingCategory::Go => write!(f, "go"),
            BookingCategory::BreakStart => write!(f, "break_start"),
            BookingCategory::BreakEnd => write!(f, "break_end"),
        }
    }
}

/// A single clock event of one employee on one day.
///
/// Corrections are recorded in `edited_minutes`; `original_minutes` is never
/// changed, so the raw punch stays auditable.
///
/// # Example
///
/// ```
/// use worktime_engine::models::{BookingCategory, BookingEvent};
///
/// let mut come = BookingEvent::new(BookingCategory::Come, 487);
/// assert_eq!(come.effective_minutes(), 487);
///
/// come.edited_minutes = Some(480);
/// assert_eq!(come.effective_minutes(), 480);
/// assert_eq!(come.original_minutes, 487);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingEvent {
    /// Unique booking id.
    pub id: Uuid,
    /// Booking category.
    pub category: BookingCategory,
    /// The punched minute of day.
    pub original_minutes: i32,
    /// A manual correction, if any.
    #[serde(default)]
    pub edited_minutes: Option<i32>,
}

impl BookingEvent {
    /// Creates an unedited booking with a fresh id.
    pub fn new(category: BookingCategory, minutes: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            original_minutes: minutes,
            edited_minutes: None,
        }
    }

    /// The time used for calculation: the edit if present, else the original.
    pub fn effective_minutes(&self) -> i32 {
        self.edited_minutes.unwrap_or(self.original_minutes)
    }

    /// Checks that the original and edited times lie within `0..1440`.
    pub fn validate(&self) -> EngineResult<()> {
        let times = std::iter::once(self.original_minutes).chain(self.edited_minutes);
        for minutes in times {
            if !(0..MINUTES_PER_DAY).contains(&minutes) {
                return Err(EngineError::InvalidBooking {
                    booking_id: self.id.to_string(),
                    minutes,
                });
            }
        }
        Ok(())
    }
}

/// Whether a pair is work or a booked break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairKind {
    /// Come to go.
    Work,
    /// Break start to break end.
    Break,
}

/// A matched start/end booking forming one interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPair {
    /// Id of the opening booking.
    pub start_booking: Uuid,
    /// Id of the closing booking.
    pub end_booking: Uuid,
    /// Work or break.
    pub kind: PairKind,
    /// Start minute.
    pub start: i32,
    /// End minute.
    pub end: i32,
}

impl BookingPair {
    /// `end - start`; negative after a bad rounding/tolerance combination.
    pub fn duration(&self) -> i32 {
        self.end - self.start
    }

    /// Whether this is a work pair.
    pub fn is_work(&self) -> bool {
        self.kind == PairKind::Work
    }
}
