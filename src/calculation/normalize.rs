//! Tolerance and rounding of work pair boundaries.
//!
//! Normalization runs in a fixed order: tolerance first, then rounding.
//! Break pairs pass through unchanged.

use crate::models::{BookingPair, MINUTES_PER_DAY, RoundingMode, RoundingPolicy, ScheduleConfig};

/// Rounds `minutes` to a multiple of `interval`.
///
/// A non-positive interval or [`RoundingMode::None`] returns `minutes`
/// unchanged. `Nearest` rounds up when the remainder is at least half the
/// interval.
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::apply_rounding;
/// use worktime_engine::models::RoundingMode;
///
/// assert_eq!(apply_rounding(487, RoundingMode::Up, 15), 495);
/// assert_eq!(apply_rounding(487, RoundingMode::Down, 15), 480);
/// assert_eq!(apply_rounding(487, RoundingMode::Nearest, 15), 480);
/// assert_eq!(apply_rounding(488, RoundingMode::Nearest, 15), 495);
/// assert_eq!(apply_rounding(480, RoundingMode::Up, 15), 480);
/// ```
pub fn apply_rounding(minutes: i32, mode: RoundingMode, interval: i32) -> i32 {
    if interval <= 0 {
        return minutes;
    }
    let remainder = minutes.rem_euclid(interval);
    if remainder == 0 {
        return minutes;
    }
    let down = minutes - remainder;
    match mode {
        RoundingMode::None => minutes,
        RoundingMode::Up => down + interval,
        RoundingMode::Down => down,
        RoundingMode::Nearest => {
            if remainder * 2 >= interval {
                down + interval
            } else {
                down
            }
        }
    }
}

/// Applies a full rounding policy: rounding, then the signed offset.
///
/// The result is clamped to `0..=1440`.
pub fn round_boundary(minutes: i32, policy: &RoundingPolicy) -> i32 {
    let rounded = match policy.interval_minutes {
        Some(interval) => apply_rounding(minutes, policy.mode, interval),
        None => minutes,
    };
    (rounded + policy.offset_minutes.unwrap_or(0)).clamp(0, MINUTES_PER_DAY)
}

/// Snaps the first arrival and last departure inside their tolerance bands.
///
/// The earliest work start is set to `come_from` when it lies within
/// `[come_from - come_minus, come_from + come_plus]`; the latest work end is
/// set to `go_from` when it lies within `[go_from - go_minus, go_from + go_plus]`.
pub fn apply_tolerance(pairs: &[BookingPair], plan: &ScheduleConfig) -> Vec<BookingPair> {
    let mut adjusted = pairs.to_vec();
    let tolerance = &plan.tolerance;

    let first = adjusted
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_work())
        .min_by_key(|(_, p)| p.start)
        .map(|(i, _)| i);
    if let (Some(index), Some(planned)) = (first, plan.come_from) {
        let band = (planned - tolerance.come_minus.unwrap_or(0))
            ..=(planned + tolerance.come_plus.unwrap_or(0));
        if band.contains(&adjusted[index].start) {
            adjusted[index].start = planned;
        }
    }

    let last = adjusted
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_work())
        .max_by_key(|(_, p)| p.end)
        .map(|(i, _)| i);
    if let (Some(index), Some(planned)) = (last, plan.go_from) {
        let band = (planned - tolerance.go_minus.unwrap_or(0))
            ..=(planned + tolerance.go_plus.unwrap_or(0));
        if band.contains(&adjusted[index].end) {
            adjusted[index].end = planned;
        }
    }

    adjusted
}

/// Applies come rounding to every work start and go rounding to every work end.
pub fn apply_pair_rounding(pairs: &[BookingPair], plan: &ScheduleConfig) -> Vec<BookingPair> {
    pairs
        .iter()
        .map(|pair| {
            if !pair.is_work() {
                return pair.clone();
            }
            BookingPair {
                start: round_boundary(pair.start, &plan.come_rounding),
                end: round_boundary(pair.end, &plan.go_rounding),
                ..pair.clone()
            }
        })
        .collect()
}

/// Tolerance, then rounding.
///
/// # Example
///
/// ```
/// use worktime_engine::calculation::{normalize_pairs, pair_bookings};
/// use worktime_engine::models::{
///     BookingCategory, BookingEvent, RoundingMode, RoundingPolicy, ScheduleConfig, Tolerance,
/// };
///
/// let plan = ScheduleConfig {
///     id: "STD".to_string(),
///     target_minutes: 480,
///     come_from: Some(480),
///     tolerance: Tolerance { come_plus: Some(5), ..Default::default() },
///     go_rounding: RoundingPolicy {
///         mode: RoundingMode::Down,
///         interval_minutes: Some(15),
///         offset_minutes: None,
///     },
///     ..Default::default()
/// };
/// let pairing = pair_bookings(&[
///     BookingEvent::new(BookingCategory::Come, 483),
///     BookingEvent::new(BookingCategory::Go, 1027),
/// ]);
/// let pairs = normalize_pairs(&pairing.pairs, &plan);
/// assert_eq!((pairs[0].start, pairs[0].end), (480, 1020));
/// ```
pub fn normalize_pairs(pairs: &[BookingPair], plan: &ScheduleConfig) -> Vec<BookingPair> {
    apply_pair_rounding(&apply_tolerance(pairs, plan), plan)
}
