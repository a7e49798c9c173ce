//! Booking pairing.
//!
//! Raw bookings are split by category, sorted, and matched greedily into
//! come→go work pairs and break_start→break_end break pairs. Unmatched
//! bookings are reported as error codes.

use std::collections::BTreeSet;

use crate::models::{BookingCategory, BookingEvent, BookingPair, ErrorCode, PairKind};

/// Pairs and pairing errors for one day.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PairingResult {
    /// Work pairs sorted by start, followed by break pairs sorted by start.
    pub pairs: Vec<BookingPair>,
    /// `MISSING_*` codes for unmatched bookings.
    pub errors: BTreeSet<ErrorCode>,
}

impl PairingResult {
    /// Iterates the work pairs.
    pub fn work_pairs(&self) -> impl Iterator<Item = &BookingPair> {
        self.pairs.iter().filter(|p| p.kind == PairKind::Work)
    }

    /// Iterates the break pairs.
    pub fn break_pairs(&self) -> impl Iterator<Item = &BookingPair> {
        self.pairs.iter().filter(|p| p.kind == PairKind::Break)
    }
}

/// Pairs a day's bookings.
///
/// Each start is matched to the earliest unused end strictly after it. The
/// output does not depend on the order of `bookings`: events are sorted by
/// effective time and then by id before matching.
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::pair_bookings;
/// use worktime_engine::models::{BookingCategory, BookingEvent, ErrorCode};
///
/// let bookings = vec![
///     BookingEvent::new(BookingCategory::Go, 1020),
///     BookingEvent::new(BookingCategory::Come, 480),
/// ];
/// let result = pair_bookings(&bookings);
/// assert_eq!(result.pairs.len(), 1);
/// assert_eq!(result.pairs[0].duration(), 540);
/// assert!(result.errors.is_empty());
///
/// let only_come = vec![BookingEvent::new(BookingCategory::Come, 480)];
/// let result = pair_bookings(&only_come);
/// assert!(result.pairs.is_empty());
/// assert!(result.errors.contains(&ErrorCode::MissingGo));
/// ```
pub fn pair_bookings(bookings: &[BookingEvent]) -> PairingResult {
    let mut result = PairingResult::default();

    let work = match_sequentially(
        sorted_by_time(bookings, BookingCategory::Come),
        sorted_by_time(bookings, BookingCategory::Go),
        PairKind::Work,
    );
    let breaks = match_sequentially(
        sorted_by_time(bookings, BookingCategory::BreakStart),
        sorted_by_time(bookings, BookingCategory::BreakEnd),
        PairKind::Break,
    );

    if work.unmatched_starts > 0 {
        result.errors.insert(ErrorCode::MissingGo);
    }
    if work.unmatched_ends > 0 {
        result.errors.insert(ErrorCode::MissingCome);
    }
    if breaks.unmatched_starts > 0 {
        result.errors.insert(ErrorCode::MissingBreakEnd);
    }
    if breaks.unmatched_ends > 0 {
        result.errors.insert(ErrorCode::MissingBreakStart);
    }

    result.pairs = work.pairs;
    result.pairs.extend(breaks.pairs);
    result
}

struct Matched {
    pairs: Vec<BookingPair>,
    unmatched_starts: usize,
    unmatched_ends: usize,
}

fn sorted_by_time(bookings: &[BookingEvent], category: BookingCategory) -> Vec<&BookingEvent> {
    let mut events: Vec<&BookingEvent> = bookings
        .iter()
        .filter(|b| b.category == category)
        .collect();
    events.sort_by_key(|b| (b.effective_minutes(), b.id));
    events
}

fn match_sequentially(
    starts: Vec<&BookingEvent>,
    ends: Vec<&BookingEvent>,
    kind: PairKind,
) -> Matched {
    let mut pairs = Vec::new();
    let mut unmatched_starts = 0;
    let mut unmatched_ends = 0;
    let mut next_end = 0;

    for start in starts {
        let start_minutes = start.effective_minutes();

        // Ends at or before this start can never close a later start either.
        while next_end < ends.len() && ends[next_end].effective_minutes() <= start_minutes {
            unmatched_ends += 1;
            next_end += 1;
        }

        match ends.get(next_end) {
            Some(end) => {
                pairs.push(BookingPair {
                    start_booking: start.id,
                    end_booking: end.id,
                    kind,
                    start: start_minutes,
                    end: end.effective_minutes(),
                });
                next_end += 1;
            }
            None => unmatched_starts += 1,
        }
    }
    unmatched_ends += ends.len() - next_end;

    Matched {
        pairs,
        unmatched_starts,
        unmatched_ends,
    }
}
