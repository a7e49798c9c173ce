//! Break deduction.
//!
//! Rules are evaluated in configured order and accumulate into one total:
//!
//! - `fixed` deducts its duration where work overlaps the window, booked or not
//! - `variable` deducts the booked break time, or auto-deducts when nothing was booked
//! - `minimum` raises the total accumulated so far to its floor once gross work
//!   passes the threshold
//!
//! Paid rules are skipped. When the plan has no `variable` rule, booked break
//! time still acts as a floor on the total.

use serde::{Deserialize, Serialize};

use crate::models::{BookingPair, BreakKind, BreakRule, PairKind};

/// Break minutes to subtract from gross time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BreakDeduction {
    /// Total minutes to deduct, never more than the gross time.
    pub total_minutes: i32,
    /// Minutes deducted only because a `variable` rule auto-deducts.
    pub auto_deducted_minutes: i32,
}

impl BreakDeduction {
    /// Whether any auto-deduction contributed.
    pub fn auto_applied(&self) -> bool {
        self.auto_deducted_minutes > 0
    }
}

/// Computes the break deduction for one day.
///
/// `pairs` holds the normalized work pairs and the booked break pairs;
/// `gross_minutes` is the sum of positive work pair durations.
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::{calculate_break_deduction, pair_bookings};
/// use worktime_engine::models::{BookingCategory, BookingEvent, BreakKind, BreakRule, TimeWindow};
///
/// let lunch = BreakRule {
///     kind: BreakKind::Fixed { window: TimeWindow { from: 720, to: 750 } },
///     duration_minutes: 30,
///     is_paid: false,
/// };
/// let pairing = pair_bookings(&[
///     BookingEvent::new(BookingCategory::Come, 480),
///     BookingEvent::new(BookingCategory::Go, 1020),
/// ]);
///
/// let deduction = calculate_break_deduction(&[lunch], &pairing.pairs, 540);
/// assert_eq!(deduction.total_minutes, 30);
/// ```
pub fn calculate_break_deduction(
    rules: &[BreakRule],
    pairs: &[BookingPair],
    gross_minutes: i32,
) -> BreakDeduction {
    let booked: i32 = pairs
        .iter()
        .filter(|p| p.kind == PairKind::Break)
        .map(|p| p.duration().max(0))
        .sum();
    let has_variable_rule = rules
        .iter()
        .any(|r| matches!(r.kind, BreakKind::Variable { .. }));

    let mut total = 0;
    let mut auto_deducted = 0;
    let mut booked_consumed = false;

    for rule in rules.iter().filter(|r| !r.is_paid) {
        match rule.kind {
            BreakKind::Fixed { window } => {
                let overlap: i32 = pairs
                    .iter()
                    .filter(|p| p.is_work())
                    .map(|p| window.overlap(p.start, p.end))
                    .sum();
                total += overlap.min(rule.duration_minutes);
            }
            BreakKind::Variable { auto_deduct } => {
                if booked > 0 {
                    if !booked_consumed {
                        total += booked;
                        booked_consumed = true;
                    }
                } else if auto_deduct && gross_minutes > 0 {
                    total += rule.duration_minutes;
                    auto_deducted += rule.duration_minutes;
                }
            }
            BreakKind::Minimum {
                after_work_minutes,
                proportional,
            } => {
                if gross_minutes > after_work_minutes {
                    let required = if proportional {
                        rule.duration_minutes.min(gross_minutes - after_work_minutes)
                    } else {
                        rule.duration_minutes
                    };
                    total = total.max(required);
                }
            }
        }
    }

    if !has_variable_rule {
        total = total.max(booked);
    }

    let total_minutes = total.clamp(0, gross_minutes.max(0));
    BreakDeduction {
        total_minutes,
        auto_deducted_minutes: auto_deducted.min(total_minutes),
    }
}
