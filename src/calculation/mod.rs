//! Calculation logic for the time-accounting engine.
//!
//! This module contains the pure calculation functions: booking pairing,
//! tolerance and rounding normalization, break deduction, shift detection,
//! the daily orchestrator and its error/warning checks, vacation entitlement,
//! surcharges, monthly aggregation and the yearly account ledger.

mod breaks;
mod daily;
mod day_checks;
mod ledger;
mod monthly;
mod normalize;
mod pairing;
mod shift_detection;
mod surcharge;
mod vacation;

pub use breaks::{BreakDeduction, calculate_break_deduction};
pub use daily::{calculate_day, calculate_day_with_shift_detection};
pub use day_checks::{LONG_WORK_DAY_MINUTES, WINDOW_GRACE_MINUTES, detect_day_issues};
pub use ledger::AccountLedger;
pub use monthly::{FlextimeEvaluation, MonthAccount, aggregate_month, evaluate_flextime};
pub use normalize::{
    apply_pair_rounding, apply_rounding, apply_tolerance, normalize_pairs, round_boundary,
};
pub use pairing::{PairingResult, pair_bookings};
pub use shift_detection::{DayPlanLookup, ShiftMatch, detect_shift, match_detection_windows};
pub use surcharge::{calculate_day_surcharges, calculate_surcharges, split_overnight_window};
pub use vacation::{
    calculate_carryover, calculate_employee_entitlement, calculate_vacation_entitlement,
    round_to_half_day,
};
