//! Core data models for the time-accounting engine.
//!
//! This module contains the plain data contracts consumed and produced by the
//! calculation functions: day plans, bookings, absence/holiday facts, daily
//! and monthly results, ledger entries, vacation and surcharge types.

mod account;
mod booking;
mod daily_result;
mod day_facts;
mod day_input;
mod employee;
mod monthly_result;
mod schedule;
mod surcharge;
mod time_window;
mod vacation;

pub use account::{AccountKind, AccountLedgerEntry, YearEndCaps};
pub use booking::{BookingCategory, BookingEvent, BookingPair, PairKind};
pub use daily_result::{
    DailyResult, DayIssues, DayKind, ErrorCode, ShiftDetectionResult, ShiftMatchKind, WarningCode,
};
pub use day_facts::{AbsenceCategory, AbsenceFact, HolidayCategory, HolidayFact};
pub use day_input::DayInput;
pub use employee::Employee;
pub(crate) use employee::completed_years;
pub use monthly_result::{CloseStamp, FlextimeCreditType, MonthlyEvaluation, MonthlyResult};
pub use schedule::{
    BreakKind, BreakRule, HolidayCredits, MAX_ALTERNATIVE_PLANS, NoBookingBehavior, PlanKind,
    RoundingMode, RoundingPolicy, ScheduleConfig, ShiftDetectionConfig, Tolerance,
};
pub use surcharge::{SurchargeResult, SurchargeRule};
pub use time_window::{MINUTES_PER_DAY, TimeWindow, format_minutes, overlap_minutes};
pub use vacation::{
    BonusKind, CalculationBasis, SpecialBonusRule, VacationCalcInput, VacationCalcOutput,
    VacationPolicy,
};
