//! Time-Accounting Calculation Engine
//!
//! This crate turns raw clock bookings into credited working time. It pairs
//! come/go events, applies tolerance and rounding, deducts breaks, detects
//! shifts, credits absences and holidays, aggregates months into flextime
//! balances, computes vacation entitlements and keeps a yearly account ledger.
//!
//! All calculations are pure: the caller supplies the day plan, bookings and
//! day facts, and receives a result. Persistence and lookups stay outside.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
