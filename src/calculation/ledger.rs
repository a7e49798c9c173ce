//! Yearly account ledger.
//!
//! Entries are keyed by (employee, account kind, year). Closing a year
//! freezes an entry, fixes its closing balance under the year-end caps and
//! upserts the next year's entry with that balance as its opening.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{info, warn};

use super::vacation::calculate_carryover;
use crate::error::{EngineError, EngineResult};
use crate::models::{AccountKind, AccountLedgerEntry, YearEndCaps};

type LedgerKey = (String, AccountKind, i32);

/// In-memory store of ledger entries.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use worktime_engine::calculation::AccountLedger;
/// use worktime_engine::models::{AccountKind, YearEndCaps};
///
/// let mut ledger = AccountLedger::new();
/// ledger.post("emp_001", AccountKind::Flextime, 2026, Decimal::new(900, 0)).unwrap();
///
/// let caps = YearEndCaps { positive_limit: Some(Decimal::new(600, 0)), ..Default::default() };
/// let closed = ledger.close_year("emp_001", AccountKind::Flextime, 2026, &caps).unwrap();
/// assert_eq!(closed.closing_balance, Some(Decimal::new(600, 0)));
///
/// let next = ledger.entry("emp_001", &AccountKind::Flextime, 2027).unwrap();
/// assert_eq!(next.opening_balance, Decimal::new(600, 0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountLedger {
    entries: BTreeMap<LedgerKey, AccountLedgerEntry>,
}

impl AccountLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// The entry for `(employee_id, kind, year)`.
    pub fn entry(&self, employee_id: &str, kind: &AccountKind, year: i32) -> Option<&AccountLedgerEntry> {
        self.entries
            .get(&(employee_id.to_string(), kind.clone(), year))
    }

    /// All entries of one employee, ordered by kind and year.
    pub fn entries_for<'a>(&'a self, employee_id: &'a str) -> impl Iterator<Item = &'a AccountLedgerEntry> {
        self.entries
            .values()
            .filter(move |entry| entry.employee_id == employee_id)
    }

    /// Inserts or replaces an entry.
    ///
    /// # Errors
    ///
    /// [`EngineError::YearAlreadyClosed`] when the stored entry is closed.
    pub fn upsert(&mut self, entry: AccountLedgerEntry) -> EngineResult<()> {
        let key = (entry.employee_id.clone(), entry.kind.clone(), entry.year);
        if let Some(existing) = self.entries.get(&key) {
            ensure_open(existing)?;
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Adds `amount` to an account, creating the entry with a zero opening
    /// balance if needed.
    ///
    /// For vacation accounts `amount` is days taken (negative to correct);
    /// it increases `used`, and the current balance follows the available
    /// days. For other kinds it is added to the current balance.
    pub fn post(
        &mut self,
        employee_id: &str,
        kind: AccountKind,
        year: i32,
        amount: Decimal,
    ) -> EngineResult<Decimal> {
        let entry = self.open_entry(employee_id, kind, year)?;
        match entry.kind {
            AccountKind::Vacation => {
                entry.used += amount;
                entry.current_balance = entry.available();
            }
            _ => entry.current_balance += amount,
        }
        Ok(entry.current_balance)
    }

    /// Sets a vacation year's entitlement, creating the entry if needed.
    pub fn set_entitlement(&mut self, employee_id: &str, year: i32, days: Decimal) -> EngineResult<()> {
        let entry = self.open_entry(employee_id, AccountKind::Vacation, year)?;
        entry.yearly_entitlement = days;
        entry.current_balance = entry.available();
        Ok(())
    }

    /// Closes one account's year and carries the balance forward.
    ///
    /// The closing balance is:
    ///
    /// - vacation: `min(available, max_vacation_carryover)`, never negative
    /// - flextime: the current balance bounded by the positive and negative limits
    /// - bonus: the current balance
    ///
    /// Next year's entry is created, or its opening balance replaced if it
    /// already exists.
    ///
    /// # Errors
    ///
    /// [`EngineError::LedgerEntryNotFound`] without an entry,
    /// [`EngineError::YearAlreadyClosed`] when this year or the next is closed.
    pub fn close_year(
        &mut self,
        employee_id: &str,
        kind: AccountKind,
        year: i32,
        caps: &YearEndCaps,
    ) -> EngineResult<&AccountLedgerEntry> {
        let key = (employee_id.to_string(), kind.clone(), year);
        let next_key = (employee_id.to_string(), kind.clone(), year + 1);
        let not_found = || EngineError::LedgerEntryNotFound {
            employee_id: employee_id.to_string(),
            account: kind.clone(),
            year,
        };

        let entry = self.entries.get(&key).ok_or_else(not_found)?;
        if let Err(err) = ensure_open(entry) {
            warn!(employee_id, account = %kind, year, "close rejected: year already closed");
            return Err(err);
        }
        if let Some(next) = self.entries.get(&next_key) {
            ensure_open(next)?;
        }
        let closing = closing_balance(entry, caps);

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.closing_balance = Some(closing);
            entry.is_closed = true;
        }
        match self.entries.get_mut(&next_key) {
            Some(next) => {
                next.current_balance += closing - next.opening_balance;
                next.opening_balance = closing;
                if next.kind == AccountKind::Vacation {
                    next.current_balance = next.available();
                }
            }
            None => {
                self.entries.insert(
                    next_key,
                    AccountLedgerEntry::new(employee_id, kind.clone(), year + 1, closing),
                );
            }
        }

        info!(employee_id, account = %kind, year, closing = %closing, "ledger year closed");
        self.entries.get(&key).ok_or_else(not_found)
    }

    /// Closes every open account of an employee for `year`.
    pub fn close_all(&mut self, employee_id: &str, year: i32, caps: &YearEndCaps) -> EngineResult<Vec<AccountKind>> {
        let kinds: Vec<AccountKind> = self
            .entries
            .values()
            .filter(|e| e.employee_id == employee_id && e.year == year && !e.is_closed)
            .map(|e| e.kind.clone())
            .collect();
        for kind in &kinds {
            self.close_year(employee_id, kind.clone(), year, caps)?;
        }
        Ok(kinds)
    }

    /// Reopens a closed year; the closing balance is cleared.
    ///
    /// # Errors
    ///
    /// [`EngineError::LedgerEntryNotFound`] without an entry,
    /// [`EngineError::YearNotClosed`] when the year is open.
    pub fn reopen_year(&mut self, employee_id: &str, kind: AccountKind, year: i32) -> EngineResult<()> {
        let key = (employee_id.to_string(), kind.clone(), year);
        let Some(entry) = self.entries.get_mut(&key) else {
            return Err(EngineError::LedgerEntryNotFound {
                employee_id: employee_id.to_string(),
                account: kind,
                year,
            });
        };
        if !entry.is_closed {
            warn!(employee_id, account = %kind, year, "reopen rejected: year not closed");
            return Err(EngineError::YearNotClosed {
                employee_id: employee_id.to_string(),
                account: kind,
                year,
            });
        }
        entry.is_closed = false;
        entry.closing_balance = None;
        info!(employee_id, account = %kind, year, "ledger year reopened");
        Ok(())
    }

    fn open_entry(
        &mut self,
        employee_id: &str,
        kind: AccountKind,
        year: i32,
    ) -> EngineResult<&mut AccountLedgerEntry> {
        let entry = self
            .entries
            .entry((employee_id.to_string(), kind.clone(), year))
            .or_insert_with(|| AccountLedgerEntry::new(employee_id, kind, year, Decimal::ZERO));
        ensure_open(entry)?;
        Ok(entry)
    }
}

fn ensure_open(entry: &AccountLedgerEntry) -> EngineResult<()> {
    if entry.is_closed {
        return Err(EngineError::YearAlreadyClosed {
            employee_id: entry.employee_id.clone(),
            account: entry.kind.clone(),
            year: entry.year,
        });
    }
    Ok(())
}

fn closing_balance(entry: &AccountLedgerEntry, caps: &YearEndCaps) -> Decimal {
    match entry.kind {
        AccountKind::Vacation => calculate_carryover(entry.available(), caps.max_vacation_carryover),
        AccountKind::Flextime => {
            let mut balance = entry.current_balance;
            if let Some(positive) = caps.positive_limit {
                balance = balance.min(positive);
            }
            if let Some(negative) = caps.negative_limit {
                balance = balance.max(-negative);
            }
            balance
        }
        AccountKind::Bonus(_) => entry.current_balance,
    }
}
