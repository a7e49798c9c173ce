//! Yearly account ledger entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of a tracked account.
///
/// Flextime balances are in minutes, vacation in days, bonus accounts in
/// minutes credited by surcharge rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    /// Flextime balance.
    Flextime,
    /// Vacation days.
    Vacation,
    /// A surcharge/bonus account identified by its code.
    Bonus(String),
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountKind::Flextime => write!(f, "flextime"),
            AccountKind::Vacation => write!(f, "vacation"),
            AccountKind::Bonus(code) => write!(f, "bonus:{}", code),
        }
    }
}

/// One account of one employee for one year.
///
/// # Example
///
/// ```
/// use worktime_engine::models::{AccountKind, AccountLedgerEntry};
/// use rust_decimal::Decimal;
///
/// let mut vacation = AccountLedgerEntry::new("emp_001", AccountKind::Vacation, 2026, Decimal::new(5, 0));
/// vacation.yearly_entitlement = Decimal::new(30, 0);
/// vacation.used = Decimal::new(12, 0);
/// assert_eq!(vacation.available(), Decimal::new(23, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLedgerEntry {
    /// Employee owning the account.
    pub employee_id: String,
    /// Account kind.
    pub kind: AccountKind,
    /// Account year.
    pub year: i32,
    /// Balance carried in from the previous year.
    pub opening_balance: Decimal,
    /// Running balance (opening plus postings).
    pub current_balance: Decimal,
    /// Balance frozen at year close.
    #[serde(default)]
    pub closing_balance: Option<Decimal>,
    /// Entitlement granted for the year (vacation).
    #[serde(default)]
    pub yearly_entitlement: Decimal,
    /// Amount consumed during the year (vacation).
    #[serde(default)]
    pub used: Decimal,
    /// Whether the year is closed.
    #[serde(default)]
    pub is_closed: bool,
}

impl AccountLedgerEntry {
    /// An open entry whose current balance equals the opening balance.
    pub fn new(employee_id: &str, kind: AccountKind, year: i32, opening_balance: Decimal) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            kind,
            year,
            opening_balance,
            current_balance: opening_balance,
            closing_balance: None,
            yearly_entitlement: Decimal::ZERO,
            used: Decimal::ZERO,
            is_closed: false,
        }
    }

    /// Vacation: entitlement + opening - used. Other kinds: the current balance.
    pub fn available(&self) -> Decimal {
        match self.kind {
            AccountKind::Vacation => self.yearly_entitlement + self.opening_balance - self.used,
            _ => self.current_balance,
        }
    }
}

/// Limits applied to balances carried into the next year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YearEndCaps {
    /// Largest positive flextime balance carried over.
    #[serde(default)]
    pub positive_limit: Option<Decimal>,
    /// Magnitude of the most negative flextime balance carried over.
    #[serde(default)]
    pub negative_limit: Option<Decimal>,
    /// Largest vacation carryover in days.
    #[serde(default)]
    pub max_vacation_carryover: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_kind_display() {
        assert_eq!(AccountKind::Flextime.to_string(), "flextime");
        assert_eq!(AccountKind::Vacation.to_string(), "vacation");
        assert_eq!(AccountKind::Bonus("night".to_string()).to_string(), "bonus:night");
    }

    #[test]
    fn test_flextime_available_is_current_balance() {
        let mut entry = AccountLedgerEntry::new("emp_001", AccountKind::Flextime, 2026, Decimal::new(120, 0));
        entry.current_balance = Decimal::new(300, 0);
        entry.used = Decimal::new(1000, 0);
        assert_eq!(entry.available(), Decimal::new(300, 0));
    }

    #[test]
    fn test_account_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&AccountKind::Vacation).unwrap(),
            "\"vacation\""
        );
        assert_eq!(
            serde_json::to_string(&AccountKind::Bonus("night".to_string())).unwrap(),
            "{\"bonus\":\"night\"}"
        );
    }
}
