//! Vacation entitlement input, output and policy types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::employee::Employee;

/// Which period an entitlement year covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationBasis {
    /// January 1 to December 31.
    #[default]
    CalendarYear,
    /// From the entry anniversary in the year to the day before the next one.
    EntryDate,
}

/// What a special bonus rule tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    /// Age at the reference date reaches the threshold.
    Age,
    /// Completed years of service reach the threshold.
    Tenure,
    /// The employee has a recognised disability.
    Disability,
}

/// Extra vacation days granted when a condition holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialBonusRule {
    /// The tested condition.
    pub kind: BonusKind,
    /// Years for age/tenure; ignored for disability.
    #[serde(default)]
    pub threshold: u32,
    /// Days added when the condition holds.
    pub bonus_days: Decimal,
}

/// Everything needed to compute one year's entitlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationCalcInput {
    /// The entitlement year.
    pub year: i32,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// First day of employment.
    pub entry_date: NaiveDate,
    /// Last day of employment.
    #[serde(default)]
    pub exit_date: Option<NaiveDate>,
    /// Contracted weekly hours.
    pub weekly_hours: Decimal,
    /// Full-time weekly hours the base entitlement refers to.
    pub standard_weekly_hours: Decimal,
    /// Disability flag.
    #[serde(default)]
    pub has_disability: bool,
    /// Full-year, full-time entitlement in days.
    pub base_entitlement: Decimal,
    /// Period definition.
    #[serde(default)]
    pub basis: CalculationBasis,
    /// Stackable bonus rules.
    #[serde(default)]
    pub special_rules: Vec<SpecialBonusRule>,
}

/// The entitlement and how it was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationCalcOutput {
    /// Configured base entitlement.
    pub base_entitlement: Decimal,
    /// Months employed in the period (0-12).
    pub months_employed: u32,
    /// Base entitlement times `months / 12`.
    pub prorated_entitlement: Decimal,
    /// Pro-rated entitlement times `weekly / standard` hours.
    pub part_time_adjusted: Decimal,
    /// Days from age rules.
    pub age_bonus: Decimal,
    /// Days from tenure rules.
    pub tenure_bonus: Decimal,
    /// Days from disability rules.
    pub disability_bonus: Decimal,
    /// Final entitlement rounded to the nearest half day.
    pub total_entitlement: Decimal,
}

/// Tenant-wide vacation settings, loaded from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationPolicy {
    /// Full-year, full-time entitlement in days.
    pub base_entitlement: Decimal,
    /// Full-time weekly hours.
    pub standard_weekly_hours: Decimal,
    /// Period definition.
    #[serde(default)]
    pub basis: CalculationBasis,
    /// Stackable bonus rules.
    #[serde(default)]
    pub special_rules: Vec<SpecialBonusRule>,
    /// Largest carryover into the next year, in days.
    #[serde(default)]
    pub max_carryover: Option<Decimal>,
}

impl VacationPolicy {
    /// Builds the calculation input for `employee` in `year`.
    pub fn input_for(&self, employee: &Employee, year: i32) -> VacationCalcInput {
        VacationCalcInput {
            year,
            birth_date: employee.date_of_birth,
            entry_date: employee.entry_date,
            exit_date: employee.exit_date,
            weekly_hours: employee.weekly_hours,
            standard_weekly_hours: self.standard_weekly_hours,
            has_disability: employee.has_disability,
            base_entitlement: self.base_entitlement,
            basis: self.basis,
            special_rules: self.special_rules.clone(),
        }
    }
}
