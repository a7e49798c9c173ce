//! Configuration types for the time-accounting engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;
use std::collections::HashMap;

use crate::models::{MonthlyEvaluation, ScheduleConfig, SurchargeRule, VacationPolicy, YearEndCaps};

/// Metadata about the configuration set.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// Short code of the configuration (e.g., "DEFAULT").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Version or effective date of the configuration.
    pub version: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

/// The `engine.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Configuration metadata.
    pub engine: EngineMetadata,
    /// Vacation entitlement policy.
    pub vacation: VacationPolicy,
    /// Monthly flextime evaluation.
    #[serde(default)]
    pub monthly_evaluation: MonthlyEvaluation,
    /// Year-end carryover limits.
    #[serde(default)]
    pub year_end: YearEndCaps,
}

/// The `day_plans.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct DayPlansConfig {
    /// All configured day plans.
    pub day_plans: Vec<ScheduleConfig>,
}

/// The `surcharges.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct SurchargesConfig {
    /// All configured surcharge rules.
    #[serde(default)]
    pub surcharges: Vec<SurchargeRule>,
}

/// Complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    settings: EngineSettings,
    day_plans: HashMap<String, ScheduleConfig>,
    surcharges: Vec<SurchargeRule>,
}

impl EngineConfig {
    /// Creates a new engine configuration. Plans are indexed by id; a later
    /// plan with a duplicate id replaces an earlier one.
    pub fn new(
        settings: EngineSettings,
        day_plans: Vec<ScheduleConfig>,
        surcharges: Vec<SurchargeRule>,
    ) -> Self {
        let day_plans = day_plans
            .into_iter()
            .map(|plan| (plan.id.clone(), plan))
            .collect();
        Self {
            settings,
            day_plans,
            surcharges,
        }
    }

    /// Returns the configuration metadata.
    pub fn engine(&self) -> &EngineMetadata {
        &self.settings.engine
    }

    /// Returns the full `engine.yaml` settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the day plans keyed by id.
    pub fn day_plans(&self) -> &HashMap<String, ScheduleConfig> {
        &self.day_plans
    }

    /// Returns the surcharge rules in configured order.
    pub fn surcharges(&self) -> &[SurchargeRule] {
        &self.surcharges
    }
}
