//! Configuration loader for reading YAML configuration files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::types::{DayPlansConfig, EngineConfig, EngineMetadata, EngineSettings, SurchargesConfig};
use crate::calculation::DayPlanLookup;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    MonthlyEvaluation, ScheduleConfig, SurchargeRule, VacationPolicy, YearEndCaps,
};

/// Loads and provides access to validated engine configuration.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory path.
    ///
    /// The directory must contain:
    /// - `engine.yaml` - Metadata, vacation policy, monthly evaluation and year-end caps
    /// - `day_plans.yaml` - Day plan definitions
    /// - `surcharges.yaml` - Surcharge rules
    ///
    /// # Errors
    ///
    /// Returns an error if any file is missing, cannot be parsed, or the
    /// parsed configuration fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let base_path = path.as_ref();

        let settings: EngineSettings = load_yaml(&base_path.join("engine.yaml"))?;
        let plans: DayPlansConfig = load_yaml(&base_path.join("day_plans.yaml"))?;
        let surcharges: SurchargesConfig = load_yaml(&base_path.join("surcharges.yaml"))?;

        let loader = Self::from_parts(settings, plans.day_plans, surcharges.surcharges)?;
        info!(
            code = %loader.engine().code,
            version = %loader.engine().version,
            day_plans = loader.config.day_plans().len(),
            surcharges = loader.config.surcharges().len(),
            "configuration loaded"
        );
        Ok(loader)
    }

    /// Builds a loader from already-parsed parts, applying the same
    /// validation as [`ConfigLoader::load`].
    pub fn from_parts(
        settings: EngineSettings,
        day_plans: Vec<ScheduleConfig>,
        surcharges: Vec<SurchargeRule>,
    ) -> EngineResult<Self> {
        validate_day_plans(&day_plans)?;
        for rule in &surcharges {
            rule.validate()?;
        }
        validate_vacation_policy(&settings.vacation)?;

        Ok(Self {
            config: EngineConfig::new(settings, day_plans, surcharges),
        })
    }

    /// Returns a reference to the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the configuration metadata.
    pub fn engine(&self) -> &EngineMetadata {
        self.config.engine()
    }

    /// Returns the day plan with the given id, or `DayPlanNotFound`.
    ///
    /// [`DayPlanLookup::day_plan`] is the optional form used by shift detection.
    pub fn require_day_plan(&self, id: &str) -> EngineResult<&ScheduleConfig> {
        self.config
            .day_plans()
            .get(id)
            .ok_or_else(|| EngineError::DayPlanNotFound {
                plan_id: id.to_string(),
            })
    }

    /// Returns all day plans sorted by id.
    pub fn day_plans(&self) -> Vec<&ScheduleConfig> {
        let mut plans: Vec<&ScheduleConfig> = self.config.day_plans().values().collect();
        plans.sort_by(|a, b| a.id.cmp(&b.id));
        plans
    }

    /// Returns the surcharge rules in configured order.
    pub fn surcharges(&self) -> &[SurchargeRule] {
        self.config.surcharges()
    }

    /// Returns the vacation policy.
    pub fn vacation_policy(&self) -> &VacationPolicy {
        &self.config.settings().vacation
    }

    /// Returns the monthly flextime evaluation rules.
    pub fn monthly_evaluation(&self) -> &MonthlyEvaluation {
        &self.config.settings().monthly_evaluation
    }

    /// Returns the year-end caps.
    ///
    /// When `year_end.max_vacation_carryover` is unset, the vacation policy's
    /// `max_carryover` is used.
    pub fn year_end_caps(&self) -> YearEndCaps {
        let mut caps = self.config.settings().year_end;
        if caps.max_vacation_carryover.is_none() {
            caps.max_vacation_carryover = self.vacation_policy().max_carryover;
        }
        caps
    }
}

impl DayPlanLookup for ConfigLoader {
    fn day_plan(&self, id: &str) -> Option<&ScheduleConfig> {
        self.config.day_plans().get(id)
    }
}

/// Validates each plan, then the references between plans.
fn validate_day_plans(plans: &[ScheduleConfig]) -> EngineResult<()> {
    let mut ids = HashSet::new();
    for plan in plans {
        plan.validate()?;
        if !ids.insert(plan.id.as_str()) {
            return Err(EngineError::InvalidDayPlan {
                plan_id: plan.id.clone(),
                message: "duplicate plan id".to_string(),
            });
        }
    }

    for plan in plans {
        for alternative in &plan.shift_detection.alternative_plans {
            if !ids.contains(alternative.as_str()) {
                return Err(EngineError::DayPlanNotFound {
                    plan_id: alternative.clone(),
                });
            }
        }
        debug!(plan_id = %plan.id, "day plan validated");
    }
    Ok(())
}

fn validate_vacation_policy(policy: &VacationPolicy) -> EngineResult<()> {
    let invalid = |field: &str, message: &str| EngineError::InvalidVacationInput {
        field: field.to_string(),
        message: message.to_string(),
    };

    if policy.standard_weekly_hours <= Decimal::ZERO {
        return Err(invalid("standard_weekly_hours", "must be positive"));
    }
    if policy.base_entitlement < Decimal::ZERO {
        return Err(invalid("base_entitlement", "must not be negative"));
    }
    if policy.max_carryover.is_some_and(|cap| cap < Decimal::ZERO) {
        return Err(invalid("max_carryover", "must not be negative"));
    }
    Ok(())
}

/// Loads and parses a YAML file into the specified type.
fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
        path: path_str.clone(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
        path: path_str,
        message: e.to_string(),
    })
}
