//! Configuration loading and management for the time-accounting engine.
//!
//! This module loads a configuration directory of YAML files: engine
//! metadata and policies, day plans and surcharge rules. Everything is
//! validated while loading; an invalid configuration is never returned.
//!
//! # Example
//!
//! ```no_run
//! use worktime_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded configuration: {}", config.engine().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DayPlansConfig, EngineConfig, EngineMetadata, EngineSettings, SurchargesConfig};
