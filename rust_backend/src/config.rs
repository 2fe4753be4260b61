//! Dashboard configuration file support.
//!
//! Replaces the UI's persisted preferences with an explicit value that is
//! passed into the timeline and cost functions. Read from TOML:
//!
//! ```toml
//! [timeline]
//! week_width_px = 200.0
//! day_width_px = 40.0
//! row_height_px = 48.0
//!
//! [costs]
//! total_costs = "include_additional_expenses"
//! profit = "bookings_only"
//! ```
//!
//! Every section and key is optional.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::costs::CostPolicy;
use crate::error::{CoreError, CoreResult};
use crate::time::TimelineGeometry;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "STUDIO_CONFIG";

/// Dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub timeline: TimelineGeometry,
    #[serde(default)]
    pub costs: CostPolicy,
}

impl FromStr for DashboardConfig {
    type Err = CoreError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: DashboardConfig = toml::from_str(content).map_err(|e| {
            CoreError::configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(DashboardConfig)` if the file was read, parsed and validated
    /// * `Err(CoreError::Configuration)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CoreError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        content.parse()
    }

    /// Load configuration from the default location.
    ///
    /// Searches, in order:
    /// 1. the file named by `$STUDIO_CONFIG`
    /// 2. `studio.toml`
    /// 3. `rust_backend/studio.toml`
    /// 4. `../studio.toml`
    pub fn from_default_location() -> CoreResult<Self> {
        if let Ok(explicit) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(explicit);
        }

        let search_paths = [
            PathBuf::from("studio.toml"),
            PathBuf::from("rust_backend/studio.toml"),
            PathBuf::from("../studio.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(CoreError::configuration(
            "No studio.toml found in standard locations",
        ))
    }

    /// [`from_default_location`](Self::from_default_location), falling back to defaults.
    pub fn load_or_default() -> Self {
        match Self::from_default_location() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Using default dashboard configuration: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        let geometry = &self.timeline;
        for (name, value) in [
            ("timeline.week_width_px", geometry.week_width_px),
            ("timeline.day_width_px", geometry.day_width_px),
            ("timeline.row_height_px", geometry.row_height_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::configuration(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if geometry.day_width_px > geometry.week_width_px {
            return Err(CoreError::configuration(
                "timeline.day_width_px cannot exceed timeline.week_width_px",
            ));
        }
        Ok(())
    }
}
