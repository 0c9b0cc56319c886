//! Top-level configuration and loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NdtPsoError, Result};
use crate::pso::PsoConfig;

use super::ndt::{MapSection, NdtSection};
use super::persistence::{ExportSection, PublishSection};
use super::sensor::SensorSection;

/// Full NDT-PSO configuration loaded from YAML
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NdtPsoConfig {
    /// Reference/local frame settings
    #[serde(default)]
    pub ndt: NdtSection,

    /// Map accumulator settings
    #[serde(default)]
    pub map: MapSection,

    /// Particle swarm settings
    #[serde(default)]
    pub pso: PsoConfig,

    /// Sensor mounting
    #[serde(default)]
    pub sensor: SensorSection,

    /// Pose publisher
    #[serde(default)]
    pub publish: PublishSection,

    /// CSV export
    #[serde(default)]
    pub export: ExportSection,
}

impl NdtPsoConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f64) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(NdtPsoError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )))
            }
        }

        positive("ndt.cell_side", self.ndt.cell_side)?;
        positive("ndt.frame_size", self.ndt.frame_size)?;
        positive("map.cell_side", self.map.cell_side)?;
        positive("map.size", self.map.size)?;
        positive("publish.rate_hz", self.publish.rate_hz)?;

        if !(self.ndt.regularization.is_finite() && self.ndt.regularization >= 0.0) {
            return Err(NdtPsoError::InvalidConfig(format!(
                "ndt.regularization must be non-negative, got {}",
                self.ndt.regularization
            )));
        }
        if self.map.update_interval == 0 {
            return Err(NdtPsoError::InvalidConfig(
                "map.update_interval must be at least 1".to_string(),
            ));
        }
        if self.pso.iterations == 0 {
            return Err(NdtPsoError::InvalidConfig(
                "pso.iterations must be at least 1".to_string(),
            ));
        }
        self.pso.validate()
    }
}
