//! Unified configuration loading for NDT-PSO SLAM.
//!
//! Loads all configuration from a single YAML file; every field has a
//! default, so an empty file (or no file) is valid.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ndtpso_slam::config::NdtPsoConfig;
//!
//! // Load from default path (configs/config.yaml)
//! let config = NdtPsoConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = NdtPsoConfig::default();
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`NdtSection`] | Cell side, frame size, scoring window |
//! | [`MapSection`] | Map accumulator size and update interval |
//! | [`PsoConfig`](crate::pso::PsoConfig) | Swarm size, iterations, search box |
//! | [`SensorSection`] | Sensor mounting transform |
//! | [`PublishSection`] | Pose publish rate |
//! | [`ExportSection`] | CSV output directory and prefix |
//!
//! ## Example YAML
//!
//! ```yaml
//! ndt:
//!   cell_side: 0.5        # meters
//!   frame_size: 100.0     # 100m x 100m around the start pose
//! map:
//!   update_interval: 10   # fuse into the exported map every 10 scans
//! pso:
//!   population_size: 40
//!   iterations: 60
//!   search_radius: [0.5, 0.5, 0.35]
//! sensor:
//!   mount_x: -0.110
//! publish:
//!   rate_hz: 30.0
//! ```

pub(crate) mod defaults;
mod ndt;
mod ndtpso;
mod persistence;
mod sensor;

pub use ndtpso::NdtPsoConfig;

// Re-export section types
pub use ndt::{MapSection, NdtSection};
pub use persistence::{ExportSection, PublishSection};
pub use sensor::SensorSection;
