//! Publishing and export sections.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Pose publisher settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PublishSection {
    /// Publish rate (Hz)
    #[serde(default = "defaults::publish_rate_hz")]
    pub rate_hz: f64,

    /// Bounded channel capacity; poses are dropped when full
    #[serde(default = "defaults::channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for PublishSection {
    fn default() -> Self {
        Self {
            rate_hz: defaults::publish_rate_hz(),
            channel_capacity: defaults::channel_capacity(),
        }
    }
}

/// CSV export settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportSection {
    /// Output directory path
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,

    /// File prefix: writes `<prefix>.pose.csv` and `<prefix>.map.csv`
    #[serde(default = "defaults::prefix")]
    pub prefix: String,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            output_dir: defaults::output_dir(),
            prefix: defaults::prefix(),
        }
    }
}
