//! NDT grid and map accumulator sections.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Reference and local frame settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NdtSection {
    /// Cell side length (meters)
    #[serde(default = "defaults::cell_side")]
    pub cell_side: f64,

    /// Frame side length (meters), centered on the start pose
    #[serde(default = "defaults::frame_size")]
    pub frame_size: f64,

    /// Neighbor rings scored around a point's cell (0 = own cell only)
    #[serde(default = "defaults::window_radius")]
    pub window_radius: u32,

    /// Covariance floor as a fraction of `cell_side²`
    #[serde(default = "defaults::regularization")]
    pub regularization: f64,
}

impl Default for NdtSection {
    fn default() -> Self {
        Self {
            cell_side: defaults::cell_side(),
            frame_size: defaults::frame_size(),
            window_radius: defaults::window_radius(),
            regularization: defaults::regularization(),
        }
    }
}

/// Map accumulator settings.
///
/// The accumulator is a second reference-kind frame that is only exported,
/// never aligned against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapSection {
    /// Side length (meters)
    #[serde(default = "defaults::map_size")]
    pub size: f64,

    /// Cell side length (meters)
    #[serde(default = "defaults::cell_side")]
    pub cell_side: f64,

    /// Fuse into the accumulator every N cycles (first cycle included)
    #[serde(default = "defaults::map_update_interval")]
    pub update_interval: u64,
}

impl Default for MapSection {
    fn default() -> Self {
        Self {
            size: defaults::map_size(),
            cell_side: defaults::cell_side(),
            update_interval: defaults::map_update_interval(),
        }
    }
}
