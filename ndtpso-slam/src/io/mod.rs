//! Map and trajectory export.
//!
//! Writers consume a [`MapSnapshot`](crate::ndt::MapSnapshot) only, so an
//! export never holds the pipeline lock while touching the filesystem.
//!
//! ```rust,ignore
//! use ndtpso_slam::io::export_snapshot;
//! use std::path::Path;
//!
//! // Creates output/run.pose.csv and output/run.map.csv
//! export_snapshot(&slam.export_snapshot(), Path::new("output"), "run")?;
//! ```

mod csv;

pub use csv::{
    CELLS_HEADER, TRAJECTORY_HEADER, export_snapshot, write_cells_csv, write_trajectory_csv,
};
