//! CSV writers for trajectories and cell statistics.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::ndt::{CellSnapshot, MapSnapshot, TrajectoryRecord};

/// Header of `<prefix>.pose.csv`.
pub const TRAJECTORY_HEADER: &str = "timestamp,x,y,theta,aux_x,aux_y,aux_theta";

/// Header of `<prefix>.map.csv`.
pub const CELLS_HEADER: &str =
    "cell_x,cell_y,center_x,center_y,count,mean_x,mean_y,cov_xx,cov_xy,cov_yy";

/// Write one row per trajectory record. Auxiliary columns are empty when
/// no auxiliary pose was supplied.
pub fn write_trajectory_csv<W: Write>(writer: &mut W, records: &[TrajectoryRecord]) -> Result<()> {
    writeln!(writer, "{}", TRAJECTORY_HEADER)?;
    for record in records {
        write!(
            writer,
            "{:.6},{:.6},{:.6},{:.6},",
            record.timestamp, record.pose.x, record.pose.y, record.pose.theta
        )?;
        match record.auxiliary {
            Some(aux) => writeln!(writer, "{:.6},{:.6},{:.6}", aux.x, aux.y, aux.theta)?,
            None => writeln!(writer, ",,")?,
        }
    }
    Ok(())
}

/// Write one row per non-empty cell. Mean and covariance columns are empty
/// for cells with too few points.
pub fn write_cells_csv<W: Write>(writer: &mut W, cells: &[CellSnapshot]) -> Result<()> {
    writeln!(writer, "{}", CELLS_HEADER)?;
    for cell in cells {
        write!(
            writer,
            "{},{},{:.4},{:.4},{},",
            cell.coord.x, cell.coord.y, cell.center.x, cell.center.y, cell.count
        )?;
        match (cell.mean, cell.covariance) {
            (Some(mean), Some(cov)) => writeln!(
                writer,
                "{:.6},{:.6},{:.8},{:.8},{:.8}",
                mean.x, mean.y, cov.xx, cov.xy, cov.yy
            )?,
            _ => writeln!(writer, ",,,,")?,
        }
    }
    Ok(())
}

/// Write `<dir>/<prefix>.pose.csv` and `<dir>/<prefix>.map.csv`.
///
/// Creates `dir` if needed. Returns the two paths written.
pub fn export_snapshot(
    snapshot: &MapSnapshot,
    dir: &Path,
    prefix: &str,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)?;

    let pose_path = dir.join(format!("{}.pose.csv", prefix));
    let mut writer = BufWriter::new(File::create(&pose_path)?);
    write_trajectory_csv(&mut writer, &snapshot.trajectory)?;
    writer.flush()?;

    let map_path = dir.join(format!("{}.map.csv", prefix));
    let mut writer = BufWriter::new(File::create(&map_path)?);
    write_cells_csv(&mut writer, &snapshot.cells)?;
    writer.flush()?;

    info!(
        "Exported {} poses and {} cells to {}.{{pose,map}}.csv",
        snapshot.trajectory.len(),
        snapshot.cells.len(),
        dir.join(prefix).display()
    );
    Ok((pose_path, map_path))
}
