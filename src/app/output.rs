//! Writes simulation results as whitespace separated columns into the results directory

use super::calculations::VelocityFieldPoint;
use crate::error::IOError;
use crate::postprocessor::Histogram;
use crate::scattering::Valley;
use crate::trajectory::SimulationResult;
use std::io::Write;
use std::path::Path;

fn create_file(directory: &Path, name: &str) -> Result<std::io::BufWriter<std::fs::File>, IOError> {
    // If the write directory does not exist then create it
    if !directory.exists() {
        std::fs::create_dir_all(directory)?;
    }
    Ok(std::io::BufWriter::new(std::fs::File::create(
        directory.join(name),
    )?))
}

/// Writes the snapshots of a full run to `trajectory.txt`, or the run summary when no
/// snapshots were kept
pub(crate) fn write_trajectory(directory: &Path, result: &SimulationResult) -> Result<(), IOError> {
    let mut file = create_file(directory, "trajectory.txt")?;
    writeln!(file, "# field {:e} V/cm", result.field())?;
    writeln!(file, "# drift_velocity {:e} cm/s", result.drift_velocity())?;
    writeln!(file, "# mean_energy {:e} eV", result.mean_energy())?;
    for valley in Valley::ALL {
        writeln!(
            file,
            "# occupancy_{} {:.6}",
            valley,
            result.valley_occupancy(valley)
        )?;
    }
    if result.truncated() {
        writeln!(file, "# truncated")?;
    }
    if let Some(trajectory) = result.trajectory() {
        writeln!(file, "# time energy valley velocity")?;
        for snapshot in trajectory {
            writeln!(
                file,
                "{:e} {:e} {} {:e}",
                snapshot.time, snapshot.energy, snapshot.valley, snapshot.velocity
            )?;
        }
    }
    file.flush()?;
    Ok(())
}

/// Writes one line per field to `velocity_field.txt`
pub(crate) fn write_velocity_field(
    directory: &Path,
    points: &[VelocityFieldPoint],
) -> Result<(), IOError> {
    let mut file = create_file(directory, "velocity_field.txt")?;
    writeln!(
        file,
        "# field drift_velocity occupancy_gamma occupancy_l mean_energy truncated_runs"
    )?;
    for point in points {
        writeln!(
            file,
            "{:e} {:e} {:.6} {:.6} {:e} {}",
            point.field,
            point.drift_velocity,
            point.occupancy[Valley::Gamma],
            point.occupancy[Valley::L],
            point.mean_energy,
            point.truncated_runs
        )?;
    }
    file.flush()?;
    Ok(())
}

/// Writes the bin centres, counts and normalised density of a histogram
pub(crate) fn write_histogram(
    directory: &Path,
    name: &str,
    histogram: &Histogram,
) -> Result<(), IOError> {
    let mut file = create_file(directory, name)?;
    writeln!(file, "# centre count density")?;
    let density = histogram.density();
    for ((centre, count), density) in histogram
        .centres()
        .iter()
        .zip(histogram.counts().iter())
        .zip(density.iter())
    {
        writeln!(file, "{:e} {} {:e}", centre, count, density)?;
    }
    file.flush()?;
    Ok(())
}
