//! # Calculations
//!
//! Delegated functions from `App` to run a single trajectory, or to sweep the applied field
//! and collect the steady state drift velocity at every point
//!

use super::configuration::{SweepConfiguration, TrajectoryConfiguration};
use crate::error::SimulationError;
use crate::processor::ScatteringEventProcessor;
use crate::scattering::{Valley, ValleyMap};
use crate::trajectory::{
    RunSettings, SimulationResult, SummaryRecorder, TrajectorySimulatorBuilder, TransportSummary,
};
use console::Term;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressDrawTarget, ProgressStyle};
use itertools::Itertools;
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;

/// An independent random stream for worker `index`
fn worker_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
        None => StdRng::from_entropy(),
    }
}

fn run_settings(
    field: f64,
    event_budget: u64,
    trajectory: &TrajectoryConfiguration,
) -> Result<RunSettings, SimulationError> {
    let settings = RunSettings::new(field, event_budget)?
        .with_initial_energy(trajectory.initial_energy)?
        .with_initial_valley(trajectory.initial_valley)
        .with_maximum_flights(event_budget.saturating_mul(trajectory.flights_per_event))?;
    Ok(settings)
}

/// Runs one electron at the configured field with the configured recorder
pub(crate) fn single_trajectory(
    processor: &ScatteringEventProcessor<'_>,
    trajectory: &TrajectoryConfiguration,
    seed: Option<u64>,
) -> Result<SimulationResult, SimulationError> {
    tracing::info!(
        "Single trajectory at {:.3e} V/cm for {} events",
        trajectory.field,
        trajectory.event_budget
    );
    let settings = run_settings(trajectory.field, trajectory.event_budget, trajectory)?;
    let mut rng = worker_rng(seed, 0);
    TrajectorySimulatorBuilder::new()
        .with_processor(processor)
        .with_settings(&settings)
        .with_recorder(trajectory.recording.recorder())
        .build()
        .simulate(&mut rng)
}

/// The ensemble averaged transport at a single field
#[derive(Clone, Debug)]
pub struct VelocityFieldPoint {
    /// Applied field in V / cm
    pub field: f64,
    /// Time averaged drift velocity in cm / s
    pub drift_velocity: f64,
    pub occupancy: ValleyMap<f64>,
    /// Time averaged kinetic energy in eV
    pub mean_energy: f64,
    /// Number of particles whose run ended early
    pub truncated_runs: usize,
}

impl VelocityFieldPoint {
    fn from_summary(field: f64, summary: &TransportSummary, truncated_runs: usize) -> Self {
        Self {
            field,
            drift_velocity: -summary.time_averaged_velocity(),
            occupancy: ValleyMap::from_fn(|valley| summary.valley_occupancy(valley)),
            mean_energy: summary.mean_energy(),
            truncated_runs,
        }
    }
}

/// Simulates every field of the sweep in parallel
///
/// Each field runs `particles_per_field` independent electrons in summary mode, whose
/// integrals are merged into a single point. The returned points are sorted by field.
pub(crate) fn velocity_field_sweep(
    processor: &ScatteringEventProcessor<'_>,
    sweep: &SweepConfiguration,
    trajectory: &TrajectoryConfiguration,
    seed: Option<u64>,
) -> Result<Vec<VelocityFieldPoint>, SimulationError> {
    let fields = sweep.fields();
    tracing::info!(
        "Velocity-field sweep over {} fields with {} particles each",
        fields.len(),
        sweep.particles_per_field
    );
    let jobs = fields
        .iter()
        .cartesian_product(0..sweep.particles_per_field)
        .map(|(&field, _)| field)
        .collect::<Vec<_>>();

    let term = Term::stdout();

    // Display
    let spinner_style = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{prefix:.bold.dim} {spinner} {msg} [{wide_bar:.cyan/blue}] {percent}% ({eta})");
    let pb = ProgressBar::with_draw_target(jobs.len() as u64, ProgressDrawTarget::term(term, 60));
    pb.set_style(spinner_style);

    let results = jobs
        .par_iter()
        .enumerate()
        .progress_with(pb)
        .map(|(index, &field)| -> Result<SimulationResult, SimulationError> {
            let settings = run_settings(field, sweep.event_budget, trajectory)?;
            let mut rng = worker_rng(seed, index);
            let result = TrajectorySimulatorBuilder::new()
                .with_processor(processor)
                .with_settings(&settings)
                .with_recorder(SummaryRecorder::default())
                .build()
                .simulate(&mut rng)?;
            tracing::debug!(
                "{:.3e} V/cm: drift {:.4e} cm/s, L occupancy {:.3}",
                field,
                result.drift_velocity(),
                result.valley_occupancy(Valley::L)
            );
            Ok(result)
        })
        .collect::<Result<Vec<_>, SimulationError>>()?;

    let mut points = results
        .into_iter()
        .group_by(|result| result.field().to_bits())
        .into_iter()
        .map(|(_, group)| {
            let mut field = 0_f64;
            let mut summary = TransportSummary::default();
            let mut truncated_runs = 0;
            for result in group {
                field = result.field();
                summary.merge(result.summary());
                truncated_runs += usize::from(result.truncated());
            }
            VelocityFieldPoint::from_summary(field, &summary, truncated_runs)
        })
        .collect::<Vec<_>>();
    points.sort_by(|a, b| a.field.total_cmp(&b.field));
    Ok(points)
}
