//! # Postprocessor
//!
//! Statistics computed from recorded trajectories: histograms of the sampled energies or
//! velocities, the number of intervalley transitions and the mean energy in each valley.

mod histogram;
mod statistics;

pub use histogram::Histogram;
pub use statistics::{count_intervalley_transitions, mean_energy_by_valley, samples};

use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum PostProcessorError {
    #[error("cannot build a histogram from an empty sample")]
    EmptySample,
    #[error("a histogram needs at least one bin")]
    ZeroBins,
    #[error("the sample contains non-finite values")]
    NonFiniteSample,
}
