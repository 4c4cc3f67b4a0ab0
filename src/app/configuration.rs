use crate::scattering::Valley;
use crate::trajectory::RecordingMode;
use color_eyre::eyre::eyre;
use config::{Config, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub(crate) struct Configuration {
    pub(crate) global: GlobalConfiguration,
    pub(crate) spectral: SpectralConfiguration,
    pub(crate) trajectory: TrajectoryConfiguration,
    pub(crate) sweep: SweepConfiguration,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlobalConfiguration {
    /// Directory receiving the log file and the simulation output
    pub(crate) results_directory: PathBuf,
    /// Lattice temperature used when no structure file is passed
    pub(crate) temperature: f64,
    /// Base seed for the random streams, drawn from entropy when absent
    pub(crate) seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpectralConfiguration {
    pub(crate) number_of_energy_points: usize,
    pub(crate) minimum_energy: f64,
    pub(crate) maximum_energy: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrajectoryConfiguration {
    pub(crate) field: f64,
    pub(crate) event_budget: u64,
    pub(crate) initial_energy: f64,
    pub(crate) initial_valley: Valley,
    pub(crate) flights_per_event: u64,
    pub(crate) recording: RecordingMode,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SweepConfiguration {
    pub(crate) minimum_field: f64,
    pub(crate) maximum_field: f64,
    pub(crate) number_of_fields: usize,
    pub(crate) particles_per_field: usize,
    pub(crate) event_budget: u64,
}

impl Configuration {
    pub(crate) fn build() -> color_eyre::Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // The default settings for the simulation which we use in the general case
            .add_source(File::with_name(".config/default"))
            // The override settings which may be set by the user, optional
            .add_source(File::with_name(&format!(".config/{}", run_mode)).required(false))
            .build()?;

        s.try_deserialize()
            .map_err(|e| eyre!(format!("Failed to deserialize the config file: {:?}", e)))
    }
}

impl SweepConfiguration {
    /// The linearly spaced fields of the sweep, in V / cm
    pub(crate) fn fields(&self) -> Vec<f64> {
        match self.number_of_fields {
            0 => Vec::new(),
            1 => vec![self.minimum_field],
            n => ndarray::Array1::linspace(self.minimum_field, self.maximum_field, n).to_vec(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::SweepConfiguration;

    #[test]
    fn sweep_fields_include_both_ends() {
        let sweep = SweepConfiguration {
            minimum_field: 1e3,
            maximum_field: 2e4,
            number_of_fields: 20,
            particles_per_field: 1,
            event_budget: 10,
        };
        let fields = sweep.fields();
        assert_eq!(fields.len(), 20);
        assert_eq!(fields[0], 1e3);
        assert!((fields[19] - 2e4).abs() < 1e-9);
    }
}
