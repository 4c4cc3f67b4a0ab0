//! # App
//!
//! This module governs the high-level implementation of the simulation: command line
//! parsing, configuration, telemetry and dispatch to the requested calculation.

mod calculations;
mod configuration;
mod output;
mod telemetry;

pub use calculations::VelocityFieldPoint;
pub(crate) use configuration::Configuration;

use crate::{
    device::Device,
    postprocessor,
    processor::ScatteringEventProcessor,
    scattering::{CumulativeTable, RateTable, Valley},
    spectral::EnergyAxisBuilder,
};
use clap::{ArgEnum, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct App {
    /// A `.toml` file describing the simulated sample, GaAs at the configured temperature if absent
    file_path: Option<PathBuf>,
    #[clap(arg_enum, short, long, default_value = "info")]
    log_level: LogLevel,
    #[clap(arg_enum, short, long, default_value = "trajectory")]
    calculation: Calculation,
    /// Overrides the seed of the configuration file
    #[clap(short, long)]
    seed: Option<u64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
pub(crate) enum Calculation {
    /// A single electron at the configured field
    Trajectory,
    /// A parallel sweep of the applied field
    VelocityField,
}

pub fn run() -> color_eyre::Result<()> {
    let cli = App::parse();
    let config = Configuration::build()?;

    let (subscriber, _guard) =
        telemetry::get_subscriber(cli.log_level, &config.global.results_directory);
    telemetry::init_subscriber(subscriber)?;

    let device = match cli.file_path {
        Some(path) => Device::build(path)?,
        None => Device::gaas(config.global.temperature),
    };
    let info_desk = device.build_info_desk()?;
    tracing::info!(
        "Simulating {} at {} K",
        info_desk.material(),
        info_desk.temperature()
    );

    let axis = EnergyAxisBuilder::new()
        .with_number_of_points(config.spectral.number_of_energy_points)
        .with_energy_range(std::ops::Range {
            start: config.spectral.minimum_energy,
            end: config.spectral.maximum_energy,
        })
        .build()?;
    let rates = RateTable::build(&axis, &info_desk)?;
    let table = CumulativeTable::build(&rates);
    let processor = ScatteringEventProcessor::new(&table, &info_desk);
    let seed = cli.seed.or(config.global.seed);

    let term = console::Term::stdout();
    match cli.calculation {
        Calculation::Trajectory => {
            let result = calculations::single_trajectory(&processor, &config.trajectory, seed)?;
            term.write_line(&format!(
                "Drift velocity {:.4e} cm/s, Gamma occupancy {:.3}, L occupancy {:.3}",
                result.drift_velocity(),
                result.valley_occupancy(Valley::Gamma),
                result.valley_occupancy(Valley::L)
            ))?;
            if let Some(trajectory) = result.trajectory() {
                let means = postprocessor::mean_energy_by_valley(trajectory);
                tracing::info!(
                    "{} intervalley transitions, mean energy Gamma {:?} eV, L {:?} eV",
                    postprocessor::count_intervalley_transitions(trajectory),
                    means[Valley::Gamma],
                    means[Valley::L]
                );
                let energies = postprocessor::samples(trajectory, |snapshot| snapshot.energy);
                let histogram = postprocessor::Histogram::build(energies.view(), 50)?;
                output::write_histogram(
                    &config.global.results_directory,
                    "energy_distribution.txt",
                    &histogram,
                )?;
            }
            output::write_trajectory(&config.global.results_directory, &result)?;
        }
        Calculation::VelocityField => {
            let points = calculations::velocity_field_sweep(
                &processor,
                &config.sweep,
                &config.trajectory,
                seed,
            )?;
            for point in points.iter() {
                term.write_line(&format!(
                    "{:>10.1} V/cm {:>12.4e} cm/s",
                    point.field, point.drift_velocity
                ))?;
            }
            output::write_velocity_field(&config.global.results_directory, &points)?;
        }
    }
    Ok(())
}
