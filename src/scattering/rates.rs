//! Phonon scattering rates in a parabolic two valley band structure
//!
//! Rates are evaluated in closed form for acoustic deformation potential scattering, polar
//! optical (Frohlich) scattering and equivalent intervalley scattering. Every rate function
//! maps forbidden transitions, and any value which is not a finite non-negative real, to
//! exactly zero so downstream probabilities are always well defined.

use super::{Mechanism, Process, ScatteringChannel, Symmetry, Valley, ValleyMap};
use crate::constants::{ELECTRON_CHARGE, EPSILON_0, HBAR, PI};
use crate::device::MaterialInfoDesk;
use crate::error::BuildError;
use crate::spectral::EnergyAxis;
use ndarray::Array1;
use ndarray_stats::QuantileExt;

/// Replace anything which is not a finite positive rate with zero
fn sanitise(rate: f64) -> f64 {
    if rate.is_finite() && rate > 0_f64 {
        rate
    } else {
        0_f64
    }
}

/// Computes scattering rates for the material described by the wrapped info desk
#[derive(Copy, Clone, Debug)]
pub struct PhononScattering<'a> {
    info_desk: &'a MaterialInfoDesk,
}

impl<'a> PhononScattering<'a> {
    pub fn new(info_desk: &'a MaterialInfoDesk) -> Self {
        Self { info_desk }
    }

    /// Bose-Einstein occupation of a phonon mode with quantum `phonon_energy` in eV
    fn occupation(&self, phonon_energy: f64) -> f64 {
        1_f64 / ((phonon_energy / self.info_desk.thermal_voltage()).exp() - 1_f64)
    }

    /// The sign of the energy exchange and the phonon factor `N` or `N + 1`
    fn exchange(&self, phonon_energy: f64, process: Process) -> Option<(f64, f64)> {
        let occupation = self.occupation(phonon_energy);
        match process {
            Process::Absorption => Some((1_f64, occupation)),
            Process::Emission => Some((-1_f64, occupation + 1_f64)),
            Process::Elastic => None,
        }
    }

    /// Number of final valleys reachable in an intervalley transition
    fn final_valley_count(&self, source: Valley, destination: Valley) -> f64 {
        let degeneracy = self.info_desk.degeneracy(destination);
        if source == destination {
            degeneracy - 1_f64
        } else {
            degeneracy
        }
    }

    /// Acoustic deformation potential scattering rate at kinetic energy `energy`
    pub fn acoustic_rate(&self, energy: f64, valley: Valley) -> f64 {
        if energy <= 0_f64 {
            return 0_f64;
        }
        let info_desk = self.info_desk;
        let mass = info_desk.effective_mass(valley);
        let numerator = (2_f64 * mass).powf(1.5)
            * info_desk.thermal_voltage()
            * info_desk.acoustic_deformation_potential.powi(2);
        let denominator =
            4_f64 * PI * info_desk.density * info_desk.sound_velocity.powi(2) * HBAR.powi(4);
        sanitise(numerator / denominator * energy.sqrt())
    }

    /// Polar optical phonon scattering rate at kinetic energy `energy`
    ///
    /// Returns zero for `Process::Elastic`, which does not describe an optical transition
    pub fn optical_rate(&self, energy: f64, valley: Valley, process: Process) -> f64 {
        let info_desk = self.info_desk;
        let phonon_energy = info_desk.optical_phonon_energy();
        let (sign, phonon_factor) = match self.exchange(phonon_energy, process) {
            Some(exchange) => exchange,
            None => return 0_f64,
        };
        let final_energy = energy + sign * phonon_energy;
        if energy <= 0_f64 || final_energy <= 0_f64 {
            return 0_f64;
        }

        let mass = info_desk.effective_mass(valley);
        let prefactor = phonon_factor
            * ELECTRON_CHARGE
            * mass.sqrt()
            * info_desk.optical_phonon_frequency
            / (2_f64.sqrt() * HBAR * 4_f64 * PI * EPSILON_0)
            * (1_f64 / info_desk.high_frequency_dielectric_constant
                - 1_f64 / info_desk.static_dielectric_constant);

        let (initial, last) = (energy.sqrt(), final_energy.sqrt());
        let argument = ((initial + last) / (initial - last)).abs();
        sanitise(prefactor * argument.ln() / initial)
    }

    /// Equivalent intervalley phonon scattering rate at kinetic energy `energy`
    ///
    /// The final state density is that of the `destination` valley, weighted by the number of
    /// equivalent minima available to scatter into.
    pub fn intervalley_rate(
        &self,
        energy: f64,
        source: Valley,
        destination: Valley,
        process: Process,
    ) -> f64 {
        let channel = match self.intervalley_channel(source, destination, process) {
            Some(channel) => channel,
            None => return 0_f64,
        };
        let final_energy = energy + channel.energy_shift;
        if final_energy <= 0_f64 {
            return 0_f64;
        }
        let info_desk = self.info_desk;
        let phonon_factor = match self.exchange(info_desk.intervalley_phonon_energy(), process) {
            Some((_, phonon_factor)) => phonon_factor,
            None => return 0_f64,
        };
        let numerator = phonon_factor
            * self.final_valley_count(source, destination)
            * info_desk.effective_mass(destination).powf(1.5)
            * info_desk.intervalley_deformation_potential.powi(2);
        let denominator = 2_f64.sqrt()
            * PI
            * info_desk.density
            * info_desk.intervalley_phonon_frequency
            * HBAR.powi(3);
        sanitise(numerator / denominator * final_energy.sqrt())
    }

    pub fn acoustic_channel(&self, valley: Valley) -> ScatteringChannel {
        ScatteringChannel {
            mechanism: Mechanism::Acoustic,
            symmetry: Symmetry::Isotropic,
            process: Process::Elastic,
            source: valley,
            destination: valley,
            energy_shift: 0_f64,
        }
    }

    pub fn optical_channel(&self, valley: Valley, process: Process) -> Option<ScatteringChannel> {
        let phonon_energy = self.info_desk.optical_phonon_energy();
        self.exchange(phonon_energy, process)
            .map(|(sign, _)| ScatteringChannel {
                mechanism: Mechanism::Optical,
                symmetry: Symmetry::Anisotropic,
                process,
                source: valley,
                destination: valley,
                energy_shift: sign * phonon_energy,
            })
    }

    /// The intervalley channel between two valleys, `None` when no final valley is available
    pub fn intervalley_channel(
        &self,
        source: Valley,
        destination: Valley,
        process: Process,
    ) -> Option<ScatteringChannel> {
        if self.final_valley_count(source, destination) <= 0_f64 {
            return None;
        }
        let info_desk = self.info_desk;
        let phonon_energy = info_desk.intervalley_phonon_energy();
        self.exchange(phonon_energy, process)
            .map(|(sign, _)| ScatteringChannel {
                mechanism: Mechanism::Intervalley,
                symmetry: Symmetry::Isotropic,
                process,
                source,
                destination,
                energy_shift: sign * phonon_energy + info_desk.valley_offset(source)
                    - info_desk.valley_offset(destination),
            })
    }

    /// All channels out of `valley`, in table order
    ///
    /// Acoustic, optical absorption and emission, then absorption and emission into every
    /// reachable valley in `Valley::ALL` order.
    pub fn channels(&self, valley: Valley) -> Vec<ScatteringChannel> {
        let processes = [Process::Absorption, Process::Emission];
        std::iter::once(self.acoustic_channel(valley))
            .chain(
                processes
                    .iter()
                    .filter_map(|&process| self.optical_channel(valley, process)),
            )
            .chain(Valley::ALL.into_iter().flat_map(|destination| {
                processes.iter().filter_map(move |&process| {
                    self.intervalley_channel(valley, destination, process)
                })
            }))
            .collect()
    }

    /// Rate of `channel` at kinetic energy `energy`
    pub fn rate(&self, channel: &ScatteringChannel, energy: f64) -> f64 {
        match channel.mechanism {
            Mechanism::Acoustic => self.acoustic_rate(energy, channel.source),
            Mechanism::Optical => self.optical_rate(energy, channel.source, channel.process),
            Mechanism::Intervalley => self.intervalley_rate(
                energy,
                channel.source,
                channel.destination,
                channel.process,
            ),
        }
    }

    /// Rate of `channel` at every point of the energy axis
    pub fn tabulate(&self, channel: &ScatteringChannel, axis: &EnergyAxis) -> Array1<f64> {
        axis.points().mapv(|energy| self.rate(channel, energy))
    }
}

/// Tabulated rates for every channel out of a single valley
#[derive(Clone, Debug)]
pub struct ValleyRates {
    valley: Valley,
    channels: Vec<ScatteringChannel>,
    rates: Vec<Array1<f64>>,
    total: Array1<f64>,
    maximum: f64,
}

impl ValleyRates {
    fn build(
        valley: Valley,
        scattering: &PhononScattering<'_>,
        axis: &EnergyAxis,
    ) -> Result<Self, BuildError> {
        let channels = scattering.channels(valley);
        let rates = channels
            .iter()
            .map(|channel| scattering.tabulate(channel, axis))
            .collect::<Vec<_>>();
        let total = rates.iter().fold(
            Array1::<f64>::zeros(axis.num_points()),
            |total, rate| total + rate,
        );
        let maximum = *total
            .max()
            .map_err(|_| BuildError::ZeroMaximumRate(valley))?;
        if !maximum.is_finite() || maximum <= 0_f64 {
            return Err(BuildError::ZeroMaximumRate(valley));
        }
        tracing::info!(
            "{} valley: {} channels, maximum scattering rate {:.4e} 1/s",
            valley,
            channels.len(),
            maximum
        );
        Ok(Self {
            valley,
            channels,
            rates,
            total,
            maximum,
        })
    }

    pub fn valley(&self) -> Valley {
        self.valley
    }

    pub fn channels(&self) -> &[ScatteringChannel] {
        &self.channels
    }

    /// The tabulated rate of every channel, in the order of `channels`
    pub fn rates(&self) -> &[Array1<f64>] {
        &self.rates
    }

    /// Sum of all channel rates
    pub fn total(&self) -> &Array1<f64> {
        &self.total
    }

    /// The largest total rate on the axis, the constant event rate used for free flights
    pub fn maximum(&self) -> f64 {
        self.maximum
    }
}

/// The scattering rates of every valley tabulated on a common energy axis
#[derive(Clone, Debug)]
pub struct RateTable {
    axis: EnergyAxis,
    valleys: ValleyMap<ValleyRates>,
}

impl RateTable {
    pub fn build(axis: &EnergyAxis, info_desk: &MaterialInfoDesk) -> Result<Self, BuildError> {
        let scattering = PhononScattering::new(info_desk);
        let gamma = ValleyRates::build(Valley::Gamma, &scattering, axis)?;
        let l = ValleyRates::build(Valley::L, &scattering, axis)?;
        Ok(Self {
            axis: axis.clone(),
            valleys: ValleyMap::new(gamma, l),
        })
    }

    pub fn axis(&self) -> &EnergyAxis {
        &self.axis
    }

    pub fn valley(&self, valley: Valley) -> &ValleyRates {
        &self.valleys[valley]
    }

    pub fn maximum_rate(&self, valley: Valley) -> f64 {
        self.valleys[valley].maximum
    }
}
