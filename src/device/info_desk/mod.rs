//! Generates and returns compile-time defined material properties
//!
//! This module defines the `Material` enum which represents all materials implemented
//! in the simulation software. It generates the parameters needed to run a simulation
//! and passes them out through the `MaterialInfoDesk`, a single immutable value which is
//! handed by reference to the rate model and the event processor.

mod materials;

pub use materials::Material;

use crate::constants::{BOLTZMANN, HBAR};
use crate::scattering::{Valley, ValleyMap};

/// Struct holding all the material information necessary to run a transport simulation
#[derive(Clone, Debug)]
pub struct MaterialInfoDesk {
    /// The material the parameters describe
    pub(crate) material: Material,
    /// The lattice temperature in Kelvin
    pub(crate) temperature: f64,
    /// Mass density in eV s^2 / cm^5
    pub(crate) density: f64,
    /// Longitudinal sound velocity in cm / s
    pub(crate) sound_velocity: f64,
    /// Relative permittivity above the optical phonon frequency
    pub(crate) high_frequency_dielectric_constant: f64,
    /// Relative permittivity below the optical phonon frequency
    pub(crate) static_dielectric_constant: f64,
    /// Angular frequency of the polar optical phonon in rad / s
    pub(crate) optical_phonon_frequency: f64,
    /// Angular frequency of the equivalent intervalley phonon in rad / s
    pub(crate) intervalley_phonon_frequency: f64,
    /// Acoustic deformation potential in eV
    pub(crate) acoustic_deformation_potential: f64,
    /// Intervalley deformation potential in eV / cm
    pub(crate) intervalley_deformation_potential: f64,
    /// The effective mass in each valley in eV s^2 / cm^2
    pub(crate) effective_mass: ValleyMap<f64>,
    /// The number of equivalent minima making up each valley
    pub(crate) degeneracy: ValleyMap<f64>,
    /// The energy of each valley minimum measured from the bottom of the Gamma valley in eV
    pub(crate) valley_offset: ValleyMap<f64>,
}

impl MaterialInfoDesk {
    pub fn material(&self) -> Material {
        self.material
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// The thermal voltage `kB T` in eV
    pub fn thermal_voltage(&self) -> f64 {
        BOLTZMANN * self.temperature
    }

    pub fn effective_mass(&self, valley: Valley) -> f64 {
        self.effective_mass[valley]
    }

    pub fn degeneracy(&self, valley: Valley) -> f64 {
        self.degeneracy[valley]
    }

    pub fn valley_offset(&self, valley: Valley) -> f64 {
        self.valley_offset[valley]
    }

    /// The polar optical phonon energy in eV
    pub fn optical_phonon_energy(&self) -> f64 {
        HBAR * self.optical_phonon_frequency
    }

    /// The equivalent intervalley phonon energy in eV
    pub fn intervalley_phonon_energy(&self) -> f64 {
        HBAR * self.intervalley_phonon_frequency
    }

    /// Magnitude of the wavevector of a parabolic band electron with kinetic energy `energy`
    ///
    /// `|k|^2 = 2 m E / hbar^2`, negative energies are treated as zero
    pub fn wavevector_magnitude(&self, valley: Valley, energy: f64) -> f64 {
        let energy = if energy >= 0_f64 { energy } else { 0_f64 };
        (2_f64 * self.effective_mass(valley) * energy).sqrt() / HBAR
    }

    /// Kinetic energy of a parabolic band electron with wavevector magnitude `magnitude`
    pub fn energy_from_wavevector(&self, valley: Valley, magnitude: f64) -> f64 {
        (magnitude * HBAR).powi(2) / (2_f64 * self.effective_mass(valley))
    }

    /// Group velocity along the field axis for axial wavevector `kz`
    pub fn velocity(&self, valley: Valley, kz: f64) -> f64 {
        HBAR * kz / self.effective_mass(valley)
    }
}

#[cfg(test)]
mod test {
    use super::Material;
    use crate::scattering::Valley;
    use approx::assert_relative_eq;

    #[test]
    fn non_positive_temperature_is_rejected() {
        assert!(Material::GaAs.info_desk(0_f64).is_err());
        assert!(Material::GaAs.info_desk(-10_f64).is_err());
        assert!(Material::GaAs.info_desk(f64::NAN).is_err());
    }

    #[test]
    fn wavevector_and_energy_are_inverse() {
        let info_desk = Material::GaAs.info_desk(300_f64).unwrap();
        for valley in Valley::ALL {
            for energy in [1e-4, 0.01, 0.3, 1.7] {
                let magnitude = info_desk.wavevector_magnitude(valley, energy);
                let recovered = info_desk.energy_from_wavevector(valley, magnitude);
                assert_relative_eq!(recovered, energy, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn negative_energy_gives_zero_wavevector() {
        let info_desk = Material::GaAs.info_desk(300_f64).unwrap();
        assert_eq!(info_desk.wavevector_magnitude(Valley::Gamma, -0.1), 0_f64);
    }

    #[test]
    fn gaas_phonon_energies_are_in_the_expected_range() {
        let info_desk = Material::GaAs.info_desk(300_f64).unwrap();
        assert_relative_eq!(info_desk.optical_phonon_energy(), 0.0353, epsilon = 1e-3);
        assert_relative_eq!(info_desk.intervalley_phonon_energy(), 0.0299, epsilon = 1e-3);
        assert_relative_eq!(info_desk.thermal_voltage(), 0.02585, epsilon = 1e-4);
    }
}
