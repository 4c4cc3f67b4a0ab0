use super::MaterialInfoDesk;
use crate::constants::{ELECTRON_MASS, SPEED_OF_LIGHT};
use crate::error::BuildError;
use crate::scattering::ValleyMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[non_exhaustive]
/// Enum with all implemented material types
///
/// As materials may be added in future this is labelled as `non_exhaustive`
pub enum Material {
    GaAs,
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Material::GaAs => {
                write!(f, "GaAs")
            }
        }
    }
}

impl Material {
    /// Builds an instance of `MaterialInfoDesk` for the given `Material` variant at `temperature` (K)
    pub fn info_desk(&self, temperature: f64) -> Result<MaterialInfoDesk, BuildError> {
        if !temperature.is_finite() || temperature <= 0_f64 {
            return Err(BuildError::InvalidTemperature(temperature));
        }
        match self {
            Material::GaAs => Ok(MaterialInfoDesk::gaas(temperature)),
        }
    }
}

impl MaterialInfoDesk {
    fn gaas(temperature: f64) -> Self {
        Self {
            material: Material::GaAs,
            temperature,
            density: 3.0123e33 / (SPEED_OF_LIGHT * SPEED_OF_LIGHT),
            sound_velocity: 5.22e5,
            high_frequency_dielectric_constant: 10.82,
            static_dielectric_constant: 12.53,
            optical_phonon_frequency: 5.37e13,
            intervalley_phonon_frequency: 4.54e13,
            acoustic_deformation_potential: 7.0,
            intervalley_deformation_potential: 1e9,
            effective_mass: ValleyMap::new(0.067 * ELECTRON_MASS, 0.350 * ELECTRON_MASS),
            degeneracy: ValleyMap::new(1.0, 3.0),
            valley_offset: ValleyMap::new(0.0, 0.36),
        }
    }
}
