use super::{info_desk::MaterialInfoDesk, Material};
use crate::error::BuildError;
use color_eyre::eyre::eyre;
use config::{Config, File};
use serde::Deserialize;
use std::path::PathBuf;

/// The bulk sample an electron is simulated in, deserialized from a `.toml` file
#[derive(Debug, Deserialize)]
pub struct Device {
    pub(crate) material: Material,
    pub(crate) temperature: f64,
}

impl Device {
    pub fn build(path: PathBuf) -> color_eyre::Result<Self> {
        let s = Config::builder().add_source(File::from(path)).build()?;
        s.try_deserialize()
            .map_err(|e| eyre!("Failed to deserialize device: {:?}", e))
    }

    /// A GaAs sample at the given lattice temperature
    pub fn gaas(temperature: f64) -> Self {
        Self {
            material: Material::GaAs,
            temperature,
        }
    }

    /// Builds the immutable parameter bundle for the sample
    pub fn build_info_desk(&self) -> Result<MaterialInfoDesk, BuildError> {
        self.material.info_desk(self.temperature)
    }
}
