/// This module provides the discrete energy axis on which scattering rates are
/// tabulated and looked up during the simulation
mod energy;

pub use energy::{EnergyAxis, EnergyAxisBuilder};
