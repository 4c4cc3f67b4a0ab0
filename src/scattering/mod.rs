//! # Scattering
//!
//! Electron-phonon scattering in a two valley polar semiconductor. The rates of each
//! mechanism are tabulated on an `EnergyAxis` in a `RateTable`, which is then folded into
//! a `CumulativeTable` of per-energy discrete distributions used to sample events.
//!
//! Each mechanism is described by an immutable `ScatteringChannel`, which carries everything
//! the event processor needs to construct the final state: the destination valley, the
//! energy exchanged with the lattice and whether the final direction is randomised.

mod cumulative;
mod rates;

pub use cumulative::{CumulativeTable, SelectedRow};
pub use rates::{PhononScattering, RateTable, ValleyRates};

use crate::error::BuildError;
use std::ops::{Index, IndexMut};

/// A conduction band minimum an electron can occupy
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Deserialize)]
pub enum Valley {
    Gamma,
    L,
}

impl Valley {
    /// Every valley, in table order
    pub const ALL: [Valley; 2] = [Valley::Gamma, Valley::L];

    pub fn index(self) -> usize {
        match self {
            Valley::Gamma => 0,
            Valley::L => 1,
        }
    }
}

impl std::fmt::Display for Valley {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Valley::Gamma => write!(f, "Gamma"),
            Valley::L => write!(f, "L"),
        }
    }
}

impl std::str::FromStr for Valley {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "G" | "Gamma" | "GAMMA" | "gamma" => Ok(Valley::Gamma),
            "L" | "l" => Ok(Valley::L),
            _ => Err(BuildError::UnknownValley(s.to_string())),
        }
    }
}

/// A value stored for every `Valley`
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ValleyMap<T>([T; 2]);

impl<T> ValleyMap<T> {
    pub fn new(gamma: T, l: T) -> Self {
        Self([gamma, l])
    }

    pub fn from_fn(mut f: impl FnMut(Valley) -> T) -> Self {
        Self([f(Valley::Gamma), f(Valley::L)])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Valley, &T)> + '_ {
        Valley::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Valley> for ValleyMap<T> {
    type Output = T;

    fn index(&self, valley: Valley) -> &T {
        &self.0[valley.index()]
    }
}

impl<T> IndexMut<Valley> for ValleyMap<T> {
    fn index_mut(&mut self, valley: Valley) -> &mut T {
        &mut self.0[valley.index()]
    }
}

/// The physical origin of a scattering channel
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mechanism {
    Acoustic,
    Optical,
    Intervalley,
}

/// How the direction of the final state is distributed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Symmetry {
    /// The final direction is uniformly randomised
    Isotropic,
    /// The final direction is weighted toward the initial direction
    Anisotropic,
}

/// Whether a phonon is absorbed or emitted in the transition
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Process {
    Absorption,
    Emission,
    /// Acoustic scattering is treated as elastic, no energy is exchanged
    Elastic,
}

/// A single scattering mechanism between two valleys
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScatteringChannel {
    pub mechanism: Mechanism,
    pub symmetry: Symmetry,
    pub process: Process,
    pub source: Valley,
    pub destination: Valley,
    /// The change in kinetic energy on scattering, in eV
    pub energy_shift: f64,
}

impl std::fmt::Display for ScatteringChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:?} {:?} ({} -> {}, dE = {:.4} eV)",
            self.mechanism, self.process, self.source, self.destination, self.energy_shift
        )
    }
}

#[cfg(test)]
mod test {
    use super::{Valley, ValleyMap};

    #[test]
    fn valley_names_parse() {
        assert_eq!("G".parse::<Valley>().unwrap(), Valley::Gamma);
        assert_eq!("Gamma".parse::<Valley>().unwrap(), Valley::Gamma);
        assert_eq!("L".parse::<Valley>().unwrap(), Valley::L);
        assert!("X".parse::<Valley>().is_err());
    }

    #[test]
    fn valley_map_is_indexed_by_valley() {
        let mut map = ValleyMap::new(1_usize, 2_usize);
        map[Valley::L] += 3;
        assert_eq!(map[Valley::Gamma], 1);
        assert_eq!(map[Valley::L], 5);
        let collected = map.iter().map(|(valley, &value)| (valley, value)).collect::<Vec<_>>();
        assert_eq!(collected, vec![(Valley::Gamma, 1), (Valley::L, 5)]);
    }
}
