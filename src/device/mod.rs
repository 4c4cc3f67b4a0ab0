//! Controls the deserialization and storage of the simulated sample,
//! and the `MaterialInfoDesk` which yields all the material information necessary
//! to run the simulation

/// The info-desk which describes the material parameters used in the simulation
pub mod info_desk;
/// The deserialization and storage of the `Device`
pub(crate) mod reader;

pub use info_desk::{Material, MaterialInfoDesk};
pub use reader::Device;
