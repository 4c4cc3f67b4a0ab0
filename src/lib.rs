// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Transporter-MC is a single particle Monte Carlo electron transport solver written in Rust
//!
//! # Overview
//! Transporter-MC follows a single conduction electron in a bulk polar semiconductor as it is
//! accelerated by a constant electric field and scattered by the lattice. Between collisions
//! the electron moves freely, the duration of each free flight being drawn from an exponential
//! distribution. Collisions are chosen among acoustic deformation potential, polar optical and
//! equivalent intervalley phonon scattering using rates tabulated on a discrete energy axis.
//! A fictitious self-scattering channel makes the total collision rate constant in each valley,
//! which is what allows the flight times to be sampled without knowledge of the path.
//!
//! Averaging the velocity and valley of the electron over long runs yields the steady state
//! drift velocity, the occupancy of the Gamma and L valleys and the mean electron energy. A
//! sweep over the applied field gives the velocity-field characteristic of the material,
//! including the negative differential mobility caused by transfer to the heavy L valleys.
//!
//! # Usage
//! Transporter-MC is distributed as a binary crate, and is intended to be run from the command
//! line. Numerical settings are read from `.config/default.toml`, with overrides in
//! `.config/$RUN_MODE.toml`. The sample may be described in a `.toml` file:
//!
//! ```toml
//! material = "GaAs"
//! temperature = 300.0
//! ```
//!
//! which is passed as the positional argument, alongside the calculation to run:
//!
//! ```bash
//! transporter-mc structure.toml --calculation velocity-field --seed 42
//! ```

#![allow(clippy::type_complexity)]

/// The command line global application, tracing and display primitives
pub mod app;

/// Physical constants
pub mod constants;

/// Device and material parameters
pub mod device;

/// The state of the simulated electron
pub mod electron;

/// Error handling
pub mod error;

/// Statistics of recorded trajectories
pub mod postprocessor;

/// Free flights and scattering events
pub mod processor;

/// Scattering channels, rate tables and the cumulative sampling tables
pub mod scattering;

/// Discrete energy spaces
pub mod spectral;

/// Single particle runs and their recorders
pub mod trajectory;
