// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Constants
//!
//! Defines physical constants used in the simulation. All values are given in a
//! mixed electron-volt, centimetre and second unit system, so an electron travelling
//! a distance `d` in a field `F` gains exactly `F * d` electron volts.

pub const BOLTZMANN: f64 = 8.617e-5; // The Boltzmann constant in eV / K
pub const ELECTRON_CHARGE: f64 = 1.602e-19; // Single electron charge in C
pub const EPSILON_0: f64 = 8.8548e-14; // Permitivitty of free space in F / cm
pub const HBAR: f64 = 6.5821e-16; // Reduced Planck constant in eV s
pub const SPEED_OF_LIGHT: f64 = 2.99792458e10; // Speed of light in cm / s
pub const ELECTRON_MASS: f64 = 0.511e6 / (SPEED_OF_LIGHT * SPEED_OF_LIGHT); // Single electron mass in eV s^2 / cm^2
pub const PI: f64 = std::f64::consts::PI;
