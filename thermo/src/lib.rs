/*
MIT License
Copyright (c) Snobal contributors
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
//! Stand-alone physical kernels for surface-energy-balance
//! calculations: saturation vapor pressure, surface-layer similarity
//! turbulent fluxes, and snow thermal conductance.
//!
//! Nothing in this crate knows what a snowcover, a timestep or a cell
//! is; it only evaluates the named physics correlations given plain
//! numbers. The [`snowcover`](https://docs.rs/snowcover) crate is
//! where these are assembled into a state update.
#![deny(missing_docs)]

#[cfg(feature = "float")]
/// Floating point precision used throughout this crate, selected by
/// the `float` feature (`f32` when enabled, `f64` otherwise).
pub type Float = f32;

#[cfg(not(feature = "float"))]
/// Floating point precision used throughout this crate, selected by
/// the `float` feature (`f32` when enabled, `f64` otherwise).
pub type Float = f64;

pub mod conduction;
pub mod constants;
pub mod heat_capacity;
pub mod stability;
pub mod turbulent;
pub mod vapor;

pub use conduction::{efcon, ssxfr};
pub use heat_capacity::{air_density, pressure_at_elevation, snow_conductivity};
pub use stability::{psi, StabilityKind};
pub use turbulent::{hle1, TurbulentFluxes};
pub use vapor::{lh_fus, lh_sub, lh_vap, sati};
