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
//! The adaptive substep controller: given a pair of forcing records
//! bracketing one data interval, drives [`snowcover`]'s energy/mass
//! kernels across a normal/medium/small refinement hierarchy,
//! subdividing wherever a substep's mass change exceeds its level's
//! threshold (§4.7).
//!
//! This crate owns the *timing* of a run (the four-level timestep
//! table, the thresholds, where output gets emitted) but not the run
//! itself — iterating a whole forcing series, or a grid of cells,
//! lives one layer up in the driver.
#![deny(missing_docs)]

#[cfg(feature = "float")]
/// Floating point precision used throughout this crate, selected by
/// the `float` feature (`f32` when enabled, `f64` otherwise).
pub type Float = f32;

#[cfg(not(feature = "float"))]
/// Floating point precision used throughout this crate, selected by
/// the `float` feature (`f32` when enabled, `f64` otherwise).
pub type Float = f64;

pub mod advance;
pub mod config;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use advance::{advance_data_interval, AdvanceOutcome, AdvanceParams};
pub use config::{MeasurementHeights, OutputFlags, OutputMode, SnobalParams, TimestepLevelConfig, TstepInfo};
