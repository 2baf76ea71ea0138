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
//! The two-layer snowcover model: per-cell state, the instantaneous
//! energy and mass balance, and the layer-structure rebuild that
//! keeps geometry and mass consistent after every substep.
//!
//! This crate has no notion of a run, a clock, or a grid of cells —
//! it only knows how to push one cell's [`state::SnowcoverState`]
//! forward by one substep given a forcing instant. The adaptive
//! substep controller that decides how many times to call it, and at
//! what refinement level, lives one layer up.
#![deny(missing_docs)]

#[cfg(feature = "float")]
/// Floating point precision used throughout this crate, selected by
/// the `float` feature (`f32` when enabled, `f64` otherwise).
pub type Float = f32;

#[cfg(not(feature = "float"))]
/// Floating point precision used throughout this crate, selected by
/// the `float` feature (`f32` when enabled, `f64` otherwise).
pub type Float = f64;

pub mod deltas;
pub mod energy;
pub mod input;
pub mod layers;
pub mod mass;
pub mod state;

pub use deltas::{InputDeltas, LevelDelta, LevelIntervals, SubstepForcing, TimestepLevel};
pub use energy::EnergyFluxes;
pub use input::InputRecord;
pub use state::{LayerCount, SnowcoverState};
