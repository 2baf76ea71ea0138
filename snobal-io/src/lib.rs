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
//! Point (single-cell) forcing I/O, output sinks, and progress
//! reporting — the collaborators the core calls through traits rather
//! than depending on directly.
//!
//! Nothing in [`snowcover`] or `engine` imports this crate; the
//! dependency arrow only ever points this way.
#![deny(missing_docs)]

#[cfg(feature = "float")]
/// Floating point precision used throughout this crate, selected by
/// the `float` feature (`f32` when enabled, `f64` otherwise).
pub type Float = f32;

#[cfg(not(feature = "float"))]
/// Floating point precision used throughout this crate, selected by
/// the `float` feature (`f32` when enabled, `f64` otherwise).
pub type Float = f64;

pub mod point_reader;
pub mod point_writer;
pub mod progress;
pub mod traits;

pub use point_reader::PointForcingReader;
pub use point_writer::PointCsvWriter;
pub use progress::ProgressBar;
pub use traits::{ForcingSource, OutputSink};
