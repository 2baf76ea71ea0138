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
//! Shared I/O trait definitions.
use snobal_error::SnobalError;
use snowcover::input::InputRecord;
use snowcover::state::SnowcoverState;

/// Supplies consecutive pairs of data records bracketing each data
/// interval. The core never depends on this trait; only the driver
/// binary does.
pub trait ForcingSource {
    /// Returns the next `(input1, input2)` pair, or `None` once the
    /// series is exhausted. `input1` of one call equals `input2` of
    /// the previous call for a contiguous series.
    fn next_pair(&mut self) -> Result<Option<(InputRecord, InputRecord)>, SnobalError>;
}

/// Accepts finished substeps for recording. Implementations decide
/// their own write/flush/concurrency discipline; the core only ever
/// calls through this trait with an already-valid state.
pub trait OutputSink {
    /// Writes one record for `state`. `temps_in_c` controls whether
    /// temperature fields are converted from Kelvin at write time
    /// (§6).
    fn write(&mut self, state: &SnowcoverState, temps_in_c: bool) -> Result<(), SnobalError>;
}
