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
use crate::CellId;
use std::fmt;

/// The five error kinds the core can raise.
///
/// `exit_code()` gives the driver the informational process exit code
/// associated with each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnobalErrorKind {
    /// A numerical input was outside the physical range a kernel requires
    /// (e.g. a temperature in Kelvin that is not positive).
    DomainError,

    /// Precipitation was classified as snow (`percent_snow > 0`) but no
    /// snow density was supplied to convert it to a depth.
    InvalidPrecip,

    /// An iterative solver (`hle1`) did not settle within its iteration
    /// and relaxed-retry budget.
    NoConvergence,

    /// A bookkeeping invariant (mass or energy conservation, layer
    /// structure) did not hold after a step. This is always a bug.
    Invariant,

    /// An output sink failed to accept a record.
    IoError,
}

impl SnobalErrorKind {
    /// The process exit code the driver should use when this is the
    /// first error encountered during a run.
    pub fn exit_code(self) -> i32 {
        match self {
            SnobalErrorKind::Invariant => 1,
            SnobalErrorKind::NoConvergence => 2,
            SnobalErrorKind::DomainError | SnobalErrorKind::InvalidPrecip => 3,
            // Not named in the driver's informational exit-code table; a
            // sink failure is reported the same way as bad input.
            SnobalErrorKind::IoError => 3,
        }
    }

    /// Whether this error kind indicates a programming bug rather than
    /// bad input or a transient numerical failure. `Invariant` errors
    /// are never recovered.
    pub fn is_fatal(self) -> bool {
        matches!(self, SnobalErrorKind::Invariant)
    }
}

impl fmt::Display for SnobalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SnobalErrorKind::DomainError => "DomainError",
            SnobalErrorKind::InvalidPrecip => "InvalidPrecip",
            SnobalErrorKind::NoConvergence => "NoConvergence",
            SnobalErrorKind::Invariant => "Invariant",
            SnobalErrorKind::IoError => "IoError",
        };
        write!(f, "{name}")
    }
}

/// An error raised by the snowcover core.
///
/// Carries enough context for the driver to print "the failing cell
/// coordinates, the current simulated time, and the error kind"
/// without the core depending on any particular sink or logger.
#[derive(Debug, Clone, PartialEq)]
pub struct SnobalError {
    kind: SnobalErrorKind,
    message: String,
    cell: Option<CellId>,
    hours: Option<f64>,
}

impl SnobalError {
    /// Builds a new error of the given kind with a human-readable message.
    pub fn new(kind: SnobalErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cell: None,
            hours: None,
        }
    }

    /// Attaches the cell this error occurred in.
    pub fn at_cell(mut self, cell: CellId) -> Self {
        self.cell = Some(cell);
        self
    }

    /// Attaches the simulated time (hours since start) this error
    /// occurred at.
    pub fn at_time(mut self, hours: f64) -> Self {
        self.hours = Some(hours);
        self
    }

    /// The error kind.
    pub fn kind(&self) -> SnobalErrorKind {
        self.kind
    }

    /// The cell this error occurred in, if known.
    pub fn cell(&self) -> Option<CellId> {
        self.cell
    }

    /// The simulated time this error occurred at, if known.
    pub fn hours(&self) -> Option<f64> {
        self.hours
    }
}

impl fmt::Display for SnobalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(cell) = self.cell {
            write!(f, " (at {cell}")?;
            if let Some(hours) = self.hours {
                write!(f, ", t={hours:.3}h")?;
            }
            write!(f, ")")?;
        } else if let Some(hours) = self.hours {
            write!(f, " (t={hours:.3}h)")?;
        }
        Ok(())
    }
}

impl std::error::Error for SnobalError {}
