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

#![deny(missing_docs)]

//! Error kinds and reporting conventions shared by every Snobal crate.
//!
//! This is deliberately small: a `SnobalErrorKind` enum matching the
//! kinds a snowcover run can fail with, a `SnobalError` that carries
//! enough context (cell, simulated time) for the driver to print a
//! useful diagnostic line, and an `ErrorHandling` trait that keeps a
//! module-tagged distinction between user-caused and internal errors.

/// The kind of floating point number used across the workspace. The
/// `"float"` feature switches every crate to `f32`; `f64` is used
/// otherwise.
#[cfg(feature = "float")]
pub type Float = f32;

/// The kind of floating point number used across the workspace. The
/// `"float"` feature switches every crate to `f32`; `f64` is used
/// otherwise.
#[cfg(not(feature = "float"))]
pub type Float = f64;

mod cell;
pub use crate::cell::CellId;

mod error;
pub use crate::error::{SnobalError, SnobalErrorKind};

/// Helps communicating issues to the user in a way that names the
/// module that raised them.
///
/// A user error means the input data is bad (out-of-range forcing,
/// invalid precipitation classification). An internal error means a
/// bookkeeping invariant was violated, which is always a bug and
/// should never be silently recovered from.
pub trait ErrorHandling {
    /// The module name used when reporting errors.
    fn module_name() -> &'static str;

    /// Builds a user-caused error (bad input data).
    fn user_error<T>(kind: SnobalErrorKind, msg: impl Into<String>) -> Result<T, SnobalError> {
        let name = <Self as ErrorHandling>::module_name();
        Err(SnobalError::new(kind, format!("[{name}] {}", msg.into())))
    }

    /// Builds an internal error (a bug in this module's bookkeeping).
    fn internal_error<T>(msg: impl Into<String>) -> Result<T, SnobalError> {
        let name = <Self as ErrorHandling>::module_name();
        Err(SnobalError::new(
            SnobalErrorKind::Invariant,
            format!("[{name}] {}", msg.into()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DummyModule;
    impl ErrorHandling for DummyModule {
        fn module_name() -> &'static str {
            "dummy"
        }
    }

    #[test]
    fn user_error_tags_module_name() {
        let err: Result<(), SnobalError> =
            DummyModule::user_error(SnobalErrorKind::DomainError, "bad temperature");
        let err = err.unwrap_err();
        assert_eq!(err.kind(), SnobalErrorKind::DomainError);
        assert!(err.to_string().contains("dummy"));
    }

    #[test]
    fn internal_error_is_invariant_kind() {
        let err: Result<(), SnobalError> = DummyModule::internal_error("mass leaked");
        assert_eq!(err.unwrap_err().kind(), SnobalErrorKind::Invariant);
    }

    #[test]
    fn exit_codes_match_spec() {
        assert_eq!(SnobalErrorKind::Invariant.exit_code(), 1);
        assert_eq!(SnobalErrorKind::NoConvergence.exit_code(), 2);
        assert_eq!(SnobalErrorKind::DomainError.exit_code(), 3);
        assert_eq!(SnobalErrorKind::InvalidPrecip.exit_code(), 3);
    }

    #[test]
    fn display_includes_cell_and_time() {
        let err = SnobalError::new(SnobalErrorKind::NoConvergence, "did not converge")
            .at_cell(CellId(7))
            .at_time(12.5);
        let s = err.to_string();
        assert!(s.contains("cell #7"));
        assert!(s.contains("12.500"));
    }
}
