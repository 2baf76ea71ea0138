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

use crate::Float;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Sub;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An extremely simple run clock. It does not know about months, days
/// or years, because the core never needs a calendar date: outputs are
/// timestamped in hours since the start of the run (see §6 of the
/// spec this crate implements). It only ever moves forward.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Clock {
    /// Hours elapsed since the start of the run.
    pub hours: Float,
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = self.hours.floor();
        let remainder = self.hours - hour;
        let minute = (remainder * 60.0).round();
        write!(f, "t+{:.0}:{:02}", hour, minute)
    }
}

impl Sub for Clock {
    type Output = Float;

    fn sub(self, other: Self) -> Float {
        self.hours - other.hours
    }
}

impl Eq for Clock {}

impl PartialOrd for Clock {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Clock {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hours
            .partial_cmp(&other.hours)
            .unwrap_or(Ordering::Equal)
    }
}

impl Clock {
    /// The clock at the start of a run, i.e. `hours = 0`.
    pub const START: Clock = Clock { hours: 0.0 };

    /// Builds a clock at a given number of elapsed hours.
    pub fn from_hours(hours: Float) -> Self {
        Self { hours }
    }

    /// Advances the clock by `dt` seconds, returning the new value.
    pub fn add_seconds(&self, dt: Float) -> Self {
        Self {
            hours: self.hours + dt / 3600.0,
        }
    }

    /// Advances the clock by `n_hours` hours, returning the new value.
    pub fn add_hours(&self, n_hours: Float) -> Self {
        Self {
            hours: self.hours + n_hours,
        }
    }

    /// Linearly interpolates between `self` and `other`, at fraction
    /// `x` of the way from `self` to `other` (`x=0` returns `self`,
    /// `x=1` returns `other`).
    pub fn interpolate(&self, other: Self, x: Float) -> Self {
        Self {
            hours: self.hours + x * (other.hours - self.hours),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_seconds_matches_add_hours() {
        let a = Clock::START.add_seconds(3600.0);
        let b = Clock::START.add_hours(1.0);
        assert!((a.hours - b.hours).abs() < 1e-9);
    }

    #[test]
    fn sub_gives_elapsed_hours() {
        let a = Clock::from_hours(5.0);
        let b = Clock::from_hours(2.0);
        assert!((a - b - 3.0).abs() < 1e-9);
    }

    #[test]
    fn ordering_follows_hours() {
        let a = Clock::from_hours(1.0);
        let b = Clock::from_hours(2.0);
        assert!(a < b);
        assert!(b > a);
        assert_eq!(a, a);
    }

    #[test]
    fn interpolate_endpoints() {
        let a = Clock::from_hours(0.0);
        let b = Clock::from_hours(10.0);
        assert!((a.interpolate(b, 0.0).hours - 0.0).abs() < 1e-9);
        assert!((a.interpolate(b, 1.0).hours - 10.0).abs() < 1e-9);
        assert!((a.interpolate(b, 0.5).hours - 5.0).abs() < 1e-9);
    }

    #[test]
    fn sorts_in_chronological_order() {
        let mut clocks = vec![
            Clock::from_hours(3.0),
            Clock::from_hours(1.0),
            Clock::from_hours(2.0),
        ];
        clocks.sort();
        assert_eq!(
            clocks,
            vec![
                Clock::from_hours(1.0),
                Clock::from_hours(2.0),
                Clock::from_hours(3.0)
            ]
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() -> Result<(), String> {
        let v = r#"{"hours": 21.5}"#;
        let c: Clock = serde_json::from_str(v).map_err(|e| format!("{e}"))?;
        assert!((c.hours - 21.5).abs() < 1e-5);
        Ok(())
    }
}
