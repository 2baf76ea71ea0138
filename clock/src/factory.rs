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
use crate::clock::Clock;
use crate::Float;

/// Produces successive [`Clock`] values spaced `dt` seconds apart,
/// starting at `start` and stopping once `end` is reached.
///
/// Used by the driver to step the data-interval boundaries; it does
/// not know about substeps, which are an internal detail of the
/// adaptive engine.
#[derive(Clone, Copy, Debug)]
pub struct ClockFactory {
    end: Clock,
    current: Clock,
    dt: Float,
    done: bool,
}

impl ClockFactory {
    /// Creates a new factory starting on `start` and ending on `end`,
    /// separated by `dt` seconds each time.
    pub fn new(start: Clock, end: Clock, dt: Float) -> Self {
        Self {
            end,
            current: start,
            dt,
            done: start > end,
        }
    }
}

impl Iterator for ClockFactory {
    type Item = Clock;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let ret = self.current;
        let next = self.current.add_seconds(self.dt);
        if next > self.end {
            self.done = true;
        } else {
            self.current = next;
        }
        Some(ret)
    }
}
