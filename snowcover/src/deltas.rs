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
//! Per-timestep state change calculations.
use crate::input::InputRecord;
use crate::Float;
use snobal_error::SnobalError;
use thermo::vapor::sati;

/// The four refinement levels the adaptive integrator runs at. `Data`
/// spans the whole forcing interval and has no intervals-per-parent or
/// threshold of its own; `Normal`, `Medium` and `Small` each subdivide
/// their parent level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestepLevel {
    /// The raw forcing interval, not itself subdivided.
    Data,
    /// Level 1: one hour by convention.
    Normal,
    /// Level 2: a quarter of a normal step.
    Medium,
    /// Level 3: a fifteenth of a medium step. Never subdivides further.
    Small,
}

impl TimestepLevel {
    /// The next finer level, or `None` if already at [`TimestepLevel::Small`].
    pub fn finer(self) -> Option<TimestepLevel> {
        match self {
            TimestepLevel::Data => Some(TimestepLevel::Normal),
            TimestepLevel::Normal => Some(TimestepLevel::Medium),
            TimestepLevel::Medium => Some(TimestepLevel::Small),
            TimestepLevel::Small => None,
        }
    }
}

/// Per-substep linear increment for every continuous forcing variable,
/// plus the per-substep share of the data interval's precipitation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LevelDelta {
    /// Increment to `net_solar` per substep.
    pub net_solar: Float,
    /// Increment to `incoming_thermal` per substep.
    pub incoming_thermal: Float,
    /// Increment to `air_temp` per substep.
    pub air_temp: Float,
    /// Increment to `vapor_pressure` per substep.
    pub vapor_pressure: Float,
    /// Increment to `wind_speed` per substep.
    pub wind_speed: Float,
    /// Increment to `soil_temp` per substep.
    pub soil_temp: Float,
    /// Share of `precip_mass` delivered per substep.
    pub precip_mass: Float,
    /// Share of `m_snow` delivered per substep.
    pub m_snow: Float,
    /// Share of `m_rain` delivered per substep.
    pub m_rain: Float,
    /// Share of `z_snow` delivered per substep.
    pub z_snow: Float,
}

impl LevelDelta {
    /// Computes the per-substep delta from `input1` to `input2` over
    /// `intervals` substeps: continuous variables interpolate linearly
    /// between the two records, precipitation quanta are an equal
    /// share of `input1`'s total (§4.3 — the data record already
    /// carries the whole interval's precipitation total).
    pub fn compute(input1: &InputRecord, input2: &InputRecord, intervals: u32) -> LevelDelta {
        let n = intervals.max(1) as Float;
        LevelDelta {
            net_solar: (input2.net_solar - input1.net_solar) / n,
            incoming_thermal: (input2.incoming_thermal - input1.incoming_thermal) / n,
            air_temp: (input2.air_temp - input1.air_temp) / n,
            vapor_pressure: (input2.vapor_pressure - input1.vapor_pressure) / n,
            wind_speed: (input2.wind_speed - input1.wind_speed) / n,
            soil_temp: (input2.soil_temp - input1.soil_temp) / n,
            precip_mass: input1.precip_mass / n,
            m_snow: input1.m_snow() / n,
            m_rain: input1.m_rain() / n,
            z_snow: input1.z_snow() / n,
        }
    }
}

/// Total substeps of each refinement level across the *whole* data
/// interval (§4.3's `N_L`) — not to be confused with how many
/// substeps of one level fit inside a single parent substep (fixed at
/// 4 and 15, tracked separately by the adaptive controller). These
/// totals exist only to size each level's linear delta correctly:
/// `medium` runs 4 substeps per normal substep, so across `normal`
/// normal substeps it takes `normal * 4` medium substeps to span the
/// same interval, and likewise `normal * 4 * 15` for small.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelIntervals {
    /// Normal substeps across the whole data interval.
    pub normal: u32,
    /// Medium substeps across the whole data interval.
    pub medium: u32,
    /// Small substeps across the whole data interval.
    pub small: u32,
}

impl LevelIntervals {
    /// Derives medium/small totals from the fixed 4x and 15x nesting
    /// factors of §3, given the number of normal substeps per data
    /// interval.
    pub fn standard(normal: u32) -> LevelIntervals {
        LevelIntervals {
            normal,
            medium: normal * 4,
            small: normal * 4 * 15,
        }
    }
}

/// Linear increments for the three substep refinement levels (normal,
/// medium, small), precomputed once per data interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputDeltas {
    /// Per-substep delta at [`TimestepLevel::Normal`].
    pub normal: LevelDelta,
    /// Per-substep delta at [`TimestepLevel::Medium`].
    pub medium: LevelDelta,
    /// Per-substep delta at [`TimestepLevel::Small`].
    pub small: LevelDelta,
}

impl InputDeltas {
    /// Builds the three-level delta table for one data interval.
    pub fn compute(input1: &InputRecord, input2: &InputRecord, intervals: LevelIntervals) -> InputDeltas {
        InputDeltas {
            normal: LevelDelta::compute(input1, input2, intervals.normal),
            medium: LevelDelta::compute(input1, input2, intervals.medium),
            small: LevelDelta::compute(input1, input2, intervals.small),
        }
    }

    /// The delta table entry for `level`. Panics for [`TimestepLevel::Data`],
    /// which has no subdivision of its own — callers handle that level by
    /// applying the whole-interval difference directly.
    pub fn at(&self, level: TimestepLevel) -> &LevelDelta {
        match level {
            TimestepLevel::Normal => &self.normal,
            TimestepLevel::Medium => &self.medium,
            TimestepLevel::Small => &self.small,
            TimestepLevel::Data => panic!("TimestepLevel::Data has no delta table entry"),
        }
    }

    /// The whole-interval delta, as if it were a single substep
    /// (`intervals = 1`). Used when a data interval completes without
    /// any subdivision.
    pub fn whole_interval(input1: &InputRecord, input2: &InputRecord) -> LevelDelta {
        LevelDelta::compute(input1, input2, 1)
    }
}

/// The instantaneous forcing state for a single substep, built by
/// walking `step_index` steps of a [`LevelDelta`] away from `input1`.
/// Continuous fields accumulate linearly; precipitation quanta are the
/// flat per-substep share carried in the delta; classification fields
/// (`t_snow`, `t_rain`, `h2o_sat_snow`, `precip_now`) are copied
/// unchanged from `input1` per §4.3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubstepForcing {
    /// Net shortwave radiation at this substep, W/m^2.
    pub net_solar: Float,
    /// Incoming longwave radiation at this substep, W/m^2.
    pub incoming_thermal: Float,
    /// Air temperature at this substep, K.
    pub air_temp: Float,
    /// Atmospheric vapor pressure at this substep, Pa.
    pub vapor_pressure: Float,
    /// Wind speed at this substep, m/s.
    pub wind_speed: Float,
    /// Soil temperature at this substep, K.
    pub soil_temp: Float,
    /// Saturation vapor pressure at `air_temp`, Pa.
    pub sat_vp_air: Float,
    /// Saturation vapor pressure at `soil_temp`, Pa.
    pub sat_vp_soil: Float,
    /// Snow mass delivered this substep, kg/m^2.
    pub m_snow: Float,
    /// Rain mass delivered this substep, kg/m^2.
    pub m_rain: Float,
    /// Depth the snow fraction delivered this substep would occupy, m.
    pub z_snow: Float,
    /// Temperature of the snow fraction, K.
    pub t_snow: Float,
    /// Temperature of the rain fraction, K.
    pub t_rain: Float,
    /// Saturation fraction assumed for fresh snow.
    pub h2o_sat_snow: Float,
    /// Whether precipitation is falling this substep.
    pub precip_now: bool,
}

impl SubstepForcing {
    /// Builds the forcing state `step_index` substeps after `input1`.
    pub fn at_step(
        input1: &InputRecord,
        delta: &LevelDelta,
        step_index: u32,
    ) -> Result<SubstepForcing, SnobalError> {
        let k = step_index as Float;
        let air_temp = input1.air_temp + delta.air_temp * k;
        let soil_temp = input1.soil_temp + delta.soil_temp * k;
        Ok(SubstepForcing {
            net_solar: input1.net_solar + delta.net_solar * k,
            incoming_thermal: input1.incoming_thermal + delta.incoming_thermal * k,
            air_temp,
            vapor_pressure: input1.vapor_pressure + delta.vapor_pressure * k,
            wind_speed: input1.wind_speed + delta.wind_speed * k,
            soil_temp,
            sat_vp_air: sati(air_temp)?,
            sat_vp_soil: sati(soil_temp)?,
            m_snow: delta.m_snow,
            m_rain: delta.m_rain,
            z_snow: delta.z_snow,
            t_snow: input1.t_snow(),
            t_rain: input1.t_rain(),
            h2o_sat_snow: input1.h2o_sat_snow(),
            precip_now: input1.precip_now(),
        })
    }
}
