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
//! Engine run configuration.
use crate::Float;
use snobal_error::{ErrorHandling, SnobalError, SnobalErrorKind};

pub(crate) const MODULE_NAME: &str = "engine::config";

struct Module;
impl ErrorHandling for Module {
    fn module_name() -> &'static str {
        MODULE_NAME
    }
}

/// Default threshold above which a NORMAL substep is subdivided, kg/m^2.
pub const DEFAULT_NORMAL_THRESHOLD: Float = 60.0;
/// Default threshold above which a MEDIUM substep is subdivided, kg/m^2.
pub const DEFAULT_MEDIUM_THRESHOLD: Float = 10.0;
/// Default threshold above which a SMALL substep's result is flagged, kg/m^2.
pub const DEFAULT_SMALL_THRESHOLD: Float = 1.0;

/// Top-level run parameters, mirroring the constructor `params` struct
/// of §6. Validated once at construction via [`SnobalParams::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnobalParams {
    /// Forcing cadence, seconds.
    pub data_tstep_seconds: u32,
    /// Maximum liquid water the pack can hold per unit void volume.
    pub max_h2o_vol: Float,
    /// Cap on the surface layer's thickness, m.
    pub max_z_s_0: Float,
    /// Whether the run stops when the pack disappears at a data boundary.
    pub stop_no_snow: bool,
    /// Whether temperature inputs are given in Celsius rather than Kelvin.
    pub temps_in_c: bool,
    /// Whether measurement heights are given relative to the snow surface.
    pub relative_heights: bool,
}

impl SnobalParams {
    /// Enforces the range guards carried over from the original
    /// source's `check_range`: the data timestep must be between 1
    /// and 360 minutes, and any timestep over 60 minutes must be a
    /// whole-hour multiple; `max_h2o_vol` and `max_z_s_0` must be
    /// positive.
    pub fn validate(&self) -> Result<(), SnobalError> {
        let minutes = self.data_tstep_seconds as Float / 60.0;
        if !(1.0..=360.0).contains(&minutes) {
            return Module::user_error(
                SnobalErrorKind::DomainError,
                format!("data_tstep must be between 1 and 360 minutes, got {minutes}"),
            );
        }
        if minutes > 60.0 && self.data_tstep_seconds % 3600 != 0 {
            return Module::user_error(
                SnobalErrorKind::DomainError,
                "data_tstep over 60 minutes must be a whole-hour multiple",
            );
        }
        if self.max_h2o_vol <= 0.0 {
            return Module::user_error(
                SnobalErrorKind::DomainError,
                "max_h2o_vol must be positive",
            );
        }
        if self.max_z_s_0 <= 0.0 {
            return Module::user_error(SnobalErrorKind::DomainError, "max_z_s_0 must be positive");
        }
        Ok(())
    }
}

/// Forcing measurement geometry, constant for the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementHeights {
    /// Wind measurement height, m.
    pub z_u: Float,
    /// Temperature/humidity measurement height, m.
    pub z_t: Float,
    /// Surface roughness length, m.
    pub z_0: Float,
    /// Soil temperature measurement depth, m.
    pub z_g: Float,
    /// Whether heights are relative to the snow surface.
    pub relative_heights: bool,
}

/// Bitset controlling when a level emits output: whether a whole
/// (unsubdivided) substep completion should emit, and whether a
/// divided (subdivided) one should.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputFlags {
    /// Emit when this level's loop completes without subdivision.
    pub whole: bool,
    /// Emit when this level's substep was itself a product of subdivision.
    pub divided: bool,
}

/// Per-level timestep parameters: duration, how many substeps make up
/// the parent level, the mass-change subdivision threshold, and when
/// to emit output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimestepLevelConfig {
    /// Duration of one substep at this level, seconds.
    pub time_step_seconds: u32,
    /// Substeps of this level per parent-level substep.
    pub intervals: u32,
    /// Mass-change magnitude above which a substep is subdivided, kg/m^2.
    pub threshold_kgm2: Float,
    /// When to emit output at this level.
    pub output_flags: OutputFlags,
}

/// The four-level timestep table (§3): the raw data interval plus
/// normal, medium and small substep levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TstepInfo {
    /// Output behavior for the unsubdivided data interval as a whole.
    pub data_output_flags: OutputFlags,
    /// Level 1: one hour by convention.
    pub normal: TimestepLevelConfig,
    /// Level 2: a quarter of a normal step (900s, 4 intervals, fixed).
    pub medium: TimestepLevelConfig,
    /// Level 3: a fifteenth of a medium step (60s, 15 intervals, fixed).
    pub small: TimestepLevelConfig,
}

impl TstepInfo {
    /// Builds the standard four-level table for a given data timestep
    /// and output mode, using the original source's default
    /// thresholds unless overridden.
    pub fn standard(data_tstep_seconds: u32, mode: OutputMode) -> TstepInfo {
        TstepInfo::with_thresholds(
            data_tstep_seconds,
            mode,
            DEFAULT_NORMAL_THRESHOLD,
            DEFAULT_MEDIUM_THRESHOLD,
            DEFAULT_SMALL_THRESHOLD,
        )
    }

    /// As [`TstepInfo::standard`], but with explicit subdivision thresholds.
    pub fn with_thresholds(
        data_tstep_seconds: u32,
        mode: OutputMode,
        normal_threshold: Float,
        medium_threshold: Float,
        small_threshold: Float,
    ) -> TstepInfo {
        let normal_intervals = (data_tstep_seconds / 3600).max(1);
        let (data_flags, normal_flags, sub_flags) = mode.flags();
        TstepInfo {
            data_output_flags: data_flags,
            normal: TimestepLevelConfig {
                time_step_seconds: 3600,
                intervals: normal_intervals,
                threshold_kgm2: normal_threshold,
                output_flags: normal_flags,
            },
            medium: TimestepLevelConfig {
                time_step_seconds: 900,
                intervals: 4,
                threshold_kgm2: medium_threshold,
                output_flags: sub_flags,
            },
            small: TimestepLevelConfig {
                time_step_seconds: 60,
                intervals: 15,
                threshold_kgm2: small_threshold,
                output_flags: sub_flags,
            },
        }
    }
}

/// How often the driver wants output emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Once per raw data interval, regardless of any subdivision.
    Data,
    /// Once per normal (hourly) substep, whether whole or divided.
    Normal,
    /// Once per substep at every level, including medium and small.
    All,
}

impl OutputMode {
    /// The (data, normal, medium-and-small) output flag triples this
    /// mode maps to, matching the original source's `get_tstep_info`.
    fn flags(self) -> (OutputFlags, OutputFlags, OutputFlags) {
        match self {
            OutputMode::Data => (
                OutputFlags {
                    whole: false,
                    divided: true,
                },
                OutputFlags::default(),
                OutputFlags::default(),
            ),
            OutputMode::Normal => (
                OutputFlags::default(),
                OutputFlags {
                    whole: true,
                    divided: true,
                },
                OutputFlags::default(),
            ),
            OutputMode::All => (
                OutputFlags::default(),
                OutputFlags {
                    whole: true,
                    divided: false,
                },
                OutputFlags {
                    whole: true,
                    divided: false,
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_params() -> SnobalParams {
        SnobalParams {
            data_tstep_seconds: 3600,
            max_h2o_vol: 0.05,
            max_z_s_0: 0.25,
            stop_no_snow: true,
            temps_in_c: false,
            relative_heights: false,
        }
    }

    #[test]
    fn valid_params_pass_validation() {
        valid_params().validate().unwrap();
    }

    #[test]
    fn too_short_data_tstep_is_rejected() {
        let mut p = valid_params();
        p.data_tstep_seconds = 30;
        assert!(p.validate().is_err());
    }

    #[test]
    fn long_non_hour_multiple_is_rejected() {
        let mut p = valid_params();
        p.data_tstep_seconds = 5400; // 90 minutes, not a whole-hour multiple
        assert!(p.validate().is_err());
    }

    #[test]
    fn long_hour_multiple_is_accepted() {
        let mut p = valid_params();
        p.data_tstep_seconds = 3600 * 6;
        p.validate().unwrap();
    }

    #[test]
    fn non_positive_max_h2o_vol_is_rejected() {
        let mut p = valid_params();
        p.max_h2o_vol = 0.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn standard_table_has_fixed_medium_and_small_geometry() {
        let t = TstepInfo::standard(3600, OutputMode::Normal);
        assert_eq!(t.medium.time_step_seconds, 900);
        assert_eq!(t.medium.intervals, 4);
        assert_eq!(t.small.time_step_seconds, 60);
        assert_eq!(t.small.intervals, 15);
        assert!(t.normal.threshold_kgm2 > t.medium.threshold_kgm2);
        assert!(t.medium.threshold_kgm2 > t.small.threshold_kgm2);
    }

    #[test]
    fn output_mode_data_only_flags_the_data_level() {
        let t = TstepInfo::standard(3600, OutputMode::Data);
        assert!(t.data_output_flags.divided);
        assert!(!t.normal.output_flags.whole && !t.normal.output_flags.divided);
    }

    #[test]
    fn output_mode_all_flags_every_substep_level() {
        let t = TstepInfo::standard(3600, OutputMode::All);
        assert!(t.normal.output_flags.whole);
        assert!(t.medium.output_flags.whole);
        assert!(t.small.output_flags.whole);
    }
}
