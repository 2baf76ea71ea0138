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
//! Time-stepping logic that advances the model state.
use crate::config::{TimestepLevelConfig, TstepInfo};
use crate::Float;
use snobal_error::{CellId, ErrorHandling, SnobalError, SnobalErrorKind};
use snowcover::deltas::{InputDeltas, SubstepForcing, TimestepLevel};
use snowcover::input::InputRecord;
use snowcover::state::SnowcoverState;
use snowcover::{energy, layers, mass};

pub(crate) const MODULE_NAME: &str = "engine::advance";

struct Module;
impl ErrorHandling for Module {
    fn module_name() -> &'static str {
        MODULE_NAME
    }
}

/// The result of advancing one cell through one data interval.
#[derive(Debug)]
pub enum AdvanceOutcome {
    /// Every substep stayed within its level's mass-change threshold.
    Accepted,
    /// A SMALL substep still exceeded the SMALL threshold; the result
    /// is accepted (level 3 never subdivides further) but flagged.
    AcceptedWithWarning(SnobalError),
}

/// Geometry and site constants the advance loop needs but which don't
/// belong on [`SnowcoverState`] itself (they're run-wide, not per-cell
/// mutable state).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvanceParams {
    /// Cap on the surface layer's thickness, m.
    pub max_z_s_0: Float,
    /// Maximum liquid water the pack can hold per unit void volume.
    pub max_h2o_vol: Float,
}

/// Advances `state` through one data interval (`input1` to `input2`),
/// recursively subdividing into finer substeps wherever the surface
/// layer's mass change exceeds the active level's threshold (§4.7).
///
/// `first_step` suppresses the `precip_now` branch for the very first
/// substep only, so the run's accumulators start from a clean zero
/// rather than from whatever the first forcing row's precipitation
/// state implies (§9).
///
/// `emit` is called with the current state whenever a level's output
/// flags request it; the state's output accumulators are reset
/// immediately after each call.
#[allow(clippy::too_many_arguments)]
pub fn advance_data_interval(
    state: &mut SnowcoverState,
    input1: &InputRecord,
    input2: &InputRecord,
    tstep_info: &TstepInfo,
    params: AdvanceParams,
    cell: CellId,
    first_step: bool,
    emit: &mut dyn FnMut(&SnowcoverState),
) -> Result<AdvanceOutcome, SnobalError> {
    let intervals = snowcover::deltas::LevelIntervals::standard(tstep_info.normal.intervals);
    let deltas = InputDeltas::compute(input1, input2, intervals);

    let mut suppress_precip_once = first_step;
    let outcome = run_level(
        state,
        input1,
        &deltas,
        TimestepLevel::Normal,
        0,
        tstep_info,
        params,
        cell,
        &mut suppress_precip_once,
        emit,
    )?;

    if tstep_info.data_output_flags.divided {
        emit(state);
        state.reset_output_accumulators();
    }

    Ok(outcome)
}

fn level_config<'a>(level: TimestepLevel, tstep_info: &'a TstepInfo) -> &'a TimestepLevelConfig {
    match level {
        TimestepLevel::Normal => &tstep_info.normal,
        TimestepLevel::Medium => &tstep_info.medium,
        TimestepLevel::Small => &tstep_info.small,
        TimestepLevel::Data => unreachable!("the advance loop never runs at the Data level"),
    }
}

/// Runs one level's substep loop. `base_step` is the number of this
/// level's substeps that elapsed, across the whole data interval,
/// before this call began — it anchors [`SubstepForcing::at_step`]'s
/// absolute indexing when a parent substep has been subdivided, so
/// that a child level's substeps land at exactly the same points in
/// time the unsubdivided parent would have (§4.3).
#[allow(clippy::too_many_arguments)]
fn run_level(
    state: &mut SnowcoverState,
    input1: &InputRecord,
    deltas: &InputDeltas,
    level: TimestepLevel,
    base_step: u32,
    tstep_info: &TstepInfo,
    params: AdvanceParams,
    cell: CellId,
    suppress_precip_once: &mut bool,
    emit: &mut dyn FnMut(&SnowcoverState),
) -> Result<AdvanceOutcome, SnobalError> {
    let config = level_config(level, tstep_info);
    let mut outcome = AdvanceOutcome::Accepted;

    for step in 1..=config.intervals {
        let snapshot = state.clone();
        let absolute_step = base_step + step;
        let mut forcing = SubstepForcing::at_step(input1, deltas.at(level), absolute_step)?;
        if *suppress_precip_once {
            forcing.precip_now = false;
            *suppress_precip_once = false;
        }

        let fluxes = energy::compute(state, &forcing)?;
        mass::apply(state, &fluxes, &forcing, config.time_step_seconds as Float, params.max_h2o_vol)?;
        layers::rebuild(state, params.max_z_s_0, params.max_h2o_vol)?;

        let mass_change = (state.m_s_0 - snapshot.m_s_0).abs();

        if mass_change > config.threshold_kgm2 {
            match level.finer() {
                Some(finer) => {
                    *state = snapshot;
                    let finer_nesting = level_config(finer, tstep_info).intervals;
                    let child_base_step = (absolute_step - 1) * finer_nesting;
                    let child = run_level(
                        state,
                        input1,
                        deltas,
                        finer,
                        child_base_step,
                        tstep_info,
                        params,
                        cell,
                        suppress_precip_once,
                        emit,
                    )?;
                    if let AdvanceOutcome::AcceptedWithWarning(_) = child {
                        outcome = child;
                    }
                    continue;
                }
                None => {
                    // SMALL never subdivides further: accept but flag.
                    outcome = AdvanceOutcome::AcceptedWithWarning(
                        Module::user_error::<()>(
                            SnobalErrorKind::NoConvergence,
                            format!(
                                "SMALL substep mass change {mass_change:.4} kg/m^2 exceeds threshold {:.4}",
                                config.threshold_kgm2
                            ),
                        )
                        .unwrap_err()
                        .at_cell(cell)
                        .at_time(state.current_time as f64),
                    );
                }
            }
        }

        if config.output_flags.divided {
            emit(state);
            state.reset_output_accumulators();
        }
    }

    if config.output_flags.whole {
        emit(state);
        state.reset_output_accumulators();
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputMode;
    use thermo::constants::FREEZE;

    fn cold_calm_input(net_solar: Float, precip_mass: Float) -> InputRecord {
        InputRecord::new(
            net_solar, 200.0, 263.16, 250.0, 1.0, 270.0, precip_mass, 1.0, 100.0, 263.16,
        )
        .unwrap()
    }

    fn initial_state() -> SnowcoverState {
        SnowcoverState::initial(
            2000.0, 0.001, 0.0, 0.0, FREEZE, FREEZE, 0.0, true, 2.0, 2.0, 0.5, false, 0.25, 0.05,
        )
        .unwrap()
    }

    #[test]
    fn fresh_snow_accumulates_without_subdivision() {
        let mut state = initial_state();
        let tstep_info = TstepInfo::standard(3600, OutputMode::Normal);
        let params = AdvanceParams {
            max_z_s_0: 0.25,
            max_h2o_vol: 0.05,
        };
        let mut emitted = 0;
        let input1 = cold_calm_input(0.0, 1.0);
        let input2 = cold_calm_input(0.0, 1.0);
        let outcome = advance_data_interval(
            &mut state,
            &input1,
            &input2,
            &tstep_info,
            params,
            CellId(0),
            true,
            &mut |_| emitted += 1,
        )
        .unwrap();
        assert!(matches!(outcome, AdvanceOutcome::Accepted));
        assert!(state.m_s > 0.0);
        assert!(emitted > 0);
    }

    #[test]
    fn first_step_suppresses_precipitation_once() {
        let mut state = initial_state();
        let tstep_info = TstepInfo::standard(3600, OutputMode::Data);
        let params = AdvanceParams {
            max_z_s_0: 0.25,
            max_h2o_vol: 0.05,
        };
        let input1 = cold_calm_input(0.0, 5.0);
        let input2 = cold_calm_input(0.0, 0.0);
        advance_data_interval(
            &mut state,
            &input1,
            &input2,
            &tstep_info,
            params,
            CellId(0),
            true,
            &mut |_| {},
        )
        .unwrap();
        // With precip_now suppressed for the first substep and no
        // snow on subsequent substeps (input2 carries none), the
        // interval should add nothing.
        assert_eq!(state.m_s, 0.0);
    }

    #[test]
    fn large_forcing_over_shallow_pack_subdivides() {
        let mut state = SnowcoverState::initial(
            2000.0, 0.001, 0.03, 200.0, FREEZE - 1.0, FREEZE - 1.0, 0.0, true, 2.0, 2.0, 0.5,
            false, 0.25, 0.05,
        )
        .unwrap();
        let tstep_info = TstepInfo::standard(3600, OutputMode::Data);
        let params = AdvanceParams {
            max_z_s_0: 0.25,
            max_h2o_vol: 0.05,
        };
        let input1 = InputRecord::new(900.0, 300.0, 280.0, 1000.0, 3.0, 280.0, 0.0, 0.0, 0.0, 270.0)
            .unwrap();
        let input2 = input1;
        let outcome = advance_data_interval(
            &mut state,
            &input1,
            &input2,
            &tstep_info,
            params,
            CellId(0),
            false,
            &mut |_| {},
        )
        .unwrap();
        assert!(matches!(
            outcome,
            AdvanceOutcome::Accepted | AdvanceOutcome::AcceptedWithWarning(_)
        ));
    }
}
