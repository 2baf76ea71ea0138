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
//! Grid dispatch: advances every cell in a tile through one data
//! interval. Cells never read each other's state, so the tile can be
//! mapped with `rayon` when the `parallel` feature is enabled.

use crate::advance::{advance_data_interval, AdvanceOutcome, AdvanceParams};
use crate::config::TstepInfo;
use rayon::prelude::*;
use snobal_error::{CellId, SnobalError};
use snowcover::input::InputRecord;
use snowcover::state::SnowcoverState;

/// Advances every (unmasked) cell in `states` through one data
/// interval, in parallel. `inputs1`/`inputs2` and `states` must have
/// the same length; `emit` is called once per cell that actually ran
/// with that cell's `CellId` and resulting state.
///
/// Masked cells (`state.mask == false`) are left untouched and never
/// passed to `emit`.
pub fn advance_tile(
    states: &mut [SnowcoverState],
    inputs1: &[InputRecord],
    inputs2: &[InputRecord],
    tstep_info: &TstepInfo,
    params: AdvanceParams,
    first_step: bool,
    emit: &(dyn Fn(CellId, &SnowcoverState) + Sync),
) -> Vec<Result<AdvanceOutcome, SnobalError>> {
    states
        .par_iter_mut()
        .zip(inputs1.par_iter())
        .zip(inputs2.par_iter())
        .enumerate()
        .map(|(index, ((state, input1), input2))| {
            let cell = CellId(index);
            if !state.mask {
                return Ok(AdvanceOutcome::Accepted);
            }
            advance_data_interval(
                state,
                input1,
                input2,
                tstep_info,
                params,
                cell,
                first_step,
                &mut |s| emit(cell, s),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputMode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use thermo::constants::FREEZE;

    fn cell_state() -> SnowcoverState {
        SnowcoverState::initial(
            2000.0, 0.001, 0.0, 0.0, FREEZE, FREEZE, 0.0, true, 2.0, 2.0, 0.5, false, 0.25, 0.05,
        )
        .unwrap()
    }

    fn snowy_input() -> InputRecord {
        InputRecord::new(0.0, 200.0, 263.16, 250.0, 1.0, 270.0, 1.0, 1.0, 100.0, 263.16).unwrap()
    }

    #[test]
    fn masked_cells_are_skipped() {
        let mut states = vec![cell_state(), cell_state()];
        states[1].mask = false;
        let inputs = vec![snowy_input(), snowy_input()];
        let tstep_info = TstepInfo::standard(3600, OutputMode::Data);
        let params = AdvanceParams {
            max_z_s_0: 0.25,
            max_h2o_vol: 0.05,
        };
        let emitted = AtomicUsize::new(0);
        let results = advance_tile(
            &mut states,
            &inputs,
            &inputs,
            &tstep_info,
            params,
            true,
            &|_, _| {
                emitted.fetch_add(1, Ordering::SeqCst);
            },
        );
        assert!(results.iter().all(Result::is_ok));
        assert!(states[0].m_s > 0.0);
        assert_eq!(states[1].m_s, 0.0);
        assert!(emitted.load(Ordering::SeqCst) > 0);
    }
}
