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
//! Top-level run driver wiring I/O and the engine together.
use crate::cli::SimOptions;
use clock::{Clock, ClockFactory};
use engine::config::{DEFAULT_MEDIUM_THRESHOLD, DEFAULT_NORMAL_THRESHOLD, DEFAULT_SMALL_THRESHOLD};
use engine::{
    advance_data_interval, AdvanceOutcome, AdvanceParams, MeasurementHeights, SnobalParams, TstepInfo,
};
use snobal_error::{CellId, SnobalError};
use snobal_io::{ForcingSource, OutputSink, PointCsvWriter, PointForcingReader, ProgressBar};
use snowcover::state::{LayerCount, SnowcoverState};
use std::io::Write;
use thermo::constants::FREEZE;

/// Runs one point-mode simulation end to end: parses `options`, reads
/// the two forcing files, drives the engine one data interval at a
/// time, and writes the point CSV schema to `out`.
pub fn run(options: &SimOptions, out: impl Write) -> Result<(), SnobalError> {
    let params = SnobalParams {
        data_tstep_seconds: options.data_tstep_seconds,
        max_h2o_vol: options.max_h2o_vol,
        max_z_s_0: options.max_z_s_0,
        stop_no_snow: options.stop_no_snow,
        temps_in_c: options.celsius,
        relative_heights: options.relative_heights,
    };
    params.validate()?;

    let tstep_info = TstepInfo::with_thresholds(
        params.data_tstep_seconds,
        options.mode.into(),
        options.normal_threshold.unwrap_or(DEFAULT_NORMAL_THRESHOLD),
        options.medium_threshold.unwrap_or(DEFAULT_MEDIUM_THRESHOLD),
        options.small_threshold.unwrap_or(DEFAULT_SMALL_THRESHOLD),
    );

    let heights = MeasurementHeights {
        z_u: options.z_u,
        z_t: options.z_t,
        z_0: options.z_0,
        z_g: options.z_g,
        relative_heights: params.relative_heights,
    };

    let temp_shift = if params.temps_in_c { FREEZE } else { 0.0 };
    let mut state = SnowcoverState::initial(
        options.elevation,
        heights.z_0,
        options.init_z_s,
        options.init_rho,
        options.init_t_s_0 + temp_shift,
        options.init_t_s + temp_shift,
        options.init_h2o_sat,
        true,
        heights.z_u,
        heights.z_t,
        heights.z_g,
        heights.relative_heights,
        params.max_z_s_0,
        params.max_h2o_vol,
    )?;

    let mut reader = PointForcingReader::from_files(
        &options.input_file,
        &options.precip_file,
        params.temps_in_c,
    )?;
    let total_intervals = reader.remaining();

    let dt_hours = params.data_tstep_seconds as crate::Float / 3600.0;
    let run_end = ClockFactory::new(
        Clock::START,
        Clock::from_hours(dt_hours * total_intervals as crate::Float),
        params.data_tstep_seconds as crate::Float,
    )
    .last()
    .unwrap_or(Clock::START);

    let progress = if options.quiet {
        None
    } else {
        eprintln!("snobal: {total_intervals} data intervals, ending at {run_end}");
        Some(ProgressBar::new("snobal".to_string(), total_intervals))
    };

    let mut sink = PointCsvWriter::new(out);
    let advance_params = AdvanceParams {
        max_z_s_0: params.max_z_s_0,
        max_h2o_vol: params.max_h2o_vol,
    };

    let mut first_step = true;
    while let Some((input1, input2)) = reader.next_pair()? {
        let mut sink_err: Option<SnobalError> = None;
        let mut emit = |s: &SnowcoverState| {
            if sink_err.is_some() {
                return;
            }
            if let Err(e) = sink.write(s, params.temps_in_c) {
                sink_err = Some(e);
            }
        };

        let outcome = advance_data_interval(
            &mut state,
            &input1,
            &input2,
            &tstep_info,
            advance_params,
            CellId(0),
            first_step,
            &mut emit,
        )?;
        if let Some(e) = sink_err {
            return Err(e);
        }
        if let AdvanceOutcome::AcceptedWithWarning(e) = outcome {
            eprintln!("warning: {e} (at {})", Clock::from_hours(state.current_time));
        }

        first_step = false;
        if let Some(p) = &progress {
            p.tic(Clock::from_hours(state.current_time));
        }
        if params.stop_no_snow && state.layer_count == LayerCount::Zero {
            break;
        }
    }

    if let Some(p) = progress {
        p.done(Clock::from_hours(state.current_time));
    }
    Ok(())
}
