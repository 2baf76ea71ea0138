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
//! Writing point-scale model output.
use crate::traits::OutputSink;
use snobal_error::{ErrorHandling, SnobalError, SnobalErrorKind};
use snowcover::state::SnowcoverState;
use std::io::Write;
use thermo::constants::FREEZE;

pub(crate) const MODULE_NAME: &str = "snobal-io::point_writer";

struct Module;
impl ErrorHandling for Module {
    fn module_name() -> &'static str {
        MODULE_NAME
    }
}

const HEADER: &str = "time_hrs,R_n_bar,H_bar,L_v_E_bar,G_bar,M_bar,delta_Q_bar,G_0_bar,delta_Q_0_bar,\
cc_s_0,cc_s_l,cc_s,E_s_sum,melt_sum,ro_pred_sum,z_s_0,z_s_l,z_s,rho,m_s_0,m_s_l,m_s,h2o,\
T_s_0,T_s_l,T_s";

/// Writes the fixed 26-column point CSV row described in §6, one row
/// per emitted substep, with a header line written before the first
/// row.
pub struct PointCsvWriter<W: Write> {
    out: W,
    header_written: bool,
}

impl<W: Write> PointCsvWriter<W> {
    /// Wraps `out`. The header is written lazily, on the first call
    /// to [`OutputSink::write`].
    pub fn new(out: W) -> PointCsvWriter<W> {
        PointCsvWriter {
            out,
            header_written: false,
        }
    }
}

impl<W: Write> OutputSink for PointCsvWriter<W> {
    fn write(&mut self, state: &SnowcoverState, temps_in_c: bool) -> Result<(), SnobalError> {
        if !self.header_written {
            writeln!(self.out, "{HEADER}").map_err(|e| {
                Module::user_error::<()>(SnobalErrorKind::IoError, format!("{e}")).unwrap_err()
            })?;
            self.header_written = true;
        }

        let shift = if temps_in_c { FREEZE } else { 0.0 };
        writeln!(
            self.out,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            state.current_time,
            state.r_n_bar,
            state.h_bar,
            state.l_v_e_bar,
            state.g_bar,
            state.m_bar,
            state.delta_q_bar,
            state.g_0_bar,
            state.delta_q_0_bar,
            state.cc_s_0,
            state.cc_s_l,
            state.cc_s,
            state.e_s_sum,
            state.melt_sum,
            state.ro_pred_sum,
            state.z_s_0,
            state.z_s_l,
            state.z_s,
            state.rho,
            state.m_s_0,
            state.m_s_l,
            state.m_s,
            state.h2o,
            state.t_s_0 - shift,
            state.t_s_l - shift,
            state.t_s - shift,
        )
        .map_err(|e| Module::user_error::<()>(SnobalErrorKind::IoError, format!("{e}")).unwrap_err())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowcover::state::SnowcoverState;

    fn state() -> SnowcoverState {
        SnowcoverState::initial(
            2000.0, 0.01, 0.5, 300.0, FREEZE - 1.0, FREEZE - 1.0, 0.0, true, 2.0, 2.0, 0.5, false,
            0.25, 0.05,
        )
        .unwrap()
    }

    #[test]
    fn first_write_emits_a_header_line() {
        let mut buf = Vec::new();
        let mut writer = PointCsvWriter::new(&mut buf);
        writer.write(&state(), false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.lines().next().unwrap().starts_with("time_hrs,"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn second_write_does_not_repeat_the_header() {
        let mut buf = Vec::new();
        let mut writer = PointCsvWriter::new(&mut buf);
        writer.write(&state(), false).unwrap();
        writer.write(&state(), false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("time_hrs")).count(), 1);
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn temps_in_c_converts_from_kelvin() {
        let mut buf = Vec::new();
        let mut writer = PointCsvWriter::new(&mut buf);
        writer.write(&state(), true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let row = text.lines().nth(1).unwrap();
        let fields: Vec<&str> = row.split(',').collect();
        let t_s_0: f64 = fields[23].parse().unwrap();
        assert!((t_s_0 - (-1.0)).abs() < 1e-3);
    }
}
