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
//! Reading point-scale station/forcing data.
use crate::traits::ForcingSource;
use crate::Float;
use snobal_error::{ErrorHandling, SnobalError, SnobalErrorKind};
use snowcover::input::InputRecord;
use std::path::Path;
use thermo::constants::FREEZE;

pub(crate) const MODULE_NAME: &str = "snobal-io::point_reader";

struct Module;
impl ErrorHandling for Module {
    fn module_name() -> &'static str {
        MODULE_NAME
    }
}

/// Reads a single cell's forcing series from two whitespace/comma
/// delimited text blocks: a continuous-variable block (columns
/// `S_n, I_lw, T_a, e_a, u, T_g`, one row per data interval) and a
/// precipitation block (columns `time_pp, m_pp, percent_snow,
/// rho_snow, T_pp`), merged row-for-row — the original source's
/// convention of keeping atmospheric and precipitation forcing in
/// separate files.
///
/// Every row is parsed into an [`InputRecord`] up front, so a
/// malformed row fails at construction rather than mid-run.
#[derive(Debug)]
pub struct PointForcingReader {
    records: Vec<InputRecord>,
    cursor: usize,
}

fn parse_floats(line: &str, expect: usize, line_no: usize) -> Result<Vec<Float>, SnobalError> {
    let normalized = line.replace(',', " ");
    let values: Result<Vec<Float>, _> = normalized
        .split_whitespace()
        .map(|tok| tok.parse::<Float>())
        .collect();
    let values = values.map_err(|e| {
        Module::user_error::<()>(
            SnobalErrorKind::IoError,
            format!("line {line_no}: could not parse a number ({e})"),
        )
        .unwrap_err()
    })?;
    if values.len() != expect {
        return Module::user_error(
            SnobalErrorKind::IoError,
            format!(
                "line {line_no}: expected {expect} columns, found {}",
                values.len()
            ),
        );
    }
    Ok(values)
}

impl PointForcingReader {
    /// Parses `continuous` and `precip` text blocks into a forcing
    /// series. `temps_in_c` shifts every temperature field by
    /// [`FREEZE`] at parse time, matching the constructor-time
    /// conversion described for initial state in §6.
    pub fn parse(continuous: &str, precip: &str, temps_in_c: bool) -> Result<PointForcingReader, SnobalError> {
        let continuous_lines: Vec<&str> = continuous
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let precip_lines: Vec<&str> = precip
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if continuous_lines.len() != precip_lines.len() {
            return Module::user_error(
                SnobalErrorKind::IoError,
                format!(
                    "continuous block has {} rows but precip block has {}",
                    continuous_lines.len(),
                    precip_lines.len()
                ),
            );
        }

        let temp_shift = if temps_in_c { FREEZE } else { 0.0 };
        let mut records = Vec::with_capacity(continuous_lines.len());
        for (i, (c_line, p_line)) in continuous_lines.iter().zip(precip_lines.iter()).enumerate() {
            let line_no = i + 1;
            let c = parse_floats(c_line, 6, line_no)?;
            let p = parse_floats(p_line, 5, line_no)?;

            let net_solar = c[0];
            let incoming_thermal = c[1];
            let air_temp = c[2] + temp_shift;
            let vapor_pressure = c[3];
            let wind_speed = c[4];
            let soil_temp = c[5] + temp_shift;

            let precip_mass = p[1];
            let percent_snow = p[2];
            let snow_density = p[3];
            let precip_temp = p[4] + temp_shift;

            let record = InputRecord::new(
                net_solar,
                incoming_thermal,
                air_temp,
                vapor_pressure,
                wind_speed,
                soil_temp,
                precip_mass,
                percent_snow,
                snow_density,
                precip_temp,
            )?;
            records.push(record);
        }

        Ok(PointForcingReader { records, cursor: 0 })
    }

    /// Reads the two forcing files from disk and parses them, per
    /// [`PointForcingReader::parse`].
    pub fn from_files(
        continuous_path: impl AsRef<Path>,
        precip_path: impl AsRef<Path>,
        temps_in_c: bool,
    ) -> Result<PointForcingReader, SnobalError> {
        let continuous = std::fs::read_to_string(continuous_path.as_ref()).map_err(|e| {
            Module::user_error::<()>(
                SnobalErrorKind::IoError,
                format!("could not read '{}': {e}", continuous_path.as_ref().display()),
            )
            .unwrap_err()
        })?;
        let precip = std::fs::read_to_string(precip_path.as_ref()).map_err(|e| {
            Module::user_error::<()>(
                SnobalErrorKind::IoError,
                format!("could not read '{}': {e}", precip_path.as_ref().display()),
            )
            .unwrap_err()
        })?;
        PointForcingReader::parse(&continuous, &precip, temps_in_c)
    }

    /// How many data intervals remain, including the one `next_pair`
    /// would return next.
    pub fn remaining(&self) -> usize {
        self.records.len().saturating_sub(self.cursor + 1)
    }
}

impl ForcingSource for PointForcingReader {
    fn next_pair(&mut self) -> Result<Option<(InputRecord, InputRecord)>, SnobalError> {
        if self.cursor + 1 >= self.records.len() {
            return Ok(None);
        }
        let pair = (self.records[self.cursor], self.records[self.cursor + 1]);
        self.cursor += 1;
        Ok(Some(pair))
    }
}
