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
//! Command-line argument parsing.
use crate::Float;
use clap::{Parser, ValueEnum};
use engine::OutputMode;

/// How often the run emits a point CSV row, mirroring
/// [`engine::OutputMode`] but spelled the way a CLI user types it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Mode {
    /// Once per raw data interval.
    Data,
    /// Once per hourly (normal) substep.
    #[default]
    Normal,
    /// Once per substep at every refinement level.
    All,
}

impl From<Mode> for OutputMode {
    fn from(mode: Mode) -> OutputMode {
        match mode {
            Mode::Data => OutputMode::Data,
            Mode::Normal => OutputMode::Normal,
            Mode::All => OutputMode::All,
        }
    }
}

/// Snobal runs a physically-based two-layer snowcover energy and mass
/// balance at a single point, reading forcing from two text files and
/// writing the fixed point CSV schema.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct SimOptions {
    /// Continuous forcing file: whitespace/comma columns
    /// `S_n, I_lw, T_a, e_a, u, T_g`, one row per data interval.
    #[arg(short, long)]
    pub input_file: String,

    /// Precipitation forcing file: columns
    /// `time_pp, m_pp, percent_snow, rho_snow, T_pp`, one row per data interval.
    #[arg(short, long)]
    pub precip_file: String,

    /// Where to write the point CSV. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Forcing cadence, seconds.
    #[arg(short, long, default_value_t = 3600)]
    pub data_tstep_seconds: u32,

    /// Maximum liquid water the pack can hold per unit void volume.
    #[arg(long, default_value_t = 0.01)]
    pub max_h2o_vol: Float,

    /// Cap on the surface layer's thickness, m.
    #[arg(long, default_value_t = 0.25)]
    pub max_z_s_0: Float,

    /// Stop the run at the first data-interval boundary where the
    /// pack has fully ablated.
    #[arg(long)]
    pub stop_no_snow: bool,

    /// Temperature fields in the forcing files and the initial state
    /// are given in Celsius rather than Kelvin.
    #[arg(long)]
    pub celsius: bool,

    /// Measurement heights are given relative to the snow surface
    /// rather than above ground.
    #[arg(long)]
    pub relative_heights: bool,

    /// How often to emit a point CSV row.
    #[arg(long, value_enum, default_value_t = Mode::Normal)]
    pub mode: Mode,

    /// Wind measurement height, m.
    #[arg(long, default_value_t = 2.0)]
    pub z_u: Float,

    /// Temperature/humidity measurement height, m.
    #[arg(long, default_value_t = 2.0)]
    pub z_t: Float,

    /// Surface roughness length, m.
    #[arg(long, default_value_t = 0.01)]
    pub z_0: Float,

    /// Soil temperature measurement depth, m.
    #[arg(long, default_value_t = 0.5)]
    pub z_g: Float,

    /// Site elevation, m.
    #[arg(long, default_value_t = 0.0)]
    pub elevation: Float,

    /// Initial snowcover thickness, m.
    #[arg(long, default_value_t = 0.0)]
    pub init_z_s: Float,

    /// Initial bulk density, kg/m^3.
    #[arg(long, default_value_t = 0.0)]
    pub init_rho: Float,

    /// Initial surface layer temperature. Kelvin unless `--celsius`.
    #[arg(long, default_value_t = 273.16)]
    pub init_t_s_0: Float,

    /// Initial bulk temperature. Kelvin unless `--celsius`.
    #[arg(long, default_value_t = 273.16)]
    pub init_t_s: Float,

    /// Initial liquid water saturation fraction, in [0, 1].
    #[arg(long, default_value_t = 0.0)]
    pub init_h2o_sat: Float,

    /// Override the NORMAL-level subdivision threshold, kg/m^2.
    #[arg(long)]
    pub normal_threshold: Option<Float>,

    /// Override the MEDIUM-level subdivision threshold, kg/m^2.
    #[arg(long)]
    pub medium_threshold: Option<Float>,

    /// Override the SMALL-level subdivision threshold, kg/m^2.
    #[arg(long)]
    pub small_threshold: Option<Float>,

    /// Suppress the progress bar.
    #[arg(short, long)]
    pub quiet: bool,
}
