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
//! Model input data structures.
use crate::Float;
use snobal_error::{ErrorHandling, SnobalError, SnobalErrorKind};
use thermo::constants::FREEZE;
use thermo::vapor::sati;

pub(crate) const MODULE_NAME: &str = "snowcover::input";

struct Module;
impl ErrorHandling for Module {
    fn module_name() -> &'static str {
        MODULE_NAME
    }
}

/// One instant of atmospheric and precipitation forcing for a single
/// cell, plus the precipitation partitioning and saturation vapor
/// pressures derived from it at construction time.
///
/// The derived fields are computed once in [`InputRecord::new`] rather
/// than recomputed on every read: there are no setters, so the usual
/// dirty-bit lazy cache collapses to "compute once, then it's
/// immutable for the life of the record". A new forcing instant means
/// a new `InputRecord`, not a mutation of this one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputRecord {
    /// Net shortwave radiation, W/m^2.
    pub net_solar: Float,
    /// Incoming longwave radiation, W/m^2.
    pub incoming_thermal: Float,
    /// Air temperature, K.
    pub air_temp: Float,
    /// Atmospheric vapor pressure, Pa.
    pub vapor_pressure: Float,
    /// Wind speed, m/s.
    pub wind_speed: Float,
    /// Soil/substrate temperature, K.
    pub soil_temp: Float,

    /// Total precipitation mass over the interval, kg/m^2.
    pub precip_mass: Float,
    /// Fraction of `precip_mass` that fell as snow, in [0, 1].
    pub percent_snow: Float,
    /// Density of the snow fraction, kg/m^3.
    pub snow_density: Float,
    /// Precipitation temperature, K.
    pub precip_temp: Float,

    m_snow: Float,
    m_rain: Float,
    z_snow: Float,
    t_snow: Float,
    t_rain: Float,
    h2o_sat_snow: Float,
    precip_now: bool,

    sat_vp_air: Float,
    sat_vp_soil: Float,
}

impl InputRecord {
    /// Builds a record from raw forcings, computing the precipitation
    /// partitioning (§4.2) and caching the saturation vapor pressures
    /// of the air and soil temperatures.
    ///
    /// # Errors
    /// Returns [`SnobalErrorKind::InvalidPrecip`] if snow fell
    /// (`m_snow > 0`) with no reported snow density, and propagates
    /// [`SnobalErrorKind::DomainError`] if either temperature is not a
    /// valid Kelvin value.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        net_solar: Float,
        incoming_thermal: Float,
        air_temp: Float,
        vapor_pressure: Float,
        wind_speed: Float,
        soil_temp: Float,
        precip_mass: Float,
        percent_snow: Float,
        snow_density: Float,
        mut precip_temp: Float,
    ) -> Result<Self, SnobalError> {
        let m_snow = precip_mass * percent_snow;
        let m_rain = precip_mass - m_snow;
        let precip_now = precip_mass > 0.0;

        let mut z_snow = 0.0;
        let mut t_snow = 0.0;
        let mut t_rain = 0.0;
        let mut h2o_sat_snow = 0.0;

        if precip_now {
            if m_snow > 0.0 {
                if snow_density <= 0.0 {
                    return Module::user_error(
                        SnobalErrorKind::InvalidPrecip,
                        format!(
                            "snow fell (m_snow={m_snow}) but snow_density={snow_density} is not positive"
                        ),
                    );
                }
                z_snow = m_snow / snow_density;
            }
            if m_rain > 0.0 && precip_temp < FREEZE {
                precip_temp = FREEZE;
            }

            match (m_snow > 0.0, m_rain > 0.0) {
                (true, true) => {
                    t_snow = FREEZE;
                    h2o_sat_snow = 1.0;
                    t_rain = precip_temp;
                }
                (true, false) => {
                    if precip_temp >= FREEZE {
                        t_snow = FREEZE;
                        h2o_sat_snow = 1.0;
                    } else {
                        t_snow = precip_temp;
                        h2o_sat_snow = 0.0;
                    }
                }
                (false, true) => {
                    t_rain = precip_temp;
                }
                (false, false) => {}
            }
        }

        let sat_vp_air = sati(air_temp)?;
        let sat_vp_soil = sati(soil_temp)?;

        Ok(InputRecord {
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
            m_snow,
            m_rain,
            z_snow,
            t_snow,
            t_rain,
            h2o_sat_snow,
            precip_now,
            sat_vp_air,
            sat_vp_soil,
        })
    }

    /// Mass of the snow fraction of precipitation, kg/m^2.
    pub fn m_snow(&self) -> Float {
        self.m_snow
    }

    /// Mass of the rain fraction of precipitation, kg/m^2.
    pub fn m_rain(&self) -> Float {
        self.m_rain
    }

    /// Depth the snow fraction would occupy at `snow_density`, m.
    pub fn z_snow(&self) -> Float {
        self.z_snow
    }

    /// Temperature assigned to the snow fraction, K. Only meaningful
    /// when [`Self::m_snow`] is positive.
    pub fn t_snow(&self) -> Float {
        self.t_snow
    }

    /// Temperature assigned to the rain fraction, K. Only meaningful
    /// when [`Self::m_rain`] is positive.
    pub fn t_rain(&self) -> Float {
        self.t_rain
    }

    /// Saturation fraction assumed for the snow fraction on arrival.
    pub fn h2o_sat_snow(&self) -> Float {
        self.h2o_sat_snow
    }

    /// Whether any precipitation fell this interval.
    pub fn precip_now(&self) -> bool {
        self.precip_now
    }

    /// Cached saturation vapor pressure at `air_temp`, Pa.
    pub fn sat_vp_air(&self) -> Float {
        self.sat_vp_air
    }

    /// Cached saturation vapor pressure at `soil_temp`, Pa.
    pub fn sat_vp_soil(&self) -> Float {
        self.sat_vp_soil
    }
}
