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
//! Air density and atmospheric pressure calculations.
use crate::constants::{
    GAS_CONST_AIR, GRAVITY, MOL_AIR, SEA_LEVEL_PRESSURE, STANDARD_LAPSE_RATE, STANDARD_TEMP,
};
use crate::Float;

/// Density of dry air from the ideal gas law, kg/m^3.
pub fn air_density(pressure: Float, temperature: Float) -> Float {
    pressure / (GAS_CONST_AIR * temperature)
}

/// Atmospheric pressure at `elevation` (m above sea level), Pa, from
/// the standard-atmosphere barometric formula:
///
/// ```math
/// P = P_0 \left(1 - \frac{L h}{T_0}\right)^{\frac{g M}{R L}}
/// ```
///
/// Forcing records carry no pressure field; every caller needing one
/// (turbulent fluxes, effective conductance) derives it from site
/// elevation instead.
pub fn pressure_at_elevation(elevation: Float) -> Float {
    use crate::constants::GAS_CONST;
    let exponent = GRAVITY * MOL_AIR / (GAS_CONST * STANDARD_LAPSE_RATE);
    SEA_LEVEL_PRESSURE * (1.0 - STANDARD_LAPSE_RATE * elevation / STANDARD_TEMP).powf(exponent)
}

/// Effective thermal conductivity of snow as a function of density,
/// W / (m K), after Yen (1981):
///
/// ```math
/// k_{snow} = 2.9\times10^{-6} \rho^2
/// ```
/// valid over the density range a seasonal snowcover occupies
/// (roughly 50-550 kg/m^3); not extrapolated beyond that here.
pub fn snow_conductivity(density: Float) -> Float {
    2.9e-6 * density * density
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denser_snow_conducts_more() {
        assert!(snow_conductivity(400.0) > snow_conductivity(100.0));
    }

    #[test]
    fn air_density_matches_sea_level_order_of_magnitude() {
        let rho = air_density(101325.0, 288.0);
        assert!((rho - 1.225).abs() < 0.05, "rho={rho}");
    }

    #[test]
    fn pressure_decreases_with_elevation() {
        let sea_level = pressure_at_elevation(0.0);
        let high = pressure_at_elevation(3000.0);
        assert!((sea_level - 101325.0).abs() < 1.0);
        assert!(high < sea_level);
    }
}
