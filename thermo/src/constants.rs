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
//! Physical constants used throughout the thermodynamics calculations.
use crate::Float;

/// Melting point of water/ice, in Kelvin. The reference temperature
/// cold content and melt/refreeze are measured relative to.
pub const FREEZE: Float = 273.16;

/// Stefan-Boltzmann constant, W / (m^2 K^4).
pub const STEFAN_BOLTZMANN: Float = 5.6697e-8;

/// Von Karman constant, dimensionless.
pub const VON_KARMAN: Float = 0.4;

/// Gravitational acceleration, m/s^2.
pub const GRAVITY: Float = 9.80665;

/// Universal gas constant, J / (kmol K).
pub const GAS_CONST: Float = 8.31432e3;

/// Molecular weight of dry air, kg/kmol.
pub const MOL_AIR: Float = 28.9644;

/// Molecular weight of water vapor, kg/kmol.
pub const MOL_H2O: Float = 18.0153;

/// Gas constant for dry air, J / (kg K).
pub const GAS_CONST_AIR: Float = GAS_CONST / MOL_AIR;

/// Gas constant for water vapor, J / (kg K).
pub const GAS_CONST_H2O: Float = GAS_CONST / MOL_H2O;

/// Ratio of the molecular weight of water vapor to dry air.
pub const EPS: Float = MOL_H2O / MOL_AIR;

/// Density of ice, kg/m^3.
pub const RHO_ICE: Float = 917.0;

/// Density of water at 0 C, kg/m^3.
pub const RHO_WATER: Float = 999.87;

/// Specific heat of ice, J / (kg K). Treated as constant over the
/// narrow temperature range a snowcover occupies.
pub const CP_ICE: Float = 2100.0;

/// Specific heat of water, J / (kg K).
pub const CP_WATER: Float = 4186.8;

/// Specific heat of air at constant pressure, J / (kg K).
pub const CP_AIR: Float = 1005.0;

/// Standard sea-level atmospheric pressure, Pa.
pub const SEA_LEVEL_PRESSURE: Float = 101325.0;

/// Standard atmosphere temperature lapse rate, K/m.
pub const STANDARD_LAPSE_RATE: Float = 0.0065;

/// Standard atmosphere sea-level temperature, K.
pub const STANDARD_TEMP: Float = 288.15;

/// Snow/ice longwave emissivity, dimensionless.
pub const SNOW_EMISSIVITY: Float = 0.98;
