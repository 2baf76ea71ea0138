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
//! Conductive heat flux between snow layers.
use crate::vapor::{lh_sub, sati};
use crate::Float;
use snobal_error::{ErrorHandling, SnobalError};

pub(crate) const MODULE_NAME: &str = "thermo::conduction";

struct Module;
impl ErrorHandling for Module {
    fn module_name() -> &'static str {
        MODULE_NAME
    }
}

/// Effective thermal conductance of a snow layer, `efcon` from §4.1:
/// molecular conduction augmented by latent heat carried on the
/// vapor-pressure gradient within the pore space.
///
/// ```math
/// k_{eff} = k + \frac{L_s M_{H_2O}}{R T} \frac{de_s}{dT}
/// ```
/// approximated here with a centered finite difference of [`sati`]
/// about `temperature` rather than an analytic derivative.
///
/// # Errors
/// Propagates [`SnobalErrorKind::DomainError`](snobal_error::SnobalErrorKind::DomainError)
/// from [`sati`] if `temperature` is not a valid Kelvin value.
pub fn efcon(k_snow: Float, temperature: Float, air_pressure: Float) -> Result<Float, SnobalError> {
    use crate::constants::GAS_CONST_H2O;

    let dt = 0.5;
    let es_plus = sati(temperature + dt)?;
    let es_minus = sati(temperature - dt)?;
    let des_dt = (es_plus - es_minus) / (2.0 * dt);

    let rho_sat = es_plus.min(es_minus) / (GAS_CONST_H2O * temperature);
    let l_s = lh_sub(temperature);
    let latent_term = l_s * l_s * rho_sat * des_dt / (air_pressure * temperature);

    Ok(k_snow + latent_term.max(0.0))
}

/// Conductive heat flux between two adjacent layers, `ssxfr` from
/// §4.1. Treats the two layers as resistors in series (harmonic mean
/// of their conductance-to-thickness ratios) so a thin, poorly
/// conducting layer dominates the total resistance.
///
/// ```math
/// q = \frac{T_{upper} - T_{lower}}{\frac{dz_{upper}}{2k_{upper}} + \frac{dz_{lower}}{2k_{lower}}}
/// ```
/// Positive `q` is heat flowing from the upper layer into the lower
/// one.
pub fn ssxfr(
    k_upper: Float,
    k_lower: Float,
    t_upper: Float,
    t_lower: Float,
    dz_upper: Float,
    dz_lower: Float,
) -> Float {
    let r_upper = dz_upper / (2.0 * k_upper);
    let r_lower = dz_lower / (2.0 * k_lower);
    (t_upper - t_lower) / (r_upper + r_lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FREEZE;

    #[test]
    fn efcon_exceeds_molecular_conductivity() {
        let k_snow = 0.1;
        let k_eff = efcon(k_snow, FREEZE - 5.0, 88000.0).unwrap();
        assert!(k_eff >= k_snow);
    }

    #[test]
    fn efcon_rejects_invalid_temperature() {
        assert!(efcon(0.1, -1.0, 88000.0).is_err());
    }

    #[test]
    fn ssxfr_flows_from_warm_to_cold() {
        let q = ssxfr(0.2, 0.2, FREEZE - 1.0, FREEZE - 5.0, 0.1, 0.2);
        assert!(q > 0.0);
    }

    #[test]
    fn ssxfr_is_zero_for_equal_temperatures() {
        let q = ssxfr(0.2, 0.3, FREEZE - 3.0, FREEZE - 3.0, 0.1, 0.2);
        assert!(q.abs() < 1e-9);
    }

    #[test]
    fn ssxfr_thin_poorly_conducting_layer_dominates_resistance() {
        let q_thick_good = ssxfr(0.5, 0.5, FREEZE - 1.0, FREEZE - 10.0, 0.5, 0.5);
        let q_thin_poor = ssxfr(0.01, 0.5, FREEZE - 1.0, FREEZE - 10.0, 0.01, 0.5);
        assert!(q_thin_poor.abs() < q_thick_good.abs());
    }
}
