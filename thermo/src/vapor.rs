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
//! Saturation vapor pressure and latent heat calculations.
use crate::constants::FREEZE;
use crate::Float;
use snobal_error::{ErrorHandling, SnobalError, SnobalErrorKind};

pub(crate) const MODULE_NAME: &str = "thermo::vapor";

struct Module;
impl ErrorHandling for Module {
    fn module_name() -> &'static str {
        MODULE_NAME
    }
}

/// Standard atmospheric boiling point of water, K.
const BOIL: Float = 373.15;

/// Sea level pressure, hPa, used by the Goff-Gratch correlation.
const SEA_LEVEL_HPA: Float = 1013.246;

/// Saturation vapor pressure over liquid water (Pa), via the
/// Goff-Gratch correlation.
///
/// ```math
/// \log_{10} e_s = -7.90298 \left(\frac{T_b}{T}-1\right) + 5.02808 \log_{10}\frac{T_b}{T}
///   - 1.3816\times10^{-7}\left(10^{11.344(1-T/T_b)}-1\right)
///   + 8.1328\times10^{-3}\left(10^{-3.49149(T_b/T - 1)}-1\right) + \log_{10} p_0
/// ```
/// where $`T_b`$ is the boiling point and $`p_0`$ sea-level pressure.
fn satw(tk: Float) -> Float {
    let x = -7.90298 * (BOIL / tk - 1.0) + 5.02808 * (BOIL / tk).log10()
        - 1.3816e-7 * (10f64.powf((11.344 * (1.0 - tk / BOIL)) as f64) as Float - 1.0)
        + 8.1328e-3 * (10f64.powf((-3.49149 * (BOIL / tk - 1.0)) as f64) as Float - 1.0)
        + SEA_LEVEL_HPA.log10();
    100.0 * (10f64.powf(x as f64) as Float)
}

/// Saturation vapor pressure over ice (Pa), `sati` from §4.1.
///
/// Uses the Goff-Gratch ice correlation below freezing and switches
/// to the liquid-water correlation ([`satw`]) above it, matching the
/// spec's "switches to Wexler form above freezing".
///
/// # Errors
/// Returns [`SnobalErrorKind::DomainError`] if `tk` is not a positive
/// temperature in Kelvin.
pub fn sati(tk: Float) -> Result<Float, SnobalError> {
    if !(tk > 0.0) {
        return Module::user_error(
            SnobalErrorKind::DomainError,
            format!("sati: temperature must be > 0 K, got {tk}"),
        );
    }
    if tk > FREEZE {
        return Ok(satw(tk));
    }
    let x = -9.09718 * (FREEZE / tk - 1.0) - 3.56654 * (FREEZE / tk).log10()
        + 0.876793 * (1.0 - tk / FREEZE)
        + 6.1071f64.log10() as Float;
    Ok(100.0 * (10f64.powf(x as f64) as Float))
}

/// Latent heat of fusion at temperature `tk`, J/kg.
pub fn lh_fus(tk: Float) -> Float {
    3.6127e5 + 1.0826e2 * (FREEZE - tk)
}

/// Latent heat of vaporization at temperature `tk`, J/kg.
pub fn lh_vap(tk: Float) -> Float {
    2.5003e6 - 2.4850e3 * (tk - FREEZE)
}

/// Latent heat of sublimation at temperature `tk`, J/kg.
pub fn lh_sub(tk: Float) -> Float {
    lh_fus(tk) + lh_vap(tk)
}
