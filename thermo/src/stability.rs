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
//! Atmospheric stability corrections for turbulent transfer.
use crate::Float;
use std::f64::consts::PI;

/// Which quantity a stability correction applies to. Vapor transport
/// shares the same functional form as heat (Brutsaert 1982).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilityKind {
    /// Momentum transport.
    Momentum,
    /// Sensible heat transport.
    Heat,
    /// Water vapor transport.
    Vapor,
}

/// Monin-Obukhov stability correction for the log-wind/log-profile
/// laws, following the Businger-Dyer/Paulson (1970) formulation.
///
/// `zeta = z / L` is the stability parameter (height over Obukhov
/// length). Negative `zeta` is unstable (surface warmer than air),
/// positive is stable.
///
/// ```math
/// \psi_m(\zeta) = 2\ln\frac{1+x}{2} + \ln\frac{1+x^2}{2} - 2\arctan(x) + \frac{\pi}{2}, \quad x = (1-16\zeta)^{1/4}
/// ```
/// ```math
/// \psi_h(\zeta) = \psi_v(\zeta) = 2\ln\frac{1+x^2}{2}
/// ```
/// for unstable conditions ($`\zeta < 0`$), and
/// ```math
/// \psi_m(\zeta) = \psi_h(\zeta) = \psi_v(\zeta) = -5\zeta
/// ```
/// for stable conditions ($`\zeta \geq 0`$), clipped at $`\zeta = 1`$
/// to keep the correction bounded under very stable stratification.
pub fn psi(zeta: Float, kind: StabilityKind) -> Float {
    if zeta < 0.0 {
        let x = (1.0 - 16.0 * zeta).powf(0.25);
        match kind {
            StabilityKind::Momentum => {
                2.0 * ((1.0 + x) / 2.0).ln() + ((1.0 + x * x) / 2.0).ln()
                    - 2.0 * x.atan()
                    + PI as Float / 2.0
            }
            StabilityKind::Heat | StabilityKind::Vapor => 2.0 * ((1.0 + x * x) / 2.0).ln(),
        }
    } else {
        -5.0 * zeta.min(1.0)
    }
}
