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
//! Snowpack state representation.
use crate::Float;
use snobal_error::{CellId, ErrorHandling, SnobalError, SnobalErrorKind};
use thermo::constants::{CP_ICE, FREEZE, RHO_ICE, RHO_WATER};

pub(crate) const MODULE_NAME: &str = "snowcover::state";

struct Module;
impl ErrorHandling for Module {
    fn module_name() -> &'static str {
        MODULE_NAME
    }
}

/// Tolerance below which a snowpack is considered gone, kg/m^2.
pub const MIN_SNOW_MASS: Float = 0.001;

/// Number of layers currently carried. A snowcover with no mass is
/// `Zero`; once the pack is thicker than `max_z_s_0` it splits into a
/// capped surface layer and a lower layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerCount {
    /// No snow present.
    Zero,
    /// A single layer; the surface layer holds the whole pack.
    One,
    /// Two layers: a capped surface layer and a lower layer.
    Two,
}

impl LayerCount {
    /// Numeric value matching §3's `layer_count` ∈ {0,1,2}.
    pub fn as_u8(self) -> u8 {
        match self {
            LayerCount::Zero => 0,
            LayerCount::One => 1,
            LayerCount::Two => 2,
        }
    }
}

/// Effective bulk density used to convert snow mass to a layer
/// thickness. Blends ice density towards water density as the pack's
/// liquid saturation fraction rises, since a saturated pore space is
/// heavier than dry ice-only snow of the same mass.
pub fn rho_eff(h2o_sat: Float) -> Float {
    RHO_ICE + h2o_sat.clamp(0.0, 1.0) * (RHO_WATER - RHO_ICE)
}

/// Per-cell snowcover state: layer geometry, mass, cold content, and
/// the accumulators the driver reads at output time. Mutated only by
/// [`crate::energy`], [`crate::mass`] and [`crate::layers`]; nothing
/// outside those modules should construct intermediate invalid
/// states.
#[derive(Debug, Clone, PartialEq)]
pub struct SnowcoverState {
    // Geometry
    /// Total snowcover thickness, m.
    pub z_s: Float,
    /// Surface layer thickness, m.
    pub z_s_0: Float,
    /// Lower layer thickness, m.
    pub z_s_l: Float,
    /// Current layer count.
    pub layer_count: LayerCount,

    // Mass
    /// Total snowcover mass, kg/m^2.
    pub m_s: Float,
    /// Surface layer mass, kg/m^2.
    pub m_s_0: Float,
    /// Lower layer mass, kg/m^2.
    pub m_s_l: Float,
    /// Bulk density, kg/m^3.
    pub rho: Float,
    /// Free liquid water held in the pack, kg/m^2.
    pub h2o: Float,
    /// Maximum liquid water the pack's void space can hold, kg/m^2.
    pub h2o_max: Float,
    /// Fraction of `h2o_max` currently held, in [0, 1].
    pub h2o_sat: Float,

    // Temperature
    /// Surface layer temperature, K.
    pub t_s_0: Float,
    /// Lower layer temperature, K.
    pub t_s_l: Float,
    /// Bulk (mass-weighted) temperature, K.
    pub t_s: Float,
    /// Surface layer cold content, J/m^2 (non-positive).
    pub cc_s_0: Float,
    /// Lower layer cold content, J/m^2 (non-positive).
    pub cc_s_l: Float,
    /// Total cold content, J/m^2 (non-positive).
    pub cc_s: Float,

    // Roughness and site
    /// Surface roughness length, m.
    pub z_0: Float,
    /// Site elevation, m.
    pub elevation: Float,
    /// Wind measurement height, m (or above-snow if `relative_heights`).
    pub z_u: Float,
    /// Temperature/humidity measurement height, m.
    pub z_t: Float,
    /// Soil temperature measurement depth, m.
    pub z_g: Float,
    /// Whether `z_u`/`z_t` are measured relative to the snow surface.
    pub relative_heights: bool,

    // Accumulators, reset on each output
    /// Time-weighted mean net radiation, W/m^2.
    pub r_n_bar: Float,
    /// Time-weighted mean sensible heat flux, W/m^2.
    pub h_bar: Float,
    /// Time-weighted mean latent heat flux, W/m^2.
    pub l_v_e_bar: Float,
    /// Time-weighted mean soil/substrate heat flux, W/m^2.
    pub g_bar: Float,
    /// Time-weighted mean surface-interface soil heat flux, W/m^2.
    pub g_0_bar: Float,
    /// Time-weighted mean precipitation-advected heat, W/m^2.
    pub m_bar: Float,
    /// Time-weighted mean net energy flux into the pack, W/m^2.
    pub delta_q_bar: Float,
    /// Time-weighted mean net energy flux into the surface layer, W/m^2.
    pub delta_q_0_bar: Float,
    /// Cumulative evaporation (positive) / condensation (negative), kg/m^2.
    pub e_s_sum: Float,
    /// Cumulative melt, kg/m^2.
    pub melt_sum: Float,
    /// Cumulative predicted runoff, kg/m^2.
    pub ro_pred_sum: Float,
    /// Hours elapsed since the last output was emitted.
    pub time_since_out: Float,
    /// Hours elapsed since the start of the run.
    pub current_time: Float,

    // Run state
    /// Whether precipitation is falling during the current substep.
    pub precip_now: bool,
    /// Whether this cell is simulated at all.
    pub mask: bool,
}

impl SnowcoverState {
    /// Builds the initial state for a cell from the constructor inputs
    /// of §6 (`elevation, z_0, z_s, rho, T_s_0, T_s, h2o_sat, mask`),
    /// plus the measurement heights and the surface-layer cap. Derives
    /// mass and cold content from the supplied geometry and runs the
    /// layer split so the result already satisfies the §3 invariants.
    #[allow(clippy::too_many_arguments)]
    pub fn initial(
        elevation: Float,
        z_0: Float,
        z_s: Float,
        rho: Float,
        t_s_0: Float,
        t_s: Float,
        h2o_sat: Float,
        mask: bool,
        z_u: Float,
        z_t: Float,
        z_g: Float,
        relative_heights: bool,
        max_z_s_0: Float,
        max_h2o_vol: Float,
    ) -> Result<SnowcoverState, SnobalError> {
        let m_s = rho * z_s;
        let cc_s = m_s * CP_ICE * (t_s - FREEZE);

        let mut state = SnowcoverState {
            z_s: 0.0,
            z_s_0: 0.0,
            z_s_l: 0.0,
            layer_count: LayerCount::Zero,
            m_s: 0.0,
            m_s_0: 0.0,
            m_s_l: 0.0,
            rho,
            h2o: 0.0,
            h2o_max: 0.0,
            h2o_sat,
            t_s_0,
            t_s_l: t_s,
            t_s,
            cc_s_0: 0.0,
            cc_s_l: 0.0,
            cc_s: 0.0,
            z_0,
            elevation,
            z_u,
            z_t,
            z_g,
            relative_heights,
            r_n_bar: 0.0,
            h_bar: 0.0,
            l_v_e_bar: 0.0,
            g_bar: 0.0,
            g_0_bar: 0.0,
            m_bar: 0.0,
            delta_q_bar: 0.0,
            delta_q_0_bar: 0.0,
            e_s_sum: 0.0,
            melt_sum: 0.0,
            ro_pred_sum: 0.0,
            time_since_out: 0.0,
            current_time: 0.0,
            precip_now: false,
            mask,
        };

        if m_s > MIN_SNOW_MASS {
            state.m_s = m_s;
            state.cc_s = cc_s.min(0.0);
            crate::layers::rebuild(&mut state, max_z_s_0, max_h2o_vol)?;
        }

        Ok(state)
    }

    /// Resets the time-weighted accumulators after an output has been
    /// emitted, leaving cumulative sums (`e_s_sum`, `melt_sum`,
    /// `ro_pred_sum`, `current_time`) untouched.
    pub fn reset_output_accumulators(&mut self) {
        self.r_n_bar = 0.0;
        self.h_bar = 0.0;
        self.l_v_e_bar = 0.0;
        self.g_bar = 0.0;
        self.g_0_bar = 0.0;
        self.m_bar = 0.0;
        self.delta_q_bar = 0.0;
        self.delta_q_0_bar = 0.0;
        self.time_since_out = 0.0;
    }

    /// Current maximum liquid water capacity of the pack's void space,
    /// kg/m^2, from current geometry (§3).
    pub fn compute_h2o_max(&self, max_h2o_vol: Float) -> Float {
        let ice_volume = self.m_s / RHO_ICE;
        let void_volume = (self.z_s - ice_volume).max(0.0);
        RHO_WATER * max_h2o_vol * void_volume
    }

    /// Checks the §3 layer invariants, returning
    /// [`SnobalErrorKind::Invariant`] naming the first violation found.
    pub fn check_invariants(&self, cell: CellId) -> Result<(), SnobalError> {
        let tol = 1e-6;
        match self.layer_count {
            LayerCount::Zero => {
                if self.m_s.abs() > tol || self.z_s.abs() > tol || self.h2o.abs() > tol {
                    return Module::internal_error::<()>(
                        "layer_count=0 but mass, geometry or liquid water is nonzero",
                    )
                    .map_err(|e| e.at_cell(cell));
                }
            }
            LayerCount::One => {
                if self.z_s_l.abs() > tol || self.m_s_l.abs() > tol {
                    return Module::internal_error::<()>(
                        "layer_count=1 but lower layer mass or thickness is nonzero",
                    )
                    .map_err(|e| e.at_cell(cell));
                }
            }
            LayerCount::Two => {
                if self.z_s_l <= 0.0 {
                    return Module::internal_error::<()>(
                        "layer_count=2 but lower layer has non-positive thickness",
                    )
                    .map_err(|e| e.at_cell(cell));
                }
            }
        }
        if (self.m_s - (self.m_s_0 + self.m_s_l)).abs() > 1e-6 {
            return Module::internal_error::<()>("m_s does not equal m_s_0 + m_s_l")
                .map_err(|e| e.at_cell(cell));
        }
        if self.h2o < -tol || self.h2o > self.h2o_max + tol {
            return Module::internal_error::<()>("h2o outside [0, h2o_max]")
                .map_err(|e| e.at_cell(cell));
        }
        if self.cc_s_0 > tol || self.cc_s_l > tol {
            return Module::internal_error::<()>("cold content is positive")
                .map_err(|e| e.at_cell(cell));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_depth_produces_zero_layers() {
        let s = SnowcoverState::initial(
            2000.0, 0.01, 0.0, 0.0, FREEZE, FREEZE, 0.0, true, 2.0, 2.0, 0.5, false, 0.25, 0.05,
        )
        .unwrap();
        assert_eq!(s.layer_count, LayerCount::Zero);
    }

    #[test]
    fn shallow_pack_is_a_single_layer() {
        let s = SnowcoverState::initial(
            2000.0, 0.01, 0.1, 200.0, FREEZE - 2.0, FREEZE - 2.0, 0.0, true, 2.0, 2.0, 0.5, false,
            0.25, 0.05,
        )
        .unwrap();
        assert_eq!(s.layer_count, LayerCount::One);
        assert!((s.m_s - 20.0).abs() < 1e-6);
    }

    #[test]
    fn deep_pack_splits_into_two_layers() {
        let s = SnowcoverState::initial(
            2000.0, 0.01, 1.0, 300.0, FREEZE - 2.0, FREEZE - 2.0, 0.0, true, 2.0, 2.0, 0.5, false,
            0.25, 0.05,
        )
        .unwrap();
        assert_eq!(s.layer_count, LayerCount::Two);
        assert!((s.z_s_0 - 0.25).abs() < 1e-6);
    }

    #[test]
    fn invariants_hold_for_a_fresh_two_layer_state() {
        let s = SnowcoverState::initial(
            2000.0, 0.01, 1.0, 300.0, FREEZE - 2.0, FREEZE - 2.0, 0.0, true, 2.0, 2.0, 0.5, false,
            0.25, 0.05,
        )
        .unwrap();
        s.check_invariants(CellId(0)).unwrap();
    }

    #[test]
    fn rho_eff_blends_ice_towards_water() {
        assert!((rho_eff(0.0) - RHO_ICE).abs() < 1e-9);
        assert!((rho_eff(1.0) - RHO_WATER).abs() < 1e-9);
        assert!(rho_eff(0.5) > RHO_ICE && rho_eff(0.5) < RHO_WATER);
    }
}
