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
//! Snowpack layer representation.
use crate::state::{rho_eff, LayerCount, SnowcoverState, MIN_SNOW_MASS};
use crate::Float;
use snobal_error::SnobalError;
use thermo::constants::{CP_ICE, FREEZE};

/// Rebuilds `layer_count`, layer thicknesses, and redistributes
/// mass/cold content/liquid water so the §3 invariants hold after any
/// mass change. Called after every substep's mass balance update.
pub fn rebuild(state: &mut SnowcoverState, max_z_s_0: Float, max_h2o_vol: Float) -> Result<(), SnobalError> {
    if state.m_s < MIN_SNOW_MASS {
        dissolve(state);
        return Ok(());
    }

    let z_s = state.m_s / rho_eff(state.h2o_sat);
    state.z_s = z_s;

    if z_s <= max_z_s_0 {
        merge_to_single_layer(state);
    } else {
        split_into_two_layers(state, max_z_s_0);
    }

    derive_temperatures(state);
    redistribute_h2o(state, max_h2o_vol);
    Ok(())
}

/// No snow left: zero every per-layer field and send any remaining
/// liquid water to runoff rather than leaving it stranded.
fn dissolve(state: &mut SnowcoverState) {
    state.ro_pred_sum += state.h2o;
    state.layer_count = LayerCount::Zero;
    state.z_s = 0.0;
    state.z_s_0 = 0.0;
    state.z_s_l = 0.0;
    state.m_s = 0.0;
    state.m_s_0 = 0.0;
    state.m_s_l = 0.0;
    state.h2o = 0.0;
    state.h2o_max = 0.0;
    state.h2o_sat = 0.0;
    state.cc_s = 0.0;
    state.cc_s_0 = 0.0;
    state.cc_s_l = 0.0;
}

fn merge_to_single_layer(state: &mut SnowcoverState) {
    state.layer_count = LayerCount::One;
    state.z_s_0 = state.z_s;
    state.z_s_l = 0.0;
    state.m_s_0 = state.m_s;
    state.m_s_l = 0.0;
    state.cc_s_0 = state.cc_s;
    state.cc_s_l = 0.0;
}

fn split_into_two_layers(state: &mut SnowcoverState, max_z_s_0: Float) {
    let was_two_layers = state.layer_count == LayerCount::Two;
    state.layer_count = LayerCount::Two;
    state.z_s_0 = max_z_s_0;
    state.z_s_l = state.z_s - max_z_s_0;

    if !was_two_layers {
        // Coming from 0 or 1 layers: redistribute mass/cold content
        // proportionally to the new layer thicknesses.
        let frac_0 = state.z_s_0 / state.z_s;
        let frac_l = 1.0 - frac_0;
        state.m_s_0 = state.m_s * frac_0;
        state.m_s_l = state.m_s * frac_l;
        state.cc_s_0 = state.cc_s * frac_0;
        state.cc_s_l = state.cc_s * frac_l;
    }
    state.cc_s = state.cc_s_0 + state.cc_s_l;
}

fn derive_temperatures(state: &mut SnowcoverState) {
    state.t_s_0 = temperature_from_cold_content(state.cc_s_0, state.m_s_0);
    state.t_s_l = if state.layer_count == LayerCount::Two {
        temperature_from_cold_content(state.cc_s_l, state.m_s_l)
    } else {
        state.t_s_0
    };
    state.t_s = temperature_from_cold_content(state.cc_s, state.m_s);
}

fn temperature_from_cold_content(cc: Float, mass: Float) -> Float {
    if mass <= 0.0 {
        return FREEZE;
    }
    (FREEZE + cc / (mass * CP_ICE)).min(FREEZE)
}

fn redistribute_h2o(state: &mut SnowcoverState, max_h2o_vol: Float) {
    state.h2o_max = state.compute_h2o_max(max_h2o_vol);
    if state.h2o_max <= 0.0 {
        state.ro_pred_sum += state.h2o;
        state.h2o = 0.0;
        state.h2o_sat = 0.0;
        return;
    }
    if state.h2o > state.h2o_max {
        state.ro_pred_sum += state.h2o - state.h2o_max;
        state.h2o = state.h2o_max;
    }
    state.h2o_sat = (state.h2o / state.h2o_max).clamp(0.0, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SnowcoverState;

    #[test]
    fn tiny_mass_dissolves_to_zero_layers() {
        let mut s = SnowcoverState::initial(
            2000.0, 0.01, 0.2, 200.0, FREEZE - 2.0, FREEZE - 2.0, 0.0, true, 2.0, 2.0, 0.5, false,
            0.25, 0.05,
        )
        .unwrap();
        s.m_s = 0.0001;
        s.h2o = 0.5;
        rebuild(&mut s, 0.25, 0.05).unwrap();
        assert_eq!(s.layer_count, LayerCount::Zero);
        assert!((s.ro_pred_sum - 0.5).abs() < 1e-9);
    }

    #[test]
    fn growing_past_the_cap_splits_into_two_layers() {
        let mut s = SnowcoverState::initial(
            2000.0, 0.01, 0.1, 200.0, FREEZE - 2.0, FREEZE - 2.0, 0.0, true, 2.0, 2.0, 0.5, false,
            0.25, 0.05,
        )
        .unwrap();
        assert_eq!(s.layer_count, LayerCount::One);
        s.m_s = 150.0;
        s.cc_s = -1.0e6;
        rebuild(&mut s, 0.25, 0.05).unwrap();
        assert_eq!(s.layer_count, LayerCount::Two);
        assert!((s.z_s_0 - 0.25).abs() < 1e-6);
        assert!((s.m_s_0 + s.m_s_l - s.m_s).abs() < 1e-6);
    }

    #[test]
    fn excess_liquid_water_drains_to_runoff() {
        let mut s = SnowcoverState::initial(
            2000.0, 0.01, 1.0, 300.0, FREEZE - 2.0, FREEZE - 2.0, 0.0, true, 2.0, 2.0, 0.5, false,
            0.25, 0.05,
        )
        .unwrap();
        s.h2o = 1_000_000.0;
        rebuild(&mut s, 0.25, 0.05).unwrap();
        assert!(s.h2o <= s.h2o_max + 1e-6);
        assert!(s.ro_pred_sum > 0.0);
    }

    #[test]
    fn surface_temperature_never_exceeds_freezing() {
        let mut s = SnowcoverState::initial(
            2000.0, 0.01, 0.1, 200.0, FREEZE, FREEZE, 0.0, true, 2.0, 2.0, 0.5, false, 0.25, 0.05,
        )
        .unwrap();
        s.cc_s_0 = 10.0; // invalid positive cold content, should still clamp temp
        s.cc_s = 10.0;
        rebuild(&mut s, 0.25, 0.05).unwrap();
        assert!(s.t_s_0 <= FREEZE + 1e-9);
    }
}
