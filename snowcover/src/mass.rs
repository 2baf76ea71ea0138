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
//! Snowpack mass balance calculations.
use crate::deltas::SubstepForcing;
use crate::energy::EnergyFluxes;
use crate::state::{LayerCount, SnowcoverState};
use crate::Float;
use snobal_error::SnobalError;
use thermo::constants::{CP_ICE, FREEZE};
use thermo::vapor::{lh_fus, lh_sub};

/// Applies one substep of mass and energy bookkeeping (§4.5): surface
/// evaporation/condensation, precipitation deposition, cold content
/// advance, melt/refreeze, and drainage of any liquid water above
/// capacity. Does not rebuild layer structure; callers run
/// [`crate::layers::rebuild`] afterward.
pub fn apply(
    state: &mut SnowcoverState,
    fluxes: &EnergyFluxes,
    forcing: &SubstepForcing,
    dt_seconds: Float,
    max_h2o_vol: Float,
) -> Result<(), SnobalError> {
    if state.layer_count == LayerCount::Zero {
        return Ok(());
    }
    let dt_hours = dt_seconds / 3600.0;

    apply_evaporation(state, fluxes, dt_seconds);
    apply_precipitation(state, forcing);
    apply_cold_content(state, fluxes, dt_seconds);
    let melt = apply_melt_and_refreeze(state);
    drain_excess_water(state, max_h2o_vol);
    accumulate_means(state, fluxes, dt_hours);

    state.melt_sum += melt;
    state.time_since_out += dt_hours;
    state.current_time += dt_hours;
    state.m_s = state.m_s_0 + state.m_s_l;
    Ok(())
}

fn apply_evaporation(state: &mut SnowcoverState, fluxes: &EnergyFluxes, dt_seconds: Float) {
    let latent = lh_sub(state.t_s_0);
    // Positive E removes mass (sublimation); negative E adds ice
    // (deposition). l_v_e is positive when the flux is into the
    // surface (condensation), hence the sign flip.
    let e = -fluxes.l_v_e * dt_seconds / latent;
    state.e_s_sum += e;

    if e > 0.0 {
        let from_snow = e.min(state.m_s_0);
        state.m_s_0 -= from_snow;
        let remainder = e - from_snow;
        if remainder > 0.0 {
            let from_water = remainder.min(state.h2o);
            state.h2o -= from_water;
        }
    } else {
        state.m_s_0 += -e;
    }
}

fn apply_precipitation(state: &mut SnowcoverState, forcing: &SubstepForcing) {
    if !forcing.precip_now {
        return;
    }
    if forcing.m_snow > 0.0 {
        let cc_new_snow = forcing.m_snow * CP_ICE * (forcing.t_snow - FREEZE);
        state.m_s_0 += forcing.m_snow;
        state.cc_s_0 += cc_new_snow;
        state.z_s_0 += forcing.z_snow;
    }
    if forcing.m_rain > 0.0 {
        state.h2o += forcing.m_rain;
    }
}

fn apply_cold_content(state: &mut SnowcoverState, fluxes: &EnergyFluxes, dt_seconds: Float) {
    state.cc_s_0 += fluxes.delta_q_0 * dt_seconds;
    if state.layer_count == LayerCount::Two {
        state.cc_s_l += (fluxes.delta_q - fluxes.delta_q_0) * dt_seconds;
    }
    state.cc_s = state.cc_s_0 + state.cc_s_l;
}

/// Converts any positive (post-thaw) cold content into melt, and
/// refreezes liquid water against any remaining negative cold content,
/// for a single layer. Returns the melt mass produced.
fn melt_refreeze_layer(cc: &mut Float, mass: &mut Float, h2o: &mut Float) -> Float {
    let mut melt = 0.0;
    if *cc > 0.0 {
        let excess = *cc;
        melt = (excess / lh_fus(FREEZE)).min(*mass);
        *mass -= melt;
        *h2o += melt;
        *cc = 0.0;
    } else if *h2o > 0.0 && *cc < 0.0 {
        let freeze = (-*cc / lh_fus(FREEZE)).min(*h2o);
        *h2o -= freeze;
        *mass += freeze;
        *cc = (*cc + freeze * lh_fus(FREEZE)).min(0.0);
    }
    melt
}

fn apply_melt_and_refreeze(state: &mut SnowcoverState) -> Float {
    let mut melt = melt_refreeze_layer(&mut state.cc_s_0, &mut state.m_s_0, &mut state.h2o);
    if state.layer_count == LayerCount::Two {
        melt += melt_refreeze_layer(&mut state.cc_s_l, &mut state.m_s_l, &mut state.h2o);
    }
    state.cc_s = state.cc_s_0 + state.cc_s_l;
    melt
}

fn drain_excess_water(state: &mut SnowcoverState, max_h2o_vol: Float) {
    let h2o_max = state.compute_h2o_max(max_h2o_vol);
    state.h2o_max = h2o_max;
    if state.h2o > h2o_max {
        state.ro_pred_sum += state.h2o - h2o_max;
        state.h2o = h2o_max;
    }
    state.h2o_sat = if h2o_max > 0.0 {
        (state.h2o / h2o_max).clamp(0.0, 1.0)
    } else {
        0.0
    };
}

fn accumulate_means(state: &mut SnowcoverState, fluxes: &EnergyFluxes, dt_hours: Float) {
    state.r_n_bar += fluxes.r_n * dt_hours;
    state.h_bar += fluxes.h * dt_hours;
    state.l_v_e_bar += fluxes.l_v_e * dt_hours;
    state.g_bar += fluxes.g * dt_hours;
    state.g_0_bar += fluxes.g_0 * dt_hours;
    state.m_bar += fluxes.m * dt_hours;
    state.delta_q_bar += fluxes.delta_q * dt_hours;
    state.delta_q_0_bar += fluxes.delta_q_0 * dt_hours;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SnowcoverState;

    fn state_with_snow() -> SnowcoverState {
        SnowcoverState::initial(
            2000.0, 0.01, 0.5, 300.0, FREEZE - 5.0, FREEZE - 5.0, 0.0, true, 2.0, 2.0, 0.5, false,
            0.25, 0.05,
        )
        .unwrap()
    }

    fn no_precip_forcing() -> SubstepForcing {
        SubstepForcing {
            net_solar: 0.0,
            incoming_thermal: 220.0,
            air_temp: 265.0,
            vapor_pressure: 280.0,
            wind_speed: 1.0,
            soil_temp: 272.0,
            sat_vp_air: 0.0,
            sat_vp_soil: 0.0,
            m_snow: 0.0,
            m_rain: 0.0,
            z_snow: 0.0,
            t_snow: 0.0,
            t_rain: 0.0,
            h2o_sat_snow: 0.0,
            precip_now: false,
        }
    }

    #[test]
    fn positive_latent_flux_condenses_mass_onto_surface() {
        let mut state = state_with_snow();
        let before = state.m_s_0;
        let fluxes = EnergyFluxes {
            l_v_e: 50.0,
            ..Default::default()
        };
        apply(&mut state, &fluxes, &no_precip_forcing(), 3600.0, 0.05).unwrap();
        assert!(state.m_s_0 > before);
    }

    #[test]
    fn negative_latent_flux_sublimates_mass_away() {
        let mut state = state_with_snow();
        let before = state.m_s_0;
        let fluxes = EnergyFluxes {
            l_v_e: -50.0,
            ..Default::default()
        };
        apply(&mut state, &fluxes, &no_precip_forcing(), 3600.0, 0.05).unwrap();
        assert!(state.m_s_0 < before);
    }

    #[test]
    fn fresh_snowfall_adds_mass_and_depth() {
        let mut state = state_with_snow();
        let before_mass = state.m_s_0;
        let mut forcing = no_precip_forcing();
        forcing.precip_now = true;
        forcing.m_snow = 2.0;
        forcing.z_snow = 0.02;
        forcing.t_snow = FREEZE - 10.0;
        apply(&mut state, &EnergyFluxes::default(), &forcing, 3600.0, 0.05).unwrap();
        assert!((state.m_s_0 - (before_mass + 2.0)).abs() < 1e-9);
    }

    #[test]
    fn rain_adds_to_liquid_water() {
        let mut state = state_with_snow();
        let mut forcing = no_precip_forcing();
        forcing.precip_now = true;
        forcing.m_rain = 1.5;
        forcing.t_rain = FREEZE + 1.0;
        apply(&mut state, &EnergyFluxes::default(), &forcing, 3600.0, 0.05).unwrap();
        assert!(state.h2o >= 0.0);
    }

    #[test]
    fn strong_positive_energy_input_produces_melt() {
        let mut state = state_with_snow();
        let fluxes = EnergyFluxes {
            delta_q: 5000.0,
            delta_q_0: 5000.0,
            ..Default::default()
        };
        apply(&mut state, &fluxes, &no_precip_forcing(), 3600.0, 0.05).unwrap();
        assert!(state.melt_sum > 0.0);
        assert!(state.h2o > 0.0);
    }

    #[test]
    fn liquid_water_above_capacity_drains_to_runoff() {
        let mut state = state_with_snow();
        state.h2o = 1_000_000.0;
        apply(&mut state, &EnergyFluxes::default(), &no_precip_forcing(), 3600.0, 0.05).unwrap();
        assert!(state.ro_pred_sum > 0.0);
        assert!(state.h2o <= state.h2o_max + 1e-6);
    }

    #[test]
    fn cold_content_never_goes_positive_after_melt() {
        let mut state = state_with_snow();
        let fluxes = EnergyFluxes {
            delta_q: 1.0e7,
            delta_q_0: 1.0e7,
            ..Default::default()
        };
        apply(&mut state, &fluxes, &no_precip_forcing(), 3600.0, 0.05).unwrap();
        assert!(state.cc_s_0 <= 1e-6);
    }

    #[test]
    fn time_accumulators_advance_by_the_substep_duration() {
        let mut state = state_with_snow();
        apply(&mut state, &EnergyFluxes::default(), &no_precip_forcing(), 1800.0, 0.05).unwrap();
        assert!((state.time_since_out - 0.5).abs() < 1e-9);
        assert!((state.current_time - 0.5).abs() < 1e-9);
    }
}
