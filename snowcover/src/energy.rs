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
//! Snowpack energy balance calculations.
use crate::deltas::SubstepForcing;
use crate::state::{LayerCount, SnowcoverState};
use crate::Float;
use snobal_error::{ErrorHandling, SnobalError};
use thermo::conduction::{efcon, ssxfr};
use thermo::constants::{CP_ICE, CP_WATER, FREEZE, SNOW_EMISSIVITY, STEFAN_BOLTZMANN};
use thermo::heat_capacity::{pressure_at_elevation, snow_conductivity};
use thermo::turbulent::hle1;
use thermo::vapor::{lh_fus, sati};

pub(crate) const MODULE_NAME: &str = "snowcover::energy";

struct Module;
impl ErrorHandling for Module {
    fn module_name() -> &'static str {
        MODULE_NAME
    }
}

/// The instantaneous surface and soil-interface fluxes for one
/// substep, and their sums into the surface and bulk layers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyFluxes {
    /// Net radiation, W/m^2.
    pub r_n: Float,
    /// Sensible heat flux, W/m^2.
    pub h: Float,
    /// Latent heat flux, W/m^2.
    pub l_v_e: Float,
    /// Friction velocity used for `h`/`l_v_e`, m/s.
    pub u_star: Float,
    /// Soil/substrate heat flux into the pack as a whole, W/m^2.
    pub g: Float,
    /// Soil/substrate heat flux at the surface-layer interface, W/m^2.
    pub g_0: Float,
    /// Precipitation-advected heat into the pack, W/m^2.
    pub m: Float,
    /// Precipitation-advected heat into the surface layer, W/m^2.
    pub m_0: Float,
    /// Net energy flux into the whole pack, W/m^2.
    pub delta_q: Float,
    /// Net energy flux into the surface layer, W/m^2.
    pub delta_q_0: Float,
}

/// Computes the instantaneous energy balance (§4.4). Returns all-zero
/// fluxes when `layer_count = Zero` — there is no pack to balance.
pub fn compute(state: &SnowcoverState, forcing: &SubstepForcing) -> Result<EnergyFluxes, SnobalError> {
    if state.layer_count == LayerCount::Zero {
        return Ok(EnergyFluxes::default());
    }

    let pressure = pressure_at_elevation(state.elevation);

    let r_n = forcing.net_solar
        + (forcing.incoming_thermal - STEFAN_BOLTZMANN * state.t_s_0.powi(4) * SNOW_EMISSIVITY);

    // The snow surface is assumed to sit at saturation vapor pressure
    // over ice at its own temperature, scaled by how saturated that
    // surface currently is: full saturation except for the brief
    // window where cold, dry new snow hasn't yet equilibrated.
    let e_s = sati(state.t_s_0)? * h2o_sat_snow_surface(forcing);
    let turbulent = hle1(
        state.z_u,
        state.z_t,
        state.z_0,
        forcing.wind_speed,
        forcing.air_temp,
        state.t_s_0,
        forcing.vapor_pressure,
        e_s,
        pressure,
    )?;

    let (g, g_0) = soil_flux(state, forcing, pressure)?;
    let (m, m_0) = precip_advected_heat(state, forcing);

    let delta_q = r_n + turbulent.sensible_heat + turbulent.latent_heat + g + m;
    let delta_q_0 = r_n + turbulent.sensible_heat + turbulent.latent_heat + g_0 + m_0;

    Ok(EnergyFluxes {
        r_n,
        h: turbulent.sensible_heat,
        l_v_e: turbulent.latent_heat,
        u_star: turbulent.u_star,
        g,
        g_0,
        m,
        m_0,
        delta_q,
        delta_q_0,
    })
}

/// The saturation fraction assumed for the snow surface itself
/// (`h2o_sat_snow_surface`, §4.4 step 2), as opposed to
/// `forcing.h2o_sat_snow`, which only classifies the wetness of
/// precipitation *arriving* this substep. Outside of an active cold,
/// dry snowfall, the established surface is assumed fully saturated
/// over ice; during one, the same classification that governs the new
/// snow's own initial wetness also governs the surface `hle1` sees,
/// since the new snow has not yet had time to equilibrate.
fn h2o_sat_snow_surface(forcing: &SubstepForcing) -> Float {
    if forcing.precip_now {
        forcing.h2o_sat_snow
    } else {
        1.0
    }
}

fn soil_flux(
    state: &SnowcoverState,
    forcing: &SubstepForcing,
    pressure: Float,
) -> Result<(Float, Float), SnobalError> {
    let k_0 = efcon(snow_conductivity(state.rho), state.t_s_0, pressure)?;

    match state.layer_count {
        LayerCount::Zero => Ok((0.0, 0.0)),
        LayerCount::One => {
            let g_0 = ssxfr(
                k_0,
                k_0,
                forcing.soil_temp,
                state.t_s_0,
                state.z_g,
                state.z_s_0,
            );
            Ok((g_0, g_0))
        }
        LayerCount::Two => {
            let k_l = efcon(snow_conductivity(state.rho), state.t_s_l, pressure)?;
            let g = ssxfr(
                k_l,
                k_l,
                forcing.soil_temp,
                state.t_s_l,
                state.z_g,
                state.z_s_l,
            );
            let g_0 = ssxfr(k_0, k_l, state.t_s_0, state.t_s_l, state.z_s_0, state.z_s_l);
            Ok((g, g_0))
        }
    }
}

/// Enthalpy carried into the pack by precipitation relative to the
/// surface temperature, plus the latent heat released by the fraction
/// of rain that freezes on contact with a surface below freezing.
fn precip_advected_heat(state: &SnowcoverState, forcing: &SubstepForcing) -> (Float, Float) {
    if !forcing.precip_now {
        return (0.0, 0.0);
    }
    let snow_heat = forcing.m_snow * CP_ICE * (forcing.t_snow - state.t_s_0);
    let rain_heat = forcing.m_rain * CP_WATER * (forcing.t_rain - state.t_s_0);

    let freeze_release = if state.t_s_0 < FREEZE {
        forcing.m_rain * lh_fus(state.t_s_0)
    } else {
        0.0
    };

    let m = snow_heat + rain_heat + freeze_release;
    (m, m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SnowcoverState;

    fn two_layer_state() -> SnowcoverState {
        SnowcoverState::initial(
            2000.0, 0.01, 1.0, 300.0, FREEZE - 5.0, FREEZE - 5.0, 0.0, true, 2.0, 2.0, 0.5, false,
            0.25, 0.05,
        )
        .unwrap()
    }

    fn forcing(net_solar: Float, air_temp: Float) -> SubstepForcing {
        SubstepForcing {
            net_solar,
            incoming_thermal: 220.0,
            air_temp,
            vapor_pressure: 300.0,
            wind_speed: 2.0,
            soil_temp: 272.0,
            sat_vp_air: sati(air_temp).unwrap(),
            sat_vp_soil: sati(272.0).unwrap(),
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
    fn no_snow_gives_zero_fluxes() {
        let state = SnowcoverState::initial(
            2000.0, 0.01, 0.0, 0.0, FREEZE, FREEZE, 0.0, true, 2.0, 2.0, 0.5, false, 0.25, 0.05,
        )
        .unwrap();
        let fluxes = compute(&state, &forcing(400.0, 270.0)).unwrap();
        assert_eq!(fluxes, EnergyFluxes::default());
    }

    #[test]
    fn strong_solar_forcing_gives_positive_net_radiation() {
        let state = two_layer_state();
        let fluxes = compute(&state, &forcing(600.0, 270.0)).unwrap();
        assert!(fluxes.r_n > 0.0);
    }

    #[test]
    fn warm_precipitation_on_cold_surface_advects_heat_in() {
        let state = two_layer_state();
        let mut wet = forcing(0.0, 270.0);
        wet.precip_now = true;
        wet.m_rain = 1.0;
        wet.t_rain = FREEZE + 2.0;
        let fluxes = compute(&state, &wet).unwrap();
        assert!(fluxes.m > 0.0);
    }

    #[test]
    fn h2o_sat_snow_surface_defaults_to_fully_saturated_without_precip() {
        let f = forcing(0.0, 270.0);
        assert_eq!(h2o_sat_snow_surface(&f), 1.0);
    }

    #[test]
    fn dry_new_snow_scales_down_the_surface_vapor_pressure() {
        let state = two_layer_state();
        let mut dry_snow = forcing(0.0, 270.0);
        dry_snow.precip_now = true;
        dry_snow.m_snow = 1.0;
        dry_snow.t_snow = FREEZE - 10.0;
        dry_snow.h2o_sat_snow = 0.0;
        assert_eq!(h2o_sat_snow_surface(&dry_snow), 0.0);

        let dry_fluxes = compute(&state, &dry_snow).unwrap();

        let mut saturated = dry_snow;
        saturated.h2o_sat_snow = 1.0;
        let saturated_fluxes = compute(&state, &saturated).unwrap();

        assert_ne!(dry_fluxes.l_v_e, saturated_fluxes.l_v_e);
    }
}
