use engine::config::{OutputMode, TstepInfo};
use engine::{advance_data_interval, AdvanceOutcome, AdvanceParams};
use snobal_error::CellId;
use snowcover::deltas::SubstepForcing;
use snowcover::state::{LayerCount, SnowcoverState};
use snowcover::InputRecord;
use thermo::constants::FREEZE;

fn params() -> AdvanceParams {
    AdvanceParams {
        max_z_s_0: 0.25,
        max_h2o_vol: 0.05,
    }
}

#[test]
fn fresh_snow_accumulates_without_runoff_and_splits_into_two_layers() {
    let mut state = SnowcoverState::initial(
        2000.0, 0.01, 0.0, 0.0, FREEZE, FREEZE, 0.0, true, 2.0, 2.0, 0.5, false, 0.25, 0.05,
    )
    .unwrap();
    let tstep_info = TstepInfo::standard(3600, OutputMode::Data);
    let input =
        InputRecord::new(0.0, 220.0, 263.16, 250.0, 1.0, 270.0, 1.0, 1.0, 100.0, 263.16).unwrap();

    let mut last_m_s = 0.0;
    let mut saw_one_layer = false;
    let mut saw_two_layers = false;
    for hour in 0..24 {
        advance_data_interval(
            &mut state,
            &input,
            &input,
            &tstep_info,
            params(),
            CellId(0),
            hour == 0,
            &mut |_| {},
        )
        .unwrap();
        assert!(state.m_s >= last_m_s, "mass should never decrease with no melt");
        last_m_s = state.m_s;
        saw_one_layer |= state.layer_count == LayerCount::One;
        saw_two_layers |= state.layer_count == LayerCount::Two;
    }

    assert_eq!(state.ro_pred_sum, 0.0);
    assert!(saw_one_layer, "pack should pass through a single-layer stage");
    assert!(saw_two_layers, "pack should split once z_s exceeds max_z_s_0");
}

#[test]
fn isothermal_melt_holds_surface_at_freezing_and_eventually_produces_runoff() {
    let mut state = SnowcoverState::initial(
        2000.0, 0.01, 0.5, 100.0, FREEZE, FREEZE, 0.0, true, 2.0, 2.0, 0.5, false, 0.25, 0.05,
    )
    .unwrap();
    let tstep_info = TstepInfo::standard(3600, OutputMode::Data);
    let input =
        InputRecord::new(400.0, 300.0, FREEZE + 5.0, 800.0, 2.0, FREEZE + 2.0, 0.0, 0.0, 0.0, FREEZE)
            .unwrap();

    let mut last_melt = 0.0;
    let mut saw_runoff = false;
    for hour in 0..10 {
        advance_data_interval(
            &mut state,
            &input,
            &input,
            &tstep_info,
            params(),
            CellId(0),
            hour == 0,
            &mut |_| {},
        )
        .unwrap();
        assert!(state.melt_sum >= last_melt);
        last_melt = state.melt_sum;
        assert!((state.t_s_0 - FREEZE).abs() < 1e-6, "surface should stay pinned at freezing while melting");
        saw_runoff |= state.ro_pred_sum > 0.0;
        if state.layer_count == LayerCount::Zero {
            break;
        }
    }

    assert!(saw_runoff, "sustained melt over a saturated pack should eventually drain");
}

#[test]
fn large_forcing_over_a_shallow_pack_forces_subdivision_and_changes_the_outcome() {
    let mut adaptive = SnowcoverState::initial(
        2000.0, 0.01, 0.05, 150.0, FREEZE - 1.0, FREEZE - 1.0, 0.0, true, 2.0, 2.0, 0.5, false,
        0.25, 0.05,
    )
    .unwrap();
    let tstep_info = TstepInfo::standard(3600, OutputMode::Data);
    let input = InputRecord::new(900.0, 320.0, FREEZE + 3.0, 900.0, 3.0, FREEZE + 1.0, 0.0, 0.0, 0.0, FREEZE)
        .unwrap();

    let outcome = advance_data_interval(
        &mut adaptive,
        &input,
        &input,
        &tstep_info,
        params(),
        CellId(0),
        true,
        &mut |_| {},
    )
    .unwrap();
    assert!(matches!(
        outcome,
        AdvanceOutcome::Accepted | AdvanceOutcome::AcceptedWithWarning(_)
    ));

    let mut naive = SnowcoverState::initial(
        2000.0, 0.01, 0.05, 150.0, FREEZE - 1.0, FREEZE - 1.0, 0.0, true, 2.0, 2.0, 0.5, false,
        0.25, 0.05,
    )
    .unwrap();
    let delta = snowcover::deltas::LevelDelta::compute(&input, &input, 1);
    let forcing = SubstepForcing::at_step(&input, &delta, 0).unwrap();
    let fluxes = snowcover::energy::compute(&naive, &forcing).unwrap();
    snowcover::mass::apply(&mut naive, &fluxes, &forcing, 3600.0, 0.05).unwrap();
    snowcover::layers::rebuild(&mut naive, 0.25, 0.05).unwrap();

    let relative_diff = (adaptive.m_s - naive.m_s).abs() / naive.m_s.max(1e-9);
    assert!(
        relative_diff > 0.01,
        "adaptive refinement should diverge from a single unrefined step by more than 1%, got {relative_diff}"
    );
}

#[test]
fn rain_on_cold_snow_refreezes_without_producing_free_water() {
    let mut state = SnowcoverState::initial(
        2000.0, 0.01, 1.0, 100.0, FREEZE - 10.0, FREEZE - 10.0, 0.0, true, 2.0, 2.0, 0.5, false,
        0.25, 0.05,
    )
    .unwrap();
    let cc_before = state.cc_s;
    let m_s_before = state.m_s;

    let tstep_info = TstepInfo::standard(3600, OutputMode::Data);
    let input = InputRecord::new(0.0, 220.0, FREEZE - 8.0, 400.0, 1.0, FREEZE - 5.0, 2.0, 0.0, 0.0, 275.0)
        .unwrap();

    advance_data_interval(
        &mut state,
        &input,
        &input,
        &tstep_info,
        params(),
        CellId(0),
        true,
        &mut |_| {},
    )
    .unwrap();

    assert_eq!(state.h2o, 0.0, "rain refreezing into cold snow should not leave free water");
    assert!(state.cc_s.abs() < cc_before.abs(), "refreezing rain should warm the pack, shrinking |cc_s|");
    assert!((state.m_s - (m_s_before + 2.0)).abs() < 1e-6);
}

#[test]
fn mixed_precipitation_adds_both_a_snow_and_a_rain_fraction() {
    let mut state = SnowcoverState::initial(
        2000.0, 0.01, 0.2, 150.0, FREEZE - 1.0, FREEZE - 1.0, 0.0, true, 2.0, 2.0, 0.5, false,
        0.25, 0.05,
    )
    .unwrap();
    let m_s_before = state.m_s;

    let tstep_info = TstepInfo::standard(3600, OutputMode::Data);
    let input = InputRecord::new(0.0, 220.0, FREEZE - 1.0, 500.0, 1.0, FREEZE, 1.0, 0.5, 150.0, 274.0)
        .unwrap();
    assert_eq!(input.t_snow(), FREEZE);
    assert_eq!(input.h2o_sat_snow(), 1.0);
    assert_eq!(input.t_rain(), 274.0);

    advance_data_interval(
        &mut state,
        &input,
        &input,
        &tstep_info,
        params(),
        CellId(0),
        true,
        &mut |_| {},
    )
    .unwrap();

    assert!((state.m_s - (m_s_before + 1.0)).abs() < 1e-6);
}
