use snobal_run::cli::{Mode, SimOptions};
use snobal_run::driver;
use std::io::Write;

fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "snobal-test-{name}-{:?}",
        std::thread::current().id()
    ));
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

fn base_options(input_file: String, precip_file: String) -> SimOptions {
    SimOptions {
        input_file,
        precip_file,
        output: None,
        data_tstep_seconds: 3600,
        max_h2o_vol: 0.05,
        max_z_s_0: 0.25,
        stop_no_snow: false,
        celsius: false,
        relative_heights: false,
        mode: Mode::Data,
        z_u: 2.0,
        z_t: 2.0,
        z_0: 0.01,
        z_g: 0.5,
        elevation: 2000.0,
        init_z_s: 0.3,
        init_rho: 150.0,
        init_t_s_0: 273.16,
        init_t_s: 273.16,
        init_h2o_sat: 0.0,
        normal_threshold: None,
        medium_threshold: None,
        small_threshold: None,
        quiet: true,
    }
}

#[test]
fn point_mode_writes_one_header_and_one_row_per_data_interval() {
    let continuous = "400.0 300.0 280.0 900.0 2.0 276.0\n\
                       400.0 300.0 280.0 900.0 2.0 276.0\n\
                       400.0 300.0 280.0 900.0 2.0 276.0\n";
    let precip = "0.0 0.0 0.0 0.0 0.0\n1.0 0.0 0.0 0.0 0.0\n2.0 0.0 0.0 0.0 0.0\n";
    let input_path = write_temp("continuous-a", continuous);
    let precip_path = write_temp("precip-a", precip);

    let options = base_options(
        input_path.to_str().unwrap().to_string(),
        precip_path.to_str().unwrap().to_string(),
    );

    let mut out = Vec::new();
    driver::run(&options, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines[0].starts_with("time_hrs,R_n_bar"));
    assert_eq!(lines.len(), 3, "two data intervals should emit a header plus two rows");

    std::fs::remove_file(&input_path).ok();
    std::fs::remove_file(&precip_path).ok();
}

#[test]
fn complete_ablation_with_stop_no_snow_halts_before_the_forcing_series_ends() {
    let continuous = "900.0 320.0 290.0 1200.0 3.0 285.0\n\
                       900.0 320.0 290.0 1200.0 3.0 285.0\n\
                       900.0 320.0 290.0 1200.0 3.0 285.0\n\
                       900.0 320.0 290.0 1200.0 3.0 285.0\n\
                       900.0 320.0 290.0 1200.0 3.0 285.0\n\
                       900.0 320.0 290.0 1200.0 3.0 285.0\n";
    let precip = "0.0 0.0 0.0 0.0 0.0\n\
                  1.0 0.0 0.0 0.0 0.0\n\
                  2.0 0.0 0.0 0.0 0.0\n\
                  3.0 0.0 0.0 0.0 0.0\n\
                  4.0 0.0 0.0 0.0 0.0\n\
                  5.0 0.0 0.0 0.0 0.0\n";
    let input_path = write_temp("continuous-b", continuous);
    let precip_path = write_temp("precip-b", precip);

    let mut options = base_options(
        input_path.to_str().unwrap().to_string(),
        precip_path.to_str().unwrap().to_string(),
    );
    options.init_z_s = 0.05;
    options.init_rho = 100.0;
    options.stop_no_snow = true;

    let mut out = Vec::new();
    driver::run(&options, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let row_count = text.lines().count() - 1;

    assert!(
        row_count < 5,
        "a pack this thin under strong melting forcing should ablate before the series ends, got {row_count} rows"
    );

    std::fs::remove_file(&input_path).ok();
    std::fs::remove_file(&precip_path).ok();
}
