//! Runs the built converters as a user would.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use test_utils::{
    cross_section_meta, horizontal_slice_meta, profile_matprops, profile_meta, temp_test_dir,
    write_json, write_npy,
};

fn run(bin: &str, args: &[&Path]) -> Output {
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run converter")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_cross_section_line_success() {
    let dir = temp_test_dir();
    let data = write_npy(dir.path(), "cross_data.bin", &[vec![1.1, 2.2], vec![3.3, 4.4]]);
    let meta = write_json(
        dir.path(),
        "cross_meta.json",
        &cross_section_meta("vs", &[0.0, 50.0], &[10.0, 20.0], &[100.0, 110.0]),
    );

    let output = run(env!("CARGO_BIN_EXE_ucvm-cross-section2csv-line"), &[&data, &meta]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    let csv = dir.path().join("cross_data.csv");
    assert!(out.starts_with(&format!("Writing CSV file: {}\n", csv.display())));
    assert!(out.contains("# CVM(abbr): cvmsi\n"));

    let text = fs::read_to_string(&csv).unwrap();
    assert!(text.ends_with("100.0,10.0,0.0,1.1\n100.0,10.0,50.0,3.3\n110.0,20.0,0.0,2.2\n110.0,20.0,50.0,4.4\n"));
}

#[test]
fn test_wrong_argument_count_is_usage_error() {
    let dir = temp_test_dir();
    let data = dir.path().join("vp_data.bin");
    let meta = dir.path().join("vp_meta.json");

    let output = run(env!("CARGO_BIN_EXE_ucvm-horizontal-slice2csv-all"), &[&data, &meta]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("expected 6 file arguments, got 2"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_no_arguments_is_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_ucvm1d2csv")).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unknown_property_fails_without_output() {
    let dir = temp_test_dir();
    let data = write_npy(dir.path(), "slice_data.bin", &[vec![1.0]]);
    let meta = write_json(
        dir.path(),
        "slice_meta.json",
        &horizontal_slice_meta("unknown_type", &[34.0], &[-118.0]),
    );

    let output = run(env!("CARGO_BIN_EXE_ucvm-horizontal-slice2csv"), &[&data, &meta]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown property kind: unknown_type"));
    assert!(!dir.path().join("slice_data.csv").exists());
}

#[test]
fn test_missing_input_file() {
    let dir = temp_test_dir();
    let data = dir.path().join("cross_data.bin");
    let meta = write_json(
        dir.path(),
        "cross_meta.json",
        &cross_section_meta("vp", &[0.0], &[10.0], &[100.0]),
    );

    let output = run(env!("CARGO_BIN_EXE_ucvm-cross-section2csv"), &[&data, &meta]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("cross_data.bin"));
}

#[test]
fn test_combined_cross_section() {
    let dir = temp_test_dir();
    let d = dir.path();
    let mut paths = Vec::new();
    for kind in ["vp", "vs", "density"] {
        paths.push(write_npy(d, &format!("cross_{}_data.bin", kind), &[vec![1.0, 2.0]]));
        paths.push(write_json(
            d,
            &format!("cross_{}_meta.json", kind),
            &cross_section_meta(kind, &[0.0], &[10.0, 20.0], &[100.0, 110.0]),
        ));
    }
    let args: Vec<&Path> = paths.iter().map(|p| p.as_path()).collect();

    let output = run(env!("CARGO_BIN_EXE_ucvm-cross-section2csv-all"), &args);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = fs::read_to_string(d.join("cross_all_data.csv")).unwrap();
    assert!(text.ends_with("100.0,10.0,0.0,1.0,1.0,1.0\n110.0,20.0,0.0,2.0,2.0,2.0\n"));
}

#[test]
fn test_ucvm1d_profile() {
    let dir = temp_test_dir();
    let data = write_json(
        dir.path(),
        "UCVM_1663883162439vertical_matprops.json",
        &profile_matprops(&[(1500.0, 500.0, 2000.0)]),
    );
    let meta = write_json(dir.path(), "UCVM_1663883162439vertical_meta.json", &profile_meta(&[0]));

    let output = run(env!("CARGO_BIN_EXE_ucvm1d2csv"), &[&data, &meta]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = fs::read_to_string(dir.path().join("UCVM1663883162439vertical.csv")).unwrap();
    assert!(text.contains("# Depth(m)  Vp(km/s)  Vs(km/s)  Density(kg/m^3)\n"));
    assert!(text.ends_with("0,1.5000,0.5000,2000.0000\n"));
}

#[test]
fn test_vertical_profile_length_mismatch() {
    let dir = temp_test_dir();
    let data = write_json(
        dir.path(),
        "v_matprops.json",
        &profile_matprops(&[(1500.0, 500.0, 2000.0)]),
    );
    let meta = write_json(dir.path(), "v_meta.json", &profile_meta(&[0, 50]));

    let output = run(env!("CARGO_BIN_EXE_ucvm-vertical-profile2csv"), &[&data, &meta]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("point count mismatch"));
    assert!(!dir.path().join("v_matprops.csv").exists());
}
