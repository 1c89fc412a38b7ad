mod common;

use std::fs;

use common::{TestWorkspace, stoqs_export, trim_command};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

const SCENARIO_A: &str = "time,depth,x,y,name,value\n\
t1,5,1,2,temp,10\n\
t1,5,1,2,sal,35\n\
t2,6,1,2,temp,11\n";

fn scenario_args() -> [&'static str; 5] {
    [
        "name",
        "--separator=,",
        "--value=value",
        "--common=time,depth,x,y",
        "--extra=",
    ]
}

#[test]
fn default_stoqs_layout_pivots_tab_separated_export() {
    let input = stoqs_export(&[
        ("2019-09-17 10:00:00", "5.0", "temperature", "12.1"),
        ("2019-09-17 10:00:00", "5.0", "salinity", "33.5"),
        ("2019-09-17 10:00:10", "6.0", "temperature", "12.0"),
        ("2019-09-17 10:00:10", "6.0", "salinity", "33.6"),
    ]);
    trim_command()
        .arg("name")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(
            "timevalue,depth,geom.x,geom.y,temperature,salinity,dorado\n\
             2019-09-17 10:00:00,5.0,-121.9,36.8,12.1,33.5\n\
             2019-09-17 10:00:10,6.0,-121.9,36.8,12.0,33.6\n",
        );
}

#[test]
fn missing_parameter_is_left_empty() {
    trim_command()
        .args(scenario_args())
        .write_stdin(SCENARIO_A)
        .assert()
        .success()
        .stdout("time,depth,x,y,temp,sal\nt1,5,1,2,10,35\nt2,6,1,2,11,\n");
}

#[test]
fn late_parameter_is_dropped_from_frozen_schema() {
    let input = "time,depth,x,y,name,value\n\
                 t1,5,1,2,temp,10\n\
                 t1,5,1,2,sal,35\n\
                 t2,6,1,2,temp,11\n\
                 t2,6,1,2,pressure,99\n";
    trim_command()
        .args(scenario_args())
        .write_stdin(input)
        .assert()
        .success()
        .stdout("time,depth,x,y,temp,sal\nt1,5,1,2,10,35\nt2,6,1,2,11,\n");
}

#[test]
fn blank_line_inside_block_does_not_split_it() {
    let input = "time,depth,x,y,name,value\n\
                 t1,5,1,2,temp,10\n\
                 \n\
                 t1,5,1,2,sal,35\n\
                 t2,6,1,2,temp,11\n";
    trim_command()
        .args(scenario_args())
        .write_stdin(input)
        .assert()
        .success()
        .stdout("time,depth,x,y,temp,sal\nt1,5,1,2,10,35\nt2,6,1,2,11,\n");
}

#[test]
fn short_line_is_fatal_with_syntax_status() {
    let input = "time,depth,x,y,name,value\n\
                 t1,5,1,2,temp,10\n\
                 t1,5,1,2,sal,35\n\
                 t2,6,1,2,temp,11\n\
                 t2,6,1\n\
                 t3,7,1,2,temp,12\n";
    let assert = trim_command()
        .args(scenario_args())
        .write_stdin(input)
        .assert()
        .failure()
        .code(3)
        .stderr(contains("Line #5 missing required field"));
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout, "time,depth,x,y,temp,sal\nt1,5,1,2,10,35\n");
}

#[test]
fn missing_name_column_prints_usage() {
    trim_command()
        .write_stdin(SCENARIO_A)
        .assert()
        .failure()
        .code(2)
        .stdout(contains("NAME_COLUMN"))
        .stderr(contains("missing required name column selector"));
}

#[test]
fn multi_character_separator_is_a_syntax_error() {
    trim_command()
        .args(["name", "--separator=ab"])
        .write_stdin(SCENARIO_A)
        .assert()
        .failure()
        .code(3)
        .stderr(contains("single character"));
}

#[test]
fn unknown_selector_is_a_syntax_error() {
    trim_command()
        .args(["standard_name", "--separator=,", "--value=value", "--extra="])
        .write_stdin(SCENARIO_A)
        .assert()
        .failure()
        .code(3)
        .stderr(contains("There is no field whose name ends with `standard_name'"));
}

#[test]
fn numeric_selector_out_of_range_is_a_syntax_error() {
    trim_command()
        .args(["6", "--separator=,", "--value=5", "--common=0", "--extra="])
        .write_stdin(SCENARIO_A)
        .assert()
        .failure()
        .code(3)
        .stderr(contains("Field number (6) out of range (0..5)"));
}

#[test]
fn escaped_separators_are_expanded() {
    let input = SCENARIO_A.replace(',', ";");
    trim_command()
        .args([
            "4",
            "--separator=\\x3b",
            "--output-sep=\\t",
            "--value=5",
            "--common=0,1",
            "--extra=",
        ])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("0\t1\ttemp\tsal\nt1\t5\t10\t35\nt2\t6\t11\t\n");
}

#[test]
fn environment_supplies_field_lists() {
    trim_command()
        .env("common", "time")
        .env("value", "value")
        .env("extra", "x")
        .args(["name", "--separator=,"])
        .write_stdin(SCENARIO_A)
        .assert()
        .success()
        .stdout("time,temp,sal,1\nt1,10,35\nt2,11,\n");
}

#[test]
fn flags_override_environment() {
    trim_command()
        .env("common", "time")
        .env("value", "value")
        .env("extra", "x")
        .args(["name", "--separator=,", "--common=time,depth", "--extra="])
        .write_stdin(SCENARIO_A)
        .assert()
        .success()
        .stdout("time,depth,temp,sal\nt1,5,10,35\nt2,6,11,\n");
}

#[test]
fn debug_reports_missing_data_ranges() {
    trim_command()
        .args(scenario_args())
        .arg("--debug")
        .write_stdin(SCENARIO_A)
        .assert()
        .success()
        .stderr(contains("Missing [sal] data in lines 4..4").and(contains("name[4]")));
}

#[test]
fn quiet_by_default() {
    trim_command()
        .args(scenario_args())
        .write_stdin(SCENARIO_A)
        .assert()
        .success()
        .stderr("");
}

#[test]
fn reads_and_writes_files() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("export.csv", SCENARIO_A);
    let output = workspace.path().join("trimmed.csv");
    trim_command()
        .args(scenario_args())
        .args([
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("");
    let contents = fs::read_to_string(&output).expect("read output");
    assert_eq!(contents, "time,depth,x,y,temp,sal\nt1,5,1,2,10,35\nt2,6,1,2,11,\n");
}

#[test]
fn missing_input_file_is_an_io_failure() {
    let workspace = TestWorkspace::new();
    let missing = workspace.path().join("absent.tsv");
    trim_command()
        .args(["name", "-i", missing.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Opening input file"));
}

#[test]
fn oversized_input_line_is_fatal() {
    let input = format!(
        "time,depth,x,y,name,value\nt1,5,1,2,temp,{}\n",
        "9".repeat(2500)
    );
    trim_command()
        .args(scenario_args())
        .write_stdin(input)
        .assert()
        .failure()
        .code(3)
        .stderr(contains("Line #2 longer than 2000 bytes"));
}
