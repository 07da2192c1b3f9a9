use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("cci").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("cci"));
}

fn write_wide_csv(
    path: &Path,
    row: (&str, &str, &str, &str),
    years: std::ops::RangeInclusive<i32>,
) {
    let (country_name, country_code, indicator_name, indicator_code) = row;
    let mut s = String::new();
    s.push_str("\"Data Source\",\"World Development Indicators\",\n");
    s.push_str("\"Last Updated Date\",\"2023-12-18\",\n");
    s.push('\n');
    s.push_str("\"Country Name\",\"Country Code\",\"Indicator Name\",\"Indicator Code\"");
    for y in years.clone() {
        write!(s, ",\"{}\"", y).unwrap();
    }
    s.push_str(",\n");
    write!(
        s,
        "\"{}\",\"{}\",\"{}\",\"{}\"",
        country_name, country_code, indicator_name, indicator_code
    )
    .unwrap();
    for y in years {
        write!(s, ",{}", 1.0 + (y % 3) as f64).unwrap();
    }
    s.push_str(",\n");
    fs::write(path, s).unwrap();
}

#[test]
fn render_composes_figure_and_exports_csv() {
    let dir = tempfile::tempdir().unwrap();
    write_wide_csv(
        &dir.path().join("API_SP.POP.GROW_DS2_en_csv_v2.csv"),
        (
            "Angola",
            "AGO",
            "Population growth (annual %)",
            "SP.POP.GROW",
        ),
        1970..=1999,
    );
    write_wide_csv(
        &dir.path().join("API_AG.LND.FRST.K2_DS2_en_csv_v2.csv"),
        ("Angola", "AGO", "Forest area (sq. km)", "AG.LND.FRST.K2"),
        1985..=2019,
    );
    write_wide_csv(
        &dir.path().join("API_EN.ATM.NOXE.KT.CE_DS2_en_csv_v2.csv"),
        (
            "Angola",
            "AGO",
            "Nitrous oxide emissions (thousand metric tons of CO2 equivalent)",
            "EN.ATM.NOXE.KT.CE",
        ),
        1985..=2019,
    );
    let mut temps = String::from(
        "dt,AverageTemperature,AverageTemperatureUncertainty,City,Country,Latitude,Longitude\n",
    );
    for y in 1985..=2017 {
        writeln!(temps, "{}-06-01,22.5,0.3,Luanda,Angola,8.81S,13.23E", y).unwrap();
    }
    fs::write(dir.path().join("global_land_temperatures_city.csv"), temps).unwrap();

    let out = dir.path().join("figure.png");
    let export = dir.path().join("observations.csv");
    let mut cmd = Command::cargo_bin("cci").unwrap();
    cmd.args([
        "render",
        "--data-dir",
        dir.path().to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        "--width",
        "600",
        "--height",
        "600",
        "--export",
        export.to_str().unwrap(),
        "--stats",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("SP.POP.GROW"));

    assert!(fs::metadata(&out).unwrap().len() > 0);
    assert!(fs::metadata(&export).unwrap().len() > 0);
}

#[test]
fn render_fails_cleanly_when_inputs_are_missing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("figure.png");
    let mut cmd = Command::cargo_bin("cci").unwrap();
    cmd.args([
        "render",
        "--data-dir",
        dir.path().to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ]);
    cmd.assert().failure();
    assert!(!out.exists());
}
