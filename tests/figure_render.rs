use cci_rs::charts::{self, PanelSet};
use cci_rs::viz::Infographic;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

fn write_wide_csv(
    path: &Path,
    row: (&str, &str, &str, &str),
    years: std::ops::RangeInclusive<i32>,
    value: impl Fn(i32) -> Option<f64>,
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
    for y in years.clone() {
        match value(y) {
            Some(v) => write!(s, ",{}", v).unwrap(),
            None => s.push(','),
        }
    }
    s.push_str(",\n");
    fs::write(path, s).unwrap();
}

/// Synthesize all four canonical inputs in `dir`:
/// - population: 30 yearly points (1970-1999)
/// - temperature: one mid-year reading per year 1985-2017
/// - forest + emissions: 35 yearly points (1985-2019)
fn write_fixtures(dir: &Path) {
    write_wide_csv(
        &dir.join(charts::POPULATION_FILE),
        (
            "Angola",
            "AGO",
            "Population growth (annual %)",
            "SP.POP.GROW",
        ),
        1970..=1999,
        |y| Some(2.5 + (y % 7) as f64 / 10.0),
    );
    write_wide_csv(
        &dir.join(charts::FOREST_FILE),
        ("Angola", "AGO", "Forest area (sq. km)", "AG.LND.FRST.K2"),
        1985..=2019,
        |y| Some(600_000.0 - (y - 1985) as f64 * 1200.0),
    );
    write_wide_csv(
        &dir.join(charts::EMISSIONS_FILE),
        (
            "Angola",
            "AGO",
            "Nitrous oxide emissions (thousand metric tons of CO2 equivalent)",
            "EN.ATM.NOXE.KT.CE",
        ),
        1985..=2019,
        |y| Some(9000.0 + (y - 1985) as f64 * 150.0),
    );

    let mut temps = String::from(
        "dt,AverageTemperature,AverageTemperatureUncertainty,City,Country,Latitude,Longitude\n",
    );
    for y in 1985..=2017 {
        writeln!(
            temps,
            "{}-06-01,{},0.3,Luanda,Angola,8.81S,13.23E",
            y,
            21.0 + (y % 5) as f64 / 2.0
        )
        .unwrap();
    }
    fs::write(dir.join(charts::TEMPERATURE_FILE), temps).unwrap();
}

#[test]
fn prepared_counts_match_hand_computed_filters() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let panels = PanelSet::with_data_dir(dir.path());
    let prepared = panels.prepare().unwrap();

    // 30 population points minus the [20:-2] trim.
    assert_eq!(prepared.population.len(), 8);
    // Years 1990..=2015 of the 1985..=2017 temperature fixture.
    assert_eq!(prepared.temperature.len(), 26);
    // Years 1991..=2015 of the 1985..=2019 wide fixtures.
    assert_eq!(prepared.forest.len(), 25);
    assert_eq!(prepared.emissions.len(), 25);
}

#[test]
fn compose_writes_a_png() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let panels = PanelSet::with_data_dir(dir.path());
    let out = dir.path().join("infographic.png");
    let figure = Infographic {
        width: 900,
        height: 900,
        out_path: out.clone(),
        ..Default::default()
    };
    figure.compose(&panels).unwrap();

    let meta = fs::metadata(&out).expect("file created");
    assert!(meta.len() > 0, "png has content");
}

#[test]
fn compose_writes_an_svg() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let panels = PanelSet::with_data_dir(dir.path());
    let out = dir.path().join("infographic.svg");
    let figure = Infographic {
        width: 800,
        height: 800,
        out_path: out.clone(),
        ..Default::default()
    };
    figure.compose(&panels).unwrap();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn missing_input_aborts_without_an_output_file() {
    let dir = tempfile::tempdir().unwrap();
    // No fixtures written
    let panels = PanelSet::with_data_dir(dir.path());
    let out = dir.path().join("never.png");
    let figure = Infographic {
        width: 600,
        height: 600,
        out_path: out.clone(),
        ..Default::default()
    };
    assert!(figure.compose(&panels).is_err());
    assert!(!out.exists(), "failed run must not leave an image behind");
}

#[test]
fn single_panel_render_produces_a_file() {
    use plotters::prelude::*;

    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let panels = PanelSet::with_data_dir(dir.path());

    let out = dir.path().join("panel.svg");
    {
        let root = SVGBackend::new(&out, (640, 480)).into_drawing_area();
        root.fill(&WHITE).unwrap();
        panels
            .forest
            .render(&root, &num_format::Locale::en)
            .unwrap();
        root.present().unwrap();
    }
    assert!(fs::metadata(&out).unwrap().len() > 0);
}
