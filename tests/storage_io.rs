use cci_rs::models::Observation;
use cci_rs::storage;
use std::fs;

fn sample(n: usize) -> Vec<Observation> {
    (0..n)
        .map(|i| Observation {
            country_name: "Angola".into(),
            country_code: "AGO".into(),
            indicator_name: "Forest area (sq. km)".into(),
            indicator_code: "AG.LND.FRST.K2".into(),
            year: (2000 + i as i32).to_string(),
            value: Some(100.0 + i as f64),
        })
        .collect()
}

#[test]
fn save_csv_and_json() {
    let rows = sample(3);
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("obs.csv");
    storage::save_csv(&rows, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("country_name,country_code,"));
    assert_eq!(csv_txt.lines().count(), 1 + rows.len());

    let json_path = dir.path().join("obs.json");
    storage::save_json(&rows, &json_path).unwrap();
    let json_txt = fs::read_to_string(&json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json_txt).unwrap();
    assert_eq!(v.as_array().unwrap().len(), rows.len());
}

#[test]
fn csv_round_trips_missing_values_as_empty_cells() {
    let mut rows = sample(2);
    rows[1].value = None;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("obs.csv");
    storage::save_csv(&rows, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get(5), Some("100.0"));
    assert_eq!(records[1].get(5), Some(""));
}
