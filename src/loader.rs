//! Tabular loading and reshaping.
//!
//! Two input shapes are supported:
//! - World-Bank-style **wide exports**: a short preamble, then a header row
//!   with four identity columns followed by one column per year.
//! - The city-level **land temperature series**: a plain delimited file with
//!   `dt`, `Country`, and `AverageTemperature` columns.
//!
//! Loading never mutates anything on disk; the only side effect is the read.

use crate::error::LoadError;
use crate::models::{self, IndicatorTable, Observation, TemperatureRecord, WideRow};
use chrono::{Datelike, NaiveDate};
use csv::ReaderBuilder;
use log::debug;
use std::fs::File;
use std::path::Path;

/// Metadata records before the header in a World Bank CSV export (the
/// data-source and last-updated lines). Blank separator lines never reach
/// the record count; the CSV parser drops them.
pub const PREAMBLE_ROWS: usize = 2;

const ID_COLUMNS: [&str; 4] = [
    "Country Name",
    "Country Code",
    "Indicator Name",
    "Indicator Code",
];

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a wide indicator export into an [`IndicatorTable`].
///
/// The first [`PREAMBLE_ROWS`] records are skipped, the next record is the
/// header. Every header cell after the four identity columns is taken as a
/// year label (empty trailing labels are ignored). Value cells that are
/// empty or fail numeric parsing are treated as missing.
pub fn load_indicator_table<P: AsRef<Path>>(path: P) -> Result<IndicatorTable, LoadError> {
    let path = path.as_ref();
    let file = open(path)?;
    // The preamble rows have fewer fields than the data rows.
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut records = rdr.records();
    for _ in 0..PREAMBLE_ROWS {
        if let Some(rec) = records.next() {
            rec?;
        }
    }
    let header = match records.next() {
        Some(rec) => rec?,
        None => {
            return Err(LoadError::Schema {
                path: path.to_path_buf(),
                column: ID_COLUMNS[0].to_string(),
            });
        }
    };

    let mut id_idx = [0usize; 4];
    for (slot, name) in id_idx.iter_mut().zip(ID_COLUMNS) {
        *slot = header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::Schema {
                path: path.to_path_buf(),
                column: name.to_string(),
            })?;
    }
    let id_max = *id_idx.iter().max().unwrap_or(&0);

    let year_cols: Vec<(usize, String)> = header
        .iter()
        .enumerate()
        .filter(|(i, h)| *i > id_max && !h.is_empty())
        .map(|(i, h)| (i, h.to_string()))
        .collect();
    let year_labels: Vec<String> = year_cols.iter().map(|(_, l)| l.clone()).collect();

    let mut rows = Vec::new();
    for rec in records {
        let rec = rec?;
        if rec.iter().all(|f| f.is_empty()) {
            continue;
        }
        let field = |i: usize| rec.get(i).unwrap_or("").to_string();
        let values = year_cols
            .iter()
            .map(|(i, _)| rec.get(*i).and_then(parse_cell))
            .collect();
        rows.push(WideRow {
            country_name: field(id_idx[0]),
            country_code: field(id_idx[1]),
            indicator_name: field(id_idx[2]),
            indicator_code: field(id_idx[3]),
            values,
        });
    }

    debug!(
        "loaded {} rows x {} year columns from {}",
        rows.len(),
        year_labels.len(),
        path.display()
    );
    Ok(IndicatorTable { year_labels, rows })
}

fn parse_cell(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok()
}

/// Load a wide export and produce the cleaned long-format observation set
/// for one indicator and a set of country codes.
///
/// Returns the full unfiltered table alongside the cleaned set: melted to
/// one record per (country, year) and with missing-value records dropped.
pub fn load_observations<P: AsRef<Path>>(
    path: P,
    country_codes: &[String],
    indicator_code: &str,
) -> Result<(IndicatorTable, Vec<Observation>), LoadError> {
    let table = load_indicator_table(path)?;

    let selected = IndicatorTable {
        year_labels: table.year_labels.clone(),
        rows: table
            .rows
            .iter()
            .filter(|r| r.indicator_code == indicator_code)
            .filter(|r| country_codes.iter().any(|c| c == &r.country_code))
            .cloned()
            .collect(),
    };
    let cleaned = models::clean(selected.melt());
    debug!(
        "{}: {} observations after filter+melt+clean",
        indicator_code,
        cleaned.len()
    );
    Ok((table, cleaned))
}

/// Parse the city-level temperature series, keeping rows for one country
/// that carry a temperature value.
///
/// Dates must be ISO `YYYY-MM-DD`; a malformed date or a non-numeric,
/// non-empty temperature cell is a [`LoadError::DataType`]. Year bounds and
/// ordering are left to the caller.
pub fn load_temperatures<P: AsRef<Path>>(
    path: P,
    country: &str,
) -> Result<Vec<TemperatureRecord>, LoadError> {
    let path = path.as_ref();
    let file = open(path)?;
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = rdr.headers()?.clone();
    let col = |name: &str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::Schema {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
    };
    let dt_idx = col("dt")?;
    let country_idx = col("Country")?;
    let temp_idx = col("AverageTemperature")?;

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        if rec.get(country_idx) != Some(country) {
            continue;
        }
        let raw_temp = rec.get(temp_idx).unwrap_or("").trim();
        if raw_temp.is_empty() {
            continue;
        }
        let avg_temp = raw_temp
            .parse::<f64>()
            .map_err(|_| LoadError::DataType {
                field: "AverageTemperature",
                value: raw_temp.to_string(),
            })?;
        let raw_date = rec.get(dt_idx).unwrap_or("").trim();
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|_| {
            LoadError::DataType {
                field: "dt",
                value: raw_date.to_string(),
            }
        })?;
        out.push(TemperatureRecord {
            country: country.to_string(),
            date,
            year: date.year(),
            avg_temp,
        });
    }
    debug!("{}: {} temperature rows for {}", path.display(), out.len(), country);
    Ok(out)
}

/// Coerce cleaned observations into a numeric `(year, value)` series.
///
/// The explicit parse step for year labels: a label that is not an integer
/// is a [`LoadError::DataType`]. Records without a value are skipped.
pub fn year_series(observations: &[Observation]) -> Result<Vec<(i32, f64)>, LoadError> {
    let mut out = Vec::with_capacity(observations.len());
    for o in observations {
        let Some(value) = o.value else { continue };
        let year = o
            .year
            .trim()
            .parse::<i32>()
            .map_err(|_| LoadError::DataType {
                field: "year",
                value: o.year.clone(),
            })?;
        out.push((year, value));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_series_coerces_labels() {
        let obs = vec![Observation {
            country_name: "Angola".into(),
            country_code: "AGO".into(),
            indicator_name: "x".into(),
            indicator_code: "X".into(),
            year: "1995".into(),
            value: Some(2.5),
        }];
        assert_eq!(year_series(&obs).unwrap(), vec![(1995, 2.5)]);
    }

    #[test]
    fn year_series_rejects_non_numeric_labels() {
        let obs = vec![Observation {
            country_name: "Angola".into(),
            country_code: "AGO".into(),
            indicator_name: "x".into(),
            indicator_code: "X".into(),
            year: "Unnamed: 68".into(),
            value: Some(2.5),
        }];
        assert!(matches!(
            year_series(&obs),
            Err(LoadError::DataType { field: "year", .. })
        ));
    }
}
