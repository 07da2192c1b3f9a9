use serde::{Deserialize, Serialize};

/// One row of a World-Bank-style wide export: identity columns plus one
/// value cell per year column. Cells line up positionally with
/// [`IndicatorTable::year_labels`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WideRow {
    pub country_name: String,
    pub country_code: String,
    pub indicator_name: String,
    pub indicator_code: String,
    pub values: Vec<Option<f64>>,
}

/// A wide indicator table as loaded from disk (rows keyed by country and
/// indicator, one column per year). Immutable after load; downstream steps
/// only filter and reshape copies of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndicatorTable {
    /// Year column labels in file order (e.g. `"1960"`, `"1961"`, ...).
    pub year_labels: Vec<String>,
    pub rows: Vec<WideRow>,
}

impl IndicatorTable {
    /// Rows matching the given indicator code.
    pub fn for_indicator(&self, indicator_code: &str) -> Vec<&WideRow> {
        self.rows
            .iter()
            .filter(|r| r.indicator_code == indicator_code)
            .collect()
    }

    /// Unpivot year columns into one [`Observation`] per (row, year) pair,
    /// keeping the raw year label and the possibly-missing value.
    pub fn melt(&self) -> Vec<Observation> {
        let mut out = Vec::with_capacity(self.rows.len() * self.year_labels.len());
        for row in &self.rows {
            for (label, value) in self.year_labels.iter().zip(row.values.iter()) {
                out.push(Observation {
                    country_name: row.country_name.clone(),
                    country_code: row.country_code.clone(),
                    indicator_name: row.indicator_name.clone(),
                    indicator_code: row.indicator_code.clone(),
                    year: label.clone(),
                    value: *value,
                });
            }
        }
        out
    }
}

/// Tidy structure used by this crate (one row = one observation).
///
/// `year` keeps the original column label; builders coerce it to an integer
/// via [`crate::loader::year_series`] when they need a numeric axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub country_name: String,
    pub country_code: String,
    pub indicator_name: String,
    pub indicator_code: String,
    pub year: String,
    pub value: Option<f64>,
}

impl Observation {
    /// A record is complete when it carries a value.
    pub fn is_complete(&self) -> bool {
        self.value.is_some()
    }
}

/// Drop observations with a missing value. Idempotent: cleaning an already
/// clean set returns it unchanged.
pub fn clean(observations: Vec<Observation>) -> Vec<Observation> {
    observations.into_iter().filter(Observation::is_complete).collect()
}

/// One parsed row of the city-level land temperature series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemperatureRecord {
    pub country: String,
    pub date: chrono::NaiveDate,
    /// Year derived from `date`.
    pub year: i32,
    pub avg_temp: f64,
}

/// Grouping key used in stats and export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub indicator_code: String,
    pub country_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: Vec<Option<f64>>) -> WideRow {
        WideRow {
            country_name: "Angola".into(),
            country_code: "AGO".into(),
            indicator_name: "Population growth (annual %)".into(),
            indicator_code: "SP.POP.GROW".into(),
            values,
        }
    }

    #[test]
    fn melt_emits_one_record_per_year_column() {
        let table = IndicatorTable {
            year_labels: vec!["1990".into(), "1991".into(), "1992".into()],
            rows: vec![row(vec![Some(1.0), None, Some(3.0)])],
        };
        let long = table.melt();
        assert_eq!(long.len(), 3);
        assert_eq!(long[0].year, "1990");
        assert_eq!(long[0].value, Some(1.0));
        assert_eq!(long[1].value, None);
        assert_eq!(long[2].year, "1992");
        assert_eq!(long[2].value, Some(3.0));
    }

    #[test]
    fn clean_drops_missing_and_is_idempotent() {
        let table = IndicatorTable {
            year_labels: vec!["1990".into(), "1991".into()],
            rows: vec![row(vec![Some(1.0), None])],
        };
        let cleaned = clean(table.melt());
        assert_eq!(cleaned.len(), 1);
        assert!(cleaned.iter().all(Observation::is_complete));
        let again = clean(cleaned.clone());
        assert_eq!(again, cleaned);
    }
}
