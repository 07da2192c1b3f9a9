//! Per-indicator chart builders.
//!
//! Each builder is a config struct whose `Default` reproduces the canonical
//! Angola run: the fixed input file, indicator code, country, and year
//! bounds. `prepare()` performs the load/filter/coerce step without touching
//! the canvas (so the filtering invariants are testable on their own),
//! `draw()` renders prepared records into one grid cell, and `render()`
//! chains the two for standalone use.

pub mod emissions;
pub mod forest;
pub mod population;
pub mod temperature;

pub use emissions::EmissionsChart;
pub use forest::ForestChart;
pub use population::PopulationChart;
pub use temperature::TemperatureChart;

use crate::error::LoadError;
use crate::loader;
use crate::models::{Observation, TemperatureRecord};
use std::path::Path;

/// Default input file names (World Bank CSV exports plus the Kaggle
/// city-temperature series), resolved against the data directory.
pub const POPULATION_FILE: &str = "API_SP.POP.GROW_DS2_en_csv_v2.csv";
pub const TEMPERATURE_FILE: &str = "global_land_temperatures_city.csv";
pub const FOREST_FILE: &str = "API_AG.LND.FRST.K2_DS2_en_csv_v2.csv";
pub const EMISSIONS_FILE: &str = "API_EN.ATM.NOXE.KT.CE_DS2_en_csv_v2.csv";

/// Exclusive year bounds: a year is kept when `after < year < before`.
///
/// Each builder owns its own bounds value. The panels deliberately do not
/// share a constant: the temperature panel starts one year earlier than the
/// forest/emissions panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub after: i32,
    pub before: i32,
}

impl YearBounds {
    pub fn contains(&self, year: i32) -> bool {
        year > self.after && year < self.before
    }
}

/// How the population series is trimmed to the display window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlicePolicy {
    /// Positional trim that assumes the known row count and ordering of the
    /// canonical 1960-2022 export. Fragile by construction; kept as the
    /// default for output parity with the legacy run.
    Positional { skip_front: usize, skip_back: usize },
    /// Explicit bounds, the intended semantics of the positional trim.
    YearRange(YearBounds),
}

impl SlicePolicy {
    pub fn apply(&self, series: Vec<(i32, f64)>) -> Vec<(i32, f64)> {
        match *self {
            SlicePolicy::Positional {
                skip_front,
                skip_back,
            } => {
                let end = series.len().saturating_sub(skip_back);
                if skip_front >= end {
                    return Vec::new();
                }
                series[skip_front..end].to_vec()
            }
            SlicePolicy::YearRange(bounds) => series
                .into_iter()
                .filter(|(year, _)| bounds.contains(*year))
                .collect(),
        }
    }
}

/// The four builders in grid order. `Default` is the canonical run with all
/// inputs expected in the working directory.
#[derive(Debug, Clone, Default)]
pub struct PanelSet {
    pub population: PopulationChart,
    pub temperature: TemperatureChart,
    pub forest: ForestChart,
    pub emissions: EmissionsChart,
}

impl PanelSet {
    /// Canonical panels with all input files resolved against `data_dir`.
    pub fn with_data_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        let dir = data_dir.as_ref();
        let mut set = Self::default();
        set.population.source = dir.join(POPULATION_FILE);
        set.temperature.source = dir.join(TEMPERATURE_FILE);
        set.forest.source = dir.join(FOREST_FILE);
        set.emissions.source = dir.join(EMISSIONS_FILE);
        set
    }

    /// Run every builder's load/filter step. All inputs are read before any
    /// canvas exists, so a failure here aborts the run without touching the
    /// output file.
    pub fn prepare(&self) -> Result<PreparedPanels, LoadError> {
        Ok(PreparedPanels {
            population: self.population.prepare()?,
            temperature: self.temperature.prepare()?,
            forest: self.forest.prepare()?,
            emissions: self.emissions.prepare()?,
        })
    }

    /// Cleaned long-format observations from the three indicator exports,
    /// concatenated (for export and summary statistics).
    pub fn indicator_observations(&self) -> Result<Vec<Observation>, LoadError> {
        let mut out = Vec::new();
        for (source, codes, indicator) in [
            (
                &self.population.source,
                std::slice::from_ref(&self.population.country_code),
                self.population.indicator_code.as_str(),
            ),
            (
                &self.forest.source,
                std::slice::from_ref(&self.forest.country_code),
                self.forest.indicator_code.as_str(),
            ),
            (
                &self.emissions.source,
                std::slice::from_ref(&self.emissions.country_code),
                self.emissions.indicator_code.as_str(),
            ),
        ] {
            let (_, observations) = loader::load_observations(source, codes, indicator)?;
            out.extend(observations);
        }
        Ok(out)
    }
}

/// The filtered per-panel records, ready to draw.
#[derive(Debug, Clone)]
pub struct PreparedPanels {
    pub population: Vec<(i32, f64)>,
    pub temperature: Vec<TemperatureRecord>,
    pub forest: Vec<(i32, f64)>,
    pub emissions: Vec<(i32, f64)>,
}

/// Font sizes for one panel, derived from the cell height so the same
/// proportions hold at thumbnail and full 300-dpi scale.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PanelFonts {
    pub title: u32,
    pub axis: u32,
    pub tick: u32,
}

pub(crate) fn panel_fonts(cell_height: u32) -> PanelFonts {
    PanelFonts {
        title: (cell_height / 22).max(12),
        axis: (cell_height / 30).max(10),
        tick: (cell_height / 36).max(9),
    }
}

pub(crate) fn panel_margin(cell_height: u32) -> u32 {
    (cell_height / 60).max(8)
}

/// Pad a value range by 5% on both ends so series do not hug the frame;
/// degenerate ranges get a unit of breathing room.
pub(crate) fn pad_range(min: f64, max: f64) -> (f64, f64) {
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}
