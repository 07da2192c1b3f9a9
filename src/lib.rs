//! cci-rs
//!
//! A lightweight Rust library for loading, reshaping, and visualizing
//! World Bank climate indicator data. Pairs with the `cci` CLI.
//!
//! ### Features
//! - Parse World-Bank-style wide CSV exports (one column per year) and melt
//!   them into tidy long-format observations
//! - Parse the city-level land temperature time series
//! - Compose a four-panel climate infographic (population growth, average
//!   temperature, forest area, nitrous oxide emissions) as PNG or SVG
//! - Save cleaned observations as CSV or JSON
//! - Quick summary statistics (min, max, mean, median)
//!
//! ### Example
//! ```no_run
//! use cci_rs::charts::PanelSet;
//! use cci_rs::viz::Infographic;
//!
//! let panels = PanelSet::default();
//! let figure = Infographic::default();
//! figure.compose(&panels)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod charts;
pub mod error;
pub mod loader;
pub mod models;
pub mod stats;
pub mod storage;
pub mod viz;

pub use error::LoadError;
pub use models::{IndicatorTable, Observation, TemperatureRecord};
pub use viz::Infographic;
