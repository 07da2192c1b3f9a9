//! Average temperature panel (grid cell 0,1).
//!
//! This panel does not go through the wide-table reshaper: the temperature
//! series is a plain per-(city, month) file loaded directly.

use super::{PanelFonts, YearBounds, pad_range, panel_fonts, panel_margin};
use crate::error::LoadError;
use crate::loader;
use crate::models::TemperatureRecord;
use crate::viz::util::{fmt_tick, fractional_year, left_label_width_px, office_color};
use anyhow::{Result, anyhow, bail};
use num_format::Locale;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use std::path::PathBuf;

/// Monthly average land temperature, line plot against the date axis.
#[derive(Debug, Clone)]
pub struct TemperatureChart {
    pub source: PathBuf,
    pub country: String,
    /// Kept years, exclusive on both ends. Note: starts one year earlier
    /// than the forest/emissions panels.
    pub bounds: YearBounds,
}

impl Default for TemperatureChart {
    fn default() -> Self {
        Self {
            source: PathBuf::from(super::TEMPERATURE_FILE),
            country: "Angola".into(),
            bounds: YearBounds {
                after: 1989,
                before: 2016,
            },
        }
    }
}

impl TemperatureChart {
    /// Load the country's rows, apply the year bounds, sort by date.
    pub fn prepare(&self) -> Result<Vec<TemperatureRecord>, LoadError> {
        let mut records = loader::load_temperatures(&self.source, &self.country)?;
        records.retain(|r| self.bounds.contains(r.year));
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    pub fn render<DB>(&self, area: &DrawingArea<DB, Shift>, locale: &'static Locale) -> Result<()>
    where
        DB: DrawingBackend,
    {
        let records = self.prepare()?;
        self.draw(area, &records, locale)
    }

    pub fn draw<DB>(
        &self,
        area: &DrawingArea<DB, Shift>,
        records: &[TemperatureRecord],
        locale: &'static Locale,
    ) -> Result<()>
    where
        DB: DrawingBackend,
    {
        if records.is_empty() {
            bail!("{}: no temperature rows to plot", self.country);
        }
        let (_, cell_h) = area.dim_in_pixel();
        let fonts: PanelFonts = panel_fonts(cell_h);

        // Dates ride on a fractional-year f64 axis labeled with whole years.
        let xs: Vec<f64> = records.iter().map(|r| fractional_year(r.date)).collect();
        let (mut x_min, mut x_max) = (
            xs.iter().cloned().fold(f64::INFINITY, f64::min),
            xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        );
        if (x_max - x_min).abs() < f64::EPSILON {
            x_min -= 0.5;
            x_max += 0.5;
        }
        let (y_min, y_max) = pad_range(
            records.iter().map(|r| r.avg_temp).fold(f64::INFINITY, f64::min),
            records
                .iter()
                .map(|r| r.avg_temp)
                .fold(f64::NEG_INFINITY, f64::max),
        );
        let label_w = left_label_width_px(y_min, y_max, 10, fonts.tick, locale);

        let mut chart = ChartBuilder::on(area)
            .margin(panel_margin(cell_h))
            .caption(
                format!("{} - Average Temperature from 1990 to 2015", self.country),
                (FontFamily::SansSerif, fonts.title),
            )
            .set_label_area_size(LabelAreaPosition::Left, label_w)
            .set_label_area_size(LabelAreaPosition::Bottom, fonts.axis * 3)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| anyhow!("{:?}", e))?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Average Temperature (°C)")
            .x_labels(12)
            .y_labels(10)
            .x_label_formatter(&|x| (x.floor() as i32).to_string())
            .y_label_formatter(&|v| fmt_tick(*v, locale))
            .label_style((FontFamily::SansSerif, fonts.tick))
            .axis_desc_style((FontFamily::SansSerif, fonts.axis))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;

        let color = office_color(0);
        let style = ShapeStyle {
            color,
            filled: false,
            stroke_width: 2,
        };
        let elem = chart
            .draw_series(LineSeries::new(
                records.iter().map(|r| (fractional_year(r.date), r.avg_temp)),
                style,
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
        let legend_text = self.country.clone();
        elem.label(legend_text.clone()).legend(move |(x, y)| {
            EmptyElement::at((x, y))
                + Circle::new((x + 8, y), 4, color.filled())
                + Text::new(
                    legend_text.clone(),
                    (x + 20, y),
                    (FontFamily::SansSerif, fonts.tick),
                )
        });

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::LowerRight)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, fonts.tick))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }
}
