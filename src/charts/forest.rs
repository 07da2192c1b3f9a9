//! Forest area panel (grid cell 1,0).

use super::{PanelFonts, YearBounds, panel_fonts, panel_margin};
use crate::error::LoadError;
use crate::loader;
use crate::viz::util::{fmt_tick, left_label_width_px, office_color};
use anyhow::{Result, anyhow, bail};
use num_format::Locale;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::AreaSeries;
use plotters::style::FontFamily;
use std::path::PathBuf;

/// Forest area in square kilometers, stacked-area style (filled from zero).
#[derive(Debug, Clone)]
pub struct ForestChart {
    pub source: PathBuf,
    pub country: String,
    pub country_code: String,
    pub indicator_code: String,
    /// Kept years, exclusive on both ends. One year narrower at the start
    /// than the temperature panel.
    pub bounds: YearBounds,
    pub legend_label: String,
}

impl Default for ForestChart {
    fn default() -> Self {
        Self {
            source: PathBuf::from(super::FOREST_FILE),
            country: "Angola".into(),
            country_code: "AGO".into(),
            indicator_code: "AG.LND.FRST.K2".into(),
            bounds: YearBounds {
                after: 1990,
                before: 2016,
            },
            legend_label: "Forest Area Decline".into(),
        }
    }
}

impl ForestChart {
    /// Load, melt, clean, coerce years, and keep the bounded interior.
    pub fn prepare(&self) -> Result<Vec<(i32, f64)>, LoadError> {
        let (_, observations) = loader::load_observations(
            &self.source,
            std::slice::from_ref(&self.country_code),
            &self.indicator_code,
        )?;
        let series = loader::year_series(&observations)?;
        Ok(series
            .into_iter()
            .filter(|(year, _)| self.bounds.contains(*year))
            .collect())
    }

    pub fn render<DB>(&self, area: &DrawingArea<DB, Shift>, locale: &'static Locale) -> Result<()>
    where
        DB: DrawingBackend,
    {
        let series = self.prepare()?;
        self.draw(area, &series, locale)
    }

    pub fn draw<DB>(
        &self,
        area: &DrawingArea<DB, Shift>,
        series: &[(i32, f64)],
        locale: &'static Locale,
    ) -> Result<()>
    where
        DB: DrawingBackend,
    {
        if series.is_empty() {
            bail!("{}: no data to plot", self.indicator_code);
        }
        let (_, cell_h) = area.dim_in_pixel();
        let fonts: PanelFonts = panel_fonts(cell_h);

        let (mut x_min, mut x_max) = (
            series.iter().map(|(y, _)| *y).min().unwrap_or(0) as f64,
            series.iter().map(|(y, _)| *y).max().unwrap_or(1) as f64,
        );
        if x_min == x_max {
            x_min -= 1.0;
            x_max += 1.0;
        }
        // Filled from zero, so the axis starts at the baseline.
        let y_max = series
            .iter()
            .map(|(_, v)| *v)
            .fold(f64::NEG_INFINITY, f64::max)
            * 1.05;
        let label_w = left_label_width_px(0.0, y_max, 10, fonts.tick, locale);

        let mut chart = ChartBuilder::on(area)
            .margin(panel_margin(cell_h))
            .caption(
                format!("{} - Decline in Forest Area from 1990 to 2015", self.country),
                (FontFamily::SansSerif, fonts.title),
            )
            .set_label_area_size(LabelAreaPosition::Left, label_w)
            .set_label_area_size(LabelAreaPosition::Bottom, fonts.axis * 3)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)
            .map_err(|e| anyhow!("{:?}", e))?;

        chart
            .configure_mesh()
            .x_desc("Years")
            .y_desc("Forest Area (Square KM)")
            .x_labels(12)
            .y_labels(10)
            .x_label_formatter(&|x| (x.round() as i32).to_string())
            .y_label_formatter(&|v| fmt_tick(*v, locale))
            .label_style((FontFamily::SansSerif, fonts.tick))
            .axis_desc_style((FontFamily::SansSerif, fonts.axis))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;

        let color = office_color(1); // orange
        let fill = color.mix(0.80).filled();
        let border = color.stroke_width(1);
        let elem = chart
            .draw_series(
                AreaSeries::new(series.iter().map(|(y, v)| (*y as f64, *v)), 0.0, fill)
                    .border_style(border),
            )
            .map_err(|e| anyhow!("{:?}", e))?;
        let legend_text = self.legend_label.clone();
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
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, fonts.tick))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }
}
