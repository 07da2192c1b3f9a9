//! Nitrous oxide emissions panel (grid cell 1,1).

use super::{PanelFonts, YearBounds, pad_range, panel_fonts, panel_margin};
use crate::error::LoadError;
use crate::loader;
use crate::viz::util::{fmt_tick, left_label_width_px, office_color};
use anyhow::{Result, anyhow, bail};
use num_format::Locale;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use std::path::PathBuf;

/// Nitrous oxide emissions in thousand metric tons of CO2 equivalent,
/// line plot over the same window as the forest panel.
#[derive(Debug, Clone)]
pub struct EmissionsChart {
    pub source: PathBuf,
    pub country: String,
    pub country_code: String,
    pub indicator_code: String,
    pub bounds: YearBounds,
    pub legend_label: String,
}

impl Default for EmissionsChart {
    fn default() -> Self {
        Self {
            source: PathBuf::from(super::EMISSIONS_FILE),
            country: "Angola".into(),
            country_code: "AGO".into(),
            indicator_code: "EN.ATM.NOXE.KT.CE".into(),
            bounds: YearBounds {
                after: 1990,
                before: 2016,
            },
            legend_label: "Nitrous Oxide Emission".into(),
        }
    }
}

impl EmissionsChart {
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
        let (y_min, y_max) = pad_range(
            series.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min),
            series
                .iter()
                .map(|(_, v)| *v)
                .fold(f64::NEG_INFINITY, f64::max),
        );
        let label_w = left_label_width_px(y_min, y_max, 10, fonts.tick, locale);

        let mut chart = ChartBuilder::on(area)
            .margin(panel_margin(cell_h))
            .caption(
                format!(
                    "{} - Nitrous Oxide Emissions from 1990 to 2015",
                    self.country
                ),
                (FontFamily::SansSerif, fonts.title),
            )
            .set_label_area_size(LabelAreaPosition::Left, label_w)
            .set_label_area_size(LabelAreaPosition::Bottom, fonts.axis * 3)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| anyhow!("{:?}", e))?;

        chart
            .configure_mesh()
            .x_desc("Years")
            .y_desc("NO Emission (thousand metric tons)")
            .x_labels(12)
            .y_labels(10)
            .x_label_formatter(&|x| (x.round() as i32).to_string())
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
                series.iter().map(|(y, v)| (*y as f64, *v)),
                style,
            ))
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
            .position(SeriesLabelPosition::LowerRight)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, fonts.tick))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }
}
