//! Population growth panel (grid cell 0,0).

use super::{PanelFonts, SlicePolicy, pad_range, panel_fonts, panel_margin};
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

/// Annual population growth, line plot over the 1990-2015 display window.
#[derive(Debug, Clone)]
pub struct PopulationChart {
    pub source: PathBuf,
    pub country: String,
    pub country_code: String,
    pub indicator_code: String,
    /// How the coerced series is trimmed before plotting. The positional
    /// default matches the legacy output on the canonical export; switch to
    /// [`SlicePolicy::YearRange`] for explicit 1990-2015 filtering.
    pub slice: SlicePolicy,
    /// X-axis clamp, half-open.
    pub x_range: (i32, i32),
}

impl Default for PopulationChart {
    fn default() -> Self {
        Self {
            source: PathBuf::from(super::POPULATION_FILE),
            country: "Angola".into(),
            country_code: "AGO".into(),
            indicator_code: "SP.POP.GROW".into(),
            slice: SlicePolicy::Positional {
                skip_front: 20,
                skip_back: 2,
            },
            x_range: (1990, 2016),
        }
    }
}

impl PopulationChart {
    /// Load, melt, clean, coerce years, and apply the slice policy.
    /// File order is preserved; the positional policy depends on it.
    pub fn prepare(&self) -> Result<Vec<(i32, f64)>, LoadError> {
        let (_, observations) = loader::load_observations(
            &self.source,
            std::slice::from_ref(&self.country_code),
            &self.indicator_code,
        )?;
        let series = loader::year_series(&observations)?;
        Ok(self.slice.apply(series))
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

        let (x_min, x_max) = (self.x_range.0 as f64, self.x_range.1 as f64);
        let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
        let (y_min, y_max) = pad_range(
            values.iter().cloned().fold(f64::INFINITY, f64::min),
            values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        );
        let label_w = left_label_width_px(y_min, y_max, 10, fonts.tick, locale);

        let mut chart = ChartBuilder::on(area)
            .margin(panel_margin(cell_h))
            .caption(
                format!("{} - Population Growth from 1990 to 2015", self.country),
                (FontFamily::SansSerif, fonts.title),
            )
            .set_label_area_size(LabelAreaPosition::Left, label_w)
            .set_label_area_size(LabelAreaPosition::Bottom, fonts.axis * 3)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| anyhow!("{:?}", e))?;

        chart
            .configure_mesh()
            .x_desc("Years")
            .y_desc("Annual Population Growth")
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
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, fonts.tick))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }
}
