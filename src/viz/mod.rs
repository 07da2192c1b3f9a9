//! Figure composition: render the four-panel infographic to **PNG** or **SVG**.
//!
//! The [`Infographic`] owns everything that used to be ambient figure state:
//! the canvas size, the grid, the title band, the caption block, and the
//! output path. Each chart builder draws exactly one grid cell.

pub mod text;
pub mod util;

use crate::charts::{PanelSet, PreparedPanels};
use anyhow::{Result, anyhow};
use log::info;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontFamily, FontStyle};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::PathBuf;
use std::sync::Once;

use text::{estimate_text_width_px, wrap_paragraphs};
use util::map_locale;

/// One-time registration for a fallback "sans-serif" font when using the
/// `ab_glyph` text path. Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    // Safe to call many times; only runs once.
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Bold,
            include_bytes!("../../assets/DejaVuSans-Bold.ttf"),
        );
    });
}

/// The composed output figure: a 3x2 grid with four populated cells, a bold
/// two-line title on top, and a descriptive caption filling the bottom band.
#[derive(Debug, Clone)]
pub struct Infographic {
    /// Title lines drawn centered in the top band (separated by `\n`).
    pub title: String,
    /// Caption paragraphs drawn in the bottom band (separated by blank lines).
    pub caption: String,
    pub width: u32,
    pub height: u32,
    /// Output file; `.svg` selects the SVG backend, anything else is rasterized.
    pub out_path: PathBuf,
    /// Locale tag for tick-label grouping (`en`, `de`, ...).
    pub locale: String,
}

impl Default for Infographic {
    fn default() -> Self {
        Self {
            title: "Unveiling Climate Change in Angola (1990-2015): \
                    Visualizing Influential Factors and Trends\n\
                    Name: Sana Ikhlaq, Student ID: 22075278"
                .into(),
            caption: DEFAULT_CAPTION.into(),
            // 12 in x 12 in at 300 dpi
            width: 3600,
            height: 3600,
            out_path: PathBuf::from("angola_climate.png"),
            locale: "en".into(),
        }
    }
}

const DEFAULT_CAPTION: &str = "This infographic aims to show the climate change in Angola \
between 1990 to 2015 and the factors influencing the climate change. In the following \
visualizations, the rise and fall of temperature can be mainly attributed to increase in \
population and emission of nitrous oxide.\n\n\
Visualisation A: Shows how the temperature is changing with passage of the years.\n\n\
Visualisation B: Shows how average population has grown over the decades. Population rise \
was highest in 2012 over the period.\n\n\
Visualisation C: The supporting line chart shows the main factor for change in climate: \
rise in Nitrous oxide emission which is 19% over the decades.\n\n\
Visualisation D: It depicts that forest area of the country decrease by 12% over the \
period influencing the country's temperature change.";

impl Infographic {
    /// Render all four panels and persist the figure.
    ///
    /// All inputs are loaded and filtered up front; a data failure aborts
    /// the run before the output file exists. Panels then draw in fixed
    /// order, each into its own grid cell.
    pub fn compose(&self, panels: &PanelSet) -> Result<()> {
        ensure_fonts_registered();
        let prepared = panels.prepare()?;
        let path_string = self.out_path.to_string_lossy().into_owned();

        if self.out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
            let root =
                SVGBackend::new(path_string.as_str(), (self.width, self.height)).into_drawing_area();
            self.draw(root, panels, &prepared)?;
        } else {
            let root = BitMapBackend::new(path_string.as_str(), (self.width, self.height))
                .into_drawing_area();
            self.draw(root, panels, &prepared)?;
        }
        info!("wrote infographic to {}", self.out_path.display());
        Ok(())
    }

    fn draw<DB>(
        &self,
        root: DrawingArea<DB, Shift>,
        panels: &PanelSet,
        prepared: &PreparedPanels,
    ) -> Result<()>
    where
        DB: DrawingBackend,
    {
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
        let (w, h) = root.dim_in_pixel();
        let locale = map_locale(&self.locale);

        // 12pt at the 300dpi/12in reference canvas; scales with figure height.
        let base_font = ((h as f64) / 72.0).round().max(12.0) as u32;
        let line_h = (base_font * 3 / 2) as i32;

        // ----------------------------
        // 1) Title band
        // ----------------------------
        let title_lines: Vec<&str> = self
            .title
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let title_h = (title_lines.len() as i32 + 1) * line_h;
        let (title_area, body) = root.split_vertically(title_h.max(0) as u32);

        let title_style = (FontFamily::SansSerif, base_font, FontStyle::Bold)
            .into_font()
            .color(&BLACK);
        for (i, line) in title_lines.iter().enumerate() {
            let x = (w as i32 - estimate_text_width_px(line, base_font) as i32) / 2;
            let y = line_h / 2 + i as i32 * line_h;
            title_area
                .draw_text(line, &title_style, (x.max(0), y))
                .map_err(|e| anyhow!("{:?}", e))?;
        }

        // ----------------------------
        // 2) Chart grid (top two rows of the conceptual 3x2 grid)
        // ----------------------------
        let (_, body_h) = body.dim_in_pixel();
        let (grid_area, caption_area) = body.split_vertically(body_h * 2 / 3);
        let cells = grid_area.split_evenly((2, 2));

        panels.population.draw(&cells[0], &prepared.population, locale)?;
        panels
            .temperature
            .draw(&cells[1], &prepared.temperature, locale)?;
        panels.forest.draw(&cells[2], &prepared.forest, locale)?;
        panels.emissions.draw(&cells[3], &prepared.emissions, locale)?;

        // ----------------------------
        // 3) Caption block
        // ----------------------------
        let margin = (w / 100).max(4) as i32;
        let wrap_w = w.saturating_sub(2 * margin as u32);
        let caption_style = (FontFamily::SansSerif, base_font).into_font().color(&BLACK);
        let mut y = line_h;
        for line in wrap_paragraphs(&self.caption, base_font, wrap_w) {
            if !line.is_empty() {
                caption_area
                    .draw_text(&line, &caption_style, (margin, y))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
            y += line_h;
        }

        root.present().map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }
}
