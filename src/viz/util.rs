//! Drawing utilities: series colors, locale mapping, tick formatting.

use chrono::{Datelike, NaiveDate};
use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

use super::text::estimate_text_width_px;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

/// Get a color from the Office palette.
#[inline]
pub fn office_color(idx: usize) -> RGBAColor {
    OFFICE10[idx % OFFICE10.len()].to_rgba()
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en, // default
    }
}

/// Format a Y-axis tick: locale-grouped whole numbers for large magnitudes,
/// otherwise a precision that tightens as values grow.
pub fn fmt_tick(v: f64, locale: &Locale) -> String {
    let a = v.abs();
    if a >= 1000.0 {
        (v.round() as i64).to_formatted_string(locale)
    } else if a >= 100.0 {
        format!("{:.0}", v)
    } else if a >= 10.0 {
        format!("{:.1}", v)
    } else {
        format!("{:.2}", v)
    }
}

/// Compute a tight left label area width (in pixels) for the Y axis, based
/// on the formatted tick labels that will appear. Clamped to avoid extremes.
pub fn left_label_width_px(
    y_min: f64,
    y_max: f64,
    ticks: usize,
    font_px: u32,
    locale: &Locale,
) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let v = y_min + (y_max - y_min) * t;
        max_px = max_px.max(estimate_text_width_px(&fmt_tick(v, locale), font_px));
    }
    let with_padding = max_px.saturating_add(18);
    with_padding.clamp(40, 220)
}

/// Map a date onto a fractional-year X coordinate, so a date axis can reuse
/// the plain `f64` cartesian range the year axes already use.
pub fn fractional_year(date: NaiveDate) -> f64 {
    let days = if date.leap_year() { 366.0 } else { 365.0 };
    date.year() as f64 + (date.ordinal0() as f64) / days
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_ticks_are_grouped() {
        assert_eq!(fmt_tick(590_000.0, &Locale::en), "590,000");
        assert_eq!(fmt_tick(590_000.0, &Locale::de), "590.000");
    }

    #[test]
    fn small_ticks_keep_decimals() {
        assert_eq!(fmt_tick(3.14159, &Locale::en), "3.14");
        assert_eq!(fmt_tick(25.3, &Locale::en), "25.3");
    }

    #[test]
    fn fractional_year_is_monotonic_within_a_year() {
        let jan = NaiveDate::from_ymd_opt(1995, 1, 1).unwrap();
        let jul = NaiveDate::from_ymd_opt(1995, 7, 1).unwrap();
        let dec = NaiveDate::from_ymd_opt(1995, 12, 31).unwrap();
        let (a, b, c) = (fractional_year(jan), fractional_year(jul), fractional_year(dec));
        assert!(a < b && b < c);
        assert!(a >= 1995.0 && c < 1996.0);
    }
}
