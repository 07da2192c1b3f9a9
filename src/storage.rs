use crate::models::Observation;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save observations as CSV with header.
pub fn save_csv<P: AsRef<Path>>(observations: &[Observation], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize((
        "country_name",
        "country_code",
        "indicator_name",
        "indicator_code",
        "year",
        "value",
    ))?;
    for o in observations {
        wtr.serialize((
            &o.country_name,
            &o.country_code,
            &o.indicator_name,
            &o.indicator_code,
            &o.year,
            o.value,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save observations as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(observations: &[Observation], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(observations)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
