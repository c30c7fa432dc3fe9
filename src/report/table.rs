use std::path::Path;
use csv::{ReaderBuilder, StringRecord, Trim, Writer};
use tracing::{debug, instrument};
use crate::fitting::{FitDataset, PeakParameters};
use crate::report::error::{ReportError, Result};

/// Reads the first two columns of a headered CSV as x and y.
///
/// Further columns are ignored. Errors carry the 1-based line number in the
/// file, header included.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_xy_columns(path: impl AsRef<Path>) -> Result<FitDataset> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path.as_ref())?;

    let mut x = Vec::new();
    let mut y = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        if record.len() < 2 {
            return Err(ReportError::MissingColumns { line, found: record.len() });
        }
        x.push(parse_field(&record, 0, line)?);
        y.push(parse_field(&record, 1, line)?);
    }

    debug!(rows = x.len(), "Read xy columns");
    Ok(FitDataset::new(x, y)?)
}

fn parse_field(record: &StringRecord, index: usize, line: u64) -> Result<f64> {
    let field = &record[index];
    field.parse::<f64>().map_err(|_| ReportError::Parse {
        line,
        column: index + 1,
        value: field.to_string(),
    })
}

/// Writes one channel of a profile as `Pixel Index,<channel>` rows.
pub fn write_channel_profile(path: impl AsRef<Path>, channel: &str, samples: &[u16]) -> Result<()> {
    let mut writer = Writer::from_path(path.as_ref())?;
    writer.write_record(["Pixel Index", channel])?;
    for (index, value) in samples.iter().enumerate() {
        writer.write_record([index.to_string(), value.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes fitted peaks as `Function,Center,Height,Width` rows.
///
/// The Gaussian row carries sigma in the width column.
pub fn write_fit_parameters(path: impl AsRef<Path>, params: &PeakParameters) -> Result<()> {
    let mut writer = Writer::from_path(path.as_ref())?;
    writer.write_record(["Function", "Center", "Height", "Width"])?;

    let names = ["Lorentzian1", "Lorentzian2", "Lorentzian3"];
    for (name, peak) in names.iter().zip(&params.lorentzians) {
        writer.write_record([
            name.to_string(),
            peak.center.to_string(),
            peak.amplitude.to_string(),
            peak.width.to_string(),
        ])?;
    }
    let g = &params.gaussian;
    writer.write_record([
        "Gaussian".to_string(),
        g.center.to_string(),
        g.amplitude.to_string(),
        g.sigma.to_string(),
    ])?;

    writer.flush()?;
    Ok(())
}
