//! Static exports of analysis views (CSV and JSON)
//!
//! Files are meant for an external plotting tool. Non-viable cells are written
//! as empty fields in CSV and `null` in JSON.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::analysis::{AnalysisView, SensitivityView, SurfaceView};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Serialize)]
struct SurfaceRow {
    x: f64,
    y: f64,
    z: Option<f64>,
}

#[derive(Serialize)]
struct LineRow<'a> {
    series: &'a str,
    x: f64,
    y: Option<f64>,
}

/// Write a surface in long format: one `x,y,z` row per cell, row-major
pub fn write_surface_csv<W: Write>(view: &SurfaceView, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for ((x, y), z) in view.x.iter().zip(view.y.iter()).zip(view.z.iter()) {
        csv_writer.serialize(SurfaceRow { x: *x, y: *y, z: *z })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write sensitivity lines in long format: one `series,x,y` row per point
pub fn write_sensitivity_csv<W: Write>(view: &SensitivityView, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for series in &view.series {
        for (x, y) in view.x.iter().zip(series.y.iter()) {
            csv_writer.serialize(LineRow { series: &series.label, x: *x, y: *y })?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct JsonEnvelope<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    view: &'a AnalysisView,
}

/// Write a view as pretty JSON, stamped with the generation time
pub fn write_json<W: Write>(view: &AnalysisView, writer: W) -> Result<(), ExportError> {
    let envelope = JsonEnvelope { generated_at: Utc::now(), view };
    serde_json::to_writer_pretty(writer, &envelope)?;
    Ok(())
}

/// Write `view` to `<output_dir>/<stem>.<ext>` and return the path
pub fn export_view(
    view: &AnalysisView,
    output_dir: &Path,
    stem: &str,
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{}.{}", stem, format.extension()));
    let mut writer = BufWriter::new(File::create(&path)?);

    match (format, view) {
        (ExportFormat::Csv, AnalysisView::Surface(surface)) => write_surface_csv(surface, &mut writer)?,
        (ExportFormat::Csv, AnalysisView::Sensitivity(lines)) => write_sensitivity_csv(lines, &mut writer)?,
        (ExportFormat::Json, view) => write_json(view, &mut writer)?,
    }
    writer.flush()?;

    log::info!("Wrote {}", path.display());
    Ok(path)
}
