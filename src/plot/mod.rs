//! Diagnostic plots rendered from the persisted per-sample tables.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::io::derived::{SamplePaths, read_columns};

pub mod error;
pub mod render;

pub use error::PlotError;
use render::{ChartText, PlotStyle, SmoothedSeries, render_smoothed_png};

/// Folder-name suffix of a per-sample analysis directory.
pub const SAMPLE_DIR_SUFFIX: &str = "Data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTable {
    Precon,
    Failure,
}

/// One fixed chart: which persisted columns it draws and how it is smoothed.
#[derive(Debug, Clone, Copy)]
pub struct PlotSpec {
    pub file_prefix: &'static str,
    pub source: SourceTable,
    pub x_column: &'static str,
    pub y_column: &'static str,
    pub window: usize,
    pub polyorder: usize,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

pub const PLOT_SPECS: [PlotSpec; 4] = [
    PlotSpec {
        file_prefix: "precon_cycle_load",
        source: SourceTable::Precon,
        x_column: "Time_S",
        y_column: "Load_correction",
        window: 1001,
        polyorder: 3,
        title: "Preconditioning cycle load",
        x_label: "Time (seconds)",
        y_label: "Force (N)",
    },
    PlotSpec {
        file_prefix: "precon_load_vs_displacement",
        source: SourceTable::Precon,
        x_column: "Displacement_correction",
        y_column: "Force_N",
        window: 301,
        polyorder: 3,
        title: "Preconditioning load vs displacement",
        x_label: "Displacement (mm)",
        y_label: "Force (N)",
    },
    PlotSpec {
        file_prefix: "failure_force",
        source: SourceTable::Failure,
        x_column: "Displacement_correction",
        y_column: "Load_correction",
        window: 101,
        polyorder: 3,
        title: "Failure Force",
        x_label: "Displacement (mm)",
        y_label: "Force (N)",
    },
    PlotSpec {
        file_prefix: "failure_stress-vs-strain",
        source: SourceTable::Failure,
        x_column: "Strain_%",
        y_column: "Stress_Mpas",
        window: 101,
        polyorder: 3,
        title: "Stress vs Strain",
        x_label: "Strain (%)",
        y_label: "Stress (MPa)",
    },
];

impl PlotSpec {
    pub fn output_path(&self, dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}_{}.png", self.file_prefix, name))
    }

    fn table_path(&self, paths: &SamplePaths) -> PathBuf {
        match self.source {
            SourceTable::Precon => paths.precon_table.clone(),
            SourceTable::Failure => paths.failure_table.clone(),
        }
    }

    fn text(&self) -> ChartText<'static> {
        ChartText {
            title: self.title,
            x_label: self.x_label,
            y_label: self.y_label,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlotReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, String)>,
}

/// Renders one chart to `dir`. The error stays with this chart only.
pub fn render_plot(dir: &Path, name: &str, chart: &PlotSpec) -> Result<PathBuf, PlotError> {
    let paths = SamplePaths::new(dir, name);
    let table = chart.table_path(&paths);
    let columns = read_columns(&table, &[chart.x_column, chart.y_column])
        .map_err(|err| PlotError::Table(format!("{err:#}")))?;
    let series = SmoothedSeries::build(&columns[0], &columns[1], chart.window, chart.polyorder)?;
    let png = render_smoothed_png(&series, &chart.text(), &PlotStyle::default())?;

    let out = chart.output_path(dir, name);
    fs::write(&out, png).map_err(|source| PlotError::Write {
        path: out.display().to_string(),
        source,
    })?;
    Ok(out)
}

/// Renders every chart for one sample directory; failed charts are logged
/// and skipped.
pub fn render_sample(dir: &Path, name: &str) -> PlotReport {
    let mut report = PlotReport::default();
    for chart in &PLOT_SPECS {
        match render_plot(dir, name, chart) {
            Ok(path) => {
                info!(file = %name, plot = %path.display(), "plot written");
                report.written.push(path);
            }
            Err(err) => {
                let path = chart.output_path(dir, name);
                warn!(file = %name, plot = chart.file_prefix, error = %err, "plot skipped");
                report.skipped.push((path, err.to_string()));
            }
        }
    }
    report
}

/// Sample directories under `root`, sorted by name.
pub fn discover_sample_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(root).with_context(|| format!("failed to list {}", root.display()))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_sample = path.is_dir()
            && path
                .file_name()
                .and_then(|s| s.to_str())
                .is_some_and(|s| s.ends_with(SAMPLE_DIR_SUFFIX));
        if is_sample {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

pub fn plot_all(root: &Path) -> Result<PlotReport> {
    let dirs = discover_sample_dirs(root)?;
    info!(root = %root.display(), samples = dirs.len(), "sample folders discovered");

    let mut report = PlotReport::default();
    for dir in dirs {
        let name = dir
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let sample = render_sample(&dir, &name);
        report.written.extend(sample.written);
        report.skipped.extend(sample.skipped);
    }
    info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        "plotting finished"
    );
    Ok(report)
}
