use std::path::{Path, PathBuf};

use crate::analysis::AnalysisSettings;
use crate::metadata::MetadataTable;
use crate::pipeline::outcome::{ErrorLog, FileRecord};
use crate::schema::v1::SampleSummary;

pub const METADATA_FILE: &str = "tendon_data_formatted.csv";
pub const RESULTS_FILE: &str = "results_summary.csv";
pub const CHECKPOINT_FILE: &str = "temp_results_summary.csv";
pub const ERROR_LOG_FILE: &str = "error_log.txt";
pub const REPORT_FILE: &str = "analysis_report.json";
pub const TEST_RUN_SUFFIX: &str = "Data.csv";

/// Where the sample length is read from in a raw test-run table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LengthColumn {
    Position(usize),
    Named(String),
}

/// Raw test-run column names, resolved against the header once per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub set_name: String,
    pub cycle: String,
    pub time: String,
    pub sample_length: LengthColumn,
    pub displacement: String,
    pub force: String,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            set_name: "SetName".to_string(),
            cycle: "Cycle".to_string(),
            time: "Time_S".to_string(),
            sample_length: LengthColumn::Position(3),
            displacement: "Displacement_mm".to_string(),
            force: "Force_N".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub root: PathBuf,
    pub metadata_path: PathBuf,
    pub results_path: PathBuf,
    pub checkpoint_path: PathBuf,
    pub error_log_path: PathBuf,
    pub report_path: PathBuf,
}

impl OutputPaths {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            metadata_path: root.join(METADATA_FILE),
            results_path: root.join(RESULTS_FILE),
            checkpoint_path: root.join(CHECKPOINT_FILE),
            error_log_path: root.join(ERROR_LOG_FILE),
            report_path: root.join(REPORT_FILE),
        }
    }

    /// Per-sample output directory, named after the test-run file stem.
    pub fn sample_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Resolves a user-supplied path against the run root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// State of one analysis run over a root directory.
#[derive(Debug)]
pub struct Ctx {
    pub root: PathBuf,
    pub settings: AnalysisSettings,
    pub columns: ColumnLayout,
    pub write_json: bool,
    pub output: OutputPaths,
    pub metadata: Option<MetadataTable>,
    pub results: Vec<SampleSummary>,
    pub error_log: ErrorLog,
    pub files: Vec<FileRecord>,
    pub warnings: Vec<String>,
}

impl Ctx {
    pub fn new(root: PathBuf, settings: AnalysisSettings, columns: ColumnLayout) -> Self {
        let output = OutputPaths::new(&root);
        Self {
            root,
            settings,
            columns,
            write_json: false,
            output,
            metadata: None,
            results: Vec::new(),
            error_log: ErrorLog::default(),
            files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.output.resolve(path)
    }
}
