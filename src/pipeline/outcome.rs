use crate::analysis::SampleKey;
use crate::schema::v1::SampleSummary;

/// Result of processing one test-run file. Only `Processed` contributes a
/// results row; every other variant lands in the error log.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Processed(Box<SampleSummary>),
    MetadataJoinMiss { key: SampleKey },
    ProcessingFailed { reason: String },
    MalformedFilename { reason: String },
}

impl FileOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            FileOutcome::Processed(_) => "processed",
            FileOutcome::MetadataJoinMiss { .. } => "no_metadata_match",
            FileOutcome::ProcessingFailed { .. } => "processing_failed",
            FileOutcome::MalformedFilename { .. } => "malformed_filename",
        }
    }
}

/// Outcome of one file, kept for the run report.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub file: String,
    pub outcome: FileOutcome,
}

/// Files that produced no results row, append-only for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLog {
    /// Files whose name could not be joined to a metadata record; badly
    /// formed names are listed here too since the fix is the same.
    pub no_metadata_match: Vec<String>,
    pub processing_failed: Vec<String>,
}

impl ErrorLog {
    pub fn is_empty(&self) -> bool {
        self.no_metadata_match.is_empty() && self.processing_failed.is_empty()
    }
}
