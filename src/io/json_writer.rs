use std::path::Path;

use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::pipeline::outcome::FileOutcome;
use crate::schema::v1::{FailedFile, OutcomeCounts, RunReportV1, ToolInfo};

pub const SCHEMA_VERSION: &str = "v1";

pub fn build_report(ctx: &Ctx) -> Result<RunReportV1> {
    let mut processed = Vec::new();
    let mut no_metadata_match = Vec::new();
    let mut processing_failed = Vec::new();
    let mut malformed_filename = Vec::new();

    for record in &ctx.files {
        match &record.outcome {
            FileOutcome::Processed(_) => processed.push(record.file.clone()),
            FileOutcome::MetadataJoinMiss { .. } => no_metadata_match.push(record.file.clone()),
            FileOutcome::ProcessingFailed { reason } => processing_failed.push(FailedFile {
                file: record.file.clone(),
                reason: reason.clone(),
            }),
            FileOutcome::MalformedFilename { reason } => malformed_filename.push(FailedFile {
                file: record.file.clone(),
                reason: reason.clone(),
            }),
        }
    }

    let counts = OutcomeCounts {
        processed: processed.len(),
        no_metadata_match: no_metadata_match.len(),
        processing_failed: processing_failed.len(),
        malformed_filename: malformed_filename.len(),
    };

    Ok(RunReportV1 {
        tool: ToolInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        schema_version: SCHEMA_VERSION.to_string(),
        root: ctx.root.display().to_string(),
        metadata_records: ctx.metadata.as_ref().map(|m| m.len()).unwrap_or(0),
        counts,
        processed,
        no_metadata_match,
        processing_failed,
        malformed_filename,
        warnings: ctx.warnings.clone(),
    })
}

pub fn write_json(path: &Path, ctx: &Ctx) -> Result<()> {
    let report = build_report(ctx)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, &report)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
