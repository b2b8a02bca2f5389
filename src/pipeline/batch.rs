//! Runs the per-sample pipeline over every test-run file under the root.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info, warn};

use crate::analysis::SampleKey;
use crate::ctx::{Ctx, TEST_RUN_SUFFIX};
use crate::io::{error_log, json_writer, metadata_csv, results};
use crate::metadata::MetadataTable;
use crate::pipeline::Pipeline;
use crate::pipeline::outcome::{FileOutcome, FileRecord};
use crate::pipeline::sample::SampleCtx;

/// Test-run files directly under `root`, sorted by name.
pub fn discover_test_runs(root: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(root).with_context(|| format!("failed to list {}", root.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_run = path.is_file()
            && path
                .file_name()
                .and_then(|s| s.to_str())
                .is_some_and(|s| s.ends_with(TEST_RUN_SUFFIX));
        if is_run {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Loads the normalized metadata table. Its absence aborts the run.
pub fn load_metadata(ctx: &mut Ctx, path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!(
            "metadata table {} not found; run `reshape` first or pass --metadata",
            path.display()
        );
    }
    let table = metadata_csv::read_metadata_table(path)?;
    info!(
        metadata = %path.display(),
        records = table.len(),
        "metadata table loaded"
    );
    ctx.metadata = Some(table);
    Ok(())
}

/// Processes one file against the metadata. Never fails: every problem is
/// folded into the returned outcome.
pub fn process_file(ctx: &Ctx, metadata: &MetadataTable, path: &Path) -> FileOutcome {
    let name = stem(path);

    let key = match SampleKey::parse(&name) {
        Ok(key) => key,
        Err(err) => {
            return FileOutcome::MalformedFilename {
                reason: format!("{:#}", err),
            };
        }
    };

    let Some(record) = metadata.find(&key.date_id, &key.sample_id, &key.replicate) else {
        return FileOutcome::MetadataJoinMiss { key };
    };
    info!(file = %name, key = %key, "metadata match found");

    let mut sample = SampleCtx::new(
        name.clone(),
        path.to_path_buf(),
        ctx.output.sample_dir(&name),
        key,
        record.clone(),
        &ctx.settings,
        &ctx.columns,
    );
    match Pipeline::standard().run(&mut sample) {
        Ok(()) => match sample.summary {
            Some(summary) => FileOutcome::Processed(Box::new(summary)),
            None => FileOutcome::ProcessingFailed {
                reason: "pipeline finished without a summary".to_string(),
            },
        },
        Err(err) => FileOutcome::ProcessingFailed {
            reason: format!("{:#}", err),
        },
    }
}

/// Folds one outcome into the run's results and error log.
pub fn record_outcome(ctx: &mut Ctx, file: String, outcome: FileOutcome) -> Result<()> {
    match &outcome {
        FileOutcome::Processed(summary) => {
            ctx.results.push(summary.as_ref().clone());
        }
        FileOutcome::MetadataJoinMiss { key } => {
            warn!(file = %file, key = %key, "metadata not found; file skipped");
            ctx.warnings
                .push(format!("{}: no metadata record for {}", file, key));
            ctx.error_log.no_metadata_match.push(file.clone());
        }
        FileOutcome::MalformedFilename { reason } => {
            warn!(file = %file, reason = %reason, "file name not recognised; file skipped");
            ctx.warnings.push(format!("{}: {}", file, reason));
            ctx.error_log.no_metadata_match.push(file.clone());
        }
        FileOutcome::ProcessingFailed { reason } => {
            warn!(file = %file, reason = %reason, "processing failed; file skipped");
            ctx.error_log.processing_failed.push(file.clone());
            results::write_results(&ctx.output.checkpoint_path, &ctx.results)?;
            info!(
                checkpoint = %ctx.output.checkpoint_path.display(),
                rows = ctx.results.len(),
                "checkpoint written"
            );
        }
    }
    debug!(file = %file, outcome = outcome.label(), "file recorded");
    ctx.files.push(FileRecord { file, outcome });
    Ok(())
}

/// Full `analyse` run: metadata, every test-run file, then the aggregate
/// outputs.
pub fn run_batch(ctx: &mut Ctx, metadata_path: &Path) -> Result<()> {
    load_metadata(ctx, metadata_path)?;
    let metadata = ctx.metadata.take().context("metadata table missing")?;

    let files = discover_test_runs(&ctx.root)?;
    info!(root = %ctx.root.display(), files = files.len(), "test runs discovered");

    for path in &files {
        let file = file_name(path);
        info!(file = %file, "analysing test run");
        let outcome = process_file(ctx, &metadata, path);
        record_outcome(ctx, file, outcome)?;
    }
    ctx.metadata = Some(metadata);

    finish(ctx)
}

fn finish(ctx: &mut Ctx) -> Result<()> {
    results::write_results(&ctx.output.results_path, &ctx.results)?;
    if ctx.output.checkpoint_path.exists() {
        fs::remove_file(&ctx.output.checkpoint_path).with_context(|| {
            format!(
                "failed to remove {}",
                ctx.output.checkpoint_path.display()
            )
        })?;
    }
    error_log::write_error_log(&ctx.output.error_log_path, &ctx.error_log)?;
    if ctx.write_json {
        json_writer::write_json(&ctx.output.report_path, ctx)?;
    }
    info!(
        processed = ctx.results.len(),
        no_metadata_match = ctx.error_log.no_metadata_match.len(),
        processing_failed = ctx.error_log.processing_failed.len(),
        "analysis finished"
    );
    Ok(())
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
