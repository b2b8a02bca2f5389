use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use crate::io::{derived, summary};
use crate::pipeline::Stage;
use crate::pipeline::sample::SampleCtx;

pub struct Stage6Output;

impl Stage6Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage6Output {
    fn name(&self) -> &'static str {
        "stage6_output"
    }

    fn run(&self, sample: &mut SampleCtx<'_>) -> Result<()> {
        let run = sample.run.as_ref().context("test run not loaded")?;
        let precon = sample.precon.as_ref().context("pre-conditioning table missing")?;
        let precon_summary = sample
            .precon_summary
            .as_ref()
            .context("pre-conditioning summary missing")?;
        let failure = sample.failure.as_ref().context("failure table missing")?;
        let failure_summary = sample
            .failure_summary
            .as_ref()
            .context("failure summary missing")?;

        fs::create_dir_all(&sample.out_dir)
            .with_context(|| format!("failed to create {}", sample.out_dir.display()))?;

        let paths = derived::SamplePaths::new(&sample.out_dir, &sample.name);
        derived::write_precon_table(&paths.precon_table, &run.header, precon)?;
        summary::write_text(
            &paths.precon_summary,
            &summary::format_precon_summary(&sample.name, precon_summary),
        )?;
        derived::write_failure_table(&paths.failure_table, &run.header, failure)?;
        summary::write_text(
            &paths.failure_summary,
            &summary::format_failure_summary(&sample.name, failure_summary),
        )?;

        info!(
            file = %sample.name,
            out_dir = %sample.out_dir.display(),
            "sample outputs written"
        );
        Ok(())
    }
}
