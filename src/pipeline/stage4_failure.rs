use anyhow::{Context, Result};
use tracing::debug;

use crate::analysis::Phase;
use crate::analysis::failure::{derive_failure, summarize_failure};
use crate::pipeline::Stage;
use crate::pipeline::sample::SampleCtx;

pub struct Stage4Failure;

impl Stage4Failure {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Failure {
    fn name(&self) -> &'static str {
        "stage4_failure"
    }

    fn run(&self, sample: &mut SampleCtx<'_>) -> Result<()> {
        let run = sample.run.as_ref().context("test run not loaded")?;
        let precon = sample
            .precon_summary
            .as_ref()
            .context("pre-conditioning summary missing")?;
        let circumference_true = sample.record.circumference_true_value()?;

        let rows = run.phase(Phase::Failure, sample.settings);
        let table = derive_failure(
            &rows,
            precon.sample_length,
            circumference_true,
            sample.settings,
        )?;
        let summary = summarize_failure(&table)?;
        debug!(
            file = %sample.name,
            failure_row = summary.failure_row,
            failure_stress = summary.failure_stress,
            max_modulus = summary.max_modulus,
            "failure derived"
        );
        sample.failure = Some(table);
        sample.failure_summary = Some(summary);
        Ok(())
    }
}
