use anyhow::{Context, Result};
use tracing::debug;

use crate::analysis::Phase;
use crate::analysis::precon::derive_precon;
use crate::pipeline::Stage;
use crate::pipeline::sample::SampleCtx;

pub struct Stage2Precon;

impl Stage2Precon {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Precon {
    fn name(&self) -> &'static str {
        "stage2_precon"
    }

    fn run(&self, sample: &mut SampleCtx<'_>) -> Result<()> {
        let run = sample.run.as_ref().context("test run not loaded")?;
        let rows = run.phase(Phase::Precon, sample.settings);
        let (table, summary) = derive_precon(&rows, sample.settings)?;
        debug!(
            file = %sample.name,
            rows = rows.len(),
            hysteresis_percent = summary.hysteresis.percent,
            "pre-conditioning derived"
        );
        sample.precon = Some(table);
        sample.precon_summary = Some(summary);
        Ok(())
    }
}
