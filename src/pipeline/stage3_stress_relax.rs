use anyhow::{Context, Result};

use crate::analysis::Phase;
use crate::analysis::stress_relax::stress_rate;
use crate::pipeline::Stage;
use crate::pipeline::sample::SampleCtx;

pub struct Stage3StressRelax;

impl Stage3StressRelax {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3StressRelax {
    fn name(&self) -> &'static str {
        "stage3_stress_relax"
    }

    fn run(&self, sample: &mut SampleCtx<'_>) -> Result<()> {
        let run = sample.run.as_ref().context("test run not loaded")?;
        let rows = run.phase(Phase::StressRelax, sample.settings);
        sample.stress_rate = Some(stress_rate(&rows, sample.settings)?);
        Ok(())
    }
}
