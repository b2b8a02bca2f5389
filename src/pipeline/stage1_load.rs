use anyhow::Result;
use tracing::info;

use crate::io::test_run;
use crate::pipeline::Stage;
use crate::pipeline::sample::SampleCtx;

pub struct Stage1Load;

impl Stage1Load {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Load {
    fn name(&self) -> &'static str {
        "stage1_load"
    }

    fn run(&self, sample: &mut SampleCtx<'_>) -> Result<()> {
        let run = test_run::read_test_run(&sample.input, sample.columns)?;
        info!(
            file = %sample.name,
            rows = run.rows.len(),
            "test run loaded"
        );
        sample.run = Some(run);
        Ok(())
    }
}
