use anyhow::Result;
use std::time::Instant;
use tracing::{info, warn};

use crate::pipeline::sample::SampleCtx;

pub mod batch;
pub mod outcome;
pub mod sample;
pub mod stage1_load;
pub mod stage2_precon;
pub mod stage3_stress_relax;
pub mod stage4_failure;
pub mod stage5_summary;
pub mod stage6_output;

pub trait Stage {
    fn name(&self) -> &'static str;
    fn run(&self, sample: &mut SampleCtx<'_>) -> Result<()>;
}

pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Every stage, in order, for one sample.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(stage1_load::Stage1Load::new()),
            Box::new(stage2_precon::Stage2Precon::new()),
            Box::new(stage3_stress_relax::Stage3StressRelax::new()),
            Box::new(stage4_failure::Stage4Failure::new()),
            Box::new(stage5_summary::Stage5Summary::new()),
            Box::new(stage6_output::Stage6Output::new()),
        ])
    }

    pub fn run(&self, sample: &mut SampleCtx<'_>) -> Result<()> {
        for stage in &self.stages {
            let start = Instant::now();
            info!(file = %sample.name, stage = stage.name(), "stage started");
            if let Err(err) = stage.run(sample) {
                let elapsed_ms = start.elapsed().as_millis();
                warn!(
                    file = %sample.name,
                    stage = stage.name(),
                    elapsed_ms = elapsed_ms as u64,
                    "stage failed"
                );
                return Err(err.context(format!("stage {} failed", stage.name())));
            }
            let elapsed_ms = start.elapsed().as_millis();
            info!(
                file = %sample.name,
                stage = stage.name(),
                elapsed_ms = elapsed_ms as u64,
                "stage finished"
            );
        }
        Ok(())
    }
}
