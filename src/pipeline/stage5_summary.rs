use anyhow::{Context, Result};

use crate::pipeline::Stage;
use crate::pipeline::sample::SampleCtx;
use crate::schema::v1::SampleSummary;

pub struct Stage5Summary;

impl Stage5Summary {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Summary {
    fn name(&self) -> &'static str {
        "stage5_summary"
    }

    fn run(&self, sample: &mut SampleCtx<'_>) -> Result<()> {
        let precon = sample
            .precon_summary
            .as_ref()
            .context("pre-conditioning summary missing")?;
        let stress_rate = sample.stress_rate.context("stress rate missing")?;
        let failure = sample
            .failure_summary
            .as_ref()
            .context("failure summary missing")?;
        let record = &sample.record;

        sample.summary = Some(SampleSummary {
            file_name: sample.name.clone(),
            date: record.date.clone(),
            sample_id: record.sample_id.clone(),
            replicate: record.replicate.clone(),
            sex: record.sex.clone(),
            age: record.age.clone(),
            genotype: record.genotype.clone(),
            sample_length: precon.sample_length,
            min_force: precon.min_force,
            max_force: precon.max_force,
            max_force_cycle1: precon.max_force_cycle1,
            max_force_cycle5: precon.max_force_cycle5,
            stress_relaxation: precon.stress_relaxation,
            stress_rate,
            hysteresis_sum: precon.hysteresis.sum,
            hysteresis_percent: precon.hysteresis.percent,
            smoothed_hysteresis_sum: precon.smoothed_hysteresis.sum,
            smoothed_hysteresis_percent: precon.smoothed_hysteresis.percent,
            average_diameter: record.average_diameter.clone(),
            circumference: record.circumference.clone(),
            circumference_true: record.circumference_true.clone(),
            max_modulus: failure.max_modulus,
            stress_at_max_modulus: failure.stress_at_max_modulus,
            strain_at_max_modulus: failure.strain_at_max_modulus,
            failure_stress: failure.failure_stress,
            failure_strain_percent: failure.failure_strain_percent,
            failure_force: failure.failure_force,
            failure_extension: failure.failure_extension,
            failure_time: failure.failure_time,
        });
        Ok(())
    }
}
