use std::path::PathBuf;

use crate::analysis::{
    AnalysisSettings, DerivedFailureTable, DerivedPreconTable, FailureSummary, PreconSummary,
    RawTestRun, SampleKey,
};
use crate::ctx::ColumnLayout;
use crate::schema::v1::{MetadataRecord, SampleSummary};

/// Working state for one test-run file as it moves through the stages.
#[derive(Debug)]
pub struct SampleCtx<'a> {
    /// File stem, e.g. `210409 MRC Sample B1Data`.
    pub name: String,
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub key: SampleKey,
    pub record: MetadataRecord,
    pub settings: &'a AnalysisSettings,
    pub columns: &'a ColumnLayout,
    pub run: Option<RawTestRun>,
    pub precon: Option<DerivedPreconTable>,
    pub precon_summary: Option<PreconSummary>,
    pub stress_rate: Option<f64>,
    pub failure: Option<DerivedFailureTable>,
    pub failure_summary: Option<FailureSummary>,
    pub summary: Option<SampleSummary>,
}

impl<'a> SampleCtx<'a> {
    pub fn new(
        name: String,
        input: PathBuf,
        out_dir: PathBuf,
        key: SampleKey,
        record: MetadataRecord,
        settings: &'a AnalysisSettings,
        columns: &'a ColumnLayout,
    ) -> Self {
        Self {
            name,
            input,
            out_dir,
            key,
            record,
            settings,
            columns,
            run: None,
            precon: None,
            precon_summary: None,
            stress_rate: None,
            failure: None,
            failure_summary: None,
            summary: None,
        }
    }
}
