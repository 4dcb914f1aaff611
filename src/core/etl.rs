use crate::core::{OutputFiles, Pipeline};
use crate::utils::error::Result;

/// 執行結果摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files: OutputFiles,
    pub present: usize,
    pub absent: usize,
    pub unknown_identifiers: Vec<String>,
}

pub struct AttendanceEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> AttendanceEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<RunSummary> {
        tracing::info!("Performing setup");
        let inputs = self.pipeline.extract()?;
        tracing::debug!(
            "Loaded {} roster entries and {} collected identifiers",
            inputs.roster.len(),
            inputs.collected.len()
        );

        tracing::info!("Building attendance list from buzzcards");
        let result = self.pipeline.transform(inputs)?;
        let present = result.report.present_count();
        let absent = result.report.absent_count();
        let unknown_identifiers = result
            .unknown
            .iter()
            .map(|u| u.identifier.clone())
            .collect();

        tracing::info!("Creating final attendance csv");
        let files = self.pipeline.load(result)?;

        tracing::info!("Done. {} present, {} absent", present, absent);
        Ok(RunSummary {
            files,
            present,
            absent,
            unknown_identifiers,
        })
    }
}
