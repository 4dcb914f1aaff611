use crate::core::matcher::{compute_attendance, resolve_collected};
use crate::core::reader::TabularReader;
use crate::core::report::ReportWriter;
use crate::core::{
    AttendanceInputs, ConfidentialMap, ConfigProvider, OutputFiles, Pipeline, RosterIndex,
    Storage, TransformResult,
};
use crate::utils::error::Result;
use crate::utils::validation::validate_delimiter;
use std::path::Path;

/// 點名流程：讀檔 → 比對 → 寫出兩份報表
pub struct AttendancePipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> AttendancePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// 分隔符號在這裡轉成位元組，不依賴呼叫端先做過驗證
    fn reader(&self, field: &str, delimiter: char) -> Result<TabularReader> {
        let delimiter = validate_delimiter(field, delimiter)?;
        Ok(TabularReader::new(delimiter).with_trim(self.config.settings().trim_fields))
    }

    fn load_rows(&self, path: &Path, reader: TabularReader) -> Result<Vec<Vec<String>>> {
        tracing::info!("----> Making dictionary from: {}", path.display());
        let data = self.storage.read_file(path)?;
        reader.read_rows(&data)
    }

    fn load_list(&self, path: &Path, index: usize, reader: TabularReader) -> Result<Vec<String>> {
        tracing::info!("----> Making list from: {}", path.display());
        let data = self.storage.read_file(path)?;
        reader.read_column(&data, index, &path.display().to_string())
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for AttendancePipeline<S, C> {
    fn extract(&self) -> Result<AttendanceInputs> {
        let settings = self.config.settings();

        let roster_path = self.config.roster_path();
        let roster_reader = self.reader("input.roster_delimiter", settings.roster_delimiter)?;
        let roster_rows = self.load_rows(roster_path, roster_reader)?;
        let roster = RosterIndex::build(&roster_rows, &roster_path.display().to_string())?;

        let collected_reader =
            self.reader("input.collected_delimiter", settings.collected_delimiter)?;
        let collected = self.load_list(
            self.config.collected_path(),
            self.config.id_column(),
            collected_reader,
        )?;

        let list_reader = self.reader("input.list_delimiter", settings.list_delimiter)?;
        let recitation = match self.config.recitation_path() {
            Some(path) => Some(self.load_list(path, 0, list_reader)?),
            None => None,
        };

        let confidential = match self.config.fix_path() {
            Some(path) => {
                let rows = self.load_rows(path, list_reader)?;
                Some(ConfidentialMap::build(
                    &rows,
                    &path.display().to_string(),
                    settings.strict_confidential,
                )?)
            }
            None => None,
        };

        Ok(AttendanceInputs {
            roster,
            collected,
            recitation,
            confidential,
        })
    }

    fn transform(&self, inputs: AttendanceInputs) -> Result<TransformResult> {
        let resolution = resolve_collected(&inputs.collected, &inputs.roster);
        for unknown in &resolution.errors {
            tracing::warn!(
                "--> !!! ERROR: Buzzcard [{}] not in class roster !!!",
                unknown.identifier
            );
        }

        let population = match inputs.recitation {
            Some(recitation) => recitation,
            None => inputs.roster.names(),
        };

        let report = compute_attendance(
            &population,
            &resolution.present,
            inputs.confidential.as_ref(),
        );

        Ok(TransformResult {
            report,
            unknown: resolution.errors,
        })
    }

    fn load(&self, result: TransformResult) -> Result<OutputFiles> {
        let settings = self.config.settings();
        let writer = ReportWriter::new(
            validate_delimiter("output.delimiter", settings.output_delimiter)?,
            settings.present_marker.clone(),
        );

        writer.write_all(
            &self.storage,
            &result.report,
            self.config.output_dir(),
            &settings.base_name,
            self.config.date_token(),
        )
    }
}
