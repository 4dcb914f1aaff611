use crate::config::toml_config::Settings;
use crate::domain::model::{AttendanceInputs, OutputFiles, TransformResult};
use crate::utils::error::Result;
use std::path::Path;

/// 檔案存取：每次呼叫都是開檔、讀寫完、關檔
pub trait Storage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn collected_path(&self) -> &Path;
    fn roster_path(&self) -> &Path;
    fn id_column(&self) -> usize;
    fn recitation_path(&self) -> Option<&Path>;
    fn fix_path(&self) -> Option<&Path>;
    /// Date token for output file names, already resolved (`None` = no date segment).
    fn date_token(&self) -> Option<&str>;
    fn output_dir(&self) -> &Path;
    fn settings(&self) -> &Settings;
}

pub trait Pipeline {
    fn extract(&self) -> Result<AttendanceInputs>;
    fn transform(&self, inputs: AttendanceInputs) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<OutputFiles>;
}
