use crate::utils::error::{AttendanceError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 選用的 TOML 設定檔，所有欄位都可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub input: Option<InputConfig>,
    pub output: Option<OutputConfig>,
    pub confidential: Option<ConfidentialConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub roster_delimiter: Option<char>,
    pub collected_delimiter: Option<char>,
    pub list_delimiter: Option<char>,
    pub trim_fields: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub delimiter: Option<char>,
    pub base_name: Option<String>,
    pub present_marker: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfidentialConfig {
    pub strict: Option<bool>,
}

/// 套用預設值之後的設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub roster_delimiter: char,
    pub collected_delimiter: char,
    pub list_delimiter: char,
    pub trim_fields: bool,
    pub output_delimiter: char,
    pub base_name: String,
    pub present_marker: String,
    pub strict_confidential: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            roster_delimiter: ',',
            collected_delimiter: ',',
            list_delimiter: ';',
            trim_fields: false,
            output_delimiter: ';',
            base_name: "Attendance".to_string(),
            present_marker: "x".to_string(),
            strict_confidential: false,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            tracing::debug!("Cannot read {}: {}", path.display(), e);
            AttendanceError::MissingInputFile {
                path: path.to_path_buf(),
            }
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn into_settings(self) -> Settings {
        let defaults = Settings::default();
        let input = self.input.unwrap_or_default();
        let output = self.output.unwrap_or_default();
        let confidential = self.confidential.unwrap_or_default();

        Settings {
            roster_delimiter: input.roster_delimiter.unwrap_or(defaults.roster_delimiter),
            collected_delimiter: input
                .collected_delimiter
                .unwrap_or(defaults.collected_delimiter),
            list_delimiter: input.list_delimiter.unwrap_or(defaults.list_delimiter),
            trim_fields: input.trim_fields.unwrap_or(defaults.trim_fields),
            output_delimiter: output.delimiter.unwrap_or(defaults.output_delimiter),
            base_name: output.base_name.unwrap_or(defaults.base_name),
            present_marker: output.present_marker.unwrap_or(defaults.present_marker),
            strict_confidential: confidential.strict.unwrap_or(defaults.strict_confidential),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_delimiter("input.roster_delimiter", self.roster_delimiter)?;
        validation::validate_delimiter("input.collected_delimiter", self.collected_delimiter)?;
        validation::validate_delimiter("input.list_delimiter", self.list_delimiter)?;
        validation::validate_delimiter("output.delimiter", self.output_delimiter)?;
        validation::validate_file_token("output.base_name", &self.base_name)?;
        validation::validate_non_empty_string("output.present_marker", &self.present_marker)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_uses_defaults() {
        let settings = TomlConfig::from_toml_str("").unwrap().into_settings();
        assert_eq!(settings, Settings::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_profile_overrides() {
        let content = r#"
[input]
roster_delimiter = "\t"
trim_fields = true

[output]
base_name = "TimedLab"

[confidential]
strict = true
"#;
        let settings = TomlConfig::from_toml_str(content).unwrap().into_settings();
        assert_eq!(settings.roster_delimiter, '\t');
        assert!(settings.trim_fields);
        assert_eq!(settings.base_name, "TimedLab");
        assert!(settings.strict_confidential);
        // untouched keys keep their defaults
        assert_eq!(settings.list_delimiter, ';');
        assert_eq!(settings.present_marker, "x");
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        assert!(TomlConfig::from_toml_str("[output\nbase_name = 1").is_err());

        let settings = TomlConfig::from_toml_str("[output]\nbase_name = \"../up\"")
            .unwrap()
            .into_settings();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_profile_file() {
        let err = TomlConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, AttendanceError::MissingInputFile { .. }));
    }

    #[test]
    fn test_directory_profile_is_missing_input() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = TomlConfig::from_file(dir.path()).unwrap_err();
        assert!(matches!(err, AttendanceError::MissingInputFile { .. }));
    }
}
