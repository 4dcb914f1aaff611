use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttendanceError {
    #[error("Malformed row in {source_name} (line {line}): expected at least {expected} fields, found {found}")]
    MalformedRow {
        source_name: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Input file not found or unreadable: {}", path.display())]
    MissingInputFile { path: PathBuf },

    #[error("Confidential name '{real_name}' is claimed by several placeholders: {}", placeholders.join(", "))]
    IrreversibleConfidentialMap {
        real_name: String,
        placeholders: Vec<String>,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl AttendanceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingInputFile { .. } => ErrorCategory::Input,
            Self::MalformedRow { .. }
            | Self::IrreversibleConfidentialMap { .. }
            | Self::CsvError(_) => ErrorCategory::Data,
            Self::TomlError(_) | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::System => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MalformedRow { .. } => {
                "Check that every roster row has id, first name and last name, and that --index points at an existing column"
            }
            Self::MissingInputFile { .. } => "Check the path and file permissions of the input file",
            Self::IrreversibleConfidentialMap { .. } => {
                "Give every real name in the fix file exactly one placeholder, or disable strict mode"
            }
            Self::CsvError(_) => "Make sure the file is UTF-8 text using the expected delimiter",
            Self::IoError(_) => "Check that the output directory exists and is writable",
            Self::TomlError(_) => "Fix the syntax of the configuration profile",
            Self::InvalidConfigValueError { .. } => {
                "Review the command line arguments and configuration profile"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MalformedRow {
                source_name, line, ..
            } => format!("{} has a malformed row at line {}", source_name, line),
            Self::MissingInputFile { path } => format!("Cannot read input file {}", path.display()),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AttendanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        let malformed = AttendanceError::MalformedRow {
            source_name: "roster.csv".to_string(),
            line: 3,
            expected: 3,
            found: 2,
        };
        assert_eq!(malformed.category(), ErrorCategory::Data);
        assert_eq!(malformed.severity(), ErrorSeverity::High);
        assert_eq!(
            malformed.user_friendly_message(),
            "roster.csv has a malformed row at line 3"
        );

        let io = AttendanceError::IoError(std::io::Error::other("disk full"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }
}
