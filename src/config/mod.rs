pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::{Path, PathBuf};
use toml_config::Settings;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

/// 原始腳本使用的日期格式
pub const DATE_FORMAT: &str = "%m-%d-%y";

pub fn today_token() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "lab-attendance")]
#[command(
    about = "Check lab attendance by matching collected card identifiers against a class roster",
    long_about = "Check lab attendance by matching collected card identifiers against a class roster. \
                  Writes two files: Attendance.csv with every student and Attendance_Missing.csv \
                  with only the absent students."
)]
pub struct CliConfig {
    /// CSV list of identifiers collected from the cards
    pub collected: PathBuf,

    /// CSV of the full class roster (identifier, first name, last name)
    pub roster: PathBuf,

    /// Column index of the identifiers in the collected file
    #[arg(short, long, default_value_t = 0)]
    pub index: usize,

    /// Semicolon delimited list of students in the recitation section to check
    #[arg(short = 'r', long = "recRoster", alias = "rec-roster")]
    pub rec_roster: Option<PathBuf>,

    /// Semicolon delimited placeholder;real name pairs for confidential students
    #[arg(short, long)]
    pub fix: Option<PathBuf>,

    /// Add a date to the output file names (today when no value is given)
    #[arg(short, long, value_name = "mm-dd-yy")]
    pub date: Option<Option<String>>,

    /// Directory the two output files are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Optional TOML profile overriding delimiters and output naming
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入設定檔並決定日期，得到實際執行用的配置
    pub fn into_run_config(self) -> Result<RunConfig> {
        let settings = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading profile from: {}", path.display());
                TomlConfig::from_file(path)?.into_settings()
            }
            None => Settings::default(),
        };

        let date = match self.date {
            Some(Some(token)) => Some(token),
            Some(None) => Some(today_token()),
            None => None,
        };

        Ok(RunConfig {
            collected: self.collected,
            roster: self.roster,
            id_column: self.index,
            recitation: self.rec_roster,
            fix: self.fix,
            date,
            output_dir: self.output_dir,
            settings,
        })
    }
}

/// 已解析完成的執行配置
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub collected: PathBuf,
    pub roster: PathBuf,
    pub id_column: usize,
    pub recitation: Option<PathBuf>,
    pub fix: Option<PathBuf>,
    pub date: Option<String>,
    pub output_dir: PathBuf,
    pub settings: Settings,
}

impl RunConfig {
    pub fn new(collected: impl Into<PathBuf>, roster: impl Into<PathBuf>) -> Self {
        Self {
            collected: collected.into(),
            roster: roster.into(),
            id_column: 0,
            recitation: None,
            fix: None,
            date: None,
            output_dir: PathBuf::from("."),
            settings: Settings::default(),
        }
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("collected", &path_str(&self.collected))?;
        validation::validate_path("roster", &path_str(&self.roster))?;
        if let Some(path) = &self.recitation {
            validation::validate_path("recRoster", &path_str(path))?;
        }
        if let Some(path) = &self.fix {
            validation::validate_path("fix", &path_str(path))?;
        }
        if let Some(date) = &self.date {
            validation::validate_file_token("date", date)?;
        }
        validation::validate_path("output_dir", &path_str(&self.output_dir))?;
        self.settings.validate()
    }
}

impl ConfigProvider for RunConfig {
    fn collected_path(&self) -> &Path {
        &self.collected
    }

    fn roster_path(&self) -> &Path {
        &self.roster
    }

    fn id_column(&self) -> usize {
        self.id_column
    }

    fn recitation_path(&self) -> Option<&Path> {
        self.recitation.as_deref()
    }

    fn fix_path(&self) -> Option<&Path> {
        self.fix.as_deref()
    }

    fn date_token(&self) -> Option<&str> {
        self.date.as_deref()
    }

    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }
}
