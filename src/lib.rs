pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::Settings, RunConfig};

pub use crate::core::{
    etl::{AttendanceEngine, RunSummary},
    pipeline::AttendancePipeline,
};
pub use utils::error::{AttendanceError, Result};
