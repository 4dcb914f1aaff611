pub mod confidential;
pub mod etl;
pub mod matcher;
pub mod pipeline;
pub mod reader;
pub mod report;
pub mod roster;

pub use crate::domain::model::{
    AttendanceInputs, AttendanceRecord, AttendanceReport, ConfidentialMap, OutputFiles,
    Resolution, RosterIndex, TransformResult, UnknownIdentifier,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
