use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// 學號 → "LAST, FIRST" 的對照表，建好之後不再變動
///
/// 保留名單檔中第一次出現的順序，作為「全班」點名的順序。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterIndex {
    pub(crate) entries: Vec<(String, String)>,
    pub(crate) positions: HashMap<String, usize>,
}

impl RosterIndex {
    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.positions
            .get(identifier)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.positions.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 全班姓名，依名單順序
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(_, name)| name.clone()).collect()
    }
}

/// 保密學生的代稱 ↔ 真名對照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfidentialMap {
    pub(crate) forward: HashMap<String, String>,
    pub(crate) inverse: HashMap<String, String>,
    pub(crate) collisions: Vec<(String, Vec<String>)>,
}

impl ConfidentialMap {
    pub fn real_name(&self, placeholder: &str) -> Option<&str> {
        self.forward.get(placeholder).map(String::as_str)
    }

    pub fn placeholder(&self, real_name: &str) -> Option<&str> {
        self.inverse.get(real_name).map(String::as_str)
    }

    /// Real names claimed by more than one placeholder, with every claimant in file order.
    pub fn collisions(&self) -> &[(String, Vec<String>)] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// A collected identifier with no roster entry. Reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownIdentifier {
    pub identifier: String,
    /// 1-based position in the collected list
    pub position: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub present: HashSet<String>,
    pub errors: Vec<UnknownIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub display_name: String,
    pub present: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceReport {
    pub records: Vec<AttendanceRecord>,
}

impl AttendanceReport {
    pub fn absentees(&self) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .filter(|r| !r.present)
            .map(|r| r.display_name.as_str())
    }

    pub fn present_count(&self) -> usize {
        self.records.iter().filter(|r| r.present).count()
    }

    pub fn absent_count(&self) -> usize {
        self.records.len() - self.present_count()
    }
}

/// Everything loaded from disk before matching starts.
#[derive(Debug, Clone)]
pub struct AttendanceInputs {
    pub roster: RosterIndex,
    pub collected: Vec<String>,
    pub recitation: Option<Vec<String>>,
    pub confidential: Option<ConfidentialMap>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub report: AttendanceReport,
    pub unknown: Vec<UnknownIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub attendance: PathBuf,
    pub missing: PathBuf,
}
