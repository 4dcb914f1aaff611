use crate::domain::model::{
    AttendanceRecord, AttendanceReport, ConfidentialMap, Resolution, RosterIndex,
    UnknownIdentifier,
};
use std::collections::HashSet;

/// 把收集到的學號換成（大寫）姓名；找不到的學號另外記錄，不中斷
pub fn resolve_collected(identifiers: &[String], index: &RosterIndex) -> Resolution {
    let mut present = HashSet::with_capacity(identifiers.len());
    let mut errors = Vec::new();

    for (i, identifier) in identifiers.iter().enumerate() {
        match index.get(identifier) {
            Some(name) => {
                present.insert(name.to_uppercase());
            }
            None => errors.push(UnknownIdentifier {
                identifier: identifier.clone(),
                position: i + 1,
            }),
        }
    }

    Resolution { present, errors }
}

/// Marks every population member present or absent, in population order.
///
/// A name listed in the confidential map is matched under its real name and
/// displayed under whatever the inverse map gives back for that real name.
pub fn compute_attendance(
    population: &[String],
    present: &HashSet<String>,
    confidential: Option<&ConfidentialMap>,
) -> AttendanceReport {
    let mut records = Vec::with_capacity(population.len());

    for name in population {
        let substituted = confidential.and_then(|map| map.real_name(name));
        let lookup = substituted.unwrap_or(name.as_str());
        let is_present = present.contains(&lookup.to_uppercase());

        let display_name = match (substituted, confidential) {
            (Some(real), Some(map)) => map.placeholder(real).unwrap_or(name.as_str()).to_string(),
            _ => name.clone(),
        };

        tracing::trace!("{} -> {}", display_name, if is_present { "present" } else { "absent" });
        records.push(AttendanceRecord {
            display_name,
            present: is_present,
        });
    }

    AttendanceReport { records }
}
