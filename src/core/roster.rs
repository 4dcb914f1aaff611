use crate::domain::model::RosterIndex;
use crate::utils::error::{AttendanceError, Result};
use std::collections::HashMap;

const ROSTER_FIELDS: usize = 3;

impl RosterIndex {
    /// 由名單列 (id, first, last) 建立 id → "LAST, FIRST"
    ///
    /// Any row with fewer than three fields aborts the whole build. A repeated
    /// identifier keeps its first position and takes the last row's name.
    pub fn build(rows: &[Vec<String>], source_name: &str) -> Result<Self> {
        let mut entries: Vec<(String, String)> = Vec::with_capacity(rows.len());
        let mut positions: HashMap<String, usize> = HashMap::with_capacity(rows.len());

        for (i, row) in rows.iter().enumerate() {
            if row.len() < ROSTER_FIELDS {
                return Err(AttendanceError::MalformedRow {
                    source_name: source_name.to_string(),
                    line: i + 1,
                    expected: ROSTER_FIELDS,
                    found: row.len(),
                });
            }

            let identifier = &row[0];
            let name = format!("{}, {}", row[2], row[1]);

            match positions.get(identifier).copied() {
                Some(pos) => {
                    tracing::warn!(
                        "⚠️ Identifier [{}] appears more than once in {}, keeping '{}'",
                        identifier,
                        source_name,
                        name
                    );
                    entries[pos].1 = name;
                }
                None => {
                    positions.insert(identifier.clone(), entries.len());
                    entries.push((identifier.clone(), name));
                }
            }
        }

        tracing::debug!("Roster index built with {} students", entries.len());
        Ok(Self { entries, positions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_build_formats_last_first() {
        let index =
            RosterIndex::build(&rows(&[&["111", "Jane", "Doe"], &["222", "Tom", "Lee"]]), "roster")
                .unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("111"), Some("Doe, Jane"));
        assert_eq!(index.get("222"), Some("Lee, Tom"));
        assert_eq!(index.get("333"), None);
        assert_eq!(index.names(), vec!["Doe, Jane", "Lee, Tom"]);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let index =
            RosterIndex::build(&rows(&[&["111", "Jane", "Doe", "jdoe3@school.edu"]]), "roster")
                .unwrap();
        assert_eq!(index.get("111"), Some("Doe, Jane"));
    }

    #[test]
    fn test_duplicate_identifier_last_wins_first_position() {
        let index = RosterIndex::build(
            &rows(&[
                &["111", "Jane", "Doe"],
                &["222", "Tom", "Lee"],
                &["111", "Janet", "Doe"],
            ]),
            "roster",
        )
        .unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("111"), Some("Doe, Janet"));
        assert_eq!(index.names(), vec!["Doe, Janet", "Lee, Tom"]);
    }

    #[test]
    fn test_short_row_aborts() {
        let err = RosterIndex::build(&rows(&[&["111", "Jane", "Doe"], &["222", "Tom"]]), "roster.csv")
            .unwrap_err();

        assert!(matches!(
            err,
            AttendanceError::MalformedRow {
                line: 2,
                expected: 3,
                found: 2,
                ..
            }
        ));
    }
}
