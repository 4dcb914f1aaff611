use crate::domain::model::ConfidentialMap;
use crate::utils::error::{AttendanceError, Result};
use std::collections::HashMap;

impl ConfidentialMap {
    /// 由 (代稱, 真名) 列建立雙向對照
    ///
    /// The inverse is built by reversing the forward map, so two placeholders
    /// sharing one real name collapse to whichever comes last in the file.
    /// Such collisions are recorded and logged; with `strict` the first one is
    /// returned as an error instead.
    pub fn build(rows: &[Vec<String>], source_name: &str, strict: bool) -> Result<Self> {
        let mut forward: HashMap<String, String> = HashMap::with_capacity(rows.len());
        // 保留檔案順序，反轉時才有「最後一筆勝出」的確定結果
        let mut ordered: Vec<(String, String)> = Vec::with_capacity(rows.len());

        for (i, row) in rows.iter().enumerate() {
            if row.len() < 2 {
                return Err(AttendanceError::MalformedRow {
                    source_name: source_name.to_string(),
                    line: i + 1,
                    expected: 2,
                    found: row.len(),
                });
            }

            let placeholder = row[0].clone();
            let real_name = row[1].clone();
            match forward.insert(placeholder.clone(), real_name.clone()) {
                Some(_) => {
                    if let Some(slot) = ordered.iter_mut().find(|(p, _)| *p == placeholder) {
                        slot.1 = real_name;
                    }
                }
                None => ordered.push((placeholder, real_name)),
            }
        }

        let mut inverse: HashMap<String, String> = HashMap::with_capacity(ordered.len());
        let mut claimants: HashMap<&str, Vec<String>> = HashMap::new();
        let mut collision_order: Vec<&str> = Vec::new();

        for (placeholder, real_name) in &ordered {
            let claims = claimants.entry(real_name.as_str()).or_default();
            claims.push(placeholder.clone());
            if claims.len() == 2 {
                collision_order.push(real_name.as_str());
            }
            inverse.insert(real_name.clone(), placeholder.clone());
        }

        let mut collisions = Vec::with_capacity(collision_order.len());
        for real_name in collision_order {
            let placeholders = claimants.remove(real_name).unwrap_or_default();
            if strict {
                return Err(AttendanceError::IrreversibleConfidentialMap {
                    real_name: real_name.to_string(),
                    placeholders,
                });
            }
            tracing::warn!(
                "⚠️ '{}' is mapped from several placeholders ({}); reports will show '{}'",
                real_name,
                placeholders.join(", "),
                placeholders.last().map(String::as_str).unwrap_or_default()
            );
            collisions.push((real_name.to_string(), placeholders));
        }

        tracing::debug!("Confidential map built with {} entries", forward.len());
        Ok(Self {
            forward,
            inverse,
            collisions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[(&str, &str)]) -> Vec<Vec<String>> {
        data.iter()
            .map(|(a, b)| vec![a.to_string(), b.to_string()])
            .collect()
    }

    #[test]
    fn test_forward_and_inverse() {
        let map = ConfidentialMap::build(
            &rows(&[("Confidential Student", "Jane Doe"), ("Private Person", "Tom Lee")]),
            "fix.csv",
            false,
        )
        .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.real_name("Confidential Student"), Some("Jane Doe"));
        assert_eq!(map.placeholder("Tom Lee"), Some("Private Person"));
        assert!(map.collisions().is_empty());

        for placeholder in ["Confidential Student", "Private Person"] {
            let real = map.real_name(placeholder).unwrap();
            assert_eq!(map.placeholder(real), Some(placeholder));
        }
    }

    #[test]
    fn test_collision_last_placeholder_wins() {
        let map = ConfidentialMap::build(
            &rows(&[
                ("Confidential A", "Jane Doe"),
                ("Confidential B", "Jane Doe"),
            ]),
            "fix.csv",
            false,
        )
        .unwrap();

        assert_eq!(map.placeholder("Jane Doe"), Some("Confidential B"));
        assert_eq!(
            map.collisions(),
            &[(
                "Jane Doe".to_string(),
                vec!["Confidential A".to_string(), "Confidential B".to_string()]
            )]
        );
    }

    #[test]
    fn test_collision_strict_is_error() {
        let err = ConfidentialMap::build(
            &rows(&[("Confidential A", "Jane Doe"), ("Confidential B", "Jane Doe")]),
            "fix.csv",
            true,
        )
        .unwrap_err();

        assert!(matches!(err, AttendanceError::IrreversibleConfidentialMap { .. }));
    }

    #[test]
    fn test_short_row_is_malformed() {
        let bad = vec![vec!["Confidential Student".to_string()]];
        let err = ConfidentialMap::build(&bad, "fix.csv", false).unwrap_err();
        assert!(matches!(err, AttendanceError::MalformedRow { expected: 2, .. }));
    }
}
