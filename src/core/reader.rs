use crate::utils::error::{AttendanceError, Result};

/// 把分隔文字解析成一列列的欄位，不碰檔案
#[derive(Debug, Clone, Copy)]
pub struct TabularReader {
    delimiter: u8,
    trim: bool,
}

impl TabularReader {
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            trim: false,
        }
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Parses every row; rows may differ in length and blank lines are skipped.
    pub fn read_rows(&self, data: &[u8]) -> Result<Vec<Vec<String>>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .trim(if self.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(data);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }

    /// 取出每一列第 `index` 欄；缺欄直接失敗
    pub fn read_column(&self, data: &[u8], index: usize, source_name: &str) -> Result<Vec<String>> {
        let rows = self.read_rows(data)?;
        let mut values = Vec::with_capacity(rows.len());

        for (i, mut row) in rows.into_iter().enumerate() {
            if index >= row.len() {
                return Err(AttendanceError::MalformedRow {
                    source_name: source_name.to_string(),
                    line: i + 1,
                    expected: index + 1,
                    found: row.len(),
                });
            }
            values.push(row.swap_remove(index));
        }

        tracing::debug!("Read {} values from column {} of {}", values.len(), index, source_name);
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_rows_flexible() {
        let reader = TabularReader::new(b',');
        let rows = reader.read_rows(b"111,Jane,Doe\n222\n\n333,Tom,Lee,extra\n").unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["111", "Jane", "Doe"]);
        assert_eq!(rows[1], vec!["222"]);
        assert_eq!(rows[2].len(), 4);
    }

    #[test]
    fn test_quoted_fields_keep_delimiter() {
        let reader = TabularReader::new(b';');
        let rows = reader.read_rows(b"\"Doe; Jane\";x\r\nLee, Tom\r\n").unwrap();

        assert_eq!(rows[0], vec!["Doe; Jane", "x"]);
        assert_eq!(rows[1], vec!["Lee, Tom"]);
    }

    #[test]
    fn test_trim_option() {
        let raw = b" 111 , Jane ,Doe\n";
        let untrimmed = TabularReader::new(b',').read_rows(raw).unwrap();
        assert_eq!(untrimmed[0][0], " 111 ");

        let trimmed = TabularReader::new(b',').with_trim(true).read_rows(raw).unwrap();
        assert_eq!(trimmed[0], vec!["111", "Jane", "Doe"]);
    }

    #[test]
    fn test_read_column_by_index() {
        let reader = TabularReader::new(b',');
        let ids = reader
            .read_column(b"2024-09-01,111\n2024-09-01,222\n", 1, "cards.csv")
            .unwrap();
        assert_eq!(ids, vec!["111", "222"]);
    }

    #[test]
    fn test_read_column_short_row_is_fatal() {
        let reader = TabularReader::new(b',');
        let err = reader
            .read_column(b"a,111\nb\n", 1, "cards.csv")
            .unwrap_err();

        match err {
            AttendanceError::MalformedRow {
                line,
                expected,
                found,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
