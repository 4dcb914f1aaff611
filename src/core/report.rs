use crate::domain::model::{AttendanceReport, OutputFiles};
use crate::domain::ports::Storage;
use crate::utils::error::{AttendanceError, Result};
use std::path::Path;

pub const ATTENDANCE_HEADER: [&str; 2] = ["STUDENT", "PRESENT"];
pub const MISSING_HEADER: [&str; 1] = ["STUDENT"];

/// 產生 `<base>[_<date>].csv` 與 `<base>[_<date>]_Missing.csv`
pub fn output_file_names(base_name: &str, date: Option<&str>) -> (String, String) {
    let stem = match date {
        Some(date) => format!("{}_{}", base_name, date),
        None => base_name.to_string(),
    };
    (format!("{}.csv", stem), format!("{}_Missing.csv", stem))
}

#[derive(Debug, Clone)]
pub struct ReportWriter {
    delimiter: u8,
    present_marker: String,
}

impl ReportWriter {
    pub fn new(delimiter: u8, present_marker: impl Into<String>) -> Self {
        Self {
            delimiter,
            present_marker: present_marker.into(),
        }
    }

    fn csv_writer(&self) -> csv::Writer<Vec<u8>> {
        csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .terminator(csv::Terminator::CRLF)
            .from_writer(Vec::new())
    }

    fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
        writer
            .into_inner()
            .map_err(|e| AttendanceError::IoError(e.into_error()))
    }

    /// 出席者兩欄（姓名, 標記），缺席者只有姓名
    pub fn render_attendance(&self, report: &AttendanceReport) -> Result<Vec<u8>> {
        let mut writer = self.csv_writer();
        writer.write_record(ATTENDANCE_HEADER)?;

        for record in &report.records {
            if record.present {
                writer.write_record([record.display_name.as_str(), self.present_marker.as_str()])?;
            } else {
                writer.write_record([record.display_name.as_str()])?;
            }
        }

        Self::finish(writer)
    }

    /// Absentees in the order they were met during matching.
    pub fn render_missing(&self, report: &AttendanceReport) -> Result<Vec<u8>> {
        let mut writer = self.csv_writer();
        writer.write_record(MISSING_HEADER)?;

        for name in report.absentees() {
            writer.write_record([name])?;
        }

        Self::finish(writer)
    }

    pub fn write_attendance<S: Storage>(
        &self,
        storage: &S,
        report: &AttendanceReport,
        out_path: &Path,
    ) -> Result<()> {
        let data = self.render_attendance(report)?;
        storage.write_file(out_path, &data)?;
        tracing::info!("----> Created file: {}", out_path.display());
        Ok(())
    }

    pub fn write_missing<S: Storage>(
        &self,
        storage: &S,
        report: &AttendanceReport,
        out_path: &Path,
    ) -> Result<()> {
        let data = self.render_missing(report)?;
        storage.write_file(out_path, &data)?;
        tracing::info!("----> Created file: {}", out_path.display());
        Ok(())
    }

    pub fn write_all<S: Storage>(
        &self,
        storage: &S,
        report: &AttendanceReport,
        output_dir: &Path,
        base_name: &str,
        date: Option<&str>,
    ) -> Result<OutputFiles> {
        let (attendance_name, missing_name) = output_file_names(base_name, date);
        let files = OutputFiles {
            attendance: output_dir.join(attendance_name),
            missing: output_dir.join(missing_name),
        };

        self.write_attendance(storage, report, &files.attendance)?;
        self.write_missing(storage, report, &files.missing)?;
        Ok(files)
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new(b';', "x")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::AttendanceRecord;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| AttendanceError::MissingInputFile {
                    path: path.to_path_buf(),
                })
        }

        fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), data.to_vec());
            Ok(())
        }
    }

    fn report() -> AttendanceReport {
        AttendanceReport {
            records: vec![
                AttendanceRecord {
                    display_name: "Doe, Jane".to_string(),
                    present: true,
                },
                AttendanceRecord {
                    display_name: "Lee, Tom".to_string(),
                    present: false,
                },
                AttendanceRecord {
                    display_name: "Ruiz, Ana".to_string(),
                    present: false,
                },
            ],
        }
    }

    #[test]
    fn test_output_file_names() {
        assert_eq!(
            output_file_names("Attendance", None),
            ("Attendance.csv".to_string(), "Attendance_Missing.csv".to_string())
        );
        assert_eq!(
            output_file_names("Attendance", Some("09-14-26")),
            (
                "Attendance_09-14-26.csv".to_string(),
                "Attendance_09-14-26_Missing.csv".to_string()
            )
        );
    }

    #[test]
    fn test_render_attendance() {
        let data = ReportWriter::default().render_attendance(&report()).unwrap();
        assert_eq!(
            String::from_utf8(data).unwrap(),
            "STUDENT;PRESENT\r\nDoe, Jane;x\r\nLee, Tom\r\nRuiz, Ana\r\n"
        );
    }

    #[test]
    fn test_render_missing_keeps_encounter_order() {
        let data = ReportWriter::default().render_missing(&report()).unwrap();
        assert_eq!(
            String::from_utf8(data).unwrap(),
            "STUDENT\r\nLee, Tom\r\nRuiz, Ana\r\n"
        );
    }

    #[test]
    fn test_names_with_delimiter_are_quoted() {
        let report = AttendanceReport {
            records: vec![AttendanceRecord {
                display_name: "Odd;Name".to_string(),
                present: true,
            }],
        };
        let data = ReportWriter::default().render_attendance(&report).unwrap();
        assert!(String::from_utf8(data).unwrap().contains("\"Odd;Name\";x"));
    }

    #[test]
    fn test_write_all_through_storage() {
        let storage = MockStorage::default();
        let files = ReportWriter::default()
            .write_all(&storage, &report(), Path::new("out"), "Attendance", Some("01-02-26"))
            .unwrap();

        assert_eq!(files.attendance, PathBuf::from("out/Attendance_01-02-26.csv"));
        assert_eq!(files.missing, PathBuf::from("out/Attendance_01-02-26_Missing.csv"));

        let missing = storage.read_file(&files.missing).unwrap();
        assert_eq!(missing, b"STUDENT\r\nLee, Tom\r\nRuiz, Ana\r\n");
    }
}
