//! CSV出力

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ScraperError;
use crate::odisha::ProjectRecord;

/// 表計算ソフトで文字化けしないよう先頭に付けるBOM
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// BOM・ヘッダー行・レコード行を書き出す
pub fn write_records<W: Write>(mut writer: W, records: &[ProjectRecord]) -> Result<(), ScraperError> {
    writer.write_all(UTF8_BOM)?;

    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// レコードをCSVファイルに保存（既存ファイルは上書き）
///
/// レコードが空なら何も書かずに `Ok(None)`。
pub fn save_to_csv(
    records: &[ProjectRecord],
    path: impl AsRef<Path>,
) -> Result<Option<PathBuf>, ScraperError> {
    let path = path.as_ref();
    if records.is_empty() {
        info!("No data to save");
        return Ok(None);
    }

    let file = File::create(path)?;
    write_records(BufWriter::new(file), records)?;

    info!("Data saved to {} ({} rows)", path.display(), records.len());
    Ok(Some(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odisha::{ProjectRow, PromoterDetails};

    fn record(no: usize, details: PromoterDetails) -> ProjectRecord {
        ProjectRecord::from_parts(
            ProjectRow {
                rera_no: format!("RP/01/2024/{:05}", no),
                project_name: format!("Project {}", no),
                project_url: format!("https://rera.odisha.gov.in/projects/project-details/{}", no),
            },
            details,
        )
    }

    fn sample() -> Vec<ProjectRecord> {
        vec![
            record(
                1,
                PromoterDetails {
                    promoter_name: "ଓଡ଼ିଶା ବିଲ୍ଡର୍ସ".into(),
                    address: "Plot 12, Saheed Nagar, Bhubaneswar".into(),
                    gst_no: "21AAACK1234F1Z5".into(),
                },
            ),
            record(2, PromoterDetails::default()),
        ]
    }

    #[test]
    fn test_write_records_layout() {
        let mut buf = Vec::new();
        write_records(&mut buf, &sample()).unwrap();

        assert!(buf.starts_with(UTF8_BOM));
        let text = std::str::from_utf8(&buf[UTF8_BOM.len()..]).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Rera Regd. No,Project Name,Promoter Name,Address,GST No,Project URL"
        );
        assert!(lines[1].contains("ଓଡ଼ିଶା ବିଲ୍ଡର୍ସ"));
        assert!(lines[1].contains("\"Plot 12, Saheed Nagar, Bhubaneswar\""));
        assert_eq!(
            lines[2],
            "RP/01/2024/00002,Project 2,N/A,N/A,N/A,https://rera.odisha.gov.in/projects/project-details/2"
        );
    }

    #[test]
    fn test_every_row_has_six_columns() {
        let mut buf = Vec::new();
        write_records(&mut buf, &sample()).unwrap();

        let mut reader = csv::Reader::from_reader(&buf[UTF8_BOM.len()..]);
        assert_eq!(reader.headers().unwrap().len(), 6);

        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == 6));
    }

    #[test]
    fn test_save_to_csv_empty_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rera_projects.csv");

        let saved = save_to_csv(&[], &path).unwrap();

        assert!(saved.is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_to_csv_is_deterministic_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rera_projects.csv");
        std::fs::write(&path, "stale content that is longer than nothing").unwrap();

        let records = sample();
        let saved = save_to_csv(&records, &path).unwrap();
        assert_eq!(saved.as_deref(), Some(path.as_path()));
        let first = std::fs::read(&path).unwrap();

        save_to_csv(&records, &path).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with(UTF8_BOM));
        assert!(!String::from_utf8_lossy(&first).contains("stale"));
    }

    #[test]
    fn test_save_to_csv_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        let result = save_to_csv(&sample(), &path);
        assert!(matches!(result, Err(ScraperError::FileIO(_))));
    }
}
