//! CSV出力

use crate::error::Result;
use degree_stats_common::CellValue;
use std::path::Path;

pub fn write_csv(
    path: &Path,
    header: Option<&[CellValue]>,
    rows: &[Vec<CellValue>],
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)?;

    for row in header.into_iter().chain(rows.iter().map(Vec::as_slice)) {
        writer.write_record(row.iter().map(|c| c.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv_with_blank_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let header = vec![
            CellValue::Text("Player".into()),
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Text("Count".into()),
        ];
        let rows = vec![
            vec![
                CellValue::Text("alice".into()),
                CellValue::Text("AQ".into()),
                CellValue::Text("007".into()),
                CellValue::Int(7),
            ],
            vec![CellValue::Text("bob, jr".into()), CellValue::Float(0.5)],
        ];

        write_csv(&path, Some(&header), &rows).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Player,,,Count\nalice,AQ,007,7\n\"bob, jr\",0.5\n");
    }
}
