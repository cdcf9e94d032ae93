pub mod delimited;
pub mod excel;

use crate::error::{AppError, Result};
use crate::scanner::TableKind;
use degree_stats_common::CellValue;
use std::path::Path;

/// 行をファイルに書き出す（形式は拡張子で決める）
///
/// 行ごとに列数が違ってもよい。ヘッダーは先頭行として書く。
pub fn write_rows(
    path: &Path,
    header: Option<&[CellValue]>,
    rows: &[Vec<CellValue>],
) -> Result<()> {
    match TableKind::from_path(path) {
        Some(TableKind::Csv) => delimited::write_csv(path, header, rows),
        Some(TableKind::Excel) => excel::write_excel(path, header, rows),
        None => Err(AppError::UnsupportedFormat(path.display().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let result = write_rows(&path, None, &[vec![CellValue::Int(1)]]);
        assert!(matches!(result, Err(AppError::UnsupportedFormat(_))));
        assert!(!path.exists());
    }
}
