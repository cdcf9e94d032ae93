//! Excel出力
//!
//! rust_xlsxwriterで先頭シートに書き出す。数値は数値セルのまま。

use crate::error::{AppError, Result};
use degree_stats_common::CellValue;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &CellValue) -> Result<()> {
    let written = match cell {
        CellValue::Empty => return Ok(()),
        CellValue::Int(i) => worksheet.write_number(row, col, *i as f64),
        CellValue::Float(f) => worksheet.write_number(row, col, *f),
        CellValue::Bool(b) => worksheet.write_boolean(row, col, *b),
        CellValue::Text(s) => worksheet.write_string(row, col, s.as_str()),
    };
    written
        .map(|_| ())
        .map_err(|e| AppError::ExcelWrite(format!("セル書き込みエラー ({}, {}): {}", row, col, e)))
}

pub fn write_excel(
    path: &Path,
    header: Option<&[CellValue]>,
    rows: &[Vec<CellValue>],
) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let all_rows = header.into_iter().chain(rows.iter().map(Vec::as_slice));
    for (r, row) in all_rows.enumerate() {
        let r = u32::try_from(r)
            .map_err(|_| AppError::ExcelWrite(format!("行数が多すぎます: {}", r)))?;
        for (c, cell) in row.iter().enumerate() {
            let c = u16::try_from(c)
                .map_err(|_| AppError::ExcelWrite(format!("列数が多すぎます: {}", c)))?;
            write_cell(worksheet, r, c, cell)?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| AppError::ExcelWrite(format!("Excel保存エラー: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::read_table;

    #[test]
    fn test_excel_round_trip_keeps_positions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        let rows = vec![
            vec![
                CellValue::Text("alice".into()),
                CellValue::Empty,
                CellValue::Int(12),
                CellValue::Text("010-014".into()),
            ],
            vec![CellValue::Text("bob".into()), CellValue::Float(0.75)],
        ];
        write_excel(&path, None, &rows).unwrap();
        assert!(path.exists());

        let table = read_table(&path).unwrap();
        assert_eq!(table.cell(0, 0), &CellValue::Text("alice".into()));
        assert_eq!(table.cell(0, 1), &CellValue::Empty);
        assert_eq!(table.cell(0, 2), &CellValue::Int(12));
        assert_eq!(table.cell(0, 3), &CellValue::Text("010-014".into()));
        assert_eq!(table.cell(1, 1), &CellValue::Float(0.75));
    }
}
