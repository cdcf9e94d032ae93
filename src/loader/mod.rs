//! 表ファイルの読み込み
//!
//! ヘッダーなしで読み込み、位置ベースの `Table` にする。
//! - CSV: csvクレート（行ごとに列数が違ってもよい）
//! - Excel: calamine（先頭シート）

use crate::error::{AppError, Result};
use crate::scanner::{TableFile, TableKind};
use calamine::{open_workbook_auto, Data, Reader};
use degree_stats_common::{CellValue, RangeGroups, Table};
use std::path::Path;

/// 拡張子で判定して読み込み
pub fn read_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(AppError::FileNotFound(path.display().to_string()));
    }
    let kind = TableKind::from_path(path)
        .ok_or_else(|| AppError::UnsupportedFormat(path.display().to_string()))?;
    read_table_as(path, kind)
}

/// スキャン済みのファイルを読み込み（種類は走査時の判定を使う）
pub fn read_table_file(file: &TableFile) -> Result<Table> {
    read_table_as(&file.path, file.kind)
}

fn read_table_as(path: &Path, kind: TableKind) -> Result<Table> {
    match kind {
        TableKind::Csv => read_csv(path),
        TableKind::Excel => read_excel(path),
    }
}

fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(CellValue::from_text).collect());
    }
    Ok(Table::new(rows))
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::from_float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

fn read_excel(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| AppError::ExcelRead(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::ExcelRead(format!("{}: シートがありません", path.display())))?
        .map_err(|e| AppError::ExcelRead(format!("{}: {}", path.display(), e)))?;

    // 使用範囲がA列から始まらない場合は左を空セルで埋める
    let start_col = range.start().map(|(_, c)| c as usize).unwrap_or(0);

    let rows = range
        .rows()
        .map(|row| {
            let mut cells = vec![CellValue::Empty; start_col];
            cells.extend(row.iter().map(convert_cell));
            cells
        })
        .collect();

    Ok(Table::new(rows))
}

/// グループ定義テキスト（1行1レンジ）を読み込み
pub fn read_range_groups(path: &Path) -> Result<RangeGroups> {
    if !path.exists() {
        return Err(AppError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let groups = RangeGroups::parse(&content)?;
    if groups.is_empty() {
        return Err(AppError::Config(format!(
            "グループ定義が空です: {}",
            path.display()
        )));
    }
    Ok(groups)
}
