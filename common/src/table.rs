//! 位置ベースの表データ
//!
//! ヘッダーなしで読み込んだシートをそのまま保持する。
//! 列は0始まりのインデックスで参照し、0列目は常にプレイヤー識別子。

use crate::cell::{CellValue, EMPTY_CELL};

/// ヘッダーなしの表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// 最長行の列数
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// セル取得（短い行の範囲外は空セル）
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

impl From<Vec<Vec<CellValue>>> for Table {
    fn from(rows: Vec<Vec<CellValue>>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_uses_longest_row() {
        let table = Table::new(vec![
            vec![CellValue::Int(1)],
            vec![CellValue::Int(1), CellValue::Int(2), CellValue::Int(3)],
        ]);
        assert_eq!(table.width(), 3);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_cell_past_short_row_is_empty() {
        let table = Table::new(vec![vec![CellValue::Int(1)]]);
        assert_eq!(table.cell(0, 0), &CellValue::Int(1));
        assert_eq!(table.cell(0, 5), &CellValue::Empty);
        assert_eq!(table.cell(9, 0), &CellValue::Empty);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::default();
        assert!(table.is_empty());
        assert_eq!(table.width(), 0);
    }
}
