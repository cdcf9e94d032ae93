//! 度数のレンジ置換
//!
//! 選択した列の整数値を、グループ定義ファイルのレンジラベル（"010-014" 等）に
//! 置き換えて `<stem>_<列記号>_Grouped.xlsx` に保存する。

use crate::error::{AppError, Result};
use crate::export::write_rows;
use crate::loader::{read_range_groups, read_table};
use degree_stats_common::{ColumnSet, RangeGroups, Table};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::info;

/// "AQ,AS" / "AQ AS" / `["AQ", "AS"]` 形式の列指定をパース
pub fn parse_column_list(text: &str) -> Result<ColumnSet> {
    lazy_static::lazy_static! {
        static ref LABEL_RE: Regex = Regex::new(r"^[A-Za-z]{1,3}$").unwrap();
    }

    if text.trim_start().starts_with('[') {
        return Ok(ColumnSet::from_json(text)?);
    }

    let labels: Vec<String> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_uppercase())
        .collect();

    if let Some(bad) = labels.iter().find(|l| !LABEL_RE.is_match(l)) {
        return Err(AppError::Config(format!("列記号が不正です: {}", bad)));
    }
    Ok(ColumnSet::from_labels(&labels)?)
}

pub fn output_path_for(input: &Path, columns: &ColumnSet) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    input.with_file_name(format!("{}_{}_Grouped.xlsx", stem, columns.labels().concat()))
}

/// 選択列の全セルをレンジラベルに置き換える（ヘッダー行も区別しない）
pub fn apply_groups(table: &mut Table, columns: &ColumnSet, groups: &RangeGroups) -> usize {
    let mut replaced = 0;
    for row in &mut table.rows {
        for spec in columns.specs() {
            if let Some(cell) = row.get_mut(spec.index) {
                let bucketed = groups.bucket(cell);
                if bucketed != *cell {
                    replaced += 1;
                    *cell = bucketed;
                }
            }
        }
    }
    replaced
}

pub fn run_grouper(input: &Path, groups_file: &Path, columns: &ColumnSet) -> Result<PathBuf> {
    let groups = read_range_groups(groups_file)?;
    let mut table = read_table(input)?;

    let width = table.width();
    if let Some(spec) = columns.specs().iter().find(|s| s.index >= width) {
        return Err(degree_stats_common::Error::ColumnOutOfRange {
            label: spec.label.clone(),
            index: spec.index,
            width,
        }
        .into());
    }

    let replaced = apply_groups(&mut table, columns, &groups);
    info!("{}セルを置換（{}グループ）", replaced, groups.len());

    let output = output_path_for(input, columns);
    write_rows(&output, None, &table.rows)?;
    Ok(output)
}
