//! 出力行の組み立て
//!
//! `GroupAggregate` 1件につき1行。レイアウトは2種類:
//! - Counter: `Player, (列, 値)..., Count, MATCH TOTAL, WIN TOTAL, WIN% OVER`（ヘッダーあり）
//! - Star: `Player, (列, 値)..., Total, WIN% OVER`（ヘッダーなし、照合ツールの過去データ形式）

use crate::aggregate::GroupAggregate;
use crate::cell::CellValue;
use serde::{Deserialize, Serialize};

/// 出力1行
pub type OutputRow = Vec<CellValue>;

pub const COUNTER_SUMMARY_HEADERS: [&str; 4] = ["Count", "MATCH TOTAL", "WIN TOTAL", "WIN% OVER"];

/// 出力レイアウト
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// 度数列の集計（値を3桁ゼロ埋め、合計列あり）
    #[default]
    Counter,
    /// 符号列（+度数列）の集計
    Star,
}

impl OutputLayout {
    /// ファイル名の `Degree_<YES|NO>` 部分
    pub fn degree_tag(&self, include_partner: bool) -> &'static str {
        match self {
            OutputLayout::Counter => "YES",
            OutputLayout::Star if include_partner => "YES",
            OutputLayout::Star => "NO",
        }
    }
}

impl std::str::FromStr for OutputLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "counter" | "c" => Ok(OutputLayout::Counter),
            "star" | "s" => Ok(OutputLayout::Star),
            _ => Err(format!("Unknown layout: {}. Use counter or star", s)),
        }
    }
}

impl std::fmt::Display for OutputLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputLayout::Counter => write!(f, "counter"),
            OutputLayout::Star => write!(f, "star"),
        }
    }
}

/// 整数なら3桁ゼロ埋め（7 → "007"）、それ以外はそのまま
pub fn pad_value(value: &CellValue) -> CellValue {
    match value.as_int() {
        Some(i) => CellValue::Text(format!("{:03}", i)),
        None => value.clone(),
    }
}

/// 組み合わせ内の整数値の合計（整数でない値は0扱い）
pub fn value_sum(values: &[(String, CellValue)]) -> i64 {
    values.iter().filter_map(|(_, v)| v.as_int()).sum()
}

/// 集計結果から出力行を作る
pub fn build_row(group: &GroupAggregate, layout: OutputLayout) -> OutputRow {
    let mut row = Vec::with_capacity(group.values.len() * 2 + 5);
    row.push(group.player.clone());

    for (label, value) in &group.values {
        row.push(CellValue::Text(label.clone()));
        row.push(match layout {
            OutputLayout::Counter => pad_value(value),
            OutputLayout::Star => value.clone(),
        });
    }

    match layout {
        OutputLayout::Counter => {
            row.push(CellValue::Int(value_sum(&group.values)));
            row.push(CellValue::Int(group.total as i64));
            row.push(CellValue::Int(group.over as i64));
            row.push(CellValue::Float(group.win_rate));
        }
        OutputLayout::Star => {
            row.push(CellValue::Int(group.total as i64));
            row.push(CellValue::Float(group.win_rate));
        }
    }
    row
}

/// ヘッダー行
///
/// Counter は列/値ペアの見出しを空にするので、組み合わせサイズが違っても
/// 同じ形のヘッダーになる。Star はヘッダーなし。
pub fn header(layout: OutputLayout, pair_count: usize) -> Option<OutputRow> {
    match layout {
        OutputLayout::Counter => {
            let mut row = vec![CellValue::Text("Player".into())];
            row.extend(std::iter::repeat(CellValue::Empty).take(pair_count * 2));
            row.extend(
                COUNTER_SUMMARY_HEADERS
                    .iter()
                    .map(|h| CellValue::Text((*h).to_string())),
            );
            Some(row)
        }
        OutputLayout::Star => None,
    }
}
