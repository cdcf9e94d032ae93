//! 過去データとデイリーデータの照合
//!
//! 過去データ1行は `Player, 列, 値, 列, 値, ..., <集計列>` の並び。
//! 集計列以外の全フィールドがデイリー行と一致した場合だけマッチとする:
//! - 度数列: デイリー値が過去データの "下限-上限" に入るか
//! - それ以外: 表示文字列の完全一致

use crate::cell::{CellValue, EMPTY_CELL};
use crate::column::ColumnSet;
use crate::error::{Error, Result};
use crate::range::degree_match;
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 過去データ行の末尾にある集計列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoricalTrailer {
    /// `Total, WinPercent`（Star出力）
    #[default]
    Legacy,
    /// `Count, Total, WinTotal, WinPercent`（Counter出力）
    Counter,
}

impl HistoricalTrailer {
    pub fn names(&self) -> &'static [&'static str] {
        match self {
            HistoricalTrailer::Legacy => &["Total", "WinPercent"],
            HistoricalTrailer::Counter => &["Count", "Total", "WinTotal", "WinPercent"],
        }
    }
}

impl std::str::FromStr for HistoricalTrailer {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" | "star" => Ok(HistoricalTrailer::Legacy),
            "counter" => Ok(HistoricalTrailer::Counter),
            _ => Err(format!("Unknown trailer: {}. Use legacy or counter", s)),
        }
    }
}

impl std::fmt::Display for HistoricalTrailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoricalTrailer::Legacy => write!(f, "legacy"),
            HistoricalTrailer::Counter => write!(f, "counter"),
        }
    }
}

/// ラベル→値に分解した過去データ1行
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalRecord {
    pub player: CellValue,
    /// 比較対象（列記号, 値）
    pub fields: Vec<(String, CellValue)>,
    /// 比較しない集計列（名前, 値）
    pub trailer: Vec<(String, CellValue)>,
}

impl HistoricalRecord {
    /// 行を検証しながら分解する
    ///
    /// 末尾の空セルは無視。ペア部分が奇数長、ラベルが空・重複・予約名の場合は
    /// `MalformedRow`。
    pub fn parse(row: &[CellValue], trailer: HistoricalTrailer) -> Result<Self> {
        let end = row
            .iter()
            .rposition(|c| !c.is_empty())
            .map(|i| i + 1)
            .unwrap_or(0);
        let names = trailer.names();

        if end < 1 + names.len() {
            return Err(Error::MalformedRow(format!(
                "{} cells, at least {} required",
                end,
                1 + names.len()
            )));
        }

        let pair_end = end - names.len();
        let pairs = &row[1..pair_end];
        if pairs.len() % 2 != 0 {
            return Err(Error::MalformedRow(format!(
                "odd number of label/value cells ({})",
                pairs.len()
            )));
        }

        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(pairs.len() / 2);
        for pair in pairs.chunks(2) {
            let label = pair[0].to_string().trim().to_string();
            if label.is_empty() {
                return Err(Error::MalformedRow("empty label".into()));
            }
            if label == "Player" || names.contains(&label.as_str()) {
                return Err(Error::MalformedRow(format!("reserved label: {}", label)));
            }
            if !seen.insert(label.clone()) {
                return Err(Error::MalformedRow(format!("duplicate label: {}", label)));
            }
            fields.push((label, pair[1].clone()));
        }

        let trailer = names
            .iter()
            .zip(&row[pair_end..end])
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect();

        Ok(Self {
            player: row[0].clone(),
            fields,
            trailer,
        })
    }
}

/// デイリーファイルの列構成
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySchema {
    pub player_index: usize,
    pub columns: ColumnSet,
    /// レンジで比較する列
    pub degree_labels: Vec<String>,
}

impl DailySchema {
    /// 0列目 + AP..BK、度数列は AQ, AS, ..., BK
    pub fn standard() -> Self {
        Self {
            player_index: 0,
            columns: ColumnSet::daily(),
            degree_labels: ColumnSet::counter()
                .labels()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    pub fn is_degree(&self, label: &str) -> bool {
        self.degree_labels.iter().any(|l| l == label)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        if label == "Player" {
            return Some(self.player_index);
        }
        self.columns.get(label).map(|s| s.index)
    }

    /// 過去データのラベルが全てデイリー側にあるか
    pub fn validate(&self, record: &HistoricalRecord) -> Result<()> {
        match record
            .fields
            .iter()
            .find(|(label, _)| self.index_of(label).is_none())
        {
            Some((label, _)) => Err(Error::UnknownField(label.clone())),
            None => Ok(()),
        }
    }
}

fn field_matches(hist: &CellValue, daily: &CellValue, degree: bool) -> bool {
    // 過去データ側が空のフィールドは条件なし
    if hist.is_empty() {
        return true;
    }
    if daily.is_empty() {
        return false;
    }
    let hist = hist.to_string();
    let daily = daily.to_string();
    if degree {
        degree_match(&daily, &hist)
    } else {
        daily == hist
    }
}

/// 過去データ1行とデイリー1行が全フィールドで一致するか
pub fn record_matches(
    record: &HistoricalRecord,
    daily_row: &[CellValue],
    schema: &DailySchema,
) -> Result<bool> {
    let cell = |index: usize| daily_row.get(index).unwrap_or(&EMPTY_CELL);

    if !field_matches(&record.player, cell(schema.player_index), false) {
        return Ok(false);
    }
    for (label, value) in &record.fields {
        let index = schema
            .index_of(label)
            .ok_or_else(|| Error::UnknownField(label.clone()))?;
        if !field_matches(value, cell(index), schema.is_degree(label)) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// 過去データの行（読み込み元の位置つき）
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalRow {
    pub source: String,
    pub line: usize,
    pub cells: Vec<CellValue>,
}

/// スキップした行
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub source: String,
    pub line: usize,
    pub reason: String,
}

/// チャンク1つの照合結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkOutcome {
    /// デイリー行 + 過去データ行
    pub matches: Vec<Vec<CellValue>>,
    pub rows_checked: usize,
    pub skipped: Vec<SkippedRow>,
}

impl ChunkOutcome {
    pub fn merge(&mut self, other: ChunkOutcome) {
        self.matches.extend(other.matches);
        self.rows_checked += other.rows_checked;
        self.skipped.extend(other.skipped);
    }
}

/// ceil(total / workers)、最低1
pub fn chunk_size(total: usize, workers: usize) -> usize {
    let workers = workers.max(1);
    total.div_ceil(workers).max(1)
}

/// チャンク内の全過去データ行をデイリー表の全行と照合
///
/// 不正な行は `skipped` に記録して次の行へ進む。
pub fn match_chunk(
    chunk: &[HistoricalRow],
    daily: &Table,
    schema: &DailySchema,
    trailer: HistoricalTrailer,
) -> ChunkOutcome {
    let mut outcome = ChunkOutcome::default();
    // 過去データ側はどの行でも同じ列から始める
    let width = daily.width();

    for row in chunk {
        let record = match HistoricalRecord::parse(&row.cells, trailer)
            .and_then(|r| schema.validate(&r).map(|_| r))
        {
            Ok(r) => r,
            Err(e) => {
                outcome.skipped.push(SkippedRow {
                    source: row.source.clone(),
                    line: row.line,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        outcome.rows_checked += 1;

        for daily_row in daily.rows.iter().filter(|r| r.iter().any(|c| !c.is_empty())) {
            if let Ok(true) = record_matches(&record, daily_row, schema) {
                let mut matched = daily_row.clone();
                matched.resize(width, CellValue::Empty);
                matched.extend(row.cells.iter().cloned());
                outcome.matches.push(matched);
            }
        }
    }

    outcome
}
