//! 度数レンジ
//!
//! `"010-014"` のような "下限-上限" 文字列と、その判定。
//! パース失敗は `Result` で返し、一致判定では「不一致」として扱う。

use crate::cell::CellValue;
use crate::error::{Error, Result};

/// 閉区間 [low, high]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeRange {
    pub low: i64,
    pub high: i64,
}

impl DegreeRange {
    /// "下限-上限" をパース（区切りはちょうど1つ）
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split('-').collect();
        if parts.len() != 2 {
            return Err(Error::InvalidRange(raw.to_string()));
        }
        let low = parts[0]
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::InvalidRange(raw.to_string()))?;
        let high = parts[1]
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::InvalidRange(raw.to_string()))?;
        Ok(Self { low, high })
    }

    pub fn contains(&self, value: i64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// デイリー値が過去データのレンジに入るか（パース失敗はエラー）
pub fn try_degree_match(daily: &str, hist_range: &str) -> Result<bool> {
    let range = DegreeRange::parse(hist_range)?;
    let value = daily
        .trim()
        .parse::<i64>()
        .map_err(|_| Error::NotInteger(daily.to_string()))?;
    Ok(range.contains(value))
}

/// デイリー値が過去データのレンジに入るか（パース失敗は不一致）
pub fn degree_match(daily: &str, hist_range: &str) -> bool {
    try_degree_match(daily, hist_range).unwrap_or(false)
}

/// グループ定義（1行1レンジのテキスト）
#[derive(Debug, Clone, PartialEq)]
pub struct RangeGroups {
    groups: Vec<(String, DegreeRange)>,
}

impl RangeGroups {
    /// テキストからパース。空行は無視、不正な行は行番号付きでエラー
    pub fn parse(text: &str) -> Result<Self> {
        let mut groups = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let label = line.trim();
            if label.is_empty() {
                continue;
            }
            let range = DegreeRange::parse(label)
                .map_err(|_| Error::InvalidRange(format!("line {}: {}", line_no + 1, label)))?;
            groups.push((label.to_string(), range));
        }
        Ok(Self { groups })
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 値を所属グループのラベルに置き換える
    ///
    /// 数値の小数部は切り捨て（12.5 → 12）。数値でない値はそのまま。
    /// どのグループにも入らない数値は空セル。
    pub fn bucket(&self, value: &CellValue) -> CellValue {
        let v = match value {
            CellValue::Float(f) if f.is_finite() => f.trunc() as i64,
            other => match other.as_int() {
                Some(v) => v,
                None => return value.clone(),
            },
        };
        self.groups
            .iter()
            .find(|(_, range)| range.contains(v))
            .map(|(label, _)| CellValue::Text(label.clone()))
            .unwrap_or(CellValue::Empty)
    }
}
