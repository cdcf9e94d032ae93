//! 列定義（列記号 ↔ 位置インデックス）
//!
//! 列記号のマッピングはグローバルな辞書ではなく `ColumnSet` として
//! 各処理に明示的に渡す。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 列記号を0始まりのインデックスに変換（"A" → 0, "AQ" → 42）
pub fn column_index(label: &str) -> Result<usize> {
    let trimmed = label.trim();
    if trimmed.is_empty() || trimmed.len() > 3 {
        return Err(Error::InvalidColumn(label.to_string()));
    }

    let mut acc: usize = 0;
    for c in trimmed.chars() {
        let upper = c.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(Error::InvalidColumn(label.to_string()));
        }
        acc = acc * 26 + (upper as usize - 'A' as usize + 1);
    }
    Ok(acc - 1)
}

/// インデックスを列記号に変換（42 → "AQ"）
pub fn column_label(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// 列記号と位置の組
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub label: String,
    pub index: usize,
}

impl ColumnSpec {
    pub fn new(label: impl Into<String>, index: usize) -> Self {
        Self {
            label: label.into(),
            index,
        }
    }

    /// 列記号から生成
    pub fn from_label(label: &str) -> Result<Self> {
        let index = column_index(label)?;
        Ok(Self::new(column_label(index), index))
    }

    /// 隣の列（符号列 "AP" に対する度数列 "AQ"）
    pub fn partner(&self) -> ColumnSpec {
        ColumnSpec::new(column_label(self.index + 1), self.index + 1)
    }
}

/// 順序付きの列セット
///
/// 組み合わせの生成順はこの並び順に従う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ColumnSet {
    specs: Vec<ColumnSpec>,
}

impl ColumnSet {
    /// 列セットを検証して生成（空・重複は不可）
    pub fn new(specs: Vec<ColumnSpec>) -> Result<Self> {
        if specs.is_empty() {
            return Err(Error::Config("column set is empty".into()));
        }
        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.index) {
                return Err(Error::Config(format!("duplicate column: {}", spec.label)));
            }
        }
        Ok(Self { specs })
    }

    /// 列記号のリストから生成
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self> {
        let specs = labels
            .iter()
            .map(|l| ColumnSpec::from_label(l.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(specs)
    }

    /// JSON配列（`["AQ", "AS"]`）から生成
    pub fn from_json(json: &str) -> Result<Self> {
        let labels: Vec<String> = serde_json::from_str(json)?;
        Self::from_labels(&labels)
    }

    fn stepped(first: usize, last: usize, step: usize) -> Self {
        let specs = (first..=last)
            .step_by(step)
            .map(|i| ColumnSpec::new(column_label(i), i))
            .collect();
        Self { specs }
    }

    /// 度数列 AQ, AS, ..., BK
    pub fn counter() -> Self {
        Self::stepped(42, 62, 2)
    }

    /// 符号列 AP, AR, ..., BJ（度数列は各列の隣）
    pub fn star() -> Self {
        Self::stepped(41, 61, 2)
    }

    /// デイリーファイルの比較対象 AP..BK
    pub fn daily() -> Self {
        Self::stepped(41, 62, 1)
    }

    pub fn specs(&self) -> &[ColumnSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&ColumnSpec> {
        self.specs.iter().find(|s| s.label == label)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.specs.iter().map(|s| s.label.as_str()).collect()
    }
}

impl TryFrom<Vec<String>> for ColumnSet {
    type Error = Error;

    fn try_from(labels: Vec<String>) -> Result<Self> {
        Self::from_labels(&labels)
    }
}

impl From<ColumnSet> for Vec<String> {
    fn from(set: ColumnSet) -> Self {
        set.specs.into_iter().map(|s| s.label).collect()
    }
}
