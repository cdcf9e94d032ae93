//! セル値の型定義
//!
//! xlsx/csvどちらから読んでも同じ値になるよう正規化する:
//! - 整数値の浮動小数（`12.0`）は `Int(12)`
//! - 空文字列は `Empty`

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// 範囲外参照で返す空セル
pub(crate) static EMPTY_CELL: CellValue = CellValue::Empty;

/// スプレッドシートの1セル
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// 区切りテキストのセルを数値/文字列に振り分ける
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Int(i);
        }
        let looks_numeric = trimmed.chars().any(|c| c.is_ascii_digit());
        match trimmed.parse::<f64>() {
            Ok(f) if looks_numeric && f.is_finite() => CellValue::from_float(f),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    /// 整数値の浮動小数は `Int` に寄せる
    pub fn from_float(value: f64) -> Self {
        if value.is_finite()
            && value.fract() == 0.0
            && value >= i64::MIN as f64
            && value <= i64::MAX as f64
        {
            CellValue::Int(value as i64)
        } else {
            CellValue::Float(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 整数として解釈できれば値を返す
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            CellValue::Float(f) => match CellValue::from_float(*f) {
                CellValue::Int(i) => Some(i),
                _ => None,
            },
            CellValue::Text(s) => s.trim().parse::<i64>().ok(),
            CellValue::Bool(_) | CellValue::Empty => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::Text(_) => 3,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
            CellValue::Int(i) => write!(f, "{}", i),
            // 1.0 は "1.0"（整数と見分けがつくように）
            CellValue::Float(v) if v.fract() == 0.0 && v.abs() < 1e16 => write!(f, "{:.1}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Empty, Empty) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            // 同値なら Int を先に置く（Int と Float は等しくならない）
            (Int(a), Float(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Float(a), Int(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (Text(a), Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_numbers() {
        assert_eq!(CellValue::from_text("012"), CellValue::Int(12));
        assert_eq!(CellValue::from_text(" 7 "), CellValue::Int(7));
        assert_eq!(CellValue::from_text("12.0"), CellValue::Int(12));
        assert_eq!(CellValue::from_text("0.5"), CellValue::Float(0.5));
    }

    #[test]
    fn test_from_text_strings() {
        assert_eq!(CellValue::from_text(""), CellValue::Empty);
        assert_eq!(CellValue::from_text("   "), CellValue::Empty);
        assert_eq!(CellValue::from_text("Virgo"), CellValue::Text("Virgo".into()));
        assert_eq!(CellValue::from_text("010-014"), CellValue::Text("010-014".into()));
        assert_eq!(CellValue::from_text("inf"), CellValue::Text("inf".into()));
    }

    #[test]
    fn test_as_int() {
        assert_eq!(CellValue::Int(7).as_int(), Some(7));
        assert_eq!(CellValue::Float(7.0).as_int(), Some(7));
        assert_eq!(CellValue::Float(7.5).as_int(), None);
        assert_eq!(CellValue::Text(" 012 ".into()).as_int(), Some(12));
        assert_eq!(CellValue::Text("abc".into()).as_int(), None);
        assert_eq!(CellValue::Empty.as_int(), None);
        assert_eq!(CellValue::Bool(true).as_int(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Int(12).to_string(), "12");
        assert_eq!(CellValue::Float(0.25).to_string(), "0.25");
        assert_eq!(CellValue::Float(1.0).to_string(), "1.0");
        assert_eq!(CellValue::Text("Leo".into()).to_string(), "Leo");
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Bool(false).to_string(), "False");
    }

    #[test]
    fn test_ordering_across_kinds() {
        let mut values = vec![
            CellValue::Text("a".into()),
            CellValue::Int(3),
            CellValue::Empty,
            CellValue::Float(2.5),
            CellValue::Bool(true),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                CellValue::Empty,
                CellValue::Bool(true),
                CellValue::Float(2.5),
                CellValue::Int(3),
                CellValue::Text("a".into()),
            ]
        );
    }

    #[test]
    fn test_int_and_text_are_distinct() {
        assert_ne!(CellValue::Int(12), CellValue::Text("12".into()));
        assert_ne!(CellValue::Int(12), CellValue::Float(12.0));
    }
}
