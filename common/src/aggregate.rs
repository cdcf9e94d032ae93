//! 結果の集計
//!
//! 射影済みの行を (プレイヤー, 選択列の値...) でグループ化し、
//! over/win と under/lose をそれぞれ合算して勝率を出す。

use crate::cell::CellValue;
use crate::projector::ProjectedRow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 集計対象の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Over,
    Under,
}

impl Outcome {
    /// "win" は Over、"lose" は Under に寄せる。それ以外は集計対象外
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "over" | "win" => Some(Outcome::Over),
            "under" | "lose" => Some(Outcome::Under),
            _ => None,
        }
    }
}

/// 1グループの集計結果（total > 0 のものだけ存在する）
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAggregate {
    pub player: CellValue,
    pub values: Vec<(String, CellValue)>,
    pub over: u64,
    pub under: u64,
    pub total: u64,
    pub win_rate: f64,
}

/// 勝率を小数第2位で丸める
///
/// 商の2進表現に対する偶数丸め（1/8 → 0.12, 3/8 → 0.38）。
pub fn round_rate(over: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let ratio = over as f64 / total as f64;
    format!("{:.2}", ratio).parse().unwrap_or(ratio)
}

#[derive(Default)]
struct Tally {
    over: u64,
    under: u64,
}

/// グループ化して集計
///
/// キーに空セルを含む行はどのグループにも入らない。
/// 出力はキーの昇順で、同じ入力なら常に同じ並びになる。
pub fn aggregate(rows: &[ProjectedRow]) -> Vec<GroupAggregate> {
    let labels: Vec<String> = match rows.first() {
        Some(first) => first.values.iter().map(|(l, _)| l.clone()).collect(),
        None => return Vec::new(),
    };

    let mut groups: BTreeMap<Vec<CellValue>, Tally> = BTreeMap::new();
    for row in rows {
        if row.player.is_empty() || row.values.iter().any(|(_, v)| v.is_empty()) {
            continue;
        }

        let mut key = Vec::with_capacity(row.values.len() + 1);
        key.push(row.player.clone());
        key.extend(row.values.iter().map(|(_, v)| v.clone()));

        let tally = groups.entry(key).or_default();
        match Outcome::parse(&row.result) {
            Some(Outcome::Over) => tally.over += 1,
            Some(Outcome::Under) => tally.under += 1,
            None => {}
        }
    }

    groups
        .into_iter()
        .filter_map(|(mut key, tally)| {
            let total = tally.over + tally.under;
            if total == 0 {
                return None;
            }
            let player = key.remove(0);
            let values = labels.iter().cloned().zip(key).collect();
            Some(GroupAggregate {
                player,
                values,
                over: tally.over,
                under: tally.under,
                total,
                win_rate: round_rate(tally.over, total),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(player: &str, value: i64, result: &str) -> ProjectedRow {
        ProjectedRow {
            player: player.into(),
            values: vec![("AQ".to_string(), CellValue::Int(value))],
            result: result.to_lowercase(),
        }
    }

    #[test]
    fn test_outcome_parse() {
        assert_eq!(Outcome::parse("over"), Some(Outcome::Over));
        assert_eq!(Outcome::parse("WIN"), Some(Outcome::Over));
        assert_eq!(Outcome::parse("Under"), Some(Outcome::Under));
        assert_eq!(Outcome::parse("lose"), Some(Outcome::Under));
        assert_eq!(Outcome::parse("push"), None);
        assert_eq!(Outcome::parse(""), None);
    }

    #[test]
    fn test_fold_win_and_lose() {
        let rows: Vec<ProjectedRow> = ["over", "win", "under", "lose", "push"]
            .iter()
            .map(|r| row("alice", 12, r))
            .collect();

        let groups = aggregate(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].over, 2);
        assert_eq!(groups[0].under, 2);
        assert_eq!(groups[0].total, 4);
        assert_eq!(groups[0].win_rate, 0.5);
    }

    #[test]
    fn test_push_only_group_dropped() {
        let rows = vec![row("alice", 12, "push"), row("bob", 3, "over")];
        let groups = aggregate(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].player, CellValue::Text("bob".into()));
    }

    #[test]
    fn test_groups_split_by_player_and_value() {
        let rows = vec![
            row("alice", 12, "over"),
            row("alice", 13, "over"),
            row("bob", 12, "under"),
            row("alice", 12, "under"),
        ];
        let groups = aggregate(&rows);
        assert_eq!(groups.len(), 3);

        let alice_12 = &groups[0];
        assert_eq!(alice_12.player, CellValue::Text("alice".into()));
        assert_eq!(alice_12.values[0], ("AQ".to_string(), CellValue::Int(12)));
        assert_eq!(alice_12.total, 2);
    }

    #[test]
    fn test_blank_keys_not_grouped() {
        let mut blank = row("alice", 12, "over");
        blank.values[0].1 = CellValue::Empty;
        let groups = aggregate(&[blank, row("", 1, "over")]);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_round_rate_ties_to_even() {
        assert_eq!(round_rate(1, 8), 0.12);
        assert_eq!(round_rate(3, 8), 0.38);
        assert_eq!(round_rate(2, 3), 0.67);
        assert_eq!(round_rate(1, 3), 0.33);
        assert_eq!(round_rate(4, 4), 1.0);
        assert_eq!(round_rate(0, 5), 0.0);
        assert_eq!(round_rate(0, 0), 0.0);
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let rows = vec![
            row("carol", 5, "over"),
            row("alice", 9, "under"),
            row("bob", 1, "win"),
        ];
        let first = aggregate(&rows);
        let mut reversed = rows.clone();
        reversed.reverse();
        let second = aggregate(&reversed);
        assert_eq!(first, second);
    }
}
