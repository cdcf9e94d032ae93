//! 列の組み合わせ生成
//!
//! N列からk列を選ぶ全組み合わせを辞書順に列挙する。
//! 各組み合わせ内の列は元の列セットの並び順を保つ。

use crate::column::{ColumnSet, ColumnSpec};

/// 列の組み合わせ（元の並び順）
pub type Combination = Vec<ColumnSpec>;

/// C(n, k)。k > n なら 0
pub fn combination_count(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut numerator = 1u128;
    let mut denominator = 1u128;
    for i in 0..k {
        numerator *= (n - i) as u128;
        denominator *= (i + 1) as u128;
    }
    numerator / denominator
}

/// インデックス組み合わせのイテレータ
///
/// `[0, 1, .., k-1]` から始め、右端から繰り上げていく。
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    current: Vec<usize>,
    exhausted: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            current: (0..k).collect(),
            exhausted: k == 0 || k > n,
        }
    }

    fn advance(&mut self) {
        let k = self.current.len();
        for i in (0..k).rev() {
            let max_val = self.n - (k - i);
            if self.current[i] < max_val {
                self.current[i] += 1;
                for j in (i + 1)..k {
                    self.current[j] = self.current[j - 1] + 1;
                }
                return;
            }
        }
        self.exhausted = true;
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let combo = self.current.clone();
        self.advance();
        Some(combo)
    }
}

/// 列セットからサイズkの組み合わせを全て生成
pub fn combinations(columns: &ColumnSet, k: usize) -> Vec<Combination> {
    let specs = columns.specs();
    Combinations::new(specs.len(), k)
        .map(|indices| indices.into_iter().map(|i| specs[i].clone()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_combination_count() {
        assert_eq!(combination_count(11, 3), 165);
        assert_eq!(combination_count(11, 8), 165);
        assert_eq!(combination_count(5, 0), 1);
        assert_eq!(combination_count(3, 4), 0);
        assert_eq!(combination_count(22, 11), 705_432);
    }

    #[test]
    fn test_counter_preset_size_3() {
        let columns = ColumnSet::counter();
        let combos = combinations(&columns, 3);
        assert_eq!(combos.len(), 165);

        let mut seen = HashSet::new();
        for combo in &combos {
            let labels: Vec<&str> = combo.iter().map(|c| c.label.as_str()).collect();
            let distinct: HashSet<&str> = labels.iter().copied().collect();
            assert_eq!(distinct.len(), 3);

            let mut as_set: Vec<&str> = labels.clone();
            as_set.sort();
            assert!(seen.insert(as_set), "duplicate combination: {:?}", labels);

            // 元の並び順を保つ
            assert!(combo.windows(2).all(|w| w[0].index < w[1].index));
        }
    }

    #[test]
    fn test_lexicographic_order() {
        let combos: Vec<Vec<usize>> = Combinations::new(4, 2).collect();
        assert_eq!(
            combos,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn test_edge_sizes() {
        assert_eq!(Combinations::new(3, 3).count(), 1);
        assert_eq!(Combinations::new(3, 1).count(), 3);
        assert_eq!(Combinations::new(3, 0).count(), 0);
        assert_eq!(Combinations::new(3, 4).count(), 0);
    }

    #[test]
    fn test_counts_match_for_all_sizes() {
        let columns = ColumnSet::counter();
        for k in 1..=11 {
            assert_eq!(
                combinations(&columns, k).len() as u128,
                combination_count(11, k)
            );
        }
    }

    #[test]
    fn test_order_follows_source_mapping_not_sorted() {
        let columns = ColumnSet::from_labels(&["BK", "AQ", "BA"]).unwrap();
        let combos = combinations(&columns, 2);
        let labels: Vec<Vec<&str>> = combos
            .iter()
            .map(|c| c.iter().map(|s| s.label.as_str()).collect())
            .collect();
        assert_eq!(
            labels,
            vec![vec!["BK", "AQ"], vec!["BK", "BA"], vec!["AQ", "BA"]]
        );
    }
}
