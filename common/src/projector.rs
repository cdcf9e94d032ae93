//! 行の射影
//!
//! 組み合わせごとに、グループ化に必要な列（プレイヤー・選択列・結果列）だけを
//! 取り出す。入力行と出力行は1:1で、ここでは行を落とさない。

use crate::cell::CellValue;
use crate::column::ColumnSpec;
use crate::error::{Error, Result};
use crate::table::Table;
use serde::{Deserialize, Serialize};

/// 射影の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionPlan {
    /// プレイヤー識別子の列（常に0）
    pub player_index: usize,
    /// 結果（over/under/win/lose）の列
    pub result_index: usize,
    /// 各列の隣（度数列）も取り出す
    pub include_partner: bool,
}

impl Default for ProjectionPlan {
    fn default() -> Self {
        Self {
            player_index: 0,
            result_index: 7,
            include_partner: false,
        }
    }
}

impl ProjectionPlan {
    /// 組み合わせから実際に参照する列の並びを作る
    pub fn expand(&self, combination: &[ColumnSpec]) -> Vec<ColumnSpec> {
        let mut columns = Vec::with_capacity(combination.len() * 2);
        for spec in combination {
            columns.push(spec.clone());
            if self.include_partner {
                columns.push(spec.partner());
            }
        }
        columns
    }
}

/// 射影済みの1行
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRow {
    pub player: CellValue,
    /// (列記号, 値)
    pub values: Vec<(String, CellValue)>,
    /// 小文字化した結果
    pub result: String,
}

/// 表を組み合わせで射影
///
/// 参照列が表の幅を超える場合は `ColumnOutOfRange`。
pub fn project(
    table: &Table,
    combination: &[ColumnSpec],
    plan: &ProjectionPlan,
) -> Result<Vec<ProjectedRow>> {
    let columns = plan.expand(combination);
    let width = table.width();

    let fixed = [
        ("Player", plan.player_index),
        ("Result", plan.result_index),
    ];
    for (label, index) in fixed {
        if index >= width {
            return Err(Error::ColumnOutOfRange {
                label: label.to_string(),
                index,
                width,
            });
        }
    }
    if let Some(spec) = columns.iter().find(|c| c.index >= width) {
        return Err(Error::ColumnOutOfRange {
            label: spec.label.clone(),
            index: spec.index,
            width,
        });
    }

    let rows = (0..table.len())
        .map(|r| ProjectedRow {
            player: table.cell(r, plan.player_index).clone(),
            values: columns
                .iter()
                .map(|c| (c.label.clone(), table.cell(r, c.index).clone()))
                .collect(),
            result: table.cell(r, plan.result_index).to_string().to_lowercase(),
        })
        .collect();

    Ok(rows)
}
