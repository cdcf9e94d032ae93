//! 対話入力

use crate::error::{AppError, Result};
use dialoguer::Select;
use std::io::IsTerminal;

/// 標準入力が端末か
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

/// 選択肢（1〜max）と初期選択位置
pub fn size_choices(max: usize, default: usize) -> (Vec<usize>, usize) {
    let choices: Vec<usize> = (1..=max).collect();
    let position = choices.iter().position(|&s| s == default).unwrap_or(0);
    (choices, position)
}

/// 組み合わせサイズを選択
///
/// 非対話環境では既定値をそのまま返す。
pub fn select_set_size(max: usize, default: usize) -> Result<usize> {
    if !is_interactive() {
        return Ok(default);
    }

    let (choices, position) = size_choices(max, default);
    let items: Vec<String> = choices.iter().map(|s| format!("{}列の組み合わせ", s)).collect();

    let index = Select::new()
        .with_prompt("組み合わせサイズを選択")
        .items(&items)
        .default(position)
        .interact()
        .map_err(|e| AppError::Config(format!("入力エラー: {}", e)))?;

    Ok(choices[index])
}
