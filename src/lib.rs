//! degree-stats: 列の組み合わせ集計・度数レンジ照合
//!
//! 集計・照合のロジックは `degree_stats_common`、ここはファイル入出力と並列実行。

pub mod bulk;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod grouper;
pub mod loader;
pub mod logging;
pub mod matcher;
pub mod prompt;
pub mod scanner;
