//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    #[error("Column {label} (index {index}) is out of range for a table of width {width}")]
    ColumnOutOfRange {
        label: String,
        index: usize,
        width: usize,
    },

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Not an integer: {0}")]
    NotInteger(String),

    #[error("Malformed row: {0}")]
    MalformedRow(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
