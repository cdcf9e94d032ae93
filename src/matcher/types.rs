use degree_stats_common::{DailySchema, HistoricalTrailer, SkippedRow};
use std::path::PathBuf;

/// 照合結果の出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchFormat {
    #[default]
    Xlsx,
    Csv,
}

impl MatchFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            MatchFormat::Xlsx => "xlsx",
            MatchFormat::Csv => "csv",
        }
    }
}

impl std::str::FromStr for MatchFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(MatchFormat::Xlsx),
            "csv" => Ok(MatchFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use xlsx or csv", s)),
        }
    }
}

impl std::fmt::Display for MatchFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// 照合の設定
#[derive(Debug, Clone)]
pub struct MatchOptions {
    pub schema: DailySchema,
    pub trailer: HistoricalTrailer,
    pub workers: usize,
    pub format: MatchFormat,
}

/// 読み込めなかった過去データファイル
#[derive(Debug, Clone)]
pub struct UnreadableFile {
    pub file: String,
    pub reason: String,
}

/// 照合全体の結果
#[derive(Debug, Clone)]
pub struct MatchSummary {
    pub history_files: usize,
    pub unreadable: Vec<UnreadableFile>,
    /// 検証を通った過去データ行数
    pub rows_checked: usize,
    pub daily_rows: usize,
    pub matches: usize,
    pub skipped: Vec<SkippedRow>,
    /// マッチ0件なら None（ファイルは書かない）
    pub output: Option<PathBuf>,
}
