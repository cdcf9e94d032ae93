use degree_stats_common::{ColumnSet, OutputLayout, ProjectionPlan};
use serde::Serialize;
use std::path::PathBuf;

/// 一括集計の設定
#[derive(Debug, Clone)]
pub struct BulkOptions {
    pub layout: OutputLayout,
    pub columns: ColumnSet,
    /// 組み合わせサイズ k
    pub set_size: usize,
    pub plan: ProjectionPlan,
    /// 並列数
    pub workers: usize,
}

impl BulkOptions {
    /// 出力ヘッダーの列/値ペア数
    pub fn pair_count(&self) -> usize {
        if self.plan.include_partner {
            self.set_size * 2
        } else {
            self.set_size
        }
    }
}

/// ファイル単位の処理結果
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum FileState {
    #[serde(rename_all = "camelCase")]
    Completed {
        output: PathBuf,
        rows: usize,
        skipped_combinations: usize,
    },
    /// 集計結果が0件（ファイルは書かない）
    #[serde(rename_all = "camelCase")]
    Empty { skipped_combinations: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStatus {
    pub file: String,
    #[serde(flatten)]
    pub state: FileState,
}

impl FileStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self.state, FileState::Completed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, FileState::Failed { .. })
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            FileState::Completed { output, rows, skipped_combinations } => {
                write!(f, "{} completed: {}行 → {}", self.file, rows, output.display())?;
                if *skipped_combinations > 0 {
                    write!(f, "（{}組み合わせをスキップ）", skipped_combinations)?;
                }
                Ok(())
            }
            FileState::Empty { .. } => write!(f, "{} empty: 集計結果なし", self.file),
            FileState::Failed { reason } => write!(f, "{} failed: {}", self.file, reason),
        }
    }
}

/// バッチ全体の結果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub layout: OutputLayout,
    pub set_size: usize,
    pub combinations: usize,
    pub files: Vec<FileStatus>,
    pub finished_at: String,
}

impl BatchSummary {
    pub fn completed(&self) -> usize {
        self.files.iter().filter(|f| f.is_completed()).count()
    }

    pub fn failed(&self) -> usize {
        self.files.iter().filter(|f| f.is_failed()).count()
    }
}
