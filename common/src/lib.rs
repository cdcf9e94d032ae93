//! Degree Stats Common Library
//!
//! 列の組み合わせ集計と照合のエンジン。ファイル入出力は持たない。
//!
//! 処理の流れ:
//! 組み合わせ生成 → 行の射影 → 結果の集計 → 出力行の組み立て
//! （照合ツールは過去データ×デイリーデータを別経路で突き合わせる）

pub mod cell;
pub mod table;
pub mod column;
pub mod combination;
pub mod projector;
pub mod aggregate;
pub mod output;
pub mod range;
pub mod matcher;
pub mod error;

pub use cell::CellValue;
pub use table::Table;
pub use column::{column_index, column_label, ColumnSet, ColumnSpec};
pub use combination::{combination_count, combinations, Combination, Combinations};
pub use projector::{project, ProjectedRow, ProjectionPlan};
pub use aggregate::{aggregate, round_rate, GroupAggregate, Outcome};
pub use output::{build_row, header, OutputLayout, OutputRow};
pub use range::{degree_match, try_degree_match, DegreeRange, RangeGroups};
pub use matcher::{
    chunk_size, match_chunk, record_matches, ChunkOutcome, DailySchema, HistoricalRecord,
    HistoricalRow, HistoricalTrailer, SkippedRow,
};
pub use error::{Error, Result};
