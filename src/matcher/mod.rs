//! デイリーデータと過去データの照合
//!
//! 過去データフォルダの全行を `workers` 個の連続したチャンクに分け、
//! 各チャンクをデイリー表全体と突き合わせる。結果は最後に1回だけ書き出す。

mod types;

pub use types::{MatchFormat, MatchOptions, MatchSummary, UnreadableFile};

use crate::error::{AppError, Result};
use crate::export::write_rows;
use crate::loader::{read_table, read_table_file};
use crate::scanner::scan_tables;
use degree_stats_common::{chunk_size, match_chunk, ChunkOutcome, HistoricalRow};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// `<デイリーのstem>_Matches.<ext>`（デイリーファイルと同じフォルダ）
pub fn output_path_for(daily_file: &Path, format: MatchFormat) -> PathBuf {
    let stem = daily_file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "daily".to_string());
    daily_file.with_file_name(format!("{}_Matches.{}", stem, format.extension()))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// 過去データフォルダの全行を読み込む
///
/// 読めないファイルは警告してスキップ。デイリーファイル自身は対象外。
pub fn load_history(
    folder: &Path,
    daily_file: &Path,
) -> Result<(usize, Vec<HistoricalRow>, Vec<UnreadableFile>)> {
    let files = scan_tables(folder)?;
    let files: Vec<_> = files
        .into_iter()
        .filter(|f| !same_file(&f.path, daily_file))
        .filter(|f| !f.file_name.contains("_Matches."))
        .collect();
    if files.is_empty() {
        return Err(AppError::NoTablesFound(folder.display().to_string()));
    }

    let mut rows = Vec::new();
    let mut unreadable = Vec::new();
    for file in &files {
        match read_table_file(file) {
            Ok(table) => {
                debug!("{}: {}行", file.file_name, table.len());
                rows.extend(table.rows.into_iter().enumerate().map(|(i, cells)| {
                    HistoricalRow {
                        source: file.file_name.clone(),
                        line: i + 1,
                        cells,
                    }
                }));
            }
            Err(e) => {
                warn!("{} を読み込めません: {}", file.file_name, e);
                unreadable.push(UnreadableFile {
                    file: file.file_name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok((files.len(), rows, unreadable))
}

/// デイリーファイルを過去データフォルダ全体と照合
pub fn run_matcher(
    daily_file: &Path,
    history_folder: &Path,
    options: &MatchOptions,
) -> Result<MatchSummary> {
    if options.workers == 0 {
        return Err(AppError::Config("workers は1以上で指定してください".into()));
    }

    let daily = read_table(daily_file)?;
    let (history_files, rows, unreadable) = load_history(history_folder, daily_file)?;

    let size = chunk_size(rows.len(), options.workers);
    let chunks: Vec<&[HistoricalRow]> = rows.chunks(size).collect();
    info!(
        "過去データ {}行 → {}チャンク（{}行ずつ）, デイリー {}行",
        rows.len(),
        chunks.len(),
        size,
        daily.len()
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers)
        .build()
        .map_err(|e| AppError::Config(format!("ワーカープールを作成できません: {}", e)))?;

    let progress = ProgressBar::new(chunks.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} chunks") {
        progress.set_style(style);
    }

    // チャンクの順番を保ったまま結合する
    let outcomes: Vec<ChunkOutcome> = pool.install(|| {
        chunks
            .par_iter()
            .map(|chunk| {
                let outcome = match_chunk(chunk, &daily, &options.schema, options.trailer);
                progress.inc(1);
                outcome
            })
            .collect()
    });
    progress.finish_and_clear();

    let mut merged = ChunkOutcome::default();
    for outcome in outcomes {
        merged.merge(outcome);
    }

    for skipped in &merged.skipped {
        warn!("{} {}行目をスキップ: {}", skipped.source, skipped.line, skipped.reason);
    }

    let output = if merged.matches.is_empty() {
        info!("マッチなし");
        None
    } else {
        let path = output_path_for(daily_file, options.format);
        write_rows(&path, None, &merged.matches)?;
        Some(path)
    };

    Ok(MatchSummary {
        history_files,
        unreadable,
        rows_checked: merged.rows_checked,
        daily_rows: daily.len(),
        matches: merged.matches.len(),
        skipped: merged.skipped,
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        let path = output_path_for(Path::new("/data/daily_0412.xlsx"), MatchFormat::Csv);
        assert_eq!(path, PathBuf::from("/data/daily_0412_Matches.csv"));
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("XLSX".parse::<MatchFormat>().unwrap(), MatchFormat::Xlsx);
        assert_eq!("csv".parse::<MatchFormat>().unwrap(), MatchFormat::Csv);
        assert!("pdf".parse::<MatchFormat>().is_err());
    }

    #[test]
    fn test_load_history_skips_unreadable_and_daily() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.csv"), "alice,AT,Virgo,5,0.8\nbob,AT,Leo,3,0.33\n").unwrap();
        std::fs::write(dir.path().join("broken.xlsx"), "not a workbook").unwrap();
        let daily = dir.path().join("daily.csv");
        std::fs::write(&daily, "alice\n").unwrap();

        let (files, rows, unreadable) = load_history(dir.path(), &daily).unwrap();
        assert_eq!(files, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].source, "a.csv");
        assert_eq!(rows[1].line, 2);
        assert_eq!(unreadable.len(), 1);
        assert_eq!(unreadable[0].file, "broken.xlsx");
    }

    #[test]
    fn test_zero_workers_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let options = MatchOptions {
            schema: degree_stats_common::DailySchema::standard(),
            trailer: Default::default(),
            workers: 0,
            format: MatchFormat::Csv,
        };
        let result = run_matcher(&dir.path().join("d.csv"), dir.path(), &options);
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
