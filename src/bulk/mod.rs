//! フォルダ一括集計
//!
//! 入力フォルダ直下の表ファイルごとに、全組み合わせを射影→集計して
//! `<フォルダ>_output/<stem>_Size_<k>_Degree_<YES|NO>.csv` に書き出す。
//! ファイル単位で並列処理し、1ファイルの失敗はバッチを止めない。

mod types;

pub use types::{BatchSummary, BulkOptions, FileState, FileStatus};

use crate::error::{AppError, Result};
use crate::export::write_rows;
use crate::loader::read_table_file;
use crate::scanner::{scan_tables, TableFile};
use degree_stats_common::{
    aggregate, build_row, combination_count, combinations, header, project, Combination,
    OutputRow, Table,
};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 1表分の集計結果
#[derive(Debug, Default)]
pub struct TableOutcome {
    pub rows: Vec<OutputRow>,
    /// 射影できなかった組み合わせ（ラベル, 理由）
    pub skipped: Vec<(String, String)>,
}

fn combination_name(combination: &Combination) -> String {
    combination
        .iter()
        .map(|spec| spec.label.as_str())
        .collect::<Vec<_>>()
        .join("+")
}

/// `<フォルダ>_output`（入力フォルダと同じ階層）
pub fn output_dir_for(folder: &Path) -> Result<PathBuf> {
    let name = folder
        .file_name()
        .ok_or_else(|| AppError::OutputFolder(folder.display().to_string()))?;
    Ok(folder.with_file_name(format!("{}_output", name.to_string_lossy())))
}

pub fn output_file_name(stem: &str, options: &BulkOptions) -> String {
    format!(
        "{}_Size_{}_Degree_{}.csv",
        stem,
        options.set_size,
        options.layout.degree_tag(options.plan.include_partner)
    )
}

pub fn validate_options(options: &BulkOptions) -> Result<()> {
    if options.set_size == 0 || options.set_size > options.columns.len() {
        return Err(AppError::Config(format!(
            "組み合わせサイズは 1〜{} で指定してください: {}",
            options.columns.len(),
            options.set_size
        )));
    }
    if options.workers == 0 {
        return Err(AppError::Config("workers は1以上で指定してください".into()));
    }
    Ok(())
}

/// 1つの表を全組み合わせで集計
///
/// 射影できない組み合わせ（列が表の幅を超える等）は警告してスキップ。
pub fn process_table(table: &Table, combos: &[Combination], options: &BulkOptions) -> TableOutcome {
    let mut outcome = TableOutcome::default();

    for combination in combos {
        match project(table, combination, &options.plan) {
            Ok(projected) => {
                outcome.rows.extend(
                    aggregate(&projected)
                        .iter()
                        .map(|group| build_row(group, options.layout)),
                );
            }
            Err(e) => {
                let name = combination_name(combination);
                warn!("組み合わせ {} をスキップ: {}", name, e);
                outcome.skipped.push((name, e.to_string()));
            }
        }
    }

    outcome
}

/// 1ファイルを読み込み→集計→書き出し
pub fn process_file(
    file: &TableFile,
    combos: &[Combination],
    options: &BulkOptions,
    output_dir: &Path,
) -> FileStatus {
    let state = match run_file(file, combos, options, output_dir) {
        Ok(state) => state,
        Err(e) => {
            warn!("{} の処理に失敗: {}", file.file_name, e);
            FileState::Failed {
                reason: e.to_string(),
            }
        }
    };
    FileStatus {
        file: file.file_name.clone(),
        state,
    }
}

fn run_file(
    file: &TableFile,
    combos: &[Combination],
    options: &BulkOptions,
    output_dir: &Path,
) -> Result<FileState> {
    let table = read_table_file(file)?;
    debug!("{}: {}行 x {}列", file.file_name, table.len(), table.width());

    let outcome = process_table(&table, combos, options);
    let skipped_combinations = outcome.skipped.len();

    if outcome.rows.is_empty() {
        return Ok(FileState::Empty {
            skipped_combinations,
        });
    }

    let stem = file
        .path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file.file_name.clone());
    let output = output_dir.join(output_file_name(&stem, options));
    let header_row = header(options.layout, options.pair_count());

    write_rows(&output, header_row.as_deref(), &outcome.rows)?;

    Ok(FileState::Completed {
        output,
        rows: outcome.rows.len(),
        skipped_combinations,
    })
}

/// フォルダ内の全表ファイルを一括集計
///
/// フォルダがない・表ファイルがない・出力フォルダを作れない場合だけエラーで止まる。
pub fn run_bulk(folder: &Path, options: &BulkOptions) -> Result<BatchSummary> {
    validate_options(options)?;

    let tables = scan_tables(folder)?;
    if tables.is_empty() {
        return Err(AppError::NoTablesFound(folder.display().to_string()));
    }

    let output_dir = output_dir_for(folder)?;
    std::fs::create_dir_all(&output_dir)
        .map_err(|e| AppError::OutputFolder(format!("{}: {}", output_dir.display(), e)))?;

    info!(
        "{}ファイル x {}組み合わせ (size={}, layout={})",
        tables.len(),
        combination_count(options.columns.len(), options.set_size),
        options.set_size,
        options.layout
    );
    let combos = combinations(&options.columns, options.set_size);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers)
        .build()
        .map_err(|e| AppError::Config(format!("ワーカープールを作成できません: {}", e)))?;

    let progress = ProgressBar::new(tables.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
        progress.set_style(style);
    }

    let files: Vec<FileStatus> = pool.install(|| {
        tables
            .par_iter()
            .map(|file| {
                let status = process_file(file, &combos, options, &output_dir);
                info!("{}", status);
                progress.inc(1);
                status
            })
            .collect()
    });
    progress.finish_and_clear();

    Ok(BatchSummary {
        input_dir: folder.to_path_buf(),
        output_dir,
        layout: options.layout,
        set_size: options.set_size,
        combinations: combos.len(),
        files,
        finished_at: chrono::Local::now().to_rfc3339(),
    })
}

/// 実行結果をJSONで保存
pub fn write_report(summary: &BatchSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    Ok(())
}
