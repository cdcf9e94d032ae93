use anyhow::Context;
use clap::Parser;
use degree_stats_common::{ColumnSet, DailySchema, OutputLayout, ProjectionPlan};
use degree_stats_rust::{bulk, cli, config, grouper, logging, matcher, prompt};
use cli::{Cli, Commands};
use config::Config;
use tracing::warn;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose)?;
    let mut config = Config::load().context("設定ファイルを読み込めません")?;

    match cli.command {
        Commands::Bulk { folder, size, layout, degree, columns, result_column, workers, report } => {
            println!("📊 degree-stats - 一括集計\n");

            let columns = match columns {
                Some(list) => grouper::parse_column_list(&list)?,
                None => match layout {
                    OutputLayout::Counter => ColumnSet::counter(),
                    OutputLayout::Star => ColumnSet::star(),
                },
            };
            if degree && layout == OutputLayout::Counter {
                warn!("--degree は star レイアウトのみ有効です");
            }

            let result_index = match result_column {
                Some(label) => degree_stats_common::column_index(&label)?,
                None => config.result_index()?,
            };

            let set_size = match size {
                Some(s) => s,
                None => prompt::select_set_size(
                    columns.len(),
                    config.default_set_size.min(columns.len()),
                )?,
            };

            let options = bulk::BulkOptions {
                layout,
                columns,
                set_size,
                plan: ProjectionPlan {
                    player_index: 0,
                    result_index,
                    include_partner: degree && layout == OutputLayout::Star,
                },
                workers: config.resolve_workers(workers),
            };

            println!("[1/2] 集計中...（{}列から{}列, layout={}）", options.columns.len(), set_size, layout);
            let summary = bulk::run_bulk(&folder, &options)
                .with_context(|| format!("一括集計に失敗: {}", folder.display()))?;
            for file in &summary.files {
                println!("  {}", file);
            }
            println!(
                "✔ {}ファイル中 {}件完了, {}件失敗\n",
                summary.files.len(),
                summary.completed(),
                summary.failed()
            );

            println!("[2/2] 出力先: {}", summary.output_dir.display());
            if let Some(path) = report {
                bulk::write_report(&summary, &path)
                    .with_context(|| format!("レポートを保存できません: {}", path.display()))?;
                println!("✔ レポートを保存: {}", path.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Match { daily, history, trailer, format, workers } => {
            println!("🔍 degree-stats - 照合\n");

            let format = match format {
                Some(f) => f,
                None => config
                    .match_format
                    .parse::<matcher::MatchFormat>()
                    .map_err(anyhow::Error::msg)?,
            };
            let options = matcher::MatchOptions {
                schema: DailySchema::standard(),
                trailer,
                workers: config.resolve_workers(workers),
                format,
            };

            println!("[1/2] 照合中...（{}並列, trailer={}）", options.workers, trailer);
            let summary = matcher::run_matcher(&daily, &history, &options)
                .with_context(|| format!("照合に失敗: {}", daily.display()))?;
            println!(
                "✔ 過去データ {}ファイル / {}行を照合（スキップ {}行, 読込失敗 {}ファイル）\n",
                summary.history_files,
                summary.rows_checked,
                summary.skipped.len(),
                summary.unreadable.len()
            );

            println!("[2/2] 結果を保存中...");
            match &summary.output {
                Some(path) => println!("✔ {}件のマッチを保存: {}", summary.matches, path.display()),
                None => println!("マッチはありませんでした"),
            }

            println!("\n✅ 完了");
        }

        Commands::Group { input, groups, columns } => {
            println!("🗂 degree-stats - レンジ置換\n");

            let columns = grouper::parse_column_list(&columns)?;
            let output = grouper::run_grouper(&input, &groups, &columns)
                .with_context(|| format!("レンジ置換に失敗: {}", input.display()))?;
            println!("✔ 保存: {}", output.display());
        }

        Commands::Config { show, workers, result_column, set_size, match_format } => {
            let mut changed = false;
            if let Some(w) = workers {
                config.workers = Some(w);
                changed = true;
            }
            if let Some(column) = result_column {
                config.result_column = column.to_uppercase();
                changed = true;
            }
            if let Some(size) = set_size {
                config.default_set_size = size;
                changed = true;
            }
            if let Some(format) = match_format {
                config.match_format = format.to_string();
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!(
                    "  並列数: {}",
                    config.workers.map(|w| w.to_string()).unwrap_or_else(|| "自動".into())
                );
                println!("  結果列: {}", config.result_column);
                println!("  組み合わせサイズ: {}", config.default_set_size);
                println!("  照合出力形式: {}", config.match_format);
            }
        }
    }

    Ok(())
}
