use clap::{Parser, Subcommand};
use degree_stats_common::{HistoricalTrailer, OutputLayout};
use crate::matcher::MatchFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "degree-stats")]
#[command(about = "列の組み合わせ集計・度数レンジ照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// フォルダ内の全ファイルを組み合わせごとに集計
    Bulk {
        /// 入力フォルダ（.xlsx/.csv）
        #[arg(required = true)]
        folder: PathBuf,

        /// 組み合わせサイズ（省略時は対話選択、非対話なら設定値）
        #[arg(short, long)]
        size: Option<usize>,

        /// 出力レイアウト (counter/star)
        #[arg(short, long, default_value = "counter")]
        layout: OutputLayout,

        /// 各列の隣（度数列）も集計キーに含める（starのみ）
        #[arg(short, long)]
        degree: bool,

        /// 対象列（例: "AQ,AS,AU" または '["AQ","AS"]'、省略時はレイアウトの既定列）
        #[arg(short, long)]
        columns: Option<String>,

        /// 結果列（省略時は設定値）
        #[arg(long)]
        result_column: Option<String>,

        /// 並列数
        #[arg(short, long)]
        workers: Option<usize>,

        /// 実行結果のJSONレポート
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// デイリーファイルを過去データと照合
    Match {
        /// デイリーファイル
        #[arg(required = true)]
        daily: PathBuf,

        /// 過去データフォルダ
        #[arg(required = true)]
        history: PathBuf,

        /// 過去データの集計列 (legacy/counter)
        #[arg(short, long, default_value = "legacy")]
        trailer: HistoricalTrailer,

        /// 出力形式 (xlsx/csv、省略時は設定値)
        #[arg(short, long)]
        format: Option<MatchFormat>,

        /// 並列数
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// 選択列の度数をレンジラベルに置き換え
    Group {
        /// 入力ファイル
        #[arg(required = true)]
        input: PathBuf,

        /// グループ定義ファイル（1行1レンジ: "010-014"）
        #[arg(required = true)]
        groups: PathBuf,

        /// 対象列（例: "AQ,AS" または '["AQ","AS"]'）
        #[arg(short, long, required = true)]
        columns: String,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 並列数を設定
        #[arg(long)]
        workers: Option<usize>,

        /// 結果列を設定
        #[arg(long)]
        result_column: Option<String>,

        /// 組み合わせサイズの既定値を設定
        #[arg(long)]
        set_size: Option<usize>,

        /// 照合結果の出力形式を設定 (xlsx/csv)
        #[arg(long)]
        match_format: Option<MatchFormat>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bulk() {
        let cli = Cli::parse_from(["degree-stats", "bulk", "data", "-s", "4", "-l", "star", "-d"]);
        match cli.command {
            Commands::Bulk { folder, size, layout, degree, .. } => {
                assert_eq!(folder, PathBuf::from("data"));
                assert_eq!(size, Some(4));
                assert_eq!(layout, OutputLayout::Star);
                assert!(degree);
            }
            _ => panic!("bulk expected"),
        }
    }

    #[test]
    fn test_parse_match() {
        let cli = Cli::parse_from([
            "degree-stats", "-v", "match", "daily.xlsx", "history", "--trailer", "counter", "-f", "csv",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Match { trailer, format, .. } => {
                assert_eq!(trailer, HistoricalTrailer::Counter);
                assert_eq!(format, Some(MatchFormat::Csv));
            }
            _ => panic!("match expected"),
        }
    }

    #[test]
    fn test_group_requires_columns() {
        assert!(Cli::try_parse_from(["degree-stats", "group", "in.xlsx", "groups.txt"]).is_err());
    }
}
