use crate::error::{AppError, Result};
use degree_stats_common::column_index;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 並列数（未指定ならCPU数）
    pub workers: Option<usize>,
    /// 結果（over/under）の列記号
    pub result_column: String,
    /// 組み合わせサイズの既定値
    pub default_set_size: usize,
    /// 照合結果の出力形式 (xlsx/csv)
    pub match_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: None,
            result_column: "H".into(),
            default_set_size: 3,
            match_format: "xlsx".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("degree-stats").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        column_index(&self.result_column)?;
        if !(1..=22).contains(&self.default_set_size) {
            return Err(AppError::Config(format!(
                "default_set_size は 1〜22 で指定してください: {}",
                self.default_set_size
            )));
        }
        if self.workers == Some(0) {
            return Err(AppError::Config("workers は1以上で指定してください".into()));
        }
        match self.match_format.to_lowercase().as_str() {
            "xlsx" | "csv" => Ok(()),
            other => Err(AppError::Config(format!("match_format は xlsx か csv: {}", other))),
        }
    }

    /// 結果列のインデックス
    pub fn result_index(&self) -> Result<usize> {
        Ok(column_index(&self.result_column)?)
    }

    /// 並列数の決定: 引数 → 設定 → rayon既定
    pub fn resolve_workers(&self, cli_workers: Option<usize>) -> usize {
        cli_workers
            .or(self.workers)
            .filter(|&w| w > 0)
            .unwrap_or_else(rayon::current_num_threads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.result_index().unwrap(), 7);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"workers": 4}"#).unwrap();
        assert_eq!(config.workers, Some(4));
        assert_eq!(config.result_column, "H");
        assert_eq!(config.default_set_size, 3);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_column = Config {
            result_column: "H1".into(),
            ..Default::default()
        };
        assert!(bad_column.validate().is_err());

        let bad_size = Config {
            default_set_size: 0,
            ..Default::default()
        };
        assert!(bad_size.validate().is_err());

        let bad_format = Config {
            match_format: "pdf".into(),
            ..Default::default()
        };
        assert!(bad_format.validate().is_err());
    }

    #[test]
    fn test_resolve_workers() {
        let config = Config {
            workers: Some(3),
            ..Default::default()
        };
        assert_eq!(config.resolve_workers(Some(8)), 8);
        assert_eq!(config.resolve_workers(None), 3);
        assert!(Config::default().resolve_workers(None) >= 1);
    }
}
