use crate::error::{AppError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 表ファイルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Csv,
    Excel,
}

impl TableKind {
    /// 拡張子から判定（大文字小文字は区別しない）
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "csv" => Some(TableKind::Csv),
            "xlsx" | "xlsm" | "xls" => Some(TableKind::Excel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableFile {
    pub path: PathBuf,
    pub file_name: String,
    pub kind: TableKind,
}

/// Excelの一時ロックファイル（~$Book1.xlsx）
fn is_lock_file(file_name: &str) -> bool {
    file_name.starts_with("~$")
}

pub fn scan_tables(folder: &Path) -> Result<Vec<TableFile>> {
    if !folder.is_dir() {
        return Err(AppError::FolderNotFound(folder.display().to_string()));
    }

    let mut tables = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if is_lock_file(&file_name) {
            continue;
        }

        if let Some(kind) = TableKind::from_path(path) {
            tables.push(TableFile {
                path: path.to_path_buf(),
                file_name,
                kind,
            });
        }
    }

    // ファイル名でソート
    tables.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(tables)
}
