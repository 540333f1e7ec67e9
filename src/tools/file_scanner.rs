use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::warn;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// 掃描時取得的檔案資訊，處理完即丟棄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub file_name: OsString,
    /// 檔案系統的修改時間（UTC）
    pub modified: DateTime<Utc>,
}

/// 遞迴掃描目錄下所有一般檔案，只保留 `filter` 接受的檔案，按路徑排序
///
/// 無法讀取根目錄時回傳錯誤；子目錄的錯誤只記錄警告並略過
pub fn scan_files<F>(directory: &Path, filter: F) -> Result<Vec<FileRecord>>
where
    F: Fn(&Path) -> bool,
{
    let mut files = Vec::new();

    for entry in WalkDir::new(directory).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(e)
                    .with_context(|| format!("無法讀取來源資料夾: {}", directory.display()));
            }
            Err(e) => {
                warn!("略過無法讀取的項目: {e}");
                continue;
            }
        };

        if !entry.file_type().is_file() || !filter(entry.path()) {
            continue;
        }

        let modified = match modification_time(&entry) {
            Ok(modified) => modified,
            Err(e) => {
                warn!("無法取得修改時間，略過 {}: {e:#}", entry.path().display());
                continue;
            }
        };

        files.push(FileRecord {
            file_name: entry.file_name().to_owned(),
            path: entry.into_path(),
            modified,
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

fn modification_time(entry: &DirEntry) -> Result<DateTime<Utc>> {
    let modified = entry.metadata()?.modified()?;
    Ok(DateTime::<Utc>::from(modified))
}
