use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// 確認來源資料夾存在、是資料夾且可列出內容
///
/// 任一項不符合時整批作業不應開始
pub fn validate_source_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("來源資料夾不存在: {}", path.display());
    }
    if !path.is_dir() {
        bail!("來源路徑不是資料夾: {}", path.display());
    }
    fs::read_dir(path).with_context(|| format!("無法讀取來源資料夾: {}", path.display()))?;
    Ok(())
}

/// 建立資料夾（含所有上層資料夾）；已存在時不做任何事
///
/// 路徑上若有同名的一般檔案會回傳錯誤
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).with_context(|| format!("無法建立資料夾: {}", path.display()))
}
