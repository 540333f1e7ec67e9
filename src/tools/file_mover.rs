use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// 移動檔案；跨檔案系統時改用複製後刪除
pub fn move_file(source: &Path, target: &Path) -> Result<()> {
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            debug!("跨檔案系統，改用複製: {}", source.display());
            copy_and_delete(source, target)
        }
        Err(e) => Err(e).with_context(|| {
            format!("移動檔案失敗: {} -> {}", source.display(), target.display())
        }),
    }
}

/// 複製檔案後刪除原檔案；刪除失敗時移除複本，避免留下兩份
fn copy_and_delete(source: &Path, target: &Path) -> Result<()> {
    fs::copy(source, target)
        .with_context(|| format!("複製檔案失敗: {} -> {}", source.display(), target.display()))?;

    if let Err(e) = fs::remove_file(source) {
        let _ = fs::remove_file(target);
        return Err(e).with_context(|| format!("刪除原檔案失敗: {}", source.display()));
    }

    Ok(())
}
