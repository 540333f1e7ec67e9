use crate::config::types::{
    Config, MediaTypeTable, OrganizeSettings, UserSettings, normalize_extension,
};
use anyhow::{Context, Result, bail};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// 編譯時嵌入的媒體副檔名表（不需要外部檔案）
const MEDIA_TYPE_TABLE_JSON: &str = include_str!("../data/media_type_table.json");

/// 預設的設定檔位置（目前工作目錄）
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

impl Config {
    pub fn new() -> Result<Self> {
        Self::from_settings_file(Path::new(DEFAULT_SETTINGS_FILE))
    }

    /// 從指定的設定檔載入；檔案不存在時使用預設值
    pub fn from_settings_file(path: &Path) -> Result<Self> {
        let media_type_table = Self::load_embedded_media_type_table()?;
        let settings = Self::load_settings(path)?;

        Ok(Self {
            media_type_table,
            settings,
        })
    }

    fn load_settings(path: &Path) -> Result<UserSettings> {
        if !path.exists() {
            return Ok(UserSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }

    /// 從編譯時嵌入的 JSON 載入媒體副檔名表
    fn load_embedded_media_type_table() -> Result<MediaTypeTable> {
        serde_json::from_str(MEDIA_TYPE_TABLE_JSON).context("無法解析嵌入的媒體副檔名設定")
    }

    /// 將目前設定解析為整理作業使用的不可變設定
    ///
    /// - 來源資料夾為必填
    /// - 目的資料夾未設定時，使用來源資料夾的上一層
    /// - 副檔名未設定時，使用內建的媒體副檔名表；明確設定為空代表不過濾
    pub fn organize_settings(&self) -> Result<OrganizeSettings> {
        let Some(source_dir) = self.settings.source_dir.clone() else {
            bail!("未設定來源資料夾 (PICTURES_FOLDER)");
        };
        if source_dir.as_os_str().is_empty() {
            bail!("來源資料夾路徑為空 (PICTURES_FOLDER)");
        }

        let destination_dir = match &self.settings.destination_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir.clone(),
            // 單一層的相對路徑（例如 `photos`）上一層為目前工作目錄
            _ => match source_dir.parent() {
                Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
                Some(parent) => parent.to_path_buf(),
                None => source_dir.clone(),
            },
        };

        let allowed_extensions: HashSet<String> = match &self.settings.allowed_extensions {
            Some(extensions) => extensions
                .iter()
                .filter(|ext| !ext.trim().trim_start_matches('.').is_empty())
                .map(|ext| normalize_extension(ext))
                .collect(),
            None => self.media_type_table.media_extensions_set(),
        };

        Ok(OrganizeSettings {
            source_dir,
            destination_dir,
            allowed_extensions,
            dry_run: self.settings.dry_run,
        })
    }
}
