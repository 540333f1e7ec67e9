use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 媒體副檔名表（編譯時嵌入）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaTypeTable {
    #[serde(rename = "IMAGE_FILE")]
    pub image_file: Vec<String>,
    #[serde(rename = "VIDEO_FILE")]
    pub video_file: Vec<String>,
}

impl MediaTypeTable {
    #[must_use]
    pub fn media_extensions_set(&self) -> HashSet<String> {
        self.image_file
            .iter()
            .chain(self.video_file.iter())
            .map(|ext| normalize_extension(ext))
            .collect()
    }
}

/// 使用者設定，對應 settings.json
///
/// 未設定的欄位保持 `None`，由環境變數或命令列參數補上
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub source_dir: Option<PathBuf>,
    pub destination_dir: Option<PathBuf>,
    pub allowed_extensions: Option<Vec<String>>,
    pub dry_run: bool,
}

impl UserSettings {
    /// 以較高優先權的設定覆蓋（命令列、環境變數）
    pub fn merge(&mut self, overrides: Self) {
        if overrides.source_dir.is_some() {
            self.source_dir = overrides.source_dir;
        }
        if overrides.destination_dir.is_some() {
            self.destination_dir = overrides.destination_dir;
        }
        if overrides.allowed_extensions.is_some() {
            self.allowed_extensions = overrides.allowed_extensions;
        }
        self.dry_run |= overrides.dry_run;
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub media_type_table: MediaTypeTable,
    pub settings: UserSettings,
}

/// 整理作業使用的最終設定，建立後不再變動
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizeSettings {
    pub source_dir: PathBuf,
    pub destination_dir: PathBuf,
    /// 小寫且帶前導點的副檔名，例如 `.jpg`；空集合代表不過濾
    pub allowed_extensions: HashSet<String>,
    pub dry_run: bool,
}

impl OrganizeSettings {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        destination_dir: impl Into<PathBuf>,
        allowed_extensions: &[&str],
        dry_run: bool,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            destination_dir: destination_dir.into(),
            allowed_extensions: allowed_extensions
                .iter()
                .map(|ext| normalize_extension(ext))
                .collect(),
            dry_run,
        }
    }

    /// 副檔名是否在允許清單中（不分大小寫）
    #[must_use]
    pub fn is_allowed(&self, path: &Path) -> bool {
        if self.allowed_extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.allowed_extensions
                    .contains(&format!(".{}", ext.to_lowercase()))
            })
    }
}

/// `JPG`、`.Jpg`、` jpg ` 一律轉成 `.jpg`
#[must_use]
pub fn normalize_extension(ext: &str) -> String {
    let trimmed = ext.trim().trim_start_matches('.');
    format!(".{}", trimmed.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("JPG"), ".jpg");
        assert_eq!(normalize_extension(".Mp4"), ".mp4");
        assert_eq!(normalize_extension(" avi "), ".avi");
    }

    #[test]
    fn test_is_allowed_case_insensitive() {
        let settings = OrganizeSettings::new("/src", "/dst", &[".jpg", "MP4"], false);

        assert!(settings.is_allowed(Path::new("/src/a.JPG")));
        assert!(settings.is_allowed(Path::new("/src/b.mp4")));
        assert!(!settings.is_allowed(Path::new("/src/c.txt")));
        assert!(!settings.is_allowed(Path::new("/src/no_extension")));
    }

    #[test]
    fn test_merge_overrides_only_set_fields() {
        let mut settings = UserSettings {
            source_dir: Some(PathBuf::from("/from/file")),
            destination_dir: Some(PathBuf::from("/dest/file")),
            allowed_extensions: None,
            dry_run: false,
        };

        settings.merge(UserSettings {
            source_dir: Some(PathBuf::from("/from/cli")),
            allowed_extensions: Some(vec!["jpg".to_string()]),
            dry_run: true,
            ..UserSettings::default()
        });

        assert_eq!(settings.source_dir, Some(PathBuf::from("/from/cli")));
        assert_eq!(settings.destination_dir, Some(PathBuf::from("/dest/file")));
        assert_eq!(settings.allowed_extensions, Some(vec!["jpg".to_string()]));
        assert!(settings.dry_run);
    }

    #[test]
    fn test_empty_extension_set_allows_everything() {
        let settings = OrganizeSettings::new("/src", "/dst", &[], false);

        assert!(settings.is_allowed(Path::new("/src/c.txt")));
        assert!(settings.is_allowed(Path::new("/src/no_extension")));
    }
}
