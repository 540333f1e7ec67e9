//! 測試共用工具：單元測試與 `tests/` 下的整合測試共用

use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::time::SystemTime;
use walkdir::WalkDir;

/// 產生只含 APP1/EXIF 區段的最小 JPEG，Exif IFD 中只有 DateTimeOriginal
///
/// 結構（big-endian TIFF）：
/// - 偏移 8：IFD0，一個項目 `ExifIFDPointer`（0x8769）指向偏移 26
/// - 偏移 26：Exif IFD，一個項目 `DateTimeOriginal`（0x9003, ASCII）指向偏移 44
/// - 偏移 44：以 NUL 結尾的日期字串
#[must_use]
pub fn jpeg_with_date_time_original(value: &str) -> Vec<u8> {
    let mut ascii = value.as_bytes().to_vec();
    ascii.push(0);
    let ascii_len = u32::try_from(ascii.len()).unwrap_or(u32::MAX);

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM\0\x2a");
    tiff.extend_from_slice(&8u32.to_be_bytes());
    // IFD0：指向 Exif IFD
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x8769u16.to_be_bytes());
    tiff.extend_from_slice(&4u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&26u32.to_be_bytes());
    tiff.extend_from_slice(&0u32.to_be_bytes());
    // Exif IFD：DateTimeOriginal
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x9003u16.to_be_bytes());
    tiff.extend_from_slice(&2u16.to_be_bytes());
    tiff.extend_from_slice(&ascii_len.to_be_bytes());
    tiff.extend_from_slice(&44u32.to_be_bytes());
    tiff.extend_from_slice(&0u32.to_be_bytes());
    tiff.extend_from_slice(&ascii);

    // APP1 長度包含長度欄位本身（2）與 "Exif\0\0"（6）
    let segment_len = u16::try_from(2 + 6 + tiff.len()).unwrap_or(u16::MAX);

    let mut jpeg = vec![0xff, 0xd8, 0xff, 0xe1];
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xff, 0xd9]);
    jpeg
}

/// 寫入檔案（必要時建立上層資料夾）並設定修改時間
pub fn write_with_mtime(path: &Path, content: &[u8], modified: DateTime<Utc>) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    File::options()
        .write(true)
        .open(path)?
        .set_modified(SystemTime::from(modified))
}

/// 遞迴計算資料夾下的項目數（含資料夾）
#[must_use]
pub fn count_entries(dir: &Path) -> usize {
    WalkDir::new(dir).min_depth(1).into_iter().count()
}
