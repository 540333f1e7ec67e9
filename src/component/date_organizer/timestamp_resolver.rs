//! 拍攝時間解析
//!
//! 優先使用媒體內嵌的 EXIF `DateTimeOriginal`，取不到時改用檔案修改時間

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use exif::{In, Reader, Tag, Value};
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

/// 可讀取且可定位的媒體資料來源
pub trait MediaSource: BufRead + Seek {}

impl<T: BufRead + Seek> MediaSource for T {}

/// 從媒體內嵌的中繼資料取得拍攝時間
pub trait CaptureTimeExtractor {
    /// 沒有拍攝時間時回傳 `Ok(None)`；格式不符或資料損毀時回傳錯誤
    fn extract(&self, source: &mut dyn MediaSource) -> Result<Option<NaiveDateTime>>;
}

/// 讀取 EXIF `DateTimeOriginal`（`YYYY:MM:DD HH:MM:SS`，不做時區換算）
#[derive(Debug, Default, Clone, Copy)]
pub struct ExifExtractor;

impl CaptureTimeExtractor for ExifExtractor {
    fn extract(&self, mut source: &mut dyn MediaSource) -> Result<Option<NaiveDateTime>> {
        let exif = Reader::new()
            .read_from_container(&mut source)
            .map_err(|e| anyhow!("無法解析 EXIF: {e}"))?;

        let Some(field) = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY) else {
            return Ok(None);
        };

        let raw = match field.value {
            Value::Ascii(ref values) if !values.is_empty() => &values[0],
            _ => return Ok(None),
        };

        let date_time =
            exif::DateTime::from_ascii(raw).map_err(|e| anyhow!("DateTimeOriginal 格式錯誤: {e}"))?;

        // 0000:00:00 00:00:00 之類的空白日期視為沒有拍攝時間
        Ok(NaiveDate::from_ymd_opt(
            i32::from(date_time.year),
            u32::from(date_time.month),
            u32::from(date_time.day),
        )
        .and_then(|date| {
            date.and_hms_opt(
                u32::from(date_time.hour),
                u32::from(date_time.minute),
                u32::from(date_time.second),
            )
        }))
    }
}

/// 時間來源，只用於記錄
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampSource {
    Metadata,
    ModificationTime,
}

impl fmt::Display for TimestampSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metadata => write!(f, "metadata"),
            Self::ModificationTime => write!(f, "modification-time"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimestamp {
    pub time: DateTime<Utc>,
    pub source: TimestampSource,
}

pub struct TimestampResolver {
    extractor: Box<dyn CaptureTimeExtractor>,
}

impl Default for TimestampResolver {
    fn default() -> Self {
        Self::new(Box::new(ExifExtractor))
    }
}

impl TimestampResolver {
    pub fn new(extractor: Box<dyn CaptureTimeExtractor>) -> Self {
        Self { extractor }
    }

    /// 解析檔案的拍攝時間
    ///
    /// 只有無法開啟或讀取檔案時才回傳錯誤；中繼資料的問題一律改用 `fallback`
    pub fn resolve(&self, path: &Path, fallback: DateTime<Utc>) -> Result<ResolvedTimestamp> {
        let file = File::open(path).with_context(|| format!("無法開啟檔案: {}", path.display()))?;
        let mut reader = BufReader::new(file);
        reader
            .fill_buf()
            .with_context(|| format!("無法讀取檔案: {}", path.display()))?;

        Ok(self.resolve_from(&mut reader, fallback, path))
    }

    /// 從已開啟的資料來源解析，`label` 只用於記錄
    pub fn resolve_from(
        &self,
        source: &mut dyn MediaSource,
        fallback: DateTime<Utc>,
        label: &Path,
    ) -> ResolvedTimestamp {
        match self.extractor.extract(source) {
            Ok(Some(captured)) => ResolvedTimestamp {
                time: captured.and_utc(),
                source: TimestampSource::Metadata,
            },
            Ok(None) => {
                debug!("沒有拍攝時間，使用修改時間: {}", label.display());
                Self::fallback(fallback)
            }
            Err(e) => {
                debug!("讀取中繼資料失敗，使用修改時間 {}: {e:#}", label.display());
                Self::fallback(fallback)
            }
        }
    }

    const fn fallback(time: DateTime<Utc>) -> ResolvedTimestamp {
        ResolvedTimestamp {
            time,
            source: TimestampSource::ModificationTime,
        }
    }
}
