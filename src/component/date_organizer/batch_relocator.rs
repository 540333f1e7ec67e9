//! 批次搬移
//!
//! 逐一處理每個檔案：解析時間 → 計算目的地 → 檢查衝突 → 建立資料夾 → 移動。
//! 單一檔案的失敗只記錄在結果中，不會中斷整批作業

use super::path_planner::{DestinationPlan, is_in_planned_layout};
use super::timestamp_resolver::{CaptureTimeExtractor, TimestampResolver};
use crate::config::OrganizeSettings;
use crate::tools::{
    FileRecord, ensure_directory_exists, move_file, scan_files, validate_source_directory,
};
use anyhow::Result;
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// 單一檔案的處理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind {
    Moved { destination: PathBuf },
    SkippedDryRun { destination: PathBuf },
    SkippedExists { destination: PathBuf },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub kind: OutcomeKind,
}

/// 各結果的數量
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub moved: usize,
    pub skipped_dry_run: usize,
    pub skipped_exists: usize,
    pub failed: usize,
}

impl BatchSummary {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.moved + self.skipped_dry_run + self.skipped_exists + self.failed
    }
}

/// 整批作業的結果，依處理順序排列
#[derive(Debug, Default, Clone)]
pub struct BatchOutcome {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchOutcome {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    #[must_use]
    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for outcome in &self.outcomes {
            match outcome.kind {
                OutcomeKind::Moved { .. } => summary.moved += 1,
                OutcomeKind::SkippedDryRun { .. } => summary.skipped_dry_run += 1,
                OutcomeKind::SkippedExists { .. } => summary.skipped_exists += 1,
                OutcomeKind::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.outcomes.iter().filter_map(|outcome| match &outcome.kind {
            OutcomeKind::Failed(reason) => Some((outcome.source.as_path(), reason.as_str())),
            _ => None,
        })
    }
}

/// 每移動 `every` 個檔案暫停 `pause`，避免拖垮慢速儲存裝置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    pub every: usize,
    pub pause: Duration,
}

impl Default for Throttle {
    fn default() -> Self {
        Self {
            every: 5,
            pause: Duration::from_millis(100),
        }
    }
}

impl Throttle {
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            every: 0,
            pause: Duration::ZERO,
        }
    }

    const fn should_pause(&self, moved: usize) -> bool {
        self.every > 0 && moved > 0 && moved % self.every == 0
    }
}

/// 依日期整理檔案的批次搬移器
pub struct BatchRelocator {
    settings: OrganizeSettings,
    resolver: TimestampResolver,
    throttle: Throttle,
}

impl BatchRelocator {
    pub fn new(settings: OrganizeSettings) -> Self {
        Self {
            settings,
            resolver: TimestampResolver::default(),
            throttle: Throttle::default(),
        }
    }

    #[must_use]
    pub fn with_extractor(mut self, extractor: Box<dyn CaptureTimeExtractor>) -> Self {
        self.resolver = TimestampResolver::new(extractor);
        self
    }

    #[must_use]
    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    #[must_use]
    pub const fn settings(&self) -> &OrganizeSettings {
        &self.settings
    }

    /// 掃描來源資料夾中符合副檔名的檔案
    ///
    /// 來源資料夾不存在或無法讀取時回傳錯誤，此時尚未動到任何檔案。
    /// 已在目的位置的檔案不會出現在結果中
    pub fn scan(&self) -> Result<Vec<FileRecord>> {
        validate_source_directory(&self.settings.source_dir)?;
        let mut files = scan_files(&self.settings.source_dir, |path| {
            self.settings.is_allowed(path) && !self.is_in_destination_tree(path)
        })?;

        if self.settings.destination_dir == self.settings.source_dir {
            files.retain(|file| !self.is_already_in_place(file));
        }

        Ok(files)
    }

    /// 掃描並處理所有檔案
    pub fn run(&self) -> Result<BatchOutcome> {
        let files = self.scan()?;

        if files.is_empty() {
            info!(
                "找不到任何檔案: {}",
                self.settings.source_dir.display()
            );
            return Ok(BatchOutcome::default());
        }

        Ok(self.process(&files, |_| {}))
    }

    /// 依序處理已掃描的檔案，每處理完一個檔案呼叫一次 `on_item`
    pub fn process<F>(&self, files: &[FileRecord], mut on_item: F) -> BatchOutcome
    where
        F: FnMut(&FileOutcome),
    {
        let mut result = BatchOutcome::default();
        let mut moved = 0;

        for file in files {
            let outcome = FileOutcome {
                source: file.path.clone(),
                kind: self.process_file(file),
            };
            on_item(&outcome);

            if matches!(outcome.kind, OutcomeKind::Moved { .. }) {
                moved += 1;
                if self.throttle.should_pause(moved) {
                    thread::sleep(self.throttle.pause);
                }
            }

            result.outcomes.push(outcome);
        }

        let summary = result.summary();
        info!(
            "檔案整理完成 - 移動: {}, 已存在: {}, 試執行: {}, 失敗: {}",
            summary.moved, summary.skipped_exists, summary.skipped_dry_run, summary.failed
        );

        result
    }

    fn process_file(&self, file: &FileRecord) -> OutcomeKind {
        let resolved = match self.resolver.resolve(&file.path, file.modified) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("無法讀取檔案 {}: {e:#}", file.path.display());
                return OutcomeKind::Failed(format!("{e:#}"));
            }
        };

        let plan = DestinationPlan::new(
            &self.settings.destination_dir,
            resolved.time,
            &file.file_name,
        );

        match plan.file_path.try_exists() {
            Ok(false) => {}
            Ok(true) => {
                error!(
                    "目的檔案已存在，略過: {} -> {}",
                    file.path.display(),
                    plan.file_path.display()
                );
                return OutcomeKind::SkippedExists {
                    destination: plan.file_path,
                };
            }
            Err(e) => {
                warn!(
                    "無法檢查目的檔案 {}: {e}",
                    plan.file_path.display()
                );
                return OutcomeKind::Failed(format!(
                    "無法檢查目的檔案 {}: {e}",
                    plan.file_path.display()
                ));
            }
        }

        if self.settings.dry_run {
            info!(
                "[試執行] {} -> {} (日期: {}, 來源: {})",
                file.path.display(),
                plan.file_path.display(),
                resolved.time.format("%Y-%m-%d %H:%M:%S"),
                resolved.source
            );
            return OutcomeKind::SkippedDryRun {
                destination: plan.file_path,
            };
        }

        if let Err(e) = ensure_directory_exists(&plan.directory) {
            warn!("建立資料夾失敗，略過 {}: {e:#}", file.path.display());
            return OutcomeKind::Failed(format!("{e:#}"));
        }

        if let Err(e) = move_file(&file.path, &plan.file_path) {
            warn!("{e:#}");
            return OutcomeKind::Failed(format!("{e:#}"));
        }

        info!(
            "移動檔案: {} -> {} ({})",
            file.path.display(),
            plan.file_path.display(),
            resolved.source
        );
        OutcomeKind::Moved {
            destination: plan.file_path,
        }
    }

    /// 目的資料夾是來源資料夾的子資料夾時，其中已整理過的檔案不再處理
    fn is_in_destination_tree(&self, path: &Path) -> bool {
        let destination = &self.settings.destination_dir;
        destination != &self.settings.source_dir
            && destination.starts_with(&self.settings.source_dir)
            && path.starts_with(destination)
    }

    /// 就地整理時，檔案的目的路徑就是目前的位置
    fn is_already_in_place(&self, file: &FileRecord) -> bool {
        let destination = &self.settings.destination_dir;
        if !is_in_planned_layout(destination, &file.path) {
            return false;
        }

        // 無法讀取的檔案留給 process 回報失敗
        let in_place = self
            .resolver
            .resolve(&file.path, file.modified)
            .is_ok_and(|resolved| {
                DestinationPlan::new(destination, resolved.time, &file.file_name).file_path
                    == file.path
            });
        if in_place {
            debug!("已在目的位置，略過: {}", file.path.display());
        }
        in_place
    }
}
