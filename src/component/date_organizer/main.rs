use super::batch_relocator::{BatchOutcome, BatchRelocator, BatchSummary};
use crate::config::OrganizeSettings;
use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

/// 依日期整理媒體檔案元件
pub struct DateOrganizer {
    relocator: BatchRelocator,
}

impl DateOrganizer {
    pub fn new(settings: OrganizeSettings) -> Self {
        Self {
            relocator: BatchRelocator::new(settings),
        }
    }

    pub fn from_relocator(relocator: BatchRelocator) -> Self {
        Self { relocator }
    }

    pub fn run(&self) -> Result<BatchSummary> {
        let settings = self.relocator.settings();

        println!("{}", style("=== 依拍攝日期整理檔案 ===").cyan().bold());
        println!("  來源: {}", settings.source_dir.display());
        println!("  目的: {}", settings.destination_dir.display());
        if settings.dry_run {
            println!("{}", style("  試執行模式：不會移動任何檔案").yellow());
        }

        println!("{}", style("掃描檔案中...").dim());
        let files = self.relocator.scan()?;

        if files.is_empty() {
            println!("{}", style("找不到任何檔案").yellow());
            info!("找不到任何檔案: {}", settings.source_dir.display());
            return Ok(BatchSummary::default());
        }

        println!(
            "{}",
            style(format!("找到 {} 個檔案", files.len())).green()
        );

        let progress_bar = ProgressBar::new(files.len() as u64);
        progress_bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
            )?
            .progress_chars("#>-"),
        );
        progress_bar.set_message("整理中...");

        let outcome = self.relocator.process(&files, |_| progress_bar.inc(1));
        progress_bar.finish_with_message("完成");

        self.print_result(&outcome);

        Ok(outcome.summary())
    }

    fn print_result(&self, outcome: &BatchOutcome) {
        let summary = outcome.summary();

        println!();
        println!("{}", style("=== 整理結果 ===").cyan().bold());
        println!("  成功移動: {} 個檔案", style(summary.moved).green());

        if summary.skipped_dry_run > 0 {
            println!("  試執行略過: {} 個檔案", style(summary.skipped_dry_run).cyan());
        }

        if summary.skipped_exists > 0 {
            println!("  目的已存在: {} 個檔案", style(summary.skipped_exists).yellow());
        }

        if summary.failed > 0 {
            println!("  失敗: {} 個檔案", style(summary.failed).red());
            for (source, reason) in outcome.failures() {
                println!(
                    "    {} {}: {}",
                    style("•").dim(),
                    source.display(),
                    style(reason).dim()
                );
            }
        }
    }
}
