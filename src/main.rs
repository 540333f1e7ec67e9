use anyhow::Result;
use clap::Parser;
use log::info;
use media_date_organize::component::DateOrganizer;
use media_date_organize::config::{Config, DEFAULT_SETTINGS_FILE, UserSettings};
use media_date_organize::init;
use std::path::PathBuf;

/// 依拍攝日期將照片與影片整理到 `<目的>/<年>/<年-月-日>/`
#[derive(Debug, Parser)]
#[command(name = "media_date_organize", version, about)]
struct Cli {
    /// 要整理的來源資料夾
    #[arg(long, env = "PICTURES_FOLDER")]
    source: Option<PathBuf>,

    /// 目的根資料夾（預設為來源資料夾的上一層）
    #[arg(long, env = "DESTINATION_FOLDER")]
    destination: Option<PathBuf>,

    /// 允許的副檔名，以逗號分隔，例如 `.jpg,.png,.mp4`
    #[arg(long, env = "ALLOWED_EXTENSIONS", value_delimiter = ',')]
    extensions: Option<Vec<String>>,

    /// 只列出預計的移動，不實際變更檔案
    #[arg(long, env = "DRY_RUN")]
    dry_run: bool,

    /// 設定檔位置
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,
}

impl Cli {
    fn overrides(&self) -> UserSettings {
        UserSettings {
            source_dir: self.source.clone(),
            destination_dir: self.destination.clone(),
            allowed_extensions: self.extensions.clone(),
            dry_run: self.dry_run,
        }
    }
}

fn main() -> Result<()> {
    init::init();
    let cli = Cli::parse();

    let mut config = Config::from_settings_file(&cli.settings)?;
    config.settings.merge(cli.overrides());
    let settings = config.organize_settings()?;

    info!(
        "開始整理 - 來源: {}, 目的: {}, 試執行: {}",
        settings.source_dir.display(),
        settings.destination_dir.display(),
        settings.dry_run
    );

    DateOrganizer::new(settings).run()?;

    info!("Program exited normally");
    Ok(())
}
