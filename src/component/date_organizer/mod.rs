//! 依拍攝日期整理媒體檔案
//!
//! 讀取拍攝時間後，將檔案移動到 `<目的資料夾>/<年>/<年-月-日>/`

mod batch_relocator;
mod main;
mod path_planner;
mod timestamp_resolver;

pub use batch_relocator::{
    BatchOutcome, BatchRelocator, BatchSummary, FileOutcome, OutcomeKind, Throttle,
};
pub use main::DateOrganizer;
pub use path_planner::{DestinationPlan, plan_directory};
pub use timestamp_resolver::{
    CaptureTimeExtractor, ExifExtractor, MediaSource, ResolvedTimestamp, TimestampResolver,
    TimestampSource,
};
