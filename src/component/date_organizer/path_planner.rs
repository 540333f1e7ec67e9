use chrono::{DateTime, NaiveDate, Utc};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// 目的資料夾：`<root>/<YYYY>/<YYYY-MM-DD>`
///
/// 純函式，不存取檔案系統；相同輸入永遠得到相同路徑
#[must_use]
pub fn plan_directory(destination_root: &Path, timestamp: DateTime<Utc>) -> PathBuf {
    destination_root
        .join(timestamp.format("%Y").to_string())
        .join(timestamp.format("%Y-%m-%d").to_string())
}

/// 路徑是否已是 `<root>/<YYYY>/<YYYY-MM-DD>/<檔名>` 的形式，且年份與日期一致
#[must_use]
pub fn is_in_planned_layout(destination_root: &Path, path: &Path) -> bool {
    let Ok(relative) = path.strip_prefix(destination_root) else {
        return false;
    };
    let components: Vec<Component<'_>> = relative.components().collect();
    let [
        Component::Normal(year),
        Component::Normal(day),
        Component::Normal(_),
    ] = components.as_slice()
    else {
        return false;
    };
    let (Some(year), Some(day)) = (year.to_str(), day.to_str()) else {
        return false;
    };

    NaiveDate::parse_from_str(day, "%Y-%m-%d").is_ok_and(|date| {
        date.format("%Y").to_string() == year && date.format("%Y-%m-%d").to_string() == day
    })
}

/// 單一檔案的目的地，每個檔案重新計算
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationPlan {
    pub directory: PathBuf,
    pub file_path: PathBuf,
}

impl DestinationPlan {
    /// 檔名維持原樣，不做任何改名或去重
    #[must_use]
    pub fn new(destination_root: &Path, timestamp: DateTime<Utc>, file_name: &OsStr) -> Self {
        let directory = plan_directory(destination_root, timestamp);
        let file_path = directory.join(file_name);
        Self {
            directory,
            file_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_plan_directory() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 6, 15, 22, 12).unwrap();
        assert_eq!(
            plan_directory(Path::new("/images"), timestamp),
            PathBuf::from("/images/2024/2024-03-06")
        );
    }

    #[test]
    fn test_plan_directory_is_deterministic() {
        let timestamp = Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap();
        let first = plan_directory(Path::new("/archive"), timestamp);
        let second = plan_directory(Path::new("/archive"), timestamp);

        assert_eq!(first, second);
        assert_eq!(first, PathBuf::from("/archive/1999/1999-12-31"));
    }

    #[test]
    fn test_plan_ignores_time_of_day() {
        let morning = Utc.with_ymd_and_hms(2023, 11, 2, 0, 0, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2023, 11, 2, 23, 59, 59).unwrap();

        assert_eq!(
            plan_directory(Path::new("/r"), morning),
            plan_directory(Path::new("/r"), night)
        );
    }

    #[test]
    fn test_destination_plan_keeps_file_name() {
        let timestamp = Utc.with_ymd_and_hms(2023, 11, 2, 8, 15, 0).unwrap();
        let plan = DestinationPlan::new(Path::new("/root"), timestamp, OsStr::new("IMG_0001.JPG"));

        assert_eq!(plan.directory, PathBuf::from("/root/2023/2023-11-02"));
        assert_eq!(
            plan.file_path,
            PathBuf::from("/root/2023/2023-11-02/IMG_0001.JPG")
        );
    }

    #[test]
    fn test_is_in_planned_layout() {
        let root = Path::new("/photos");

        assert!(is_in_planned_layout(root, Path::new("/photos/2024/2024-03-06/a.jpg")));

        // 年份與日期不符、日期格式不對、層數不對、不在根目錄下
        assert!(!is_in_planned_layout(root, Path::new("/photos/2023/2024-03-06/a.jpg")));
        assert!(!is_in_planned_layout(root, Path::new("/photos/2024/2024-3-6/a.jpg")));
        assert!(!is_in_planned_layout(root, Path::new("/photos/2024/vacation/a.jpg")));
        assert!(!is_in_planned_layout(root, Path::new("/photos/2024/a.jpg")));
        assert!(!is_in_planned_layout(root, Path::new("/photos/2024/2024-03-06/x/a.jpg")));
        assert!(!is_in_planned_layout(root, Path::new("/other/2024/2024-03-06/a.jpg")));
    }
}
