//! Year-level generation: folders first, then one document per ISO week.
//!
//! Weeks are filed under the month of their Monday, with one exception: ISO
//! week 1 always goes into January, even when its Monday falls in December of
//! the previous year. It is excluded from the month bucketing so that it is
//! produced exactly once.

use crate::calendar::build_week_map;
use crate::error::GenerateError;
use crate::models::{DocumentFailure, GenerationReport, ShopLogTemplate, WeekMap};
use crate::outputs::folders::{month_dir, provision_folders};
use crate::outputs::weekly::emit_week_document;
use std::path::Path;
use tracing::{debug, error, info, instrument};

const FIRST_WEEK: u32 = 1;

/// ISO weeks filed under `month`, in week order.
pub fn weeks_for_month(map: &WeekMap, month: u32) -> Vec<u32> {
    let mut weeks: Vec<u32> = map
        .iter()
        .filter(|(week, entry)| **week != FIRST_WEEK && entry.month == month)
        .map(|(week, _)| *week)
        .collect();
    if month == 1 {
        weeks.insert(0, FIRST_WEEK);
    }
    weeks
}

/// Generate every weekly shop log of `year` under `output_root`.
///
/// Only an unrepresentable year is an error; folder and per-week failures are
/// recorded in the returned report and generation carries on.
#[instrument(level = "info", skip(output_root, template), fields(output_root = %output_root.display()))]
pub async fn generate_year(
    output_root: &Path,
    year: i32,
    template: &ShopLogTemplate,
) -> Result<GenerationReport, GenerateError> {
    let map = build_week_map(year)?;
    let folders = provision_folders(output_root, year).await;
    let mut report = GenerationReport::new(year, folders);

    for month in 1..=12 {
        let folder = month_dir(output_root, year, month);
        for week in weeks_for_month(&map, month) {
            match emit_week_document(year, week, &folder, template).await {
                Ok(outcome) => {
                    debug!(week, path = %outcome.path().display(), "Week done");
                    report.documents.push(outcome);
                }
                Err(e) => {
                    error!(week, folder = %folder.display(), error = %e, "Failed to write document");
                    report.failed.push(DocumentFailure {
                        week,
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    info!(
        weeks = map.len(),
        generated = report.generated().count(),
        skipped = report.skipped().count(),
        failed = report.failed.len(),
        "Year generation finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::weeks_in_year;
    use std::collections::BTreeSet;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn docx_files(root: &Path) -> BTreeSet<PathBuf> {
        let mut files = BTreeSet::new();
        for month in std::fs::read_dir(root).unwrap() {
            let month = month.unwrap().path();
            for entry in std::fs::read_dir(&month).unwrap() {
                let path = entry.unwrap().path();
                if path.extension().is_some_and(|ext| ext == "docx") {
                    files.insert(path);
                }
            }
        }
        files
    }

    #[test]
    fn test_every_week_bucketed_once() {
        for year in 2015..=2030 {
            let map = build_week_map(year).unwrap();
            let mut seen: Vec<u32> = (1..=12).flat_map(|m| weeks_for_month(&map, m)).collect();
            seen.sort();
            assert_eq!(seen, (1..=weeks_in_year(year).unwrap()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_first_week_goes_to_january() {
        // 2020-W01 starts on Monday 2019-12-30.
        let map = build_week_map(2020).unwrap();
        assert_eq!(map[&1].month, 12);
        assert_eq!(weeks_for_month(&map, 1)[0], 1);
        assert!(!weeks_for_month(&map, 12).contains(&1));
        assert_eq!(weeks_for_month(&map, 12).last(), Some(&53));
    }

    #[tokio::test]
    async fn test_generate_2020() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        let report = generate_year(root, 2020, &ShopLogTemplate::default())
            .await
            .unwrap();

        assert_eq!(report.generated().count(), 53);
        assert_eq!(report.skipped().count(), 0);
        assert!(report.failed.is_empty());

        let year_root = root.join("2020");
        assert_eq!(docx_files(&year_root).len(), 53);
        assert!(year_root.join("1 - Jan").join("Dec 30 to Jan 03.docx").is_file());
        assert!(!year_root.join("12 - Dec").join("Dec 30 to Jan 03.docx").exists());
        assert!(year_root.join("12 - Dec").join("Dec 28 to Jan 01.docx").is_file());
    }

    #[tokio::test]
    async fn test_second_run_changes_nothing() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let template = ShopLogTemplate::default();

        generate_year(root, 2021, &template).await.unwrap();
        let first_files = docx_files(&root.join("2021"));
        let sample = first_files.iter().next().unwrap().clone();
        let sample_bytes = std::fs::read(&sample).unwrap();

        let second = generate_year(root, 2021, &template).await.unwrap();

        assert_eq!(second.generated().count(), 0);
        assert_eq!(second.skipped().count(), 52);
        assert_eq!(second.folders.existing.len(), 13);
        assert_eq!(docx_files(&root.join("2021")), first_files);
        assert_eq!(std::fs::read(&sample).unwrap(), sample_bytes);
    }

    #[tokio::test]
    async fn test_generate_rejects_unrepresentable_year() {
        let tmp = TempDir::new().unwrap();
        let result = generate_year(tmp.path(), i32::MAX, &ShopLogTemplate::default()).await;
        assert!(matches!(result, Err(GenerateError::InvalidYear(_))));
    }
}
