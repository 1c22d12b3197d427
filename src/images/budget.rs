//! Storage budget estimation for the image directory.
//!
//! The persistent disk is small and fixed-size, so the admin page shows how
//! much of the configured ceiling the images are using and roughly how many
//! more uploads will fit at the current average size.

use std::path::Path;

use walkdir::WalkDir;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Usage report against a storage ceiling.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BudgetReport {
    /// Number of files counted.
    pub count: usize,
    /// Total size in megabytes.
    pub total_mb: f64,
    /// Average file size in megabytes (0 when empty).
    pub avg_mb: f64,
    /// Megabytes left under the ceiling; negative when over budget.
    pub remaining_mb: f64,
    /// How many more average-sized files fit; negative when over budget,
    /// 0 when there is no average to project from.
    pub estimated_additional: i64,
}

/// Walk `dir` summing regular-file sizes against `ceiling_mb`.
///
/// Pure read: nothing is mutated, unreadable entries are skipped, and a
/// missing directory reports as empty.
pub fn estimate(dir: &Path, ceiling_mb: f64) -> BudgetReport {
    let mut count = 0usize;
    let mut total_bytes = 0u64;

    for entry in WalkDir::new(dir) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.metadata() {
            Ok(meta) => {
                count += 1;
                total_bytes += meta.len();
            }
            Err(e) => {
                tracing::debug!("skipping {}: {}", entry.path().display(), e);
            }
        }
    }

    let total_mb = total_bytes as f64 / BYTES_PER_MB;
    let avg_mb = if count > 0 {
        total_mb / count as f64
    } else {
        0.0
    };
    let remaining_mb = ceiling_mb - total_mb;
    let estimated_additional = if avg_mb > 0.0 {
        (remaining_mb / avg_mb).floor() as i64
    } else {
        0
    };

    BudgetReport {
        count,
        total_mb,
        avg_mb,
        remaining_mb,
        estimated_additional,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_mb(path: &Path, megabytes: usize) {
        std::fs::write(path, vec![0u8; megabytes << 20]).unwrap();
    }

    #[test]
    fn test_estimate_known_sizes() {
        let dir = tempfile::tempdir().unwrap();
        write_mb(&dir.path().join("a.jpg"), 1);
        write_mb(&dir.path().join("b.jpg"), 3);

        let report = estimate(dir.path(), 10.0);
        assert_eq!(report.count, 2);
        assert_eq!(report.total_mb, 4.0);
        assert_eq!(report.avg_mb, 2.0);
        assert_eq!(report.remaining_mb, 6.0);
        assert_eq!(report.estimated_additional, 3);
    }

    #[test]
    fn test_estimate_over_budget_goes_negative() {
        let dir = tempfile::tempdir().unwrap();
        write_mb(&dir.path().join("a.jpg"), 2);

        let report = estimate(dir.path(), 1.0);
        assert_eq!(report.remaining_mb, -1.0);
        assert_eq!(report.estimated_additional, -1);
    }

    #[test]
    fn test_estimate_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let report = estimate(dir.path(), 10.0);
        assert_eq!(report.count, 0);
        assert_eq!(report.avg_mb, 0.0);
        assert_eq!(report.remaining_mb, 10.0);
        assert_eq!(report.estimated_additional, 0);
    }

    #[test]
    fn test_estimate_missing_directory_reports_empty() {
        let dir = tempfile::tempdir().unwrap();
        let report = estimate(&dir.path().join("no-such-dir"), 10.0);
        assert_eq!(report.count, 0);
        assert_eq!(report.total_mb, 0.0);
    }

    #[test]
    fn test_estimate_monotonic_in_files() {
        let dir = tempfile::tempdir().unwrap();
        write_mb(&dir.path().join("a.jpg"), 1);
        let smaller = estimate(dir.path(), 10.0);

        write_mb(&dir.path().join("b.jpg"), 1);
        let larger = estimate(dir.path(), 10.0);

        assert!(larger.total_mb >= smaller.total_mb);
        assert!(larger.count > smaller.count);
    }

    #[test]
    fn test_estimate_recurses_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("thumbs")).unwrap();
        write_mb(&dir.path().join("a.jpg"), 1);
        write_mb(&dir.path().join("thumbs/a.jpg"), 1);

        let report = estimate(dir.path(), 10.0);
        assert_eq!(report.count, 2);
        assert_eq!(report.total_mb, 2.0);
    }
}
