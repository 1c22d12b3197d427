//! One-time migration from the legacy in-repo layout to a persistent root.
//!
//! The site originally kept record files in `db/`, feature files in
//! `static/data/`, and images in `static/images` next to the application.
//! Moving to a persistent disk is a copy of those same named resources into
//! the new root, overwriting whatever is there. A missing source is reported
//! per resource and never aborts the remaining copies; real I/O failures do.

use std::path::Path;

use waypoint_common::Result;

use super::{ManagedResource, ResourceKind, MANAGED_RESOURCES};

/// Outcome of migrating a single resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateStatus {
    /// The resource was copied into the destination root.
    Copied,
    /// The source did not exist; nothing was copied.
    SourceMissing,
}

/// Per-resource migration report entry.
#[derive(Debug, Clone)]
pub struct MigrateOutcome {
    pub resource: &'static str,
    pub status: MigrateStatus,
}

/// Copy every managed resource from the legacy layout under `source_root`
/// into `dest_root`, overwriting destinations.
///
/// Returns one outcome per resource, in table order.
pub fn migrate(source_root: &Path, dest_root: &Path) -> Result<Vec<MigrateOutcome>> {
    std::fs::create_dir_all(dest_root)?;
    tracing::info!("migrating assets to {}", dest_root.display());

    let mut outcomes = Vec::with_capacity(MANAGED_RESOURCES.len());
    for resource in MANAGED_RESOURCES {
        let status = migrate_resource(source_root, dest_root, resource)?;
        outcomes.push(MigrateOutcome {
            resource: resource.name,
            status,
        });
    }

    Ok(outcomes)
}

fn migrate_resource(
    source_root: &Path,
    dest_root: &Path,
    resource: &ManagedResource,
) -> Result<MigrateStatus> {
    let source = resource.legacy_path(source_root);
    let dest = resource.path_under(dest_root);

    if !source.exists() {
        tracing::warn!("missing source for {}: {}", resource.name, source.display());
        return Ok(MigrateStatus::SourceMissing);
    }

    match resource.kind {
        ResourceKind::Record | ResourceKind::Features => {
            std::fs::copy(&source, &dest)?;
        }
        ResourceKind::Images => {
            copy_dir(&source, &dest)?;
        }
    }

    tracing::info!("copied {}", resource.name);
    Ok(MigrateStatus::Copied)
}

/// Recursively copy a directory, merging into an existing destination.
fn copy_dir(source: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)?;
    for entry in std::fs::read_dir(source)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_root(dir: &Path) -> std::path::PathBuf {
        let root = dir.join("app");
        std::fs::create_dir_all(root.join("db")).unwrap();
        std::fs::create_dir_all(root.join("static/data")).unwrap();
        std::fs::create_dir_all(root.join("static/images/thumbs")).unwrap();

        std::fs::write(root.join("db/pictures.db"), b"pictures").unwrap();
        std::fs::write(root.join("db/blog.db"), b"blog").unwrap();
        std::fs::write(root.join("static/data/cities.geojson"), b"{}").unwrap();
        std::fs::write(root.join("static/images/everest.jpg"), b"img").unwrap();
        std::fs::write(root.join("static/images/thumbs/everest.jpg"), b"thumb").unwrap();
        root
    }

    #[test]
    fn test_migrate_copies_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let source = legacy_root(dir.path());
        let dest = dir.path().join("data");

        let outcomes = migrate(&source, &dest).unwrap();
        assert_eq!(outcomes.len(), MANAGED_RESOURCES.len());

        let status_of = |name: &str| {
            outcomes
                .iter()
                .find(|o| o.resource == name)
                .unwrap()
                .status
        };

        assert_eq!(status_of("pictures.db"), MigrateStatus::Copied);
        assert_eq!(status_of("blog.db"), MigrateStatus::Copied);
        assert_eq!(status_of("cities.geojson"), MigrateStatus::Copied);
        assert_eq!(status_of("images"), MigrateStatus::Copied);
        // Not present in the legacy tree; reported, not fatal.
        assert_eq!(status_of("food_map.db"), MigrateStatus::SourceMissing);
        assert_eq!(status_of("mountains.geojson"), MigrateStatus::SourceMissing);

        assert_eq!(std::fs::read(dest.join("blog.db")).unwrap(), b"blog");
        assert_eq!(
            std::fs::read(dest.join("images/thumbs/everest.jpg")).unwrap(),
            b"thumb"
        );
    }

    #[test]
    fn test_migrate_overwrites_destination() {
        let dir = tempfile::tempdir().unwrap();
        let source = legacy_root(dir.path());
        let dest = dir.path().join("data");
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("blog.db"), b"stale").unwrap();

        migrate(&source, &dest).unwrap();
        assert_eq!(std::fs::read(dest.join("blog.db")).unwrap(), b"blog");
    }

    #[test]
    fn test_migrate_from_empty_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("nothing-here");
        let dest = dir.path().join("data");

        let outcomes = migrate(&source, &dest).unwrap();
        assert!(outcomes
            .iter()
            .all(|o| o.status == MigrateStatus::SourceMissing));
    }
}
