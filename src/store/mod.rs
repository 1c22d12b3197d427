//! Storage root resolution and the managed resource table.
//!
//! Everything durable lives under a single root directory. On the production
//! host that root is a mounted persistent disk; on a developer machine it is
//! a local folder. The resolver picks between the two once at startup and
//! the chosen path is handed into every component explicitly — there is no
//! process-wide "current root" global.

pub mod bootstrap;
pub mod migrate;

use std::path::{Path, PathBuf};

use crate::config::Config;

/// Name of the image directory under the storage root.
pub const IMAGE_DIR_NAME: &str = "images";

/// What kind of asset a managed resource is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// A SQLite record file, created empty when absent.
    Record,
    /// A GeoJSON feature collection, seeded with an empty document when absent.
    Features,
    /// The image directory, created when absent.
    Images,
}

/// A named resource that must exist under the storage root after bootstrap.
#[derive(Debug, Clone, Copy)]
pub struct ManagedResource {
    pub name: &'static str,
    pub kind: ResourceKind,
}

/// Every resource the site requires, by deployment name.
pub const MANAGED_RESOURCES: &[ManagedResource] = &[
    ManagedResource {
        name: "pictures.db",
        kind: ResourceKind::Record,
    },
    ManagedResource {
        name: "blog.db",
        kind: ResourceKind::Record,
    },
    ManagedResource {
        name: "food_map.db",
        kind: ResourceKind::Record,
    },
    ManagedResource {
        name: "cities.geojson",
        kind: ResourceKind::Features,
    },
    ManagedResource {
        name: "mountains.geojson",
        kind: ResourceKind::Features,
    },
    ManagedResource {
        name: IMAGE_DIR_NAME,
        kind: ResourceKind::Images,
    },
];

impl ManagedResource {
    /// Path of this resource under a storage root.
    pub fn path_under(&self, root: &Path) -> PathBuf {
        root.join(self.name)
    }

    /// Path of this resource in the legacy pre-persistent-disk layout, where
    /// record files lived in `db/`, feature files in `static/data/`, and
    /// images in `static/images`.
    pub fn legacy_path(&self, source_root: &Path) -> PathBuf {
        match self.kind {
            ResourceKind::Record => source_root.join("db").join(self.name),
            ResourceKind::Features => source_root.join("static").join("data").join(self.name),
            ResourceKind::Images => source_root.join("static").join(self.name),
        }
    }
}

/// Picks the storage root: the persistent mount when it exists, a local
/// directory otherwise.
///
/// Resolution is side-effect free — it never creates anything — so it can be
/// called repeatedly and cached. Creation is the bootstrapper's job.
#[derive(Debug, Clone)]
pub struct RootResolver {
    mount_path: PathBuf,
    fallback: PathBuf,
}

impl RootResolver {
    pub fn new(mount_path: PathBuf, fallback: PathBuf) -> Self {
        Self {
            mount_path,
            fallback,
        }
    }

    /// Build a resolver from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.storage.mount_path.clone(),
            config.storage.local_dir.clone(),
        )
    }

    /// Resolve the storage root. Never fails: when the mount is absent the
    /// local fallback is returned, to be created by bootstrap.
    pub fn resolve(&self) -> PathBuf {
        if self.mount_path.exists() {
            self.mount_path.clone()
        } else {
            self.fallback.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_prefers_existing_mount() {
        let mount = tempfile::tempdir().unwrap();
        let resolver = RootResolver::new(mount.path().to_path_buf(), PathBuf::from("data"));
        assert_eq!(resolver.resolve(), mount.path());
    }

    #[test]
    fn test_resolver_falls_back_when_mount_absent() {
        let dir = tempfile::tempdir().unwrap();
        let missing_mount = dir.path().join("no-such-mount");
        let fallback = dir.path().join("data");
        let resolver = RootResolver::new(missing_mount.clone(), fallback.clone());

        assert_eq!(resolver.resolve(), fallback);
        // Resolution has no side effects.
        assert!(!missing_mount.exists());
        assert!(!fallback.exists());
    }

    #[test]
    fn test_resolver_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = RootResolver::new(dir.path().join("mount"), dir.path().join("data"));
        assert_eq!(resolver.resolve(), resolver.resolve());
    }

    #[test]
    fn test_resource_paths() {
        let root = Path::new("/var/data");
        let blog = &MANAGED_RESOURCES[1];
        assert_eq!(blog.name, "blog.db");
        assert_eq!(blog.path_under(root), Path::new("/var/data/blog.db"));

        let legacy = Path::new("/srv/app");
        assert_eq!(blog.legacy_path(legacy), Path::new("/srv/app/db/blog.db"));

        let cities = &MANAGED_RESOURCES[3];
        assert_eq!(
            cities.legacy_path(legacy),
            Path::new("/srv/app/static/data/cities.geojson")
        );

        let images = MANAGED_RESOURCES.last().unwrap();
        assert_eq!(
            images.legacy_path(legacy),
            Path::new("/srv/app/static/images")
        );
    }

    #[test]
    fn test_resource_table_covers_all_kinds() {
        let records = MANAGED_RESOURCES
            .iter()
            .filter(|r| r.kind == ResourceKind::Record)
            .count();
        let features = MANAGED_RESOURCES
            .iter()
            .filter(|r| r.kind == ResourceKind::Features)
            .count();
        let images = MANAGED_RESOURCES
            .iter()
            .filter(|r| r.kind == ResourceKind::Images)
            .count();
        assert_eq!((records, features, images), (3, 2, 1));
    }
}
