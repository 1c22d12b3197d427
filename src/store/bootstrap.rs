//! Resource bootstrap: make sure every required asset exists under the root.
//!
//! Bootstrap only ever fills gaps. A present resource is never rewritten,
//! whatever its content — schema initialization in particular is someone
//! else's explicitly-invoked job. Two processes bootstrapping the same fresh
//! root concurrently race on default-file creation (last writer wins); that
//! race is documented rather than serialized here.

use std::path::Path;

use waypoint_common::Result;

use super::{ManagedResource, ResourceKind, MANAGED_RESOURCES};
use crate::geo;

/// Ensure the storage root and every managed resource exist.
///
/// Idempotent: after the first call, further calls change no byte of any
/// present resource.
pub fn ensure(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)?;

    for resource in MANAGED_RESOURCES {
        ensure_resource(root, resource)?;
    }

    tracing::info!("storage root ready at {}", root.display());
    Ok(())
}

fn ensure_resource(root: &Path, resource: &ManagedResource) -> Result<()> {
    let path = resource.path_under(root);

    match resource.kind {
        ResourceKind::Record => {
            if !path.exists() {
                // Empty placeholder; SQLite accepts a zero-byte file.
                std::fs::write(&path, b"")?;
                tracing::info!("created empty record file {}", path.display());
            }
        }
        ResourceKind::Features => {
            if !path.exists() {
                geo::save(&path, &geo::FeatureCollection::default())?;
                tracing::info!("seeded empty feature collection {}", path.display());
            }
        }
        ResourceKind::Images => {
            if !path.exists() {
                std::fs::create_dir_all(&path)?;
                tracing::info!("created image directory {}", path.display());
            }
        }
    }

    Ok(())
}
