//! Shared test harness for integration tests.
//!
//! Provides [`TestStore`]: a bootstrapped storage root inside a tempdir that
//! lives as long as the harness.

use std::path::PathBuf;

use tempfile::TempDir;
use waypoint::store;

/// A bootstrapped storage root backed by a tempdir.
pub struct TestStore {
    _dir: TempDir,
    pub root: PathBuf,
}

impl TestStore {
    /// Create a fresh root and run bootstrap on it.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create tempdir");
        let root = dir.path().join("data");
        store::bootstrap::ensure(&root).expect("bootstrap failed");
        Self { _dir: dir, root }
    }

    /// The image directory under this root.
    #[allow(dead_code)]
    pub fn image_dir(&self) -> PathBuf {
        self.root.join(store::IMAGE_DIR_NAME)
    }

    /// A sibling path outside the bootstrapped root (same tempdir).
    #[allow(dead_code)]
    pub fn scratch(&self, name: &str) -> PathBuf {
        self._dir.path().join(name)
    }
}
