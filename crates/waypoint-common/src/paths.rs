//! Path utilities for detecting asset types by extension.
//!
//! The storage root holds three kinds of assets (record files, feature
//! collections, images) plus incoming backup archives; these helpers classify
//! paths the same way everywhere instead of scattering extension checks.

use std::path::Path;

/// List of supported raster image file extensions.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Extension of GeoJSON feature collection files.
const FEATURE_EXTENSION: &str = "geojson";

/// Extension of SQLite record files.
const RECORD_EXTENSION: &str = "db";

/// Canonical extension of backup archives.
pub const ARCHIVE_EXTENSION: &str = "zip";

fn extension_matches(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(wanted))
        .unwrap_or(false)
}

/// Check if a path has a raster image file extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use waypoint_common::paths::is_image_file;
///
/// assert!(is_image_file(Path::new("everest.jpg")));
/// assert!(is_image_file(Path::new("/var/data/images/annapurna.PNG")));
/// assert!(!is_image_file(Path::new("cities.geojson")));
/// ```
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Check if a path has the GeoJSON feature collection extension.
pub fn is_feature_file(path: &Path) -> bool {
    extension_matches(path, FEATURE_EXTENSION)
}

/// Check if a path has the SQLite record file extension.
pub fn is_record_file(path: &Path) -> bool {
    extension_matches(path, RECORD_EXTENSION)
}

/// Check if a path has the canonical backup archive extension.
pub fn is_archive_file(path: &Path) -> bool {
    extension_matches(path, ARCHIVE_EXTENSION)
}

/// Get the list of supported image file extensions.
#[must_use]
pub fn image_extensions() -> &'static [&'static str] {
    IMAGE_EXTENSIONS
}
