//! Image normalization: orientation, downscaling, canonical re-encoding.
//!
//! Normalization brings every image in the directory into one of two
//! canonical encodings: JPEG at a fixed quality for opaque images, PNG for
//! anything carrying transparency. EXIF orientation is baked into the pixels
//! and the tag disappears with the re-encode, so a second pass finds nothing
//! to do — already-canonical files are left byte-identical.
//!
//! The batch has partial-failure semantics: a corrupt or unsupported file is
//! logged and skipped, never aborting the rest. Each write goes to a
//! temporary file in the same directory and is renamed over the original, so
//! interrupting the batch between files leaves no half-written image.

use std::io::{Cursor, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use waypoint_common::paths::is_image_file;
use waypoint_common::{Error, Result};

use crate::config::ImagesConfig;

/// Normalization parameters.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeOptions {
    /// Maximum width or height; larger images are downscaled to fit.
    pub max_dimension: u32,
    /// Quality for lossy JPEG re-encoding (1-100).
    pub jpeg_quality: u8,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            max_dimension: 1920,
            jpeg_quality: 85,
        }
    }
}

impl From<&ImagesConfig> for NormalizeOptions {
    fn from(config: &ImagesConfig) -> Self {
        Self {
            max_dimension: config.max_dimension,
            jpeg_quality: config.jpeg_quality,
        }
    }
}

/// Aggregate result of a normalization batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Files examined successfully (including already-canonical ones).
    pub processed: usize,
    /// Files skipped because they could not be decoded.
    pub skipped: usize,
    /// Sum of `original_size - new_size` over all rewritten files.
    pub bytes_reclaimed: i64,
}

/// Normalize every regular file in `dir`.
///
/// Directory-level I/O errors propagate; per-file decode failures are logged
/// and counted in [`NormalizeReport::skipped`].
pub fn normalize_directory(dir: &Path, opts: &NormalizeOptions) -> Result<NormalizeReport> {
    let mut report = NormalizeReport::default();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();

        if !is_image_file(&path) {
            tracing::debug!("not an image, skipping {}", path.display());
            report.skipped += 1;
            continue;
        }

        match normalize_file(&path, opts) {
            Ok(reclaimed) => {
                report.processed += 1;
                report.bytes_reclaimed += reclaimed;
            }
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e);
                report.skipped += 1;
            }
        }
    }

    tracing::info!(
        "normalized {} images, {} skipped, {} bytes reclaimed",
        report.processed,
        report.skipped,
        report.bytes_reclaimed
    );
    Ok(report)
}

/// Normalize a single image file in place.
///
/// Returns the number of bytes reclaimed (negative when the canonical
/// encoding is larger than the original).
fn normalize_file(path: &Path, opts: &NormalizeOptions) -> Result<i64> {
    let original = std::fs::read(path)?;
    let original_size = original.len() as i64;

    let format = image::guess_format(&original).ok();
    let orientation = read_orientation(&original);
    let img = image::load_from_memory(&original).map_err(|e| image_err(path, e))?;

    let needs_rotation = matches!(orientation, Some(3 | 6 | 8));
    let oversized = img.width() > opts.max_dimension || img.height() > opts.max_dimension;
    let has_alpha = img.color().has_alpha();

    // Already canonical? Leave the bytes alone; re-encoding an
    // already-compressed JPEG would shift pixels on every pass.
    let canonical = match format {
        Some(ImageFormat::Jpeg) => !has_alpha,
        Some(ImageFormat::Png) => has_alpha,
        _ => false,
    };
    if canonical && !needs_rotation && !oversized {
        tracing::debug!("already canonical: {}", path.display());
        return Ok(0);
    }

    let img = apply_orientation(img, orientation);
    let img = if oversized {
        img.resize(opts.max_dimension, opts.max_dimension, FilterType::Lanczos3)
    } else {
        img
    };

    let encoded = encode_canonical(path, &img, opts.jpeg_quality)?;
    write_replacing(path, &encoded)?;

    Ok(original_size - encoded.len() as i64)
}

/// Apply one additional clockwise rotation to a single image and re-save it.
///
/// `degrees` must be a multiple of 90 (negative for counterclockwise).
/// Reports `NotFound` when the target file is absent.
pub fn rotate_file(path: &Path, degrees: i32, opts: &NormalizeOptions) -> Result<()> {
    if !path.exists() {
        return Err(Error::not_found(format!(
            "image does not exist: {}",
            path.display()
        )));
    }
    if degrees % 90 != 0 {
        return Err(Error::invalid_input(format!(
            "rotation must be a multiple of 90 degrees, got {}",
            degrees
        )));
    }

    let data = std::fs::read(path)?;
    let img = image::load_from_memory(&data).map_err(|e| image_err(path, e))?;

    // Bake in any pending EXIF rotation first; the re-encode drops the tag.
    let img = apply_orientation(img, read_orientation(&data));
    let img = match degrees.rem_euclid(360) {
        90 => img.rotate90(),
        180 => img.rotate180(),
        270 => img.rotate270(),
        _ => img,
    };

    let encoded = encode_canonical(path, &img, opts.jpeg_quality)?;
    write_replacing(path, &encoded)
}

/// Read the EXIF orientation tag, if any.
fn read_orientation(data: &[u8]) -> Option<u32> {
    let mut cursor = Cursor::new(data);
    let parsed = exif::Reader::new().read_from_container(&mut cursor).ok()?;
    parsed
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
}

/// Rotate pixels so the image displays upright without its orientation tag.
///
/// Tags 3/6/8 are the rotations; mirrored variants (2, 4, 5, 7) and anything
/// unrecognized are left as-is.
fn apply_orientation(img: DynamicImage, orientation: Option<u32>) -> DynamicImage {
    match orientation {
        Some(3) => img.rotate180(),
        Some(6) => img.rotate90(),
        Some(8) => img.rotate270(),
        _ => img,
    }
}

/// Encode into the canonical form: PNG when transparency must survive,
/// 3-channel JPEG at the given quality otherwise.
fn encode_canonical(path: &Path, img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    if img.color().has_alpha() {
        img.write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| image_err(path, e))?;
    } else {
        let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
        let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
        rgb.write_with_encoder(encoder)
            .map_err(|e| image_err(path, e))?;
    }
    Ok(buf.into_inner())
}

/// Write via a temp file in the same directory, then rename over the target.
fn write_replacing(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path.parent().ok_or_else(|| {
        Error::invalid_input(format!("image path has no parent: {}", path.display()))
    })?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

fn image_err(path: &Path, e: image::ImageError) -> Error {
    match e {
        image::ImageError::IoError(io) => Error::Io(io),
        other => Error::corrupt(format!("{}: {}", path.display(), other)),
    }
}
