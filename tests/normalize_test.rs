//! Integration tests for the image normalization batch.

mod common;

use std::io::Cursor;

use common::TestStore;
use waypoint::images::{self, NormalizeOptions};

/// Encode a top-half-green, bottom-half-white RGB image as JPEG.
fn two_band_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut img = image::RgbImage::new(width, height);
    for (_x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = if y < height / 2 {
            image::Rgb([20, 180, 20])
        } else {
            image::Rgb([250, 250, 250])
        };
    }
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Jpeg)
        .unwrap();
    buf.into_inner()
}

/// Splice a minimal EXIF APP1 segment holding only the orientation tag into
/// a JPEG right after the SOI marker.
fn with_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II\x2a\x00\x08\x00\x00\x00");
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x0112u16.to_le_bytes());
    tiff.extend_from_slice(&3u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&orientation.to_le_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_le_bytes());

    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((tiff.len() + 8) as u16).to_be_bytes());
    out.extend_from_slice(b"Exif\x00\x00");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

fn read_orientation(data: &[u8]) -> Option<u32> {
    let mut cursor = Cursor::new(data);
    let parsed = exif::Reader::new().read_from_container(&mut cursor).ok()?;
    parsed
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
}

#[test]
fn oversized_tagged_upload_comes_out_upright_and_capped() {
    let store = TestStore::new();
    let path = store.image_dir().join("phone-upload.jpg");
    std::fs::write(&path, with_orientation(&two_band_jpeg(4000, 3000), 3)).unwrap();

    let report =
        images::normalize_directory(&store.image_dir(), &NormalizeOptions::default()).unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.skipped, 0);
    assert!(report.bytes_reclaimed > 0, "downscaling should reclaim bytes");

    let data = std::fs::read(&path).unwrap();
    assert_eq!(read_orientation(&data), None, "orientation tag must be cleared");

    let img = image::load_from_memory(&data).unwrap().to_rgb8();
    assert!(img.width().max(img.height()) <= 1920);
    assert_eq!((img.width(), img.height()), (1920, 1440));

    // Orientation 3 is a half turn: the green band ends up at the bottom.
    let top = img.get_pixel(960, 100);
    let bottom = img.get_pixel(960, 1340);
    assert!(top[0] > 200, "expected white at top: {:?}", top);
    assert!(
        bottom[1] > 120 && bottom[0] < 120,
        "expected green at bottom: {:?}",
        bottom
    );
}

#[test]
fn second_pass_changes_nothing() {
    let store = TestStore::new();
    let path = store.image_dir().join("phone-upload.jpg");
    std::fs::write(&path, with_orientation(&two_band_jpeg(2400, 1200), 6)).unwrap();

    let first =
        images::normalize_directory(&store.image_dir(), &NormalizeOptions::default()).unwrap();
    assert_eq!(first.processed, 1);

    let after_first = std::fs::read(&path).unwrap();
    let second =
        images::normalize_directory(&store.image_dir(), &NormalizeOptions::default()).unwrap();

    assert_eq!(second.processed, 1);
    assert_eq!(second.bytes_reclaimed, 0);
    assert_eq!(std::fs::read(&path).unwrap(), after_first);
}

#[test]
fn batch_survives_a_corrupt_file() {
    let store = TestStore::new();
    std::fs::write(store.image_dir().join("good.jpg"), two_band_jpeg(64, 32)).unwrap();
    std::fs::write(store.image_dir().join("broken.jpg"), b"not an image at all").unwrap();

    let report =
        images::normalize_directory(&store.image_dir(), &NormalizeOptions::default()).unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.skipped, 1);

    // The good file is still decodable, the bad one still present.
    assert!(store.image_dir().join("broken.jpg").exists());
    let data = std::fs::read(store.image_dir().join("good.jpg")).unwrap();
    assert!(image::load_from_memory(&data).is_ok());
}
