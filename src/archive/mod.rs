//! Portable snapshots of the storage root.
//!
//! Export walks the whole root and writes every regular file into a zip
//! archive keyed by its root-relative path; import merges an archive back,
//! overwriting files it carries and leaving everything else alone. Together
//! they are the backup/restore path for a host whose disk can be wiped.
//!
//! Entry names are validated before anything is extracted: one absolute or
//! parent-traversing name fails the whole import, so a hostile archive can
//! never write outside the root. Neither operation takes a lock — callers
//! serialize archive operations against concurrent mutation of the root.

use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use waypoint_common::{Error, Result};

/// Export every regular file under `root` into a zip written to `writer`.
///
/// Entry names are the root-relative paths with `/` separators. Returns the
/// number of entries written.
pub fn export<W: Write + Seek>(root: &Path, writer: W) -> Result<u64> {
    let mut archive = ZipWriter::new(writer);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = 0u64;
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry_name(root, entry.path())?;
        archive.start_file(name, options).map_err(zip_err)?;
        let mut file = File::open(entry.path())?;
        std::io::copy(&mut file, &mut archive)?;
        entries += 1;
    }

    archive.finish().map_err(zip_err)?;
    tracing::info!("exported {} entries from {}", entries, root.display());
    Ok(entries)
}

/// Export the root into a zip file at `dest`.
pub fn export_to_file(root: &Path, dest: &Path) -> Result<u64> {
    let file = File::create(dest)?;
    export(root, file)
}

/// Merge a zip archive into `root`.
///
/// Every entry name is validated first; an absolute path or a name with
/// parent-directory segments fails the whole import with `PathViolation`
/// before a single byte is written. Files at the same relative path are
/// overwritten, files not present in the archive are left untouched.
/// Returns the number of file entries extracted.
pub fn import<R: Read + Seek>(reader: R, root: &Path) -> Result<u64> {
    let mut archive = ZipArchive::new(reader).map_err(zip_err)?;

    // Validation pass: no entry may resolve outside the root.
    for index in 0..archive.len() {
        let entry = archive.by_index(index).map_err(zip_err)?;
        if entry.enclosed_name().is_none() {
            return Err(Error::path_violation(entry.name().to_string()));
        }
    }

    std::fs::create_dir_all(root)?;

    let mut extracted = 0u64;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(zip_err)?;
        // Checked above; entries cannot change between the two passes.
        let rel: PathBuf = match entry.enclosed_name() {
            Some(p) => p.to_path_buf(),
            None => return Err(Error::path_violation(entry.name().to_string())),
        };
        let dest = root.join(rel);

        if entry.is_dir() {
            std::fs::create_dir_all(&dest)?;
            continue;
        }

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&dest)?;
        std::io::copy(&mut entry, &mut out)?;
        extracted += 1;
    }

    tracing::info!("imported {} entries into {}", extracted, root.display());
    Ok(extracted)
}

/// Merge the zip file at `archive_path` into `root`.
pub fn import_from_file(archive_path: &Path, root: &Path) -> Result<u64> {
    if !archive_path.exists() {
        return Err(Error::not_found(format!(
            "archive does not exist: {}",
            archive_path.display()
        )));
    }
    let file = File::open(archive_path)?;
    import(file, root)
}

/// Root-relative entry name with normalized `/` separators.
fn entry_name(root: &Path, path: &Path) -> Result<String> {
    let rel = path.strip_prefix(root).map_err(|_| {
        Error::invalid_input(format!("{} is not under {}", path.display(), root.display()))
    })?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

fn zip_err(e: zip::result::ZipError) -> Error {
    match e {
        zip::result::ZipError::Io(io) => Error::Io(io),
        other => Error::corrupt(other.to_string()),
    }
}
