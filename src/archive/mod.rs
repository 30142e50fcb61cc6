// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Unpacks JDK archives (zip or tar.gz) and locates their single top-level directory.

use crate::error::{CoffeebarError, Result};
use crate::platform::file_ops;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use tar::Archive as TarArchive;
use zip::ZipArchive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveType {
    TarGz,
    Zip,
}

/// Extract `archive_path` into `destination`, returning the number of entries written.
pub fn extract_archive(archive_path: &Path, destination: &Path) -> Result<usize> {
    fs::create_dir_all(destination)?;

    let archive_type = detect_archive_type(archive_path)?;
    log::debug!(
        "Extracting {} as {archive_type:?} into {}",
        archive_path.display(),
        destination.display()
    );

    match archive_type {
        ArchiveType::TarGz => extract_tar_gz(archive_path, destination),
        ArchiveType::Zip => extract_zip(archive_path, destination),
    }
}

/// Decide by extension first, then by magic bytes.
pub fn detect_archive_type(path: &Path) -> Result<ArchiveType> {
    let name = path.to_string_lossy().to_lowercase();
    if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        return Ok(ArchiveType::TarGz);
    }
    if name.ends_with(".zip") {
        return Ok(ArchiveType::Zip);
    }

    detect_by_content(path)
}

fn detect_by_content(path: &Path) -> Result<ArchiveType> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 4];
    file.read_exact(&mut magic).map_err(|_| {
        CoffeebarError::Extract(format!(
            "cannot read {} to determine archive type",
            path.display()
        ))
    })?;

    match magic {
        [0x1f, 0x8b, _, _] => Ok(ArchiveType::TarGz),
        [0x50, 0x4b, 0x03 | 0x05 | 0x07, _] => Ok(ArchiveType::Zip),
        _ => Err(CoffeebarError::Extract(format!(
            "{} is neither a zip nor a tar.gz archive",
            path.display()
        ))),
    }
}

fn extract_tar_gz(archive_path: &Path, destination: &Path) -> Result<usize> {
    let file = File::open(archive_path)?;
    let gz = flate2::read::GzDecoder::new(file);
    let mut archive = TarArchive::new(gz);
    archive.set_preserve_permissions(true);
    archive.set_preserve_mtime(true);
    archive.set_overwrite(true);

    let mut extracted = 0;
    let entries = archive.entries().map_err(tar_error)?;

    for entry in entries {
        let mut entry = entry.map_err(tar_error)?;
        let path = entry.path().map_err(tar_error)?.into_owned();
        validate_entry_path(&path)?;

        if !entry.unpack_in(destination).map_err(tar_error)? {
            return Err(CoffeebarError::SecurityError(format!(
                "Archive entry would extract outside destination: {path:?}"
            )));
        }
        extracted += 1;

        if extracted % 500 == 0 {
            log::trace!("Extracted {extracted} entries...");
        }
    }

    log::debug!("Extracted {extracted} entries from tar.gz archive");
    Ok(extracted)
}

fn extract_zip(archive_path: &Path, destination: &Path) -> Result<usize> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file).map_err(zip_error)?;
    let total = archive.len();

    for i in 0..total {
        let mut entry = archive.by_index(i).map_err(zip_error)?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(CoffeebarError::SecurityError(format!(
                "Archive entry has an unsafe name: {:?}",
                entry.name()
            )));
        };
        validate_entry_path(&relative)?;
        let outpath = destination.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = File::create(&outpath)?;
            std::io::copy(&mut entry, &mut outfile)
                .map_err(|e| CoffeebarError::Extract(format!("{}: {e}", relative.display())))?;
        }

        if let Some(mode) = entry.unix_mode() {
            file_ops::set_permissions_from_mode(&outpath, mode)?;
        }
    }

    log::debug!("Extracted {total} entries from zip archive");
    Ok(total)
}

fn tar_error(e: std::io::Error) -> CoffeebarError {
    CoffeebarError::Extract(format!("invalid tar.gz archive: {e}"))
}

fn zip_error(e: zip::result::ZipError) -> CoffeebarError {
    CoffeebarError::Extract(format!("invalid zip archive: {e}"))
}

/// Reject absolute paths and `..` components.
pub fn validate_entry_path(entry_path: &Path) -> Result<()> {
    for component in entry_path.components() {
        match component {
            Component::ParentDir => {
                return Err(CoffeebarError::SecurityError(format!(
                    "Archive contains path traversal: {entry_path:?}"
                )));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(CoffeebarError::SecurityError(format!(
                    "Archive contains absolute path: {entry_path:?}"
                )));
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(())
}

/// The only entry of `extracted_dir`, which must be a directory.
pub fn single_root(extracted_dir: &Path) -> Result<PathBuf> {
    let entries: Vec<PathBuf> = fs::read_dir(extracted_dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;

    match entries.as_slice() {
        [] => Err(CoffeebarError::Extract("archive is empty".to_string())),
        [only] if only.is_dir() => Ok(only.clone()),
        [only] => Err(CoffeebarError::Extract(format!(
            "expected a single top-level directory, found file {}",
            only.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        ))),
        many => Err(CoffeebarError::Extract(format!(
            "expected a single top-level directory, found {} entries",
            many.len()
        ))),
    }
}
