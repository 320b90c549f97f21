// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Folder scanner — immediate subfolders of a root, and the images inside one
// subfolder. Ordering is left to the caller.

use std::path::{Path, PathBuf};

use bildband_core::config::{SUPPORTED_EXTENSIONS, TEMP_FILE_PREFIX};
use bildband_core::error::{BildbandError, Result};
use tracing::{debug, instrument, warn};

/// Names of the directories directly under `root`.
///
/// Symlinks to directories count as directories. Entries whose names are not
/// valid UTF-8 are skipped with a warning, since they cannot name a PDF.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn list_subfolders(root: &Path) -> Result<Vec<String>> {
    let entries = read_dir(root)?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => warn!(name = ?raw, "skipping subfolder with non UTF-8 name"),
        }
    }

    debug!(count = names.len(), "subfolders listed");
    Ok(names)
}

/// Absolute paths of the supported images directly inside `subfolder`.
///
/// Sub-directories, unsupported extensions, and leftover intermediate files
/// (prefixed [`TEMP_FILE_PREFIX`]) are excluded.
#[instrument(skip_all, fields(subfolder = %subfolder.display()))]
pub fn list_images(subfolder: &Path) -> Result<Vec<PathBuf>> {
    let base = std::path::absolute(subfolder)?;
    let entries = read_dir(&base)?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if !is_supported_image(name) {
            continue;
        }
        let path = entry.path();
        if path.is_file() {
            images.push(path);
        }
    }

    debug!(count = images.len(), "images listed");
    Ok(images)
}

/// Whether `file_name` ends in a supported extension (case-insensitive) and
/// is not an intermediate file.
pub fn is_supported_image(file_name: &str) -> bool {
    if file_name.starts_with(TEMP_FILE_PREFIX) {
        return false;
    }
    let Some((stem, ext)) = file_name.rsplit_once('.') else {
        return false;
    };
    !stem.is_empty()
        && SUPPORTED_EXTENSIONS
            .iter()
            .any(|supported| ext.eq_ignore_ascii_case(supported))
}

fn read_dir(path: &Path) -> Result<std::fs::ReadDir> {
    if !path.is_dir() {
        return Err(BildbandError::NotFound(path.to_path_buf()));
    }
    std::fs::read_dir(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            BildbandError::NotFound(path.to_path_buf())
        } else {
            BildbandError::Io(err)
        }
    })
}
