// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Run configuration. A `ConversionJob` is built once per batch from whatever
// the host collected (CLI flags, a form) and stays immutable for the run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BildbandError, Result};

/// Raster density assumed when turning millimetres into pixels.
pub const PIXELS_PER_INCH: f64 = 300.0;

pub const MM_PER_INCH: f64 = 25.4;

/// Largest margin accepted on any side, in millimetres.
pub const MAX_MARGIN_MM: f64 = 50.0;

/// JPEG quality for intermediate pages.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Prefix of every intermediate file written next to the source images.
pub const TEMP_FILE_PREFIX: &str = "__temp_";

/// File extensions (lower-case, without the dot) that qualify as images.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "webp"];

/// Convert a millimetre measurement to whole pixels at [`PIXELS_PER_INCH`],
/// truncating toward zero.
pub fn mm_to_px(mm: f64) -> u32 {
    (mm * PIXELS_PER_INCH / MM_PER_INCH) as u32
}

/// Margin thickness per side, in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Margins {
    /// The same margin on all four sides.
    pub fn uniform(mm: f64) -> Self {
        Self {
            top: mm,
            bottom: mm,
            left: mm,
            right: mm,
        }
    }

    pub fn to_pixels(&self) -> PixelMargins {
        PixelMargins {
            top: mm_to_px(self.top),
            bottom: mm_to_px(self.bottom),
            left: mm_to_px(self.left),
            right: mm_to_px(self.right),
        }
    }

    fn validate(&self) -> Result<()> {
        for (side, value) in [
            ("top", self.top),
            ("bottom", self.bottom),
            ("left", self.left),
            ("right", self.right),
        ] {
            if !value.is_finite() || !(0.0..=MAX_MARGIN_MM).contains(&value) {
                return Err(BildbandError::Config(format!(
                    "{side} margin must be between 0 and {MAX_MARGIN_MM} mm, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Margin thickness per side, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelMargins {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl PixelMargins {
    pub fn is_zero(&self) -> bool {
        self.top == 0 && self.bottom == 0 && self.left == 0 && self.right == 0
    }
}

/// Per-page settings handed to a `PageCompositor` for every image of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOptions {
    pub margins: PixelMargins,
    /// Quality (1-100) of the intermediate JPEG page.
    pub jpeg_quality: u8,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            margins: PixelMargins::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// How output PDFs are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamingMode {
    /// `<subfolder>.pdf`.
    PerSubfolder,
    /// `<name>.pdf` for every subfolder. Later subfolders overwrite earlier
    /// ones at the same path.
    Custom(String),
}

/// Everything one batch run needs to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionJob {
    /// Folder whose immediate subfolders are converted.
    pub root: PathBuf,
    /// Where PDFs are written. Defaults to `root`.
    pub output_folder: PathBuf,
    pub margins: Margins,
    pub naming: NamingMode,
    /// Quality (1-100) of the intermediate JPEG pages.
    pub jpeg_quality: u8,
}

impl ConversionJob {
    /// A job over `root` with no margins, per-subfolder names, and output
    /// next to the subfolders.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            output_folder: root.clone(),
            root,
            margins: Margins::default(),
            naming: NamingMode::PerSubfolder,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn with_output_folder(mut self, output: impl Into<PathBuf>) -> Self {
        self.output_folder = output.into();
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Name every output PDF `name`. The name is trimmed.
    pub fn with_custom_name(mut self, name: impl AsRef<str>) -> Self {
        self.naming = NamingMode::Custom(name.as_ref().trim().to_string());
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Margins converted to pixels at [`PIXELS_PER_INCH`].
    pub fn pixel_margins(&self) -> PixelMargins {
        self.margins.to_pixels()
    }

    /// What every page of this job is composed with.
    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            margins: self.pixel_margins(),
            jpeg_quality: self.jpeg_quality,
        }
    }

    /// Output path for the subfolder called `subfolder_name`.
    pub fn output_path_for(&self, subfolder_name: &str) -> PathBuf {
        let stem = match &self.naming {
            NamingMode::PerSubfolder => subfolder_name,
            NamingMode::Custom(name) => name.as_str(),
        };
        self.output_folder.join(format!("{stem}.pdf"))
    }

    /// Check the job before a run starts. Creates the output folder if it
    /// does not exist yet.
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(BildbandError::Config(format!(
                "root folder {} does not exist or is not a directory",
                self.root.display()
            )));
        }
        std::fs::read_dir(&self.root).map_err(|err| {
            BildbandError::Config(format!(
                "root folder {} is not readable: {err}",
                self.root.display()
            ))
        })?;

        self.margins.validate()?;

        if let NamingMode::Custom(name) = &self.naming {
            validate_custom_name(name)?;
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(BildbandError::Config(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }

        ensure_output_folder(&self.output_folder)
    }
}

fn validate_custom_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(BildbandError::Config("custom PDF name is empty".into()));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(BildbandError::Config(format!(
            "custom PDF name {name:?} must be a plain file name"
        )));
    }
    Ok(())
}

fn ensure_output_folder(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|err| {
        BildbandError::Config(format!(
            "cannot create output folder {}: {err}",
            path.display()
        ))
    })
}
