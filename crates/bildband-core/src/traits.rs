// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Collaborator traits between the batch driver and the codec/PDF backends.
//
// The driver only sees these two capabilities; the image decoder and the PDF
// library live behind them in `bildband-document`.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::PageOptions;
use crate::error::Result;

/// A page image written to an intermediate file, ready for assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedPage {
    /// Source image the page was made from.
    pub source: PathBuf,
    /// Final canvas size in pixels, margins included.
    pub width: u32,
    pub height: u32,
}

/// Turns one source image into a margined RGB page.
pub trait PageCompositor {
    /// Decode `source`, pad it with white `options.margins`, and write the
    /// result to `sink` as a JPEG at `options.jpeg_quality`.
    ///
    /// Decoding failures must surface as `BildbandError::ImageDecode` naming
    /// `source`; a source that no longer exists as `BildbandError::NotFound`.
    fn compose(
        &self,
        source: &Path,
        options: &PageOptions,
        sink: &mut dyn Write,
    ) -> Result<PreparedPage>;
}

/// Joins prepared pages into one PDF document.
pub trait PdfAssembler {
    /// Build a PDF with one page per path, in the given order.
    ///
    /// Fails with `BildbandError::Assembly` on an empty slice or an
    /// unreadable input.
    fn assemble(&self, pages: &[PathBuf]) -> Result<Vec<u8>>;
}
