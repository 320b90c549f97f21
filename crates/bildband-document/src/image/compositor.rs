// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Margin compositor — the `PageCompositor` backed by `ImageProcessor`.

use std::io::Write;
use std::path::Path;

use bildband_core::config::PageOptions;
use bildband_core::error::Result;
use bildband_core::traits::{PageCompositor, PreparedPage};
use tracing::instrument;

use super::processor::ImageProcessor;

/// Decodes a source image, pads it with white margins, and writes the page
/// as JPEG.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarginCompositor;

impl MarginCompositor {
    pub fn new() -> Self {
        Self
    }
}

impl PageCompositor for MarginCompositor {
    #[instrument(skip(self, sink), fields(source = %source.display(), quality = options.jpeg_quality))]
    fn compose(
        &self,
        source: &Path,
        options: &PageOptions,
        sink: &mut dyn Write,
    ) -> Result<PreparedPage> {
        let page = ImageProcessor::open(source)?.apply_margin(&options.margins)?;
        page.write_jpeg(sink, options.jpeg_quality.clamp(1, 100))?;
        sink.flush()?;

        Ok(PreparedPage {
            source: source.to_path_buf(),
            width: page.width(),
            height: page.height(),
        })
    }
}
