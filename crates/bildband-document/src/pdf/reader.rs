// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open a produced PDF and inspect its pages using the `lopdf`
// crate.

use std::path::Path;

use bildband_core::error::{BildbandError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, info, instrument};

/// Guards against cycles in a malformed page tree.
const MAX_PARENT_DEPTH: usize = 32;

/// Read-only view of an existing PDF file.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            BildbandError::Assembly(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            BildbandError::Assembly(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Width and height of page `page_number` (1-indexed) in points, read
    /// from its MediaBox. Inherited boxes are resolved through the page tree.
    pub fn page_size_pt(&self, page_number: u32) -> Result<(f32, f32)> {
        let pages = self.document.get_pages();
        let page_id: ObjectId = *pages.get(&page_number).ok_or_else(|| {
            BildbandError::Assembly(format!(
                "page {} out of range (document has {} pages)",
                page_number,
                pages.len()
            ))
        })?;

        let media_box = self.find_media_box(page_id)?;
        let coords = media_box
            .iter()
            .map(|value| {
                let value = self.resolve(value);
                value.as_float().map_err(|err| {
                    BildbandError::Assembly(format!("non-numeric MediaBox entry: {err}"))
                })
            })
            .collect::<Result<Vec<f32>>>()?;

        match coords.as_slice() {
            [x0, y0, x1, y1] => Ok(((x1 - x0).abs(), (y1 - y0).abs())),
            _ => Err(BildbandError::Assembly(format!(
                "MediaBox of page {page_number} has {} entries",
                coords.len()
            ))),
        }
    }

    fn find_media_box(&self, page_id: ObjectId) -> Result<&Vec<Object>> {
        let mut current = self.dictionary(page_id)?;
        for _ in 0..MAX_PARENT_DEPTH {
            if let Ok(media_box) = current.get(b"MediaBox") {
                return self.resolve(media_box).as_array().map_err(|err| {
                    BildbandError::Assembly(format!("MediaBox is not an array: {err}"))
                });
            }
            let parent = current
                .get(b"Parent")
                .and_then(Object::as_reference)
                .map_err(|_| BildbandError::Assembly("page has no MediaBox".into()))?;
            current = self.dictionary(parent)?;
        }
        Err(BildbandError::Assembly("page tree too deep".into()))
    }

    fn dictionary(&self, id: ObjectId) -> Result<&Dictionary> {
        self.document
            .get_dictionary(id)
            .map_err(|err| BildbandError::Assembly(format!("bad page object {id:?}: {err}")))
    }

    fn resolve<'a>(&'a self, object: &'a Object) -> &'a Object {
        match object {
            Object::Reference(id) => self.document.get_object(*id).unwrap_or(object),
            other => other,
        }
    }
}
