// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bildband-document — Codec and PDF backends for the Bildband batch converter.
//
// Provides image decoding and white-margin compositing (`image` crate),
// image-per-page PDF assembly and PDF inspection (`lopdf`).

pub mod image;
pub mod pdf;

// Re-export the primary structs so callers can use `bildband_document::PdfWriter` etc.
pub use image::compositor::MarginCompositor;
pub use image::processor::ImageProcessor;
pub use pdf::reader::PdfReader;
pub use pdf::writer::PdfWriter;
