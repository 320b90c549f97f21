// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bildband — Core types, errors, and collaborator traits shared across all crates.

pub mod config;
pub mod error;
pub mod natural;
pub mod traits;
pub mod types;

pub use config::{ConversionJob, Margins, NamingMode, PageOptions, PixelMargins};
pub use error::BildbandError;
pub use natural::{NaturalKey, natural_key, natural_sort_by_key};
pub use traits::{PageCompositor, PdfAssembler, PreparedPage};
pub use types::*;
