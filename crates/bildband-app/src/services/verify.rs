// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Post-run verification: re-open each written PDF and compare its page count
// with what the driver reported.

use std::collections::HashMap;
use std::path::PathBuf;

use bildband_core::ConversionResult;
use bildband_core::types::Outcome;
use bildband_document::PdfReader;
use tracing::{info, warn};

/// Outcome of checking one PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub output: PathBuf,
    pub expected_pages: usize,
    /// `None` when the file could not be parsed.
    pub actual_pages: Option<usize>,
}

impl Verification {
    pub fn is_ok(&self) -> bool {
        self.actual_pages == Some(self.expected_pages)
    }
}

/// Check every PDF the run left on disk.
///
/// With a custom name several entries share one path; only the last writer's
/// page count is expected to survive.
pub fn verify_outputs(result: &ConversionResult) -> Vec<Verification> {
    let mut last_writer: HashMap<&PathBuf, usize> = HashMap::new();
    let mut order: Vec<&PathBuf> = Vec::new();
    for entry in &result.entries {
        if entry.outcome != Outcome::Succeeded {
            continue;
        }
        if let Some(output) = &entry.output {
            if last_writer.insert(output, entry.pages).is_none() {
                order.push(output);
            }
        }
    }

    order
        .into_iter()
        .map(|output| {
            let expected_pages = last_writer[output];
            let actual_pages = match PdfReader::open(output) {
                Ok(reader) => Some(reader.page_count()),
                Err(err) => {
                    warn!(output = %output.display(), error = %err, "cannot re-open PDF");
                    None
                }
            };
            let check = Verification {
                output: output.clone(),
                expected_pages,
                actual_pages,
            };
            if check.is_ok() {
                info!(output = %output.display(), pages = expected_pages, "verified");
            } else {
                warn!(output = %output.display(), expected_pages, ?actual_pages, "page count mismatch");
            }
            check
        })
        .collect()
}
