// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch runner — starts the driver on its worker thread, prints its status
// lines, and turns Ctrl-C into a cancellation request.
//
// The driver is blocking, so draining its event channel happens on the tokio
// blocking pool while the async side waits for the interrupt signal.

use bildband_batch::{BatchEvent, spawn_batch};
use bildband_core::error::{BildbandError, Result};
use bildband_core::{ConversionJob, ConversionResult};
use bildband_document::{MarginCompositor, PdfWriter};
use tracing::{debug, warn};

/// Run `job` to completion or cancellation, writing one status line per
/// event to stdout unless `quiet`.
pub async fn run(job: ConversionJob, quiet: bool) -> Result<ConversionResult> {
    let handle = spawn_batch(job, MarginCompositor::new(), PdfWriter::new())?;

    let flag = handle.cancel_flag();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping after the current subfolder");
            flag.cancel();
        }
    });

    let outcome = tokio::task::spawn_blocking(move || {
        for event in handle.events.iter() {
            report(&event, quiet);
        }
        handle.join()
    })
    .await;

    interrupt.abort();
    outcome.map_err(|err| BildbandError::Worker(err.to_string()))?
}

fn report(event: &BatchEvent, quiet: bool) {
    if !event.is_log_line() {
        debug!(%event, "progress");
    } else if !quiet {
        println!("{event}");
    }
}
