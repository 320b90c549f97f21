// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Worker-thread bridge. The driver is blocking and sequential; a host with an
// event loop runs it here and talks to it through a channel and a cancel flag.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use bildband_core::config::ConversionJob;
use bildband_core::error::{BildbandError, Result};
use bildband_core::traits::{PageCompositor, PdfAssembler};
use bildband_core::types::ConversionResult;
use tracing::info;

use crate::driver::BatchDriver;
use crate::events::{BatchEvent, CancelFlag, ChannelObserver};

/// A batch running on its own thread.
pub struct BatchHandle {
    /// Events in the order the driver emitted them. The channel closes when
    /// the run ends.
    pub events: Receiver<BatchEvent>,
    cancel: CancelFlag,
    thread: JoinHandle<Result<ConversionResult>>,
}

impl BatchHandle {
    /// Ask the run to stop before its next subfolder.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A clone of the flag, for signal handlers and other threads.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Wait for the run to end.
    pub fn join(self) -> Result<ConversionResult> {
        self.thread
            .join()
            .map_err(|_| BildbandError::Worker("worker thread panicked".into()))?
    }
}

/// Start `job` on a new worker thread.
pub fn spawn_batch<C, A>(job: ConversionJob, compositor: C, assembler: A) -> Result<BatchHandle>
where
    C: PageCompositor + Send + 'static,
    A: PdfAssembler + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let cancel = CancelFlag::new();
    let observer_flag = cancel.clone();

    let thread = thread::Builder::new()
        .name("bildband-batch".into())
        .spawn(move || {
            let mut observer = ChannelObserver::new(tx, observer_flag);
            let mut driver = BatchDriver::new(compositor, assembler);
            driver.run_batch(job, &mut observer)
        })?;

    info!("batch worker spawned");
    Ok(BatchHandle {
        events: rx,
        cancel,
        thread,
    })
}
