// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch events and the observer seam between the driver and its host.
//
// The host sees a run as a stream of `BatchEvent`s (progress plus
// human-readable status lines) and answers one question between subfolders:
// should the run stop?

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;

use bildband_core::types::RunId;

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    Started {
        run_id: RunId,
        total: usize,
    },
    SubfolderStarted {
        index: usize,
        total: usize,
        name: String,
    },
    /// One image was left out of its subfolder's PDF.
    ImageFailed {
        subfolder: String,
        path: PathBuf,
        reason: String,
    },
    SubfolderConverted {
        name: String,
        output: PathBuf,
        pages: usize,
    },
    SubfolderSkipped {
        name: String,
        reason: String,
    },
    SubfolderFailed {
        name: String,
        reason: String,
    },
    /// A custom-named PDF replaced one written earlier in the same run.
    OutputOverwritten {
        name: String,
        output: PathBuf,
    },
    /// `completed` of `total` subfolders have a result entry.
    Progress {
        completed: usize,
        total: usize,
    },
    Cancelled {
        processed: usize,
        total: usize,
    },
    Finished {
        succeeded: usize,
        skipped: usize,
        failed: usize,
    },
}

impl BatchEvent {
    /// Whether this event should be shown as a status line. Progress ticks
    /// are meant for a progress bar instead.
    pub fn is_log_line(&self) -> bool {
        !matches!(self, Self::Progress { .. })
    }
}

impl std::fmt::Display for BatchEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Started { total, .. } => write!(f, "found {total} subfolders"),
            Self::SubfolderStarted { index, total, name } => {
                write!(f, "processing {name} ({}/{total})", index + 1)
            }
            Self::ImageFailed { path, reason, .. } => {
                write!(f, "image failed: {}: {reason}", path.display())
            }
            Self::SubfolderConverted {
                output, pages, ..
            } => write!(f, "done: {} ({pages} pages)", output.display()),
            Self::SubfolderSkipped { name, reason } => write!(f, "skipped {name}: {reason}"),
            Self::SubfolderFailed { name, reason } => write!(f, "failed {name}: {reason}"),
            Self::OutputOverwritten { name, output } => write!(
                f,
                "warning: {name} overwrote {} written earlier in this run",
                output.display()
            ),
            Self::Progress { completed, total } => write!(f, "{completed}/{total}"),
            Self::Cancelled { processed, total } => {
                write!(f, "cancelled by user after {processed} of {total} subfolders")
            }
            Self::Finished {
                succeeded,
                skipped,
                failed,
            } => write!(
                f,
                "all subfolders processed: {succeeded} converted, {skipped} skipped, {failed} failed"
            ),
        }
    }
}

/// Host side of a run.
pub trait BatchObserver {
    /// Called for every event, in order.
    fn on_event(&mut self, event: &BatchEvent);

    /// Polled before each subfolder starts. Returning `true` ends the run as
    /// `Cancelled`; the subfolder in flight is never interrupted.
    fn should_cancel(&self) -> bool {
        false
    }
}

/// Observer that ignores every event and never cancels.
impl BatchObserver for () {
    fn on_event(&mut self, _event: &BatchEvent) {}
}

/// Observer assembled from three plain callbacks: a progress callback
/// `(completed, total)`, a log sink for status lines, and a cancellation
/// predicate.
pub struct CallbackObserver<P, L, C>
where
    P: FnMut(usize, usize),
    L: FnMut(&str),
    C: Fn() -> bool,
{
    progress: P,
    log: L,
    cancel: C,
}

impl<P, L, C> CallbackObserver<P, L, C>
where
    P: FnMut(usize, usize),
    L: FnMut(&str),
    C: Fn() -> bool,
{
    pub fn new(progress: P, log: L, cancel: C) -> Self {
        Self {
            progress,
            log,
            cancel,
        }
    }
}

impl<P, L, C> BatchObserver for CallbackObserver<P, L, C>
where
    P: FnMut(usize, usize),
    L: FnMut(&str),
    C: Fn() -> bool,
{
    fn on_event(&mut self, event: &BatchEvent) {
        match event {
            BatchEvent::Progress { completed, total } => (self.progress)(*completed, *total),
            other => (self.log)(&other.to_string()),
        }
    }

    fn should_cancel(&self) -> bool {
        (self.cancel)()
    }
}

/// Shared cancellation request. Cloning shares the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Forwards events over a channel and reads cancellation from a
/// [`CancelFlag`]. Used when the driver runs on a worker thread.
pub struct ChannelObserver {
    events: Sender<BatchEvent>,
    cancel: CancelFlag,
}

impl ChannelObserver {
    pub fn new(events: Sender<BatchEvent>, cancel: CancelFlag) -> Self {
        Self { events, cancel }
    }
}

impl BatchObserver for ChannelObserver {
    fn on_event(&mut self, event: &BatchEvent) {
        // A dropped receiver means nobody is listening; the run carries on.
        let _ = self.events.send(event.clone());
    }

    fn should_cancel(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
