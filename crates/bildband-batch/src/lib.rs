// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bildband-batch — Folder discovery and the sequential batch driver.
//
// The driver walks the root's subfolders in natural order and turns each into
// one PDF through the `PageCompositor` / `PdfAssembler` collaborators. It
// knows nothing about codecs, PDF libraries, or the UI; hosts observe it
// through `BatchObserver` or drive it on a worker thread via `spawn_batch`.

pub mod driver;
pub mod events;
pub mod scanner;
pub mod worker;

pub use driver::BatchDriver;
pub use events::{BatchEvent, BatchObserver, CallbackObserver, CancelFlag, ChannelObserver};
pub use worker::{BatchHandle, spawn_batch};
