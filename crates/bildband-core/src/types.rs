// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for a batch run: per-subfolder tasks, outcomes, and the
// accumulated result.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of the batch driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchState {
    /// No run in progress.
    Idle,
    /// Working through subfolders.
    Running,
    /// Every subfolder reached a terminal entry.
    Completed,
    /// Stopped early at a subfolder boundary.
    Cancelled,
}

/// One subfolder's unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubfolderTask {
    /// Directory name, as listed under the root.
    pub name: String,
    pub path: PathBuf,
    /// Images in natural order of file name.
    pub images: Vec<PathBuf>,
    pub output_path: PathBuf,
}

/// How a single subfolder ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Succeeded,
    Skipped,
    Failed,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Succeeded => "succeeded",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        };
        f.pad(label)
    }
}

/// Result row for one subfolder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub subfolder: String,
    pub outcome: Outcome,
    /// Human-readable detail ("no images", the error text, the output path).
    pub message: String,
    /// Written PDF, for succeeded entries.
    pub output: Option<PathBuf>,
    /// Page count of the written PDF.
    pub pages: usize,
    /// Images left out of the PDF because they could not be prepared.
    pub failed_images: Vec<PathBuf>,
}

impl ResultEntry {
    pub fn succeeded(
        subfolder: impl Into<String>,
        output: PathBuf,
        pages: usize,
        failed_images: Vec<PathBuf>,
    ) -> Self {
        Self {
            subfolder: subfolder.into(),
            outcome: Outcome::Succeeded,
            message: format!("wrote {} ({pages} pages)", output.display()),
            output: Some(output),
            pages,
            failed_images,
        }
    }

    pub fn skipped(subfolder: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subfolder: subfolder.into(),
            outcome: Outcome::Skipped,
            message: message.into(),
            output: None,
            pages: 0,
            failed_images: Vec::new(),
        }
    }

    pub fn failed(
        subfolder: impl Into<String>,
        message: impl Into<String>,
        failed_images: Vec<PathBuf>,
    ) -> Self {
        Self {
            subfolder: subfolder.into(),
            outcome: Outcome::Failed,
            message: message.into(),
            output: None,
            pages: 0,
            failed_images,
        }
    }
}

/// Everything a run produced, in subfolder order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    pub run_id: RunId,
    /// `Completed` or `Cancelled`.
    pub state: BatchState,
    /// Number of subfolders found under the root.
    pub total: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub entries: Vec<ResultEntry>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ConversionResult {
    pub fn new(run_id: RunId, total: usize) -> Self {
        Self {
            run_id,
            state: BatchState::Running,
            total,
            succeeded: 0,
            skipped: 0,
            failed: 0,
            entries: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Append an entry and bump the matching counter.
    pub fn record(&mut self, entry: ResultEntry) {
        match entry.outcome {
            Outcome::Succeeded => self.succeeded += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed => self.failed += 1,
        }
        self.entries.push(entry);
    }

    /// Mark the run finished in `state`.
    pub fn finish(&mut self, state: BatchState) {
        self.state = state;
        self.finished_at = Some(Utc::now());
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == BatchState::Cancelled
    }

    /// Entries recorded so far (subfolders that reached a terminal outcome).
    pub fn processed(&self) -> usize {
        self.entries.len()
    }

    pub fn entry(&self, subfolder: &str) -> Option<&ResultEntry> {
        self.entries.iter().find(|e| e.subfolder == subfolder)
    }
}
