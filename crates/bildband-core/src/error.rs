// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bildband.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Bildband operations.
#[derive(Debug, Error)]
pub enum BildbandError {
    // -- Run setup --
    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Filesystem --
    #[error("not found or not a directory: {}", .0.display())]
    NotFound(PathBuf),

    // -- Image errors --
    #[error("cannot decode image {}: {reason}", path.display())]
    ImageDecode { path: PathBuf, reason: String },

    #[error("image encoding failed: {0}")]
    ImageEncode(String),

    // -- PDF errors --
    #[error("PDF assembly failed: {0}")]
    Assembly(String),

    // -- Host plumbing --
    #[error("batch worker failed: {0}")]
    Worker(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BildbandError {
    /// Only configuration errors abort a whole run; everything else is
    /// recorded against the subfolder or image that caused it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BildbandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_config_is_fatal() {
        assert!(BildbandError::Config("no root".into()).is_fatal());
        assert!(!BildbandError::NotFound(PathBuf::from("/gone")).is_fatal());
        assert!(!BildbandError::Assembly("disk full".into()).is_fatal());
        let decode = BildbandError::ImageDecode {
            path: PathBuf::from("a.png"),
            reason: "truncated".into(),
        };
        assert!(!decode.is_fatal());
    }

    #[test]
    fn decode_message_names_the_file() {
        let err = BildbandError::ImageDecode {
            path: PathBuf::from("scans/page3.png"),
            reason: "bad header".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("scans/page3.png"));
        assert!(msg.contains("bad header"));
    }
}
