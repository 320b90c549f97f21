// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line options and their translation into a `ConversionJob`.

use std::path::PathBuf;

use bildband_core::config::DEFAULT_JPEG_QUALITY;
use bildband_core::{ConversionJob, Margins};
use clap::Parser;

/// Convert every subfolder of ROOT into one PDF, optionally padding each
/// image with a white margin.
#[derive(Debug, Parser)]
#[command(name = "bildband", version, about)]
pub struct Cli {
    /// Folder whose immediate subfolders hold the images.
    pub root: PathBuf,

    /// Where to write the PDFs (default: ROOT).
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Margin in millimetres (0-50) on all four sides.
    #[arg(long, value_name = "MM", default_value_t = 0.0)]
    pub margin: f64,

    /// Top margin in millimetres (overrides --margin).
    #[arg(long, value_name = "MM")]
    pub top: Option<f64>,

    /// Bottom margin in millimetres (overrides --margin).
    #[arg(long, value_name = "MM")]
    pub bottom: Option<f64>,

    /// Left margin in millimetres (overrides --margin).
    #[arg(long, value_name = "MM")]
    pub left: Option<f64>,

    /// Right margin in millimetres (overrides --margin).
    #[arg(long, value_name = "MM")]
    pub right: Option<f64>,

    /// Name every PDF NAME.pdf instead of after its subfolder. Each subfolder
    /// overwrites the previous one's PDF.
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// JPEG quality of the intermediate pages (1-100).
    #[arg(long, value_name = "Q", default_value_t = DEFAULT_JPEG_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    pub jpeg_quality: u8,

    /// Re-open each written PDF and check its page count.
    #[arg(long)]
    pub verify: bool,

    /// Print the final result as JSON on stdout.
    #[arg(long)]
    pub json: bool,

    /// Debug-level logging (RUST_LOG still wins when set).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Per-side margins, falling back to `--margin`.
    pub fn margins(&self) -> Margins {
        let base = Margins::uniform(self.margin);
        Margins {
            top: self.top.unwrap_or(base.top),
            bottom: self.bottom.unwrap_or(base.bottom),
            left: self.left.unwrap_or(base.left),
            right: self.right.unwrap_or(base.right),
        }
    }

    /// The job described by these options. Range checks happen in
    /// `ConversionJob::validate`.
    pub fn to_job(&self) -> ConversionJob {
        let mut job = ConversionJob::new(&self.root)
            .with_margins(self.margins())
            .with_jpeg_quality(self.jpeg_quality);
        if let Some(output) = &self.output {
            job = job.with_output_folder(output);
        }
        if let Some(name) = &self.name {
            job = job.with_custom_name(name);
        }
        job
    }
}
