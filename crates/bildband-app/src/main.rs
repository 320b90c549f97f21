// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bildband — batch-convert folders of images into PDFs.
//
// Entry point. Initialises logging, collects options, runs the batch on a
// worker thread, and reports a summary.

mod cli;
mod services;

use std::process::ExitCode;

use clap::Parser;

use bildband_core::ConversionResult;
use cli::Cli;
use services::{runner, verify};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    tracing::info!(root = %cli.root.display(), "Bildband starting");

    let job = cli.to_job();
    let result = match runner::run(job, cli.json).await {
        Ok(result) => result,
        Err(err) if err.is_fatal() => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
        Err(err) => {
            tracing::error!(error = %err, "batch aborted");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut verified = true;
    if cli.verify {
        for check in verify::verify_outputs(&result) {
            if !check.is_ok() {
                verified = false;
                eprintln!(
                    "verify: {} has {:?} pages, expected {}",
                    check.output.display(),
                    check.actual_pages,
                    check.expected_pages
                );
            }
        }
    }

    if cli.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: cannot serialise result: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_summary(&result);
    }

    if result.failed > 0 || result.is_cancelled() || !verified {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_summary(result: &ConversionResult) {
    println!();
    for entry in &result.entries {
        println!("  {:<9} {}: {}", entry.outcome, entry.subfolder, entry.message);
    }
    println!(
        "{} of {} subfolders processed: {} converted, {} skipped, {} failed{}",
        result.processed(),
        result.total,
        result.succeeded,
        result.skipped,
        result.failed,
        if result.is_cancelled() { " (cancelled)" } else { "" }
    );
}
