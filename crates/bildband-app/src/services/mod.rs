// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — runs the batch off the main task and verifies its output.

pub mod runner;
pub mod verify;
