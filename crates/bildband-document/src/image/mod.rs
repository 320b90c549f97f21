// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding, RGB flattening, margin compositing, JPEG output.

pub mod compositor;
pub mod processor;

pub use compositor::MarginCompositor;
pub use processor::ImageProcessor;
