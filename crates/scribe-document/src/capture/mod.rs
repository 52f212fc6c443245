// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Snip pipeline — renderable surfaces, the pointer-driven region selector and
// the compositor that turns a confirmed selection into an encoded crop.

pub mod compositor;
pub mod selector;
pub mod surface;

pub use compositor::{CaptureCompositor, CaptureRegion, CapturedImage};
pub use selector::{RegionSelector, Selection, SelectorState};
pub use surface::{Surface, SurfaceKind};
