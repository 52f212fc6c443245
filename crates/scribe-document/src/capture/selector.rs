// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Region selector — the pointer-driven "snip" gesture over a rendered surface.
//
// Idle -> Dragging (primary pointer-down on a surface)
// Dragging -> Idle (pointer-up, rectangle below the minimum size)
// Dragging -> PendingConfirmation (pointer-up, rectangle large enough)
// PendingConfirmation -> Idle (cancel, backdrop click, or confirm)

use std::sync::Arc;

use scribe_core::config::SelectionConfig;
use tracing::{debug, info};

use crate::capture::surface::Surface;
use crate::geometry::{Point, Rect};

/// Which pointer button triggered an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
}

/// What the pointer was over when it went down.
#[derive(Debug, Clone)]
pub enum PointerTarget {
    /// A rasterised page or image.
    Surface(Arc<Surface>),
    /// Anything else (toolbar, margins, text).
    Other,
}

/// Result of a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDown {
    /// A new drag began.
    Started,
    /// The event was not a capture gesture.
    Ignored,
}

/// Result of a pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerUp {
    /// No drag was in progress.
    Ignored,
    /// The rectangle was below the minimum size and has been dropped.
    Discarded,
    /// The selection is frozen; show the confirmation prompt.
    AwaitingConfirmation(Rect),
}

/// Where a click landed while the confirmation prompt is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalHit {
    /// The dimmed area around the prompt — dismisses it.
    Backdrop,
    /// The prompt itself.
    Content,
}

/// A finished drag: the rectangle in the target's display coordinates and
/// the surface it was drawn over.
#[derive(Debug, Clone)]
pub struct Selection {
    pub rect: Rect,
    pub target: Arc<Surface>,
}

/// Selector state. Data only exists in the states where it is meaningful, so
/// e.g. a move without a drag has nothing to update.
#[derive(Debug, Clone, Default)]
pub enum SelectorState {
    #[default]
    Idle,
    Dragging {
        origin: Point,
        current: Point,
        target: Arc<Surface>,
    },
    PendingConfirmation(Selection),
}

/// Tracks a single snip gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct RegionSelector {
    state: SelectorState,
    config: SelectionConfig,
}

impl RegionSelector {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            state: SelectorState::Idle,
            config,
        }
    }

    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    pub fn config(&self) -> SelectionConfig {
        self.config
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SelectorState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectorState::Dragging { .. })
    }

    /// Whether the confirmation prompt should be visible.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, SelectorState::PendingConfirmation(_))
    }

    /// The selection awaiting confirmation, if any.
    pub fn pending(&self) -> Option<&Selection> {
        match &self.state {
            SelectorState::PendingConfirmation(selection) => Some(selection),
            _ => None,
        }
    }

    /// The rectangle to draw over the surface right now.
    ///
    /// Visible while dragging and underneath the confirmation prompt.
    pub fn overlay(&self) -> Option<Rect> {
        match &self.state {
            SelectorState::Idle => None,
            SelectorState::Dragging {
                origin, current, ..
            } => Some(Rect::from_corners(*origin, *current)),
            SelectorState::PendingConfirmation(selection) => Some(selection.rect),
        }
    }

    /// The surface the current gesture is drawn over.
    pub fn target(&self) -> Option<&Arc<Surface>> {
        match &self.state {
            SelectorState::Idle => None,
            SelectorState::Dragging { target, .. } => Some(target),
            SelectorState::PendingConfirmation(selection) => Some(&selection.target),
        }
    }

    // -- Pointer events -------------------------------------------------------

    /// Begin a drag at `at`.
    ///
    /// Any earlier overlay is torn down first, so the latest gesture always
    /// wins. While the confirmation prompt is open, pointer input belongs to
    /// the prompt and is ignored here.
    pub fn pointer_down(
        &mut self,
        button: PointerButton,
        at: Point,
        target: PointerTarget,
    ) -> PointerDown {
        if button != PointerButton::Primary || self.is_pending() {
            return PointerDown::Ignored;
        }

        if !self.is_idle() {
            debug!("Discarding previous overlay");
        }
        self.state = SelectorState::Idle;

        match target {
            PointerTarget::Surface(surface) => {
                debug!(x = at.x, y = at.y, page = surface.page(), "Drag started");
                self.state = SelectorState::Dragging {
                    origin: at,
                    current: at,
                    target: surface,
                };
                PointerDown::Started
            }
            PointerTarget::Other => PointerDown::Ignored,
        }
    }

    /// Track the pointer while dragging; returns the updated overlay.
    pub fn pointer_move(&mut self, at: Point) -> Option<Rect> {
        match &mut self.state {
            SelectorState::Dragging {
                origin, current, ..
            } => {
                *current = at;
                Some(Rect::from_corners(*origin, at))
            }
            _ => None,
        }
    }

    /// Finish the drag at `at`.
    pub fn pointer_up(&mut self, at: Point) -> PointerUp {
        if !self.is_dragging() {
            return PointerUp::Ignored;
        }
        let SelectorState::Dragging { origin, target, .. } = std::mem::take(&mut self.state)
        else {
            return PointerUp::Ignored;
        };

        let rect = Rect::from_corners(origin, at);
        if !rect.meets(self.config.min_width, self.config.min_height) {
            debug!(
                width = rect.width,
                height = rect.height,
                "Selection below minimum size, discarded"
            );
            return PointerUp::Discarded;
        }

        info!(
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            "Selection awaiting confirmation"
        );
        self.state = SelectorState::PendingConfirmation(Selection { rect, target });
        PointerUp::AwaitingConfirmation(rect)
    }

    // -- Confirmation prompt --------------------------------------------------

    /// Drop the overlay and any selection. Returns whether anything was
    /// discarded.
    pub fn cancel(&mut self) -> bool {
        let had_state = !self.is_idle();
        self.state = SelectorState::Idle;
        if had_state {
            debug!("Selection cancelled");
        }
        had_state
    }

    /// Handle a click while the prompt is open: the backdrop dismisses it,
    /// the prompt's own content does not.
    pub fn dismiss(&mut self, hit: ModalHit) -> bool {
        match hit {
            ModalHit::Backdrop if self.is_pending() => self.cancel(),
            _ => false,
        }
    }

    /// Accept the pending selection.
    ///
    /// The selection is moved out before the state resets, so the caller
    /// always holds the snapshot to capture from.
    pub fn confirm(&mut self) -> Option<Selection> {
        match std::mem::take(&mut self.state) {
            SelectorState::PendingConfirmation(selection) => {
                info!(page = selection.target.page(), "Selection confirmed");
                Some(selection)
            }
            other => {
                self.state = other;
                None
            }
        }
    }
}
