// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Busy indicator guard.

use std::sync::Arc;

use scribe_bridge::Notifier;

/// Shows the spinner on creation and hides it when dropped, on every exit
/// path of the enclosing operation.
#[must_use = "the spinner is hidden as soon as the guard is dropped"]
pub struct BusyGuard {
    notifier: Arc<dyn Notifier>,
}

impl BusyGuard {
    pub fn show(notifier: Arc<dyn Notifier>, label: &str) -> Self {
        notifier.show_spinner(label);
        Self { notifier }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.notifier.hide_spinner();
    }
}
