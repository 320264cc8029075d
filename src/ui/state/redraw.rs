// SPDX-License-Identifier: MPL-2.0
//! Coalescing redraw requests.
//!
//! Input handlers never draw directly. They request a redraw, and the host
//! renders once on its next display refresh no matter how many requests
//! arrived in between.

/// Tracks whether a redraw is owed on the next display refresh.
#[derive(Debug, Default, Clone)]
pub struct RedrawScheduler {
    pending: bool,
    disposed: bool,
}

impl RedrawScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a redraw as needed.
    ///
    /// Returns true if this call scheduled it, false if one was already
    /// pending or the scheduler is disposed.
    pub fn request(&mut self) -> bool {
        if self.disposed || self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consumes the pending redraw, returning whether there was one.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Drops a pending redraw.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    /// Cancels pending work and refuses all later requests.
    pub fn dispose(&mut self) {
        self.pending = false;
        self.disposed = true;
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
