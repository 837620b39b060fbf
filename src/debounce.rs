//! Debounced input values.
//!
//! A filter edit must not recompute rows on every keystroke; the edited value
//! commits once, after a quiet period. The deadline is checked by the update
//! loop through [`DebouncedInput::poll`], so there is no timer thread and
//! tests control time explicitly.

use std::time::{Duration, Instant};

/// A locally edited value that commits `window` after the last edit.
///
/// `value` holds the last committed (or externally supplied) state; edits
/// buffer in `pending` and move into `value` when they commit. Dropping the
/// struct mid-edit discards the pending value without committing it.
#[derive(Debug, Clone)]
pub struct DebouncedInput<T> {
    value: T,
    pending: Option<(T, Instant)>,
    window: Duration,
}

impl<T: Clone> DebouncedInput<T> {
    pub fn new(value: T, window: Duration) -> Self {
        Self {
            value,
            pending: None,
            window,
        }
    }

    /// The value as the user currently sees it: the pending edit when one is
    /// buffered, the committed value otherwise.
    pub fn value(&self) -> &T {
        match &self.pending {
            Some((value, _)) => value,
            None => &self.value,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record an edit; the commit deadline restarts from `now`.
    pub fn edit(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    /// The committed value changed from outside; adopt it immediately and
    /// drop any pending edit.
    pub fn sync(&mut self, value: T) {
        self.value = value;
        self.pending = None;
    }

    /// Commit the pending edit if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => self.flush(),
            _ => None,
        }
    }

    /// Commit the pending edit right away, deadline or not.
    pub fn flush(&mut self) -> Option<T> {
        let (value, _) = self.pending.take()?;
        self.value = value.clone();
        Some(value)
    }

    /// Discard the pending edit without committing.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
