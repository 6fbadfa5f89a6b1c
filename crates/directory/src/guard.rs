//! Rollback guard for partially constructed rows
//!
//! Tracks how many steps of a construction sequence completed. Unless
//! [`commit`](Rollback::commit) is called, dropping the guard undoes the
//! completed steps in reverse order. Runs on early return and on unwind
//! alike, so a panicking value constructor cleans up like a failing one.

pub(crate) struct Rollback<F: FnMut(usize)> {
    completed: usize,
    undo: F,
    armed: bool,
}

impl<F: FnMut(usize)> Rollback<F> {
    /// Guard that calls `undo(i)` for every completed step `i`
    pub(crate) fn new(undo: F) -> Self {
        Rollback {
            completed: 0,
            undo,
            armed: true,
        }
    }

    /// Record one more completed step
    #[inline]
    pub(crate) fn advance(&mut self) {
        self.completed += 1;
    }

    /// Number of completed steps
    pub(crate) fn completed(&self) -> usize {
        self.completed
    }

    /// Keep everything that was constructed
    #[inline]
    pub(crate) fn commit(mut self) {
        self.armed = false;
    }
}

impl<F: FnMut(usize)> Drop for Rollback<F> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        while self.completed > 0 {
            self.completed -= 1;
            (self.undo)(self.completed);
        }
    }
}
