//! Single-writer result slot.

/// Holds the outcome of one frame.
///
/// Starts empty, is written exactly once, and is sealed exactly once.
pub(crate) struct ResultSlot<O> {
    outcome: Option<O>,
}

impl<O> ResultSlot<O> {
    pub(crate) const fn empty() -> Self {
        Self { outcome: None }
    }

    /// Writes the outcome.
    ///
    /// # Panics
    ///
    /// Panics if the slot was already written.
    #[track_caller]
    pub(crate) fn commit(&mut self, outcome: O) {
        assert!(
            self.outcome.is_none(),
            "computation result slot written twice"
        );
        self.outcome = Some(outcome);
    }

    /// Consumes the slot and returns the committed outcome.
    pub(crate) fn seal(self) -> O {
        match self.outcome {
            Some(outcome) => outcome,
            None => unreachable!("computation frame sealed without a committed outcome"),
        }
    }
}
