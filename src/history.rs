//! Checkpoint history with round-boundary-aware undo.
//!
//! The history stores value copies of an opaque state `S`, each tagged with
//! whether it sits on a round boundary (both sides have fired). Undo rewinds to
//! the nearest earlier boundary so a round is always retracted whole. While no
//! boundary exists yet (placement), undo steps back one checkpoint at a time.
//! Which checkpoints count as boundaries is decided by the caller.

use alloc::vec::Vec;

/// One stored checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot<S> {
    state: S,
    round_boundary: bool,
}

impl<S> Snapshot<S> {
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn is_round_boundary(&self) -> bool {
        self.round_boundary
    }
}

#[derive(Debug, Clone)]
pub struct History<S> {
    entries: Vec<Snapshot<S>>,
}

impl<S> Default for History<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<S: Clone> History<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a copy of `state`.
    pub fn checkpoint(&mut self, state: &S, round_boundary: bool) {
        self.entries.push(Snapshot {
            state: state.clone(),
            round_boundary,
        });
    }

    /// Rewind and return the state to restore, or `None` when there is nothing to undo.
    ///
    /// The latest entry is the current state, so the search for a round
    /// boundary starts one before it. A boundary at index `i` keeps entries
    /// `0..=i`. Without any earlier boundary only the latest entry is dropped.
    pub fn undo(&mut self) -> Option<&S> {
        if self.entries.len() < 2 {
            return None;
        }
        let search_end = self.entries.len() - 1;
        match self.entries[..search_end]
            .iter()
            .rposition(Snapshot::is_round_boundary)
        {
            Some(idx) => {
                log::debug!("undo to round boundary at checkpoint {}", idx);
                self.entries.truncate(idx + 1);
            }
            None => {
                log::debug!("undo one placement step");
                self.entries.pop();
            }
        }
        self.entries.last().map(Snapshot::state)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent checkpoint.
    pub fn latest(&self) -> Option<&Snapshot<S>> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[Snapshot<S>] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
