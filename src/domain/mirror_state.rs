//! Per-selection mirror state
//!
//! Owned by the single dispatch path of the mirror loop; notifier workers
//! never see it.

use std::collections::HashMap;

use super::fingerprint::Fingerprint;
use super::selection::Selection;

/// What the mirror last observed for one selection.
///
/// State machine:
///   UNKNOWN -> EMPTY (no usable targets)
///   UNKNOWN | EMPTY | POPULATED -> POPULATED (classified and read)
///   POPULATED -> EMPTY (targets disappeared)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Unknown,
    Empty,
    Populated(Fingerprint),
}

impl SelectionState {
    fn fingerprint(&self) -> Option<&Fingerprint> {
        match self {
            Self::Populated(fp) => Some(fp),
            _ => None,
        }
    }
}

/// Last-seen fingerprint per selection plus the last fingerprint actually
/// written to the destination clipboard.
#[derive(Debug, Default)]
pub struct MirrorState {
    selections: HashMap<Selection, SelectionState>,
    last_written: Option<Fingerprint>,
}

impl MirrorState {
    /// Create state with every selection unknown and nothing written
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the state of one selection
    pub fn state(&self, selection: Selection) -> SelectionState {
        self.selections.get(&selection).copied().unwrap_or_default()
    }

    /// Last fingerprint written to the destination, from any selection
    pub fn last_written(&self) -> Option<&Fingerprint> {
        self.last_written.as_ref()
    }

    /// Record that a selection has no usable content.
    ///
    /// If this selection was the source of the last write, that write no
    /// longer guards anything: the same content coming back is written again.
    /// Returns true when this is a change, so the caller logs it only once.
    pub fn mark_empty(&mut self, selection: Selection) -> bool {
        let previous = self.selections.insert(selection, SelectionState::Empty);
        if let Some(SelectionState::Populated(fp)) = previous {
            if self.last_written == Some(fp) {
                self.last_written = None;
            }
        }
        previous != Some(SelectionState::Empty)
    }

    /// True when writing `fingerprint` would be a no-op: the selection already
    /// reported it, or the destination already holds it.
    pub fn is_redundant(&self, selection: Selection, fingerprint: &Fingerprint) -> bool {
        self.state(selection).fingerprint() == Some(fingerprint)
            || self.last_written.as_ref() == Some(fingerprint)
    }

    /// Record an observation that was not written
    pub fn record_seen(&mut self, selection: Selection, fingerprint: Fingerprint) {
        self.selections
            .insert(selection, SelectionState::Populated(fingerprint));
    }

    /// Record a successful destination write
    pub fn record_written(&mut self, selection: Selection, fingerprint: Fingerprint) {
        self.record_seen(selection, fingerprint);
        self.last_written = Some(fingerprint);
    }
}
