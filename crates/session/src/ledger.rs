//! The history ledger — the ordered, append-only record of the current
//! mode session's turns.
//!
//! The ledger is scoped to one mode session: it is cleared on every mode
//! switch (including a switch to the same mode) and never populated while
//! the active mode is Rephrase. Callers avoid those appends; the ledger
//! also enforces both invariants itself.

use kabeuchi_core::{Mode, Role, Turn};

/// Per-session turn storage for one mode.
#[derive(Debug, Clone)]
pub struct HistoryLedger {
    mode: Mode,
    turns: Vec<Turn>,
}

impl HistoryLedger {
    /// A fresh, empty ledger for the given mode.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            turns: Vec::new(),
        }
    }

    /// The mode this ledger's session belongs to.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Record a turn. Silently drops the turn — no mutation, no error —
    /// when the mode keeps no history or the role is `System`.
    pub fn append(&mut self, turn: Turn) {
        if !self.mode.records_history() || turn.role == Role::System {
            return;
        }
        self.turns.push(turn);
    }

    /// The last `n` turns, in original (chronological) order. Fewer if the
    /// ledger is shorter; an empty ledger yields an empty window.
    pub fn recent(&self, n: usize) -> &[Turn] {
        &self.turns[self.turns.len().saturating_sub(n)..]
    }

    /// Drop every recorded turn.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Begin a fresh session for `mode`: clears unconditionally, even when
    /// re-entering the same mode.
    pub fn reset(&mut self, mode: Mode) {
        self.mode = mode;
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Every recorded turn, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }
}
