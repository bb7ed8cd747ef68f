//! Structured view of an automaton's transitions, used for printing.

use std::fmt::{self, Display};

use crate::state_set::{StateId, StateSet};
use crate::Symbol;

/// The non empty transitions on one symbol, in ascending source state order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow<Σ> {
    /// The symbol consumed by every transition in the row.
    pub symbol: Symbol<Σ>,
    /// `(source, destinations)` pairs, destinations in ascending order.
    pub transitions: Vec<(StateId, StateSet)>,
}

/// Every symbol with at least one transition, in the automaton's symbol order, plus the final states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTable<Σ> {
    /// One row per symbol that has a transition.
    pub rows: Vec<TableRow<Σ>>,
    /// The accepting states.
    pub final_states: StateSet,
}

impl<Σ: Display> Display for TableRow<Σ> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | ", self.symbol)?;
        for (i, (source, targets)) in self.transitions.iter().enumerate() {
            if i > 0 {
                f.write_str("  |  ")?;
            }
            write!(f, "{source} -> {targets}")?;
        }
        Ok(())
    }
}

impl<Σ: Display> Display for TransitionTable<Σ> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        write!(f, "Final states: {}", self.final_states)
    }
}
