#![warn(missing_docs)]

//! Finite automata over an arbitrary symbol type: table based NFAs and DFAs, Thompson's construction,
//! Subset Construction and partition refinement minimization.
//!
//! Every automaton produced here uses dense state numbers with state 0 as the start state, so a table can be
//! handed from one stage of the pipeline to the next without any extra bookkeeping.

use std::fmt::{self, Display};
use std::hash::Hash;

pub mod dfa;
pub mod nfa;
pub mod state_set;
pub mod table;
pub mod thompson;

mod determinize;
mod minimize;

pub use dfa::Dfa;
pub use nfa::Nfa;
pub use state_set::{StateId, StateSet};
pub use table::{TableRow, TransitionTable};

/// A transition label. Epsilon moves consume no input and can never be matched by an input symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol<Σ> {
    /// The silent move.
    Epsilon,
    /// A move consuming exactly this input symbol.
    Input(Σ),
}

impl<Σ: Display> Display for Symbol<Σ> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => f.write_str("ε"),
            Symbol::Input(symbol) => symbol.fmt(f),
        }
    }
}

/// Failures while stepping an automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
    /// The automaton has no transition row for the symbol at all.
    #[error("symbol is not part of the automaton's alphabet")]
    UnknownSymbol,
}

/// Shared API of every automaton in the pipeline, deterministic or not.
pub trait Automaton<Σ: Eq + Hash + Copy> {
    /// Number of states, every table row has this length.
    fn state_count(&self) -> usize;

    /// The accepting states.
    fn final_states(&self) -> &StateSet;

    /// The input symbols with a transition row, in table order. Epsilon is never reported.
    fn alphabet(&self) -> Vec<Σ>;

    /// Tests the provided input sequence, returning true if the automaton accepts it.
    /// Symbols outside the alphabet reject the input, they are never an error.
    fn simulate_iter(&self, input: impl IntoIterator<Item = Σ>) -> bool;

    /// Tests the provided input slice, returning true if the automaton accepts it.
    fn simulate_slice(&self, input: &[Σ]) -> bool {
        self.simulate_iter(input.iter().copied())
    }

    /// Every non empty transition grouped by symbol, plus the final states.
    fn transition_table(&self) -> TransitionTable<Σ>;
}
