//! Table based DFA, possibly partial.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::state_set::{StateId, StateSet};
use crate::table::{TableRow, TransitionTable};
use crate::{Automaton, AutomatonError, Symbol};

/// A deterministic finite automaton, every (state, symbol) pair leads to at most one state.
///
/// Transitions are stored one row per input symbol, rows in the order their symbols were added. Epsilon moves
/// cannot be expressed at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa<Σ: Eq + Hash + Copy> {
    table: IndexMap<Σ, Vec<Option<StateId>>>,
    state_count: usize,
    final_states: StateSet,
}

impl<Σ: Eq + Hash + Copy> Dfa<Σ> {
    /// Creates a DFA with `state_count` states, no transitions and no final states.
    pub fn with_states(state_count: usize) -> Self {
        Self {
            table: IndexMap::new(),
            state_count,
            final_states: StateSet::new(),
        }
    }

    /// Adds a row for `symbol` with no transitions, so it is part of the alphabet even if no state uses it.
    pub fn add_symbol(&mut self, symbol: Σ) {
        let state_count = self.state_count;
        self.table.entry(symbol).or_insert_with(|| vec![None; state_count]);
    }

    /// Sets the transition of `from` on `symbol`, replacing any previous one.
    ///
    /// # Panics
    /// If either state is out of range.
    pub fn add_transition(&mut self, from: StateId, symbol: Σ, to: StateId) {
        assert!(
            from < self.state_count && to < self.state_count,
            "transition {from} -> {to} is outside of the {} states",
            self.state_count
        );
        self.add_symbol(symbol);
        if let Some(row) = self.table.get_mut(&symbol) {
            row[from] = Some(to);
        }
    }

    /// Marks a state as accepting.
    ///
    /// # Panics
    /// If the state is out of range.
    pub fn set_final(&mut self, state: StateId) {
        assert!(state < self.state_count, "final state {state} is outside of the {} states", self.state_count);
        self.final_states.insert(state);
    }

    /// Returns if the state is accepting.
    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    /// Returns the destination of `state` on `symbol`, `None` when the state has no transition on it.
    pub fn step(&self, state: StateId, symbol: Σ) -> Result<Option<StateId>, AutomatonError> {
        self.table
            .get(&symbol)
            .map(|row| row[state])
            .ok_or(AutomatonError::UnknownSymbol)
    }

    /// Same as [`Dfa::step`] for callers that treat a missing row like a missing transition.
    pub(crate) fn target(&self, state: StateId, symbol: Σ) -> Option<StateId> {
        self.step(state, symbol).ok().flatten()
    }
}

impl<Σ: Eq + Hash + Copy> Automaton<Σ> for Dfa<Σ> {
    fn state_count(&self) -> usize {
        self.state_count
    }

    fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    fn alphabet(&self) -> Vec<Σ> {
        self.table.keys().copied().collect()
    }

    fn simulate_iter(&self, input: impl IntoIterator<Item = Σ>) -> bool {
        if self.state_count == 0 {
            return false;
        }

        let mut cur = 0;
        for symbol in input {
            match self.step(cur, symbol) {
                Ok(Some(next)) => cur = next,
                // Either no row for the symbol or no transition from here, the run dies.
                Ok(None) | Err(AutomatonError::UnknownSymbol) => return false,
            }
        }
        self.is_final(cur)
    }

    fn transition_table(&self) -> TransitionTable<Σ> {
        let rows = self
            .table
            .iter()
            .map(|(&symbol, row)| TableRow {
                symbol: Symbol::Input(symbol),
                transitions: row
                    .iter()
                    .enumerate()
                    .filter_map(|(state, target)| target.map(|target| (state, StateSet::singleton(target))))
                    .collect(),
            })
            .filter(|row| !row.transitions.is_empty())
            .collect();

        TransitionTable {
            rows,
            final_states: self.final_states.clone(),
        }
    }
}
