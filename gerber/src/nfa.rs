//! Table based NFA with epsilon moves.

use std::collections::VecDeque;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::state_set::{StateId, StateSet};
use crate::table::{TableRow, TransitionTable};
use crate::{Automaton, AutomatonError, Symbol};

/// A non-deterministic finite automaton stored as one row per symbol, each row holding the destination set of every state.
///
/// Rows are kept in the order their symbols were first seen, which is also the order they are rendered in.
/// A missing row means no state has a transition on that symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nfa<Σ: Eq + Hash + Copy> {
    table: IndexMap<Symbol<Σ>, Vec<StateSet>>,
    state_count: usize,
    final_states: StateSet,
}

impl<Σ: Eq + Hash + Copy> Nfa<Σ> {
    /// Creates an NFA with `state_count` states, no transitions and no final states.
    pub fn with_states(state_count: usize) -> Self {
        Self {
            table: IndexMap::new(),
            state_count,
            final_states: StateSet::new(),
        }
    }

    /// Appends a new state with no transitions, returning its id.
    pub fn add_state(&mut self) -> StateId {
        for row in self.table.values_mut() {
            row.push(StateSet::new());
        }
        self.state_count += 1;
        self.state_count - 1
    }

    /// Adds `to` to the destinations of `from` on `symbol`, creating the row for a new symbol.
    ///
    /// # Panics
    /// If either state is out of range.
    pub fn add_transition(&mut self, from: StateId, symbol: Symbol<Σ>, to: StateId) {
        assert!(
            from < self.state_count && to < self.state_count,
            "transition {from} -> {to} is outside of the {} states",
            self.state_count
        );
        let state_count = self.state_count;
        let row = self
            .table
            .entry(symbol)
            .or_insert_with(|| vec![StateSet::new(); state_count]);
        row[from].insert(to);
    }

    /// Marks a state as accepting.
    ///
    /// # Panics
    /// If the state is out of range.
    pub fn set_final(&mut self, state: StateId) {
        assert!(state < self.state_count, "final state {state} is outside of the {} states", self.state_count);
        self.final_states.insert(state);
    }

    /// Replaces the accepting states.
    pub fn set_final_states(&mut self, final_states: StateSet) {
        debug_assert!(final_states.iter().all(|&state| state < self.state_count));
        self.final_states = final_states;
    }

    /// Returns if the state is accepting.
    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    /// Returns the destinations of `state` on `symbol`.
    pub fn step(&self, state: StateId, symbol: Symbol<Σ>) -> Result<&StateSet, AutomatonError> {
        self.table
            .get(&symbol)
            .map(|row| &row[state])
            .ok_or(AutomatonError::UnknownSymbol)
    }

    /// Returns every state reachable from `state` through zero or more epsilon moves, `state` included.
    pub fn epsilon_closure(&self, state: StateId) -> StateSet {
        let mut closure = StateSet::singleton(state);
        let Some(epsilon) = self.table.get(&Symbol::Epsilon) else {
            return closure;
        };

        let mut frontier = VecDeque::from([state]);
        while let Some(cur) = frontier.pop_front() {
            for &next in &epsilon[cur] {
                if closure.insert(next) {
                    frontier.push_back(next);
                }
            }
        }
        closure
    }

    /// Moves every state of `states` on `symbol` and closes each destination under epsilon moves.
    pub fn advance(&self, states: &StateSet, symbol: Σ) -> Result<StateSet, AutomatonError> {
        let mut next = StateSet::new();
        for &state in states {
            for &target in self.step(state, Symbol::Input(symbol))? {
                if !next.contains(target) {
                    next.extend_from(&self.epsilon_closure(target));
                }
            }
        }
        Ok(next)
    }

    /// The symbols with a transition row, epsilon included, in table order.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol<Σ>> + '_ {
        self.table.keys().copied()
    }

    /// The row of a symbol, if any state has a transition on it.
    pub fn row(&self, symbol: Symbol<Σ>) -> Option<&[StateSet]> {
        self.table.get(&symbol).map(Vec::as_slice)
    }

    /// Returns a copy with `leading` fresh states in front, `trailing` fresh states at the end, and every existing state
    /// moved up by `leading`.
    pub(crate) fn padded(&self, leading: usize, trailing: usize) -> Self {
        let table = self
            .table
            .iter()
            .map(|(&symbol, row)| {
                let mut padded = vec![StateSet::new(); leading];
                padded.extend(row.iter().map(|targets| targets.shifted(leading)));
                padded.extend(std::iter::repeat_n(StateSet::new(), trailing));
                (symbol, padded)
            })
            .collect();

        Self {
            table,
            state_count: leading + self.state_count + trailing,
            final_states: self.final_states.shifted(leading),
        }
    }

    pub(crate) fn from_parts(
        table: IndexMap<Symbol<Σ>, Vec<StateSet>>,
        state_count: usize,
        final_states: StateSet,
    ) -> Self {
        debug_assert!(table.values().all(|row| row.len() == state_count));
        Self {
            table,
            state_count,
            final_states,
        }
    }
}

impl<Σ: Eq + Hash + Copy> Automaton<Σ> for Nfa<Σ> {
    fn state_count(&self) -> usize {
        self.state_count
    }

    fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    fn alphabet(&self) -> Vec<Σ> {
        self.table
            .keys()
            .filter_map(|symbol| match symbol {
                Symbol::Input(symbol) => Some(*symbol),
                Symbol::Epsilon => None,
            })
            .collect()
    }

    fn simulate_iter(&self, input: impl IntoIterator<Item = Σ>) -> bool {
        if self.state_count == 0 {
            return false;
        }

        let mut current_states = self.epsilon_closure(0);
        for symbol in input {
            match self.advance(&current_states, symbol) {
                Ok(next_states) => current_states = next_states,
                Err(AutomatonError::UnknownSymbol) => return false,
            }
        }

        current_states
            .iter()
            .any(|&state| self.epsilon_closure(state).intersects(&self.final_states))
    }

    fn transition_table(&self) -> TransitionTable<Σ> {
        let rows = self
            .table
            .iter()
            .map(|(&symbol, row)| TableRow {
                symbol,
                transitions: row
                    .iter()
                    .enumerate()
                    .filter(|(_, targets)| !targets.is_empty())
                    .map(|(state, targets)| (state, targets.clone()))
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

// MARK: Tests
#[cfg(test)]
mod tests {
    use super::*;

    fn input(c: char) -> Symbol<char> {
        Symbol::Input(c)
    }

    /// Accepts strings over {0, 1} with an even number of 0s or an even number of 1s.
    fn even_zeros_or_ones() -> Nfa<char> {
        let mut nfa = Nfa::with_states(5);
        nfa.add_transition(0, Symbol::Epsilon, 1);
        nfa.add_transition(0, Symbol::Epsilon, 3);

        nfa.add_transition(1, input('1'), 1);
        nfa.add_transition(1, input('0'), 2);
        nfa.add_transition(2, input('1'), 2);
        nfa.add_transition(2, input('0'), 1);

        nfa.add_transition(3, input('0'), 3);
        nfa.add_transition(3, input('1'), 4);
        nfa.add_transition(4, input('0'), 4);
        nfa.add_transition(4, input('1'), 3);

        nfa.set_final(1);
        nfa.set_final(3);
        nfa
    }

    #[test]
    fn test_simulate() {
        let nfa = even_zeros_or_ones();
        assert!(nfa.simulate_iter("".chars()));
        assert!(nfa.simulate_iter("00".chars()));
        assert!(!nfa.simulate_iter("01".chars()));
        assert!(nfa.simulate_iter("11".chars()));
        assert!(nfa.simulate_iter("0001010".chars()));
        assert!(!nfa.simulate_iter("00011100".chars()));
        assert!(nfa.simulate_slice(&['1', '0', '1']));
    }

    #[test]
    fn test_unknown_symbol_rejects() {
        let nfa = even_zeros_or_ones();
        assert_eq!(nfa.step(1, input('2')), Err(AutomatonError::UnknownSymbol));
        assert!(!nfa.simulate_iter("2".chars()));
        assert!(!nfa.simulate_iter("002".chars()));
    }

    #[test]
    fn test_epsilon_closure() {
        let mut nfa = Nfa::with_states(4);
        nfa.add_transition(0, Symbol::Epsilon, 1);
        nfa.add_transition(1, Symbol::Epsilon, 2);
        nfa.add_transition(2, Symbol::Epsilon, 0);
        nfa.add_transition(2, input('x'), 3);

        assert_eq!(nfa.epsilon_closure(0).as_slice(), &[0, 1, 2]);
        assert_eq!(nfa.epsilon_closure(3).as_slice(), &[3]);
    }

    #[test]
    fn test_closure_without_epsilon_row() {
        let mut nfa = Nfa::with_states(2);
        nfa.add_transition(0, input('a'), 1);
        assert_eq!(nfa.epsilon_closure(0), StateSet::singleton(0));
    }

    #[test]
    fn test_start_closure_final_accepts_empty() {
        let mut nfa = Nfa::with_states(3);
        nfa.add_transition(0, Symbol::Epsilon, 2);
        nfa.add_transition(0, input('a'), 1);
        nfa.set_final(2);
        assert!(nfa.simulate_iter("".chars()));
        assert!(!nfa.simulate_iter("a".chars()));
    }

    #[test]
    fn test_advance_closes_destinations() {
        let nfa = even_zeros_or_ones();
        let start = nfa.epsilon_closure(0);
        assert_eq!(start.as_slice(), &[0, 1, 3]);
        assert_eq!(nfa.advance(&start, '0').unwrap().as_slice(), &[2, 3]);
    }

    #[test]
    fn test_add_state_grows_rows() {
        let mut nfa = Nfa::with_states(1);
        nfa.add_transition(0, input('a'), 0);
        let new_state = nfa.add_state();
        assert_eq!(new_state, 1);
        assert_eq!(nfa.state_count(), 2);
        assert_eq!(nfa.row(input('a')).map(<[StateSet]>::len), Some(2));
        nfa.add_transition(1, input('b'), 0);
        assert_eq!(nfa.step(1, input('b')).unwrap().as_slice(), &[0]);
        assert!(nfa.step(0, input('b')).unwrap().is_empty());
    }

    #[test]
    fn test_alphabet_skips_epsilon() {
        let nfa = even_zeros_or_ones();
        assert_eq!(nfa.alphabet(), vec!['1', '0']);
        assert_eq!(nfa.symbols().next(), Some(Symbol::Epsilon));
    }

    #[test]
    #[should_panic]
    fn test_transition_out_of_range() {
        let mut nfa = Nfa::<char>::with_states(2);
        nfa.add_transition(0, input('a'), 2);
    }
}
