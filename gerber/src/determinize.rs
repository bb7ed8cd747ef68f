use std::hash::Hash;

use hashbrown::HashMap;
use log::{debug, trace};

use crate::dfa::Dfa;
use crate::nfa::Nfa;
use crate::state_set::{StateId, StateSet};
use crate::Automaton;

impl<Σ: Eq + Hash + Copy> Nfa<Σ> {
    /// Converts the NFA into an equivalent DFA using Subset Construction.
    ///
    /// Each DFA state is an epsilon closed set of NFA states. Sets are numbered in the order they are expanded,
    /// using a last in first out worklist, so the closure of the NFA start state is always DFA state 0.
    /// Only sets reachable from the start are created, and the empty set is never one of them.
    pub fn determinize(&self) -> Dfa<Σ> {
        let alphabet = self.alphabet();

        let mut subsets: Vec<StateSet> = Vec::new();
        let mut subset_ids: HashMap<StateSet, StateId> = HashMap::new();
        let mut links: Vec<(StateId, Σ, StateSet)> = Vec::new();
        let mut worklist = Vec::new();

        if self.state_count() > 0 {
            worklist.push(self.epsilon_closure(0));
        }

        while let Some(subset) = worklist.pop() {
            if subset_ids.contains_key(&subset) {
                continue;
            }
            let id = subsets.len();
            trace!("subset {subset:?} becomes state {id}");
            subset_ids.insert(subset.clone(), id);

            for &symbol in &alphabet {
                // Every symbol of the alphabet has a row, advancing can't fail.
                let Ok(next) = self.advance(&subset, symbol) else {
                    continue;
                };
                if next.is_empty() {
                    continue;
                }
                if !subset_ids.contains_key(&next) {
                    worklist.push(next.clone());
                }
                links.push((id, symbol, next));
            }
            subsets.push(subset);
        }

        let mut dfa = Dfa::with_states(subsets.len());
        for &symbol in &alphabet {
            dfa.add_symbol(symbol);
        }
        for (from, symbol, target) in links {
            dfa.add_transition(from, symbol, subset_ids[&target]);
        }
        for (id, subset) in subsets.iter().enumerate() {
            if subset.intersects(self.final_states()) {
                dfa.set_final(id);
            }
        }

        debug!(
            "determinized {} NFA states into {} DFA states",
            self.state_count(),
            dfa.state_count()
        );
        dfa
    }
}

// MARK: Tests
#[cfg(test)]
mod tests {
    use crate::thompson::*;
    use crate::{Automaton, Nfa, Symbol};

    fn lit(s: &str) -> Nfa<char> {
        literal_chain(&s.chars().collect::<Vec<_>>())
    }

    /// Every string over `alphabet` up to `max_len` symbols long.
    fn words(alphabet: &[char], max_len: usize) -> Vec<String> {
        let mut all = vec![String::new()];
        let mut last = vec![String::new()];
        for _ in 0..max_len {
            last = last
                .iter()
                .flat_map(|word| alphabet.iter().map(move |c| format!("{word}{c}")))
                .collect();
            all.extend(last.iter().cloned());
        }
        all
    }

    #[test]
    fn test_preserves_language() {
        let nfas = [
            concatenate(&lit("ab"), &star(&lit("c"))),
            alternate(&plus(&lit("a")), &lit("ab")),
            generalized_iteration(&alternate(&lit("a"), &lit("bb")), &lit("c")),
            star(&alternate(&lit("a"), &lit("b"))),
        ];
        for nfa in &nfas {
            let dfa = nfa.determinize();
            for word in words(&['a', 'b', 'c'], 6) {
                assert_eq!(dfa.simulate_iter(word.chars()), nfa.simulate_iter(word.chars()), "{word:?}");
            }
        }
    }

    #[test]
    fn test_start_is_state_zero() {
        let nfa = star(&lit("a"));
        let dfa = nfa.determinize();
        // The start closure already holds the final state.
        assert!(dfa.final_states().contains(0));
        assert_eq!(dfa.step(0, 'a'), Ok(Some(1)));
        assert_eq!(dfa.step(1, 'a'), Ok(Some(1)));
        assert_eq!(dfa.state_count(), 2);
    }

    #[test]
    fn test_at_most_one_target() {
        // Two different 'a' transitions out of the start.
        let mut nfa = Nfa::with_states(3);
        nfa.add_transition(0, Symbol::Input('a'), 1);
        nfa.add_transition(0, Symbol::Input('a'), 2);
        nfa.add_transition(2, Symbol::Input('b'), 2);
        nfa.set_final(1);
        nfa.set_final(2);

        let dfa = nfa.determinize();
        assert_eq!(dfa.state_count(), 3);
        assert_eq!(dfa.alphabet(), vec!['a', 'b']);
        assert!(dfa.simulate_iter("a".chars()));
        assert!(dfa.simulate_iter("abbb".chars()));
        assert!(!dfa.simulate_iter("b".chars()));
        for row in dfa.transition_table().rows {
            assert!(row.transitions.iter().all(|(_, targets)| targets.len() == 1));
        }
    }

    #[test]
    fn test_symbols_without_moves_are_kept() {
        // 'b' only appears on a state that can never be reached.
        let mut nfa = Nfa::with_states(3);
        nfa.add_transition(0, Symbol::Input('a'), 1);
        nfa.add_transition(2, Symbol::Input('b'), 1);
        nfa.set_final(1);

        let dfa = nfa.determinize();
        assert_eq!(dfa.state_count(), 2);
        assert_eq!(dfa.alphabet(), vec!['a', 'b']);
        assert_eq!(dfa.step(0, 'b'), Ok(None));
    }
}
