use std::collections::VecDeque;
use std::hash::Hash;

use log::{debug, trace};

use crate::dfa::Dfa;
use crate::state_set::{StateId, StateSet};
use crate::Automaton;

impl<Σ: Eq + Hash + Copy> Dfa<Σ> {
    /// Returns the minimal DFA recognizing the same language, using Hopcroft's partition refinement.
    ///
    /// States are grouped into blocks of indistinguishable states, each block becoming one state of the result.
    /// The block holding the old start state is state 0. States without a transition on a symbol are treated as
    /// moving to an implicit dead state, so partial DFAs are minimized as they are and no dead state is added.
    pub fn minimize(&self) -> Dfa<Σ> {
        if self.state_count() == 0 {
            return self.clone();
        }
        let alphabet = self.alphabet();

        let non_final: StateSet = (0..self.state_count()).filter(|&state| !self.is_final(state)).collect();
        let mut blocks: Vec<StateSet> = [self.final_states().clone(), non_final]
            .into_iter()
            .filter(|block| !block.is_empty())
            .collect();

        let mut queue: VecDeque<(StateSet, Σ)> = alphabet
            .iter()
            .flat_map(|&symbol| blocks.iter().map(move |block| (block.clone(), symbol)))
            .collect();

        while let Some((splitter, split_symbol)) = queue.pop_front() {
            let mut refined = Vec::with_capacity(blocks.len());
            for block in blocks {
                let (inside, outside): (Vec<StateId>, Vec<StateId>) = block.iter().partition(|&&state| {
                    self.target(state, split_symbol)
                        .is_some_and(|target| splitter.contains(target))
                });
                if inside.is_empty() || outside.is_empty() {
                    refined.push(block);
                    continue;
                }

                let inside: StateSet = inside.into_iter().collect();
                let outside: StateSet = outside.into_iter().collect();
                trace!("{splitter:?} splits {block:?} into {inside:?} and {outside:?}");

                for &symbol in &alphabet {
                    let pending = queue
                        .iter()
                        .position(|(queued, queued_symbol)| *queued_symbol == symbol && *queued == block);
                    match pending {
                        Some(at) => {
                            queue.remove(at);
                            queue.push_back((inside.clone(), symbol));
                            queue.push_back((outside.clone(), symbol));
                        }
                        None => {
                            let smaller = if inside.len() < outside.len() { &inside } else { &outside };
                            queue.push_back((smaller.clone(), symbol));
                        }
                    }
                }

                refined.push(inside);
                refined.push(outside);
            }
            blocks = refined;
        }

        if let Some(start) = blocks.iter().position(|block| block.contains(0)) {
            let start_block = blocks.remove(start);
            blocks.insert(0, start_block);
        }

        let mut block_of = vec![0; self.state_count()];
        for (id, block) in blocks.iter().enumerate() {
            for &state in block {
                block_of[state] = id;
            }
        }

        let mut minimal = Dfa::with_states(blocks.len());
        for &symbol in &alphabet {
            minimal.add_symbol(symbol);
        }
        for (id, block) in blocks.iter().enumerate() {
            // Members agree on every transition, any one of them speaks for the block.
            let representative = block.as_slice()[0];
            for &symbol in &alphabet {
                if let Some(target) = self.target(representative, symbol) {
                    minimal.add_transition(id, symbol, block_of[target]);
                }
            }
            if block.intersects(self.final_states()) {
                minimal.set_final(id);
            }
        }

        debug!(
            "minimized {} DFA states into {} states",
            self.state_count(),
            minimal.state_count()
        );
        minimal
    }
}
