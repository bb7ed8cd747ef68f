//! Thompson's construction: combinators composing NFA fragments through epsilon moves.
//!
//! Every combinator borrows its operands and returns a brand new fragment, so a fragment can be reused any number
//! of times while building a larger expression. The start state of every fragment is state 0.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::nfa::Nfa;
use crate::state_set::StateSet;
use crate::{Automaton, Symbol};

/// Places `b` after `a` in one table without linking them: `b`'s states are moved up by `|a|`.
/// Final states are `b`'s (shifted) followed by `a`'s.
pub fn merge_disjoint<Σ: Eq + Hash + Copy>(a: &Nfa<Σ>, b: &Nfa<Σ>) -> Nfa<Σ> {
    let (a_count, b_count) = (a.state_count(), b.state_count());

    let symbols = a.symbols().chain(b.symbols().filter(|&symbol| a.row(symbol).is_none()));
    let table: IndexMap<_, _> = symbols
        .map(|symbol| {
            let mut row = Vec::with_capacity(a_count + b_count);
            match a.row(symbol) {
                Some(a_row) => row.extend_from_slice(a_row),
                None => row.resize(a_count, StateSet::new()),
            }
            match b.row(symbol) {
                Some(b_row) => row.extend(b_row.iter().map(|targets| targets.shifted(a_count))),
                None => row.resize(a_count + b_count, StateSet::new()),
            }
            (symbol, row)
        })
        .collect();

    let final_states = b.final_states().shifted(a_count).iter().chain(a.final_states()).copied().collect();
    Nfa::from_parts(table, a_count + b_count, final_states)
}

/// Recognizes L(a)·L(b): every final state of `a` gets an epsilon move to the start of `b`.
pub fn concatenate<Σ: Eq + Hash + Copy>(a: &Nfa<Σ>, b: &Nfa<Σ>) -> Nfa<Σ> {
    let b_start = a.state_count();
    let mut merged = merge_disjoint(a, b);
    for &state in a.final_states() {
        merged.add_transition(state, Symbol::Epsilon, b_start);
    }
    merged.set_final_states(b.final_states().shifted(b_start));
    merged
}

/// Recognizes L(a) ∪ L(b): a new start state branches into both fragments, whose final states all lead to a
/// single new final state.
pub fn alternate<Σ: Eq + Hash + Copy>(a: &Nfa<Σ>, b: &Nfa<Σ>) -> Nfa<Σ> {
    let mut alternation = merge_disjoint(a, b).padded(1, 1);
    let sink = alternation.state_count() - 1;

    alternation.add_transition(0, Symbol::Epsilon, 1);
    alternation.add_transition(0, Symbol::Epsilon, a.state_count() + 1);
    let old_finals = alternation.final_states().clone();
    for &state in &old_finals {
        alternation.add_transition(state, Symbol::Epsilon, sink);
    }
    alternation.set_final_states(StateSet::singleton(sink));
    alternation
}

/// Recognizes L(a)*: the fragment can be skipped entirely, or repeated by looping from its final states back to
/// its start.
pub fn star<Σ: Eq + Hash + Copy>(a: &Nfa<Σ>) -> Nfa<Σ> {
    let mut repetition = a.padded(1, 1);
    let sink = repetition.state_count() - 1;

    let old_finals = repetition.final_states().clone();
    for &state in &old_finals {
        repetition.add_transition(state, Symbol::Epsilon, 1);
        repetition.add_transition(state, Symbol::Epsilon, sink);
    }
    repetition.add_transition(0, Symbol::Epsilon, 1);
    repetition.add_transition(0, Symbol::Epsilon, sink);
    repetition.set_final_states(StateSet::singleton(sink));
    repetition
}

/// Recognizes L(a)+ as L(a)·L(a)*.
pub fn plus<Σ: Eq + Hash + Copy>(a: &Nfa<Σ>) -> Nfa<Σ> {
    concatenate(a, &star(a))
}

/// Recognizes L(a)·(L(b)·L(a))*: one or more `a` blocks, consecutive blocks separated by one `b` block.
pub fn generalized_iteration<Σ: Eq + Hash + Copy>(a: &Nfa<Σ>, b: &Nfa<Σ>) -> Nfa<Σ> {
    concatenate(a, &star(&concatenate(b, a)))
}

/// A chain of `|symbols| + 1` states, state `i` moving to `i + 1` on the `i`th symbol. The last state is final.
///
/// An empty slice gives the single state automaton accepting only the empty word.
pub fn literal_chain<Σ: Eq + Hash + Copy>(symbols: &[Σ]) -> Nfa<Σ> {
    let mut chain = Nfa::with_states(symbols.len() + 1);
    for (i, &symbol) in symbols.iter().enumerate() {
        chain.add_transition(i, Symbol::Input(symbol), i + 1);
    }
    chain.set_final(symbols.len());
    chain
}

// MARK: Tests
#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Nfa<char> {
        literal_chain(&s.chars().collect::<Vec<_>>())
    }

    fn accepts(nfa: &Nfa<char>, input: &str) -> bool {
        nfa.simulate_iter(input.chars())
    }

    #[test]
    fn test_literal_chain() {
        let chain = lit("abc");
        assert_eq!(chain.state_count(), 4);
        assert_eq!(chain.final_states().as_slice(), &[3]);
        assert!(accepts(&chain, "abc"));
        assert!(!accepts(&chain, "ab"));
        assert!(!accepts(&chain, "abcc"));

        let empty = literal_chain::<char>(&[]);
        assert_eq!(empty.state_count(), 1);
        assert!(accepts(&empty, ""));
    }

    #[test]
    fn test_merge_disjoint_layout() {
        let merged = merge_disjoint(&lit("a"), &lit("bc"));
        assert_eq!(merged.state_count(), 5);
        assert_eq!(merged.alphabet(), vec!['a', 'b', 'c']);
        assert_eq!(merged.step(0, Symbol::Input('a')).unwrap().as_slice(), &[1]);
        assert_eq!(merged.step(2, Symbol::Input('b')).unwrap().as_slice(), &[3]);
        assert_eq!(merged.step(3, Symbol::Input('c')).unwrap().as_slice(), &[4]);
        assert!(merged.step(0, Symbol::Input('b')).unwrap().is_empty());
        assert_eq!(merged.final_states().as_slice(), &[1, 4]);
    }

    #[test]
    fn test_concatenate() {
        let ab = lit("ab");
        let cd = lit("c");
        let joined = concatenate(&ab, &cd);
        assert_eq!(joined.final_states().as_slice(), &[4]);
        assert!(accepts(&joined, "abc"));
        for rejected in ["", "ab", "c", "abcc", "cab", "acb"] {
            assert!(!accepts(&joined, rejected), "{rejected:?}");
        }
    }

    #[test]
    fn test_concatenate_every_split() {
        let a = alternate(&lit("x"), &lit("xy"));
        let b = alternate(&lit("y"), &lit("z"));
        let joined = concatenate(&a, &b);
        for accepted in ["xy", "xz", "xyy", "xyz"] {
            assert!(accepts(&joined, accepted), "{accepted:?}");
        }
        for rejected in ["x", "xyx", "yz", "xyyz"] {
            assert!(!accepts(&joined, rejected), "{rejected:?}");
        }
    }

    #[test]
    fn test_alternate() {
        let a = lit("ab");
        let b = lit("c");
        let either = alternate(&a, &b);
        assert_eq!(either.state_count(), a.state_count() + b.state_count() + 2);
        assert_eq!(either.final_states().as_slice(), &[either.state_count() - 1]);
        for input in ["ab", "c", "", "a", "abc", "cc"] {
            assert_eq!(accepts(&either, input), accepts(&a, input) || accepts(&b, input), "{input:?}");
        }
    }

    #[test]
    fn test_star() {
        let a = lit("ab");
        let repeated = star(&a);
        for accepted in ["", "ab", "abab", "ababab"] {
            assert!(accepts(&repeated, accepted), "{accepted:?}");
        }
        for rejected in ["a", "aba", "ba", "abb"] {
            assert!(!accepts(&repeated, rejected), "{rejected:?}");
        }
    }

    #[test]
    fn test_plus() {
        let a = lit("ab");
        let repeated = plus(&a);
        assert!(!accepts(&repeated, ""));
        assert!(accepts(&repeated, "ab"));
        assert!(accepts(&repeated, "ababab"));
        assert!(!accepts(&repeated, "aba"));

        // An operand accepting the empty word keeps doing so.
        let optional = plus(&star(&lit("a")));
        assert!(accepts(&optional, ""));
        assert!(accepts(&optional, "aaa"));
    }

    #[test]
    fn test_generalized_iteration() {
        let a = alternate(&lit("a"), &lit("c"));
        let b = lit("b");
        let list = generalized_iteration(&a, &b);
        for accepted in ["a", "c", "aba", "cba", "abcba", "cbcbcba"] {
            assert!(accepts(&list, accepted), "{accepted:?}");
        }
        for rejected in ["", "b", "ab", "ba", "bab", "abba", "aa"] {
            assert!(!accepts(&list, rejected), "{rejected:?}");
        }
    }

    #[test]
    fn test_operands_are_not_mutated() {
        let a = lit("a");
        let before = a.clone();
        let _ = plus(&a);
        let _ = generalized_iteration(&a, &a);
        assert_eq!(a, before);
    }
}
