//! Regex compiler based on Thompson's Construction, Subset Construction and partition refinement.
//!
//! The regex language has literals, parentheses and five operators, from loosest to tightest:
//! `;` alternation, `,` concatenation and `#` iteration (`a#b` is `a`, `aba`, `ababa`, ...), then postfix `*` and
//! `+`. Concatenation can be left implicit: `ab*c` reads as `a,b*,c`.
//!
//! ```
//! use thompson_regex::{accepts, compile};
//!
//! let dfa = compile("(a;b)*c").unwrap();
//! assert!(accepts(&dfa, "abbac"));
//! assert!(!accepts(&dfa, "abba"));
//! ```

use std::fmt;

use log::debug;

pub mod error;
pub mod operator;
pub mod parser;
pub mod token;

pub use error::CompileError;
pub use gerber::{Automaton, Dfa, Nfa, TransitionTable};

/// Every automaton the pipeline builds for one regex.
#[derive(Clone, Debug)]
pub struct Stages {
    /// The Thompson NFA straight out of the parser.
    pub nfa: Nfa<char>,
    /// The NFA after Subset Construction.
    pub dfa: Dfa<char>,
    /// The minimal DFA.
    pub minimal: Dfa<char>,
}

/// Builds the Thompson NFA for the regex.
pub fn build_nfa(regex: &str) -> Result<Nfa<char>, CompileError> {
    parser::parse(regex)
}

/// Compiles the regex into its minimal DFA.
pub fn compile(regex: &str) -> Result<Dfa<char>, CompileError> {
    Ok(build_nfa(regex)?.determinize().minimize())
}

/// Compiles the regex, keeping the NFA and the unminimized DFA around.
pub fn compile_stages(regex: &str) -> Result<Stages, CompileError> {
    let nfa = build_nfa(regex)?;
    let dfa = nfa.determinize();
    let minimal = dfa.minimize();
    debug!(
        "{regex:?}: {} NFA states, {} DFA states, {} minimal states",
        nfa.state_count(),
        dfa.state_count(),
        minimal.state_count()
    );
    Ok(Stages { nfa, dfa, minimal })
}

/// Returns if the automaton accepts the whole input.
pub fn accepts(automaton: &impl Automaton<char>, input: &str) -> bool {
    automaton.simulate_iter(input.chars())
}

impl fmt::Display for Stages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NFA:\n{}\n", self.nfa.transition_table())?;
        writeln!(f, "DFA:\n{}\n", self.dfa.transition_table())?;
        write!(f, "Minimal DFA:\n{}", self.minimal.transition_table())
    }
}
