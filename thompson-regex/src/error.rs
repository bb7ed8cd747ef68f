//! Errors that can occur while compiling a regex.

use crate::operator::Operator;

/// A malformed regex. Positions are character offsets into the regex. No automaton is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// The regex has no characters at all.
    #[error("regex is empty")]
    Empty,

    #[error("'(' at position {position} is never closed")]
    UnmatchedOpen { position: usize },

    #[error("')' at position {position} has no matching '('")]
    UnmatchedClose { position: usize },

    /// A group with nothing inside, like `()`.
    #[error("group opened at position {position} is empty")]
    EmptyGroup { position: usize },

    /// An operator without enough operands, like `a;` or `*a`.
    #[error("'{operator}' at position {position} is missing an operand")]
    MissingOperand { operator: Operator, position: usize },

    /// Pieces left over with no operator joining them, like `(a)(b)`.
    #[error("regex has {fragments} pieces with no operator between them")]
    Disconnected { fragments: usize },
}
