//! The five regex operators with their precedence and Thompson combinator.

use std::fmt;

use gerber::Nfa;
use gerber::thompson;

/// A Thompson combinator, tagged with the number of fragments it consumes.
#[derive(Clone, Copy)]
pub enum Combinator {
    /// Postfix operator over one fragment.
    Unary(fn(&Nfa<char>) -> Nfa<char>),
    /// Infix operator over two fragments, left operand first.
    Binary(fn(&Nfa<char>, &Nfa<char>) -> Nfa<char>),
}

impl Combinator {
    /// How many fragments the combinator pops.
    pub fn arity(self) -> usize {
        match self {
            Combinator::Unary(_) => 1,
            Combinator::Binary(_) => 2,
        }
    }
}

/// A regex operator. Higher precedence binds tighter, operators of equal precedence associate to the left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `;`
    Alternation,
    /// `,`, also inserted between adjacent operands
    Concatenation,
    /// `#`, `a#b` is one or more `a` separated by `b`
    Iteration,
    /// postfix `*`
    Star,
    /// postfix `+`
    Plus,
}

impl Operator {
    /// Every operator, lowest precedence first.
    pub const ALL: [Operator; 5] = [
        Operator::Alternation,
        Operator::Concatenation,
        Operator::Iteration,
        Operator::Star,
        Operator::Plus,
    ];

    /// Looks up the operator written as `c`.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            ';' => Some(Operator::Alternation),
            ',' => Some(Operator::Concatenation),
            '#' => Some(Operator::Iteration),
            '*' => Some(Operator::Star),
            '+' => Some(Operator::Plus),
            _ => None,
        }
    }

    /// The character the operator is written as.
    pub const fn symbol(self) -> char {
        match self {
            Operator::Alternation => ';',
            Operator::Concatenation => ',',
            Operator::Iteration => '#',
            Operator::Star => '*',
            Operator::Plus => '+',
        }
    }

    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Alternation => 0,
            Operator::Concatenation | Operator::Iteration => 1,
            Operator::Star | Operator::Plus => 2,
        }
    }

    /// Returns if the operator is a postfix operator over a single operand.
    pub const fn is_postfix(self) -> bool {
        matches!(self, Operator::Star | Operator::Plus)
    }

    pub fn combinator(self) -> Combinator {
        match self {
            Operator::Alternation => Combinator::Binary(thompson::alternate::<char>),
            Operator::Concatenation => Combinator::Binary(thompson::concatenate::<char>),
            Operator::Iteration => Combinator::Binary(thompson::generalized_iteration::<char>),
            Operator::Star => Combinator::Unary(thompson::star::<char>),
            Operator::Plus => Combinator::Unary(thompson::plus::<char>),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
