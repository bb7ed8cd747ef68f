//! Operator precedence parser building the NFA directly out of Thompson fragments.
//!
//! Two stacks are kept while reading the tokens left to right: pending operators (and open groups), and the
//! fragments built so far. Literal runs are buffered and turned into a chain fragment whenever an operator or a
//! parenthesis shows up. Reducing an operator pops its operands off the fragment stack and pushes the combined
//! fragment back.

use gerber::thompson::literal_chain;
use gerber::{Automaton, Nfa};
use log::{debug, trace};

use crate::error::CompileError;
use crate::operator::{Combinator, Operator};
use crate::token::{Token, TokenKind, tokenize};

#[derive(Clone, Copy, Debug)]
enum Pending {
    Operator { operator: Operator, position: usize },
    /// An open group, with the fragment stack height when it was opened.
    Group { position: usize, height: usize },
}

#[derive(Default)]
struct Parser {
    operators: Vec<Pending>,
    fragments: Vec<Nfa<char>>,
    literal: Vec<char>,
}

impl Parser {
    fn feed(&mut self, token: Token) -> Result<(), CompileError> {
        let position = token.position;
        match token.kind {
            TokenKind::Literal(c) => self.literal.push(c),
            TokenKind::Operator(operator) => {
                self.flush_literal();
                // Anything pending that binds at least as tight goes first.
                self.reduce(Some(operator.precedence()))?;
                self.operators.push(Pending::Operator { operator, position });
            }
            TokenKind::Open => {
                self.flush_literal();
                let height = self.fragments.len();
                self.operators.push(Pending::Group { position, height });
            }
            TokenKind::Close => {
                self.flush_literal();
                self.reduce(None)?;
                match self.operators.pop() {
                    Some(Pending::Group { position, height }) if self.fragments.len() == height => {
                        return Err(CompileError::EmptyGroup { position });
                    }
                    Some(Pending::Group { .. }) => {}
                    // reduce(None) only ever stops at a group or an empty stack.
                    Some(Pending::Operator { .. }) | None => {
                        return Err(CompileError::UnmatchedClose { position });
                    }
                }
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Nfa<char>, CompileError> {
        self.flush_literal();
        self.reduce(None)?;
        if let Some(&Pending::Group { position, .. }) = self.operators.last() {
            return Err(CompileError::UnmatchedOpen { position });
        }

        let fragments = self.fragments.len();
        match self.fragments.pop() {
            Some(nfa) if fragments == 1 => Ok(nfa),
            Some(_) => Err(CompileError::Disconnected { fragments }),
            None => Err(CompileError::Empty),
        }
    }

    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            self.fragments.push(literal_chain(&self.literal));
            self.literal.clear();
        }
    }

    /// Reduces pending operators until an open group, the bottom of the stack, or an operator with a precedence
    /// below `min_precedence` is reached.
    fn reduce(&mut self, min_precedence: Option<u8>) -> Result<(), CompileError> {
        while let Some(&Pending::Operator { operator, position }) = self.operators.last() {
            if min_precedence.is_some_and(|min| operator.precedence() < min) {
                break;
            }
            self.operators.pop();
            self.apply(operator, position)?;
        }
        Ok(())
    }

    fn apply(&mut self, operator: Operator, position: usize) -> Result<(), CompileError> {
        let combinator = operator.combinator();
        // Operands can't be taken from outside the innermost open group.
        let floor = self
            .operators
            .iter()
            .rev()
            .find_map(|pending| match pending {
                Pending::Group { height, .. } => Some(*height),
                Pending::Operator { .. } => None,
            })
            .unwrap_or(0);

        let missing = CompileError::MissingOperand { operator, position };
        if self.fragments.len() < floor + combinator.arity() {
            return Err(missing);
        }

        let operands = self.fragments.split_off(self.fragments.len() - combinator.arity());
        let fragment = match (combinator, operands.as_slice()) {
            (Combinator::Unary(combine), [operand]) => combine(operand),
            (Combinator::Binary(combine), [left, right]) => combine(left, right),
            _ => return Err(missing),
        };
        trace!("reduced '{operator}' into a fragment of {} states", fragment.state_count());
        self.fragments.push(fragment);
        Ok(())
    }
}

/// Parses the regex into a single Thompson NFA.
pub fn parse(regex: &str) -> Result<Nfa<char>, CompileError> {
    if regex.is_empty() {
        return Err(CompileError::Empty);
    }

    let mut parser = Parser::default();
    for token in tokenize(regex) {
        parser.feed(token)?;
    }
    let nfa = parser.finish()?;
    debug!("built NFA with {} states for {regex:?}", nfa.state_count());
    Ok(nfa)
}
