//! State ids and sets of them.

use std::fmt;

use smallvec::SmallVec;

/// Dense, zero based state identifier. State 0 is always the start state.
pub type StateId = usize;

/// How many states a set holds before spilling to the heap. Thompson fragments rarely fan out further.
const INLINE_STATES: usize = 4;

/// An ordered set of states, kept sorted and free of duplicates so two sets with the same members compare and hash equal.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateSet(SmallVec<[StateId; INLINE_STATES]>);

impl StateSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Creates a set holding a single state.
    pub fn singleton(state: StateId) -> Self {
        let mut set = Self::new();
        set.0.push(state);
        set
    }

    /// Inserts a state, returns false if it was already present.
    pub fn insert(&mut self, state: StateId) -> bool {
        match self.0.binary_search(&state) {
            Ok(_) => false,
            Err(at) => {
                self.0.insert(at, state);
                true
            }
        }
    }

    /// Returns if the state is a member.
    pub fn contains(&self, state: StateId) -> bool {
        self.0.binary_search(&state).is_ok()
    }

    /// Adds every member of `other` to this set.
    pub fn extend_from(&mut self, other: &StateSet) {
        for &state in other.iter() {
            self.insert(state);
        }
    }

    /// Returns if the two sets share at least one state.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.iter().any(|&state| other.contains(state))
    }

    /// Returns a copy with every state moved up by `offset`.
    pub fn shifted(&self, offset: usize) -> Self {
        Self(self.0.iter().map(|&state| state + offset).collect())
    }

    /// Iterates the members in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, StateId> {
        self.0.iter()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The members as an ascending slice.
    pub fn as_slice(&self) -> &[StateId] {
        &self.0
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut states: SmallVec<[StateId; INLINE_STATES]> = iter.into_iter().collect();
        states.sort_unstable();
        states.dedup();
        Self(states)
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = &'a StateId;
    type IntoIter = std::slice::Iter<'a, StateId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
