// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::BTreeSet;
use std::collections::btree_set;
use std::fmt;
use std::iter::FromIterator;

use itertools::Itertools;

/// The type `StateSet` is a set of NFA states. It is the target of a NFA transition
/// and the identity of a DFA state.
///
/// Equality, ordering and hashing are computed on the sorted sequence of members,
/// so two sets built independently with the same members are the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateSet(BTreeSet<usize>);

static EMPTY: StateSet = StateSet(BTreeSet::new());

impl StateSet {
    /// Creates an empty `StateSet`.
    pub fn new() -> StateSet {
        StateSet(BTreeSet::new())
    }

    /// Creates a `StateSet` containing only `state`.
    pub fn singleton(state: usize) -> StateSet {
        let mut set = StateSet::new();
        set.insert(state);
        set
    }

    /// The shared empty set returned by total transition lookups.
    pub fn empty() -> &'static StateSet {
        &EMPTY
    }

    /// Adds a state, returns `false` if it was already there.
    pub fn insert(&mut self, state: usize) -> bool {
        self.0.insert(state)
    }

    /// Adds every state of `other`.
    pub fn union_with(&mut self, other: &StateSet) {
        self.0.extend(other.0.iter().cloned());
    }

    /// Tests the membership of `state`.
    pub fn contains(&self, state: usize) -> bool {
        self.0.contains(&state)
    }

    /// Tests if the two sets share at least one state.
    pub fn intersects<'a, I>(&self, states: I) -> bool
        where I: IntoIterator<Item = &'a usize>
    {
        states.into_iter().any(|state| self.0.contains(state))
    }

    /// Returns `true` for the stuck state.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of NFA states in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the states in increasing order.
    pub fn iter(&self) -> btree_set::Iter<usize> {
        self.0.iter()
    }
}

impl FromIterator<usize> for StateSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> StateSet {
        StateSet(iter.into_iter().collect())
    }
}

impl Extend<usize> for StateSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = &'a usize;
    type IntoIter = btree_set::Iter<'a, usize>;

    fn into_iter(self) -> btree_set::Iter<'a, usize> {
        self.0.iter()
    }
}

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join(","))
    }
}
