// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::{BTreeSet,HashSet,HashMap};
use std::fmt;                          // Formatter, format!, Display, Debug, write!

use itertools::Itertools;              // sorted, join

use crate::nfa::core::EPSILON;
use crate::state_set::StateSet;

/// The type `DFA` represents a Deterministic Finite Automaton whose states are
/// sets of NFA states. The transitions of the automaton are stored in a hashtable
/// indexed by the source state, so there is at most one destination for a
/// (state, symbol) pair.
///
/// A `DFA` can only be created by a `DFABuilder` and is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DFA {
    alphabet    : BTreeSet<char>,
    states      : HashSet<StateSet>,
    transitions : HashMap<StateSet,HashMap<char,StateSet>>,
    start       : StateSet,
    finals      : HashSet<StateSet>,
}

/// The `DFABuilder` follows the builder pattern and allows to create a Deterministic
/// Finite Automaton. The builder is moved at each call so it is necessary to bind
/// to a new variable the return value for each function of the builder.
///
/// Building a DFA can not fail: the starting state is given to `new`.
///
/// # Examples
///
/// ```
/// use nfa2dfa::dfa::core::*;
/// use nfa2dfa::state_set::StateSet;
///
/// let zero = StateSet::singleton(0);
/// let one = StateSet::singleton(1);
/// // (ab)*
/// let dfa = DFABuilder::new(zero.clone())
///     .add_final(zero.clone())
///     .add_transition('a', zero.clone(), one.clone())
///     .add_transition('b', one.clone(), zero.clone())
///     .finalize();
/// assert_eq!(dfa.transition(&zero, 'a'), &one);
/// assert!(dfa.transition(&zero, 'b').is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct DFABuilder {
    alphabet    : BTreeSet<char>,
    states      : HashSet<StateSet>,
    transitions : HashMap<StateSet,HashMap<char,StateSet>>,
    start       : StateSet,
    finals      : HashSet<StateSet>,
}

impl DFABuilder {
    /// Creates a new DFABuilder rooted at `start`. Its alphabet only contains `EPSILON`.
    pub fn new(start: StateSet) -> DFABuilder {
        let mut alphabet = BTreeSet::new();
        alphabet.insert(EPSILON);
        let mut states = HashSet::new();
        states.insert(start.clone());
        DFABuilder{
            alphabet: alphabet,
            states: states,
            transitions: HashMap::new(),
            start: start,
            finals: HashSet::new(),
        }
    }

    /// Add a symbol to the alphabet.
    pub fn add_symbol(mut self, symb: char) -> DFABuilder {
        self.alphabet.insert(symb);
        self
    }

    /// Add a state to the DFA.
    pub fn add_state(mut self, state: StateSet) -> DFABuilder {
        self.states.insert(state);
        self
    }

    /// Add a final state to the DFA.
    pub fn add_final(mut self, state: StateSet) -> DFABuilder {
        self.states.insert(state.clone());
        self.finals.insert(state);
        self
    }

    /// Insert or overwrite the transition from `src` with `symb`. The last
    /// write wins.
    pub fn add_transition(mut self, symb: char, src: StateSet, dest: StateSet) -> DFABuilder {
        self.alphabet.insert(symb);
        self.states.insert(src.clone());
        self.states.insert(dest.clone());
        self.transitions.entry(src).or_insert_with(HashMap::new).insert(symb, dest);
        self
    }

    /// Union the transitions, the final states, the states and the alphabet of
    /// `other` into this builder. On a common (state, symbol) key, `other` wins.
    /// The starting state of `other` is ignored.
    pub fn merge(mut self, other: DFABuilder) -> DFABuilder {
        self.alphabet.extend(other.alphabet);
        self.states.extend(other.states);
        for (src, row) in other.transitions {
            self.transitions.entry(src).or_insert_with(HashMap::new).extend(row);
        }
        self.finals.extend(other.finals);
        self
    }

    /// Finalize the building of the DFA.
    pub fn finalize(self) -> DFA {
        DFA{
            alphabet: self.alphabet,
            states: self.states,
            transitions: self.transitions,
            start: self.start,
            finals: self.finals,
        }
    }
}

impl DFA {
    /// The alphabet of the DFA, `EPSILON` included.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// The states of the DFA.
    pub fn states(&self) -> &HashSet<StateSet> {
        &self.states
    }

    /// The starting state.
    pub fn start(&self) -> &StateSet {
        &self.start
    }

    /// The final states.
    pub fn finals(&self) -> &HashSet<StateSet> {
        &self.finals
    }

    /// Tests if `state` is one of the final states. The comparison is made on
    /// the content of the sets.
    pub fn is_final(&self, state: &StateSet) -> bool {
        self.finals.contains(state)
    }

    /// Returns the state reached from `state` with `symb`. The lookup never fails:
    /// an undefined transition leads to the empty set.
    pub fn transition(&self, state: &StateSet, symb: char) -> &StateSet {
        self.transitions
            .get(state)
            .and_then(|row| row.get(&symb))
            .unwrap_or(StateSet::empty())
    }

    /// Iterates over every recorded transition as `(src, symb, dest)`.
    pub fn transitions(&self) -> impl Iterator<Item=(&StateSet,char,&StateSet)> {
        self.transitions
            .iter()
            .flat_map(|(src,row)| row.iter().map(move |(&symb,dest)| (src,symb,dest)))
    }
}

impl fmt::Display for DFA {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "ALPHABET: {}", self.alphabet.iter().join(" "))?;
        writeln!(f, "START: {}", self.start)?;
        writeln!(f, "FINALS:")?;
        for fi in self.finals.iter().sorted() {
            writeln!(f, "  {}", fi)?;
        }
        writeln!(f, "TRANSITIONS:")?;
        for (s,c,d) in self.transitions().sorted_by(|a,b| (a.0,a.1).cmp(&(b.0,b.1))) {
            writeln!(f, "  ({},{}) => {}", s, c, d)?;
        }
        Ok(())
    }
}
