// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::{BTreeSet,HashMap,HashSet};
use std::fmt;                          // Formatter, format!, Display, Debug, write!
use std::error;
use std::result;

use itertools::Itertools;              // sorted, join

use crate::state_set::StateSet;

/// The reserved symbol of the epsilon (lambda) transitions. It belongs to every
/// alphabet and can not be declared as an input symbol.
pub const EPSILON: char = '~';

/// The `NFAError` type.
#[derive(Debug, PartialEq)]
pub enum NFAError {
    /// No starting state is specified.
    MissingStartingState,
    /// The starting state is neither declared, nor used by a transition, nor final.
    UndeclaredStartingState(usize),
    /// The epsilon symbol is declared as an input symbol.
    ReservedSymbol(char),
}

impl fmt::Display for NFAError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            NFAError::MissingStartingState => write!(f, "Missing starting state."),
            NFAError::UndeclaredStartingState(state) => write!(f, "Starting state {} is not a state of the automaton.", state),
            NFAError::ReservedSymbol(symb) => write!(f, "Symbol '{}' is reserved for epsilon transitions.", symb),
        }
    }
}

impl error::Error for NFAError {}

/// The type `NFA` represents a NonDeterministic Finite Automaton with epsilon
/// transitions. The epsilon transitions are stored with the other transitions
/// under the `EPSILON` symbol.
///
/// A `NFA` can only be created by a `NFABuilder` and is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NFA {
    alphabet    : BTreeSet<char>,
    states      : BTreeSet<usize>,
    transitions : HashMap<(char,usize),StateSet>,
    start       : usize,
    finals      : HashSet<usize>,
}

/// The `NFABuilder` follows the builder pattern and allows to create a NonDeterministic
/// Finite Automaton. The builder is moved at each call so it is necessary to bind
/// to a new variable the return value for each function of the builder.
///
/// # Errors
///
/// Return an error if the starting state is not specified.
///
/// Return an error if the epsilon symbol is declared in the alphabet.
///
/// # Examples
///
/// ```
/// use nfa2dfa::nfa::core::*;
///
/// // a(b)*
/// let nfa = NFABuilder::new()
///     .add_symbol('a')
///     .add_symbol('b')
///     .add_start(0)
///     .add_final(2)
///     .add_transition('a', 0, 1)
///     .add_e_transition(1, 2)
///     .add_transition('b', 2, 2)
///     .finalize()
///     .unwrap();
/// assert!(nfa.accepts("abb"));
/// assert!(!nfa.accepts("b"));
/// ```
///
/// ```
/// use nfa2dfa::nfa::core::*;
///
/// let nfa = NFABuilder::new()
///     .add_final(4)
///     .add_transition('t', 0, 1)
///     .finalize();
/// assert_eq!(nfa, Err(NFAError::MissingStartingState));
/// ```
#[derive(Debug, Clone)]
pub struct NFABuilder {
    alphabet    : BTreeSet<char>,
    states      : BTreeSet<usize>,
    transitions : HashMap<(char,usize),StateSet>,
    start       : Option<usize>,
    finals      : HashSet<usize>,
}

/// Alias for result::Result<T,NFAError>.
pub type Result<T> = result::Result<T,NFAError>;

/// NFABuilding is the trait assiociated to the NFABuilder type. It is implemented
/// by `NFABuilder` and by `Result<NFABuilder>` so that the building steps can be
/// chained.
///
/// # Errors
///
/// If self contains a NFAError then each function should transfer this error.
pub trait NFABuilding {
    /// Declare a state, even if no transition uses it.
    fn add_state(self, state: usize) -> Result<NFABuilder>;

    /// Declare an input symbol.
    ///
    /// # Errors
    ///
    /// Return a NFAError::ReservedSymbol if the symbol is `EPSILON`.
    fn add_symbol(self, symb: char) -> Result<NFABuilder>;

    /// Add a starting state to the NFA. The last one wins.
    fn add_start(self, state: usize) -> Result<NFABuilder>;

    /// Add a final state to the NFA.
    fn add_final(self, state: usize) -> Result<NFABuilder>;

    /// Add `dest` to the states reached from `src` with `symb`. The symbol joins
    /// the alphabet.
    fn add_transition(self, symb: char, src: usize, dest: usize) -> Result<NFABuilder>;

    /// Add an epsilon transition to the NFA.
    fn add_e_transition(self, src: usize, dest: usize) -> Result<NFABuilder>;

    /// Insert or overwrite the whole set of states reached from `src` with `symb`.
    fn set_transition(self, symb: char, src: usize, dests: StateSet) -> Result<NFABuilder>;

    /// Union the transitions, the final states, the states and the alphabet of
    /// `other` into this builder. On a common (symbol, state) key, `other` wins.
    /// The starting state of `other` is ignored.
    fn merge(self, other: NFABuilder) -> Result<NFABuilder>;

    /// Finalize the building of the NFA.
    ///
    /// # Errors
    ///
    /// Return a NFAError::MissingStartingState if no starting state is specified.
    ///
    /// Return a NFAError::UndeclaredStartingState if the starting state is unknown.
    fn finalize(self) -> Result<NFA>;
}

impl NFABuilder {
    /// Creates a new NFABuilder. Its alphabet only contains `EPSILON`.
    pub fn new() -> Result<NFABuilder> {
        let mut alphabet = BTreeSet::new();
        alphabet.insert(EPSILON);
        Ok(NFABuilder{
            alphabet: alphabet,
            states: BTreeSet::new(),
            transitions: HashMap::new(),
            start: None,
            finals: HashSet::new(),
        })
    }

    fn into_result(self) -> Result<NFABuilder> {
        Ok(self)
    }
}

impl NFABuilding for NFABuilder {
    fn add_state(self, state: usize) -> Result<NFABuilder> {
        self.into_result().add_state(state)
    }

    fn add_symbol(self, symb: char) -> Result<NFABuilder> {
        self.into_result().add_symbol(symb)
    }

    fn add_start(self, state: usize) -> Result<NFABuilder> {
        self.into_result().add_start(state)
    }

    fn add_final(self, state: usize) -> Result<NFABuilder> {
        self.into_result().add_final(state)
    }

    fn add_transition(self, symb: char, src: usize, dest: usize) -> Result<NFABuilder> {
        self.into_result().add_transition(symb,src,dest)
    }

    fn add_e_transition(self, src: usize, dest: usize) -> Result<NFABuilder> {
        self.into_result().add_e_transition(src,dest)
    }

    fn set_transition(self, symb: char, src: usize, dests: StateSet) -> Result<NFABuilder> {
        self.into_result().set_transition(symb,src,dests)
    }

    fn merge(self, other: NFABuilder) -> Result<NFABuilder> {
        self.into_result().merge(other)
    }

    fn finalize(self) -> Result<NFA> {
        self.into_result().finalize()
    }
}

/// Implementing NFABuilding trait for Result<NFABuilder> allows
/// to chain the return value of the NFABuilder instead of unwrapping them
/// at each stage of the building process.
impl NFABuilding for Result<NFABuilder> {
    fn add_state(self, state: usize) -> Result<NFABuilder> {
        self.map(|mut nfa| {
            nfa.states.insert(state);
            nfa
        })
    }

    fn add_symbol(self, symb: char) -> Result<NFABuilder> {
        self.and_then(|mut nfa| {
            if symb == EPSILON {
                return Err(NFAError::ReservedSymbol(symb));
            }
            nfa.alphabet.insert(symb);
            Ok(nfa)
        })
    }

    fn add_start(self, state: usize) -> Result<NFABuilder> {
        self.map(|mut nfa| {
            nfa.start = Some(state);
            nfa
        })
    }

    fn add_final(self, state: usize) -> Result<NFABuilder> {
        self.map(|mut nfa| {
            nfa.states.insert(state);
            nfa.finals.insert(state);
            nfa
        })
    }

    fn add_transition(self, symb: char, src: usize, dest: usize) -> Result<NFABuilder> {
        self.map(|mut nfa| {
            nfa.alphabet.insert(symb);
            nfa.states.insert(src);
            nfa.states.insert(dest);
            nfa.transitions.entry((symb,src)).or_insert_with(StateSet::new).insert(dest);
            nfa
        })
    }

    fn add_e_transition(self, src: usize, dest: usize) -> Result<NFABuilder> {
        self.add_transition(EPSILON, src, dest)
    }

    fn set_transition(self, symb: char, src: usize, dests: StateSet) -> Result<NFABuilder> {
        self.map(|mut nfa| {
            nfa.alphabet.insert(symb);
            nfa.states.insert(src);
            nfa.states.extend(dests.iter().cloned());
            nfa.transitions.insert((symb,src), dests);
            nfa
        })
    }

    fn merge(self, other: NFABuilder) -> Result<NFABuilder> {
        self.map(|mut nfa| {
            nfa.alphabet.extend(other.alphabet);
            nfa.states.extend(other.states);
            nfa.transitions.extend(other.transitions);
            nfa.finals.extend(other.finals);
            nfa
        })
    }

    fn finalize(self) -> Result<NFA> {
        self.and_then(|nfa| {
            let start = nfa.start.ok_or(NFAError::MissingStartingState)?;
            if !nfa.states.contains(&start) {
                return Err(NFAError::UndeclaredStartingState(start));
            }
            Ok(NFA{
                alphabet: nfa.alphabet,
                states: nfa.states,
                transitions: nfa.transitions,
                start: start,
                finals: nfa.finals,
            })
        })
    }
}

impl NFA {
    /// The alphabet of the NFA, `EPSILON` included.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// The states declared or used by the NFA.
    pub fn states(&self) -> &BTreeSet<usize> {
        &self.states
    }

    /// The starting state.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The final states.
    pub fn finals(&self) -> &HashSet<usize> {
        &self.finals
    }

    /// Tests if `state` is final.
    pub fn is_final(&self, state: usize) -> bool {
        self.finals.contains(&state)
    }

    /// Returns the states reached from `state` with `symb`. The lookup never fails:
    /// an undefined transition is the empty set.
    pub fn transition(&self, state: usize, symb: char) -> &StateSet {
        self.transitions.get(&(symb,state)).unwrap_or(StateSet::empty())
    }

    /// Returns the union of the transitions of each state of `states` with `symb`.
    pub fn step(&self, states: &StateSet, symb: char) -> StateSet {
        let mut next = StateSet::new();
        for &state in states {
            next.union_with(self.transition(state, symb));
        }
        next
    }

    /// Returns `states` and every state reachable from them with epsilon
    /// transitions only.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut worklist: Vec<usize> = states.iter().cloned().collect();
        while let Some(state) = worklist.pop() {
            for &next in self.transition(state, EPSILON) {
                if closure.insert(next) {
                    worklist.push(next);
                }
            }
        }
        closure
    }

    /// Test if an input string is a word of the language defined by the NFA.
    /// The epsilon closure is taken before the first symbol and after each one.
    ///
    /// # Examples
    ///
    /// ```
    /// use nfa2dfa::nfa::core::*;
    ///
    /// // (abc)*
    /// let nfa = NFABuilder::new()
    ///     .add_start(0)
    ///     .add_final(3)
    ///     .add_e_transition(0, 3)
    ///     .add_transition('a', 0, 1)
    ///     .add_transition('b', 1, 2)
    ///     .add_transition('c', 2, 3)
    ///     .add_e_transition(3, 0)
    ///     .finalize()
    ///     .unwrap();
    /// assert!(nfa.accepts(""));
    /// assert!(nfa.accepts("abcabc"));
    /// assert!(!nfa.accepts("abca"));
    /// ```
    pub fn accepts(&self, input: &str) -> bool {
        let start = self.epsilon_closure(&StateSet::singleton(self.start));
        input
            .chars()
            .fold(start, |states, c| {
                if states.is_empty() {
                    states
                } else {
                    self.epsilon_closure(&self.step(&states, c))
                }
            })
            .intersects(&self.finals)
    }
}

impl fmt::Display for NFA {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "ALPHABET: {}", self.alphabet.iter().join(" "))?;
        writeln!(f, "START: {}", self.start)?;
        writeln!(f, "FINALS:")?;
        for fi in self.finals.iter().sorted() {
            writeln!(f, "  {}", fi)?;
        }
        writeln!(f, "TRANSITIONS:")?;
        for (&(c,s),d) in self.transitions.iter().sorted_by_key(|&(&(c,s),_)| (s,c)) {
            writeln!(f, "  ({},{}) => {}", c, s, d)?;
        }
        Ok(())
    }
}
