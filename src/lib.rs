// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

#![warn(missing_docs)]

//! Conversion of a NonDeterministic Finite Automaton with epsilon transitions
//! into a Deterministic Finite Automaton by subset construction, and
//! simulation of the DFA over candidate strings.
//!
//! ```
//! use nfa2dfa::nfa::reader::NFAReader;
//! use nfa2dfa::dfa::subset::SubsetConstructor;
//!
//! let nfa = NFAReader::new_from_string(
//!     "2\n\
//!      a\n\
//!      0: {1}\n\
//!      1:\n\
//!      0\n\
//!      {1}").unwrap();
//! let dfa = SubsetConstructor::new().build(&nfa);
//! assert_eq!(dfa.accepted(vec!["", "a", "aa"]), vec!["a"]);
//! ```

/// sets of nfa states
pub mod state_set;
/// nfa api
pub mod nfa;
/// dfa api
pub mod dfa;
