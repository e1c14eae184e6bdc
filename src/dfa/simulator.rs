// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::io;                           // Error
use std::io::Read;                     // read_to_string
use std::path::Path;
use std::fmt;                          // Formatter, format!, Display, Debug, write!
use std::error;
use std::fs::File;                     // File, open
use std::result;

use crate::dfa::core::DFA;
use crate::nfa::core::EPSILON;

impl DFA {
    /// Test if an input string is a word of the language defined by the DFA.
    ///
    /// After each symbol, the epsilon transition of the current state is
    /// followed too. The run stops as soon as the empty set is reached. The
    /// input is accepted if the last state is one of the final states.
    ///
    /// # Examples
    ///
    /// ```
    /// use nfa2dfa::nfa::core::*;
    /// use nfa2dfa::dfa::core::DFA;
    ///
    /// // (ab)*c
    /// let nfa = NFABuilder::new()
    ///     .add_start(0)
    ///     .add_final(3)
    ///     .add_transition('a', 0, 1)
    ///     .add_transition('c', 0, 3)
    ///     .add_transition('b', 1, 2)
    ///     .add_e_transition(2, 0)
    ///     .finalize()
    ///     .unwrap();
    /// let dfa = DFA::from(&nfa);
    /// assert!(dfa.accepts("ababc"));
    /// assert!(dfa.accepts("c"));
    /// assert!(!dfa.accepts(""));
    /// assert!(!dfa.accepts("abac"));
    /// ```
    pub fn accepts(&self, input: &str) -> bool {
        let last = input
            .chars()
            .fold(Some(self.start().clone()), |state,c| {
                state.and_then(|state| {
                    if state.is_empty() {
                        return None;
                    }
                    let mut next = self.transition(&state, c).clone();
                    next.union_with(self.transition(&state, EPSILON));
                    Some(next)
                })
            });
        match last {
            Some(state) => self.is_final(&state),
            None => false,
        }
    }

    /// Returns the accepted inputs, in the order of `inputs`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nfa2dfa::nfa::core::*;
    /// use nfa2dfa::dfa::core::DFA;
    ///
    /// let nfa = NFABuilder::new()
    ///     .add_start(0)
    ///     .add_final(2)
    ///     .add_transition('a', 0, 1)
    ///     .add_transition('b', 1, 2)
    ///     .finalize()
    ///     .unwrap();
    /// let dfa = DFA::from(&nfa);
    /// assert_eq!(dfa.accepted(vec!["a", "b", "ab"]), vec!["ab"]);
    /// ```
    pub fn accepted<I,S>(&self, inputs: I) -> Vec<S>
        where I: IntoIterator<Item=S>,
              S: AsRef<str>
    {
        inputs
            .into_iter()
            .filter(|input| self.accepts(input.as_ref()))
            .collect()
    }
}

/// Type `CandidateReaderError` describes the errors that can occur while reading
/// the list of candidate strings.
#[derive(Debug)]
pub enum CandidateReaderError {
    /// Error `Io` is relative to the input errors (the file does not exist, the file can not be
    /// read,...).
    Io(io::Error),
}

impl fmt::Display for CandidateReaderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CandidateReaderError::Io(ref err) => write!(f, "IO error: {}", err),
        }
    }
}

impl error::Error for CandidateReaderError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            CandidateReaderError::Io(ref err) => Some(err),
        }
    }
}

impl From<io::Error> for CandidateReaderError {
    fn from(err: io::Error) -> CandidateReaderError {
        CandidateReaderError::Io(err)
    }
}

/// Alias for result::Result<T,CandidateReaderError>.
pub type Result<T> = result::Result<T,CandidateReaderError>;

/// Struct `CandidateReader` is an empty structure that reads the candidate strings
/// from a file or from a `&str`. The candidates are separated by white characters.
pub struct CandidateReader;

impl CandidateReader {
    /// Reads the candidates from a file.
    ///
    /// # Description
    ///
    /// * `file_path` - The path to the file that contains the candidates.
    pub fn new_from_file<P: AsRef<Path>>(file_path: P) -> Result<Vec<String>> {
        let mut contents = String::new();
        File::open(file_path)?.read_to_string(&mut contents)?;
        Ok(CandidateReader::new_from_string(&contents))
    }

    /// Reads the candidates from a `&str`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nfa2dfa::dfa::simulator::CandidateReader;
    ///
    /// let candidates = CandidateReader::new_from_string("ab  ba\n\tabc\n");
    /// assert_eq!(candidates, vec!["ab", "ba", "abc"]);
    /// ```
    pub fn new_from_string(candidates: &str) -> Vec<String> {
        candidates.split_whitespace().map(str::to_owned).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dfa::core::DFABuilder;
    use crate::dfa::subset::{EpsilonMode,SubsetConstructor};
    use crate::nfa::core::{NFA,NFABuilder,NFABuilding};
    use crate::state_set::StateSet;
    use itertools::Itertools;

    const MODES: [EpsilonMode; 2] = [EpsilonMode::Closure, EpsilonMode::SingleHop];

    fn build(nfa: &NFA, mode: EpsilonMode) -> DFA {
        SubsetConstructor::with_mode(mode).build(nfa)
    }

    // every string over `symbols` up to `max` characters, the empty one included
    fn words(symbols: &str, max: usize) -> Vec<String> {
        let mut words = vec![String::new()];
        for len in 1..max + 1 {
            words.extend((0..len)
                .map(|_| symbols.chars())
                .multi_cartesian_product()
                .map(|word| word.into_iter().collect::<String>()));
        }
        words
    }

    #[test]
    fn test_dfa() {
        let nfa = NFABuilder::new()
            .add_start(0)
            .add_final(3)
            .add_transition('a', 0, 1)
            .add_transition('c', 0, 3)
            .add_transition('b', 1, 2)
            .add_transition('a', 2, 1)
            .add_transition('c', 2, 3)
            .finalize()
            .unwrap();
        let samples =
            vec![("ababac", false),
                 ("ababc", true),
                 ("", false),
                 ("abc", true),
                 ("c", true),
                 ("ac", false),
                 ("ababababababababababababababababababababc", true),];

        for &mode in MODES.iter() {
            let dfa = build(&nfa, mode);
            for &(input,expected_result) in samples.iter() {
                assert!(dfa.accepts(input) == expected_result, "input false for: \"{}\"", input);
            }
        }
    }

    #[test]
    fn test_single_symbol() {
        let nfa = NFABuilder::new()
            .add_symbol('a')
            .add_start(0)
            .add_final(1)
            .add_transition('a', 0, 1)
            .finalize()
            .unwrap();
        for &mode in MODES.iter() {
            let dfa = build(&nfa, mode);
            assert!(dfa.accepts("a"));
            assert!(!dfa.accepts(""));
            assert!(!dfa.accepts("aa"));
            assert!(!dfa.accepts("b"));
        }
    }

    #[test]
    fn test_empty_input_through_epsilon() {
        let nfa = NFABuilder::new()
            .add_start(0)
            .add_final(1)
            .add_e_transition(0, 1)
            .finalize()
            .unwrap();
        let dfa = build(&nfa, EpsilonMode::Closure);
        assert!(dfa.accepts(""));
        assert!(!dfa.accepts("a"));
    }

    #[test]
    fn test_single_hop_follows_epsilon_after_symbol() {
        let nfa = NFABuilder::new()
            .add_symbol('a')
            .add_start(0)
            .add_final(1)
            .add_e_transition(0, 1)
            .finalize()
            .unwrap();
        let dfa = build(&nfa, EpsilonMode::SingleHop);
        // {start} is not closed, so the empty input stops on {0}
        assert!(!dfa.accepts(""));
        // {0} -a-> {} joined with {0} -~-> {1}
        assert!(dfa.accepts("a"));
        assert!(!dfa.accepts("aa"));
    }

    #[test]
    fn test_cycle_without_finals() {
        let nfa = NFABuilder::new()
            .add_start(0)
            .add_transition('a', 0, 1)
            .add_transition('a', 1, 0)
            .finalize()
            .unwrap();
        for &mode in MODES.iter() {
            let dfa = build(&nfa, mode);
            assert!(!dfa.accepts("aaaa"));
            assert!(!dfa.accepts(""));
        }
    }

    #[test]
    fn test_accepted_keeps_order() {
        let nfa = NFABuilder::new()
            .add_start(0)
            .add_final(2)
            .add_transition('a', 0, 1)
            .add_transition('b', 1, 2)
            .finalize()
            .unwrap();
        let dfa = build(&nfa, EpsilonMode::Closure);
        assert_eq!(dfa.accepted(vec!["a", "b", "ab"]), vec!["ab"]);
        let candidates = vec!["ab".to_owned(), "ba".to_owned(), "ab".to_owned(), "".to_owned()];
        assert_eq!(dfa.accepted(candidates), vec!["ab".to_owned(), "ab".to_owned()]);
        assert!(dfa.accepted(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_stuck_state_rejects() {
        let dfa = DFABuilder::new(StateSet::singleton(0))
            .add_final(StateSet::singleton(0))
            .finalize();
        assert!(dfa.accepts(""));
        assert!(!dfa.accepts("a"));
        assert!(!dfa.accepts("abc"));
    }

    #[test]
    fn test_closure_agrees_with_nfa() {
        // ~-chains of length two between symbols and an ~-cycle
        let nfa = NFABuilder::new()
            .add_start(0)
            .add_final(4)
            .add_e_transition(0, 1)
            .add_e_transition(1, 2)
            .add_transition('a', 2, 3)
            .add_transition('b', 0, 3)
            .add_e_transition(3, 4)
            .add_e_transition(4, 5)
            .add_e_transition(5, 3)
            .add_transition('a', 5, 0)
            .add_transition('b', 4, 4)
            .finalize()
            .unwrap();
        let dfa = build(&nfa, EpsilonMode::Closure);
        for word in words("ab", 6) {
            assert_eq!(dfa.accepts(&word), nfa.accepts(&word), "input: \"{}\"", word);
        }
    }

    #[test]
    fn test_blow_up_language() {
        // (a|b)*a(a|b)
        let nfa = NFABuilder::new()
            .add_start(0)
            .add_final(2)
            .add_transition('a', 0, 0)
            .add_transition('b', 0, 0)
            .add_transition('a', 0, 1)
            .add_transition('a', 1, 2)
            .add_transition('b', 1, 2)
            .finalize()
            .unwrap();
        for &mode in MODES.iter() {
            let dfa = build(&nfa, mode);
            for word in words("ab", 5) {
                let expected = word.len() >= 2 && word.as_bytes()[word.len() - 2] == b'a';
                assert_eq!(dfa.accepts(&word), expected, "input: \"{}\"", word);
            }
        }
    }

    #[test]
    fn test_read_candidates() {
        let candidates = CandidateReader::new_from_string("a\nab  b\n\n\tabc ");
        assert_eq!(candidates, vec!["a", "ab", "b", "abc"]);
        assert!(CandidateReader::new_from_string(" \n").is_empty());
    }

    #[test]
    fn test_read_candidates_from_fake_file() {
        match CandidateReader::new_from_file("fake.txt") {
            Err(CandidateReaderError::Io(_)) => assert!(true),
            _ => assert!(false, "Io::Error expected."),
        }
    }
}
