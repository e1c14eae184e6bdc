// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::HashSet;
use std::io;                           // Error
use std::io::{BufReader,BufRead};      // lines
use std::path::Path;
use std::num;                          // ParseIntError
use std::fmt;                          // Formatter, format!, Display, Debug, write!
use std::error;
use std::fs::File;                     // File, open
use std::result;

use itertools::Itertools;              // fold_ok

use crate::nfa::core::{NFA,NFABuilder,NFAError,NFABuilding,EPSILON};
use crate::state_set::StateSet;

/// Type `NFAReaderError` describes the list of errors that can occur during
/// the parsing of a NFA file.
#[derive(Debug)]
pub enum NFAReaderError {
    /// Error `MissingStateCount` means the file is empty or only contains white characters.
    MissingStateCount,
    /// Error `MissingAlphabet` means the file does not contain the alphabet line.
    MissingAlphabet,
    /// Error `MissingTransitions` means the file ends before the announced number of
    /// transition rows. The value is the number of missing rows.
    MissingTransitions(usize),
    /// Error `MissingStartingState` means the file does not contain the starting state.
    MissingStartingState,
    /// Error `MissingFinalStates` means the file does not contain the set of final states.
    MissingFinalStates,
    /// Error `IllformedSymbol` means a symbol of the alphabet is not a single character.
    IllformedSymbol(usize),
    /// Error `IllformedTransition` means the transition row does not start with `state:`.
    IllformedTransition(usize),
    /// Error `IllformedStateSet` means a set of states is not enclosed in braces.
    IllformedStateSet(usize),
    /// Error `TooManyColumns` means the transition row has more sets than the alphabet
    /// has symbols, epsilon included.
    TooManyColumns(usize),
    /// Error `DuplicatedState` means two transition rows describe the same state.
    DuplicatedState(usize,usize),
    /// Error `NFA` encapsules the error specific to the NFA building process (reserved
    /// symbol, unknown starting state,...).
    NFA(NFAError,usize),
    /// Error `Io` is relative to the input errors (the file does not exist, the file can not be
    /// read,...).
    Io(io::Error),
    /// Error `Parse` is relative to the parsing errors (a state is an integer).
    Parse(num::ParseIntError,usize),
}

impl fmt::Display for NFAReaderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            NFAReaderError::MissingStateCount => write!(f, "The file is empty or only contains white characters."),
            NFAReaderError::MissingAlphabet => write!(f, "The file does not specify the alphabet."),
            NFAReaderError::MissingTransitions(count) => write!(f, "The file misses {} transition row(s).", count),
            NFAReaderError::MissingStartingState => write!(f, "The file does not specify the starting state."),
            NFAReaderError::MissingFinalStates => write!(f, "The file does not specify the set of final states."),
            NFAReaderError::IllformedSymbol(line) => write!(f, "Line {}: a symbol must be a single character.", line),
            NFAReaderError::IllformedTransition(line) => write!(f, "Line {}: missing the `state:` prefix.", line),
            NFAReaderError::IllformedStateSet(line) => write!(f, "Line {}: a set of states must be enclosed in braces.", line),
            NFAReaderError::TooManyColumns(line) => write!(f, "Line {}: too much sets of states.", line),
            NFAReaderError::DuplicatedState(state,line) => write!(f, "Line {}: state {} is already described.", line, state),
            NFAReaderError::NFA(ref err,line) => write!(f, "Line {}: NFAError {}", line, err),
            NFAReaderError::Io(ref err) => write!(f, "IO error: {}", err),
            NFAReaderError::Parse(ref err,line) => write!(f, "Line {}: parse error {}", line, err),
        }
    }
}

impl error::Error for NFAReaderError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            NFAReaderError::Io(ref err) => Some(err),
            NFAReaderError::Parse(ref err,_) => Some(err),
            NFAReaderError::NFA(ref err,_) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for NFAReaderError {
    fn from(err: io::Error) -> NFAReaderError {
        NFAReaderError::Io(err)
    }
}

/// Alias for result::Result<T,NFAReaderError>.
pub type Result<T> = result::Result<T,NFAReaderError>;

type Line = (usize,io::Result<String>);

/// Struct `NFAReader` is an empty structure that builds a `NFA` from a file
/// or from a `&str`.
///
/// The format is line oriented, `#` starts a comment and blank lines are skipped:
///
/// ```text
/// 3              # number of transition rows
/// a b            # alphabet, epsilon is implicit
/// 0: {1} {} {2}  # one set per symbol, then the optional epsilon column
/// 1: {} {2}
/// 2:
/// 0              # starting state
/// {2}            # final states
/// ```
pub struct NFAReader;

impl NFAReader {
    fn parse_nfa_error(contents: &str, line: usize) -> Result<usize> {
            contents.trim().parse::<usize>()
                    .map_err(|e| NFAReaderError::Parse(e,line))
    }

    fn parse_symbol(contents: &str, line: usize) -> Result<char> {
        let mut chars = contents.chars();
        match (chars.next(), chars.next()) {
            (Some(symb), None) => Ok(symb),
            _ => Err(NFAReaderError::IllformedSymbol(line)),
        }
    }

    // Members separated by commas or white characters, without the braces.
    fn parse_members(contents: &str, line: usize) -> Result<StateSet> {
        itertools::process_results(
            contents
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty())
                .map(|token| NFAReader::parse_nfa_error(token,line)),
            |states| states.collect())
    }

    // A sequence of `{...}` groups.
    fn parse_columns(contents: &str, line: usize) -> Result<Vec<StateSet>> {
        let mut pieces: Vec<&str> = contents.split('}').map(str::trim).collect();
        // the text after the last closing brace
        let rest = pieces.pop().unwrap_or("");
        if !rest.is_empty() {
            return Err(NFAReaderError::IllformedStateSet(line));
        }
        pieces
            .into_iter()
            .map(|piece| {
                if !piece.starts_with('{') {
                    return Err(NFAReaderError::IllformedStateSet(line));
                }
                NFAReader::parse_members(&piece[1..], line)
            })
            .collect()
    }

    fn next_line<I>(lines: &mut I, missing: NFAReaderError) -> Result<(usize,String)>
        where I: Iterator<Item=Line>
    {
        let (nline,line) = lines.next().ok_or(missing)?;
        Ok((nline,line?))
    }

    /// Reads a NFA from a file.
    ///
    /// # Description
    ///
    /// * `file_path` - The path to the file that contains the NFA.
    ///
    /// # Examples
    ///
    /// ```
    /// use nfa2dfa::nfa::reader::*;
    ///
    /// let nfa = NFAReader::new_from_file("nfa.txt");
    /// match nfa {
    ///     Ok(nfa) => {
    ///        // Do stuff with the nfa
    ///     },
    ///     Err(e) => println!("{}", e),
    /// }
    /// ```
    pub fn new_from_file<P: AsRef<Path>>(file_path: P) -> Result<NFA> {
        let file = File::open(file_path)?;
        let file = BufReader::new(file);
        NFAReader::new_from_lines(file.lines())
    }

    fn read_state_count<I>(lines: &mut I) -> Result<usize>
        where I: Iterator<Item=Line>
    {
        let (nline,line) = NFAReader::next_line(lines, NFAReaderError::MissingStateCount)?;
        NFAReader::parse_nfa_error(&line,nline)
    }

    fn read_alphabet<I>(nfa: NFABuilder, lines: &mut I) -> Result<(NFABuilder,Vec<char>)>
        where I: Iterator<Item=Line>
    {
        let (nline,line) = NFAReader::next_line(lines, NFAReaderError::MissingAlphabet)?;
        // `{}` declares an alphabet without any input symbol
        if line == "{}" {
            return Ok((nfa,Vec::new()));
        }
        let symbols = line
            .split_whitespace()
            .map(|token| NFAReader::parse_symbol(token,nline))
            .fold_ok(Vec::new(), |mut acc, symb| {
                if !acc.contains(&symb) {
                    acc.push(symb);
                }
                acc
            })?;
        let nfa = symbols
            .iter()
            .fold(Ok(nfa), |acc: result::Result<NFABuilder,NFAError>, &symb| acc.add_symbol(symb))
            .map_err(|e| NFAReaderError::NFA(e,nline))?;
        Ok((nfa,symbols))
    }

    fn read_transition(nfa: NFABuilder, symbols: &[char], seen: &mut HashSet<usize>, line: Line) -> Result<NFABuilder> {
        let (nline,line) = line;
        let line = line?;
        let (state,columns) = match line.find(':') {
            Some(colon) => (&line[..colon], &line[colon+1..]),
            None => return Err(NFAReaderError::IllformedTransition(nline)),
        };
        let state = NFAReader::parse_nfa_error(state,nline)?;
        if !seen.insert(state) {
            return Err(NFAReaderError::DuplicatedState(state,nline));
        }
        let columns = NFAReader::parse_columns(columns,nline)?;
        if columns.len() > symbols.len() + 1 {
            return Err(NFAReaderError::TooManyColumns(nline));
        }
        let nfa = symbols
            .iter()
            .cloned()
            .chain(Some(EPSILON))
            .zip(columns)
            .filter(|&(_,ref dests)| !dests.is_empty())
            .fold(nfa.add_state(state), |acc, (symb,dests)| acc.set_transition(symb, state, dests))
            .map_err(|e| NFAReaderError::NFA(e,nline))?;
        Ok(nfa)
    }

    fn read_start<I>(nfa: NFABuilder, lines: &mut I) -> Result<(NFABuilder,usize)>
        where I: Iterator<Item=Line>
    {
        let (nline,line) = NFAReader::next_line(lines, NFAReaderError::MissingStartingState)?;
        let start = NFAReader::parse_nfa_error(&line,nline)?;
        let nfa = nfa.add_start(start).map_err(|e| NFAReaderError::NFA(e,nline))?;
        Ok((nfa,nline))
    }

    fn read_finals<I>(nfa: NFABuilder, lines: &mut I) -> Result<NFABuilder>
        where I: Iterator<Item=Line>
    {
        let (nline,line) = NFAReader::next_line(lines, NFAReaderError::MissingFinalStates)?;
        let mut groups = NFAReader::parse_columns(&line,nline)?;
        let finals = match (groups.pop(), groups.is_empty()) {
            (Some(finals), true) => finals,
            _ => return Err(NFAReaderError::IllformedStateSet(nline)),
        };
        finals
            .iter()
            .fold(Ok(nfa), |acc: result::Result<NFABuilder,NFAError>, &state| acc.add_final(state))
            .map_err(|e| NFAReaderError::NFA(e,nline))
    }

    fn new_from_lines<I>(lines: I) -> Result<NFA>
        where I: Iterator<Item=io::Result<String>>
    {
        let nfa = NFABuilder::new().map_err(|e| NFAReaderError::NFA(e,0))?;
        let mut lines = lines
            .map(|line| {
                line.map(|contents| contents.split('#').next().unwrap_or("").trim().to_owned())
            })
            .enumerate().map(|(nline,line)| (nline+1,line))
            .filter(|&(_,ref line)| {
                line.as_ref().map(|line| !line.is_empty()).unwrap_or(true)
            });
        let count = NFAReader::read_state_count(&mut lines)?;
        let (mut nfa,symbols) = NFAReader::read_alphabet(nfa, &mut lines)?;
        let mut seen = HashSet::new();
        for missing in (1..=count).rev() {
            let line = lines.next().ok_or(NFAReaderError::MissingTransitions(missing))?;
            nfa = NFAReader::read_transition(nfa, &symbols, &mut seen, line)?;
        }
        let (nfa,start_line) = NFAReader::read_start(nfa, &mut lines)?;
        let nfa = NFAReader::read_finals(nfa, &mut lines)?;
        // the remaining lines are ignored
        nfa.finalize().map_err(|e| NFAReaderError::NFA(e,start_line))
    }

    /// Reads a NFA from a `&str`.
    ///
    /// # Description
    ///
    /// * `nfa` - The string representation of the NFA.
    ///
    /// # Examples
    ///
    /// ```
    /// use nfa2dfa::nfa::reader::*;
    ///
    /// // a(b)*
    /// let nfa =
    ///     "3\n\
    ///      a b\n\
    ///      0: {1} {}\n\
    ///      1: {}  {}  {2}\n\
    ///      2: {}  {2}\n\
    ///      0\n\
    ///      {2}";
    /// let nfa = NFAReader::new_from_string(nfa).unwrap();
    /// assert!(nfa.accepts("abbb"));
    /// assert!(!nfa.accepts("ba"));
    /// ```
    pub fn new_from_string(nfa: &str) -> Result<NFA> {
        NFAReader::new_from_lines(nfa.lines().map(|line| Ok(line.to_string())))
    }
}
