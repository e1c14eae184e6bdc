// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::HashSet;

use crate::dfa::core::{DFA,DFABuilder};
use crate::nfa::core::{NFA,EPSILON};
use crate::state_set::StateSet;

/// `EpsilonMode` selects how the subset construction handles the epsilon
/// transitions of the NFA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EpsilonMode {
    /// The starting state and every destination are closed under epsilon
    /// transitions. The DFA has no epsilon transition and recognizes the same
    /// language as the NFA.
    #[default]
    Closure,
    /// Epsilon is expanded like any other symbol: the starting state is
    /// `{start}` and the DFA keeps epsilon transitions between state sets. The
    /// simulator follows a single epsilon transition after each symbol.
    SingleHop,
}

/// `SubsetConstructor` builds a `DFA` from a `NFA` with the subset (powerset)
/// construction.
///
/// Each set of NFA states reachable from the starting state is expanded exactly
/// once: a global registry of the processed sets stops the worklist, whatever
/// the length of the cycles between the sets.
///
/// # Examples
///
/// ```
/// use nfa2dfa::nfa::core::*;
/// use nfa2dfa::dfa::subset::SubsetConstructor;
///
/// // a|ab
/// let nfa = NFABuilder::new()
///     .add_start(0)
///     .add_final(1)
///     .add_final(3)
///     .add_transition('a', 0, 1)
///     .add_transition('a', 0, 2)
///     .add_transition('b', 2, 3)
///     .finalize()
///     .unwrap();
/// let dfa = SubsetConstructor::new().build(&nfa);
/// assert_eq!(dfa.states().len(), 3);
/// assert!(dfa.accepts("a"));
/// assert!(dfa.accepts("ab"));
/// assert!(!dfa.accepts("b"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsetConstructor {
    mode: EpsilonMode,
}

impl SubsetConstructor {
    /// Creates a `SubsetConstructor` with the `EpsilonMode::Closure` mode.
    pub fn new() -> SubsetConstructor {
        SubsetConstructor::default()
    }

    /// Creates a `SubsetConstructor` with the given epsilon mode.
    pub fn with_mode(mode: EpsilonMode) -> SubsetConstructor {
        SubsetConstructor{mode: mode}
    }

    /// The epsilon mode of the construction.
    pub fn mode(&self) -> EpsilonMode {
        self.mode
    }

    fn start(&self, nfa: &NFA) -> StateSet {
        let start = StateSet::singleton(nfa.start());
        match self.mode {
            EpsilonMode::Closure => nfa.epsilon_closure(&start),
            EpsilonMode::SingleHop => start,
        }
    }

    fn symbols<'a>(&self, nfa: &'a NFA) -> impl Iterator<Item=char> + 'a {
        let mode = self.mode;
        nfa.alphabet()
            .iter()
            .cloned()
            .filter(move |&symb| mode == EpsilonMode::SingleHop || symb != EPSILON)
    }

    fn destination(&self, nfa: &NFA, states: &StateSet, symb: char) -> StateSet {
        let dest = nfa.step(states, symb);
        match self.mode {
            EpsilonMode::Closure => nfa.epsilon_closure(&dest),
            EpsilonMode::SingleHop => dest,
        }
    }

    /// Builds the DFA equivalent to `nfa`.
    ///
    /// The states of the DFA are the sets of NFA states reachable from the
    /// starting set. A set is final if it contains a final state of the NFA. An
    /// empty destination is not recorded.
    pub fn build(&self, nfa: &NFA) -> DFA {
        let start = self.start(nfa);
        let mut processed: HashSet<StateSet> = HashSet::new();
        let mut worklist = vec![start.clone()];
        let mut dfa = nfa.alphabet()
            .iter()
            .fold(DFABuilder::new(start), |dfa, &symb| dfa.add_symbol(symb));

        while let Some(states) = worklist.pop() {
            if !processed.insert(states.clone()) {
                continue;
            }
            // The transitions leaving `states`, merged at once. Each set is
            // expanded once so a merge never overwrites a transition.
            let mut row = DFABuilder::new(states.clone());
            if states.intersects(nfa.finals()) {
                row = row.add_final(states.clone());
            }
            for symb in self.symbols(nfa) {
                let dest = self.destination(nfa, &states, symb);
                if dest.is_empty() {
                    continue;
                }
                if !processed.contains(&dest) {
                    worklist.push(dest.clone());
                }
                row = row.add_transition(symb, states.clone(), dest);
            }
            dfa = dfa.merge(row);
        }
        dfa.finalize()
    }
}

impl<'a> From<&'a NFA> for DFA {
    /// Builds the DFA with the default `SubsetConstructor`.
    fn from(nfa: &'a NFA) -> DFA {
        SubsetConstructor::new().build(nfa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::core::{NFABuilder,NFABuilding};
    use std::collections::VecDeque;

    const MODES: [EpsilonMode; 2] = [EpsilonMode::Closure, EpsilonMode::SingleHop];

    fn set(states: &[usize]) -> StateSet {
        states.iter().cloned().collect()
    }

    // (a|b)*a(a|b){n}: the DFA needs 2^(n+1) states.
    fn nth_from_last(n: usize) -> NFA {
        let nfa = NFABuilder::new()
            .add_start(0)
            .add_final(n + 1)
            .add_transition('a', 0, 0)
            .add_transition('b', 0, 0)
            .add_transition('a', 0, 1);
        (1..n + 1)
            .fold(nfa, |nfa, i| nfa.add_transition('a', i, i + 1).add_transition('b', i, i + 1))
            .finalize()
            .unwrap()
    }

    // states reached from `state` by epsilon transitions only, `state` included
    fn epsilon_reachable(nfa: &NFA, state: usize) -> HashSet<usize> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(state);
        queue.push_back(state);
        while let Some(s) = queue.pop_front() {
            for &t in nfa.transition(s, EPSILON) {
                if seen.insert(t) {
                    queue.push_back(t);
                }
            }
        }
        seen
    }

    fn lambda_nfa() -> NFA {
        // 0 -~-> 1 -~-> 2, 0 -a-> 3, 2 -b-> 3, 3 -~-> 0
        NFABuilder::new()
            .add_start(0)
            .add_final(2)
            .add_e_transition(0, 1)
            .add_e_transition(1, 2)
            .add_transition('a', 0, 3)
            .add_transition('b', 2, 3)
            .add_e_transition(3, 0)
            .finalize()
            .unwrap()
    }

    #[test]
    fn test_single_transition() {
        let nfa = NFABuilder::new()
            .add_symbol('a')
            .add_start(0)
            .add_final(1)
            .add_transition('a', 0, 1)
            .finalize()
            .unwrap();
        for &mode in MODES.iter() {
            let dfa = SubsetConstructor::with_mode(mode).build(&nfa);
            assert_eq!(dfa.start(), &set(&[0]));
            assert_eq!(dfa.states().len(), 2);
            assert_eq!(dfa.transition(&set(&[0]), 'a'), &set(&[1]));
            assert!(dfa.is_final(&set(&[1])));
            assert!(!dfa.is_final(&set(&[0])));
        }
    }

    #[test]
    fn test_start_without_transitions() {
        for &final_start in [true, false].iter() {
            let nfa = NFABuilder::new()
                .add_symbol('a')
                .add_state(0)
                .add_start(0);
            let nfa = if final_start { nfa.add_final(0) } else { nfa };
            let nfa = nfa.finalize().unwrap();
            for &mode in MODES.iter() {
                let dfa = SubsetConstructor::with_mode(mode).build(&nfa);
                assert_eq!(dfa.states().len(), 1);
                assert_eq!(dfa.transitions().count(), 0);
                assert_eq!(dfa.is_final(&set(&[0])), final_start);
            }
        }
    }

    #[test]
    fn test_epsilon_start_closure() {
        let nfa = NFABuilder::new()
            .add_start(0)
            .add_final(1)
            .add_e_transition(0, 1)
            .finalize()
            .unwrap();
        let dfa = SubsetConstructor::new().build(&nfa);
        assert_eq!(dfa.start(), &set(&[0, 1]));
        assert!(dfa.is_final(dfa.start()));
        assert_eq!(dfa.transitions().count(), 0);
    }

    #[test]
    fn test_epsilon_single_hop() {
        let nfa = NFABuilder::new()
            .add_start(0)
            .add_final(1)
            .add_e_transition(0, 1)
            .finalize()
            .unwrap();
        let dfa = SubsetConstructor::with_mode(EpsilonMode::SingleHop).build(&nfa);
        assert_eq!(dfa.start(), &set(&[0]));
        assert!(!dfa.is_final(dfa.start()));
        assert_eq!(dfa.transition(&set(&[0]), EPSILON), &set(&[1]));
        assert!(dfa.is_final(&set(&[1])));
    }

    #[test]
    fn test_epsilon_only_alphabet() {
        let nfa = NFABuilder::new()
            .add_start(0)
            .add_e_transition(0, 1)
            .add_e_transition(1, 2)
            .add_e_transition(2, 0)
            .finalize()
            .unwrap();
        let dfa = SubsetConstructor::with_mode(EpsilonMode::SingleHop).build(&nfa);
        assert_eq!(dfa.states().len(), 3);
        assert_eq!(dfa.transition(&set(&[2]), EPSILON), &set(&[0]));
        let dfa = SubsetConstructor::new().build(&nfa);
        assert_eq!(dfa.states().len(), 1);
        assert_eq!(dfa.start(), &set(&[0, 1, 2]));
    }

    #[test]
    fn test_two_state_cycle_terminates() {
        let nfa = NFABuilder::new()
            .add_start(0)
            .add_transition('a', 0, 1)
            .add_transition('a', 1, 0)
            .finalize()
            .unwrap();
        for &mode in MODES.iter() {
            let dfa = SubsetConstructor::with_mode(mode).build(&nfa);
            assert_eq!(dfa.states().len(), 2);
            assert_eq!(dfa.transition(&set(&[1]), 'a'), &set(&[0]));
            assert!(dfa.finals().is_empty());
        }
    }

    #[test]
    fn test_long_cycle_terminates() {
        // {0} -a-> {1,2} -a-> {3} -a-> {0}
        let nfa = NFABuilder::new()
            .add_start(0)
            .add_final(3)
            .add_transition('a', 0, 1)
            .add_transition('a', 0, 2)
            .add_transition('a', 1, 3)
            .add_transition('a', 2, 3)
            .add_transition('a', 3, 0)
            .finalize()
            .unwrap();
        let dfa = SubsetConstructor::new().build(&nfa);
        assert_eq!(dfa.states().len(), 3);
        assert_eq!(dfa.transition(&set(&[0]), 'a'), &set(&[1, 2]));
        assert_eq!(dfa.transition(&set(&[1, 2]), 'a'), &set(&[3]));
        assert_eq!(dfa.transition(&set(&[3]), 'a'), &set(&[0]));
        assert_eq!(dfa.finals().len(), 1);
    }

    #[test]
    fn test_exponential_blow_up() {
        for n in 0..6 {
            let dfa = SubsetConstructor::new().build(&nth_from_last(n));
            assert_eq!(dfa.states().len(), 1 << (n + 1), "n = {}", n);
            assert_eq!(dfa.finals().len(), 1 << n, "n = {}", n);
        }
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        let nfa = lambda_nfa();
        for &mode in MODES.iter() {
            let constructor = SubsetConstructor::with_mode(mode);
            let dfa = constructor.build(&nfa);
            assert_eq!(dfa, constructor.build(&nfa));
            let mut keys = HashSet::new();
            for (src,symb,_) in dfa.transitions() {
                assert!(keys.insert((src.clone(),symb)), "two destinations for ({},{})", src, symb);
            }
        }
    }

    #[test]
    fn test_finals_intersect_nfa_finals() {
        let nfa = lambda_nfa();
        for &mode in MODES.iter() {
            let dfa = SubsetConstructor::with_mode(mode).build(&nfa);
            for state in dfa.states() {
                assert_eq!(dfa.is_final(state), state.intersects(nfa.finals()));
            }
        }
    }

    #[test]
    fn test_subset_soundness() {
        let nfa = lambda_nfa();
        for &mode in MODES.iter() {
            let constructor = SubsetConstructor::with_mode(mode);
            let dfa = constructor.build(&nfa);
            for (src,symb,dest) in dfa.transitions() {
                assert!(!dest.is_empty());
                let mut expected = StateSet::new();
                for &s in src {
                    for &t in nfa.transition(s, symb) {
                        match mode {
                            EpsilonMode::Closure => expected.extend(epsilon_reachable(&nfa, t)),
                            EpsilonMode::SingleHop => { expected.insert(t); },
                        }
                    }
                }
                assert_eq!(dest, &expected, "wrong destination for ({},{})", src, symb);
            }
            // every state is reachable from the starting state
            let mut seen = HashSet::new();
            let mut queue = VecDeque::new();
            seen.insert(dfa.start().clone());
            queue.push_back(dfa.start().clone());
            while let Some(state) = queue.pop_front() {
                for &symb in dfa.alphabet() {
                    let dest = dfa.transition(&state, symb);
                    if !dest.is_empty() && seen.insert(dest.clone()) {
                        queue.push_back(dest.clone());
                    }
                }
            }
            assert_eq!(&seen, dfa.states());
        }
    }

    #[test]
    fn test_closure_has_no_epsilon_transitions() {
        let dfa = SubsetConstructor::new().build(&lambda_nfa());
        assert!(dfa.transitions().all(|(_,symb,_)| symb != EPSILON));
        assert_eq!(dfa.start(), &set(&[0, 1, 2]));
    }

    #[test]
    fn test_from_nfa() {
        let nfa = lambda_nfa();
        assert_eq!(DFA::from(&nfa), SubsetConstructor::new().build(&nfa));
    }
}
