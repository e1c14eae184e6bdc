// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

/// dfa core api
pub mod core;
/// subset construction of a dfa from a nfa
pub mod subset;
/// dfa simulation
pub mod simulator;
