//! Aho-Corasick automaton over arbitrary token alphabets.
//!
//! The key components are:
//!
//! - `StateArena` (crate-private): owns every `State`; states reference each other by `StateId`
//! - `AutomatonBuilder`: builds the trie from registered patterns
//! - `resolve`: computes suffix links and merges inherited transitions
//! - `Automaton`: the frozen automaton, streaming `Match`es out of a query
//!
//! # Module Organization
//!
//! - `arena`: state storage and ids
//! - `builder`: trie construction (mutable phase)
//! - `resolve`: suffix-link resolution (finalize)
//! - `search`: lazy matching over the finalized automaton

mod arena;
mod builder;
mod resolve;
mod search;

pub use arena::{State, StateId};
pub use builder::AutomatonBuilder;
pub use search::{Automaton, Match, Matches};
