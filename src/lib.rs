//! tokenmatch: multi-pattern exact matching over arbitrary token sequences
//!
//! An Aho-Corasick automaton generalized from bytes to any `Eq + Hash` token:
//! characters, words, opcodes. Register patterns, finalize once, then find
//! every (possibly overlapping) occurrence of any pattern in a query in a
//! single linear pass.
//!
//! ```
//! use tokenmatch::AutomatonBuilder;
//!
//! let mut builder: AutomatonBuilder<char, Vec<char>> = AutomatonBuilder::new();
//! builder.add("he".chars().collect());
//! builder.add("she".chars().collect());
//! let automaton = builder.finalize();
//!
//! let found: Vec<(usize, usize)> = automaton
//!     .search_all("ushers".chars())
//!     .map(|m| (m.index, m.start))
//!     .collect();
//! assert_eq!(found, vec![(2, 1), (1, 2)]);
//! ```
//!
//! [`TokenTree`] offers the same automaton behind a runtime-checked
//! build/finalize/search contract.

mod automaton;
mod tree;

pub use automaton::{Automaton, AutomatonBuilder, Match, Matches, State, StateId};
pub use tree::{Hit, Hits, TokenTree};

/// Errors raised when an operation is called in the wrong phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// `add` or `finalize` after the automaton was finalized.
    #[error("automaton is already finalized")]
    AlreadyFinalized,
    /// A search before the automaton was finalized.
    #[error("automaton is not finalized; call finalize() before searching")]
    NotFinalized,
}

pub type Result<T> = std::result::Result<T, Error>;
