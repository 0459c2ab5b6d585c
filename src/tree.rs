//! Runtime-checked two-phase wrapper around the automaton.
//!
//! [`TokenTree`] holds either an [`AutomatonBuilder`] or a finalized
//! [`Automaton`] and enforces the legal call order at runtime:
//!
//! ```text
//! Building --finalize()--> Searchable
//!    │ add()                  │ search_all() / search() / search_one()
//! ```
//!
//! Calls made in the wrong phase fail with [`Error::AlreadyFinalized`] or
//! [`Error::NotFinalized`]. Code that knows its phases statically can use the
//! builder and automaton types directly instead.

use std::borrow::Borrow;
use std::hash::Hash;
use std::iter::FusedIterator;

use crate::automaton::{Automaton, AutomatonBuilder, Match, Matches};
use crate::{Error, Result};

/// What a search reports for each match: the pattern itself, or its 1-based
/// registration index.
#[derive(Debug, PartialEq, Eq)]
pub enum Hit<'a, P> {
    Pattern(&'a P),
    Index(usize),
}

impl<P> Clone for Hit<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Hit<'_, P> {}

impl<'a, P> Hit<'a, P> {
    fn from_match(found: Match<'a, P>, return_indices: bool) -> Self {
        if return_indices {
            Hit::Index(found.index)
        } else {
            Hit::Pattern(found.pattern)
        }
    }

    pub fn pattern(self) -> Option<&'a P> {
        match self {
            Hit::Pattern(pattern) => Some(pattern),
            Hit::Index(_) => None,
        }
    }

    pub fn index(self) -> Option<usize> {
        match self {
            Hit::Index(index) => Some(index),
            Hit::Pattern(_) => None,
        }
    }
}

enum Phase<T, P> {
    Building(AutomatonBuilder<T, P>),
    Searchable(Automaton<T, P>),
}

/// Multi-pattern matcher with a mutable build phase and an immutable search
/// phase, switched once by [`finalize`](Self::finalize).
///
/// ```
/// use tokenmatch::{Hit, TokenTree};
///
/// let mut tree: TokenTree<&str, Vec<&str>> = TokenTree::new();
/// tree.add(vec!["new", "york"]).unwrap();
/// tree.add(vec!["york"]).unwrap();
/// tree.finalize().unwrap();
///
/// let query = ["i", "love", "new", "york"];
/// let found = tree.search(query, true).unwrap();
/// assert_eq!(found, vec![(Hit::Index(1), 2), (Hit::Index(2), 3)]);
/// ```
pub struct TokenTree<T, P> {
    phase: Phase<T, P>,
}

impl<T, P> Default for TokenTree<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> std::fmt::Debug for TokenTree<T, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (phase, patterns, states) = match &self.phase {
            Phase::Building(b) => ("building", b.pattern_count(), b.state_count()),
            Phase::Searchable(a) => ("searchable", a.pattern_count(), a.state_count()),
        };
        f.debug_struct("TokenTree")
            .field("phase", &phase)
            .field("patterns", &patterns)
            .field("states", &states)
            .finish()
    }
}

impl<T, P> TokenTree<T, P> {
    /// Create an empty tree in the build phase.
    pub fn new() -> Self {
        Self {
            phase: Phase::Building(AutomatonBuilder::new()),
        }
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.phase, Phase::Searchable(_))
    }

    /// Number of accepted patterns, duplicates included.
    pub fn pattern_count(&self) -> usize {
        match &self.phase {
            Phase::Building(builder) => builder.pattern_count(),
            Phase::Searchable(automaton) => automaton.pattern_count(),
        }
    }

    /// The finalized automaton.
    pub fn automaton(&self) -> Result<&Automaton<T, P>> {
        match &self.phase {
            Phase::Searchable(automaton) => Ok(automaton),
            Phase::Building(_) => Err(Error::NotFinalized),
        }
    }

    pub fn into_automaton(self) -> Result<Automaton<T, P>> {
        match self.phase {
            Phase::Searchable(automaton) => Ok(automaton),
            Phase::Building(_) => Err(Error::NotFinalized),
        }
    }
}

impl<T, P> TokenTree<T, P>
where
    T: Eq + Hash + Clone,
    P: AsRef<[T]>,
{
    /// Register a pattern. Empty patterns are silently ignored.
    pub fn add(&mut self, pattern: P) -> Result<()> {
        match &mut self.phase {
            Phase::Building(builder) => {
                builder.add(pattern);
                Ok(())
            }
            Phase::Searchable(_) => Err(Error::AlreadyFinalized),
        }
    }

    /// Register every pattern from `patterns`. Nothing is added once finalized.
    pub fn add_all<I: IntoIterator<Item = P>>(&mut self, patterns: I) -> Result<()> {
        match &mut self.phase {
            Phase::Building(builder) => {
                builder.extend(patterns);
                Ok(())
            }
            Phase::Searchable(_) => Err(Error::AlreadyFinalized),
        }
    }

    /// Resolve suffix links and switch to the search phase.
    pub fn finalize(&mut self) -> Result<()> {
        let Phase::Building(builder) = &mut self.phase else {
            return Err(Error::AlreadyFinalized);
        };
        let builder = std::mem::take(builder);
        self.phase = Phase::Searchable(builder.finalize());
        Ok(())
    }

    /// Lazily stream `(pattern or index, start offset)` for every match.
    pub fn search_all<I>(
        &self,
        query: I,
        return_indices: bool,
    ) -> Result<Hits<'_, T, P, I::IntoIter>>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Ok(Hits {
            matches: self.automaton()?.search_all(query),
            return_indices,
        })
    }

    pub fn search<I>(&self, query: I, return_indices: bool) -> Result<Vec<(Hit<'_, P>, usize)>>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Ok(self.search_all(query, return_indices)?.collect())
    }

    pub fn search_one<I>(
        &self,
        query: I,
        return_indices: bool,
    ) -> Result<Option<(Hit<'_, P>, usize)>>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Ok(self.search_all(query, return_indices)?.next())
    }
}

/// Lazy `(Hit, start)` iterator returned by [`TokenTree::search_all`].
pub struct Hits<'a, T, P, I> {
    matches: Matches<'a, T, P, I>,
    return_indices: bool,
}

impl<T, P, I> std::fmt::Debug for Hits<'_, T, P, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hits")
            .field("matches", &self.matches)
            .field("return_indices", &self.return_indices)
            .finish()
    }
}

impl<'a, T, P, I> Iterator for Hits<'a, T, P, I>
where
    T: Eq + Hash,
    P: AsRef<[T]>,
    I: Iterator,
    I::Item: Borrow<T>,
{
    type Item = (Hit<'a, P>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let found = self.matches.next()?;
        Some((Hit::from_match(found, self.return_indices), found.start))
    }
}

impl<T, P, I> FusedIterator for Hits<'_, T, P, I>
where
    T: Eq + Hash,
    P: AsRef<[T]>,
    I: FusedIterator,
    I::Item: Borrow<T>,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_add_after_finalize_fails() {
        let mut tree: TokenTree<char, Vec<char>> = TokenTree::new();
        tree.add(chars("he")).unwrap();
        tree.finalize().unwrap();
        assert_eq!(tree.add(chars("she")), Err(Error::AlreadyFinalized));
    }

    #[test]
    fn test_finalize_twice_fails() {
        let mut tree: TokenTree<char, Vec<char>> = TokenTree::new();
        tree.finalize().unwrap();
        assert_eq!(tree.finalize(), Err(Error::AlreadyFinalized));
        assert!(tree.is_finalized());
    }

    #[test]
    fn test_search_before_finalize_fails() {
        let mut tree: TokenTree<char, Vec<char>> = TokenTree::new();
        tree.add(chars("he")).unwrap();
        assert_eq!(tree.search("he".chars(), false).unwrap_err(), Error::NotFinalized);
        assert_eq!(tree.search_one("he".chars(), false).unwrap_err(), Error::NotFinalized);
        assert!(tree.search_all("he".chars(), true).is_err());
        assert!(tree.automaton().is_err());
    }

    #[test]
    fn test_hits_select_pattern_or_index_per_call() {
        let mut tree: TokenTree<char, Vec<char>> = TokenTree::new();
        tree.add(chars("he")).unwrap();
        tree.add(chars("she")).unwrap();
        tree.finalize().unwrap();

        let by_pattern = tree.search("ushers".chars(), false).unwrap();
        let she = chars("she");
        let he = chars("he");
        assert_eq!(by_pattern, vec![(Hit::Pattern(&she), 1), (Hit::Pattern(&he), 2)]);

        let by_index = tree.search("ushers".chars(), true).unwrap();
        assert_eq!(by_index, vec![(Hit::Index(2), 1), (Hit::Index(1), 2)]);
    }

    #[test]
    fn test_search_one() {
        let mut tree: TokenTree<char, Vec<char>> = TokenTree::new();
        tree.add(chars("b")).unwrap();
        tree.finalize().unwrap();

        let first = tree.search_one("abcb".chars(), true).unwrap();
        assert_eq!(first, Some((Hit::Index(1), 1)));
        assert_eq!(tree.search_one("xyz".chars(), true).unwrap(), None);
    }

    #[test]
    fn test_hit_accessors() {
        let pattern = vec![1u8];
        assert_eq!(Hit::Pattern(&pattern).pattern(), Some(&pattern));
        assert_eq!(Hit::Pattern(&pattern).index(), None);
        assert_eq!(Hit::<Vec<u8>>::Index(4).index(), Some(4));
    }

    #[test]
    fn test_add_all_respects_phase() {
        let mut tree: TokenTree<u8, Vec<u8>> = TokenTree::new();
        tree.add_all([vec![1u8], vec![], vec![2u8]]).unwrap();
        assert_eq!(tree.pattern_count(), 2);
        tree.finalize().unwrap();

        assert_eq!(tree.add_all([vec![3u8]]), Err(Error::AlreadyFinalized));
        assert_eq!(tree.pattern_count(), 2);
        assert_eq!(tree.search([2u8], true).unwrap(), vec![(Hit::Index(2), 0)]);
    }
}
