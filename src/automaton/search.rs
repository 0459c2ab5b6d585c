//! Searching a finalized automaton.
//!
//! [`Automaton`] is the frozen counterpart of
//! [`AutomatonBuilder`](super::AutomatonBuilder): it is never mutated after
//! construction, so it is `Send + Sync` whenever its tokens and patterns are,
//! and any number of threads may search it concurrently.

use std::borrow::Borrow;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::arena::{State, StateArena, StateId};

/// One occurrence of a registered pattern inside a query.
#[derive(Debug, PartialEq, Eq)]
pub struct Match<'a, P> {
    /// The registered pattern value.
    pub pattern: &'a P,
    /// 1-based registration index of the pattern.
    pub index: usize,
    /// Offset of the first matched token in the query.
    pub start: usize,
    len: usize,
}

// Manual impls: `P` itself need not be `Clone`.
impl<P> Clone for Match<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Match<'_, P> {}

impl<P> Match<'_, P> {
    /// Number of tokens matched.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: empty patterns are never registered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Offset one past the last matched token.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Immutable, searchable multi-pattern automaton.
#[derive(Clone, Debug)]
pub struct Automaton<T, P> {
    states: StateArena<T>,
    patterns: Vec<P>,
}

impl<T, P> Automaton<T, P> {
    pub(crate) fn from_parts(states: StateArena<T>, patterns: Vec<P>) -> Self {
        Self { states, patterns }
    }

    #[cfg(test)]
    pub(crate) fn into_states(self) -> StateArena<T> {
        self.states
    }

    /// Accepted patterns in registration order. Position `i` has index `i + 1`.
    pub fn patterns(&self) -> &[P] {
        &self.patterns
    }

    /// Look up a pattern by its 1-based index.
    pub fn pattern(&self, index: usize) -> Option<&P> {
        index.checked_sub(1).and_then(|slot| self.patterns.get(slot))
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Number of states, root included.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn root(&self) -> &State<T> {
        self.states.root()
    }

    pub fn state(&self, id: StateId) -> Option<&State<T>> {
        self.states.get(id)
    }

    pub fn states(&self) -> impl Iterator<Item = &State<T>> {
        self.states.iter()
    }
}

impl<T, P> Automaton<T, P>
where
    T: Eq + Hash,
    P: AsRef<[T]>,
{
    /// Lazily stream every match in `query`, overlapping and nested ones
    /// included.
    ///
    /// Matches come out ordered by end position; matches sharing an end
    /// position come out longest first. Tokens are pulled from `query` only as
    /// far as needed to produce the next match.
    pub fn search_all<I>(&self, query: I) -> Matches<'_, T, P, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Matches {
            automaton: self,
            query: query.into_iter(),
            consumed: 0,
            current: StateId::ROOT,
            pending: None,
            _token: PhantomData,
        }
    }

    /// Collect every match in `query`.
    pub fn search<I>(&self, query: I) -> Vec<Match<'_, P>>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.search_all(query).collect()
    }

    /// The first match in `query`, consuming no more of it than necessary.
    pub fn search_one<I>(&self, query: I) -> Option<Match<'_, P>>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.search_all(query).next()
    }

    /// Whether any registered pattern occurs in `query`.
    pub fn is_match<I>(&self, query: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.search_one(query).is_some()
    }

    /// Advance from `current` on `token`. Falls back to root's edge, then to
    /// root itself.
    #[inline]
    fn step(&self, current: StateId, token: &T) -> StateId {
        self.states[current]
            .next(token)
            .or_else(|| self.states.root().next(token))
            .unwrap_or(StateId::ROOT)
    }

    fn emit(&self, id: StateId, consumed: usize) -> Option<Match<'_, P>> {
        let slot = self.states[id].output?;
        let pattern = &self.patterns[slot];
        let len = self.states[id].depth;
        Some(Match {
            pattern,
            index: slot + 1,
            start: consumed - len,
            len,
        })
    }
}

/// Lazy iterator over the matches of one query.
///
/// Created by [`Automaton::search_all`]. Single pass: once the query is
/// exhausted the iterator keeps returning `None`.
pub struct Matches<'a, T, P, I> {
    automaton: &'a Automaton<T, P>,
    query: I,
    /// Tokens consumed so far; the current end offset.
    consumed: usize,
    current: StateId,
    /// Next match state to report for the current end offset.
    pending: Option<StateId>,
    _token: PhantomData<fn(&T)>,
}

impl<T, P, I> std::fmt::Debug for Matches<'_, T, P, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matches")
            .field("consumed", &self.consumed)
            .field("current", &self.current)
            .field("pending", &self.pending)
            .finish()
    }
}

impl<'a, T, P, I> Iterator for Matches<'a, T, P, I>
where
    T: Eq + Hash,
    P: AsRef<[T]>,
    I: Iterator,
    I::Item: Borrow<T>,
{
    type Item = Match<'a, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let automaton = self.automaton;
        loop {
            if let Some(id) = self.pending {
                self.pending = automaton.states[id].output_link;
                if let Some(found) = automaton.emit(id, self.consumed) {
                    return Some(found);
                }
                continue;
            }

            let token = self.query.next()?;
            self.current = automaton.step(self.current, Borrow::<T>::borrow(&token));
            self.consumed += 1;

            let state = &automaton.states[self.current];
            self.pending = if state.is_match() {
                Some(self.current)
            } else {
                state.output_link
            };
        }
    }
}

impl<T, P, I> FusedIterator for Matches<'_, T, P, I>
where
    T: Eq + Hash,
    P: AsRef<[T]>,
    I: FusedIterator,
    I::Item: Borrow<T>,
{
}
