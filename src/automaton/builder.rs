//! Trie construction for the token automaton.
//!
//! Patterns are inserted one at a time into an arena-backed trie. Shared
//! prefixes are naturally deduplicated: a new state is allocated only for a
//! prefix extension that has not been seen before.

use std::hash::Hash;
use std::marker::PhantomData;

use tracing::{debug, trace};

use super::arena::{StateArena, StateId};
use super::resolve::resolve_suffix_links;
use super::search::Automaton;

/// Mutable construction phase of an automaton.
///
/// Consumed by [`finalize`](Self::finalize), which produces the immutable,
/// searchable [`Automaton`].
#[derive(Clone, Debug)]
pub struct AutomatonBuilder<T, P> {
    states: StateArena<T>,
    /// Accepted (non-empty) patterns in insertion order.
    patterns: Vec<P>,
    _token: PhantomData<fn(T)>,
}

impl<T, P> Default for AutomatonBuilder<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> AutomatonBuilder<T, P> {
    /// Create an empty builder holding only the root state.
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Create a builder whose arena is pre-sized for `states` states.
    pub fn with_capacity(states: usize) -> Self {
        Self {
            states: StateArena::with_capacity(states),
            patterns: Vec::new(),
            _token: PhantomData,
        }
    }

    /// Number of accepted patterns, duplicates included.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Number of trie states, root included.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}

impl<T, P> AutomatonBuilder<T, P>
where
    T: Eq + Hash + Clone,
    P: AsRef<[T]>,
{
    /// Register a pattern, returning its 1-based index.
    ///
    /// An empty pattern is ignored and yields `None`. Adding a pattern that
    /// was already registered appends a new registry entry and re-points the
    /// terminal state at it, so the later index wins.
    pub fn add(&mut self, pattern: P) -> Option<usize> {
        let tokens = pattern.as_ref();
        if tokens.is_empty() {
            return None;
        }

        let mut current = StateId::ROOT;
        for token in tokens {
            current = match self.states[current].next(token) {
                Some(next) => next,
                None => {
                    let next = self.states.alloc(current, token.clone());
                    self.states[current].transitions.insert(token.clone(), next);
                    next
                }
            };
        }

        let len = tokens.len();
        let slot = self.patterns.len();
        self.patterns.push(pattern);
        let terminal = &mut self.states[current];
        if let Some(previous) = terminal.output.replace(slot) {
            trace!(state = %current, previous = previous + 1, "pattern re-registered");
        }
        trace!(index = slot + 1, state = %current, len, "pattern added");
        Some(slot + 1)
    }

    /// Resolve suffix links and merge inherited transitions, producing the
    /// searchable automaton.
    pub fn finalize(self) -> Automaton<T, P> {
        let mut states = self.states;
        let merged_edges = resolve_suffix_links(&mut states);
        debug!(
            states = states.len(),
            patterns = self.patterns.len(),
            merged_edges,
            "resolved suffix links"
        );
        Automaton::from_parts(states, self.patterns)
    }
}

impl<T, P> Extend<P> for AutomatonBuilder<T, P>
where
    T: Eq + Hash + Clone,
    P: AsRef<[T]>,
{
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        for pattern in iter {
            self.add(pattern);
        }
    }
}

impl<T, P> FromIterator<P> for AutomatonBuilder<T, P>
where
    T: Eq + Hash + Clone,
    P: AsRef<[T]>,
{
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut builder = Self::new();
        builder.extend(iter);
        builder
    }
}
