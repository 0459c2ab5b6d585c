//! Arena-based state storage for the token automaton.
//!
//! Every state lives in a single `Vec` owned by the [`StateArena`] and is
//! referenced by a [`StateId`]. Parent and suffix links are plain ids, so the
//! back-references that make the graph cyclic never involve ownership.
//!
//! ```text
//!        root(0) ──h──> 1 ──e──> 2*
//!          │                      ^
//!          s                      ┆ suffix link
//!          v                      ┆
//!          3 ──h──> 4 ──e──> 5* ┄┄┘
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// A state identifier - just an index into the arena.
///
/// Identifiers are assigned in creation order and never reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct StateId(u32);

impl StateId {
    /// The root (zero) state, created with the arena.
    pub const ROOT: StateId = StateId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// A node of the trie, and after finalization a state of the automaton.
#[derive(Clone)]
pub struct State<T> {
    pub(crate) id: StateId,
    /// Token on the edge from the parent. `None` only for root.
    pub(crate) token: Option<T>,
    pub(crate) parent: Option<StateId>,
    /// Distance from root; equals the length of the path spelled by this state.
    pub(crate) depth: usize,
    /// Trie edges before finalization, the full goto table afterwards
    /// (except edges inherited from root, which search falls back to).
    pub(crate) transitions: FxHashMap<T, StateId>,
    /// Registry slot (0-based) of the pattern ending here.
    pub(crate) output: Option<usize>,
    pub(crate) suffix_link: Option<StateId>,
    /// Nearest match state strictly further down the suffix chain.
    pub(crate) output_link: Option<StateId>,
}

impl<T> std::fmt::Debug for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("id", &self.id)
            .field("depth", &self.depth)
            .field("parent", &self.parent)
            .field("transitions_count", &self.transitions.len())
            .field("output", &self.output)
            .field("suffix_link", &self.suffix_link)
            .finish()
    }
}

impl<T> State<T> {
    fn root() -> Self {
        Self {
            id: StateId::ROOT,
            token: None,
            parent: None,
            depth: 0,
            transitions: FxHashMap::default(),
            output: None,
            suffix_link: None,
            output_link: None,
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    /// The token labeling the edge from the parent, absent for root.
    pub fn token(&self) -> Option<&T> {
        self.token.as_ref()
    }

    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Longest proper suffix of this state's path that is also a path from
    /// root. `None` until the automaton is finalized.
    pub fn suffix_link(&self) -> Option<StateId> {
        self.suffix_link
    }

    pub fn is_match(&self) -> bool {
        self.output.is_some()
    }

    /// 1-based registration index of the pattern ending at this state.
    pub fn matched_index(&self) -> Option<usize> {
        self.output.map(|slot| slot + 1)
    }

    /// Number of outgoing edges, including merged ones after finalization.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}

impl<T: Eq + Hash> State<T> {
    #[inline]
    pub(crate) fn next(&self, token: &T) -> Option<StateId> {
        self.transitions.get(token).copied()
    }
}

/// Arena owning every state of one automaton.
///
/// States are allocated contiguously and only ever appended; the whole arena
/// is dropped as a unit.
#[derive(Clone)]
pub(crate) struct StateArena<T> {
    states: Vec<State<T>>,
}

impl<T> std::fmt::Debug for StateArena<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateArena")
            .field("states_count", &self.states.len())
            .finish()
    }
}

impl<T> Default for StateArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StateArena<T> {
    /// Create an arena holding only the root state.
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut states = Vec::with_capacity(capacity.max(1));
        states.push(State::root());
        Self { states }
    }

    /// Allocate a child of `parent` reached by `token`, returning its ID.
    ///
    /// The caller is responsible for wiring the parent's transition.
    pub fn alloc(&mut self, parent: StateId, token: T) -> StateId {
        let id = StateId(self.states.len() as u32);
        let depth = self.states[parent.index()].depth + 1;
        self.states.push(State {
            id,
            token: Some(token),
            parent: Some(parent),
            depth,
            transitions: FxHashMap::default(),
            output: None,
            suffix_link: None,
            output_link: None,
        });
        id
    }

    #[inline]
    pub fn get(&self, id: StateId) -> Option<&State<T>> {
        self.states.get(id.index())
    }

    #[inline]
    pub fn root(&self) -> &State<T> {
        &self.states[StateId::ROOT.index()]
    }

    /// Mutable access to two distinct states at once.
    ///
    /// Panics if `a == b`.
    pub fn pair_mut(&mut self, a: StateId, b: StateId) -> (&mut State<T>, &mut State<T>) {
        let (a, b) = (a.index(), b.index());
        assert_ne!(a, b, "pair_mut requires distinct states");
        if a < b {
            let (left, right) = self.states.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = self.states.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }

    /// Number of states in the arena, root included.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, State<T>> {
        self.states.iter()
    }
}

impl<T> std::ops::Index<StateId> for StateArena<T> {
    type Output = State<T>;

    #[inline]
    fn index(&self, id: StateId) -> &Self::Output {
        &self.states[id.index()]
    }
}

impl<T> std::ops::IndexMut<StateId> for StateArena<T> {
    #[inline]
    fn index_mut(&mut self, id: StateId) -> &mut Self::Output {
        &mut self.states[id.index()]
    }
}
