//! Suffix-link resolution.
//!
//! Turns the trie into a deterministic automaton in a single breadth-first
//! pass. A state's suffix link is always shallower than the state itself, so
//! visiting states in increasing depth guarantees that the link of the parent,
//! and the fully merged table of the link target, are ready before they are
//! needed.

use std::collections::VecDeque;
use std::hash::Hash;

use super::arena::{StateArena, StateId};

/// Compute suffix links, output links and merged transitions for every state.
///
/// Root links to itself. Edges are inherited from the suffix-link target for
/// every token the state has no edge for, except when the target is root:
/// root's edges are consulted directly at search time instead of being copied
/// into every shallow state.
///
/// Returns the number of inherited edges added.
pub(crate) fn resolve_suffix_links<T: Eq + Hash + Clone>(states: &mut StateArena<T>) -> usize {
    states[StateId::ROOT].suffix_link = Some(StateId::ROOT);

    let mut queue: VecDeque<StateId> = states.root().transitions.values().copied().collect();
    let mut merged_edges = 0usize;

    while let Some(id) = queue.pop_front() {
        // Only trie edges are present until this state is merged below.
        queue.extend(states[id].transitions.values().copied());

        let link = find_suffix_link(states, id);
        let output_link = if states[link].is_match() {
            Some(link)
        } else {
            states[link].output_link
        };

        let state = &mut states[id];
        state.suffix_link = Some(link);
        state.output_link = output_link;

        if !link.is_root() {
            merged_edges += merge_transitions(states, id, link);
        }
    }

    merged_edges
}

/// Walk the parent's suffix chain looking for a state with an edge on this
/// state's incoming token.
fn find_suffix_link<T: Eq + Hash>(states: &StateArena<T>, id: StateId) -> StateId {
    let state = &states[id];
    let (Some(parent), Some(token)) = (state.parent, state.token.as_ref()) else {
        return StateId::ROOT;
    };

    // Parent is shallower, so it was linked before this state was dequeued.
    let mut candidate = states[parent].suffix_link.unwrap_or(StateId::ROOT);
    loop {
        match states[candidate].next(token) {
            Some(target) if target != id => return target,
            _ if candidate.is_root() => return StateId::ROOT,
            _ => candidate = states[candidate].suffix_link.unwrap_or(StateId::ROOT),
        }
    }
}

/// Copy the link target's edges into `id` for tokens `id` has no edge for.
/// Returns how many edges were added.
fn merge_transitions<T: Eq + Hash + Clone>(
    states: &mut StateArena<T>,
    id: StateId,
    link: StateId,
) -> usize {
    let (state, suffix) = states.pair_mut(id, link);
    let before = state.transitions.len();
    for (token, &target) in &suffix.transitions {
        state.transitions.entry(token.clone()).or_insert(target);
    }
    state.transitions.len() - before
}
