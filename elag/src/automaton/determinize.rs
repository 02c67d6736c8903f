use super::state_set::{StateSet, StateSetArray, SubsetState};
use super::{Result, SingleGraph};
use crate::language::Language;
use crate::types::StateId;

/// Replaces `automaton` by an equivalent deterministic automaton whose
/// states carry pairwise disjoint labels.
///
/// Subsets are numbered in the order they are discovered; subset 0, made
/// of the original initial states, becomes the only initial state. An
/// automaton with no initial state becomes empty.
pub fn elag_determinize(language: &Language, automaton: &mut SingleGraph) -> Result<()> {
    let before = automaton.len();
    let initials: StateSet = automaton.initials().into_iter().collect();
    if initials.is_empty() {
        *automaton = SingleGraph::new();
        log::debug!("determinize: no initial state");
        return Ok(());
    }

    let mut sets = StateSetArray::new();
    sets.add(initials);
    let mut result = SingleGraph::new();

    let mut current = 0;
    while let Some(set) = sets.get(current).cloned() {
        let subset = SubsetState::build(language, automaton, &set, current == 0)?;
        log::trace!(
            "determinize: subset {} of {} states, {} labels",
            current,
            set.len(),
            subset.transitions.len()
        );

        let q = result.add_state();
        let state = result.state_mut(q);
        state.set_initial(subset.initial);
        state.set_final(subset.terminal);
        for (label, to) in subset.transitions {
            let to = StateId::new(sets.add(to));
            result.add_transition(q, label, to);
        }
        if !subset.default.is_empty() {
            let to = StateId::new(sets.add(subset.default));
            result.state_mut(q).set_default(Some(to));
        }
        current += 1;
    }

    log::debug!("determinize: {} states -> {}", before, result.len());
    *automaton = result;
    Ok(())
}
