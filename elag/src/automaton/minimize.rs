use hashbrown::HashMap;

use super::{AutomatonError, Result, SingleGraph, Transition};
use crate::symbol::SymbolAlphabet;
use crate::types::StateId;

/// Replaces a deterministic automaton by the minimal one recognising the
/// same language, treating each distinct label as a letter.
///
/// States are split by color refinement: two states keep the same color
/// while they agree on finality and, label by label, on the colors of
/// their destinations. With `level > 0`, explicit transitions that go
/// where the default goes are removed first.
pub fn elag_minimize(automaton: &mut SingleGraph, level: usize) -> Result<()> {
    if automaton.is_empty() {
        return Ok(());
    }
    let initial = match automaton.initial_state("minimize")? {
        Some(initial) => initial,
        None => {
            return Err(AutomatonError::NotDeterministic {
                op: "minimize",
                count: 0,
            })
        }
    };
    if level > 0 {
        automaton.compact_default_transitions();
    }

    let len = automaton.len();
    let mut alphabet = SymbolAlphabet::new();
    let mut outgoing: Vec<Vec<(usize, StateId)>> = Vec::with_capacity(len);
    for state in automaton.states() {
        let mut ts = Vec::with_capacity(state.transitions.len() + 1);
        for t in &state.transitions {
            ts.push((alphabet.add_symbol(&t.label), t.target));
        }
        if let Some(default) = state.default {
            ts.push((SymbolAlphabet::DEFAULT, default));
        }
        ts.sort();
        outgoing.push(ts);
    }

    // The initial state is colored first so that it ends up in class 0.
    let order: Vec<usize> = std::iter::once(initial.index())
        .chain((0..len).filter(|q| *q != initial.index()))
        .collect();

    let initial_final = automaton.state(initial).terminal;
    let mut colors: Vec<usize> = automaton
        .states()
        .iter()
        .map(|state| if state.terminal == initial_final { 0 } else { 1 })
        .collect();
    let mut color_count = if colors.iter().any(|c| *c == 1) { 2 } else { 1 };

    loop {
        let mut shades: HashMap<(usize, Vec<(usize, usize)>), usize> = HashMap::new();
        let mut next = vec![0; len];
        for q in &order {
            let mut signature: Vec<(usize, usize)> = outgoing[*q]
                .iter()
                .map(|(tag, to)| (*tag, colors[to.index()]))
                .collect();
            signature.sort();
            let fresh = shades.len();
            next[*q] = *shades.entry((colors[*q], signature)).or_insert(fresh);
        }
        let shade_count = shades.len();
        colors = next;
        log::trace!("minimize: {} colors -> {} shades", color_count, shade_count);
        if shade_count == color_count {
            break;
        }
        color_count = shade_count;
    }

    let mut representative: Vec<Option<usize>> = vec![None; color_count];
    for q in 0..len {
        if representative[colors[q]].is_none() {
            representative[colors[q]] = Some(q);
        }
    }

    let mut result = SingleGraph::with_states(color_count);
    for (color, q) in representative.into_iter().enumerate() {
        let q = match q {
            Some(q) => q,
            None => continue,
        };
        let old = &automaton.states[q];
        let state = &mut result.states[color];
        state.initial = color == colors[initial.index()];
        state.terminal = old.terminal;
        state.default = old.default.map(|d| StateId::new(colors[d.index()]));
        state.transitions = old
            .transitions
            .iter()
            .map(|t| Transition::new(t.label.clone(), StateId::new(colors[t.target.index()])))
            .collect();
    }

    log::debug!("minimize: {} states -> {}", len, result.len());
    *automaton = result;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::elag_determinize;
    use crate::testing::{atoms, graph, language_of, test_language};

    #[test]
    fn equivalent_states_are_merged() {
        let mut language = test_language();
        // 1 and 2 behave the same
        let mut g = graph(
            &mut language,
            4,
            &[3],
            &[
                (0, "<V:s>", 1),
                (0, "<V:p>", 2),
                (1, "<N>", 3),
                (2, "<N>", 3),
            ],
        );
        let alphabet = atoms(&mut language);
        let before = language_of(&g, &alphabet, 3);

        elag_minimize(&mut g, 0).unwrap();

        assert_eq!(g.len(), 3);
        assert!(g.state(StateId::ZERO).is_initial());
        assert_eq!(g.initials().len(), 1);
        assert_eq!(language_of(&g, &alphabet, 3), before);
    }

    #[test]
    fn minimizing_twice_changes_nothing() {
        let mut language = test_language();
        let mut g = graph(
            &mut language,
            6,
            &[4, 5],
            &[
                (0, "<N>", 1),
                (0, "<V>", 2),
                (1, "<V:s>", 4),
                (2, "<V:s>", 5),
                (1, "<def>", 3),
                (2, "<def>", 3),
                (3, "<ADV>", 4),
            ],
        );
        elag_minimize(&mut g, 0).unwrap();
        let once = g.len();
        assert_eq!(once, 4);

        elag_minimize(&mut g, 0).unwrap();
        assert_eq!(g.len(), once);
    }

    #[test]
    fn defaults_are_remapped() {
        let mut language = test_language();
        let mut g = graph(
            &mut language,
            3,
            &[1, 2],
            &[(0, "<V>", 1), (0, "<def>", 2), (1, "<def>", 1), (2, "<def>", 2)],
        );
        elag_minimize(&mut g, 0).unwrap();

        assert_eq!(g.len(), 2);
        let initial = g.state(StateId::ZERO);
        assert_eq!(initial.default(), Some(StateId::new(1)));
        assert_eq!(initial.transitions()[0].target(), StateId::new(1));
        assert_eq!(g.state(StateId::new(1)).default(), Some(StateId::new(1)));
    }

    #[test]
    fn compacting_merges_more_states() {
        let mut language = test_language();
        let build = |language: &mut crate::language::Language| {
            graph(
                language,
                2,
                &[0, 1],
                &[(0, "<V>", 1), (0, "<def>", 1), (1, "<def>", 1), (1, "<N>", 1)],
            )
        };

        let mut plain = build(&mut language);
        elag_minimize(&mut plain, 0).unwrap();
        assert_eq!(plain.len(), 2);

        let mut compacted = build(&mut language);
        elag_minimize(&mut compacted, 1).unwrap();
        assert_eq!(compacted.len(), 1);
        assert!(compacted.state(StateId::ZERO).is_final());
    }

    #[test]
    fn minimal_after_determinization() {
        let mut language = test_language();
        let mut g = graph(
            &mut language,
            5,
            &[2, 4],
            &[(0, "<V:s>", 1), (0, "<V>", 3), (1, "<N>", 2), (3, "<N>", 4)],
        );
        let alphabet = atoms(&mut language);
        let before = language_of(&g, &alphabet, 2);

        elag_determinize(&language, &mut g).unwrap();
        elag_minimize(&mut g, 0).unwrap();

        assert_eq!(g.len(), 3);
        assert_eq!(language_of(&g, &alphabet, 2), before);
    }

    #[test]
    fn empty_and_nondeterministic_inputs() {
        let mut language = test_language();
        let mut empty = SingleGraph::new();
        assert!(elag_minimize(&mut empty, 0).is_ok());

        let mut g = graph(&mut language, 2, &[1], &[(0, "<V>", 1)]);
        g.state_mut(StateId::new(1)).set_initial(true);
        assert!(matches!(
            elag_minimize(&mut g, 0),
            Err(AutomatonError::NotDeterministic { count: 2, .. })
        ));
    }
}
