use super::{Result, SingleGraph};
use crate::language::Language;
use crate::types::StateId;

/// Replaces a deterministic automaton by its complement over the whole
/// symbol alphabet.
///
/// A sink state that loops on its default is added, finalities are
/// reversed (the sink's included, so it accepts), and every state without
/// a default gets transitions to the sink for everything its labels leave
/// out. An automaton with no initial state recognises nothing, so the sink
/// becomes initial and the result recognises everything.
pub fn elag_complementation(language: &Language, automaton: &mut SingleGraph) -> Result<()> {
    let had_initial = automaton.states.iter().any(|state| state.initial);
    let sink = automaton.add_state();
    automaton.state_mut(sink).set_default(Some(sink));
    if !had_initial {
        automaton.state_mut(sink).set_initial(true);
    }

    for i in 0..automaton.len() {
        let q = StateId::new(i);
        let state = automaton.state_mut(q);
        state.terminal = !state.terminal;
        if state.default.is_none() {
            let rest = automaton.lexic_minus_transitions(language, q)?;
            automaton.add_transitions(q, rest, sink);
        }
    }

    log::debug!("complement: {} states", automaton.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::{elag_determinize, elag_minimize};
    use crate::testing::{atoms, graph, language_of, test_language};

    #[test]
    fn complement_swaps_accepted_words() {
        let mut language = test_language();
        let mut g = graph(&mut language, 3, &[2], &[(0, "<V>", 1), (1, "<N:m>", 2)]);
        let alphabet = atoms(&mut language);
        let original = g.clone();

        elag_complementation(&language, &mut g).unwrap();

        assert_eq!(g.len(), 4);
        let sink = g.state(StateId::new(3));
        assert!(sink.is_final());
        assert_eq!(sink.default(), Some(StateId::new(3)));

        for word in language_of(&g, &alphabet, 2) {
            assert!(!original.accepts(&word).unwrap());
        }
        for word in language_of(&original, &alphabet, 2) {
            assert!(!g.accepts(&word).unwrap());
        }
        assert!(g.accepts(&[]).unwrap());
        assert!(g.accepts(&[alphabet[6].clone()]).unwrap());
    }

    #[test]
    fn double_complement_is_identity() {
        let mut language = test_language();
        let mut g = graph(
            &mut language,
            3,
            &[1],
            &[(0, "<V:s>", 1), (0, "<DET>", 2), (2, "<N>", 1), (1, "<def>", 1)],
        );
        elag_determinize(&language, &mut g).unwrap();
        let alphabet = atoms(&mut language);
        let before = language_of(&g, &alphabet, 3);

        let mut twice = g.clone();
        elag_complementation(&language, &mut twice).unwrap();
        elag_complementation(&language, &mut twice).unwrap();
        assert_eq!(language_of(&twice, &alphabet, 3), before);

        elag_determinize(&language, &mut twice).unwrap();
        elag_minimize(&mut twice, 0).unwrap();
        assert_eq!(language_of(&twice, &alphabet, 3), before);
    }

    #[test]
    fn lexic_transitions_need_no_completion() {
        let mut language = test_language();
        let mut g = graph(&mut language, 2, &[1], &[(0, "<.>", 1)]);
        elag_complementation(&language, &mut g).unwrap();
        assert_eq!(g.state(StateId::ZERO).transitions().len(), 1);
        assert!(g.state(StateId::ZERO).is_final());
        assert!(!g.state(StateId::new(1)).is_final());
    }

    #[test]
    fn complement_of_nothing_is_everything() {
        let language = test_language();
        let mut g = SingleGraph::new();
        elag_complementation(&language, &mut g).unwrap();

        assert_eq!(g.len(), 1);
        assert!(g.state(StateId::ZERO).is_initial());
        assert!(g.accepts(&[crate::symbol::Symbol::Lexic]).unwrap());
    }
}
