//! JSON form of automata, with labels in the textual tag syntax.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::{Result, SingleGraph};
use crate::language::Language;
use crate::symbol::label::LEXIC_LABEL;
use crate::symbol::{Symbol, SymbolKind};
use crate::types::{StateId, TagIndex};

/// `<...>` labels other than epsilon. A lone `<` is a punctuation mark.
fn is_grammar_tag(label: &str) -> bool {
    label.len() > 1 && label.starts_with('<') && label.ends_with('>') && label != "<E>"
}

/// One state of an [`AutomatonDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDocument {
    /// Whether matching starts here.
    #[serde(default)]
    pub initial: bool,
    /// Whether matching may stop here.
    #[serde(default, rename = "final")]
    pub terminal: bool,
    /// Labels and their target states.
    #[serde(default)]
    pub transitions: Vec<(String, StateId)>,
    /// Target of the default transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<StateId>,
}

/// An automaton as stored on disk.
///
/// Text automata carry dictionary entries and tokens as labels, grammar
/// automata carry grammar tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonDocument {
    /// Whether labels are text labels rather than grammar labels.
    #[serde(default)]
    pub text: bool,
    /// States, indexed by position.
    pub states: Vec<StateDocument>,
}

impl AutomatonDocument {
    /// Reads a document from JSON.
    pub fn from_json(input: &str) -> std::result::Result<AutomatonDocument, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Writes the document as pretty-printed JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Writes `graph` out, using text labels when `text` is set.
    pub fn from_graph(language: &Language, graph: &SingleGraph, text: bool) -> Result<AutomatonDocument> {
        let mut states = Vec::with_capacity(graph.len());
        for state in graph.states() {
            let mut transitions = Vec::with_capacity(state.transitions.len());
            for t in &state.transitions {
                let label = match t.label.kind() {
                    SymbolKind::Atom if text => t.label.text_label(language)?,
                    _ => t.label.grammar_label(language),
                };
                transitions.push((label, t.target));
            }
            states.push(StateDocument {
                initial: state.initial,
                terminal: state.terminal,
                transitions,
                default: state.default,
            });
        }
        Ok(AutomatonDocument { text, states })
    }

    /// Reads the labels back into symbols.
    ///
    /// A label standing for several symbols gives parallel transitions.
    /// Each distinct text label gets its own tag index, in order of first
    /// appearance. Text documents may also hold grammar labels, written for
    /// symbols that are not atoms; those carry no tag index.
    pub fn to_graph(&self, language: &mut Language) -> Result<SingleGraph> {
        let mut graph = SingleGraph::with_states(self.states.len());
        let mut tags: HashMap<&str, TagIndex> = HashMap::new();

        for (i, doc) in self.states.iter().enumerate() {
            let q = StateId::new(i);
            for (label, to) in &doc.transitions {
                let symbols = if label == LEXIC_LABEL {
                    vec![Symbol::Lexic]
                } else if self.text && is_grammar_tag(label) {
                    Symbol::parse_grammar(language, label)?
                } else if self.text {
                    let next = TagIndex::new(tags.len());
                    let tag_index = *tags.entry(label.as_str()).or_insert(next);
                    Symbol::parse_text(language, label, Some(tag_index))?
                } else {
                    Symbol::parse_grammar(language, label)?
                };
                graph.add_transitions(q, symbols, *to);
            }
            let state = graph.state_mut(q);
            state.set_initial(doc.initial);
            state.set_final(doc.terminal);
            state.set_default(doc.default);
        }

        graph.check()?;
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::{elag_complementation, AutomatonError};
    use crate::symbol::SymbolError;
    use crate::testing::{atoms, graph, language_of, test_language, text};

    #[test]
    fn grammar_documents_read_back() {
        let mut language = test_language();
        let g = graph(
            &mut language,
            3,
            &[2],
            &[(0, "<V:s>", 1), (0, "<.>", 0), (1, "<N+hum>", 2), (1, "<def>", 2)],
        );
        let doc = AutomatonDocument::from_graph(&language, &g, false).unwrap();
        assert_eq!(doc.states[0].transitions[0], ("<V:s>".to_string(), StateId::new(1)));
        assert_eq!(doc.states[0].transitions[1].0, "<.>");
        assert_eq!(doc.states[1].default, Some(StateId::new(2)));

        let json = doc.to_json().unwrap();
        let back = AutomatonDocument::from_json(&json).unwrap();
        assert_eq!(back, doc);
        assert_eq!(back.to_graph(&mut language).unwrap(), g);
    }

    #[test]
    fn text_labels_explode_and_get_tag_indices() {
        let mut language = test_language();
        let json = r#"{
            "text": true,
            "states": [
                {"initial": true, "transitions": [["{jolis,joli.N:mp:fp}", 1], ["{chat,chat.N:ms}", 1]]},
                {"final": true, "transitions": [[",", 2]]},
                {"final": true}
            ]
        }"#;
        let doc = AutomatonDocument::from_json(json).unwrap();
        let g = doc.to_graph(&mut language).unwrap();

        let first = g.state(StateId::ZERO).transitions();
        assert_eq!(first.len(), 3);
        assert_eq!(first[0].label().tag_index(), Some(TagIndex::new(0)));
        assert_eq!(first[1].label().tag_index(), Some(TagIndex::new(0)));
        assert_eq!(first[2].label().tag_index(), Some(TagIndex::new(1)));
        assert_eq!(first[2].label(), &text(&mut language, "{chat,chat.N:ms}"));

        let out = AutomatonDocument::from_graph(&language, &g, true).unwrap();
        assert_eq!(out.states[0].transitions[0].0, "{jolis,joli.N:mp}");
        assert_eq!(out.states[1].transitions[0].0, ",");
    }

    #[test]
    fn bad_documents_are_reported() {
        let mut language = test_language();
        let dangling = r#"{"states": [{"initial": true, "transitions": [["<V>", 3]]}]}"#;
        let doc = AutomatonDocument::from_json(dangling).unwrap();
        assert!(matches!(
            doc.to_graph(&mut language),
            Err(AutomatonError::StateOutOfRange { .. })
        ));

        let bad = r#"{"states": [{"initial": true, "transitions": [["<V:z>", 0]]}]}"#;
        let doc = AutomatonDocument::from_json(bad).unwrap();
        assert!(matches!(
            doc.to_graph(&mut language),
            Err(AutomatonError::Symbol(SymbolError::UnknownInflection { .. }))
        ));
    }

    #[test]
    fn complemented_text_documents_read_back() {
        let mut language = test_language();
        let json = r#"{
            "text": true,
            "states": [
                {"initial": true, "transitions": [["{chat,chat.N:ms}", 1]]},
                {"final": true}
            ]
        }"#;
        let mut g = AutomatonDocument::from_json(json)
            .unwrap()
            .to_graph(&mut language)
            .unwrap();
        elag_complementation(&language, &mut g).unwrap();

        let doc = AutomatonDocument::from_graph(&language, &g, true).unwrap();
        let labels: Vec<&str> = doc.states[0].transitions.iter().map(|(l, _)| l.as_str()).collect();
        assert!(labels.contains(&"{chat,chat.N:ms}"));
        assert!(labels.contains(&"<V>"));

        let back = AutomatonDocument::from_json(&doc.to_json().unwrap())
            .unwrap()
            .to_graph(&mut language)
            .unwrap();
        assert_eq!(back, g);
        let alphabet = atoms(&mut language);
        assert_eq!(language_of(&back, &alphabet, 2), language_of(&g, &alphabet, 2));
    }

    #[test]
    fn angle_brackets_alone_are_punctuation() {
        assert!(is_grammar_tag("<N:f>"));
        assert!(!is_grammar_tag("<"));
        assert!(!is_grammar_tag(">"));
        assert!(!is_grammar_tag("<E>"));
    }
}
