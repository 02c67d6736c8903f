//! Small synthetic languages and helpers shared by the unit tests.

use crate::automaton::SingleGraph;
use crate::language::Language;
use crate::symbol::label::{DEFAULT_LABEL, LEXIC_LABEL};
use crate::symbol::Symbol;
use crate::types::StateId;

pub(crate) const TAGSET: &str = "
NAME test

POS V
inflex:
  number = s p
complete:
  <number>
.

POS N
inflex:
  gender = m f
  number = s p
cat:
  sem = hum conc
complete:
  <gender> <number>
.

POS DET
discr:
  type = def indef
inflex:
  number = s p
complete:
  def <number>
  indef s
.

POS ADV
.

POS INTJ
IGNORE
.
";

pub(crate) fn test_language() -> Language {
    Language::from_tagset_str(TAGSET).unwrap()
}

/// Parses a grammar label that must yield exactly one symbol.
pub(crate) fn sym(language: &mut Language, label: &str) -> Symbol {
    let mut symbols = Symbol::parse_grammar(language, label).unwrap();
    assert_eq!(symbols.len(), 1, "{} gave {} symbols", label, symbols.len());
    symbols.remove(0)
}

/// Parses a text label that must yield exactly one symbol.
pub(crate) fn text(language: &mut Language, label: &str) -> Symbol {
    let mut symbols = Symbol::parse_text(language, label, None).unwrap();
    assert_eq!(symbols.len(), 1, "{} gave {} symbols", label, symbols.len());
    symbols.remove(0)
}

/// Builds a graph from `(from, label, to)` triples. State 0 is initial.
///
/// `<def>` sets the default transition and `<.>` stands for LEXIC.
pub(crate) fn graph(
    language: &mut Language,
    states: usize,
    finals: &[usize],
    transitions: &[(usize, &str, usize)],
) -> SingleGraph {
    let mut g = SingleGraph::with_states(states);
    g.state_mut(StateId::ZERO).set_initial(true);
    for f in finals {
        g.state_mut(StateId::new(*f)).set_final(true);
    }
    for (from, label, to) in transitions {
        let (from, to) = (StateId::new(*from), StateId::new(*to));
        match *label {
            DEFAULT_LABEL => g.state_mut(from).set_default(Some(to)),
            LEXIC_LABEL => g.add_transition(from, Symbol::Lexic, to),
            _ => {
                let symbols = Symbol::parse_grammar(language, label).unwrap();
                g.add_transitions(from, symbols, to);
            }
        }
    }
    g
}

/// Every word of at most `depth` symbols over `alphabet` accepted by `g`.
pub(crate) fn language_of(g: &SingleGraph, alphabet: &[Symbol], depth: usize) -> Vec<Vec<Symbol>> {
    g.paths(alphabet, depth).unwrap()
}

/// A few concrete words covering every part of speech of the test tagset.
pub(crate) fn atoms(language: &mut Language) -> Vec<Symbol> {
    [
        "{mange,manger.V:s}",
        "{mangent,manger.V:p}",
        "{chat,chat.N+conc:ms}",
        "{chattes,chat.N+conc:fp}",
        "{le,le.DET+def:s}",
        "{un,un.DET+indef:s}",
        "{vite,vite.ADV}",
        ",",
        "12",
    ]
    .iter()
    .map(|label| text(language, label))
    .collect()
}
