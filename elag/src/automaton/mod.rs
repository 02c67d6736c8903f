//! Automata whose transitions are tagged with symbols.
//!
//! A [`SingleGraph`] owns its states and every symbol on its transitions.
//! Each transition carries exactly one symbol; a list of symbols towards
//! one destination is stored as parallel transitions. A state may also
//! have a default transition, followed by anything its explicit
//! transitions do not match.

/// Complementation.
pub mod complement;
/// Concatenation.
pub mod concat;
/// Subset construction.
pub mod determinize;
pub mod document;
pub mod error;
/// Products of two automata.
pub mod intersection;
/// Minimization.
pub mod minimize;
pub mod state_set;

pub use self::complement::elag_complementation;
pub use self::concat::elag_concat;
pub use self::determinize::elag_determinize;
pub use self::document::{AutomatonDocument, StateDocument};
pub use self::error::AutomatonError;
pub use self::intersection::{elag_intersection, IntersectionMode};
pub use self::minimize::elag_minimize;

use crate::language::Language;
use crate::symbol::ops::{symbol_in_symbol, symbols_minus_symbol};
use crate::symbol::{Symbol, SymbolError};
use crate::types::StateId;

pub(crate) type Result<T> = std::result::Result<T, AutomatonError>;

/// A transition carrying a single symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    label: Symbol,
    target: StateId,
}

impl Transition {
    /// A transition to `target` on `label`.
    pub fn new(label: Symbol, target: StateId) -> Transition {
        Transition { label, target }
    }

    /// The symbol matched by this transition.
    #[inline(always)]
    pub fn label(&self) -> &Symbol {
        &self.label
    }

    /// The destination state.
    #[inline(always)]
    pub fn target(&self) -> StateId {
        self.target
    }
}

/// A state: its flags, its explicit transitions and its default target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    initial: bool,
    terminal: bool,
    transitions: Vec<Transition>,
    default: Option<StateId>,
}

impl State {
    /// A state with no flags and no transitions.
    pub fn new() -> State {
        State {
            initial: false,
            terminal: false,
            transitions: vec![],
            default: None,
        }
    }

    /// Whether matching starts here.
    #[inline(always)]
    pub fn is_initial(&self) -> bool {
        self.initial
    }

    /// Whether matching may stop here.
    #[inline(always)]
    pub fn is_final(&self) -> bool {
        self.terminal
    }

    /// Explicit transitions, in insertion order.
    #[inline(always)]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Destination of the default transition, if any.
    #[inline(always)]
    pub fn default(&self) -> Option<StateId> {
        self.default
    }

    /// Marks the state as a starting point.
    pub fn set_initial(&mut self, initial: bool) {
        self.initial = initial;
    }

    /// Marks the state as accepting.
    pub fn set_final(&mut self, terminal: bool) {
        self.terminal = terminal;
    }

    /// Sets or clears the default transition.
    pub fn set_default(&mut self, default: Option<StateId>) {
        self.default = default;
    }

    /// Adds a transition to `target`.
    pub fn add_transition(&mut self, label: Symbol, target: StateId) {
        self.transitions.push(Transition::new(label, target));
    }

    /// Adds one parallel transition per symbol.
    pub fn add_transitions<I: IntoIterator<Item = Symbol>>(&mut self, labels: I, target: StateId) {
        self.transitions
            .extend(labels.into_iter().map(|label| Transition::new(label, target)));
    }

    fn has_label(&self, label: &Symbol) -> bool {
        self.transitions.iter().any(|t| &t.label == label)
    }
}

/// An automaton owning its states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingleGraph {
    states: Vec<State>,
}

impl SingleGraph {
    /// An automaton with no states.
    pub fn new() -> SingleGraph {
        SingleGraph { states: vec![] }
    }

    /// Creates a graph of `count` states with no flags and no transitions.
    pub fn with_states(count: usize) -> SingleGraph {
        SingleGraph {
            states: vec![State::new(); count],
        }
    }

    /// Adds a blank state and returns its id.
    pub fn add_state(&mut self) -> StateId {
        self.states.push(State::new());
        StateId::new(self.states.len() - 1)
    }

    /// Number of states.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True if the graph has no state.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Every state, indexed by [`StateId`].
    #[inline(always)]
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// The state `id`. Panics if `id` is out of range.
    #[inline(always)]
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }

    /// Mutable access to the state `id`.
    #[inline(always)]
    pub fn state_mut(&mut self, id: StateId) -> &mut State {
        &mut self.states[id.index()]
    }

    /// Adds one transition.
    pub fn add_transition(&mut self, from: StateId, label: Symbol, to: StateId) {
        self.state_mut(from).add_transition(label, to);
    }

    /// Adds one transition per symbol, all to `to`.
    pub fn add_transitions<I: IntoIterator<Item = Symbol>>(&mut self, from: StateId, labels: I, to: StateId) {
        self.state_mut(from).add_transitions(labels, to);
    }

    /// Every state marked initial, in index order.
    pub fn initials(&self) -> Vec<StateId> {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, state)| state.initial)
            .map(|(i, _)| StateId::new(i))
            .collect()
    }

    /// The only initial state, or `None` when there is none.
    pub fn initial_state(&self, op: &'static str) -> Result<Option<StateId>> {
        let initials = self.initials();
        match initials.len() {
            0 => Ok(None),
            1 => Ok(Some(initials[0])),
            count => Err(AutomatonError::NotDeterministic { op, count }),
        }
    }

    /// Drops every state from `len` on.
    pub fn resize(&mut self, len: usize) {
        self.states.truncate(len);
    }

    /// Checks that every transition and default points into the graph.
    pub fn check(&self) -> Result<()> {
        let len = self.len();
        for state in &self.states {
            let targets = state.transitions.iter().map(|t| t.target).chain(state.default);
            for target in targets {
                if target.index() >= len {
                    return Err(AutomatonError::StateOutOfRange { state: target, len });
                }
            }
        }
        Ok(())
    }

    fn successors(&self, id: StateId) -> impl Iterator<Item = StateId> + '_ {
        let state = self.state(id);
        state.transitions.iter().map(|t| t.target).chain(state.default)
    }

    /// Keeps only the states that are reachable from an initial state and
    /// from which a final state is reachable, renumbering them in order.
    pub fn trim(&mut self) {
        let len = self.len();

        let mut accessible = vec![false; len];
        let mut stack = self.initials();
        for q in &stack {
            accessible[q.index()] = true;
        }
        while let Some(q) = stack.pop() {
            for to in self.successors(q) {
                if !accessible[to.index()] {
                    accessible[to.index()] = true;
                    stack.push(to);
                }
            }
        }

        let mut predecessors = vec![vec![]; len];
        for q in 0..len {
            for to in self.successors(StateId::new(q)) {
                predecessors[to.index()].push(StateId::new(q));
            }
        }
        let mut coaccessible = vec![false; len];
        let mut stack: Vec<StateId> = (0..len)
            .filter(|q| self.states[*q].terminal)
            .map(StateId::new)
            .collect();
        for q in &stack {
            coaccessible[q.index()] = true;
        }
        while let Some(q) = stack.pop() {
            for from in &predecessors[q.index()] {
                if !coaccessible[from.index()] {
                    coaccessible[from.index()] = true;
                    stack.push(*from);
                }
            }
        }

        let mut renumber = vec![None; len];
        let mut next = 0;
        for q in 0..len {
            if accessible[q] && coaccessible[q] {
                renumber[q] = Some(StateId::new(next));
                next += 1;
            }
        }

        let old = std::mem::take(&mut self.states);
        self.states = old
            .into_iter()
            .enumerate()
            .filter(|(q, _)| renumber[*q].is_some())
            .map(|(_, mut state)| {
                state.transitions = state
                    .transitions
                    .into_iter()
                    .filter_map(|t| renumber[t.target.index()].map(|to| Transition::new(t.label, to)))
                    .collect();
                state.default = state.default.and_then(|d| renumber[d.index()]);
                state
            })
            .collect();

        log::debug!("trim: {} states out of {}", self.len(), len);
    }

    /// Appends the states of `other`. The result recognises the union of
    /// both languages but is not deterministic.
    pub fn build_union(&mut self, other: SingleGraph) {
        let offset = self.len();
        self.states.extend(other.states.into_iter().map(|mut state| {
            for t in &mut state.transitions {
                t.target = t.target.offset(offset);
            }
            state.default = state.default.map(|d| d.offset(offset));
            state
        }));
    }

    /// Lets the automaton start matching anywhere: every initial state
    /// loops on LEXIC.
    pub fn prefix_with_everything(&mut self) {
        for q in self.initials() {
            self.add_transition(q, Symbol::Lexic, q);
        }
    }

    /// Lets anything follow a match: final states lose their outgoing
    /// transitions and loop on LEXIC instead.
    pub fn suffix_with_everything(&mut self) {
        for (i, state) in self.states.iter_mut().enumerate() {
            if state.terminal {
                state.transitions.clear();
                state.default = None;
                state.add_transition(Symbol::Lexic, StateId::new(i));
            }
        }
    }

    /// Removes explicit transitions that go where the default goes.
    pub fn compact_default_transitions(&mut self) {
        for state in &mut self.states {
            if let Some(default) = state.default {
                state.transitions.retain(|t| t.target != default);
            }
        }
    }

    /// Everything, over every part of speech, that no explicit transition
    /// of `q` matches.
    pub fn lexic_minus_transitions(&self, language: &Language, q: StateId) -> Result<Vec<Symbol>> {
        let mut buckets: Vec<Vec<Symbol>> = language
            .pos_list()
            .iter()
            .map(|pos| Symbol::new_pos(pos, None).into_iter().collect())
            .collect();

        for t in &self.state(q).transitions {
            match &t.label {
                Symbol::Lexic => return Ok(vec![]),
                Symbol::Tag(tag) => {
                    if let Some(bucket) = buckets.get_mut(tag.pos().index().index()) {
                        *bucket = symbols_minus_symbol(language, bucket, &t.label)?;
                    }
                }
                other => {
                    return Err(SymbolError::InvalidType {
                        op: "LEXIC minus transitions",
                        kind: other.kind(),
                    }
                    .into())
                }
            }
        }

        Ok(buckets.into_iter().flatten().collect())
    }

    /// Replaces the default transition of `q` by explicit transitions.
    pub fn explicit_default_transition(&mut self, language: &Language, q: StateId) -> Result<()> {
        let default = match self.state(q).default {
            Some(default) => default,
            None => return Ok(()),
        };
        let rest = self.lexic_minus_transitions(language, q)?;
        let state = self.state_mut(q);
        state.add_transitions(rest, default);
        state.default = None;
        Ok(())
    }

    fn epsilon_closure(&self, mut states: Vec<StateId>) -> Vec<StateId> {
        let mut stack = states.clone();
        while let Some(q) = stack.pop() {
            for t in &self.state(q).transitions {
                if t.label.is_epsilon() && !states.contains(&t.target) {
                    states.push(t.target);
                    stack.push(t.target);
                }
            }
        }
        states.sort();
        states.dedup();
        states
    }

    fn step(&self, from: &[StateId], symbol: &Symbol) -> Result<Vec<StateId>> {
        let mut to = vec![];
        for q in from {
            let state = self.state(*q);
            let mut matched = false;
            for t in &state.transitions {
                if t.label.is_epsilon() {
                    continue;
                }
                if symbol_in_symbol(symbol, &t.label)? {
                    matched = true;
                    to.push(t.target);
                }
            }
            if !matched {
                to.extend(state.default);
            }
        }
        Ok(self.epsilon_closure(to))
    }

    /// Runs a word of concrete symbols through the automaton.
    ///
    /// A symbol follows every transition whose label contains it, or the
    /// default transition when no label does.
    pub fn accepts(&self, word: &[Symbol]) -> Result<bool> {
        let mut current = self.epsilon_closure(self.initials());
        for symbol in word {
            if current.is_empty() {
                return Ok(false);
            }
            current = self.step(&current, symbol)?;
        }
        Ok(current.iter().any(|q| self.state(*q).terminal))
    }

    /// Every accepted word of at most `depth` symbols drawn from `alphabet`,
    /// shortest first.
    pub fn paths(&self, alphabet: &[Symbol], depth: usize) -> Result<Vec<Vec<Symbol>>> {
        let mut accepted = vec![];
        let mut frontier = vec![(vec![], self.epsilon_closure(self.initials()))];

        for level in 0..=depth {
            let mut next = vec![];
            for (word, states) in frontier {
                if states.iter().any(|q| self.state(*q).terminal) {
                    accepted.push(word.clone());
                }
                if level == depth {
                    continue;
                }
                for symbol in alphabet {
                    let to = self.step(&states, symbol)?;
                    if !to.is_empty() {
                        let mut longer: Vec<Symbol> = word.clone();
                        longer.push(symbol.clone());
                        next.push((longer, to));
                    }
                }
            }
            frontier = next;
        }

        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{graph, sym, test_language, text};

    #[test]
    fn new_states_are_blank() {
        let mut g = SingleGraph::with_states(2);
        assert_eq!(g.add_state(), StateId::new(2));
        assert_eq!(g.len(), 3);
        for state in g.states() {
            assert!(!state.is_initial());
            assert!(!state.is_final());
            assert!(state.transitions().is_empty());
            assert_eq!(state.default(), None);
        }
    }

    #[test]
    fn trim_drops_useless_states() {
        let mut language = test_language();
        // 2 is a dead end, 3 is unreachable
        let mut g = graph(
            &mut language,
            5,
            &[4],
            &[
                (0, "<V:s>", 4),
                (0, "<V:p>", 2),
                (3, "<N>", 4),
                (1, "<ADV>", 4),
                (4, "<def>", 1),
            ],
        );
        g.trim();

        assert_eq!(g.len(), 3);
        assert!(g.state(StateId::ZERO).is_initial());
        assert_eq!(g.state(StateId::ZERO).transitions().len(), 1);
        assert_eq!(g.state(StateId::new(0)).transitions()[0].target(), StateId::new(2));
        assert!(g.state(StateId::new(2)).is_final());
        assert_eq!(g.state(StateId::new(2)).default(), Some(StateId::new(1)));
    }

    #[test]
    fn trim_of_a_graph_without_finals_is_empty() {
        let mut language = test_language();
        let mut g = graph(&mut language, 2, &[], &[(0, "<V>", 1)]);
        g.trim();
        assert!(g.is_empty());
    }

    #[test]
    fn union_keeps_both_languages() {
        let mut language = test_language();
        let mut a = graph(&mut language, 2, &[1], &[(0, "<V:s>", 1)]);
        let b = graph(&mut language, 2, &[1], &[(0, "<N>", 1)]);
        a.build_union(b);

        assert_eq!(a.len(), 4);
        assert_eq!(a.initials(), vec![StateId::new(0), StateId::new(2)]);
        assert_eq!(a.state(StateId::new(2)).transitions()[0].target(), StateId::new(3));
        assert!(a.initial_state("union").is_err());

        let verb = text(&mut language, "{mange,manger.V:s}");
        let noun = text(&mut language, "{chat,chat.N:ms}");
        let adverb = text(&mut language, "{vite,vite.ADV}");
        assert!(a.accepts(&[verb]).unwrap());
        assert!(a.accepts(&[noun]).unwrap());
        assert!(!a.accepts(&[adverb]).unwrap());
    }

    #[test]
    fn default_transition_catches_what_labels_miss() {
        let mut language = test_language();
        let g = graph(
            &mut language,
            3,
            &[1],
            &[(0, "<V:s>", 2), (0, "<def>", 1)],
        );
        let singular = text(&mut language, "{mange,manger.V:s}");
        let plural = text(&mut language, "{mangent,manger.V:p}");
        assert!(!g.accepts(&[singular]).unwrap());
        assert!(g.accepts(&[plural]).unwrap());
        assert!(!g.accepts(&[]).unwrap());
    }

    #[test]
    fn explicit_default_keeps_the_language() {
        let mut language = test_language();
        let mut g = graph(
            &mut language,
            3,
            &[1],
            &[(0, "<V:s>", 2), (0, "<def>", 1)],
        );
        let before = g.clone();
        g.explicit_default_transition(&language, StateId::ZERO).unwrap();

        assert_eq!(g.state(StateId::ZERO).default(), None);
        let labels: Vec<Symbol> = g.state(StateId::ZERO).transitions()[1..]
            .iter()
            .map(|t| t.label().clone())
            .collect();
        assert!(labels.contains(&sym(&mut language, "<V:p>")));
        assert!(labels.contains(&sym(&mut language, "<N>")));
        assert!(!labels.contains(&sym(&mut language, "<V:s>")));

        let alphabet = vec![
            text(&mut language, "{mange,manger.V:s}"),
            text(&mut language, "{mangent,manger.V:p}"),
            text(&mut language, "{chat,chat.N:ms}"),
            text(&mut language, ","),
        ];
        assert_eq!(
            g.paths(&alphabet, 2).unwrap(),
            before.paths(&alphabet, 2).unwrap()
        );
    }

    #[test]
    fn lexic_minus_transitions_complements_every_pos() {
        let mut language = test_language();
        let g = graph(
            &mut language,
            2,
            &[1],
            &[(0, "<V:s>", 1), (0, "<N:f>", 1), (0, "<PNC>", 1)],
        );
        let rest = g.lexic_minus_transitions(&language, StateId::ZERO).unwrap();

        assert!(rest.contains(&sym(&mut language, "<V:p>")));
        assert!(rest.contains(&sym(&mut language, "<N:m>")));
        assert!(!rest.contains(&sym(&mut language, "<N:f>")));
        assert!(rest.contains(&sym(&mut language, "<ADV>")));
        assert!(!rest.iter().any(|s| s.pos().map(|p| p.name()) == Some("PNC")));

        let lexic = graph(&mut language, 1, &[0], &[(0, "<.>", 0)]);
        assert!(lexic.lexic_minus_transitions(&language, StateId::ZERO).unwrap().is_empty());
    }

    #[test]
    fn prefix_and_suffix_with_everything() {
        let mut language = test_language();
        let mut g = graph(
            &mut language,
            2,
            &[1],
            &[(0, "<V:s>", 1), (1, "<N>", 0)],
        );
        g.prefix_with_everything();
        g.suffix_with_everything();

        assert_eq!(g.state(StateId::new(1)).transitions().len(), 1);
        assert!(g.state(StateId::new(1)).transitions()[0].label().is_lexic());

        let verb = text(&mut language, "{mange,manger.V:s}");
        let noun = text(&mut language, "{chat,chat.N:ms}");
        assert!(g.accepts(&[noun.clone(), verb.clone(), noun.clone()]).unwrap());
        assert!(!g.accepts(&[noun]).unwrap());
    }

    #[test]
    fn compact_drops_transitions_shadowed_by_the_default() {
        let mut language = test_language();
        let mut g = graph(
            &mut language,
            2,
            &[1],
            &[(0, "<V:s>", 1), (0, "<N>", 0), (0, "<def>", 1)],
        );
        g.compact_default_transitions();
        assert_eq!(g.state(StateId::ZERO).transitions().len(), 1);
        assert_eq!(g.state(StateId::ZERO).transitions()[0].target(), StateId::ZERO);
    }

    #[test]
    fn check_reports_dangling_targets() {
        let mut language = test_language();
        let mut g = graph(&mut language, 2, &[1], &[(0, "<V>", 1)]);
        assert!(g.check().is_ok());
        g.resize(1);
        assert!(matches!(
            g.check(),
            Err(AutomatonError::StateOutOfRange { len: 1, .. })
        ));
    }
}
