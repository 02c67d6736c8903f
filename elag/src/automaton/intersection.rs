use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::state_set::expand_between;
use super::{AutomatonError, Result, SingleGraph};
use crate::language::Language;
use crate::symbol::ops::symbol_in_symbol;
use crate::types::StateId;

/// How the transitions of the two operands are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntersectionMode {
    /// Labels are split against each other and matched by equality.
    GrammarGrammar,
    /// Each text label must fall inside at most one grammar label.
    TextGrammar,
}

impl Default for IntersectionMode {
    fn default() -> IntersectionMode {
        IntersectionMode::GrammarGrammar
    }
}

impl FromStr for IntersectionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "grammar" | "grammar_grammar" => Ok(IntersectionMode::GrammarGrammar),
            "text" | "text_grammar" => Ok(IntersectionMode::TextGrammar),
            other => Err(format!("unknown intersection mode '{}'", other)),
        }
    }
}

struct Product<'a> {
    language: &'a Language,
    a: &'a SingleGraph,
    b: &'a SingleGraph,
    result: SingleGraph,
    renumber: Vec<Option<StateId>>,
    pending: Vec<(StateId, StateId, StateId)>,
}

impl<'a> Product<'a> {
    fn new(language: &'a Language, a: &'a SingleGraph, b: &'a SingleGraph) -> Product<'a> {
        Product {
            language,
            a,
            b,
            result: SingleGraph::new(),
            renumber: vec![None; a.len() * b.len()],
            pending: vec![],
        }
    }

    /// The product state of `q1` and `q2`, created on first use.
    fn pair(&mut self, q1: StateId, q2: StateId) -> StateId {
        let slot = q1.index() * self.b.len() + q2.index();
        if let Some(q) = self.renumber[slot] {
            return q;
        }
        let q = self.result.add_state();
        self.renumber[slot] = Some(q);

        let (s1, s2) = (self.a.state(q1), self.b.state(q2));
        let state = self.result.state_mut(q);
        state.set_initial(s1.initial && s2.initial);
        state.set_final(s1.terminal && s2.terminal);
        self.pending.push((q1, q2, q));
        q
    }

    fn grammar_step(&mut self, q1: StateId, q2: StateId, q: StateId) -> Result<()> {
        let (a, b) = (self.a, self.b);
        let (s1, s2) = (a.state(q1), b.state(q2));
        let mut ta = s1.transitions.clone();
        let mut tb = s2.transitions.clone();
        while expand_between(self.language, &mut ta, &mut tb)? {}

        for t1 in ta {
            match tb.iter().position(|t2| t2.label == t1.label) {
                Some(i) => {
                    let t2 = tb.remove(i);
                    let to = self.pair(t1.target, t2.target);
                    self.result.add_transition(q, t1.label, to);
                }
                None => {
                    if let Some(d2) = s2.default {
                        let to = self.pair(t1.target, d2);
                        self.result.add_transition(q, t1.label, to);
                    }
                }
            }
        }

        if let Some(d1) = s1.default {
            for t2 in tb {
                let to = self.pair(d1, t2.target);
                self.result.add_transition(q, t2.label, to);
            }
            if let Some(d2) = s2.default {
                let to = self.pair(d1, d2);
                self.result.state_mut(q).set_default(Some(to));
            }
        }
        Ok(())
    }

    fn text_step(&mut self, q1: StateId, q2: StateId, q: StateId) -> Result<()> {
        let (a, b) = (self.a, self.b);
        let (s1, s2) = (a.state(q1), b.state(q2));
        if s1.default.is_some() {
            return Err(AutomatonError::TextDefault(q1));
        }

        for t1 in &s1.transitions {
            if t1.label.pos().map(|pos| pos.is_ignorable()).unwrap_or(false) {
                let to = self.pair(t1.target, q2);
                self.result.add_transition(q, t1.label.clone(), to);
                continue;
            }

            let mut matched = None;
            for t2 in &s2.transitions {
                if symbol_in_symbol(&t1.label, &t2.label)? {
                    if matched.is_some() {
                        return Err(AutomatonError::AmbiguousMatch(q2));
                    }
                    matched = Some(t2.target);
                }
            }
            if let Some(to2) = matched.or(s2.default) {
                let to = self.pair(t1.target, to2);
                self.result.add_transition(q, t1.label.clone(), to);
            }
        }
        Ok(())
    }
}

/// Builds the product of two deterministic automata.
///
/// In [`IntersectionMode::GrammarGrammar`] the labels of each pair of
/// states are first split so that matching labels are equal, and default
/// transitions match whatever the other side does not say explicitly. In
/// [`IntersectionMode::TextGrammar`], `a` is a text automaton whose labels
/// are concrete: each must fall inside one label of `b`, or else follow
/// `b`'s default, and words of ignorable parts of speech pass through `b`
/// unchanged.
///
/// Only pairs reachable from the initial pair are built. If either
/// operand has no initial state the result is empty.
pub fn elag_intersection(
    language: &Language,
    a: &SingleGraph,
    b: &SingleGraph,
    mode: IntersectionMode,
) -> Result<SingleGraph> {
    let initial_a = a.initial_state("intersection")?;
    let initial_b = b.initial_state("intersection")?;
    let (initial_a, initial_b) = match (initial_a, initial_b) {
        (Some(qa), Some(qb)) => (qa, qb),
        _ => return Ok(SingleGraph::new()),
    };

    let mut product = Product::new(language, a, b);
    product.pair(initial_a, initial_b);
    while let Some((q1, q2, q)) = product.pending.pop() {
        log::trace!("intersection: ({}, {}) -> {}", q1, q2, q);
        match mode {
            IntersectionMode::GrammarGrammar => product.grammar_step(q1, q2, q)?,
            IntersectionMode::TextGrammar => product.text_step(q1, q2, q)?,
        }
    }

    log::debug!(
        "intersection: {} x {} states -> {}",
        a.len(),
        b.len(),
        product.result.len()
    );
    Ok(product.result)
}
