//! Sets of states for the subset construction, and the splitting of
//! overlapping transitions into disjoint ones.

use hashbrown::HashMap;
use itertools::Itertools;

use super::{AutomatonError, Result, SingleGraph, State, Transition};
use crate::language::Language;
use crate::symbol::ops::{symbol_compare, symbol_inter_symbol, symbol_minus_symbol};
use crate::symbol::Symbol;
use crate::types::StateId;

/// A set of states, kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateSet {
    states: Vec<StateId>,
}

impl StateSet {
    /// The empty set.
    pub fn new() -> StateSet {
        StateSet { states: vec![] }
    }

    /// Adds `state`, returning false if it was already there.
    pub fn insert(&mut self, state: StateId) -> bool {
        match self.states.binary_search(&state) {
            Ok(_) => false,
            Err(i) => {
                self.states.insert(i, state);
                true
            }
        }
    }

    /// Whether `state` is a member.
    pub fn contains(&self, state: StateId) -> bool {
        self.states.binary_search(&state).is_ok()
    }

    /// Number of states in the set.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True for the empty set.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// States in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().copied()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> StateSet {
        StateSet {
            states: iter.into_iter().sorted().dedup().collect(),
        }
    }
}

/// Distinct state sets, numbered in insertion order.
#[derive(Debug, Default)]
pub struct StateSetArray {
    sets: Vec<StateSet>,
    ids: HashMap<StateSet, usize>,
}

impl StateSetArray {
    /// An empty array.
    pub fn new() -> StateSetArray {
        StateSetArray::default()
    }

    /// Number of distinct sets.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// True if no set was added.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// The set numbered `id`.
    pub fn get(&self, id: usize) -> Option<&StateSet> {
        self.sets.get(id)
    }

    /// The number of `set`, if it was added.
    pub fn lookup(&self, set: &StateSet) -> Option<usize> {
        self.ids.get(set).copied()
    }

    /// Returns the number of `set`, adding it if it is new.
    pub fn add(&mut self, set: StateSet) -> usize {
        if let Some(id) = self.lookup(&set) {
            return id;
        }
        let id = self.sets.len();
        self.ids.insert(set.clone(), id);
        self.sets.push(set);
        id
    }
}

/// Splits two overlapping symbols around their intersection.
///
/// Returns `None` when they are equal or disjoint. Otherwise both lists
/// start with the intersection, followed by what remains of each symbol.
fn split(
    language: &Language,
    a: &Symbol,
    b: &Symbol,
) -> Result<Option<(Vec<Symbol>, Vec<Symbol>)>> {
    if symbol_compare(a, b)?.is_eq() {
        return Ok(None);
    }
    let inter = match symbol_inter_symbol(a, b)? {
        Some(inter) => inter,
        None => return Ok(None),
    };

    let a_rest = symbol_minus_symbol(language, a, &inter)?;
    if a_rest.is_empty() && symbol_compare(a, &inter)?.is_ne() {
        return Err(AutomatonError::Expansion("a"));
    }
    let b_rest = symbol_minus_symbol(language, b, &inter)?;
    if b_rest.is_empty() && symbol_compare(b, &inter)?.is_ne() {
        return Err(AutomatonError::Expansion("b"));
    }

    let mut a_parts = Vec::with_capacity(a_rest.len() + 1);
    a_parts.push(inter.clone());
    a_parts.extend(a_rest);
    let mut b_parts = Vec::with_capacity(b_rest.len() + 1);
    b_parts.push(inter);
    b_parts.extend(b_rest);
    Ok(Some((a_parts, b_parts)))
}

fn replace(transitions: &mut Vec<Transition>, i: usize, parts: Vec<Symbol>) {
    let target = transitions[i].target;
    transitions.splice(
        i..i + 1,
        parts.into_iter().map(|label| Transition::new(label, target)),
    );
}

/// Splits the labels of `xs` and `ys` until any two of them are either
/// equal or disjoint. Returns true if anything was split.
pub(crate) fn expand_between(
    language: &Language,
    xs: &mut Vec<Transition>,
    ys: &mut Vec<Transition>,
) -> Result<bool> {
    let mut changed = false;
    let mut i = 0;
    while i < xs.len() {
        let mut j = 0;
        while j < ys.len() {
            if let Some((a, b)) = split(language, &xs[i].label, &ys[j].label)? {
                replace(xs, i, a);
                replace(ys, j, b);
                changed = true;
            }
            j += 1;
        }
        i += 1;
    }
    Ok(changed)
}

/// Splits the labels of one transition list until they are pairwise equal
/// or disjoint.
pub(crate) fn expand_within(language: &Language, transitions: &mut Vec<Transition>) -> Result<bool> {
    let mut changed = false;
    let mut i = 0;
    while i < transitions.len() {
        let mut j = i + 1;
        while j < transitions.len() {
            match split(language, &transitions[i].label, &transitions[j].label)? {
                Some((a, b)) => {
                    let shift = a.len();
                    // j first, so that i stays where it is
                    replace(transitions, j, b);
                    replace(transitions, i, a);
                    j += shift;
                    changed = true;
                }
                None => j += 1,
            }
        }
        i += 1;
    }
    Ok(changed)
}

/// Gives `q` an explicit transition to its default destination for every
/// label of `other` it lacks.
fn fill_from_default(q: &mut State, other: &State) -> bool {
    let default = match q.default {
        Some(default) => default,
        None => return false,
    };
    let mut changed = false;
    for t in &other.transitions {
        if !q.has_label(&t.label) {
            q.add_transition(t.label.clone(), default);
            changed = true;
        }
    }
    changed
}

/// Expands the transitions of two states against each other, defaults
/// included.
pub(crate) fn expand_states(language: &Language, q1: &mut State, q2: &mut State) -> Result<bool> {
    let mut changed = expand_between(language, &mut q1.transitions, &mut q2.transitions)?;
    changed |= fill_from_default(q1, q2);
    changed |= fill_from_default(q2, q1);
    Ok(changed)
}

/// One state of the subset construction, before it is numbered.
#[derive(Debug)]
pub struct SubsetState {
    pub(crate) initial: bool,
    pub(crate) terminal: bool,
    pub(crate) transitions: Vec<(Symbol, StateSet)>,
    pub(crate) default: StateSet,
}

impl SubsetState {
    /// Expands the transitions of every member of `set` in `graph`, then
    /// merges them by label.
    pub fn build(
        language: &Language,
        graph: &mut SingleGraph,
        set: &StateSet,
        initial: bool,
    ) -> Result<SubsetState> {
        let members: Vec<StateId> = set.iter().collect();

        loop {
            let mut changed = false;
            for q in &members {
                changed |= expand_within(language, &mut graph.state_mut(*q).transitions)?;
            }
            for (k, q1) in members.iter().enumerate() {
                for q2 in &members[k + 1..] {
                    let mut s1 = std::mem::take(graph.state_mut(*q1));
                    let mut s2 = std::mem::take(graph.state_mut(*q2));
                    let expanded = expand_states(language, &mut s1, &mut s2);
                    *graph.state_mut(*q1) = s1;
                    *graph.state_mut(*q2) = s2;
                    changed |= expanded?;
                }
            }
            if !changed {
                break;
            }
        }

        let mut transitions: Vec<(Symbol, StateSet)> = vec![];
        let mut by_label: HashMap<Symbol, usize> = HashMap::new();
        let mut default = StateSet::new();
        let mut terminal = false;

        for q in &members {
            let state = graph.state(*q);
            terminal |= state.terminal;
            if let Some(d) = state.default {
                default.insert(d);
            }
            for t in &state.transitions {
                match by_label.get(&t.label) {
                    Some(&i) => {
                        transitions[i].1.insert(t.target);
                    }
                    None => {
                        by_label.insert(t.label.clone(), transitions.len());
                        transitions.push((t.label.clone(), std::iter::once(t.target).collect()));
                    }
                }
            }
        }

        Ok(SubsetState {
            initial,
            terminal,
            transitions,
            default,
        })
    }
}
