//! Errors raised by the automaton algorithms.

use crate::symbol::SymbolError;
use crate::types::StateId;

/// Errors that can occur while transforming automata.
///
/// These report a broken precondition in the calling pipeline, such as a
/// non-deterministic input where a deterministic one is required.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AutomatonError {
    /// Operation needs exactly one initial state
    #[error("{op}: automaton has {count} initial states")]
    NotDeterministic { op: &'static str, count: usize },

    /// Text transition matched more than one grammar transition
    #[error("intersection: state {0} of the grammar is not deterministic")]
    AmbiguousMatch(StateId),

    /// Text automata never carry default transitions
    #[error("intersection: text state {0} has a default transition")]
    TextDefault(StateId),

    /// Splitting two overlapping symbols left one of them unchanged
    #[error("expansion: {0} differs from the intersection but nothing remains")]
    Expansion(&'static str),

    /// A state index points past the end of the automaton
    #[error("state {state} out of range (automaton has {len} states)")]
    StateOutOfRange { state: StateId, len: usize },

    /// Underlying symbol algebra failed
    #[error(transparent)]
    Symbol(#[from] SymbolError),
}
