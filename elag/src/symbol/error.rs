//! Errors raised by the symbol algebra and the tag parsers.

use super::SymbolKind;

/// Errors that can occur when combining or parsing symbols.
///
/// Algebra errors mean a caller broke a precondition. They are not
/// input validation errors and should abort the current compilation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SymbolError {
    /// Symbol of this kind cannot take part in the operation
    #[error("{op}: invalid symbol type '{kind}'")]
    InvalidType { op: &'static str, kind: SymbolKind },

    /// Epsilon reached an operation that needs a real symbol
    #[error("{0}: unexpected epsilon")]
    Epsilon(&'static str),

    /// Operation needs both symbols to share a part of speech
    #[error("{0}: different parts of speech")]
    PosMismatch(&'static str),

    /// Subtrahend is not included in the minuend
    #[error("minus: b not in a")]
    NotIncluded,

    /// Subtraction between these kinds is impossible when b is in a
    #[error("minus: {minuend} minus {subtrahend} should never happen")]
    ImpossibleMinus {
        minuend: SymbolKind,
        subtrahend: SymbolKind,
    },

    /// Both operands come from a text automaton
    #[error("{0}: both symbols carry a text tag")]
    TextTagConflict(&'static str),

    /// Label does not follow the tag syntax
    #[error("Bad symbol: '{0}'")]
    BadLabel(String),

    /// Label names an unknown part of speech
    #[error("In symbol '{label}': unknown part of speech '{pos}'")]
    UnknownPos { label: String, pos: String },

    /// Label locks an unknown category
    #[error("In symbol '{label}': unknown feature '{feature}'")]
    UnknownFeature { label: String, feature: String },

    /// Only semantic categories can be locked with `!`
    #[error("In symbol '{label}': '{feature}' is an inflectional feature")]
    LockedInflection { label: String, feature: String },

    /// A feature was both locked and set
    #[error("In symbol '{label}': '{feature}' cannot be both locked and set")]
    LockedAndSet { label: String, feature: String },

    /// An inflectional code character is not defined
    #[error("In symbol '{label}': unknown inflectional code '{code}'")]
    UnknownInflection { label: String, code: char },

    /// The features of the label match no code of its part of speech
    #[error("'{0}' is not a valid tag")]
    InvalidTag(String),

    /// `<def>` is a transition marker, not a symbol
    #[error("Unexpected '<def>' tag")]
    DefaultMarker,

    /// Text labels can only be produced for atoms
    #[error("'{0}' isn't an atom")]
    NotAnAtom(String),
}
