//! Errors raised while building a language definition.
use std::path::PathBuf;

use smol_str::SmolStr;

/// Errors that can occur when loading a tagset or adding parts of speech.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LanguageError {
    /// Tagset file could not be read
    #[error("Failed to read tagset '{}'", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    /// Tagset definition could not be decoded from JSON
    #[error("Invalid tagset definition")]
    Json(#[from] serde_json::Error),

    /// Tagset file holds no definition at all
    #[error("Tagset definition is empty")]
    Empty,

    /// First line of the tagset is not `NAME <language>`
    #[error("Tagset language needs a name")]
    MissingName,

    /// A line of the tagset could not be understood
    #[error("Line {line}: {reason} ('{text}')")]
    Syntax {
        line: usize,
        text: String,
        reason: &'static str,
    },

    /// A part of speech was defined twice
    #[error("POS '{0}' already exists")]
    DuplicatePos(SmolStr),

    /// A category was defined twice in one part of speech
    #[error("In POS '{pos}': category '{category}' already exists")]
    DuplicateCategory { pos: SmolStr, category: SmolStr },

    /// A value name was used twice in one part of speech
    #[error("In POS '{pos}': value '{value}' is already defined")]
    DuplicateValue { pos: SmolStr, value: SmolStr },

    /// Inflectional values are written one character per value in tags
    #[error("In POS '{pos}': inflectional value '{value}' must be a single character")]
    InflectionalValueLength { pos: SmolStr, value: SmolStr },

    /// `_` cannot name a value
    #[error("In POS '{pos}': '_' in category '{category}' values")]
    BlankValue { pos: SmolStr, category: SmolStr },

    /// A `<category>` placeholder names no category
    #[error("In POS '{pos}': unknown category <{category}>")]
    UnknownCategory { pos: SmolStr, category: SmolStr },

    /// A value of a complete line names no value
    #[error("In POS '{pos}': unknown value '{value}'")]
    UnknownValue { pos: SmolStr, value: SmolStr },

    /// Complete lines may only mention discriminative features
    #[error("In POS '{pos}': '{token}' isn't discriminative")]
    NotDiscriminative { pos: SmolStr, token: SmolStr },

    /// Feature values are numbered with an `i8`
    #[error("In POS '{pos}': category '{category}' has more than 127 values")]
    TooManyValues { pos: SmolStr, category: SmolStr },
}
