use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Index of an interned string in a language's form table.
///
/// Form 0 is always the empty string.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[serde(transparent)]
pub struct FormId(pub(crate) u32);

impl FormId {
    /// Id of the empty string.
    pub const EMPTY: Self = FormId(0);

    /// Wraps an index into the form table.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        FormId(index as u32)
    }

    /// Position as a `usize`.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// True for the empty string.
    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Position of a part of speech in its language.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[serde(transparent)]
pub struct PosIndex(pub(crate) u16);

impl PosIndex {
    /// Wraps a position in the language's POS list.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        PosIndex(index as u16)
    }

    /// Position as a `usize`.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Position of a state in its automaton.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[serde(transparent)]
pub struct StateId(pub(crate) u32);

impl StateId {
    /// The first state.
    pub const ZERO: Self = StateId(0);

    /// Wraps a state index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        StateId(index as u32)
    }

    /// Position as a `usize`.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub(crate) fn offset(self, by: usize) -> Self {
        StateId(self.0 + by as u32)
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Back reference to the tag of a text automaton a symbol was loaded from.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[serde(transparent)]
pub struct TagIndex(pub(crate) u32);

impl TagIndex {
    /// Wraps a text tag number.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        TagIndex(index as u32)
    }

    /// Position as a `usize`.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One slot of a symbol's feature vector.
///
/// Positive values index into the category's value table. Zero means the
/// feature is not specified and `-1` means it can never be set.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[serde(transparent)]
pub struct FeatureValue(pub(crate) i8);

impl FeatureValue {
    /// The feature can never be set.
    pub const LOCKED: Self = FeatureValue(-1);
    /// No value chosen yet.
    pub const UNSPECIFIED: Self = FeatureValue(0);

    /// Wraps a raw value.
    #[inline(always)]
    pub const fn new(value: i8) -> Self {
        FeatureValue(value)
    }

    /// Raw value.
    #[inline(always)]
    pub const fn get(self) -> i8 {
        self.0
    }

    /// True for a real value.
    #[inline(always)]
    pub const fn is_set(self) -> bool {
        self.0 > 0
    }

    /// True for [`FeatureValue::LOCKED`].
    #[inline(always)]
    pub const fn is_locked(self) -> bool {
        self.0 == Self::LOCKED.0
    }

    /// True for [`FeatureValue::UNSPECIFIED`].
    #[inline(always)]
    pub const fn is_unspecified(self) -> bool {
        self.0 == Self::UNSPECIFIED.0
    }

    /// Index into the category's value table, if this is a real value.
    #[inline(always)]
    pub const fn value_index(self) -> Option<usize> {
        if self.0 > 0 {
            Some(self.0 as usize)
        } else {
            None
        }
    }
}

impl Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
