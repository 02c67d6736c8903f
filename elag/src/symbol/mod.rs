//! Symbols tagging ELAG transitions.
//!
//! A symbol is either one of the special markers (anything, epsilon and
//! the grammar-only `<!>` and `<=>`) or a [`Tag`]: a part of speech with a
//! partially specified feature vector and a lemma constraint. The kind of a
//! tag is always derived from its content by [`Tag::retype`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::language::{Language, Pos};
use crate::types::{FeatureValue, FormId, TagIndex};

/// Numbering of symbols by value.
pub mod alphabet;
pub mod error;
pub mod label;
pub mod ops;

pub use self::alphabet::SymbolAlphabet;
pub use self::error::SymbolError;

/// What a symbol stands for, from most to least general.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    /// Matches anything.
    Lexic,
    /// Matches the empty word.
    Epsilon,
    /// All discriminative features fixed, with a lemma.
    Atom,
    /// All discriminative features fixed, with excluded lemmas.
    CodeNeg,
    /// All discriminative features fixed, no lemma.
    Code,
    /// Incomplete, with a lemma.
    IncCan,
    /// Incomplete, with excluded lemmas.
    IncNeg,
    /// Some discriminative feature unset, no lemma.
    Inc,
    /// Grammar-only `<!>` marker.
    Exclam,
    /// Grammar-only `<=>` marker.
    Equal,
}

impl SymbolKind {
    /// Position in the symbol order. Parsing markers have none.
    pub const fn rank(self) -> Option<u8> {
        match self {
            SymbolKind::Lexic => Some(0),
            SymbolKind::Epsilon => Some(1),
            SymbolKind::Atom => Some(2),
            SymbolKind::CodeNeg => Some(3),
            SymbolKind::Code => Some(4),
            SymbolKind::IncCan => Some(5),
            SymbolKind::IncNeg => Some(6),
            SymbolKind::Inc => Some(7),
            SymbolKind::Exclam | SymbolKind::Equal => None,
        }
    }

    /// One-character code used in debug output.
    pub const fn code(self) -> char {
        match self {
            SymbolKind::Lexic => 'L',
            SymbolKind::Epsilon => 'e',
            SymbolKind::Atom => 'a',
            SymbolKind::CodeNeg => 'N',
            SymbolKind::Code => 'C',
            SymbolKind::IncCan => 'c',
            SymbolKind::IncNeg => 'n',
            SymbolKind::Inc => 'I',
            SymbolKind::Exclam => '!',
            SymbolKind::Equal => '=',
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Kinds a [`Tag`] can have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// See [`SymbolKind::Atom`].
    Atom,
    /// See [`SymbolKind::CodeNeg`].
    CodeNeg,
    /// See [`SymbolKind::Code`].
    Code,
    /// See [`SymbolKind::IncCan`].
    IncCan,
    /// See [`SymbolKind::IncNeg`].
    IncNeg,
    /// See [`SymbolKind::Inc`].
    Inc,
}

impl TagKind {
    /// The matching [`SymbolKind`].
    pub const fn symbol_kind(self) -> SymbolKind {
        match self {
            TagKind::Atom => SymbolKind::Atom,
            TagKind::CodeNeg => SymbolKind::CodeNeg,
            TagKind::Code => SymbolKind::Code,
            TagKind::IncCan => SymbolKind::IncCan,
            TagKind::IncNeg => SymbolKind::IncNeg,
            TagKind::Inc => SymbolKind::Inc,
        }
    }
}

/// How a tag constrains the lemma.
///
/// `Positive` with an empty lemma puts no constraint at all. `Negative`
/// lists the excluded lemmas, sorted and without duplicates.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lemma {
    /// A fixed lemma, and the surface form for text symbols.
    Positive { form: FormId, lemma: FormId },
    /// Excluded lemmas.
    Negative(Vec<FormId>),
}

impl Lemma {
    /// No lemma constraint.
    pub const NONE: Lemma = Lemma::Positive {
        form: FormId::EMPTY,
        lemma: FormId::EMPTY,
    };

    /// A fixed lemma, with no surface form.
    pub fn canonical(lemma: FormId) -> Lemma {
        Lemma::Positive {
            form: FormId::EMPTY,
            lemma,
        }
    }

    /// Every lemma but the `excluded` ones.
    pub fn negative<I: IntoIterator<Item = FormId>>(excluded: I) -> Lemma {
        let mut excluded: Vec<FormId> = excluded.into_iter().collect();
        excluded.sort_unstable();
        excluded.dedup();
        Lemma::Negative(excluded)
    }

    /// The fixed lemma, if any.
    pub fn lemma(&self) -> Option<FormId> {
        match self {
            Lemma::Positive { lemma, .. } if !lemma.is_empty() => Some(*lemma),
            _ => None,
        }
    }

    /// The surface form, if any.
    pub fn form(&self) -> Option<FormId> {
        match self {
            Lemma::Positive { form, .. } if !form.is_empty() => Some(*form),
            _ => None,
        }
    }

    /// Excluded lemmas. Empty for positive lemmas.
    pub fn excluded(&self) -> &[FormId] {
        match self {
            Lemma::Negative(excluded) => excluded,
            Lemma::Positive { .. } => &[],
        }
    }

    /// True for excluded-lemma lists.
    #[inline(always)]
    pub fn is_negative(&self) -> bool {
        matches!(self, Lemma::Negative(_))
    }

    pub(crate) fn excludes(&self, lemma: FormId) -> bool {
        self.excluded().binary_search(&lemma).is_ok()
    }
}

/// A part of speech symbol.
#[derive(Clone)]
pub struct Tag {
    kind: TagKind,
    pos: Arc<Pos>,
    features: Vec<FeatureValue>,
    lemma: Lemma,
    tag_index: Option<TagIndex>,
}

impl Tag {
    /// A tag with every feature unspecified and no lemma, not yet typed.
    pub(crate) fn untyped(pos: &Arc<Pos>, tag_index: Option<TagIndex>) -> Tag {
        Tag {
            kind: TagKind::Inc,
            pos: Arc::clone(pos),
            features: vec![FeatureValue::UNSPECIFIED; pos.category_count()],
            lemma: Lemma::NONE,
            tag_index,
        }
    }

    /// The whole part of speech, or `None` if it has no valid code.
    pub fn new(pos: &Arc<Pos>, tag_index: Option<TagIndex>) -> Option<Tag> {
        let mut tag = Tag::untyped(pos, tag_index);
        if tag.retype() {
            Some(tag)
        } else {
            None
        }
    }

    /// A tag standing for one full code of its part of speech.
    pub(crate) fn from_code(pos: &Arc<Pos>, code: &[FeatureValue]) -> Tag {
        let mut tag = Tag::untyped(pos, None);
        tag.features[..code.len()].copy_from_slice(code);
        tag.kind = TagKind::Code;
        tag
    }

    /// An atom with only a lemma, as used for unknown words, punctuation and numbers.
    pub(crate) fn bare_atom(pos: &Arc<Pos>, lemma: FormId, tag_index: Option<TagIndex>) -> Tag {
        let mut tag = Tag::untyped(pos, tag_index);
        tag.kind = TagKind::Atom;
        tag.lemma = Lemma::canonical(lemma);
        tag
    }

    /// Kind derived by the last [`Tag::retype`].
    #[inline(always)]
    pub fn kind(&self) -> TagKind {
        self.kind
    }

    /// Part of speech of the tag.
    #[inline(always)]
    pub fn pos(&self) -> &Arc<Pos> {
        &self.pos
    }

    /// Feature values, one per category of the part of speech.
    #[inline(always)]
    pub fn features(&self) -> &[FeatureValue] {
        &self.features
    }

    /// Feature at `index`. Features past the end count as unspecified.
    #[inline(always)]
    pub fn feature(&self, index: usize) -> FeatureValue {
        self.features
            .get(index)
            .copied()
            .unwrap_or(FeatureValue::UNSPECIFIED)
    }

    /// Lemma constraint.
    #[inline(always)]
    pub fn lemma(&self) -> &Lemma {
        &self.lemma
    }

    /// Index of the text tag this symbol was read from.
    #[inline(always)]
    pub fn tag_index(&self) -> Option<TagIndex> {
        self.tag_index
    }

    pub(crate) fn set_feature(&mut self, index: usize, value: FeatureValue) {
        self.features[index] = value;
    }

    pub(crate) fn set_lemma(&mut self, lemma: Lemma) {
        self.lemma = lemma;
    }

    pub(crate) fn set_tag_index(&mut self, tag_index: Option<TagIndex>) {
        self.tag_index = tag_index;
    }

    /// Features of the code compatible with this tag, with divergent
    /// features left unspecified, and the number of compatible codes.
    fn match_codes(&self) -> (usize, Vec<FeatureValue>) {
        let discr = self.pos.discr_count();
        let mut count = 0;
        let mut matching = vec![FeatureValue::UNSPECIFIED; discr];

        for code in self.pos.codes() {
            let compatible = (0..discr).all(|i| {
                let f = self.feature(i);
                f.is_unspecified() || f == code[i]
            });
            if !compatible {
                continue;
            }
            if count == 0 {
                matching.copy_from_slice(&code[..discr]);
            } else {
                for (m, c) in matching.iter_mut().zip(code.iter()) {
                    if m != c {
                        *m = FeatureValue::UNSPECIFIED;
                    }
                }
            }
            count += 1;
        }
        (count, matching)
    }

    /// True if the feature vector is compatible with at least one code.
    pub fn matches_codes(&self) -> bool {
        self.match_codes().0 > 0
    }

    /// Recomputes the kind from the features and the lemma.
    ///
    /// Returns false if no code of the part of speech is compatible, in
    /// which case the tag is invalid and must be dropped.
    pub fn retype(&mut self) -> bool {
        let discr = self.pos.discr_count();
        if !self.pos.codes().is_empty() {
            let (count, matching) = self.match_codes();
            match count {
                0 => return false,
                1 => self.features[..discr].copy_from_slice(&matching),
                _ => {
                    for (f, m) in self.features.iter_mut().zip(matching.iter()) {
                        if f.is_unspecified() {
                            *f = *m;
                        }
                    }
                }
            }
        }

        let complete = self.features[..discr].iter().all(|f| !f.is_unspecified());
        self.kind = match (complete, &self.lemma) {
            (true, Lemma::Negative(_)) => TagKind::CodeNeg,
            (true, l) if l.lemma().is_some() => TagKind::Atom,
            (true, _) => TagKind::Code,
            (false, Lemma::Negative(_)) => TagKind::IncNeg,
            (false, l) if l.lemma().is_some() => TagKind::IncCan,
            (false, _) => TagKind::Inc,
        };
        true
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Tag) -> bool {
        self.kind == other.kind
            && self.pos.index() == other.pos.index()
            && self.features == other.features
            && self.lemma == other.lemma
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.pos.index().hash(state);
        self.features.hash(state);
        self.lemma.hash(state);
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("kind", &self.kind)
            .field("pos", &self.pos.name())
            .field("features", &self.features)
            .field("lemma", &self.lemma)
            .field("tag_index", &self.tag_index)
            .finish()
    }
}

/// One alternative on a transition.
///
/// Equality ignores text tag indices, like [`ops::symbol_compare`].
#[derive(Clone, Debug)]
pub enum Symbol {
    /// Anything.
    Lexic,
    /// The empty word, with the text tag it came from.
    Epsilon(Option<TagIndex>),
    /// `<!>`.
    Exclam,
    /// `<=>`.
    Equal,
    /// A part of speech tag.
    Tag(Tag),
}

impl Symbol {
    /// Kind of the symbol; tags report their own kind.
    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Lexic => SymbolKind::Lexic,
            Symbol::Epsilon(_) => SymbolKind::Epsilon,
            Symbol::Exclam => SymbolKind::Exclam,
            Symbol::Equal => SymbolKind::Equal,
            Symbol::Tag(tag) => tag.kind.symbol_kind(),
        }
    }

    /// Every symbol of a part of speech.
    pub fn new_pos(pos: &Arc<Pos>, tag_index: Option<TagIndex>) -> Option<Symbol> {
        Tag::new(pos, tag_index).map(Symbol::Tag)
    }

    /// A punctuation mark.
    pub fn punc(language: &mut Language, mark: &str, tag_index: Option<TagIndex>) -> Symbol {
        let lemma = language.add_form(mark);
        Symbol::Tag(Tag::bare_atom(language.punc_pos(), lemma, tag_index))
    }

    /// A digit sequence.
    pub fn chfa(language: &mut Language, digits: &str, tag_index: Option<TagIndex>) -> Symbol {
        let lemma = language.add_form(digits);
        Symbol::Tag(Tag::bare_atom(language.chfa_pos(), lemma, tag_index))
    }

    /// A word missing from the dictionaries.
    pub fn unknown(language: &mut Language, form: &str, tag_index: Option<TagIndex>) -> Symbol {
        let lemma = language.add_form(form);
        Symbol::Tag(Tag::bare_atom(language.unknown_pos(), lemma, tag_index))
    }

    /// The tag, if this is one.
    #[inline(always)]
    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Symbol::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    /// Part of speech of a tag.
    pub fn pos(&self) -> Option<&Arc<Pos>> {
        self.as_tag().map(|t| t.pos())
    }

    /// Index of the text tag the symbol was read from, if any.
    pub fn tag_index(&self) -> Option<TagIndex> {
        match self {
            Symbol::Epsilon(index) => *index,
            Symbol::Tag(tag) => tag.tag_index,
            _ => None,
        }
    }

    /// True for LEXIC.
    #[inline(always)]
    pub fn is_lexic(&self) -> bool {
        matches!(self, Symbol::Lexic)
    }

    /// True for epsilon.
    #[inline(always)]
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon(_))
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Symbol) -> bool {
        match (self, other) {
            (Symbol::Tag(a), Symbol::Tag(b)) => a == b,
            (Symbol::Epsilon(_), Symbol::Epsilon(_)) => true,
            (a, b) => a.kind() == b.kind(),
        }
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        if let Symbol::Tag(tag) = self {
            tag.hash(state);
        }
    }
}

impl From<Tag> for Symbol {
    fn from(tag: Tag) -> Symbol {
        Symbol::Tag(tag)
    }
}

/// Types every tag, dropping the invalid ones.
pub(crate) fn type_and_clean(tags: Vec<Tag>) -> Vec<Symbol> {
    tags.into_iter()
        .filter_map(|mut tag| if tag.retype() { Some(Symbol::Tag(tag)) } else { None })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_language;

    fn set(tag: &mut Tag, name: &str) {
        let info = *tag.pos().value_info(name).unwrap();
        tag.set_feature(info.category, info.value);
    }

    #[test]
    fn ranks_follow_symbol_order() {
        let ranked = [
            SymbolKind::Lexic,
            SymbolKind::Epsilon,
            SymbolKind::Atom,
            SymbolKind::CodeNeg,
            SymbolKind::Code,
            SymbolKind::IncCan,
            SymbolKind::IncNeg,
            SymbolKind::Inc,
        ];
        for pair in ranked.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
        }
        assert_eq!(SymbolKind::Exclam.rank(), None);
        assert_eq!(SymbolKind::Equal.rank(), None);
    }

    #[test]
    fn whole_pos_is_incomplete() {
        let language = test_language();
        let v = Tag::new(language.pos_by_name("V").unwrap(), None).unwrap();
        assert_eq!(v.kind(), TagKind::Inc);

        // no categories at all: complete
        let adv = Tag::new(language.pos_by_name("ADV").unwrap(), None).unwrap();
        assert_eq!(adv.kind(), TagKind::Code);
    }

    #[test]
    fn single_matching_code_completes_the_tag() {
        let language = test_language();
        let det = language.pos_by_name("DET").unwrap();

        // indef only exists in the singular
        let mut tag = Tag::untyped(det, None);
        set(&mut tag, "indef");
        assert!(tag.retype());
        assert_eq!(tag.kind(), TagKind::Code);
        assert_eq!(tag.feature(0), det.inflectional_value('s').unwrap().value);

        // plural only exists for def
        let mut tag = Tag::untyped(det, None);
        set(&mut tag, "p");
        assert!(tag.retype());
        assert_eq!(tag.kind(), TagKind::Code);
        assert_eq!(tag.feature(1), det.semantic_value("def").unwrap().value);

        // singular stays ambiguous between def and indef
        let mut tag = Tag::untyped(det, None);
        set(&mut tag, "s");
        assert!(tag.retype());
        assert_eq!(tag.kind(), TagKind::Inc);
        assert!(tag.feature(1).is_unspecified());
    }

    #[test]
    fn impossible_combination_is_invalid() {
        let language = test_language();
        let det = language.pos_by_name("DET").unwrap();
        let mut tag = Tag::untyped(det, None);
        set(&mut tag, "indef");
        set(&mut tag, "p");
        assert!(!tag.retype());
        assert!(!tag.matches_codes());

        let mut tag = Tag::untyped(det, None);
        tag.set_feature(0, FeatureValue::LOCKED);
        assert!(!tag.retype());
    }

    #[test]
    fn lemma_decides_the_variant() {
        let mut language = test_language();
        let chat = language.add_form("chat");
        let n = language.pos_by_name("N").unwrap().clone();

        let mut tag = Tag::untyped(&n, None);
        tag.set_lemma(Lemma::canonical(chat));
        assert!(tag.retype());
        assert_eq!(tag.kind(), TagKind::IncCan);

        set(&mut tag, "m");
        set(&mut tag, "s");
        assert!(tag.retype());
        assert_eq!(tag.kind(), TagKind::Atom);

        tag.set_lemma(Lemma::negative(vec![chat]));
        assert!(tag.retype());
        assert_eq!(tag.kind(), TagKind::CodeNeg);
    }

    #[test]
    fn type_and_clean_drops_invalid_tags() {
        let language = test_language();
        let det = language.pos_by_name("DET").unwrap();
        let mut bad = Tag::untyped(det, None);
        set(&mut bad, "indef");
        set(&mut bad, "p");
        let good = Tag::untyped(det, None);
        let cleaned = type_and_clean(vec![bad, good]);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].kind(), SymbolKind::Inc);
    }

    #[test]
    fn negative_lemmas_are_sorted() {
        let lemma = Lemma::negative(vec![FormId::new(5), FormId::new(2), FormId::new(5)]);
        assert_eq!(lemma.excluded(), &[FormId::new(2), FormId::new(5)]);
        assert!(lemma.excludes(FormId::new(2)));
        assert!(!lemma.excludes(FormId::new(3)));
        assert_eq!(lemma.lemma(), None);
    }

    #[test]
    fn predefined_atoms() {
        let mut language = test_language();
        let p = Symbol::punc(&mut language, ",", Some(TagIndex::new(3)));
        assert_eq!(p.kind(), SymbolKind::Atom);
        assert_eq!(p.pos().unwrap().name(), "PNC");
        assert_eq!(p.tag_index(), Some(TagIndex::new(3)));
        assert_eq!(Symbol::punc(&mut language, ",", None), p);
        assert_ne!(Symbol::chfa(&mut language, ",", None), p);
    }
}
