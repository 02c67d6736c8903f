//! Set operations over symbols.
//!
//! Symbols denote sets of concrete tags. All operations here keep lists
//! of symbols pairwise disjoint when their inputs are, and drop the
//! alternatives that match no code of their part of speech.

use std::cmp::Ordering;

use super::{type_and_clean, Lemma, Symbol, SymbolError, Tag};
use crate::language::{Language, Pos};
use crate::types::{FeatureValue, FormId, TagIndex};

type Result<T> = std::result::Result<T, SymbolError>;

/// Lemma constraint of a tag, by the family of its kind.
enum LemmaClass<'a> {
    Can(FormId),
    Neg(&'a [FormId]),
    Code,
}

fn class(tag: &Tag) -> LemmaClass<'_> {
    match tag.lemma() {
        Lemma::Negative(excluded) => LemmaClass::Neg(excluded),
        lemma => match lemma.lemma() {
            Some(id) => LemmaClass::Can(id),
            None => LemmaClass::Code,
        },
    }
}

fn rank(op: &'static str, s: &Symbol) -> Result<u8> {
    s.kind()
        .rank()
        .ok_or(SymbolError::InvalidType { op, kind: s.kind() })
}

fn check_operand(op: &'static str, s: &Symbol) -> Result<()> {
    rank(op, s)?;
    if s.is_epsilon() {
        return Err(SymbolError::Epsilon(op));
    }
    Ok(())
}

fn same_pos(a: &Tag, b: &Tag) -> bool {
    a.pos().index() == b.pos().index()
}

/// Tag index carried over to a result built from `a` and `b`.
/// At most one of them may come from a text automaton.
fn text_tag_index(op: &'static str, a: &Tag, b: &Tag) -> Result<Option<TagIndex>> {
    match (a.tag_index(), b.tag_index()) {
        (Some(_), Some(_)) => Err(SymbolError::TextTagConflict(op)),
        (x, y) => Ok(x.or(y)),
    }
}

fn compare_features(a: &Tag, b: &Tag) -> Ordering {
    let len = a.features().len().max(b.features().len());
    (0..len)
        .map(|i| a.feature(i).cmp(&b.feature(i)))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

fn compare_lemmas(a: &Lemma, b: &Lemma) -> Ordering {
    match (a, b) {
        (
            Lemma::Positive { form: fa, lemma: la },
            Lemma::Positive { form: fb, lemma: lb },
        ) => la.cmp(lb).then(fa.cmp(fb)),
        (Lemma::Negative(na), Lemma::Negative(nb)) => {
            na.len().cmp(&nb.len()).then_with(|| na.cmp(nb))
        }
        // Same kind implies same lemma family.
        (Lemma::Positive { .. }, Lemma::Negative(_)) => Ordering::Less,
        (Lemma::Negative(_), Lemma::Positive { .. }) => Ordering::Greater,
    }
}

/// Total order over symbols: kind rank, part of speech, features, then lemma.
///
/// Text tag indices do not take part in the comparison.
pub fn symbol_compare(a: &Symbol, b: &Symbol) -> Result<Ordering> {
    let (ra, rb) = (rank("compare", a)?, rank("compare", b)?);
    if ra != rb {
        return Ok(ra.cmp(&rb));
    }
    let (a, b) = match (a, b) {
        (Symbol::Tag(a), Symbol::Tag(b)) => (a, b),
        _ => return Ok(Ordering::Equal),
    };
    Ok(a.pos()
        .index()
        .cmp(&b.pos().index())
        .then_with(|| compare_features(a, b))
        .then_with(|| compare_lemmas(a.lemma(), b.lemma())))
}

/// True if every feature fixed by `b` has the same value in `a`.
fn in_traits(a: &Tag, b: &Tag) -> bool {
    same_pos(a, b)
        && (0..b.features().len()).all(|i| {
            let v = b.feature(i);
            v.is_unspecified() || v == a.feature(i)
        })
}

fn tag_in_tag(a: &Tag, b: &Tag) -> bool {
    if !same_pos(a, b) {
        return false;
    }
    match (class(a), class(b)) {
        (LemmaClass::Can(la), LemmaClass::Can(lb)) => la == lb && in_traits(a, b),
        (LemmaClass::Can(la), LemmaClass::Neg(_)) => in_traits(a, b) && !b.lemma().excludes(la),
        (LemmaClass::Neg(_), LemmaClass::Neg(nb)) => {
            in_traits(a, b) && nb.iter().all(|n| a.lemma().excludes(*n))
        }
        (_, LemmaClass::Code) => in_traits(a, b),
        (LemmaClass::Neg(_), LemmaClass::Can(_))
        | (LemmaClass::Code, LemmaClass::Can(_))
        | (LemmaClass::Code, LemmaClass::Neg(_)) => false,
    }
}

/// True if `a` is included in `b`.
pub fn symbol_in_symbol(a: &Symbol, b: &Symbol) -> Result<bool> {
    check_operand("in", a)?;
    check_operand("in", b)?;
    Ok(match (a, b) {
        (_, Symbol::Lexic) => true,
        (Symbol::Lexic, _) => false,
        (Symbol::Tag(a), Symbol::Tag(b)) => tag_in_tag(a, b),
        _ => false,
    })
}

/// Intersects the feature vectors of two tags of the same part of speech.
/// The result is untyped and carries no lemma.
fn inter_features(a: &Tag, b: &Tag) -> Option<Tag> {
    if !same_pos(a, b) {
        return None;
    }
    let mut res = Tag::untyped(a.pos(), a.tag_index().or_else(|| b.tag_index()));
    for i in 0..res.features().len() {
        let (fa, fb) = (a.feature(i), b.feature(i));
        let value = if fa.is_unspecified() {
            fb
        } else if fa.is_locked() {
            if fb.is_set() {
                return None;
            }
            FeatureValue::LOCKED
        } else {
            if fb != fa && !fb.is_unspecified() {
                return None;
            }
            fa
        };
        res.set_feature(i, value);
    }
    Some(res)
}

fn tag_inter_tag(a: &Tag, b: &Tag) -> Option<Tag> {
    let lemma = match (class(a), class(b)) {
        (LemmaClass::Can(_), LemmaClass::Can(_)) => {
            if a.lemma() != b.lemma() {
                return None;
            }
            a.lemma().clone()
        }
        (LemmaClass::Can(l), LemmaClass::Neg(_)) => {
            if b.lemma().excludes(l) {
                return None;
            }
            a.lemma().clone()
        }
        (LemmaClass::Neg(_), LemmaClass::Can(l)) => {
            if a.lemma().excludes(l) {
                return None;
            }
            b.lemma().clone()
        }
        (LemmaClass::Neg(na), LemmaClass::Neg(nb)) => {
            Lemma::negative(na.iter().chain(nb.iter()).copied())
        }
        (LemmaClass::Can(_), LemmaClass::Code) | (LemmaClass::Neg(_), LemmaClass::Code) => {
            a.lemma().clone()
        }
        (LemmaClass::Code, _) => b.lemma().clone(),
    };
    let mut res = inter_features(a, b)?;
    res.set_lemma(lemma);
    if res.retype() {
        Some(res)
    } else {
        None
    }
}

/// Intersection of two symbols, or `None` if it is empty.
pub fn symbol_inter_symbol(a: &Symbol, b: &Symbol) -> Result<Option<Symbol>> {
    check_operand("inter", a)?;
    check_operand("inter", b)?;
    Ok(match (a, b) {
        (Symbol::Lexic, b) => Some(b.clone()),
        (a, Symbol::Lexic) => Some(a.clone()),
        (Symbol::Tag(a), Symbol::Tag(b)) => tag_inter_tag(a, b).map(Symbol::Tag),
        _ => None,
    })
}

/// `a ∩ (b1 ∪ b2 ∪ ...)`
pub fn symbol_inter_symbols(a: &Symbol, bs: &[Symbol]) -> Result<Vec<Symbol>> {
    let mut res = vec![];
    for b in bs {
        if let Some(s) = symbol_inter_symbol(a, b)? {
            res.push(s);
        }
    }
    Ok(res)
}

/// Pairwise intersection of two lists.
pub fn symbols_inter_symbols(xs: &[Symbol], ys: &[Symbol]) -> Result<Vec<Symbol>> {
    let mut res = vec![];
    for x in xs {
        res.extend(symbol_inter_symbols(x, ys)?);
    }
    Ok(res)
}

/// Splits `a` on every feature that `b` fixes and `a` leaves open.
///
/// Returns one untyped tag per alternative value, `LOCKED` included,
/// each agreeing with `b` on the features already split. Requires `b ⊆ a`
/// on features.
fn minus_traits(a: &Tag, b: &Tag) -> Result<Vec<Tag>> {
    let tag_index = text_tag_index("minus", a, b)?;
    if !same_pos(a, b) {
        return Err(SymbolError::PosMismatch("minus"));
    }

    let mut template = Tag::untyped(a.pos(), tag_index);
    for (i, v) in a.features().iter().enumerate() {
        template.set_feature(i, *v);
    }

    let mut res = vec![];
    for idx in 0..b.features().len() {
        let (fa, fb) = (a.feature(idx), b.feature(idx));
        if fa == fb {
            continue;
        }
        if !fa.is_unspecified() {
            return Err(SymbolError::NotIncluded);
        }
        let size = a.pos().category(idx).map(|c| c.len()).unwrap_or(0);
        for v in (-1..size as i8).map(FeatureValue::new) {
            if v.is_unspecified() || v == fb {
                continue;
            }
            template.set_feature(idx, v);
            res.push(template.clone());
        }
        template.set_feature(idx, fb);
    }
    Ok(res)
}

fn with_lemma(mut tags: Vec<Tag>, lemma: &Lemma) -> Vec<Tag> {
    for tag in tags.iter_mut() {
        tag.set_lemma(lemma.clone());
    }
    tags
}

/// `b`'s features with another lemma constraint.
fn retarget(b: &Tag, tag_index: Option<TagIndex>, lemma: Lemma) -> Tag {
    let mut res = b.clone();
    res.set_tag_index(tag_index);
    res.set_lemma(lemma);
    res
}

fn tag_minus_tag(a: &Tag, b: &Tag) -> Result<Vec<Symbol>> {
    let tags = match (class(a), class(b)) {
        (LemmaClass::Can(_), LemmaClass::Can(_)) => with_lemma(minus_traits(a, b)?, a.lemma()),
        (LemmaClass::Neg(na), LemmaClass::Can(lb)) => {
            let tag_index = text_tag_index("minus", a, b)?;
            let mut res = vec![retarget(
                b,
                tag_index,
                Lemma::negative(na.iter().copied().chain(std::iter::once(lb))),
            )];
            res.extend(with_lemma(minus_traits(a, b)?, a.lemma()));
            res
        }
        (LemmaClass::Neg(_), LemmaClass::Neg(nb)) => {
            let tag_index = text_tag_index("minus", a, b)?;
            let mut res: Vec<Tag> = nb
                .iter()
                .filter(|n| !a.lemma().excludes(**n))
                .map(|n| retarget(b, tag_index, Lemma::canonical(*n)))
                .collect();
            res.extend(with_lemma(minus_traits(a, b)?, a.lemma()));
            res
        }
        (LemmaClass::Neg(_), LemmaClass::Code) => with_lemma(minus_traits(a, b)?, a.lemma()),
        (LemmaClass::Code, LemmaClass::Can(lb)) => {
            let tag_index = text_tag_index("minus", a, b)?;
            let mut res = vec![retarget(b, tag_index, Lemma::negative(vec![lb]))];
            res.extend(minus_traits(a, b)?);
            res
        }
        (LemmaClass::Code, LemmaClass::Neg(nb)) => {
            let tag_index = text_tag_index("minus", a, b)?;
            let mut res: Vec<Tag> = nb
                .iter()
                .map(|n| retarget(b, tag_index, Lemma::canonical(*n)))
                .collect();
            res.extend(minus_traits(a, b)?);
            res
        }
        (LemmaClass::Code, LemmaClass::Code) => minus_traits(a, b)?,
        (LemmaClass::Can(_), _) => {
            return Err(SymbolError::ImpossibleMinus {
                minuend: a.kind().symbol_kind(),
                subtrahend: b.kind().symbol_kind(),
            })
        }
    };
    Ok(type_and_clean(tags))
}

/// `a \ b`, where `b` must be included in `a`.
pub fn minus_included(language: &Language, a: &Symbol, b: &Symbol) -> Result<Vec<Symbol>> {
    rank("minus", a)?;
    rank("minus", b)?;
    match (a, b) {
        (Symbol::Epsilon(_), Symbol::Epsilon(_)) | (Symbol::Lexic, Symbol::Lexic) => {
            return Ok(vec![])
        }
        (Symbol::Epsilon(_), _) | (_, Symbol::Epsilon(_)) => {
            return Err(SymbolError::Epsilon("minus"))
        }
        _ => {}
    }
    if !symbol_in_symbol(b, a)? {
        return Err(SymbolError::NotIncluded);
    }
    match (a, b) {
        (Symbol::Lexic, Symbol::Tag(b)) => lexic_minus_symbol(language, b),
        (Symbol::Tag(a), Symbol::Tag(b)) => {
            if !same_pos(a, b) {
                return Err(SymbolError::PosMismatch("minus"));
            }
            tag_minus_tag(a, b)
        }
        (_, b) => Err(SymbolError::InvalidType {
            op: "minus",
            kind: b.kind(),
        }),
    }
}

/// Everything of `b`'s part of speech that is not in `b`.
fn pos_minus_symbol(language: &Language, b: &Tag) -> Result<Vec<Symbol>> {
    let pos = b.pos();
    if pos.codes().is_empty() {
        return match Tag::new(pos, None) {
            Some(whole) => symbol_minus_symbol(language, &Symbol::Tag(whole), &Symbol::Tag(b.clone())),
            None => Ok(vec![]),
        };
    }

    let b = Symbol::Tag(b.clone());
    let mut res = vec![];
    let mut found = false;
    for code in pos.codes() {
        let code = Symbol::Tag(Tag::from_code(pos, code));
        match symbol_inter_symbol(&b, &code)? {
            Some(inter) => {
                found = true;
                res.extend(symbol_minus_symbol(language, &code, &inter)?);
            }
            None => res.push(code),
        }
    }
    if !found {
        log::warn!("POS minus symbol: symbol doesn't match any code of {}", pos.name());
    }
    Ok(res)
}

/// Every symbol of the language except those in `b`.
pub fn lexic_minus_symbol(language: &Language, b: &Tag) -> Result<Vec<Symbol>> {
    let mut res = lexic_minus_pos(language, b.pos());
    res.extend(pos_minus_symbol(language, b)?);
    Ok(res)
}

/// One whole-POS symbol for every part of speech but `pos`.
pub fn lexic_minus_pos(language: &Language, pos: &Pos) -> Vec<Symbol> {
    language
        .pos_list()
        .iter()
        .filter(|p| p.index() != pos.index())
        .filter_map(|p| Symbol::new_pos(p, None))
        .collect()
}

/// `a \ b` for any two symbols.
pub fn symbol_minus_symbol(language: &Language, a: &Symbol, b: &Symbol) -> Result<Vec<Symbol>> {
    if symbol_in_symbol(b, a)? {
        return minus_included(language, a, b);
    }
    match symbol_inter_symbol(a, b)? {
        None => Ok(vec![a.clone()]),
        Some(inter) => minus_included(language, a, &inter),
    }
}

/// `a \ (b1 ∪ b2 ∪ ...)`
pub fn symbol_minus_symbols(language: &Language, a: &Symbol, bs: &[Symbol]) -> Result<Vec<Symbol>> {
    let mut res = vec![a.clone()];
    for b in bs {
        if res.is_empty() {
            break;
        }
        let minus = symbol_minus_symbol(language, a, b)?;
        res = symbols_inter_symbols(&res, &minus)?;
    }
    Ok(res)
}

/// What is left of `xs` once every symbol of `ys` is taken out.
pub fn symbols_minus_symbols(
    language: &Language,
    xs: &[Symbol],
    ys: &[Symbol],
) -> Result<Vec<Symbol>> {
    let mut res = vec![];
    for x in xs {
        res.extend(symbol_minus_symbols(language, x, ys)?);
    }
    Ok(res)
}

/// Removes `s` from every element of `list`.
///
/// `[<A:ms>, <A:mp>, <A:fs>, <A:fp>] \ <A:s>` is `[<A:mp>, <A:fp>]`.
pub fn symbols_minus_symbol(language: &Language, list: &[Symbol], s: &Symbol) -> Result<Vec<Symbol>> {
    let mut res = vec![];
    for x in list {
        res.extend(symbol_minus_symbol(language, x, s)?);
    }
    Ok(res)
}

/// Every symbol but `b`.
pub fn minus_symbol(language: &Language, b: &Symbol) -> Result<Vec<Symbol>> {
    minus_included(language, &Symbol::Lexic, b)
}

/// Every symbol but those in `bs`.
pub fn minus_symbols(language: &Language, bs: &[Symbol]) -> Result<Vec<Symbol>> {
    symbol_minus_symbols(language, &Symbol::Lexic, bs)
}
