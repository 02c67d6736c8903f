//! Reading symbols from automaton labels and writing them back.
//!
//! Grammar labels look like `<lemma.POS+sem!cat:infl:infl>`, text labels
//! are dictionary entries like `{form,lemma.POS+sem:infl}` or raw tokens.

use std::fmt::Write;

use super::ops::lexic_minus_pos;
use super::{Lemma, Symbol, SymbolError, SymbolKind, Tag};
use crate::constants::{LABEL_ESCAPED, PUNC_TAB};
use crate::language::{Language, Pos};
use crate::types::{FeatureValue, TagIndex};

/// Label of a default transition.
pub const DEFAULT_LABEL: &str = "<def>";

/// Label written for LEXIC. Grammars cannot use it, but serialised
/// automata do.
pub const LEXIC_LABEL: &str = "<.>";

type Result<T> = std::result::Result<T, SymbolError>;

fn bad(label: &str) -> SymbolError {
    SymbolError::BadLabel(label.to_string())
}

/// Splits at the first unescaped char of `stops`. The rest starts with
/// that char, or is empty.
fn split_unescaped<'a>(input: &'a str, stops: &[char]) -> (&'a str, &'a str) {
    let mut escaped = false;
    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if stops.contains(&c) {
            return (&input[..i], &input[i..]);
        }
    }
    (input, "")
}

fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(chars.next().unwrap_or('\\')),
            c => out.push(c),
        }
    }
    out
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if LABEL_ESCAPED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// A dictionary entry split into its parts.
#[derive(Debug, PartialEq)]
struct DicEntry {
    form: String,
    lemma: String,
    /// Part of speech first, then semantic codes.
    codes: Vec<String>,
    inflections: Vec<String>,
}

impl DicEntry {
    fn parse(label: &str) -> Result<DicEntry> {
        let inner = label
            .strip_prefix('{')
            .and_then(|l| l.strip_suffix('}'))
            .ok_or_else(|| bad(label))?;

        let (form, rest) = split_unescaped(inner, &[',']);
        let rest = rest.strip_prefix(',').ok_or_else(|| bad(label))?;
        let (lemma, rest) = split_unescaped(rest, &['.']);
        let mut rest = rest.strip_prefix('.').ok_or_else(|| bad(label))?;

        let mut codes = vec![];
        loop {
            let (code, r) = split_unescaped(rest, &['+', ':']);
            codes.push(unescape(code));
            match r.strip_prefix('+') {
                Some(r) => rest = r,
                None => {
                    rest = r;
                    break;
                }
            }
        }

        let mut inflections = vec![];
        while let Some(r) = rest.strip_prefix(':') {
            let (code, r) = split_unescaped(r, &[':']);
            inflections.push(unescape(code));
            rest = r;
        }

        let form = unescape(form);
        if form.is_empty() || codes.iter().any(|c| c.is_empty()) {
            return Err(bad(label));
        }
        let lemma = match unescape(lemma) {
            l if l.is_empty() => form.clone(),
            l => l,
        };
        Ok(DicEntry {
            form,
            lemma,
            codes,
            inflections,
        })
    }
}

fn load_dic_entry(
    language: &mut Language,
    label: &str,
    entry: &DicEntry,
    tag_index: Option<TagIndex>,
) -> Vec<Symbol> {
    let pos = match language.pos_by_name(&entry.codes[0]) {
        Some(pos) => pos.clone(),
        None => {
            if language.report_once(&entry.codes[0]) {
                log::warn!("'{}': unknown POS '{}'", label, entry.codes[0]);
            }
            return vec![];
        }
    };

    let mut model = Tag::untyped(&pos, tag_index);
    model.set_lemma(Lemma::Positive {
        form: language.add_form(&entry.form),
        lemma: language.add_form(&entry.lemma),
    });
    for i in 0..pos.category_count() {
        model.set_feature(i, FeatureValue::LOCKED);
    }
    for code in &entry.codes[1..] {
        match pos.semantic_value(code) {
            Some(info) => model.set_feature(info.category, info.value),
            None => {
                if language.report_once(code) {
                    log::warn!(
                        "Unknown semantic value '{}', will not be taken into account",
                        code
                    );
                }
            }
        }
    }

    let mut variants = vec![];
    if entry.inflections.is_empty() {
        variants.push(model);
    } else {
        for code in &entry.inflections {
            let mut tag = model.clone();
            for c in code.chars() {
                match pos.inflectional_value(c) {
                    Some(info) => tag.set_feature(info.category, info.value),
                    None => {
                        log::warn!("'{}': unknown inflectional code '{}'", label, c);
                        return vec![];
                    }
                }
            }
            variants.push(tag);
        }
    }

    let mut symbols = Vec::with_capacity(variants.len());
    for mut tag in variants {
        if !tag.retype() {
            if language.report_once(label) {
                log::warn!("'{}': doesn't match with POS '{}' definition", label, pos.name());
            }
            return vec![];
        }
        symbols.push(Symbol::Tag(tag));
    }
    symbols
}

/// Reads a punctuation mark, a digit sequence or an unknown word.
fn load_token(
    language: &mut Language,
    label: &str,
    tag_index: Option<TagIndex>,
    in_grammar: bool,
) -> Result<Symbol> {
    let mut chars = label.chars();
    let first = chars.next().ok_or_else(|| bad(label))?;
    let rest = chars.count();

    if PUNC_TAB.contains(&first) {
        let valid = if first == '\\' { rest == 1 } else { rest == 0 };
        if !valid {
            return Err(bad(label));
        }
        return Ok(Symbol::punc(language, label, tag_index));
    }
    if first.is_ascii_digit() {
        if !label.chars().all(|c| c.is_ascii_digit()) {
            return Err(bad(label));
        }
        return Ok(Symbol::chfa(language, label, tag_index));
    }
    if in_grammar {
        log::warn!("Label '{}': unknown word in grammar", label);
    }
    Ok(Symbol::unknown(language, label, tag_index))
}

fn load_gram_symbol(language: &mut Language, label: &str) -> Result<Vec<Symbol>> {
    let inner = label
        .strip_prefix('<')
        .and_then(|l| l.strip_suffix('>'))
        .ok_or_else(|| bad(label))?;

    let (lemma, body) = match split_unescaped(inner, &['.']) {
        (lemma, rest) if rest.starts_with('.') => (lemma, &rest[1..]),
        _ => ("", inner),
    };

    if let Some(name) = body.strip_prefix('!') {
        if !lemma.is_empty() {
            log::warn!(
                "Unexpected lemma in negative grammar tag '{}': lemma will be ignored",
                label
            );
        }
        let pos = language
            .pos_by_name(name)
            .cloned()
            .ok_or_else(|| SymbolError::UnknownPos {
                label: label.to_string(),
                pos: name.to_string(),
            })?;
        return Ok(lexic_minus_pos(language, &pos));
    }

    let (pos_name, mut rest) = split_unescaped(body, &['+', '!', ':']);
    let pos_name = unescape(pos_name);
    let pos = language
        .pos_by_name(&pos_name)
        .cloned()
        .ok_or_else(|| SymbolError::UnknownPos {
            label: label.to_string(),
            pos: pos_name.clone(),
        })?;

    let mut model = Tag::untyped(&pos, None);
    if let Some(list) = lemma.strip_prefix('!') {
        let mut excluded = vec![];
        let mut list = list;
        loop {
            let (name, r) = split_unescaped(list, &['!']);
            if name.is_empty() {
                return Err(bad(label));
            }
            excluded.push(language.add_form(&unescape(name)));
            match r.strip_prefix('!') {
                Some(r) => list = r,
                None => break,
            }
        }
        model.set_lemma(Lemma::negative(excluded));
    } else if !lemma.is_empty() {
        model.set_lemma(Lemma::canonical(language.add_form(&unescape(lemma))));
    }

    while let Some(op) = rest.chars().next().filter(|c| *c == '+' || *c == '!') {
        let (name, r) = split_unescaped(&rest[1..], &['+', '!', ':']);
        rest = r;
        let name = unescape(name);
        if op == '+' {
            match pos.semantic_value(&name) {
                Some(info) => model.set_feature(info.category, info.value),
                None => {
                    if language.report_once(&name) {
                        log::warn!(
                            "In symbol '{}': unknown attribute '{}', will not be taken into account",
                            label,
                            name
                        );
                    }
                }
            }
            continue;
        }

        let index = pos
            .category_id(&name)
            .ok_or_else(|| SymbolError::UnknownFeature {
                label: label.to_string(),
                feature: name.clone(),
            })?;
        if index < pos.inflect_count() {
            return Err(SymbolError::LockedInflection {
                label: label.to_string(),
                feature: name,
            });
        }
        if !model.feature(index).is_unspecified() {
            return Err(SymbolError::LockedAndSet {
                label: label.to_string(),
                feature: name,
            });
        }
        model.set_feature(index, FeatureValue::LOCKED);
    }

    if rest.is_empty() {
        if !model.retype() {
            return Err(SymbolError::InvalidTag(label.to_string()));
        }
        return Ok(vec![Symbol::Tag(model)]);
    }

    let mut symbols = vec![];
    while let Some(r) = rest.strip_prefix(':') {
        let (code, r) = split_unescaped(r, &[':']);
        rest = r;

        let mut tag = model.clone();
        let mut chars = code.chars();
        while let Some(c) = chars.next() {
            let (c, locked) = match c {
                '@' => (chars.next().ok_or_else(|| bad(label))?, true),
                c => (c, false),
            };
            let info = pos
                .inflectional_value(c)
                .ok_or_else(|| SymbolError::UnknownInflection {
                    label: label.to_string(),
                    code: c,
                })?;
            let value = if locked { FeatureValue::LOCKED } else { info.value };
            tag.set_feature(info.category, value);
        }
        if !tag.retype() {
            return Err(SymbolError::InvalidTag(label.to_string()));
        }
        symbols.push(Symbol::Tag(tag));
    }
    Ok(symbols)
}

fn is_predefined(language: &Language, pos: &Pos) -> bool {
    [language.unknown_pos(), language.punc_pos(), language.chfa_pos()]
        .iter()
        .any(|p| p.index() == pos.index())
}

/// Appends `+value` for set semantic features, and `!category` for locked
/// ones when `locks` is set.
fn write_semantic(out: &mut String, tag: &Tag, locks: bool) {
    let pos = tag.pos();
    for i in pos.inflect_count()..tag.features().len() {
        let value = tag.feature(i);
        let cat = match pos.category(i) {
            Some(cat) => cat,
            None => continue,
        };
        if let Some(name) = cat.value_name(value) {
            let _ = write!(out, "+{}", name);
        } else if locks && value.is_locked() {
            let _ = write!(out, "!{}", cat.name());
        }
    }
}

/// Appends the inflectional features after a single `:`, if any is set.
fn write_inflection(out: &mut String, tag: &Tag, locks: bool) {
    let pos = tag.pos();
    let mut colon = false;
    for i in 0..pos.inflect_count() {
        let value = tag.feature(i);
        let cat = match pos.category(i) {
            Some(cat) => cat,
            None => continue,
        };
        let text = match cat.value_name(value) {
            Some(name) => name.to_string(),
            None if locks && value.is_locked() => {
                format!("@{}", cat.value_name(FeatureValue::new(1)).unwrap_or(""))
            }
            None => continue,
        };
        if !colon {
            out.push(':');
            colon = true;
        }
        out.push_str(&text);
    }
}

impl Symbol {
    /// Reads a symbol from an ELAG grammar label.
    ///
    /// A label can stand for several symbols, one per inflectional code
    /// (`<A:ms:fs>`), or for every other part of speech (`<!A>`).
    pub fn parse_grammar(language: &mut Language, label: &str) -> Result<Vec<Symbol>> {
        if label.is_empty() {
            return Err(bad(label));
        }
        if label == "{S}" {
            return Ok(vec![Symbol::punc(language, label, None)]);
        }
        if label.starts_with('{') && label.len() > 1 {
            log::warn!("'{}': DELAF entry should not appear in Elag grammar", label);
            let entry = DicEntry::parse(label)?;
            return Ok(load_dic_entry(language, label, &entry, None));
        }
        if label.starts_with('<') && label.len() > 1 {
            return match label {
                "<E>" => Ok(vec![Symbol::Epsilon(None)]),
                LEXIC_LABEL => Err(bad(label)),
                DEFAULT_LABEL => Err(SymbolError::DefaultMarker),
                "<!>" => Ok(vec![Symbol::Exclam]),
                "<=>" => Ok(vec![Symbol::Equal]),
                _ => load_gram_symbol(language, label),
            };
        }
        match label {
            "!" => Ok(vec![Symbol::Exclam]),
            "=" => Ok(vec![Symbol::Equal]),
            _ => Ok(vec![load_token(language, label, None, true)?]),
        }
    }

    /// Reads a symbol from a text automaton label, remembering the index of
    /// the text tag it comes from.
    ///
    /// Dictionary entries that do not fit the tagset are dropped with a
    /// warning and yield no symbol.
    pub fn parse_text(
        language: &mut Language,
        label: &str,
        tag_index: Option<TagIndex>,
    ) -> Result<Vec<Symbol>> {
        match label {
            "" => Err(bad(label)),
            "<E>" => Ok(vec![Symbol::Epsilon(tag_index)]),
            DEFAULT_LABEL => Err(SymbolError::DefaultMarker),
            "{S}" => Ok(vec![Symbol::punc(language, label, tag_index)]),
            l if l.starts_with('{') && l.len() > 1 => {
                Symbol::parse_dic_entry(language, label, tag_index)
            }
            _ => Ok(vec![load_token(language, label, tag_index, false)?]),
        }
    }

    /// Reads a `{form,lemma.POS+sem:infl}` dictionary entry.
    pub fn parse_dic_entry(
        language: &mut Language,
        label: &str,
        tag_index: Option<TagIndex>,
    ) -> Result<Vec<Symbol>> {
        let entry = DicEntry::parse(label)?;
        Ok(load_dic_entry(language, label, &entry, tag_index))
    }

    /// The grammar label that reads back as this symbol.
    pub fn grammar_label(&self, language: &Language) -> String {
        let tag = match self {
            Symbol::Lexic => return LEXIC_LABEL.into(),
            Symbol::Epsilon(_) => return "<E>".into(),
            Symbol::Exclam => return "<!>".into(),
            Symbol::Equal => return "<=>".into(),
            Symbol::Tag(tag) => tag,
        };

        let mut out = String::from("<");
        match tag.lemma() {
            Lemma::Negative(excluded) => {
                for id in excluded {
                    let _ = write!(out, "!{}", escape(language.form(*id)));
                }
                out.push('.');
            }
            lemma => {
                if let Some(id) = lemma.lemma() {
                    let _ = write!(out, "{}.", escape(language.form(id)));
                }
            }
        }
        out.push_str(tag.pos().name());
        write_semantic(&mut out, tag, true);
        write_inflection(&mut out, tag, true);
        out.push('>');
        out
    }

    /// The text label of an atom, as written into text automata.
    pub fn text_label(&self, language: &Language) -> Result<String> {
        let tag = match self {
            Symbol::Tag(tag) if self.kind() == SymbolKind::Atom => tag,
            _ => return Err(SymbolError::NotAnAtom(self.dump(language))),
        };
        let lemma = tag.lemma().lemma().map(|id| language.form(id)).unwrap_or("");
        if is_predefined(language, tag.pos()) {
            return Ok(lemma.to_string());
        }
        let form = tag.lemma().form().map(|id| language.form(id)).unwrap_or("");

        let mut out = format!("{{{},{}.{}", form, lemma, tag.pos().name());
        write_semantic(&mut out, tag, false);
        write_inflection(&mut out, tag, false);
        out.push('}');
        Ok(out)
    }

    /// The label used in Locate patterns. Lemma exclusions and locked
    /// features cannot be expressed and are left out.
    pub fn locate_label(&self, language: &Language) -> Result<String> {
        let tag = match self {
            Symbol::Lexic => return Ok(LEXIC_LABEL.into()),
            Symbol::Epsilon(_) => return Ok("<E>".into()),
            Symbol::Exclam | Symbol::Equal => {
                return Err(SymbolError::InvalidType {
                    op: "locate label",
                    kind: self.kind(),
                })
            }
            Symbol::Tag(tag) => tag,
        };

        let pos = tag.pos();
        if pos.index() == language.unknown_pos().index() {
            return Ok("<!DIC>".into());
        }
        if is_predefined(language, pos) {
            if let Some(id) = tag.lemma().lemma() {
                return Ok(language.form(id).to_string());
            }
        }

        let mut out = String::from("<");
        if let Some(id) = tag.lemma().lemma() {
            let _ = write!(out, "{}.", language.form(id));
        }
        out.push_str(pos.name());
        write_semantic(&mut out, tag, false);
        write_inflection(&mut out, tag, false);
        out.push('>');
        Ok(out)
    }

    /// Debug rendering showing the kind and every feature slot.
    pub fn dump(&self, language: &Language) -> String {
        let tag = match self {
            Symbol::Tag(tag) => tag,
            _ => return self.grammar_label(language),
        };
        let pos = tag.pos();

        let mut out = format!("<{}:", self.kind());
        match tag.lemma() {
            Lemma::Negative(excluded) => {
                for id in excluded {
                    let _ = write!(out, "!{}({})", language.form(*id), id.index());
                }
            }
            lemma => {
                if let Some(id) = lemma.form() {
                    let _ = write!(out, "{},", language.form(id));
                }
                if let Some(id) = lemma.lemma() {
                    out.push_str(language.form(id));
                }
            }
        }
        let _ = write!(out, ".{}", pos.name());
        write_semantic(&mut out, tag, true);
        out.push(':');
        for i in 0..pos.inflect_count() {
            let value = tag.feature(i);
            let cat = match pos.category(i) {
                Some(cat) => cat,
                None => continue,
            };
            match cat.value_name(value) {
                Some(name) => out.push_str(name),
                None if value.is_locked() => {
                    let _ = write!(out, "!{{{}}}", cat.name());
                }
                None => {}
            }
        }
        out.push('>');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sym, test_language, text};

    fn grammar(language: &mut Language, label: &str) -> Result<Vec<Symbol>> {
        Symbol::parse_grammar(language, label)
    }

    #[test]
    fn grammar_labels_read_back() {
        let mut language = test_language();
        for label in [
            "<V:s>",
            "<V>",
            "<N+hum:ms>",
            "<chat.N:f>",
            "<!chat!chien.N:p>",
            "<N!sem>",
            "<chat.N!sem:m>",
            "<DET+def:p>",
            "<ADV>",
        ] {
            let s = sym(&mut language, label);
            let written = s.grammar_label(&language);
            assert_eq!(written, label);
            assert_eq!(sym(&mut language, &written), s);
        }
    }

    #[test]
    fn discriminative_values_are_completed() {
        let mut language = test_language();
        let det = sym(&mut language, "<DET:p>");
        assert_eq!(det.kind(), SymbolKind::Code);
        assert_eq!(det.grammar_label(&language), "<DET+def:p>");
    }

    #[test]
    fn one_symbol_per_inflectional_code() {
        let mut language = test_language();
        let symbols = grammar(&mut language, "<N:ms:fp>").unwrap();
        let labels: Vec<String> = symbols.iter().map(|s| s.grammar_label(&language)).collect();
        assert_eq!(labels, vec!["<N:ms>", "<N:fp>"]);
    }

    #[test]
    fn negated_pos_expands_to_the_others() {
        let mut language = test_language();
        let symbols = grammar(&mut language, "<!V>").unwrap();
        assert_eq!(symbols.len(), language.pos_list().len() - 1);
        assert!(symbols.iter().all(|s| s.pos().unwrap().name() != "V"));
    }

    #[test]
    fn special_grammar_labels() {
        let mut language = test_language();
        assert_eq!(grammar(&mut language, "<E>").unwrap(), vec![Symbol::Epsilon(None)]);
        assert_eq!(grammar(&mut language, "<!>").unwrap(), vec![Symbol::Exclam]);
        assert_eq!(grammar(&mut language, "<=>").unwrap(), vec![Symbol::Equal]);
        assert_eq!(grammar(&mut language, "!").unwrap(), vec![Symbol::Exclam]);
        assert_eq!(grammar(&mut language, "=").unwrap(), vec![Symbol::Equal]);
        assert!(matches!(
            grammar(&mut language, DEFAULT_LABEL),
            Err(SymbolError::DefaultMarker)
        ));
        assert!(matches!(grammar(&mut language, "<.>"), Err(SymbolError::BadLabel(_))));

        let s = sym(&mut language, "{S}");
        assert_eq!(s.pos().unwrap().name(), "PNC");
        assert_eq!(s.grammar_label(&language), "<\\{S\\}.PNC>");
    }

    #[test]
    fn grammar_label_errors() {
        let mut language = test_language();
        assert!(matches!(
            grammar(&mut language, "<X>"),
            Err(SymbolError::UnknownPos { .. })
        ));
        assert!(matches!(
            grammar(&mut language, "<!X>"),
            Err(SymbolError::UnknownPos { .. })
        ));
        assert!(matches!(
            grammar(&mut language, "<N!number>"),
            Err(SymbolError::LockedInflection { .. })
        ));
        assert!(matches!(
            grammar(&mut language, "<N+hum!sem>"),
            Err(SymbolError::LockedAndSet { .. })
        ));
        assert!(matches!(
            grammar(&mut language, "<N!foo>"),
            Err(SymbolError::UnknownFeature { .. })
        ));
        assert!(matches!(
            grammar(&mut language, "<N:x>"),
            Err(SymbolError::UnknownInflection { code: 'x', .. })
        ));
        assert!(matches!(
            grammar(&mut language, "<V:@s>"),
            Err(SymbolError::InvalidTag(_))
        ));
        assert!(matches!(
            grammar(&mut language, "<DET+indef:p>"),
            Err(SymbolError::InvalidTag(_))
        ));
    }

    #[test]
    fn unknown_semantic_value_is_ignored() {
        let mut language = test_language();
        let a = sym(&mut language, "<N+zzz>");
        let b = sym(&mut language, "<N>");
        assert_eq!(a, b);
    }

    #[test]
    fn escaped_lemmas() {
        let mut language = test_language();
        let s = sym(&mut language, "<a\\.b.N>");
        let lemma = s.as_tag().unwrap().lemma().lemma().unwrap();
        assert_eq!(language.form(lemma), "a.b");
        assert_eq!(s.grammar_label(&language), "<a\\.b.N>");
    }

    #[test]
    fn grammar_tokens() {
        let mut language = test_language();
        assert_eq!(sym(&mut language, ",").pos().unwrap().name(), "PNC");
        assert_eq!(sym(&mut language, "42").pos().unwrap().name(), "NB");
        assert_eq!(sym(&mut language, "maison").pos().unwrap().name(), "?");
        assert!(matches!(grammar(&mut language, ",;"), Err(SymbolError::BadLabel(_))));
        assert!(matches!(grammar(&mut language, "4x"), Err(SymbolError::BadLabel(_))));
    }

    #[test]
    fn dictionary_entries() {
        let mut language = test_language();
        let s = text(&mut language, "{chats,chat.N+hum:mp}");
        assert_eq!(s.kind(), SymbolKind::Atom);
        assert_eq!(s.text_label(&language).unwrap(), "{chats,chat.N+hum:mp}");
        assert_eq!(s.grammar_label(&language), "<chat.N+hum:mp>");

        let s = text(&mut language, "{les,le.DET+def:p}");
        assert_eq!(s.text_label(&language).unwrap(), "{les,le.DET+def:p}");

        // empty lemma stands for the form
        let s = text(&mut language, "{chat,.N:ms}");
        assert_eq!(s.text_label(&language).unwrap(), "{chat,chat.N:ms}");

        let symbols = Symbol::parse_text(&mut language, "{chats,chat.N:mp:fp}", None).unwrap();
        assert_eq!(symbols.len(), 2);
    }

    #[test]
    fn unmatched_dictionary_entries_are_dropped() {
        let mut language = test_language();
        assert_eq!(Symbol::parse_text(&mut language, "{x,y.FOO}", None).unwrap(), vec![]);
        // number left locked matches no code
        assert_eq!(Symbol::parse_text(&mut language, "{chat,.N}", None).unwrap(), vec![]);
        assert_eq!(Symbol::parse_text(&mut language, "{chat,.N:mz}", None).unwrap(), vec![]);
        assert!(matches!(
            Symbol::parse_text(&mut language, "{chat.N}", None),
            Err(SymbolError::BadLabel(_))
        ));
    }

    #[test]
    fn text_tokens() {
        let mut language = test_language();
        let index = Some(TagIndex::new(7));

        let e = Symbol::parse_text(&mut language, "<E>", index).unwrap();
        assert_eq!(e[0].tag_index(), index);

        let p = Symbol::parse_text(&mut language, "\\,", index).unwrap().remove(0);
        assert_eq!(p.pos().unwrap().name(), "PNC");
        assert_eq!(p.text_label(&language).unwrap(), "\\,");
        assert_eq!(p.tag_index(), index);

        let n = text(&mut language, "123");
        assert_eq!(n.text_label(&language).unwrap(), "123");
        assert_eq!(n.locate_label(&language).unwrap(), "123");

        let u = text(&mut language, "maison");
        assert_eq!(u.text_label(&language).unwrap(), "maison");
        assert_eq!(u.locate_label(&language).unwrap(), "<!DIC>");

        assert!(matches!(
            Symbol::parse_text(&mut language, ",,", None),
            Err(SymbolError::BadLabel(_))
        ));
        assert!(matches!(
            Symbol::parse_text(&mut language, "12a", None),
            Err(SymbolError::BadLabel(_))
        ));
        assert!(matches!(
            Symbol::parse_text(&mut language, DEFAULT_LABEL, None),
            Err(SymbolError::DefaultMarker)
        ));
    }

    #[test]
    fn locate_labels_drop_exclusions() {
        let mut language = test_language();
        let s = sym(&mut language, "<chat.N+hum:ms>");
        assert_eq!(s.locate_label(&language).unwrap(), "<chat.N+hum:ms>");
        let s = sym(&mut language, "<!chat.N!sem:f>");
        assert_eq!(s.locate_label(&language).unwrap(), "<N:f>");
        assert_eq!(Symbol::Lexic.locate_label(&language).unwrap(), "<.>");
        assert!(Symbol::Exclam.locate_label(&language).is_err());
    }

    #[test]
    fn only_atoms_have_text_labels() {
        let mut language = test_language();
        let s = sym(&mut language, "<N:f>");
        assert!(matches!(s.text_label(&language), Err(SymbolError::NotAnAtom(_))));
    }

    #[test]
    fn dump_shows_kind_and_slots() {
        let mut language = test_language();
        assert_eq!(sym(&mut language, "<V:s>").dump(&language), "<C:.V:s>");
        assert_eq!(sym(&mut language, "<N!sem>").dump(&language), "<I:.N!sem:>");
        let s = text(&mut language, "{chats,chat.N:mp}");
        assert_eq!(s.dump(&language), "<a:chats,chat.N!sem:mp>");
    }
}
