//! Part of speech catalogs and the form table shared by all symbols.

use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::constants::{CHFA_POS, PUNC_POS, UNKNOWN_POS, UNSPECIFIED_VALUE};
use crate::types::{FeatureValue, FormId, PosIndex};

pub mod error;
pub mod tagset;

pub use self::error::LanguageError;
pub use self::tagset::{CategoryDefinition, PosDefinition, TagsetDefinition};

/// A named feature category and its values. Value 0 is always `unspecified`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    name: SmolStr,
    values: Vec<SmolStr>,
}

impl Category {
    fn new(name: SmolStr) -> Category {
        Category {
            name,
            values: vec![UNSPECIFIED_VALUE.into()],
        }
    }

    /// Values are numbered with an `i8`, so a category holds at most
    /// `i8::MAX` of them.
    fn add_value(&mut self, value: SmolStr) -> Option<FeatureValue> {
        let index = i8::try_from(self.values.len()).ok()?;
        self.values.push(value);
        Some(FeatureValue::new(index))
    }

    /// Category name.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of values, counting the reserved `unspecified` slot.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the category has no real value.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.values.len() <= 1
    }

    /// Name of `value`, or `None` for the unspecified and locked markers.
    pub fn value_name(&self, value: FeatureValue) -> Option<&str> {
        value.value_index().and_then(|i| self.values.get(i)).map(|s| &**s)
    }

    /// Every real value of the category.
    pub fn values(&self) -> impl Iterator<Item = FeatureValue> {
        (1..self.values.len()).map(|v| FeatureValue::new(v as i8))
    }
}

/// Whether a value is written as an inflectional code or a semantic name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    /// Written as a one-character code after `:`.
    Inflectional,
    /// Written by name after `+`.
    Semantic,
}

/// Where a value name lives in its part of speech.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureInfo {
    /// Whether the value is inflectional or semantic.
    pub kind: FeatureKind,
    /// Index of the category in its part of speech.
    pub category: usize,
    /// Position of the value in its category.
    pub value: FeatureValue,
}

/// A part of speech.
///
/// Categories are laid out inflectional first, then the optional
/// discriminative category, then the remaining semantic ones. The first
/// `discr_count` categories are discriminative. Codes are the valid
/// combinations of discriminative values.
#[derive(Clone, Debug)]
pub struct Pos {
    name: SmolStr,
    index: PosIndex,
    ignorable: bool,
    inflect_count: usize,
    discr_count: usize,
    categories: Vec<Category>,
    category_ids: HashMap<SmolStr, usize>,
    values: HashMap<SmolStr, FeatureInfo>,
    codes: Vec<Vec<FeatureValue>>,
}

impl Pos {
    fn bare(name: SmolStr, index: PosIndex) -> Pos {
        Pos {
            name,
            index,
            ignorable: false,
            inflect_count: 0,
            discr_count: 0,
            categories: vec![],
            category_ids: HashMap::new(),
            values: HashMap::new(),
            codes: vec![],
        }
    }

    pub(crate) fn from_definition(
        def: &PosDefinition,
        index: PosIndex,
    ) -> Result<Pos, LanguageError> {
        let mut pos = Pos::bare(def.name.clone(), index);
        pos.ignorable = def.ignore;

        for flex in &def.inflex {
            let cat = pos.add_category(&flex.name)?;
            for value in &flex.values {
                if value.chars().count() != 1 {
                    return Err(LanguageError::InflectionalValueLength {
                        pos: pos.name.clone(),
                        value: value.clone(),
                    });
                }
                pos.add_value(cat, value, FeatureKind::Inflectional)?;
            }
            pos.inflect_count += 1;
        }

        pos.discr_count = pos.inflect_count;
        let discr = def.discr.iter();
        if def.discr.is_some() {
            pos.discr_count += 1;
        }

        for cat_def in discr.chain(def.cat.iter()) {
            let cat = pos.add_category(&cat_def.name)?;
            for value in &cat_def.values {
                if value == "_" {
                    return Err(LanguageError::BlankValue {
                        pos: pos.name.clone(),
                        category: cat_def.name.clone(),
                    });
                }
                pos.add_value(cat, value, FeatureKind::Semantic)?;
            }
        }

        for line in &def.complete {
            let code = pos.code_template(line)?;
            pos.codes.extend(pos.expand_code(&code));
        }

        log::trace!(
            "POS {}: {} categories, {} codes",
            pos.name,
            pos.categories.len(),
            pos.codes.len()
        );
        Ok(pos)
    }

    fn add_category(&mut self, name: &SmolStr) -> Result<usize, LanguageError> {
        if self.category_ids.contains_key(name) {
            return Err(LanguageError::DuplicateCategory {
                pos: self.name.clone(),
                category: name.clone(),
            });
        }
        let id = self.categories.len();
        self.categories.push(Category::new(name.clone()));
        self.category_ids.insert(name.clone(), id);
        Ok(id)
    }

    fn add_value(
        &mut self,
        category: usize,
        value: &SmolStr,
        kind: FeatureKind,
    ) -> Result<(), LanguageError> {
        if self.values.contains_key(value) {
            return Err(LanguageError::DuplicateValue {
                pos: self.name.clone(),
                value: value.clone(),
            });
        }
        let cat = &mut self.categories[category];
        let v = match cat.add_value(value.clone()) {
            Some(v) => v,
            None => {
                return Err(LanguageError::TooManyValues {
                    pos: self.name.clone(),
                    category: cat.name.clone(),
                })
            }
        };
        self.values.insert(
            value.clone(),
            FeatureInfo {
                kind,
                category,
                value: v,
            },
        );
        Ok(())
    }

    /// Reads one `complete:` line. Placeholders become UNSPECIFIED,
    /// features not mentioned are LOCKED.
    fn code_template(&self, line: &[SmolStr]) -> Result<Vec<FeatureValue>, LanguageError> {
        let mut code = vec![FeatureValue::LOCKED; self.discr_count];
        if line.first().map(|t| t == "_").unwrap_or(false) {
            return Ok(code);
        }
        for token in line {
            if let Some(name) = token.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
                let index = self.category_id(name).ok_or_else(|| LanguageError::UnknownCategory {
                    pos: self.name.clone(),
                    category: name.into(),
                })?;
                if index >= self.discr_count {
                    return Err(LanguageError::NotDiscriminative {
                        pos: self.name.clone(),
                        token: token.clone(),
                    });
                }
                code[index] = FeatureValue::UNSPECIFIED;
            } else {
                let info = self
                    .values
                    .get(token)
                    .ok_or_else(|| LanguageError::UnknownValue {
                        pos: self.name.clone(),
                        value: token.clone(),
                    })?;
                if info.category >= self.discr_count {
                    return Err(LanguageError::NotDiscriminative {
                        pos: self.name.clone(),
                        token: token.clone(),
                    });
                }
                code[info.category] = info.value;
            }
        }
        Ok(code)
    }

    /// Expands every UNSPECIFIED slot of a code template to all the values
    /// of its category.
    fn expand_code(&self, template: &[FeatureValue]) -> Vec<Vec<FeatureValue>> {
        let mut codes = vec![template.to_vec()];
        for (index, value) in template.iter().enumerate() {
            if !value.is_unspecified() {
                continue;
            }
            codes = codes
                .into_iter()
                .flat_map(|code| {
                    self.categories[index].values().map(move |v| {
                        let mut c = code.clone();
                        c[index] = v;
                        c
                    })
                })
                .collect();
        }
        codes
    }

    /// POS name.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the part of speech in its language.
    #[inline(always)]
    pub fn index(&self) -> PosIndex {
        self.index
    }

    /// Words of ignorable parts of speech pass through grammars untouched.
    #[inline(always)]
    pub fn is_ignorable(&self) -> bool {
        self.ignorable
    }

    /// Number of inflectional categories.
    #[inline(always)]
    pub fn inflect_count(&self) -> usize {
        self.inflect_count
    }

    /// Number of discriminative categories.
    #[inline(always)]
    pub fn discr_count(&self) -> usize {
        self.discr_count
    }

    /// Number of categories, of every kind.
    #[inline(always)]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Category at `index` in the layout described above.
    #[inline(always)]
    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    /// Every category, inflectional ones first.
    #[inline(always)]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Index of the category called `name`.
    pub fn category_id(&self, name: &str) -> Option<usize> {
        self.category_ids.get(name).copied()
    }

    /// Every valid combination of discriminative values.
    #[inline(always)]
    pub fn codes(&self) -> &[Vec<FeatureValue>] {
        &self.codes
    }

    /// Where the value called `name` lives.
    pub fn value_info(&self, name: &str) -> Option<&FeatureInfo> {
        self.values.get(name)
    }

    /// Semantic value by name.
    pub fn semantic_value(&self, name: &str) -> Option<&FeatureInfo> {
        self.values
            .get(name)
            .filter(|info| info.kind == FeatureKind::Semantic)
    }

    /// Inflectional value by its one-character code.
    pub fn inflectional_value(&self, code: char) -> Option<&FeatureInfo> {
        let mut buf = [0u8; 4];
        self.values
            .get(&*code.encode_utf8(&mut buf))
            .filter(|info| info.kind == FeatureKind::Inflectional)
    }
}

impl PartialEq for Pos {
    fn eq(&self, other: &Pos) -> bool {
        self.index == other.index
    }
}

impl Eq for Pos {}

/// A language: its parts of speech and its table of interned forms.
#[derive(Debug)]
pub struct Language {
    name: SmolStr,
    pos: Vec<Arc<Pos>>,
    pos_ids: HashMap<SmolStr, PosIndex>,
    forms: Vec<SmolStr>,
    form_ids: HashMap<SmolStr, FormId>,
    reported: HashSet<SmolStr>,
}

impl Language {
    /// Creates a language holding only the predefined parts of speech.
    pub fn new(name: &str) -> Language {
        let mut language = Language {
            name: name.into(),
            pos: vec![],
            pos_ids: HashMap::new(),
            forms: vec![],
            form_ids: HashMap::new(),
            reported: HashSet::new(),
        };
        for predefined in [UNKNOWN_POS, PUNC_POS, CHFA_POS] {
            let index = PosIndex::new(language.pos.len());
            language.pos.push(Arc::new(Pos::bare(predefined.into(), index)));
            language.pos_ids.insert(predefined.into(), index);
        }
        language.add_form("");
        language
    }

    /// Builds a language from a parsed tagset.
    pub fn from_definition(def: &TagsetDefinition) -> Result<Language, LanguageError> {
        let mut language = Language::new(&def.name);
        for pos in &def.pos {
            language.add_pos(pos)?;
        }
        log::debug!(
            "Language {}: {} POS definitions loaded",
            language.name,
            def.pos.len()
        );
        Ok(language)
    }

    /// Adds a part of speech after the existing ones.
    pub fn add_pos(&mut self, def: &PosDefinition) -> Result<&Arc<Pos>, LanguageError> {
        if self.pos_ids.contains_key(&def.name) {
            return Err(LanguageError::DuplicatePos(def.name.clone()));
        }
        let index = PosIndex::new(self.pos.len());
        let pos = Pos::from_definition(def, index)?;
        self.pos.push(Arc::new(pos));
        self.pos_ids.insert(def.name.clone(), index);
        Ok(&self.pos[index.index()])
    }

    /// Language name from the `NAME` line.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every part of speech, predefined ones first.
    #[inline(always)]
    pub fn pos_list(&self) -> &[Arc<Pos>] {
        &self.pos
    }

    /// Part of speech at `index`.
    #[inline(always)]
    pub fn pos(&self, index: PosIndex) -> Option<&Arc<Pos>> {
        self.pos.get(index.index())
    }

    /// Part of speech called `name`.
    pub fn pos_by_name(&self, name: &str) -> Option<&Arc<Pos>> {
        self.pos_ids.get(name).and_then(|i| self.pos(*i))
    }

    // The predefined POS are created by `Language::new` at indices 0, 1 and 2.

    /// The `?` part of speech.
    #[inline(always)]
    pub fn unknown_pos(&self) -> &Arc<Pos> {
        &self.pos[0]
    }

    /// The `PNC` part of speech.
    #[inline(always)]
    pub fn punc_pos(&self) -> &Arc<Pos> {
        &self.pos[1]
    }

    /// The `NB` part of speech.
    #[inline(always)]
    pub fn chfa_pos(&self) -> &Arc<Pos> {
        &self.pos[2]
    }

    /// Interns a form, returning its id.
    pub fn add_form(&mut self, form: &str) -> FormId {
        if let Some(&id) = self.form_ids.get(form) {
            return id;
        }
        let id = FormId::new(self.forms.len());
        self.forms.push(form.into());
        self.form_ids.insert(form.into(), id);
        id
    }

    /// Id of `form`, if it was interned.
    pub fn form_id(&self, form: &str) -> Option<FormId> {
        self.form_ids.get(form).copied()
    }

    /// The form with id `id`. Unknown ids read as the empty string.
    pub fn form(&self, id: FormId) -> &str {
        self.forms.get(id.index()).map(|s| &**s).unwrap_or("")
    }

    /// Number of interned forms, the empty one included.
    #[inline(always)]
    pub fn form_count(&self) -> usize {
        self.forms.len()
    }

    /// Returns true the first time a given unknown code is seen.
    pub(crate) fn report_once(&mut self, code: &str) -> bool {
        self.reported.insert(code.into())
    }
}
