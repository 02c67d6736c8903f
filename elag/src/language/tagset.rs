//! Tagset definitions, as read from `tagset.def` files or JSON.
//!
//! ```text
//! NAME french
//!
//! POS N
//! inflex:
//!   gender = m f
//!   number = s p
//! cat:
//!   sem = hum conc
//! complete:
//!   <gender> <number>
//! .
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{Language, LanguageError};

/// A category and the names of its values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    /// Category name.
    pub name: SmolStr,
    /// Value names, in order.
    pub values: Vec<SmolStr>,
}

impl CategoryDefinition {
    /// A category with the given values.
    pub fn new(name: &str, values: &[&str]) -> CategoryDefinition {
        CategoryDefinition {
            name: name.into(),
            values: values.iter().map(|v| SmolStr::from(*v)).collect(),
        }
    }
}

/// One `POS` section of a tagset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PosDefinition {
    /// POS name.
    pub name: SmolStr,
    /// Set by an `IGNORE` line.
    #[serde(default)]
    pub ignore: bool,
    /// The discriminative semantic category, if any.
    #[serde(default)]
    pub discr: Option<CategoryDefinition>,
    /// Inflectional categories, whose values are single characters.
    #[serde(default)]
    pub inflex: Vec<CategoryDefinition>,
    /// Other semantic categories.
    #[serde(default)]
    pub cat: Vec<CategoryDefinition>,
    /// Lines of values, `<category>` placeholders or a single `_`.
    #[serde(default)]
    pub complete: Vec<Vec<SmolStr>>,
}

/// A whole tagset: a language name and its parts of speech.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TagsetDefinition {
    /// Language name.
    pub name: SmolStr,
    /// Parts of speech, in file order.
    pub pos: Vec<PosDefinition>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Part {
    None,
    Discr,
    Flex,
    Cat,
    Complete,
}

fn syntax(line: usize, text: &str, reason: &'static str) -> LanguageError {
    LanguageError::Syntax {
        line,
        text: text.to_string(),
        reason,
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find(|c| c == '#' || c == '\r' || c == '\n') {
        Some(i) => &line[..i],
        None => line,
    }
}

/// Reads a `name = v1 v2 ...` line.
fn category_line(
    line: usize,
    text: &str,
    tokens: &[&str],
) -> Result<CategoryDefinition, LanguageError> {
    match tokens {
        [name, "=", values @ ..] if !values.is_empty() => {
            if name.starts_with('<') || *name == "_" {
                return Err(syntax(line, text, "category name expected"));
            }
            if values.iter().any(|v| v.starts_with('<')) {
                return Err(syntax(line, text, "value expected"));
            }
            Ok(CategoryDefinition::new(name, values))
        }
        [_] | [_, "="] => Err(syntax(line, text, "line is too short")),
        _ => Err(syntax(line, text, "'=' expected")),
    }
}

impl TagsetDefinition {
    /// Parses the `tagset.def` format.
    pub fn parse(input: &str) -> Result<TagsetDefinition, LanguageError> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l, strip_comment(l).split_whitespace().collect::<Vec<_>>()))
            .filter(|(_, _, tokens)| !tokens.is_empty());

        let name = match lines.next() {
            None => return Err(LanguageError::Empty),
            Some((_, _, tokens)) => match tokens.as_slice() {
                ["NAME", name, ..] => SmolStr::from(*name),
                _ => return Err(LanguageError::MissingName),
            },
        };

        let mut tagset = TagsetDefinition {
            name,
            pos: vec![],
        };
        let mut current: Option<PosDefinition> = None;
        let mut part = Part::None;

        for (line, text, tokens) in lines {
            let pos = match current.as_mut() {
                Some(pos) => pos,
                None => {
                    match tokens.as_slice() {
                        ["POS", name, ..] => {
                            current = Some(PosDefinition {
                                name: (*name).into(),
                                ..Default::default()
                            });
                            part = Part::None;
                        }
                        ["POS"] => return Err(syntax(line, text, "POS section needs a name")),
                        _ => return Err(syntax(line, text, "'POS' section expected")),
                    }
                    continue;
                }
            };

            match tokens[0] {
                "IGNORE" => pos.ignore = true,
                "discr:" => part = Part::Discr,
                "flex:" | "inflex:" => part = Part::Flex,
                "cat:" => part = Part::Cat,
                "complet:" | "complete:" => part = Part::Complete,
                "." => {
                    if let Some(done) = current.take() {
                        tagset.pos.push(done);
                    }
                }
                _ => match part {
                    Part::None => return Err(syntax(line, text, "no section specified")),
                    Part::Discr => {
                        if pos.discr.is_some() {
                            return Err(syntax(
                                line,
                                text,
                                "only one discriminant category can be specified",
                            ));
                        }
                        pos.discr = Some(category_line(line, text, &tokens)?);
                    }
                    Part::Cat => pos.cat.push(category_line(line, text, &tokens)?),
                    Part::Flex => pos.inflex.push(category_line(line, text, &tokens)?),
                    Part::Complete => {
                        if tokens.contains(&"=") {
                            return Err(syntax(line, text, "bad complete line"));
                        }
                        if tokens.contains(&"_") && tokens.len() > 1 {
                            return Err(syntax(line, text, "'_' must stand alone"));
                        }
                        pos.complete
                            .push(tokens.iter().map(|t| SmolStr::from(*t)).collect());
                    }
                },
            }
        }

        if let Some(done) = current.take() {
            tagset.pos.push(done);
        }
        Ok(tagset)
    }
}

impl Language {
    /// Loads a language from `tagset.def` text.
    pub fn from_tagset_str(input: &str) -> Result<Language, LanguageError> {
        Language::from_definition(&TagsetDefinition::parse(input)?)
    }

    /// Loads a language from a `tagset.def` file.
    pub fn from_tagset_path<P: AsRef<Path>>(path: P) -> Result<Language, LanguageError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .map_err(|e| LanguageError::Io(path.to_path_buf(), e))?;
        Language::from_tagset_str(&input)
    }

    /// Loads a language from a JSON [`TagsetDefinition`].
    pub fn from_json_str(input: &str) -> Result<Language, LanguageError> {
        let def: TagsetDefinition = serde_json::from_str(input)?;
        Language::from_definition(&def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TAGSET: &str = "
# test tagset
NAME test

POS V
inflex:
  number = s p
complete:
  <number>
.

POS DET   # determiners
discr:
  type = def indef
inflex:
  number = s p
complete:
  def <number>
  indef s
.

POS INTJ
IGNORE
.
";

    #[test]
    fn parses_sections() {
        let def = TagsetDefinition::parse(TAGSET).unwrap();
        assert_eq!(def.name, "test");
        assert_eq!(def.pos.len(), 3);

        let det = &def.pos[1];
        assert_eq!(det.name, "DET");
        assert_eq!(det.discr, Some(CategoryDefinition::new("type", &["def", "indef"])));
        assert_eq!(det.inflex, vec![CategoryDefinition::new("number", &["s", "p"])]);
        assert_eq!(det.complete.len(), 2);
        assert!(def.pos[2].ignore);
    }

    #[test]
    fn builds_language() {
        let language = Language::from_tagset_str(TAGSET).unwrap();
        assert_eq!(language.pos_list().len(), 6);
        assert!(language.pos_by_name("INTJ").unwrap().is_ignorable());
        assert_eq!(language.pos_by_name("DET").unwrap().codes().len(), 3);
    }

    #[test]
    fn loads_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TAGSET.as_bytes()).unwrap();
        let language = Language::from_tagset_path(file.path()).unwrap();
        assert_eq!(language.name(), "test");

        assert!(matches!(
            Language::from_tagset_path("/nonexistent/tagset.def"),
            Err(LanguageError::Io(..))
        ));
    }

    #[test]
    fn json_and_text_agree() {
        let def = TagsetDefinition::parse(TAGSET).unwrap();
        let json = serde_json::to_string(&def).unwrap();
        let language = Language::from_json_str(&json).unwrap();
        assert_eq!(language.pos_by_name("V").unwrap().codes().len(), 2);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(TagsetDefinition::parse("  \n# nothing\n"), Err(LanguageError::Empty)));
        assert!(matches!(
            TagsetDefinition::parse("POS V\n"),
            Err(LanguageError::MissingName)
        ));
        assert!(matches!(
            TagsetDefinition::parse("NAME x\nPOS V\nnumber = s p\n"),
            Err(LanguageError::Syntax { line: 3, .. })
        ));
        assert!(matches!(
            TagsetDefinition::parse("NAME x\nPOS V\ninflex:\nnumber s p\n"),
            Err(LanguageError::Syntax { line: 4, .. })
        ));
        assert!(matches!(
            Language::from_tagset_str("NAME x\nPOS V\ninflex:\nnumber = s p\ncomplete:\n<gender>\n."),
            Err(LanguageError::UnknownCategory { .. })
        ));
    }
}
