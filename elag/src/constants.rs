/// Name of the part of speech given to words missing from the dictionaries.
pub const UNKNOWN_POS: &str = "?";
/// Name of the punctuation part of speech.
pub const PUNC_POS: &str = "PNC";
/// Name of the digit sequence part of speech.
pub const CHFA_POS: &str = "NB";

/// Name of value 0 in every category.
pub(crate) const UNSPECIFIED_VALUE: &str = "unspecified";

/// Characters that make up a punctuation token on their own.
pub(crate) const PUNC_TAB: &[char] = &[
    '"', '\'', '+', '-', '*', '\\', '=', '.', ',', ':', ';', '!', '?', '(', ')', '[', ']', '<',
    '>', '{', '}', '%', '#', '@', '/', '$', '&', '|', '_', '\u{AB}', '\u{BB}',
];

/// Characters escaped with a backslash when a form is written into a grammar label.
pub(crate) const LABEL_ESCAPED: &[char] = &['\\', '<', '>', '.', '+', '!', ':', '@', ',', '{', '}'];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predefined_pos_names_are_punctuation_safe() {
        assert!(PUNC_TAB.contains(&'?'));
        assert!(!PUNC_POS.chars().any(|c| LABEL_ESCAPED.contains(&c)));
        assert!(!CHFA_POS.chars().any(|c| LABEL_ESCAPED.contains(&c)));
    }
}
