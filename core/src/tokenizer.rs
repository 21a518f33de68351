use std::collections::BTreeSet;

/// Split text into non-empty words separated by runs of ASCII spaces.
/// Tabs, newlines and other whitespace stay inside words.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|w| !w.is_empty()).collect()
}

/// A word is valid when it carries no control characters (code points below `' '`).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| c < ' ')
}

pub fn unique_non_empty_strings<I, S>(strings: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    strings
        .into_iter()
        .filter(|s| !s.as_ref().is_empty())
        .map(|s| s.as_ref().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_space_runs() {
        assert_eq!(split_into_words("  cat   in the  city "), vec!["cat", "in", "the", "city"]);
        assert!(split_into_words("").is_empty());
        assert!(split_into_words("    ").is_empty());
    }

    #[test]
    fn only_space_separates() {
        assert_eq!(split_into_words("a\tb c"), vec!["a\tb", "c"]);
    }

    #[test]
    fn control_characters_are_invalid() {
        assert!(is_valid_word("пушистый"));
        assert!(is_valid_word(""));
        assert!(!is_valid_word("кот\x02"));
        assert!(!is_valid_word("\x10"));
        assert!(!is_valid_word("a\0b"));
        assert!(!is_valid_word("a\tb"));
    }

    #[test]
    fn unique_strings_drop_empty() {
        let set = unique_non_empty_strings(["in", "", "the", "in"]);
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["in", "the"]);
    }
}
