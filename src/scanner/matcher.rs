// Whole-word literal matching on Unicode word boundaries.

use regex_automata::meta::Regex;

use crate::error::{Result, ScriptError};

/// Compiled `\b<literal>\b` pattern for one lexicon word or matched instance
#[derive(Debug, Clone)]
pub struct WordMatcher {
    literal: String,
    regex: Regex,
}

impl WordMatcher {
    /// Case-insensitive matcher, used for lexicon words
    pub fn whole_word(word: &str) -> Result<Self> {
        Self::build(word, true)
    }

    /// Case-sensitive matcher, used to re-locate a literally occurring instance
    pub fn exact(instance: &str) -> Result<Self> {
        Self::build(instance, false)
    }

    fn build(literal: &str, case_insensitive: bool) -> Result<Self> {
        let flags = if case_insensitive { "(?i)" } else { "" };
        let pattern = format!(r"{flags}\b{}\b", regex_syntax::escape(literal));
        let regex = Regex::new(&pattern).map_err(|e| ScriptError::Pattern {
            literal: literal.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            literal: literal.to_string(),
            regex,
        })
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Number of non-overlapping occurrences
    pub fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    /// Occurring substrings, in order, with their original casing
    pub fn instances<'h>(&self, text: &'h str) -> Vec<&'h str> {
        self.regex
            .find_iter(text)
            .map(|found| &text[found.range()])
            .collect()
    }

    /// Copy of `text` with every occurrence wrapped in `open`/`close`
    pub fn wrap_all(&self, text: &str, open: &str, close: &str) -> String {
        let mut wrapped = String::with_capacity(text.len());
        let mut last_end = 0;
        for found in self.regex.find_iter(text) {
            wrapped.push_str(&text[last_end..found.start()]);
            wrapped.push_str(open);
            wrapped.push_str(&text[found.range()]);
            wrapped.push_str(close);
            last_end = found.end();
        }
        wrapped.push_str(&text[last_end..]);
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_case_insensitive() {
        let matcher = WordMatcher::whole_word("dang").unwrap();
        assert_eq!(matcher.count("DANG!"), 1);
        assert_eq!(matcher.count("Dang."), 1);
        assert_eq!(matcher.count("dangle"), 0);
        assert_eq!(matcher.count("shebang"), 0);
        assert_eq!(matcher.count("Dang, dang, DANG it."), 3);
    }

    #[test]
    fn test_instances_keep_original_casing() {
        let matcher = WordMatcher::whole_word("heck").unwrap();
        assert_eq!(
            matcher.instances("Heck. What the heck? HECK!"),
            vec!["Heck", "heck", "HECK"]
        );
    }

    #[test]
    fn test_exact_is_case_sensitive() {
        let matcher = WordMatcher::exact("Heck").unwrap();
        assert_eq!(matcher.count("Heck heck HECK Heckle"), 1);
    }

    #[test]
    fn test_literal_metacharacters_are_escaped() {
        let matcher = WordMatcher::whole_word("a.b").unwrap();
        assert_eq!(matcher.count("so a.b then"), 1);
        assert_eq!(matcher.count("so axb then"), 0);
    }

    #[test]
    fn test_multi_word_phrase() {
        let matcher = WordMatcher::whole_word("son of a gun").unwrap();
        assert_eq!(matcher.count("You Son Of A Gun! son of a gunner"), 1);
    }

    #[test]
    fn test_wrap_all() {
        let matcher = WordMatcher::exact("darn").unwrap();
        assert_eq!(
            matcher.wrap_all("darn it, darn", "<", ">"),
            "<darn> it, <darn>"
        );
        assert_eq!(matcher.wrap_all("nothing here", "<", ">"), "nothing here");
    }

    #[test]
    fn test_unicode_word_boundaries() {
        let matcher = WordMatcher::whole_word("merde").unwrap();
        assert_eq!(matcher.count("Oh, MERDE! Encore?"), 1);
        assert_eq!(matcher.count("merdeé"), 0);
    }
}
