//! Tokenization of documents into word-token n-grams.
//!
//! A token is a maximal run of Unicode word characters after lowercasing;
//! everything matching `\W` is a separator. An n-gram is `n` consecutive
//! tokens joined by a single ASCII space, and a document's n-gram set has
//! set semantics (duplicates collapse). The tokenizer never errors: too few
//! tokens simply yield an empty set.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("static pattern compiles"));

/// Split a document into lowercased word tokens.
pub fn tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .split(&lowered)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Number of word tokens in a document; used by the min-length filter.
pub fn token_count(text: &str) -> usize {
    let lowered = text.to_lowercase();
    NON_WORD.split(&lowered).filter(|t| !t.is_empty()).count()
}

/// Invoke `f` with the byte form of every n-gram window, reusing `scratch`
/// as the join buffer. Windows are visited in order; callers that need set
/// semantics deduplicate on their side (usually by hash).
pub fn each_ngram(tokens: &[String], n: usize, scratch: &mut Vec<u8>, mut f: impl FnMut(&[u8])) {
    if n == 0 || tokens.len() < n {
        return;
    }
    for window in tokens.windows(n) {
        scratch.clear();
        for (i, tok) in window.iter().enumerate() {
            if i > 0 {
                scratch.push(b' ');
            }
            scratch.extend_from_slice(tok.as_bytes());
        }
        f(scratch);
    }
}

/// The set of n-gram byte sequences of a document.
pub fn ngram_set(text: &str, n: usize) -> HashSet<Vec<u8>> {
    let toks = tokens(text);
    let mut set = HashSet::new();
    let mut scratch = Vec::new();
    each_ngram(&toks, n, &mut scratch, |g| {
        set.insert(g.to_vec());
    });
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_lowercase_and_split() {
        assert_eq!(tokens("Hello, World!"), vec!["hello", "world"]);
        assert_eq!(tokens("foo_bar baz"), vec!["foo_bar", "baz"]);
        assert_eq!(tokens("  a  b  "), vec!["a", "b"]);
    }

    #[test]
    fn test_tokens_unicode_word_chars() {
        // Accented letters are word characters under Unicode \w.
        assert_eq!(tokens("Café au lait"), vec!["café", "au", "lait"]);
    }

    #[test]
    fn test_token_count_matches_tokens() {
        let text = "The quick, brown fox!";
        assert_eq!(token_count(text), tokens(text).len());
        assert_eq!(token_count(""), 0);
        assert_eq!(token_count("!!!"), 0);
    }

    #[test]
    fn test_ngram_set_bigrams() {
        let set = ngram_set("hello world foo bar", 2);
        let expected: HashSet<Vec<u8>> = ["hello world", "world foo", "foo bar"]
            .iter()
            .map(|s| s.as_bytes().to_vec())
            .collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_ngram_set_collapses_duplicates() {
        let set = ngram_set("a b a b", 2);
        // Windows: "a b", "b a", "a b" -> two distinct bigrams.
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_ngram_set_too_few_tokens_is_empty() {
        assert!(ngram_set("hello", 2).is_empty());
        assert!(ngram_set("", 2).is_empty());
        assert!(ngram_set("a b c", 4).is_empty());
    }

    #[test]
    fn test_unigrams_are_tokens() {
        let set = ngram_set("one two three", 1);
        assert_eq!(set.len(), 3);
        assert!(set.contains("one".as_bytes()));
    }
}
