//! Sentence and token segmentation
//!
//! The annotation core only consumes spans. [`Segmenter`] is the seam for
//! plugging in a real clinical segmenter; [`SimpleSegmenter`] is a small
//! rule-based one good enough for notes and tests.

use unicode_segmentation::UnicodeSegmentation;

use super::span::Span;

pub trait Segmenter {
    /// Ordered, non-overlapping sentence spans (byte offsets)
    fn sentences(&self, text: &str) -> Vec<Span>;

    /// Ordered, non-overlapping token spans (byte offsets)
    fn tokens(&self, text: &str) -> Vec<Span>;
}

/// Words that end in a period without ending a sentence
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "st", "vs", "jr", "sr", "pt", "approx", "e.g", "i.e", "etc",
];

/// Punctuation-driven sentence splitter with an abbreviation list, plus
/// Unicode word-boundary tokens
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleSegmenter;

impl SimpleSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// True if the period at `dot` closes an abbreviation or an initial
    fn is_abbreviation(text: &str, dot: usize) -> bool {
        let head = &text[..dot];
        let word_start = head
            .char_indices()
            .rev()
            .find(|&(_, c)| c.is_whitespace() || c == '(')
            .map_or(0, |(i, c)| i + c.len_utf8());
        let word = head[word_start..].to_lowercase();
        if word.chars().count() == 1 && word.chars().all(char::is_alphabetic) {
            return true;
        }
        ABBREVIATIONS.contains(&word.as_str())
    }
}

impl Segmenter for SimpleSegmenter {
    fn sentences(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut start = 0usize;
        for (at, c) in text.char_indices() {
            if !matches!(c, '.' | '!' | '?') {
                continue;
            }
            let end = at + c.len_utf8();
            let rest = &text[end..];
            let trimmed = rest.trim_start();
            if trimmed.len() == rest.len() && !trimmed.is_empty() {
                continue;
            }
            let opens_sentence = trimmed
                .chars()
                .next()
                .map_or(true, |n| n.is_uppercase() || n.is_ascii_digit());
            if !opens_sentence || (c == '.' && Self::is_abbreviation(text, at)) {
                continue;
            }
            push_trimmed(&mut spans, text, start, end);
            start = end;
        }
        push_trimmed(&mut spans, text, start, text.len());
        spans
    }

    fn tokens(&self, text: &str) -> Vec<Span> {
        text.split_word_bound_indices()
            .filter(|(_, word)| word.chars().any(char::is_alphanumeric))
            .map(|(at, word)| Span::new(at, at + word.len()))
            .collect()
    }
}

fn push_trimmed(spans: &mut Vec<Span>, text: &str, start: usize, end: usize) {
    let slice = &text[start..end];
    let lead = slice.len() - slice.trim_start().len();
    let trail = slice.len() - slice.trim_end().len();
    if lead + trail < slice.len() {
        spans.push(Span::new(start + lead, end - trail));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence_texts(text: &str) -> Vec<&str> {
        SimpleSegmenter.sentences(text).iter().map(|s| s.slice(text)).collect()
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        let text = "Mr. Test presents today with heartburn. Dr. Who agrees! Follow up in 2 weeks";
        assert_eq!(
            sentence_texts(text),
            vec![
                "Mr. Test presents today with heartburn.",
                "Dr. Who agrees!",
                "Follow up in 2 weeks"
            ]
        );
    }

    #[test]
    fn test_lowercase_continuation_does_not_split() {
        assert_eq!(sentence_texts("BP 120/80 vs. prior. stable"), vec!["BP 120/80 vs. prior. stable"]);
    }

    #[test]
    fn test_tokens_skip_punctuation() {
        let text = "Mr. Test, possible GERD.";
        let words: Vec<&str> = SimpleSegmenter.tokens(text).iter().map(|s| s.slice(text)).collect();
        assert_eq!(words, vec!["Mr", "Test", "possible", "GERD"]);
    }

    #[test]
    fn test_abbreviation_after_wide_whitespace() {
        assert_eq!(
            sentence_texts("Seen by\u{00A0}Dr. Smith today. No fever."),
            vec!["Seen by\u{00A0}Dr. Smith today.", "No fever."]
        );
        assert_eq!(
            sentence_texts("Seen by\u{3000}Dr. Smith."),
            vec!["Seen by\u{3000}Dr. Smith."]
        );
    }

    #[test]
    fn test_empty_text() {
        assert!(SimpleSegmenter.sentences("   ").is_empty());
        assert!(SimpleSegmenter.tokens("").is_empty());
    }
}
