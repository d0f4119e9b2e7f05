//! Tokenization, sentence splitting and word counting shared by every scorer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analysis::params::Stopwords;

/// A word and the number of times it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u32,
}

/// Lowercase runs of ASCII letters. Digits and punctuation separate tokens.
pub fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|run| !run.is_empty())
        .map(|run| run.to_ascii_lowercase())
}

/// Tokens that survive the stopword and minimum-length filters.
pub fn content_words<'a>(
    text: &'a str,
    stopwords: &'a Stopwords,
) -> impl Iterator<Item = String> + 'a {
    tokens(text).filter(move |w| stopwords.is_content_word(w))
}

/// Splits after `.`, `!` or `?` when followed by whitespace.
///
/// The whitespace run between sentences is dropped; pieces that are empty after
/// trimming are skipped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let end = idx + c.len_utf8();
        let mut next_start = end;
        while let Some(&(ws_idx, ws)) = chars.peek() {
            if !ws.is_whitespace() {
                break;
            }
            next_start = ws_idx + ws.len_utf8();
            chars.next();
        }
        if next_start > end {
            push_sentence(&mut sentences, &text[start..end]);
            start = next_start;
        }
    }
    push_sentence(&mut sentences, &text[start..]);
    sentences
}

fn push_sentence<'a>(sentences: &mut Vec<&'a str>, piece: &'a str) {
    if !piece.trim().is_empty() {
        sentences.push(piece);
    }
}

/// Content-word frequencies of a text block.
pub fn word_frequencies(text: &str, stopwords: &Stopwords) -> HashMap<String, u32> {
    let mut freq = HashMap::new();
    for word in content_words(text, stopwords) {
        *freq.entry(word).or_insert(0) += 1;
    }
    freq
}

/// The `top_n` most frequent content words. Ties keep first-seen order.
pub fn top_words(text: &str, stopwords: &Stopwords, top_n: usize) -> Vec<WordCount> {
    let mut freq = word_frequencies(text, stopwords);

    // first-seen order; each word is taken out of the table once
    let mut order: Vec<WordCount> = content_words(text, stopwords)
        .filter_map(|word| freq.remove(&word).map(|count| WordCount { word, count }))
        .collect();

    order.sort_by(|a, b| b.count.cmp(&a.count));
    order.truncate(top_n.max(1));
    order
}
