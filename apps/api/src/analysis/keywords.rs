//! Key topic extraction: a RAKE-style degree/frequency phrase scorer.
//!
//! Algorithm:
//! 1. Split the text into sentences on `.`, `!`, `?` and newlines.
//! 2. Within a sentence, stopwords and words shorter than three letters delimit
//!    candidate phrases; each maximal run of remaining words is one candidate.
//! 3. Per word: frequency = number of candidates containing it,
//!    degree = Σ (candidate length − 1) over those candidates.
//! 4. word score = (degree + frequency) / frequency.
//! 5. phrase score = Σ word scores; phrases shorter than 4 characters are dropped.
//! 6. Duplicate phrases keep their best score.
//! 7. Rank by (score, phrase length) descending; ties keep first-seen order.

use std::collections::HashMap;

use crate::analysis::params::Stopwords;
use crate::analysis::tokenizer::tokens;

/// Phrases shorter than this many characters are never emitted.
const MIN_PHRASE_CHARS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPhrase {
    pub phrase: String,
    pub score: f64,
}

#[derive(Debug, Default)]
struct WordStats {
    frequency: u32,
    degree: u32,
}

fn candidate_phrases(text: &str, stopwords: &Stopwords) -> Vec<Vec<String>> {
    let mut candidates = Vec::new();
    for sentence in text.split(['.', '!', '?', '\n']) {
        let mut phrase: Vec<String> = Vec::new();
        for word in tokens(sentence) {
            if stopwords.is_content_word(&word) {
                phrase.push(word);
            } else if !phrase.is_empty() {
                candidates.push(std::mem::take(&mut phrase));
            }
        }
        if !phrase.is_empty() {
            candidates.push(phrase);
        }
    }
    candidates
}

fn word_scores(candidates: &[Vec<String>]) -> HashMap<&str, f64> {
    let mut stats: HashMap<&str, WordStats> = HashMap::new();
    for phrase in candidates {
        let degree = (phrase.len() - 1) as u32;
        for word in phrase {
            let entry = stats.entry(word.as_str()).or_default();
            entry.frequency += 1;
            entry.degree += degree;
        }
    }
    stats
        .into_iter()
        .map(|(word, s)| {
            let freq = s.frequency.max(1) as f64;
            (word, (s.degree + s.frequency) as f64 / freq)
        })
        .collect()
}

/// All distinct candidate phrases, best score first.
pub fn rank_phrases(text: &str, stopwords: &Stopwords) -> Vec<ScoredPhrase> {
    let candidates = candidate_phrases(text, stopwords);
    let scores = word_scores(&candidates);

    let mut ranked: Vec<ScoredPhrase> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for phrase in &candidates {
        let score: f64 = phrase
            .iter()
            .map(|w| scores.get(w.as_str()).copied().unwrap_or(0.0))
            .sum();
        let text = phrase.join(" ");
        if text.len() < MIN_PHRASE_CHARS {
            continue;
        }
        match seen.get(&text) {
            Some(&idx) => {
                if score > ranked[idx].score {
                    ranked[idx].score = score;
                }
            }
            None => {
                seen.insert(text.clone(), ranked.len());
                ranked.push(ScoredPhrase { phrase: text, score });
            }
        }
    }

    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.phrase.len().cmp(&a.phrase.len()))
    });
    ranked
}

/// The `top_n` highest-scoring key phrases.
pub fn extract_key_topics(text: &str, stopwords: &Stopwords, top_n: usize) -> Vec<String> {
    rank_phrases(text, stopwords)
        .into_iter()
        .take(top_n.max(1))
        .map(|p| p.phrase)
        .collect()
}
