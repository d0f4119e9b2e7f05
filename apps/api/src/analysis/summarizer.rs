use crate::analysis::params::Stopwords;
use crate::analysis::sections::{sample_evenly, split_into_sections, Section};
use crate::analysis::patterns::Patterns;
use crate::analysis::tokenizer::{split_sentences, tokens, word_frequencies};

/// Frequency-weighted extractive summary of at most `max_sentences` sentences.
///
/// Sentences are scored by the summed block-level frequency of their content words;
/// the best ones are emitted in their original order. Blocks that already fit are
/// returned sentence-for-sentence.
pub fn summarize_extractive(text: &str, stopwords: &Stopwords, max_sentences: usize) -> String {
    let max_sentences = max_sentences.max(1);
    let sentences = split_sentences(text);
    if sentences.len() <= max_sentences {
        return sentences.join(" ");
    }

    let freq = word_frequencies(text, stopwords);
    let mut scored: Vec<(usize, u32)> = sentences
        .iter()
        .enumerate()
        .map(|(idx, sentence)| {
            let score = tokens(sentence)
                .map(|w| freq.get(&w).copied().unwrap_or(0))
                .sum();
            (idx, score)
        })
        .collect();

    // stable: equal scores keep the earlier sentence
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(max_sentences);
    scored.sort_by_key(|&(idx, _)| idx);

    scored
        .iter()
        .map(|&(idx, _)| sentences[idx])
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// A section title with its extractive summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSummary {
    pub title: String,
    pub summary: String,
}

/// Segments the text, samples sections evenly and summarizes each independently.
pub fn summarize_sections(
    text: &str,
    patterns: &Patterns,
    stopwords: &Stopwords,
    chunk_sentences: usize,
    max_sections: usize,
    sentences_per_section: usize,
) -> Vec<SectionSummary> {
    let sections: Vec<Section> = split_into_sections(text, patterns, chunk_sentences);
    sample_evenly(&sections, max_sections)
        .into_iter()
        .map(|section| SectionSummary {
            title: section.title.clone(),
            summary: summarize_extractive(&section.content, stopwords, sentences_per_section),
        })
        .collect()
}

/// Second pass: summarize the concatenated section summaries.
///
/// When the concatenation is shorter than `min_combined_chars` the raw text is
/// summarized instead.
pub fn build_overall_summary(
    text: &str,
    section_summaries: &[SectionSummary],
    stopwords: &Stopwords,
    max_sentences: usize,
    min_combined_chars: usize,
) -> String {
    let combined = section_summaries
        .iter()
        .filter(|s| !s.summary.is_empty())
        .map(|s| s.summary.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let source = if combined.chars().count() < min_combined_chars {
        text
    } else {
        combined.as_str()
    };
    summarize_extractive(source, stopwords, max_sentences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::params::default_section_specs;

    const TEXT: &str = "Rust is a systems language. \
        The weather was pleasant today. \
        Rust offers memory safety without garbage collection. \
        Lunch was served at noon. \
        Rust compilers check ownership and borrowing rules for memory safety.";

    #[test]
    fn test_short_text_returned_verbatim() {
        let stopwords = Stopwords::default();
        let text = "One sentence here. Another one there.";
        assert_eq!(summarize_extractive(text, &stopwords, 2), text);
        assert_eq!(summarize_extractive(text, &stopwords, 5), text);
    }

    #[test]
    fn test_selects_high_frequency_sentences() {
        let stopwords = Stopwords::default();
        let summary = summarize_extractive(TEXT, &stopwords, 2);
        assert_eq!(
            summary,
            "Rust offers memory safety without garbage collection. \
             Rust compilers check ownership and borrowing rules for memory safety."
        );
    }

    #[test]
    fn test_selection_preserves_document_order() {
        let stopwords = Stopwords::default();
        let summary = summarize_extractive(TEXT, &stopwords, 3);
        let sentences = split_sentences(TEXT);
        let picked = split_sentences(&summary);
        assert_eq!(picked.len(), 3);
        let positions: Vec<usize> = picked
            .iter()
            .map(|p| sentences.iter().position(|s| s == p).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_never_exceeds_cap() {
        let stopwords = Stopwords::default();
        for cap in 1..6 {
            let summary = summarize_extractive(TEXT, &stopwords, cap);
            assert!(split_sentences(&summary).len() <= cap);
        }
        assert_eq!(split_sentences(&summarize_extractive(TEXT, &stopwords, 0)).len(), 1);
    }

    #[test]
    fn test_overall_summary_falls_back_to_raw_text() {
        let stopwords = Stopwords::default();
        let tiny = vec![SectionSummary {
            title: "Section 1".into(),
            summary: "Short.".into(),
        }];
        let raw = "Alpha beta gamma. Delta epsilon.";
        assert_eq!(build_overall_summary(raw, &tiny, &stopwords, 6, 40), raw);
    }

    #[test]
    fn test_summarize_sections_two_sentence_cap() {
        let patterns = Patterns::compile(&default_section_specs()).unwrap();
        let stopwords = Stopwords::default();
        let text = "METHODS\nWe sampled data. We cleaned data. We modeled data.\nRESULTS\nAccuracy rose. Loss fell.";
        let summaries = summarize_sections(text, &patterns, &stopwords, 10, 8, 2);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].title, "METHODS");
        assert!(split_sentences(&summaries[0].summary).len() <= 2);
        assert_eq!(summaries[1].summary, "Accuracy rose. Loss fell.");
    }
}
