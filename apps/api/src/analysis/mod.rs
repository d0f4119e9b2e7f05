//! Document analysis core.
//!
//! Pure, synchronous text analysis: document type detection, pattern extraction,
//! RAKE-style key topics, section segmentation, extractive summarization and the
//! two report templates. No I/O and no state shared between documents; an
//! `InsightEngine` only holds its fixed parameters and compiled patterns, so one
//! engine can serve any number of documents concurrently.

pub mod classifier;
pub mod generic;
pub mod keywords;
pub mod params;
pub mod patterns;
pub mod report;
pub mod sections;
pub mod structured;
pub mod summarizer;
pub mod tokenizer;

use crate::analysis::classifier::{DocumentClassifier, DocumentType};
use crate::analysis::params::AnalysisParams;
use crate::analysis::patterns::Patterns;
use crate::analysis::summarizer::{build_overall_summary, summarize_sections, SectionSummary};
use crate::analysis::tokenizer::{top_words, WordCount};

#[derive(Debug, Clone)]
pub struct InsightEngine {
    params: AnalysisParams,
    patterns: Patterns,
    classifier: DocumentClassifier,
}

impl InsightEngine {
    pub fn new(params: AnalysisParams) -> Result<Self, regex::Error> {
        let patterns = Patterns::compile(&params.sections)?;
        let classifier = DocumentClassifier::compile()?;
        Ok(Self {
            params,
            patterns,
            classifier,
        })
    }

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    pub fn patterns(&self) -> &Patterns {
        &self.patterns
    }

    pub fn detect_document_type(&self, text: &str) -> DocumentType {
        self.classifier.classify(text, &self.patterns)
    }

    pub fn key_topics(&self, text: &str, top_n: usize) -> Vec<String> {
        keywords::extract_key_topics(text, &self.params.stopwords, top_n)
    }

    /// Per-section summaries over evenly sampled sections.
    pub fn section_summaries(&self, text: &str) -> Vec<SectionSummary> {
        summarize_sections(
            text,
            &self.patterns,
            &self.params.stopwords,
            self.params.fallback_chunk_sentences,
            self.params.max_sampled_sections,
            self.params.section_summary_sentences,
        )
    }

    pub fn overall_summary(&self, text: &str, section_summaries: &[SectionSummary]) -> String {
        build_overall_summary(
            text,
            section_summaries,
            &self.params.stopwords,
            self.params.overall_summary_sentences,
            self.params.min_combined_summary_chars,
        )
    }

    pub fn top_words(&self, text: &str) -> Vec<WordCount> {
        top_words(text, &self.params.stopwords, self.params.top_word_count)
    }

    /// Generic insight report, or `None` for text below the minimum length.
    pub fn generic_report(&self, text: &str) -> Option<String> {
        if self.is_too_short(text) {
            return None;
        }
        generic::build_report(self, text).render()
    }

    /// Resume-structured report, or `None` for text below the minimum length or
    /// when nothing resume-like was extracted.
    pub fn structured_report(&self, text: &str) -> Option<String> {
        if self.is_too_short(text) {
            return None;
        }
        structured::build_report(self, text)?.render()
    }

    fn is_too_short(&self, text: &str) -> bool {
        text.chars().count() < self.params.min_input_chars
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_short_input_yields_no_reports() {
        let engine = engine();
        assert_eq!(engine.generic_report("too short"), None);
        assert_eq!(engine.structured_report("tiny resume text"), None);
    }

    #[test]
    fn test_sample_types() {
        let engine = engine();
        assert_eq!(engine.detect_document_type(SAMPLE_RESUME), DocumentType::Resume);
        assert_eq!(engine.detect_document_type(SAMPLE_PAPER), DocumentType::Academic);
    }

    #[test]
    fn test_full_pipeline_is_idempotent() {
        let engine = engine();
        for text in [SAMPLE_RESUME, SAMPLE_PAPER] {
            assert_eq!(engine.generic_report(text), engine.generic_report(text));
            assert_eq!(engine.structured_report(text), engine.structured_report(text));
        }
        let other = InsightEngine::new(AnalysisParams::default()).unwrap();
        assert_eq!(
            engine.generic_report(SAMPLE_PAPER),
            other.generic_report(SAMPLE_PAPER)
        );
    }

    #[test]
    fn test_top_words_default_count() {
        let engine = engine();
        let words = engine.top_words(SAMPLE_PAPER);
        assert_eq!(words.len(), 5);
        assert_eq!(words[0].word, "documents");
    }
}
