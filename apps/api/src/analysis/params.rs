//! Fixed analysis parameters.
//!
//! Everything the pipeline treats as configuration (stopwords, thresholds, section
//! windows, editorial template text) lives in `AnalysisParams`. The engine owns one
//! value and passes it down explicitly; nothing here is global state.

use std::collections::HashSet;

/// Common English function words. Stopwords never appear inside a candidate phrase
/// and never count toward word frequencies.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "and", "is", "of", "to", "a", "in", "that", "it", "for", "on", "with", "as",
    "are", "was", "be", "at", "by", "an", "or", "from", "this", "which", "you", "your",
    "has", "have", "had", "but", "not", "we", "our", "their", "they", "he", "she", "his",
    "her", "its", "will", "can", "may", "would", "should", "could", "about", "into",
    "over", "under", "than", "then", "there", "here", "also", "more", "most", "other",
    "some", "such", "no", "nor", "so", "too", "very",
];

/// Words must be strictly longer than this to count as content words.
pub const MIN_CONTENT_WORD_LEN: usize = 2;

/// Stopword set plus the minimum-length rule that together define a "content word".
#[derive(Debug, Clone)]
pub struct Stopwords {
    words: HashSet<&'static str>,
}

impl Stopwords {
    pub fn new(words: &[&'static str]) -> Self {
        Self {
            words: words.iter().copied().collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// A lowercase token that is not a stopword and is longer than two letters.
    pub fn is_content_word(&self, word: &str) -> bool {
        word.len() > MIN_CONTENT_WORD_LEN && !self.contains(word)
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::new(DEFAULT_STOPWORDS)
    }
}

/// Named resume sections the structured template pulls out of raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResumeSection {
    Skills,
    Experience,
    Projects,
    Events,
    Certifications,
}

/// Heading keywords and trailing character window for one resume section.
#[derive(Debug, Clone)]
pub struct SectionSpec {
    pub section: ResumeSection,
    pub headings: &'static [&'static str],
    /// Maximum number of characters captured after the heading.
    pub window: usize,
}

pub fn default_section_specs() -> Vec<SectionSpec> {
    vec![
        SectionSpec {
            section: ResumeSection::Skills,
            headings: &["skills", "technical skills", "skill set"],
            window: 1200,
        },
        SectionSpec {
            section: ResumeSection::Experience,
            headings: &["experience", "work experience", "professional experience"],
            window: 1400,
        },
        SectionSpec {
            section: ResumeSection::Projects,
            headings: &["projects", "project highlights"],
            window: 1400,
        },
        SectionSpec {
            section: ResumeSection::Events,
            headings: &["events", "hackathons", "achievements"],
            window: 800,
        },
        SectionSpec {
            section: ResumeSection::Certifications,
            headings: &["certifications", "courses"],
            window: 600,
        },
    ]
}

/// Editorial text used by the report templates.
///
/// These bullets are gated by weak heuristics (substring checks, keyword presence);
/// they are deliberately plain text so deployments can reword them.
#[derive(Debug, Clone)]
pub struct ReportTemplates {
    /// Generic resume path: emitted when any key topic was found.
    pub strength_topics: String,
    /// Generic resume path: emitted when the text contains a URL.
    pub strength_links: String,
    /// Generic resume path: emitted when the text mentions projects or experience.
    pub gap_quantify: String,
    /// Generic resume path: emitted when any key topic was found.
    pub gap_keywords: String,
    /// Non-resume path: always emitted.
    pub insights_fixed: Vec<String>,
    /// Non-resume path: emitted when an extracted entity is a URL.
    pub insight_links: String,
    /// Structured template, section 8.
    pub structured_strengths: Vec<String>,
    /// Structured template, section 9.
    pub structured_improvements: Vec<String>,
    /// Structured template, section 10.
    pub structured_ats: Vec<String>,
}

impl Default for ReportTemplates {
    fn default() -> Self {
        Self {
            strength_topics: "Demonstrated technical scope across listed skills/projects".into(),
            strength_links: "Evidence of hands-on work (projects/links)".into(),
            gap_quantify: "Quantify impact (metrics) in project descriptions".into(),
            gap_keywords: "Tailor keywords to target roles for ATS".into(),
            insights_fixed: vec![
                "Skim section highlights to navigate main topics".into(),
                "Use keywords as study/research anchors".into(),
            ],
            insight_links: "Follow entities/links for primary sources or datasets".into(),
            structured_strengths: vec![
                "✅ Strong technical breadth and project exposure".into(),
                "✅ Demonstrated teamwork/leadership via projects or hackathons".into(),
                "✅ Solid foundation for AI/ML or full-stack roles".into(),
            ],
            structured_improvements: vec![
                "⚠️ Add quantifiable impact to projects (metrics)".into(),
                "⚠️ Tailor keywords for ATS per job description".into(),
                "⚠️ Compress soft skills under project outcomes".into(),
            ],
            structured_ats: vec![
                "ATS Score (rough): ~75–85/100 depending on role and keywords match".into(),
                "Fit for Roles: AI/ML Intern, Data Scientist Intern, Full-Stack Developer Intern"
                    .into(),
            ],
        }
    }
}

/// All tunables of the analysis pipeline.
#[derive(Debug, Clone)]
pub struct AnalysisParams {
    pub stopwords: Stopwords,
    /// Inputs shorter than this (in characters) produce no report.
    pub min_input_chars: usize,
    /// Structured-template sections 8–10 need more text than this.
    pub rich_text_chars: usize,
    pub key_topic_count: usize,
    pub max_sampled_sections: usize,
    pub section_summary_sentences: usize,
    pub overall_summary_sentences: usize,
    /// Below this length the concatenated section summaries are replaced by the raw text.
    pub min_combined_summary_chars: usize,
    /// Sentences per synthetic section when no headings are found.
    pub fallback_chunk_sentences: usize,
    pub outline_limit: usize,
    pub entity_limit: usize,
    pub education_line_limit: usize,
    pub top_word_count: usize,
    pub sections: Vec<SectionSpec>,
    pub templates: ReportTemplates,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            stopwords: Stopwords::default(),
            min_input_chars: 20,
            rich_text_chars: 500,
            key_topic_count: 8,
            max_sampled_sections: 8,
            section_summary_sentences: 2,
            overall_summary_sentences: 6,
            min_combined_summary_chars: 40,
            fallback_chunk_sentences: 10,
            outline_limit: 10,
            entity_limit: 15,
            education_line_limit: 3,
            top_word_count: 5,
            sections: default_section_specs(),
            templates: ReportTemplates::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_word_rules() {
        let stopwords = Stopwords::default();
        assert!(stopwords.is_content_word("rust"));
        assert!(!stopwords.is_content_word("the"));
        assert!(!stopwords.is_content_word("ml"));
        assert!(!stopwords.is_content_word("very"));
    }

    #[test]
    fn test_default_stopword_set_size() {
        let unique: HashSet<_> = DEFAULT_STOPWORDS.iter().collect();
        assert_eq!(unique.len(), DEFAULT_STOPWORDS.len());
        assert!(DEFAULT_STOPWORDS.len() >= 60);
    }

    #[test]
    fn test_section_windows_within_bounds() {
        for spec in default_section_specs() {
            assert!((600..=1400).contains(&spec.window), "{:?}", spec.section);
            assert!(!spec.headings.is_empty());
        }
    }
}
