//! Document type detection from vocabulary, contact signals and heading counts.

use std::collections::HashSet;
use std::fmt;

use regex::Regex;

use crate::analysis::patterns::Patterns;

const RESUME_WORD: &str = r"(?i)\b(resume|curriculum\s+vitae|cv)\b";
const PHONE_BOUNDED: &str = r"(?:\+?\d{1,3}[- ]?)?\d{10}\b";
const PROFILE_LINK: &str =
    r"https?://(www\.)?(linkedin\.com|github\.com|portfolio|vercel\.app|netlify\.app|github\.io)/";
const RESUME_HEADINGS: &str =
    r"(?im)^(education|work\s+experience|experience|skills|projects|certifications|achievements)\b";
const ACADEMIC_HEADINGS: &str = r"(?im)^(abstract|introduction|literature\s+review|related\s+work|methodology|methods|results|discussion|conclusion|references|chapter\s+\d+)\b";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    Resume,
    Academic,
    General,
}

impl DocumentType {
    pub fn label(self) -> &'static str {
        match self {
            DocumentType::Resume => "Resume",
            DocumentType::Academic => "Academic",
            DocumentType::General => "General",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw evidence gathered before the decision is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierSignals {
    pub has_resume_word: bool,
    pub has_contact: bool,
    pub resume_score: usize,
    pub academic_score: usize,
}

impl ClassifierSignals {
    /// Explicit self-labeling, then contact plus resume structure, outrank academic
    /// structure: a CV may legitimately carry an "Introduction" line.
    pub fn decide(&self) -> DocumentType {
        if self.has_resume_word
            || (self.has_contact && self.resume_score >= 2 && self.academic_score <= 1)
        {
            DocumentType::Resume
        } else if self.academic_score >= 2 {
            DocumentType::Academic
        } else {
            DocumentType::General
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentClassifier {
    resume_word: Regex,
    phone: Regex,
    profile_link: Regex,
    resume_headings: Regex,
    academic_headings: Regex,
}

impl DocumentClassifier {
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            resume_word: Regex::new(RESUME_WORD)?,
            phone: Regex::new(PHONE_BOUNDED)?,
            profile_link: Regex::new(PROFILE_LINK)?,
            resume_headings: Regex::new(RESUME_HEADINGS)?,
            academic_headings: Regex::new(ACADEMIC_HEADINGS)?,
        })
    }

    pub fn signals(&self, text: &str, patterns: &Patterns) -> ClassifierSignals {
        let has_email = patterns.email.is_match(text);
        let has_phone = self.phone.is_match(text);
        let has_link = self.profile_link.is_match(&text.to_lowercase());

        ClassifierSignals {
            has_resume_word: self.resume_word.is_match(text),
            has_contact: has_email || has_phone || has_link,
            resume_score: distinct_headings(&self.resume_headings, text),
            academic_score: distinct_headings(&self.academic_headings, text),
        }
    }

    pub fn classify(&self, text: &str, patterns: &Patterns) -> DocumentType {
        self.signals(text, patterns).decide()
    }
}

fn distinct_headings(re: &Regex, text: &str) -> usize {
    re.find_iter(text)
        .map(|m| m.as_str().trim().to_lowercase())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::params::default_section_specs;

    fn classify(text: &str) -> DocumentType {
        let patterns = Patterns::compile(&default_section_specs()).unwrap();
        DocumentClassifier::compile().unwrap().classify(text, &patterns)
    }

    #[test]
    fn test_resume_with_label_email_and_headings() {
        let text = "Resume\njohn.smith@mail.com\nEducation\nBSc Physics\nSkills\nRust\nExperience\nAcme Corp";
        assert_eq!(classify(text), DocumentType::Resume);
    }

    #[test]
    fn test_resume_from_contact_and_structure_without_label() {
        let text = "John Smith\n+1 5551234567\nEducation\nMIT\nProjects\nA compiler\n";
        assert_eq!(classify(text), DocumentType::Resume);
    }

    #[test]
    fn test_academic_headings() {
        let text = "Abstract\nWe study things.\nIntroduction\nThings matter.\nConclusion\nThey do.\nReferences\n[1] Someone.";
        assert_eq!(classify(text), DocumentType::Academic);
    }

    #[test]
    fn test_academic_structure_beats_contact_without_label() {
        let text = "author@uni.edu\nAbstract\nx\nIntroduction\ny\nMethods\nz\nEducation\nq\nSkills\nr";
        assert_eq!(classify(text), DocumentType::Academic);
    }

    #[test]
    fn test_plain_prose_is_general() {
        let text = "The river wound through the valley. Farmers tended their fields in the morning light.";
        assert_eq!(classify(text), DocumentType::General);
    }

    #[test]
    fn test_repeated_headings_count_once() {
        let patterns = Patterns::compile(&default_section_specs()).unwrap();
        let signals = DocumentClassifier::compile()
            .unwrap()
            .signals("Skills\nSkills\nskills\n", &patterns);
        assert_eq!(signals.resume_score, 1);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let text = "Abstract\nIntroduction\nResults\n";
        let first = classify(text);
        for _ in 0..5 {
            assert_eq!(classify(text), first);
        }
    }

    #[test]
    fn test_label_display() {
        assert_eq!(DocumentType::Academic.to_string(), "Academic");
    }
}
