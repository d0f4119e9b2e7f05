//! Regex-based finders for structured facts and resume sections.
//!
//! Every finder returns `Option`/`Vec`; a pattern that does not match is a normal
//! outcome, never an error.

use regex::Regex;

use crate::analysis::params::{ResumeSection, SectionSpec};

const EMAIL: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";
const PHONE: &str = r"(?:\+?\d{1,3}[- ]?)?\d{10}";
const LINKEDIN: &str = r"(?i)https?://(www\.)?linkedin\.com/[^\s]+";
const GITHUB: &str = r"(?i)https?://(www\.)?github\.com/[^\s]+";
const PORTFOLIO: &str =
    r"(?i)https?://[^\s]+\.(?:vercel\.app|netlify\.app|github\.io|com/portfolio[^\s]*)";
const NAME_LABEL: &str = r"(?i)\bname\s*[:|-]\s*([A-Za-z][A-Za-z .'-]{2,})";
const EDUCATION_LINE: &str =
    r"(?i)\b(b\.?tech|bachelor|b\.e\.|degree|university|institute|college)\b";
const ANY_URL: &str = r"https?://[^\s]+";
const SLASH_DATE: &str = r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b";
const YEAR: &str = r"\b\d{4}\b";
/// Numbered, roman-numeral, "Chapter N" or upper-case heading lines.
const HEADING_LINE: &str = r"^(\d+\.|[IVX]+\.|Chapter\s+\d+|[A-Z][A-Z\s\-]{3,})$";
const SECTION_TRAILER: &str = r"[:\n\r]+";
const SPACE_BEFORE_NEWLINE: &str = r"\s+\n";

/// A section heading matcher plus its capture window.
#[derive(Debug, Clone)]
struct SectionMatcher {
    section: ResumeSection,
    heading: Regex,
    window: usize,
}

/// Contact facts found in a document. Absent fields were not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

impl ContactProfile {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.linkedin.is_none()
            && self.github.is_none()
            && self.portfolio.is_none()
    }
}

/// Compiled pattern set. Built once per engine.
#[derive(Debug, Clone)]
pub struct Patterns {
    pub(crate) email: Regex,
    pub(crate) phone: Regex,
    linkedin: Regex,
    github: Regex,
    portfolio: Regex,
    name_label: Regex,
    education_line: Regex,
    any_url: Regex,
    slash_date: Regex,
    year: Regex,
    heading_line: Regex,
    space_before_newline: Regex,
    sections: Vec<SectionMatcher>,
}

impl Patterns {
    pub fn compile(section_specs: &[SectionSpec]) -> Result<Self, regex::Error> {
        let sections = section_specs
            .iter()
            .map(|spec| {
                let alternatives: Vec<String> =
                    spec.headings.iter().map(|h| regex::escape(h)).collect();
                let heading = Regex::new(&format!(
                    "(?i)({}){}",
                    alternatives.join("|"),
                    SECTION_TRAILER
                ))?;
                Ok(SectionMatcher {
                    section: spec.section,
                    heading,
                    window: spec.window,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            email: Regex::new(EMAIL)?,
            phone: Regex::new(PHONE)?,
            linkedin: Regex::new(LINKEDIN)?,
            github: Regex::new(GITHUB)?,
            portfolio: Regex::new(PORTFOLIO)?,
            name_label: Regex::new(NAME_LABEL)?,
            education_line: Regex::new(EDUCATION_LINE)?,
            any_url: Regex::new(ANY_URL)?,
            slash_date: Regex::new(SLASH_DATE)?,
            year: Regex::new(YEAR)?,
            heading_line: Regex::new(HEADING_LINE)?,
            space_before_newline: Regex::new(SPACE_BEFORE_NEWLINE)?,
            sections,
        })
    }

    pub fn email(&self, text: &str) -> Option<String> {
        first_match(&self.email, text)
    }

    pub fn phone(&self, text: &str) -> Option<String> {
        first_match(&self.phone, text)
    }

    pub fn linkedin(&self, text: &str) -> Option<String> {
        first_match(&self.linkedin, text)
    }

    pub fn github(&self, text: &str) -> Option<String> {
        first_match(&self.github, text)
    }

    pub fn portfolio(&self, text: &str) -> Option<String> {
        first_match(&self.portfolio, text)
    }

    pub fn has_url(&self, text: &str) -> bool {
        self.any_url.is_match(text)
    }

    /// `Name: X` label first, otherwise derived from the email's local part.
    pub fn name(&self, text: &str, email: Option<&str>) -> Option<String> {
        self.name_label
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .or_else(|| email.and_then(name_from_email))
    }

    /// All contact fields at once.
    pub fn contact_profile(&self, text: &str) -> ContactProfile {
        let email = self.email(text);
        ContactProfile {
            name: self.name(text, email.as_deref()),
            phone: self.phone(text),
            linkedin: self.linkedin(text),
            github: self.github(text),
            portfolio: self.portfolio(text),
            email,
        }
    }

    /// Lines that look like education entries, first `limit` joined with "; ".
    pub fn education(&self, text: &str, limit: usize) -> Option<String> {
        let lines: Vec<&str> = text
            .lines()
            .filter(|line| self.education_line.is_match(line))
            .map(str::trim)
            .take(limit)
            .collect();
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("; "))
        }
    }

    /// Body of a named resume section: a bounded window of characters following the
    /// first heading match, with whitespace runs before newlines collapsed.
    pub fn section_body(&self, text: &str, section: ResumeSection) -> Option<String> {
        let matcher = self.sections.iter().find(|m| m.section == section)?;
        let heading = matcher.heading.find(text)?;
        let rest = &text[heading.end()..];
        let window_end = rest
            .char_indices()
            .nth(matcher.window)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let body = self
            .space_before_newline
            .replace_all(&rest[..window_end], "\n");
        let body = body.trim();
        if body.is_empty() {
            None
        } else {
            Some(body.to_string())
        }
    }

    /// Emails, URLs, slash dates and bare years, deduplicated in first-seen order.
    ///
    /// Each pattern is scanned in turn, so all emails precede all URLs, and so on.
    pub fn entities(&self, text: &str, limit: usize) -> Vec<String> {
        let mut unique: Vec<String> = Vec::new();
        for re in [&self.email, &self.any_url, &self.slash_date, &self.year] {
            for m in re.find_iter(text) {
                if !unique.iter().any(|e| e == m.as_str()) {
                    unique.push(m.as_str().to_string());
                }
            }
        }
        unique.truncate(limit);
        unique
    }

    /// Whether a single trimmed line is a heading.
    pub fn is_heading(&self, line: &str) -> bool {
        self.heading_line.is_match(line)
    }

    /// Heading lines in document order, at most `limit`.
    pub fn outline(&self, text: &str, limit: usize) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && self.is_heading(l))
            .take(limit)
            .map(String::from)
            .collect()
    }
}

fn first_match(re: &Regex, text: &str) -> Option<String> {
    re.find(text).map(|m| m.as_str().to_string())
}

/// "jane.doe_smith@x.com" → "Jane Doe Smith".
fn name_from_email(email: &str) -> Option<String> {
    let local = email.split('@').next()?;
    let parts: Vec<String> = local
        .split(['.', '_', '-'])
        .filter(|p| !p.is_empty())
        .map(capitalize)
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::params::default_section_specs;

    fn patterns() -> Patterns {
        Patterns::compile(&default_section_specs()).unwrap()
    }

    const RESUME: &str = "Jane Doe\n\
        jane.doe@example.com | +91 9876543210\n\
        https://www.linkedin.com/in/janedoe https://github.com/janedoe\n\
        https://janedoe.vercel.app\n\
        Education\n\
        B.Tech in Computer Science, Example Institute of Technology, 2019-2023\n\
        Skills:\n\
        Rust, Python, SQL   \n\
        Docker\n";

    #[test]
    fn test_contact_profile_fields() {
        let profile = patterns().contact_profile(RESUME);
        assert_eq!(profile.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(profile.phone.as_deref(), Some("+91 9876543210"));
        assert_eq!(
            profile.linkedin.as_deref(),
            Some("https://www.linkedin.com/in/janedoe")
        );
        assert_eq!(profile.github.as_deref(), Some("https://github.com/janedoe"));
        assert_eq!(
            profile.portfolio.as_deref(),
            Some("https://janedoe.vercel.app")
        );
        assert_eq!(profile.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_name_label_wins_over_email() {
        let p = patterns();
        let text = "Name: Ada Lovelace\nada_l@example.com";
        let email = p.email(text);
        assert_eq!(p.name(text, email.as_deref()).as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_name_from_email_splits_separators() {
        assert_eq!(
            name_from_email("mary-jane_o.neil@x.org").as_deref(),
            Some("Mary Jane O Neil")
        );
        assert_eq!(name_from_email("@x.org"), None);
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let profile = patterns().contact_profile("Just some prose without contacts.");
        assert!(profile.is_empty());
    }

    #[test]
    fn test_education_lines() {
        let edu = patterns().education(RESUME, 3).unwrap();
        assert!(edu.starts_with("B.Tech in Computer Science"));
    }

    #[test]
    fn test_section_body_collapses_trailing_spaces() {
        let body = patterns()
            .section_body(RESUME, ResumeSection::Skills)
            .unwrap();
        assert_eq!(body, "Rust, Python, SQL\nDocker");
    }

    #[test]
    fn test_section_body_respects_window() {
        let text = format!("Certifications:\n{}", "x".repeat(2000));
        let body = patterns()
            .section_body(&text, ResumeSection::Certifications)
            .unwrap();
        assert_eq!(body.chars().count(), 600);
    }

    #[test]
    fn test_section_body_absent_without_heading() {
        assert!(patterns()
            .section_body("nothing relevant here", ResumeSection::Projects)
            .is_none());
    }

    #[test]
    fn test_entities_dedup_and_cap() {
        let text = "a@b.co a@b.co https://x.io 12/05/2023 1999 2001 1999";
        let entities = patterns().entities(text, 15);
        assert_eq!(
            entities,
            vec!["a@b.co", "https://x.io", "12/05/2023", "2023", "1999", "2001"]
        );

        let many: String = (1000..1040).map(|y| format!("{y} ")).collect();
        assert_eq!(patterns().entities(&many, 15).len(), 15);
    }

    #[test]
    fn test_heading_detection() {
        let p = patterns();
        assert!(p.is_heading("1."));
        assert!(p.is_heading("IV."));
        assert!(p.is_heading("Chapter 3"));
        assert!(p.is_heading("WORK EXPERIENCE"));
        assert!(!p.is_heading("Work experience"));
        assert!(!p.is_heading("ABC"));
    }

    #[test]
    fn test_outline_limit() {
        let text = (1..=15)
            .map(|i| format!("HEADING {}\nbody", "X".repeat(i)))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(patterns().outline(&text, 10).len(), 10);
    }
}
