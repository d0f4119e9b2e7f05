//! Resume-structured template.
//!
//! Fixed ten-section layout driven entirely by the pattern extractors. Section
//! numbers never shift: a section whose extractor found nothing is left out and the
//! remaining ones keep their number. Sections 8–10 are qualitative commentary and
//! only appear for texts long enough to support it.

use crate::analysis::params::ResumeSection;
use crate::analysis::patterns::ContactProfile;
use crate::analysis::report::{Report, ReportBlock};
use crate::analysis::InsightEngine;

const INTRO: &str =
    "✅ I analyzed your uploaded resume and here's the Document Insight Report for you:";

const EXTRACTED_SECTIONS: &[(ResumeSection, &str)] = &[
    (ResumeSection::Skills, "3. Skills (Extracted)"),
    (ResumeSection::Experience, "4. Experience"),
    (ResumeSection::Projects, "5. Projects (Highlights)"),
    (ResumeSection::Events, "6. Events & Hackathons"),
    (ResumeSection::Certifications, "7. Certifications"),
];

/// `None` when no extractor found anything to report beyond the intro.
pub fn build_report(engine: &InsightEngine, text: &str) -> Option<Report> {
    let params = engine.params();
    let patterns = engine.patterns();
    let profile = patterns.contact_profile(text);

    let mut blocks = Vec::new();
    if !profile.is_empty() {
        blocks.push(ReportBlock::titled("1. Basic Profile", profile_lines(&profile)));
    }

    if let Some(education) = patterns.education(text, params.education_line_limit) {
        blocks.push(ReportBlock::titled("2. Education", education));
    }

    for (section, heading) in EXTRACTED_SECTIONS {
        if let Some(body) = patterns.section_body(text, *section) {
            blocks.push(ReportBlock::titled(*heading, body));
        }
    }

    if text.chars().count() > params.rich_text_chars {
        let templates = &params.templates;
        blocks.push(ReportBlock::titled(
            "8. Strengths",
            templates.structured_strengths.join("\n"),
        ));
        blocks.push(ReportBlock::titled(
            "9. Areas to Improve",
            templates.structured_improvements.join("\n"),
        ));
        blocks.push(ReportBlock::titled(
            "10. ATS & Recruiter View",
            templates.structured_ats.join("\n"),
        ));
    }

    if blocks.is_empty() {
        return None;
    }

    let mut report = Report::new();
    report.push(ReportBlock::plain(INTRO));
    if let Some(name) = &profile.name {
        report.push(ReportBlock::plain(format!("📌 Resume Insights – {name}")));
    }
    for block in blocks {
        report.push(block);
    }
    Some(report)
}

/// `Label: value` lines for the fields that were found.
fn profile_lines(profile: &ContactProfile) -> String {
    [
        ("Name", &profile.name),
        ("Email", &profile.email),
        ("Phone", &profile.phone),
        ("LinkedIn", &profile.linkedin),
        ("GitHub", &profile.github),
        ("Portfolio", &profile.portfolio),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_ref().map(|v| format!("{label}: {v}")))
    .collect::<Vec<_>>()
    .join("\n")
}
