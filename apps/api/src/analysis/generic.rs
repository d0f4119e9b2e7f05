//! Generic insight template, used for every document type.
//!
//! Always leads with an executive summary and key topics. Resumes then get
//! strengths, gaps and a minimal profile; other documents get section highlights,
//! a heading outline and generic actionable insights.

use crate::analysis::classifier::DocumentType;
use crate::analysis::report::{Report, ReportBlock, SectionNumbers};
use crate::analysis::summarizer::SectionSummary;
use crate::analysis::InsightEngine;

const NO_SUMMARY: &str = "No summary available.";

pub fn build_report(engine: &InsightEngine, text: &str) -> Report {
    let params = engine.params();
    let doc_type = engine.detect_document_type(text);
    let topics = engine.key_topics(text, params.key_topic_count);
    let section_summaries = engine.section_summaries(text);
    let summary = engine.overall_summary(text, &section_summaries);

    let mut report = Report::new();
    let mut numbers = SectionNumbers::default();

    report.push(ReportBlock::plain(format!(
        "✅ Document Insight Report\nType: {doc_type}"
    )));

    let summary = if summary.is_empty() { NO_SUMMARY.to_string() } else { summary };
    report.push(ReportBlock::titled(numbers.heading("Executive Summary"), summary));
    push_bullets(&mut report, &mut numbers, "Key Topics", &topics);

    match doc_type {
        DocumentType::Resume => resume_blocks(engine, text, &topics, &mut report, &mut numbers),
        DocumentType::Academic | DocumentType::General => {
            document_blocks(engine, text, &section_summaries, &mut report, &mut numbers)
        }
    }

    report
}

/// Strengths, gaps and a name/email profile. Entities are deliberately left out.
fn resume_blocks(
    engine: &InsightEngine,
    text: &str,
    topics: &[String],
    report: &mut Report,
    numbers: &mut SectionNumbers,
) {
    let templates = &engine.params().templates;
    let patterns = engine.patterns();
    let lower = text.to_lowercase();

    let mut strengths = Vec::new();
    if !topics.is_empty() {
        strengths.push(templates.strength_topics.as_str());
    }
    if patterns.has_url(text) {
        strengths.push(templates.strength_links.as_str());
    }

    let mut gaps = Vec::new();
    if lower.contains("project") || lower.contains("experience") {
        gaps.push(templates.gap_quantify.as_str());
    }
    if !topics.is_empty() {
        gaps.push(templates.gap_keywords.as_str());
    }

    push_bullets(report, numbers, "Strengths", &strengths);
    push_bullets(report, numbers, "Gaps / Opportunities", &gaps);

    let email = patterns.email(text);
    let name = patterns.name(text, email.as_deref());
    let profile: Vec<String> = [
        name.map(|n| format!("Name: {n}")),
        email.map(|e| format!("Email: {e}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    push_bullets(report, numbers, "Basic Profile", &profile);
}

fn document_blocks(
    engine: &InsightEngine,
    text: &str,
    section_summaries: &[SectionSummary],
    report: &mut Report,
    numbers: &mut SectionNumbers,
) {
    let params = engine.params();
    let patterns = engine.patterns();

    let highlights: Vec<String> = section_summaries
        .iter()
        .map(|s| format!("{}: {}", s.title, s.summary))
        .collect();
    push_bullets(report, numbers, "Section Highlights", &highlights);

    let outline = patterns.outline(text, params.outline_limit);
    push_bullets(report, numbers, "Outline (Detected Headings)", &outline);

    let entities = patterns.entities(text, params.entity_limit);
    let mut insights: Vec<&str> = params
        .templates
        .insights_fixed
        .iter()
        .map(String::as_str)
        .collect();
    if entities
        .iter()
        .any(|e| e.starts_with("http://") || e.starts_with("https://"))
    {
        insights.push(params.templates.insight_links.as_str());
    }
    push_bullets(report, numbers, "Actionable Insights", &insights);
}

/// Adds a numbered bullet block, skipping it (and its number) when empty.
fn push_bullets<S: AsRef<str>>(
    report: &mut Report,
    numbers: &mut SectionNumbers,
    title: &str,
    items: &[S],
) {
    if items.is_empty() {
        return;
    }
    report.push(ReportBlock::bullets(numbers.heading(title), items));
}
