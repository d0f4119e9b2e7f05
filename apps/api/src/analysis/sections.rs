use crate::analysis::patterns::Patterns;
use crate::analysis::tokenizer::split_sentences;

/// Title given to text that precedes the first detected heading.
pub const LEADING_SECTION_TITLE: &str = "Document";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub content: String,
}

impl Section {
    fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Splits text into titled sections at heading lines.
///
/// A heading with no following lines produces no section. When fewer than two
/// sections result, the sentence sequence is chunked into synthetic
/// "Section k" blocks of `chunk_sentences` sentences so the whole document stays
/// covered.
pub fn split_into_sections(text: &str, patterns: &Patterns, chunk_sentences: usize) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut title = LEADING_SECTION_TITLE.to_string();
    let mut buffer: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if patterns.is_heading(trimmed) {
            flush(&mut sections, &title, &mut buffer);
            title = trimmed.to_string();
        } else {
            buffer.push(line);
        }
    }
    flush(&mut sections, &title, &mut buffer);

    if sections.len() < 2 {
        return chunk_by_sentences(text, chunk_sentences);
    }
    sections
}

fn flush(sections: &mut Vec<Section>, title: &str, buffer: &mut Vec<&str>) {
    if !buffer.is_empty() {
        sections.push(Section::new(title, buffer.join("\n").trim()));
        buffer.clear();
    }
}

fn chunk_by_sentences(text: &str, chunk_sentences: usize) -> Vec<Section> {
    split_sentences(text)
        .chunks(chunk_sentences.max(1))
        .enumerate()
        .map(|(i, chunk)| Section::new(format!("Section {}", i + 1), chunk.join(" ")))
        .collect()
}

/// Picks at most `cap` sections spread evenly over the whole range, so long
/// documents are not summarized from their first pages only.
pub fn sample_evenly(sections: &[Section], cap: usize) -> Vec<&Section> {
    let n = sections.len();
    if n <= cap {
        return sections.iter().collect();
    }
    if cap <= 1 {
        return sections.iter().take(cap).collect();
    }
    (0..cap)
        .map(|i| {
            let pos = (i * (n - 1)) as f64 / (cap - 1) as f64;
            &sections[pos.round_ties_even() as usize]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::params::default_section_specs;

    fn patterns() -> Patterns {
        Patterns::compile(&default_section_specs()).unwrap()
    }

    #[test]
    fn test_heading_based_sections() {
        let text = "Preface line\nINTRODUCTION\nIntro text here.\nMore intro.\n2.\nNumbered body\nChapter 4\nChapter body";
        let sections = split_into_sections(text, &patterns(), 10);
        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Document", "INTRODUCTION", "2.", "Chapter 4"]);
        assert_eq!(sections[1].content, "Intro text here.\nMore intro.");
    }

    #[test]
    fn test_consecutive_headings_keep_last_title() {
        let text = "OVERVIEW\nSUMMARY\nbody one\nDETAILS\nbody two";
        let sections = split_into_sections(text, &patterns(), 10);
        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["SUMMARY", "DETAILS"]);
    }

    #[test]
    fn test_sentence_chunk_fallback_sizes() {
        let text = (1..=35)
            .map(|i| format!("Sentence number {i} talks about topic {i}."))
            .collect::<Vec<_>>()
            .join(" ");
        let sections = split_into_sections(&text, &patterns(), 10);
        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Section 1", "Section 2", "Section 3", "Section 4"]);
        let sizes: Vec<_> = sections
            .iter()
            .map(|s| split_sentences(&s.content).len())
            .collect();
        assert_eq!(sizes, vec![10, 10, 10, 5]);
    }

    #[test]
    fn test_single_heading_falls_back_to_chunks() {
        let text = "SUMMARY\nOnly one block. It has two sentences.";
        let sections = split_into_sections(text, &patterns(), 10);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Section 1");
    }

    #[test]
    fn test_sample_evenly_spreads_indices() {
        let sections: Vec<Section> = (0..20)
            .map(|i| Section::new(format!("S{i}"), "x"))
            .collect();
        let picked: Vec<_> = sample_evenly(&sections, 8)
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(picked.len(), 8);
        assert_eq!(picked.first(), Some(&"S0"));
        assert_eq!(picked.last(), Some(&"S19"));
        // 19 * 3 / 7 = 8.142..., 19 * 4 / 7 = 10.857...
        assert_eq!(picked[3], "S8");
        assert_eq!(picked[4], "S11");
    }

    #[test]
    fn test_sample_evenly_returns_all_when_under_cap() {
        let sections = vec![Section::new("a", "1"), Section::new("b", "2")];
        assert_eq!(sample_evenly(&sections, 8).len(), 2);
    }
}
