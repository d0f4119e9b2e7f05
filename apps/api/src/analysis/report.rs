/// One rendered block of a report: an optional heading line and a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBlock {
    pub heading: Option<String>,
    pub body: String,
}

impl ReportBlock {
    pub fn titled(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            body: body.into(),
        }
    }

    pub fn plain(body: impl Into<String>) -> Self {
        Self {
            heading: None,
            body: body.into(),
        }
    }

    /// A titled block whose body is a `- item` list.
    pub fn bullets<I, S>(heading: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let body = items
            .into_iter()
            .map(|item| format!("- {}", item.as_ref()))
            .collect::<Vec<_>>()
            .join("\n");
        Self::titled(heading, body)
    }

    fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    fn render(&self) -> String {
        match &self.heading {
            Some(heading) => format!("{}\n{}", heading, self.body.trim_end()),
            None => self.body.trim_end().to_string(),
        }
    }
}

/// Ordered report blocks. Blocks with an empty body are dropped when rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    blocks: Vec<ReportBlock>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: ReportBlock) {
        self.blocks.push(block);
    }

    /// Blank-line separated text, or `None` if every block was empty.
    pub fn render(&self) -> Option<String> {
        let rendered = self
            .blocks
            .iter()
            .filter(|b| !b.is_empty())
            .map(ReportBlock::render)
            .collect::<Vec<_>>()
            .join("\n\n");
        let rendered = rendered.trim();
        if rendered.is_empty() {
            None
        } else {
            Some(rendered.to_string())
        }
    }
}

/// Hands out sequential section numbers in emitted order.
#[derive(Debug, Default)]
pub struct SectionNumbers(u32);

impl SectionNumbers {
    pub fn heading(&mut self, title: &str) -> String {
        self.0 += 1;
        format!("{}) {}", self.0, title)
    }
}
