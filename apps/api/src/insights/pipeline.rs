//! Insight fallback chain: an ordered list of strategies, first result wins.
//!
//! Standard order:
//! 1. `ExternalSummary`: hosted summarization API (skipped when unconfigured)
//! 2. `GenericInsight`: local generic insight report
//! 3. `StructuredReport`: local resume-structured report
//! 4. `TopWords`: top content-word counts; always yields
//!
//! Each tier is independent and substitutable; `InsightPipeline::new` accepts any
//! ordered list of `Arc<dyn InsightStrategy>`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::analysis::tokenizer::WordCount;
use crate::analysis::InsightEngine;
use crate::summary_client::SummaryClient;

/// The two outcome shapes a caller must distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightOutcome {
    Report(String),
    TopWords(Vec<WordCount>),
}

/// An outcome plus the name of the tier that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    pub outcome: InsightOutcome,
    pub source: &'static str,
}

#[async_trait]
pub trait InsightStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` hands control to the next tier.
    async fn attempt(&self, text: &str) -> Option<InsightOutcome>;
}

// ────────────────────────────────────────────────────────────────────────────
// Tiers
// ────────────────────────────────────────────────────────────────────────────

pub struct ExternalSummary(pub SummaryClient);

#[async_trait]
impl InsightStrategy for ExternalSummary {
    fn name(&self) -> &'static str {
        "external_summary"
    }

    async fn attempt(&self, text: &str) -> Option<InsightOutcome> {
        if !self.0.is_configured() {
            return None;
        }
        match self.0.summarize(text).await {
            Ok(summary) => Some(InsightOutcome::Report(summary)),
            Err(e) => {
                debug!("External summary unavailable: {e}");
                None
            }
        }
    }
}

pub struct GenericInsight(pub Arc<InsightEngine>);

#[async_trait]
impl InsightStrategy for GenericInsight {
    fn name(&self) -> &'static str {
        "generic_insight"
    }

    async fn attempt(&self, text: &str) -> Option<InsightOutcome> {
        self.0.generic_report(text).map(InsightOutcome::Report)
    }
}

pub struct StructuredReport(pub Arc<InsightEngine>);

#[async_trait]
impl InsightStrategy for StructuredReport {
    fn name(&self) -> &'static str {
        "structured_report"
    }

    async fn attempt(&self, text: &str) -> Option<InsightOutcome> {
        self.0.structured_report(text).map(InsightOutcome::Report)
    }
}

pub struct TopWords(pub Arc<InsightEngine>);

#[async_trait]
impl InsightStrategy for TopWords {
    fn name(&self) -> &'static str {
        "top_words"
    }

    async fn attempt(&self, text: &str) -> Option<InsightOutcome> {
        Some(InsightOutcome::TopWords(self.0.top_words(text)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct InsightPipeline {
    strategies: Vec<Arc<dyn InsightStrategy>>,
}

impl InsightPipeline {
    pub fn new(strategies: Vec<Arc<dyn InsightStrategy>>) -> Self {
        Self { strategies }
    }

    /// External service, generic report, structured report, word counts.
    pub fn standard(client: SummaryClient, engine: Arc<InsightEngine>) -> Self {
        Self::new(vec![
            Arc::new(ExternalSummary(client)),
            Arc::new(GenericInsight(engine.clone())),
            Arc::new(StructuredReport(engine.clone())),
            Arc::new(TopWords(engine)),
        ])
    }

    pub fn tier_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Evaluates tiers in order and returns the first result.
    pub async fn run(&self, text: &str) -> Option<PipelineResult> {
        for strategy in &self.strategies {
            if let Some(outcome) = strategy.attempt(text).await {
                info!("Insight produced by tier '{}'", strategy.name());
                return Some(PipelineResult {
                    outcome,
                    source: strategy.name(),
                });
            }
            debug!("Tier '{}' produced nothing, falling through", strategy.name());
        }
        None
    }
}
