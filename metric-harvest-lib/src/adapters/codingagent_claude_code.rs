//! Claude Code telemetry, as listed in its monitoring guide

use super::literal::{LiteralComponent, LiteralMetric, literal_metrics, metric_literal};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::model::{Confidence, ExtractionMethod, FetchResult, InstrumentType, RawMetric, SourceCategory};
use chrono::Utc;

const DOCS_URL: &str = "https://github.com/anthropics/claude-code-monitoring-guide";

const COMPONENT: LiteralComponent = LiteralComponent {
    component_name: "claude-code",
    source_location: "",
};

const SESSION: &[LiteralMetric] = &[
    metric_literal!("claude_code.session.count", "Number of Claude Code sessions started", "count", Counter),
    metric_literal!("claude_code.active_time.total", "Total active time spent in sessions", "s", Counter),
];

const PRODUCTIVITY: &[LiteralMetric] = &[
    metric_literal!("claude_code.lines_of_code.count", "Number of lines of code added or removed", "count", Counter, ["type"]),
    metric_literal!("claude_code.pull_request.count", "Number of pull requests created", "count", Counter),
    metric_literal!("claude_code.commit.count", "Number of commits created", "count", Counter),
    metric_literal!(
        "claude_code.code_edit_tool.decision",
        "Tool invocation decisions made during coding",
        "count",
        Counter,
        ["tool", "decision", "language"]
    ),
];

const USAGE: &[LiteralMetric] = &[
    metric_literal!("claude_code.cost.usage", "Cost of API usage in USD", "USD", Counter, ["model"]),
    metric_literal!("claude_code.token.usage", "Number of tokens consumed", "tokens", Counter, ["type", "model"]),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ClaudeCodeAdapter;

#[async_trait::async_trait]
impl Adapter for ClaudeCodeAdapter {
    fn name(&self) -> &'static str {
        "codingagent-claude-code"
    }

    fn source_category(&self) -> SourceCategory {
        SourceCategory::CodingAgent
    }

    fn confidence(&self) -> Confidence {
        Confidence::Documented
    }

    fn extraction_method(&self) -> ExtractionMethod {
        ExtractionMethod::Scraped
    }

    fn repo_url(&self) -> &'static str {
        DOCS_URL
    }

    async fn fetch(&self, ctx: &Context, _options: &FetchOptions) -> Result<FetchResult> {
        ctx.check()?;
        Ok(FetchResult::documentation(Utc::now()))
    }

    async fn extract(&self, ctx: &Context, _snapshot: &FetchResult) -> Result<Vec<RawMetric>> {
        ctx.check()?;
        Ok(literal_metrics(self, COMPONENT, &[SESSION, PRODUCTIVITY, USAGE]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Attribute;

    #[tokio::test]
    async fn test_extract_returns_every_literal() {
        let metrics = ClaudeCodeAdapter
            .extract(&Context::new(), &FetchResult::documentation(Utc::now()))
            .await
            .unwrap();

        assert_eq!(metrics.len(), 8);
        assert!(metrics.iter().all(|m| m.component_name == "claude-code"));
        assert!(metrics.iter().all(|m| m.source_category == SourceCategory::CodingAgent));
        assert!(metrics.iter().all(|m| m.instrument_type == InstrumentType::Counter));
    }

    #[tokio::test]
    async fn test_literal_attributes() {
        let metrics = ClaudeCodeAdapter
            .extract(&Context::new(), &FetchResult::documentation(Utc::now()))
            .await
            .unwrap();

        let tokens = metrics.iter().find(|m| m.name == "claude_code.token.usage").unwrap();
        assert_eq!(tokens.unit, "tokens");
        assert_eq!(tokens.attributes, vec![Attribute::string("type"), Attribute::string("model")]);

        let sessions = metrics.iter().find(|m| m.name == "claude_code.session.count").unwrap();
        assert!(sessions.attributes.is_empty());
    }
}
