//! The adapter contract, the registry, and the concrete adapters
//!
//! An [`Adapter`] is the uniform surface over one upstream source. It composes a fetch
//! strategy (a git snapshot, or a synthetic snapshot for documentation sources) with one
//! extractor. It then stamps each extracted definition with its adapter-level constants
//! to produce [`RawMetric`] records.
//!
//! # Error handling
//!
//! Extraction is resilient: a file that fails to parse is logged and skipped. A missing
//! top-level directory is a [`HarvestError::NotFound`](crate::error::HarvestError::NotFound)
//! because it means the snapshot does not match what the adapter expects. Fetch errors
//! propagate unchanged.

mod azure_vm;
mod cloudwatch_lambda;
mod codingagent_claude_code;
mod codingagent_codex;
mod codingagent_gemini;
mod gcp;
mod kubernetes_cadvisor;
mod literal;
mod otel_collector_contrib;
mod otel_java;
mod otel_rust;
mod otel_semconv;
mod prometheus_clickhouse;
mod prometheus_cockroachdb;
mod prometheus_kafka;
mod prometheus_memcached;
mod prometheus_node;
mod prometheus_postgres;
mod prometheus_redis;
mod registry;
mod repo;

pub use azure_vm::AzureVmAdapter;
pub use cloudwatch_lambda::CloudwatchLambdaAdapter;
pub use codingagent_claude_code::ClaudeCodeAdapter;
pub use codingagent_codex::CodexAdapter;
pub use codingagent_gemini::GeminiAdapter;
pub use gcp::GcpAdapter;
pub use kubernetes_cadvisor::CadvisorAdapter;
pub use otel_collector_contrib::CollectorContribAdapter;
pub use otel_java::OtelJavaAdapter;
pub use otel_rust::OtelRustAdapter;
pub use otel_semconv::SemconvAdapter;
pub use prometheus_clickhouse::ClickhouseAdapter;
pub use prometheus_cockroachdb::CockroachdbAdapter;
pub use prometheus_kafka::KafkaAdapter;
pub use prometheus_memcached::MemcachedAdapter;
pub use prometheus_node::NodeAdapter;
pub use prometheus_postgres::PostgresAdapter;
pub use prometheus_redis::RedisAdapter;
pub use registry::Registry;

use crate::Result;
use crate::context::Context;
use crate::model::{Confidence, ExtractionMethod, FetchResult, RawMetric, SourceCategory};
use core::fmt::Debug;

/// Per-invocation fetch settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Commit to pin; `None` means the remote default branch.
    pub commit: Option<String>,

    /// Refetch even if a matching snapshot is cached.
    pub force: bool,

    /// Shallow clone depth.
    pub depth: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            commit: None,
            force: false,
            depth: 1,
        }
    }
}

/// A named source of metric definitions.
///
/// The identity methods return adapter-level constants: every record an adapter emits
/// carries the same category, confidence, and extraction method.
#[async_trait::async_trait]
pub trait Adapter: Send + Sync + Debug {
    /// Globally unique identifier such as `otel-semconv`.
    fn name(&self) -> &'static str;

    fn source_category(&self) -> SourceCategory;

    fn confidence(&self) -> Confidence;

    fn extraction_method(&self) -> ExtractionMethod;

    /// Where the source lives; a documentation page for literal-table adapters.
    fn repo_url(&self) -> &'static str;

    /// Materialize a snapshot of the source.
    async fn fetch(&self, ctx: &Context, options: &FetchOptions) -> Result<FetchResult>;

    /// Produce records from a snapshot previously returned by [`Adapter::fetch`].
    ///
    /// Extraction is side-effect free: calling it twice on the same snapshot yields the
    /// same records.
    async fn extract(&self, ctx: &Context, snapshot: &FetchResult) -> Result<Vec<RawMetric>>;
}
