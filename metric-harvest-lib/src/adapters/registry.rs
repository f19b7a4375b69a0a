use super::{
    Adapter, AzureVmAdapter, CadvisorAdapter, ClaudeCodeAdapter, ClickhouseAdapter, CloudwatchLambdaAdapter, CockroachdbAdapter,
    CodexAdapter, CollectorContribAdapter, GcpAdapter, GeminiAdapter, KafkaAdapter, MemcachedAdapter, NodeAdapter, OtelJavaAdapter,
    OtelRustAdapter, PostgresAdapter, RedisAdapter, SemconvAdapter,
};
use crate::fetch::GitFetcher;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Name-keyed table of adapters.
///
/// Populated once at startup and read afterwards. Iteration order is unspecified.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    adapters: HashMap<&'static str, Arc<dyn Adapter>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in adapter, with repository snapshots under `cache_root`.
    #[must_use]
    pub fn with_defaults(cache_root: &Path) -> Self {
        let fetcher = GitFetcher::new(cache_root);
        let mut registry = Self::new();

        registry.register(Arc::new(SemconvAdapter::new(fetcher.clone())));
        registry.register(Arc::new(CollectorContribAdapter::new(fetcher.clone())));
        registry.register(Arc::new(OtelJavaAdapter::new(fetcher.clone())));
        registry.register(Arc::new(OtelRustAdapter::new(fetcher.clone())));
        registry.register(Arc::new(CadvisorAdapter::new(fetcher.clone())));
        registry.register(Arc::new(CockroachdbAdapter::new(fetcher.clone())));
        registry.register(Arc::new(PostgresAdapter::new(fetcher.clone())));
        registry.register(Arc::new(KafkaAdapter::new(fetcher.clone())));
        registry.register(Arc::new(NodeAdapter::new(fetcher.clone())));
        registry.register(Arc::new(RedisAdapter::new(fetcher.clone())));
        registry.register(Arc::new(MemcachedAdapter::new(fetcher.clone())));
        registry.register(Arc::new(ClickhouseAdapter::new(fetcher.clone())));
        registry.register(Arc::new(CodexAdapter::new(fetcher.clone())));
        registry.register(Arc::new(GeminiAdapter::new(fetcher)));
        registry.register(Arc::new(ClaudeCodeAdapter));
        registry.register(Arc::new(CloudwatchLambdaAdapter));
        registry.register(Arc::new(AzureVmAdapter));

        for gcp in GcpAdapter::all() {
            registry.register(Arc::new(gcp));
        }

        registry
    }

    /// Add an adapter, silently replacing any adapter registered under the same name.
    pub fn register(&mut self, adapter: Arc<dyn Adapter>) {
        let _ = self.adapters.insert(adapter.name(), adapter);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Adapter>> {
        self.adapters.get(name).map(Arc::clone)
    }

    #[must_use]
    pub fn all(&self) -> Vec<Arc<dyn Adapter>> {
        self.adapters.values().map(Arc::clone).collect()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.adapters.keys().copied().collect()
    }

    /// Adapter names in lexical order.
    #[must_use]
    pub fn sorted_names(&self) -> Vec<&'static str> {
        let mut names = self.names();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use crate::adapters::FetchOptions;
    use crate::context::Context;
    use crate::model::{Confidence, ExtractionMethod, FetchResult, RawMetric, SourceCategory};
    use chrono::Utc;

    #[derive(Debug)]
    struct Fixed(&'static str, Confidence);

    #[async_trait::async_trait]
    impl Adapter for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn source_category(&self) -> SourceCategory {
            SourceCategory::Exporter
        }

        fn confidence(&self) -> Confidence {
            self.1
        }

        fn extraction_method(&self) -> ExtractionMethod {
            ExtractionMethod::Scraped
        }

        fn repo_url(&self) -> &'static str {
            ""
        }

        async fn fetch(&self, _ctx: &Context, _options: &FetchOptions) -> Result<FetchResult> {
            Ok(FetchResult::documentation(Utc::now()))
        }

        async fn extract(&self, _ctx: &Context, _snapshot: &FetchResult) -> Result<Vec<RawMetric>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_defaults_are_reflexive() {
        let registry = Registry::with_defaults(Path::new("unused-cache"));
        assert_eq!(registry.len(), 26);

        for adapter in registry.all() {
            let found = registry.get(adapter.name()).unwrap();
            assert!(Arc::ptr_eq(&found, &adapter));
        }
    }

    #[test]
    fn test_default_names() {
        let names = Registry::with_defaults(Path::new("unused-cache")).sorted_names();
        assert_eq!(
            names,
            vec![
                "azure-vm",
                "cloudwatch-lambda",
                "codingagent-claude-code",
                "codingagent-codex",
                "codingagent-gemini",
                "gcp-cloudfunctions",
                "gcp-cloudrun",
                "gcp-cloudsql",
                "gcp-compute",
                "gcp-gke",
                "gcp-loadbalancing",
                "gcp-pubsub",
                "gcp-storage",
                "kubernetes-cadvisor",
                "otel-collector-contrib",
                "otel-java",
                "otel-rust",
                "otel-semconv",
                "prometheus-clickhouse",
                "prometheus-cockroachdb",
                "prometheus-kafka",
                "prometheus-memcached",
                "prometheus-node",
                "prometheus-postgres",
                "prometheus-redis",
            ]
        );
    }

    #[test]
    fn test_reregistration_overwrites() {
        let mut registry = Registry::new();
        registry.register(Arc::new(Fixed("dup", Confidence::Derived)));
        registry.register(Arc::new(Fixed("dup", Confidence::Authoritative)));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("dup").unwrap().confidence(), Confidence::Authoritative);
    }

    #[test]
    fn test_sorted_names_ignore_registration_order() {
        let mut registry = Registry::new();
        registry.register(Arc::new(Fixed("zeta", Confidence::Derived)));
        registry.register(Arc::new(Fixed("alpha", Confidence::Derived)));
        registry.register(Arc::new(Fixed("mid", Confidence::Derived)));

        assert_eq!(registry.sorted_names(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_unknown_name() {
        assert!(Registry::new().get("nope").is_none());
        assert!(Registry::new().is_empty());
    }
}
