//! Orchestration across adapters
//!
//! [`Harvester::run`] runs every selected adapter in its own task, bounded by a semaphore.
//! Each task fetches a snapshot, extracts records, and turns them into catalog entries.
//! An adapter that fails or panics is reported in its [`AdapterOutcome`] and never stops
//! the others. The surviving entries are deduplicated and sorted for stable output.

mod progress;

pub use progress::Progress;

use crate::adapters::{Adapter, FetchOptions};
use crate::context::Context;
use crate::normalize::{CatalogEntry, dedup};
use core::sync::atomic::{AtomicU64, Ordering};
use core::time::Duration;
use ohno::{AppError, EnrichableExt, app_err};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

const LOG_TARGET: &str = "   harvest";

/// How a harvest runs.
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    pub fetch: FetchOptions,

    /// Deadline applied to each adapter's fetch.
    pub fetch_timeout: Option<Duration>,

    /// Upper bound on adapters running at once.
    pub max_parallel: usize,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            fetch: FetchOptions::default(),
            fetch_timeout: None,
            max_parallel: 4,
        }
    }
}

/// What happened to one adapter.
#[derive(Debug)]
pub struct AdapterOutcome {
    pub adapter: &'static str,

    /// Resolved commit of the snapshot, when the fetch succeeded.
    pub commit: Option<String>,

    /// Records the adapter produced.
    pub extracted: usize,

    /// Records that passed validation.
    pub kept: usize,

    pub duration: Duration,
    pub error: Option<AppError>,
}

impl AdapterOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Records dropped for failing validation.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.extracted.saturating_sub(self.kept)
    }
}

/// The merged result of a harvest.
#[derive(Debug)]
pub struct HarvestReport {
    /// Deduplicated entries sorted by component, name, and adapter.
    pub entries: Vec<CatalogEntry>,

    /// One outcome per adapter, in the order the adapters were given.
    pub outcomes: Vec<AdapterOutcome>,
}

impl HarvestReport {
    pub fn failures(&self) -> impl Iterator<Item = &AdapterOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Runs adapters concurrently and merges their output.
pub struct Harvester {
    progress: Arc<dyn Progress>,
}

impl core::fmt::Debug for Harvester {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Harvester").field("progress", &"<dyn Progress>").finish()
    }
}

impl Harvester {
    #[must_use]
    pub fn new(progress: Arc<dyn Progress>) -> Self {
        Self { progress }
    }

    pub async fn run(&self, ctx: &Context, adapters: Vec<Arc<dyn Adapter>>, options: &HarvestOptions) -> HarvestReport {
        let total = adapters.len() as u64;
        let completed = Arc::new(AtomicU64::new(0));

        self.progress.set_phase("Harvesting");
        self.progress.set_determinate(Box::new({
            let completed = Arc::clone(&completed);
            move || {
                let done = completed.load(Ordering::Relaxed);
                (total, done, format!("{done}/{total} adapters"))
            }
        }));

        let semaphore = Arc::new(Semaphore::new(options.max_parallel.max(1)));
        let mut tasks = Vec::with_capacity(adapters.len());

        for adapter in adapters {
            let name = adapter.name();
            let semaphore = Arc::clone(&semaphore);
            let completed = Arc::clone(&completed);
            let ctx = ctx.clone();
            let options = options.clone();

            let handle = tokio::spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => harvest_one(&ctx, adapter.as_ref(), &options).await,
                    Err(e) => failed(adapter.name(), Duration::ZERO, app_err!("harvest semaphore closed: {e}")),
                };
                let _ = completed.fetch_add(1, Ordering::Relaxed);
                result
            });

            tasks.push((name, handle));
        }

        let mut outcomes = Vec::with_capacity(tasks.len());
        let mut entries = Vec::new();

        for (name, handle) in tasks {
            let (outcome, adapter_entries) = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Adapter '{name}' panicked: {e}");
                    failed(name, Duration::ZERO, app_err!("adapter '{name}' panicked: {e}"))
                }
            };

            if let Some(e) = &outcome.error {
                self.progress.println(&format!("Adapter '{name}' failed: {e:#}"));
            }

            entries.extend(adapter_entries);
            outcomes.push(outcome);
        }

        self.progress.done();

        let mut entries = dedup(entries);
        entries.sort_by(|a, b| {
            (&a.metric.component_name, &a.metric.name, &a.adapter).cmp(&(&b.metric.component_name, &b.metric.name, &b.adapter))
        });

        HarvestReport { entries, outcomes }
    }
}

async fn harvest_one(ctx: &Context, adapter: &dyn Adapter, options: &HarvestOptions) -> (AdapterOutcome, Vec<CatalogEntry>) {
    let name = adapter.name();
    let start = Instant::now();

    log::info!(target: LOG_TARGET, "Fetching '{name}' from {}", adapter.repo_url());
    let fetch_ctx = options.fetch_timeout.map_or_else(|| ctx.clone(), |timeout| ctx.with_timeout(timeout));
    let snapshot = match adapter.fetch(&fetch_ctx, &options.fetch).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Could not fetch '{name}': {e:#}");
            return failed(name, start.elapsed(), e.enrich_with(|| format!("could not fetch adapter '{name}'")));
        }
    };

    log::info!(target: LOG_TARGET, "Extracting '{name}' at {}", snapshot.commit);
    let metrics = match adapter.extract(ctx, &snapshot).await {
        Ok(metrics) => metrics,
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Could not extract '{name}': {e:#}");
            let (mut outcome, entries) = failed(name, start.elapsed(), e.enrich_with(|| format!("could not extract adapter '{name}'")));
            outcome.commit = Some(snapshot.commit);
            return (outcome, entries);
        }
    };

    let extracted = metrics.len();
    let entries: Vec<_> = metrics
        .into_iter()
        .map(|metric| CatalogEntry::new(metric, name, adapter.repo_url(), &snapshot))
        .filter(|entry| match entry.validate() {
            Ok(()) => true,
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Dropping record from '{name}': {e:#}");
                false
            }
        })
        .collect();

    log::info!(target: LOG_TARGET, "Adapter '{name}' produced {} metrics", entries.len());

    let outcome = AdapterOutcome {
        adapter: name,
        commit: Some(snapshot.commit),
        extracted,
        kept: entries.len(),
        duration: start.elapsed(),
        error: None,
    };

    (outcome, entries)
}

fn failed(adapter: &'static str, duration: Duration, error: AppError) -> (AdapterOutcome, Vec<CatalogEntry>) {
    let outcome = AdapterOutcome {
        adapter,
        commit: None,
        extracted: 0,
        kept: 0,
        duration,
        error: Some(error),
    };

    (outcome, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use crate::error::{ErrorKind, HarvestError};
    use crate::model::{
        ComponentType, Confidence, ExtractionMethod, FetchResult, InstrumentType, RawMetric, SourceCategory,
    };
    use chrono::Utc;
    use ohno::{IntoAppError, bail};
    use std::sync::Mutex;

    #[derive(Debug)]
    struct NoOpProgress;

    impl Progress for NoOpProgress {
        fn set_phase(&self, _phase: &str) {}
        fn set_determinate(&self, _callback: Box<dyn Fn() -> (u64, u64, String) + Send + Sync + 'static>) {}
        fn println(&self, _msg: &str) {}
        fn done(&self) {}
    }

    #[derive(Default)]
    struct RecordingProgress {
        lines: Mutex<Vec<String>>,
        phases: Mutex<Vec<String>>,
    }

    impl Progress for RecordingProgress {
        fn set_phase(&self, phase: &str) {
            self.phases.lock().unwrap().push(phase.to_string());
        }
        fn set_determinate(&self, _callback: Box<dyn Fn() -> (u64, u64, String) + Send + Sync + 'static>) {}
        fn println(&self, msg: &str) {
            self.lines.lock().unwrap().push(msg.to_string());
        }
        fn done(&self) {}
    }

    #[derive(Debug, Clone, Copy)]
    enum Behavior {
        Emit,
        FailFetch,
        FailExtract,
        Panic,
        Hang,
    }

    #[derive(Debug)]
    struct TestAdapter {
        name: &'static str,
        behavior: Behavior,
        records: Vec<(&'static str, &'static str, &'static str)>,
    }

    fn test_adapter(name: &'static str, behavior: Behavior) -> Arc<dyn Adapter> {
        test_adapter_with(name, behavior, vec![("m.one", "comp", "first")])
    }

    fn test_adapter_with(
        name: &'static str,
        behavior: Behavior,
        records: Vec<(&'static str, &'static str, &'static str)>,
    ) -> Arc<dyn Adapter> {
        Arc::new(TestAdapter { name, behavior, records })
    }

    fn raw(name: &str, component: &str, description: &str) -> RawMetric {
        RawMetric {
            name: name.to_string(),
            description: description.to_string(),
            unit: "count".to_string(),
            instrument_type: InstrumentType::Gauge,
            attributes: Vec::new(),
            enabled_by_default: true,
            component_type: ComponentType::Platform,
            component_name: component.to_string(),
            source_location: String::new(),
            path: String::new(),
            source_category: SourceCategory::Exporter,
            confidence: Confidence::Derived,
            extraction_method: ExtractionMethod::Syntactic,
        }
    }

    #[async_trait::async_trait]
    impl Adapter for TestAdapter {
        fn name(&self) -> &'static str {
            self.name
        }

        fn source_category(&self) -> SourceCategory {
            SourceCategory::Exporter
        }

        fn confidence(&self) -> Confidence {
            Confidence::Derived
        }

        fn extraction_method(&self) -> ExtractionMethod {
            ExtractionMethod::Syntactic
        }

        fn repo_url(&self) -> &'static str {
            "https://example.com/repo"
        }

        async fn fetch(&self, ctx: &Context, _options: &FetchOptions) -> Result<FetchResult> {
            match self.behavior {
                Behavior::FailFetch => Err(HarvestError::Transient("network down".to_string())).into_app_err("cloning"),
                Behavior::Hang => {
                    ctx.done().await;
                    ctx.check()?;
                    bail!("context finished without error")
                }
                _ => Ok(FetchResult::repository("/snapshots/x", "abc123", Utc::now())),
            }
        }

        async fn extract(&self, _ctx: &Context, _snapshot: &FetchResult) -> Result<Vec<RawMetric>> {
            match self.behavior {
                Behavior::FailExtract => Err(HarvestError::NotFound("metrics/".to_string())).into_app_err("extracting"),
                Behavior::Panic => panic!("adapter bug"),
                _ => Ok(self.records.iter().map(|(n, c, d)| raw(n, c, d)).collect()),
            }
        }
    }

    fn harvester() -> Harvester {
        Harvester::new(Arc::new(NoOpProgress))
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let adapters = vec![
            test_adapter("ok", Behavior::Emit),
            test_adapter("fetch-fails", Behavior::FailFetch),
            test_adapter("extract-fails", Behavior::FailExtract),
            test_adapter("panics", Behavior::Panic),
        ];

        let report = harvester().run(&Context::new(), adapters, &HarvestOptions::default()).await;

        let names: Vec<_> = report.outcomes.iter().map(|o| o.adapter).collect();
        assert_eq!(names, ["ok", "fetch-fails", "extract-fails", "panics"]);

        assert!(report.outcomes[0].is_success());
        assert_eq!(report.outcomes[0].commit.as_deref(), Some("abc123"));
        assert_eq!(report.outcomes[0].kept, 1);

        let fetch_err = report.outcomes[1].error.as_ref().unwrap();
        assert_eq!(ErrorKind::of(fetch_err), ErrorKind::Transient);
        assert!(report.outcomes[1].commit.is_none());

        let extract_err = report.outcomes[2].error.as_ref().unwrap();
        assert_eq!(ErrorKind::of(extract_err), ErrorKind::NotFound);
        assert_eq!(report.outcomes[2].commit.as_deref(), Some("abc123"));

        assert!(report.outcomes[3].error.as_ref().unwrap().to_string().contains("panicked"));

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.failures().count(), 3);
        assert!(report.has_failures());
    }

    #[tokio::test]
    async fn test_entries_are_validated_deduplicated_and_sorted() {
        let adapters = vec![
            test_adapter_with(
                "b-adapter",
                Behavior::Emit,
                vec![("z.metric", "alpha", ""), ("a.metric", "beta", "x"), ("", "beta", "nameless")],
            ),
            test_adapter_with("a-adapter", Behavior::Emit, vec![("z.metric", "alpha", "described")]),
        ];

        let report = harvester().run(&Context::new(), adapters, &HarvestOptions::default()).await;

        let summary: Vec<_> = report
            .entries
            .iter()
            .map(|e| (e.metric.component_name.as_str(), e.metric.name.as_str(), e.adapter.as_str(), e.metric.description.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![("alpha", "z.metric", "a-adapter", "described"), ("beta", "a.metric", "b-adapter", "x")]
        );

        assert_eq!(report.outcomes[0].extracted, 3);
        assert_eq!(report.outcomes[0].kept, 2);
        assert_eq!(report.outcomes[0].dropped(), 1);
        assert!(!report.has_failures());
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_applied() {
        let options = HarvestOptions {
            fetch_timeout: Some(Duration::from_millis(20)),
            ..HarvestOptions::default()
        };

        let report = harvester()
            .run(&Context::new(), vec![test_adapter("slow", Behavior::Hang)], &options)
            .await;

        let err = report.outcomes[0].error.as_ref().unwrap();
        assert_eq!(ErrorKind::of(err), ErrorKind::Transient);
        assert!(report.entries.is_empty());
    }

    #[tokio::test]
    async fn test_failures_are_reported_through_progress() {
        let progress = Arc::new(RecordingProgress::default());
        let harvester = Harvester::new(Arc::clone(&progress) as Arc<dyn Progress>);

        let _ = harvester
            .run(
                &Context::new(),
                vec![test_adapter("broken", Behavior::FailFetch)],
                &HarvestOptions::default(),
            )
            .await;

        assert_eq!(progress.phases.lock().unwrap().as_slice(), ["Harvesting"]);
        let lines = progress.lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Adapter 'broken' failed"));
    }

    #[tokio::test]
    async fn test_no_adapters() {
        let report = harvester().run(&Context::new(), Vec::new(), &HarvestOptions::default()).await;
        assert!(report.entries.is_empty());
        assert!(report.outcomes.is_empty());
    }
}
