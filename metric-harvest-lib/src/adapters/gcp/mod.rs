//! Google Cloud Monitoring platform metrics
//!
//! Each supported service is one adapter named `gcp-<service>`. The tables follow the
//! published metric lists, so metric names keep their `<service>.googleapis.com/...` form.

mod cloudfunctions;
mod cloudrun;
mod cloudsql;
mod compute;
mod gke;
mod loadbalancing;
mod pubsub;
mod storage;

use super::literal::{LiteralComponent, LiteralMetric, literal_metrics};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::model::{Confidence, ExtractionMethod, FetchResult, RawMetric, SourceCategory};
use chrono::Utc;

/// One Cloud Monitoring service and its metric tables.
#[derive(Debug)]
pub struct GcpService {
    name: &'static str,
    docs_url: &'static str,
    component: LiteralComponent,
    groups: &'static [&'static [LiteralMetric]],
}

const SERVICES: &[GcpService] = &[
    cloudfunctions::SERVICE,
    cloudrun::SERVICE,
    cloudsql::SERVICE,
    compute::SERVICE,
    gke::SERVICE,
    loadbalancing::SERVICE,
    pubsub::SERVICE,
    storage::SERVICE,
];

#[derive(Debug, Clone, Copy)]
pub struct GcpAdapter {
    service: &'static GcpService,
}

impl GcpAdapter {
    /// One adapter per supported service.
    pub fn all() -> impl Iterator<Item = Self> {
        SERVICES.iter().map(|service| Self { service })
    }
}

#[async_trait::async_trait]
impl Adapter for GcpAdapter {
    fn name(&self) -> &'static str {
        self.service.name
    }

    fn source_category(&self) -> SourceCategory {
        SourceCategory::CloudPlatform
    }

    fn confidence(&self) -> Confidence {
        Confidence::Documented
    }

    fn extraction_method(&self) -> ExtractionMethod {
        ExtractionMethod::Scraped
    }

    fn repo_url(&self) -> &'static str {
        self.service.docs_url
    }

    async fn fetch(&self, ctx: &Context, _options: &FetchOptions) -> Result<FetchResult> {
        ctx.check()?;
        Ok(FetchResult::documentation(Utc::now()))
    }

    async fn extract(&self, ctx: &Context, _snapshot: &FetchResult) -> Result<Vec<RawMetric>> {
        ctx.check()?;
        Ok(literal_metrics(self, self.service.component, self.service.groups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::InstrumentType;
    use std::collections::HashSet;

    async fn extract(name: &str) -> Vec<RawMetric> {
        let adapter = GcpAdapter::all().find(|a| a.name() == name).unwrap();
        let ctx = Context::new();
        let snapshot = adapter.fetch(&ctx, &FetchOptions::default()).await.unwrap();
        adapter.extract(&ctx, &snapshot).await.unwrap()
    }

    #[test]
    fn test_service_names() {
        let names: Vec<_> = GcpAdapter::all().map(|a| a.name()).collect();
        assert_eq!(
            names,
            vec![
                "gcp-cloudfunctions",
                "gcp-cloudrun",
                "gcp-cloudsql",
                "gcp-compute",
                "gcp-gke",
                "gcp-loadbalancing",
                "gcp-pubsub",
                "gcp-storage",
            ]
        );
    }

    #[tokio::test]
    async fn test_table_sizes() {
        let mut sizes = Vec::new();
        for adapter in GcpAdapter::all() {
            sizes.push((adapter.name(), extract(adapter.name()).await.len()));
        }

        assert_eq!(
            sizes,
            vec![
                ("gcp-cloudfunctions", 6),
                ("gcp-cloudrun", 14),
                ("gcp-cloudsql", 46),
                ("gcp-compute", 29),
                ("gcp-gke", 40),
                ("gcp-loadbalancing", 24),
                ("gcp-pubsub", 29),
                ("gcp-storage", 12),
            ]
        );
    }

    #[tokio::test]
    async fn test_names_are_unique_and_scoped_to_service() {
        for adapter in GcpAdapter::all() {
            let metrics = extract(adapter.name()).await;
            let location = adapter.service.component.source_location;

            let unique: HashSet<_> = metrics.iter().map(|m| m.name.as_str()).collect();
            assert_eq!(unique.len(), metrics.len(), "{}", adapter.name());
            assert!(metrics.iter().all(|m| m.name.starts_with(location)), "{}", adapter.name());
            assert!(metrics.iter().all(|m| m.source_location == location));
            assert!(metrics.iter().all(|m| m.source_category == SourceCategory::CloudPlatform));
        }
    }

    #[tokio::test]
    async fn test_compute_literals() {
        let metrics = extract("gcp-compute").await;
        let cpu = metrics
            .iter()
            .find(|m| m.name == "compute.googleapis.com/instance/cpu/utilization")
            .unwrap();
        assert_eq!(cpu.unit, "1");
        assert_eq!(cpu.instrument_type, InstrumentType::Gauge);
        assert_eq!(cpu.component_name, "Compute Engine");
    }

    #[tokio::test]
    async fn test_extract_is_repeatable() {
        let adapter = GcpAdapter::all().next().unwrap();
        let ctx = Context::new();
        let snapshot = FetchResult::documentation(Utc::now());
        let first = adapter.extract(&ctx, &snapshot).await.unwrap();
        let second = adapter.extract(&ctx, &snapshot).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_cancelled_context() {
        let ctx = Context::new();
        ctx.cancel();
        let adapter = GcpAdapter::all().next().unwrap();
        let err = adapter.fetch(&ctx, &FetchOptions::default()).await.unwrap_err();
        assert_eq!(ErrorKind::of(&err), ErrorKind::Cancelled);
    }
}
