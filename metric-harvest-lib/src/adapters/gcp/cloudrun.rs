use crate::adapters::literal::{LiteralComponent, LiteralMetric, metric_literal};
use super::GcpService;
use crate::model::InstrumentType;

const REQUEST: &[LiteralMetric] = &[
    metric_literal!("run.googleapis.com/request_count", "Number of requests reaching the revision", "1", Counter),
    metric_literal!(
        "run.googleapis.com/request_latencies",
        "Distribution of request latency in milliseconds reaching the revision",
        "ms",
        Histogram
    ),
    metric_literal!(
        "run.googleapis.com/response_latencies",
        "Distribution of response latency in milliseconds for requests to the revision",
        "ms",
        Histogram
    ),
    metric_literal!("run.googleapis.com/pending_queue/pending_requests", "Number of requests waiting in the pending queue", "1", Gauge),
];

const CONTAINER: &[LiteralMetric] = &[
    metric_literal!(
        "run.googleapis.com/container/cpu/utilizations",
        "CPU utilization of the container instance divided by the container cpu limit",
        "1",
        Gauge
    ),
    metric_literal!(
        "run.googleapis.com/container/cpu/allocation_time",
        "CPU allocation of the container instance in seconds",
        "s",
        Counter
    ),
    metric_literal!(
        "run.googleapis.com/container/memory/utilizations",
        "Memory utilization of the container instance divided by the container memory limit",
        "1",
        Gauge
    ),
    metric_literal!("run.googleapis.com/container/memory/allocation", "Memory allocation of the container instance in MiB", "MiBy", Gauge),
    metric_literal!(
        "run.googleapis.com/container/startup_latencies",
        "Time from start of container to first request for new instances",
        "ms",
        Histogram
    ),
    metric_literal!(
        "run.googleapis.com/container/network/received_bytes_count",
        "Count of bytes received by the container instance from the network",
        "By",
        Counter
    ),
    metric_literal!(
        "run.googleapis.com/container/network/sent_bytes_count",
        "Count of bytes sent by the container instance over the network",
        "By",
        Counter
    ),
    metric_literal!(
        "run.googleapis.com/container/instance_count",
        "Number of container instances that exist, broken down by state",
        "1",
        Gauge
    ),
    metric_literal!(
        "run.googleapis.com/container/max_request_concurrencies",
        "Maximum number of concurrent requests being served by each container instance",
        "1",
        Gauge
    ),
    metric_literal!(
        "run.googleapis.com/container/billable_instance_time",
        "Billable time aggregated from all container instances",
        "s",
        Counter
    ),
];

pub const SERVICE: GcpService = GcpService {
    name: "gcp-cloudrun",
    docs_url: "https://cloud.google.com/monitoring/api/metrics_gcp#gcp-run",
    component: LiteralComponent {
        component_name: "Cloud Run",
        source_location: "run.googleapis.com",
    },
    groups: &[REQUEST, CONTAINER],
};
