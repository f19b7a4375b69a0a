use crate::adapters::literal::{LiteralComponent, LiteralMetric, metric_literal};
use super::GcpService;
use crate::model::InstrumentType;

const METRICS: &[LiteralMetric] = &[
    metric_literal!(
        "cloudfunctions.googleapis.com/function/execution_count",
        "Count of function executions broken down by status",
        "1",
        Counter
    ),
    metric_literal!(
        "cloudfunctions.googleapis.com/function/execution_times",
        "Distribution of functions execution times in nanoseconds",
        "ns",
        Histogram
    ),
    metric_literal!(
        "cloudfunctions.googleapis.com/function/user_memory_bytes",
        "Distribution of each function's working set of memory during execution in bytes",
        "By",
        Histogram
    ),
    metric_literal!("cloudfunctions.googleapis.com/function/network_egress", "Delta of outgoing network traffic in bytes", "By", Counter),
    metric_literal!("cloudfunctions.googleapis.com/function/active_instances", "Number of active function instances", "1", Gauge),
    metric_literal!(
        "cloudfunctions.googleapis.com/function/instance_count",
        "Number of function instances, broken down by state (active, idle)",
        "1",
        Gauge
    ),
];

pub const SERVICE: GcpService = GcpService {
    name: "gcp-cloudfunctions",
    docs_url: "https://cloud.google.com/monitoring/api/metrics_gcp#gcp-cloudfunctions",
    component: LiteralComponent {
        component_name: "Cloud Functions",
        source_location: "cloudfunctions.googleapis.com",
    },
    groups: &[METRICS],
};
