use crate::adapters::literal::{LiteralComponent, LiteralMetric, metric_literal};
use super::GcpService;
use crate::model::InstrumentType;

const CONTAINER: &[LiteralMetric] = &[
    metric_literal!("kubernetes.io/container/cpu/core_usage_time", "Cumulative CPU usage on all cores in seconds", "s", Counter),
    metric_literal!("kubernetes.io/container/cpu/limit_cores", "CPU cores limit of the container", "1", Gauge),
    metric_literal!(
        "kubernetes.io/container/cpu/limit_utilization",
        "The fraction of the CPU limit that is currently in use on the instance",
        "1",
        Gauge
    ),
    metric_literal!("kubernetes.io/container/cpu/request_cores", "Number of CPU cores requested by the container", "1", Gauge),
    metric_literal!(
        "kubernetes.io/container/cpu/request_utilization",
        "The fraction of the requested CPU that is currently in use on the instance",
        "1",
        Gauge
    ),
    metric_literal!("kubernetes.io/container/memory/limit_bytes", "Memory limit of the container in bytes", "By", Gauge),
    metric_literal!(
        "kubernetes.io/container/memory/limit_utilization",
        "The fraction of the memory limit that is currently in use on the instance",
        "1",
        Gauge
    ),
    metric_literal!(
        "kubernetes.io/container/memory/page_fault_count",
        "Number of page faults, broken down by type: major and minor",
        "1",
        Counter
    ),
    metric_literal!("kubernetes.io/container/memory/request_bytes", "Memory request of the container in bytes", "By", Gauge),
    metric_literal!(
        "kubernetes.io/container/memory/request_utilization",
        "The fraction of the requested memory that is currently in use on the instance",
        "1",
        Gauge
    ),
    metric_literal!("kubernetes.io/container/memory/used_bytes", "Memory usage in bytes", "By", Gauge),
    metric_literal!("kubernetes.io/container/ephemeral_storage/limit_bytes", "Local ephemeral storage limit in bytes", "By", Gauge),
    metric_literal!("kubernetes.io/container/ephemeral_storage/request_bytes", "Local ephemeral storage request in bytes", "By", Gauge),
    metric_literal!("kubernetes.io/container/ephemeral_storage/used_bytes", "Local ephemeral storage usage in bytes", "By", Gauge),
    metric_literal!("kubernetes.io/container/restart_count", "Number of times the container has restarted", "1", Counter),
    metric_literal!("kubernetes.io/container/uptime", "Time in seconds that the container has been running", "s", Gauge),
];

const NODE: &[LiteralMetric] = &[
    metric_literal!("kubernetes.io/node/cpu/core_usage_time", "Cumulative CPU usage on all cores in seconds", "s", Counter),
    metric_literal!("kubernetes.io/node/cpu/total_cores", "Total number of CPU cores on the node", "1", Gauge),
    metric_literal!("kubernetes.io/node/cpu/allocatable_cores", "Number of allocatable CPU cores on the node", "1", Gauge),
    metric_literal!(
        "kubernetes.io/node/cpu/allocatable_utilization",
        "The fraction of the allocatable CPU that is currently in use on the instance",
        "1",
        Gauge
    ),
    metric_literal!("kubernetes.io/node/memory/total_bytes", "Number of bytes of memory allocatable on the node", "By", Gauge),
    metric_literal!(
        "kubernetes.io/node/memory/allocatable_bytes",
        "Cumulative number of bytes of memory available for scheduling",
        "By",
        Gauge
    ),
    metric_literal!(
        "kubernetes.io/node/memory/allocatable_utilization",
        "The fraction of the allocatable memory that is currently in use on the instance",
        "1",
        Gauge
    ),
    metric_literal!("kubernetes.io/node/memory/used_bytes", "Cumulative number of bytes of memory used on the node", "By", Gauge),
    metric_literal!("kubernetes.io/node/memory/page_fault_count", "Cumulative number of page faults on the node", "1", Counter),
    metric_literal!(
        "kubernetes.io/node/network/received_bytes_count",
        "Cumulative number of bytes received by the node over the network",
        "By",
        Counter
    ),
    metric_literal!(
        "kubernetes.io/node/network/sent_bytes_count",
        "Cumulative number of bytes transmitted by the node over the network",
        "By",
        Counter
    ),
    metric_literal!("kubernetes.io/node/ephemeral_storage/total_bytes", "Total ephemeral storage bytes on the node", "By", Gauge),
    metric_literal!(
        "kubernetes.io/node/ephemeral_storage/allocatable_bytes",
        "Local ephemeral storage bytes available for allocation on the node",
        "By",
        Gauge
    ),
    metric_literal!("kubernetes.io/node/ephemeral_storage/used_bytes", "Local ephemeral storage bytes used by the node", "By", Gauge),
    metric_literal!("kubernetes.io/node/pid_limit", "The max PID of the node", "1", Gauge),
    metric_literal!("kubernetes.io/node/pid_used", "The number of running process IDs on the node", "1", Gauge),
];

const POD: &[LiteralMetric] = &[
    metric_literal!(
        "kubernetes.io/pod/network/received_bytes_count",
        "Cumulative number of bytes received by the pod over the network",
        "By",
        Counter
    ),
    metric_literal!(
        "kubernetes.io/pod/network/sent_bytes_count",
        "Cumulative number of bytes transmitted by the pod over the network",
        "By",
        Counter
    ),
    metric_literal!("kubernetes.io/pod/volume/total_bytes", "Total number of disk bytes available to the pod", "By", Gauge),
    metric_literal!("kubernetes.io/pod/volume/used_bytes", "Number of disk bytes used by the pod", "By", Gauge),
    metric_literal!(
        "kubernetes.io/pod/volume/utilization",
        "The fraction of the volume that is currently being used by the instance",
        "1",
        Gauge
    ),
];

const CLUSTER: &[LiteralMetric] = &[
    metric_literal!(
        "kubernetes.io/node_daemon/cpu/core_usage_time",
        "Cumulative CPU usage of the node-level system daemon in seconds",
        "s",
        Counter
    ),
    metric_literal!("kubernetes.io/node_daemon/memory/used_bytes", "Memory usage by the system daemon in bytes", "By", Gauge),
    metric_literal!(
        "kubernetes.io/autoscaler/container/cpu/per_replica_recommended_request_cores",
        "Recommended CPU request per replica for the container from Vertical Pod Autoscaler",
        "1",
        Gauge
    ),
];

pub const SERVICE: GcpService = GcpService {
    name: "gcp-gke",
    docs_url: "https://cloud.google.com/monitoring/api/metrics_kubernetes",
    component: LiteralComponent {
        component_name: "GKE",
        source_location: "kubernetes.io",
    },
    groups: &[CONTAINER, NODE, POD, CLUSTER],
};
