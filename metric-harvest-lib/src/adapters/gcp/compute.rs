use crate::adapters::literal::{LiteralComponent, LiteralMetric, metric_literal};
use super::GcpService;
use crate::model::InstrumentType;

const CPU: &[LiteralMetric] = &[
    metric_literal!(
        "compute.googleapis.com/instance/cpu/utilization",
        "Fractional utilization of allocated CPU on the instance",
        "1",
        Gauge
    ),
    metric_literal!("compute.googleapis.com/instance/cpu/usage_time", "CPU usage in seconds", "s", Counter),
    metric_literal!(
        "compute.googleapis.com/instance/cpu/reserved_cores",
        "Number of vCPUs reserved on the host of the instance",
        "1",
        Gauge
    ),
    metric_literal!(
        "compute.googleapis.com/instance/cpu/scheduler_wait_time",
        "Wait time is the time a vCPU is ready to run, but unexpectedly not scheduled to run",
        "s",
        Counter
    ),
    metric_literal!("compute.googleapis.com/instance/cpu/guest_visible_vcpus", "Number of vCPUs visible inside the guest", "1", Gauge),
];

const DISK: &[LiteralMetric] = &[
    metric_literal!("compute.googleapis.com/instance/disk/read_bytes_count", "Count of bytes read from disk", "By", Counter),
    metric_literal!("compute.googleapis.com/instance/disk/read_ops_count", "Count of disk read IO operations", "1", Counter),
    metric_literal!("compute.googleapis.com/instance/disk/write_bytes_count", "Count of bytes written to disk", "By", Counter),
    metric_literal!("compute.googleapis.com/instance/disk/write_ops_count", "Count of disk write IO operations", "1", Counter),
    metric_literal!(
        "compute.googleapis.com/instance/disk/throttled_read_bytes_count",
        "Count of bytes in throttled read operations",
        "By",
        Counter
    ),
    metric_literal!("compute.googleapis.com/instance/disk/throttled_read_ops_count", "Count of throttled read operations", "1", Counter),
    metric_literal!(
        "compute.googleapis.com/instance/disk/throttled_write_bytes_count",
        "Count of bytes in throttled write operations",
        "By",
        Counter
    ),
    metric_literal!("compute.googleapis.com/instance/disk/throttled_write_ops_count", "Count of throttled write operations", "1", Counter),
];

const NETWORK: &[LiteralMetric] = &[
    metric_literal!(
        "compute.googleapis.com/instance/network/received_bytes_count",
        "Count of bytes received from the network",
        "By",
        Counter
    ),
    metric_literal!(
        "compute.googleapis.com/instance/network/received_packets_count",
        "Count of packets received from the network",
        "1",
        Counter
    ),
    metric_literal!("compute.googleapis.com/instance/network/sent_bytes_count", "Count of bytes sent over the network", "By", Counter),
    metric_literal!("compute.googleapis.com/instance/network/sent_packets_count", "Count of packets sent over the network", "1", Counter),
    metric_literal!(
        "compute.googleapis.com/instance/network/received_packets_dropped_count",
        "Count of incoming packets dropped by the network",
        "1",
        Counter
    ),
    metric_literal!(
        "compute.googleapis.com/instance/network/sent_packets_dropped_count",
        "Count of outgoing packets dropped by the network",
        "1",
        Counter
    ),
];

const INSTANCE: &[LiteralMetric] = &[
    metric_literal!("compute.googleapis.com/instance/uptime", "How long the VM has been running in seconds", "s", Counter),
    metric_literal!("compute.googleapis.com/instance/uptime_total", "Elapsed time since the VM was started in seconds", "s", Counter),
    metric_literal!(
        "compute.googleapis.com/instance/memory/balloon/ram_used",
        "Memory used by the VM as seen by the hypervisor",
        "By",
        Gauge
    ),
    metric_literal!(
        "compute.googleapis.com/instance/memory/balloon/ram_size",
        "Total memory of the VM as seen by the hypervisor",
        "By",
        Gauge
    ),
    metric_literal!(
        "compute.googleapis.com/instance/memory/balloon/swap_in_bytes_count",
        "Amount of memory read into the guest from its own swap space",
        "By",
        Counter
    ),
    metric_literal!(
        "compute.googleapis.com/instance/memory/balloon/swap_out_bytes_count",
        "Amount of memory written from the guest to its own swap space",
        "By",
        Counter
    ),
    metric_literal!(
        "compute.googleapis.com/instance/integrity/early_boot_validation_status",
        "Validation status of early boot integrity policy",
        "1",
        Gauge
    ),
    metric_literal!(
        "compute.googleapis.com/instance/integrity/late_boot_validation_status",
        "Validation status of late boot integrity policy",
        "1",
        Gauge
    ),
];

const FIREWALL: &[LiteralMetric] = &[
    metric_literal!(
        "compute.googleapis.com/firewall/dropped_bytes_count",
        "Count of incoming bytes dropped by the firewall",
        "By",
        Counter
    ),
    metric_literal!(
        "compute.googleapis.com/firewall/dropped_packets_count",
        "Count of incoming packets dropped by the firewall",
        "1",
        Counter
    ),
];

pub const SERVICE: GcpService = GcpService {
    name: "gcp-compute",
    docs_url: "https://cloud.google.com/monitoring/api/metrics_gcp#gcp-compute",
    component: LiteralComponent {
        component_name: "Compute Engine",
        source_location: "compute.googleapis.com",
    },
    groups: &[CPU, DISK, NETWORK, INSTANCE, FIREWALL],
};
