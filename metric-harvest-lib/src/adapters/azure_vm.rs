//! Azure Monitor platform metrics for virtual machines

use super::literal::{LiteralComponent, LiteralMetric, literal_metrics, metric_literal};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::model::{Confidence, ExtractionMethod, FetchResult, InstrumentType, RawMetric, SourceCategory};
use chrono::Utc;

const DOCS_URL: &str =
    "https://learn.microsoft.com/en-us/azure/azure-monitor/reference/supported-metrics/microsoft-compute-virtualmachines-metrics";

const COMPONENT: LiteralComponent = LiteralComponent {
    component_name: "Virtual Machines",
    source_location: "Microsoft.Compute/virtualMachines",
};

const CPU: &[LiteralMetric] = &[
    metric_literal!(
        "azure.vm.percentage_cpu",
        "The percentage of allocated compute units that are currently in use by the Virtual Machine(s)",
        "%",
        Gauge
    ),
    metric_literal!("azure.vm.cpu_credits_remaining", "Total number of credits available to burst", "1", Gauge),
    metric_literal!("azure.vm.cpu_credits_consumed", "Total number of credits consumed by the Virtual Machine", "1", Gauge),
];

const MEMORY: &[LiteralMetric] = &[
    metric_literal!(
        "azure.vm.available_memory_bytes",
        "Amount of physical memory in bytes immediately available for allocation to a process or for system use",
        "By",
        Gauge
    ),
];

const DISK: &[LiteralMetric] = &[
    metric_literal!("azure.vm.disk_read_bytes", "Bytes read from disk during monitoring period", "By", Counter),
    metric_literal!("azure.vm.disk_write_bytes", "Bytes written to disk during monitoring period", "By", Counter),
    metric_literal!("azure.vm.disk_read_operations_per_sec", "Disk Read IOPS", "{operations}/s", Gauge),
    metric_literal!("azure.vm.disk_write_operations_per_sec", "Disk Write IOPS", "{operations}/s", Gauge),
];

const NETWORK: &[LiteralMetric] = &[
    metric_literal!(
        "azure.vm.network_in_total",
        "The number of bytes received on all network interfaces by the Virtual Machine(s)",
        "By",
        Counter
    ),
    metric_literal!(
        "azure.vm.network_out_total",
        "The number of bytes out on all network interfaces by the Virtual Machine(s)",
        "By",
        Counter
    ),
    metric_literal!(
        "azure.vm.network_in_billable",
        "The number of billable bytes received on all network interfaces by the Virtual Machine(s)",
        "By",
        Counter
    ),
    metric_literal!(
        "azure.vm.network_out_billable",
        "The number of billable bytes out on all network interfaces by the Virtual Machine(s)",
        "By",
        Counter
    ),
];

const DATA_DISK: &[LiteralMetric] = &[
    metric_literal!(
        "azure.vm.data_disk_read_bytes_per_sec",
        "Bytes per second read from a single disk during monitoring period",
        "By/s",
        Gauge
    ),
    metric_literal!(
        "azure.vm.data_disk_write_bytes_per_sec",
        "Bytes per second written to a single disk during monitoring period",
        "By/s",
        Gauge
    ),
    metric_literal!(
        "azure.vm.data_disk_read_operations_per_sec",
        "Read IOPS from a single disk during monitoring period",
        "{operations}/s",
        Gauge
    ),
    metric_literal!(
        "azure.vm.data_disk_write_operations_per_sec",
        "Write IOPS from a single disk during monitoring period",
        "{operations}/s",
        Gauge
    ),
    metric_literal!("azure.vm.data_disk_queue_depth", "Data Disk Queue Depth (or Queue Length)", "1", Gauge),
    metric_literal!(
        "azure.vm.data_disk_bandwidth_consumed_percentage",
        "Percentage of data disk bandwidth consumed per minute",
        "%",
        Gauge
    ),
    metric_literal!(
        "azure.vm.data_disk_iops_consumed_percentage",
        "Percentage of data disk I/Os consumed per minute",
        "%",
        Gauge
    ),
    metric_literal!(
        "azure.vm.data_disk_target_bandwidth",
        "Baseline bytes per second throughput data disk can achieve without bursting",
        "By/s",
        Gauge
    ),
    metric_literal!(
        "azure.vm.data_disk_target_iops",
        "Baseline IOPS data disk can achieve without bursting",
        "{operations}/s",
        Gauge
    ),
    metric_literal!(
        "azure.vm.data_disk_max_burst_bandwidth",
        "Maximum bytes per second throughput data disk can achieve with bursting",
        "By/s",
        Gauge
    ),
    metric_literal!(
        "azure.vm.data_disk_max_burst_iops",
        "Maximum IOPS data disk can achieve with bursting",
        "{operations}/s",
        Gauge
    ),
    metric_literal!(
        "azure.vm.data_disk_used_burst_io_credits_percentage",
        "Percentage of data disk burst I/O credits used so far",
        "%",
        Gauge
    ),
    metric_literal!(
        "azure.vm.data_disk_used_burst_bps_credits_percentage",
        "Percentage of data disk burst bandwidth credits used so far",
        "%",
        Gauge
    ),
];

const OS_DISK: &[LiteralMetric] = &[
    metric_literal!(
        "azure.vm.os_disk_read_bytes_per_sec",
        "Bytes per second read from a single disk during monitoring period for OS disk",
        "By/s",
        Gauge
    ),
    metric_literal!(
        "azure.vm.os_disk_write_bytes_per_sec",
        "Bytes per second written to a single disk during monitoring period for OS disk",
        "By/s",
        Gauge
    ),
    metric_literal!(
        "azure.vm.os_disk_read_operations_per_sec",
        "Read IOPS from a single disk during monitoring period for OS disk",
        "{operations}/s",
        Gauge
    ),
    metric_literal!(
        "azure.vm.os_disk_write_operations_per_sec",
        "Write IOPS from a single disk during monitoring period for OS disk",
        "{operations}/s",
        Gauge
    ),
    metric_literal!("azure.vm.os_disk_queue_depth", "OS Disk Queue Depth (or Queue Length)", "1", Gauge),
    metric_literal!(
        "azure.vm.os_disk_bandwidth_consumed_percentage",
        "Percentage of operating system disk bandwidth consumed per minute",
        "%",
        Gauge
    ),
    metric_literal!(
        "azure.vm.os_disk_iops_consumed_percentage",
        "Percentage of operating system disk I/Os consumed per minute",
        "%",
        Gauge
    ),
    metric_literal!(
        "azure.vm.os_disk_target_bandwidth",
        "Baseline bytes per second throughput OS disk can achieve without bursting",
        "By/s",
        Gauge
    ),
    metric_literal!(
        "azure.vm.os_disk_target_iops",
        "Baseline IOPS OS disk can achieve without bursting",
        "{operations}/s",
        Gauge
    ),
    metric_literal!(
        "azure.vm.os_disk_max_burst_bandwidth",
        "Maximum bytes per second throughput OS disk can achieve with bursting",
        "By/s",
        Gauge
    ),
    metric_literal!("azure.vm.os_disk_max_burst_iops", "Maximum IOPS OS disk can achieve with bursting", "{operations}/s", Gauge),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct AzureVmAdapter;

#[async_trait::async_trait]
impl Adapter for AzureVmAdapter {
    fn name(&self) -> &'static str {
        "azure-vm"
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
        DOCS_URL
    }

    async fn fetch(&self, ctx: &Context, _options: &FetchOptions) -> Result<FetchResult> {
        ctx.check()?;
        Ok(FetchResult::documentation(Utc::now()))
    }

    async fn extract(&self, ctx: &Context, _snapshot: &FetchResult) -> Result<Vec<RawMetric>> {
        ctx.check()?;
        Ok(literal_metrics(self, COMPONENT, &[CPU, MEMORY, DISK, NETWORK, DATA_DISK, OS_DISK]))
    }
}
