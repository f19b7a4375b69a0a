use crate::adapters::literal::{LiteralComponent, LiteralMetric, metric_literal};
use super::GcpService;
use crate::model::InstrumentType;

const GENERAL: &[LiteralMetric] = &[
    metric_literal!(
        "cloudsql.googleapis.com/database/up",
        "Indicates if the server is up or not. On-demand instances are spun down if no connections are made for a sufficient amount of time",
        "1",
        Gauge
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/uptime",
        "Delta count of the time in seconds the instance has been running",
        "s",
        Counter
    ),
    metric_literal!("cloudsql.googleapis.com/database/state", "The current serving state of the Cloud SQL instance", "1", Gauge),
    metric_literal!("cloudsql.googleapis.com/database/instance_state", "The current state of the instance", "1", Gauge),
    metric_literal!(
        "cloudsql.googleapis.com/database/available_for_failover",
        "Whether failover operation is available on the instance",
        "1",
        Gauge
    ),
];

const CPU: &[LiteralMetric] = &[
    metric_literal!(
        "cloudsql.googleapis.com/database/cpu/utilization",
        "Current CPU utilization represented as a percentage of the reserved CPU that is currently in use",
        "1",
        Gauge
    ),
    metric_literal!("cloudsql.googleapis.com/database/cpu/reserved_cores", "Number of cores reserved for the database", "1", Gauge),
];

const MEMORY: &[LiteralMetric] = &[
    metric_literal!("cloudsql.googleapis.com/database/memory/utilization", "Memory utilization represented as a percentage", "1", Gauge),
    metric_literal!(
        "cloudsql.googleapis.com/database/memory/total_usage",
        "Total RAM usage in bytes. This includes OS buffer and cache memory",
        "By",
        Gauge
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/memory/usage",
        "RAM usage in bytes excluding OS buffer and cache memory",
        "By",
        Gauge
    ),
    metric_literal!("cloudsql.googleapis.com/database/memory/quota", "Maximum RAM size in bytes", "By", Gauge),
];

const DISK: &[LiteralMetric] = &[
    metric_literal!("cloudsql.googleapis.com/database/disk/bytes_used", "Data utilization in bytes", "By", Gauge),
    metric_literal!("cloudsql.googleapis.com/database/disk/quota", "Maximum data disk size in bytes", "By", Gauge),
    metric_literal!(
        "cloudsql.googleapis.com/database/disk/utilization",
        "The fraction of the disk quota that is currently in use",
        "1",
        Gauge
    ),
    metric_literal!("cloudsql.googleapis.com/database/disk/read_ops_count", "Delta count of data disk read IO operations", "1", Counter),
    metric_literal!("cloudsql.googleapis.com/database/disk/write_ops_count", "Delta count of data disk write IO operations", "1", Counter),
    metric_literal!(
        "cloudsql.googleapis.com/database/disk/bytes_used_by_data_type",
        "Data utilization in bytes broken down by data type",
        "By",
        Gauge
    ),
];

const NETWORK: &[LiteralMetric] = &[
    metric_literal!(
        "cloudsql.googleapis.com/database/network/received_bytes_count",
        "Delta count of bytes received through the network",
        "By",
        Counter
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/network/sent_bytes_count",
        "Delta count of bytes sent through the network",
        "By",
        Counter
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/network/connections",
        "Number of connections to databases on the Cloud SQL instance",
        "1",
        Gauge
    ),
];

const REPLICATION: &[LiteralMetric] = &[
    metric_literal!(
        "cloudsql.googleapis.com/database/replication/replica_lag",
        "Number of seconds the read replica is behind its primary",
        "s",
        Gauge
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/replication/network_lag",
        "Indicates time taken from primary binary log to IO thread on replica",
        "s",
        Gauge
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/replication/replica_byte_count",
        "Number of bytes that the replica has received from the primary",
        "By",
        Counter
    ),
    metric_literal!("cloudsql.googleapis.com/database/replication/state", "The current state of replication", "1", Gauge),
];

const MYSQL: &[LiteralMetric] = &[
    metric_literal!("cloudsql.googleapis.com/database/mysql/queries", "Delta count of statements executed by the server", "1", Counter),
    metric_literal!(
        "cloudsql.googleapis.com/database/mysql/questions",
        "Delta count of statements executed by the server sent by the client",
        "1",
        Counter
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/mysql/received_bytes_count",
        "Delta count of bytes received by the MySQL process",
        "By",
        Counter
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/mysql/sent_bytes_count",
        "Delta count of bytes sent by the MySQL process",
        "By",
        Counter
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/mysql/innodb_buffer_pool_pages_dirty",
        "Number of dirty pages in the InnoDB buffer pool",
        "1",
        Gauge
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/mysql/innodb_buffer_pool_pages_free",
        "Number of free pages in the InnoDB buffer pool",
        "1",
        Gauge
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/mysql/innodb_buffer_pool_pages_total",
        "Total number of pages in the InnoDB buffer pool",
        "1",
        Gauge
    ),
    metric_literal!("cloudsql.googleapis.com/database/mysql/innodb_data_fsyncs", "Delta count of InnoDB fsync() calls", "1", Counter),
    metric_literal!("cloudsql.googleapis.com/database/mysql/innodb_os_log_fsyncs", "Delta count of InnoDB log fsync() calls", "1", Counter),
    metric_literal!("cloudsql.googleapis.com/database/mysql/innodb_pages_read", "Delta count of InnoDB pages read", "1", Counter),
    metric_literal!("cloudsql.googleapis.com/database/mysql/innodb_pages_written", "Delta count of InnoDB pages written", "1", Counter),
    metric_literal!(
        "cloudsql.googleapis.com/database/mysql/replication_seconds_behind_master",
        "Number of seconds the read replica is behind its primary (approximation)",
        "s",
        Gauge
    ),
];

const POSTGRES: &[LiteralMetric] = &[
    metric_literal!(
        "cloudsql.googleapis.com/database/postgresql/num_backends",
        "Number of connections to the Cloud SQL PostgreSQL instance",
        "1",
        Gauge
    ),
    metric_literal!("cloudsql.googleapis.com/database/postgresql/transaction_count", "Delta count of number of transactions", "1", Counter),
    metric_literal!(
        "cloudsql.googleapis.com/database/postgresql/insights/aggregate/execution_time",
        "Accumulated query execution time per user per database. This is the sum of cpu time, IO wait time, lock wait time, process context switch, and scheduling for all the processes involved in the query execution",
        "us",
        Counter
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/postgresql/insights/aggregate/io_time",
        "Accumulated IO time per user per database",
        "us",
        Counter
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/postgresql/insights/aggregate/latencies",
        "Query latency distribution per user per database",
        "us",
        Histogram
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/postgresql/insights/aggregate/lock_time",
        "Accumulated lock wait time per user per database",
        "us",
        Counter
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/postgresql/insights/aggregate/row_count",
        "Total number of rows affected during query execution",
        "1",
        Counter
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/postgresql/insights/aggregate/shared_blk_access_count",
        "Shared blocks (regular tables and indexed) accessed by statement execution",
        "1",
        Counter
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/postgresql/replication/replica_byte_count",
        "Number of bytes that the replica has received from the primary",
        "By",
        Counter
    ),
    metric_literal!(
        "cloudsql.googleapis.com/database/postgresql/vacuum/oldest_transaction_age",
        "Age of the oldest transaction yet to be vacuumed in the Cloud SQL PostgreSQL instance",
        "1",
        Gauge
    ),
];

pub const SERVICE: GcpService = GcpService {
    name: "gcp-cloudsql",
    docs_url: "https://cloud.google.com/monitoring/api/metrics_gcp#gcp-cloudsql",
    component: LiteralComponent {
        component_name: "Cloud SQL",
        source_location: "cloudsql.googleapis.com",
    },
    groups: &[GENERAL, CPU, MEMORY, DISK, NETWORK, REPLICATION, MYSQL, POSTGRES],
};
