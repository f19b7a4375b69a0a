use crate::adapters::literal::{LiteralComponent, LiteralMetric, metric_literal};
use super::GcpService;
use crate::model::InstrumentType;

const API: &[LiteralMetric] = &[
    metric_literal!(
        "storage.googleapis.com/api/request_count",
        "Delta count of API calls grouped by the API method name and response code",
        "1",
        Counter
    ),
    metric_literal!(
        "storage.googleapis.com/network/received_bytes_count",
        "Delta count of bytes received over the network grouped by the API method name and response code",
        "By",
        Counter
    ),
    metric_literal!(
        "storage.googleapis.com/network/sent_bytes_count",
        "Delta count of bytes sent over the network grouped by the API method name and response code",
        "By",
        Counter
    ),
];

const BUCKET: &[LiteralMetric] = &[
    metric_literal!("storage.googleapis.com/storage/total_bytes", "Total size of all objects in the bucket in bytes", "By", Gauge),
    metric_literal!("storage.googleapis.com/storage/object_count", "Total number of objects per bucket", "1", Gauge),
    metric_literal!(
        "storage.googleapis.com/storage/total_byte_seconds",
        "Delta count of bytes received over the network, grouped by the API method name and response code (used for billing)",
        "By.s",
        Counter
    ),
    metric_literal!(
        "storage.googleapis.com/authn/authentication_count",
        "Delta count of authentication requests grouped by result and authentication method",
        "1",
        Counter
    ),
    metric_literal!(
        "storage.googleapis.com/authz/acl_based_object_access_count",
        "Delta count of requests that result in an object being granted access solely due to object ACLs",
        "1",
        Counter
    ),
    metric_literal!("storage.googleapis.com/authz/acl_operations_count", "Usage of ACL operations broken down by type", "1", Counter),
    metric_literal!(
        "storage.googleapis.com/authz/object_specific_acl_mutation_count",
        "Delta count of changes made to object specific ACLs",
        "1",
        Counter
    ),
    metric_literal!(
        "storage.googleapis.com/replication/meeting_rpo",
        "Whether the most recent write to a dual-region or multi-region bucket was replicated to meet the turbo replication RPO",
        "1",
        Gauge
    ),
    metric_literal!(
        "storage.googleapis.com/replication/objects_pending_replication_count",
        "Number of objects pending replication",
        "1",
        Gauge
    ),
];

pub const SERVICE: GcpService = GcpService {
    name: "gcp-storage",
    docs_url: "https://cloud.google.com/monitoring/api/metrics_gcp#gcp-storage",
    component: LiteralComponent {
        component_name: "Cloud Storage",
        source_location: "storage.googleapis.com",
    },
    groups: &[API, BUCKET],
};
