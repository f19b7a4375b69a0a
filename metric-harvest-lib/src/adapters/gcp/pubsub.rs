use crate::adapters::literal::{LiteralComponent, LiteralMetric, metric_literal};
use super::GcpService;
use crate::model::InstrumentType;

const TOPIC: &[LiteralMetric] = &[
    metric_literal!(
        "pubsub.googleapis.com/topic/send_message_operation_count",
        "Cumulative count of publish message operations grouped by result",
        "1",
        Counter
    ),
    metric_literal!(
        "pubsub.googleapis.com/topic/send_request_count",
        "Cumulative count of publish requests grouped by result",
        "1",
        Counter
    ),
    metric_literal!(
        "pubsub.googleapis.com/topic/byte_cost",
        "Cost of operations in bytes, used to measure quota utilization",
        "By",
        Counter
    ),
    metric_literal!("pubsub.googleapis.com/topic/message_sizes", "Distribution of publish message sizes in bytes", "By", Histogram),
    metric_literal!(
        "pubsub.googleapis.com/topic/config_updates_count",
        "Cumulative count of configuration changes for each topic grouped by operation type and result",
        "1",
        Counter
    ),
    metric_literal!(
        "pubsub.googleapis.com/topic/oldest_unacked_message_age_by_region",
        "Age in seconds of the oldest unacknowledged message in a topic by region",
        "s",
        Gauge
    ),
    metric_literal!(
        "pubsub.googleapis.com/topic/num_unacked_messages_by_region",
        "Number of unacknowledged messages in a topic by region",
        "1",
        Gauge
    ),
    metric_literal!(
        "pubsub.googleapis.com/topic/num_retained_acked_messages_by_region",
        "Number of acknowledged messages retained in a topic by region",
        "1",
        Gauge
    ),
];

const SUBSCRIPTION: &[LiteralMetric] = &[
    metric_literal!(
        "pubsub.googleapis.com/subscription/pull_request_count",
        "Cumulative count of pull requests grouped by result",
        "1",
        Counter
    ),
    metric_literal!(
        "pubsub.googleapis.com/subscription/pull_message_operation_count",
        "Cumulative count of pull message operations grouped by result",
        "1",
        Counter
    ),
    metric_literal!(
        "pubsub.googleapis.com/subscription/streaming_pull_response_count",
        "Cumulative count of streaming pull responses grouped by result",
        "1",
        Counter
    ),
    metric_literal!(
        "pubsub.googleapis.com/subscription/push_request_count",
        "Cumulative count of push attempts grouped by result",
        "1",
        Counter
    ),
    metric_literal!(
        "pubsub.googleapis.com/subscription/push_request_latencies",
        "Distribution of push request latencies in microseconds",
        "us",
        Histogram
    ),
    metric_literal!(
        "pubsub.googleapis.com/subscription/sent_message_count",
        "Cumulative count of messages sent by Pub/Sub to subscriber clients grouped by delivery type",
        "1",
        Counter
    ),
    metric_literal!(
        "pubsub.googleapis.com/subscription/byte_cost",
        "Cumulative cost of operations in bytes, used to measure quota utilization",
        "By",
        Counter
    ),
    metric_literal!(
        "pubsub.googleapis.com/subscription/backlog_bytes",
        "Total byte size of unacknowledged messages (backlog messages) in a subscription",
        "By",
        Gauge
    ),
    metric_literal!(
        "pubsub.googleapis.com/subscription/num_undelivered_messages",
        "Number of unacknowledged messages (backlog messages) in a subscription",
        "1",
        Gauge
    ),
    metric_literal!(
        "pubsub.googleapis.com/subscription/num_outstanding_messages",
        "Number of messages delivered to a subscription's push endpoint but not yet acknowledged",
        "1",
        Gauge
    ),
    metric_literal!(
        "pubsub.googleapis.com/subscription/oldest_unacked_message_age",
        "Age in seconds of the oldest unacknowledged message in a subscription",
        "s",
        Gauge
    ),
    metric_literal!(
        "pubsub.googleapis.com/subscription/ack_message_count",
        "Cumulative count of messages acknowledged by Acknowledge requests grouped by delivery type",
        "1",
        Counter
    ),
    metric_literal!(
        "pubsub.googleapis.com/subscription/modify_ack_deadline_message_operation_count",
        "Cumulative count of ModifyAckDeadline message operations grouped by result",
        "1",
        Counter
    ),
    metric_literal!(
        "pubsub.googleapis.com/subscription/dead_letter_message_count",
        "Cumulative count of messages published to dead letter topic, grouped by result",
        "1",
        Counter
    ),
    metric_literal!(
        "pubsub.googleapis.com/subscription/config_updates_count",
        "Cumulative count of configuration changes for each subscription grouped by operation type and result",
        "1",
        Counter
    ),
    metric_literal!(
        "pubsub.googleapis.com/subscription/ack_latencies",
        "Distribution of ack latencies in milliseconds, from when Pub/Sub sends a message to a subscriber client until Pub/Sub receives an Acknowledge",
        "ms",
        Histogram
    ),
];

const SNAPSHOT: &[LiteralMetric] = &[
    metric_literal!("pubsub.googleapis.com/snapshot/backlog_bytes", "Total byte size of messages retained in a snapshot", "By", Gauge),
    metric_literal!(
        "pubsub.googleapis.com/snapshot/backlog_bytes_by_region",
        "Total byte size of messages retained in a snapshot by region",
        "By",
        Gauge
    ),
    metric_literal!("pubsub.googleapis.com/snapshot/num_messages", "Number of messages retained in a snapshot", "1", Gauge),
    metric_literal!(
        "pubsub.googleapis.com/snapshot/oldest_message_age",
        "Age in seconds of the oldest message retained in a snapshot",
        "s",
        Gauge
    ),
    metric_literal!(
        "pubsub.googleapis.com/snapshot/config_updates_count",
        "Cumulative count of configuration changes grouped by operation type and result",
        "1",
        Counter
    ),
];

pub const SERVICE: GcpService = GcpService {
    name: "gcp-pubsub",
    docs_url: "https://cloud.google.com/monitoring/api/metrics_gcp#gcp-pubsub",
    component: LiteralComponent {
        component_name: "Cloud Pub/Sub",
        source_location: "pubsub.googleapis.com",
    },
    groups: &[TOPIC, SUBSCRIPTION, SNAPSHOT],
};
