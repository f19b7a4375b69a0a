use crate::adapters::literal::{LiteralComponent, LiteralMetric, metric_literal};
use super::GcpService;
use crate::model::InstrumentType;

const HTTP: &[LiteralMetric] = &[
    metric_literal!(
        "loadbalancing.googleapis.com/https/request_count",
        "Number of requests served by the HTTP(S) load balancer",
        "1",
        Counter
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/https/request_bytes_count",
        "Number of bytes sent as requests from clients to the HTTP(S) load balancer",
        "By",
        Counter
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/https/response_bytes_count",
        "Number of bytes sent as responses from the HTTP(S) load balancer to clients",
        "By",
        Counter
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/https/total_latencies",
        "Distribution of latency calculated from when the request was received by the load balancer proxy to when the proxy received ACK from the client on the last response byte",
        "ms",
        Histogram
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/https/backend_latencies",
        "Distribution of latency calculated from when the request was sent by the load balancer proxy to the backend until the proxy received from the backend the last byte of response",
        "ms",
        Histogram
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/https/backend_request_count",
        "Number of requests sent from the HTTP(S) load balancer to the backends",
        "1",
        Counter
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/https/backend_request_bytes_count",
        "Number of bytes sent as requests from the HTTP(S) load balancer to the backends",
        "By",
        Counter
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/https/backend_response_bytes_count",
        "Number of bytes sent as responses from the backends to the HTTP(S) load balancer",
        "By",
        Counter
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/https/external_regional/total_latencies",
        "Distribution of latency for regional external HTTP(S) load balancer",
        "ms",
        Histogram
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/https/external_regional/backend_latencies",
        "Distribution of backend latency for regional external HTTP(S) load balancer",
        "ms",
        Histogram
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/https/external_regional/request_count",
        "Number of requests served by the regional external HTTP(S) load balancer",
        "1",
        Counter
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/https/external_regional/request_bytes_count",
        "Number of bytes sent as requests from clients to the regional external HTTP(S) load balancer",
        "By",
        Counter
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/https/external_regional/response_bytes_count",
        "Number of bytes sent as responses from the regional external HTTP(S) load balancer to clients",
        "By",
        Counter
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/https/internal/total_latencies",
        "Distribution of latency for internal HTTP(S) load balancer",
        "ms",
        Histogram
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/https/internal/backend_latencies",
        "Distribution of backend latency for internal HTTP(S) load balancer",
        "ms",
        Histogram
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/https/internal/request_count",
        "Number of requests served by the internal HTTP(S) load balancer",
        "1",
        Counter
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/https/internal/request_bytes_count",
        "Number of bytes sent as requests from clients to the internal HTTP(S) load balancer",
        "By",
        Counter
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/https/internal/response_bytes_count",
        "Number of bytes sent as responses from the internal HTTP(S) load balancer to clients",
        "By",
        Counter
    ),
];

const TCP_SSL: &[LiteralMetric] = &[
    metric_literal!(
        "loadbalancing.googleapis.com/tcp_ssl_proxy/open_connections",
        "Number of connections that are open at the current moment",
        "1",
        Gauge
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/tcp_ssl_proxy/new_connections",
        "Number of connections that were created (client successfully connected to backend)",
        "1",
        Counter
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/tcp_ssl_proxy/closed_connections",
        "Number of connections that were terminated",
        "1",
        Counter
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/tcp_ssl_proxy/ingress_bytes_count",
        "Number of bytes sent from client to backend using the proxy",
        "By",
        Counter
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/tcp_ssl_proxy/egress_bytes_count",
        "Number of bytes sent from backend to client using the proxy",
        "By",
        Counter
    ),
    metric_literal!(
        "loadbalancing.googleapis.com/tcp_ssl_proxy/frontend_tcp_rtt",
        "Distribution of smoothed RTT measured for each connection between client and the proxy",
        "ms",
        Histogram
    ),
];

pub const SERVICE: GcpService = GcpService {
    name: "gcp-loadbalancing",
    docs_url: "https://cloud.google.com/monitoring/api/metrics_gcp#gcp-loadbalancing",
    component: LiteralComponent {
        component_name: "Cloud Load Balancing",
        source_location: "loadbalancing.googleapis.com",
    },
    groups: &[HTTP, TCP_SSL],
};
