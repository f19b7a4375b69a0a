//! AWS Lambda metrics published to CloudWatch

use super::literal::{LiteralComponent, LiteralMetric, literal_metrics, metric_literal};
use super::{Adapter, FetchOptions};
use crate::Result;
use crate::context::Context;
use crate::model::{Confidence, ExtractionMethod, FetchResult, InstrumentType, RawMetric, SourceCategory};
use chrono::Utc;

const DOCS_URL: &str = "https://docs.aws.amazon.com/lambda/latest/dg/monitoring-metrics-types.html";

const COMPONENT: LiteralComponent = LiteralComponent {
    component_name: "Lambda",
    source_location: "AWS/Lambda",
};

const INVOCATION: &[LiteralMetric] = &[
    metric_literal!(
        "Invocations",
        "Number of times function code is invoked, including successful invocations and those resulting in errors",
        "Count",
        Counter
    ),
    metric_literal!("Errors", "Number of invocations that result in a function error", "Count", Counter),
    metric_literal!(
        "DeadLetterErrors",
        "Number of failed attempts to send events to a dead-letter queue (DLQ) for async invocations",
        "Count",
        Counter
    ),
    metric_literal!(
        "DestinationDeliveryFailures",
        "Number of failed attempts to send events to a destination for async invocation and event source mappings",
        "Count",
        Counter
    ),
    metric_literal!("Throttles", "Number of invocation requests that are throttled", "Count", Counter),
    metric_literal!("OversizedRecordCount", "Number of events over 6 MB from DocumentDB change streams", "Count", Counter),
    metric_literal!(
        "ProvisionedConcurrencyInvocations",
        "Number of invocations using provisioned concurrency",
        "Count",
        Counter
    ),
    metric_literal!(
        "ProvisionedConcurrencySpilloverInvocations",
        "Number of invocations using standard concurrency when provisioned concurrency is exhausted",
        "Count",
        Counter
    ),
    metric_literal!(
        "RecursiveInvocationsDropped",
        "Number of invocations stopped due to detected infinite recursive loops",
        "Count",
        Counter
    ),
    metric_literal!(
        "SignatureValidationErrors",
        "Number of code package deployments with signature validation failures",
        "Count",
        Counter
    ),
];

const PERFORMANCE: &[LiteralMetric] = &[
    metric_literal!("Duration", "Time function code spends processing an event", "Milliseconds", Gauge),
    metric_literal!(
        "PostRuntimeExtensionsDuration",
        "Cumulative time runtime spends executing extension code after function completion",
        "Milliseconds",
        Gauge
    ),
    metric_literal!(
        "IteratorAge",
        "Age of the last record in the event for stream-based sources",
        "Milliseconds",
        Gauge
    ),
    metric_literal!("OffsetLag", "Offset lag for self-managed Kafka and Amazon MSK event sources", "Count", Gauge),
];

const CONCURRENCY: &[LiteralMetric] = &[
    metric_literal!("ConcurrentExecutions", "Number of function instances processing events", "Count", Gauge),
    metric_literal!(
        "ProvisionedConcurrentExecutions",
        "Number of function instances processing events using provisioned concurrency",
        "Count",
        Gauge
    ),
    metric_literal!(
        "ProvisionedConcurrencyUtilization",
        "Ratio of ProvisionedConcurrentExecutions to total provisioned concurrency",
        "Percent",
        Gauge
    ),
    metric_literal!(
        "UnreservedConcurrentExecutions",
        "Number of events processed by functions without reserved concurrency",
        "Count",
        Gauge
    ),
    metric_literal!(
        "ClaimedAccountConcurrency",
        "Concurrency unavailable for on-demand invocations at the Region level",
        "Count",
        Gauge
    ),
];

const ASYNC: &[LiteralMetric] = &[
    metric_literal!("AsyncEventsReceived", "Number of events successfully queued for processing", "Count", Counter),
    metric_literal!("AsyncEventAge", "Time between event queuing and function invocation", "Milliseconds", Gauge),
    metric_literal!("AsyncEventsDropped", "Number of events dropped without executing the function", "Count", Counter),
];

const EVENT_SOURCE: &[LiteralMetric] = &[
    metric_literal!("PolledEventCount", "Number of events read from event source", "Count", Counter),
    metric_literal!("FilteredOutEventCount", "Number of events filtered out by filter criteria", "Count", Counter),
    metric_literal!("InvokedEventCount", "Number of events that invoked the function", "Count", Counter),
    metric_literal!("FailedInvokeEventCount", "Number of events that failed to invoke the function", "Count", Counter),
    metric_literal!(
        "DroppedEventCount",
        "Number of events dropped due to expiry or retry exhaustion",
        "Count",
        Counter
    ),
    metric_literal!(
        "OnFailureDestinationDeliveredEventCount",
        "Number of events sent to on-failure destination",
        "Count",
        Counter
    ),
    metric_literal!(
        "DeletedEventCount",
        "Number of events successfully deleted after processing",
        "Count",
        Counter
    ),
    metric_literal!("ProvisionedPollers", "Number of active event pollers in provisioned mode", "Count", Gauge),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct CloudwatchLambdaAdapter;

#[async_trait::async_trait]
impl Adapter for CloudwatchLambdaAdapter {
    fn name(&self) -> &'static str {
        "cloudwatch-lambda"
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
        Ok(literal_metrics(self, COMPONENT, &[INVOCATION, PERFORMANCE, CONCURRENCY, ASYNC, EVENT_SOURCE]))
    }
}
