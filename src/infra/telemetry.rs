use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
///
/// Logs go to stderr; stdout is reserved for command output.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "mealdesk_cache_hit_total",
            Unit::Count,
            "Queries answered from a fresh cache entry."
        );
        describe_counter!(
            "mealdesk_cache_miss_total",
            Unit::Count,
            "Queries that started a network request."
        );
        describe_counter!(
            "mealdesk_cache_dedup_total",
            Unit::Count,
            "Queries that joined a request already in flight."
        );
        describe_counter!(
            "mealdesk_cache_invalidated_total",
            Unit::Count,
            "Cache entries marked stale by tag invalidation."
        );
        describe_counter!(
            "mealdesk_cache_evict_total",
            Unit::Count,
            "Unused cache entries removed by garbage collection."
        );
        describe_histogram!(
            "mealdesk_http_request_ms",
            Unit::Milliseconds,
            "REST request latency in milliseconds."
        );
    });
}
