use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Initialize structured logging for hosts embedding the engine. JSON
/// output with span context, filtered by `RUST_LOG` with an info floor.
pub fn init_telemetry() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true),
        )
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("greenlight telemetry initialized");
    Ok(())
}

/// Correlation ID for linking one request's transition and fan-out events.
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span wrapping one pass through the transition dispatcher.
pub fn create_workflow_span(
    operation: &str,
    task_id: Option<&str>,
    actor_role: Option<&str>,
    correlation_id: Option<&str>,
) -> tracing::Span {
    tracing::info_span!(
        "workflow",
        operation = operation,
        task.id = task_id,
        actor.role = actor_role,
        correlation.id = correlation_id,
    )
}
