//! Observability module for centralized metrics, tracing, and logging setup.
//!
//! This module provides:
//! - Metrics collection and Prometheus export
//! - Structured logging with configurable levels
//! - Liveness endpoints for monitoring

use std::net::SocketAddr;

use anyhow::Result;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::net::TcpListener;
use tracing_subscriber::prelude::*;

use crate::config::ObservabilityConfig;

/// Initialize the complete observability stack
pub async fn init_observability(config: &ObservabilityConfig) -> Result<()> {
    init_tracing_with_config(config)?;
    let metrics_handle = init_metrics()?;
    start_metrics_server(metrics_handle, config.metrics_port).await?;

    tracing::info!(
        environment = %config.environment,
        metrics_port = %config.metrics_port,
        "Observability stack initialized successfully"
    );
    Ok(())
}

/// Initialize structured logging with tracing and configuration
fn init_tracing_with_config(config: &ObservabilityConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("cinescope={}", config.log_level).parse()?)
        .add_directive("sqlx=warn".parse()?)
        .add_directive("teloxide=warn".parse()?);

    // Pretty formatting for development, JSON for everything else
    if config.is_development()
        || std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string()) == "pretty"
    {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_thread_names(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true),
            )
            .init();
    }

    Ok(())
}

/// Install the Prometheus metrics recorder
fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;
    Ok(handle)
}

/// Serve /metrics and liveness endpoints on a background task
async fn start_metrics_server(metrics_handle: PrometheusHandle, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Metrics server listening on {}", addr);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, _)) => {
                    let metrics_handle = metrics_handle.clone();

                    tokio::spawn(async move {
                        let io = TokioIo::new(stream);

                        let service = hyper::service::service_fn(
                            move |req: hyper::Request<hyper::body::Incoming>| {
                                let metrics_handle = metrics_handle.clone();
                                async move {
                                    match (req.method(), req.uri().path()) {
                                        (&hyper::Method::GET, "/metrics") => {
                                            let metrics = metrics_handle.render();
                                            Ok::<_, std::convert::Infallible>(hyper::Response::new(
                                                metrics,
                                            ))
                                        }
                                        (&hyper::Method::GET, "/health/live") => {
                                            Ok(hyper::Response::new("OK".to_string()))
                                        }
                                        _ => {
                                            let mut response =
                                                hyper::Response::new("Not Found".to_string());
                                            *response.status_mut() = hyper::StatusCode::NOT_FOUND;
                                            Ok(response)
                                        }
                                    }
                                }
                            },
                        );

                        if let Err(err) = http1::Builder::new().serve_connection(io, service).await
                        {
                            tracing::error!("Error serving connection: {:?}", err);
                        }
                    });
                }
                Err(e) => {
                    tracing::error!("Error accepting connection: {}", e);
                }
            }
        }
    });

    Ok(())
}

/// Create a span for a Telegram update handler
pub fn telegram_span(operation: &str, user_id: Option<i64>) -> tracing::Span {
    tracing::info_span!(
        "telegram_operation",
        operation = operation,
        user_id = user_id,
        component = "telegram"
    )
}

/// Record an inbound Telegram update by kind
pub fn record_telegram_update(update_kind: &str) {
    let update_kind = update_kind.to_string();
    metrics::counter!("telegram_updates_total", "type" => update_kind).increment(1);
}

/// Record request metrics
pub fn record_request_metrics(method: &str, status: u16, duration: std::time::Duration) {
    let method = method.to_string();
    let status = status.to_string();
    metrics::counter!("requests_total", "method" => method, "status" => status).increment(1);
    metrics::histogram!("request_duration_seconds").record(duration.as_secs_f64());
}
