use axum::http::header;
use prometheus::{Encoder, TextEncoder};

use crate::error::AppError;

/// GET /metrics: Prometheus text exposition of the default registry.
pub async fn metrics_handler() -> Result<([(header::HeaderName, &'static str); 1], String), AppError> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| anyhow::anyhow!("metrics encoding failed: {e}"))?;
    let body = String::from_utf8(buffer).map_err(anyhow::Error::from)?;
    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}
