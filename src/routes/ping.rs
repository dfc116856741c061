//! Health and liveness probe

use std::time::Instant;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub server: String,
    pub latency_ms: f64,
    pub b2_status: &'static str,
    pub uptime: String,
    pub timestamp: DateTime<Utc>,
}

/// POST /ping
///
/// Always answers 200 while the process is alive. Backend reachability is
/// reported as data (`connected`/`disconnected`), never as an HTTP error,
/// together with the round-trip latency of that one probe call.
pub async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    let probe_start = Instant::now();

    let b2_status = match state.store().probe().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "storage probe failed");
            "disconnected"
        }
    };

    let latency_ms = (probe_start.elapsed().as_secs_f64() * 1000.0 * 100.0).round() / 100.0;

    let server = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string());

    Json(PingResponse {
        status: "online",
        server,
        latency_ms,
        b2_status,
        uptime: format_uptime(Utc::now() - state.started_at()),
        timestamp: Utc::now(),
    })
}

/// Uptime as `H:MM:SS`, with a day count prefixed past 24 hours.
fn format_uptime(elapsed: chrono::Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    if days > 0 {
        let plural = if days == 1 { "" } else { "s" };
        format!("{days} day{plural}, {hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{hours}:{minutes:02}:{seconds:02}")
    }
}
