//! HTTP surface -- live SSE stream, store snapshot, config and health endpoints.
//!
//! # Routes
//!
//! | Method | Path       | Response                                              |
//! |--------|------------|-------------------------------------------------------|
//! | GET    | `/events`  | `text/event-stream`, one `data:` event per log entry  |
//! | GET    | `/logs`    | JSON array of retained entries, oldest first          |
//! | GET    | `/config`  | `{"maxEntries": N}`                                   |
//! | GET    | `/healthz` | `ok`                                                  |
//!
//! `/events` and `/logs` accept repeated `filter` query parameters. All
//! filters must match. A single invalid filter rejects the request with
//! `400 Bad Request` and the parse error as plain text.

use std::convert::Infallible;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::header::{CACHE_CONTROL, HeaderName};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use futures::stream::{self, Stream, StreamExt};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use zlog_core::types::LogEntry;
use zlog_pipeline::{FilterSet, HubHandle, LogPipelineError, LogStore, Subscription};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LogStore>,
    pub hub: HubHandle<Arc<LogEntry>>,
}

impl AppState {
    pub fn new(store: Arc<LogStore>, hub: HubHandle<Arc<LogEntry>>) -> Self {
        Self { store, hub }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/events", get(events))
        .route("/logs", get(logs))
        .route("/config", get(config))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Serve the router on `listener` until `cancel` fires.
///
/// Open `/events` streams end once the hub stops, which lets the
/// graceful shutdown complete.
pub async fn serve(listener: TcpListener, state: AppState, cancel: CancellationToken) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "http server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| anyhow::anyhow!("http server failed: {}", e))?;

    tracing::info!("http server stopped");
    Ok(())
}

/// Hostname shown in the startup banner.
pub fn display_host(host: &str) -> &str {
    match host {
        "" | "0.0.0.0" | "127.0.0.1" | "::" | "::1" => "localhost",
        other => other,
    }
}

/// URL printed in the startup banner.
pub fn banner_url(host: &str, port: u16, debug_latency: bool) -> String {
    let mut url = format!("http://{}:{}", display_host(host), port);
    if debug_latency {
        url.push_str("/?latency=1");
    }
    url
}

/// Handler errors mapped onto HTTP status codes.
#[derive(Debug)]
pub enum ApiError {
    BadFilter(LogPipelineError),
    HubUnavailable(LogPipelineError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadFilter(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            ApiError::HubUnavailable(e) => {
                tracing::warn!(error = %e, "rejecting live stream");
                (StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response()
            }
        }
    }
}

type Params = Query<Vec<(String, String)>>;

fn filters_from(params: &[(String, String)]) -> Result<FilterSet, ApiError> {
    let raws = params
        .iter()
        .filter(|(key, _)| key == "filter")
        .map(|(_, value)| value.as_str());
    FilterSet::parse(raws).map_err(ApiError::BadFilter)
}

/// First `limit` parameter, when it parses as an integer.
fn limit_from(params: &[(String, String)]) -> Option<i64> {
    params
        .iter()
        .find(|(key, _)| key == "limit")
        .and_then(|(_, value)| value.trim().parse().ok())
}

/// Keep the last `limit` entries when `0 < limit < len`.
fn apply_limit<T>(mut entries: Vec<T>, limit: Option<i64>) -> Vec<T> {
    if let Some(limit) = limit {
        if limit > 0 && (limit as u64) < entries.len() as u64 {
            let skip = entries.len() - limit as usize;
            entries.drain(..skip);
        }
    }
    entries
}

async fn logs(
    State(state): State<AppState>,
    Query(params): Params,
) -> Result<Json<Vec<Arc<LogEntry>>>, ApiError> {
    let filters = filters_from(&params)?;
    let entries: Vec<Arc<LogEntry>> = state
        .store
        .list()
        .into_iter()
        .filter(|entry| filters.matches(entry))
        .collect();
    Ok(Json(apply_limit(entries, limit_from(&params))))
}

async fn events(
    State(state): State<AppState>,
    Query(params): Params,
) -> Result<impl IntoResponse, ApiError> {
    let filters = filters_from(&params)?;
    let subscription = state.hub.subscribe().await.map_err(ApiError::HubUnavailable)?;
    tracing::debug!(
        subscriber = subscription.id(),
        filters = filters.len(),
        "sse client connected"
    );

    let headers = [
        (CACHE_CONTROL, "no-cache"),
        (HeaderName::from_static("x-accel-buffering"), "no"),
    ];
    let sse = Sse::new(event_stream(subscription, filters)).keep_alive(KeepAlive::default());
    Ok((headers, sse))
}

/// `:ok` comment followed by one event per matching entry.
///
/// Dropping the stream drops the subscription, which unregisters it.
fn event_stream(
    subscription: Subscription<Arc<LogEntry>>,
    filters: FilterSet,
) -> impl Stream<Item = Result<Event, Infallible>> {
    let hello = stream::once(async { Ok(Event::default().comment("ok")) });
    let entries = stream::unfold((subscription, filters), |(mut sub, filters)| async move {
        loop {
            let entry = sub.recv().await?;
            if !filters.matches(&entry) {
                continue;
            }
            match Event::default().json_data(entry.as_ref()) {
                Ok(event) => return Some((Ok(event), (sub, filters))),
                Err(e) => tracing::warn!(id = entry.id, error = %e, "failed to encode entry"),
            }
        }
    });
    hello.chain(entries)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigResponse {
    max_entries: usize,
}

async fn config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        max_entries: state.store.capacity(),
    })
}

async fn healthz() -> &'static str {
    "ok"
}
