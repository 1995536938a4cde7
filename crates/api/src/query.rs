//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?period=24h|7d|30d` on the history endpoint. Parsed by the handler so
/// an unknown period yields the usual JSON validation error.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub period: Option<String>,
}

/// `?crop_id=` filter on the live feed.
#[derive(Debug, Deserialize)]
pub struct LiveFeedParams {
    pub crop_id: Option<String>,
}
