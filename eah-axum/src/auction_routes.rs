//! The listing search endpoint.

use crate::ApiApplication;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    routing::get,
};
use eah_core::models::{AuctionQuery, SearchEnvelope};
use tracing::{Level, event};

/// Creates a router with the auction endpoints.
pub fn router<T: ApiApplication>() -> Router<T> {
    Router::new().route("/search", get(search_auctions::<T>))
}

/// Search listings by city and asset type, one page at a time.
///
/// Failures are reported inside the envelope as well as in the HTTP status.
async fn search_auctions<T: ApiApplication>(
    State(app): State<T>,
    query: Result<Query<AuctionQuery>, QueryRejection>,
) -> (StatusCode, Json<SearchEnvelope>) {
    let query = match query {
        Ok(Query(query)) if query.page > 0 && query.limit > 0 => query,
        Ok(_) => return failure(StatusCode::BAD_REQUEST, "page and limit start at 1"),
        Err(rejection) => return failure(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    match app.search_auctions(&query).await {
        Ok(page) => (
            StatusCode::OK,
            Json(SearchEnvelope::success(page.items, page.last_page)),
        ),
        Err(err) => {
            event!(Level::ERROR, err = err.to_string());
            failure(StatusCode::INTERNAL_SERVER_ERROR, "search failed")
        }
    }
}

fn failure(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<SearchEnvelope>) {
    (
        status,
        Json(SearchEnvelope::failure(status.as_u16(), message)),
    )
}
