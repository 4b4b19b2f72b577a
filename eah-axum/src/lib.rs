#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod auction_routes;
mod subscribe_routes;

use axum::{Json, http::header};
use eah_core::models::{
    Amount, AuctionPage, AuctionQuery, OrderRecord, PaymentConfirmation, PlanTier,
};
use headers::{Authorization, authorization::Bearer};
use serde::Serialize;
use std::fmt::Display;
use tower_http::cors;

pub mod config;
use config::AxumConfig;

/// Response for the health check endpoint
#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Construct the full API router around `state`.
pub fn router<T: ApiApplication>(state: T) -> axum::Router {
    // Any origin; credentials travel only in the Authorization header
    let policy = cors::CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    axum::Router::new()
        .route("/health", axum::routing::get(health_check))
        .nest("/auction", auction_routes::router())
        .nest("/subscribe", subscribe_routes::router())
        .layer(policy)
        .with_state(state)
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    axum::serve(listener, router(app)).await
}

/// The data and the access decisions behind the API.
///
/// Axum requires its state to be cheaply cloneable and shareable across tasks, so
/// implementations are typically a handle around an `Arc`.
pub trait ApiApplication: Clone + Send + Sync + 'static {
    /// Failure of the underlying data source
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whoever a bearer token identifies
    type Subscriber: Display + Send + Sync;

    /// Return the page of listings the query asks for, along with the index of the
    /// final page for its filter.
    fn search_auctions(
        &self,
        query: &AuctionQuery,
    ) -> impl Future<Output = Result<AuctionPage, Self::Error>> + Send;

    /// List the purchasable plans.
    fn list_plans(&self) -> impl Future<Output = Result<Vec<PlanTier>, Self::Error>> + Send;

    /// Decide who the token belongs to, if anyone allowed to subscribe.
    fn can_subscribe(
        &self,
        context: &Authorization<Bearer>,
    ) -> impl Future<Output = Option<Self::Subscriber>> + Send;

    /// Open a payment order for `amount` rupees.
    fn create_order(
        &self,
        subscriber: &Self::Subscriber,
        amount: Amount,
    ) -> impl Future<Output = Result<OrderRecord, Self::Error>> + Send;

    /// Record a completed payment.
    ///
    /// # Returns
    ///
    /// - Ok(true) if the payment matches an open order of the subscriber and the
    ///   subscription was recorded
    /// - Ok(false) if the payment could not be matched
    /// - Err(error) if the data source failed
    fn record_payment(
        &self,
        subscriber: &Self::Subscriber,
        confirmation: &PaymentConfirmation,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
