//! The subscription endpoints: plans, order creation and payment recording.

use crate::ApiApplication;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use axum_extra::TypedHeader;
use eah_core::models::{
    Amount, ConfirmationRecord, DataEnvelope, OrderRecord, OrderRequest, PaymentConfirmation,
    PlanTier,
};
use headers::{Authorization, authorization::Bearer};
use tracing::{Level, event};

/// Creates a router with the subscription endpoints.
pub fn router<T: ApiApplication>() -> Router<T> {
    Router::new()
        .route("/plans", get(list_plans::<T>))
        .route("/create-order", post(create_order::<T>))
        .route("/add-records", post(add_records::<T>))
}

async fn list_plans<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<DataEnvelope<Vec<PlanTier>>>, StatusCode> {
    let plans = app.list_plans().await.map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(DataEnvelope::new(plans)))
}

async fn authorize<T: ApiApplication>(
    app: &T,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<T::Subscriber, StatusCode> {
    let Some(TypedHeader(auth)) = auth else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    app.can_subscribe(&auth).await.ok_or(StatusCode::UNAUTHORIZED)
}

async fn create_order<T: ApiApplication>(
    State(app): State<T>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Json(body): Json<OrderRequest>,
) -> Result<Json<DataEnvelope<OrderRecord>>, StatusCode> {
    let subscriber = authorize(&app, auth).await?;

    let amount = body.amount.parse::<Amount>().map_err(|err| {
        event!(Level::DEBUG, err = err.to_string(), "rejecting order amount");
        StatusCode::UNPROCESSABLE_ENTITY
    })?;
    if amount == Amount(0) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let order = app.create_order(&subscriber, amount).await.map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    event!(
        Level::INFO,
        %subscriber,
        order_id = %order.id,
        amount = amount.rupees(),
        "order created"
    );

    Ok(Json(DataEnvelope::new(order)))
}

async fn add_records<T: ApiApplication>(
    State(app): State<T>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Json(body): Json<PaymentConfirmation>,
) -> Result<Json<ConfirmationRecord>, StatusCode> {
    let subscriber = authorize(&app, auth).await?;

    let status = app.record_payment(&subscriber, &body).await.map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    event!(
        Level::INFO,
        %subscriber,
        order_id = %body.razorpay_order_id,
        payment_id = %body.razorpay_payment_id,
        status,
        "payment reported"
    );

    Ok(Json(ConfirmationRecord { status }))
}
