//! The demonstration backend: fixture listings and plans, JWT-based authorization
//! and in-memory orders.

use eah_axum::ApiApplication;
use eah_core::models::{
    Amount, AuctionFilter, AuctionPage, AuctionQuery, AuctionRecord, OrderRecord,
    PaymentConfirmation, PlanTier,
};
use headers::{Authorization, authorization::Bearer};
use jwt_simple::prelude::{HS256Key, MACLike, NoCustomClaims};
use serde::Deserialize;
use std::{collections::HashMap, convert::Infallible, sync::Arc};
use tokio::sync::RwLock;
use tracing::{Level, event};

/// One listing in the fixture file, along with the filter pair it is found under.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureAuction {
    /// The city the listing is searchable under
    pub city_id: String,
    /// The asset type the listing is searchable under
    pub asset_type_id: String,
    /// The listing itself
    #[serde(flatten)]
    pub record: AuctionRecord,
}

impl FixtureAuction {
    fn matches(&self, filter: &AuctionFilter) -> bool {
        *self.city_id == *filter.city_id && *self.asset_type_id == *filter.asset_type_id
    }
}

/// The data served by the demonstration backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixtures {
    /// Listings, in the order they are served
    pub auctions: Vec<FixtureAuction>,
    /// The plan list
    pub plans: Vec<PlanTier>,
}

impl Fixtures {
    /// The set shipped with the binary.
    pub fn builtin() -> serde_json::Result<Self> {
        serde_json::from_str(include_str!("../fixtures.json"))
    }

    /// Load a fixture file.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let file = std::io::BufReader::new(std::fs::File::open(path)?);
        Ok(serde_json::from_reader(file)?)
    }
}

#[derive(Debug, Clone)]
struct OpenOrder {
    subscriber: String,
    amount: Amount,
}

/// Main application implementation combining fixtures, authorization and orders.
#[derive(Clone)]
pub struct DemoApp {
    fixtures: Arc<Fixtures>,
    key: HS256Key,
    orders: Arc<RwLock<HashMap<String, OpenOrder>>>,
}

impl DemoApp {
    /// Serve `fixtures`, accepting tokens signed with `key`.
    pub fn new(fixtures: Fixtures, key: HS256Key) -> Self {
        Self {
            fixtures: Arc::new(fixtures),
            key,
            orders: Default::default(),
        }
    }

    /// The subject of a valid token.
    fn subject(&self, context: &Authorization<Bearer>) -> Option<String> {
        let token = context.token();
        self.key
            .verify_token::<NoCustomClaims>(token, None)
            .map_err(|err| event!(Level::DEBUG, err = err.to_string(), "rejected token"))
            .ok()?
            .subject
    }
}

impl ApiApplication for DemoApp {
    type Error = Infallible;
    type Subscriber = String;

    async fn search_auctions(&self, query: &AuctionQuery) -> Result<AuctionPage, Self::Error> {
        let filter = query.filter();
        let matching: Vec<&AuctionRecord> = self
            .fixtures
            .auctions
            .iter()
            .filter(|auction| auction.matches(&filter))
            .map(|auction| &auction.record)
            .collect();

        let limit = query.limit.max(1) as usize;
        let skip = (query.page.saturating_sub(1) as usize).saturating_mul(limit);
        Ok(AuctionPage {
            last_page: matching.len().div_ceil(limit) as u32,
            items: matching.into_iter().skip(skip).take(limit).cloned().collect(),
        })
    }

    async fn list_plans(&self) -> Result<Vec<PlanTier>, Self::Error> {
        Ok(self.fixtures.plans.clone())
    }

    async fn can_subscribe(&self, context: &Authorization<Bearer>) -> Option<String> {
        // The demo app takes the standard sub: claim to be the subscriber
        self.subject(context)
    }

    async fn create_order(
        &self,
        subscriber: &String,
        amount: Amount,
    ) -> Result<OrderRecord, Self::Error> {
        let id = format!("order_{}", uuid::Uuid::new_v4().simple());
        self.orders.write().await.insert(
            id.clone(),
            OpenOrder {
                subscriber: subscriber.clone(),
                amount,
            },
        );
        Ok(OrderRecord { id: id.into() })
    }

    async fn record_payment(
        &self,
        subscriber: &String,
        confirmation: &PaymentConfirmation,
    ) -> Result<bool, Self::Error> {
        let mut orders = self.orders.write().await;
        let Some(order) = orders.get(&confirmation.razorpay_order_id) else {
            return Ok(false);
        };
        if order.subscriber != *subscriber
            || order.amount.to_string() != confirmation.amount
            || confirmation.razorpay_signature.is_empty()
        {
            return Ok(false);
        }

        orders.remove(&confirmation.razorpay_order_id);
        Ok(true)
    }
}
