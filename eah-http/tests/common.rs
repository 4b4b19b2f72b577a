#![allow(dead_code)]

use axum_test::{TestServer, TestServerConfig, Transport};
use eah_axum::ApiApplication;
use eah_core::models::{
    Amount, AssetType, AuctionPage, AuctionQuery, AuctionRecord, Date, OrderRecord,
    PaymentConfirmation, PlanTier,
};
use eah_http::HttpBackend;
use headers::{Authorization, authorization::Bearer};
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

pub const TOKEN: &str = "subscriber-token";

#[derive(Debug, thiserror::Error)]
#[error("storage offline")]
pub struct Offline;

/// 25 listings under city 7 / asset type 1, nothing anywhere else.
#[derive(Clone, Default)]
pub struct FixtureApp {
    orders: Arc<AtomicU64>,
    offline: Arc<AtomicBool>,
}

impl FixtureApp {
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), Offline> {
        if self.offline.load(Ordering::SeqCst) {
            Err(Offline)
        } else {
            Ok(())
        }
    }
}

impl ApiApplication for FixtureApp {
    type Error = Offline;
    type Subscriber = &'static str;

    async fn search_auctions(&self, query: &AuctionQuery) -> Result<AuctionPage, Self::Error> {
        self.check()?;
        let total = if &*query.city_id == "7" && &*query.asset_type_id == "1" {
            25
        } else {
            0
        };
        let limit = query.limit as usize;
        let first = (query.page as usize - 1) * limit;
        let items = (first..total.min(first + limit))
            .map(|n| AuctionRecord {
                id: format!("{n}").into(),
                asset_type: AssetType::Flat,
                city: "Pune".into(),
                bank: "HDFC Bank".into(),
                reserve_price: Amount(4_200_000),
                start_date: Date::parse("2025-09-09").unwrap(),
                application_dead_line: None,
            })
            .collect();
        Ok(AuctionPage {
            items,
            last_page: total.div_ceil(limit) as u32,
        })
    }

    async fn list_plans(&self) -> Result<Vec<PlanTier>, Self::Error> {
        self.check()?;
        Ok(vec![
            PlanTier {
                id: "1".into(),
                duration_in_days: 90,
                amount: Amount(999),
            },
            PlanTier {
                id: "2".into(),
                duration_in_days: 365,
                amount: Amount(2999),
            },
        ])
    }

    async fn can_subscribe(&self, context: &Authorization<Bearer>) -> Option<&'static str> {
        (context.token() == TOKEN).then_some("ravi")
    }

    async fn create_order(
        &self,
        _subscriber: &&'static str,
        _amount: Amount,
    ) -> Result<OrderRecord, Self::Error> {
        self.check()?;
        let n = self.orders.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(OrderRecord {
            id: format!("order_{n}").into(),
        })
    }

    async fn record_payment(
        &self,
        _subscriber: &&'static str,
        confirmation: &PaymentConfirmation,
    ) -> Result<bool, Self::Error> {
        self.check()?;
        Ok(confirmation.razorpay_order_id.starts_with("order_"))
    }
}

/// Serve `app` on a random local port and point a client at it.
pub fn serve(app: FixtureApp) -> (TestServer, HttpBackend) {
    let server = TestServer::new_with_config(
        eah_axum::router(app),
        TestServerConfig {
            transport: Some(Transport::HttpRandomPort),
            ..Default::default()
        },
    )
    .unwrap();

    let address = server.server_address().unwrap();
    let backend =
        HttpBackend::with_client(reqwest::Client::new(), address.as_str()).unwrap();
    (server, backend)
}
