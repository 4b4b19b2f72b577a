use super::Permissions;
use eah_axum::ApiApplication;
use eah_core::models::{
    Amount, AssetType, AuctionFilter, AuctionPage, AuctionQuery, AuctionRecord, Date,
    OrderRecord, PaymentConfirmation, PlanTier,
};
use headers::{Authorization, authorization::Bearer};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

#[derive(Debug, thiserror::Error)]
#[error("data source unavailable")]
pub struct Unavailable;

#[derive(Default)]
struct Inner {
    auctions: Vec<(AuctionFilter, AuctionRecord)>,
    plans: Vec<PlanTier>,
    // order id -> (subscriber, amount)
    orders: Mutex<HashMap<String, (String, Amount)>>,
    next_order: AtomicU64,
    unavailable: bool,
}

#[derive(Clone, Default)]
pub struct TestApp(Arc<Inner>);

impl TestApp {
    /// 23 flats in Pune, 4 plots of land in Nashik and the three standard plans.
    pub fn seeded() -> Self {
        let pune_flats = AuctionFilter::new("7", "1");
        let nashik_land = AuctionFilter::new("12", "3");

        let mut auctions = Vec::new();
        for n in 0..23 {
            auctions.push((
                pune_flats.clone(),
                record(&format!("pune-{n}"), AssetType::Flat, "Pune"),
            ));
        }
        for n in 0..4 {
            auctions.push((
                nashik_land.clone(),
                record(&format!("nashik-{n}"), AssetType::Other("Land".into()), "Nashik"),
            ));
        }

        let plans = [("1", 90, 999), ("2", 180, 1799), ("3", 365, 2999)]
            .into_iter()
            .map(|(id, days, amount)| PlanTier {
                id: id.into(),
                duration_in_days: days,
                amount: Amount(amount),
            })
            .collect();

        Self(Arc::new(Inner {
            auctions,
            plans,
            ..Default::default()
        }))
    }

    /// An application whose data source always fails.
    pub fn unavailable() -> Self {
        Self(Arc::new(Inner {
            unavailable: true,
            ..Default::default()
        }))
    }

    pub fn open_orders(&self) -> usize {
        self.0
            .orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn available(&self) -> Result<(), Unavailable> {
        if self.0.unavailable { Err(Unavailable) } else { Ok(()) }
    }
}

fn record(id: &str, asset_type: AssetType, city: &str) -> AuctionRecord {
    AuctionRecord {
        id: id.into(),
        asset_type,
        city: city.into(),
        bank: "Bank of Maharashtra".into(),
        reserve_price: Amount(3_150_000),
        start_date: Date::parse("2025-07-21T11:00:00Z").unwrap(),
        application_dead_line: Some(Date::parse("2025-07-18").unwrap()),
    }
}

impl ApiApplication for TestApp {
    type Error = Unavailable;
    type Subscriber = String;

    async fn search_auctions(&self, query: &AuctionQuery) -> Result<AuctionPage, Self::Error> {
        self.available()?;
        let filter = query.filter();
        let matching: Vec<_> = self
            .0
            .auctions
            .iter()
            .filter(|(f, _)| *f == filter)
            .map(|(_, record)| record)
            .collect();

        let limit = query.limit as usize;
        Ok(AuctionPage {
            last_page: matching.len().div_ceil(limit) as u32,
            items: matching
                .into_iter()
                .skip((query.page as usize - 1) * limit)
                .take(limit)
                .cloned()
                .collect(),
        })
    }

    async fn list_plans(&self) -> Result<Vec<PlanTier>, Self::Error> {
        self.available()?;
        Ok(self.0.plans.clone())
    }

    async fn can_subscribe(&self, context: &Authorization<Bearer>) -> Option<String> {
        let permissions: Permissions = context.token().parse().ok()?;
        if permissions.can_subscribe {
            permissions.subscriber
        } else {
            None
        }
    }

    async fn create_order(
        &self,
        subscriber: &String,
        amount: Amount,
    ) -> Result<OrderRecord, Self::Error> {
        self.available()?;
        let n = self.0.next_order.fetch_add(1, Ordering::Relaxed) + 1;
        let id = format!("order_{n}");
        self.0
            .orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), (subscriber.clone(), amount));
        Ok(OrderRecord { id: id.into() })
    }

    async fn record_payment(
        &self,
        subscriber: &String,
        confirmation: &PaymentConfirmation,
    ) -> Result<bool, Self::Error> {
        self.available()?;
        let mut orders = self.0.orders.lock().unwrap_or_else(PoisonError::into_inner);
        let matches = orders
            .get(&confirmation.razorpay_order_id)
            .is_some_and(|(owner, amount)| {
                owner == subscriber
                    && amount.to_string() == confirmation.amount
                    && !confirmation.razorpay_signature.is_empty()
            });
        if matches {
            orders.remove(&confirmation.razorpay_order_id);
        }
        Ok(matches)
    }
}
