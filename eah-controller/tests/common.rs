#![allow(dead_code)]

use eah_core::{
    models::{
        Amount, ApplicationError, AssetType, AuctionFilter, AuctionPage, AuctionQuery,
        AuctionRecord, BearerToken, CheckoutOptions, ConfirmationRecord, Date, GatewayFailure,
        OrderRecord, OrderRequest, PAGE_LIMIT, PaymentConfirmation, PaymentReceipt, PlanTier,
        Signal,
    },
    ports::{
        AuctionRepository, Backend, CredentialStore, Notifier, PaymentGateway,
        SubscriptionRepository,
    },
};
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ScriptedError(pub String);

/// An in-memory backend. Auctions are partitioned by filter and paged with the
/// fixed page size; subscription calls answer from scripted values and record
/// what they were sent.
#[derive(Default)]
pub struct ScriptedBackend {
    pub auctions: HashMap<AuctionFilter, Vec<AuctionRecord>>,
    pub failing_pages: Mutex<Vec<u32>>,
    pub queries: Mutex<Vec<AuctionQuery>>,

    pub plans: Vec<PlanTier>,
    pub order: Option<String>,
    pub confirmation: Option<bool>,
    pub order_requests: Mutex<Vec<(Option<String>, OrderRequest)>>,
    pub confirmations: Mutex<Vec<PaymentConfirmation>>,
    pub plan_fetches: Mutex<usize>,
}

impl ScriptedBackend {
    pub fn with_auctions(filter: &AuctionFilter, count: usize) -> Self {
        let mut backend = Self::default();
        backend.add_auctions(filter, count);
        backend
    }

    pub fn add_auctions(&mut self, filter: &AuctionFilter, count: usize) {
        let records = (0..count)
            .map(|n| record(&format!("{}-{}-{n}", filter.city_id, filter.asset_type_id), filter))
            .collect();
        self.auctions.insert(filter.clone(), records);
    }

    pub fn fail_page(&self, page: u32) {
        lock(&self.failing_pages).push(page);
    }

    pub fn pages_requested(&self) -> Vec<u32> {
        lock(&self.queries).iter().map(|q| q.page).collect()
    }
}

pub fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn record(id: &str, filter: &AuctionFilter) -> AuctionRecord {
    AuctionRecord {
        id: id.into(),
        asset_type: if &*filter.asset_type_id == "1" {
            AssetType::Flat
        } else {
            AssetType::Other("Land".into())
        },
        city: format!("city {}", filter.city_id),
        bank: "Union Bank of India".into(),
        reserve_price: Amount(2_000_000),
        start_date: Date::parse("2025-06-12").unwrap(),
        application_dead_line: None,
    }
}

pub fn plan(id: &str, days: u32, amount: u64) -> PlanTier {
    PlanTier {
        id: id.into(),
        duration_in_days: days,
        amount: Amount(amount),
    }
}

impl Backend for ScriptedBackend {
    type Error = ScriptedError;
}

impl AuctionRepository for ScriptedBackend {
    async fn search_auctions(
        &self,
        query: &AuctionQuery,
    ) -> Result<Result<AuctionPage, ApplicationError>, Self::Error> {
        lock(&self.queries).push(query.clone());

        {
            let mut failing = lock(&self.failing_pages);
            if let Some(index) = failing.iter().position(|page| *page == query.page) {
                failing.remove(index);
                return Err(ScriptedError("connection reset".into()));
            }
        }

        let Some(records) = self.auctions.get(&query.filter()) else {
            return Ok(Err(ApplicationError {
                status_code: 404,
                message: Some("no auctions for this filter".into()),
            }));
        };

        let limit = query.limit.max(1) as usize;
        let last_page = records.len().div_ceil(limit) as u32;
        let items = records
            .iter()
            .skip((query.page.saturating_sub(1) as usize) * limit)
            .take(limit)
            .cloned()
            .collect();
        Ok(Ok(AuctionPage { items, last_page }))
    }
}

impl SubscriptionRepository for ScriptedBackend {
    async fn list_plans(&self) -> Result<Vec<PlanTier>, Self::Error> {
        *lock(&self.plan_fetches) += 1;
        Ok(self.plans.clone())
    }

    async fn create_order(
        &self,
        token: Option<&BearerToken>,
        request: &OrderRequest,
    ) -> Result<OrderRecord, Self::Error> {
        lock(&self.order_requests).push((token.map(|t| t.secret().to_owned()), request.clone()));
        match &self.order {
            Some(id) => Ok(OrderRecord {
                id: id.as_str().into(),
            }),
            None => Err(ScriptedError("order service unavailable".into())),
        }
    }

    async fn confirm_payment(
        &self,
        _token: Option<&BearerToken>,
        confirmation: &PaymentConfirmation,
    ) -> Result<ConfirmationRecord, Self::Error> {
        lock(&self.confirmations).push(confirmation.clone());
        match self.confirmation {
            Some(status) => Ok(ConfirmationRecord { status }),
            None => Err(ScriptedError("records service unavailable".into())),
        }
    }
}

/// A gateway that answers every checkout with the same result.
pub struct ScriptedGateway {
    pub result: Result<PaymentReceipt, GatewayFailure>,
    pub opened: Mutex<Vec<CheckoutOptions>>,
}

impl ScriptedGateway {
    pub fn paying(order_id: &str) -> Self {
        Self {
            result: Ok(PaymentReceipt {
                razorpay_payment_id: "pay_29QQoUBi66xm2f".into(),
                razorpay_order_id: order_id.into(),
                razorpay_signature:
                    "9ef4dffbfd84f1318f6739a3ce19f9d85851857ae648f114332d8401e0949a3d".into(),
            }),
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(code: i32, description: &str) -> Self {
        Self {
            result: Err(GatewayFailure {
                code,
                description: description.into(),
            }),
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<CheckoutOptions> {
        lock(&self.opened).clone()
    }
}

impl PaymentGateway for ScriptedGateway {
    async fn open(&self, options: &CheckoutOptions) -> Result<PaymentReceipt, GatewayFailure> {
        lock(&self.opened).push(options.clone());
        self.result.clone()
    }
}

#[derive(Default)]
pub struct RecordingNotifier(pub Mutex<Vec<Signal>>);

impl RecordingNotifier {
    pub fn signals(&self) -> Vec<Signal> {
        lock(&self.0).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, signal: Signal) {
        lock(&self.0).push(signal);
    }
}

/// A credential store over a map, optionally broken.
#[derive(Default)]
pub struct MemoryStore {
    pub values: Mutex<HashMap<String, String>>,
    pub broken: bool,
}

impl MemoryStore {
    pub fn holding(key: &str, value: &str) -> Self {
        let store = Self::default();
        lock(&store.values).insert(key.into(), value.into());
        store
    }
}

impl CredentialStore for MemoryStore {
    type Error = ScriptedError;

    async fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        if self.broken {
            return Err(ScriptedError("storage unavailable".into()));
        }
        Ok(lock(&self.values).get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        lock(&self.values).insert(key.into(), value.into());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, Self::Error> {
        Ok(lock(&self.values).remove(key).is_some())
    }
}

pub const PAGE_SIZE: usize = PAGE_LIMIT as usize;
