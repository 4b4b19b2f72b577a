//! Subscription plans and the purchase flow.
//!
//! A purchase attempt moves through
//! `Idle → OrderRequested → SdkOpen → {Settled | Failed | Cancelled}` and stops in
//! whichever terminal phase it reaches. Nothing is retried: a new attempt is a new
//! call to [`PlanCheckout::purchase`].

use eah_core::{
    models::{
        Amount, BearerToken, BuyerContact, CheckoutOptions, GatewayFailure, MerchantConfig,
        OrderId, OrderRequest, PaymentConfirmation, PaymentReceipt, PlanCatalog, PlanTier, Signal,
    },
    ports::{CredentialStore, Notifier, PaymentGateway, SubscriptionRepository, TOKEN_KEY},
};
use thiserror::Error;
use tracing::{Instrument as _, Level, event, span};

/// The phases of one purchase attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    /// Nothing requested yet
    Idle,
    /// Waiting for the backend to create the order
    OrderRequested,
    /// The payment gateway is open
    SdkOpen,
    /// Paid and recorded by the backend
    Settled,
    /// Ended in an error
    Failed,
    /// The buyer backed out of the checkout
    Cancelled,
}

impl CheckoutPhase {
    /// Whether the attempt is over.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Settled | Self::Failed | Self::Cancelled)
    }

    /// Whether moving from `self` to `next` is a legal step.
    pub fn can_advance_to(self, next: Self) -> bool {
        use CheckoutPhase::*;
        matches!(
            (self, next),
            (Idle, OrderRequested)
                | (OrderRequested, SdkOpen)
                | (OrderRequested, Failed)
                | (SdkOpen, Settled)
                | (SdkOpen, Failed)
                | (SdkOpen, Cancelled)
        )
    }
}

/// Why a purchase ended in [`CheckoutPhase::Failed`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PurchaseFailure {
    /// The backend could not create an order
    #[error("could not create the order: {0}")]
    OrderCreation(String),
    /// The payment gateway rejected the payment
    #[error("{}", .0.description)]
    Gateway(GatewayFailure),
    /// The payment went through but reporting it to the backend failed
    #[error("payment could not be recorded: {0}")]
    Confirmation(String),
    /// The backend refused to record the payment
    #[error("payment could not be verified")]
    NotConfirmed,
}

/// The tagged result of one purchase attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseOutcome {
    /// Paid and recorded
    Settled {
        /// The order that was paid
        order_id: OrderId,
        /// The gateway's receipt
        receipt: PaymentReceipt,
    },
    /// Ended in an error
    Failed {
        /// The order, if one was created before the failure
        order_id: Option<OrderId>,
        /// What went wrong
        reason: PurchaseFailure,
    },
    /// The buyer dismissed the checkout
    Cancelled {
        /// The order that was left unpaid
        order_id: OrderId,
    },
}

impl PurchaseOutcome {
    /// The terminal phase this outcome corresponds to.
    pub fn phase(&self) -> CheckoutPhase {
        match self {
            Self::Settled { .. } => CheckoutPhase::Settled,
            Self::Failed { .. } => CheckoutPhase::Failed,
            Self::Cancelled { .. } => CheckoutPhase::Cancelled,
        }
    }

    /// The notification raised for this outcome.
    pub fn signal(&self) -> Signal {
        match self {
            Self::Settled { .. } => Signal::PaymentSucceeded,
            Self::Failed { reason, .. } => Signal::PaymentFailed(reason.to_string()),
            Self::Cancelled { .. } => Signal::PaymentCancelled,
        }
    }
}

/// The ephemeral state of one purchase attempt.
///
/// It only lives for the duration of [`PlanCheckout::purchase`].
#[derive(Debug)]
pub struct CheckoutSession {
    order_id: Option<OrderId>,
    amount: Amount,
    buyer: BuyerContact,
    phase: CheckoutPhase,
}

impl CheckoutSession {
    fn new(amount: Amount, buyer: BuyerContact) -> Self {
        Self {
            order_id: None,
            amount,
            buyer,
            phase: CheckoutPhase::Idle,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// The amount being charged.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The order, once the backend has created it.
    pub fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    fn advance(&mut self, next: CheckoutPhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "illegal checkout transition {:?} -> {next:?}",
            self.phase
        );
        event!(Level::DEBUG, from = ?self.phase, to = ?next, "checkout phase");
        self.phase = next;
    }

    fn fail(mut self, reason: PurchaseFailure) -> PurchaseOutcome {
        self.advance(CheckoutPhase::Failed);
        PurchaseOutcome::Failed {
            order_id: self.order_id,
            reason,
        }
    }
}

/// Loads the subscription plans and drives purchases against them.
pub struct PlanCheckout<B> {
    backend: B,
    merchant: MerchantConfig,
    plans: Option<PlanCatalog>,
}

impl<B: SubscriptionRepository> PlanCheckout<B> {
    /// A checkout screen for `backend`, charging on behalf of `merchant`.
    pub fn new(backend: B, merchant: MerchantConfig) -> Self {
        Self {
            backend,
            merchant,
            plans: None,
        }
    }

    /// The backend this screen talks to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The plans, once loaded.
    pub fn plans(&self) -> Option<&PlanCatalog> {
        self.plans.as_ref()
    }

    /// Fetch the plan list. Only the first successful call hits the backend; later
    /// calls return the list already held.
    pub async fn load_plans(&mut self) -> Result<&PlanCatalog, B::Error> {
        if self.plans.is_none() {
            let plans = self.backend.list_plans().await.map_err(|err| {
                event!(Level::ERROR, err = err.to_string(), "failed to fetch plans");
                err
            })?;
            event!(Level::DEBUG, count = plans.len(), "loaded subscription plans");
            self.plans = Some(plans.into_iter().collect());
        }

        // just populated above
        Ok(self.plans.get_or_insert_default())
    }

    /// Buy `plan` using the token held in `store` under [`TOKEN_KEY`].
    ///
    /// A missing token, or a store that cannot be read, results in an
    /// unauthenticated order request.
    pub async fn purchase_with_store<S, G, N>(
        &self,
        plan: &PlanTier,
        store: &S,
        buyer: &BuyerContact,
        gateway: &G,
        notifier: &N,
    ) -> PurchaseOutcome
    where
        S: CredentialStore,
        G: PaymentGateway,
        N: Notifier,
    {
        let token = match store.get(TOKEN_KEY).await {
            Ok(raw) => raw.and_then(BearerToken::new),
            Err(err) => {
                event!(Level::ERROR, err = err.to_string(), "failed to read stored token");
                None
            }
        };
        self.purchase(plan, token.as_ref(), buyer, gateway, notifier)
            .await
    }

    /// Buy `plan`: create an order, open the gateway, record the payment.
    ///
    /// Exactly one signal is sent to `notifier`, matching the returned outcome.
    pub async fn purchase<G, N>(
        &self,
        plan: &PlanTier,
        token: Option<&BearerToken>,
        buyer: &BuyerContact,
        gateway: &G,
        notifier: &N,
    ) -> PurchaseOutcome
    where
        G: PaymentGateway,
        N: Notifier,
    {
        let span = span!(
            Level::INFO,
            "purchase",
            plan_id = %plan.id,
            amount = plan.amount.rupees()
        );
        let outcome = self
            .attempt(plan, token, buyer.clone(), gateway)
            .instrument(span)
            .await;

        notifier.notify(outcome.signal());
        outcome
    }

    async fn attempt<G: PaymentGateway>(
        &self,
        plan: &PlanTier,
        token: Option<&BearerToken>,
        buyer: BuyerContact,
        gateway: &G,
    ) -> PurchaseOutcome {
        let mut session = CheckoutSession::new(plan.amount, buyer);

        if token.is_none() {
            event!(Level::WARN, "no bearer token; creating the order unauthenticated");
        }

        session.advance(CheckoutPhase::OrderRequested);
        let order = match self
            .backend
            .create_order(token, &OrderRequest::from(session.amount))
            .await
        {
            Ok(order) => order,
            Err(err) => {
                event!(Level::ERROR, err = err.to_string(), "order creation failed");
                return session.fail(PurchaseFailure::OrderCreation(err.to_string()));
            }
        };
        session.order_id = Some(order.id.clone());

        let options = CheckoutOptions::new(
            &self.merchant,
            order.id.clone(),
            session.amount,
            &session.buyer,
        );
        session.advance(CheckoutPhase::SdkOpen);
        let receipt = match gateway.open(&options).await {
            Ok(receipt) => receipt,
            Err(failure) if failure.is_cancellation() => {
                event!(Level::INFO, order_id = %order.id, "checkout dismissed");
                session.advance(CheckoutPhase::Cancelled);
                return PurchaseOutcome::Cancelled { order_id: order.id };
            }
            Err(failure) => {
                event!(Level::WARN, order_id = %order.id, err = failure.to_string());
                return session.fail(PurchaseFailure::Gateway(failure));
            }
        };

        // The buyer has been charged from here on; anything that goes wrong needs the
        // ids in the log to be reconciled by hand.
        let confirmation = PaymentConfirmation::new(receipt.clone(), session.amount);
        match self.backend.confirm_payment(token, &confirmation).await {
            Ok(record) if record.status => {
                event!(
                    Level::INFO,
                    order_id = %order.id,
                    payment_id = %receipt.razorpay_payment_id,
                    "payment recorded"
                );
                session.advance(CheckoutPhase::Settled);
                PurchaseOutcome::Settled {
                    order_id: order.id,
                    receipt,
                }
            }
            Ok(_) => {
                event!(
                    Level::ERROR,
                    order_id = %order.id,
                    payment_id = %receipt.razorpay_payment_id,
                    "backend refused the payment"
                );
                session.fail(PurchaseFailure::NotConfirmed)
            }
            Err(err) => {
                event!(
                    Level::ERROR,
                    order_id = %order.id,
                    payment_id = %receipt.razorpay_payment_id,
                    err = err.to_string(),
                    "failed to record payment"
                );
                session.fail(PurchaseFailure::Confirmation(err.to_string()))
            }
        }
    }
}
