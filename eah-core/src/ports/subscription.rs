use crate::models::{
    BearerToken, ConfirmationRecord, OrderRecord, OrderRequest, PaymentConfirmation, PlanTier,
};

/// The subscription endpoints: plan listing, order creation and payment recording.
///
/// The bearer token is passed explicitly. `None` issues the request without an
/// `Authorization` header, leaving the decision to the backend.
pub trait SubscriptionRepository: super::Backend {
    /// List the purchasable plans, in the order the backend returns them.
    fn list_plans(&self) -> impl Future<Output = Result<Vec<PlanTier>, Self::Error>> + Send;

    /// Create a payment order for the requested amount.
    fn create_order(
        &self,
        token: Option<&BearerToken>,
        request: &OrderRequest,
    ) -> impl Future<Output = Result<OrderRecord, Self::Error>> + Send;

    /// Report a completed checkout so the backend can verify it and record the subscription.
    fn confirm_payment(
        &self,
        token: Option<&BearerToken>,
        confirmation: &PaymentConfirmation,
    ) -> impl Future<Output = Result<ConfirmationRecord, Self::Error>> + Send;
}
