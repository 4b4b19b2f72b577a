use crate::models::{CheckoutOptions, GatewayFailure, PaymentReceipt, Signal};

/// The external payment checkout, modeled as a single awaited call.
///
/// Implementations own all interaction with the buyer; the caller only sees the
/// receipt or the SDK's rejection.
pub trait PaymentGateway {
    /// Open a checkout session and wait for it to resolve.
    fn open(
        &self,
        options: &CheckoutOptions,
    ) -> impl Future<Output = Result<PaymentReceipt, GatewayFailure>> + Send;
}

/// Where user-facing checkout notifications go (an alert, a toast, a console line).
pub trait Notifier {
    /// Deliver one notification.
    fn notify(&self, signal: Signal);
}
