mod auction;
mod credential;
mod gateway;
mod subscription;

pub use auction::AuctionRepository;
pub use credential::{CredentialStore, TOKEN_KEY};
pub use gateway::{Notifier, PaymentGateway};
pub use subscription::SubscriptionRepository;

/// The base trait of the backend ports.
///
/// Every remote operation can fail for infrastructure reasons (the network, a
/// malformed body). Those failures are reported through `Self::Error`; rejections the
/// backend expresses inside a well-formed envelope are reported separately by the
/// individual operations.
pub trait Backend {
    /// Infrastructure-level failure
    type Error: std::error::Error + Send + Sync + 'static;
}

/// A backend serving both the listing and the subscription screens.
pub trait MarketBackend: AuctionRepository + SubscriptionRepository {}

impl<T: AuctionRepository + SubscriptionRepository> MarketBackend for T {}
