#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod feed;
pub use feed::{AuctionFeed, FeedStatus, FetchMode, FetchTicket, PaginationState, Resolution};

mod checkout;
pub use checkout::{
    CheckoutPhase, CheckoutSession, PlanCheckout, PurchaseFailure, PurchaseOutcome,
};
