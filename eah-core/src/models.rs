mod amount;
mod auction;
mod checkout;
mod datetime;
mod envelope;
mod plan;

pub use amount::{Amount, AmountError};
pub use auction::{
    AssetType, AuctionFilter, AuctionPage, AuctionQuery, AuctionRecord, PAGE_LIMIT,
    SearchEnvelope,
};
pub use checkout::{
    BuyerContact, CheckoutOptions, ConfirmationRecord, GatewayFailure, MerchantConfig,
    OrderRecord, OrderRequest, PaymentConfirmation, PaymentReceipt, Prefill, Signal, Theme,
};
pub use datetime::Date;
pub use envelope::{ApplicationError, DataEnvelope, SUCCESS_STATUS};
pub use plan::{PlanCatalog, PlanKind, PlanTier};

/// Generates a string-backed identifier newtype.
///
/// The backend is not consistent about whether identifiers are JSON strings or
/// numbers, so these accept either and always carry the textual form.
macro_rules! string_id {
    ($struct: ident) => {
        /// A backend identifier, carried as text
        #[derive(Debug, Hash, PartialEq, Eq, Clone, PartialOrd, Ord, serde::Serialize)]
        #[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $struct(pub String);

        impl<'de> serde::Deserialize<'de> for $struct {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                serde_untagged::UntaggedEnumVisitor::new()
                    .string(|value| Ok(Self(value.to_owned())))
                    .u64(|value| Ok(Self(value.to_string())))
                    .i64(|value| Ok(Self(value.to_string())))
                    .deserialize(deserializer)
            }
        }

        impl From<&str> for $struct {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $struct {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl std::ops::Deref for $struct {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl std::fmt::Display for $struct {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

string_id!(AuctionId);
string_id!(AssetTypeId);
string_id!(CityId);
string_id!(OrderId);
string_id!(PlanId);

/// An opaque bearer token for the subscription endpoints.
///
/// The token is never printed: `Debug` redacts it so it cannot leak into logs.
#[derive(Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token, rejecting blank values.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    /// The raw token, as it goes into the `Authorization` header.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(***)")
    }
}
