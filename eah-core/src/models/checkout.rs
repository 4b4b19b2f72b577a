use crate::models::{Amount, OrderId};
use serde::{Deserialize, Serialize};

/// Body of `POST subscribe/create-order`.
///
/// The amount travels as a string on this endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct OrderRequest {
    /// The plan amount in rupees, as text
    pub amount: String,
}

impl From<Amount> for OrderRequest {
    fn from(value: Amount) -> Self {
        Self {
            amount: value.to_string(),
        }
    }
}

/// The order the backend created for a purchase attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct OrderRecord {
    /// The payment provider's order identifier, handed to the checkout
    pub id: OrderId,
}

/// Who is paying. Pre-fills the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuyerContact {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub contact: String,
}

/// The merchant side of the checkout: who the buyer is paying and how it looks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantConfig {
    /// The public API key of the payment provider account
    #[serde(default)]
    pub key: String,
    /// Merchant name shown in the checkout
    #[serde(default = "default_name")]
    pub name: String,
    /// Line describing the purchase
    #[serde(default = "default_description")]
    pub description: String,
    /// Logo shown in the checkout
    #[serde(default = "default_image")]
    pub image: String,
    /// ISO currency code; in INR every payment method is available
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Accent color of the checkout
    #[serde(default = "default_theme_color")]
    pub theme_color: String,
}

fn default_name() -> String {
    "EAuctionsHub".to_owned()
}

fn default_description() -> String {
    "Premium Subscription Plan".to_owned()
}

fn default_image() -> String {
    "https://i.imgur.com/3g7nmJC.jpg".to_owned()
}

fn default_currency() -> String {
    "INR".to_owned()
}

fn default_theme_color() -> String {
    "#53a20e".to_owned()
}

impl Default for MerchantConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            name: default_name(),
            description: default_description(),
            image: default_image(),
            currency: default_currency(),
            theme_color: default_theme_color(),
        }
    }
}

/// The options a checkout session is opened with.
///
/// Field names follow the payment SDK's contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct CheckoutOptions {
    /// Amount to charge, in rupees
    pub amount: Amount,
    /// ISO currency code
    pub currency: String,
    /// The provider API key
    pub key: String,
    /// The order created by the backend
    pub order_id: OrderId,
    /// Merchant name
    pub name: String,
    /// Purchase description
    pub description: String,
    /// Merchant logo
    pub image: String,
    /// Buyer details
    pub prefill: Prefill,
    /// Visual theme
    pub theme: Theme,
}

impl CheckoutOptions {
    /// Assemble the options for one order.
    pub fn new(
        merchant: &MerchantConfig,
        order_id: OrderId,
        amount: Amount,
        buyer: &BuyerContact,
    ) -> Self {
        Self {
            amount,
            currency: merchant.currency.clone(),
            key: merchant.key.clone(),
            order_id,
            name: merchant.name.clone(),
            description: merchant.description.clone(),
            image: merchant.image.clone(),
            prefill: Prefill {
                name: buyer.name.clone(),
                email: buyer.email.clone(),
                contact: buyer.contact.clone(),
            },
            theme: Theme {
                color: merchant.theme_color.clone(),
            },
        }
    }
}

/// Buyer details pre-filled into the checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Prefill {
    /// Buyer name
    pub name: String,
    /// Buyer email
    pub email: String,
    /// Buyer phone number
    pub contact: String,
}

/// Checkout theming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Theme {
    /// Accent color, as a CSS hex string
    pub color: String,
}

/// What the payment SDK resolves with after a successful payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct PaymentReceipt {
    /// The provider's payment identifier
    pub razorpay_payment_id: String,
    /// The order that was paid
    pub razorpay_order_id: String,
    /// Signature over order and payment ids, for server-side verification
    pub razorpay_signature: String,
}

/// Body of `POST subscribe/add-records`, reporting a completed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    /// The provider's payment identifier
    pub razorpay_payment_id: String,
    /// The order that was paid
    pub razorpay_order_id: String,
    /// The payment signature
    pub razorpay_signature: String,
    /// The plan amount, as text
    pub amount: String,
}

impl PaymentConfirmation {
    /// Pair a receipt with the amount that was charged.
    pub fn new(receipt: PaymentReceipt, amount: Amount) -> Self {
        Self {
            razorpay_payment_id: receipt.razorpay_payment_id,
            razorpay_order_id: receipt.razorpay_order_id,
            razorpay_signature: receipt.razorpay_signature,
            amount: amount.to_string(),
        }
    }
}

/// The backend's verdict on a reported payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ConfirmationRecord {
    /// Whether the payment was verified and the subscription recorded
    pub status: bool,
}

/// The error object the payment SDK rejects with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("payment failed (code {code}): {description}")]
pub struct GatewayFailure {
    /// The SDK's numeric error code
    pub code: i32,
    /// Human-readable reason
    pub description: String,
}

impl GatewayFailure {
    /// The SDK code for a network failure during checkout.
    pub const NETWORK_ERROR: i32 = 0;
    /// The SDK code for options the SDK refused.
    pub const INVALID_OPTIONS: i32 = 1;
    /// The SDK code for the buyer dismissing the checkout.
    pub const PAYMENT_CANCELLED: i32 = 2;

    /// Whether the buyer backed out rather than the payment failing.
    pub fn is_cancellation(&self) -> bool {
        self.code == Self::PAYMENT_CANCELLED
    }
}

/// A user-facing notification raised by the checkout flow (the blocking alert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// The payment went through and was recorded
    PaymentSucceeded,
    /// The purchase ended in failure; carries the reason shown to the user
    PaymentFailed(String),
    /// The buyer dismissed the checkout
    PaymentCancelled,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PaymentSucceeded => f.write_str("Payment successful"),
            Self::PaymentFailed(reason) => write!(f, "Error: {reason}"),
            Self::PaymentCancelled => f.write_str("Payment cancelled"),
        }
    }
}
