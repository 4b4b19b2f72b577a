//! A checkout and notification surface for the terminal.
//!
//! The console stands in for the payment SDK: the checkout options are printed and
//! the operator decides how the payment resolves by typing `pay`, `cancel` or
//! `fail <reason>`.

use eah_core::{
    models::{CheckoutOptions, GatewayFailure, OrderId, PaymentReceipt, Signal},
    ports::{Notifier, PaymentGateway},
};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt as _, BufReader, Stdin},
    sync::Mutex,
};
use tracing::{Level, event};

/// A payment gateway driven from a line-oriented input.
pub struct ConsoleGateway<R> {
    input: Mutex<R>,
}

impl ConsoleGateway<BufReader<Stdin>> {
    /// A gateway reading decisions from standard input.
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin + Send> ConsoleGateway<R> {
    /// A gateway reading decisions from `input`.
    pub fn new(input: R) -> Self {
        Self {
            input: Mutex::new(input),
        }
    }
}

impl<R: AsyncBufRead + Unpin + Send> PaymentGateway for ConsoleGateway<R> {
    async fn open(&self, options: &CheckoutOptions) -> Result<PaymentReceipt, GatewayFailure> {
        let rendered = serde_json::to_string_pretty(options).map_err(|err| GatewayFailure {
            code: GatewayFailure::INVALID_OPTIONS,
            description: err.to_string(),
        })?;
        eprintln!("{rendered}");
        eprintln!(
            "Charge {} for order {}? [pay | cancel | fail <reason>]",
            options.amount.display_inr(),
            options.order_id
        );

        let mut line = String::new();
        let read = self.input.lock().await.read_line(&mut line).await;
        match read {
            // closing the input is the same as closing the checkout
            Ok(0) => interpret("cancel", &options.order_id),
            Ok(_) => interpret(&line, &options.order_id),
            Err(err) => {
                event!(Level::ERROR, err = err.to_string(), "failed to read checkout input");
                Err(GatewayFailure {
                    code: GatewayFailure::NETWORK_ERROR,
                    description: err.to_string(),
                })
            }
        }
    }
}

fn interpret(line: &str, order_id: &OrderId) -> Result<PaymentReceipt, GatewayFailure> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match verb {
        "pay" => Ok(PaymentReceipt {
            razorpay_payment_id: format!("pay_{}", uuid::Uuid::new_v4().simple()),
            razorpay_order_id: order_id.to_string(),
            razorpay_signature: uuid::Uuid::new_v4().simple().to_string(),
        }),
        "cancel" => Err(GatewayFailure {
            code: GatewayFailure::PAYMENT_CANCELLED,
            description: "Payment cancelled by user".into(),
        }),
        "fail" => Err(GatewayFailure {
            code: GatewayFailure::NETWORK_ERROR,
            description: match rest.trim() {
                "" => "Payment failed".into(),
                reason => reason.into(),
            },
        }),
        other => Err(GatewayFailure {
            code: GatewayFailure::INVALID_OPTIONS,
            description: format!("unrecognized response {other:?}"),
        }),
    }
}

/// Prints each notification on its own line of standard error.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, signal: Signal) {
        eprintln!("{signal}");
    }
}
