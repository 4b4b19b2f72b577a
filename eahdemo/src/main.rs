use anyhow::{Context as _, bail};
use eah_axum::start_server;
use eah_controller::{AuctionFeed, PlanCheckout, PurchaseOutcome, Resolution};
use eah_core::{
    models::{
        AuctionFilter, AuctionQuery, AuctionRecord, BuyerContact, CheckoutOptions,
        ConfirmationRecord, OrderRecord, OrderRequest, PaymentConfirmation, PlanId, PlanTier,
        SearchEnvelope,
    },
    ports::{CredentialStore as _, TOKEN_KEY},
};
use eah_http::HttpBackend;
use eah_sqlite::Db;
use eahdemo::{
    AppConfig, Cli, Commands, TokenCommand,
    console::{ConsoleGateway, ConsoleNotifier},
    impls::{DemoApp, Fixtures},
};
use jwt_simple::prelude::{Claims, Duration, HS256Key, MACLike as _};
use std::io::Write as _;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Everything is instrumented with `tracing`; RUST_LOG decides what is shown.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::import()?;
    let AppConfig {
        backend,
        store,
        merchant,
        server,
    } = AppConfig::load(&cli)?;

    match cli.command {
        Commands::Serve { secret, fixtures } => {
            let fixtures = match fixtures {
                Some(path) => Fixtures::load(&path)
                    .with_context(|| format!("reading fixtures from {}", path.display()))?,
                None => Fixtures::builtin()?,
            };
            let app = DemoApp::new(fixtures, HS256Key::from_bytes(secret.as_bytes()));
            start_server(server, app).await?;
        }

        Commands::Auctions {
            city,
            asset_type,
            pages,
        } => {
            let backend = HttpBackend::open(&backend)?;
            let mut feed = AuctionFeed::new(AuctionFilter::new(city, asset_type));

            let mut resolution = Some(feed.initialize(&backend).await);
            let mut loaded = 0;
            while let Some(outcome) = resolution {
                match outcome {
                    Resolution::Applied { .. } | Resolution::Stale => loaded += 1,
                    Resolution::Rejected(err) => bail!("the backend refused the search: {err}"),
                    Resolution::Failed(err) => bail!("the search failed: {err}"),
                }
                if pages != 0 && loaded >= pages {
                    break;
                }
                resolution = feed.load_more(&backend).await;
            }

            for record in feed.items() {
                print_record(record);
            }
            eprintln!(
                "{} auctions, page {} of {}",
                feed.items().len(),
                feed.state().page,
                feed.state().last_page
            );
        }

        Commands::Plans => {
            let mut checkout = PlanCheckout::new(HttpBackend::open(&backend)?, merchant);
            for plan in checkout.load_plans().await?.values() {
                println!(
                    "{}\t{}\t{}\t{} days",
                    plan.id,
                    plan.kind().title(),
                    plan.amount.display_inr(),
                    plan.duration_in_days
                );
            }
        }

        Commands::Token { action } => {
            let db = Db::open(&store).await?;
            match action {
                TokenCommand::Set { token } => {
                    db.set(TOKEN_KEY, token.trim()).await?;
                }
                TokenCommand::Show => match db.get(TOKEN_KEY).await? {
                    Some(token) => println!("{token}"),
                    None => bail!("no token is stored"),
                },
                TokenCommand::Clear => {
                    if !db.remove(TOKEN_KEY).await? {
                        eprintln!("no token was stored");
                    }
                }
                TokenCommand::Issue {
                    secret,
                    subject,
                    days,
                } => {
                    let key = HS256Key::from_bytes(secret.as_bytes());
                    let claims = Claims::create(Duration::from_days(days)).with_subject(subject);
                    let token = key.authenticate(claims)?;
                    db.set(TOKEN_KEY, &token).await?;
                    println!("{token}");
                }
            }
        }

        Commands::Purchase {
            plan,
            name,
            email,
            contact,
        } => {
            let db = Db::open(&store).await?;
            let mut checkout = PlanCheckout::new(HttpBackend::open(&backend)?, merchant);
            let tier: PlanTier = checkout
                .load_plans()
                .await?
                .plan(&PlanId::from(plan.as_str()))
                .cloned()
                .with_context(|| format!("there is no plan {plan:?}"))?;

            let buyer = BuyerContact {
                name,
                email,
                contact,
            };
            let outcome = checkout
                .purchase_with_store(
                    &tier,
                    &db,
                    &buyer,
                    &ConsoleGateway::stdin(),
                    &ConsoleNotifier,
                )
                .await;

            match outcome {
                PurchaseOutcome::Settled { order_id, receipt } => {
                    println!("{order_id}\t{}", receipt.razorpay_payment_id)
                }
                PurchaseOutcome::Failed { reason, .. } => bail!(reason),
                PurchaseOutcome::Cancelled { order_id } => bail!("order {order_id} was not paid"),
            }
        }

        Commands::Schema { output } => {
            let schema = serde_json::json!({
                "AuctionQuery": schemars::schema_for!(AuctionQuery),
                "SearchEnvelope": schemars::schema_for!(SearchEnvelope),
                "PlanTier": schemars::schema_for!(PlanTier),
                "OrderRequest": schemars::schema_for!(OrderRequest),
                "OrderRecord": schemars::schema_for!(OrderRecord),
                "PaymentConfirmation": schemars::schema_for!(PaymentConfirmation),
                "ConfirmationRecord": schemars::schema_for!(ConfirmationRecord),
                "CheckoutOptions": schemars::schema_for!(CheckoutOptions),
            });
            let mut writer = output.write()?;
            serde_json::to_writer_pretty(&mut writer, &schema)?;
            writeln!(writer)?;
        }
    }

    Ok(())
}

fn print_record(record: &AuctionRecord) {
    let deadline = record
        .application_dead_line
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".into());
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        record.id,
        record.asset_type,
        record.city,
        record.bank,
        record.reserve_price.display_inr(),
        record.start_date,
        deadline
    );
}
