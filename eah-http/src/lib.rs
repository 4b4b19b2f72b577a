#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use eah_core::{
    models::{
        ApplicationError, AuctionPage, AuctionQuery, BearerToken, ConfirmationRecord,
        DataEnvelope, OrderRecord, OrderRequest, PaymentConfirmation, PlanTier, SearchEnvelope,
    },
    ports::{AuctionRepository, Backend, SubscriptionRepository},
};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{Level, event};

pub mod config;
use config::HttpConfig;

/// The ways a backend call can fail before yielding a usable response.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The configured base URL, or an endpoint resolved against it, is not a URL
    #[error("invalid backend url {url:?}: {reason}")]
    Url {
        /// The offending input
        url: String,
        /// Why it was refused
        reason: String,
    },
    /// The request could not be sent or its body could not be read
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// The backend answered outside the 2xx range
    #[error("{endpoint} answered with HTTP {status}")]
    Status {
        /// The endpoint path
        endpoint: &'static str,
        /// The HTTP status code
        status: u16,
    },
    /// The body was not the expected JSON
    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        /// The endpoint path
        endpoint: &'static str,
        /// The decoding failure
        source: serde_json::Error,
    },
}

const SEARCH: &str = "auction/search";
const PLANS: &str = "subscribe/plans";
const CREATE_ORDER: &str = "subscribe/create-order";
const ADD_RECORDS: &str = "subscribe/add-records";

/// A client of the EAuctionsHub REST API.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Build a client for the configured backend.
    pub fn open(config: &HttpConfig) -> Result<Self, HttpError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Self::with_client(client, &config.base_url)
    }

    /// Use an existing `reqwest` client.
    ///
    /// A missing trailing slash on `base_url` is added, so that endpoint paths extend
    /// the base path instead of replacing its last segment.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, HttpError> {
        let mut base_url = Url::parse(base_url).map_err(|err| HttpError::Url {
            url: base_url.to_owned(),
            reason: err.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(HttpError::Url {
                url: base_url.into(),
                reason: "not a hierarchical url".into(),
            });
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    /// The API root requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &'static str) -> Result<Url, HttpError> {
        self.base_url.join(path).map_err(|err| HttpError::Url {
            url: path.to_owned(),
            reason: err.to_string(),
        })
    }

    async fn send(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, HttpError> {
        event!(Level::DEBUG, endpoint, "sending request");
        let response = request.send().await?;
        event!(Level::DEBUG, endpoint, status = response.status().as_u16(), "received response");
        Ok(response)
    }

    async fn expect_json<T: DeserializeOwned>(
        endpoint: &'static str,
        response: Response,
    ) -> Result<T, HttpError> {
        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| HttpError::Decode { endpoint, source })
    }
}

fn authorize(request: RequestBuilder, token: Option<&BearerToken>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token.secret()),
        None => request,
    }
}

impl Backend for HttpBackend {
    type Error = HttpError;
}

impl AuctionRepository for HttpBackend {
    async fn search_auctions(
        &self,
        query: &AuctionQuery,
    ) -> Result<Result<AuctionPage, ApplicationError>, Self::Error> {
        let url = self.endpoint(SEARCH)?;
        let response = self.send(SEARCH, self.client.get(url).query(query)).await?;

        // The envelope is authoritative: a failure envelope is reported as such even
        // when it arrives with an error status.
        let status = response.status();
        let body = response.bytes().await?;
        match serde_json::from_slice::<SearchEnvelope>(&body) {
            Ok(envelope) => Ok(envelope.into_page()),
            Err(source) if status.is_success() => Err(HttpError::Decode {
                endpoint: SEARCH,
                source,
            }),
            Err(_) => Err(HttpError::Status {
                endpoint: SEARCH,
                status: status.as_u16(),
            }),
        }
    }
}

impl SubscriptionRepository for HttpBackend {
    async fn list_plans(&self) -> Result<Vec<PlanTier>, Self::Error> {
        let url = self.endpoint(PLANS)?;
        let response = self.send(PLANS, self.client.get(url)).await?;
        let plans: DataEnvelope<Vec<PlanTier>> = Self::expect_json(PLANS, response).await?;
        Ok(plans.into_inner())
    }

    async fn create_order(
        &self,
        token: Option<&BearerToken>,
        request: &OrderRequest,
    ) -> Result<OrderRecord, Self::Error> {
        let url = self.endpoint(CREATE_ORDER)?;
        let builder = authorize(self.client.post(url), token).json(request);
        let response = self.send(CREATE_ORDER, builder).await?;
        let order: DataEnvelope<OrderRecord> = Self::expect_json(CREATE_ORDER, response).await?;
        Ok(order.into_inner())
    }

    async fn confirm_payment(
        &self,
        token: Option<&BearerToken>,
        confirmation: &PaymentConfirmation,
    ) -> Result<ConfirmationRecord, Self::Error> {
        let url = self.endpoint(ADD_RECORDS)?;
        let builder = authorize(self.client.post(url), token).json(confirmation);
        let response = self.send(ADD_RECORDS, builder).await?;
        Self::expect_json(ADD_RECORDS, response).await
    }
}
