use crate::api::traits::CatalogSource;
use crate::auth::SessionStore;
use crate::config::ClientConfig;
use crate::error::{error_from_response, ApiError, Result};
use crate::models::{Host, Hotel, Listing, NewListing};
use crate::validation::check_new_listing;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const LISTINGS_PATH: &str = "/api/listings/";
const HOSTS_PATH: &str = "/api/hosts/";

/// HTTP client for the listings and hosts API.
///
/// Reads are bounded by the configured read timeout and, in their plain
/// form, degrade to an empty collection. The `try_` variants report the
/// failure instead. Creating a listing always reports failures.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
    read_timeout: Duration,
    session: Option<SessionStore>,
}

impl CatalogClient {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("dreambook/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self::with_client(client, &config.api_base_url, config.read_timeout))
    }

    pub fn with_client(client: Client, base_url: &str, read_timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            read_timeout,
            session: None,
        }
    }

    /// Attach the stored access token, when there is one, to writes
    pub fn with_session(mut self, session: SessionStore) -> Self {
        self.session = Some(session);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON array, aborting the request once the read timeout elapses
    async fn get_collection<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<Vec<T>> {
        let url = self.url(path);
        debug!("Fetching {} from {}", what, url);

        let request = fetch_json::<Vec<T>>(&self.client, &url, what);
        match tokio::time::timeout(self.read_timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout(self.read_timeout)),
        }
    }

    pub async fn try_fetch_listings(&self) -> Result<Vec<Listing>> {
        self.get_collection(LISTINGS_PATH, "listings").await
    }

    /// Listings, or an empty list if they could not be fetched
    pub async fn fetch_listings(&self) -> Vec<Listing> {
        or_empty(self.try_fetch_listings().await, "listings")
    }

    /// Hotels, or an empty list if they could not be fetched
    pub async fn fetch_hotels(&self) -> Vec<Hotel> {
        or_empty(self.try_fetch_hotels().await, "hotels")
    }

    /// Hosts, or an empty list if they could not be fetched
    pub async fn fetch_hosts(&self) -> Vec<Host> {
        or_empty(self.try_fetch_hosts().await, "hosts")
    }

    /// Post a new listing. Input is checked first and nothing is sent if
    /// it is invalid; every failure is returned to the caller.
    pub async fn create_listing(&self, input: &NewListing) -> Result<Listing> {
        check_new_listing(input).into_result()?;

        let mut request = self.client.post(self.url(LISTINGS_PATH)).json(input);
        if let Some(token) = self.session.as_ref().and_then(|s| s.get_access_token()) {
            request = request.bearer_auth(token);
        }

        let result = post_json(request).await;
        match &result {
            Ok(listing) => info!(id = listing.id, "Created listing {:?}", listing.title),
            Err(e) => warn!(error = %e, "Error creating listing"),
        }
        result
    }
}

async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str, what: &str) -> Result<T> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(ApiError::Http {
            status: response.status().as_u16(),
            message: format!("Failed to fetch {what}"),
        });
    }
    Ok(response.json::<T>().await?)
}

async fn post_json(request: RequestBuilder) -> Result<Listing> {
    let response = request.send().await?;
    if !response.status().is_success() {
        return Err(error_from_response(response, "Failed to create listing").await);
    }
    Ok(response.json::<Listing>().await?)
}

fn or_empty<T>(result: Result<Vec<T>>, what: &str) -> Vec<T> {
    match result {
        Ok(items) => {
            debug!("Fetched {} {}", items.len(), what);
            items
        }
        Err(e) if e.is_transport() => {
            warn!(error = %e, "Error fetching {}, showing none", what);
            Vec::new()
        }
        Err(e) => {
            error!(error = %e, "Unexpected error fetching {}, showing none", what);
            Vec::new()
        }
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn try_fetch_hotels(&self) -> Result<Vec<Hotel>> {
        self.get_collection(LISTINGS_PATH, "hotels").await
    }

    async fn try_fetch_hosts(&self) -> Result<Vec<Host>> {
        self.get_collection(HOSTS_PATH, "hosts").await
    }

    fn source_name(&self) -> &'static str {
        "api"
    }
}
