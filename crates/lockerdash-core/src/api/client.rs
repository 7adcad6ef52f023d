//! Locker backend REST client.
//!
//! Uses reqwest to call the `/api/*` endpoints consumed by the dashboard.

use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{
    Customer, CustomerUpdate, ErrorBody, Locker, NewCustomer, Notification, Payment, Reservation,
    Stats,
};
use crate::config::ApiConfig;
use crate::error::{Error, Result};

/// Locker backend REST client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client for the backend described by `config`.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(Error::Config("base_url is empty".into()));
        }

        let mut headers = HeaderMap::new();
        if let Some(ref cookie) = config.session_cookie {
            let val = HeaderValue::from_str(cookie)
                .map_err(|_| Error::Config("Invalid session cookie format".into()))?;
            headers.insert(COOKIE, val);
        }

        // reqwest is built with rustls-no-provider; `Err` means a provider is
        // already installed.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Build the `/api` URL for a given path.
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Turn a response into `T`, or into `Error::Api` carrying the body's
    /// `error` field for non-success statuses.
    async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        let body = resp.bytes().await?;
        Self::check_status(status, &body)?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn check_status(status: reqwest::StatusCode, body: &[u8]) -> Result<()> {
        if status.is_success() {
            return Ok(());
        }
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error);
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.api_url(path);
        debug!(%url, "GET");
        let resp = self.http.get(&url).send().await?;
        Self::read_json(resp).await
    }

    /// Send a JSON write. Success is the status alone; the response body is
    /// only read for the error message.
    async fn write<B: Serialize + Sync>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let url = self.api_url(path);
        debug!(%url, %method, "write");
        let resp = self.http.request(method, &url).json(body).send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        Self::check_status(status, &bytes)
    }

    // =========================================================================
    // Customers
    // =========================================================================

    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.get("/customers").await
    }

    pub async fn get_customer(&self, id: i64) -> Result<Customer> {
        self.get(&format!("/customers/{id}")).await
    }

    pub async fn create_customer(&self, customer: &NewCustomer) -> Result<()> {
        self.write(reqwest::Method::POST, "/customers", customer)
            .await
    }

    pub async fn update_customer(&self, id: i64, update: &CustomerUpdate) -> Result<()> {
        self.write(reqwest::Method::PUT, &format!("/customers/{id}"), update)
            .await
    }

    // =========================================================================
    // Read-only views
    // =========================================================================

    pub async fn list_lockers(&self) -> Result<Vec<Locker>> {
        self.get("/lockers").await
    }

    pub async fn list_reservations(&self) -> Result<Vec<Reservation>> {
        self.get("/reservations").await
    }

    pub async fn list_payments(&self) -> Result<Vec<Payment>> {
        self.get("/payments").await
    }

    pub async fn list_notifications(&self) -> Result<Vec<Notification>> {
        self.get("/notifications").await
    }

    pub async fn stats(&self) -> Result<Stats> {
        self.get("/stats").await
    }
}
