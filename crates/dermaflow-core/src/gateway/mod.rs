//! Remote data gateway: the single configured handle every screen uses to
//! query and mutate the hosted store.
//!
//! Calls are blocking (libcurl); run via `spawn_blocking` from async code.

mod error;
mod query;

pub use error::{classify_failure, StoreError};
pub use query::{Cmp, Direction, Filter, Query};

use crate::config::StoreConfig;
use crate::http::{self, HttpResponse, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

/// Process-wide handle to the hosted data store's REST API.
#[derive(Debug, Clone)]
pub struct Gateway {
    base: Url,
    api_key: String,
    bearer: Option<String>,
}

impl Gateway {
    pub fn new(cfg: &StoreConfig) -> Result<Self, StoreError> {
        // A trailing slash keeps Url::join appending instead of replacing.
        let mut base = cfg.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self {
            base: Url::parse(&base)?,
            api_key: cfg.api_key.clone(),
            bearer: None,
        })
    }

    /// Attach (or clear) the signed-in user's access token. Without one, the
    /// project API key is sent as the bearer.
    pub fn set_bearer(&mut self, token: Option<String>) {
        self.bearer = token;
    }

    pub fn bearer(&self) -> Option<&str> {
        self.bearer.as_deref()
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Resolve a path like `rest/v1/clients` or `auth/v1/user` against the base.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        Ok(self.base.join(path)?)
    }

    pub(crate) fn headers(&self, extra: &[(&'static str, String)]) -> Vec<(&'static str, String)> {
        let bearer = self.bearer.as_deref().unwrap_or(&self.api_key);
        let mut headers = vec![
            ("apikey", self.api_key.clone()),
            ("Authorization", format!("Bearer {}", bearer)),
            ("Content-Type", "application/json".to_string()),
        ];
        headers.extend_from_slice(extra);
        headers
    }

    fn table_url(&self, table: &str, query: &Query) -> Result<Url, StoreError> {
        let mut url = self.endpoint(&format!("rest/v1/{}", table))?;
        query.apply(&mut url);
        Ok(url)
    }

    fn check(&self, response: HttpResponse) -> Result<HttpResponse, StoreError> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(classify_failure(response.status, &response.body))
        }
    }

    /// Fetch all rows matching the query.
    pub fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, StoreError> {
        let url = self.table_url(table, query)?;
        let response = http::request(Method::Get, url.as_str(), &self.headers(&[]), None)?;
        let response = self.check(response)?;
        Ok(response.json()?)
    }

    /// Detail fetch: exactly one row, `NotFound` when the id does not exist.
    pub fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<T, StoreError> {
        let rows: Vec<T> = self.select(table, &query.clone().limit(1))?;
        rows.into_iter().next().ok_or(StoreError::NotFound)
    }

    /// Insert one row and return the stored representation.
    pub fn insert<T: DeserializeOwned, P: Serialize>(
        &self,
        table: &str,
        payload: &P,
    ) -> Result<T, StoreError> {
        let url = self.table_url(table, &Query::new())?;
        let body = serde_json::to_vec(payload)?;
        let headers = self.headers(&[("Prefer", "return=representation".to_string())]);
        let response = http::request(Method::Post, url.as_str(), &headers, Some(&body))?;
        let response = self.check(response)?;
        let mut rows: Vec<T> = response.json()?;
        if rows.is_empty() {
            return Err(StoreError::Remote {
                code: None,
                message: "insert returned no representation".to_string(),
            });
        }
        Ok(rows.remove(0))
    }

    /// Patch all rows matching the query.
    pub fn update<P: Serialize>(
        &self,
        table: &str,
        query: &Query,
        payload: &P,
    ) -> Result<(), StoreError> {
        let url = self.table_url(table, query)?;
        let body = serde_json::to_vec(payload)?;
        let response = http::request(Method::Patch, url.as_str(), &self.headers(&[]), Some(&body))?;
        self.check(response)?;
        Ok(())
    }

    /// Exact row count for the query (HEAD request, no row transfer).
    pub fn count(&self, table: &str, query: &Query) -> Result<u64, StoreError> {
        let url = self.table_url(table, &query.clone().columns("id"))?;
        let headers = self.headers(&[("Prefer", "count=exact".to_string())]);
        let response = http::request(Method::Head, url.as_str(), &headers, None)?;
        let response = self.check(response)?;
        let range = response.header("Content-Range").unwrap_or("");
        parse_content_range(range).ok_or_else(|| StoreError::Remote {
            code: None,
            message: format!("missing count in Content-Range {:?}", range),
        })
    }
}

/// Parse the total out of a `Content-Range` value (`0-24/3573` or `*/0`).
fn parse_content_range(value: &str) -> Option<u64> {
    let (_, total) = value.split_once('/')?;
    total.trim().parse().ok()
}
