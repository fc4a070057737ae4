//! HTTP client for the travel platform's admin REST API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use url::Url;

use crate::{
    auth::{NoAuth, TokenSource},
    query::PageQuery,
    types::{items_from_body, Encoding, Page, Record, RecordId, Submission},
    Error, Resource,
};

/// Request timeout used when the caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("wanderdesk/", env!("CARGO_PKG_VERSION"));

/// HTTP client for every admin resource collection.
///
/// One instance serves all resources. The bearer token is asked from the
/// [`TokenSource`] on each request. Mutations are sent once: there is no
/// retry, backoff or idempotency key.
pub struct Client {
    http: reqwest::Client,
    /// Base URL of the API, without a trailing slash.
    base_api_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl Client {
    /// Creates a client for `base_url` signing requests with `tokens`.
    pub fn new(
        base_url: &str,
        tokens: Arc<dyn TokenSource>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Unsigned client with the default timeout. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(base_url, Arc::new(NoAuth), DEFAULT_TIMEOUT)
    }

    fn collection_url(&self, resource: Resource) -> Result<Url, Error> {
        parse_url(&format!("{}/{}/", self.base_api_url, resource.path()))
    }

    fn item_url(&self, resource: Resource, segments: &[&str]) -> Result<Url, Error> {
        let mut url = parse_url(&format!("{}/{}", self.base_api_url, resource.path()))?;
        url.path_segments_mut()
            .map_err(|_| {
                tracing::error!("Base URL {} cannot carry a path", self.base_api_url);
                Error::RequestFailed
            })?
            .extend(segments);
        Ok(url)
    }

    fn sign(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, label: &str, request: RequestBuilder) -> Result<Value, Error> {
        let resp = self
            .sign(request)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("{} request failed: {}", label, e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read {} response body: {}", label, e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("{} failed with status {}: {}", label, status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str::<Value>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse {} response: {} | body: {}", label, e, snippet);
            Error::InvalidResponse(e.to_string())
        })
    }

    /// Fetches the whole collection: `GET /{resource}/`.
    pub async fn list<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>, Error> {
        let url = self.collection_url(resource)?;
        let body = self.send("list", self.http.get(url)).await?;
        items_from_body(body, resource.collection_key())
    }

    /// Fetches one page: `GET /{resource}/?page&limit`.
    pub async fn list_paginated<T: DeserializeOwned>(
        &self,
        resource: Resource,
        query: &PageQuery,
    ) -> Result<Page<T>, Error> {
        let url = query.add_to_url(&self.collection_url(resource)?);
        let body = self.send("list page", self.http.get(url)).await?;
        Page::from_envelope(body, resource.collection_key())
    }

    /// Fetches a single record: `GET /{resource}/{id}`.
    pub async fn fetch(&self, resource: Resource, id: &RecordId) -> Result<Record, Error> {
        let url = self.item_url(resource, &[id.as_str()])?;
        let body = self.send("fetch", self.http.get(url)).await?;
        unwrap_record(body).ok_or_else(|| Error::InvalidResponse("empty record".to_string()))
    }

    /// Creates a record: `POST /{resource}/`.
    pub async fn add(
        &self,
        resource: Resource,
        submission: Submission,
    ) -> Result<Option<Record>, Error> {
        let url = self.collection_url(resource)?;
        let request = with_body(self.http.post(url), submission)?;
        Ok(unwrap_record(self.send("add", request).await?))
    }

    /// Updates a record: `PUT /{resource}/{id}`.
    pub async fn update(
        &self,
        resource: Resource,
        id: &RecordId,
        submission: Submission,
    ) -> Result<Option<Record>, Error> {
        let url = self.item_url(resource, &[id.as_str()])?;
        let request = with_body(self.http.put(url), submission)?;
        Ok(unwrap_record(self.send("update", request).await?))
    }

    /// Deletes a record: `DELETE /{resource}/{id}`.
    pub async fn delete(&self, resource: Resource, id: &RecordId) -> Result<(), Error> {
        let url = self.item_url(resource, &[id.as_str()])?;
        self.send("delete", self.http.delete(url)).await?;
        Ok(())
    }

    /// Sets the publish flag: `POST /{resource}/published/{id}` with
    /// `{"published": "1"|"0"}`.
    ///
    /// Returns `Ok(None)` when the backend answers with a falsy body, which
    /// callers must treat as a failure alongside `Err`.
    pub async fn set_published(
        &self,
        resource: Resource,
        id: &RecordId,
        published: bool,
    ) -> Result<Option<Record>, Error> {
        let url = self.item_url(resource, &["published", id.as_str()])?;
        let flag = if published { "1" } else { "0" };
        let request = self.http.post(url).json(&json!({ "published": flag }));
        Ok(unwrap_record(self.send("publish", request).await?))
    }
}

fn parse_url(raw: &str) -> Result<Url, Error> {
    Url::parse(raw).map_err(|e| {
        tracing::error!("Invalid URL constructed: {}", e);
        Error::RequestFailed
    })
}

fn with_body(request: RequestBuilder, submission: Submission) -> Result<RequestBuilder, Error> {
    Ok(match submission.encoding() {
        Encoding::Json => request.json(&submission.to_json()),
        Encoding::Multipart => request.multipart(submission.into_multipart()?),
    })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Pulls the record out of a mutation response. Accepts the record itself
/// or a record wrapped in `data`. Truthy non-object bodies acknowledge the
/// call without returning a record.
fn unwrap_record(body: Value) -> Option<Record> {
    if is_falsy(&body) {
        return None;
    }
    match body {
        Value::Object(mut obj) => {
            if !obj.contains_key("id") && !obj.contains_key("_id") {
                if let Some(Value::Object(inner)) = obj.remove("data") {
                    return Some(Record::new(inner));
                }
            }
            Some(Record::new(obj))
        }
        _ => Some(Record::default()),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
