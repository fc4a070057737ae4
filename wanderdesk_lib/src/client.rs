//! HTTP-backed [`ResourceBackend`] with library-level error mapping.

use async_trait::async_trait;
use wanderdesk_api::types::{Page, Record, RecordId, Submission};
use wanderdesk_api::{Client, PageQuery, Resource};

use crate::config::AdminConfig;
use crate::controller::ResourceBackend;
use crate::error::{AdminError, Operation};

/// Wraps the API client, tagging every failure with the resource and
/// operation it came from.
pub struct AdminClient {
    inner: Client,
}

impl AdminClient {
    pub fn new(inner: Client) -> Self {
        Self { inner }
    }

    pub fn from_config(config: &AdminConfig) -> Result<Self, AdminError> {
        Ok(Self::new(config.client()?))
    }

    /// Unsigned client against `base_url`. Used for testing.
    pub fn with_base_url(base_url: &str) -> Result<Self, AdminError> {
        let inner = Client::with_base_url(base_url)
            .map_err(|e| AdminError::InvalidInput(format!("bad base url: {}", e)))?;
        Ok(Self::new(inner))
    }

    pub fn api(&self) -> &Client {
        &self.inner
    }
}

#[async_trait]
impl ResourceBackend for AdminClient {
    async fn list_page(
        &self,
        resource: Resource,
        query: &PageQuery,
    ) -> Result<Page<Record>, AdminError> {
        tracing::debug!(
            "Listing {} page {} (limit {})",
            resource,
            query.page(),
            query.limit()
        );
        self.inner
            .list_paginated(resource, query)
            .await
            .map_err(|e| AdminError::fetch(resource, e))
    }

    async fn list_all(&self, resource: Resource) -> Result<Vec<Record>, AdminError> {
        tracing::debug!("Listing all {}", resource);
        self.inner
            .list(resource)
            .await
            .map_err(|e| AdminError::fetch(resource, e))
    }

    async fn fetch(&self, resource: Resource, id: &RecordId) -> Result<Record, AdminError> {
        self.inner
            .fetch(resource, id)
            .await
            .map_err(|e| AdminError::fetch(resource, e))
    }

    async fn create(
        &self,
        resource: Resource,
        submission: Submission,
    ) -> Result<Option<Record>, AdminError> {
        tracing::info!("Creating {} ({:?})", resource, submission.encoding());
        self.inner
            .add(resource, submission)
            .await
            .map_err(|e| AdminError::mutation(Operation::Create, resource, e))
    }

    async fn update(
        &self,
        resource: Resource,
        id: &RecordId,
        submission: Submission,
    ) -> Result<Option<Record>, AdminError> {
        tracing::info!("Updating {} {} ({:?})", resource, id, submission.encoding());
        self.inner
            .update(resource, id, submission)
            .await
            .map_err(|e| AdminError::mutation(Operation::Update, resource, e))
    }

    async fn delete(&self, resource: Resource, id: &RecordId) -> Result<(), AdminError> {
        tracing::info!("Deleting {} {}", resource, id);
        self.inner
            .delete(resource, id)
            .await
            .map_err(|e| AdminError::mutation(Operation::Delete, resource, e))
    }

    async fn set_published(
        &self,
        resource: Resource,
        id: &RecordId,
        published: bool,
    ) -> Result<Option<Record>, AdminError> {
        tracing::info!("Setting {} {} published={}", resource, id, published);
        self.inner
            .set_published(resource, id, published)
            .await
            .map_err(|e| AdminError::mutation(Operation::Publish, resource, e))
    }
}
