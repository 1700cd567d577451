//! Kafka client quotas on a Managed Database cluster.
//!
//! A quota is addressed by the `(client_id, username)` pair rather than a
//! single identifier.

use serde::{Deserialize, Serialize};

use crate::client::{DATABASE_PATH, Meta, VultrClient};
use crate::error::Result;

/// A Kafka quota
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quota {
    pub client_id: String,
    pub user: String,
    pub consumer_byte_rate: i64,
    pub producer_byte_rate: i64,
    pub request_percentage: i64,
}

/// Request body for [`QuotaHandler::create`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuotaCreateRequest {
    pub client_id: String,
    pub user: String,
    pub consumer_byte_rate: i64,
    pub producer_byte_rate: i64,
    pub request_percentage: i64,
}

/// Request body for [`QuotaHandler::update`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuotaUpdateRequest {
    pub consumer_byte_rate: i64,
    pub producer_byte_rate: i64,
    pub request_percentage: i64,
}

#[derive(Deserialize)]
struct QuotaEnvelope {
    quota: Quota,
}

#[derive(Deserialize)]
struct QuotasEnvelope {
    quotas: Vec<Quota>,
    meta: Option<Meta>,
}

/// Bindings for the Kafka quota endpoints
#[derive(Debug, Clone)]
pub struct QuotaHandler {
    client: VultrClient,
}

impl QuotaHandler {
    pub fn new(client: VultrClient) -> Self {
        Self { client }
    }

    /// List all quotas on a Kafka Managed Database
    pub async fn list(&self, database_id: &str) -> Result<(Vec<Quota>, Option<Meta>)> {
        let envelope: QuotasEnvelope = self
            .client
            .get(&format!("{DATABASE_PATH}/{database_id}/quotas"))
            .await?;
        Ok((envelope.quotas, envelope.meta))
    }

    /// Create a quota
    pub async fn create(&self, database_id: &str, request: &QuotaCreateRequest) -> Result<Quota> {
        let envelope: QuotaEnvelope = self
            .client
            .post(&format!("{DATABASE_PATH}/{database_id}/quotas"), request)
            .await?;
        Ok(envelope.quota)
    }

    /// Get the quota for a client ID and username
    pub async fn get(&self, database_id: &str, client_id: &str, username: &str) -> Result<Quota> {
        let envelope: QuotaEnvelope = self
            .client
            .get(&format!(
                "{DATABASE_PATH}/{database_id}/quotas/{client_id}/{username}"
            ))
            .await?;
        Ok(envelope.quota)
    }

    /// Update the quota for a client ID and username
    pub async fn update(
        &self,
        database_id: &str,
        client_id: &str,
        username: &str,
        request: &QuotaUpdateRequest,
    ) -> Result<Quota> {
        let envelope: QuotaEnvelope = self
            .client
            .put(
                &format!("{DATABASE_PATH}/{database_id}/quotas/{client_id}/{username}"),
                request,
            )
            .await?;
        Ok(envelope.quota)
    }

    /// Delete the quota for a client ID and username
    pub async fn delete(&self, database_id: &str, client_id: &str, username: &str) -> Result<()> {
        self.client
            .delete(&format!(
                "{DATABASE_PATH}/{database_id}/quotas/{client_id}/{username}"
            ))
            .await
    }
}
