//! PostgreSQL connection pools on a Managed Database cluster.

use serde::{Deserialize, Serialize};

use crate::client::{DATABASE_PATH, Meta, VultrClient};
use crate::error::Result;

/// A pgbouncer-style connection pool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionPool {
    pub name: String,
    pub database: String,
    pub username: String,
    pub mode: String,
    pub size: i64,
}

/// Used and available server connections for the cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionPoolUsage {
    pub used: i64,
    pub available: i64,
    pub max: i64,
}

/// Request body for [`ConnectionPoolHandler::create`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConnectionPoolCreateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

/// Request body for [`ConnectionPoolHandler::update`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConnectionPoolUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

#[derive(Deserialize)]
struct ConnectionPoolEnvelope {
    connection_pool: ConnectionPool,
}

#[derive(Deserialize)]
struct ConnectionPoolsEnvelope {
    connections: ConnectionPoolUsage,
    connection_pools: Vec<ConnectionPool>,
    meta: Option<Meta>,
}

/// Bindings for the PostgreSQL connection pool endpoints
#[derive(Debug, Clone)]
pub struct ConnectionPoolHandler {
    client: VultrClient,
}

impl ConnectionPoolHandler {
    pub fn new(client: VultrClient) -> Self {
        Self { client }
    }

    /// List pools along with the cluster's connection usage
    pub async fn list(
        &self,
        database_id: &str,
    ) -> Result<(ConnectionPoolUsage, Vec<ConnectionPool>, Option<Meta>)> {
        let envelope: ConnectionPoolsEnvelope = self
            .client
            .get(&format!("{DATABASE_PATH}/{database_id}/connection-pools"))
            .await?;
        Ok((
            envelope.connections,
            envelope.connection_pools,
            envelope.meta,
        ))
    }

    /// Create a connection pool
    pub async fn create(
        &self,
        database_id: &str,
        request: &ConnectionPoolCreateRequest,
    ) -> Result<ConnectionPool> {
        let envelope: ConnectionPoolEnvelope = self
            .client
            .post(
                &format!("{DATABASE_PATH}/{database_id}/connection-pools"),
                request,
            )
            .await?;
        Ok(envelope.connection_pool)
    }

    /// Get a connection pool by name
    pub async fn get(&self, database_id: &str, pool_name: &str) -> Result<ConnectionPool> {
        let envelope: ConnectionPoolEnvelope = self
            .client
            .get(&format!(
                "{DATABASE_PATH}/{database_id}/connection-pools/{pool_name}"
            ))
            .await?;
        Ok(envelope.connection_pool)
    }

    /// Update a connection pool
    pub async fn update(
        &self,
        database_id: &str,
        pool_name: &str,
        request: &ConnectionPoolUpdateRequest,
    ) -> Result<ConnectionPool> {
        let envelope: ConnectionPoolEnvelope = self
            .client
            .put(
                &format!("{DATABASE_PATH}/{database_id}/connection-pools/{pool_name}"),
                request,
            )
            .await?;
        Ok(envelope.connection_pool)
    }

    /// Delete a connection pool
    pub async fn delete(&self, database_id: &str, pool_name: &str) -> Result<()> {
        self.client
            .delete(&format!(
                "{DATABASE_PATH}/{database_id}/connection-pools/{pool_name}"
            ))
            .await
    }
}
