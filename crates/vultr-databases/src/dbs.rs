//! Logical databases (schemas) within a Managed Database cluster.

use serde::{Deserialize, Serialize};

use crate::client::{DATABASE_PATH, Meta, VultrClient};
use crate::error::Result;

/// A logical database inside a cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogicalDatabase {
    pub name: String,
}

/// Request body for [`LogicalDatabaseHandler::create`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogicalDatabaseCreateRequest {
    pub name: String,
}

#[derive(Deserialize)]
struct DbEnvelope {
    db: LogicalDatabase,
}

#[derive(Deserialize)]
struct DbsEnvelope {
    dbs: Vec<LogicalDatabase>,
    meta: Option<Meta>,
}

/// Bindings for the logical database endpoints
#[derive(Debug, Clone)]
pub struct LogicalDatabaseHandler {
    client: VultrClient,
}

impl LogicalDatabaseHandler {
    pub fn new(client: VultrClient) -> Self {
        Self { client }
    }

    /// List all logical databases on a Managed Database
    pub async fn list(&self, database_id: &str) -> Result<(Vec<LogicalDatabase>, Option<Meta>)> {
        let envelope: DbsEnvelope = self
            .client
            .get(&format!("{DATABASE_PATH}/{database_id}/dbs"))
            .await?;
        Ok((envelope.dbs, envelope.meta))
    }

    /// Create a logical database
    pub async fn create(
        &self,
        database_id: &str,
        request: &LogicalDatabaseCreateRequest,
    ) -> Result<LogicalDatabase> {
        let envelope: DbEnvelope = self
            .client
            .post(&format!("{DATABASE_PATH}/{database_id}/dbs"), request)
            .await?;
        Ok(envelope.db)
    }

    /// Get a logical database by name
    pub async fn get(&self, database_id: &str, name: &str) -> Result<LogicalDatabase> {
        let envelope: DbEnvelope = self
            .client
            .get(&format!("{DATABASE_PATH}/{database_id}/dbs/{name}"))
            .await?;
        Ok(envelope.db)
    }

    /// Delete a logical database and everything in it
    pub async fn delete(&self, database_id: &str, name: &str) -> Result<()> {
        self.client
            .delete(&format!("{DATABASE_PATH}/{database_id}/dbs/{name}"))
            .await
    }
}
