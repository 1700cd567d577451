//! Kafka Connect connectors: catalog, configuration schema, lifecycle, and
//! runtime task control.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{DATABASE_PATH, Meta, VultrClient};
use crate::error::Result;

/// A connector class available for installation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailableConnector {
    pub class: String,
    pub title: String,
    pub version: String,
    pub r#type: String,
    pub doc_url: String,
}

/// One entry of a connector class's configuration schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfigurationOption {
    pub name: String,
    pub r#type: String,
    pub required: bool,
    pub default_value: String,
    pub description: String,
}

/// An installed Kafka Connect connector
///
/// `config` is an open key-value bag; its legal keys depend on the connector
/// class and are described by
/// [`ConnectorHandler::configuration_schema`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Connector {
    pub name: String,
    pub class: String,
    pub topics: String,
    pub config: Map<String, Value>,
}

/// Request body for [`ConnectorHandler::create`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConnectorCreateRequest {
    pub name: String,
    pub class: String,
    pub topics: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub config: Map<String, Value>,
}

/// Request body for [`ConnectorHandler::update`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConnectorUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub config: Map<String, Value>,
}

/// Runtime state of a connector and its tasks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorStatus {
    pub state: String,
    pub tasks: Vec<ConnectorTask>,
}

/// Runtime state of a single connector task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorTask {
    pub id: i64,
    pub state: String,
    pub trace: String,
}

#[derive(Deserialize)]
struct AvailableConnectorsEnvelope {
    available_connectors: Vec<AvailableConnector>,
}

#[derive(Deserialize)]
struct ConfigurationSchemaEnvelope {
    configuration_schema: Vec<ConnectorConfigurationOption>,
}

#[derive(Deserialize)]
struct ConnectorEnvelope {
    connector: Connector,
}

#[derive(Deserialize)]
struct ConnectorsEnvelope {
    connectors: Vec<Connector>,
    meta: Option<Meta>,
}

#[derive(Deserialize)]
struct ConnectorStatusEnvelope {
    connector_status: ConnectorStatus,
}

/// Bindings for the Kafka Connect connector endpoints
#[derive(Debug, Clone)]
pub struct ConnectorHandler {
    client: VultrClient,
}

impl ConnectorHandler {
    pub fn new(client: VultrClient) -> Self {
        Self { client }
    }

    /// Connector classes that can be installed on this cluster
    pub async fn list_available(&self, database_id: &str) -> Result<Vec<AvailableConnector>> {
        let envelope: AvailableConnectorsEnvelope = self
            .client
            .get(&format!("{DATABASE_PATH}/{database_id}/available-connectors"))
            .await?;
        Ok(envelope.available_connectors)
    }

    /// Configuration schema for a connector class
    pub async fn configuration_schema(
        &self,
        database_id: &str,
        connector_class: &str,
    ) -> Result<Vec<ConnectorConfigurationOption>> {
        let envelope: ConfigurationSchemaEnvelope = self
            .client
            .get(&format!(
                "{DATABASE_PATH}/{database_id}/available-connectors/{connector_class}/configuration"
            ))
            .await?;
        Ok(envelope.configuration_schema)
    }

    /// List installed connectors
    pub async fn list(&self, database_id: &str) -> Result<(Vec<Connector>, Option<Meta>)> {
        let envelope: ConnectorsEnvelope = self
            .client
            .get(&format!("{DATABASE_PATH}/{database_id}/connectors"))
            .await?;
        Ok((envelope.connectors, envelope.meta))
    }

    /// Install a connector
    pub async fn create(
        &self,
        database_id: &str,
        request: &ConnectorCreateRequest,
    ) -> Result<Connector> {
        let envelope: ConnectorEnvelope = self
            .client
            .post(&format!("{DATABASE_PATH}/{database_id}/connectors"), request)
            .await?;
        Ok(envelope.connector)
    }

    /// Get an installed connector by name
    pub async fn get(&self, database_id: &str, connector_name: &str) -> Result<Connector> {
        let envelope: ConnectorEnvelope = self
            .client
            .get(&format!(
                "{DATABASE_PATH}/{database_id}/connectors/{connector_name}"
            ))
            .await?;
        Ok(envelope.connector)
    }

    /// Update a connector's topics or configuration
    pub async fn update(
        &self,
        database_id: &str,
        connector_name: &str,
        request: &ConnectorUpdateRequest,
    ) -> Result<Connector> {
        let envelope: ConnectorEnvelope = self
            .client
            .put(
                &format!("{DATABASE_PATH}/{database_id}/connectors/{connector_name}"),
                request,
            )
            .await?;
        Ok(envelope.connector)
    }

    /// Remove a connector
    pub async fn delete(&self, database_id: &str, connector_name: &str) -> Result<()> {
        self.client
            .delete(&format!(
                "{DATABASE_PATH}/{database_id}/connectors/{connector_name}"
            ))
            .await
    }

    /// Runtime status of a connector and its tasks
    pub async fn status(&self, database_id: &str, connector_name: &str) -> Result<ConnectorStatus> {
        let envelope: ConnectorStatusEnvelope = self
            .client
            .get(&format!(
                "{DATABASE_PATH}/{database_id}/connectors/{connector_name}/status"
            ))
            .await?;
        Ok(envelope.connector_status)
    }

    /// Restart a connector
    pub async fn restart(&self, database_id: &str, connector_name: &str) -> Result<()> {
        self.client
            .post_empty(&format!(
                "{DATABASE_PATH}/{database_id}/connectors/{connector_name}/restart"
            ))
            .await
    }

    /// Pause a connector
    pub async fn pause(&self, database_id: &str, connector_name: &str) -> Result<()> {
        self.client
            .post_empty(&format!(
                "{DATABASE_PATH}/{database_id}/connectors/{connector_name}/pause"
            ))
            .await
    }

    /// Resume a paused connector
    pub async fn resume(&self, database_id: &str, connector_name: &str) -> Result<()> {
        self.client
            .post_empty(&format!(
                "{DATABASE_PATH}/{database_id}/connectors/{connector_name}/resume"
            ))
            .await
    }

    /// Restart a single task of a connector
    pub async fn restart_task(
        &self,
        database_id: &str,
        connector_name: &str,
        task_id: i64,
    ) -> Result<()> {
        self.client
            .post_empty(&format!(
                "{DATABASE_PATH}/{database_id}/connectors/{connector_name}/tasks/{task_id}/restart"
            ))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn create_request_omits_empty_config() {
        let request = ConnectorCreateRequest {
            name: "s3-sink".to_string(),
            class: "io.aiven.kafka.connect.s3.AivenKafkaConnectS3SinkConnector".to_string(),
            topics: "events".to_string(),
            config: Map::new(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "s3-sink",
                "class": "io.aiven.kafka.connect.s3.AivenKafkaConnectS3SinkConnector",
                "topics": "events",
            })
        );
    }

    #[test]
    fn update_request_carries_dynamic_config() {
        let mut config = Map::new();
        config.insert("aws.s3.bucket.name".to_string(), json!("archive"));
        config.insert("flush.size".to_string(), json!(100));
        let request = ConnectorUpdateRequest {
            topics: None,
            config,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"config": {"aws.s3.bucket.name": "archive", "flush.size": 100}})
        );
    }
}
