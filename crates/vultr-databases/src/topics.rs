//! Kafka topics on a Managed Database cluster.

use serde::{Deserialize, Serialize};

use crate::client::{DATABASE_PATH, Meta, VultrClient};
use crate::error::Result;

/// A Kafka topic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Topic {
    pub name: String,
    pub partitions: i64,
    pub replication: i64,
    pub retention_hours: i64,
    pub retention_bytes: i64,
}

/// Request body for [`TopicHandler::create`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopicCreateRequest {
    pub name: String,
    pub partitions: i64,
    pub replication: i64,
    pub retention_hours: i64,
    pub retention_bytes: i64,
}

/// Request body for [`TopicHandler::update`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopicUpdateRequest {
    pub partitions: i64,
    pub replication: i64,
    pub retention_hours: i64,
    pub retention_bytes: i64,
}

#[derive(Deserialize)]
struct TopicEnvelope {
    topic: Topic,
}

#[derive(Deserialize)]
struct TopicsEnvelope {
    topics: Vec<Topic>,
    meta: Option<Meta>,
}

/// Bindings for the Kafka topic endpoints
#[derive(Debug, Clone)]
pub struct TopicHandler {
    client: VultrClient,
}

impl TopicHandler {
    pub fn new(client: VultrClient) -> Self {
        Self { client }
    }

    /// List all topics on a Kafka Managed Database
    pub async fn list(&self, database_id: &str) -> Result<(Vec<Topic>, Option<Meta>)> {
        let envelope: TopicsEnvelope = self
            .client
            .get(&format!("{DATABASE_PATH}/{database_id}/topics"))
            .await?;
        Ok((envelope.topics, envelope.meta))
    }

    /// Create a topic
    pub async fn create(&self, database_id: &str, request: &TopicCreateRequest) -> Result<Topic> {
        let envelope: TopicEnvelope = self
            .client
            .post(&format!("{DATABASE_PATH}/{database_id}/topics"), request)
            .await?;
        Ok(envelope.topic)
    }

    /// Get a topic by name
    pub async fn get(&self, database_id: &str, topic_name: &str) -> Result<Topic> {
        let envelope: TopicEnvelope = self
            .client
            .get(&format!("{DATABASE_PATH}/{database_id}/topics/{topic_name}"))
            .await?;
        Ok(envelope.topic)
    }

    /// Update a topic's partitioning and retention
    pub async fn update(
        &self,
        database_id: &str,
        topic_name: &str,
        request: &TopicUpdateRequest,
    ) -> Result<Topic> {
        let envelope: TopicEnvelope = self
            .client
            .put(
                &format!("{DATABASE_PATH}/{database_id}/topics/{topic_name}"),
                request,
            )
            .await?;
        Ok(envelope.topic)
    }

    /// Delete a topic
    pub async fn delete(&self, database_id: &str, topic_name: &str) -> Result<()> {
        self.client
            .delete(&format!("{DATABASE_PATH}/{database_id}/topics/{topic_name}"))
            .await
    }
}
