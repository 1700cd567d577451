//! Managed Database subscriptions: plans, CRUD, usage, maintenance, alerts,
//! migration, read replicas, backups, and version upgrades.

use serde::{Deserialize, Serialize};

use crate::client::{DATABASE_PATH, Meta, VultrClient};
use crate::error::Result;

/// Filter parameters for [`DatabaseHandler::list_plans`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// A Managed Database plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabasePlan {
    pub id: String,
    pub number_of_nodes: i64,
    pub r#type: String,
    pub vcpu_count: i64,
    pub ram: i64,
    pub disk: i64,
    pub monthly_cost: i64,
    pub supported_engines: SupportedEngines,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<MaxConnections>,
    pub locations: Vec<String>,
}

/// Engines a plan can run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportedEngines {
    pub mysql: Option<bool>,
    pub pg: Option<bool>,
    pub valkey: Option<bool>,
    pub kafka: Option<bool>,
}

/// Per-engine connection limits for a plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaxConnections {
    pub mysql: i64,
    pub pg: i64,
}

/// Filter parameters for [`DatabaseHandler::list`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatabaseListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// A Managed Database subscription
///
/// Engine-specific fields (`mysql_*`, `pg_available_extensions`,
/// `eviction_policy` for Valkey, the `*kafka*` family) are only populated
/// for subscriptions of the matching engine; the server decides which apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Database {
    pub id: String,
    pub date_created: String,
    pub plan: String,
    pub plan_disk: i64,
    pub plan_ram: i64,
    pub plan_vcpus: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_replicas: Option<i64>,
    pub plan_brokers: i64,
    pub region: String,
    pub database_engine: String,
    pub database_engine_version: String,
    pub vpc_id: String,
    pub status: String,
    pub label: String,
    pub tag: String,
    pub dbname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ferretdb_credentials: Option<FerretDbCredentials>,
    pub host: String,
    pub public_host: String,
    pub port: String,
    pub sasl_port: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_kafka_rest: Option<bool>,
    pub kafka_rest_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_schema_registry: Option<bool>,
    pub schema_registry_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_kafka_connect: Option<bool>,
    pub user: String,
    pub password: String,
    pub access_key: String,
    pub access_cert: String,
    pub maintenance_dow: String,
    pub maintenance_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_hour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_minute: Option<String>,
    pub latest_backup: String,
    pub trusted_ips: Vec<String>,
    pub mysql_sql_modes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mysql_require_primary_key: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mysql_slow_query_log: Option<bool>,
    pub mysql_long_query_time: i64,
    pub pg_available_extensions: Vec<PgExtension>,
    pub eviction_policy: String,
    pub cluster_time_zone: String,
    pub read_replicas: Vec<Database>,
}

/// Connection details for FerretDB engine subscriptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FerretDbCredentials {
    pub host: String,
    pub port: i64,
    pub user: String,
    pub password: String,
    pub public_ip: String,
    pub private_ip: String,
}

/// A PostgreSQL extension and its installable versions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PgExtension {
    pub name: String,
    pub versions: Vec<String>,
}

/// Request body for [`DatabaseHandler::create`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatabaseCreateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_engine_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_dow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_hour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_minute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trusted_ips: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mysql_sql_modes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mysql_require_primary_key: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mysql_slow_query_log: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mysql_long_query_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eviction_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_kafka_rest: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_schema_registry: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_kafka_connect: Option<bool>,
}

/// Request body for [`DatabaseHandler::update`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatabaseUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_dow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_hour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_minute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trusted_ips: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mysql_sql_modes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mysql_require_primary_key: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mysql_slow_query_log: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mysql_long_query_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eviction_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_kafka_rest: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_schema_registry: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_kafka_connect: Option<bool>,
}

/// Disk, memory, and CPU usage for a subscription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseUsage {
    pub disk: DatabaseDiskUsage,
    pub memory: DatabaseMemoryUsage,
    pub cpu: DatabaseCpuUsage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseDiskUsage {
    pub current_gb: f32,
    pub max_gb: i64,
    pub percentage: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseMemoryUsage {
    pub current_mb: f32,
    pub max_mb: i64,
    pub percentage: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseCpuUsage {
    pub percentage: f32,
}

/// A service alert entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alert {
    pub timestamp: String,
    pub message_type: String,
    pub description: String,
    pub recommendation: String,
    pub maintenance_scheduled: String,
    pub resource_type: String,
    pub table_count: i64,
}

/// Query period for [`DatabaseHandler::list_service_alerts`]
///
/// Sent as a POST body even though the operation is a read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlertListRequest {
    pub period: String,
}

/// Migration progress and source credentials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Migration {
    pub status: String,
    pub method: String,
    pub error: String,
    pub credentials: MigrationCredentials,
}

/// Source server credentials attached to a migration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationCredentials {
    pub host: String,
    pub port: i64,
    pub username: String,
    pub password: String,
    pub database: String,
    pub ignored_databases: String,
    pub ssl: Option<bool>,
}

/// Request body for [`DatabaseHandler::start_migration`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MigrationStartRequest {
    pub host: String,
    pub port: i64,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored_databases: Option<String>,
    pub ssl: Option<bool>,
}

/// Request body for [`DatabaseHandler::add_read_replica`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReadReplicaRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Latest and oldest backups for a subscription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseBackups {
    pub latest_backup: DatabaseBackup,
    pub oldest_backup: DatabaseBackup,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseBackup {
    pub date: String,
    pub time: String,
}

/// Request body for [`DatabaseHandler::restore_from_backup`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BackupRestoreRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Request body for [`DatabaseHandler::fork`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForkRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Request body for [`DatabaseHandler::start_version_upgrade`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VersionUpgradeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Deserialize)]
struct PlansEnvelope {
    plans: Vec<DatabasePlan>,
    meta: Option<Meta>,
}

#[derive(Deserialize)]
struct DatabasesEnvelope {
    databases: Vec<Database>,
    meta: Option<Meta>,
}

#[derive(Deserialize)]
struct DatabaseEnvelope {
    database: Database,
}

#[derive(Deserialize)]
struct UsageEnvelope {
    usage: DatabaseUsage,
}

#[derive(Deserialize)]
struct UpdatesEnvelope {
    available_updates: Vec<String>,
}

#[derive(Deserialize)]
struct MessageEnvelope {
    message: String,
}

#[derive(Deserialize)]
struct AlertsEnvelope {
    alerts: Vec<Alert>,
}

#[derive(Deserialize)]
struct MigrationEnvelope {
    migration: Migration,
}

#[derive(Deserialize)]
struct VersionsEnvelope {
    available_versions: Vec<String>,
}

/// Bindings for the Managed Database subscription endpoints
#[derive(Debug, Clone)]
pub struct DatabaseHandler {
    client: VultrClient,
}

impl DatabaseHandler {
    pub fn new(client: VultrClient) -> Self {
        Self { client }
    }

    /// List all Managed Database plans
    pub async fn list_plans(
        &self,
        params: Option<&PlanListParams>,
    ) -> Result<(Vec<DatabasePlan>, Option<Meta>)> {
        let path = format!("{DATABASE_PATH}/plans");
        let envelope: PlansEnvelope = match params {
            Some(params) => self.client.get_with_query(&path, params).await?,
            None => self.client.get(&path).await?,
        };
        Ok((envelope.plans, envelope.meta))
    }

    /// List all Managed Databases on the account
    pub async fn list(
        &self,
        params: Option<&DatabaseListParams>,
    ) -> Result<(Vec<Database>, Option<Meta>)> {
        let envelope: DatabasesEnvelope = match params {
            Some(params) => self.client.get_with_query(DATABASE_PATH, params).await?,
            None => self.client.get(DATABASE_PATH).await?,
        };
        Ok((envelope.databases, envelope.meta))
    }

    /// Create a Managed Database
    pub async fn create(&self, request: &DatabaseCreateRequest) -> Result<Database> {
        let envelope: DatabaseEnvelope = self.client.post(DATABASE_PATH, request).await?;
        Ok(envelope.database)
    }

    /// Get a Managed Database by ID
    pub async fn get(&self, database_id: &str) -> Result<Database> {
        let envelope: DatabaseEnvelope = self
            .client
            .get(&format!("{DATABASE_PATH}/{database_id}"))
            .await?;
        Ok(envelope.database)
    }

    /// Update a Managed Database
    pub async fn update(
        &self,
        database_id: &str,
        request: &DatabaseUpdateRequest,
    ) -> Result<Database> {
        let envelope: DatabaseEnvelope = self
            .client
            .put(&format!("{DATABASE_PATH}/{database_id}"), request)
            .await?;
        Ok(envelope.database)
    }

    /// Delete a Managed Database; all data is permanently lost
    pub async fn delete(&self, database_id: &str) -> Result<()> {
        self.client
            .delete(&format!("{DATABASE_PATH}/{database_id}"))
            .await
    }

    /// Disk, memory, and CPU usage for a Managed Database
    pub async fn usage(&self, database_id: &str) -> Result<DatabaseUsage> {
        let envelope: UsageEnvelope = self
            .client
            .get(&format!("{DATABASE_PATH}/{database_id}/usage"))
            .await?;
        Ok(envelope.usage)
    }

    /// List available maintenance updates
    pub async fn list_maintenance_updates(&self, database_id: &str) -> Result<Vec<String>> {
        let envelope: UpdatesEnvelope = self
            .client
            .get(&format!("{DATABASE_PATH}/{database_id}/maintenance"))
            .await?;
        Ok(envelope.available_updates)
    }

    /// Start the pending maintenance; returns the API status message
    pub async fn start_maintenance(&self, database_id: &str) -> Result<String> {
        let envelope: MessageEnvelope = self
            .client
            .post_no_body(&format!("{DATABASE_PATH}/{database_id}/maintenance"))
            .await?;
        Ok(envelope.message)
    }

    /// Query service alerts for the given period
    pub async fn list_service_alerts(
        &self,
        database_id: &str,
        request: &AlertListRequest,
    ) -> Result<Vec<Alert>> {
        let envelope: AlertsEnvelope = self
            .client
            .post(&format!("{DATABASE_PATH}/{database_id}/alerts"), request)
            .await?;
        Ok(envelope.alerts)
    }

    /// Current migration status
    pub async fn migration_status(&self, database_id: &str) -> Result<Migration> {
        let envelope: MigrationEnvelope = self
            .client
            .get(&format!("{DATABASE_PATH}/{database_id}/migration"))
            .await?;
        Ok(envelope.migration)
    }

    /// Start a migration from the given source server
    pub async fn start_migration(
        &self,
        database_id: &str,
        request: &MigrationStartRequest,
    ) -> Result<Migration> {
        let envelope: MigrationEnvelope = self
            .client
            .post(&format!("{DATABASE_PATH}/{database_id}/migration"), request)
            .await?;
        Ok(envelope.migration)
    }

    /// Detach the configured migration
    pub async fn detach_migration(&self, database_id: &str) -> Result<()> {
        self.client
            .delete(&format!("{DATABASE_PATH}/{database_id}/migration"))
            .await
    }

    /// Add a read-only replica in another region
    pub async fn add_read_replica(
        &self,
        database_id: &str,
        request: &ReadReplicaRequest,
    ) -> Result<Database> {
        let envelope: DatabaseEnvelope = self
            .client
            .post(
                &format!("{DATABASE_PATH}/{database_id}/read-replica"),
                request,
            )
            .await?;
        Ok(envelope.database)
    }

    /// Promote a read-only replica to a standalone subscription
    pub async fn promote_read_replica(&self, database_id: &str) -> Result<()> {
        self.client
            .post_empty(&format!("{DATABASE_PATH}/{database_id}/promote-read-replica"))
            .await
    }

    /// Latest and oldest backup information
    ///
    /// The one response in this API that is not wrapped in an envelope key.
    pub async fn backup_information(&self, database_id: &str) -> Result<DatabaseBackups> {
        self.client
            .get(&format!("{DATABASE_PATH}/{database_id}/backups"))
            .await
    }

    /// Restore a backup into a new subscription of the same plan
    pub async fn restore_from_backup(
        &self,
        database_id: &str,
        request: &BackupRestoreRequest,
    ) -> Result<Database> {
        let envelope: DatabaseEnvelope = self
            .client
            .post(&format!("{DATABASE_PATH}/{database_id}/restore"), request)
            .await?;
        Ok(envelope.database)
    }

    /// Fork a backup into a new subscription with its own plan and region
    pub async fn fork(&self, database_id: &str, request: &ForkRequest) -> Result<Database> {
        let envelope: DatabaseEnvelope = self
            .client
            .post(&format!("{DATABASE_PATH}/{database_id}/fork"), request)
            .await?;
        Ok(envelope.database)
    }

    /// List engine versions the subscription can upgrade to
    pub async fn list_available_versions(&self, database_id: &str) -> Result<Vec<String>> {
        let envelope: VersionsEnvelope = self
            .client
            .get(&format!("{DATABASE_PATH}/{database_id}/version-upgrade"))
            .await?;
        Ok(envelope.available_versions)
    }

    /// Start a version upgrade; returns the API status message
    pub async fn start_version_upgrade(
        &self,
        database_id: &str,
        request: &VersionUpgradeRequest,
    ) -> Result<String> {
        let envelope: MessageEnvelope = self
            .client
            .post(
                &format!("{DATABASE_PATH}/{database_id}/version-upgrade"),
                request,
            )
            .await?;
        Ok(envelope.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn create_request_omits_unset_fields() {
        let request = DatabaseCreateRequest {
            database_engine: Some("mysql".to_string()),
            plan: Some("vultr-dbaas-startup-cc-1-55-2".to_string()),
            region: Some("ewr".to_string()),
            label: Some("primary".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "database_engine": "mysql",
                "plan": "vultr-dbaas-startup-cc-1-55-2",
                "region": "ewr",
                "label": "primary",
            })
        );
    }

    #[test]
    fn explicit_false_still_serializes() {
        let request = DatabaseUpdateRequest {
            mysql_require_primary_key: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"mysql_require_primary_key": false})
        );
    }

    #[test]
    fn plan_list_params_encode_only_set_fields() {
        let params = PlanListParams {
            engine: Some("pg".to_string()),
            nodes: None,
            region: None,
        };
        assert_eq!(serde_urlencoded::to_string(&params).unwrap(), "engine=pg");
    }

    #[test]
    fn migration_request_always_carries_ssl() {
        let request = MigrationStartRequest {
            host: "source.example.com".to_string(),
            port: 3306,
            username: "root".to_string(),
            password: "secret".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["ssl"], serde_json::Value::Null);
    }

    #[test]
    fn database_decodes_read_replicas() {
        let value = json!({
            "id": "primary-id",
            "database_engine": "pg",
            "status": "running",
            "read_replicas": [
                {"id": "replica-id", "region": "ams", "status": "running"}
            ]
        });
        let database: Database = serde_json::from_value(value).unwrap();
        assert_eq!(database.id, "primary-id");
        assert_eq!(database.read_replicas.len(), 1);
        assert_eq!(database.read_replicas[0].id, "replica-id");
        assert_eq!(database.read_replicas[0].region, "ams");
    }
}
