//! Advanced (engine-tunable) configuration options.
//!
//! Four parallel groups, each exposed as a configured-options bag plus an
//! [`AvailableOption`] constraint schema describing the legal values: the
//! core engine options, Kafka REST, Schema Registry, and Kafka Connect.
//! The configured bag doubles as the PUT request body, so every field is
//! optional and unset fields are omitted from the payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::{DATABASE_PATH, VultrClient};
use crate::error::Result;

/// Constraint descriptor for one tunable setting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailableOption {
    pub name: String,
    pub r#type: String,
    pub enumerals: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f32>,
    pub alt_values: Vec<i64>,
    pub units: String,
}

/// Core engine tunables
///
/// A flat bag spanning PostgreSQL, MySQL, and Kafka settings; the server
/// only accepts the fields matching the subscription's engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedOptions {
    // PostgreSQL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autovacuum_analyze_scale_factor: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autovacuum_analyze_threshold: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autovacuum_freeze_max_age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autovacuum_max_workers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autovacuum_naptime: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autovacuum_vacuum_cost_delay: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autovacuum_vacuum_cost_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autovacuum_vacuum_scale_factor: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autovacuum_vacuum_threshold: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgwriter_delay: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgwriter_flush_after: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgwriter_lru_maxpages: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgwriter_lru_multiplier: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadlock_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_toast_compression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_in_transaction_session_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_autovacuum_min_duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_error_verbosity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_line_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_min_duration_statement: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_files_per_process: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_locks_per_transaction: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_logical_replication_workers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_parallel_workers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_parallel_workers_per_gather: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pred_locks_per_transaction: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_prepared_transactions: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_replication_slots: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stack_depth: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_standby_archive_delay: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_standby_streaming_delay: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_wal_senders: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_worker_processes: Option<i64>,
    #[serde(
        rename = "pg_partman_bgw.interval",
        skip_serializing_if = "Option::is_none"
    )]
    pub pg_partman_bgw_interval: Option<i64>,
    #[serde(rename = "pg_partman_bgw.role", skip_serializing_if = "Option::is_none")]
    pub pg_partman_bgw_role: Option<String>,
    #[serde(
        rename = "pg_stat_statements.track",
        skip_serializing_if = "Option::is_none"
    )]
    pub pg_stat_statements_track: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_file_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_activity_query_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_commit_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_functions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_io_timing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wal_sender_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wal_writer_delay: Option<i64>,
    // MySQL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_concat_max_len: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub innodb_change_buffer_max_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub innodb_flush_neighbors: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub innodb_ft_min_token_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub innodb_ft_server_stopword_table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub innodb_lock_wait_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub innodb_log_buffer_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub innodb_online_alter_log_max_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub innodb_print_all_deadlocks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub innodb_read_io_threads: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub innodb_rollback_on_timeout: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub innodb_thread_concurrency: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub innodb_write_io_threads: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_tmp_mem_storage_engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_allowed_packet: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heap_table_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_buffer_length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_read_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_write_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_buffer_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmp_table_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_timeout: Option<i64>,
    // Kafka
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_initial_rebalance_delay_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_min_session_timeout_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_max_session_timeout_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections_max_idle_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_incremental_fetch_session_cache_slots: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_max_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offsets_retention_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_cleaner_delete_retention_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_cleaner_min_cleanable_ratio: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_cleaner_max_compaction_lag_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_cleaner_min_compaction_lag_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_cleanup_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_flush_interval_messages: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_flush_interval_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_index_interval_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_index_size_max_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_local_retention_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_local_retention_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_message_downconversion_enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_message_timestamp_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_message_timestamp_difference_max_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_preallocate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_retention_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_retention_hours: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_retention_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_roll_jitter_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_roll_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_segment_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_segment_delete_delay_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_create_topics_enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_insync_replicas: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_partitions: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_replication_factor: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica_fetch_max_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica_fetch_response_max_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections_per_ip: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_purgatory_purge_interval_requests: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sasl_oauthbearer_expected_audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sasl_oauthbearer_expected_issuer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sasl_oauthbearer_jwks_endpoint_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sasl_oauthbearer_sub_claim_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socket_request_max_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_state_log_segment_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_remove_expired_transaction_cleanup_interval_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_partition_verification_enable: Option<bool>,
}

/// Kafka REST proxy tunables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KafkaRestAdvancedOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_acks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_compression_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_linger_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_max_request_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_enable_auto_commit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_request_max_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_request_timeout_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_strategy_validation: Option<bool>,
    #[serde(
        rename = "simpleconsumer_pool_size_max",
        skip_serializing_if = "Option::is_none"
    )]
    pub simple_consumer_pool_size_max: Option<i64>,
}

/// Schema Registry tunables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaRegistryAdvancedOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leader_eligibility: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_reader_strict_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retriable_errors_silenced: Option<bool>,
}

/// Kafka Connect tunables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KafkaConnectAdvancedOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_client_config_override_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_auto_offset_reset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_fetch_max_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_isolation_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_max_partition_fetch_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_max_poll_interval_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_max_poll_records: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_flush_interval_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_flush_timeout_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_batch_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_buffer_memory: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_compression_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_linger_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_max_request_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_rebalance_max_delay_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_timeout_ms: Option<i64>,
}

/// Every advanced-options endpoint answers with the same configured/available
/// pair, so one generic envelope covers all four groups.
#[derive(Deserialize)]
struct OptionsEnvelope<T> {
    #[serde(default)]
    configured_options: T,
    #[serde(default)]
    available_options: Vec<AvailableOption>,
}

/// Bindings for the advanced-options endpoints
#[derive(Debug, Clone)]
pub struct AdvancedOptionsHandler {
    client: VultrClient,
}

impl AdvancedOptionsHandler {
    pub fn new(client: VultrClient) -> Self {
        Self { client }
    }

    async fn fetch<T>(&self, path: String) -> Result<(T, Vec<AvailableOption>)>
    where
        T: DeserializeOwned + Default,
    {
        let envelope: OptionsEnvelope<T> = self.client.get(&path).await?;
        Ok((envelope.configured_options, envelope.available_options))
    }

    async fn put<T>(&self, path: String, request: &T) -> Result<(T, Vec<AvailableOption>)>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        let envelope: OptionsEnvelope<T> = self.client.put(&path, request).await?;
        Ok((envelope.configured_options, envelope.available_options))
    }

    /// Configured and available core engine options
    pub async fn list(
        &self,
        database_id: &str,
    ) -> Result<(AdvancedOptions, Vec<AvailableOption>)> {
        self.fetch(format!("{DATABASE_PATH}/{database_id}/advanced-options"))
            .await
    }

    /// Update core engine options; unset fields are left untouched
    pub async fn update(
        &self,
        database_id: &str,
        request: &AdvancedOptions,
    ) -> Result<(AdvancedOptions, Vec<AvailableOption>)> {
        self.put(
            format!("{DATABASE_PATH}/{database_id}/advanced-options"),
            request,
        )
        .await
    }

    /// Configured and available Kafka REST options
    pub async fn list_kafka_rest(
        &self,
        database_id: &str,
    ) -> Result<(KafkaRestAdvancedOptions, Vec<AvailableOption>)> {
        self.fetch(format!(
            "{DATABASE_PATH}/{database_id}/advanced-options/kafka-rest"
        ))
        .await
    }

    /// Update Kafka REST options
    pub async fn update_kafka_rest(
        &self,
        database_id: &str,
        request: &KafkaRestAdvancedOptions,
    ) -> Result<(KafkaRestAdvancedOptions, Vec<AvailableOption>)> {
        self.put(
            format!("{DATABASE_PATH}/{database_id}/advanced-options/kafka-rest"),
            request,
        )
        .await
    }

    /// Configured and available Schema Registry options
    pub async fn list_schema_registry(
        &self,
        database_id: &str,
    ) -> Result<(SchemaRegistryAdvancedOptions, Vec<AvailableOption>)> {
        self.fetch(format!(
            "{DATABASE_PATH}/{database_id}/advanced-options/schema-registry"
        ))
        .await
    }

    /// Update Schema Registry options
    pub async fn update_schema_registry(
        &self,
        database_id: &str,
        request: &SchemaRegistryAdvancedOptions,
    ) -> Result<(SchemaRegistryAdvancedOptions, Vec<AvailableOption>)> {
        self.put(
            format!("{DATABASE_PATH}/{database_id}/advanced-options/schema-registry"),
            request,
        )
        .await
    }

    /// Configured and available Kafka Connect options
    pub async fn list_kafka_connect(
        &self,
        database_id: &str,
    ) -> Result<(KafkaConnectAdvancedOptions, Vec<AvailableOption>)> {
        self.fetch(format!(
            "{DATABASE_PATH}/{database_id}/advanced-options/kafka-connect"
        ))
        .await
    }

    /// Update Kafka Connect options
    pub async fn update_kafka_connect(
        &self,
        database_id: &str,
        request: &KafkaConnectAdvancedOptions,
    ) -> Result<(KafkaConnectAdvancedOptions, Vec<AvailableOption>)> {
        self.put(
            format!("{DATABASE_PATH}/{database_id}/advanced-options/kafka-connect"),
            request,
        )
        .await
    }
}
