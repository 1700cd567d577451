//! Integration tests for the subscription endpoints against a mock server.

use pretty_assertions::assert_eq;
use serde_json::json;
use vultr_databases::databases::{
    AlertListRequest, BackupRestoreRequest, DatabaseCreateRequest, DatabaseListParams,
    DatabaseUpdateRequest, ForkRequest, MigrationStartRequest, PlanListParams,
    ReadReplicaRequest, VersionUpgradeRequest,
};
use vultr_databases::{DatabaseHandler, VultrClient};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn handler(server: &MockServer) -> DatabaseHandler {
    let client = VultrClient::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .build()
        .unwrap();
    DatabaseHandler::new(client)
}

#[tokio::test]
async fn list_plans_encodes_filters_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/databases/plans"))
        .and(query_param("engine", "pg"))
        .and(query_param("region", "ewr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "plans": [{
                "id": "vultr-dbaas-hobbyist-cc-1-25-1",
                "number_of_nodes": 1,
                "type": "vc2",
                "vcpu_count": 1,
                "ram": 1024,
                "disk": 25,
                "monthly_cost": 15,
                "supported_engines": {"mysql": true, "pg": true, "valkey": false, "kafka": false},
                "locations": ["ewr"]
            }],
            "meta": {"total": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = PlanListParams {
        engine: Some("pg".to_string()),
        nodes: None,
        region: Some("ewr".to_string()),
    };
    let (plans, meta) = handler(&server).await.list_plans(Some(&params)).await.unwrap();

    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].id, "vultr-dbaas-hobbyist-cc-1-25-1");
    assert_eq!(plans[0].supported_engines.pg, Some(true));
    assert_eq!(meta.unwrap().total, 1);
}

#[tokio::test]
async fn list_sends_bearer_credential_and_returns_meta() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/databases"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "databases": [
                {"id": "db1", "label": "one"},
                {"id": "db2", "label": "two"}
            ],
            "meta": {"total": 2, "links": {"next": "cursor-next", "prev": ""}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (databases, meta) = handler(&server).await.list(None).await.unwrap();

    assert_eq!(databases.len(), 2);
    assert_eq!(databases[0].id, "db1");
    assert_eq!(databases[1].id, "db2");
    let meta = meta.unwrap();
    assert_eq!(meta.total, 2);
    assert_eq!(meta.links.unwrap().next, "cursor-next");
}

#[tokio::test]
async fn list_with_label_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/databases"))
        .and(query_param("label", "prod"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"databases": [], "meta": null})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let params = DatabaseListParams {
        label: Some("prod".to_string()),
        ..Default::default()
    };
    let (databases, meta) = handler(&server).await.list(Some(&params)).await.unwrap();
    assert!(databases.is_empty());
    assert!(meta.is_none());
}

#[tokio::test]
async fn create_posts_exact_body_and_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/databases"))
        .and(body_json(json!({
            "database_engine": "mysql",
            "database_engine_version": "8",
            "region": "ewr",
            "plan": "vultr-dbaas-startup-cc-1-55-2",
            "label": "primary"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "database": {
                "id": "db1",
                "database_engine": "mysql",
                "database_engine_version": "8",
                "region": "ewr",
                "plan": "vultr-dbaas-startup-cc-1-55-2",
                "label": "primary",
                "status": "pending",
                "host": "db1.vultrdb.com",
                "port": "16751",
                "user": "vultradmin",
                "password": "s3cret"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = DatabaseCreateRequest {
        database_engine: Some("mysql".to_string()),
        database_engine_version: Some("8".to_string()),
        region: Some("ewr".to_string()),
        plan: Some("vultr-dbaas-startup-cc-1-55-2".to_string()),
        label: Some("primary".to_string()),
        ..Default::default()
    };
    let database = handler(&server).await.create(&request).await.unwrap();

    assert_eq!(database.id, "db1");
    assert_eq!(database.status, "pending");
    assert_eq!(database.host, "db1.vultrdb.com");
    assert_eq!(database.port, "16751");
    assert_eq!(database.password, "s3cret");
}

#[tokio::test]
async fn get_decodes_fields_one_for_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/databases/db1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "database": {
                "id": "db1",
                "date_created": "2026-01-05T12:00:00+00:00",
                "plan": "vultr-dbaas-startup-cc-1-55-2",
                "plan_disk": 55,
                "plan_ram": 2048,
                "plan_vcpus": 1,
                "region": "ewr",
                "database_engine": "valkey",
                "database_engine_version": "8",
                "status": "running",
                "label": "cache",
                "host": "db1.vultrdb.com",
                "port": "16752",
                "user": "default",
                "password": "hunter2",
                "maintenance_dow": "sunday",
                "maintenance_time": "02:00",
                "latest_backup": "2026-01-06 02:10:00",
                "trusted_ips": ["203.0.113.7/32"],
                "eviction_policy": "allkeys-lru",
                "cluster_time_zone": "UTC"
            }
        })))
        .mount(&server)
        .await;

    let database = handler(&server).await.get("db1").await.unwrap();

    assert_eq!(database.id, "db1");
    assert_eq!(database.date_created, "2026-01-05T12:00:00+00:00");
    assert_eq!(database.plan_disk, 55);
    assert_eq!(database.database_engine, "valkey");
    assert_eq!(database.trusted_ips, vec!["203.0.113.7/32"]);
    assert_eq!(database.eviction_policy, "allkeys-lru");
    // Absent optional fields stay unset, never defaulted to a value.
    assert_eq!(database.plan_replicas, None);
    assert_eq!(database.enable_kafka_rest, None);
}

#[tokio::test]
async fn update_puts_to_database_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/databases/db1"))
        .and(body_json(json!({"label": "renamed", "cluster_time_zone": "UTC"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "database": {"id": "db1", "label": "renamed"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = DatabaseUpdateRequest {
        label: Some("renamed".to_string()),
        cluster_time_zone: Some("UTC".to_string()),
        ..Default::default()
    };
    let database = handler(&server).await.update("db1", &request).await.unwrap();
    assert_eq!(database.label, "renamed");
}

#[tokio::test]
async fn delete_issues_delete_and_succeeds_on_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/databases/db1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    handler(&server).await.delete("db1").await.unwrap();
}

#[tokio::test]
async fn usage_unwraps_usage_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/databases/db1/usage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "usage": {
                "disk": {"current_gb": 1.5, "max_gb": 55, "percentage": 2.7},
                "memory": {"current_mb": 512.0, "max_mb": 2048, "percentage": 25.0},
                "cpu": {"percentage": 3.1}
            }
        })))
        .mount(&server)
        .await;

    let usage = handler(&server).await.usage("db1").await.unwrap();
    assert_eq!(usage.disk.max_gb, 55);
    assert_eq!(usage.memory.percentage, 25.0);
    assert_eq!(usage.cpu.percentage, 3.1);
}

#[tokio::test]
async fn maintenance_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/databases/db1/maintenance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "available_updates": ["minor version update"]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/databases/db1/maintenance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Maintenance update initiated"
        })))
        .mount(&server)
        .await;

    let handler = handler(&server).await;
    let updates = handler.list_maintenance_updates("db1").await.unwrap();
    assert_eq!(updates, vec!["minor version update"]);

    let message = handler.start_maintenance("db1").await.unwrap();
    assert_eq!(message, "Maintenance update initiated");
}

#[tokio::test]
async fn alerts_query_posts_period_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/databases/db1/alerts"))
        .and(body_json(json!({"period": "yesterday"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "alerts": [{
                "timestamp": "2026-01-05 02:00:00",
                "message_type": "RESOURCE_USAGE_WARNING",
                "description": "disk usage above 90%"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = AlertListRequest {
        period: "yesterday".to_string(),
    };
    let alerts = handler(&server)
        .await
        .list_service_alerts("db1", &request)
        .await
        .unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].message_type, "RESOURCE_USAGE_WARNING");
}

#[tokio::test]
async fn migration_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/databases/db1/migration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "migration": {
                "status": "running",
                "method": "logical",
                "credentials": {
                    "host": "source.example.com",
                    "port": 5432,
                    "username": "postgres",
                    "password": "secret",
                    "ssl": true
                }
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/databases/db1/migration"))
        .and(body_json(json!({
            "host": "source.example.com",
            "port": 5432,
            "username": "postgres",
            "password": "secret",
            "ssl": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "migration": {"status": "pending", "credentials": {}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/databases/db1/migration"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let handler = handler(&server).await;

    let status = handler.migration_status("db1").await.unwrap();
    assert_eq!(status.status, "running");
    assert_eq!(status.credentials.port, 5432);
    assert_eq!(status.credentials.ssl, Some(true));

    let request = MigrationStartRequest {
        host: "source.example.com".to_string(),
        port: 5432,
        username: "postgres".to_string(),
        password: "secret".to_string(),
        ssl: Some(true),
        ..Default::default()
    };
    let started = handler.start_migration("db1", &request).await.unwrap();
    assert_eq!(started.status, "pending");

    handler.detach_migration("db1").await.unwrap();
}

#[tokio::test]
async fn replica_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/databases/db1/read-replica"))
        .and(body_json(json!({"region": "ams", "label": "replica-eu"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "database": {"id": "db2", "label": "replica-eu", "region": "ams"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/databases/db2/promote-read-replica"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let handler = handler(&server).await;
    let request = ReadReplicaRequest {
        region: Some("ams".to_string()),
        label: Some("replica-eu".to_string()),
    };
    let replica = handler.add_read_replica("db1", &request).await.unwrap();
    assert_eq!(replica.id, "db2");
    assert_eq!(replica.region, "ams");

    handler.promote_read_replica("db2").await.unwrap();
}

#[tokio::test]
async fn backup_information_has_no_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/databases/db1/backups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "latest_backup": {"date": "2026-01-06", "time": "02:10:00"},
            "oldest_backup": {"date": "2025-12-30", "time": "02:10:00"}
        })))
        .mount(&server)
        .await;

    let backups = handler(&server).await.backup_information("db1").await.unwrap();
    assert_eq!(backups.latest_backup.date, "2026-01-06");
    assert_eq!(backups.oldest_backup.date, "2025-12-30");
}

#[tokio::test]
async fn restore_and_fork_return_new_subscriptions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/databases/db1/restore"))
        .and(body_json(json!({"label": "restored", "type": "pitr", "date": "2026-01-05", "time": "12:00"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "database": {"id": "db3", "label": "restored"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/databases/db1/fork"))
        .and(body_json(json!({"label": "fork", "region": "lax", "plan": "vultr-dbaas-startup-cc-2-80-4"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "database": {"id": "db4", "label": "fork", "region": "lax"}
        })))
        .mount(&server)
        .await;

    let handler = handler(&server).await;
    let restored = handler
        .restore_from_backup(
            "db1",
            &BackupRestoreRequest {
                label: Some("restored".to_string()),
                r#type: Some("pitr".to_string()),
                date: Some("2026-01-05".to_string()),
                time: Some("12:00".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(restored.id, "db3");

    let fork = handler
        .fork(
            "db1",
            &ForkRequest {
                label: Some("fork".to_string()),
                region: Some("lax".to_string()),
                plan: Some("vultr-dbaas-startup-cc-2-80-4".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(fork.id, "db4");
}

#[tokio::test]
async fn version_upgrade_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/databases/db1/version-upgrade"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "available_versions": ["16", "17"]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/databases/db1/version-upgrade"))
        .and(body_json(json!({"version": "17"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Version upgrade initiated"
        })))
        .mount(&server)
        .await;

    let handler = handler(&server).await;
    let versions = handler.list_available_versions("db1").await.unwrap();
    assert_eq!(versions, vec!["16", "17"]);

    let message = handler
        .start_version_upgrade(
            "db1",
            &VersionUpgradeRequest {
                version: Some("17".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(message, "Version upgrade initiated");
}

#[tokio::test]
async fn api_failure_yields_error_and_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/databases/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "database not found",
            "status": 404
        })))
        .mount(&server)
        .await;

    let err = handler(&server).await.get("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "API error (404): database not found");
}

#[tokio::test]
async fn connection_failure_yields_error() {
    // A port nothing is listening on.
    let client = VultrClient::builder()
        .api_key("test-key")
        .base_url("http://127.0.0.1:1")
        .build()
        .unwrap();
    let err = DatabaseHandler::new(client).list(None).await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.status(), None);
}
