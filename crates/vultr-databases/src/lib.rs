//! # vultr-databases
//!
//! Typed async client for the Vultr Managed Database API (`/v2/databases`).
//!
//! The crate is a thin binding layer: every public method maps one-to-one
//! onto a REST endpoint, serializes its request struct to JSON (or query
//! parameters for list filters), and unwraps the typed response envelope.
//! There is no retry or pagination traversal here; list calls hand back the
//! API's `meta` cursor untouched and every call is a fresh round trip.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vultr_databases::databases::DatabaseCreateRequest;
//! use vultr_databases::{DatabaseHandler, VultrClient};
//!
//! # async fn example() -> Result<(), vultr_databases::VultrError> {
//! let client = VultrClient::builder()
//!     .api_key(std::env::var("VULTR_API_KEY").unwrap_or_default())
//!     .build()?;
//!
//! let handler = DatabaseHandler::new(client.clone());
//! let database = handler
//!     .create(&DatabaseCreateRequest {
//!         database_engine: Some("pg".to_string()),
//!         database_engine_version: Some("17".to_string()),
//!         region: Some("ewr".to_string()),
//!         plan: Some("vultr-dbaas-hobbyist-cc-1-25-1".to_string()),
//!         label: Some("my-database".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! println!("created {} ({})", database.label, database.id);
//! # Ok(())
//! # }
//! ```
//!
//! Handlers are organized by resource area: [`DatabaseHandler`] for
//! subscriptions and their lifecycle, [`UserHandler`], the Kafka-specific
//! [`TopicHandler`]/[`QuotaHandler`]/[`ConnectorHandler`], the
//! PostgreSQL-specific [`ConnectionPoolHandler`], and
//! [`AdvancedOptionsHandler`] for engine tunables. All of them share one
//! cheaply-cloned [`VultrClient`].

pub mod client;
pub mod connectors;
pub mod databases;
pub mod dbs;
pub mod error;
pub mod options;
pub mod pools;
pub mod quotas;
pub mod topics;
pub mod users;

pub use client::{Links, Meta, VultrClient, VultrClientBuilder};
pub use connectors::ConnectorHandler;
pub use databases::DatabaseHandler;
pub use dbs::LogicalDatabaseHandler;
pub use error::{Result, VultrError};
pub use options::AdvancedOptionsHandler;
pub use pools::ConnectionPoolHandler;
pub use quotas::QuotaHandler;
pub use topics::TopicHandler;
pub use users::UserHandler;
