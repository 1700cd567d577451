//! Database users and their Valkey access-control lists.

use serde::{Deserialize, Serialize};

use crate::client::{DATABASE_PATH, Meta, VultrClient};
use crate::error::Result;

/// A user within a Managed Database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseUser {
    pub username: String,
    pub password: String,
    pub encryption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_control: Option<UserAcl>,
    pub permission: String,
    pub access_key: String,
    pub access_cert: String,
}

/// Access-control configuration for a user on a Valkey subscription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAcl {
    pub acl_categories: Vec<String>,
    pub acl_channels: Vec<String>,
    pub acl_commands: Vec<String>,
    pub acl_keys: Vec<String>,
}

/// Request body for [`UserHandler::create`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserCreateRequest {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
}

/// Request body for [`UserHandler::update`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserUpdateRequest {
    pub password: String,
}

/// Request body for [`UserHandler::update_access_control`]
///
/// Each list is tri-state: `None` leaves the list untouched, `Some(vec![])`
/// explicitly clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserAclRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl_categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl_channels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl_commands: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: DatabaseUser,
}

#[derive(Deserialize)]
struct UsersEnvelope {
    users: Vec<DatabaseUser>,
    meta: Option<Meta>,
}

/// Bindings for the database user endpoints
#[derive(Debug, Clone)]
pub struct UserHandler {
    client: VultrClient,
}

impl UserHandler {
    pub fn new(client: VultrClient) -> Self {
        Self { client }
    }

    /// List all users on a Managed Database
    pub async fn list(&self, database_id: &str) -> Result<(Vec<DatabaseUser>, Option<Meta>)> {
        let envelope: UsersEnvelope = self
            .client
            .get(&format!("{DATABASE_PATH}/{database_id}/users"))
            .await?;
        Ok((envelope.users, envelope.meta))
    }

    /// Create a user
    pub async fn create(
        &self,
        database_id: &str,
        request: &UserCreateRequest,
    ) -> Result<DatabaseUser> {
        let envelope: UserEnvelope = self
            .client
            .post(&format!("{DATABASE_PATH}/{database_id}/users"), request)
            .await?;
        Ok(envelope.user)
    }

    /// Get a user by name
    pub async fn get(&self, database_id: &str, username: &str) -> Result<DatabaseUser> {
        let envelope: UserEnvelope = self
            .client
            .get(&format!("{DATABASE_PATH}/{database_id}/users/{username}"))
            .await?;
        Ok(envelope.user)
    }

    /// Update a user's password
    pub async fn update(
        &self,
        database_id: &str,
        username: &str,
        request: &UserUpdateRequest,
    ) -> Result<DatabaseUser> {
        let envelope: UserEnvelope = self
            .client
            .put(
                &format!("{DATABASE_PATH}/{database_id}/users/{username}"),
                request,
            )
            .await?;
        Ok(envelope.user)
    }

    /// Delete a user
    pub async fn delete(&self, database_id: &str, username: &str) -> Result<()> {
        self.client
            .delete(&format!("{DATABASE_PATH}/{database_id}/users/{username}"))
            .await
    }

    /// Update a user's access control (Valkey engine only)
    pub async fn update_access_control(
        &self,
        database_id: &str,
        username: &str,
        request: &UserAclRequest,
    ) -> Result<DatabaseUser> {
        let envelope: UserEnvelope = self
            .client
            .put(
                &format!("{DATABASE_PATH}/{database_id}/users/{username}/access-control"),
                request,
            )
            .await?;
        Ok(envelope.user)
    }
}
