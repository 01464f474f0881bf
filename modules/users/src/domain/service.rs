use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::contract::model::{NewUser, UpsertOutcome, UpsertUser, User};
use crate::domain::error::DomainError;
use crate::domain::query::{PageRequest, UserFilter};
use crate::domain::repo::UsersRepository;

/// Domain service with the business rules for user records.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl Service {
    pub fn new(repo: Arc<dyn UsersRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    /// Create a new user when the request carries no id, otherwise update
    /// the existing user with that id. Exactly one persist call either way.
    #[instrument(name = "users.service.upsert", skip(self, req), fields(user_id = ?req.id))]
    pub async fn upsert(&self, req: UpsertUser) -> Result<UpsertOutcome, DomainError> {
        match req.id {
            None => {
                info!("Creating new user");

                let user = self
                    .repo
                    .insert(NewUser {
                        name: req.name,
                        email: req.email,
                        created_at: Utc::now(),
                        active: true,
                    })
                    .await
                    .map_err(|e| DomainError::database(e.to_string()))?;

                info!("Successfully created user with id={}", user.id);
                Ok(UpsertOutcome::Created(user))
            }
            Some(id) => {
                info!("Updating user");

                // The repository merge never touches the stored created_at,
                // so the timestamp survives every update.
                let user = self
                    .repo
                    .update_fields(id, req.name, req.email, req.active)
                    .await
                    .map_err(|e| DomainError::database(e.to_string()))?
                    .ok_or_else(|| DomainError::user_not_found(id))?;

                info!("Successfully updated user");
                Ok(UpsertOutcome::Updated(user))
            }
        }
    }

    /// Look up a user by id. Soft-deleted users remain retrievable here.
    #[instrument(name = "users.service.get", skip(self), fields(user_id = %id))]
    pub async fn get(&self, id: i64) -> Result<User, DomainError> {
        debug!("Getting user by id");

        let user = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        debug!("Successfully retrieved user");
        Ok(user)
    }

    /// One page of users matching the filter. Predicate construction is
    /// delegated to the storage layer's filter builder.
    #[instrument(name = "users.service.list", skip(self, filter, page))]
    pub async fn list(
        &self,
        filter: UserFilter,
        mut page: PageRequest,
    ) -> Result<Vec<User>, DomainError> {
        debug!("Listing users");

        if page.size == 0 {
            page.size = self.config.default_page_size;
        }
        if page.size > self.config.max_page_size {
            page.size = self.config.max_page_size;
        }

        let users = self
            .repo
            .list(&filter, &page)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        debug!("Successfully listed {} users in page", users.len());
        Ok(users)
    }

    /// Logical deletion: flip `active` to false, keeping the row.
    /// Idempotent on already-inactive users.
    #[instrument(name = "users.service.soft_delete", skip(self), fields(user_id = %id))]
    pub async fn soft_delete(&self, id: i64) -> Result<(), DomainError> {
        info!("Soft-deleting user");

        self.repo
            .set_active(id, false)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        info!("Successfully soft-deleted user");
        Ok(())
    }
}
