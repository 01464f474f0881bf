use async_trait::async_trait;

use crate::contract::model::{NewUser, User};
use crate::domain::query::{PageRequest, UserFilter};

/// Port for the domain layer: persistence operations the service needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Load a user by id. Soft-deleted rows are returned like any other.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;

    /// Insert a new row; the store assigns the id. Returns the stored user.
    async fn insert(&self, new_user: NewUser) -> anyhow::Result<User>;

    /// Merge the given field values into the existing row with this id.
    ///
    /// The stored `created_at` is carried over unconditionally; the merge
    /// runs as one transaction so no other writer can slip in between the
    /// read and the write. `Ok(None)` when the id is unknown.
    async fn update_fields(
        &self,
        id: i64,
        name: String,
        email: Option<String>,
        active: bool,
    ) -> anyhow::Result<Option<User>>;

    /// Transactional read-modify-write of the `active` flag.
    /// `Ok(None)` when the id is unknown.
    async fn set_active(&self, id: i64, active: bool) -> anyhow::Result<Option<User>>;

    /// One page of users matching the filter, ordered per the page spec.
    async fn list(&self, filter: &UserFilter, page: &PageRequest) -> anyhow::Result<Vec<User>>;
}
