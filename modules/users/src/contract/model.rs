use chrono::{DateTime, Utc};

/// Pure user model (no serde); the REST DTOs convert to and from this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

/// Data for a new user row. The store assigns the id on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

/// A save-or-update request: `id` absent means create, present means
/// update the existing row with that id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertUser {
    pub id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
    pub active: bool,
}

/// Whether an upsert created a new record or updated an existing one,
/// so the boundary layer can report the corresponding status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created(User),
    Updated(User),
}

impl UpsertOutcome {
    pub fn user(&self) -> &User {
        match self {
            Self::Created(u) | Self::Updated(u) => u,
        }
    }

    pub fn into_user(self) -> User {
        match self {
            Self::Created(u) | Self::Updated(u) => u,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}
