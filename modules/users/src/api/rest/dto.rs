use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::contract::model::{UpsertUser, User};
use crate::domain::query::{PageRequest, SortDir, SortField, SortKey, UserFilter};

// Same pattern the persisted records were validated with historically; the
// outer group is optional so an empty string passes (email is nullable).
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([_a-zA-Z0-9-]+(\.[_a-zA-Z0-9-]+)*@[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*(\.[a-zA-Z]{1,6}))?$")
        .expect("email pattern is valid")
});

/// REST DTO for user representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

/// REST DTO for the save-or-update request. No id means create; an id
/// means update the existing user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertUserReq {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl UpsertUserReq {
    /// Field-format validation, run before the service sees the request.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if let Some(ref email) = self.email {
            if !EMAIL_PATTERN.is_match(email) {
                return Err(format!("email '{email}' is not a valid address"));
            }
        }
        Ok(())
    }
}

/// REST DTO for a page of users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPageDto {
    pub users: Vec<UserDto>,
    pub page: u64,
    pub size: u64,
}

/// REST DTO for the listing query parameters. The filter fields and the
/// page fields are all optional; absent page fields fall back to the
/// listing defaults field by field.
#[derive(Debug, Clone, Deserialize)]
pub struct ListUsersQuery {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub active: Option<bool>,
    pub page: Option<u64>,
    pub size: Option<u64>,
    /// Comma-separated sort keys, each `field` or `field:desc`,
    /// e.g. `sort=name:desc,id`.
    pub sort: Option<String>,
}

impl ListUsersQuery {
    /// The filter the matcher will turn into a predicate. When the caller
    /// does not mention `active`, the listing covers active users only, so
    /// soft-deleted records stay out of default listings.
    pub fn filter(&self) -> UserFilter {
        UserFilter {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            active: Some(self.active.unwrap_or(true)),
        }
    }

    /// Page spec with caller values overriding the defaults field by field.
    pub fn page_request(&self) -> Result<PageRequest, String> {
        let mut page = PageRequest::default();
        if let Some(p) = self.page {
            page.page = p;
        }
        if let Some(s) = self.size {
            page.size = s;
        }
        if let Some(ref sort) = self.sort {
            let keys = parse_sort(sort)?;
            if !keys.is_empty() {
                page.sort = keys;
            }
        }
        Ok(page)
    }
}

fn parse_sort(raw: &str) -> Result<Vec<SortKey>, String> {
    let mut keys = Vec::new();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (field, dir) = match token.split_once(':') {
            Some((f, d)) => (f.trim(), d.trim()),
            None => (token, "asc"),
        };
        let field =
            SortField::parse(field).ok_or_else(|| format!("unknown sort field '{field}'"))?;
        let dir = match dir {
            "asc" => SortDir::Asc,
            "desc" => SortDir::Desc,
            other => return Err(format!("unknown sort direction '{other}'")),
        };
        keys.push(SortKey { field, dir });
    }
    Ok(keys)
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            active: user.active,
        }
    }
}

impl From<UpsertUserReq> for UpsertUser {
    fn from(req: UpsertUserReq) -> Self {
        Self {
            id: req.id,
            name: req.name,
            email: req.email,
            active: req.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(name: &str, email: Option<&str>) -> UpsertUserReq {
        UpsertUserReq {
            id: None,
            name: name.to_string(),
            email: email.map(str::to_string),
            active: true,
        }
    }

    #[test]
    fn valid_requests_pass_validation() {
        assert!(req("Joana", None).validate().is_ok());
        assert!(req("Joana", Some("joana_da-silva@email.com.br"))
            .validate()
            .is_ok());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let e = req("Joana", Some("not_an_email.com")).validate();
        assert!(e.is_err());
        assert!(req("Joana", Some("a@b@c.com")).validate().is_err());
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(req("  ", None).validate().is_err());
        assert!(req("", None).validate().is_err());
    }

    #[test]
    fn listing_defaults_when_nothing_is_supplied() {
        let q = ListUsersQuery {
            id: None,
            name: None,
            email: None,
            active: None,
            page: None,
            size: None,
            sort: None,
        };
        let page = q.page_request().unwrap();
        assert_eq!(page, PageRequest::default());
        // Unfilled filter still pins the listing to active users.
        assert_eq!(q.filter().active, Some(true));
        assert_eq!(q.filter().name, None);
    }

    #[test]
    fn caller_values_override_defaults_field_by_field() {
        let q = ListUsersQuery {
            id: None,
            name: Some("alice".into()),
            email: None,
            active: Some(false),
            page: Some(2),
            size: None,
            sort: Some("created_at:desc,id".into()),
        };
        let page = q.page_request().unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.size, PageRequest::default().size);
        assert_eq!(
            page.sort,
            vec![
                SortKey {
                    field: SortField::CreatedAt,
                    dir: SortDir::Desc
                },
                SortKey::asc(SortField::Id),
            ]
        );
        assert_eq!(q.filter().active, Some(false));
    }

    #[test]
    fn unknown_sort_field_is_a_caller_error() {
        let q = ListUsersQuery {
            id: None,
            name: None,
            email: None,
            active: None,
            page: None,
            size: None,
            sort: Some("nombre".into()),
        };
        assert!(q.page_request().is_err());
    }
}
