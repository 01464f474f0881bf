//! Listing criteria: the partially-filled filter and the page spec.

/// Fields a listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Email,
    CreatedAt,
    Active,
}

impl SortField {
    /// Parse a query-string field name. Returns `None` for unknown fields
    /// so the boundary can reject them as caller errors.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "created_at" => Some(Self::CreatedAt),
            "active" => Some(Self::Active),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub dir: SortDir,
}

impl SortKey {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            dir: SortDir::Asc,
        }
    }
}

pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Page index, page size and sort order for a listing query.
///
/// `Default` carries the service-wide defaults: first page, ten rows,
/// ordered by name ascending then id ascending. Caller-supplied values
/// override these field by field at the DTO layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: Vec<SortKey>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: vec![SortKey::asc(SortField::Name), SortKey::asc(SortField::Id)],
        }
    }
}

/// A partially-filled filter over the user fields. A present field
/// participates in matching; an absent field is excluded from the
/// comparison set entirely (it is not compared against "is null").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub active: Option<bool>,
}

impl UserFilter {
    /// True when no field is present, in which case the predicate built
    /// from this filter matches every row.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none() && self.email.is_none() && self.active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_request_matches_listing_defaults() {
        let page = PageRequest::default();
        assert_eq!(page.page, 0);
        assert_eq!(page.size, 10);
        assert_eq!(
            page.sort,
            vec![SortKey::asc(SortField::Name), SortKey::asc(SortField::Id)]
        );
    }

    #[test]
    fn sort_field_parsing() {
        assert_eq!(SortField::parse("name"), Some(SortField::Name));
        assert_eq!(SortField::parse("created_at"), Some(SortField::CreatedAt));
        assert_eq!(SortField::parse("nope"), None);
    }

    #[test]
    fn empty_filter_is_empty() {
        assert!(UserFilter::default().is_empty());
        let filter = UserFilter {
            active: Some(true),
            ..Default::default()
        };
        assert!(!filter.is_empty());
    }
}
