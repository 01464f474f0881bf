//! Predicate construction for the listing query.

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, Condition};

use crate::domain::query::UserFilter;
use crate::infra::storage::entity::Column;

/// Build the listing predicate from a partially-filled filter: a row
/// matches when ANY present filter field equals the corresponding column
/// (OR across fields, not AND). Text fields compare case-insensitively.
/// Absent fields stay out of the comparison set, and an all-absent filter
/// yields an empty condition, which matches every row.
pub fn filter_condition(filter: &UserFilter) -> Condition {
    let mut cond = Condition::any();

    if let Some(id) = filter.id {
        cond = cond.add(Column::Id.eq(id));
    }
    if let Some(ref name) = filter.name {
        cond = cond.add(text_eq_ignore_case(Column::Name, name));
    }
    if let Some(ref email) = filter.email {
        cond = cond.add(text_eq_ignore_case(Column::Email, email));
    }
    if let Some(active) = filter.active {
        cond = cond.add(Column::Active.eq(active));
    }

    cond
}

// LOWER(col) = lower(value); LIKE would add wildcard semantics we don't want.
fn text_eq_ignore_case(col: Column, value: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).eq(value.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::storage::entity::Entity as Users;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn sql_for(filter: &UserFilter) -> String {
        Users::find()
            .filter(filter_condition(filter))
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn empty_filter_has_no_where_clause() {
        let sql = sql_for(&UserFilter::default());
        assert!(!sql.contains("WHERE"), "unexpected WHERE in: {sql}");
    }

    #[test]
    fn present_fields_are_or_combined() {
        let filter = UserFilter {
            id: Some(7),
            name: Some("Alice".into()),
            ..Default::default()
        };
        let sql = sql_for(&filter);
        assert!(sql.contains(" OR "), "expected OR in: {sql}");
        assert!(!sql.contains(" AND "), "unexpected AND in: {sql}");
    }

    #[test]
    fn text_comparison_is_case_insensitive() {
        let filter = UserFilter {
            name: Some("ALICE".into()),
            ..Default::default()
        };
        let sql = sql_for(&filter);
        assert!(sql.contains("LOWER"), "expected LOWER in: {sql}");
        assert!(sql.contains("alice"), "expected lowered value in: {sql}");
    }

    #[test]
    fn absent_fields_are_not_compared_against_null() {
        let filter = UserFilter {
            active: Some(false),
            ..Default::default()
        };
        let sql = sql_for(&filter);
        let clause = sql.split("WHERE").nth(1).expect("expected WHERE clause");
        assert!(!clause.contains("NULL"), "unexpected NULL check in: {sql}");
        assert!(!clause.contains("email"), "absent field leaked into: {sql}");
    }
}
