//! SeaORM-backed repository implementation for the domain port.
//!
//! The transactional methods (`update_fields`, `set_active`) open a
//! transaction, read the current row and write the derived row on the same
//! connection, so their read-modify-write sequence observes one snapshot.

use anyhow::Context;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

use crate::contract::model::{NewUser, User};
use crate::domain::query::{PageRequest, SortDir, SortField, UserFilter};
use crate::domain::repo::UsersRepository;
use crate::infra::storage::entity::{ActiveModel, Column, Entity as Users};
use crate::infra::storage::filter::filter_condition;
use crate::infra::storage::mapper::entity_to_contract;

pub struct SeaOrmUsersRepository {
    conn: DatabaseConnection,
}

impl SeaOrmUsersRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

fn sort_column(field: SortField) -> Column {
    match field {
        SortField::Id => Column::Id,
        SortField::Name => Column::Name,
        SortField::Email => Column::Email,
        SortField::CreatedAt => Column::CreatedAt,
        SortField::Active => Column::Active,
    }
}

#[async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let found = Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(entity_to_contract))
    }

    async fn insert(&self, new_user: NewUser) -> anyhow::Result<User> {
        let m = ActiveModel {
            name: Set(new_user.name),
            email: Set(new_user.email),
            created_at: Set(new_user.created_at),
            active: Set(new_user.active),
            ..Default::default()
        };
        // id stays NotSet; the store assigns it on insert.
        let stored = m.insert(&self.conn).await.context("insert failed")?;
        Ok(entity_to_contract(stored))
    }

    async fn update_fields(
        &self,
        id: i64,
        name: String,
        email: Option<String>,
        active: bool,
    ) -> anyhow::Result<Option<User>> {
        let txn = self.conn.begin().await.context("begin failed")?;

        let current = Users::find_by_id(id)
            .one(&txn)
            .await
            .context("load for update failed")?;
        let Some(current) = current else {
            txn.rollback().await.context("rollback failed")?;
            return Ok(None);
        };

        // created_at stays Unchanged: the stored timestamp survives the merge.
        let mut m: ActiveModel = current.into();
        m.name = Set(name);
        m.email = Set(email);
        m.active = Set(active);

        let updated = m.update(&txn).await.context("update failed")?;
        txn.commit().await.context("commit failed")?;
        Ok(Some(entity_to_contract(updated)))
    }

    async fn set_active(&self, id: i64, active: bool) -> anyhow::Result<Option<User>> {
        let txn = self.conn.begin().await.context("begin failed")?;

        let current = Users::find_by_id(id)
            .one(&txn)
            .await
            .context("load for set_active failed")?;
        let Some(current) = current else {
            txn.rollback().await.context("rollback failed")?;
            return Ok(None);
        };

        // Already in the requested state; nothing to write.
        if current.active == active {
            txn.commit().await.context("commit failed")?;
            return Ok(Some(entity_to_contract(current)));
        }

        let mut m: ActiveModel = current.into();
        m.active = Set(active);

        let updated = m.update(&txn).await.context("set_active failed")?;
        txn.commit().await.context("commit failed")?;
        Ok(Some(entity_to_contract(updated)))
    }

    async fn list(&self, filter: &UserFilter, page: &PageRequest) -> anyhow::Result<Vec<User>> {
        let mut query = Users::find().filter(filter_condition(filter));

        for key in &page.sort {
            let col = sort_column(key.field);
            query = match key.dir {
                SortDir::Asc => query.order_by_asc(col),
                SortDir::Desc => query.order_by_desc(col),
            };
        }

        let rows = query
            .limit(page.size)
            .offset(page.page.saturating_mul(page.size))
            .all(&self.conn)
            .await
            .context("list failed")?;

        Ok(rows.into_iter().map(entity_to_contract).collect())
    }
}
