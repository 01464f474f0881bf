use crate::contract::model::User;
use crate::infra::storage::entity::Model as UserEntity;

/// Convert a database entity to a contract model
pub fn entity_to_contract(entity: UserEntity) -> User {
    User {
        id: entity.id,
        name: entity.name,
        email: entity.email,
        created_at: entity.created_at,
        active: entity.active,
    }
}
