//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::UserRole as DbUserRole, users};
use claimdesk_shared::UserRole;

/// Maps a shared role to the stored role.
#[must_use]
pub const fn role_to_db(role: UserRole) -> DbUserRole {
    match role {
        UserRole::Owner => DbUserRole::Owner,
        UserRole::Admin => DbUserRole::Admin,
        UserRole::Approver => DbUserRole::Approver,
        UserRole::Accountant => DbUserRole::Accountant,
        UserRole::Submitter => DbUserRole::Submitter,
        UserRole::Viewer => DbUserRole::Viewer,
    }
}

/// Maps a stored role to the shared role.
#[must_use]
pub const fn role_from_db(role: DbUserRole) -> UserRole {
    match role {
        DbUserRole::Owner => UserRole::Owner,
        DbUserRole::Admin => UserRole::Admin,
        DbUserRole::Approver => UserRole::Approver,
        DbUserRole::Accountant => UserRole::Accountant,
        DbUserRole::Submitter => UserRole::Submitter,
        DbUserRole::Viewer => UserRole::Viewer,
    }
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a new active user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        email: &str,
        first_name: &str,
        last_name: Option<&str>,
        role: UserRole,
    ) -> Result<users::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.map(str::to_string)),
            role: Set(role_to_db(role)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db).await
    }

    /// Lists all users by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .order_by_asc(users::Column::Email)
            .all(&self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_mapping_round_trips() {
        for role in [
            UserRole::Owner,
            UserRole::Admin,
            UserRole::Approver,
            UserRole::Accountant,
            UserRole::Submitter,
            UserRole::Viewer,
        ] {
            assert_eq!(role_from_db(role_to_db(role)), role);
        }
    }
}
