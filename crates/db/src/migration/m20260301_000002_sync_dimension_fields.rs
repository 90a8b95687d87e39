//! Data migration that (re)creates accounting dimension fields.
//!
//! Safe to run on a database that already has the fields.

use sea_orm_migration::prelude::*;

use crate::install;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        install::after_install(db)
            .await
            .map_err(|e| DbErr::Migration(e.to_string()))?;
        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // Generated fields are owned by their dimensions; nothing to undo.
        Ok(())
    }
}
