//! Mode of payment account repository.

use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    sea_query::OnConflict,
};

use crate::entities::mode_of_payment_accounts;

/// Resolves the default account of a mode of payment for a company.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn payment_account<C: ConnectionTrait>(
    conn: &C,
    mode_of_payment: &str,
    company: &str,
) -> Result<Option<String>, DbErr> {
    let account = mode_of_payment_accounts::Entity::find()
        .filter(mode_of_payment_accounts::Column::ModeOfPayment.eq(mode_of_payment))
        .filter(mode_of_payment_accounts::Column::Company.eq(company))
        .one(conn)
        .await?;

    Ok(account.map(|a| a.default_account))
}

/// Mode of payment account repository.
#[derive(Debug, Clone)]
pub struct ModeOfPaymentRepository {
    db: DatabaseConnection,
}

impl ModeOfPaymentRepository {
    /// Creates a new mode of payment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sets the default account of a mode of payment for a company.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub async fn set_account(
        &self,
        mode_of_payment: &str,
        company: &str,
        default_account: &str,
    ) -> Result<(), DbErr> {
        let row = mode_of_payment_accounts::ActiveModel {
            mode_of_payment: Set(mode_of_payment.to_string()),
            company: Set(company.to_string()),
            default_account: Set(default_account.to_string()),
        };

        mode_of_payment_accounts::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    mode_of_payment_accounts::Column::ModeOfPayment,
                    mode_of_payment_accounts::Column::Company,
                ])
                .update_column(mode_of_payment_accounts::Column::DefaultAccount)
                .to_owned(),
            )
            .exec(&self.db)
            .await?;

        Ok(())
    }

    /// Resolves the default account of a mode of payment for a company.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_account(
        &self,
        mode_of_payment: &str,
        company: &str,
    ) -> Result<Option<String>, DbErr> {
        payment_account(&self.db, mode_of_payment, company).await
    }
}
