//! Accounting dimension repository and lifecycle hooks.
//!
//! Creating or updating a dimension creates its generated fields in the
//! same transaction. Deleting a dimension removes them afterwards.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use claimdesk_core::dimension::{
    AccountingDimension, DimensionError, DimensionEvent, DimensionFieldSync, DimensionFilter,
    is_core_dimension,
};

use super::custom_field::{create_dimension_fields, delete_dimension_fields, has_field};
use crate::entities::accounting_dimensions;

/// Input for creating an accounting dimension.
#[derive(Debug, Clone)]
pub struct CreateDimensionInput {
    /// Unique dimension name.
    pub name: String,
    /// Field key; derived from the name when absent.
    pub fieldname: Option<String>,
    /// Display label; the name when absent.
    pub label: Option<String>,
    /// Document type the values link to.
    pub document_type: String,
    /// Mandatory for balance sheet accounts.
    pub mandatory_for_bs: bool,
    /// Mandatory for profit and loss accounts.
    pub mandatory_for_pl: bool,
    /// Disabled flag.
    pub disabled: bool,
}

/// Input for updating an accounting dimension. The field key never changes.
#[derive(Debug, Clone, Default)]
pub struct UpdateDimensionInput {
    /// Display label.
    pub label: Option<String>,
    /// Document type the values link to.
    pub document_type: Option<String>,
    /// Mandatory for balance sheet accounts.
    pub mandatory_for_bs: Option<bool>,
    /// Mandatory for profit and loss accounts.
    pub mandatory_for_pl: Option<bool>,
    /// Disabled flag.
    pub disabled: Option<bool>,
}

/// Converts a stored dimension to the core type.
#[must_use]
pub fn to_core(model: accounting_dimensions::Model) -> AccountingDimension {
    AccountingDimension {
        name: model.name,
        fieldname: model.fieldname,
        label: model.label,
        document_type: model.document_type,
        mandatory_for_bs: model.mandatory_for_bs,
        mandatory_for_pl: model.mandatory_for_pl,
        disabled: model.disabled,
    }
}

/// Derives a field key from a dimension name ("Sales Region" → "sales_region").
#[must_use]
pub fn scrub(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Loads dimension definitions, optionally including disabled ones.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn load_dimensions<C: ConnectionTrait>(
    conn: &C,
    include_disabled: bool,
) -> Result<Vec<AccountingDimension>, DbErr> {
    let mut query = accounting_dimensions::Entity::find();
    if !include_disabled {
        query = query.filter(accounting_dimensions::Column::Disabled.eq(false));
    }

    let dimensions = query
        .order_by_asc(accounting_dimensions::Column::CreatedAt)
        .order_by_asc(accounting_dimensions::Column::Name)
        .all(conn)
        .await?;

    Ok(dimensions.into_iter().map(to_core).collect())
}

/// Hook run after a dimension is inserted or updated.
///
/// # Errors
///
/// Returns [`DimensionError::FieldCreation`] if the fields cannot be created.
pub async fn on_dimension_change<C: ConnectionTrait>(
    conn: &C,
    dimension: &AccountingDimension,
    event: DimensionEvent,
) -> Result<usize, DimensionError> {
    if !event.creates_fields() {
        return Ok(0);
    }
    create_dimension_fields(conn, dimension).await
}

/// Hook run when a dimension is deleted. Never fails.
pub async fn on_dimension_delete<C: ConnectionTrait>(
    conn: &C,
    dimension: &AccountingDimension,
) -> u64 {
    delete_dimension_fields(conn, dimension).await
}

/// Accounting dimension repository.
#[derive(Debug, Clone)]
pub struct AccountingDimensionRepository {
    db: DatabaseConnection,
}

impl AccountingDimensionRepository {
    /// Creates a new accounting dimension repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        include_disabled: bool,
    ) -> Result<Vec<AccountingDimension>, DimensionError> {
        load_dimensions(&self.db, include_disabled)
            .await
            .map_err(|e| DimensionError::Database(e.to_string()))
    }

    /// Finds a dimension by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self, name: &str) -> Result<Option<AccountingDimension>, DimensionError> {
        accounting_dimensions::Entity::find_by_id(name.to_string())
            .one(&self.db)
            .await
            .map(|model| model.map(to_core))
            .map_err(|e| DimensionError::Database(e.to_string()))
    }

    /// Creates a dimension and its generated fields.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The field key is invalid or already used
    /// - The field key shadows a built-in dimension
    /// - Field creation fails (nothing is saved)
    pub async fn create(
        &self,
        input: CreateDimensionInput,
    ) -> Result<AccountingDimension, DimensionError> {
        let fieldname = input
            .fieldname
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| scrub(&input.name));
        DimensionFieldSync::validate_fieldname(&fieldname)?;
        if is_core_dimension(&fieldname) {
            return Err(DimensionError::Duplicate(fieldname));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DimensionError::Database(e.to_string()))?;

        let taken = accounting_dimensions::Entity::find()
            .filter(
                accounting_dimensions::Column::Name
                    .eq(input.name.as_str())
                    .or(accounting_dimensions::Column::Fieldname.eq(fieldname.as_str())),
            )
            .one(&txn)
            .await
            .map_err(|e| DimensionError::Database(e.to_string()))?;
        if taken.is_some() {
            return Err(DimensionError::Duplicate(input.name));
        }

        let now = Utc::now().into();
        let label = input.label.unwrap_or_else(|| input.name.clone());
        let model = accounting_dimensions::ActiveModel {
            name: Set(input.name),
            fieldname: Set(fieldname),
            label: Set(label),
            document_type: Set(input.document_type),
            mandatory_for_bs: Set(input.mandatory_for_bs),
            mandatory_for_pl: Set(input.mandatory_for_pl),
            disabled: Set(input.disabled),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| DimensionError::Database(e.to_string()))?;

        let dimension = to_core(model);
        on_dimension_change(&txn, &dimension, DimensionEvent::AfterInsert).await?;

        txn.commit()
            .await
            .map_err(|e| DimensionError::Database(e.to_string()))?;

        info!(dimension = %dimension.name, fieldname = %dimension.fieldname, "Accounting dimension created");
        Ok(dimension)
    }

    /// Updates a dimension and creates any of its fields that are missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimension is not found or field creation fails.
    pub async fn update(
        &self,
        name: &str,
        input: UpdateDimensionInput,
    ) -> Result<AccountingDimension, DimensionError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DimensionError::Database(e.to_string()))?;

        let existing = accounting_dimensions::Entity::find_by_id(name.to_string())
            .one(&txn)
            .await
            .map_err(|e| DimensionError::Database(e.to_string()))?
            .ok_or_else(|| DimensionError::NotFound(name.to_string()))?;

        let mut active: accounting_dimensions::ActiveModel = existing.into();
        if let Some(label) = input.label {
            active.label = Set(label);
        }
        if let Some(document_type) = input.document_type {
            active.document_type = Set(document_type);
        }
        if let Some(mandatory_for_bs) = input.mandatory_for_bs {
            active.mandatory_for_bs = Set(mandatory_for_bs);
        }
        if let Some(mandatory_for_pl) = input.mandatory_for_pl {
            active.mandatory_for_pl = Set(mandatory_for_pl);
        }
        if let Some(disabled) = input.disabled {
            active.disabled = Set(disabled);
        }
        active.updated_at = Set(Utc::now().into());

        let model = active
            .update(&txn)
            .await
            .map_err(|e| DimensionError::Database(e.to_string()))?;

        let dimension = to_core(model);
        on_dimension_change(&txn, &dimension, DimensionEvent::OnUpdate).await?;

        txn.commit()
            .await
            .map_err(|e| DimensionError::Database(e.to_string()))?;

        Ok(dimension)
    }

    /// Deletes a dimension, then its generated fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimension is not found or cannot be deleted.
    /// Field removal failures are only logged.
    pub async fn delete(&self, name: &str) -> Result<AccountingDimension, DimensionError> {
        let existing = accounting_dimensions::Entity::find_by_id(name.to_string())
            .one(&self.db)
            .await
            .map_err(|e| DimensionError::Database(e.to_string()))?
            .ok_or_else(|| DimensionError::NotFound(name.to_string()))?;

        accounting_dimensions::Entity::delete_by_id(existing.name.clone())
            .exec(&self.db)
            .await
            .map_err(|e| DimensionError::Database(e.to_string()))?;

        let dimension = to_core(existing);
        on_dimension_delete(&self.db, &dimension).await;

        info!(dimension = %dimension.name, "Accounting dimension deleted");
        Ok(dimension)
    }

    /// Link filter criteria for picking values of a dimension.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimension is not found or the query fails.
    pub async fn filters(&self, name: &str, company: &str) -> Result<DimensionFilter, DimensionError> {
        let dimension = self
            .find(name)
            .await?
            .ok_or_else(|| DimensionError::NotFound(name.to_string()))?;

        let has_company_field = has_field(&self.db, &dimension.document_type, "company")
            .await
            .map_err(|e| DimensionError::Database(e.to_string()))?;

        Ok(DimensionFilter::for_document_type(
            &dimension.document_type,
            company,
            has_company_field,
        ))
    }
}
