//! Installation and bulk synchronization of accounting dimension fields.

use sea_orm::ConnectionTrait;
use tracing::info;

use claimdesk_core::dimension::fields::ADDITIONAL_DIMENSIONS_SECTION;
use claimdesk_core::dimension::{DimensionError, DimensionFieldSync, DocType};

use crate::repositories::custom_field::{FieldSet, create_dimension_fields, insert_field};
use crate::repositories::dimension::load_dimensions;

/// Creates the missing fields of every enabled dimension.
///
/// Returns the summary message with the number of dimensions processed.
///
/// # Errors
///
/// Stops at the first dimension whose fields cannot be created.
pub async fn sync_all_accounting_dimensions<C: ConnectionTrait>(
    conn: &C,
) -> Result<String, DimensionError> {
    let dimensions = load_dimensions(conn, false)
        .await
        .map_err(|e| DimensionError::Database(e.to_string()))?;

    for dimension in &dimensions {
        create_dimension_fields(conn, dimension).await?;
    }

    let message = DimensionFieldSync::sync_message(dimensions.len());
    info!("{message}");
    Ok(message)
}

/// Post-install step: adds the additional dimensions section when needed,
/// then synchronizes all dimensions.
///
/// # Errors
///
/// Returns an error if the section or any dimension field cannot be created.
pub async fn after_install<C: ConnectionTrait>(conn: &C) -> Result<String, DimensionError> {
    let dimensions = load_dimensions(conn, false)
        .await
        .map_err(|e| DimensionError::Database(e.to_string()))?;
    let fields = FieldSet::load(conn)
        .await
        .map_err(|e| DimensionError::Database(e.to_string()))?;

    let section_exists = fields.has_field(DocType::ExpenseEntry, ADDITIONAL_DIMENSIONS_SECTION);
    if let Some(section) = DimensionFieldSync::plan_section(&dimensions, section_exists) {
        insert_field(conn, &section)
            .await
            .map_err(|e| DimensionError::Database(e.to_string()))?;
        info!(fieldname = %section.fieldname, "Accounting dimension section created");
    }

    sync_all_accounting_dimensions(conn).await
}
