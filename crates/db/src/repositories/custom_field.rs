//! Custom field repository for generated accounting dimension fields.
//!
//! The field operations are generic over [`ConnectionTrait`] so they run the
//! same inside a request transaction, on the pool, or inside a migration.

use std::collections::BTreeSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::{error, info};
use uuid::Uuid;

use claimdesk_core::dimension::{
    AccountingDimension, CustomFieldSpec, DimensionError, DimensionFieldSync, DocType,
};

use crate::entities::{custom_fields, doc_fields};

/// Field names present on the expense document types.
#[derive(Debug, Default, Clone)]
pub struct FieldSet {
    fields: BTreeSet<(DocType, String)>,
}

impl FieldSet {
    /// Loads standard and custom field names of both expense document types.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn load<C: ConnectionTrait>(conn: &C) -> Result<Self, DbErr> {
        let doctypes = [
            DocType::ExpenseEntry.as_str(),
            DocType::ExpenseEntryItem.as_str(),
        ];

        let standard = doc_fields::Entity::find()
            .filter(doc_fields::Column::Doctype.is_in(doctypes))
            .all(conn)
            .await?
            .into_iter()
            .map(|f| (f.doctype, f.fieldname));

        let custom = custom_fields::Entity::find()
            .filter(custom_fields::Column::Doctype.is_in(doctypes))
            .all(conn)
            .await?
            .into_iter()
            .map(|f| (f.doctype, f.fieldname));

        let fields = standard
            .chain(custom)
            .filter_map(|(doctype, fieldname)| DocType::parse(&doctype).map(|dt| (dt, fieldname)))
            .collect();

        Ok(Self { fields })
    }

    /// Returns true if the document type has a field with this name.
    #[must_use]
    pub fn has_field(&self, doctype: DocType, fieldname: &str) -> bool {
        self.fields.contains(&(doctype, fieldname.to_string()))
    }
}

/// Inserts one custom field.
///
/// # Errors
///
/// Returns an error if the insert fails (including a duplicate field name).
pub async fn insert_field<C: ConnectionTrait>(
    conn: &C,
    definition: &CustomFieldSpec,
) -> Result<custom_fields::Model, DbErr> {
    let field = custom_fields::ActiveModel {
        id: Set(Uuid::new_v4()),
        doctype: Set(definition.doctype.as_str().to_string()),
        fieldname: Set(definition.fieldname.clone()),
        label: Set(definition.label.clone()),
        fieldtype: Set(definition.fieldtype.as_str().to_string()),
        options: Set(definition.options.clone()),
        insert_after: Set(definition.insert_after.clone()),
        in_list_view: Set(definition.in_list_view),
        in_standard_filter: Set(definition.in_standard_filter),
        reqd: Set(definition.reqd),
        description: Set(definition.description.clone()),
        columns: Set(definition.columns),
        collapsible: Set(definition.collapsible),
        created_at: Set(Utc::now().into()),
    };

    field.insert(conn).await
}

/// Creates the missing generated fields of one dimension.
///
/// Returns the number of fields created. Running it again creates nothing.
///
/// # Errors
///
/// Any store error is logged and returned as
/// [`DimensionError::FieldCreation`] naming the dimension.
pub async fn create_dimension_fields<C: ConnectionTrait>(
    conn: &C,
    dimension: &AccountingDimension,
) -> Result<usize, DimensionError> {
    match apply_creation_plan(conn, dimension).await {
        Ok(created) => {
            if created > 0 {
                info!(dimension = %dimension.label, created, "Accounting dimension fields created");
            }
            Ok(created)
        }
        Err(e) => {
            error!(
                error = %e,
                dimension = %dimension.label,
                "Error creating fields for accounting dimension"
            );
            Err(DimensionError::FieldCreation {
                label: dimension.label.clone(),
            })
        }
    }
}

async fn apply_creation_plan<C: ConnectionTrait>(
    conn: &C,
    dimension: &AccountingDimension,
) -> Result<usize, DbErr> {
    let fields = FieldSet::load(conn).await?;
    let plan = DimensionFieldSync::plan_creation(
        dimension,
        |doctype, fieldname| fields.has_field(doctype, fieldname),
        |doctype, fieldname| fields.has_field(doctype, fieldname),
    );

    for definition in &plan {
        insert_field(conn, definition).await?;
    }

    Ok(plan.len())
}

/// Deletes the generated fields of one dimension.
///
/// Protected built-in fields are never touched. Failures are logged and
/// skipped. Returns the number of fields deleted.
pub async fn delete_dimension_fields<C: ConnectionTrait>(
    conn: &C,
    dimension: &AccountingDimension,
) -> u64 {
    let mut deleted = 0;

    for removal in DimensionFieldSync::plan_removal(dimension) {
        let result = custom_fields::Entity::delete_many()
            .filter(custom_fields::Column::Doctype.eq(removal.doctype.as_str()))
            .filter(custom_fields::Column::Fieldname.eq(removal.fieldname.as_str()))
            .exec(conn)
            .await;

        match result {
            Ok(res) => deleted += res.rows_affected,
            Err(e) => error!(
                error = %e,
                dimension = %dimension.label,
                doctype = %removal.doctype,
                fieldname = %removal.fieldname,
                "Error deleting accounting dimension field"
            ),
        }
    }

    info!(dimension = %dimension.label, deleted, "Accounting dimension fields removed");
    deleted
}

/// Custom field repository for read access.
#[derive(Debug, Clone)]
pub struct CustomFieldRepository {
    db: DatabaseConnection,
}

impl CustomFieldRepository {
    /// Creates a new custom field repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists custom fields of a document type in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, doctype: DocType) -> Result<Vec<custom_fields::Model>, DbErr> {
        custom_fields::Entity::find()
            .filter(custom_fields::Column::Doctype.eq(doctype.as_str()))
            .order_by_asc(custom_fields::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Returns true if a document type has a field, standard or custom.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn has_field(&self, doctype: &str, fieldname: &str) -> Result<bool, DbErr> {
        has_field(&self.db, doctype, fieldname).await
    }
}

/// Returns true if a document type has a field, standard or custom.
///
/// Works for any document type, not only the expense ones.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn has_field<C: ConnectionTrait>(
    conn: &C,
    doctype: &str,
    fieldname: &str,
) -> Result<bool, DbErr> {
    let standard = doc_fields::Entity::find_by_id((doctype.to_string(), fieldname.to_string()))
        .one(conn)
        .await?;
    if standard.is_some() {
        return Ok(true);
    }

    let custom = custom_fields::Entity::find()
        .filter(custom_fields::Column::Doctype.eq(doctype))
        .filter(custom_fields::Column::Fieldname.eq(fieldname))
        .one(conn)
        .await?;

    Ok(custom.is_some())
}

/// Field names of required custom fields on the expense line.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn required_item_fields<C: ConnectionTrait>(conn: &C) -> Result<Vec<String>, DbErr> {
    let fields = custom_fields::Entity::find()
        .filter(custom_fields::Column::Doctype.eq(DocType::ExpenseEntryItem.as_str()))
        .filter(custom_fields::Column::Reqd.eq(true))
        .order_by_asc(custom_fields::Column::CreatedAt)
        .all(conn)
        .await?;

    Ok(fields.into_iter().map(|f| f.fieldname).collect())
}
