//! Accounting dimension routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use claimdesk_core::dimension::{
    AccountingDimension, CORE_DIMENSIONS, DimensionError, DimensionFieldSync,
};
use claimdesk_db::install::sync_all_accounting_dimensions;
use claimdesk_db::repositories::{
    AccountingDimensionRepository, CreateDimensionInput, UpdateDimensionInput,
};
use claimdesk_shared::UserRole;

/// Creates the dimension routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounting-dimensions",
            get(list_dimensions).post(create_dimension),
        )
        .route("/accounting-dimensions/client-info", get(client_info))
        .route("/accounting-dimensions/rebuild", post(rebuild_dimensions))
        .route(
            "/accounting-dimensions/{name}",
            get(get_dimension)
                .put(update_dimension)
                .delete(delete_dimension),
        )
        .route("/accounting-dimensions/{name}/filters", get(dimension_filters))
}

/// Query parameters for listing dimensions.
#[derive(Debug, Default, Deserialize)]
pub struct ListDimensionsQuery {
    /// Include disabled dimensions.
    #[serde(default)]
    pub include_disabled: bool,
}

/// Query parameters for dimension filters.
#[derive(Debug, Deserialize)]
pub struct FiltersQuery {
    /// Company the linked records must belong to.
    pub company: String,
}

/// Request body for creating a dimension.
#[derive(Debug, Deserialize)]
pub struct CreateDimensionRequest {
    /// Unique dimension name.
    pub name: String,
    /// Field key (derived from the name when omitted).
    pub fieldname: Option<String>,
    /// Display label (the name when omitted).
    pub label: Option<String>,
    /// Document type the values link to.
    pub document_type: String,
    /// Mandatory for balance sheet accounts (default: false).
    pub mandatory_for_bs: Option<bool>,
    /// Mandatory for profit and loss accounts (default: false).
    pub mandatory_for_pl: Option<bool>,
    /// Disabled flag (default: false).
    pub disabled: Option<bool>,
}

/// Request body for updating a dimension.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDimensionRequest {
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

/// Dimension metadata used by expense forms.
#[derive(Debug, Serialize)]
pub struct ClientInfoResponse {
    /// Label by field key for the built-ins and every active dimension.
    pub all_dimensions: Map<String, Value>,
    /// Built-in dimension keys.
    pub core_dimensions: Vec<&'static str>,
    /// Active dimension definitions.
    pub accounting_dimensions: Vec<AccountingDimension>,
}

impl ClientInfoResponse {
    fn from_dimensions(dimensions: Vec<AccountingDimension>) -> Self {
        let all_dimensions = DimensionFieldSync::all_dimension_fieldnames(&dimensions)
            .into_iter()
            .map(|(key, label)| (key, Value::String(label)))
            .collect();

        Self {
            all_dimensions,
            core_dimensions: CORE_DIMENSIONS.iter().map(|(key, _)| *key).collect(),
            accounting_dimensions: dimensions,
        }
    }
}

/// GET `/accounting-dimensions` - List dimensions.
async fn list_dimensions(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListDimensionsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AccountingDimensionRepository::new((*state.db).clone());
    let dimensions = repo.list(query.include_disabled).await?;

    Ok(Json(json!({ "accounting_dimensions": dimensions })))
}

/// GET `/accounting-dimensions/client-info` - Dimension metadata for forms.
async fn client_info(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AccountingDimensionRepository::new((*state.db).clone());
    let dimensions = repo.list(false).await?;

    Ok(Json(ClientInfoResponse::from_dimensions(dimensions)))
}

/// POST `/accounting-dimensions/rebuild` - Create missing fields for all dimensions.
async fn rebuild_dimensions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(UserRole::can_manage_dimensions)?;

    let txn = state.db.begin().await?;
    let message = sync_all_accounting_dimensions(&txn).await?;
    txn.commit().await?;

    info!(user_id = %auth.user_id(), "{message}");
    Ok(Json(json!({ "message": message })))
}

/// GET `/accounting-dimensions/{name}` - Get one dimension.
async fn get_dimension(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AccountingDimensionRepository::new((*state.db).clone());
    let dimension = repo
        .find(&name)
        .await?
        .ok_or(DimensionError::NotFound(name))?;

    Ok(Json(dimension))
}

/// POST `/accounting-dimensions` - Create a dimension and its fields.
async fn create_dimension(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateDimensionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(UserRole::can_manage_dimensions)?;

    let repo = AccountingDimensionRepository::new((*state.db).clone());
    let dimension = repo
        .create(CreateDimensionInput {
            name: payload.name,
            fieldname: payload.fieldname,
            label: payload.label,
            document_type: payload.document_type,
            mandatory_for_bs: payload.mandatory_for_bs.unwrap_or(false),
            mandatory_for_pl: payload.mandatory_for_pl.unwrap_or(false),
            disabled: payload.disabled.unwrap_or(false),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(dimension)))
}

/// PUT `/accounting-dimensions/{name}` - Update a dimension.
async fn update_dimension(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(name): Path<String>,
    Json(payload): Json<UpdateDimensionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(UserRole::can_manage_dimensions)?;

    let repo = AccountingDimensionRepository::new((*state.db).clone());
    let dimension = repo
        .update(
            &name,
            UpdateDimensionInput {
                label: payload.label,
                document_type: payload.document_type,
                mandatory_for_bs: payload.mandatory_for_bs,
                mandatory_for_pl: payload.mandatory_for_pl,
                disabled: payload.disabled,
            },
        )
        .await?;

    Ok(Json(dimension))
}

/// DELETE `/accounting-dimensions/{name}` - Delete a dimension and its fields.
async fn delete_dimension(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(UserRole::can_manage_dimensions)?;

    let repo = AccountingDimensionRepository::new((*state.db).clone());
    repo.delete(&name).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET `/accounting-dimensions/{name}/filters?company=` - Link filter criteria.
async fn dimension_filters(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(name): Path<String>,
    Query(query): Query<FiltersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AccountingDimensionRepository::new((*state.db).clone());
    let filter = repo.filters(&name, &query.company).await?;

    Ok(Json(json!({ "filters": filter })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimension(fieldname: &str, label: &str, disabled: bool) -> AccountingDimension {
        AccountingDimension {
            name: label.to_string(),
            fieldname: fieldname.to_string(),
            label: label.to_string(),
            document_type: "Territory".to_string(),
            mandatory_for_bs: false,
            mandatory_for_pl: false,
            disabled,
        }
    }

    #[test]
    fn test_client_info_lists_builtins_and_active_dimensions() {
        let info = ClientInfoResponse::from_dimensions(vec![
            dimension("region", "Region", false),
            dimension("branch", "Branch", true),
        ]);

        assert_eq!(info.core_dimensions, vec!["project", "cost_center"]);
        assert_eq!(info.all_dimensions.get("project"), Some(&json!("Project")));
        assert_eq!(info.all_dimensions.get("cost_center"), Some(&json!("Cost Center")));
        assert_eq!(info.all_dimensions.get("region"), Some(&json!("Region")));
        assert!(info.all_dimensions.get("branch").is_none());
        assert_eq!(info.all_dimensions.len(), 3);
    }

    #[test]
    fn test_client_info_serializes_expected_keys() {
        let info = ClientInfoResponse::from_dimensions(vec![]);
        let value = serde_json::to_value(&info).unwrap();

        assert!(value.get("all_dimensions").is_some());
        assert!(value.get("core_dimensions").is_some());
        assert_eq!(value["accounting_dimensions"], json!([]));
    }

    #[test]
    fn test_create_request_defaults() {
        let request: CreateDimensionRequest =
            serde_json::from_value(json!({"name": "Region", "document_type": "Territory"}))
                .unwrap();

        assert!(request.fieldname.is_none());
        assert!(request.mandatory_for_pl.is_none());
    }
}
