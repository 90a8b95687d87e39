//! Expense entry routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use claimdesk_core::dimension::DimensionValues;
use claimdesk_core::expense::{ExpenseEntry, ExpenseEntryItem, ExpenseError, ExpenseStatus};
use claimdesk_db::repositories::{
    ExpenseEntryInput, ExpenseFilter, ExpenseRepository, SavedExpense,
};
use claimdesk_shared::types::{PageRequest, PageResponse};
use claimdesk_shared::{AppError, UserRole};

/// Creates the expense entry routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expense-entries", get(list_expenses).post(create_expense))
        .route(
            "/expense-entries/{name}",
            get(get_expense).put(update_expense),
        )
        .route("/expense-entries/{name}/submit", post(submit_expense))
        .route("/expense-entries/{name}/approve", post(approve_expense))
        .route("/expense-entries/{name}/cancel", post(cancel_expense))
        .route("/expense-entries/{name}/journal-entry", post(make_journal_entry))
}

/// Query parameters for listing expense entries.
#[derive(Debug, Default, Deserialize)]
pub struct ListExpensesQuery {
    /// Page number (default: 1).
    pub page: Option<u32>,
    /// Items per page (default: 20, max 100).
    pub per_page: Option<u32>,
    /// Filter by status.
    pub status: Option<String>,
    /// Filter by company.
    pub company: Option<String>,
}

impl ListExpensesQuery {
    fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }

    fn filter(&self) -> Result<ExpenseFilter, ApiError> {
        let status = self
            .status
            .as_deref()
            .map(|s| {
                ExpenseStatus::parse(s).ok_or_else(|| {
                    ApiError::new(AppError::Validation(format!("Unknown status '{s}'")))
                })
            })
            .transpose()?;

        Ok(ExpenseFilter {
            status,
            company: self.company.clone(),
        })
    }
}

/// Request body for creating or updating an expense entry.
#[derive(Debug, Deserialize)]
pub struct ExpenseEntryRequest {
    /// Company the expenses are booked in.
    pub company: String,
    /// Posting date.
    pub posting_date: NaiveDate,
    /// Default dimension values.
    #[serde(default)]
    pub default_dimensions: DimensionValues,
    /// Mode of payment.
    pub mode_of_payment: String,
    /// Payment reference.
    pub payment_reference: Option<String>,
    /// Clearance date.
    pub clearance_date: Option<NaiveDate>,
    /// Payee.
    pub payment_to: Option<String>,
    /// Remarks.
    pub remarks: Option<String>,
    /// Expense lines.
    pub expenses: Vec<ExpenseEntryItem>,
}

impl From<ExpenseEntryRequest> for ExpenseEntryInput {
    fn from(request: ExpenseEntryRequest) -> Self {
        Self {
            company: request.company,
            posting_date: request.posting_date,
            default_dimensions: request.default_dimensions,
            mode_of_payment: request.mode_of_payment,
            payment_reference: request.payment_reference,
            clearance_date: request.clearance_date,
            payment_to: request.payment_to,
            remarks: request.remarks,
            expenses: request.expenses,
        }
    }
}

/// An expense entry and the journal entry created by the request, if any.
#[derive(Debug, Serialize)]
pub struct ExpenseEntryResponse {
    /// The expense entry.
    #[serde(flatten)]
    pub entry: ExpenseEntry,
    /// Journal entry created by this request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal_entry: Option<String>,
}

impl From<SavedExpense> for ExpenseEntryResponse {
    fn from(saved: SavedExpense) -> Self {
        Self {
            entry: saved.entry,
            journal_entry: saved.journal_entry,
        }
    }
}

fn repository(state: &AppState) -> ExpenseRepository {
    ExpenseRepository::new(
        (*state.db).clone(),
        state.expense.cash_mode_of_payment.clone(),
    )
}

/// GET `/expense-entries` - List expense entries (paginated).
async fn list_expenses(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListExpensesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = query.page_request();
    let filter = query.filter()?;

    let (entries, total) = repository(&state)
        .list(filter, page.offset(), page.limit())
        .await?;

    Ok(Json(PageResponse::new(entries, &page, total)))
}

/// GET `/expense-entries/{name}` - Get one expense entry.
async fn get_expense(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = repository(&state)
        .find(&name)
        .await?
        .ok_or(ExpenseError::NotFound(name))?;

    Ok(Json(entry))
}

/// POST `/expense-entries` - Create a draft expense entry.
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ExpenseEntryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(UserRole::can_submit)?;

    let saved = repository(&state)
        .create(payload.into(), auth.user_id())
        .await?;

    Ok((StatusCode::CREATED, Json(ExpenseEntryResponse::from(saved))))
}

/// PUT `/expense-entries/{name}` - Update an expense entry.
async fn update_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(name): Path<String>,
    Json(payload): Json<ExpenseEntryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(UserRole::can_submit)?;

    let saved = repository(&state).update(&name, payload.into()).await?;

    Ok(Json(ExpenseEntryResponse::from(saved)))
}

/// POST `/expense-entries/{name}/submit` - Submit for approval.
async fn submit_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(UserRole::can_submit)?;

    let saved = repository(&state).submit(&name).await?;

    Ok(Json(ExpenseEntryResponse::from(saved)))
}

/// POST `/expense-entries/{name}/approve` - Approve and post the journal entry.
async fn approve_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(UserRole::can_approve)?;

    let saved = repository(&state).approve(&name, auth.user_id()).await?;

    Ok(Json(ExpenseEntryResponse::from(saved)))
}

/// POST `/expense-entries/{name}/cancel` - Cancel and remove the journal entry.
async fn cancel_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(UserRole::can_approve)?;

    let entry = repository(&state).cancel(&name).await?;

    Ok(Json(entry))
}

/// POST `/expense-entries/{name}/journal-entry` - Create the journal entry on demand.
async fn make_journal_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(UserRole::can_approve)?;

    let journal_entry = repository(&state).make_journal_entry(&name).await?;

    let status = if journal_entry.is_some() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(json!({ "journal_entry": journal_entry }))))
}
