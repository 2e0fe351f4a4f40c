//! HTTP request handlers for the SplitBill API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{allocate_split, auto_split, round_amount, validate_split};
use crate::error::EngineError;
use crate::models::{Expense, NewExpense, SplitLine};

use super::request::{
    CreateExpenseRequest, DeleteExpenseQuery, GroupsQuery, SplitPreviewRequest,
    ValidateSplitRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, HealthResponse, SplitPreviewResponse, ValidateSplitResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/groups", get(member_groups_handler))
        .route("/api/groups/:group_id", get(group_handler))
        .route("/api/groups/:group_id/participants", get(participants_handler))
        .route("/api/splits/preview", post(preview_split_handler))
        .route("/api/splits/validate", post(validate_split_handler))
        .route("/api/expenses", post(create_expense_handler))
        .route("/api/expenses/group/:group_id", get(list_expenses_handler))
        .route(
            "/api/expenses/:expense_id",
            get(get_expense_handler).delete(delete_expense_handler),
        )
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn json_rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

/// Logs a failed request and converts the error into a response.
fn failure(correlation_id: Uuid, operation: &str, error: impl Into<ApiErrorResponse>) -> Response {
    let api_error: ApiErrorResponse = error.into();
    warn!(
        correlation_id = %correlation_id,
        operation,
        status = api_error.status.as_u16(),
        code = %api_error.error.code,
        error = %api_error.error.message,
        "Request failed"
    );
    api_error.into_response()
}

/// Handler for GET /api/health.
async fn health_handler() -> impl IntoResponse {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok".to_string(),
        },
    )
}

/// Handler for GET /api/groups?member=<participant>.
///
/// Lists the groups the participant belongs to.
async fn member_groups_handler(
    State(state): State<AppState>,
    query: Result<Query<GroupsQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let member = match query {
        Ok(Query(query)) => query.member,
        Err(rejection) => {
            return failure(
                correlation_id,
                "list_groups",
                ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text())),
            );
        }
    };
    info!(correlation_id = %correlation_id, member = %member, "Listing groups for member");

    json_response(StatusCode::OK, state.directory().groups_for(&member))
}

/// Handler for GET /api/groups/:group_id.
async fn group_handler(State(state): State<AppState>, Path(group_id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, group_id = %group_id, "Fetching group");

    match state.directory().group(&group_id) {
        Ok(group) => json_response(StatusCode::OK, group),
        Err(err) => failure(correlation_id, "get_group", err),
    }
}

/// Handler for GET /api/groups/:group_id/participants.
async fn participants_handler(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, group_id = %group_id, "Fetching participants");

    match state.directory().participants(&group_id) {
        Ok(participants) => json_response(StatusCode::OK, participants),
        Err(err) => failure(correlation_id, "list_participants", err),
    }
}

/// Handler for POST /api/splits/preview.
///
/// Computes the split a form would show for the current total, selection and
/// manual entries. Nothing is stored.
async fn preview_split_handler(
    State(state): State<AppState>,
    payload: Result<Json<SplitPreviewRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing split preview");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_error(correlation_id, rejection).into_response(),
    };

    let start_time = Instant::now();
    let allocation = match request
        .to_split_input()
        .and_then(|input| allocate_split(&input, state.policy()))
    {
        Ok(allocation) => allocation,
        Err(err) => return failure(correlation_id, "preview_split", err),
    };

    info!(
        correlation_id = %correlation_id,
        participants = allocation.lines.len(),
        auto_count = allocation.auto_count,
        remaining = %allocation.remaining,
        duration_us = start_time.elapsed().as_micros(),
        "Split preview completed"
    );
    json_response(StatusCode::OK, SplitPreviewResponse::new(allocation))
}

/// Handler for POST /api/splits/validate.
async fn validate_split_handler(
    State(state): State<AppState>,
    payload: Result<Json<ValidateSplitRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing split validation");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_error(correlation_id, rejection).into_response(),
    };

    let result = request.parsed_total().and_then(|total| {
        validate_split(total, &request.participants, &request.lines, state.policy())
    });

    match result {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                lines = request.lines.len(),
                "Split is valid"
            );
            json_response(StatusCode::OK, ValidateSplitResponse { valid: true })
        }
        Err(err) => failure(correlation_id, "validate_split", err),
    }
}

/// Handler for POST /api/expenses.
async fn create_expense_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateExpenseRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing expense creation");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_error(correlation_id, rejection).into_response(),
    };

    if request.description.trim().is_empty() {
        return failure(
            correlation_id,
            "create_expense",
            ApiErrorResponse::bad_request(ApiError::validation_error("description must not be empty")),
        );
    }

    match create_expense(&state, request) {
        Ok(expense) => {
            info!(
                correlation_id = %correlation_id,
                expense_id = %expense.id,
                group_id = %expense.group_id,
                amount = %expense.amount,
                lines = expense.splits.len(),
                "Expense created"
            );
            json_response(StatusCode::CREATED, expense)
        }
        Err(err) => failure(correlation_id, "create_expense", err),
    }
}

/// Checks membership, settles the split, validates it, and stores the expense.
fn create_expense(state: &AppState, request: CreateExpenseRequest) -> Result<Expense, EngineError> {
    let group = state.directory().group(&request.group_id)?;

    let non_member = std::iter::once(&request.paid_by)
        .chain(request.participants.iter())
        .find(|id| !group.is_member(id));
    if let Some(participant_id) = non_member {
        return Err(EngineError::NotAGroupMember {
            group_id: group.id,
            participant_id: participant_id.clone(),
        });
    }

    let policy = state.policy();
    let input = request.to_split_input()?;
    // Client lines are stored at the policy's scale, like computed ones.
    let splits = match request.splits {
        Some(lines) => lines
            .into_iter()
            .map(|line| SplitLine::new(line.participant_id, round_amount(line.amount, policy)))
            .collect(),
        None => auto_split(&input, policy)?,
    };
    validate_split(input.total, &input.participants, &splits, policy)?;

    state.store().insert(NewExpense {
        description: request.description.trim().to_string(),
        amount: round_amount(input.total, policy),
        group_id: group.id,
        paid_by: request.paid_by,
        splits,
        category: request.category.unwrap_or_else(|| "general".to_string()),
        notes: request.notes.unwrap_or_default(),
    })
}

/// Handler for GET /api/expenses/group/:group_id.
async fn list_expenses_handler(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, group_id = %group_id, "Listing expenses");

    let result = state
        .directory()
        .group(&group_id)
        .and_then(|group| state.store().list_for_group(&group.id));

    match result {
        Ok(expenses) => json_response(StatusCode::OK, expenses),
        Err(err) => failure(correlation_id, "list_expenses", err),
    }
}

/// Parses an expense id from the path; an unparseable id cannot exist.
fn parse_expense_id(raw: &str) -> Result<Uuid, EngineError> {
    Uuid::parse_str(raw).map_err(|_| EngineError::ExpenseNotFound {
        expense_id: raw.to_string(),
    })
}

/// Handler for GET /api/expenses/:expense_id.
async fn get_expense_handler(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, expense_id = %expense_id, "Fetching expense");

    match parse_expense_id(&expense_id).and_then(|id| state.store().get(id)) {
        Ok(expense) => json_response(StatusCode::OK, expense),
        Err(err) => failure(correlation_id, "get_expense", err),
    }
}

/// Handler for DELETE /api/expenses/:expense_id?requested_by=<participant>.
///
/// Only the participant who paid may delete an expense.
async fn delete_expense_handler(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
    query: Result<Query<DeleteExpenseQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, expense_id = %expense_id, "Deleting expense");

    let requested_by = match query {
        Ok(Query(query)) => query.requested_by,
        Err(rejection) => {
            return failure(
                correlation_id,
                "delete_expense",
                ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text())),
            );
        }
    };

    match delete_expense(&state, &expense_id, &requested_by) {
        Ok(expense) => {
            info!(
                correlation_id = %correlation_id,
                expense_id = %expense.id,
                requested_by = %requested_by,
                "Expense deleted"
            );
            json_response(StatusCode::OK, expense)
        }
        Err(err) => failure(correlation_id, "delete_expense", err),
    }
}

fn delete_expense(state: &AppState, expense_id: &str, requested_by: &str) -> Result<Expense, EngineError> {
    let id = parse_expense_id(expense_id)?;
    let expense = state.store().get(id)?;
    if expense.paid_by != requested_by {
        return Err(EngineError::DeleteNotPermitted {
            expense_id: id.to_string(),
            participant_id: requested_by.to_string(),
        });
    }
    state.store().remove(id)
}
