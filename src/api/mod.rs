//! HTTP API module for the SplitBill split engine.
//!
//! This module provides the REST endpoints for previewing and validating
//! splits and for recording, listing and deleting group expenses.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AmountText, CreateExpenseRequest, DeleteExpenseQuery, GroupsQuery, ManualEntryRequest,
    SplitPreviewRequest, ValidateSplitRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, HealthResponse, SplitPreviewResponse, ValidateSplitResponse,
};
pub use state::AppState;
