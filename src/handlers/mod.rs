use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::export;
use crate::state::AppState;
use crate::store::DEFAULT_LIST_LIMIT;
use crate::utils::error::AppError;
use crate::utils::response::created;
use crate::validate::{validate, TicketSubmission};

const EXPORT_DISPOSITION: &str = "attachment; filename=\"ticket-reservations.csv\"";

#[derive(Serialize)]
struct HealthPayload {
    ok: bool,
    store: bool,
}

pub async fn health_check(State(state): State<AppState>) -> Response {
    let payload = HealthPayload {
        ok: true,
        store: state.store.ping().await,
    };

    Json(payload).into_response()
}

pub async fn create_ticket(
    State(state): State<AppState>,
    Json(submission): Json<TicketSubmission>,
) -> Result<Response, AppError> {
    let ticket = validate(submission).map_err(AppError::Validation)?;
    let record = state.store.create(ticket).await?;

    // Fire-and-forget: the response never waits on SMTP, and a failed send
    // is logged inside the mailer.
    if let Some(mailer) = &state.mailer {
        let mailer = Arc::clone(mailer);
        let stored = record.clone();
        tokio::spawn(async move { mailer.notify(&stored).await });
    }

    Ok(created(record.id))
}

pub async fn list_tickets(State(state): State<AppState>) -> Result<Response, AppError> {
    let records = state.store.list(DEFAULT_LIST_LIMIT).await?;
    Ok(Json(records).into_response())
}

pub async fn export_tickets(State(state): State<AppState>) -> Result<Response, AppError> {
    let records = state.store.list_all().await?;
    let document = export::to_csv(&records);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, EXPORT_DISPOSITION),
        ],
        document,
    )
        .into_response())
}
