use crate::domain::crypto::generate_mesh_key;
use crate::domain::{Command, EncryptError, Message, StoreError, Unit};
use crate::interface_adapters::http::{ApiError, error_response};
use crate::interface_adapters::protocol::{
    AddUnitRequest, GeneratedKeyResponse, IssueCommandRequest, NetworkResponse,
    ReadMessagesRequest, SendMessageRequest,
};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::ids::unit_id;
use crate::use_cases::{MeshSnapshot, MessageView, render_messages};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::warn;

// Maps store errors to HTTP responses.
fn map_store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::DuplicateUnit(_) => error_response(StatusCode::CONFLICT, "unit already exists"),
        StoreError::EmptyTargets => {
            error_response(StatusCode::BAD_REQUEST, "targetUnitIds must not be empty")
        }
        StoreError::EmptyContent => error_response(StatusCode::BAD_REQUEST, "content is required"),
        StoreError::MessageNotFound(_) => error_response(StatusCode::NOT_FOUND, "message not found"),
        StoreError::CommandNotFound(_) => error_response(StatusCode::NOT_FOUND, "command not found"),
        StoreError::Encrypt(EncryptError::EmptyPassword) => {
            error_response(StatusCode::BAD_REQUEST, "encryption key is required")
        }
        StoreError::Encrypt(EncryptError::Cipher) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to encrypt message")
        }
    }
}

pub async fn list_units(State(state): State<Arc<AppState>>) -> Json<Vec<Unit>> {
    Json(state.store.units())
}

pub async fn add_unit(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddUnitRequest>,
) -> Result<(StatusCode, Json<Unit>), ApiError> {
    if payload.callsign.trim().is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "callsign is required"));
    }

    // Generate an id when the caller does not pin one.
    let id = payload
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(unit_id);
    let unit = state
        .store
        .deploy_unit(payload.into_unit(id))
        .map_err(map_store_error)?;
    Ok((StatusCode::CREATED, Json(unit)))
}

pub async fn get_mesh(State(state): State<Arc<AppState>>) -> Json<MeshSnapshot> {
    Json(state.store.snapshot().as_ref().clone())
}

pub async fn list_messages(State(state): State<Arc<AppState>>) -> Json<Vec<Message>> {
    Json(state.store.messages())
}

pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let result = if payload.encrypt {
        let key = state.resolve_key(payload.key.as_deref()).unwrap_or_default();
        state
            .store
            .send_encrypted_message(&payload.content, payload.priority, key)
    } else {
        state.store.send_message(payload.content, payload.priority)
    };

    let message = result
        .inspect_err(|err| warn!(error = %err, "message not sent"))
        .map_err(map_store_error)?;
    Ok((StatusCode::CREATED, Json(message)))
}

// Message log for display; envelopes that cannot be opened get a placeholder.
pub async fn read_messages(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ReadMessagesRequest>,
) -> Json<Vec<MessageView>> {
    let key = state.resolve_key(payload.key.as_deref());
    Json(render_messages(&state.store.messages(), key))
}

pub async fn ack_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    state
        .store
        .acknowledge_message(&id)
        .map(Json)
        .map_err(map_store_error)
}

pub async fn list_commands(State(state): State<Arc<AppState>>) -> Json<Vec<Command>> {
    Json(state.store.commands())
}

pub async fn issue_command(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<IssueCommandRequest>,
) -> Result<(StatusCode, Json<Command>), ApiError> {
    let command = state
        .store
        .issue_command(payload.into())
        .map_err(map_store_error)?;
    Ok((StatusCode::CREATED, Json(command)))
}

pub async fn ack_command(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Command>, ApiError> {
    state
        .store
        .acknowledge_command(&id)
        .map(Json)
        .map_err(map_store_error)
}

pub async fn get_network(State(state): State<Arc<AppState>>) -> Json<NetworkResponse> {
    Json(state.store.network().into())
}

pub async fn toggle_network(State(state): State<Arc<AppState>>) -> Json<NetworkResponse> {
    Json(state.store.toggle_network_mode().into())
}

pub async fn generate_key() -> (StatusCode, Json<GeneratedKeyResponse>) {
    (
        StatusCode::CREATED,
        Json(GeneratedKeyResponse {
            key: generate_mesh_key(),
        }),
    )
}
