use axum::{
	Json, Router,
	extract::{State, rejection::JsonRejection},
	http::{HeaderMap, StatusCode, header::AUTHORIZATION},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;
use serde_json::Value;

use brainhub_service::{
	Analysis, AnalyzeRequest, CaptureRequest, ChatReply, ChatRequest, Error as ServiceError,
	KnowledgeItem, SearchRequest,
};

use crate::state::AppState;

const CHAT_FAILURE: &str = "Failed to process your request.";

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/search", post(search))
		.route("/api/analyze", post(analyze))
		.route("/api/knowledge", get(list_knowledge).post(capture_knowledge))
		.route("/api/chat", post(chat))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

/// Always answers with a JSON array. Only the status tells a caller error from a server error.
async fn search(
	State(state): State<AppState>,
	payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Response {
	let Json(req) = match payload {
		Ok(payload) => payload,
		Err(rejection) => {
			tracing::warn!(error = %rejection, "Rejected malformed search payload.");

			return empty_array(StatusCode::BAD_REQUEST);
		},
	};

	match state.service.search(req).await {
		Ok(found) => Json(found).into_response(),
		Err(ServiceError::InvalidRequest { message }) => {
			tracing::warn!(%message, "Rejected search request.");

			empty_array(StatusCode::BAD_REQUEST)
		},
		Err(err) => {
			tracing::error!(error = %err, "Critical search error.");

			empty_array(StatusCode::INTERNAL_SERVER_ERROR)
		},
	}
}

async fn analyze(
	State(state): State<AppState>,
	payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<Analysis>, ApiError> {
	let Json(req) = payload?;
	let analysis = state.service.analyze(req).await.inspect_err(|err| {
		tracing::error!(error = %err, "Analyze failed.");
	})?;

	Ok(Json(analysis))
}

async fn list_knowledge(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Json<Vec<KnowledgeItem>>, ApiError> {
	let user_id = state.service.authenticate(authorization(&headers)).await?;
	let items = state.service.list(&user_id, None).await?;

	Ok(Json(items))
}

async fn capture_knowledge(
	State(state): State<AppState>,
	headers: HeaderMap,
	payload: Result<Json<CaptureRequest>, JsonRejection>,
) -> Result<Json<KnowledgeItem>, ApiError> {
	let user_id = state.service.authenticate(authorization(&headers)).await?;
	let Json(req) = payload?;
	let item = state.service.capture(&user_id, req).await.inspect_err(|err| {
		tracing::error!(error = %err, "Capture failed.");
	})?;

	Ok(Json(item))
}

async fn chat(
	State(state): State<AppState>,
	headers: HeaderMap,
	payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
	let Json(req) = payload?;
	let reply = state.service.chat(authorization(&headers), req).await.map_err(|err| {
		tracing::error!(error = %err, "Chat failed.");

		json_error(StatusCode::INTERNAL_SERVER_ERROR, "CHAT_FAILED", CHAT_FAILURE)
	})?;

	Ok(Json(reply))
}

fn authorization(headers: &HeaderMap) -> Option<&str> {
	headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok())
}

fn empty_array(status: StatusCode) -> Response {
	(status, Json(Vec::<Value>::new())).into_response()
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
	error_code: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

pub fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
	ApiError::new(status, code, message)
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let message = err.message().to_string();

		match err {
			ServiceError::InvalidRequest { .. } =>
				json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message),
			ServiceError::Unauthorized { .. } =>
				json_error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message),
			ServiceError::Provider { .. } =>
				json_error(StatusCode::INTERNAL_SERVER_ERROR, "PROVIDER_ERROR", message),
			ServiceError::Storage { .. } =>
				json_error(StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", message),
		}
	}
}

impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", rejection.body_text())
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error: self.message, error_code: self.error_code };

		(self.status, Json(body)).into_response()
	}
}
