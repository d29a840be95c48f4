//! HTTP handlers for lifecycle events

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use smtpcred_core::{ErrorCode, RequestId, ServiceError};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::event::LifecycleEvent;
use crate::handler::LifecycleHandler;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-amz-request-id");
const EXTENDED_REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-amz-id-2");

/// State for lifecycle handlers
pub struct LifecycleState {
    pub handler: LifecycleHandler,
}

impl LifecycleState {
    pub fn new(handler: LifecycleHandler) -> Self {
        Self { handler }
    }
}

/// Handle a lifecycle event posted as JSON
pub async fn handle_event(State(state): State<Arc<LifecycleState>>, body: Bytes) -> Response {
    let event: LifecycleEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "Malformed lifecycle event");
            let error = ServiceError::new(
                ErrorCode::ValidationException,
                format!("Malformed lifecycle event: {}", e),
            );
            return error_response(error, &RequestId::new());
        }
    };

    let request_id = event
        .request_id
        .as_deref()
        .map(RequestId::with_id)
        .unwrap_or_default();

    match state.handler.handle(&event).await {
        Ok(response) => match serde_json::to_string(&response) {
            Ok(body) => {
                info!(
                    request_id = %request_id.id,
                    physical_resource_id = %response.physical_resource_id,
                    "Lifecycle event succeeded"
                );
                json_response(StatusCode::OK, &request_id, body)
            }
            Err(e) => {
                error!(request_id = %request_id.id, error = %e, "Failed to serialize lifecycle response");
                let error = ServiceError::new(
                    ErrorCode::ServiceException,
                    format!("Failed to serialize response: {}", e),
                );
                error_response(error, &request_id)
            }
        },
        Err(e) => {
            warn!(request_id = %request_id.id, error = %e, "Lifecycle event failed");
            error_response(e.to_service_error(), &request_id)
        }
    }
}

fn error_response(error: ServiceError, request_id: &RequestId) -> Response {
    let status = StatusCode::from_u16(error.code.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let error = error.with_request_id(request_id.id.clone());
    json_response(status, request_id, error.to_json())
}

fn json_response(status: StatusCode, request_id: &RequestId, body: String) -> Response {
    let mut response = (status, [(header::CONTENT_TYPE, "application/json")], body).into_response();
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&request_id.id) {
        headers.insert(REQUEST_ID_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&request_id.extended_id) {
        headers.insert(EXTENDED_REQUEST_ID_HEADER, value);
    }
    response
}
