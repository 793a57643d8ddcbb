use std::cell::RefCell;

use anyhow::Result;
use serde_json::Value;

use super::{ApiRequest, ApiResponse};

/// Carries requests to the backend. Retries and timeouts belong to the
/// implementation, not to the forms that produce requests.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse<Value>>;
}

/// Sends `request` and logs the outcome.
pub fn send(transport: &dyn Transport, request: &ApiRequest) -> Result<ApiResponse<Value>> {
    tracing::info!(endpoint = ?request.endpoint, method = %request.method, "sending request");
    let response = transport.send(request)?;
    if response.success {
        tracing::info!(endpoint = ?request.endpoint, "request accepted");
    } else {
        tracing::warn!(endpoint = ?request.endpoint, message = %response.message, "request rejected");
    }
    Ok(response)
}

/// Keeps every request and answers with a fixed response. Used for dry runs
/// and tests.
#[derive(Debug)]
pub struct RecordingTransport {
    requests: RefCell<Vec<ApiRequest>>,
    reply: ApiResponse<Value>,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::replying(ApiResponse::ok("accepted", None))
    }
}

impl RecordingTransport {
    pub fn replying(reply: ApiResponse<Value>) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            reply,
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse<Value>> {
        self.requests.borrow_mut().push(request.clone());
        Ok(self.reply.clone())
    }
}
