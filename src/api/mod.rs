//! Request envelopes for the business REST API.
//!
//! Screens turn their collected state into an [`ApiRequest`]; a
//! [`Transport`] supplied by the caller decides how (and whether) it goes over
//! the wire.

mod envelope;
mod transport;

pub use envelope::{ApiConfig, ApiError, ApiRequest, ApiResponse, Endpoint, Method};
pub use transport::{RecordingTransport, Transport, send};
