use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::form::FormError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Post,
    Put,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Post => f.write_str("POST"),
            Method::Put => f.write_str("PUT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    RegisterUser,
    ForgotPassword,
    AddCustomer,
    UpdateBusiness,
    AddInvoiceItem,
}

impl Endpoint {
    pub fn method(self) -> Method {
        match self {
            Endpoint::UpdateBusiness => Method::Put,
            _ => Method::Post,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::RegisterUser => "/auth/register",
            Endpoint::ForgotPassword => "/auth/forgot-password",
            Endpoint::AddCustomer => "/customers",
            Endpoint::UpdateBusiness => "/business",
            Endpoint::AddInvoiceItem => "/invoices/items",
        }
    }
}

/// Base URI and request timeout shared by every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_uri: String,
    #[serde(with = "timeout_secs")]
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_uri: "http://localhost:8080/api".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ApiConfig {
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_uri.trim_end_matches('/'), endpoint.path())
    }
}

mod timeout_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub method: Method,
    pub body: Value,
}

impl ApiRequest {
    pub fn new<T: Serialize>(endpoint: Endpoint, payload: &T) -> Result<Self, FormError> {
        let body = serde_json::to_value(payload).map_err(FormError::payload)?;
        Ok(Self {
            endpoint,
            method: endpoint.method(),
            body,
        })
    }
}

/// The `{success, message, data?}` envelope every endpoint answers with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ApiError::Rejected {
                message: self.message,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Rejected { message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Rejected { message } if message.is_empty() => {
                write!(f, "request rejected by server")
            }
            ApiError::Rejected { message } => write!(f, "request rejected: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_without_data_deserializes() {
        let response: ApiResponse<Value> =
            serde_json::from_value(json!({"success": false, "message": "Email taken"})).unwrap();
        assert_eq!(
            response.into_result().unwrap_err().to_string(),
            "request rejected: Email taken"
        );
    }

    #[test]
    fn urls_join_without_double_slash() {
        let config = ApiConfig {
            base_uri: "https://api.example.com/v1/".into(),
            ..ApiConfig::default()
        };
        assert_eq!(
            config.url(Endpoint::AddCustomer),
            "https://api.example.com/v1/customers"
        );
    }

    #[test]
    fn config_timeout_is_seconds() {
        let config: ApiConfig = serde_json::from_value(json!({"timeout": 5})).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.base_uri, ApiConfig::default().base_uri);
    }

    #[test]
    fn update_business_uses_put() {
        let request = ApiRequest::new(Endpoint::UpdateBusiness, &json!({"name": "Acme"})).unwrap();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.body, json!({"name": "Acme"}));
    }
}
