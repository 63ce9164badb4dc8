use reqwest::StatusCode;
use serde::Serialize;
use serde_json::json;

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// What the caller learns about an invocation. Nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Outcome {
    #[display("Success.")]
    Success,
    #[display("Error occurred.")]
    Failure,
}

impl Outcome {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Outcome::Success => StatusCode::OK,
            Outcome::Failure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The HTTP-style response handed back to the Lambda runtime.
/// Built fresh for every invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub is_base64_encoded: bool,
    pub headers: ResponseHeaders,
    pub status_code: u16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseHeaders {
    #[serde(rename = "Content-Type")]
    pub content_type: String,
    #[serde(rename = "Access-Control-Allow-Origin")]
    pub allow_origin: String,
}

impl InvocationResponse {
    pub fn new(outcome: Outcome, allowed_origin: &str) -> Self {
        InvocationResponse {
            is_base64_encoded: false,
            headers: ResponseHeaders {
                content_type: CONTENT_TYPE_JSON.to_string(),
                allow_origin: allowed_origin.to_string(),
            },
            status_code: outcome.status_code().as_u16(),
            body: json!({ "result": outcome.to_string() }).to_string(),
        }
    }

    pub fn success(allowed_origin: &str) -> Self {
        Self::new(Outcome::Success, allowed_origin)
    }

    pub fn failure(allowed_origin: &str) -> Self {
        Self::new(Outcome::Failure, allowed_origin)
    }
}
