//! Request/response bodies of the HTTP boundary

use polyglot_domain::{ParseFailure, ParsedTranslation};
use serde::{Deserialize, Serialize};

/// Body of every non-success response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Body of a 200 reply.
///
/// `translation` is always the raw model text. Exactly one of `result` and
/// `protocol_error` is present.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ParsedTranslation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_error: Option<String>,
}

impl TranslateResponse {
    pub fn parsed(result: ParsedTranslation) -> Self {
        Self {
            translation: result.raw_text().to_string(),
            result: Some(result),
            protocol_error: None,
        }
    }

    pub fn protocol_failure(failure: ParseFailure) -> Self {
        Self {
            protocol_error: Some(failure.to_string()),
            translation: failure.raw_text,
            result: None,
        }
    }
}
