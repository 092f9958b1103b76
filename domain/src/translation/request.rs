//! Translation request value object and its validator.

use crate::core::error::DomainError;
use serde_json::{Map, Value};

/// Opaque secret authenticating calls to the completion service.
///
/// Never serialized. `Debug` and `Display` are redacted so the value cannot
/// leak through logging or error formatting.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw secret. Only the outbound HTTP adapter should call this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

impl std::fmt::Display for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// A required field of the inbound record: canonical name plus the short
/// alias older clients send.
struct RequestField {
    name: &'static str,
    alias: &'static str,
}

const CREDENTIAL: RequestField = RequestField {
    name: "credential",
    alias: "apiKey",
};
const SOURCE_LANGUAGE: RequestField = RequestField {
    name: "sourceLanguage",
    alias: "sourceLang",
};
const TARGET_LANGUAGE: RequestField = RequestField {
    name: "targetLanguage",
    alias: "targetLang",
};
const SOURCE_CODE: RequestField = RequestField {
    name: "sourceCode",
    alias: "code",
};

/// A validated request to translate a snippet (Value Object)
///
/// All four fields are non-empty after trimming. The source code is kept
/// verbatim; the language names and credential are stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    credential: Credential,
    source_language: String,
    target_language: String,
    source_code: String,
}

impl TranslationRequest {
    /// Build a request from typed parts, applying the same rules as
    /// [`TranslationRequest::from_value`].
    pub fn new(
        credential: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        source_code: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let credential = credential.into();
        let source_language = source_language.into();
        let target_language = target_language.into();
        let source_code = source_code.into();

        non_blank(&credential, &CREDENTIAL)?;
        non_blank(&source_language, &SOURCE_LANGUAGE)?;
        non_blank(&target_language, &TARGET_LANGUAGE)?;
        non_blank(&source_code, &SOURCE_CODE)?;

        Ok(Self {
            credential: Credential::new(credential.trim()),
            source_language: source_language.trim().to_string(),
            target_language: target_language.trim().to_string(),
            source_code,
        })
    }

    /// Validate an untyped inbound record.
    ///
    /// Fields are checked in the order credential, sourceLanguage,
    /// targetLanguage, sourceCode; the error names the first offender.
    /// `null` counts as absent.
    pub fn from_value(value: &Value) -> Result<Self, DomainError> {
        let record = value.as_object().ok_or(DomainError::NotAnObject)?;

        let credential = required_string(record, &CREDENTIAL)?;
        let source_language = required_string(record, &SOURCE_LANGUAGE)?;
        let target_language = required_string(record, &TARGET_LANGUAGE)?;
        let source_code = required_string(record, &SOURCE_CODE)?;

        Self::new(credential, source_language, target_language, source_code)
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn source_code(&self) -> &str {
        &self.source_code
    }
}

fn required_string<'a>(
    record: &'a Map<String, Value>,
    field: &RequestField,
) -> Result<&'a str, DomainError> {
    let value = record
        .get(field.name)
        .filter(|v| !v.is_null())
        .or_else(|| record.get(field.alias).filter(|v| !v.is_null()))
        .ok_or(DomainError::MissingField(field.name))?;

    let text = value.as_str().ok_or(DomainError::NotAString(field.name))?;
    non_blank(text, field)?;
    Ok(text)
}

fn non_blank(text: &str, field: &RequestField) -> Result<(), DomainError> {
    if text.trim().is_empty() {
        Err(DomainError::EmptyField(field.name))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_empty_credential() {
        let value = json!({
            "credential": "",
            "sourceLanguage": "JS",
            "targetLanguage": "Go",
            "sourceCode": "x"
        });
        let error = TranslationRequest::from_value(&value).unwrap_err();
        assert_eq!(error, DomainError::EmptyField("credential"));
        assert!(error.to_string().contains("credential"));
    }

    #[test]
    fn test_accepts_non_empty_credential() {
        let value = json!({
            "credential": "sk-test",
            "sourceLanguage": "JS",
            "targetLanguage": "Go",
            "sourceCode": "x"
        });
        let request = TranslationRequest::from_value(&value).unwrap();
        assert_eq!(request.credential().expose(), "sk-test");
        assert_eq!(request.source_language(), "JS");
        assert_eq!(request.target_language(), "Go");
        assert_eq!(request.source_code(), "x");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let value = json!({
            "credential": "k",
            "sourceLanguage": "   ",
            "targetLanguage": "Go",
            "sourceCode": "x"
        });
        assert_eq!(
            TranslationRequest::from_value(&value).unwrap_err(),
            DomainError::EmptyField("sourceLanguage")
        );
    }

    #[test]
    fn test_missing_and_null_fields() {
        let value = json!({ "credential": "k", "sourceLanguage": "JS", "targetLanguage": null });
        assert_eq!(
            TranslationRequest::from_value(&value).unwrap_err(),
            DomainError::MissingField("targetLanguage")
        );
    }

    #[test]
    fn test_non_string_field() {
        let value = json!({
            "credential": "k",
            "sourceLanguage": "JS",
            "targetLanguage": "Go",
            "sourceCode": 42
        });
        assert_eq!(
            TranslationRequest::from_value(&value).unwrap_err(),
            DomainError::NotAString("sourceCode")
        );
    }

    #[test]
    fn test_non_object_body() {
        assert_eq!(
            TranslationRequest::from_value(&json!(["not", "an", "object"])).unwrap_err(),
            DomainError::NotAnObject
        );
    }

    #[test]
    fn test_short_aliases_accepted() {
        let value = json!({
            "apiKey": "k",
            "sourceLang": "JavaScript",
            "targetLang": "Haskell",
            "code": "class X {}"
        });
        let request = TranslationRequest::from_value(&value).unwrap();
        assert_eq!(request.source_language(), "JavaScript");
        assert_eq!(request.source_code(), "class X {}");
    }

    #[test]
    fn test_canonical_name_wins_over_alias() {
        let value = json!({
            "credential": "canonical",
            "apiKey": "alias",
            "sourceLanguage": "JS",
            "targetLanguage": "Go",
            "sourceCode": "x"
        });
        let request = TranslationRequest::from_value(&value).unwrap();
        assert_eq!(request.credential().expose(), "canonical");
    }

    #[test]
    fn test_source_code_kept_verbatim() {
        let request = TranslationRequest::new("k", " Rust ", "Go", "  fn main() {}\n").unwrap();
        assert_eq!(request.source_language(), "Rust");
        assert_eq!(request.source_code(), "  fn main() {}\n");
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let request = TranslationRequest::new("sk-secret-value", "JS", "Go", "x").unwrap();
        let rendered = format!("{:?}", request);
        assert!(!rendered.contains("sk-secret-value"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_credential_display_is_redacted() {
        let credential = Credential::new("sk-secret-value");
        assert_eq!(credential.to_string(), "[REDACTED]");
        assert_eq!(format!("key={credential}"), "key=[REDACTED]");
        assert_eq!(credential.expose(), "sk-secret-value");
    }
}
