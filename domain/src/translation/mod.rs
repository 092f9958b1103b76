//! Translation domain
//!
//! - [`request::TranslationRequest`]: validated inbound request
//! - [`outcome::CompletionOutcome`]: result of one call to the completion service
//! - [`result::ParsedTranslation`] / [`result::ParseFailure`]: parsed reply

pub mod outcome;
pub mod request;
pub mod result;
