//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: validation errors raised before any network call
//! - [`string`]: small text helpers used when previewing model output

pub mod error;
pub mod string;
