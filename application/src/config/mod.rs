//! Application-level configuration.
//!
//! - [`RetryPolicy`]: bounded exponential backoff around the completion call

pub mod retry_policy;

pub use retry_policy::RetryPolicy;
