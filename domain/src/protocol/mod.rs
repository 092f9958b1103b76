//! Response protocol domain
//!
//! The reply format is a versioned constant ([`ResponseProtocol::V1`]) read
//! by both the prompt template and the [`ResponseParser`].

pub mod parsing;
pub mod schema;

pub use parsing::{ResponseParser, parse_translation_response};
pub use schema::{Marker, ResponseProtocol, TradeOffLabels};
