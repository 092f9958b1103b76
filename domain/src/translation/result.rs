//! Parsed translation value objects.

use crate::core::string::truncate_chars;
use crate::protocol::Marker;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// One source-pattern to target-pattern mapping emitted by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisPoint {
    pub pattern_name: String,
    pub source_approach: String,
    pub target_approach: String,
    /// `None` when the entry had no parseable `Rationale:` line
    #[serde(serialize_with = "empty_if_none")]
    pub rationale: Option<String>,
}

/// The three labelled trade-off lines. Each is optional because the model
/// may drop one while still following the rest of the protocol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TradeOffs {
    #[serde(serialize_with = "empty_if_none")]
    pub gained: Option<String>,
    #[serde(serialize_with = "empty_if_none")]
    pub lost: Option<String>,
    #[serde(serialize_with = "empty_if_none")]
    pub mitigation: Option<String>,
}

impl TradeOffs {
    pub fn is_complete(&self) -> bool {
        self.gained.is_some() && self.lost.is_some() && self.mitigation.is_some()
    }
}

/// A reply that followed the response protocol (Value Object)
///
/// Constructed only by the response parser and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTranslation {
    translated_code: String,
    synthesis_points: Vec<SynthesisPoint>,
    key_insight: String,
    tradeoffs: TradeOffs,
    protocol_version: &'static str,
    #[serde(skip)]
    raw_text: String,
}

impl ParsedTranslation {
    pub(crate) fn new(
        translated_code: String,
        synthesis_points: Vec<SynthesisPoint>,
        key_insight: String,
        tradeoffs: TradeOffs,
        protocol_version: &'static str,
        raw_text: String,
    ) -> Self {
        Self {
            translated_code,
            synthesis_points,
            key_insight,
            tradeoffs,
            protocol_version,
            raw_text,
        }
    }

    pub fn translated_code(&self) -> &str {
        &self.translated_code
    }

    pub fn synthesis_points(&self) -> &[SynthesisPoint] {
        &self.synthesis_points
    }

    pub fn key_insight(&self) -> &str {
        &self.key_insight
    }

    pub fn tradeoffs(&self) -> &TradeOffs {
        &self.tradeoffs
    }

    pub fn protocol_version(&self) -> &'static str {
        self.protocol_version
    }

    /// The reply exactly as the completion service returned it
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

/// How a reply broke the section protocol.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolViolation {
    #[error("missing section marker '{0}'")]
    MissingMarker(Marker),

    #[error("section marker '{marker}' appears before '{after}'")]
    MisorderedMarker { marker: Marker, after: Marker },
}

impl ProtocolViolation {
    /// The first marker that could not be found in order
    pub fn marker(&self) -> Marker {
        match self {
            ProtocolViolation::MissingMarker(marker) => *marker,
            ProtocolViolation::MisorderedMarker { marker, .. } => *marker,
        }
    }
}

/// A reply that did not follow the protocol.
///
/// Carries the raw text so a human can still recover the content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Model reply does not follow response protocol {protocol_version}: {violation}")]
pub struct ParseFailure {
    pub violation: ProtocolViolation,
    pub protocol_version: &'static str,
    pub raw_text: String,
}

impl ParseFailure {
    /// Short preview of the raw reply for logs and warnings
    pub fn preview(&self, max_chars: usize) -> String {
        truncate_chars(self.raw_text.trim(), max_chars)
    }
}

fn empty_if_none<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}
