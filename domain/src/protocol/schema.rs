//! The five-section response protocol shared by composer and parser.

use serde::Serialize;

/// One of the four section headers the parser searches for, in protocol order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    TranslatedCode,
    SynthesisPoints,
    KeyInsight,
    TradeOffs,
}

impl Marker {
    /// All markers in the order they must appear in a reply
    pub const ALL: [Marker; 4] = [
        Marker::TranslatedCode,
        Marker::SynthesisPoints,
        Marker::KeyInsight,
        Marker::TradeOffs,
    ];
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(ResponseProtocol::current().marker(*self))
    }
}

/// Labels of the three trade-off lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeOffLabels {
    pub gained: &'static str,
    pub lost: &'static str,
    pub mitigation: &'static str,
}

/// A named, versioned definition of the reply format.
///
/// The composer renders it into the prompt and the parser searches the reply
/// for the same literals, so a protocol change is a new constant here and
/// nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseProtocol {
    pub version: &'static str,
    /// Prefix of the first header; the rendered header is
    /// `TRANSLATED CODE (<target>):`
    pub translated_code: &'static str,
    pub synthesis_points: &'static str,
    pub key_insight: &'static str,
    pub trade_offs: &'static str,
    /// Horizontal rule separating sections
    pub rule: &'static str,
    /// Bullet that opens each synthesis point. Alternates are accepted when
    /// parsing but never rendered.
    pub bullet: &'static str,
    pub alternate_bullets: &'static [&'static str],
    pub arrow: &'static str,
    pub alternate_arrow: &'static str,
    pub rationale_label: &'static str,
    pub trade_off_labels: TradeOffLabels,
    /// Shortest backtick run that opens a fenced code block
    pub min_fence: usize,
}

impl ResponseProtocol {
    pub const V1: ResponseProtocol = ResponseProtocol {
        version: "v1",
        translated_code: "TRANSLATED CODE",
        synthesis_points: "SYNTHESIS POINTS:",
        key_insight: "KEY INSIGHT:",
        trade_offs: "TRADE-OFFS:",
        rule: "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━",
        bullet: "✓",
        alternate_bullets: &["✔", "✅"],
        arrow: "→",
        alternate_arrow: "->",
        rationale_label: "Rationale:",
        trade_off_labels: TradeOffLabels {
            gained: "GAINED:",
            lost: "LOST:",
            mitigation: "MITIGATION:",
        },
        min_fence: 3,
    };

    /// Protocol used when none is chosen explicitly
    pub const fn current() -> &'static ResponseProtocol {
        &Self::V1
    }

    /// The literal the parser searches for
    pub fn marker(&self, marker: Marker) -> &'static str {
        match marker {
            Marker::TranslatedCode => self.translated_code,
            Marker::SynthesisPoints => self.synthesis_points,
            Marker::KeyInsight => self.key_insight,
            Marker::TradeOffs => self.trade_offs,
        }
    }

    /// Decoration printed before each header in the rendered template.
    /// Not part of the marker, so replies without it still parse.
    pub fn decoration(&self, marker: Marker) -> &'static str {
        match marker {
            Marker::TranslatedCode => "✨",
            Marker::SynthesisPoints => "🧠",
            Marker::KeyInsight => "💡",
            Marker::TradeOffs => "⚖️",
        }
    }

    /// Rendered first header, e.g. `TRANSLATED CODE (Haskell):`
    pub fn translated_code_header(&self, target_language: &str) -> String {
        format!("{} ({}):", self.translated_code, target_language)
    }

    /// Whether `line` is a section separator.
    ///
    /// Any line made only of the rule's character counts, so a model that
    /// shortens or lengthens the rule is still understood.
    pub fn is_rule(&self, line: &str) -> bool {
        let Some(rule_char) = self.rule.chars().next() else {
            return false;
        };
        let trimmed = line.trim();
        !trimmed.is_empty() && trimmed.chars().all(|c| c == rule_char)
    }

    /// Strip a leading bullet token, returning the remainder if `line` opens
    /// a synthesis point.
    pub fn strip_bullet<'a>(&self, line: &'a str) -> Option<&'a str> {
        let trimmed = line.trim_start();
        std::iter::once(self.bullet)
            .chain(self.alternate_bullets.iter().copied())
            .find_map(|bullet| trimmed.strip_prefix(bullet))
            .map(str::trim)
    }
}
