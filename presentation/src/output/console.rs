//! Console output formatter for translation results

use crate::http::models::TranslateResponse;
use colored::Colorize;
use polyglot_domain::{ParseFailure, ParsedTranslation, ResponseProtocol};

/// Formats translation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete translation
    pub fn format(result: &ParsedTranslation, target_language: &str) -> String {
        let protocol = ResponseProtocol::current();
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Translation to {}", target_language)));
        output.push('\n');

        output.push_str(&Self::section_header("Translated Code"));
        output.push('\n');
        output.push_str(result.translated_code());
        output.push('\n');

        if !result.synthesis_points().is_empty() {
            output.push_str(&Self::section_header("Synthesis Points"));
            for point in result.synthesis_points() {
                output.push_str(&format!(
                    "\n{} {}\n  {} {} {}\n",
                    protocol.bullet.green(),
                    point.pattern_name.yellow().bold(),
                    point.source_approach,
                    protocol.arrow.cyan(),
                    point.target_approach
                ));
                if let Some(rationale) = &point.rationale {
                    output.push_str(&format!(
                        "  {} {}\n",
                        protocol.rationale_label.dimmed(),
                        rationale
                    ));
                }
            }
        }

        if !result.key_insight().is_empty() {
            output.push_str(&Self::section_header("Key Insight"));
            output.push_str(&format!("\n{}\n", result.key_insight()));
        }

        let tradeoffs = result.tradeoffs();
        let labels = protocol.trade_off_labels;
        let lines = [
            (labels.gained, &tradeoffs.gained),
            (labels.lost, &tradeoffs.lost),
            (labels.mitigation, &tradeoffs.mitigation),
        ];
        if lines.iter().any(|(_, value)| value.is_some()) {
            output.push_str(&Self::section_header("Trade-offs"));
            output.push('\n');
            for (label, value) in lines {
                if let Some(value) = value {
                    output.push_str(&format!("{} {}\n", label.cyan().bold(), value));
                }
            }
        }

        output.push_str(&Self::footer());

        output
    }

    /// Only the translated code (for piping)
    pub fn format_code_only(result: &ParsedTranslation) -> String {
        let code = result.translated_code();
        if code.ends_with('\n') {
            code.to_string()
        } else {
            format!("{}\n", code)
        }
    }

    /// Format as JSON, in the same shape the HTTP endpoint returns
    pub fn format_json(result: &ParsedTranslation) -> String {
        serde_json::to_string_pretty(&TranslateResponse::parsed(result.clone()))
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// A reply that did not follow the response protocol: a warning, then
    /// the raw text so nothing the model produced is lost.
    pub fn format_protocol_failure(failure: &ParseFailure) -> String {
        format!(
            "{} {}\n\n{}\n",
            "warning:".yellow().bold(),
            failure,
            failure.raw_text
        )
    }

    /// JSON form of a protocol failure, matching the HTTP endpoint
    pub fn format_protocol_failure_json(failure: &ParseFailure) -> String {
        serde_json::to_string_pretty(&TranslateResponse::protocol_failure(failure.clone()))
            .unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
