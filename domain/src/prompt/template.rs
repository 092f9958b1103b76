//! Prompt template for the translation request

use crate::core::string::longest_run;
use crate::protocol::{Marker, ResponseProtocol};
use crate::translation::request::TranslationRequest;

/// The instruction text sent to the completion service.
///
/// Derived deterministically from one request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt(String);

impl ComposedPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Size in bytes, used for logging instead of the text itself
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ComposedPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the "cultural grammar synthesis" translation prompt.
pub struct TranslationPromptTemplate;

impl TranslationPromptTemplate {
    /// Compose the prompt for `request` using the current protocol
    pub fn compose(request: &TranslationRequest) -> ComposedPrompt {
        Self::compose_with(ResponseProtocol::current(), request)
    }

    /// Compose the prompt for `request` against an explicit protocol version
    pub fn compose_with(
        protocol: &ResponseProtocol,
        request: &TranslationRequest,
    ) -> ComposedPrompt {
        let source = request.source_language();
        let target = request.target_language();

        let mut prompt = format!(
            r#"You are a universal code translator using the "Cultural Grammar Synthesis" methodology.

Translate this {source} code to idiomatic {target} code.

CRITICAL INSTRUCTIONS:

1. IDENTIFY STRUCTURAL INVARIANTS (what MUST be preserved):
- State management patterns
- Effect handling patterns
- Composition patterns
- Control flow semantics
- Error handling semantics

2. EXTRACT SOURCE GRAMMAR:
- How does {source} organize these invariants?
- What paradigm patterns does it use?
- What are the idioms?

3. SYNTHESIZE TARGET GRAMMAR:
- How does {target} idiomatically express the same invariants?
- What are the native patterns?
- Translate paradigm, not just syntax

4. PRODUCE IDIOMATIC CODE:
- Must feel native to {target}
- Must preserve all semantic behavior
- Must be genuinely usable

Format your response EXACTLY like this:

"#
        );

        prompt.push_str(&Self::response_template(protocol, source, target));

        let code = request.source_code();
        let fence = fence_for(protocol, code);
        let info = fence_info(source);
        let newline = if code.ends_with('\n') { "" } else { "\n" };
        prompt.push_str(&format!(
            "\nSource code to translate:\n\n{fence}{info}\n{code}{newline}{fence}\n\n\
             Make the {target} code genuinely idiomatic and production-quality."
        ));

        ComposedPrompt(prompt)
    }

    /// The literal reply layout the model must reproduce, rendered from the
    /// protocol constant the parser also reads.
    pub fn response_template(protocol: &ResponseProtocol, source: &str, target: &str) -> String {
        let labels = protocol.trade_off_labels;
        let rule = protocol.rule;
        let bullet = protocol.bullet;
        let arrow = protocol.arrow;
        let rationale = protocol.rationale_label;
        let target_info = fence_info(target);

        let mut template = format!(
            "{} {}\n\n```{target_info}\n[Complete, idiomatic, working {target} code here]\n```\n\n{rule}\n\n",
            protocol.decoration(Marker::TranslatedCode),
            protocol.translated_code_header(target),
        );

        template.push_str(&format!(
            "{} {}\n\n",
            protocol.decoration(Marker::SynthesisPoints),
            protocol.synthesis_points,
        ));
        for n in 1..=2 {
            template.push_str(&format!(
                "{bullet} [Pattern {n}]: {source} [approach] {arrow} {target} [approach]\n\
                 {rationale} [Why this preserves the invariant]\n\n"
            ));
        }
        template.push_str(&format!("[Continue for all key transformations]\n\n{rule}\n\n"));

        template.push_str(&format!(
            "{} {}\n\n[2-3 sentences explaining what makes this translation work - the core paradigm shift]\n\n{rule}\n\n",
            protocol.decoration(Marker::KeyInsight),
            protocol.key_insight,
        ));

        template.push_str(&format!(
            "{} {}\n\n{} [What the target paradigm gives you]\n{} [What's different/harder]\n{} [How to address what's lost]\n\n{rule}\n",
            protocol.decoration(Marker::TradeOffs),
            protocol.trade_offs,
            labels.gained,
            labels.lost,
            labels.mitigation,
        ));

        template
    }
}

/// Choose a backtick fence that cannot be closed by anything inside `code`:
/// one backtick longer than the longest run in the code, never shorter than
/// the protocol's minimum.
pub fn fence_for(protocol: &ResponseProtocol, code: &str) -> String {
    "`".repeat((longest_run(code, '`') + 1).max(protocol.min_fence))
}

/// Info string for a fence: the language name without whitespace or
/// backticks, which would otherwise end the info string early.
fn fence_info(language: &str) -> String {
    language
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '`')
        .collect()
}
