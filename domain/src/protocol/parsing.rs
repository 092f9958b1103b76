//! Response parsing for the five-section reply protocol.
//!
//! Pure text processing, no I/O. The parser is strict about the four section
//! markers (present, in order) and tolerant about everything inside them:
//! a synthesis point without a rationale or a missing trade-off line is kept
//! as an empty optional rather than failing the parse, since the reply is
//! generated by a model that mostly, but not always, follows the format.

use super::schema::{Marker, ResponseProtocol};
use crate::core::string::leading_run;
use crate::translation::result::{
    ParseFailure, ParsedTranslation, ProtocolViolation, SynthesisPoint, TradeOffs,
};

/// Parses raw completion text against a [`ResponseProtocol`].
#[derive(Debug, Clone, Copy)]
pub struct ResponseParser<'p> {
    protocol: &'p ResponseProtocol,
}

impl Default for ResponseParser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser<'static> {
    /// Parser for the current protocol version
    pub fn new() -> Self {
        Self {
            protocol: ResponseProtocol::current(),
        }
    }
}

impl<'p> ResponseParser<'p> {
    pub fn with_protocol(protocol: &'p ResponseProtocol) -> Self {
        Self { protocol }
    }

    pub fn protocol(&self) -> &'p ResponseProtocol {
        self.protocol
    }

    /// Parse a reply into a [`ParsedTranslation`].
    ///
    /// Fails only when a section marker is missing or out of order; the
    /// failure carries the raw text and names the first offending marker.
    pub fn parse(&self, raw: &str) -> Result<ParsedTranslation, ParseFailure> {
        let positions = self.locate_markers(raw).map_err(|violation| ParseFailure {
            violation,
            protocol_version: self.protocol.version,
            raw_text: raw.to_string(),
        })?;

        let sections = self.split_sections(raw, &positions);

        let translated_code =
            extract_fenced_code(self.until_rule(sections[0]), self.protocol.min_fence);
        let synthesis_points = self.parse_synthesis_points(self.until_rule(sections[1]));
        let key_insight = strip_emphasis(self.until_rule(sections[2])).to_string();
        let tradeoffs = self.parse_tradeoffs(self.until_rule(sections[3]));

        Ok(ParsedTranslation::new(
            translated_code,
            synthesis_points,
            key_insight,
            tradeoffs,
            self.protocol.version,
            raw.to_string(),
        ))
    }

    /// Byte offsets of the four markers, searched strictly in order.
    fn locate_markers(&self, raw: &str) -> Result<[usize; 4], ProtocolViolation> {
        let mut positions = [0usize; 4];
        let mut cursor = 0;

        for (index, marker) in Marker::ALL.iter().enumerate() {
            let literal = self.protocol.marker(*marker);
            match raw[cursor..].find(literal) {
                Some(offset) => {
                    positions[index] = cursor + offset;
                    cursor = positions[index] + literal.len();
                }
                None if index > 0 && raw[..cursor].contains(literal) => {
                    return Err(ProtocolViolation::MisorderedMarker {
                        marker: *marker,
                        after: Marker::ALL[index - 1],
                    });
                }
                None => return Err(ProtocolViolation::MissingMarker(*marker)),
            }
        }

        Ok(positions)
    }

    /// Slice the reply into the body of each section.
    ///
    /// The first section starts on the line after its header (the header
    /// carries the target language); the others start right after the
    /// marker. Each section ends where the line holding the next marker
    /// begins, so decorations in front of a header are not included.
    fn split_sections<'r>(&self, raw: &'r str, positions: &[usize; 4]) -> [&'r str; 4] {
        let mut sections = [""; 4];

        for (index, marker) in Marker::ALL.iter().enumerate() {
            let marker_end = positions[index] + self.protocol.marker(*marker).len();
            let end = match positions.get(index + 1) {
                Some(&next) => {
                    let next_line = line_start(raw, next);
                    if next_line >= marker_end { next_line } else { next }
                }
                None => raw.len(),
            };
            let start = if *marker == Marker::TranslatedCode {
                line_end(raw, marker_end).min(end)
            } else {
                marker_end
            };
            sections[index] = &raw[start..end];
        }

        sections
    }

    /// Cut a section at its first horizontal rule.
    fn until_rule<'s>(&self, section: &'s str) -> &'s str {
        let mut offset = 0;
        for line in section.split_inclusive('\n') {
            if self.protocol.is_rule(line) {
                return &section[..offset];
            }
            offset += line.len();
        }
        section
    }

    fn parse_synthesis_points(&self, section: &str) -> Vec<SynthesisPoint> {
        let mut entries: Vec<Vec<&str>> = Vec::new();

        for line in section.lines() {
            if let Some(head) = self.protocol.strip_bullet(line) {
                entries.push(vec![head]);
            } else if let Some(entry) = entries.last_mut() {
                entry.push(line);
            }
        }

        entries
            .iter()
            .map(|entry| self.parse_synthesis_point(entry))
            .collect()
    }

    fn parse_synthesis_point(&self, entry: &[&str]) -> SynthesisPoint {
        let (pattern_name, source_approach, target_approach) = self.split_mapping(entry[0]);
        let label = self.protocol.rationale_label;

        let rationale = entry[1..]
            .iter()
            .enumerate()
            .find_map(|(index, line)| strip_label(line, label).map(|first| (index, first)))
            .and_then(|(index, first)| {
                let continuation = entry[2 + index..]
                    .iter()
                    .map(|line| line.trim())
                    .take_while(|line| !line.is_empty() && !is_placeholder(line));
                non_empty(join_words(std::iter::once(first).chain(continuation)))
            });

        SynthesisPoint {
            pattern_name,
            source_approach,
            target_approach,
            rationale,
        }
    }

    /// Split `Pattern: source approach → target approach`.
    ///
    /// Without a `Pattern:` prefix the source approach doubles as the
    /// pattern name; without an arrow the target approach is empty.
    fn split_mapping(&self, head: &str) -> (String, String, String) {
        let (left, target) = head
            .split_once(self.protocol.arrow)
            .or_else(|| head.split_once(self.protocol.alternate_arrow))
            .map(|(left, right)| (left.trim(), right.trim()))
            .unwrap_or((head.trim(), ""));

        let (name, source) = match left.split_once(": ") {
            Some((name, source)) => (name.trim().trim_matches('*').trim(), source.trim()),
            None => (left, left),
        };

        (name.to_string(), source.to_string(), target.to_string())
    }

    fn parse_tradeoffs(&self, section: &str) -> TradeOffs {
        let labels = self.protocol.trade_off_labels;
        let labels = [labels.gained, labels.lost, labels.mitigation];
        let mut captured: [Option<Vec<&str>>; 3] = [None, None, None];
        let mut current: Option<usize> = None;

        for line in section.lines() {
            let labelled = labels
                .iter()
                .enumerate()
                .find_map(|(index, label)| strip_label(line, label).map(|rest| (index, rest)));

            match labelled {
                // First occurrence wins; a duplicate stops capture.
                Some((index, rest)) if captured[index].is_none() => {
                    captured[index] = Some(vec![rest]);
                    current = Some(index);
                }
                Some(_) => current = None,
                None if line.trim().is_empty() || is_placeholder(line) => current = None,
                None => {
                    if let Some(parts) = current.and_then(|index| captured[index].as_mut()) {
                        parts.push(line.trim());
                    }
                }
            }
        }

        let [gained, lost, mitigation] =
            captured.map(|parts| parts.and_then(|parts| non_empty(join_words(parts))));

        TradeOffs {
            gained,
            lost,
            mitigation,
        }
    }
}

/// Parse a reply with the current protocol.
pub fn parse_translation_response(raw: &str) -> Result<ParsedTranslation, ParseFailure> {
    ResponseParser::new().parse(raw)
}

/// Contents of the first fenced block, or the trimmed section if it has none.
/// The block closes at a backtick-only line at least as long as its opening
/// fence; an unclosed block runs to the end of the section.
fn extract_fenced_code(section: &str, min_fence: usize) -> String {
    let lines: Vec<&str> = section.lines().collect();
    let Some(open) = lines
        .iter()
        .position(|line| leading_run(line.trim_start(), '`') >= min_fence)
    else {
        return section.trim().to_string();
    };

    let fence_len = leading_run(lines[open].trim_start(), '`');
    lines[open + 1..]
        .iter()
        .take_while(|line| {
            let trimmed = line.trim();
            !(trimmed.len() >= fence_len && trimmed.chars().all(|c| c == '`'))
        })
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_emphasis(text: &str) -> &str {
    text.trim().trim_start_matches('*').trim()
}

/// Text after `label` on a labelled line, or `None` if `line` carries a
/// different label. List markers and emphasis may sit on either side of the
/// colon: `GAINED: x`, `- **GAINED:** x` and `**GAINED**: x` all yield `x`.
fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let name = label.trim_end_matches(':');
    let rest = line
        .trim_start()
        .trim_start_matches(['*', '_', '-', ' '])
        .strip_prefix(name)?
        .trim_start_matches(['*', '_']);
    let rest = if name.len() < label.len() {
        rest.strip_prefix(':')?
    } else {
        rest
    };
    Some(rest.trim_start_matches(['*', '_']).trim())
}

/// A bracketed template line such as `[Continue for all key transformations]`
fn is_placeholder(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('[') && trimmed.ends_with(']')
}

fn join_words<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn line_start(raw: &str, position: usize) -> usize {
    raw[..position].rfind('\n').map(|index| index + 1).unwrap_or(0)
}

fn line_end(raw: &str, position: usize) -> usize {
    raw[position..]
        .find('\n')
        .map(|offset| position + offset + 1)
        .unwrap_or(raw.len())
}
