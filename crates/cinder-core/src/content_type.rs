//! Content classification for paste bodies.
//!
//! [`detect`] runs once at creation time and the result is stored in the
//! envelope metadata. It is a display heuristic, not a validator: a YAML
//! fragment without a `---` document marker classifies as plain text, and a
//! bare number classifies as JSON. Misclassification only affects syntax
//! highlighting downstream, never the stored content.

use serde::{Deserialize, Serialize};

/// Display type of a paste body, decided once at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Plain text, the fallback for everything unclassified.
    Text,
    /// The whole body parses as a JSON document.
    Json,
    /// At least one line carries a Markdown structure marker.
    Markdown,
    /// A `---` document marker plus at least one `key: value` mapping line.
    Yaml,
}

/// Classify a paste body.
///
/// Pure, total, and deterministic. Checks run in priority order:
/// empty → JSON → Markdown → YAML → plain text.
pub fn detect(text: &str) -> ContentType {
    if text.trim().is_empty() {
        return ContentType::Text;
    }

    if serde_json::from_str::<serde_json::Value>(text).is_ok() {
        return ContentType::Json;
    }

    if text.lines().any(is_markdown_line) {
        return ContentType::Markdown;
    }

    if has_yaml_shape(text) {
        return ContentType::Yaml;
    }

    ContentType::Text
}

/// A line that opens a heading, a standalone bold span, a list bullet, or a
/// fenced code block.
fn is_markdown_line(line: &str) -> bool {
    let hashes = line.len() - line.trim_start_matches('#').len();
    if hashes >= 1 && line.as_bytes().get(hashes) == Some(&b' ') {
        return true;
    }

    if line.len() >= 4 && line.starts_with("**") && line.ends_with("**") {
        return true;
    }

    line.starts_with("- ") || line.starts_with("```")
}

/// A `---` document marker somewhere plus at least one mapping-shaped line.
fn has_yaml_shape(text: &str) -> bool {
    text.lines().any(|line| line.trim_end() == "---") && text.lines().any(is_yaml_mapping_line)
}

/// Matches `key: value` where the key is `[A-Za-z0-9_-]+` and a non-space
/// character follows the colon.
fn is_yaml_mapping_line(line: &str) -> bool {
    let Some((key, rest)) = line.split_once(':') else {
        return false;
    };

    !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        && !rest.trim_start().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_are_text() {
        assert_eq!(detect(""), ContentType::Text);
        assert_eq!(detect("   \n\t  "), ContentType::Text);
    }

    #[test]
    fn json_object_detected() {
        assert_eq!(detect("{\"a\":1}"), ContentType::Json);
    }

    #[test]
    fn json_array_detected() {
        assert_eq!(detect("[1, 2, 3]"), ContentType::Json);
    }

    #[test]
    fn bare_json_scalar_detected() {
        // A known quirk of the heuristic: any valid JSON document counts,
        // including bare scalars.
        assert_eq!(detect("42"), ContentType::Json);
    }

    #[test]
    fn markdown_heading_detected() {
        assert_eq!(detect("# Title\n\nbody"), ContentType::Markdown);
        assert_eq!(detect("prose\n### deep heading here"), ContentType::Markdown);
    }

    #[test]
    fn hashes_without_space_are_not_markdown() {
        assert_eq!(detect("#hashtag"), ContentType::Text);
    }

    #[test]
    fn markdown_bullet_and_fence_detected() {
        assert_eq!(detect("- first\n- second"), ContentType::Markdown);
        assert_eq!(detect("```rust\nfn main() {}\n```"), ContentType::Markdown);
    }

    #[test]
    fn standalone_bold_line_detected() {
        assert_eq!(detect("**important**"), ContentType::Markdown);
    }

    #[test]
    fn yaml_needs_marker_and_mapping() {
        assert_eq!(detect("---\nkey: value"), ContentType::Yaml);
        // Marker alone is not enough
        assert_eq!(detect("---\njust prose"), ContentType::Text);
        // Mapping alone is not enough
        assert_eq!(detect("key: value"), ContentType::Text);
    }

    #[test]
    fn yaml_mapping_requires_value() {
        assert_eq!(detect("---\nkey:"), ContentType::Text);
    }

    #[test]
    fn plain_prose_is_text() {
        assert_eq!(detect("plain sentence."), ContentType::Text);
    }

    #[test]
    fn markdown_wins_over_yaml() {
        // Priority order: a bullet line classifies before the YAML check runs
        assert_eq!(detect("---\nkey: value\n- bullet"), ContentType::Markdown);
    }

    #[test]
    fn detection_is_deterministic() {
        let sample = "## heading\nbody text";
        assert_eq!(detect(sample), detect(sample));
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn detect_is_total_and_deterministic(text in ".{0,512}") {
                // Total: never panics on arbitrary input
                let first = detect(&text);
                prop_assert_eq!(first, detect(&text));
            }
        }
    }
}
