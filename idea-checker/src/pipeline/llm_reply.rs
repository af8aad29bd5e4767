//! Parsing JSON out of language model replies
//!
//! Models usually wrap JSON in a ```json fence and sometimes add prose around
//! it. The parser strips a fence, tries the whole text, then falls back to the
//! outermost `{…}` or `[…]` span.

use crate::clients::GenerationError;
use serde::de::DeserializeOwned;

/// Remove a surrounding Markdown code fence, if any
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json", "JSON", ...) on the opening line
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// Deserialize a model reply into `T`
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T, GenerationError> {
    let body = strip_code_fence(text);
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(first_error) => {
            for (open, close) in [('{', '}'), ('[', ']')] {
                if let (Some(start), Some(end)) = (body.find(open), body.rfind(close)) {
                    if start < end {
                        if let Ok(value) = serde_json::from_str(&body[start..=end]) {
                            return Ok(value);
                        }
                    }
                }
            }
            Err(GenerationError::Parse(first_error.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Reply {
        is_unique: bool,
    }

    #[test]
    fn test_strip_json_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\n[1, 2]\n```\n"), "[1, 2]");
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_fenced_reply() {
        let reply: Reply = parse_json_reply("```json\n{\"is_unique\": true}\n```").unwrap();
        assert_eq!(reply, Reply { is_unique: true });
    }

    #[test]
    fn test_parse_reply_with_surrounding_prose() {
        let reply: Reply =
            parse_json_reply("Sure! Here is the result:\n{\"is_unique\": false}\nHope it helps.")
                .unwrap();
        assert_eq!(reply, Reply { is_unique: false });
    }

    #[test]
    fn test_parse_bare_array_in_prose() {
        let reply: Vec<String> = parse_json_reply("Queries: [\"a\", \"b\"]").unwrap();
        assert_eq!(reply, vec!["a", "b"]);
    }

    #[test]
    fn test_unparsable_reply_is_error() {
        let result: Result<Reply, _> = parse_json_reply("I cannot help with that.");
        assert!(matches!(result, Err(GenerationError::Parse(_))));
    }
}
