use std::ops::Range;
use serde_json::Value;

/// JSON value found inside a log body.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedJson {
    /// Decoded value
    pub value: Value,
    /// Byte range of the source text inside the body
    pub span: Range<usize>,
}

impl EmbeddedJson {
    /// Body text with the JSON source removed at its original position.
    pub fn strip_from(&self, body: &str) -> String {
        let mut text = String::with_capacity(body.len() - self.span.len());
        text.push_str(&body[..self.span.start]);
        text.push_str(&body[self.span.end..]);
        text
    }
}

/// Extract the first JSON object or array from `body`.
///
/// Only the first balanced candidate is considered. If it does not decode,
/// `None` is returned even when a valid candidate follows it.
pub fn extract_json(body: &str) -> Option<EmbeddedJson> {
    let span = find_candidate(body.as_bytes())?;
    match serde_json::from_str::<Value>(&body[span.clone()]) {
        Ok(value) => Some(EmbeddedJson { value, span }),
        Err(e) => {
            tracing::debug!(
                "Embedded JSON candidate at {}..{} did not decode: {}",
                span.start, span.end, e
            );
            None
        }
    }
}

/// Locate the first balanced `{...}` or `[...]` run in a single pass.
///
/// Delimiters inside string literals are skipped, including escaped quotes.
/// Strings are only tracked while a candidate is open, so quotes in the
/// surrounding prose do not affect the scan. Openers that never balance are
/// not candidates: a run that completes inside one is kept as `pending` and
/// wins once the enclosing openers are known to fail.
fn find_candidate(bytes: &[u8]) -> Option<Range<usize>> {
    // (start, expected closer) for every open delimiter
    let mut stack: Vec<(usize, u8)> = Vec::new();
    let mut pending: Option<Range<usize>> = None;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, &byte) in bytes.iter().enumerate() {
        if in_string {
            if escape_next {
                escape_next = false;
            } else if byte == b'\\' {
                escape_next = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' if !stack.is_empty() => in_string = true,
            b'{' => stack.push((i, b'}')),
            b'[' => stack.push((i, b']')),
            b'}' | b']' => match stack.pop() {
                None => {}
                Some((start, closer)) if closer == byte => {
                    if stack.is_empty() {
                        return Some(start..i + 1);
                    }
                    // Anything completing later either encloses this run or follows it
                    if pending.as_ref().is_none_or(|p| start < p.start) {
                        pending = Some(start..i + 1);
                    }
                }
                Some(_) => {
                    // Every open delimiter is now unbalanceable
                    if pending.is_some() {
                        return pending;
                    }
                    stack.clear();
                }
            },
            _ => {}
        }
    }

    pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_object_mid_body() {
        let body = "L1\nL2\n{\"a\":1}\nL3";
        let found = extract_json(body).unwrap();
        assert_eq!(found.value, json!({"a": 1}));
        assert_eq!(found.span, 6..13);
        assert_eq!(found.strip_from(body), "L1\nL2\n\nL3");
    }

    #[test]
    fn test_extract_array() {
        let body = "ids [1,2,3] processed";
        let found = extract_json(body).unwrap();
        assert_eq!(found.value, json!([1, 2, 3]));
        assert_eq!(found.strip_from(body), "ids  processed");
    }

    #[test]
    fn test_nested_structures() {
        let body = r#"ctx {"one":1,"two":"two","three":[1,2,{"x":[]}]} tail"#;
        let found = extract_json(body).unwrap();
        assert_eq!(found.value, json!({"one": 1, "two": "two", "three": [1, 2, {"x": []}]}));
        assert_eq!(found.strip_from(body), "ctx  tail");
    }

    #[test]
    fn test_delimiters_inside_strings_are_skipped() {
        let body = r#"{"msg":"closing } and ] inside","quote":"say \"}\""} after"#;
        let found = extract_json(body).unwrap();
        assert_eq!(found.value["msg"], "closing } and ] inside");
        assert_eq!(found.value["quote"], "say \"}\"");
        assert_eq!(found.strip_from(body), " after");
    }

    #[test]
    fn test_quotes_in_prose_do_not_affect_scan() {
        let body = r#"user "bob said {"id":7}"#;
        let found = extract_json(body).unwrap();
        assert_eq!(found.value, json!({"id": 7}));
    }

    #[test]
    fn test_only_first_candidate_is_used() {
        let body = r#"{"first":1} and {"second":2}"#;
        let found = extract_json(body).unwrap();
        assert_eq!(found.value, json!({"first": 1}));
        assert_eq!(found.strip_from(body), r#" and {"second":2}"#);
    }

    #[test]
    fn test_malformed_first_candidate_stops_extraction() {
        let body = r#"[!@#$] then {"valid":true}"#;
        assert!(extract_json(body).is_none());
    }

    #[test]
    fn test_unterminated_candidate() {
        assert!(extract_json(r#"starts {"a":1 but never ends"#).is_none());
    }

    #[test]
    fn test_unclosed_outer_brace_finds_inner_object() {
        let body = r#"missing { brace then {"a":1}"#;
        let found = extract_json(body).unwrap();
        assert_eq!(found.value, json!({"a": 1}));
        assert_eq!(found.strip_from(body), "missing { brace then ");
    }

    #[test]
    fn test_mismatched_closer_moves_on() {
        let body = r#"odd {] then {"ok":1}"#;
        let found = extract_json(body).unwrap();
        assert_eq!(found.value, json!({"ok": 1}));
    }

    #[test]
    fn test_mismatch_after_inner_object_keeps_inner() {
        let body = r#"open [ {"a":1} } rest {"b":2}"#;
        let found = extract_json(body).unwrap();
        assert_eq!(found.value, json!({"a": 1}));
        assert_eq!(found.span, 7..14);
    }

    #[test]
    fn test_unclosed_brace_before_candidate_stays_linear() {
        let mut body = "[".repeat(200_000);
        body.push_str(r#"{"a":1}"#);

        let started = std::time::Instant::now();
        let found = extract_json(&body).unwrap();
        assert_eq!(found.value, json!({"a": 1}));
        assert_eq!(found.span, 200_000..200_007);

        assert!(extract_json(&"[".repeat(200_000)).is_none());
        assert!(extract_json(&format!("{}]", "{".repeat(200_000))).is_none());
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_no_candidate() {
        assert!(extract_json("plain message without structure").is_none());
        assert!(extract_json("").is_none());
    }

    #[test]
    fn test_multibyte_text_around_json() {
        let body = "ąčę {\"name\":\"žemė\"} ų";
        let found = extract_json(body).unwrap();
        assert_eq!(found.value, json!({"name": "žemė"}));
        assert_eq!(found.strip_from(body), "ąčę  ų");
    }
}
