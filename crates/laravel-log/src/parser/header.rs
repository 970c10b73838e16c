use std::borrow::Cow;
use std::sync::OnceLock;
use regex::Regex;

use super::timestamp::RawTimestamp;

/// `[2022-08-25 11:16:17]`, `[2022-08-25 11:16:17.125000]` or
/// `[2022-08-25 11:16:17.125000+02:00]` at the very start of the entry.
const TIMESTAMP_PATTERN: &str =
    r"^\[(?P<datetime>\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})(?:\.(?P<micros>\d{6}))?(?P<offset>[+-]\d{2}:\d{2})?\]";

/// Shortest run of free text on the header line followed by `env.LEVEL: `.
const MARKER_PATTERN: &str =
    r"^(?P<free>[^\n]*?)(?P<environment>[\w-]+)\.(?P<token>\w*):(?: |$)";

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TIMESTAMP_PATTERN).expect("timestamp pattern compiles"))
}

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MARKER_PATTERN).expect("marker pattern compiles"))
}

/// `env.LEVEL:` marker of a header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker<'a> {
    pub environment: &'a str,
    pub token: &'a str,
}

/// Leading part of a log entry, split from its body.
#[derive(Debug, Clone)]
pub struct Header<'a> {
    pub timestamp: RawTimestamp<'a>,
    pub marker: Option<Marker<'a>>,
    /// Everything after the header, with free text from the header line
    /// prepended
    pub body: Cow<'a, str>,
}

/// Split `text` into header and body.
///
/// Returns `None` when the entry does not start with a bracketed timestamp;
/// the caller then treats the whole text as the body.
pub fn split_header(text: &str) -> Option<Header<'_>> {
    let ts = timestamp_regex().captures(text)?;
    let timestamp = RawTimestamp {
        datetime: ts.name("datetime")?.as_str(),
        micros: ts.name("micros").map(|m| m.as_str()),
        offset: ts.name("offset").map(|m| m.as_str()),
    };
    let remainder = &text[ts.get(0)?.end()..];

    let Some(caps) = marker_regex().captures(remainder) else {
        let body = remainder.strip_prefix(' ').unwrap_or(remainder);
        let body = if body.trim().is_empty() { "" } else { body };
        return Some(Header {
            timestamp,
            marker: None,
            body: Cow::Borrowed(body),
        });
    };

    let marker = Marker {
        environment: caps.name("environment")?.as_str(),
        token: caps.name("token")?.as_str(),
    };
    let free_text = caps.name("free").map_or("", |m| m.as_str()).trim();
    let rest = &remainder[caps.get(0)?.end()..];
    let rest = if rest.trim().is_empty() { "" } else { rest };

    let body = match (free_text.is_empty(), rest.is_empty()) {
        (true, _) => Cow::Borrowed(rest),
        (false, true) => Cow::Borrowed(free_text),
        (false, false) => Cow::Owned(format!("{} {}", free_text, rest)),
    };

    Some(Header {
        timestamp,
        marker: Some(marker),
        body,
    })
}
