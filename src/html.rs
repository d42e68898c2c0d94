//! HTML fragment to plain-text normalization
//!
//! A lightweight bracket/ampersand scanner rather than a conforming HTML
//! parser: message bodies only need to be readable, not structurally
//! faithful. Tag and entity patterns are compiled once into static tables.

use std::sync::LazyLock;

use regex::Regex;

/// Style elements with their content, non-greedy so adjacent blocks are
/// stripped independently
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("valid style pattern"));

/// Script elements with their content
static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid script pattern"));

/// Line-break elements, self-closing or not
static BR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid br pattern"));

/// Block-level element boundaries, opening or closing, any attributes
static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:p|div|h[1-6]|li|tr|blockquote)\b[^>]*>").expect("valid block pattern")
});

/// Any remaining angle-bracket-delimited markup
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

/// Character references: decimal, hexadecimal, or named
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#(?P<dec>[0-9]+)|#[xX](?P<hex>[0-9a-fA-F]+)|(?P<name>[a-zA-Z]+));")
        .expect("valid entity pattern")
});

/// Runs of space/tab within a line
static INLINE_WS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid whitespace pattern"));

/// Three or more consecutive newlines
static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank-run pattern"));

/// Named character references recognized by the normalizer
///
/// Lookup is case-insensitive; unknown names are left verbatim.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("nbsp", " "),
    ("mdash", "\u{2014}"),
    ("ndash", "\u{2013}"),
    ("hellip", "\u{2026}"),
    ("laquo", "\u{00AB}"),
    ("raquo", "\u{00BB}"),
    ("copy", "\u{00A9}"),
    ("reg", "\u{00AE}"),
    ("trade", "\u{2122}"),
];

/// Convert an HTML fragment into readable plain text
///
/// Pure and deterministic. Strips style/script content entirely, maps
/// line-break and block-level boundaries to newlines, removes remaining
/// tags, decodes character references, and shapes whitespace: each line is
/// trimmed with internal space/tab runs collapsed, runs of three or more
/// newlines collapse to a single blank line, and the result is trimmed.
///
/// Malformed numeric references (unparseable or non-positive code points)
/// are left in the output verbatim so information is never silently lost.
pub fn html_to_text(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let text = STYLE_RE.replace_all(html, "");
    let text = SCRIPT_RE.replace_all(&text, "");
    let text = BR_RE.replace_all(&text, "\n");
    let text = BLOCK_RE.replace_all(&text, "\n");
    let text = TAG_RE.replace_all(&text, "");
    let text = decode_entities(&text);
    let text = collapse_line_whitespace(&text);
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");
    text.trim().to_owned()
}

/// Decode named and numeric character references
fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let decoded = if let Some(dec) = caps.name("dec") {
                numeric_entity(dec.as_str(), 10)
            } else if let Some(hex) = caps.name("hex") {
                numeric_entity(hex.as_str(), 16)
            } else {
                named_entity(&caps["name"]).map(str::to_owned)
            };
            decoded.unwrap_or_else(|| caps[0].to_owned())
        })
        .into_owned()
}

/// Decode a numeric reference when it parses to a positive, valid code point
fn numeric_entity(digits: &str, radix: u32) -> Option<String> {
    let value = u32::from_str_radix(digits, radix).ok()?;
    if value == 0 {
        return None;
    }
    char::from_u32(value).map(|ch| ch.to_string())
}

/// Look up a named reference, case-insensitively
fn named_entity(name: &str) -> Option<&'static str> {
    let lower = name.to_ascii_lowercase();
    NAMED_ENTITIES
        .iter()
        .find(|(candidate, _)| *candidate == lower)
        .map(|(_, replacement)| *replacement)
}

/// Trim each line and collapse internal space/tab runs
///
/// Newlines are structural and pass through untouched.
fn collapse_line_whitespace(text: &str) -> String {
    text.split('\n')
        .map(|line| INLINE_WS_RE.replace_all(line.trim(), " ").into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}
