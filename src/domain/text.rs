//! Plain-text extraction from rich-text descriptions

use std::sync::OnceLock;

use regex::Regex;

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"(?s)<[A-Za-z/!?][^>]*>").expect("valid tag regex"))
}

fn entity_regex() -> &'static Regex {
    static ENTITY: OnceLock<Regex> = OnceLock::new();
    ENTITY.get_or_init(|| {
        Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid entity regex")
    })
}

/// Returns the text content of an HTML fragment as a single line.
///
/// When the document has a `<body`, everything before it is dropped. Tags are
/// removed, character references decoded, newlines turned into spaces and the
/// result trimmed. Inner runs of spaces are kept.
pub fn html_text(description: &str) -> String {
    if description.is_empty() {
        return String::new();
    }
    let body = match description.find("<body") {
        Some(position) => &description[position..],
        None => description,
    };
    let without_tags = tag_regex().replace_all(body, "");
    let decoded = decode_entities(&without_tags);
    decoded.replace('\n', " ").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    entity_regex()
        .replace_all(text, |caps: &regex::Captures| {
            let name = &caps[1];
            decode_entity(name).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(name: &str) -> Option<String> {
    let decoded = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some(decoded.to_string())
}
