//! Chat text helpers.
//!
//! Outbound chat is carried as a JSON text component. Player supplied text is
//! stripped of line breaks first, then JSON encoding escapes quotes and backslashes.

use serde::Serialize;

/// Section sign used for legacy formatting codes (`§a`, `§c`, ...).
pub const FORMATTING_PREFIX: char = '§';

#[derive(Serialize)]
struct TextComponent<'a> {
    text: &'a str,
}

/// Removes every line break from `message`.
#[must_use]
pub fn remove_line_breaks(message: &str) -> String {
    message.chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}

/// Builds the JSON text component for a chat line.
///
/// Line breaks are removed, and `"` and `\` are escaped by the encoder so the
/// payload cannot break out of its string.
#[must_use]
pub fn chat_component(message: &str) -> String {
    let text = remove_line_breaks(message);
    // Serializing a struct holding a single &str cannot fail.
    serde_json::to_string(&TextComponent { text: &text })
        .unwrap_or_else(|_| String::from(r#"{"text":""}"#))
}

/// Prefixes `text` with a legacy colour code.
#[must_use]
pub fn colored(code: char, text: &str) -> String {
    format!("{FORMATTING_PREFIX}{code}{text}")
}
