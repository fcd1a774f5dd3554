//! Markup text front end for the document crate.
//!
//! Only tokenization lives here; tree construction happens in `dom`, which
//! owns the node arena.

mod entities;
mod tokenizer;
mod types;

pub use crate::tokenizer::{Tokenizer, is_void_element, tokenize};
pub use crate::types::Token;

/// Escape text for use inside element content.
pub fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

/// Escape text for use inside a double-quoted attribute value.
pub fn escape_attribute(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}
