//! Markup tokenizer for loading template documents from text.
//!
//! Tag and attribute names are ASCII `[A-Za-z0-9:_-]` and are lower-cased.
//! There is no HTML5 error recovery: the token stream is handed to a simple
//! open-element stack, which is all template markup needs.
//!
//! Known limitations:
//! - Rawtext close-tag scanning (`script`, `style`, `textarea`) accepts only
//!   ASCII whitespace before `>`.
//! - Unterminated comments and CDATA sections run to the end of input.
use crate::entities::decode_entities;
use crate::types::Token;
use memchr::memchr;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";
const CDATA_START: &str = "<![CDATA[";
const CDATA_END: &str = "]]>";

const RAWTEXT_ELEMENTS: &[&str] = &["script", "style", "textarea"];

pub fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

/// Tokenize a complete markup string.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(input);
    let mut out = Vec::new();
    while let Some(token) = tokenizer.next_token() {
        log::trace!(target: "html.tokenizer", "emit token: {token:?}");
        out.push(token);
    }
    out
}

/// Pull tokenizer over one input string.
///
/// Invariant: `pos` only ever stops at ASCII structural bytes or after ASCII
/// name runs, so every slice boundary is a UTF-8 char boundary.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    pending: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            pending: Vec::new(),
        }
    }

    pub fn next_token(&mut self) -> Option<Token> {
        if let Some(token) = self.pending.pop() {
            return Some(token);
        }
        let bytes = self.input.as_bytes();
        if self.pos >= bytes.len() {
            return None;
        }
        if !opens_markup(bytes, self.pos) {
            return Some(self.text());
        }
        let rest = &self.input[self.pos..];
        if rest.starts_with(COMMENT_START) {
            return Some(self.delimited(COMMENT_START, COMMENT_END, Token::Comment));
        }
        if rest.starts_with(CDATA_START) {
            return Some(self.delimited(CDATA_START, CDATA_END, Token::CData));
        }
        if starts_with_ignore_ascii_case(rest, "<!doctype") {
            return self.doctype();
        }
        if bytes[self.pos + 1] == b'/' {
            return Some(self.end_tag());
        }
        if bytes[self.pos + 1] == b'!' {
            // Bogus markup declaration: skip it like a comment.
            self.pos = memchr(b'>', &bytes[self.pos..])
                .map(|rel| self.pos + rel + 1)
                .unwrap_or(bytes.len());
            return self.next_token();
        }
        Some(self.start_tag())
    }

    fn text(&mut self) -> Token {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        let mut end = bytes.len();
        let mut scan = start + 1;
        while let Some(rel) = memchr(b'<', &bytes[scan..]) {
            let at = scan + rel;
            if opens_markup(bytes, at) {
                end = at;
                break;
            }
            scan = at + 1;
        }
        self.pos = end;
        Token::Text(decode_entities(&self.input[start..end]))
    }

    fn delimited(&mut self, open: &str, close: &str, make: fn(String) -> Token) -> Token {
        let body_start = self.pos + open.len();
        let body = &self.input[body_start..];
        match body.find(close) {
            Some(end) => {
                self.pos = body_start + end + close.len();
                make(body[..end].to_string())
            }
            None => {
                self.pos = self.input.len();
                make(body.to_string())
            }
        }
    }

    fn doctype(&mut self) -> Option<Token> {
        let rest = &self.input[self.pos + 2..];
        let end = rest.find('>')?;
        self.pos += 2 + end + 1;
        Some(Token::Doctype(rest[..end].trim().to_string()))
    }

    fn name_at(&self, start: usize) -> usize {
        let bytes = self.input.as_bytes();
        let mut end = start;
        while end < bytes.len() && is_name_byte(bytes[end]) {
            end += 1;
        }
        end
    }

    fn end_tag(&mut self) -> Token {
        let start = self.pos + 2;
        let name_end = self.name_at(start);
        let name = self.input[start..name_end].to_ascii_lowercase();
        let bytes = self.input.as_bytes();
        self.pos = memchr(b'>', &bytes[name_end..])
            .map(|rel| name_end + rel + 1)
            .unwrap_or(bytes.len());
        Token::EndTag(name)
    }

    fn start_tag(&mut self) -> Token {
        let bytes = self.input.as_bytes();
        let len = bytes.len();
        let name_start = self.pos + 1;
        let mut k = self.name_at(name_start);
        let name = self.input[name_start..k].to_ascii_lowercase();
        let mut attributes = Vec::new();
        let mut self_closing = false;

        loop {
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k >= len {
                break;
            }
            match bytes[k] {
                b'>' => {
                    k += 1;
                    break;
                }
                b'/' if k + 1 < len && bytes[k + 1] == b'>' => {
                    self_closing = true;
                    k += 2;
                    break;
                }
                b if !is_name_byte(b) => {
                    k += 1;
                    continue;
                }
                _ => {}
            }

            let attr_start = k;
            k = self.name_at(k);
            let attr_name = self.input[attr_start..k].to_ascii_lowercase();
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k >= len || bytes[k] != b'=' {
                attributes.push((attr_name, None));
                continue;
            }
            k += 1;
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            let value = if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                let quote = bytes[k];
                let value_start = k + 1;
                let value_end = memchr(quote, &bytes[value_start..])
                    .map(|rel| value_start + rel)
                    .unwrap_or(len);
                k = (value_end + 1).min(len);
                decode_entities(&self.input[value_start..value_end])
            } else {
                let value_start = k;
                while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                    if bytes[k] == b'/' && k + 1 < len && bytes[k + 1] == b'>' {
                        break;
                    }
                    k += 1;
                }
                decode_entities(&self.input[value_start..k])
            };
            attributes.push((attr_name, Some(value)));
        }

        if is_void_element(&name) {
            self_closing = true;
        }
        self.pos = k;

        if !self_closing && RAWTEXT_ELEMENTS.contains(&name.as_str()) {
            self.rawtext(&name);
        }

        Token::StartTag {
            name,
            attributes,
            self_closing,
        }
    }

    /// Consume rawtext content up to the matching close tag and queue the
    /// text and end-tag tokens.
    fn rawtext(&mut self, name: &str) {
        let body_start = self.pos;
        let (body_end, resume) = find_rawtext_close(&self.input[body_start..], name)
            .map(|(s, e)| (body_start + s, body_start + e))
            .unwrap_or((self.input.len(), self.input.len()));
        self.pos = resume;
        // pending is a stack
        self.pending.push(Token::EndTag(name.to_string()));
        let body = &self.input[body_start..body_end];
        if !body.is_empty() {
            let text = if name == "textarea" {
                decode_entities(body)
            } else {
                body.to_string()
            };
            self.pending.push(Token::Text(text));
        }
    }
}

/// Whether the `<` at `i` starts a tag, comment, or declaration rather than
/// literal text.
fn opens_markup(bytes: &[u8], i: usize) -> bool {
    bytes[i] == b'<'
        && bytes
            .get(i + 1)
            .is_some_and(|&b| b.is_ascii_alphabetic() || b == b'/' || b == b'!')
}

fn starts_with_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    haystack.len() >= needle.len()
        && haystack.as_bytes()[..needle.len()].eq_ignore_ascii_case(needle.as_bytes())
}

fn find_rawtext_close(haystack: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let mut i = 0;
    while let Some(rel) = memchr(b'<', &bytes[i..]) {
        i += rel;
        let rest = &haystack[i..];
        if rest.len() > 2 + name.len()
            && rest.as_bytes()[1] == b'/'
            && rest.as_bytes()[2..2 + name.len()].eq_ignore_ascii_case(name.as_bytes())
        {
            let mut k = i + 2 + name.len();
            while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < bytes.len() && bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn start(name: &str, attributes: &[(&str, Option<&str>)]) -> Token {
        Token::StartTag {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                .collect(),
            self_closing: false,
        }
    }

    #[test]
    fn tokenize_lowercases_names_and_keeps_attribute_order() {
        let tokens = tokenize(r#"<DIV Class="x" id=main hidden>hi</DIV>"#);
        assert_eq!(
            tokens,
            vec![
                start(
                    "div",
                    &[("class", Some("x")), ("id", Some("main")), ("hidden", None)]
                ),
                Token::Text("hi".to_string()),
                Token::EndTag("div".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_emits_comments_and_cdata() {
        let tokens = tokenize("<p><!-- note --><![CDATA[a<b]]></p>");
        assert_eq!(
            tokens,
            vec![
                start("p", &[]),
                Token::Comment(" note ".to_string()),
                Token::CData("a<b".to_string()),
                Token::EndTag("p".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_marks_void_elements_self_closing() {
        let tokens = tokenize("<br><img src=a.png>");
        assert!(
            tokens
                .iter()
                .all(|t| matches!(t, Token::StartTag { self_closing: true, .. })),
            "expected void elements to self-close, got: {tokens:?}"
        );
    }

    #[test]
    fn tokenize_keeps_script_body_raw() {
        let tokens = tokenize("<script>if (a < b) {}</ScRiPt >after");
        assert_eq!(
            tokens,
            vec![
                start("script", &[]),
                Token::Text("if (a < b) {}".to_string()),
                Token::EndTag("script".to_string()),
                Token::Text("after".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_preserves_utf8_and_decodes_entities() {
        let tokens = tokenize("<b>café &amp; 😊</b>");
        assert!(
            tokens
                .iter()
                .any(|t| matches!(t, Token::Text(s) if s == "café & 😊")),
            "expected decoded UTF-8 text, got: {tokens:?}"
        );
    }

    #[test]
    fn tokenize_treats_stray_lt_as_text() {
        let tokens = tokenize("a < b");
        assert_eq!(tokens, vec![Token::Text("a < b".to_string())]);
    }

    #[test]
    fn tokenize_handles_doctype_case_insensitively() {
        let tokens = tokenize("<!DoCtYpE html><html></html>");
        assert_eq!(tokens[0], Token::Doctype("DoCtYpE html".to_string()));
    }
}
