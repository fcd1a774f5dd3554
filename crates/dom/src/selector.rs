//! Compound selector matching for delegated listeners.
//!
//! Supported: `*`, `tag`, `#id`, `.class`, `[attr]`, `[attr=value]` (value
//! optionally quoted), any concatenation of those, and comma-separated
//! lists. Combinators are not supported; a selector using one never matches.

use crate::document::Dom;
use core_types::{Document, NodeKey, SelectorMatcher};

#[derive(Debug, PartialEq, Eq)]
enum Simple<'a> {
    Universal,
    Tag(&'a str),
    Id(&'a str),
    Class(&'a str),
    Attr { name: &'a str, value: Option<&'a str> },
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(selector: &str) -> Option<Vec<Simple<'_>>> {
    let mut out = Vec::new();
    let mut rest = selector;
    while let Some(first) = rest.chars().next() {
        let take_ident = |s: &'_ str| -> usize {
            s.char_indices()
                .find(|&(_, c)| !is_ident_char(c))
                .map(|(i, _)| i)
                .unwrap_or(s.len())
        };
        match first {
            '*' => {
                out.push(Simple::Universal);
                rest = &rest[1..];
            }
            '#' | '.' => {
                let body = &rest[1..];
                let end = take_ident(body);
                if end == 0 {
                    return None;
                }
                out.push(if first == '#' {
                    Simple::Id(&body[..end])
                } else {
                    Simple::Class(&body[..end])
                });
                rest = &body[end..];
            }
            '[' => {
                let close = rest.find(']')?;
                let inner = &rest[1..close];
                let (name, value) = match inner.split_once('=') {
                    Some((name, value)) => {
                        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                        (name.trim(), Some(value))
                    }
                    None => (inner.trim(), None),
                };
                if name.is_empty() {
                    return None;
                }
                out.push(Simple::Attr { name, value });
                rest = &rest[close + 1..];
            }
            c if is_ident_char(c) => {
                let end = take_ident(rest);
                out.push(Simple::Tag(&rest[..end]));
                rest = &rest[end..];
            }
            _ => return None,
        }
    }
    (!out.is_empty()).then_some(out)
}

impl Dom {
    pub fn matches_selector(&self, node: NodeKey, selector: &str) -> bool {
        let Some(name) = self.node_name(node) else {
            return false;
        };
        selector.split(',').map(str::trim).any(|part| {
            let Some(compound) = parse_compound(part) else {
                log::debug!(target: "dom.events", "unsupported selector {part:?}");
                return false;
            };
            compound.iter().all(|simple| match simple {
                Simple::Universal => true,
                Simple::Tag(tag) => name.eq_ignore_ascii_case(tag),
                Simple::Id(id) => self.get_attribute(node, "id") == Some(*id),
                Simple::Class(class) => self
                    .get_attribute(node, "class")
                    .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == *class)),
                Simple::Attr { name, value } => match (self.get_attribute(node, name), value) {
                    (Some(actual), Some(expected)) => actual == *expected,
                    (Some(_), None) => true,
                    (None, _) => false,
                },
            })
        })
    }
}

impl SelectorMatcher for Dom {
    fn matches(&self, node: NodeKey, selector: &str) -> bool {
        self.matches_selector(node, selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(dom: &mut Dom) -> NodeKey {
        let node = dom.create_element("button").unwrap();
        dom.set_attribute(node, "id", "save").unwrap();
        dom.set_attribute(node, "class", "btn primary").unwrap();
        dom.set_attribute(node, "type", "submit").unwrap();
        node
    }

    #[test]
    fn compound_selectors_match() {
        let mut dom = Dom::new();
        let node = button(&mut dom);
        for selector in [
            "*",
            "button",
            "BUTTON",
            "#save",
            ".primary",
            "button.btn.primary#save",
            "[type]",
            "[type=submit]",
            "[type=\"submit\"]",
            "a, .btn",
        ] {
            assert!(dom.matches_selector(node, selector), "{selector}");
        }
    }

    #[test]
    fn non_matching_and_unsupported_selectors() {
        let mut dom = Dom::new();
        let node = button(&mut dom);
        for selector in ["a", "#other", ".secondary", "[type=reset]", "div button", "", "!"] {
            assert!(!dom.matches_selector(node, selector), "{selector}");
        }
    }

    #[test]
    fn text_nodes_never_match() {
        let mut dom = Dom::new();
        let text = dom.create_text("x").unwrap();
        assert!(!dom.matches_selector(text, "*"));
    }
}
