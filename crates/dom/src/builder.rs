//! Tree construction from markup text.
//!
//! Tokens from `html::tokenize` are attached through an open-element stack.
//! End tags close back to the nearest open element with that name; end tags
//! with no open match are ignored.

use crate::document::{Dom, DomPatchError};
use crate::patch::DomPatch;
use core_types::NodeKey;
use html::Token;

impl Dom {
    /// Parse `markup` into a new detached fragment.
    pub fn parse_fragment(&mut self, markup: &str) -> Result<NodeKey, DomPatchError> {
        let fragment = self.create_fragment_node()?;
        self.parse_into(fragment, markup)?;
        Ok(fragment)
    }

    /// Parse a whole document; top-level nodes become children of the root.
    pub fn parse_document(markup: &str) -> Result<Dom, DomPatchError> {
        let mut dom = Dom::new();
        let root = dom.root();
        dom.parse_into(root, markup)?;
        Ok(dom)
    }

    /// Parse `markup` and append the resulting nodes to `parent`.
    pub fn parse_into(&mut self, parent: NodeKey, markup: &str) -> Result<(), DomPatchError> {
        let mut open_elements: Vec<(NodeKey, String)> = Vec::new();

        for token in html::tokenize(markup) {
            let current = open_elements.last().map(|(k, _)| *k).unwrap_or(parent);
            match token {
                Token::Doctype(_) => {}
                Token::Text(text) => {
                    let key = self.create_text_node(&text)?;
                    self.apply(DomPatch::AppendChild {
                        parent: current,
                        child: key,
                    })?;
                }
                Token::CData(text) => {
                    let key = self.create_cdata_node(&text)?;
                    self.apply(DomPatch::AppendChild {
                        parent: current,
                        child: key,
                    })?;
                }
                Token::Comment(text) => {
                    let key = self.create_comment_node(&text)?;
                    self.apply(DomPatch::AppendChild {
                        parent: current,
                        child: key,
                    })?;
                }
                Token::StartTag {
                    name,
                    attributes,
                    self_closing,
                } => {
                    let key = self.create_element_with(&name, attributes)?;
                    self.apply(DomPatch::AppendChild {
                        parent: current,
                        child: key,
                    })?;
                    if !self_closing {
                        open_elements.push((key, name));
                    }
                }
                Token::EndTag(name) => {
                    if let Some(pos) = open_elements.iter().rposition(|(_, open)| *open == name) {
                        open_elements.truncate(pos);
                    }
                }
            }
        }
        Ok(())
    }
}
