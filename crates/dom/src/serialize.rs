use crate::document::{Dom, NodeKind};
use core_types::NodeKey;
use html::{escape_attribute, escape_text, is_void_element};

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

impl Dom {
    /// Serialize `node` (its children, for documents and fragments) to markup.
    pub fn to_html(&self, node: NodeKey) -> String {
        let mut out = String::new();
        self.write_html(node, false, &mut out);
        out
    }

    /// Serialize the children of `node` without the node itself.
    pub fn inner_html(&self, node: NodeKey) -> String {
        let mut out = String::new();
        if let Some(record) = self.record(node) {
            let raw = self.is_raw_text_parent(node);
            for &child in &record.children {
                self.write_html(child, raw, &mut out);
            }
        }
        out
    }

    fn is_raw_text_parent(&self, node: NodeKey) -> bool {
        matches!(
            self.record(node).map(|r| &r.kind),
            Some(NodeKind::Element { name, .. }) if RAW_TEXT_ELEMENTS.contains(&name.as_ref())
        )
    }

    fn write_html(&self, node: NodeKey, raw_text: bool, out: &mut String) {
        let Some(record) = self.record(node) else {
            return;
        };
        match &record.kind {
            NodeKind::Document | NodeKind::Fragment => {
                for &child in &record.children {
                    self.write_html(child, false, out);
                }
            }
            NodeKind::Element { name, attributes } => {
                out.push('<');
                out.push_str(name);
                for (key, value) in attributes {
                    out.push(' ');
                    out.push_str(key);
                    if let Some(value) = value {
                        out.push_str("=\"");
                        escape_attribute(value, out);
                        out.push('"');
                    }
                }
                out.push('>');
                if is_void_element(name) {
                    return;
                }
                let raw = RAW_TEXT_ELEMENTS.contains(&name.as_ref());
                for &child in &record.children {
                    self.write_html(child, raw, out);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
            NodeKind::Text { text } => {
                if raw_text {
                    out.push_str(text);
                } else {
                    escape_text(text, out);
                }
            }
            NodeKind::CData { text } => {
                out.push_str("<![CDATA[");
                out.push_str(text);
                out.push_str("]]>");
            }
            NodeKind::Comment { text } => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
        }
    }

    /// Indented one-line-per-node view of a subtree, capped at `cap` lines.
    pub fn outline(&self, node: NodeKey, cap: usize) -> Vec<String> {
        const INDENT_STEP: &str = "  ";
        const PREVIEW_CHARS: usize = 40;

        fn preview(out: &mut String, s: &str) {
            for (i, ch) in s.chars().enumerate() {
                if i == PREVIEW_CHARS {
                    out.push('…');
                    break;
                }
                out.push(if ch == '\n' { ' ' } else { ch });
            }
        }

        fn walk(dom: &Dom, node: NodeKey, depth: usize, out: &mut Vec<String>, left: &mut usize) {
            if *left == 0 {
                return;
            }
            let Some(record) = dom.record(node) else {
                return;
            };
            *left -= 1;
            let mut line = INDENT_STEP.repeat(depth);
            match &record.kind {
                NodeKind::Document => line.push_str("#document"),
                NodeKind::Fragment => line.push_str("#fragment"),
                NodeKind::Element { name, attributes } => {
                    line.push('<');
                    line.push_str(name);
                    for (key, value) in attributes {
                        line.push(' ');
                        line.push_str(key);
                        if let Some(value) = value {
                            line.push_str("=\"");
                            line.push_str(value);
                            line.push('"');
                        }
                    }
                    line.push('>');
                }
                NodeKind::Text { text } | NodeKind::CData { text } => {
                    line.push('"');
                    preview(&mut line, text);
                    line.push('"');
                }
                NodeKind::Comment { text } => {
                    line.push_str("<!-- ");
                    preview(&mut line, text);
                    line.push_str(" -->");
                }
            }
            out.push(line);
            for &child in &record.children {
                walk(dom, child, depth + 1, out, left);
            }
        }

        let mut out = Vec::new();
        let mut left = cap;
        walk(self, node, 0, &mut out, &mut left);
        out
    }
}
