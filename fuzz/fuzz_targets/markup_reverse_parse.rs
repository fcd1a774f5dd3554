#![no_main]

use core_types::{Document, NodeType};
use dao::{Flags, Parser};
use dom::Dom;
use libfuzzer_sys::fuzz_target;
use serde_json::json;

fuzz_target!(|data: &[u8]| {
    let Some((&flag_byte, rest)) = data.split_first() else {
        return;
    };
    let Ok(input) = std::str::from_utf8(rest) else {
        return;
    };
    let _ = html::tokenize(input);
    let Ok(mut dom) = Dom::parse_document(input) else {
        return;
    };
    let parser = Parser::new(Flags::from(u32::from(flag_byte)));
    let elements: Vec<_> = dom
        .child_nodes(dom.root())
        .into_iter()
        .filter(|&n| dom.node_type(n) == Some(NodeType::Element))
        .collect();
    for element in elements {
        let Some(mut markup) = parser.create_from_dom(&dom, element) else {
            continue;
        };
        // export must always re-import and rebuild
        let mut reimported = dao::Markup::from_json(&markup.to_json());
        let _ = reimported.build(&json!({}), &mut dom);
        let _ = markup.render(&json!({}), &mut dom);
    }
});
