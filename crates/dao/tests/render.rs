use core_types::Document;
use dao::{Markup, Parser, get, markup};
use dom::Dom;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn render_without_attachment_is_a_no_op() {
    let mut dom = Dom::new();
    let mut node = markup!(["p", {}, "x"]);
    let before = dom.len();

    assert_eq!(node.render(&json!({}), &mut dom).unwrap(), None);
    assert_eq!(dom.len(), before);
    assert_eq!(node.attached(), None);
}

#[test]
fn render_with_detached_attachment_is_a_no_op() {
    let mut dom = Dom::new();
    let orphan = dom.create_element("p").unwrap();
    let mut node = markup!(["p", {}, "x"]);
    node.attach(orphan);

    assert_eq!(node.render(&json!({}), &mut dom).unwrap(), None);
    assert_eq!(node.attached(), Some(orphan));
}

#[test]
fn render_replaces_the_attached_node_in_place() {
    let mut dom = Dom::parse_document("<ul><li>a</li><li id=\"slot\">b</li><li>c</li></ul>").unwrap();
    let list = dom.child_nodes(dom.root())[0];
    let old = dom.child_nodes(list)[1];
    let mut node = Markup::element("li").with_attr("id", "slot").with_child(get("label"));
    node.attach(old);

    let fresh = node
        .render(&json!({"label": "B"}), &mut dom)
        .unwrap()
        .expect("rendered");

    assert_ne!(fresh, old);
    assert_eq!(node.attached(), Some(fresh));
    assert!(!dom.contains(old));
    assert_eq!(dom.child_nodes(list)[1], fresh);
    assert_eq!(dom.inner_html(list), r#"<li>a</li><li id="slot">B</li><li>c</li>"#);

    let again = node.render(&json!({"label": "BB"}), &mut dom).unwrap();
    assert_eq!(again, node.attached());
    assert_eq!(dom.inner_html(list), r#"<li>a</li><li id="slot">BB</li><li>c</li>"#);
}

#[test]
fn repeated_renders_keep_the_document_size_flat() {
    let mut dom = Dom::parse_document("<main><p>0</p></main>").unwrap();
    let main = dom.child_nodes(dom.root())[0];
    let mut node = Markup::element("p").with_child(get("n"));
    node.attach(dom.child_nodes(main)[0]);
    let before = dom.len();

    for n in 1..=1000 {
        node.render(&json!({"n": n}), &mut dom).unwrap().expect("rendered");
    }

    assert_eq!(dom.len(), before);
    assert!(dom.journal().is_empty());
    assert_eq!(dom.inner_html(main), "<p>1000</p>");
}

#[test]
fn parsed_markup_can_re_render_with_data() {
    let mut dom = Dom::parse_document(
        "<div id=\"card\"><h2>Name</h2><!--dao-func get%20name--></div>",
    )
    .unwrap();
    let card = dom.child_nodes(dom.root())[0];
    let mut node = Parser::default().create_from_dom(&dom, card).unwrap();
    assert_eq!(node.attached(), Some(card));

    node.render(&json!({"name": "Ada"}), &mut dom).unwrap();

    assert_eq!(dom.to_html(dom.root()), r#"<div id="card"><h2>Name</h2>Ada</div>"#);
}
