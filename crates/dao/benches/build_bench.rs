use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use core_types::Document;
use dao::{Flags, Markup, create_from_dom, get, map};
use dom::Dom;
use serde_json::{Value, json};

const SMALL_ROWS: usize = 64;
const LARGE_ROWS: usize = 5_000;

fn make_rows(rows: usize) -> Value {
    let items: Vec<Value> = (0..rows)
        .map(|i| json!({"id": format!("row-{i}"), "label": format!("item {i}"), "n": i}))
        .collect();
    json!({"title": "table", "rows": items})
}

fn table_template() -> Markup {
    let row = Markup::element("tr")
        .with_attr("id", get("id"))
        .with_child(Markup::element("td").with_child(get("label")))
        .with_child(Markup::element("td").with_child(get("n")));
    Markup::element("table")
        .with_child(Markup::element("caption").with_child(get("title")))
        .with_child(map("rows", row))
}

fn bench_build(c: &mut Criterion, name: &str, rows: usize) {
    let data = make_rows(rows);
    c.bench_function(name, |b| {
        b.iter_batched(
            || (table_template(), Dom::new()),
            |(mut template, mut dom)| {
                let node = template.build(black_box(&data), &mut dom).expect("build");
                black_box(node);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_build_small(c: &mut Criterion) {
    bench_build(c, "bench_build_small", SMALL_ROWS);
}

fn bench_build_large(c: &mut Criterion) {
    bench_build(c, "bench_build_large", LARGE_ROWS);
}

fn bench_reverse_parse_large(c: &mut Criterion) {
    let mut markup = String::from("<table>\n");
    for i in 0..LARGE_ROWS {
        markup.push_str(&format!("  <tr id=\"row-{i}\"><td> item {i} </td><td>{i}</td></tr>\n"));
    }
    markup.push_str("</table>");
    let dom = Dom::parse_document(&markup).expect("parse");
    let table = dom.child_nodes(dom.root())[0];
    let flags = Flags::from(Flags::STRIP_WHITESPACE | Flags::TRIM);
    c.bench_function("bench_reverse_parse_large", |b| {
        b.iter(|| {
            let node = create_from_dom(&dom, black_box(table), flags);
            black_box(node.map(|n| n.children().len()));
        });
    });
}

criterion_group!(
    benches,
    bench_build_small,
    bench_build_large,
    bench_reverse_parse_large
);
criterion_main!(benches);
