//! Property tests for page numbering.
//!
//! Random trees of containers, page breaks and person references are
//! serialized to TEI, converted, and checked against a straightforward
//! sequential count.

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use tei2tex::{TEI_NS, TexConfig, convert_str};

#[derive(Debug, Clone)]
enum Node {
    PageBreak,
    Person(usize),
    Wrap(&'static str, Vec<Node>),
}

fn node_strategy() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![Just(Node::PageBreak), (0usize..3).prop_map(Node::Person)];
    leaf.prop_recursive(4, 48, 4, |inner| {
        (
            prop::sample::select(vec!["p", "div", "lg", "l", "reg", "hi", "seg", "ab"]),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(name, children)| Node::Wrap(name, children))
    })
}

fn to_xml(node: &Node, out: &mut String) {
    match node {
        Node::PageBreak => out.push_str("<pb/>"),
        Node::Person(n) => out.push_str(&format!(r##"<persName ref="#p{n}">P{n}</persName>"##)),
        Node::Wrap(name, children) => {
            out.push_str(&format!("<{name}>"));
            for child in children {
                to_xml(child, out);
            }
            out.push_str(&format!("</{name}>"));
        }
    }
}

/// Expected pages per person, and the final page, by plain document-order
/// counting.
fn expected(nodes: &[Node]) -> (BTreeMap<String, BTreeSet<u32>>, u32) {
    fn walk(node: &Node, page: &mut u32, seen: &mut BTreeMap<String, BTreeSet<u32>>) {
        match node {
            Node::PageBreak => *page += 1,
            Node::Person(n) => {
                seen.entry(format!("p{n}")).or_default().insert(*page);
            }
            Node::Wrap(_, children) => {
                for child in children {
                    walk(child, page, seen);
                }
            }
        }
    }

    let mut page = 1;
    let mut seen = BTreeMap::new();
    for node in nodes {
        walk(node, &mut page, &mut seen);
    }
    (seen, page)
}

fn count_page_breaks(nodes: &[Node]) -> u32 {
    nodes
        .iter()
        .map(|node| match node {
            Node::PageBreak => 1,
            Node::Person(_) => 0,
            Node::Wrap(_, children) => count_page_breaks(children),
        })
        .sum()
}

proptest! {
    #[test]
    fn pages_match_document_order(nodes in prop::collection::vec(node_strategy(), 0..6)) {
        let mut body = String::new();
        for node in &nodes {
            to_xml(node, &mut body);
        }
        let source = format!(r#"<TEI xmlns="{TEI_NS}"><text><body>{body}</body></text></TEI>"#);

        let conversion = convert_str(&source, &TexConfig::default()).unwrap();
        let (expected_pages, expected_last) = expected(&nodes);

        prop_assert_eq!(conversion.last_page, 1 + count_page_breaks(&nodes));
        prop_assert_eq!(conversion.last_page, expected_last);

        let actual: BTreeMap<String, BTreeSet<u32>> = conversion
            .occurrences
            .iter()
            .map(|(id, pages)| (id.to_string(), pages.clone()))
            .collect();
        prop_assert_eq!(actual, expected_pages);

        prop_assert_eq!(
            conversion.latex.matches("\\newpage\n").count() as u32,
            // one more for the index section
            count_page_breaks(&nodes) + 1
        );
    }

    #[test]
    fn no_page_breaks_means_page_one(count in 0usize..8) {
        let body: String = (0..count)
            .map(|n| format!(r##"<p><persName ref="#p{n}">x</persName></p>"##))
            .collect();
        let source = format!(r#"<TEI xmlns="{TEI_NS}"><text><body>{body}</body></text></TEI>"#);

        let conversion = convert_str(&source, &TexConfig::default()).unwrap();
        for (_, pages) in conversion.occurrences.iter() {
            prop_assert_eq!(pages.iter().copied().collect::<Vec<_>>(), vec![1]);
        }
        prop_assert_eq!(conversion.occurrences.len(), count);
    }
}
