//! The body walker.
//!
//! [`visit`] turns one element into a LaTeX fragment. The page counter is
//! passed in and the updated value handed back with the fragment, so a later
//! sibling always sees the pages added by everything before it. Person
//! references are recorded into the [`OccurrenceMap`] under the page current
//! at the point where they appear.
//!
//! Which text gets emitted depends on the element kind, see [`NodeKind`].
//! Text sitting directly inside a plain container is not part of the
//! regularized reading and is dropped.

use crate::config::VerseBreak;
use crate::latex;
use crate::occurrences::OccurrenceMap;
use crate::TEI_NS;
use tei_xml::XmlElement;
use tracing::trace;

/// Page number before the first page break.
pub const FIRST_PAGE: u32 = 1;

/// What the walker does with an element, decided by its local name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `pb`: next page.
    PageBreak,
    /// `orig`, `fw`, `lb`: dropped with everything inside.
    Discarded,
    /// `choice`: rendered through its `reg` child only.
    Choice,
    /// `reg`: text, children, then its own tail.
    Regularized,
    /// `hi`: like `reg`, wrapped in `\textit` when `rend` mentions italic.
    Emphasis,
    /// `persName`: its text, plus an occurrence on the current page.
    PersonRef,
    /// `l`: children followed by a line break.
    VerseLine,
    /// `p`, `ab`, `div`, `head`, `lg`: children followed by a newline.
    Block,
    /// Anything else: children only.
    Container,
}

impl NodeKind {
    pub fn of(element: &XmlElement) -> Self {
        match element.local_name() {
            "pb" => NodeKind::PageBreak,
            "orig" | "fw" | "lb" => NodeKind::Discarded,
            "choice" => NodeKind::Choice,
            "reg" => NodeKind::Regularized,
            "hi" => NodeKind::Emphasis,
            "persName" => NodeKind::PersonRef,
            "l" => NodeKind::VerseLine,
            "p" | "ab" | "div" | "head" | "lg" => NodeKind::Block,
            _ => NodeKind::Container,
        }
    }
}

/// Render `node` starting on `page`.
///
/// Returns the fragment and the page number after the node. Never fails:
/// missing attributes read as empty and missing children produce nothing.
/// `verse_break` is appended after each verse line.
pub fn visit(
    node: &XmlElement,
    page: u32,
    occurrences: &mut OccurrenceMap,
    verse_break: VerseBreak,
) -> (String, u32) {
    match NodeKind::of(node) {
        NodeKind::PageBreak => {
            let page = page + 1;
            trace!(page, "page break");
            (latex::PAGE_BREAK.to_string(), page)
        }
        NodeKind::Discarded => (String::new(), page),
        NodeKind::Choice => match node.child(Some(TEI_NS), "reg") {
            Some(reg) => visit(reg, page, occurrences, verse_break),
            None => (String::new(), page),
        },
        NodeKind::Regularized => visit_inline(node, page, occurrences, verse_break),
        NodeKind::Emphasis => {
            let (content, page) = visit_inline(node, page, occurrences, verse_break);
            let rend = node.attribute_ns(None, "rend").unwrap_or_default();
            if rend.contains("italic") {
                (latex::italic(&content), page)
            } else {
                (content, page)
            }
        }
        NodeKind::PersonRef => {
            let reference = node.attribute_ns(None, "ref").unwrap_or_default();
            let id = reference.trim_start_matches('#');
            trace!(id, page, "person reference");
            occurrences.record(id, page);
            (node.text_content(), page)
        }
        NodeKind::VerseLine => {
            let (mut content, page) = visit_children(node, page, occurrences, verse_break);
            content.push_str(latex::line_break(verse_break));
            (content, page)
        }
        NodeKind::Block => {
            let (mut content, page) = visit_children(node, page, occurrences, verse_break);
            content.push('\n');
            (content, page)
        }
        NodeKind::Container => visit_children(node, page, occurrences, verse_break),
    }
}

/// Visit each child in order and concatenate their fragments.
pub fn visit_children(
    node: &XmlElement,
    mut page: u32,
    occurrences: &mut OccurrenceMap,
    verse_break: VerseBreak,
) -> (String, u32) {
    let mut out = String::new();
    for child in &node.children {
        let (fragment, next) = visit(child, page, occurrences, verse_break);
        out.push_str(&fragment);
        page = next;
    }
    (out, page)
}

/// Leading text, children, then the element's own tail.
fn visit_inline(
    node: &XmlElement,
    page: u32,
    occurrences: &mut OccurrenceMap,
    verse_break: VerseBreak,
) -> (String, u32) {
    let (content, page) = visit_children(node, page, occurrences, verse_break);
    (format!("{}{}{}", node.text, content, node.tail), page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// Parse `fragment` as the content of a TEI root and walk its children.
    fn walk(fragment: &str) -> (String, u32, OccurrenceMap) {
        walk_with(fragment, VerseBreak::default())
    }

    fn walk_with(fragment: &str, verse_break: VerseBreak) -> (String, u32, OccurrenceMap) {
        let doc = tei_xml::parse(&format!(r#"<TEI xmlns="{TEI_NS}">{fragment}</TEI>"#)).unwrap();
        let mut occurrences = OccurrenceMap::new();
        let (out, page) = visit_children(&doc.root, FIRST_PAGE, &mut occurrences, verse_break);
        (out, page, occurrences)
    }

    fn pages(occurrences: &OccurrenceMap, id: &str) -> Vec<u32> {
        occurrences
            .pages(id)
            .map(|p| p.iter().copied().collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_node_kinds() {
        let kind = |name: &str| NodeKind::of(&XmlElement::new(name, Some(TEI_NS)));
        assert_eq!(kind("pb"), NodeKind::PageBreak);
        assert_eq!(kind("fw"), NodeKind::Discarded);
        assert_eq!(kind("lb"), NodeKind::Discarded);
        assert_eq!(kind("orig"), NodeKind::Discarded);
        assert_eq!(kind("choice"), NodeKind::Choice);
        assert_eq!(kind("reg"), NodeKind::Regularized);
        assert_eq!(kind("hi"), NodeKind::Emphasis);
        assert_eq!(kind("persName"), NodeKind::PersonRef);
        assert_eq!(kind("l"), NodeKind::VerseLine);
        assert_eq!(kind("ab"), NodeKind::Block);
        assert_eq!(kind("seg"), NodeKind::Container);
    }

    #[test]
    fn test_page_break() {
        let mut occurrences = OccurrenceMap::new();
        let pb = XmlElement::new("pb", Some(TEI_NS));

        let (out, page) = visit(&pb, 4, &mut occurrences, VerseBreak::default());
        assert_eq!(out, "\\newpage\n");
        assert_eq!(page, 5);
    }

    #[test]
    fn test_page_breaks_at_any_depth() {
        let (_, page, _) = walk("<div><pb/><p><seg><pb/></seg></p><lg><l><pb/></l></lg></div><pb/>");
        assert_eq!(page, FIRST_PAGE + 4);
    }

    #[test]
    fn test_page_break_children_are_not_visited() {
        let (out, page, _) = walk("<pb><pb/></pb>");
        assert_eq!(out, "\\newpage\n");
        assert_eq!(page, 2);
    }

    #[test]
    fn test_person_pages_follow_document_order() {
        // Same person after the first and after the second page break
        let (out, page, occurrences) = walk(
            r##"<pb/><p><persName ref="#p1">Jeanne D.</persName></p><pb/><p><persName ref="#p1">Jeanne</persName></p>"##,
        );

        assert_eq!(page, 3);
        assert_eq!(pages(&occurrences, "p1"), vec![2, 3]);
        assert_eq!(out, "\\newpage\nJeanne D.\n\\newpage\nJeanne\n");
    }

    #[test]
    fn test_without_page_breaks_everything_is_on_page_one() {
        let (_, page, occurrences) = walk(
            r##"<p><persName ref="#a">A</persName><persName ref="#b">B</persName></p>
                <div><p><persName ref="#a">A</persName></p></div>"##,
        );

        assert_eq!(page, 1);
        for (_, recorded) in occurrences.iter() {
            assert_eq!(recorded, &BTreeSet::from([1]));
        }
        assert_eq!(occurrences.len(), 2);
    }

    #[test]
    fn test_repeated_reference_on_same_page_collapses() {
        let (_, _, occurrences) = walk(
            r##"<p><persName ref="#p1">J</persName> et <persName ref="#p1">J</persName></p>"##,
        );
        assert_eq!(pages(&occurrences, "p1"), vec![1]);
    }

    #[test]
    fn test_reference_id_normalization() {
        let (_, _, occurrences) = walk(
            r###"<p><persName ref="##double">A</persName><persName>B</persName><persName ref="plain">C</persName></p>"###,
        );

        assert!(occurrences.contains("double"));
        assert!(occurrences.contains(""));
        assert!(occurrences.contains("plain"));
    }

    #[test]
    fn test_person_text_is_full_content_without_tail() {
        let (out, _, _) = walk(
            r##"<reg><persName ref="#p1">Jeanne <hi rend="italic">la</hi> Grande</persName> dropped</reg>"##,
        );
        assert_eq!(out, "Jeanne la Grande");
    }

    #[test]
    fn test_choice_keeps_regularized_italic() {
        let (out, _, _) = walk(
            r#"<choice><orig>aynsi</orig><reg><hi rend="italic">ainsi</hi></reg></choice>"#,
        );
        assert_eq!(out, "\\textit{ainsi}");
        assert!(!out.contains("aynsi"));
    }

    #[test]
    fn test_choice_without_reg_is_empty() {
        let (out, page, _) = walk(r#"<choice><orig>aynsi<pb/></orig><sic>x</sic></choice>"#);
        assert_eq!(out, "");
        assert_eq!(page, 1);
    }

    #[test]
    fn test_discarded_subtrees_hide_everything() {
        let (out, page, occurrences) = walk(
            r##"<p><fw>Folio 3<pb/></fw><orig><persName ref="#x">X</persName></orig><reg>kept</reg><lb/></p>"##,
        );

        assert_eq!(out, "kept\n");
        assert_eq!(page, 1);
        assert!(occurrences.is_empty());
    }

    #[test]
    fn test_regularized_includes_text_children_and_tail() {
        let (out, _, _) = walk(r#"<seg><reg>Ma <reg>très</reg> chère</reg> amie</seg>"#);
        // Each reg carries its own tail
        assert_eq!(out, "Ma très chère amie");
    }

    #[test]
    fn test_emphasis_without_italic_is_unwrapped() {
        let (out, _, _) = walk(r#"<reg><hi rend="bold">fort</hi><hi>plain</hi></reg>"#);
        assert_eq!(out, "fortplain");
    }

    #[test]
    fn test_emphasis_wraps_its_tail() {
        let (out, _, _) = walk(r#"<reg><hi rend="italic small-caps">ainsi</hi> soit-il</reg>"#);
        assert_eq!(out, "\\textit{ainsi soit-il}");
    }

    #[test]
    fn test_verse_line_gets_one_line_break() {
        let (out, _, _) = walk(r#"<l><reg>Le ciel </reg><seg><reg>est bleu</reg></seg></l>"#);
        assert_eq!(out, "Le ciel est bleu \\\\n");
        assert_eq!(out.matches("\\\\").count(), 1);
    }

    #[test]
    fn test_verse_group_stays_on_one_line_by_default() {
        let (out, _, _) = walk("<lg><l><reg>a</reg><reg>b</reg></l><l><reg>c</reg></l></lg>");
        assert_eq!(out, "ab \\\\nc \\\\n\n");
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_verse_break_newline_style() {
        let (out, _, _) = walk_with(
            "<lg><l><reg>a</reg><reg>b</reg></l><l><reg>c</reg></l></lg>",
            VerseBreak::Newline,
        );
        assert_eq!(out, "ab \\\\\nc \\\\\n\n");
    }

    #[test]
    fn test_verse_line_text_outside_reg_is_dropped() {
        let (out, _, _) = walk(r#"<lg><l>raw <seg>lost</seg> raw <reg>kept</reg></l></lg>"#);
        assert_eq!(out, "kept \\\\n\n");
    }

    #[test]
    fn test_block_containers_end_with_newline() {
        for name in ["p", "ab", "div", "head", "lg"] {
            let (out, _, _) = walk(&format!("<{name}><reg>x</reg></{name}>"));
            assert_eq!(out, "x\n", "<{name}>");
        }
        let (out, _, _) = walk("<seg><reg>x</reg></seg>");
        assert_eq!(out, "x");
    }

    #[test]
    fn test_empty_unknown_element() {
        let (out, page, occurrences) = walk("<gap/>");
        assert_eq!(out, "");
        assert_eq!(page, 1);
        assert!(occurrences.is_empty());
    }

    #[test]
    fn test_reg_outside_tei_namespace_is_not_chosen() {
        let (out, _, _) = walk(r#"<choice><reg xmlns="urn:other">x</reg></choice>"#);
        assert_eq!(out, "");
    }
}
