//! The index of persons.

use crate::latex;
use crate::occurrences::OccurrenceMap;
use crate::registry::PersonRegistry;
use tracing::debug;

/// Render the index section.
///
/// Entries follow the registry's declaration order. A declared person who is
/// never referenced gets no entry, and references to undeclared identifiers
/// are left out.
pub fn render_index(registry: &PersonRegistry, occurrences: &OccurrenceMap, heading: &str) -> String {
    let mut out = String::new();
    out.push_str(latex::PAGE_BREAK);
    out.push_str(&latex::unnumbered_section(heading));
    out.push_str(latex::BEGIN_ITEMIZE);

    for (id, name) in registry.iter() {
        let Some(pages) = occurrences.pages(id).filter(|pages| !pages.is_empty()) else {
            continue;
        };
        let pages = pages
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&latex::item(name, &pages));
    }

    out.push_str(latex::END_ITEMIZE);

    let undeclared = occurrences.ids().filter(|id| !registry.contains(id)).count();
    if undeclared > 0 {
        debug!(undeclared, "references to undeclared persons left out of the index");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADING: &str = "Index des personnes";

    #[test]
    fn test_entries_follow_registry_order() {
        let mut registry = PersonRegistry::new();
        registry.insert("zoe", "Zoé");
        registry.insert("adam", "Adam");

        let mut occurrences = OccurrenceMap::new();
        occurrences.record("adam", 1);
        occurrences.record("zoe", 4);
        occurrences.record("zoe", 2);
        occurrences.record("zoe", 4);

        assert_eq!(
            render_index(&registry, &occurrences, HEADING),
            "\\newpage\n\
             \\section*{Index des personnes}\n\
             \\begin{itemize}\n  \
             \\item Zoé: 2, 4\n  \
             \\item Adam: 1\n\
             \\end{itemize}\n"
        );
    }

    #[test]
    fn test_unreferenced_and_undeclared_are_skipped() {
        let mut registry = PersonRegistry::new();
        registry.insert("p1", "Jeanne");
        registry.insert("p2", "Louis");

        let mut occurrences = OccurrenceMap::new();
        occurrences.record("p1", 2);
        occurrences.record("p1", 3);
        occurrences.record("ghost", 1);

        let index = render_index(&registry, &occurrences, HEADING);
        assert!(index.contains("  \\item Jeanne: 2, 3\n"));
        assert!(!index.contains("Louis"));
        assert!(!index.contains("ghost"));
    }

    #[test]
    fn test_empty_index_still_has_frame() {
        let index = render_index(&PersonRegistry::new(), &OccurrenceMap::new(), HEADING);
        assert_eq!(
            index,
            "\\newpage\n\\section*{Index des personnes}\n\\begin{itemize}\n\\end{itemize}\n"
        );
    }
}
