//! Relevance scoring of one catalog leaf against a typed query.
//!
//! Every query word must occur somewhere in the leaf's full path (AND
//! semantics, case-insensitive substring). Surviving leaves are scored from
//! three factors, each in [0, 1]:
//!
//! - coverage: share of the path's words that some query word lands in
//! - boundary: how well each query word lines up with a whole path word
//!   (exact word > word prefix > mid-word)
//! - caption: share of query words found in the leaf's own caption
//!
//! The weighted sum sits above a small floor so a leaf that passes the AND
//! filter never scores 0.

use crate::tree::{Catalog, NodeId, PATH_SEPARATOR};

const SCORE_FLOOR: f32 = 0.05;
const COVERAGE_WEIGHT: f32 = 0.6;
const BOUNDARY_WEIGHT: f32 = 0.25;
const CAPTION_WEIGHT: f32 = 0.15;

/// Boundary credit for a query word that is exactly one path word
const WHOLE_WORD: f32 = 1.0;
/// Boundary credit for a query word that starts a path word
const WORD_PREFIX: f32 = 0.5;

/// The live search text, split into case-folded words.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    words: Vec<String>,
}

impl Query {
    /// Split on whitespace; blank text gives an empty query.
    pub fn parse(text: &str) -> Self {
        Self {
            words: text.split_whitespace().map(str::to_lowercase).collect(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Alphanumeric runs of every path segment, in path order.
fn target_words(segments: &[String]) -> Vec<&str> {
    segments
        .iter()
        .flat_map(|caption| caption.split(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect()
}

fn boundary_credit(word: &str, targets: &[&str]) -> f32 {
    let mut best = 0.0f32;
    for target in targets {
        if *target == word {
            return WHOLE_WORD;
        }
        if target.starts_with(word) {
            best = best.max(WORD_PREFIX);
        }
    }
    best
}

/// Score `leaf` against `query`. Returns 0.0 when the query is empty or any
/// word is missing from the path; otherwise a value in (0, 1].
pub fn score(catalog: &Catalog, leaf: NodeId, query: &Query) -> f32 {
    if query.is_empty() {
        return 0.0;
    }

    let segments: Vec<String> = catalog
        .full_path(leaf)
        .into_iter()
        .map(str::to_lowercase)
        .collect();
    let target = segments.join(PATH_SEPARATOR);

    if !query.words().iter().all(|word| target.contains(word.as_str())) {
        return 0.0;
    }

    let words = target_words(&segments);
    let query_len = query.words().len() as f32;

    let coverage = if words.is_empty() {
        0.0
    } else {
        let hit = words
            .iter()
            .filter(|w| query.words().iter().any(|q| w.contains(q.as_str())))
            .count();
        hit as f32 / words.len() as f32
    };

    let boundary = query
        .words()
        .iter()
        .map(|q| boundary_credit(q, &words))
        .sum::<f32>()
        / query_len;

    let caption = match segments.last() {
        Some(own) => {
            query
                .words()
                .iter()
                .filter(|q| own.contains(q.as_str()))
                .count() as f32
                / query_len
        }
        None => 0.0,
    };

    let weighted = COVERAGE_WEIGHT * coverage + BOUNDARY_WEIGHT * boundary + CAPTION_WEIGHT * caption;
    (SCORE_FLOOR + (1.0 - SCORE_FLOOR) * weighted).clamp(SCORE_FLOOR, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::tests::sample_menu;
    use crate::tree::CatalogKind;

    fn leaf_by_label(catalog: &Catalog, label: &str) -> NodeId {
        catalog
            .leaves()
            .find(|&leaf| catalog.label(leaf) == label)
            .unwrap()
    }

    #[test]
    fn test_query_parse() {
        assert!(Query::parse("").is_empty());
        assert!(Query::parse("   \t ").is_empty());
        assert_eq!(Query::parse("  Save  AS ").words(), &["save", "as"]);
    }

    #[test]
    fn test_empty_query_scores_zero() {
        let menu = sample_menu();
        for leaf in menu.leaves() {
            assert_eq!(score(&menu, leaf, &Query::parse("")), 0.0);
        }
    }

    #[test]
    fn test_missing_word_scores_zero() {
        let menu = sample_menu();
        let find = leaf_by_label(&menu, "Edit > Find");
        assert_eq!(score(&menu, find, &Query::parse("save")), 0.0);
        // Both words required
        let save = leaf_by_label(&menu, "File > Save");
        assert_eq!(score(&menu, save, &Query::parse("save as")), 0.0);
        assert!(score(&menu, leaf_by_label(&menu, "File > Save As"), &Query::parse("save as")) > 0.0);
    }

    #[test]
    fn test_case_insensitive() {
        let menu = sample_menu();
        let find = leaf_by_label(&menu, "Edit > Find");
        assert_eq!(
            score(&menu, find, &Query::parse("FIND")),
            score(&menu, find, &Query::parse("find"))
        );
        assert!(score(&menu, find, &Query::parse("eDiT")) > 0.0);
    }

    #[test]
    fn test_shorter_path_outranks_longer() {
        let menu = sample_menu();
        let save = score(&menu, leaf_by_label(&menu, "File > Save"), &Query::parse("save"));
        let save_as = score(&menu, leaf_by_label(&menu, "File > Save As"), &Query::parse("save"));
        assert!(save > save_as, "{save} should beat {save_as}");
    }

    #[test]
    fn test_whole_word_outranks_mid_word() {
        let mut menu = Catalog::new(CatalogKind::Commands);
        let root = menu.root();
        let view = menu.add_child(root, "View", 0);
        let tab = menu.add_child(view, "Tab", 1);
        let stab = menu.add_child(view, "Stab", 2);

        let q = Query::parse("tab");
        assert!(score(&menu, tab, &q) > score(&menu, stab, &q));
    }

    #[test]
    fn test_prefix_outranks_mid_word() {
        let mut menu = Catalog::new(CatalogKind::Commands);
        let root = menu.root();
        let view = menu.add_child(root, "View", 0);
        let tabs = menu.add_child(view, "Tabs", 1);
        let stabs = menu.add_child(view, "Stabs", 2);

        let q = Query::parse("tab");
        assert!(score(&menu, tabs, &q) > score(&menu, stabs, &q));
    }

    #[test]
    fn test_caption_match_outranks_ancestor_match() {
        let mut menu = Catalog::new(CatalogKind::Commands);
        let root = menu.root();
        let macros = menu.add_child(root, "Macro", 0);
        let run = menu.add_child(macros, "Run", 1);
        let tools = menu.add_child(root, "Tools", 0);
        let run_macro = menu.add_child(tools, "Macro", 2);

        // Same word counts, but the second leaf matches in its own caption
        let q = Query::parse("macro");
        assert!(score(&menu, run_macro, &q) > score(&menu, run, &q));
    }

    #[test]
    fn test_score_bounds() {
        let menu = sample_menu();
        for text in ["s", "save", "file save", "e", "edit find", ">"] {
            let q = Query::parse(text);
            for leaf in menu.leaves() {
                let s = score(&menu, leaf, &q);
                assert!((0.0..=1.0).contains(&s), "{text}: {s}");
            }
        }
    }

    #[test]
    fn test_full_match_scores_one() {
        let mut menu = Catalog::new(CatalogKind::Commands);
        let root = menu.root();
        let about = menu.add_child(root, "About", 7);
        let s = score(&menu, about, &Query::parse("about"));
        assert!((s - 1.0).abs() < 1e-6, "{s}");
    }

    #[test]
    fn test_more_words_covered_scores_higher() {
        let menu = sample_menu();
        let find = leaf_by_label(&menu, "Edit > Find");
        let one = score(&menu, find, &Query::parse("find"));
        let both = score(&menu, find, &Query::parse("edit find"));
        assert!(both > one, "{both} should beat {one}");
    }
}
