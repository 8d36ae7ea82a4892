//! Grouped, capped result lists.
//!
//! Each catalog is ranked on its own and becomes one group. A group that had
//! more candidates than its cap shows `cap - 1` real results followed by an
//! overflow marker, so the user is told to refine rather than shown an
//! arbitrary extra row.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::scoring::{score, Query};
use crate::tree::{Catalog, CatalogKind, ItemIdentity, NodeId};

/// How many entries a group may show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultCap {
    Limited(usize),
    /// "Show more" mode: never truncate
    Unbounded,
}

impl ResultCap {
    /// A limited cap; zero is raised to one so a marker always has a slot.
    pub fn limited(n: usize) -> Self {
        Self::Limited(n.max(1))
    }
}

/// One leaf that matched the query.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredCandidate {
    pub node: NodeId,
    pub identity: ItemIdentity,
    /// Full path, e.g. `File > Save As`
    pub label: String,
    pub shortcut: Option<String>,
    pub score: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResultEntry {
    Candidate(ScoredCandidate),
    /// Placeholder for `hidden` further candidates; never selectable
    Overflow { hidden: usize },
}

impl ResultEntry {
    pub fn is_selectable(&self) -> bool {
        matches!(self, Self::Candidate(_))
    }

    pub fn candidate(&self) -> Option<&ScoredCandidate> {
        match self {
            Self::Candidate(c) => Some(c),
            Self::Overflow { .. } => None,
        }
    }

    /// Display text for a list row
    pub fn display(&self) -> &str {
        match self {
            Self::Candidate(c) => &c.label,
            Self::Overflow { .. } => "...",
        }
    }
}

/// Results from one catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultGroup {
    kind: CatalogKind,
    entries: Vec<ResultEntry>,
    total: usize,
}

impl ResultGroup {
    pub fn empty(kind: CatalogKind) -> Self {
        Self { kind, entries: Vec::new(), total: 0 }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Candidates that survived filtering, before the cap
    pub fn total_candidates(&self) -> usize {
        self.total
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self.entries.last(), Some(ResultEntry::Overflow { .. }))
    }

    pub fn first_selectable(&self) -> Option<usize> {
        self.entries.iter().position(ResultEntry::is_selectable)
    }

    pub fn has_selectable(&self) -> bool {
        self.first_selectable().is_some()
    }
}

/// Address of one entry in a [`ResultList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub group: usize,
    pub index: usize,
}

/// The full result list: commands group first, then dialog controls.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultList {
    groups: Vec<ResultGroup>,
}

impl ResultList {
    pub fn empty() -> Self {
        Self {
            groups: vec![
                ResultGroup::empty(CatalogKind::Commands),
                ResultGroup::empty(CatalogKind::DialogControls),
            ],
        }
    }

    pub fn groups(&self) -> &[ResultGroup] {
        &self.groups
    }

    pub fn group(&self, kind: CatalogKind) -> Option<&ResultGroup> {
        self.groups.iter().find(|g| g.kind == kind)
    }

    pub fn entry(&self, at: Position) -> Option<&ResultEntry> {
        self.groups.get(at.group)?.entries.get(at.index)
    }

    /// Entry count across groups, markers included
    pub fn len(&self) -> usize {
        self.groups.iter().map(ResultGroup::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(ResultGroup::is_empty)
    }

    /// Selectable entries in display order (groups concatenated)
    pub fn selectable_positions(&self) -> Vec<Position> {
        self.groups
            .iter()
            .enumerate()
            .flat_map(|(group, g)| {
                g.entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.is_selectable())
                    .map(move |(index, _)| Position { group, index })
            })
            .collect()
    }

    /// The recommended initial selection: first selectable entry overall
    pub fn default_selection(&self) -> Option<Position> {
        self.groups.iter().enumerate().find_map(|(group, g)| {
            g.first_selectable().map(|index| Position { group, index })
        })
    }
}

impl Default for ResultList {
    fn default() -> Self {
        Self::empty()
    }
}

/// Score every leaf of `catalog`, drop non-matches, and sort by descending
/// score. The sort is stable, so equal scores keep catalog order.
pub fn rank(catalog: &Catalog, query: &Query) -> Vec<ScoredCandidate> {
    let mut ranked: Vec<ScoredCandidate> = catalog
        .leaves()
        .filter_map(|leaf| {
            let score = score(catalog, leaf, query);
            (score > 0.0).then(|| ScoredCandidate {
                node: leaf,
                identity: catalog.identity(leaf),
                label: catalog.label(leaf),
                shortcut: catalog.shortcut(leaf).map(str::to_string),
                score,
            })
        })
        .collect();
    ranked.sort_by_key(|c| Reverse(OrderedFloat(c.score)));
    ranked
}

/// Apply a cap to ranked candidates, marking overflow in the last slot.
pub fn cap_group(kind: CatalogKind, ranked: Vec<ScoredCandidate>, cap: ResultCap) -> ResultGroup {
    let total = ranked.len();
    let limit = match cap {
        ResultCap::Limited(n) => n.max(1),
        ResultCap::Unbounded => usize::MAX,
    };

    let entries = if total > limit {
        let shown = limit - 1;
        let mut entries: Vec<ResultEntry> = ranked
            .into_iter()
            .take(shown)
            .map(ResultEntry::Candidate)
            .collect();
        entries.push(ResultEntry::Overflow { hidden: total - shown });
        entries
    } else {
        ranked.into_iter().map(ResultEntry::Candidate).collect()
    };

    ResultGroup { kind, entries, total }
}

/// Build the grouped result list for `query_text` over both catalogs.
pub fn build(
    query_text: &str,
    commands: &Catalog,
    dialog: &Catalog,
    command_cap: ResultCap,
    dialog_cap: ResultCap,
) -> ResultList {
    let query = Query::parse(query_text);
    if query.is_empty() {
        return ResultList::empty();
    }

    let list = ResultList {
        groups: vec![
            cap_group(CatalogKind::Commands, rank(commands, &query), command_cap),
            cap_group(CatalogKind::DialogControls, rank(dialog, &query), dialog_cap),
        ],
    };
    log::debug!(
        "query {:?}: {} command / {} preference candidates",
        query_text,
        list.groups[0].total,
        list.groups[1].total
    );
    list
}
