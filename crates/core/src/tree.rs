//! Catalog trees for menu search.
//!
//! A catalog is an arena of captioned nodes. Children and parents are stored
//! as indices, so the parent back-reference never owns anything and a full
//! path is a walk up the index chain. Catalogs are built once per search
//! session and then only read.

use serde::{Deserialize, Serialize};

/// Separator used when a full path is printed or matched.
pub const PATH_SEPARATOR: &str = " > ";

/// Opaque host command identifier (a menu command id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(pub u32);

/// Opaque settings-dialog control identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlId(pub u32);

/// Which source a catalog was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    /// The host's command menu
    Commands,
    /// The host's settings dialog
    DialogControls,
}

impl CatalogKind {
    /// Group heading shown above results from this catalog
    pub fn name(&self) -> &'static str {
        match self {
            Self::Commands => "Menu",
            Self::DialogControls => "Preferences",
        }
    }
}

/// What a leaf does when activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemIdentity {
    /// Host should run this command
    Command(CommandId),
    /// Host should open its settings dialog at this control
    DialogControl(ControlId),
}

impl ItemIdentity {
    pub fn command_id(&self) -> Option<CommandId> {
        match self {
            Self::Command(id) => Some(*id),
            Self::DialogControl(_) => None,
        }
    }
}

/// Index of a node inside its catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Node {
    caption: String,
    shortcut: Option<String>,
    id: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An ordered tree of captioned items from one source.
#[derive(Clone, Debug)]
pub struct Catalog {
    kind: CatalogKind,
    nodes: Vec<Node>,
}

impl Catalog {
    /// A catalog holding only its unlabeled root
    pub fn new(kind: CatalogKind) -> Self {
        Self {
            kind,
            nodes: vec![Node {
                caption: String::new(),
                shortcut: None,
                id: 0,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the catalog has nothing but its root
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    /// Append a child under `parent`. Children keep insertion order, which is
    /// the catalog order used for display and ranking ties.
    pub fn add_child(&mut self, parent: NodeId, caption: impl Into<String>, id: u32) -> NodeId {
        let child = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            caption: caption.into(),
            shortcut: None,
            id,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(child);
        child
    }

    /// Attach a display-only shortcut to a node
    pub fn set_shortcut(&mut self, node: NodeId, shortcut: impl Into<String>) {
        self.nodes[node.index()].shortcut = Some(shortcut.into());
    }

    pub fn caption(&self, node: NodeId) -> &str {
        &self.nodes[node.index()].caption
    }

    pub fn shortcut(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.index()].shortcut.as_deref()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.index()].children
    }

    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.nodes[node.index()].children.is_empty()
    }

    /// The tagged identity carried by a node of this catalog
    pub fn identity(&self, node: NodeId) -> ItemIdentity {
        let id = self.nodes[node.index()].id;
        match self.kind {
            CatalogKind::Commands => ItemIdentity::Command(CommandId(id)),
            CatalogKind::DialogControls => ItemIdentity::DialogControl(ControlId(id)),
        }
    }

    /// Every leaf reachable from the root, depth-first pre-order.
    /// The root itself is never yielded, so an empty catalog yields nothing.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            catalog: self,
            stack: self.children(self.root()).iter().rev().copied().collect(),
        }
    }

    /// Captions from the root down to `node`. Unlabeled containers
    /// (the root, usually) contribute nothing.
    pub fn full_path(&self, node: NodeId) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let caption = self.caption(id);
            if !caption.is_empty() {
                path.push(caption);
            }
            current = self.parent(id);
        }
        path.reverse();
        path
    }

    /// Printable full path, e.g. `File > Save As`
    pub fn label(&self, node: NodeId) -> String {
        self.full_path(node).join(PATH_SEPARATOR)
    }

    /// Resolve an identity to a leaf of this catalog, first in catalog order
    pub fn find_leaf(&self, identity: ItemIdentity) -> Option<NodeId> {
        self.leaves().find(|&leaf| self.identity(leaf) == identity)
    }
}

/// Lazy depth-first leaf walk. Restartable by calling [`Catalog::leaves`] again.
pub struct Leaves<'a> {
    catalog: &'a Catalog,
    stack: Vec<NodeId>,
}

impl Iterator for Leaves<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(node) = self.stack.pop() {
            let children = self.catalog.children(node);
            if children.is_empty() {
                return Some(node);
            }
            self.stack.extend(children.iter().rev().copied());
        }
        None
    }
}
