//! Catalog snapshots.
//!
//! Hosts hand the engine an already-parsed picture of their menu or settings
//! dialog. The snapshot form is a plain nested list that serializes to JSON
//! or TOML; [`Catalog::from_snapshot`] turns it into the arena tree.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::tree::{Catalog, CatalogKind, NodeId};

/// One catalog as handed over by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSnapshot {
    pub items: Vec<SnapshotItem>,
}

/// A node in the snapshot. Leaves carry the host id; containers usually
/// leave it at 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotItem {
    pub caption: String,
    pub id: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SnapshotItem>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub separator: bool,
}

impl SnapshotItem {
    fn is_separator(&self) -> bool {
        self.separator || (self.caption.trim().is_empty() && self.children.is_empty())
    }
}

/// Split a raw host caption into its display text and shortcut.
///
/// `&` marks the mnemonic letter and is dropped; `&&` is a literal ampersand.
/// Anything after a tab is the accelerator text.
pub fn normalize_caption(raw: &str) -> (String, Option<String>) {
    let (text, shortcut) = match raw.split_once('\t') {
        Some((text, shortcut)) => (text, Some(shortcut.trim())),
        None => (raw, None),
    };

    let mut caption = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '&' {
            if chars.peek() == Some(&'&') {
                chars.next();
                caption.push('&');
            }
            continue;
        }
        caption.push(c);
    }

    let shortcut = shortcut.filter(|s| !s.is_empty()).map(str::to_string);
    (caption.trim().to_string(), shortcut)
}

impl Catalog {
    /// Build a catalog from a host snapshot, dropping separators.
    pub fn from_snapshot(kind: CatalogKind, snapshot: &CatalogSnapshot) -> Self {
        let mut catalog = Catalog::new(kind);
        let root = catalog.root();
        for item in &snapshot.items {
            catalog.insert_snapshot_item(root, item);
        }
        catalog
    }

    fn insert_snapshot_item(&mut self, parent: NodeId, item: &SnapshotItem) {
        if item.is_separator() {
            return;
        }
        let (caption, shortcut) = normalize_caption(&item.caption);
        let node = self.add_child(parent, caption, item.id);
        if let Some(shortcut) = shortcut {
            self.set_shortcut(node, shortcut);
        }
        for child in &item.children {
            self.insert_snapshot_item(node, child);
        }
    }
}

/// Parse snapshot text. `format` is a file extension: `json` or `toml`.
pub fn parse_snapshot(contents: &str, format: &str) -> Result<CatalogSnapshot, CatalogError> {
    match format.to_ascii_lowercase().as_str() {
        "json" => serde_json::from_str(contents).map_err(|e| CatalogError::Parse(e.to_string())),
        "toml" => toml::from_str(contents).map_err(|e| CatalogError::Parse(e.to_string())),
        other => Err(CatalogError::UnsupportedFormat(other.to_string())),
    }
}

/// Load one catalog from a snapshot file.
pub fn load_catalog(path: &Path, kind: CatalogKind) -> Result<Catalog, CatalogError> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_string();
    let contents = fs::read_to_string(path)
        .map_err(|e| CatalogError::Io(format!("{}: {e}", path.display())))?;
    let snapshot = parse_snapshot(&contents, &format)?;
    let catalog = Catalog::from_snapshot(kind, &snapshot);
    log::debug!(
        "Loaded {} catalog from {} ({} nodes)",
        kind.name(),
        path.display(),
        catalog.len()
    );
    Ok(catalog)
}

/// Load one catalog, degrading to an empty tree when the document is missing
/// or broken. The other source keeps working either way.
pub fn load_catalog_or_empty(path: &Path, kind: CatalogKind) -> Catalog {
    match load_catalog(path, kind) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::warn!("{} catalog unavailable, continuing without it: {e}", kind.name());
            Catalog::new(kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MENU_JSON: &str = r#"{
        "items": [
            { "caption": "&File", "children": [
                { "caption": "&Save\tCtrl+S", "id": 41006 },
                { "caption": "Save &As...\tCtrl+Alt+S", "id": 41008 },
                { "separator": true },
                { "caption": "E&xit", "id": 41011 }
            ]},
            { "caption": "&Search", "children": [
                { "caption": "Find && Replace", "id": 42020 },
                { "caption": "" }
            ]}
        ]
    }"#;

    #[test]
    fn test_normalize_caption() {
        assert_eq!(normalize_caption("&Save\tCtrl+S"), ("Save".into(), Some("Ctrl+S".into())));
        assert_eq!(normalize_caption("Find && Replace"), ("Find & Replace".into(), None));
        assert_eq!(normalize_caption("Plain"), ("Plain".into(), None));
        assert_eq!(normalize_caption("Trailing\t"), ("Trailing".into(), None));
    }

    #[test]
    fn test_from_snapshot_drops_separators() {
        let snapshot = parse_snapshot(MENU_JSON, "json").unwrap();
        let menu = Catalog::from_snapshot(CatalogKind::Commands, &snapshot);

        let labels: Vec<String> = menu.leaves().map(|leaf| menu.label(leaf)).collect();
        assert_eq!(
            labels,
            vec!["File > Save", "File > Save As...", "File > Exit", "Search > Find & Replace"]
        );

        let save = menu.leaves().next().unwrap();
        assert_eq!(menu.shortcut(save), Some("Ctrl+S"));
    }

    #[test]
    fn test_parse_toml_snapshot() {
        let toml_src = r#"
[[items]]
caption = "Global Styles"

[[items.children]]
caption = "Enable global font"
id = 2213
"#;
        let snapshot = parse_snapshot(toml_src, "toml").unwrap();
        let prefs = Catalog::from_snapshot(CatalogKind::DialogControls, &snapshot);
        let leaf = prefs.leaves().next().unwrap();
        assert_eq!(prefs.label(leaf), "Global Styles > Enable global font");
    }

    #[test]
    fn test_unsupported_format() {
        let err = parse_snapshot("<xml/>", "xml").unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFormat(ext) if ext == "xml"));
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(MENU_JSON.as_bytes()).unwrap();

        let menu = load_catalog(file.path(), CatalogKind::Commands).unwrap();
        assert_eq!(menu.leaves().count(), 4);
    }

    #[test]
    fn test_missing_dialog_catalog_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = load_catalog_or_empty(&dir.path().join("missing.json"), CatalogKind::DialogControls);
        assert!(prefs.is_empty());
        assert_eq!(prefs.kind(), CatalogKind::DialogControls);
    }

    #[test]
    fn test_corrupt_catalog_degrades_to_empty() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{ not json").unwrap();

        assert!(matches!(
            load_catalog(file.path(), CatalogKind::DialogControls),
            Err(CatalogError::Parse(_))
        ));
        assert!(load_catalog_or_empty(file.path(), CatalogKind::DialogControls).is_empty());
    }
}
