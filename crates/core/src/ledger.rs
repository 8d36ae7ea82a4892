//! Recently used commands.
//!
//! Most recent first, one entry per command, bounded. Entries are plain
//! command ids so they survive catalog rebuilds; lookups resolve them
//! against whatever catalog is current and skip ids that no longer exist.

use std::collections::VecDeque;

use crate::tree::{Catalog, CommandId, ItemIdentity, NodeId};

pub const DEFAULT_RECENT_LIMIT: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentlyUsed {
    entries: VecDeque<CommandId>,
    limit: usize,
}

impl RecentlyUsed {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Rebuild from persisted ids (most recent first), dropping duplicates
    /// after their first occurrence and anything past the limit.
    pub fn from_entries(entries: impl IntoIterator<Item = CommandId>, limit: usize) -> Self {
        let mut ledger = Self::new(limit);
        for id in entries {
            if ledger.entries.len() == ledger.limit {
                break;
            }
            if !ledger.entries.contains(&id) {
                ledger.entries.push_back(id);
            }
        }
        ledger
    }

    /// Record an activation: move `id` to the front and trim to the limit
    pub fn record(&mut self, id: CommandId) {
        self.entries.retain(|c| *c != id);
        self.entries.push_front(id);
        self.entries.truncate(self.limit);
        log::debug!("recently used: {:?} ({} entries)", id, self.entries.len());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Most recent first
    pub fn entries(&self) -> impl Iterator<Item = CommandId> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Most recent command that still exists in `commands` and is not
    /// `excluding` (the "repeat" command itself).
    pub fn most_recent_valid(&self, commands: &Catalog, excluding: Option<CommandId>) -> Option<NodeId> {
        self.resolve(commands, excluding).map(|(_, node)| node)
    }

    /// What a "repeat previous command" menu item should show.
    pub fn repeat_action(&self, commands: &Catalog, excluding: Option<CommandId>) -> RepeatAction {
        match self.resolve(commands, excluding) {
            Some((command, node)) => RepeatAction::Available {
                command,
                label: format!("Repeat \"{}\"", commands.label(node)),
            },
            None => RepeatAction::Unavailable,
        }
    }

    fn resolve(&self, commands: &Catalog, excluding: Option<CommandId>) -> Option<(CommandId, NodeId)> {
        self.entries
            .iter()
            .filter(|&&id| Some(id) != excluding)
            .find_map(|&id| {
                commands
                    .find_leaf(ItemIdentity::Command(id))
                    .map(|node| (id, node))
            })
    }
}

impl Default for RecentlyUsed {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_LIMIT)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RepeatAction {
    /// Enable the item; invoking it runs `command`
    Available { command: CommandId, label: String },
    /// Disable the item; invoking it should signal failure to the user
    Unavailable,
}
