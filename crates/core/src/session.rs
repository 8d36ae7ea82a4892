//! Event-driven search session.
//!
//! The host feeds typed [`InputEvent`]s (text edits, key commands, visibility
//! changes, clicks) and renders from the [`OutputEvent`]s handed back. The
//! session owns both catalogs for its lifetime; the recency ledger lives
//! outside and is passed in where a commit may touch it.

use crate::ledger::RecentlyUsed;
use crate::navigation::Navigator;
use crate::results::{build, Position, ResultCap, ResultList, ScoredCandidate};
use crate::tree::{Catalog, ItemIdentity};

/// Key commands the search field forwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    MoveNext,
    MovePrevious,
    NextGroup,
    PreviousGroup,
    Commit,
    Dismiss,
    /// Lift both caps until the query changes or the surface reopens
    ShowMore,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    QueryChanged(String),
    Key(KeyCommand),
    VisibilityChanged(bool),
    /// Mouse selection of a row: select and commit in one step
    Click(Position),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputEvent {
    /// [`SearchSession::results`] has a new list
    ResultsUpdated,
    SelectionChanged(Option<Position>),
    /// Run the command or open the settings dialog at the control
    Activate(ItemIdentity),
    /// Empty the search field
    ClearQuery,
    /// Hide the search surface
    Hide,
}

/// Per-group caps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupCaps {
    pub commands: ResultCap,
    pub dialog: ResultCap,
}

impl GroupCaps {
    pub fn new(commands: usize, dialog: usize) -> Self {
        Self {
            commands: ResultCap::limited(commands),
            dialog: ResultCap::limited(dialog),
        }
    }

    pub fn unbounded() -> Self {
        Self { commands: ResultCap::Unbounded, dialog: ResultCap::Unbounded }
    }
}

impl Default for GroupCaps {
    fn default() -> Self {
        Self::new(15, 10)
    }
}

pub struct SearchSession {
    commands: Catalog,
    dialog: Catalog,
    default_caps: GroupCaps,
    caps: GroupCaps,
    query: String,
    results: ResultList,
    navigator: Navigator,
    visible: bool,
}

impl SearchSession {
    /// A hidden session with an empty query
    pub fn new(commands: Catalog, dialog: Catalog, default_caps: GroupCaps) -> Self {
        Self {
            commands,
            dialog,
            default_caps,
            caps: default_caps,
            query: String::new(),
            results: ResultList::empty(),
            navigator: Navigator::default(),
            visible: false,
        }
    }

    pub fn commands(&self) -> &Catalog {
        &self.commands
    }

    pub fn dialog(&self) -> &Catalog {
        &self.dialog
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn caps(&self) -> GroupCaps {
        self.caps
    }

    pub fn results(&self) -> &ResultList {
        &self.results
    }

    pub fn selection(&self) -> Option<Position> {
        self.navigator.selection()
    }

    pub fn selected(&self) -> Option<&ScoredCandidate> {
        self.navigator.selected(&self.results)
    }

    /// Apply one input event. Events that change nothing return no output.
    pub fn handle(&mut self, event: InputEvent, recent: &mut RecentlyUsed) -> Vec<OutputEvent> {
        match event {
            InputEvent::QueryChanged(text) => {
                self.query = text;
                if !self.visible {
                    return Vec::new();
                }
                self.caps = self.default_caps;
                self.rebuild(false)
            }
            InputEvent::VisibilityChanged(true) => {
                self.visible = true;
                self.caps = self.default_caps;
                self.rebuild(false)
            }
            InputEvent::VisibilityChanged(false) => self.discard(),
            InputEvent::Key(KeyCommand::Dismiss) => self.dismiss(),
            InputEvent::Key(_) | InputEvent::Click(_) if !self.visible => Vec::new(),
            InputEvent::Key(KeyCommand::MoveNext) => self.navigate(Navigator::move_next),
            InputEvent::Key(KeyCommand::MovePrevious) => self.navigate(Navigator::move_previous),
            InputEvent::Key(KeyCommand::NextGroup) => self.navigate(Navigator::next_group),
            InputEvent::Key(KeyCommand::PreviousGroup) => self.navigate(Navigator::previous_group),
            InputEvent::Key(KeyCommand::Commit) => self.commit(recent),
            InputEvent::Key(KeyCommand::ShowMore) => self.show_more(),
            InputEvent::Click(at) => {
                let before = self.selection();
                if !self.navigator.select(&self.results, at) {
                    return Vec::new();
                }
                let mut events = Vec::new();
                if self.selection() != before {
                    events.push(OutputEvent::SelectionChanged(self.selection()));
                }
                events.extend(self.commit(recent));
                events
            }
        }
    }

    /// Switch both groups to unbounded and rebuild, keeping the selection
    /// when it still points at a real entry.
    pub fn show_more(&mut self) -> Vec<OutputEvent> {
        if !self.visible || self.caps == GroupCaps::unbounded() {
            return Vec::new();
        }
        self.caps = GroupCaps::unbounded();
        self.rebuild(true)
    }

    fn rebuild(&mut self, keep_selection: bool) -> Vec<OutputEvent> {
        let before = self.selection();
        self.results = build(
            &self.query,
            &self.commands,
            &self.dialog,
            self.caps.commands,
            self.caps.dialog,
        );
        self.navigator = Navigator::new(&self.results);
        if keep_selection {
            if let Some(at) = before {
                self.navigator.select(&self.results, at);
            }
        }
        vec![
            OutputEvent::ResultsUpdated,
            OutputEvent::SelectionChanged(self.selection()),
        ]
    }

    fn navigate(&mut self, step: fn(&mut Navigator, &ResultList)) -> Vec<OutputEvent> {
        let before = self.selection();
        step(&mut self.navigator, &self.results);
        if self.selection() == before {
            Vec::new()
        } else {
            vec![OutputEvent::SelectionChanged(self.selection())]
        }
    }

    fn commit(&mut self, recent: &mut RecentlyUsed) -> Vec<OutputEvent> {
        let Some(identity) = self.selected().map(|c| c.identity) else {
            return Vec::new();
        };
        if let Some(command) = identity.command_id() {
            recent.record(command);
        }
        log::debug!("activate {:?}", identity);

        self.query.clear();
        self.visible = false;
        self.results = ResultList::empty();
        self.navigator.clear();
        vec![
            OutputEvent::Activate(identity),
            OutputEvent::ClearQuery,
            OutputEvent::Hide,
        ]
    }

    fn dismiss(&mut self) -> Vec<OutputEvent> {
        let had_selection = self.selection().is_some();
        self.navigator.clear();
        self.visible = false;
        self.results = ResultList::empty();
        let mut events = Vec::new();
        if had_selection {
            events.push(OutputEvent::SelectionChanged(None));
        }
        events.push(OutputEvent::Hide);
        events
    }

    fn discard(&mut self) -> Vec<OutputEvent> {
        if !self.visible {
            return Vec::new();
        }
        self.visible = false;
        self.results = ResultList::empty();
        self.navigator.clear();
        vec![OutputEvent::ResultsUpdated, OutputEvent::SelectionChanged(None)]
    }
}
