//! Keyboard navigation over a grouped result list.
//!
//! Up/Down walk the flattened list of selectable entries and wrap at either
//! end. Tab/Shift+Tab jump to the first entry of the next/previous group
//! that has anything selectable, wrapping around the group ring. Overflow
//! markers are never selected.

use crate::results::{Position, ResultList, ScoredCandidate};

/// Current selection over one [`ResultList`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Navigator {
    selection: Option<Position>,
}

impl Navigator {
    /// Fresh state for a newly built list: its default selection
    pub fn new(results: &ResultList) -> Self {
        Self { selection: results.default_selection() }
    }

    pub fn selection(&self) -> Option<Position> {
        self.selection
    }

    /// The selected candidate, if the selection points at one
    pub fn selected<'a>(&self, results: &'a ResultList) -> Option<&'a ScoredCandidate> {
        results.entry(self.selection?)?.candidate()
    }

    /// Select `at` if it is a selectable entry. Returns whether it was taken.
    pub fn select(&mut self, results: &ResultList, at: Position) -> bool {
        match results.entry(at) {
            Some(entry) if entry.is_selectable() => {
                self.selection = Some(at);
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.selection = None;
    }

    /// Down arrow. With nothing selected, selects the first entry.
    pub fn move_next(&mut self, results: &ResultList) {
        let positions = results.selectable_positions();
        if positions.is_empty() {
            return;
        }
        let next = match self.current_index(&positions) {
            Some(i) => (i + 1) % positions.len(),
            None => 0,
        };
        self.selection = Some(positions[next]);
    }

    /// Up arrow. With nothing selected, selects the first entry.
    pub fn move_previous(&mut self, results: &ResultList) {
        let positions = results.selectable_positions();
        if positions.is_empty() {
            return;
        }
        let previous = match self.current_index(&positions) {
            Some(0) => positions.len() - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.selection = Some(positions[previous]);
    }

    /// Tab. Lands on the first entry of the next non-empty group; with a
    /// single non-empty group this returns to that group's first entry.
    pub fn next_group(&mut self, results: &ResultList) {
        let count = results.groups().len();
        // Nothing selected behaves as if the last group were current
        let start = self.selection.map(|p| p.group).unwrap_or(count.saturating_sub(1));
        self.cycle_group(results, (1..=count).map(|step| (start + step) % count));
    }

    /// Shift+Tab. Mirror of [`Navigator::next_group`].
    pub fn previous_group(&mut self, results: &ResultList) {
        let count = results.groups().len();
        let start = self.selection.map(|p| p.group).unwrap_or(0);
        self.cycle_group(results, (1..=count).map(|step| (start + count - step) % count));
    }

    fn cycle_group(&mut self, results: &ResultList, order: impl Iterator<Item = usize>) {
        for group in order {
            if let Some(index) = results.groups()[group].first_selectable() {
                self.selection = Some(Position { group, index });
                return;
            }
        }
    }

    fn current_index(&self, positions: &[Position]) -> Option<usize> {
        let current = self.selection?;
        positions.iter().position(|&p| p == current)
    }
}
