use crate::date_index::DateIndex;

/// A request to change the selected date. Produced by the slider, the step
/// buttons and the playback timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Select(usize),
    Next,
    Previous,
    First,
}

/// The one active date selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    index: usize,
    date: Option<String>,
}

impl SelectionState {
    /// Starts at the earliest date (or nothing, for an empty index).
    pub fn initial(dates: &DateIndex) -> Self {
        Self {
            index: 0,
            date: dates.initial().map(str::to_string),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Apply an event against `dates`. Returns whether the selection moved.
    ///
    /// Indices past the end clamp to the last date; stepping stops at either end.
    pub fn apply(&mut self, event: SelectionEvent, dates: &DateIndex) -> bool {
        let Some(last) = dates.last_index() else {
            return false;
        };
        let target = match event {
            SelectionEvent::Select(index) => index.min(last),
            SelectionEvent::Next => (self.index + 1).min(last),
            SelectionEvent::Previous => self.index.saturating_sub(1),
            SelectionEvent::First => 0,
        };
        if target == self.index && self.date.is_some() {
            return false;
        }
        self.index = target;
        self.date = dates.get(target).map(str::to_string);
        true
    }

    pub fn at_end(&self, dates: &DateIndex) -> bool {
        dates.last_index().is_none_or(|last| self.index >= last)
    }
}
