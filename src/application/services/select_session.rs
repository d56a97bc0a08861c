use crate::domain::sidebar::MatchValue;

/// State of an incremental channel search.
///
/// The session owns the query and the highlighted match; the sidebar engine
/// only reads them. Selection is tracked by [`MatchValue`] so it survives as
/// the candidate set narrows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectSession {
    enabled: bool,
    query: String,
    selected: Option<MatchValue>,
}

impl SelectSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.enabled = true;
        self.query.clear();
        self.selected = None;
    }

    pub fn cancel(&mut self) {
        self.enabled = false;
        self.query.clear();
        self.selected = None;
    }

    /// Returns whether select mode was entered, regardless of the query.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns whether results should be filtered: the mode is on and the
    /// query is non-empty.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && !self.query.is_empty()
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn selected(&self) -> Option<&MatchValue> {
        self.selected.as_ref()
    }

    pub fn set_selected(&mut self, value: Option<MatchValue>) {
        self.selected = value;
    }

    pub fn push_char(&mut self, c: char) {
        if self.enabled {
            self.query.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.query.pop();
    }

    /// Deletes the last word of the query.
    pub fn delete_word(&mut self) {
        if let Some(last_space_idx) = self.query.trim_end().rfind(' ') {
            self.query.truncate(last_space_idx + 1);
        } else {
            self.query.clear();
        }
    }

    /// Keeps the selection if it is still among `matches`; otherwise falls
    /// back to the first match, or to no selection.
    pub fn reconcile(&mut self, matches: &[MatchValue]) {
        let still_present = self
            .selected
            .as_ref()
            .is_some_and(|selected| matches.contains(selected));

        if !still_present {
            self.selected = matches.first().cloned();
        }
    }

    pub fn select_next(&mut self, matches: &[MatchValue]) {
        self.step(matches, true);
    }

    pub fn select_previous(&mut self, matches: &[MatchValue]) {
        self.step(matches, false);
    }

    fn step(&mut self, matches: &[MatchValue], forward: bool) {
        if matches.is_empty() {
            self.selected = None;
            return;
        }

        let position = self
            .selected
            .as_ref()
            .and_then(|selected| matches.iter().position(|value| value == selected));

        let len = matches.len();
        let next = match position {
            Some(idx) if forward => (idx + 1) % len,
            Some(idx) => (idx + len - 1) % len,
            None => 0,
        };

        self.selected = matches.get(next).cloned();
    }

    /// Ends the session and returns the highlighted match, if any.
    pub fn confirm(&mut self) -> Option<MatchValue> {
        let selected = self.selected.take();
        self.cancel();
        selected
    }
}
