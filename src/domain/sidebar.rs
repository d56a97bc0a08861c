//! Value types for one sidebar render pass.

use std::fmt;

use crate::domain::entities::PresenceStatus;

/// Mention counts above this value are displayed as `(9+)`.
pub const MENTION_DISPLAY_CAP: u32 = 9;

/// The fixed sidebar sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SidebarGroup {
    Channels,
    Users,
}

impl SidebarGroup {
    pub const ALL: [Self; 2] = [Self::Channels, Self::Users];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Channels => "Channels",
            Self::Users => "Users",
        }
    }

    /// Builds the select-mode identifier for a label in this group.
    #[must_use]
    pub fn match_value(self, label: impl Into<String>) -> MatchValue {
        match self {
            Self::Channels => MatchValue::Channel(label.into()),
            Self::Users => MatchValue::User(label.into()),
        }
    }
}

impl fmt::Display for SidebarGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Leading marker of a sidebar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sigil {
    /// The channel has an unsent draft.
    Draft,
    Channel,
    /// Direct message with a user; styled by presence.
    User(PresenceStatus),
}

impl Sigil {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "»",
            Self::Channel => "#",
            Self::User(_) => "@",
        }
    }
}

impl fmt::Display for Sigil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One undecorated sidebar row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub sigil: Sigil,
    /// Channel name or user label; unique within its group.
    pub label: String,
    pub has_unread: bool,
    /// Exact mention count. Display is capped by [`mention_badge`].
    pub mention_count: u32,
    pub is_recent: bool,
    pub is_current: bool,
    pub presence: Option<PresenceStatus>,
}

impl Entry {
    #[must_use]
    pub fn new(sigil: Sigil, label: impl Into<String>) -> Self {
        Self {
            sigil,
            label: label.into(),
            has_unread: false,
            mention_count: 0,
            is_recent: false,
            is_current: false,
            presence: None,
        }
    }

    #[must_use]
    pub const fn with_unread(mut self, has_unread: bool) -> Self {
        self.has_unread = has_unread;
        self
    }

    #[must_use]
    pub const fn with_mentions(mut self, count: u32) -> Self {
        self.mention_count = count;
        self
    }

    #[must_use]
    pub const fn with_recent(mut self, is_recent: bool) -> Self {
        self.is_recent = is_recent;
        self
    }

    #[must_use]
    pub const fn with_current(mut self, is_current: bool) -> Self {
        self.is_current = is_current;
        self
    }

    #[must_use]
    pub const fn with_presence(mut self, presence: PresenceStatus) -> Self {
        self.presence = Some(presence);
        self
    }

    /// Returns the capped mention suffix for this entry.
    #[must_use]
    pub fn mention_badge(&self) -> Option<String> {
        mention_badge(self.mention_count)
    }
}

/// Formats a mention count for display: nothing for zero, `(n)` up to the
/// cap and `(9+)` above it.
#[must_use]
pub fn mention_badge(count: u32) -> Option<String> {
    match count {
        0 => None,
        n if n <= MENTION_DISPLAY_CAP => Some(format!("({n})")),
        _ => Some(format!("({MENTION_DISPLAY_CAP}+)")),
    }
}

/// A label split around the first case-insensitive occurrence of the query.
///
/// `prefix + matched + suffix == full_key` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub prefix: String,
    pub matched: String,
    pub suffix: String,
    pub full_key: String,
}

/// An entry that survived select-mode filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedEntry {
    pub entry: Entry,
    pub result: MatchResult,
}

/// Identifies the highlighted select-mode match independent of its position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MatchValue {
    Channel(String),
    User(String),
}

impl MatchValue {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Channel(name) | Self::User(name) => name,
        }
    }

    #[must_use]
    pub const fn group(&self) -> SidebarGroup {
        match self {
            Self::Channel(_) => SidebarGroup::Channels,
            Self::User(_) => SidebarGroup::Users,
        }
    }
}

/// One sidebar section as produced by a group provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<T> {
    pub group: SidebarGroup,
    pub entries: Vec<T>,
}

/// Visual weight of an entry, resolved in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Current,
    Mention,
    Unread,
    Normal,
}

impl Emphasis {
    /// Resolves emphasis: current first, then mentions, then unread.
    #[must_use]
    pub const fn for_entry(entry: &Entry) -> Self {
        if entry.is_current {
            Self::Current
        } else if entry.mention_count > 0 {
            Self::Mention
        } else if entry.has_unread {
            Self::Unread
        } else {
            Self::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, None ; "zero_has_no_badge")]
    #[test_case(1, Some("(1)") ; "one")]
    #[test_case(9, Some("(9)") ; "at_cap")]
    #[test_case(10, Some("(9+)") ; "above_cap")]
    #[test_case(42, Some("(9+)") ; "far_above_cap")]
    fn test_mention_badge(count: u32, expected: Option<&str>) {
        assert_eq!(mention_badge(count).as_deref(), expected);
    }

    #[test]
    fn test_badge_does_not_change_stored_count() {
        let entry = Entry::new(Sigil::Channel, "town-square").with_mentions(42);
        assert_eq!(entry.mention_badge().as_deref(), Some("(9+)"));
        assert_eq!(entry.mention_count, 42);
    }

    #[test]
    fn test_current_takes_precedence_over_mentions() {
        let entry = Entry::new(Sigil::Channel, "dev")
            .with_mentions(3)
            .with_unread(true)
            .with_current(true);
        assert_eq!(Emphasis::for_entry(&entry), Emphasis::Current);
    }

    #[test_case(false, 2, true, Emphasis::Mention ; "mention_over_unread")]
    #[test_case(false, 0, true, Emphasis::Unread ; "unread")]
    #[test_case(false, 0, false, Emphasis::Normal ; "normal")]
    fn test_emphasis_precedence(current: bool, mentions: u32, unread: bool, expected: Emphasis) {
        let entry = Entry::new(Sigil::Channel, "x")
            .with_current(current)
            .with_mentions(mentions)
            .with_unread(unread);
        assert_eq!(Emphasis::for_entry(&entry), expected);
    }

    #[test]
    fn test_match_value_equality_is_structural() {
        let a = SidebarGroup::Users.match_value("alice");
        assert_eq!(a, MatchValue::User("alice".to_string()));
        assert_ne!(a, MatchValue::Channel("alice".to_string()));
        assert_eq!(a.group(), SidebarGroup::Users);
        assert_eq!(a.label(), "alice");
    }

    #[test]
    fn test_sigils() {
        assert_eq!(Sigil::Draft.to_string(), "»");
        assert_eq!(Sigil::Channel.to_string(), "#");
        assert_eq!(Sigil::User(PresenceStatus::Online).to_string(), "@");
    }
}
