//! Builds the flattened, decorated sidebar for one render pass.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use super::group_providers::SidebarOptions;
use super::match_engine::find_match;
use super::select_session::SelectSession;
use crate::domain::ports::ChatSnapshot;
use crate::domain::sidebar::{
    Emphasis, Entry, Group, MatchResult, MatchValue, MatchedEntry, SidebarGroup,
};

/// An entry ready for painting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub group: SidebarGroup,
    pub entry: Entry,
    pub emphasis: Emphasis,
    /// Whether this is the highlighted select-mode match.
    pub selected: bool,
    /// Label split around the query; present only in select mode.
    pub highlight: Option<MatchResult>,
    pub badge: Option<String>,
}

impl RenderedEntry {
    fn new(group: SidebarGroup, entry: Entry, highlight: Option<MatchResult>, selected: bool) -> Self {
        let emphasis = if selected {
            Emphasis::Current
        } else {
            Emphasis::for_entry(&entry)
        };
        let badge = entry.mention_badge();

        Self {
            group,
            entry,
            emphasis,
            selected,
            highlight,
            badge,
        }
    }

    #[must_use]
    pub fn match_value(&self) -> MatchValue {
        self.group.match_value(self.entry.label.as_str())
    }

    #[must_use]
    pub const fn is_recent(&self) -> bool {
        self.entry.is_recent
    }
}

/// One painted line of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarRow {
    Header(SidebarGroup),
    Entry(RenderedEntry),
}

/// Result of a render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidebarList {
    rows: Vec<SidebarRow>,
    select_mode: bool,
}

impl SidebarList {
    #[must_use]
    pub fn rows(&self) -> &[SidebarRow] {
        &self.rows
    }

    #[must_use]
    pub const fn is_select_mode(&self) -> bool {
        self.select_mode
    }

    pub fn entries(&self) -> impl Iterator<Item = &RenderedEntry> {
        self.rows.iter().filter_map(|row| match row {
            SidebarRow::Entry(entry) => Some(entry),
            SidebarRow::Header(_) => None,
        })
    }

    /// Row the viewport should keep visible: the highlighted match in select
    /// mode, otherwise the current channel.
    #[must_use]
    pub fn current_row(&self) -> Option<usize> {
        let find = |pred: &dyn Fn(&RenderedEntry) -> bool| {
            self.rows
                .iter()
                .position(|row| matches!(row, SidebarRow::Entry(entry) if pred(entry)))
        };

        if self.select_mode {
            find(&|entry| entry.selected).or_else(|| find(&|entry| entry.entry.is_current))
        } else {
            find(&|entry| entry.entry.is_current)
        }
    }

    /// Select-mode matches in render order, each value once.
    #[must_use]
    pub fn match_values(&self) -> Vec<MatchValue> {
        if !self.select_mode {
            return Vec::new();
        }
        let mut seen = HashSet::new();
        self.entries()
            .map(RenderedEntry::match_value)
            .filter(|value| seen.insert(value.clone()))
            .collect()
    }
}

/// Assembles the sidebar from a snapshot.
///
/// Select mode applies only when the session is active and its query is
/// non-empty. Otherwise each group is windowed to `height` entries on either
/// side of the current one.
pub fn assemble<S>(
    snapshot: &S,
    session: &SelectSession,
    height: Option<usize>,
    options: SidebarOptions,
) -> SidebarList
where
    S: ChatSnapshot + ?Sized,
{
    let select_mode = session.is_active();
    let mut rows = Vec::new();

    for group in SidebarGroup::ALL {
        rows.push(SidebarRow::Header(group));

        if select_mode {
            let matched = matched_group(snapshot, group, session.query(), options);
            let selected = session.selected();
            rows.extend(matched.entries.into_iter().map(|m| {
                let is_selected = selected.is_some_and(|value| {
                    value.group() == group && value.label() == m.entry.label
                });
                SidebarRow::Entry(RenderedEntry::new(group, m.entry, Some(m.result), is_selected))
            }));
        } else {
            let plain = group.provide(snapshot, height, |_| true, options);
            rows.extend(
                plain
                    .entries
                    .into_iter()
                    .map(|entry| SidebarRow::Entry(RenderedEntry::new(group, entry, None, false))),
            );
        }
    }

    trace!(rows = rows.len(), select_mode, ?height, "Assembled sidebar");

    SidebarList { rows, select_mode }
}

/// Filters one group against the query over its full, unwindowed candidate set.
pub fn matched_group<S>(
    snapshot: &S,
    group: SidebarGroup,
    query: &str,
    options: SidebarOptions,
) -> Group<MatchedEntry>
where
    S: ChatSnapshot + ?Sized,
{
    let lookup: HashMap<String, MatchResult> = group
        .candidates(snapshot, options)
        .into_iter()
        .filter_map(|label| find_match(query, &label).map(|result| (label, result)))
        .collect();

    let entries = group
        .provide(snapshot, None, |label| lookup.contains_key(label), options)
        .entries
        .into_iter()
        .filter_map(|entry| {
            // Labels may repeat across users; each entry gets its own copy.
            let result = lookup.get(&entry.label).cloned()?;
            Some(MatchedEntry { entry, result })
        })
        .collect();

    Group { group, entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Channel, ChannelKind, User};
    use crate::infrastructure::fixture::MemorySnapshot;

    fn snapshot() -> MemorySnapshot {
        let mut snap = MemorySnapshot::new();
        snap.add_channel(Channel::new(1_u64, "general", ChannelKind::Public));
        snap.add_channel(Channel::new(2_u64, "dev", ChannelKind::Public));
        snap.add_channel(Channel::new(3_u64, "alerts", ChannelKind::Private));
        snap.add_user(User::new(10_u64, "Alice"));
        snap.add_user(User::new(11_u64, "Albert"));
        snap.add_user(User::new(12_u64, "Bob"));
        snap.set_current(2_u64.into());
        snap
    }

    fn row_labels(list: &SidebarList) -> Vec<String> {
        list.rows()
            .iter()
            .map(|row| match row {
                SidebarRow::Header(group) => format!("[{group}]"),
                SidebarRow::Entry(entry) => entry.entry.label.clone(),
            })
            .collect()
    }

    fn session_with(query: &str) -> SelectSession {
        let mut session = SelectSession::new();
        session.begin();
        for c in query.chars() {
            session.push_char(c);
        }
        session
    }

    #[test]
    fn test_plain_mode_lists_groups_with_headers() {
        let list = assemble(&snapshot(), &SelectSession::new(), None, SidebarOptions::default());

        assert!(!list.is_select_mode());
        assert_eq!(
            row_labels(&list),
            vec!["[Channels]", "general", "dev", "alerts", "[Users]", "Alice", "Albert", "Bob"]
        );
        assert_eq!(list.current_row(), Some(2));
        assert!(list.match_values().is_empty());
    }

    #[test]
    fn test_select_flag_with_empty_query_renders_plain() {
        let mut session = SelectSession::new();
        session.begin();

        let list = assemble(&snapshot(), &session, Some(1), SidebarOptions::default());
        assert!(!list.is_select_mode());
        assert!(list.entries().all(|entry| entry.highlight.is_none()));
    }

    #[test]
    fn test_select_mode_filters_users_by_substring() {
        let group = matched_group(&snapshot(), SidebarGroup::Users, "al", SidebarOptions::default());

        let labels: Vec<_> = group.entries.iter().map(|m| m.entry.label.as_str()).collect();
        assert_eq!(labels, vec!["Alice", "Albert"]);
        for matched in &group.entries {
            assert_eq!(matched.result.matched, "Al");
            assert_eq!(matched.result.full_key, matched.entry.label);
        }
    }

    #[test]
    fn test_select_mode_keeps_users_sharing_a_label() {
        let mut snap = MemorySnapshot::new();
        snap.add_user(User::new(1_u64, "sam"));
        snap.add_user(User::new(2_u64, "samuel").with_nickname("sam"));
        let options = SidebarOptions { use_nicknames: true };

        let plain = assemble(&snap, &SelectSession::new(), None, options);
        let list = assemble(&snap, &session_with("s"), None, options);

        let count_users = |list: &SidebarList| {
            list.entries()
                .filter(|entry| entry.group == SidebarGroup::Users)
                .count()
        };
        assert_eq!(count_users(&plain), 2);
        assert_eq!(count_users(&list), 2);
        assert!(list.entries().all(|entry| entry.highlight.is_some()));
        assert_eq!(list.match_values(), vec![MatchValue::User("sam".to_string())]);
    }

    #[test]
    fn test_dangling_channel_name_is_skipped_in_select_mode() {
        let mut snap = snapshot();
        snap.push_dangling_channel_name("galaxy");

        let group = matched_group(&snap, SidebarGroup::Channels, "ga", SidebarOptions::default());
        let labels: Vec<_> = group.entries.iter().map(|m| m.entry.label.as_str()).collect();
        assert!(labels.is_empty());

        let list = assemble(&snap, &session_with("al"), None, SidebarOptions::default());
        assert_eq!(
            row_labels(&list),
            vec!["[Channels]", "general", "alerts", "[Users]", "Alice", "Albert"]
        );
        assert!(!list.match_values().contains(&MatchValue::Channel("galaxy".to_string())));
    }

    #[test]
    fn test_dangling_channel_name_is_skipped_in_windowed_plain_mode() {
        let mut snap = snapshot();
        snap.push_dangling_channel_name("ghost");
        snap.add_channel(Channel::new(4_u64, "ops", ChannelKind::Public));
        snap.set_current(4_u64.into());

        let list = assemble(&snap, &SelectSession::new(), Some(2), SidebarOptions::default());
        let channels: Vec<_> = list
            .entries()
            .filter(|entry| entry.group == SidebarGroup::Channels)
            .map(|entry| entry.entry.label.as_str())
            .collect();
        assert_eq!(channels, vec!["dev", "alerts", "ops"]);
        assert_eq!(list.current_row(), Some(3));
    }

    #[test]
    fn test_select_mode_ignores_height_hint() {
        let snap = MemorySnapshot::demo(200);
        let session = session_with("user-1");

        let list = assemble(&snap, &session, Some(1), SidebarOptions::default());
        let users = list
            .entries()
            .filter(|entry| entry.group == SidebarGroup::Users)
            .count();
        assert!(users > 2, "expected unwindowed matches, got {users}");
    }

    #[test]
    fn test_select_mode_marks_selected_match_as_current() {
        let snap = snapshot();
        let mut session = session_with("al");
        let list = assemble(&snap, &session, None, SidebarOptions::default());
        session.reconcile(&list.match_values());

        let list = assemble(&snap, &session, None, SidebarOptions::default());
        assert!(list.is_select_mode());
        assert_eq!(row_labels(&list), vec!["[Channels]", "general", "alerts", "[Users]", "Alice", "Albert"]);

        let general = list.entries().find(|e| e.entry.label == "general").unwrap();
        assert!(general.selected);
        assert_eq!(general.emphasis, Emphasis::Current);
        assert_eq!(list.current_row(), Some(1));
        assert_eq!(
            general.highlight.as_ref().map(|h| h.matched.as_str()),
            Some("al")
        );
    }

    #[test]
    fn test_selection_is_scoped_to_group() {
        let mut snap = snapshot();
        snap.add_user(User::new(13_u64, "general"));
        let mut session = session_with("gen");
        session.set_selected(Some(MatchValue::User("general".to_string())));

        let list = assemble(&snap, &session, None, SidebarOptions::default());
        let selected: Vec<_> = list
            .entries()
            .filter(|entry| entry.selected)
            .map(|entry| entry.group)
            .collect();
        assert_eq!(selected, vec![SidebarGroup::Users]);
    }

    #[test]
    fn test_current_with_mentions_renders_current_emphasis() {
        let mut snap = snapshot();
        snap.set_read_state(2_u64.into(), 5, 3);

        let list = assemble(&snap, &SelectSession::new(), None, SidebarOptions::default());
        let dev = list.entries().find(|e| e.entry.label == "dev").unwrap();
        assert_eq!(dev.emphasis, Emphasis::Current);
        assert_eq!(dev.badge.as_deref(), Some("(3)"));
    }

    #[test]
    fn test_plain_mode_windows_each_group() {
        let snap = MemorySnapshot::demo(10_000);
        let list = assemble(&snap, &SelectSession::new(), Some(20), SidebarOptions::default());

        let users = list
            .entries()
            .filter(|entry| entry.group == SidebarGroup::Users)
            .count();
        assert!(users <= 40);
        assert!(list.current_row().is_some());
    }
}
