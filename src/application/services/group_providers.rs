//! Per-group entry providers.
//!
//! Each provider walks the snapshot in its natural order, keeps the labels
//! accepted by the membership predicate and bounds the result with the
//! window selector when a height hint is given.

use tracing::debug;

use super::window_selector::select_window;
use crate::domain::entities::{ChannelId, User};
use crate::domain::ports::ChatSnapshot;
use crate::domain::sidebar::{Entry, Group, SidebarGroup, Sigil};

/// Display options that affect how entries are labelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarOptions {
    /// Label users by nickname when they have one.
    pub use_nicknames: bool,
}

impl SidebarGroup {
    /// Produces this group's entries.
    pub fn provide<S, F>(
        self,
        snapshot: &S,
        height: Option<usize>,
        include: F,
        options: SidebarOptions,
    ) -> Group<Entry>
    where
        S: ChatSnapshot + ?Sized,
        F: Fn(&str) -> bool,
    {
        let entries = match self {
            Self::Channels => channel_entries(snapshot, &include),
            Self::Users => user_entries(snapshot, &include, options),
        };

        Group {
            group: self,
            entries: select_window(entries, height, |entry| entry.is_current),
        }
    }

    /// Lists every label this group could show, unbounded, for select-mode matching.
    #[must_use]
    pub fn candidates<S>(self, snapshot: &S, options: SidebarOptions) -> Vec<String>
    where
        S: ChatSnapshot + ?Sized,
    {
        match self {
            Self::Channels => snapshot.channel_names().to_vec(),
            Self::Users => listed_users(snapshot)
                .map(|user| user.display_name(options.use_nicknames).to_string())
                .collect(),
        }
    }
}

fn listed_users<S>(snapshot: &S) -> impl Iterator<Item = &User>
where
    S: ChatSnapshot + ?Sized,
{
    snapshot.users().iter().filter(|user| !user.is_deleted())
}

fn sigil_for<S>(snapshot: &S, channel_id: Option<ChannelId>, default: Sigil) -> Sigil
where
    S: ChatSnapshot + ?Sized,
{
    match channel_id {
        Some(id) if snapshot.has_draft(id) => Sigil::Draft,
        _ => default,
    }
}

fn decorate<S>(snapshot: &S, entry: Entry, channel_id: ChannelId) -> Entry
where
    S: ChatSnapshot + ?Sized,
{
    entry
        .with_unread(snapshot.unread_count(channel_id) > 0)
        .with_mentions(snapshot.mention_count(channel_id))
        .with_recent(snapshot.is_recent(channel_id))
        .with_current(snapshot.is_current(channel_id))
}

fn channel_entries<S, F>(snapshot: &S, include: &F) -> Vec<Entry>
where
    S: ChatSnapshot + ?Sized,
    F: Fn(&str) -> bool,
{
    let mut entries = Vec::new();

    for name in snapshot.channel_names() {
        if !include(name) {
            continue;
        }

        let Some(channel) = snapshot.channel_by_name(name) else {
            debug!(channel = %name, "Skipping channel missing from snapshot");
            continue;
        };

        let id = channel.id();
        let sigil = sigil_for(snapshot, Some(id), Sigil::Channel);
        entries.push(decorate(snapshot, Entry::new(sigil, name.as_str()), id));
    }

    entries
}

fn user_entries<S, F>(snapshot: &S, include: &F, options: SidebarOptions) -> Vec<Entry>
where
    S: ChatSnapshot + ?Sized,
    F: Fn(&str) -> bool,
{
    listed_users(snapshot)
        .filter_map(|user| {
            let label = user.display_name(options.use_nicknames);
            if !include(label) {
                return None;
            }

            let presence = user.presence();
            let dm = snapshot.dm_channel(user.id());
            let sigil = sigil_for(snapshot, dm, Sigil::User(presence));
            let entry = Entry::new(sigil, label).with_presence(presence);

            Some(match dm {
                Some(channel_id) => decorate(snapshot, entry, channel_id),
                None => entry,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PresenceStatus;
    use crate::infrastructure::fixture::{MemorySnapshot, SnapshotFixture};

    fn snapshot() -> MemorySnapshot {
        let fixture: SnapshotFixture = toml::from_str(
            r#"
            current = "dev"
            recent = "general"

            [[channels]]
            id = 1
            name = "general"
            unread = 4

            [[channels]]
            id = 2
            name = "dev"
            mentions = 12
            draft = "half a thought"

            [[channels]]
            id = 3
            name = "random"
            draft = "   "

            [[users]]
            id = 10
            username = "alice"
            nickname = "Ally"
            presence = "online"
            dm_channel = 100
            dm_unread = 1

            [[users]]
            id = 11
            username = "bob"

            [[users]]
            id = 12
            username = "carol"
            deleted = true
            "#,
        )
        .unwrap();
        MemorySnapshot::from_fixture(fixture).unwrap()
    }

    fn labels(group: &Group<Entry>) -> Vec<&str> {
        group.entries.iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn test_channel_entries_in_snapshot_order() {
        let snap = snapshot();
        let group = SidebarGroup::Channels.provide(&snap, None, |_| true, SidebarOptions::default());

        assert_eq!(group.group, SidebarGroup::Channels);
        assert_eq!(labels(&group), vec!["general", "dev", "random"]);

        let general = &group.entries[0];
        assert!(general.has_unread);
        assert!(general.is_recent);
        assert_eq!(general.sigil, Sigil::Channel);

        let dev = &group.entries[1];
        assert!(dev.is_current);
        assert_eq!(dev.mention_count, 12);
        assert_eq!(dev.sigil, Sigil::Draft);
    }

    #[test]
    fn test_blank_draft_keeps_default_sigil() {
        let snap = snapshot();
        let group = SidebarGroup::Channels.provide(&snap, None, |_| true, SidebarOptions::default());
        assert_eq!(group.entries[2].sigil, Sigil::Channel);
    }

    #[test]
    fn test_membership_predicate_filters() {
        let snap = snapshot();
        let group = SidebarGroup::Channels.provide(
            &snap,
            None,
            |label| label.starts_with('d'),
            SidebarOptions::default(),
        );
        assert_eq!(labels(&group), vec!["dev"]);
    }

    #[test]
    fn test_missing_channel_is_skipped() {
        let mut snap = snapshot();
        snap.push_dangling_channel_name("ghost");

        let group = SidebarGroup::Channels.provide(&snap, None, |_| true, SidebarOptions::default());
        assert_eq!(labels(&group), vec!["general", "dev", "random"]);
    }

    #[test]
    fn test_users_skip_deleted_and_use_presence_sigil() {
        let snap = snapshot();
        let group = SidebarGroup::Users.provide(&snap, None, |_| true, SidebarOptions::default());

        assert_eq!(labels(&group), vec!["alice", "bob"]);
        assert_eq!(group.entries[0].sigil, Sigil::User(PresenceStatus::Online));
        assert_eq!(group.entries[0].presence, Some(PresenceStatus::Online));
        assert!(group.entries[0].has_unread);
        assert!(!group.entries[1].has_unread);
        assert_eq!(group.entries[1].sigil, Sigil::User(PresenceStatus::Offline));
    }

    #[test]
    fn test_users_labelled_by_nickname_when_enabled() {
        let snap = snapshot();
        let options = SidebarOptions {
            use_nicknames: true,
        };
        let group = SidebarGroup::Users.provide(&snap, None, |_| true, options);
        assert_eq!(labels(&group), vec!["Ally", "bob"]);
        assert_eq!(
            SidebarGroup::Users.candidates(&snap, options),
            vec!["Ally".to_string(), "bob".to_string()]
        );
    }

    #[test]
    fn test_height_bound_windows_around_current() {
        let snap = MemorySnapshot::demo(500);
        let group = SidebarGroup::Channels.provide(&snap, Some(2), |_| true, SidebarOptions::default());

        assert!(group.entries.len() <= 4);
        assert!(group.entries.iter().any(|entry| entry.is_current));
    }
}
