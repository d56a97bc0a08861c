//! In-memory chat state, loadable from TOML fixtures or generated for demos.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::application::services::SidebarOptions;
use crate::domain::entities::{
    Channel, ChannelId, ChannelKind, PresenceStatus, ReadState, User, UserId,
};
use crate::domain::ports::ChatSnapshot;
use crate::domain::sidebar::MatchValue;

const DM_CHANNEL_ID_BASE: u64 = 1_000_000;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("duplicate channel name: {0}")]
    DuplicateChannel(String),
    #[error("duplicate channel id: {0}")]
    DuplicateChannelId(ChannelId),
    #[error("duplicate user id: {0}")]
    DuplicateUser(UserId),
    #[error("channel {0} is a direct message channel; list it under its user instead")]
    DirectChannelListed(String),
    #[error("unknown channel or user referenced: {0}")]
    UnknownReference(String),
}

/// Channel record in a fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelFixture {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub kind: ChannelKind,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub unread: u32,
    #[serde(default)]
    pub mentions: u32,
    #[serde(default)]
    pub draft: Option<String>,
}

/// User record in a fixture file, with the optional DM channel state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFixture {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub presence: PresenceStatus,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub dm_channel: Option<u64>,
    #[serde(default)]
    pub dm_unread: u32,
    #[serde(default)]
    pub dm_mentions: u32,
    #[serde(default)]
    pub dm_draft: Option<String>,
}

/// A whole snapshot as written in a fixture file.
///
/// `current` and `recent` name a channel, or a user as `@username`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFixture {
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default)]
    pub recent: Option<String>,
    #[serde(default)]
    pub channels: Vec<ChannelFixture>,
    #[serde(default)]
    pub users: Vec<UserFixture>,
}

/// Mutable chat state implementing [`ChatSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot {
    channel_names: Vec<String>,
    channels: HashMap<String, Channel>,
    users: Vec<User>,
    dm_channels: HashMap<UserId, ChannelId>,
    read_states: HashMap<ChannelId, ReadState>,
    drafts: HashMap<ChannelId, String>,
    current: Option<ChannelId>,
    recent: Option<ChannelId>,
    next_dm_id: u64,
}

impl MemorySnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_dm_id: DM_CHANNEL_ID_BASE,
            ..Self::default()
        }
    }

    /// Loads a fixture file.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError` if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        let fixture: SnapshotFixture = toml::from_str(&content)?;
        let snapshot = Self::from_fixture(fixture)?;
        info!(
            path = %path.display(),
            channels = snapshot.channel_names.len(),
            users = snapshot.users.len(),
            "Loaded snapshot fixture"
        );
        Ok(snapshot)
    }

    /// Builds a snapshot from parsed fixture data.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError` on duplicate names or ids, DM channels listed as
    /// regular channels, or `current`/`recent` naming nothing known.
    pub fn from_fixture(fixture: SnapshotFixture) -> Result<Self, FixtureError> {
        let mut snapshot = Self::new();
        let mut seen_ids = std::collections::HashSet::new();

        for record in fixture.channels {
            if record.kind.is_direct() {
                return Err(FixtureError::DirectChannelListed(record.name));
            }
            if snapshot.channels.contains_key(&record.name) {
                return Err(FixtureError::DuplicateChannel(record.name));
            }
            let id = ChannelId(record.id);
            if !seen_ids.insert(id) {
                return Err(FixtureError::DuplicateChannelId(id));
            }

            let mut channel = Channel::new(id, record.name, record.kind);
            if let Some(topic) = record.topic {
                channel = channel.with_topic(topic);
            }
            snapshot.add_channel(channel);
            snapshot.set_read_state(id, record.unread, record.mentions);
            if let Some(draft) = record.draft {
                snapshot.set_draft(id, draft);
            }
        }

        for record in fixture.users {
            let user_id = UserId(record.id);
            if snapshot.users.iter().any(|user| user.id() == user_id) {
                return Err(FixtureError::DuplicateUser(user_id));
            }

            let mut user = User::new(user_id, record.username)
                .with_presence(record.presence)
                .with_deleted(record.deleted);
            if let Some(nickname) = record.nickname {
                user = user.with_nickname(nickname);
            }
            snapshot.add_user(user);

            if let Some(raw) = record.dm_channel {
                let id = ChannelId(raw);
                if !seen_ids.insert(id) {
                    return Err(FixtureError::DuplicateChannelId(id));
                }
                snapshot.link_dm(user_id, id);
                snapshot.set_read_state(id, record.dm_unread, record.dm_mentions);
                if let Some(draft) = record.dm_draft {
                    snapshot.set_draft(id, draft);
                }
            }
        }

        if let Some(name) = fixture.current {
            let id = snapshot.resolve_reference(&name)?;
            snapshot.current = Some(id);
        }
        if let Some(name) = fixture.recent {
            let id = snapshot.resolve_reference(&name)?;
            snapshot.recent = Some(id);
        }

        Ok(snapshot)
    }

    /// Generates a deterministic workspace with `user_count` users.
    #[must_use]
    pub fn demo(user_count: usize) -> Self {
        const PRESENCES: [PresenceStatus; 4] = [
            PresenceStatus::Online,
            PresenceStatus::Away,
            PresenceStatus::DoNotDisturb,
            PresenceStatus::Offline,
        ];

        let mut snapshot = Self::new();

        let mut names = vec!["town-square".to_string(), "off-topic".to_string()];
        names.extend((0..40).map(|i| format!("project-{i:02}")));

        for (idx, name) in names.into_iter().enumerate() {
            let id = ChannelId(idx as u64 + 1);
            let kind = if idx % 9 == 4 {
                ChannelKind::Private
            } else {
                ChannelKind::Public
            };
            snapshot.add_channel(Channel::new(id, name, kind));

            let unread = if idx % 3 == 0 { idx as u32 + 1 } else { 0 };
            let mentions = match idx {
                5 => 42,
                i if i % 7 == 0 => 2,
                _ => 0,
            };
            snapshot.set_read_state(id, unread, mentions);
        }
        snapshot.set_draft(ChannelId(2), "will reply after standup");

        for i in 0..user_count {
            let user_id = UserId(i as u64 + 1);
            let mut user = User::new(user_id, format!("user-{i}"))
                .with_presence(PRESENCES[i % PRESENCES.len()])
                .with_deleted(i % 97 == 96);
            if i % 10 == 3 {
                user = user.with_nickname(format!("Nick {i}"));
            }
            snapshot.add_user(user);

            if i % 5 == 0 {
                let dm = snapshot.allocate_dm(user_id);
                snapshot.set_read_state(dm, u32::from(i % 15 == 0), u32::from(i % 45 == 0));
            }
        }

        snapshot.current = Some(ChannelId(23));
        snapshot.recent = Some(ChannelId(1));
        snapshot
    }

    pub fn add_channel(&mut self, channel: Channel) {
        self.reserve_id(channel.id());
        let name = channel.name().to_string();
        if !self.channels.contains_key(&name) {
            self.channel_names.push(name.clone());
        }
        self.channels.insert(name, channel);
    }

    pub fn add_user(&mut self, user: User) {
        self.users.push(user);
    }

    pub fn link_dm(&mut self, user_id: UserId, channel_id: ChannelId) {
        self.dm_channels.insert(user_id, channel_id);
        self.reserve_id(channel_id);
    }

    /// Keeps allocated DM ids above every id already in use.
    fn reserve_id(&mut self, channel_id: ChannelId) {
        self.next_dm_id = self.next_dm_id.max(channel_id.as_u64().saturating_add(1));
    }

    pub fn set_read_state(&mut self, channel_id: ChannelId, unread: u32, mentions: u32) {
        self.read_states.insert(
            channel_id,
            ReadState::new(channel_id)
                .with_unread_count(unread)
                .with_mention_count(mentions),
        );
    }

    pub fn set_draft(&mut self, channel_id: ChannelId, text: impl Into<String>) {
        self.drafts.insert(channel_id, text.into());
    }

    pub fn set_current(&mut self, channel_id: ChannelId) {
        self.current = Some(channel_id);
    }

    #[must_use]
    pub const fn current(&self) -> Option<ChannelId> {
        self.current
    }

    #[must_use]
    pub const fn recent(&self) -> Option<ChannelId> {
        self.recent
    }

    /// Makes `channel_id` current: the previous current becomes recent and
    /// the new channel is marked read.
    pub fn switch_to(&mut self, channel_id: ChannelId) {
        if self.current == Some(channel_id) {
            return;
        }
        if let Some(previous) = self.current {
            self.recent = Some(previous);
        }
        self.current = Some(channel_id);
        if let Some(state) = self.read_states.get_mut(&channel_id) {
            state.mark_read();
        }
        debug!(channel = %channel_id, "Switched channel");
    }

    /// Resolves a sidebar match to its channel, opening a DM channel for a
    /// user who has none yet.
    pub fn open(&mut self, target: &MatchValue, options: SidebarOptions) -> Option<ChannelId> {
        match target {
            MatchValue::Channel(name) => self.channels.get(name).map(Channel::id),
            MatchValue::User(label) => {
                let user_id = self
                    .users
                    .iter()
                    .find(|user| !user.is_deleted() && user.display_name(options.use_nicknames) == label)
                    .map(User::id)?;
                Some(
                    self.dm_channels
                        .get(&user_id)
                        .copied()
                        .unwrap_or_else(|| self.allocate_dm(user_id)),
                )
            }
        }
    }

    fn allocate_dm(&mut self, user_id: UserId) -> ChannelId {
        let id = ChannelId(self.next_dm_id);
        self.link_dm(user_id, id);
        id
    }

    fn resolve_reference(&self, reference: &str) -> Result<ChannelId, FixtureError> {
        let resolved = match reference.strip_prefix('@') {
            Some(username) => self
                .users
                .iter()
                .find(|user| user.username() == username)
                .and_then(|user| self.dm_channels.get(&user.id()).copied()),
            None => self.channels.get(reference).map(Channel::id),
        };
        resolved.ok_or_else(|| FixtureError::UnknownReference(reference.to_string()))
    }

    /// Lists a channel name with no backing record, as an inconsistent
    /// store would.
    #[cfg(test)]
    pub fn push_dangling_channel_name(&mut self, name: &str) {
        self.channel_names.push(name.to_string());
    }
}

impl ChatSnapshot for MemorySnapshot {
    fn channel_names(&self) -> &[String] {
        &self.channel_names
    }

    fn channel_by_name(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    fn read_state(&self, channel_id: ChannelId) -> Option<&ReadState> {
        self.read_states.get(&channel_id)
    }

    fn is_recent(&self, channel_id: ChannelId) -> bool {
        self.recent == Some(channel_id)
    }

    fn is_current(&self, channel_id: ChannelId) -> bool {
        self.current == Some(channel_id)
    }

    fn draft(&self, channel_id: ChannelId) -> Option<&str> {
        self.drafts.get(&channel_id).map(String::as_str)
    }

    fn users(&self) -> &[User] {
        &self.users
    }

    fn dm_channel(&self, user_id: UserId) -> Option<ChannelId> {
        self.dm_channels.get(&user_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FIXTURE: &str = r#"
        current = "@alice"
        recent = "general"

        [[channels]]
        id = 1
        name = "general"
        topic = "Company-wide"
        unread = 3

        [[users]]
        id = 10
        username = "alice"
        presence = "away"
        dm_channel = 500
        dm_mentions = 2
    "#;

    #[test]
    fn test_load_fixture_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();

        let snapshot = MemorySnapshot::load(file.path()).unwrap();

        assert_eq!(snapshot.channel_names(), ["general".to_string()]);
        assert_eq!(snapshot.current(), Some(ChannelId(500)));
        assert!(snapshot.is_recent(ChannelId(1)));
        assert_eq!(snapshot.mention_count(ChannelId(500)), 2);
        assert_eq!(snapshot.unread_count(ChannelId(1)), 3);
        assert_eq!(snapshot.users()[0].presence(), PresenceStatus::Away);
        assert_eq!(
            snapshot.channel_by_name("general").and_then(Channel::topic),
            Some("Company-wide")
        );
    }

    #[test]
    fn test_duplicate_channel_is_rejected() {
        let fixture: SnapshotFixture = toml::from_str(
            r#"
            [[channels]]
            id = 1
            name = "general"
            [[channels]]
            id = 2
            name = "general"
            "#,
        )
        .unwrap();

        assert!(matches!(
            MemorySnapshot::from_fixture(fixture),
            Err(FixtureError::DuplicateChannel(name)) if name == "general"
        ));
    }

    #[test]
    fn test_unknown_current_is_rejected() {
        let fixture = SnapshotFixture {
            current: Some("nowhere".to_string()),
            ..SnapshotFixture::default()
        };
        assert!(matches!(
            MemorySnapshot::from_fixture(fixture),
            Err(FixtureError::UnknownReference(_))
        ));
    }

    #[test]
    fn test_direct_channel_in_channel_list_is_rejected() {
        let fixture = SnapshotFixture {
            channels: vec![ChannelFixture {
                id: 7,
                name: "dm".to_string(),
                kind: ChannelKind::Direct,
                ..ChannelFixture::default()
            }],
            ..SnapshotFixture::default()
        };
        assert!(matches!(
            MemorySnapshot::from_fixture(fixture),
            Err(FixtureError::DirectChannelListed(_))
        ));
    }

    #[test]
    fn test_switch_marks_read_and_records_recent() {
        let mut snapshot = MemorySnapshot::demo(10);
        let before = snapshot.current().unwrap();
        let target = ChannelId(4);
        assert!(snapshot.unread_count(target) > 0);

        snapshot.switch_to(target);

        assert!(snapshot.is_current(target));
        assert!(snapshot.is_recent(before));
        assert_eq!(snapshot.unread_count(target), 0);
        assert_eq!(snapshot.mention_count(target), 0);
    }

    #[test]
    fn test_open_user_without_dm_allocates_channel() {
        let mut snapshot = MemorySnapshot::new();
        snapshot.add_user(User::new(1_u64, "dana"));
        assert_eq!(snapshot.dm_channel(UserId(1)), None);

        let target = MatchValue::User("dana".to_string());
        let opened = snapshot.open(&target, SidebarOptions::default()).unwrap();

        assert_eq!(snapshot.dm_channel(UserId(1)), Some(opened));
        assert_eq!(snapshot.open(&target, SidebarOptions::default()), Some(opened));
    }

    #[test]
    fn test_allocated_dm_does_not_reuse_channel_id() {
        let mut snapshot = MemorySnapshot::new();
        snapshot.add_channel(Channel::new(DM_CHANNEL_ID_BASE, "ops", ChannelKind::Public));
        snapshot.set_read_state(ChannelId(DM_CHANNEL_ID_BASE), 5, 5);
        snapshot.add_user(User::new(1_u64, "dana"));

        let opened = snapshot
            .open(&MatchValue::User("dana".to_string()), SidebarOptions::default())
            .unwrap();
        snapshot.switch_to(opened);

        assert_ne!(opened, ChannelId(DM_CHANNEL_ID_BASE));
        assert!(!snapshot.is_current(ChannelId(DM_CHANNEL_ID_BASE)));
        assert_eq!(snapshot.mention_count(ChannelId(DM_CHANNEL_ID_BASE)), 5);
    }

    #[test]
    fn test_demo_is_consistent() {
        let snapshot = MemorySnapshot::demo(1_000);
        assert_eq!(snapshot.users().len(), 1_000);
        assert_eq!(snapshot.channel_names().len(), 42);
        assert!(snapshot.current().is_some_and(|id| snapshot.channel_names().iter().any(
            |name| snapshot.channel_by_name(name).map(Channel::id) == Some(id)
        )));
        assert!(snapshot.has_draft(ChannelId(2)));
    }
}
