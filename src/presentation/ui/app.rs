//! Main application orchestrator.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures_util::StreamExt;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::{debug, info, warn};

use crate::application::services::{
    Direction, SelectSession, SidebarList, SidebarOptions, assemble, next_unread_target,
    step_target,
};
use crate::domain::entities::{Channel, ChannelKind};
use crate::domain::keybinding::{Action, Keymap};
use crate::domain::ports::ChatSnapshot;
use crate::domain::sidebar::{MatchValue, SidebarGroup};
use crate::infrastructure::config::{AppConfig, UiConfig};
use crate::infrastructure::fixture::MemorySnapshot;
use crate::presentation::events::{EventResult, SelectKey};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    ChannelList, ChannelListState, FooterBar, FooterBarStyle, SidebarMode,
};

/// Rows taken by the sidebar border.
const SIDEBAR_CHROME: u16 = 2;

pub struct App {
    snapshot: MemorySnapshot,
    session: SelectSession,
    list_state: ChannelListState,
    keymap: Keymap,
    theme: Theme,
    ui: UiConfig,
}

impl App {
    #[must_use]
    pub fn new(snapshot: MemorySnapshot, config: &AppConfig) -> Self {
        Self {
            snapshot,
            session: SelectSession::new(),
            list_state: ChannelListState::new(),
            keymap: Keymap::new(&config.keybindings),
            theme: Theme::new(&config.theme.accent_color, config.theme.mention_color.as_deref()),
            ui: config.ui.clone(),
        }
    }

    /// # Errors
    /// Returns error if reading terminal events or drawing fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();

        terminal.draw(|frame| self.render(frame))?;

        while let Some(event) = terminal_events.next().await {
            if self.handle_event(event?) == EventResult::Exit {
                break;
            }
            terminal.draw(|frame| self.render(frame))?;
        }

        info!("Application exiting normally");
        Ok(())
    }

    const fn options(&self) -> SidebarOptions {
        self.ui.sidebar_options()
    }

    fn handle_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Resize(width, height) => {
                debug!(width, height, "Terminal resized");
                self.list_state.invalidate();
                EventResult::Continue
            }
            _ => EventResult::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if self.session.is_enabled() {
            if let Some(select_key) = SelectKey::from_key(&key) {
                self.handle_select_key(select_key);
            }
            return EventResult::Continue;
        }

        match self.keymap.action_for(&key) {
            Some(action) => self.handle_action(action),
            None => EventResult::Continue,
        }
    }

    fn handle_action(&mut self, action: Action) -> EventResult {
        match action {
            Action::Quit => return EventResult::Exit,
            Action::NextChannel => self.step(Direction::Forward),
            Action::PreviousChannel => self.step(Direction::Backward),
            Action::NextUnreadChannel => {
                if let Some(target) = next_unread_target(&self.full_list()) {
                    self.switch_to(&target);
                }
            }
            Action::RecentChannel => {
                if let Some(recent) = self.snapshot.recent() {
                    self.snapshot.switch_to(recent);
                }
            }
            Action::ScrollUp => self.list_state.scroll_by(-1),
            Action::ScrollDown => self.list_state.scroll_by(1),
            Action::PageUp => self.list_state.scroll_by(-self.page_size()),
            Action::PageDown => self.list_state.scroll_by(self.page_size()),
            Action::EnterSelectMode => {
                self.session.begin();
                self.list_state.invalidate();
            }
        }
        EventResult::Continue
    }

    fn handle_select_key(&mut self, key: SelectKey) {
        match key {
            SelectKey::Insert(c) => {
                self.session.push_char(c);
                self.reconcile_selection();
            }
            SelectKey::Backspace => {
                self.session.backspace();
                self.reconcile_selection();
            }
            SelectKey::DeleteWord => {
                self.session.delete_word();
                self.reconcile_selection();
            }
            SelectKey::Next => {
                let matches = self.select_matches();
                self.session.select_next(&matches);
            }
            SelectKey::Previous => {
                let matches = self.select_matches();
                self.session.select_previous(&matches);
            }
            SelectKey::Confirm => {
                if let Some(target) = self.session.confirm() {
                    self.switch_to(&target);
                }
                self.list_state.invalidate();
            }
            SelectKey::Cancel => {
                self.session.cancel();
                self.list_state.invalidate();
            }
        }
    }

    fn select_matches(&self) -> Vec<MatchValue> {
        assemble(&self.snapshot, &self.session, None, self.options()).match_values()
    }

    fn reconcile_selection(&mut self) {
        let matches = self.select_matches();
        self.session.reconcile(&matches);
    }

    /// The unwindowed plain-mode list that channel stepping walks.
    fn full_list(&self) -> SidebarList {
        assemble(&self.snapshot, &SelectSession::new(), None, self.options())
    }

    fn step(&mut self, direction: Direction) {
        if let Some(target) = step_target(&self.full_list(), direction) {
            self.switch_to(&target);
        }
    }

    fn switch_to(&mut self, target: &MatchValue) {
        match self.snapshot.open(target, self.options()) {
            Some(channel_id) => {
                info!(entry = target.label(), channel = %channel_id, "Switching channel");
                self.snapshot.switch_to(channel_id);
            }
            None => warn!(entry = target.label(), "Selected entry no longer exists"),
        }
    }

    fn page_size(&self) -> isize {
        let rows = self.list_state.viewport_height().unwrap_or(1).max(1);
        isize::try_from(rows).unwrap_or(isize::MAX)
    }

    fn render(&mut self, frame: &mut Frame) {
        let [body, footer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());
        let [sidebar, main] = Layout::horizontal([
            Constraint::Length(self.ui.sidebar_width),
            Constraint::Min(0),
        ])
        .areas(body);

        let prompt = self.session.is_enabled().then(|| self.session.query());
        let prompt_rows = u16::from(prompt.is_some());
        let height = sidebar.height.saturating_sub(SIDEBAR_CHROME + prompt_rows);

        let list = assemble(
            &self.snapshot,
            &self.session,
            Some(usize::from(height)),
            self.options(),
        );

        frame.render_stateful_widget(
            ChannelList::new(&list)
                .title(crate::NAME)
                .prompt(prompt)
                .show_recent_marker(self.ui.show_recent_marker)
                .theme(self.theme),
            sidebar,
            &mut self.list_state,
        );

        self.render_channel_pane(frame, main, &list);

        let mode = if self.session.is_enabled() {
            SidebarMode::Select
        } else {
            SidebarMode::Normal
        };
        let info = self.match_summary(&list);
        frame.render_widget(
            FooterBar::new(self.keymap.bindings())
                .mode(mode)
                .right_info(info.as_deref())
                .style(FooterBarStyle::from_theme(&self.theme)),
            footer,
        );
    }

    /// Match count for the footer, shown once the query filters the list.
    fn match_summary(&self, list: &SidebarList) -> Option<String> {
        self.session
            .is_active()
            .then(|| format!("{} matches ", list.match_values().len()))
    }

    fn render_channel_pane(&self, frame: &mut Frame, area: Rect, list: &SidebarList) {
        let current = list.entries().find(|entry| entry.entry.is_current);

        let channel = current
            .filter(|entry| entry.group == SidebarGroup::Channels)
            .and_then(|entry| self.snapshot.channel_by_name(&entry.entry.label));
        let title = match (current, channel) {
            (None, _) => " no channel ".to_string(),
            (Some(entry), Some(channel)) if channel.kind() == ChannelKind::Private => {
                format!(" {}{} (private) ", entry.entry.sigil, entry.entry.label)
            }
            (Some(entry), _) => format!(" {}{} ", entry.entry.sigil, entry.entry.label),
        };
        let topic = channel.and_then(Channel::topic).unwrap_or_default();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.dimmed_style)
            .title(Span::styled(title, self.theme.header_style));

        frame.render_widget(
            Paragraph::new(Line::styled(topic, self.theme.dimmed_style))
                .block(block)
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}
