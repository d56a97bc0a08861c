//! Sidebar widget rendering an assembled [`SidebarList`].

use crate::application::services::{RenderedEntry, SidebarList, SidebarRow};
use crate::domain::sidebar::{MatchResult, Sigil};
use crate::presentation::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, StatefulWidget, Widget},
};
use tracing::debug;
use unicode_width::UnicodeWidthChar;

/// Identifier of the sidebar's scrollable viewport.
pub const SIDEBAR_VIEWPORT: &str = "sidebar";

const RECENT_MARKER: &str = "<";
const ELLIPSIS: &str = "…";

/// Scroll position of the sidebar viewport.
///
/// The offset survives between frames. Rendering only moves it when the row
/// to keep visible would otherwise fall off-screen, or after the viewport was
/// invalidated.
#[derive(Debug, Clone)]
pub struct ChannelListState {
    offset: usize,
    last_area: Option<Rect>,
    recenter: bool,
}

impl ChannelListState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: 0,
            last_area: None,
            recenter: true,
        }
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Moves the viewport by `delta` rows. The next render clamps it.
    pub const fn scroll_by(&mut self, delta: isize) {
        self.offset = self.offset.saturating_add_signed(delta);
    }

    /// Drops the scroll position so the next render centres the current row.
    pub fn invalidate(&mut self) {
        debug!(viewport = SIDEBAR_VIEWPORT, "Viewport invalidated");
        self.last_area = None;
        self.recenter = true;
    }

    /// Rows visible in the last rendered area.
    #[must_use]
    pub fn viewport_height(&self) -> Option<usize> {
        self.last_area.map(|area| usize::from(area.height))
    }

    fn settle(&mut self, area: Rect, keep_visible: Option<usize>, total: usize) {
        if self.last_area != Some(area) {
            self.last_area = Some(area);
            self.recenter = true;
        }

        let height = usize::from(area.height);
        if height == 0 {
            self.offset = 0;
            return;
        }

        if std::mem::take(&mut self.recenter) {
            self.offset = keep_visible.map_or(0, |row| row.saturating_sub(height / 2));
        } else if let Some(row) = keep_visible {
            if row < self.offset {
                self.offset = row;
            } else if row >= self.offset + height {
                self.offset = row + 1 - height;
            }
        }

        self.offset = self.offset.min(total.saturating_sub(height));
    }
}

impl Default for ChannelListState {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the sidebar rows with a select-mode prompt underneath.
pub struct ChannelList<'a> {
    list: &'a SidebarList,
    prompt: Option<&'a str>,
    title: &'a str,
    show_recent_marker: bool,
    theme: Theme,
}

impl<'a> ChannelList<'a> {
    #[must_use]
    pub fn new(list: &'a SidebarList) -> Self {
        Self {
            list,
            prompt: None,
            title: "Sidebar",
            show_recent_marker: true,
            theme: Theme::default(),
        }
    }

    /// Shows the select-mode query on the bottom row.
    #[must_use]
    pub const fn prompt(mut self, query: Option<&'a str>) -> Self {
        self.prompt = query;
        self
    }

    #[must_use]
    pub const fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    #[must_use]
    pub const fn show_recent_marker(mut self, show: bool) -> Self {
        self.show_recent_marker = show;
        self
    }

    #[must_use]
    pub const fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn header_line(&self, name: &'static str) -> Line<'static> {
        Line::from(Span::styled(name, self.theme.header_style))
    }

    fn entry_line(&self, rendered: &RenderedEntry, width: usize) -> Line<'static> {
        let row_style = self.theme.emphasis_style(rendered.emphasis);
        let entry = &rendered.entry;

        let mut lead = Vec::with_capacity(2);
        if self.show_recent_marker {
            lead.push(if entry.is_recent {
                Span::styled(RECENT_MARKER, row_style.patch(self.theme.recent_style))
            } else {
                Span::styled(" ", row_style)
            });
        }
        lead.push(Span::styled(
            entry.sigil.as_str(),
            row_style.patch(self.sigil_style(entry.sigil)),
        ));

        let badge = rendered
            .badge
            .as_ref()
            .map(|badge| Span::styled(format!(" {badge}"), row_style.patch(self.theme.mention_style)));

        let label = match &rendered.highlight {
            Some(result) => self.highlighted_label(result, row_style),
            None => vec![Span::styled(entry.label.clone(), row_style)],
        };

        let fixed: usize = lead.iter().map(Span::width).sum::<usize>()
            + badge.as_ref().map_or(0, Span::width);
        let label = truncate_spans(label, width.saturating_sub(fixed));

        let mut spans = lead;
        spans.extend(label);
        spans.extend(badge);
        Line::from(spans).style(row_style)
    }

    fn highlighted_label(&self, result: &MatchResult, row_style: Style) -> Vec<Span<'static>> {
        [
            Span::styled(result.prefix.clone(), row_style),
            Span::styled(result.matched.clone(), row_style.patch(self.theme.match_style)),
            Span::styled(result.suffix.clone(), row_style),
        ]
        .into_iter()
        .filter(|span| !span.content.is_empty())
        .collect()
    }

    fn sigil_style(&self, sigil: Sigil) -> Style {
        match sigil {
            Sigil::Draft => self.theme.draft_style,
            Sigil::Channel => Style::default(),
            Sigil::User(status) => Style::default().fg(Theme::presence_color(status)),
        }
    }

    fn prompt_line(&self, query: &str) -> Line<'static> {
        Line::from(vec![
            Span::styled("/", self.theme.prompt_style),
            Span::styled(query.to_string(), self.theme.base_style),
            Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)),
        ])
    }
}

impl StatefulWidget for ChannelList<'_> {
    type State = ChannelListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.dimmed_style)
            .title(Span::styled(format!(" {} ", self.title), self.theme.header_style));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut rows_area = inner;
        if let Some(query) = self.prompt {
            rows_area.height -= 1;
            let prompt_area = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
            buf.set_line(prompt_area.x, prompt_area.y, &self.prompt_line(query), prompt_area.width);
        }

        let rows = self.list.rows();
        state.settle(rows_area, self.list.current_row(), rows.len());

        let width = usize::from(rows_area.width);
        for (y, row) in (rows_area.top()..rows_area.bottom()).zip(rows.iter().skip(state.offset)) {
            let line = match row {
                SidebarRow::Header(group) => self.header_line(group.name()),
                SidebarRow::Entry(rendered) => {
                    let line = self.entry_line(rendered, width);
                    buf.set_style(Rect::new(rows_area.x, y, rows_area.width, 1), line.style);
                    line
                }
            };
            buf.set_line(rows_area.x, y, &line, rows_area.width);
        }
    }
}

/// Cuts `spans` to `max_width` display columns, ending with an ellipsis
/// when anything was dropped.
fn truncate_spans(spans: Vec<Span<'static>>, max_width: usize) -> Vec<Span<'static>> {
    let total: usize = spans.iter().map(Span::width).sum();
    if total <= max_width {
        return spans;
    }
    if max_width == 0 {
        return Vec::new();
    }

    let mut budget = max_width - 1;
    let mut out = Vec::with_capacity(spans.len() + 1);
    let mut tail_style = Style::default();

    for span in spans {
        tail_style = span.style;
        let span_width = span.width();
        if span_width <= budget {
            budget -= span_width;
            out.push(span);
            continue;
        }

        let mut cut = String::new();
        for c in span.content.chars() {
            let char_width = c.width().unwrap_or(0);
            if char_width > budget {
                break;
            }
            budget -= char_width;
            cut.push(c);
        }
        if !cut.is_empty() {
            out.push(Span::styled(cut, span.style));
        }
        break;
    }

    out.push(Span::styled(ELLIPSIS, tail_style));
    out
}
