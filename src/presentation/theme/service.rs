use super::adapter::ColorConverter;
use crate::domain::entities::PresenceStatus;
use crate::domain::sidebar::Emphasis;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub current_style: Style,
    pub mention_style: Style,
    pub unread_style: Style,
    pub base_style: Style,
    pub dimmed_style: Style,
    pub header_style: Style,
    pub match_style: Style,
    pub draft_style: Style,
    pub recent_style: Style,
    pub prompt_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new("Yellow", None)
    }
}

impl Theme {
    pub fn new(accent_color_str: &str, mention_color_str: Option<&str>) -> Self {
        let accent = parse_color(accent_color_str);
        let mention = mention_color_str.map(parse_color);
        Self::from_color(accent, mention)
    }

    #[must_use]
    pub fn from_color(accent: Color, mention_color: Option<Color>) -> Self {
        let mention_fg = ColorConverter::shade(mention_color.unwrap_or(Color::Red), 0.65, 0.8);
        let current_bg = ColorConverter::shade(accent, 0.2, 0.3);

        Self {
            accent,
            current_style: Style::default()
                .bg(current_bg)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            mention_style: Style::default().fg(mention_fg).add_modifier(Modifier::BOLD),
            unread_style: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            base_style: Style::default().fg(Color::Reset),
            dimmed_style: Style::default().fg(Color::DarkGray),
            header_style: Style::default()
                .fg(accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            match_style: Style::default()
                .fg(accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            draft_style: Style::default().fg(accent),
            recent_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            prompt_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
        }
    }

    /// Row style for an emphasis level.
    #[must_use]
    pub const fn emphasis_style(&self, emphasis: Emphasis) -> Style {
        match emphasis {
            Emphasis::Current => self.current_style,
            Emphasis::Mention => self.mention_style,
            Emphasis::Unread => self.unread_style,
            Emphasis::Normal => self.base_style,
        }
    }

    #[must_use]
    pub const fn presence_color(status: PresenceStatus) -> Color {
        match status {
            PresenceStatus::Online => Color::Green,
            PresenceStatus::Away => Color::Yellow,
            PresenceStatus::DoNotDisturb => Color::Red,
            PresenceStatus::Offline => Color::DarkGray,
        }
    }
}

fn parse_color(s: &str) -> Color {
    if let Ok(c) = Color::from_str(s) {
        return c;
    }

    if s.starts_with('#')
        && let Some((r, g, b)) = parse_hex_color(s)
    {
        return Color::Rgb(r, g, b);
    }

    match s.to_lowercase().as_str() {
        "orange" => Color::Indexed(208),
        _ => Color::Yellow,
    }
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let s = s.trim_start_matches('#');
    if !s.is_ascii() {
        return None;
    }

    let channel = |hex: &str| u8::from_str_radix(hex, 16).ok();
    match s.len() {
        6 => Some((channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?)),
        3 => {
            let doubled = |i: usize| channel(&s[i..=i].repeat(2));
            Some((doubled(0)?, doubled(1)?, doubled(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Red", Color::Red ; "named")]
    #[test_case("blue", Color::Blue ; "lowercase name")]
    #[test_case("#FF0000", Color::Rgb(255, 0, 0) ; "six digit hex")]
    #[test_case("#0f0", Color::Rgb(0, 255, 0) ; "three digit hex")]
    #[test_case("Orange", Color::Indexed(208) ; "orange alias")]
    #[test_case("Invalid", Color::Yellow ; "fallback")]
    fn test_parse_color(input: &str, expected: Color) {
        assert_eq!(parse_color(input), expected);
    }

    #[test]
    fn test_emphasis_styles_are_distinct() {
        let theme = Theme::default();
        assert_eq!(theme.emphasis_style(Emphasis::Current), theme.current_style);
        assert_eq!(theme.emphasis_style(Emphasis::Mention), theme.mention_style);
        assert_ne!(theme.current_style, theme.unread_style);
        assert_ne!(theme.mention_style, theme.base_style);
    }

    #[test]
    fn test_presence_colors() {
        assert_eq!(Theme::presence_color(PresenceStatus::Online), Color::Green);
        assert_eq!(Theme::presence_color(PresenceStatus::Offline), Color::DarkGray);
    }
}
