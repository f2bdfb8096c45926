mod destination;
mod help;
mod login;
mod profile;

use crate::app::{App, Screen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    match app.screen() {
        Screen::Login => login::render(app, frame),
        Screen::Profile => profile::render(app, frame),
        Screen::Destination => destination::render(app, frame),
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

/// A highlighted key hint for status bars.
fn key_hint(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        result.push(c);
        width += w;
    }
    result.push('…');
    result
}

/// Create a centered rectangle using percentage of parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{NavigationHost, PROFILE};
    use crate::testing::{CallLog, FakePoints, FakeSessionStore};
    use ratatui::{Terminal, backend::TestBackend};
    use std::rc::Rc;

    fn app(initial: &str) -> App {
        let log = CallLog::default();
        App::new(
            Rc::new(FakeSessionStore::new(None, log.clone())),
            Rc::new(FakePoints::new(&[], log)),
            initial,
            "Example Institute".to_string(),
        )
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Rewards", 10), "Rewards");
        assert_eq!(truncate_str("Leaderboard", 6), "Leade…");
        assert_eq!(truncate_str("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn test_profile_renders_menu_and_header() {
        let app = app(PROFILE);
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();

        terminal.draw(|frame| render(&app, frame)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Example Institute"));
        assert!(text.contains("All Completed Tasks"));
        assert!(text.contains("Logout"));
        assert!(text.contains("0 points"));
        assert!(text.contains("badges"));
        assert!(text.contains("rank"));
    }

    #[test]
    fn test_login_renders_form() {
        let app = app("Login");
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal.draw(|frame| render(&app, frame)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Sign In"));
        assert!(text.contains("User id"));
    }

    #[test]
    fn test_destination_and_help_render() {
        let mut app = app(PROFILE);
        app.nav.navigate_to("Rewards", None);
        app.show_help = true;
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();

        terminal.draw(|frame| render(&app, frame)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Profile › Rewards"));
        assert!(text.contains("Keybindings"));
        assert!(text.contains("q/Esc"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let app = app(PROFILE);
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();
    }
}
