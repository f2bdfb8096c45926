use super::{centered_rect, key_hint};
use crate::app::{App, LoginField};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

pub fn render(app: &App, frame: &mut Frame) {
    let area = centered_rect(60, 50, frame.area());
    let form = &app.login;

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Sign In ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let fields = [
        (LoginField::UserId, " User id ", &form.user_id, chunks[0]),
        (LoginField::Name, " Display name ", &form.name, chunks[1]),
    ];
    for (field, title, value, rect) in fields {
        let style = if form.focus == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let input = Paragraph::new(value.as_str()).style(Style::default().fg(Color::White)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(title),
        );
        frame.render_widget(input, rect);

        if form.focus == field && rect.height > 2 {
            let cursor_x = (rect.x + 1 + value.width() as u16).min(rect.right().saturating_sub(2));
            frame.set_cursor_position((cursor_x, rect.y + 1));
        }
    }

    // Error message if present
    if let Some(error) = &form.error {
        let error_widget = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(error_widget, chunks[2]);
    }

    let help = Paragraph::new(Line::from(vec![
        key_hint("Tab"),
        Span::raw(" Next field  "),
        key_hint("Enter"),
        Span::raw(" Sign in  "),
        key_hint("Esc"),
        Span::raw(" Quit"),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}
