use super::{key_hint, truncate_str};
use crate::app::App;
use crate::profile::MENU;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

const ACCENT: Color = Color::Magenta;

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let state = app.profile_state();

    // Layout: header(5) + stats(3) + menu(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let name_width = (area.width as usize).saturating_sub(4);
    let header_lines = vec![
        Line::from(Span::styled(
            truncate_str(&state.display_name, name_width),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate_str(&app.institution, name_width),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let header = Paragraph::new(header_lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(" Profile "),
        );
    frame.render_widget(header, chunks[0]);

    // ── Stats: points, badges, leaderboard rank ──
    // Badges and rank have no backing store yet; they render as placeholders
    let stat_cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(chunks[1]);
    let points = state.point_total.to_string();
    let stats = [
        ("★ ", Color::Yellow, points.as_str(), " points"),
        ("◆ ", Color::Cyan, "-", " badges"),
        ("▲ ", Color::Green, "#-", " rank"),
    ];
    for ((icon, color, value, label), cell) in stats.into_iter().zip(stat_cells.iter()) {
        let stat = Paragraph::new(Line::from(vec![
            Span::styled(icon, Style::default().fg(color)),
            Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(label, Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(stat, *cell);
    }

    // ── Menu ──
    let items: Vec<ListItem> = MENU
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(entry.label, Style::default().fg(ACCENT)),
            ]))
        })
        .collect();

    let menu = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    list_state.select(Some(app.menu_selected));
    frame.render_stateful_widget(menu, chunks[2], &mut list_state);

    // ── Status bar ──
    let status_line = Line::from(vec![
        key_hint(" ↑↓"),
        Span::raw(" Navigate  "),
        key_hint("Enter/1-7"),
        Span::raw(" Open  "),
        key_hint("?"),
        Span::raw(" Help  "),
        key_hint("q"),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[3]);
}
