use super::key_hint;
use crate::app::{App, TaskTab};
use crate::navigation::TASK;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let route = app.nav.current();
    let is_task = route.name == TASK;

    // Layout: header(3) + tabs(3, task only) + content(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(if is_task { 3 } else { 0 }),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header: breadcrumb of the history, current route highlighted ──
    let mut crumbs = vec![Span::raw(" ")];
    for parent in &app.nav.history()[..app.nav.history().len() - 1] {
        crumbs.push(Span::styled(
            format!("{} › ", parent.name),
            Style::default().fg(Color::DarkGray),
        ));
    }
    crumbs.push(Span::styled(
        route.name.as_str(),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    ));
    let header = Paragraph::new(Line::from(crumbs))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, chunks[0]);

    // ── Tab strip ──
    if is_task {
        let tab_titles: Vec<Line> = TaskTab::ALL
            .iter()
            .map(|t| {
                let style = if *t == app.task_tab {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Line::from(Span::styled(t.label(), style))
            })
            .collect();

        let tab_index = TaskTab::ALL
            .iter()
            .position(|t| *t == app.task_tab)
            .unwrap_or(0);

        let tabs = Tabs::new(tab_titles)
            .select(tab_index)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" [Tab] "),
            )
            .highlight_style(Style::default().fg(Color::Cyan));
        frame.render_widget(tabs, chunks[1]);
    }

    // ── Content area ──
    let mut lines = Vec::new();
    match &route.params {
        Some(params) if !params.is_empty() => {
            lines.push(Line::from(Span::styled(
                " Parameters",
                Style::default().fg(Color::DarkGray),
            )));
            for (key, value) in params {
                lines.push(Line::from(vec![
                    Span::styled(format!("   {key}: "), Style::default().fg(Color::DarkGray)),
                    Span::styled(value.as_str(), Style::default().fg(Color::White)),
                ]));
            }
        }
        _ => lines.push(Line::from(Span::styled(
            " Nothing here yet.",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let title = if is_task {
        format!(" {} ", app.task_tab.label())
    } else {
        format!(" {} ", route.name)
    };
    let content = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title),
    );
    frame.render_widget(content, chunks[2]);

    // ── Status bar ──
    let mut status = vec![key_hint(" Esc"), Span::raw(" Back  ")];
    if is_task {
        status.push(key_hint("Tab"));
        status.push(Span::raw(" Switch  "));
    }
    status.push(key_hint("?"));
    status.push(Span::raw(" Help  "));
    status.push(key_hint("q"));
    status.push(Span::raw(" Quit"));
    frame.render_widget(Paragraph::new(Line::from(status)), chunks[3]);
}
