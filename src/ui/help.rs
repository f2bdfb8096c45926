use super::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn section(title: &str) -> Line<'_> {
    Line::from(vec![Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )])
}

fn binding<'a>(keys: &'a str, description: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(keys, Style::default().fg(Color::Yellow)),
        Span::raw(description),
    ])
}

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        section("  Global"),
        binding("    Ctrl+C    ", "Quit from anywhere"),
        Line::from(""),
        section("  Sign In"),
        binding("    Tab       ", "Switch between user id and name"),
        binding("    Enter     ", "Sign in"),
        binding("    Esc       ", "Quit application"),
        Line::from(""),
        section("  Profile"),
        binding("    ?         ", "Toggle this help"),
        binding("    q/Esc     ", "Quit application"),
        binding("    ↑/k ↓/j   ", "Move through the menu"),
        binding("    Enter     ", "Open the selected entry"),
        binding("    1-7       ", "Open an entry directly"),
        Line::from(""),
        section("  Other Screens"),
        binding("    ?         ", "Toggle this help"),
        binding("    q         ", "Quit application"),
        binding("    Esc       ", "Back"),
        binding("    Tab       ", "Switch task tabs"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help — Keybindings ")
                .title_bottom(
                    Line::from(" Press any key to close ").style(Style::default().fg(Color::DarkGray)),
                ),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
