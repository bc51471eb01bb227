mod widget;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use self::widget::FrameWidget;

/// Header, emulator picture, key help.
pub fn draw(f: &mut Frame, rom_name: &str, fps: u32, frame: &[u8]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Game
            Constraint::Length(1), // Footer
        ])
        .split(f.size());

    let title = Line::from(vec![
        Span::styled(
            " Famium ",
            Style::default().bg(Color::Blue).fg(Color::White).bold(),
        ),
        Span::raw(format!(" | ROM: {} | FPS: {}", rom_name, fps)),
    ]);
    f.render_widget(
        Paragraph::new(title).alignment(Alignment::Center),
        chunks[0],
    );

    f.render_widget(FrameWidget::new(frame), chunks[1]);

    let help = Line::from(vec![
        Span::styled("Q/Esc", Style::default().bold()),
        Span::raw(": Quit | "),
        Span::styled("WASD/Arrows", Style::default().bold()),
        Span::raw(": D-Pad | "),
        Span::styled("./, Z/X", Style::default().bold()),
        Span::raw(": A/B | "),
        Span::styled("N/M Space/Enter", Style::default().bold()),
        Span::raw(": Sel/Start"),
    ]);
    f.render_widget(
        Paragraph::new(help)
            .alignment(Alignment::Center)
            .bg(Color::DarkGray),
        chunks[2],
    );
}
