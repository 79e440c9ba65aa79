use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::state::SecretState;

pub fn render(frame: &mut Frame, area: Rect, secret: &SecretState) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);
    let columns = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Max(60),
        Constraint::Fill(1),
    ])
    .split(chunks[1]);

    let mut message = vec![Span::styled(
        secret.visible_text(),
        Style::default().fg(Color::White).italic(),
    )];
    if !secret.is_complete() {
        message.push(Span::styled("\u{258c}", Style::default().fg(Color::Magenta)));
    }

    let controls = if secret.is_complete() {
        "enter return home"
    } else {
        "enter reveal all  ·  esc back"
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "\u{2764} A Secret Message",
            Style::default().fg(Color::Magenta).bold(),
        )),
        Line::from(""),
        Line::from(message),
        Line::from(""),
        Line::from(""),
        Line::from(controls.fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::Magenta),
        );
    frame.render_widget(widget, columns[1]);
}
