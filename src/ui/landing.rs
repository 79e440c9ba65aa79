use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(14),
        Constraint::Fill(1),
    ])
    .split(area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "YOU & I",
            Style::default().fg(Color::Magenta).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Would You Rather...",
            Style::default().fg(Color::Yellow).italic(),
        )),
        Line::from(""),
        Line::from(
            "A private game for the two of us, to see how our choices align."
                .fg(Color::DarkGray),
        ),
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled("C", Style::default().fg(Color::Green).bold()),
            Span::styled(" create quiz    ", Style::default().fg(Color::Gray)),
            Span::styled("T", Style::default().fg(Color::Green).bold()),
            Span::styled(" take quiz", Style::default().fg(Color::Gray)),
        ]),
        Line::from(""),
        Line::from(Span::styled("\u{2728}", Style::default().fg(Color::Yellow))),
        Line::from("s secret  ·  q quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );

    frame.render_widget(widget, chunks[1]);
}
