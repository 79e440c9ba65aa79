use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::code::{is_valid_code, CODE_LENGTH};
use crate::models::{Choice, Question};
use crate::state::TakeState;

pub fn render(frame: &mut Frame, area: Rect, take: &TakeState) {
    match take {
        TakeState::EnterCode { input } => render_code_entry(frame, area, input),
        TakeState::Answering {
            quiz,
            index,
            highlighted,
            ..
        } => {
            let Some(question) = quiz.questions.get(*index) else {
                return;
            };
            render_question(frame, area, question, *index, quiz.questions.len(), *highlighted);
        }
    }
}

fn render_code_entry(frame: &mut Frame, area: Rect, input: &str) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let ready = is_valid_code(input);
    let placeholder = "_".repeat(CODE_LENGTH.saturating_sub(input.len()));

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TAKE A QUIZ",
            Style::default().fg(Color::Magenta).bold(),
        )),
        Line::from(""),
        Line::from("Enter the 6-character code you received".fg(Color::DarkGray)),
        Line::from(""),
        Line::from(vec![
            Span::styled(input.to_string(), Style::default().fg(Color::Yellow).bold()),
            Span::styled(placeholder, Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER start quiz",
            if ready {
                Style::default().fg(Color::Green).bold()
            } else {
                Style::default().fg(Color::DarkGray)
            },
        )),
        Line::from("esc back".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);
}

fn render_question(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    index: usize,
    total: usize,
    highlighted: Choice,
) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], chunks[1], index, total);
    render_prompt(frame, chunks[3], question);

    let options = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
        .spacing(2)
        .split(chunks[4]);
    render_choice(frame, options[0], question, Choice::A, highlighted);
    render_choice(frame, options[1], question, Choice::B, highlighted);

    let widget = Paragraph::new("1/a or 2/b choose  ·  ←/→ + enter  ·  esc quit quiz")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, chunks[5]);
}

fn render_progress(frame: &mut Frame, label_area: Rect, bar_area: Rect, index: usize, total: usize) {
    let ratio = (index + 1) as f64 / total.max(1) as f64;

    let label = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Question {} of {}", index + 1, total),
            Style::default().fg(Color::Gray),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{}%", (ratio * 100.0).round()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(label, label_area);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(ratio.min(1.0))
        .label("");
    frame.render_widget(gauge, bar_area);
}

fn render_prompt(frame: &mut Frame, area: Rect, question: &Question) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Would you rather...",
            Style::default().fg(Color::Magenta).italic(),
        )),
        Line::from(Span::styled(
            question.prompt.clone(),
            Style::default().fg(Color::White).bold(),
        )),
    ];
    if let Some(hint) = &question.hint {
        lines.push(Line::from(Span::styled(
            format!("\u{1f4ad} {hint}"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_choice(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    choice: Choice,
    highlighted: Choice,
) {
    let is_highlighted = choice == highlighted;
    let style = if is_highlighted {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    };

    let key = match choice {
        Choice::A => "1",
        Choice::B => "2",
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(question.label(choice).to_string(), style)),
        Line::from(""),
    ];
    if let Some(uri) = question.image(choice) {
        lines.push(Line::from(Span::styled(
            format!("\u{1f5bc} {uri}"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if is_highlighted { Color::Cyan } else { Color::DarkGray })
                .padding(Padding::horizontal(1))
                .title(format!(" {key} ")),
        );
    frame.render_widget(widget, area);
}
