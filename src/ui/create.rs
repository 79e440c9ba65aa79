use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::models::Choice;
use crate::state::{CreateState, CreateStep, Field, ImageSlot, QuestionDraft};

use super::truncate;

const PREVIEW_LENGTH: usize = 28;

pub fn render(frame: &mut Frame, area: Rect, create: &CreateState) {
    match &create.step {
        CreateStep::Questions => render_questions_step(frame, area, create),
        CreateStep::Answers => render_answers_step(frame, area, create),
        CreateStep::Done { code } => render_done(frame, area, code),
    }
}

fn render_questions_step(frame: &mut Frame, area: Rect, create: &CreateState) {
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_quiz_field(frame, rows[0], create, Field::Title);

    let columns = Layout::horizontal([Constraint::Length(36), Constraint::Fill(1)]).split(rows[1]);
    render_question_list(frame, columns[0], create);
    render_question_form(frame, columns[1], create);

    render_quiz_field(frame, rows[2], create, Field::Secret);
    render_controls(
        frame,
        rows[3],
        "tab field  ·  pgup/pgdn question  ·  ^n add  ·  ^d remove  ·  enter upload image  ·  ^s continue  ·  esc back",
    );
}

fn render_quiz_field(frame: &mut Frame, area: Rect, create: &CreateState, field: Field) {
    let focused = create.field == field;
    let widget = Paragraph::new(input_line(create.field_value(field), focused)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_color(focused))
            .title(field.label()),
    );
    frame.render_widget(widget, area);
}

fn render_question_list(frame: &mut Frame, area: Rect, create: &CreateState) {
    let lines: Vec<Line> = create
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let is_selected = index == create.selected;
            let style = if is_selected {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            let preview = if question.prompt.is_empty() {
                "(empty)".to_string()
            } else {
                truncate(&question.prompt, PREVIEW_LENGTH)
            };

            Line::from(vec![
                Span::styled(if is_selected { " > " } else { "   " }, style),
                Span::styled(format!("{:2}. ", index + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(preview, style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(format!("Questions ({})", create.questions.len())),
    );
    frame.render_widget(widget, area);
}

fn render_question_form(frame: &mut Frame, area: Rect, create: &CreateState) {
    let question = create.current();
    let mut lines = Vec::new();

    for field in [Field::Prompt, Field::ChoiceA, Field::ChoiceB, Field::Hint] {
        push_field(&mut lines, create, field);
    }
    for (field, side) in [(Field::ImageA, Choice::A), (Field::ImageB, Choice::B)] {
        push_field(&mut lines, create, field);
        lines.push(image_status(question, side));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1))
            .title(format!("Question {}", create.selected + 1)),
    );
    frame.render_widget(widget, area);
}

fn push_field(lines: &mut Vec<Line<'static>>, create: &CreateState, field: Field) {
    let focused = create.field == field;
    let label_style = if focused {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    lines.push(Line::from(Span::styled(field.label(), label_style)));
    lines.push(input_line(create.field_value(field), focused));
}

fn image_status(question: &QuestionDraft, side: Choice) -> Line<'static> {
    let ImageSlot { uri, uploading, .. } = question.image(side);
    if *uploading {
        Line::from("  uploading...".fg(Color::Yellow))
    } else if let Some(uri) = uri {
        Line::from(Span::styled(
            format!("  \u{2713} {uri}"),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from("")
    }
}

fn input_line(value: &str, focused: bool) -> Line<'static> {
    let mut spans = vec![Span::styled(
        value.to_string(),
        Style::default().fg(Color::White),
    )];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn border_color(focused: bool) -> Color {
    if focused { Color::Cyan } else { Color::DarkGray }
}

fn render_answers_step(frame: &mut Frame, area: Rect, create: &CreateState) {
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let header = vec![
        Line::from(Span::styled(
            "Now Answer Your Own Quiz",
            Style::default().fg(Color::Magenta).bold(),
        )),
        Line::from("Your answers will be used to calculate the match percentage".fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(header).alignment(Alignment::Center), rows[0]);

    let mut lines: Vec<Line> = Vec::with_capacity(create.questions.len() * 3);
    for (index, question) in create.questions.iter().enumerate() {
        let is_selected = index == create.selected;
        let prompt_style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(if is_selected { " > " } else { "   " }, prompt_style),
            Span::styled(format!("{}. {}", index + 1, question.prompt), prompt_style),
        ]));
        lines.push(Line::from(vec![
            Span::raw("     "),
            choice_span(Choice::A, &question.choice_a, question.expected),
            Span::raw("   "),
            choice_span(Choice::B, &question.choice_b, question.expected),
        ]));
        lines.push(Line::from(""));
    }

    let scroll = (create.selected * 3).saturating_sub(rows[1].height as usize / 2);
    let widget = Paragraph::new(lines).scroll((scroll as u16, 0));
    frame.render_widget(widget, rows[1]);

    let controls = if create.all_marked() {
        "j/k question  ·  a/b answer  ·  enter create quiz  ·  esc back to questions"
    } else {
        "j/k question  ·  a/b answer  ·  esc back to questions"
    };
    render_controls(frame, rows[2], controls);
}

fn choice_span(choice: Choice, label: &str, expected: Option<Choice>) -> Span<'static> {
    let style = if expected == Some(choice) {
        Style::default().fg(Color::Black).bg(Color::Magenta).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    Span::styled(format!(" {choice}: {label} "), style)
}

fn render_done(frame: &mut Frame, area: Rect, code: &str) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Quiz created! \u{2728}",
            Style::default().fg(Color::Magenta).bold(),
        )),
        Line::from(""),
        Line::from("Share this code".fg(Color::DarkGray)),
        Line::from(Span::styled(
            code.to_string(),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("you-and-i --take {code}"),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from("t take it now  ·  enter back to home".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);
}

fn render_controls(frame: &mut Frame, area: Rect, text: &'static str) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
