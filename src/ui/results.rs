use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::models::{Quiz, QuizAttempt};
use crate::scoring::{self, AnswerResult, Score};

use super::truncate;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, quiz: &Quiz, attempt: &QuizAttempt, scroll: usize) {
    let score = scoring::score(quiz, attempt);
    let has_secret = quiz.secret_message.is_some();

    let chunks = Layout::vertical([
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(if has_secret { 4 } else { 0 }),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[0], quiz, score);
    render_question_breakdown(frame, chunks[1], &scoring::breakdown(quiz, attempt), scroll);
    if let Some(secret) = &quiz.secret_message {
        render_secret_message(frame, chunks[2], secret);
    }
    render_controls(frame, chunks[3]);
}

fn get_grade_color(percent: u32) -> Color {
    match percent {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, quiz: &Quiz, score: Score) {
    let content = vec![
        Line::from(Span::styled(
            quiz.title.to_uppercase(),
            Style::default().fg(Color::Magenta).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}%", score.percent),
            Style::default().fg(get_grade_color(score.percent)).bold(),
        )),
        Line::from(Span::styled(
            format!("Connection Score  ·  {} of {} matched", score.correct, score.total),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!("You answered all {} questions", quiz.questions.len()),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(
    frame: &mut Frame,
    area: Rect,
    rows: &[AnswerResult<'_>],
    scroll: usize,
) {
    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let (symbol, color) = if row.is_correct {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };

            let answer = match row.chosen {
                Some(choice) => format!("{choice}: {}", row.question.label(choice)),
                None => "no answer".to_string(),
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate(&row.question.prompt, QUESTION_PREVIEW_LENGTH),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(format!("  {answer}"), Style::default().fg(color)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .padding(Padding::horizontal(1))
                .title("Your Answers".fg(Color::DarkGray)),
        )
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn render_secret_message(frame: &mut Frame, area: Rect, secret: &str) {
    let widget = Paragraph::new(Span::styled(
        format!("\"{secret}\""),
        Style::default().fg(Color::Yellow).italic(),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::Magenta)
            .title("A secret message"),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  c create your own  ·  t take another  ·  r retake  ·  x delete quiz  ·  esc home")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
