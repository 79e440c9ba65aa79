mod create;
mod landing;
mod results;
mod secret;
mod take;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, Notice, NoticeKind};
use crate::state::Screen;

const NOTICE_WIDTH: u16 = 44;
const NOTICE_HEIGHT: u16 = 4;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.screen {
        Screen::Landing => landing::render(frame, area),
        Screen::Create(create) => create::render(frame, area, create),
        Screen::Take(take) => take::render(frame, area, take),
        Screen::Results { code, scroll } => {
            let store = app.store();
            if let (Some(quiz), Some(attempt)) = (store.get_quiz(code), store.get_attempt(code)) {
                results::render(frame, area, quiz, attempt, *scroll);
            }
        }
        Screen::Secret(secret) => secret::render(frame, area, secret),
    }

    render_notices(frame, area, app.notices());
}

/// Stack notices in the bottom right corner, newest at the bottom.
fn render_notices(frame: &mut Frame, area: Rect, notices: &[Notice]) {
    let width = NOTICE_WIDTH.min(area.width);
    let mut bottom = area.bottom();

    for notice in notices.iter().rev() {
        if bottom < area.y + NOTICE_HEIGHT {
            break;
        }
        bottom -= NOTICE_HEIGHT;
        let rect = Rect::new(area.right() - width, bottom, width, NOTICE_HEIGHT);

        let color = match notice.kind {
            NoticeKind::Info => Color::Green,
            NoticeKind::Error => Color::Red,
        };
        let widget = Paragraph::new(notice.description.clone())
            .wrap(Wrap { trim: true })
            .fg(Color::White)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(color)
                    .title(Span::styled(
                        notice.title.clone(),
                        Style::default().fg(color).bold(),
                    )),
            );

        frame.render_widget(Clear, rect);
        frame.render_widget(widget, rect);
    }
}

/// Cut `text` to `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let truncated: String = text.chars().take(max).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}
