//! Terminal event loop and key bindings.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::app::{App, NoticeKind, UploadEvent};
use crate::models::Choice;
use crate::state::{CreateStep, Screen, TakeState};
use crate::terminal::TerminalGuard;
use crate::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Draw and handle input until the user quits.
pub async fn run(
    app: &mut App,
    mut uploads: mpsc::UnboundedReceiver<UploadEvent>,
) -> std::io::Result<()> {
    let mut guard = TerminalGuard::enter()?;

    while !app.should_quit {
        app.tick(Instant::now());
        guard.terminal().draw(|frame| ui::render(frame, app))?;

        while let Ok(upload) = uploads.try_recv() {
            app.apply_upload(upload);
        }

        // Let spawned uploads make progress between polls.
        tokio::task::yield_now().await;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_key(app, key);
            }
        }
    }

    tracing::info!("quitting");
    Ok(())
}

/// Apply one key press to the app.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    if !app.screen.is_typing() && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) {
        app.should_quit = true;
        return;
    }

    match &app.screen {
        Screen::Landing => handle_landing(app, key.code),
        Screen::Create(create) => match &create.step {
            CreateStep::Questions => handle_questions(app, key.code, ctrl),
            CreateStep::Answers => handle_answers(app, key.code),
            CreateStep::Done { code } => {
                let code = code.clone();
                match key.code {
                    KeyCode::Char('t') => app.open_take(Some(&code)),
                    KeyCode::Enter | KeyCode::Esc => app.go_landing(),
                    _ => {}
                }
            }
        },
        Screen::Take(TakeState::EnterCode { .. }) => handle_code_entry(app, key.code),
        Screen::Take(TakeState::Answering { .. }) => handle_answering(app, key.code),
        Screen::Results { .. } => handle_results(app, key.code),
        Screen::Secret(_) => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => app.advance_secret(),
            KeyCode::Esc => app.go_landing(),
            _ => {}
        },
    }
}

fn handle_landing(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('c') | KeyCode::Char('C') => app.open_create(),
        KeyCode::Char('t') | KeyCode::Char('T') => app.open_take(None),
        KeyCode::Char('s') | KeyCode::Char('S') => app.open_secret(),
        _ => {}
    }
}

fn handle_questions(app: &mut App, key: KeyCode, ctrl: bool) {
    if ctrl {
        match key {
            KeyCode::Char('s') => app.continue_to_answers(),
            KeyCode::Char('n') => {
                if let Screen::Create(create) = &mut app.screen {
                    create.add_question();
                }
            }
            KeyCode::Char('d') => {
                let removed = match &mut app.screen {
                    Screen::Create(create) => create.remove_question(),
                    _ => return,
                };
                if !removed {
                    app.notify(
                        NoticeKind::Error,
                        "Cannot remove",
                        "A quiz needs at least one question",
                    );
                }
            }
            _ => {}
        }
        return;
    }

    let Screen::Create(create) = &mut app.screen else {
        return;
    };
    match key {
        KeyCode::Esc => app.go_landing(),
        KeyCode::Tab => create.next_field(),
        KeyCode::BackTab => create.previous_field(),
        KeyCode::PageDown => create.select_next(),
        KeyCode::PageUp => create.select_previous(),
        KeyCode::Backspace => create.pop_char(),
        KeyCode::Char(c) => create.push_char(c),
        KeyCode::Enter => {
            if create.field.image_side().is_some() {
                app.start_upload();
            } else {
                create.next_field();
            }
        }
        _ => {}
    }
}

fn handle_answers(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('1') => app.mark_answer(Choice::A),
        KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Char('2') => app.mark_answer(Choice::B),
        KeyCode::Down | KeyCode::Char('j') => {
            if let Screen::Create(create) = &mut app.screen {
                create.select_next();
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if let Screen::Create(create) = &mut app.screen {
                create.select_previous();
            }
        }
        KeyCode::Enter => app.finish_create(),
        KeyCode::Esc => app.back_to_questions(),
        _ => {}
    }
}

fn handle_code_entry(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter => app.submit_code(),
        KeyCode::Esc => app.go_landing(),
        KeyCode::Backspace => {
            if let Screen::Take(take) = &mut app.screen {
                take.pop_code_char();
            }
        }
        KeyCode::Char(c) => {
            if let Screen::Take(take) = &mut app.screen {
                take.push_code_char(c);
            }
        }
        _ => {}
    }
}

fn handle_answering(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('1') | KeyCode::Char('a') | KeyCode::Char('A') => app.choose(Choice::A),
        KeyCode::Char('2') | KeyCode::Char('b') | KeyCode::Char('B') => app.choose(Choice::B),
        KeyCode::Left => app.highlight(Choice::A),
        KeyCode::Right => app.highlight(Choice::B),
        KeyCode::Enter | KeyCode::Char(' ') => app.choose_highlighted(),
        KeyCode::Esc => app.go_landing(),
        _ => {}
    }
}

fn handle_results(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.open_create(),
        KeyCode::Char('t') | KeyCode::Char('T') => app.open_take(None),
        KeyCode::Char('r') | KeyCode::Char('R') => app.retake(),
        KeyCode::Char('x') | KeyCode::Char('X') => app.delete_current_quiz(),
        KeyCode::Esc => app.go_landing(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::data::{Discard, Snapshot};
    use crate::images::LocalBucket;
    use crate::models::{Question, QuizDraft};
    use crate::state::Field;
    use crate::store::QuizStore;

    use super::*;

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(
            QuizStore::new(Snapshot::default(), Discard),
            Arc::new(LocalBucket::new(std::env::temp_dir())),
            tx,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn press_ctrl(app: &mut App, c: char) {
        handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn seeded_quiz(app: &mut App) -> String {
        let questions = (0..3)
            .map(|i| Question {
                id: format!("q{i}"),
                prompt: format!("Question {i}"),
                choice_a: "left".to_string(),
                choice_b: "right".to_string(),
                image_a: None,
                image_b: None,
                hint: None,
                expected_choice: Some(Choice::A),
            })
            .collect();
        let mut store = QuizStore::new(Snapshot::default(), Discard);
        let code = store
            .create_quiz(QuizDraft {
                title: "Ours".to_string(),
                questions,
                ..QuizDraft::default()
            })
            .unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        *app = App::new(store, Arc::new(LocalBucket::new(std::env::temp_dir())), tx);
        code
    }

    #[test]
    fn test_q_quits_from_landing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_q_is_text_while_typing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        match &app.screen {
            Screen::Create(create) => assert_eq!(create.current().prompt, "q"),
            other => panic!("expected create screen, got {other:?}"),
        }
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        press_ctrl(&mut app, 'c');
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_moves_between_fields() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Tab);
        match &app.screen {
            Screen::Create(create) => assert_eq!(create.field, Field::Prompt.next()),
            other => panic!("expected create screen, got {other:?}"),
        }
    }

    #[test]
    fn test_ctrl_n_adds_question() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        press_ctrl(&mut app, 'n');
        match &app.screen {
            Screen::Create(create) => assert_eq!(create.questions.len(), 2),
            other => panic!("expected create screen, got {other:?}"),
        }
    }

    #[test]
    fn test_ctrl_d_keeps_last_question() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        press_ctrl(&mut app, 'd');
        assert_eq!(app.notices().len(), 1);
        assert_eq!(app.notices()[0].title, "Cannot remove");
    }

    #[test]
    fn test_take_answer_by_keys() {
        let mut app = app();
        let code = seeded_quiz(&mut app);

        press(&mut app, KeyCode::Char('t'));
        type_text(&mut app, &code.to_lowercase());
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.screen, Screen::Take(TakeState::Answering { .. })));

        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('a'));

        match &app.screen {
            Screen::Results { code: shown, .. } => assert_eq!(shown, &code),
            other => panic!("expected results, got {other:?}"),
        }
        let attempt = app.store().get_attempt(&code).unwrap();
        assert_eq!(attempt.answers[1].choice, Choice::B);
    }

    #[test]
    fn test_results_delete_goes_home() {
        let mut app = app();
        let code = seeded_quiz(&mut app);
        app.open_take(Some(&code));
        for _ in 0..3 {
            press(&mut app, KeyCode::Char('b'));
        }
        press(&mut app, KeyCode::Char('x'));

        assert!(matches!(app.screen, Screen::Landing));
        assert!(app.store().get_quiz(&code).is_none());
    }

    #[test]
    fn test_secret_enter_reveals_then_leaves() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        match &app.screen {
            Screen::Secret(secret) => assert!(secret.is_complete()),
            other => panic!("expected secret screen, got {other:?}"),
        }
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.screen, Screen::Landing));
    }
}
