use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::io;

use super::app::{App, Mode};
use super::ui;

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (Windows reports Press + Release)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            handle_key(app, key);
        }
    }
    Ok(())
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Help modal takes over input
    if app.help_modal {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => app.toggle_help(),
            KeyCode::Down | KeyCode::Char('j') => app.scroll_help_by(1),
            KeyCode::Up | KeyCode::Char('k') => app.scroll_help_by(-1),
            _ => {}
        }
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.mode {
        Mode::Normal => handle_normal_key(app, key),
        Mode::Edit => handle_edit_key(app, key),
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::Enter | KeyCode::Char('i') => app.start_edit(),
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
}

fn handle_edit_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.finish_edit(),
        KeyCode::Tab => {
            app.finish_edit();
            app.focus_next();
            app.start_edit();
        }
        KeyCode::BackTab => {
            app.finish_edit();
            app.focus_prev();
            app.start_edit();
        }
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.insert_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Field;
    use formulary_core::catalog::parse_catalog_json;
    use formulary_core::{Formulary, HINT};

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn app() -> App {
        let catalog = parse_catalog_json(
            r#"[{ "id": "el", "title": "Electrical", "entries": [
                { "id": "power", "name": "Power", "variables": [
                    { "id": "U", "label": "Voltage" }, { "id": "I", "label": "Current" }
                ] }
            ] }]"#,
        )
        .unwrap();
        App::new(Formulary::new(catalog), HINT.to_string(), "Formulas".to_string())
    }

    #[test]
    fn test_type_expression_and_variables() {
        let mut app = app();
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.mode, Mode::Edit);
        type_text(&mut app, "U * I");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.field, Field::Variable(0));
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "230");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "2");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Normal);
        let card = app.current_card().unwrap();
        assert_eq!(card.display().text(), "460.000");
    }

    #[test]
    fn test_letters_are_text_in_edit_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.current_card().unwrap().expression(), "q");
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_modal_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.help_modal);
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.mode, Mode::Normal);
        press(&mut app, KeyCode::Esc);
        assert!(!app.help_modal);
    }

    #[test]
    fn test_ctrl_c_quits_from_edit_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}
