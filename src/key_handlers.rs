use crate::conversation::Seq;
use crate::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Applies one key event to the app. Returns the submission to
/// dispatch when Enter produced one; every other key returns None.
pub fn handle_chat_input(key: KeyEvent, app: &mut App) -> Option<(Seq, String)> {
    match key.code {
        KeyCode::Enter => return app.submit(),
        KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.should_quit = true,
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
            } else {
                app.input.push(c);
            }
        }
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_chars_build_up_the_input() {
        let mut app = App::new();
        for c in "hi there".chars() {
            handle_chat_input(press(KeyCode::Char(c)), &mut app);
        }
        assert_eq!(app.input, "hi there");

        handle_chat_input(press(KeyCode::Backspace), &mut app);
        assert_eq!(app.input, "hi ther");
    }

    #[test]
    fn test_enter_submits_and_clears() {
        let mut app = App::new();
        app.input = "hello".to_string();

        let submission = handle_chat_input(press(KeyCode::Enter), &mut app);
        assert_eq!(submission, Some((0, "hello".to_string())));
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_enter_on_whitespace_does_nothing() {
        let mut app = App::new();
        app.input = "   ".to_string();

        assert_eq!(handle_chat_input(press(KeyCode::Enter), &mut app), None);
        assert_eq!(app.input, "   ");
        assert!(app.conversation.messages().is_empty());
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let mut app = App::new();
        app.input = "hello".to_string();

        handle_chat_input(press(KeyCode::Tab), &mut app);
        handle_chat_input(press(KeyCode::F(5)), &mut app);
        assert_eq!(app.input, "hello");
        assert!(!app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = App::new();
        handle_chat_input(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
        );
        assert!(app.should_quit);
    }
}
