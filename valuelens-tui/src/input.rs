//! Keyboard input dispatch.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use valuelens_core::Metric;

use crate::app::AppState;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),

        KeyCode::Char('1') => app.set_metric(Metric::Pe),
        KeyCode::Char('2') => app.set_metric(Metric::Pb),
        KeyCode::Char('3') => app.set_metric(Metric::Ps),
        KeyCode::Char('m') => app.cycle_metric(),

        KeyCode::Char('h') | KeyCode::Left => app.shift_start_year(-1),
        KeyCode::Char('l') | KeyCode::Right => app.shift_start_year(1),

        KeyCode::Char('r') => app.reload(),
        _ => {}
    }
}

/// Key bindings shown in the status bar.
pub fn key_hints() -> &'static [(&'static str, &'static str)] {
    &[
        ("j/k", "ticker"),
        ("1-3/m", "metric"),
        ("h/l", "year"),
        ("r", "reload"),
        ("q", "quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn navigation_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        handle_key(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.cursor, 1);
        handle_key(&mut app, press(KeyCode::Up));
        assert_eq!(app.cursor, 0);

        handle_key(&mut app, press(KeyCode::Char('2')));
        assert_eq!(app.metric, Metric::Pb);
        handle_key(&mut app, press(KeyCode::Char('m')));
        assert_eq!(app.metric, Metric::Ps);
        handle_key(&mut app, press(KeyCode::Char('1')));
        assert_eq!(app.metric, Metric::Pe);

        handle_key(&mut app, press(KeyCode::Char('h')));
        assert_eq!(app.start_year, 2020);
        handle_key(&mut app, press(KeyCode::Right));
        assert_eq!(app.start_year, 2021);
    }

    #[test]
    fn release_events_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_key(&mut app, release);
        assert!(app.running);

        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn ctrl_c_quits() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(!app.running);
    }
}
