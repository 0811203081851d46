use crossterm::event::{Event, KeyCode};

/// Symbolic key understood by the screens.
///
/// Only key presses are translated; releases and repeats reported by the
/// terminal are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub(crate) enum Key {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
    ToggleDebug,
    Backspace,
    Char(char),
}

impl Key {
    pub(crate) fn from_event(event: &Event) -> Option<Self> {
        let event = event.as_key_press_event()?;
        let key = match event.code {
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Enter => Key::Confirm,
            KeyCode::Esc => Key::Cancel,
            KeyCode::F(1) => Key::ToggleDebug,
            KeyCode::Backspace | KeyCode::Delete => Key::Backspace,
            KeyCode::Char(c) => Key::Char(c),
            _ => return None,
        };
        Some(key)
    }

    /// Returns the direction for arrow keys and WASD, if any.
    pub(crate) fn direction(self) -> Option<Self> {
        match self {
            Key::Up | Key::Down | Key::Left | Key::Right => Some(self),
            Key::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Key::Up),
                's' => Some(Key::Down),
                'a' => Some(Key::Left),
                'd' => Some(Key::Right),
                _ => None,
            },
            _ => None,
        }
    }

    /// Enter or Space.
    pub(crate) fn is_activate(self) -> bool {
        matches!(self, Key::Confirm | Key::Char(' '))
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyEventKind, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_from_event() {
        assert_eq!(Key::from_event(&press(KeyCode::Enter)), Some(Key::Confirm));
        assert_eq!(Key::from_event(&press(KeyCode::Esc)), Some(Key::Cancel));
        assert_eq!(Key::from_event(&press(KeyCode::F(1))), Some(Key::ToggleDebug));
        assert_eq!(Key::from_event(&press(KeyCode::Delete)), Some(Key::Backspace));
        assert_eq!(Key::from_event(&press(KeyCode::Char('x'))), Some(Key::Char('x')));
        assert_eq!(Key::from_event(&press(KeyCode::Tab)), None);
        assert_eq!(Key::from_event(&Event::FocusGained), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(Key::from_event(&release), None);
    }

    #[test]
    fn test_wasd_directions() {
        assert_eq!(Key::Char('w').direction(), Some(Key::Up));
        assert_eq!(Key::Char('A').direction(), Some(Key::Left));
        assert_eq!(Key::Char('s').direction(), Some(Key::Down));
        assert_eq!(Key::Char('d').direction(), Some(Key::Right));
        assert_eq!(Key::Right.direction(), Some(Key::Right));
        assert_eq!(Key::Char('q').direction(), None);
        assert_eq!(Key::Confirm.direction(), None);
    }

    #[test]
    fn test_activate() {
        assert!(Key::Confirm.is_activate());
        assert!(Key::Char(' ').is_activate());
        assert!(!Key::Cancel.is_activate());
        assert!(!Key::Char('x').is_activate());
    }
}
