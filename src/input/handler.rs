use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::{Action, Direction, SpeedChange};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Only presses count; repeats and releases are ignored
        if key.kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => KeyAction::GameAction(Direction::Up.into()),
            KeyCode::Down => KeyAction::GameAction(Direction::Down.into()),
            KeyCode::Left => KeyAction::GameAction(Direction::Left.into()),
            KeyCode::Right => KeyAction::GameAction(Direction::Right.into()),

            // Speed: Q shortens the tick interval, E lengthens it
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                KeyAction::GameAction(SpeedChange::Faster.into())
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                KeyAction::GameAction(SpeedChange::Slower.into())
            }

            KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
