//! Key mapping from terminal events to commands.
//!
//! | Key               | Command            |
//! |-------------------|--------------------|
//! | Left / Right      | move               |
//! | Down              | soft drop          |
//! | Up, `x`           | rotate clockwise   |
//! | `z`               | rotate counter-cw  |
//! | Space             | hard drop          |
//! | `c`               | hold               |
//! | `p`               | pause              |
//! | `r`               | restart            |
//! | `q`, Ctrl-C       | quit               |

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the front end should do with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Game(GameAction),
    Quit,
}

/// Map a key event to a command.
///
/// Release events are ignored so terminals that report them do not trigger
/// every action twice.
pub fn translate(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Left => GameAction::MoveLeft,
        KeyCode::Right => GameAction::MoveRight,
        KeyCode::Down => GameAction::SoftDrop,
        KeyCode::Up => GameAction::RotateCw,
        KeyCode::Char(' ') => GameAction::HardDrop,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'x' => GameAction::RotateCw,
            'z' => GameAction::RotateCcw,
            'c' => GameAction::Hold,
            'p' => GameAction::Pause,
            'r' => GameAction::Restart,
            'q' => return Some(Command::Quit),
            _ => return None,
        },
        KeyCode::Esc => return Some(Command::Quit),
        _ => return None,
    };
    Some(Command::Game(action))
}
