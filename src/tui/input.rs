//! Key bindings.

use codebreaker::{ColorId, Command, Difficulty, Overlay, SessionSnapshot};
use crossterm::event::KeyCode;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Send a command to the game.
    Command(Command),
    /// Leave the game.
    Quit,
    /// Unbound key.
    Ignore,
}

/// Maps a key to an input, given what is on screen.
///
/// `p` and `?` toggle: they open their overlay on a clear board and
/// resume from any overlay.
pub fn map_key(key: KeyCode, snapshot: &SessionSnapshot) -> Input {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Input::Quit,
        KeyCode::Char(c @ '1'..='7') => c
            .to_digit(10)
            .and_then(|digit| ColorId::from_index(digit as usize - 1))
            .map_or(Input::Ignore, |color| Input::Command(Command::AddColor(color))),
        // Shifted letters pick colors by initial (R G B Y M C W)
        KeyCode::Char(c) if c.is_ascii_uppercase() => ColorId::from_letter(c)
            .map_or(Input::Ignore, |color| Input::Command(Command::AddColor(color))),
        KeyCode::Backspace => Input::Command(Command::EraseLast),
        KeyCode::Enter => Input::Command(Command::SubmitGuess),
        KeyCode::Char('p') | KeyCode::Char(' ') => toggle(snapshot, Command::Pause),
        KeyCode::Char('?') | KeyCode::F(1) => toggle(snapshot, Command::ShowHelp),
        KeyCode::Char('e') => Input::Command(Command::Restart(Difficulty::Easy)),
        KeyCode::Char('d') => Input::Command(Command::Restart(Difficulty::Difficult)),
        _ => Input::Ignore,
    }
}

fn toggle(snapshot: &SessionSnapshot, open: Command) -> Input {
    if snapshot.overlay == Overlay::None {
        Input::Command(open)
    } else {
        Input::Command(Command::Resume)
    }
}
