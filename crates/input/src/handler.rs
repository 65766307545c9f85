//! Held-key input handler for terminal environments.
//!
//! The simulation samples key-down state once per frame. Terminals report
//! key presses (and auto-repeat presses), but many never report releases, so
//! a press is treated as held for a short release timeout unless the terminal
//! has been seen to emit release events.
//!
//! A held key reads as down on every frame only when the terminal reports
//! releases (keyboard enhancement); otherwise it pulses at the auto-repeat rate.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::map::{self, map_key};
use crate::types::{Command, InputFrame, FRAME_MS};

// One frame: a tap acts once, terminal auto-repeat keeps a held key pulsing.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = FRAME_MS;

#[derive(Debug, Clone, Copy, Default)]
struct KeyHold {
    down: bool,
    idle_ms: u32,
}

/// Tracks which commands are held and produces one [`InputFrame`] per frame.
#[derive(Debug, Clone)]
pub struct InputHandler {
    keys: [KeyHold; 4],
    release_events: bool,
    key_release_timeout_ms: u32,
}

fn slot(command: Command) -> usize {
    match command {
        Command::MoveLeft => 0,
        Command::MoveRight => 1,
        Command::SoftDrop => 2,
        Command::Rotate => 3,
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            keys: [KeyHold::default(); 4],
            release_events: false,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// True once a release event has been seen; timeouts no longer apply.
    pub fn has_release_events(&self) -> bool {
        self.release_events
    }

    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Command> {
        let command = map_key(code)?;
        self.hold(command);
        Some(command)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<Command> {
        self.release_events = true;
        let command = map_key(code)?;
        self.keys[slot(command)].down = false;
        Some(command)
    }

    /// Route a crossterm key event by kind.
    ///
    /// Presses with Ctrl held are not commands. Releases always clear the hold.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Command> {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let command = map::handle_key_event(key)?;
                self.hold(command);
                Some(command)
            }
            KeyEventKind::Release => self.handle_key_release(key.code),
        }
    }

    fn hold(&mut self, command: Command) {
        let key = &mut self.keys[slot(command)];
        key.down = true;
        key.idle_ms = 0;
    }

    /// Current held state, then age presses by `elapsed_ms`.
    ///
    /// A press is always visible to at least one sample.
    pub fn sample(&mut self, elapsed_ms: u32) -> InputFrame {
        let mut frame = InputFrame::default();
        for command in Command::ALL {
            frame.set(command, self.keys[slot(command)].down);
        }

        if !self.release_events {
            for key in self.keys.iter_mut().filter(|k| k.down) {
                key.idle_ms = key.idle_ms.saturating_add(elapsed_ms);
                if key.idle_ms >= self.key_release_timeout_ms {
                    key.down = false;
                }
            }
        }

        frame
    }

    /// Forget all held keys.
    pub fn reset(&mut self) {
        self.keys = [KeyHold::default(); 4];
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn tap_lasts_one_frame_without_release_events() {
        let mut input = InputHandler::new();
        assert_eq!(
            input.handle_key_press(KeyCode::Left),
            Some(Command::MoveLeft)
        );

        assert!(input.sample(FRAME_MS).move_left);
        assert!(input.sample(FRAME_MS).is_idle());
    }

    #[test]
    fn repeat_presses_keep_key_held() {
        let mut input = InputHandler::new().with_key_release_timeout_ms(50);
        input.handle_key_press(KeyCode::Down);
        assert!(input.sample(16).soft_drop);
        assert!(input.sample(16).soft_drop);

        // Auto-repeat refreshes the hold before the timeout.
        input.handle_key_press(KeyCode::Down);
        for _ in 0..4 {
            assert!(input.sample(16).soft_drop);
        }
        assert!(input.sample(16).is_idle());
    }

    #[test]
    fn release_events_give_true_hold() {
        let mut input = InputHandler::new();
        input.handle_key_event(KeyEvent::new_with_kind(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert!(input.has_release_events());

        input.handle_key_press(KeyCode::Up);
        for _ in 0..10 {
            assert!(input.sample(FRAME_MS).rotate);
        }

        input.handle_key_event(KeyEvent::new_with_kind(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert!(!input.sample(FRAME_MS).rotate);
    }

    #[test]
    fn independent_keys_combine() {
        let mut input = InputHandler::new();
        input.handle_key_press(KeyCode::Left);
        input.handle_key_press(KeyCode::Right);
        input.handle_key_press(KeyCode::Char('w'));
        let frame = input.sample(FRAME_MS);
        assert!(frame.move_left && frame.move_right && frame.rotate);
        assert!(!frame.soft_drop);
    }

    #[test]
    fn control_chords_do_not_hold_keys() {
        let mut input = InputHandler::new();
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(input.handle_key_event(ctrl_s), None);
        assert!(!input.sample(FRAME_MS).soft_drop);

        let s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(input.handle_key_event(s), Some(Command::SoftDrop));
        assert!(input.sample(FRAME_MS).soft_drop);
    }

    #[test]
    fn control_release_still_clears_hold() {
        let mut input = InputHandler::new();
        input.handle_key_event(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        input.handle_key_event(KeyEvent::new_with_kind(
            KeyCode::Down,
            KeyModifiers::CONTROL,
            KeyEventKind::Release,
        ));
        assert!(input.sample(FRAME_MS).is_idle());
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let mut input = InputHandler::new();
        assert_eq!(input.handle_key_press(KeyCode::Char('x')), None);
        assert!(input.sample(FRAME_MS).is_idle());
    }

    #[test]
    fn reset_clears_holds() {
        let mut input = InputHandler::new().with_key_release_timeout_ms(1000);
        input.handle_key_press(KeyCode::Right);
        input.reset();
        assert!(input.sample(FRAME_MS).is_idle());
    }
}
