use std::{
    collections::HashMap,
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use famium_core::{InputSource, keypad::Buttons};
use tracing::warn;

pub enum AppAction {
    Quit,
    None,
}

/// Turns terminal key events into pad state.
///
/// Most terminals only report presses and auto-repeats, so a key counts as
/// released once no repeat arrived within `release_timeout`.
pub struct InputManager {
    /// Tracks the last time a key was seen pressed.
    pressed_keys: HashMap<KeyCode, Instant>,
    release_timeout: Duration,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashMap::new(),
            // Typical repeat rates are 30-50ms; slow terminals and SSH need more.
            release_timeout: Duration::from_millis(200),
        }
    }

    pub fn handle_event(&mut self, key: KeyEvent) -> AppAction {
        self.handle_event_at(key, Instant::now())
    }

    fn handle_event_at(&mut self, key: KeyEvent, now: Instant) -> AppAction {
        // Explicit release event (if supported by terminal)
        if key.kind == KeyEventKind::Release {
            self.pressed_keys.remove(&key.code);
            return AppAction::None;
        }

        if let KeyCode::Char('q') | KeyCode::Esc = key.code {
            return AppAction::Quit;
        }

        if map_button(key.code).is_some() {
            self.pressed_keys.insert(key.code, now);
        }
        AppAction::None
    }

    /// Releases keys whose repeats stopped.
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    fn update_at(&mut self, now: Instant) {
        let timeout = self.release_timeout;
        self.pressed_keys
            .retain(|_, last_seen| now.duration_since(*last_seen) <= timeout);
    }

    pub fn buttons(&self) -> Buttons {
        self.pressed_keys
            .keys()
            .filter_map(|&code| map_button(code))
            .fold(Buttons::empty(), |acc, button| acc | button)
    }
}

/// Pad input read from the terminal between frames. `q`/Esc raises `cancel`.
pub struct KeyboardInput {
    manager: InputManager,
    cancel: Arc<AtomicBool>,
}

impl KeyboardInput {
    pub fn new(cancel: Arc<AtomicBool>) -> Self {
        Self {
            manager: InputManager::new(),
            cancel,
        }
    }

    fn drain_events(&mut self) -> io::Result<()> {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                match self.manager.handle_event(key) {
                    AppAction::Quit => self.cancel.store(true, Ordering::Relaxed),
                    AppAction::None => {}
                }
            }
        }
        // Handle key decay (autoreset for keys that stopped repeating)
        self.manager.update();
        Ok(())
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> Buttons {
        if let Err(e) = self.drain_events() {
            warn!("reading terminal events failed: {}", e);
        }
        self.manager.buttons()
    }
}

/// Source for canvases without a keyboard.
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self) -> Buttons {
        Buttons::empty()
    }
}

fn map_button(code: KeyCode) -> Option<Buttons> {
    match code {
        KeyCode::Char('.') | KeyCode::Char('z') => Some(Buttons::A),
        KeyCode::Char(',') | KeyCode::Char('x') => Some(Buttons::B),
        KeyCode::Char('n') | KeyCode::Char(' ') => Some(Buttons::SELECT),
        KeyCode::Char('m') | KeyCode::Enter => Some(Buttons::START),
        KeyCode::Char('w') | KeyCode::Up => Some(Buttons::UP),
        KeyCode::Char('s') | KeyCode::Down => Some(Buttons::DOWN),
        KeyCode::Char('a') | KeyCode::Left => Some(Buttons::LEFT),
        KeyCode::Char('d') | KeyCode::Right => Some(Buttons::RIGHT),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn both_layouts_map_to_the_pad() {
        let mut input = InputManager::new();
        for code in [KeyCode::Char('.'), KeyCode::Char('x'), KeyCode::Up, KeyCode::Char('d')] {
            input.handle_event(press(code));
        }
        assert_eq!(
            input.buttons(),
            Buttons::A | Buttons::B | Buttons::UP | Buttons::RIGHT
        );
    }

    #[test]
    fn quit_keys() {
        let mut input = InputManager::new();
        assert!(matches!(input.handle_event(press(KeyCode::Esc)), AppAction::Quit));
        assert!(matches!(
            input.handle_event(press(KeyCode::Char('q'))),
            AppAction::Quit
        ));
        assert!(matches!(
            input.handle_event(press(KeyCode::Char('k'))),
            AppAction::None
        ));
        assert!(input.buttons().is_empty());
    }

    #[test]
    fn keys_release_on_event_or_timeout() {
        let mut input = InputManager::new();
        let start = Instant::now();
        input.handle_event_at(press(KeyCode::Enter), start);
        input.handle_event_at(press(KeyCode::Left), start);
        input.handle_event(release(KeyCode::Enter));
        assert_eq!(input.buttons(), Buttons::LEFT);

        input.update_at(start + Duration::from_millis(100));
        assert_eq!(input.buttons(), Buttons::LEFT);
        input.update_at(start + Duration::from_millis(300));
        assert!(input.buttons().is_empty());
    }
}
