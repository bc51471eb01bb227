use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

use crossterm::{
    cursor::{Hide, Show},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use famium_core::FrameSink;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

use crate::ui;

/// Target ~60 FPS.
const FRAME_DURATION: Duration = Duration::from_micros(16667);

/// Alternate-screen canvas in raw mode; keys are read by
/// [`crate::input::KeyboardInput`]. The terminal is restored on drop.
pub struct TerminalCanvas {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    rom_name: String,
    supports_enhancement: bool,
    fps_counter: u32,
    last_fps_time: Instant,
    current_fps: u32,
    last_frame: Instant,
}

impl TerminalCanvas {
    pub fn new(rom_name: String) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();

        let supports_enhancement =
            crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);
        if supports_enhancement {
            execute!(
                stdout,
                EnterAlternateScreen,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES),
                Hide
            )?;
        } else {
            execute!(stdout, EnterAlternateScreen, Hide)?;
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            rom_name,
            supports_enhancement,
            fps_counter: 0,
            last_fps_time: Instant::now(),
            current_fps: 0,
            last_frame: Instant::now(),
        })
    }

    fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        if self.supports_enhancement {
            execute!(
                self.terminal.backend_mut(),
                PopKeyboardEnhancementFlags,
                LeaveAlternateScreen,
                Show
            )?;
        } else {
            execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)?;
        }
        self.terminal.show_cursor()
    }
}

impl FrameSink for TerminalCanvas {
    fn draw(&mut self, frame: &[u8]) -> io::Result<()> {
        self.fps_counter += 1;
        if self.last_fps_time.elapsed() >= Duration::from_secs(1) {
            self.current_fps = self.fps_counter;
            self.fps_counter = 0;
            self.last_fps_time = Instant::now();
        }

        let (rom_name, fps) = (self.rom_name.as_str(), self.current_fps);
        self.terminal
            .draw(|f| ui::draw(f, rom_name, fps, frame))?;

        let elapsed = self.last_frame.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
        self.last_frame = Instant::now();
        Ok(())
    }
}

impl Drop for TerminalCanvas {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("failed to restore terminal: {}", e);
        }
    }
}
