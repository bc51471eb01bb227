use std::{
    io,
    time::{Duration, Instant},
};

use famium_core::FrameSink;
use tracing::info;

/// Discards frames and logs the frame rate once per second.
pub struct NullCanvas {
    started: Instant,
    last_report: Instant,
    frames_in_second: u32,
}

impl NullCanvas {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_report: now,
            frames_in_second: 0,
        }
    }
}

impl FrameSink for NullCanvas {
    fn draw(&mut self, _frame: &[u8]) -> io::Result<()> {
        self.frames_in_second += 1;
        if self.last_report.elapsed() >= Duration::from_secs(1) {
            info!(
                "{:6}s {}fps",
                self.started.elapsed().as_secs(),
                self.frames_in_second
            );
            self.frames_in_second = 0;
            self.last_report = Instant::now();
        }
        Ok(())
    }
}
