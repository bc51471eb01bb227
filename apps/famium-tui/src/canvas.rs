//! Frame outputs.

use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use famium_core::FrameSink;
use tracing::info;

mod null;
mod png;
mod terminal;

pub use null::NullCanvas;
pub use png::PngCanvas;
pub use terminal::TerminalCanvas;

/// Forwards to a canvas and raises `cancel` once `limit` frames were drawn.
pub struct Session<C> {
    canvas: C,
    limit: Option<u64>,
    frames: u64,
    cancel: Arc<AtomicBool>,
}

impl<C> Session<C> {
    pub fn new(canvas: C, limit: Option<u64>, cancel: Arc<AtomicBool>) -> Self {
        Self {
            canvas,
            limit,
            frames: 0,
            cancel,
        }
    }
}

impl<C: FrameSink> FrameSink for Session<C> {
    fn draw(&mut self, frame: &[u8]) -> io::Result<()> {
        self.canvas.draw(frame)?;
        self.frames += 1;
        if self.limit.is_some_and(|limit| self.frames >= limit) {
            info!("frame limit {} reached", self.frames);
            self.cancel.store(true, Ordering::Relaxed);
        }
        Ok(())
    }
}
