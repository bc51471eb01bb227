use std::sync::{Arc, atomic::AtomicBool};

use anyhow::{Context, Result};
use famium_core::{FrameSink, InputSource, Nes, config::Config};
use tracing::info;

use crate::{
    args::{Args, CanvasKind},
    canvas::{NullCanvas, PngCanvas, Session, TerminalCanvas},
    ines,
    input::{KeyboardInput, NoInput},
};

pub struct App {
    args: Args,
    rom_name: String,
}

impl App {
    pub fn new(args: Args) -> Self {
        let rom_name = args
            .rom
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown ROM")
            .to_string();
        Self { args, rom_name }
    }

    pub fn run(self) -> Result<()> {
        let cartridge = ines::load(&self.args.rom)
            .with_context(|| format!("loading {}", self.args.rom.display()))?;
        let config = Config {
            dma_timing: self.args.dma_timing.into(),
        };
        let mut nes = Nes::new(cartridge, config).context("failed to power on")?;
        info!("dma timing: {}", nes.config().dma_timing);

        let cancel = Arc::new(AtomicBool::new(false));
        let frames = match self.args.canvas {
            CanvasKind::Terminal => {
                let canvas = TerminalCanvas::new(self.rom_name.clone())
                    .context("failed to set up the terminal")?;
                let input = KeyboardInput::new(cancel.clone());
                self.drive(&mut nes, canvas, input, &cancel)?
            }
            CanvasKind::Png => {
                let canvas = PngCanvas::new(&self.args.screen_dir).with_context(|| {
                    format!("creating {}", self.args.screen_dir.display())
                })?;
                self.drive(&mut nes, canvas, NoInput, &cancel)?
            }
            CanvasKind::Null => self.drive(&mut nes, NullCanvas::new(), NoInput, &cancel)?,
        };

        info!(
            "{}: {} frames, {} cpu cycles",
            self.rom_name,
            frames,
            nes.total_cycles()
        );
        Ok(())
    }

    /// Runs until the canvas, the input or the frame limit cancels.
    fn drive(
        &self,
        nes: &mut Nes,
        canvas: impl FrameSink,
        mut input: impl InputSource,
        cancel: &Arc<AtomicBool>,
    ) -> Result<u64> {
        let mut session = Session::new(canvas, self.args.frames, cancel.clone());
        let frames = nes
            .run(&mut session, &mut input, cancel)
            .context("emulation stopped")?;
        Ok(frames)
    }
}
