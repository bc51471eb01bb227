use std::{
    io,
    sync::atomic::{AtomicBool, Ordering},
};

use tracing::{debug, info};

use crate::{
    bus::CpuBus,
    cartridge::Cartridge,
    config::Config,
    cpu::Cpu,
    dma::Dma,
    error::Result,
    interrupts::Interrupts,
    keypad::{Buttons, Keypad},
    ppu::{Ppu, RenderingData},
    ram::cpu::WorkRam,
    renderer::Renderer,
    rom::Rom,
};

pub mod bus;
pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod dma;
pub mod error;
pub mod interrupts;
pub mod keypad;
pub mod memory;
pub mod ppu;
pub mod ram;
pub mod renderer;
pub mod rom;

/// Receives every completed RGBA frame (`SCREEN_WIDTH * SCREEN_HEIGHT * 4` bytes).
pub trait FrameSink {
    fn draw(&mut self, frame: &[u8]) -> io::Result<()>;
}

/// Supplies the pad state once per frame boundary.
pub trait InputSource {
    fn poll(&mut self) -> Buttons;
}

/// One emulation session. Owns every device and drives them in lockstep:
/// DMA (when armed), one CPU instruction, then the PPU for three dots per
/// CPU cycle.
#[derive(Debug)]
pub struct Nes {
    cpu: Cpu,
    ppu: Ppu,
    ram: WorkRam,
    program_rom: Rom,
    keypad: Keypad,
    dma: Dma,
    interrupts: Interrupts,
    renderer: Renderer,
    config: Config,
    /// CPU cycles elapsed since reset, DMA stalls included.
    total_cycles: u64,
}

impl Nes {
    /// Powers on a console with `cartridge` inserted and runs the reset sequence.
    pub fn new(cartridge: Cartridge, config: Config) -> Result<Self> {
        info!("inserting cartridge: {}", cartridge);
        let Cartridge {
            is_horizontal_mirror,
            program_rom,
            character_rom,
        } = cartridge;
        let ppu = Ppu::new(bus::PpuBus::new(&character_rom), is_horizontal_mirror);
        let mut nes = Self {
            cpu: Cpu::new(),
            ppu,
            ram: WorkRam::new(),
            program_rom: Rom::new(program_rom),
            keypad: Keypad::new(),
            dma: Dma::new(),
            interrupts: Interrupts::new(),
            renderer: Renderer::new(),
            config,
            total_cycles: 0,
        };
        nes.reset()?;
        Ok(nes)
    }

    /// Warm reset: CPU registers return to power-on state and PC reloads
    /// from the reset vector. Memory is left intact.
    pub fn reset(&mut self) -> Result<()> {
        self.interrupts = Interrupts::new();
        self.total_cycles = 0;
        let mut bus = CpuBus::new(
            &mut self.ram,
            &self.program_rom,
            &mut self.ppu,
            &mut self.dma,
            &mut self.keypad,
        );
        self.cpu.reset(&mut bus)
    }

    /// Runs one stepping unit and returns the frame data when the PPU wrapped
    /// past its last scanline.
    pub fn step(&mut self) -> Result<Option<RenderingData>> {
        let mut cycles = 0;
        if self.dma.is_processing() {
            self.dma.run(&self.ram, &mut self.ppu);
            cycles += self.config.dma_timing.stall_cycles(self.total_cycles);
        }

        let mut bus = CpuBus::new(
            &mut self.ram,
            &self.program_rom,
            &mut self.ppu,
            &mut self.dma,
            &mut self.keypad,
        );
        cycles += self.cpu.run(&mut bus, &mut self.interrupts)?;
        self.total_cycles += u64::from(cycles);

        Ok(self.ppu.run(cycles * 3, &mut self.interrupts))
    }

    /// Steps until a frame completes and renders it.
    pub fn frame(&mut self) -> Result<&[u8]> {
        loop {
            if let Some(data) = self.step()? {
                debug!("frame complete at cpu cycle {}", self.total_cycles);
                return Ok(self.renderer.render(data));
            }
        }
    }

    /// Emulates frames until `cancel` is raised, handing each one to `sink`
    /// and feeding the polled pad state back in. Returns the number of frames
    /// delivered.
    pub fn run(
        &mut self,
        sink: &mut impl FrameSink,
        input: &mut impl InputSource,
        cancel: &AtomicBool,
    ) -> Result<u64> {
        let mut frames = 0;
        while !cancel.load(Ordering::Relaxed) {
            let frame = self.frame()?;
            sink.draw(frame)?;
            self.keypad.fetch(input.poll());
            frames += 1;
        }
        info!("run loop cancelled after {} frames", frames);
        Ok(frames)
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn ram(&self) -> &[u8] {
        &self.ram
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn frame_buffer(&self) -> &[u8] {
        self.renderer.frame_buffer()
    }

    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
