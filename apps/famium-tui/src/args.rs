use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use famium_core::config::DmaTiming;
use tracing::Level;

/// Famium terminal frontend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the iNES ROM file
    #[arg(required = true)]
    pub rom: PathBuf,

    /// Where completed frames are sent
    #[arg(short, long, value_enum, default_value_t = CanvasKind::Terminal)]
    pub canvas: CanvasKind,

    /// Log level (trace, debug, info, warn, error), written to stderr
    #[arg(short, long, default_value = "info")]
    pub log_level: Level,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Output directory of the png canvas
    #[arg(long, default_value = "screen")]
    pub screen_dir: PathBuf,

    /// CPU stall charged for OAM DMA
    #[arg(long, value_enum, default_value_t = DmaTimingArg::Aligned)]
    pub dma_timing: DmaTimingArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasKind {
    /// Half-block rendering in the terminal, with keyboard input
    Terminal,
    /// One PNG file per frame
    Png,
    /// Discard frames, report FPS
    Null,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmaTimingArg {
    /// 513 cycles on an even CPU cycle, 514 on odd
    Aligned,
    /// Always 514 cycles
    Fixed,
}

impl From<DmaTimingArg> for DmaTiming {
    fn from(value: DmaTimingArg) -> Self {
        match value {
            DmaTimingArg::Aligned => DmaTiming::Aligned,
            DmaTimingArg::Fixed => DmaTiming::Fixed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["famium", "game.nes"]);
        assert_eq!(args.rom, PathBuf::from("game.nes"));
        assert_eq!(args.canvas, CanvasKind::Terminal);
        assert_eq!(args.log_level, Level::INFO);
        assert_eq!(args.frames, None);
        assert_eq!(args.screen_dir, PathBuf::from("screen"));
        assert_eq!(DmaTiming::from(args.dma_timing), DmaTiming::Aligned);
    }

    #[test]
    fn short_flags() {
        let args = Args::parse_from([
            "famium", "-c", "png", "-l", "debug", "--frames", "3", "--dma-timing", "fixed",
            "game.nes",
        ]);
        assert_eq!(args.canvas, CanvasKind::Png);
        assert_eq!(args.log_level, Level::DEBUG);
        assert_eq!(args.frames, Some(3));
        assert_eq!(DmaTiming::from(args.dma_timing), DmaTiming::Fixed);
    }

    #[test]
    fn rom_is_required() {
        assert!(Args::try_parse_from(["famium"]).is_err());
    }
}
