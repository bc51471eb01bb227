use std::{
    fs::{self, File},
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use famium_core::{
    FrameSink,
    renderer::{SCREEN_HEIGHT, SCREEN_WIDTH},
};
use tracing::debug;

/// Writes every frame to `<dir>/NNNNNNNN.png`.
pub struct PngCanvas {
    dir: PathBuf,
    serial: u64,
}

impl PngCanvas {
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, serial: 0 })
    }

    fn path(&self) -> PathBuf {
        self.dir.join(format!("{:08}.png", self.serial))
    }
}

fn write_png(path: &Path, rgba: &[u8]) -> io::Result<()> {
    let file = BufWriter::new(File::create(path)?);
    let mut encoder = png::Encoder::new(file, SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().map_err(io::Error::other)?;
    writer.write_image_data(rgba).map_err(io::Error::other)?;
    writer.finish().map_err(io::Error::other)
}

impl FrameSink for PngCanvas {
    fn draw(&mut self, frame: &[u8]) -> io::Result<()> {
        let path = self.path();
        write_png(&path, frame)?;
        debug!("wrote {}", path.display());
        self.serial += 1;
        Ok(())
    }
}
