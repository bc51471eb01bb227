use famium_core::renderer::{FRAME_BUFFER_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// Draws an RGBA frame with half-block cells: the upper pixel is the
/// foreground, the lower one the background.
pub struct FrameWidget<'a> {
    frame: &'a [u8],
}

impl<'a> FrameWidget<'a> {
    pub fn new(frame: &'a [u8]) -> Self {
        Self { frame }
    }
}

impl Widget for FrameWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        const WIDTH: f64 = SCREEN_WIDTH as f64;
        const HEIGHT: f64 = SCREEN_HEIGHT as f64;

        if self.frame.len() < FRAME_BUFFER_SIZE || area.width == 0 || area.height == 0 {
            return;
        }

        let term_w = area.width as f64;
        // Two vertical subpixels per cell.
        let canvas_h = area.height as f64 * 2.0;

        // Fit while keeping the aspect ratio.
        let scale = (term_w / WIDTH).min(canvas_h / HEIGHT);
        let off_x = (term_w - WIDTH * scale) / 2.0;
        let off_y = (canvas_h - HEIGHT * scale) / 2.0;

        for y in 0..area.height {
            for x in 0..area.width {
                let vx = x as f64;
                let top = sample_pixel(self.frame, vx, (y * 2) as f64, off_x, off_y, scale);
                let bottom = sample_pixel(self.frame, vx, (y * 2 + 1) as f64, off_x, off_y, scale);

                let cell = buf.get_mut(area.left() + x, area.top() + y);
                cell.set_char('▀').set_fg(top).set_bg(bottom);
            }
        }
    }
}

fn sample_pixel(frame: &[u8], vx: f64, vy: f64, off_x: f64, off_y: f64, scale: f64) -> Color {
    let nx = (vx - off_x) / scale;
    let ny = (vy - off_y) / scale;

    if nx >= 0.0 && nx < SCREEN_WIDTH as f64 && ny >= 0.0 && ny < SCREEN_HEIGHT as f64 {
        pixel_color(frame, nx as usize, ny as usize)
    } else {
        Color::Black
    }
}

#[inline]
fn pixel_color(frame: &[u8], x: usize, y: usize) -> Color {
    let idx = (y * SCREEN_WIDTH + x) * 4;
    match frame.get(idx..idx + 3) {
        Some(&[r, g, b]) => Color::Rgb(r, g, b),
        _ => Color::Black,
    }
}
