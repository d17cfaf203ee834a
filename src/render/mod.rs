use crate::assets::Sprite;

/// Background fill, the classic deep-sky blue (RGBA).
pub const BACKGROUND: [u8; 4] = [0x00, 0x33, 0x66, 0xFF];

/// Alpha blend a single channel.
/// Fast approximation: (x + 1 + (x >> 8)) >> 8 instead of x / 255.
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = u16::from(src) * alpha + u16::from(dst) * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

/// Software canvas over one RGBA8 frame.
///
/// Borrows the `pixels` frame buffer for the duration of a tick. Every write
/// primitive clips against the canvas bounds first: entity positions
/// legitimately sit past either screen edge, and out-of-bounds coordinates
/// must degrade to partial or zero writes, never to a bad index.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: i32,
    height: i32,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        debug_assert_eq!(frame.len(), (width * height * 4) as usize);
        Self {
            frame,
            width: width as i32,
            height: height as i32,
        }
    }

    /// Paint every pixel of the rectangle, truncated on each side that falls
    /// outside the canvas. A rectangle entirely outside is a no-op.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: [u8; 4]) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for row in y0..y1 {
            let start = ((row * self.width + x0) * 4) as usize;
            let end = ((row * self.width + x1) * 4) as usize;
            for px in self.frame[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
        }
    }

    /// Fill the whole canvas.
    pub fn clear(&mut self, color: [u8; 4]) {
        for px in self.frame.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    /// Alpha-blend a sprite with its top-left corner at (x, y), clipped to
    /// the canvas.
    pub fn blit(&mut self, sprite: &Sprite, x: i32, y: i32) {
        let sw = sprite.width() as i32;
        let sh = sprite.height() as i32;
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(sw).min(self.width);
        let y1 = y.saturating_add(sh).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let data = sprite.data();
        for row in y0..y1 {
            let src_row = row - y;
            let src_start = ((src_row * sw + (x0 - x)) * 4) as usize;
            let dst_start = ((row * self.width + x0) * 4) as usize;
            let cols = (x1 - x0) as usize;

            let src = &data[src_start..src_start + cols * 4];
            let dst = &mut self.frame[dst_start..dst_start + cols * 4];
            for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
                match s[3] {
                    0 => {}
                    255 => d.copy_from_slice(s),
                    a => {
                        let alpha = u16::from(a);
                        d[0] = blend_channel(s[0], d[0], alpha);
                        d[1] = blend_channel(s[1], d[1], alpha);
                        d[2] = blend_channel(s[2], d[2], alpha);
                        d[3] = 255;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u32 = 8;
    const H: u32 = 6;
    const RED: [u8; 4] = [255, 0, 0, 255];

    fn frame() -> Vec<u8> {
        vec![0u8; (W * H * 4) as usize]
    }

    fn painted(frame: &[u8]) -> usize {
        frame.chunks_exact(4).filter(|px| px[0] != 0).count()
    }

    #[test]
    fn fully_outside_rect_writes_nothing() {
        let mut buf = frame();
        let mut canvas = Canvas::new(&mut buf, W, H);
        canvas.fill_rect(-10, -10, 5, 5, RED);
        canvas.fill_rect(W as i32, 0, 5, 5, RED);
        canvas.fill_rect(0, H as i32, 5, 5, RED);
        canvas.fill_rect(-100, 2, 50, 2, RED);
        assert_eq!(painted(&buf), 0);
    }

    #[test]
    fn partially_outside_rect_is_clipped() {
        let mut buf = frame();
        let mut canvas = Canvas::new(&mut buf, W, H);
        // Overhangs top-left: only the 2x2 in-bounds corner lands.
        canvas.fill_rect(-2, -2, 4, 4, RED);
        assert_eq!(painted(&buf), 4);
        for y in 0..2 {
            for x in 0..2 {
                let i = ((y * W + x) * 4) as usize;
                assert_eq!(&buf[i..i + 4], &RED);
            }
        }
    }

    #[test]
    fn clipping_never_panics_on_extreme_inputs() {
        let mut buf = frame();
        let mut canvas = Canvas::new(&mut buf, W, H);
        canvas.fill_rect(i32::MIN, i32::MIN, i32::MAX, i32::MAX, RED);
        canvas.fill_rect(i32::MAX, i32::MAX, i32::MAX, i32::MAX, RED);
        canvas.fill_rect(3, 3, -5, -5, RED);
        canvas.fill_rect(3, 3, 0, 0, RED);
    }

    #[test]
    fn in_bounds_rect_paints_exactly_its_area() {
        let mut buf = frame();
        let mut canvas = Canvas::new(&mut buf, W, H);
        canvas.fill_rect(1, 1, 3, 2, RED);
        assert_eq!(painted(&buf), 6);
    }

    #[test]
    fn blit_clips_like_fill_rect() {
        let sprite = Sprite::from_raw(4, 4, vec![255u8; 4 * 4 * 4]);
        let mut buf = frame();
        let mut canvas = Canvas::new(&mut buf, W, H);
        // Half off the left edge: 2x4 pixels land.
        canvas.blit(&sprite, -2, 0);
        assert_eq!(painted(&buf), 8);

        let mut buf = frame();
        let mut canvas = Canvas::new(&mut buf, W, H);
        canvas.blit(&sprite, -40, 0);
        canvas.blit(&sprite, 0, 40);
        assert_eq!(painted(&buf), 0);
    }

    #[test]
    fn blit_respects_transparent_pixels() {
        // 2x1 sprite: opaque red then fully transparent.
        let data = vec![255, 0, 0, 255, 9, 9, 9, 0];
        let sprite = Sprite::from_raw(2, 1, data);
        let mut buf = frame();
        let mut canvas = Canvas::new(&mut buf, W, H);
        canvas.blit(&sprite, 0, 0);
        assert_eq!(&buf[0..4], &RED);
        assert_eq!(&buf[4..8], &[0, 0, 0, 0]);
    }
}
