/// Screen-space position in pixels.
///
/// Signed on purpose: sparkles spawn past the right edge and exit past the
/// left edge, so coordinates legitimately go negative or exceed the surface
/// bounds before the cull pass catches them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Number of animation frames per sprite set (cats and sparkles alike).
pub const FRAME_COUNT: usize = 5;

/// A cat sitting at a fixed screen position.
///
/// Cats never move and never despawn; the only thing that changes is which
/// sprite frame gets drawn, and that is shared process-wide (see
/// [`crate::engine::clock::AnimationClock`]), so the entity carries nothing
/// but its baseline position.
#[derive(Debug, Clone, Copy)]
pub struct Cat {
    pub pos: Point,
}

impl Cat {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            pos: Point::new(x, y),
        }
    }
}

/// A sparkle drifting right-to-left across the screen.
#[derive(Debug, Clone, Copy)]
pub struct Sparkle {
    pub pos: Point,
    /// Current animation frame, always in `0..FRAME_COUNT`.
    pub frame: u8,
    /// Frame step, +1 or -1 (ping-pong, never wraps).
    pub step: i8,
    /// Horizontal speed in pixels per tick.
    pub speed: i32,
    /// Draw layer: 0 behind the cats, 1 in front.
    pub layer: u8,
}

impl Sparkle {
    /// Advance one tick of movement and animation.
    ///
    /// The animation ping-pongs across frames 1..=4: the step reverses
    /// whenever it would carry the frame out of that range, so the frame
    /// index never leaves [0, 4]. Frame 0 is reachable only at spawn and
    /// lasts a single tick before the first increment.
    pub fn advance(&mut self) {
        self.pos.x -= self.speed;
        let next = i16::from(self.frame) + i16::from(self.step);
        if next > 4 || next < 1 {
            self.step = -self.step;
        }
        self.frame = (i16::from(self.frame) + i16::from(self.step)) as u8;
    }

    /// True once the right edge of the sprite has fully crossed the left
    /// edge of the screen.
    pub fn off_screen(&self, sprite_w: i32) -> bool {
        self.pos.x < -sprite_w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_stays_in_range_forever() {
        let mut s = Sparkle {
            pos: Point::new(1000, 50),
            frame: 0,
            step: 1,
            speed: 0,
            layer: 0,
        };
        for _ in 0..1000 {
            s.advance();
            assert!(s.frame <= 4, "frame escaped range: {}", s.frame);
        }
    }

    #[test]
    fn frame_ping_pongs_instead_of_wrapping() {
        let mut s = Sparkle {
            pos: Point::new(1000, 50),
            frame: 0,
            step: 1,
            speed: 0,
            layer: 0,
        };
        let mut seen = Vec::new();
        for _ in 0..8 {
            s.advance();
            seen.push(s.frame);
        }
        // 0 -> 1 2 3 4 then back down, never 0 again and never 5.
        assert_eq!(seen, vec![1, 2, 3, 4, 3, 2, 1, 2]);
    }

    #[test]
    fn cull_threshold_is_strictly_past_sprite_width() {
        // x=5, sprite 40 wide, speed 20: -15 and -35 stay, -55 goes.
        let mut s = Sparkle {
            pos: Point::new(5, 0),
            frame: 1,
            step: 1,
            speed: 20,
            layer: 0,
        };
        s.advance();
        assert_eq!(s.pos.x, -15);
        assert!(!s.off_screen(40));
        s.advance();
        assert_eq!(s.pos.x, -35);
        assert!(!s.off_screen(40));
        s.advance();
        assert_eq!(s.pos.x, -55);
        assert!(s.off_screen(40));
    }
}
