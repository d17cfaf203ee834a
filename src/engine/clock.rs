use crate::engine::entity::FRAME_COUNT;

/// Pixels of upward bounce applied while the shared frame is 0 or 1.
const BOUNCE_OFFSET: i32 = 5;

/// Shared cat animation clock.
///
/// A single frame index in `0..FRAME_COUNT` drives every cat on screen at
/// once; cats carry no per-entity animation state.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationClock {
    frame: u8,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self { frame: 0 }
    }

    /// Current shared frame index.
    pub fn frame(&self) -> usize {
        self.frame as usize
    }

    /// Step to the next frame, wrapping after the last.
    pub fn advance(&mut self) {
        self.frame += 1;
        if self.frame as usize >= FRAME_COUNT {
            self.frame = 0;
        }
    }

    /// Vertical draw offset for the current frame: the first two frames of
    /// the asset set sit a little higher, giving the bounce.
    pub fn bounce(&self) -> i32 {
        if self.frame < 2 {
            -BOUNCE_OFFSET
        } else {
            0
        }
    }
}
