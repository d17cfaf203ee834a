pub mod clock;
pub mod entity;
pub mod spawn;
pub mod store;

use self::clock::AnimationClock;
use self::entity::{Cat, Point, Sparkle};
use self::spawn::SpawnAccumulator;
use self::store::EntityStore;

/// Horizontal spawn margin past the right screen edge, sized to roughly one
/// tick of travel so sparkles slide in instead of popping.
const SPAWN_MARGIN: i32 = 80;
/// Sparkle speed range in pixels per tick, inclusive.
const SPEED_MIN: i32 = 10;
const SPEED_MAX: i32 = 39;
/// Simulation ticks run before the first visible frame, so the screen opens
/// already full of sparkles.
pub const WARMUP_TICKS: u32 = 200;

/// Simulation context: entity store, spawn accumulator, shared animation
/// clock, and the session RNG. One of these exists per run; nothing here is
/// global.
pub struct Engine {
    store: EntityStore,
    clock: AnimationClock,
    accumulator: SpawnAccumulator,
    rng: fastrand::Rng,
    screen_w: u32,
    screen_h: u32,
    sparkle_w: i32,
    sparkle_h: i32,
}

impl Engine {
    pub fn new(screen_w: u32, screen_h: u32, sparkle_w: u32, sparkle_h: u32) -> Self {
        Self::with_rng(screen_w, screen_h, sparkle_w, sparkle_h, fastrand::Rng::new())
    }

    pub fn with_rng(
        screen_w: u32,
        screen_h: u32,
        sparkle_w: u32,
        sparkle_h: u32,
        rng: fastrand::Rng,
    ) -> Self {
        Self {
            store: EntityStore::new(),
            clock: AnimationClock::new(),
            accumulator: SpawnAccumulator::new(),
            rng,
            screen_w,
            screen_h,
            sparkle_w: sparkle_w as i32,
            sparkle_h: sparkle_h as i32,
        }
    }

    /// Place one cat with its top-left corner at (x, y). Cats stay for the
    /// whole session.
    pub fn add_cat(&mut self, x: i32, y: i32) {
        self.store.add_cat(Cat::new(x, y));
    }

    pub fn cats(&self) -> &[Cat] {
        self.store.cats()
    }

    pub fn sparkles(&self) -> &[Sparkle] {
        self.store.sparkles()
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// One full simulation tick: spawn, move, cull, then advance the shared
    /// cat frame.
    pub fn tick(&mut self) {
        self.step_sparkles();
        self.clock.advance();
    }

    /// Run the sparkle simulation for `ticks` ticks without advancing the
    /// cat clock or drawing anything.
    pub fn warm_up(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.step_sparkles();
        }
    }

    /// Spawn phase followed by the per-sparkle move/animate/cull pass.
    /// Spawns land before movement, so a new sparkle takes its first step on
    /// the tick it appears.
    fn step_sparkles(&mut self) {
        let spawns = self.accumulator.accumulate(&mut self.rng, self.screen_h);
        for _ in 0..spawns {
            self.spawn_sparkle();
        }

        let sparkle_w = self.sparkle_w;
        self.store.update_sparkles(|s| {
            s.advance();
            !s.off_screen(sparkle_w)
        });
    }

    fn spawn_sparkle(&mut self) {
        let x = self.screen_w as i32 + SPAWN_MARGIN;
        let y = self.rng.i32(-self.sparkle_h..self.screen_h as i32);
        self.store.add_sparkle(Sparkle {
            pos: Point::new(x, y),
            frame: 0,
            step: 1,
            speed: self.rng.i32(SPEED_MIN..=SPEED_MAX),
            layer: self.rng.u8(0..2),
        });
    }
}
