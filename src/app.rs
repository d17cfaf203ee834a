use std::sync::Arc;

use anyhow::Context;
use instant::Instant;
use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::assets::{self, Assets};
use crate::audio::{self, Audio};
use crate::config::{Config, Scale};
use crate::engine::{Engine, WARMUP_TICKS};
use crate::render::{Canvas, BACKGROUND};

/// Extra erase width over the cat sprite, covering inter-frame size
/// variance in the asset set.
const CAT_ERASE_PAD_W: i32 = 6;
/// Extra erase height over the cat sprite.
const CAT_ERASE_PAD_H: i32 = 5;

/// Top-level application state: window, CPU framebuffer, simulation engine,
/// and the held audio session.
struct App {
    config: Config,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    engine: Option<Engine>,
    assets: Option<Assets>,
    _audio: Option<Audio>,

    /// Framebuffer size; fixed for the session even if the surface resizes.
    buffer_w: u32,
    buffer_h: u32,

    /// Pointer motion only quits once the first frame has been presented.
    /// Window creation synthesizes motion events that would otherwise kill
    /// the toy instantly.
    input_armed: bool,

    /// Fatal startup/render error, reported by `run` after the loop exits.
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config) -> Self {
        Self {
            config,
            window: None,
            pixels: None,
            engine: None,
            assets: None,
            _audio: None,
            buffer_w: 0,
            buffer_h: 0,
            input_armed: false,
            fatal: None,
        }
    }

    /// Create the window, surface, assets, audio, and engine. Any error
    /// here is fatal.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attrs = match self.config.windowed {
            Some((w, h)) => WindowAttributes::default()
                .with_title("nyanwall")
                .with_inner_size(winit::dpi::PhysicalSize::new(w, h)),
            None => WindowAttributes::default()
                .with_title("nyanwall")
                .with_fullscreen(Some(Fullscreen::Borderless(None))),
        };

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );
        window.set_cursor_visible(self.config.show_cursor);

        let size = window.inner_size();
        self.buffer_w = size.width;
        self.buffer_h = size.height;
        log::info!("surface created: {}x{}", size.width, size.height);

        let surface = SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
        let mut pixels = Pixels::new(size.width, size.height, surface)
            .context("failed to create pixel surface")?;

        let stretch = match self.config.scale {
            Scale::Stretch => Some(size.width),
            Scale::Native => None,
        };
        let assets = assets::load(stretch)?;

        if !self.config.no_sound {
            self._audio = audio::play_theme(self.config.gain());
        }

        let mut engine = Engine::new(
            size.width,
            size.height,
            assets.sparkle.width(),
            assets.sparkle.height(),
        );
        self.place_cats(event_loop, &mut engine, &assets, &window);

        // One full clear before the first tick; every later frame only
        // repaints dirty rectangles.
        Canvas::new(pixels.frame_mut(), size.width, size.height).clear(BACKGROUND);

        engine.warm_up(WARMUP_TICKS);
        log::info!(
            "warm-up done: {} sparkles, {} cats",
            engine.sparkles().len(),
            engine.cats().len()
        );

        self.pixels = Some(pixels);
        self.assets = Some(assets);
        self.engine = Some(engine);
        self.window = Some(window);

        event_loop.set_control_flow(ControlFlow::Poll);
        Ok(())
    }

    /// One cat centered per monitor in multi-monitor mode, else one cat
    /// centered on the surface. Placement happens once; cats never move.
    fn place_cats(
        &self,
        event_loop: &ActiveEventLoop,
        engine: &mut Engine,
        assets: &Assets,
        window: &Window,
    ) {
        let cat_w = assets.cat.width() as i32;
        let cat_h = assets.cat.height() as i32;

        if self.config.all_monitors {
            // Monitor origins are in global desktop coordinates; shift them
            // into surface space through the window origin.
            let origin = window
                .inner_position()
                .unwrap_or(winit::dpi::PhysicalPosition::new(0, 0));
            let mut placed = 0;
            for monitor in event_loop.available_monitors() {
                let pos = monitor.position();
                let size = monitor.size();
                let x = pos.x - origin.x + (size.width as i32 - cat_w) / 2;
                let y = pos.y - origin.y + (size.height as i32 - cat_h) / 2;
                engine.add_cat(x, y);
                placed += 1;
                log::info!(
                    "cat on monitor {:?} at ({x}, {y})",
                    monitor.name().unwrap_or_default()
                );
            }
            if placed > 0 {
                return;
            }
            log::warn!("no monitors reported, falling back to a centered cat");
        }

        engine.add_cat(
            (self.buffer_w as i32 - cat_w) / 2,
            (self.buffer_h as i32 - cat_h) / 2,
        );
    }

    /// One tick: erase previous footprints, advance the simulation, draw,
    /// present, then sleep off the rest of the frame period.
    ///
    /// Erase runs against pre-update positions and the pre-advance clock
    /// frame; draw runs against post-update state. Reordering either pass
    /// would leave stale pixels or wipe fresh ones.
    fn tick_frame(&mut self, event_loop: &ActiveEventLoop) {
        let start = Instant::now();
        let (Some(pixels), Some(engine), Some(assets)) =
            (self.pixels.as_mut(), self.engine.as_mut(), self.assets.as_ref())
        else {
            return;
        };

        // Erase pass.
        {
            let mut canvas = Canvas::new(pixels.frame_mut(), self.buffer_w, self.buffer_h);
            let cat_sprite = assets.cat.frame(engine.clock().frame());
            let bounce = engine.clock().bounce();
            for cat in engine.cats() {
                canvas.fill_rect(
                    cat.pos.x,
                    cat.pos.y + bounce,
                    cat_sprite.width() as i32 + CAT_ERASE_PAD_W,
                    cat_sprite.height() as i32 + CAT_ERASE_PAD_H,
                    BACKGROUND,
                );
            }
            for s in engine.sparkles() {
                let sprite = assets.sparkle.frame(s.frame as usize);
                canvas.fill_rect(
                    s.pos.x,
                    s.pos.y,
                    sprite.width() as i32,
                    sprite.height() as i32,
                    BACKGROUND,
                );
            }
        }

        // Simulation: spawn, move, cull, advance the shared cat frame.
        engine.tick();

        // Draw pass: layer 0 sparkles behind the cats, layer 1 in front.
        {
            let mut canvas = Canvas::new(pixels.frame_mut(), self.buffer_w, self.buffer_h);
            for s in engine.sparkles().iter().filter(|s| s.layer == 0) {
                canvas.blit(assets.sparkle.frame(s.frame as usize), s.pos.x, s.pos.y);
            }
            let sprite = assets.cat.frame(engine.clock().frame());
            let bounce = engine.clock().bounce();
            for cat in engine.cats() {
                canvas.blit(sprite, cat.pos.x, cat.pos.y + bounce);
            }
            for s in engine.sparkles().iter().filter(|s| s.layer == 1) {
                canvas.blit(assets.sparkle.frame(s.frame as usize), s.pos.x, s.pos.y);
            }
        }

        // Present.
        if let Err(e) = pixels.render() {
            self.fatal = Some(anyhow::anyhow!("surface render failed: {e}"));
            event_loop.exit();
            return;
        }
        self.input_armed = true;

        // Pace to the target rate. A tick that overruns its budget just
        // runs the simulation slower; there is no catch-up.
        let period = self.config.frame_period();
        let elapsed = start.elapsed();
        if elapsed < period {
            std::thread::sleep(period - elapsed);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                log::info!("key pressed, exiting");
                event_loop.exit();
            }
            WindowEvent::CursorMoved { .. } if self.input_armed => {
                log::info!("pointer moved, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                // Keep the logical framebuffer fixed; only the surface
                // scales.
                if let Some(pixels) = &mut self.pixels {
                    if let Err(e) = pixels.resize_surface(new_size.width, new_size.height) {
                        log::warn!("surface resize failed: {e}");
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.tick_frame(event_loop);
            }
            _ => {}
        }
    }
}

/// Entry point: build the event loop, run the toy, surface any fatal error.
pub fn run(config: Config) -> anyhow::Result<()> {
    config.backend.apply();

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
