use std::time::Duration;

use clap::{Parser, ValueEnum};

/// Command-line configuration. Parsed once at startup; the engine never
/// looks at it again after the loop starts.
#[derive(Parser, Debug)]
#[command(name = "nyanwall", version, about = "Fullscreen rainbow cat and sparkles")]
pub struct Config {
    /// Preferred GPU backend for the presentation surface.
    #[arg(long, value_enum, default_value_t = Backend::Auto)]
    pub backend: Backend,

    /// Run in a fixed-size window (e.g. 1920x1080) instead of borderless
    /// fullscreen.
    #[arg(long, value_name = "WxH", value_parser = parse_resolution)]
    pub windowed: Option<(u32, u32)>,

    /// Cat sprite scaling.
    #[arg(long, value_enum, default_value_t = Scale::Native)]
    pub scale: Scale,

    /// Keep the cursor visible instead of hiding it over the window.
    #[arg(long)]
    pub show_cursor: bool,

    /// Skip the theme track entirely.
    #[arg(long)]
    pub no_sound: bool,

    /// Playback volume, 0-100.
    #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub volume: u8,

    /// Target frame rate in Hz.
    #[arg(long, default_value_t = 14, value_parser = clap::value_parser!(u32).range(1..=60))]
    pub fps: u32,

    /// Place one cat centered on every detected monitor instead of a single
    /// cat centered on the surface.
    #[arg(long)]
    pub all_monitors: bool,
}

impl Config {
    /// Fixed frame period derived from the target rate.
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps))
    }

    /// Volume as the 0.0..=1.0 gain rodio expects.
    pub fn gain(&self) -> f32 {
        f32::from(self.volume) / 100.0
    }
}

/// Surface backend preference, forwarded to wgpu through its standard
/// environment override before the surface is created.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Let wgpu pick.
    Auto,
    Vulkan,
    /// Software-friendly GL path.
    Gl,
}

impl Backend {
    pub fn apply(self) {
        let name = match self {
            Backend::Auto => return,
            Backend::Vulkan => "vulkan",
            Backend::Gl => "gl",
        };
        // pixels resolves its default backend set from this variable.
        std::env::set_var("WGPU_BACKEND", name);
    }
}

/// Cat sprite scale mode, decided once at asset load.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Draw the frames at their native pixel size.
    Native,
    /// Stretch the frames to the surface width.
    Stretch,
}

fn parse_resolution(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let w: u32 = w.parse().map_err(|_| format!("bad width '{w}'"))?;
    let h: u32 = h.parse().map_err(|_| format!("bad height '{h}'"))?;
    if w == 0 || h == 0 {
        return Err("resolution must be non-zero".into());
    }
    Ok((w, h))
}
