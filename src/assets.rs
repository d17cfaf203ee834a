use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use thiserror::Error;

use crate::engine::entity::FRAME_COUNT;

/// Asset directory next to the binary's working directory.
const PRIMARY_DIR: &str = "res";
/// System-wide install location, tried when the local directory misses.
const FALLBACK_DIR: &str = "/usr/share/nyanwall";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("required sprite '{name}' not found (tried {primary} and {fallback})")]
    Missing {
        name: String,
        primary: PathBuf,
        fallback: PathBuf,
    },
    #[error("failed to decode sprite {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// A decoded RGBA8 sprite frame.
#[derive(Debug, Clone)]
pub struct Sprite {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Sprite {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major, `width * height * 4` long.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[cfg(test)]
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(data.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            data,
        }
    }
}

/// One animation cycle: a fixed sequence of five frames.
///
/// Whether the frames are the native assets or the stretched-to-width
/// variant is decided once at load time; everything downstream just asks
/// for frame N.
pub struct SpriteSet {
    frames: [Sprite; FRAME_COUNT],
}

impl SpriteSet {
    /// Bounds-checked frame access. The engine clamps its indices to
    /// `0..FRAME_COUNT`, so this only panics on a logic bug.
    pub fn frame(&self, index: usize) -> &Sprite {
        &self.frames[index]
    }

    /// Width of the first frame. Frames in a set share dimensions closely
    /// enough that erase margins absorb the difference.
    pub fn width(&self) -> u32 {
        self.frames[0].width
    }

    pub fn height(&self) -> u32 {
        self.frames[0].height
    }
}

/// Everything the compositor draws: the cat cycle and the sparkle cycle.
pub struct Assets {
    pub cat: SpriteSet,
    pub sparkle: SpriteSet,
}

/// Load all required sprites, stretching the cat frames to `stretch_to`
/// pixels wide (aspect preserved) when requested. Any missing or
/// undecodable frame is fatal.
pub fn load(stretch_to: Option<u32>) -> Result<Assets, AssetError> {
    let cat = SpriteSet {
        frames: [
            load_sprite("frame00.png", stretch_to)?,
            load_sprite("frame01.png", stretch_to)?,
            load_sprite("frame02.png", stretch_to)?,
            load_sprite("frame03.png", stretch_to)?,
            load_sprite("frame04.png", stretch_to)?,
        ],
    };
    let sparkle = SpriteSet {
        frames: [
            load_sprite("sparkle0.png", None)?,
            load_sprite("sparkle1.png", None)?,
            load_sprite("sparkle2.png", None)?,
            load_sprite("sparkle3.png", None)?,
            load_sprite("sparkle4.png", None)?,
        ],
    };
    log::info!(
        "loaded {} sprites (cat {}x{}, sparkle {}x{})",
        FRAME_COUNT * 2,
        cat.width(),
        cat.height(),
        sparkle.width(),
        sparkle.height(),
    );
    Ok(Assets { cat, sparkle })
}

/// Resolve an asset name against the primary directory, then the system
/// fallback. Returns the first path that exists.
pub fn find(name: &str) -> Option<PathBuf> {
    let primary = Path::new(PRIMARY_DIR).join(name);
    if primary.is_file() {
        return Some(primary);
    }
    let fallback = Path::new(FALLBACK_DIR).join(name);
    fallback.is_file().then_some(fallback)
}

fn load_sprite(name: &str, stretch_to: Option<u32>) -> Result<Sprite, AssetError> {
    let path = find(name).ok_or_else(|| AssetError::Missing {
        name: name.to_owned(),
        primary: Path::new(PRIMARY_DIR).join(name),
        fallback: Path::new(FALLBACK_DIR).join(name),
    })?;

    let decoded = image::open(&path).map_err(|source| AssetError::Decode {
        path: path.clone(),
        source,
    })?;

    let rgba = match stretch_to {
        Some(target_w) if target_w != decoded.width() => {
            let target_h =
                (u64::from(decoded.height()) * u64::from(target_w) / u64::from(decoded.width()))
                    .max(1) as u32;
            image::imageops::resize(&decoded.to_rgba8(), target_w, target_h, FilterType::Nearest)
        }
        _ => decoded.to_rgba8(),
    };

    Ok(Sprite {
        width: rgba.width(),
        height: rgba.height(),
        data: rgba.into_raw(),
    })
}
