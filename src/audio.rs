use std::fs::File;
use std::io::BufReader;

use rodio::{Decoder, OutputStream, Sink};

use crate::assets;

/// Theme track, searched through the same asset directories as sprites.
const TRACK_NAME: &str = "nyan.ogg";

/// A playing (or finished) audio session. Dropping it stops playback, so
/// the app holds it for the lifetime of the loop.
pub struct Audio {
    _stream: OutputStream,
    _sink: Sink,
}

/// Start the theme once at the given volume (0.0..=1.0).
///
/// Audio is decoration: any failure here (no track, no output device,
/// undecodable file) logs a warning and the toy runs silent.
pub fn play_theme(volume: f32) -> Option<Audio> {
    let path = match assets::find(TRACK_NAME) {
        Some(path) => path,
        None => {
            log::warn!("no {TRACK_NAME} found, running without sound");
            return None;
        }
    };

    let (stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            log::warn!("no audio output device: {e}");
            return None;
        }
    };

    let source = match File::open(&path).map_err(|e| e.to_string()).and_then(|f| {
        Decoder::new(BufReader::new(f)).map_err(|e| e.to_string())
    }) {
        Ok(source) => source,
        Err(e) => {
            log::warn!("failed to decode {}: {e}", path.display());
            return None;
        }
    };

    let sink = match Sink::try_new(&handle) {
        Ok(sink) => sink,
        Err(e) => {
            log::warn!("failed to open audio sink: {e}");
            return None;
        }
    };

    sink.set_volume(volume);
    sink.append(source);
    log::info!("playing {} at volume {volume:.2}", path.display());

    Some(Audio {
        _stream: stream,
        _sink: sink,
    })
}
