//! Lazily-decoded texture images.
//!
//! An [`Image`] starts out pointing at either a filesystem path or an
//! in-memory encoded buffer (PNG/JPEG bytes pulled from a glTF `bufferView`
//! or an OBJ `map_Kd` sidecar file) and only pays the decode cost the first
//! time a caller calls [`Image::load`]. Decoding is delegated to the
//! `image` crate, which is this crate's "image decoder" collaborator.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use image::GenericImageView;

use crate::error::Error;

/// How a texture's coordinates should be wrapped outside the `[0, 1]` range.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum ClampMode {
    /// Tile the texture (glTF/GL default).
    #[default]
    Repeat,
    /// Clamp sampling to the outermost texel.
    ClampToEdge,
    /// Clamp to a fixed border colour.
    ClampToBorder,
    /// Tile with every other repetition mirrored.
    MirroredRepeat,
}

/// Which face of a reflection cube map (or the equirectangular sphere map)
/// an OBJ `map_*` texture directive targets. `None` for every ordinary
/// 2D texture slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum Orientation {
    /// Not a reflection map.
    #[default]
    None,
    /// `+Y` cube face.
    Top,
    /// `-Y` cube face.
    Bottom,
    /// `+Z` cube face.
    Front,
    /// `-Z` cube face.
    Back,
    /// `-X` cube face.
    Left,
    /// `+X` cube face.
    Right,
    /// Equirectangular sphere map.
    Sphere,
}

/// Decoded, renderer-ready pixel data.
///
/// Pixels are always 4-channel RGBA with a vertical flip applied during
/// decode, since textures are authored in a top-left origin while most
/// image formats store rows bottom-up (or vice versa, depending on
/// convention) — OCASI normalizes to graphics-API expectations once, here,
/// rather than leaving it to every consumer.
#[derive(Clone, Debug)]
pub struct ImageData {
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Always 4 (RGBA8) after decode.
    pub channels: u8,
    /// Row-major RGBA8 pixel data, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

enum Source {
    Path(PathBuf),
    Memory(Vec<u8>),
    /// Pre-decoded at construction time; never transitions further.
    Decoded,
}

/// A texture image that defers decoding until it's actually needed.
///
/// States only move forward: `PendingPath`/`PendingMemory` -> `Decoded`, or
/// an image may be built already-decoded. `load` is idempotent — concurrent
/// calls on the *same* handle from different threads are not supported (a
/// `Scene` is expected to be owned by one thread at a time), but repeated
/// sequential calls simply return the cached result.
pub struct Image {
    source: Source,
    decoded: OnceLock<ImageData>,
    // Guards against two callers racing to decode the same handle from a
    // single thread's perspective (e.g. re-entrant access through a shared
    // `Arc<Image>`); the `image` crate call itself is the expensive part.
    decoding: Mutex<()>,
    pub clamp: ClampMode,
    pub orientation: Orientation,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("loaded", &self.is_loaded())
            .field("clamp", &self.clamp)
            .field("orientation", &self.orientation)
            .finish()
    }
}

impl Image {
    /// An image that will be read from `path` on first [`Image::load`].
    pub fn pending_path(path: impl Into<PathBuf>) -> Self {
        Image {
            source: Source::Path(path.into()),
            decoded: OnceLock::new(),
            decoding: Mutex::new(()),
            clamp: ClampMode::default(),
            orientation: Orientation::default(),
        }
    }

    /// An image whose encoded bytes are already in memory (e.g. a glTF
    /// `bufferView`-backed image or a decoded base64 `data:` URI).
    pub fn pending_memory(bytes: Vec<u8>) -> Self {
        Image {
            source: Source::Memory(bytes),
            decoded: OnceLock::new(),
            decoding: Mutex::new(()),
            clamp: ClampMode::default(),
            orientation: Orientation::default(),
        }
    }

    /// An image that is already decoded — no further I/O is ever performed.
    pub fn from_decoded(data: ImageData) -> Self {
        let decoded = OnceLock::new();
        let _ = decoded.set(data);
        Image {
            source: Source::Decoded,
            decoded,
            decoding: Mutex::new(()),
            clamp: ClampMode::default(),
            orientation: Orientation::default(),
        }
    }

    /// Attaches clamp/orientation settings, builder-style.
    pub fn with_settings(mut self, clamp: ClampMode, orientation: Orientation) -> Self {
        self.clamp = clamp;
        self.orientation = orientation;
        self
    }

    /// `true` once [`Image::load`] has successfully produced pixel data.
    pub fn is_loaded(&self) -> bool {
        self.decoded.get().is_some()
    }

    /// The path this image would be (or was) read from, if it has one.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::Path(path) => Some(path.as_path()),
            _ => None,
        }
    }

    /// Decodes the image if it hasn't been already, returning the cached
    /// pixel data either way. Leaves the handle in its pending state on
    /// failure so a caller may retry (e.g. after fixing a missing file).
    pub fn load(&self) -> Result<&ImageData, Error> {
        if let Some(data) = self.decoded.get() {
            return Ok(data);
        }

        let _guard = self.decoding.lock().unwrap_or_else(|poison| poison.into_inner());
        if let Some(data) = self.decoded.get() {
            return Ok(data);
        }

        let (label, decoded) = match &self.source {
            Source::Path(path) => {
                let decoded = image::open(path).map_err(|err| Error::ImageDecodeError {
                    source: path.display().to_string(),
                    reason: err.to_string(),
                })?;
                (path.display().to_string(), decoded)
            }
            Source::Memory(bytes) => {
                let decoded = image::load_from_memory(bytes).map_err(|err| Error::ImageDecodeError {
                    source: "<memory>".to_string(),
                    reason: err.to_string(),
                })?;
                ("<memory>".to_string(), decoded)
            }
            Source::Decoded => unreachable!("Decoded images never re-enter load()"),
        };

        let _ = label;
        let (width, height) = decoded.dimensions();
        let mut rgba = decoded.to_rgba8();
        flip_vertical(&mut rgba, width, height);

        let data = ImageData {
            width,
            height,
            channels: 4,
            pixels: rgba.into_raw(),
        };
        Ok(self.decoded.get_or_init(|| data))
    }
}

fn flip_vertical(buffer: &mut [u8], width: u32, height: u32) {
    let stride = width as usize * 4;
    let (mut top, mut bottom) = (0usize, (height as usize - 1) * stride);
    while top < bottom {
        let (top_row, bottom_row) = buffer.split_at_mut(bottom);
        top_row[top..top + stride].swap_with_slice(&mut bottom_row[..stride]);
        top += stride;
        bottom -= stride;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoded_image_is_loaded_without_io() {
        let data = ImageData {
            width: 1,
            height: 1,
            channels: 4,
            pixels: vec![255, 0, 0, 255],
        };
        let image = Image::from_decoded(data);
        assert!(image.is_loaded());
        assert_eq!(image.load().unwrap().pixels, vec![255, 0, 0, 255]);
    }

    #[test]
    fn pending_path_reports_not_loaded() {
        let image = Image::pending_path("missing.png");
        assert!(!image.is_loaded());
        assert!(image.load().is_err());
        // A failed load leaves the handle pending, not poisoned.
        assert!(!image.is_loaded());
    }
}
