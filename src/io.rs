//! Uniform read interface over files or in-memory buffers.
//!
//! [`ByteSource`] gives parsers a single typed, little-endian binary cursor
//! regardless of whether the bytes came from disk or were already in memory
//! (e.g. a GLB `BIN` chunk or a base64-decoded `data:` URI). [`TextSource`]
//! is the line-oriented counterpart used by the OBJ/MTL parsers.

use std::fs;
use std::path::{Path, PathBuf};

use byteorder::{ByteOrder, LittleEndian};

use crate::error::Error;

/// A sequential, seekable byte cursor over a buffer that was either read
/// from a file or supplied directly in memory.
///
/// Construction from a path eagerly reads the whole file; construction from
/// memory cannot fail. Either way the source owns its bytes, so the
/// underlying file handle (if any) is released as soon as the `ByteSource`
/// is built.
pub struct ByteSource {
    data: Vec<u8>,
    cursor: usize,
    origin: Origin,
}

#[derive(Clone, Debug)]
enum Origin {
    Path(PathBuf),
    Memory,
}

impl ByteSource {
    /// Reads the whole file at `path` into memory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|cause| Error::Io {
            path: path.to_path_buf(),
            cause,
        })?;
        Ok(ByteSource {
            data,
            cursor: 0,
            origin: Origin::Path(path.to_path_buf()),
        })
    }

    /// Wraps an already in-memory buffer. Infallible.
    pub fn from_memory(data: Vec<u8>) -> Self {
        ByteSource {
            data,
            cursor: 0,
            origin: Origin::Memory,
        }
    }

    /// A label for this source suitable for error messages (`"<memory>"` or
    /// the originating path).
    pub fn label(&self) -> String {
        match &self.origin {
            Origin::Path(path) => path.display().to_string(),
            Origin::Memory => "<memory>".to_string(),
        }
    }

    /// Total size of the underlying buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the source has no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes remaining between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.cursor)
    }

    /// Current absolute cursor position.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor to an absolute position, clamped to the buffer end.
    pub fn seek(&mut self, position: usize) {
        self.cursor = position.min(self.data.len());
    }

    /// Moves the cursor forward (or backward, with a negative delta is not
    /// supported — use [`ByteSource::seek`] for that) by `amount` bytes.
    pub fn skip(&mut self, amount: usize) {
        self.cursor = (self.cursor + amount).min(self.data.len());
    }

    /// Returns the entire remaining buffer without advancing the cursor.
    pub fn peek_remaining(&self) -> &[u8] {
        &self.data[self.cursor..]
    }

    /// Reads exactly `n` bytes and advances the cursor, or fails with
    /// [`Error::Io`] if fewer than `n` bytes remain.
    pub fn read_bytes(&mut self, n: usize) -> Result<&[u8], Error> {
        if self.remaining() < n {
            return Err(self.eof_error());
        }
        let start = self.cursor;
        self.cursor += n;
        Ok(&self.data[start..self.cursor])
    }

    /// Reads the rest of the buffer into an owned `Vec`.
    pub fn slurp_to_buffer(&mut self) -> Vec<u8> {
        let bytes = self.data[self.cursor..].to_vec();
        self.cursor = self.data.len();
        bytes
    }

    /// Interprets the whole buffer as UTF-8 text.
    pub fn slurp_to_string(&self) -> Result<String, Error> {
        String::from_utf8(self.data.clone()).map_err(|cause| Error::MalformedJson {
            detail: format!("source is not valid UTF-8: {cause}"),
        })
    }

    fn eof_error(&self) -> Error {
        Error::BoundsViolation {
            location: format!("{} at offset {}", self.label(), self.cursor),
        }
    }

    /// Reads a single `u8` and advances the cursor.
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Reads a little-endian `u16` and advances the cursor.
    pub fn read_u16(&mut self) -> Result<u16, Error> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    /// Reads a little-endian `u32` and advances the cursor.
    pub fn read_u32(&mut self) -> Result<u32, Error> {
        Ok(LittleEndian::read_u32(self.read_bytes(4)?))
    }

    /// Reads a little-endian `u64` and advances the cursor.
    pub fn read_u64(&mut self) -> Result<u64, Error> {
        Ok(LittleEndian::read_u64(self.read_bytes(8)?))
    }

    /// Reads a little-endian `i16` and advances the cursor.
    pub fn read_i16(&mut self) -> Result<i16, Error> {
        Ok(LittleEndian::read_i16(self.read_bytes(2)?))
    }

    /// Reads a little-endian `i32` and advances the cursor.
    pub fn read_i32(&mut self) -> Result<i32, Error> {
        Ok(LittleEndian::read_i32(self.read_bytes(4)?))
    }

    /// Reads a little-endian `i64` and advances the cursor.
    pub fn read_i64(&mut self) -> Result<i64, Error> {
        Ok(LittleEndian::read_i64(self.read_bytes(8)?))
    }

    /// Reads a little-endian `f32` and advances the cursor.
    pub fn read_f32(&mut self) -> Result<f32, Error> {
        Ok(LittleEndian::read_f32(self.read_bytes(4)?))
    }

    /// Reads a little-endian `f64` and advances the cursor.
    pub fn read_f64(&mut self) -> Result<f64, Error> {
        Ok(LittleEndian::read_f64(self.read_bytes(8)?))
    }
}

/// Line-oriented read interface over a text file or in-memory string.
///
/// Used by the OBJ and MTL parsers, which are purely line-driven formats.
pub struct TextSource {
    lines: std::vec::IntoIter<String>,
    origin: PathBuf,
}

impl TextSource {
    /// Reads `path` as UTF-8 text.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|cause| Error::Io {
            path: path.to_path_buf(),
            cause,
        })?;
        Ok(Self::from_string(text, path.to_path_buf()))
    }

    /// Wraps an in-memory string, tagging it with `origin` for error
    /// messages (e.g. the OBJ path an inlined MTL block came from).
    pub fn from_string(text: String, origin: PathBuf) -> Self {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        TextSource {
            lines: lines.into_iter(),
            origin,
        }
    }

    /// The path this source was opened from, for diagnostics.
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Returns the next line with its terminator stripped, or `None` at EOF.
    pub fn next_line(&mut self) -> Option<String> {
        self.lines.next()
    }
}
