use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while importing a 3D model file.
///
/// Parsers abort the whole import on the first `Error` they hit and the
/// partially built intermediate representation is dropped; nothing here is
/// recoverable mid-parse. `load_3d_file` logs every variant at
/// [`log::Level::Error`] before handing it back to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be opened or read.
    #[error("failed to read {path}: {cause}")]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        cause: std::io::Error,
    },

    /// No importer is registered for the file's extension.
    #[error("no importer registered for the `{ext}` extension")]
    UnknownExtension {
        /// The unrecognised extension, without the leading dot.
        ext: String,
    },

    /// A GLB container's magic number was not `glTF`.
    #[error("not a GLB file: bad magic number")]
    BadMagic,

    /// A GLB container or glTF JSON document declared a version this crate
    /// does not implement.
    #[error("unsupported version `{found}`, expected `{expected}`")]
    UnsupportedVersion {
        /// The version string or number found in the file.
        found: String,
        /// The version this importer supports.
        expected: String,
    },

    /// A GLB container's declared total length did not match the file's
    /// actual length on disk.
    #[error("GLB header declares length {declared}, file is {actual} bytes")]
    LengthMismatch {
        /// The length recorded in the GLB header.
        declared: u32,
        /// The length observed while reading the file.
        actual: u64,
    },

    /// The glTF document failed to parse as JSON.
    #[error("malformed glTF JSON: {detail}")]
    MalformedJson {
        /// A human-readable description of the parse failure.
        detail: String,
    },

    /// A required JSON property was absent.
    #[error("{object} is missing required field `{field}`")]
    MissingField {
        /// The containing object, e.g. `"accessors[2]"`.
        object: String,
        /// The name of the missing field.
        field: String,
    },

    /// `extensionsRequired` named an extension this importer does not
    /// implement.
    #[error("required glTF extension `{name}` is not supported")]
    UnsupportedExtension {
        /// The unsupported extension's name.
        name: String,
    },

    /// An accessor or buffer view read would run past the end of its
    /// backing buffer.
    #[error("accessor read out of bounds: {location}")]
    BoundsViolation {
        /// Where the violation was detected, e.g. `"accessor 3"`.
        location: String,
    },

    /// An OBJ `f`/`p`/`l` line referenced a pool (texture coordinates or
    /// normals) that has not been populated, or used a malformed index.
    #[error("malformed OBJ face: {reason}")]
    MalformedFace {
        /// A human-readable description of what went wrong.
        reason: String,
    },

    /// Deferred image decoding failed. Only raised when a caller explicitly
    /// calls [`crate::image::Image::load`].
    #[error("failed to decode image from {source}: {reason}")]
    ImageDecodeError {
        /// Where the encoded bytes came from (a path, or `"<memory>"`).
        source: String,
        /// The decoder's failure reason.
        reason: String,
    },

    /// An internal invariant was violated. Indicates a bug in this crate
    /// rather than a malformed input file.
    #[error("internal invariant violated: {what}")]
    InvariantViolation {
        /// A description of the invariant that did not hold.
        what: String,
    },
}

impl From<base64::DecodeError> for Error {
    fn from(cause: base64::DecodeError) -> Self {
        Error::MalformedJson {
            detail: format!("invalid base64 data URI: {cause}"),
        }
    }
}

impl From<ocasi_json::Error> for Error {
    fn from(cause: ocasi_json::Error) -> Self {
        Error::MalformedJson {
            detail: cause.to_string(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
