//! Resolves `buffers[].uri` (or the GLB `BIN` chunk) into owned byte
//! vectors, one per entry in `root.buffers`.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ocasi_json::Root;
use percent_encoding::percent_decode_str;

use crate::error::Error;
use crate::io::ByteSource;

/// Resolves every buffer in `root`, in order. `glb_bin` supplies buffer
/// index 0's bytes when that buffer has no `uri` (the GLB binary chunk
/// convention); every other buffer without a `uri` is a malformed document.
pub fn resolve_buffers(root: &Root, base_dir: &Path, glb_bin: Option<Vec<u8>>) -> Result<Vec<Vec<u8>>, Error> {
    let mut glb_bin = glb_bin;
    let mut out = Vec::with_capacity(root.buffers.len());
    for (index, buffer) in root.buffers.iter().enumerate() {
        let bytes = match &buffer.uri {
            Some(uri) => resolve_uri(uri, base_dir)?,
            None if index == 0 => glb_bin.take().ok_or_else(|| Error::MissingField {
                object: format!("buffers[{index}]"),
                field: "uri".to_string(),
            })?,
            None => {
                return Err(Error::MissingField {
                    object: format!("buffers[{index}]"),
                    field: "uri".to_string(),
                })
            }
        };

        let declared = buffer.byte_length.value();
        if bytes.len() != declared {
            log::warn!(
                "buffers[{index}]: decoded length {} does not match declared byteLength {declared}",
                bytes.len()
            );
        }

        out.push(bytes);
    }
    Ok(out)
}

/// A `data:` URI's parsed header (everything before the first comma) and
/// its still-encoded payload.
fn split_data_uri(uri: &str) -> Option<(&str, &str)> {
    let rest = uri.strip_prefix("data:")?;
    let comma = rest.find(',')?;
    Some((&rest[..comma], &rest[comma + 1..]))
}

/// Resolves a `buffers[].uri` or `images[].uri` value: a `data:` URI is
/// decoded in place, anything else is treated as a path relative to
/// `base_dir` and read from disk. Shared between buffer and image
/// resolution since both use the same glTF URI grammar.
pub(crate) fn resolve_uri(uri: &str, base_dir: &Path) -> Result<Vec<u8>, Error> {
    if let Some((header, payload)) = split_data_uri(uri) {
        if header.contains("base64") {
            return Ok(BASE64.decode(payload)?);
        }
        return Ok(percent_decode_str(payload).collect());
    }

    let decoded = percent_decode_str(uri).decode_utf8().map_err(|err| Error::MalformedJson {
        detail: format!("buffer uri is not valid UTF-8 after percent-decoding: {err}"),
    })?;
    let path = base_dir.join(decoded.as_ref());
    let mut source = ByteSource::from_path(path)?;
    Ok(source.slurp_to_buffer())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_data_uri_header_from_payload() {
        let (header, payload) = split_data_uri("data:application/octet-stream;base64,AAEC").unwrap();
        assert_eq!(header, "application/octet-stream;base64");
        assert_eq!(payload, "AAEC");
    }

    #[test]
    fn decodes_base64_payload_regardless_of_mime_type() {
        let bytes = resolve_uri("data:image/png;base64,AAEC", Path::new(".")).unwrap();
        assert_eq!(bytes, vec![0, 1, 2]);
    }

    #[test]
    fn rejects_non_data_uri_with_no_matching_file() {
        assert!(resolve_uri("missing.bin", Path::new("/nonexistent-dir")).is_err());
    }

    #[test]
    fn mismatched_declared_byte_length_is_tolerated() {
        let json = r#"{
            "asset": {"version": "2.0"},
            "buffers": [{"byteLength": 99, "uri": "data:application/octet-stream;base64,AAEC"}]
        }"#;
        let root = Root::from_str(json).unwrap();
        let buffers = resolve_buffers(&root, Path::new("."), None).unwrap();
        assert_eq!(buffers[0], vec![0, 1, 2]);
    }
}
