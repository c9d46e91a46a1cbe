//! GLB container parsing (component F): magic/version/length checks plus
//! the `JSON` + `BIN\0` chunk stream.

use crate::error::Error;
use crate::io::ByteSource;

const MAGIC: u32 = 0x4654_6C67; // b"glTF", little-endian
const SUPPORTED_VERSION: u32 = 2;
const JSON_CHUNK_TYPE: u32 = 0x4E4F_534A; // b"JSON"
const BIN_CHUNK_TYPE: u32 = 0x004E_4942; // b"BIN\0"
const HEADER_LEN: u32 = 12;

/// The two payloads a GLB container's chunk stream yields: the mandatory
/// JSON document and, if present, a single binary buffer.
pub struct Glb {
    pub json: Vec<u8>,
    pub bin: Option<Vec<u8>>,
}

/// Splits a `.glb` file's bytes into its JSON and (optional) BIN chunks.
pub fn parse(mut source: ByteSource) -> Result<Glb, Error> {
    let actual_len = source.len() as u64;

    let magic = source.read_u32()?;
    if magic != MAGIC {
        return Err(Error::BadMagic);
    }

    let version = source.read_u32()?;
    if version != SUPPORTED_VERSION {
        return Err(Error::UnsupportedVersion {
            found: version.to_string(),
            expected: SUPPORTED_VERSION.to_string(),
        });
    }

    let declared_len = source.read_u32()?;
    if declared_len as u64 != actual_len {
        return Err(Error::LengthMismatch {
            declared: declared_len,
            actual: actual_len,
        });
    }

    let mut json = None;
    let mut bin = None;

    while source.remaining() > 0 {
        let chunk_len = source.read_u32()?;
        let chunk_type = source.read_u32()?;
        let data = source.read_bytes(chunk_len as usize)?.to_vec();
        match chunk_type {
            JSON_CHUNK_TYPE if json.is_none() => json = Some(data),
            BIN_CHUNK_TYPE if bin.is_none() => bin = Some(data),
            // Unknown or duplicate chunk types are skipped rather than
            // treated as an error, per the container's forward-compat rules.
            _ => {}
        }
    }

    let json = json.ok_or_else(|| Error::MalformedJson {
        detail: "GLB container has no JSON chunk".to_string(),
    })?;

    let _ = HEADER_LEN;
    Ok(Glb { json, bin })
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{ByteOrder, LittleEndian};

    fn chunk(ty: u32, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        let mut len_bytes = [0u8; 4];
        LittleEndian::write_u32(&mut len_bytes, data.len() as u32);
        out.extend_from_slice(&len_bytes);
        let mut ty_bytes = [0u8; 4];
        LittleEndian::write_u32(&mut ty_bytes, ty);
        out.extend_from_slice(&ty_bytes);
        out.extend_from_slice(data);
        out
    }

    fn build_glb(json: &[u8], bin: Option<&[u8]>) -> Vec<u8> {
        let mut body = chunk(JSON_CHUNK_TYPE, json);
        if let Some(bin) = bin {
            body.extend(chunk(BIN_CHUNK_TYPE, bin));
        }
        let total_len = HEADER_LEN + body.len() as u32;

        let mut out = Vec::new();
        out.extend_from_slice(b"glTF");
        let mut version_bytes = [0u8; 4];
        LittleEndian::write_u32(&mut version_bytes, 2);
        out.extend_from_slice(&version_bytes);
        let mut len_bytes = [0u8; 4];
        LittleEndian::write_u32(&mut len_bytes, total_len);
        out.extend_from_slice(&len_bytes);
        out.extend(body);
        out
    }

    #[test]
    fn parses_json_and_bin_chunks() {
        let glb = build_glb(b"{}", Some(&[1, 2, 3, 4]));
        let parsed = parse(ByteSource::from_memory(glb)).unwrap();
        assert_eq!(parsed.json, b"{}");
        assert_eq!(parsed.bin, Some(vec![1, 2, 3, 4]));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut glb = build_glb(b"{}", None);
        glb[0] = b'X';
        assert!(matches!(parse(ByteSource::from_memory(glb)), Err(Error::BadMagic)));
    }

    #[test]
    fn rejects_length_mismatch() {
        let mut glb = build_glb(b"{}", None);
        glb.push(0); // pad the file past its declared length
        assert!(matches!(
            parse(ByteSource::from_memory(glb)),
            Err(Error::LengthMismatch { .. })
        ));
    }
}
