//! glTF 2.0 import: JSON/GLB framing, accessor resolution, and lowering
//! into the canonical [`crate::scene::Scene`].

pub mod accessor;
pub mod binary;
pub mod buffers;
pub mod lower;

use std::path::Path;

use ocasi_json::Root;

use crate::error::Error;
use crate::scene::Scene;

/// Parses a `.gltf` JSON document's bytes and lowers it into a [`Scene`].
/// `base_dir` is the directory external buffer/image URIs are resolved
/// against — the glTF file's own parent directory.
pub fn import_standard(json: &[u8], base_dir: &Path) -> Result<Scene, Error> {
    let root = Root::from_slice(json)?;
    import_root(root, base_dir, None)
}

/// Parses a `.glb` container's bytes and lowers it into a [`Scene`].
pub fn import_binary(bytes: &[u8], base_dir: &Path) -> Result<Scene, Error> {
    let source = crate::io::ByteSource::from_memory(bytes.to_vec());
    let glb = binary::parse(source)?;
    let root = Root::from_slice(&glb.json)?;
    import_root(root, base_dir, glb.bin)
}

fn import_root(root: Root, base_dir: &Path, glb_bin: Option<Vec<u8>>) -> Result<Scene, Error> {
    check_asset_version(&root.asset)?;
    root.validate_required_extensions().map_err(|name| Error::UnsupportedExtension { name: name.to_string() })?;
    let buffers = buffers::resolve_buffers(&root, base_dir, glb_bin)?;
    lower::lower(&root, &buffers, base_dir)
}

/// Rejects any document whose `asset.version` isn't a glTF 2.x release.
fn check_asset_version(asset: &ocasi_json::Asset) -> Result<(), Error> {
    if asset.version.starts_with("2.") {
        Ok(())
    } else {
        Err(Error::UnsupportedVersion {
            found: asset.version.clone(),
            expected: "2.x".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_a_gltf_1_0_document() {
        let json = br#"{"asset": {"version": "1.0"}}"#;
        let result = import_standard(json, Path::new("."));
        assert!(matches!(result, Err(Error::UnsupportedVersion { found, .. }) if found == "1.0"));
    }

    #[test]
    fn accepts_a_2_x_document() {
        assert!(check_asset_version(&ocasi_json::Asset {
            version: "2.0".to_string(),
            ..Default::default()
        })
        .is_ok());
    }
}
