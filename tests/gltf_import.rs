use std::io::Write;

use ocasi::Error;

const JSON_CHUNK_TYPE: u32 = 0x4E4F_534A;
const BIN_CHUNK_TYPE: u32 = 0x004E_4942;
const HEADER_LEN: u32 = 12;

fn chunk(ty: u32, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(&ty.to_le_bytes());
    out.extend_from_slice(data);
    out
}

fn build_glb(json: &[u8], bin: &[u8]) -> Vec<u8> {
    let mut body = chunk(JSON_CHUNK_TYPE, json);
    body.extend(chunk(BIN_CHUNK_TYPE, bin));
    let total_len = HEADER_LEN + body.len() as u32;

    let mut out = Vec::new();
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&total_len.to_le_bytes());
    out.extend(body);
    out
}

/// A single right-handed-after-conversion triangle: a POSITION accessor of
/// 3 `vec3`s and an `UNSIGNED_SHORT` indices accessor, both packed into one
/// `BIN` chunk, one mesh with one TRIANGLES primitive, one node.
fn triangle_glb() -> Vec<u8> {
    let json = br#"{
        "asset": {"version": "2.0"},
        "buffers": [{"byteLength": 42}],
        "bufferViews": [
            {"buffer": 0, "byteOffset": 0, "byteLength": 36},
            {"buffer": 0, "byteOffset": 36, "byteLength": 6}
        ],
        "accessors": [
            {"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3"},
            {"bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR"}
        ],
        "meshes": [
            {"primitives": [{"attributes": {"POSITION": 0}, "indices": 1, "mode": 4}]}
        ],
        "nodes": [{"mesh": 0}]
    }"#;

    let positions: [[f32; 3]; 3] = [[0.0, 0.0, 1.0], [1.0, 0.0, 2.0], [0.0, 1.0, 3.0]];
    let mut bin = Vec::new();
    for position in positions {
        for component in position {
            bin.extend_from_slice(&component.to_le_bytes());
        }
    }
    for index in [0u16, 1, 2] {
        bin.extend_from_slice(&index.to_le_bytes());
    }

    build_glb(json, &bin)
}

fn write_temp_glb(name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(bytes).unwrap();
    path
}

#[test]
fn glb_triangle_is_converted_to_right_handed_on_default_import() {
    let path = write_temp_glb("ocasi-test-triangle-right-handed.glb", &triangle_glb());
    let scene = ocasi::load_3d_file(&path).unwrap();

    let mesh = &scene.models[0].meshes[0];
    assert_eq!(mesh.positions, vec![[0.0, 0.0, -1.0], [1.0, 0.0, -2.0], [0.0, 1.0, -3.0]]);
    assert_eq!(mesh.indices, vec![2, 1, 0]);
}

#[test]
fn gltf_text_document_declaring_version_1_is_rejected() {
    let result = ocasi::load_3d_file("tests/fixtures/v1.gltf");
    assert!(matches!(result, Err(Error::UnsupportedVersion { found, .. }) if found == "1.0"));
}

#[test]
fn a_glb_with_a_mismatched_declared_length_is_rejected() {
    let mut bytes = triangle_glb();
    bytes.push(0);
    let path = write_temp_glb("ocasi-test-length-mismatch.glb", &bytes);
    let result = ocasi::load_3d_file(&path);
    assert!(matches!(result, Err(Error::LengthMismatch { .. })));
}
