//! Accessor resolution (component G): turns a glTF `accessor` plus its
//! backing buffer(s) into plain `f32`/`u32` Rust vectors.
//!
//! Three concerns are layered here: locating the right bytes (bufferView
//! offset/stride, or a zero-filled buffer for a sparse-only accessor),
//! applying sparse overrides on top, and converting the raw component
//! bytes to the normalized or unnormalized value the caller asked for.

use byteorder::{ByteOrder, LittleEndian};
use ocasi_json::accessor::{sparse, Accessor, ComponentType, GenericComponentType, IndexComponentType, Type};
use ocasi_json::buffer::View;
use ocasi_json::validation::Checked;
use ocasi_json::{Index, Root};

use crate::error::Error;

fn checked_component_type(accessor: &Accessor) -> Result<ComponentType, Error> {
    match accessor.component_type {
        Checked::Valid(GenericComponentType(ct)) => Ok(ct),
        Checked::Invalid => Err(Error::MalformedJson {
            detail: "accessor has an invalid componentType".to_string(),
        }),
    }
}

fn checked_type(accessor: &Accessor) -> Result<Type, Error> {
    match accessor.type_ {
        Checked::Valid(t) => Ok(t),
        Checked::Invalid => Err(Error::MalformedJson {
            detail: "accessor has an invalid type".to_string(),
        }),
    }
}

fn buffer_bytes<'a>(root: &Root, buffers: &'a [Vec<u8>], view_index: Index<View>) -> Result<(&'a [u8], &'a View), Error> {
    let view = root.get(&view_index).ok_or_else(|| Error::BoundsViolation {
        location: format!("bufferView {}", view_index.value()),
    })?;
    let buffer = buffers.get(view.buffer.value()).ok_or_else(|| Error::BoundsViolation {
        location: format!("buffer {}", view.buffer.value()),
    })?;
    Ok((buffer.as_slice(), view))
}

/// Reads `count` elements of `element_size` bytes each, starting at
/// `accessor_byte_offset` into the view named by `view_index`. Honors the
/// view's `byteStride` when interleaved, otherwise reads tightly packed.
fn read_view_elements(
    root: &Root,
    buffers: &[Vec<u8>],
    view_index: Index<View>,
    accessor_byte_offset: usize,
    count: usize,
    element_size: usize,
) -> Result<Vec<u8>, Error> {
    let (buffer, view) = buffer_bytes(root, buffers, view_index)?;
    let view_offset = view.byte_offset.map(|o| o.value()).unwrap_or(0);
    let base = view_offset + accessor_byte_offset;
    let stride = view.byte_stride.map(|s| s.0).unwrap_or(element_size);

    let mut out = Vec::with_capacity(count * element_size);
    for i in 0..count {
        let start = base + i * stride;
        let end = start + element_size;
        let slice = buffer.get(start..end).ok_or_else(|| Error::BoundsViolation {
            location: format!("bufferView {} element {}", view_index.value(), i),
        })?;
        out.extend_from_slice(slice);
    }
    Ok(out)
}

fn sparse_index_value(component_type: ComponentType, bytes: &[u8]) -> Result<usize, Error> {
    Ok(match component_type {
        ComponentType::U8 => bytes[0] as usize,
        ComponentType::U16 => LittleEndian::read_u16(bytes) as usize,
        ComponentType::U32 => LittleEndian::read_u32(bytes) as usize,
        _ => {
            return Err(Error::MalformedJson {
                detail: "sparse accessor index component type must be unsigned".to_string(),
            })
        }
    })
}

fn apply_sparse(root: &Root, buffers: &[Vec<u8>], sparse: &sparse::Sparse, data: &mut [u8], element_size: usize) -> Result<(), Error> {
    let count = sparse.count.value();
    let index_component_type = match sparse.indices.component_type {
        Checked::Valid(IndexComponentType(ct)) => ct,
        Checked::Invalid => {
            return Err(Error::MalformedJson {
                detail: "sparse accessor has an invalid index componentType".to_string(),
            })
        }
    };
    let index_size = index_component_type.size();

    let indices_bytes = read_view_elements(
        root,
        buffers,
        sparse.indices.buffer_view,
        sparse.indices.byte_offset.value(),
        count,
        index_size,
    )?;
    let values_bytes = read_view_elements(root, buffers, sparse.values.buffer_view, sparse.values.byte_offset.value(), count, element_size)?;

    for i in 0..count {
        let target = sparse_index_value(index_component_type, &indices_bytes[i * index_size..(i + 1) * index_size])?;
        let value = &values_bytes[i * element_size..(i + 1) * element_size];
        let dst_start = target * element_size;
        let dst_end = dst_start + element_size;
        let dst = data.get_mut(dst_start..dst_end).ok_or_else(|| Error::BoundsViolation {
            location: format!("sparse override index {target}"),
        })?;
        dst.copy_from_slice(value);
    }
    Ok(())
}

/// Returns the raw, un-decoded bytes for `accessor`: the dense bufferView
/// read (or a zero-filled buffer if the accessor is sparse-only), with any
/// sparse overrides already applied on top.
fn read_scalar_bytes(root: &Root, buffers: &[Vec<u8>], accessor: &Accessor) -> Result<Vec<u8>, Error> {
    let component_type = checked_component_type(accessor)?;
    let type_ = checked_type(accessor)?;
    let element_size = component_type.size() * type_.multiplicity();
    let count = accessor.count.value();

    let mut data = match accessor.buffer_view {
        Some(view_index) => read_view_elements(root, buffers, view_index, accessor.byte_offset.map(|o| o.value()).unwrap_or(0), count, element_size)?,
        None => vec![0u8; count * element_size],
    };

    if let Some(sparse) = &accessor.sparse {
        apply_sparse(root, buffers, sparse, &mut data, element_size)?;
    }

    Ok(data)
}

fn decode_and_normalize(component_type: ComponentType, bytes: &[u8], normalized: bool) -> f32 {
    match component_type {
        ComponentType::I8 => {
            let v = bytes[0] as i8;
            if normalized {
                (v as f32 / 127.0).max(-1.0)
            } else {
                v as f32
            }
        }
        ComponentType::U8 => {
            let v = bytes[0];
            if normalized {
                v as f32 / 255.0
            } else {
                v as f32
            }
        }
        ComponentType::I16 => {
            let v = LittleEndian::read_i16(bytes);
            if normalized {
                (v as f32 / 32767.0).max(-1.0)
            } else {
                v as f32
            }
        }
        ComponentType::U16 => {
            let v = LittleEndian::read_u16(bytes);
            if normalized {
                v as f32 / 65535.0
            } else {
                v as f32
            }
        }
        ComponentType::U32 => LittleEndian::read_u32(bytes) as f32,
        ComponentType::F32 => LittleEndian::read_f32(bytes),
    }
}

/// Resolves an accessor into a flat `f32` vector, `count * multiplicity`
/// long, applying the component's normalization rule when `normalized` is
/// set on the accessor.
pub fn read_floats(root: &Root, buffers: &[Vec<u8>], accessor_index: Index<Accessor>) -> Result<Vec<f32>, Error> {
    let accessor = root.get(&accessor_index).ok_or_else(|| Error::BoundsViolation {
        location: format!("accessor {}", accessor_index.value()),
    })?;
    let component_type = checked_component_type(accessor)?;
    let component_size = component_type.size();
    let normalized = accessor.normalized;
    let raw = read_scalar_bytes(root, buffers, accessor)?;

    Ok(raw
        .chunks_exact(component_size)
        .map(|chunk| decode_and_normalize(component_type, chunk, normalized))
        .collect())
}

/// Resolves an index accessor (`componentType` must be an unsigned type)
/// into a flat `u32` vector.
pub fn read_indices(root: &Root, buffers: &[Vec<u8>], accessor_index: Index<Accessor>) -> Result<Vec<u32>, Error> {
    let accessor = root.get(&accessor_index).ok_or_else(|| Error::BoundsViolation {
        location: format!("accessor {}", accessor_index.value()),
    })?;
    let component_type = checked_component_type(accessor)?;
    let raw = read_scalar_bytes(root, buffers, accessor)?;

    let mut out = Vec::with_capacity(accessor.count.value());
    match component_type {
        ComponentType::U8 => out.extend(raw.iter().map(|&b| b as u32)),
        ComponentType::U16 => out.extend(raw.chunks_exact(2).map(LittleEndian::read_u16).map(u32::from)),
        ComponentType::U32 => out.extend(raw.chunks_exact(4).map(LittleEndian::read_u32)),
        _ => {
            return Err(Error::MalformedJson {
                detail: "index accessor must use an unsigned componentType".to_string(),
            })
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_zero<T>() -> Index<T> {
        serde_json::from_str("0").unwrap()
    }

    fn root_with_floats() -> (Root, Vec<Vec<u8>>) {
        let json = r#"{
            "asset": {"version": "2.0"},
            "buffers": [{"byteLength": 24}],
            "bufferViews": [{"buffer": 0, "byteOffset": 0, "byteLength": 24}],
            "accessors": [{
                "bufferView": 0, "byteOffset": 0, "componentType": 5126,
                "count": 2, "type": "VEC3"
            }]
        }"#;
        let root = Root::from_str(json).unwrap();
        let mut buf = Vec::new();
        for v in [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0] {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        (root, vec![buf])
    }

    #[test]
    fn reads_tightly_packed_vec3_floats() {
        let (root, buffers) = root_with_floats();
        let values = read_floats(&root, &buffers, index_zero()).unwrap();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn normalizes_unsigned_byte_colours() {
        let json = r#"{
            "asset": {"version": "2.0"},
            "buffers": [{"byteLength": 4}],
            "bufferViews": [{"buffer": 0, "byteOffset": 0, "byteLength": 4}],
            "accessors": [{
                "bufferView": 0, "componentType": 5121,
                "count": 4, "type": "SCALAR", "normalized": true
            }]
        }"#;
        let root = Root::from_str(json).unwrap();
        let buffers = vec![vec![0u8, 128, 255, 64]];
        let values = read_floats(&root, &buffers, index_zero()).unwrap();
        assert!((values[0] - 0.0).abs() < 1e-6);
        assert!((values[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn reads_u16_indices() {
        let json = r#"{
            "asset": {"version": "2.0"},
            "buffers": [{"byteLength": 6}],
            "bufferViews": [{"buffer": 0, "byteOffset": 0, "byteLength": 6}],
            "accessors": [{
                "bufferView": 0, "componentType": 5123,
                "count": 3, "type": "SCALAR"
            }]
        }"#;
        let root = Root::from_str(json).unwrap();
        let buffers = vec![vec![0, 0, 1, 0, 2, 0]];
        let indices = read_indices(&root, &buffers, index_zero()).unwrap();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
