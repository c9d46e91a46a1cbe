//! The MTL sub-parser (component D, material half): line-dispatched like
//! the OBJ parser itself, loaded whenever a `mtllib` directive is seen.
//! See `spec.md` §4.4 "MTL sub-parser".

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::image::Orientation;
use crate::io::TextSource;
use crate::material::TextureKey;

use super::ir::{ObjMaterial, ObjTextureRef};

/// Parses one `.mtl` file into a name-keyed table of [`ObjMaterial`]s.
/// `base_dir` resolves `map_*` sidecar texture paths, same as the owning
/// `.obj`'s parent directory.
pub fn parse_file(path: &Path, base_dir: &Path) -> Result<HashMap<String, ObjMaterial>, Error> {
    let source = TextSource::from_path(path)?;
    parse(source, base_dir)
}

fn parse(mut source: TextSource, base_dir: &Path) -> Result<HashMap<String, ObjMaterial>, Error> {
    let mut materials = HashMap::new();
    let mut current: Option<ObjMaterial> = None;

    while let Some(line) = source.next_line() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (directive, rest) = match line.split_once(char::is_whitespace) {
            Some((head, tail)) => (head, tail.trim_start()),
            None => (line, ""),
        };

        match directive {
            "newmtl" => {
                if let Some(material) = current.take() {
                    materials.insert(material.name.clone(), material);
                }
                current = Some(ObjMaterial {
                    name: rest.trim().to_string(),
                    ..Default::default()
                });
            }
            "Ka" => set(&mut current, |m| m.ambient = Some(vec3(rest)?)),
            "Kd" => set(&mut current, |m| m.diffuse = Some(vec3(rest)?)),
            "Ks" => set(&mut current, |m| m.specular = Some(vec3(rest)?)),
            "Ke" => set(&mut current, |m| m.emissive = Some(vec3(rest)?)),
            "Ns" => set(&mut current, |m| m.shininess = Some(scalar(rest)?)),
            "d" => set(&mut current, |m| m.opacity = Some(scalar(rest)?)),
            "Tr" => set(&mut current, |m| m.opacity = Some(1.0 - scalar(rest)?)),
            "Ni" => set(&mut current, |m| m.ior = Some(scalar(rest)?)),
            "illum" => set(&mut current, |m| m.illum = Some(scalar::<f32>(rest)? as u32)),
            "Pr" => set(&mut current, |m| m.roughness = Some(scalar(rest)?)),
            "Pm" => set(&mut current, |m| m.metallic = Some(scalar(rest)?)),
            "Ps" => set(&mut current, |m| m.sheen = Some(scalar(rest)?)),
            "Pc" => set(&mut current, |m| m.clearcoat_thickness = Some(scalar(rest)?)),
            "Pcr" => set(&mut current, |m| m.clearcoat_roughness = Some(scalar(rest)?)),
            "aniso" | "an" => set(&mut current, |m| m.anisotropy = Some(scalar(rest)?)),
            "anisor" | "anr" => set(&mut current, |m| m.anisotropy_rotation = Some(scalar(rest)?)),
            "map_Kd" => set_texture(&mut current, TextureKey::Diffuse, rest, base_dir)?,
            "map_Ka" => set_texture(&mut current, TextureKey::Ambient, rest, base_dir)?,
            "map_Ks" => set_texture(&mut current, TextureKey::Specular, rest, base_dir)?,
            "map_Ke" => set_texture(&mut current, TextureKey::Emissive, rest, base_dir)?,
            "map_Ns" => set_texture(&mut current, TextureKey::Shininess, rest, base_dir)?,
            "map_d" => set_texture(&mut current, TextureKey::Transparency, rest, base_dir)?,
            "map_Pr" => set_texture(&mut current, TextureKey::Roughness, rest, base_dir)?,
            "map_Pm" => set_texture(&mut current, TextureKey::Metallic, rest, base_dir)?,
            "map_Pc" => set_texture(&mut current, TextureKey::Clearcoat, rest, base_dir)?,
            "map_Pcr" => set_texture(&mut current, TextureKey::ClearcoatRoughness, rest, base_dir)?,
            "norm" => set_texture(&mut current, TextureKey::Normal, rest, base_dir)?,
            "bump" | "map_bump" | "map_Bump" => set_texture(&mut current, TextureKey::Bump, rest, base_dir)?,
            "refl" => set_texture(&mut current, TextureKey::Ambient, rest, base_dir)?,
            // Options-only directives with no load-time effect in this
            // renderer-agnostic importer.
            "blendu" | "blendv" | "blend" | "boost" | "imfchan" | "mm" | "Ke_o" => {}
            _ => {}
        }
    }

    if let Some(material) = current.take() {
        materials.insert(material.name.clone(), material);
    }

    Ok(materials)
}

fn set(current: &mut Option<ObjMaterial>, f: impl FnOnce(&mut ObjMaterial) -> Result<(), Error>) -> Result<(), Error> {
    match current {
        Some(material) => f(material),
        None => Ok(()),
    }
}

fn scalar<T: std::str::FromStr>(rest: &str) -> Result<T, Error> {
    rest.split_whitespace().next().and_then(|s| s.parse().ok()).ok_or_else(|| Error::MalformedFace {
        reason: format!("expected a number, found `{rest}`"),
    })
}

fn vec3(rest: &str) -> Result<[f32; 3], Error> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(Error::MalformedFace {
            reason: format!("expected 3 numbers, found `{rest}`"),
        });
    }
    let mut out = [0.0f32; 3];
    for i in 0..3 {
        out[i] = tokens[i].parse().map_err(|_| Error::MalformedFace {
            reason: format!("expected a float, found `{}`", tokens[i]),
        })?;
    }
    Ok(out)
}

/// Parses a `map_*`/`norm`/`bump`/`refl` directive's inline options
/// (`-clamp`, `-bm`, `-type`) and binds the resulting [`ObjTextureRef`]
/// to `slot`, resolving the trailing filename against `base_dir`.
fn set_texture(current: &mut Option<ObjMaterial>, slot: TextureKey, rest: &str, base_dir: &Path) -> Result<(), Error> {
    let material = match current {
        Some(material) => material,
        None => return Ok(()),
    };

    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let mut clamp = false;
    let mut bump_multiplier = None;
    let mut orientation = Orientation::None;
    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            "-clamp" => {
                clamp = tokens.get(i + 1).map(|v| *v == "on").unwrap_or(false);
                i += 2;
            }
            "-bm" => {
                bump_multiplier = tokens.get(i + 1).and_then(|v| v.parse().ok());
                i += 2;
            }
            "-type" => {
                orientation = match tokens.get(i + 1).copied() {
                    Some("sphere") => Orientation::Sphere,
                    Some("cube_top") => Orientation::Top,
                    Some("cube_bottom") => Orientation::Bottom,
                    Some("cube_front") => Orientation::Front,
                    Some("cube_back") => Orientation::Back,
                    Some("cube_left") => Orientation::Left,
                    Some("cube_right") => Orientation::Right,
                    _ => Orientation::None,
                };
                i += 2;
            }
            "-blendu" | "-blendv" | "-boost" | "-imfchan" | "-blend" => {
                // Skipped per spec.md §4.4; one operand each, matching
                // MtlParser.cpp's ParseTexture.
                i += 2;
            }
            "-mm" => {
                // base + gain, two operands.
                i += 3;
            }
            "-o" | "-s" | "-t" => {
                // u v w offsets/scales, three operands.
                i += 4;
            }
            _ => break,
        }
    }

    let filename = tokens[i..].join(" ");
    if filename.is_empty() {
        return Err(Error::MalformedFace {
            reason: format!("texture directive for {slot:?} has no filename"),
        });
    }

    material.textures.insert(
        slot,
        ObjTextureRef {
            path: base_dir.join(filename),
            clamp,
            bump_multiplier,
            orientation,
        },
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::TextSource;

    #[test]
    fn texture_offset_option_consumes_three_operands() {
        let text = "newmtl red\nmap_Kd -o 1 1 1 brick.png\n".to_string();
        let source = TextSource::from_string(text, PathBuf::from("test.mtl"));
        let materials = parse(source, Path::new(".")).unwrap();
        let material = &materials["red"];
        let texture = material.textures.get(&TextureKey::Diffuse).unwrap();
        assert_eq!(texture.path, Path::new("./brick.png"));
    }

    #[test]
    fn texture_mm_option_consumes_two_operands() {
        let text = "newmtl red\nmap_Kd -mm 0 1 brick.png\n".to_string();
        let source = TextSource::from_string(text, PathBuf::from("test.mtl"));
        let materials = parse(source, Path::new(".")).unwrap();
        let material = &materials["red"];
        let texture = material.textures.get(&TextureKey::Diffuse).unwrap();
        assert_eq!(texture.path, Path::new("./brick.png"));
    }

    #[test]
    fn texture_blend_option_consumes_one_operand() {
        let text = "newmtl red\nmap_Kd -blend on brick.png\n".to_string();
        let source = TextSource::from_string(text, PathBuf::from("test.mtl"));
        let materials = parse(source, Path::new(".")).unwrap();
        let material = &materials["red"];
        let texture = material.textures.get(&TextureKey::Diffuse).unwrap();
        assert_eq!(texture.path, Path::new("./brick.png"));
    }
}
