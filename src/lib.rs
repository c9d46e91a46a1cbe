//! OCASI: a loader for OBJ/MTL and glTF 2.0 3D model files that lowers
//! either format into one canonical [`Scene`] graph.
//!
//! [`load_3d_file`] is the entry point most callers want: it picks an
//! importer by file extension, runs the post-process pipeline, and logs
//! (at [`log::Level::Error`]) and returns any failure. [`init`] and
//! [`set_global_post_processor_options`] exist for callers that want the
//! same options applied to every import in a process, mirroring this
//! crate's closest relative's global-registry pattern.

pub mod error;
pub mod gltf;
pub mod image;
pub mod io;
pub mod material;
pub mod obj;
pub mod postprocess;
pub mod scene;

use std::path::Path;
use std::sync::{Mutex, OnceLock};

pub use error::{Error, Result};
pub use material::{Material, MaterialValue, ScalarKey, TextureKey};
pub use postprocess::{PostProcessSteps, SourceHandedness};
pub use scene::{Dimension, FaceMode, Mesh, Model, Node, Scene};

static GLOBAL_STEPS: OnceLock<Mutex<PostProcessSteps>> = OnceLock::new();

fn global_steps() -> &'static Mutex<PostProcessSteps> {
    GLOBAL_STEPS.get_or_init(|| Mutex::new(PostProcessSteps::CONVERT_TO_RIGHT_HANDED))
}

/// Ensures this crate's module-level state is set up. Safe to call more
/// than once or not at all; every public entry point initializes lazily
/// on first use regardless.
pub fn init() {
    global_steps();
}

/// OR's `mask` into the process-wide default applied to every subsequent
/// [`load_3d_file`] call, in addition to whatever that call's own
/// `options` argument requests.
pub fn set_global_post_processor_options(mask: PostProcessSteps) {
    let mut guard = global_steps().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = guard.union(mask);
}

fn effective_steps(requested: PostProcessSteps) -> PostProcessSteps {
    let guard = global_steps().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.union(requested)
}

/// Loads the 3D model file at `path`, dispatching on its extension
/// (`.obj`, `.gltf`, `.glb`), and runs the post-process pipeline with
/// [`PostProcessSteps::CONVERT_TO_RIGHT_HANDED`] plus whatever mask
/// [`set_global_post_processor_options`] has accumulated.
///
/// Every failure is logged at [`log::Level::Error`] before being
/// returned, so a caller that only checks `Ok`/`Err` still leaves a
/// trail behind for whoever reads the log.
pub fn load_3d_file(path: impl AsRef<Path>) -> Result<Scene> {
    load_3d_file_with_options(path, PostProcessSteps::CONVERT_TO_RIGHT_HANDED)
}

/// Same as [`load_3d_file`] but with an explicit per-call options mask,
/// OR'ed with the global mask rather than replacing it.
pub fn load_3d_file_with_options(path: impl AsRef<Path>, options: PostProcessSteps) -> Result<Scene> {
    let path = path.as_ref();
    match load_inner(path) {
        Ok((mut scene, handedness)) => {
            postprocess::run(&mut scene, effective_steps(options), handedness);
            Ok(scene)
        }
        Err(err) => {
            log::error!("failed to load {}: {err}", path.display());
            Err(err)
        }
    }
}

fn load_inner(path: &Path) -> Result<(Scene, SourceHandedness)> {
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default().to_ascii_lowercase();

    match extension.as_str() {
        "obj" => Ok((obj::import(path)?, SourceHandedness::RightHanded)),
        "gltf" => {
            let bytes = std::fs::read(path).map_err(|cause| Error::Io {
                path: path.to_path_buf(),
                cause,
            })?;
            Ok((gltf::import_standard(&bytes, base_dir)?, SourceHandedness::LeftHanded))
        }
        "glb" => {
            let bytes = std::fs::read(path).map_err(|cause| Error::Io {
                path: path.to_path_buf(),
                cause,
            })?;
            Ok((gltf::import_binary(&bytes, base_dir)?, SourceHandedness::LeftHanded))
        }
        other => Err(Error::UnknownExtension { ext: other.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_extension_is_reported_without_touching_the_filesystem() {
        let result = load_3d_file("model.fbx");
        assert!(matches!(result, Err(Error::UnknownExtension { ext }) if ext == "fbx"));
    }

    #[test]
    fn missing_file_surfaces_an_io_error() {
        let result = load_3d_file("does-not-exist.obj");
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn global_options_accumulate_across_calls() {
        set_global_post_processor_options(PostProcessSteps::GENERATE_NORMALS);
        let steps = effective_steps(PostProcessSteps::TRIANGULATE);
        assert!(steps.contains(PostProcessSteps::GENERATE_NORMALS));
        assert!(steps.contains(PostProcessSteps::TRIANGULATE));
    }
}
