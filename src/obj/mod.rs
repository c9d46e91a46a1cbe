//! OBJ/MTL import: line-oriented parsing into an [`ir::ObjIr`] followed by
//! lowering into the canonical [`crate::scene::Scene`] (component D).

mod ir;
mod lower;
mod mtl;
mod parser;

use std::path::Path;

use crate::error::Error;
use crate::io::TextSource;
use crate::scene::Scene;

/// Parses the `.obj` file at `path` and lowers it into a [`Scene`].
pub fn import(path: &Path) -> Result<Scene, Error> {
    let source = TextSource::from_path(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let ir = parser::parse(source, base_dir)?;
    lower::lower(&ir)
}
