//! Loads Wavefront `.obj` meshes and lays their face corners out as flat vertex buffers.
//!
//! ```no_run
//! let parsed = meshload::parse_file("assets/models/cube.obj")?;
//! let welded = parsed.geometry.to_single_index_style()?;
//! println!("{} vertices, {} indices", welded.vertex_count(), welded.index_count());
//! # Ok::<(), meshload::ObjError>(())
//! ```

pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod parser;

pub use error::{Attribute, ObjError, Result};
pub use geometry::{Face, FaceCorner, ObjProperties, RawGeometry};
pub use layout::LayoutBuilder;
pub use meshload_format::{LayoutStyle, OutputGeometry};
pub use parser::{parse_file, parse_reader, parse_str, ParsedObj};
