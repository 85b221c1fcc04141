//! Pure transformations behind the OpenRaster exporter.
//!
//! Nothing in this crate touches the filesystem: it turns a layer tree and a
//! path list into manifest entries, file tasks and geometry rows, and
//! serializes those into caller-supplied writers.

pub mod encode;
pub mod error;
pub mod flatten;
pub mod manifest;
pub mod stack_xml;
pub mod table;

pub use encode::{encode, encode_all, EncodedPath, PATHS_DIR};
pub use error::{EncodeError, FlattenError, ManifestError, TableError};
pub use flatten::{flatten, flatten_all, FileTask, Flattened, LAYER_DATA_DIR};
pub use manifest::build;
pub use stack_xml::{parse_stack_xml, to_stack_xml, write_stack_xml, STACK_XML};
pub use table::{read_geometry_table, write_geometry_table};
