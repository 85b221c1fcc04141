pub mod document;
pub mod geometry;
pub mod ids;
pub mod layer;
pub mod manifest;
pub mod path;

pub use document::Document;
pub use geometry::{Offset, Size};
pub use ids::LayerId;
pub use layer::{Layer, LayerGroup, LayerNode};
pub use manifest::{ExportManifest, ManifestEntry, PathEntry};
pub use path::{GeometryRow, Stroke, VectorPath, TRIPLET_LEN};
