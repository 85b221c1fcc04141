//! JSON scene files: a host document described on disk, so the exporter can
//! run without an editor.
//!
//! ```json
//! {
//!   "width": 512, "height": 300, "filename": "hero.xcf",
//!   "layers": [
//!     { "name": "fg", "source": "fg.png", "x": 10, "y": 5 },
//!     { "name": "body", "children": [ { "name": "arm", "source": "arm.png" } ] }
//!   ],
//!   "paths": [ { "name": "outline", "strokes": [ { "points": [0, 0, 1, 1, 2, 2], "closed": true } ] } ]
//! }
//! ```
//!
//! A node with `children` is a group, anything else is a leaf whose pixels
//! come from `source`, resolved against the scene file's directory. Layers
//! are listed topmost first.

use super::raster::RasterHost;
use crate::error::ExportError;
use log::{debug, info};
use ora_types::{Document, Layer, LayerGroup, LayerId, LayerNode, Offset, VectorPath};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub filename: Option<PathBuf>,
    #[serde(default)]
    pub layers: Vec<SceneNode>,
    #[serde(default)]
    pub paths: Vec<VectorPath>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneNode {
    pub name: String,
    #[serde(default)]
    pub source: Option<PathBuf>,
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub children: Option<Vec<SceneNode>>,
}

fn default_visible() -> bool {
    true
}

impl Scene {
    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a scene file. Without an explicit `filename`, the document is
    /// named after the scene file.
    pub fn from_file(path: &Path) -> Result<Self, ExportError> {
        let text = fs::read_to_string(path).map_err(ExportError::fs(path))?;
        let mut scene = Self::from_json(&text)?;
        if scene.filename.is_none() {
            scene.filename = Some(path.to_path_buf());
        }
        Ok(scene)
    }

    /// Loads every layer source and builds the document snapshot plus the
    /// pixel store that backs it.
    pub fn load(self, base_dir: &Path) -> Result<(Document, RasterHost), ExportError> {
        let mut loader = Loader {
            base_dir,
            host: RasterHost::new(),
            next_id: 1,
        };
        let layers = self
            .layers
            .into_iter()
            .map(|node| loader.node(node))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Loaded scene {}x{} with {} layer images and {} paths",
            self.width,
            self.height,
            loader.host.len(),
            self.paths.len()
        );

        let document = Document {
            width: self.width,
            height: self.height,
            filename: self.filename,
            layers,
            paths: self.paths,
        };
        Ok((document, loader.host))
    }
}

/// Reads `path` and loads it relative to its own directory.
pub fn load_scene(path: &Path) -> Result<(Document, RasterHost), ExportError> {
    let base_dir = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
    Scene::from_file(path)?.load(&base_dir)
}

struct Loader<'a> {
    base_dir: &'a Path,
    host: RasterHost,
    next_id: u32,
}

impl Loader<'_> {
    fn next_id(&mut self) -> LayerId {
        let id = LayerId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn node(&mut self, node: SceneNode) -> Result<LayerNode, ExportError> {
        let id = self.next_id();
        match node.children {
            Some(children) => {
                let children = children
                    .into_iter()
                    .map(|child| self.node(child))
                    .collect::<Result<Vec<_>, _>>()?;
                // Groups default to the top-left corner of their children.
                let offset = match (node.x, node.y) {
                    (Some(x), Some(y)) => Offset::new(x, y),
                    (x, y) => {
                        let min = min_offset(&children);
                        Offset::new(x.unwrap_or(min.x), y.unwrap_or(min.y))
                    }
                };
                let mut group = LayerGroup::new(id, node.name, offset, children);
                group.visible = node.visible;
                Ok(group.into())
            }
            None => {
                let source = node.source.ok_or_else(|| {
                    ExportError::Scene(format!("Layer '{}' has neither a source nor children", node.name))
                })?;
                let path = self.base_dir.join(&source);
                let pixels = image::open(&path)
                    .map_err(|e| ExportError::Scene(format!("Cannot load '{}': {}", path.display(), e)))?
                    .into_rgba8();
                debug!(
                    "Loaded layer '{}' from {} ({}x{})",
                    node.name,
                    path.display(),
                    pixels.width(),
                    pixels.height()
                );
                self.host.insert(id, pixels);

                let mut layer = Layer::new(id, node.name, (node.x.unwrap_or(0), node.y.unwrap_or(0)));
                layer.visible = node.visible;
                Ok(layer.into())
            }
        }
    }
}

fn min_offset(children: &[LayerNode]) -> Offset {
    children
        .iter()
        .map(LayerNode::offset)
        .reduce(|a, b| Offset::new(a.x.min(b.x), a.y.min(b.y)))
        .unwrap_or_default()
}
