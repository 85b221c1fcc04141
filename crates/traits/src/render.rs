//! The seam between the exporter and the host that owns the pixels.
//!
//! The exporter decides *what* goes where; a `LayerRenderer` turns a layer
//! handle into an encoded image on disk. Hosts without a pixel store of their
//! own can use the `image`-backed `RasterHost` from the `ora-love` crate.

use crate::png::PngOptions;
use ora_types::{Document, LayerId, LayerNode, Size};
use std::fmt::Debug;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding failed: {0}")]
    Image(String),

    #[error("No pixel content for layer {0}")]
    UnknownLayer(LayerId),

    #[error("Other rendering error: {0}")]
    Other(String),
}

pub trait LayerRenderer: Debug {
    /// Writes `node` as a standalone PNG at `target`, cropped to the node's
    /// own extent. Groups are rendered as the composite of their visible
    /// descendants.
    fn render_layer(
        &self,
        node: &LayerNode,
        target: &Path,
        options: &PngOptions,
    ) -> Result<(), RenderError>;

    /// Composites every visible layer of `document`, scales the result to
    /// `size` and writes it as a PNG at `target`.
    fn render_thumbnail(
        &self,
        document: &Document,
        size: Size,
        target: &Path,
        options: &PngOptions,
    ) -> Result<(), RenderError>;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}
