//! An in-memory pixel store that plays the host's part of the export.
//!
//! Layer pixels live in `RgbaImage` buffers keyed by `LayerId`, placed on the
//! canvas at their layer's offset. Stacking follows the layer tree: the first
//! sibling is topmost, so compositing walks siblings in reverse.

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::debug;
use ora_traits::{CompressionLevel, LayerRenderer, PngOptions, RenderError};
use ora_types::{Document, LayerId, LayerNode, Offset, Size};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Thumbnails are flattened onto an opaque background, like a merged image.
const THUMBNAIL_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Debug, Default)]
pub struct RasterHost {
    pixels: HashMap<LayerId, RgbaImage>,
}

/// Canvas-space bounding box, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    min: Offset,
    max: Offset,
}

impl Bounds {
    fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min: Offset::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Offset::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

impl RasterHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the pixels of a layer, replacing any previous content.
    pub fn insert(&mut self, id: impl Into<LayerId>, pixels: RgbaImage) {
        self.pixels.insert(id.into(), pixels);
    }

    pub fn get(&self, id: LayerId) -> Option<&RgbaImage> {
        self.pixels.get(&id)
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    fn pixels(&self, id: LayerId) -> Result<&RgbaImage, RenderError> {
        self.pixels.get(&id).ok_or(RenderError::UnknownLayer(id))
    }

    /// Renders a node on its own: a leaf is its pixel buffer, a group is the
    /// composite of its visible descendants starting at the group's offset.
    pub fn render_node(&self, node: &LayerNode) -> Result<RgbaImage, RenderError> {
        match node {
            LayerNode::Leaf(layer) => Ok(self.pixels(layer.id)?.clone()),
            LayerNode::Group(group) => {
                let origin = group.offset;
                let (width, height) = match self.visible_bounds_of_children(&group.children)? {
                    Some(bounds) => (
                        extent(origin.x, bounds.max.x),
                        extent(origin.y, bounds.max.y),
                    ),
                    None => (1, 1),
                };
                let mut canvas = RgbaImage::new(width, height);
                self.composite_children(&group.children, &mut canvas, origin)?;
                Ok(canvas)
            }
        }
    }

    /// Flattens every visible layer of `document` onto a canvas of the
    /// document's size.
    pub fn render_flattened(&self, document: &Document) -> Result<RgbaImage, RenderError> {
        let mut canvas = RgbaImage::from_pixel(
            document.width.max(1),
            document.height.max(1),
            THUMBNAIL_BACKGROUND,
        );
        self.composite_children(&document.layers, &mut canvas, Offset::zero())?;
        Ok(canvas)
    }

    fn composite_children(
        &self,
        children: &[LayerNode],
        canvas: &mut RgbaImage,
        origin: Offset,
    ) -> Result<(), RenderError> {
        for child in children.iter().rev() {
            self.composite(child, canvas, origin)?;
        }
        Ok(())
    }

    fn composite(
        &self,
        node: &LayerNode,
        canvas: &mut RgbaImage,
        origin: Offset,
    ) -> Result<(), RenderError> {
        if !node.visible() {
            return Ok(());
        }
        match node {
            LayerNode::Leaf(layer) => {
                let pixels = self.pixels(layer.id)?;
                let x = i64::from(layer.offset.x) - i64::from(origin.x);
                let y = i64::from(layer.offset.y) - i64::from(origin.y);
                imageops::overlay(canvas, pixels, x, y);
                Ok(())
            }
            LayerNode::Group(group) => self.composite_children(&group.children, canvas, origin),
        }
    }

    fn visible_bounds_of_children(
        &self,
        children: &[LayerNode],
    ) -> Result<Option<Bounds>, RenderError> {
        let mut bounds: Option<Bounds> = None;
        for child in children.iter().filter(|c| c.visible()) {
            let child_bounds = match child {
                LayerNode::Leaf(layer) => {
                    let pixels = self.pixels(layer.id)?;
                    Some(Bounds {
                        min: layer.offset,
                        max: Offset::new(
                            layer.offset.x.saturating_add_unsigned(pixels.width()),
                            layer.offset.y.saturating_add_unsigned(pixels.height()),
                        ),
                    })
                }
                LayerNode::Group(group) => self.visible_bounds_of_children(&group.children)?,
            };
            bounds = match (bounds, child_bounds) {
                (Some(a), Some(b)) => Some(a.union(b)),
                (a, b) => a.or(b),
            };
        }
        Ok(bounds)
    }
}

fn extent(origin: i32, max: i32) -> u32 {
    u32::try_from(i64::from(max) - i64::from(origin))
        .unwrap_or(0)
        .max(1)
}

fn compression_type(level: CompressionLevel) -> CompressionType {
    match level.get() {
        0..=3 => CompressionType::Fast,
        4..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

/// Encodes `image` as a PNG at `target`.
///
/// The `image` encoder does not emit the optional metadata chunks or Adam7
/// interlacing, so only the compression level of `options` is honoured.
pub fn write_png(image: &RgbaImage, target: &Path, options: &PngOptions) -> Result<(), RenderError> {
    let writer = BufWriter::new(File::create(target)?);
    let encoder =
        PngEncoder::new_with_quality(writer, compression_type(options.compression), PngFilter::Adaptive);
    image
        .write_with_encoder(encoder)
        .map_err(|e| RenderError::Image(e.to_string()))
}

impl LayerRenderer for RasterHost {
    fn render_layer(
        &self,
        node: &LayerNode,
        target: &Path,
        options: &PngOptions,
    ) -> Result<(), RenderError> {
        let image = self.render_node(node)?;
        debug!(
            "Rendering layer '{}' ({}x{}) to {}",
            node.name(),
            image.width(),
            image.height(),
            target.display()
        );
        write_png(&image, target, options)
    }

    fn render_thumbnail(
        &self,
        document: &Document,
        size: Size,
        target: &Path,
        options: &PngOptions,
    ) -> Result<(), RenderError> {
        let flattened = self.render_flattened(document)?;
        let thumbnail = if size == document.size() || size.is_empty() {
            flattened
        } else {
            imageops::resize(&flattened, size.width, size.height, FilterType::Triangle)
        };
        write_png(&thumbnail, target, options)
    }

    fn name(&self) -> &'static str {
        "RasterHost"
    }
}
