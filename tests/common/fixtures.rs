use image::{Rgba, RgbaImage};
use ora_love::RasterHost;
use ora_love::types::{Document, Layer, LayerGroup, LayerNode, Stroke, VectorPath};
use std::path::PathBuf;

pub const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
pub const BLUE: Rgba<u8> = Rgba([0, 0, 255, 128]);

pub fn solid(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color)
}

pub fn document(filename: &str, width: u32, height: u32, layers: Vec<LayerNode>) -> Document {
    let mut doc = Document::new(width, height);
    doc.filename = Some(PathBuf::from(filename));
    doc.layers = layers;
    doc
}

/// 512x300 with "bg" at (0,0) and "fg" at (10,5).
pub fn two_layer_scene() -> (Document, RasterHost) {
    let mut host = RasterHost::new();
    host.insert(1, solid(512, 300, GREEN));
    host.insert(2, solid(20, 10, RED));
    let doc = document(
        "/art/scene.xcf",
        512,
        300,
        vec![
            Layer::new(1, "bg", (0, 0)).into(),
            Layer::new(2, "fg", (10, 5)).into(),
        ],
    );
    (doc, host)
}

/// One group "group1" containing leaf "inner".
pub fn single_group_scene() -> (Document, RasterHost) {
    let mut host = RasterHost::new();
    host.insert(2, solid(8, 6, RED));
    let doc = document(
        "grouped.xcf",
        32,
        32,
        vec![LayerGroup::new(1, "group1", (4, 4), vec![Layer::new(2, "inner", (4, 4)).into()]).into()],
    );
    (doc, host)
}

/// Nested groups two levels deep plus a top-level leaf.
pub fn nested_scene() -> (Document, RasterHost) {
    let mut host = RasterHost::new();
    host.insert(1, solid(4, 4, RED));
    host.insert(3, solid(6, 3, GREEN));
    host.insert(5, solid(2, 2, BLUE));
    host.insert(6, solid(3, 3, RED));
    let doc = document(
        "nested.xcf",
        64,
        64,
        vec![
            Layer::new(1, "hud", (0, 0)).into(),
            LayerGroup::new(
                2,
                "characters",
                (10, 10),
                vec![
                    Layer::new(3, "hero", (10, 10)).into(),
                    LayerGroup::new(
                        4,
                        "enemies",
                        (20, 20),
                        vec![
                            Layer::new(5, "slime", (20, 20)).into(),
                            Layer::new(6, "bat", (25, 22)).into(),
                        ],
                    )
                    .into(),
                ],
            )
            .into(),
        ],
    );
    (doc, host)
}

pub fn outline_path() -> VectorPath {
    VectorPath::new(
        "outline",
        vec![Stroke::open(vec![
            0.0, 0.0, 1.0, 1.0, 2.0, 2.0, //
            10.5, 10.5, 11.0, 12.0, 13.0, 14.0,
        ])],
    )
}

pub fn closed_path() -> VectorPath {
    VectorPath::new(
        "spawn area",
        vec![
            Stroke::closed(vec![5.0, 5.0, 5.0, 5.0, 5.0, 5.0]),
            Stroke::open(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
        ],
    )
}
