pub mod png;
pub mod render;

pub use png::{CompressionLevel, InvalidCompressionLevel, PngOptions};
pub use render::{LayerRenderer, RenderError};
