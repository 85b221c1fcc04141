//! Exports layered images and their vector paths as OpenRaster, with the
//! extra metadata a game engine's asset loader needs: per-layer offsets in
//! `stack.xml` and one CSV geometry table per vector path.
//!
//! The host document is read through `ora_types::Document` and rendered
//! through an `ora_traits::LayerRenderer`; `host::RasterHost` is a
//! ready-made renderer backed by in-memory RGBA buffers.

pub mod config;
pub mod error;
pub mod export;
pub mod host;

pub use config::ExportConfig;
pub use error::ExportError;
pub use export::fs::DirStatus;
pub use export::{ExportReport, OraExporter, export_document};
pub use host::{RasterHost, Scene, load_scene};

pub use ora_core as core;
pub use ora_traits as traits;
pub use ora_types as types;
