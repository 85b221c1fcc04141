pub mod raster;
pub mod scene;

pub use raster::RasterHost;
pub use scene::{Scene, SceneNode, load_scene};
