//! Encoder settings handed to the host renderer.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("PNG compression level must be between 0 and 9, got {0}")]
pub struct InvalidCompressionLevel(pub u8);

/// Lossless PNG compression level, 0 (none) to 9 (smallest).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompressionLevel(u8);

impl CompressionLevel {
    pub const MAX: u8 = 9;

    pub fn new(level: u8) -> Result<Self, InvalidCompressionLevel> {
        if level > Self::MAX {
            return Err(InvalidCompressionLevel(level));
        }
        Ok(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for CompressionLevel {
    type Error = InvalidCompressionLevel;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

/// Options for one encoded PNG.
///
/// The metadata chunks (background, gamma, offset, physical resolution and
/// timestamp) are all requested for layer images. Renderers that cannot
/// emit a given chunk ignore the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngOptions {
    pub compression: CompressionLevel,
    pub interlace: bool,
    pub background: bool,
    pub gamma: bool,
    pub offset: bool,
    pub physical_resolution: bool,
    pub timestamp: bool,
}

impl PngOptions {
    pub fn with_compression(compression: CompressionLevel) -> Self {
        Self {
            compression,
            ..Self::default()
        }
    }
}

impl Default for PngOptions {
    fn default() -> Self {
        Self {
            compression: CompressionLevel::default(),
            interlace: false,
            background: true,
            gamma: true,
            offset: true,
            physical_resolution: true,
            timestamp: true,
        }
    }
}
