//! Lightmaps and the light volume grid

use crate::lump::LumpKind;
use crate::records::{LumpRecord, Rgb};
use binrw::BinRead;

/// Lightmap edge length in texels
pub const LIGHTMAP_SIZE: usize = 128;

/// 128x128 RGB lightmap (49152 bytes)
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct Lightmap {
    /// Texels, row-major
    #[br(count = LIGHTMAP_SIZE * LIGHTMAP_SIZE)]
    pub texels: Vec<Rgb>,
}

impl Lightmap {
    /// Texel at column `x`, row `y`
    pub fn texel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= LIGHTMAP_SIZE || y >= LIGHTMAP_SIZE {
            return None;
        }
        self.texels.get(y * LIGHTMAP_SIZE + x).copied()
    }
}

impl LumpRecord for Lightmap {
    const KIND: LumpKind = LumpKind::Lightmaps;
    const SIZE: usize = LIGHTMAP_SIZE * LIGHTMAP_SIZE * 3;
}

/// Lighting grid sample for dynamic objects (8 bytes)
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[br(little)]
pub struct LightVol {
    /// Ambient color
    pub ambient: Rgb,
    /// Directional color
    pub directional: Rgb,
    /// Direction to light as (phi, theta)
    pub dir: [u8; 2],
}

impl LightVol {
    /// Azimuth byte of the light direction
    pub const fn phi(&self) -> u8 {
        self.dir[0]
    }

    /// Inclination byte of the light direction
    pub const fn theta(&self) -> u8 {
        self.dir[1]
    }
}

impl LumpRecord for LightVol {
    const KIND: LumpKind = LumpKind::LightVols;
    const SIZE: usize = 8;
}
