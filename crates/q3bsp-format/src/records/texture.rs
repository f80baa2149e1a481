//! Texture and effect records, both keyed by a 64-byte name

use crate::lump::LumpKind;
use crate::records::{LumpRecord, bounded_name};
use binrw::BinRead;
use std::borrow::Cow;

/// Width of the name field in texture and effect records
pub const NAME_LEN: usize = 64;

/// Surface description (72 bytes)
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct Texture {
    /// Shader name, NUL-padded
    pub name: [u8; NAME_LEN],
    /// Surface flags
    pub flags: i32,
    /// Content flags
    pub contents: i32,
}

impl Texture {
    /// Shader name up to the first NUL
    pub fn name(&self) -> Cow<'_, str> {
        bounded_name(&self.name)
    }
}

impl LumpRecord for Texture {
    const KIND: LumpKind = LumpKind::Textures;
    const SIZE: usize = NAME_LEN + 8;
}

/// Volumetric shader reference, usually fog (72 bytes)
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct Effect {
    /// Shader name, NUL-padded
    pub name: [u8; NAME_LEN],
    /// Brush that generated this effect
    pub brush: i32,
    /// Always 5 in shipped maps, with at least one -1 in the wild
    pub unknown: i32,
}

impl Effect {
    /// Shader name up to the first NUL
    pub fn name(&self) -> Cow<'_, str> {
        bounded_name(&self.name)
    }
}

impl LumpRecord for Effect {
    const KIND: LumpKind = LumpKind::Effects;
    const SIZE: usize = NAME_LEN + 8;
}
