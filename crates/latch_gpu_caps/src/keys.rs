//! Cache keys
//!
//! Pipelines and textures are cached by small fixed-width integer keys.
//! Every field has a fixed bit budget. The budgets that depend on table
//! sizes are checked at compile time, the ones that depend on request
//! values are asserted while packing: an overflow would silently alias two
//! different resources, so it is fatal.

use glam::UVec2;
use static_assertions::const_assert;
use wgpu::TextureFormat;

use crate::format_table::{table_index, FORMAT_COUNT};
use crate::{CapsError, Mipmapped, TextureInfo, TextureUsage};

pub const FORMAT_KEY_BITS: u32 = 16;
/// Color sample count shares its half-word with the load-resolve bit.
pub const COLOR_SAMPLE_KEY_BITS: u32 = 15;
pub const DEPTH_STENCIL_SAMPLE_KEY_BITS: u32 = 16;
pub const SAMPLE_CLASS_KEY_BITS: u32 = 3;
pub const USAGE_KEY_BITS: u32 = 28;

const_assert!(FORMAT_COUNT <= 1 << FORMAT_KEY_BITS);
const_assert!(TextureUsage::all().bits() < 1 << USAGE_KEY_BITS);
const_assert!(SAMPLE_CLASS_KEY_BITS + 1 + USAGE_KEY_BITS <= 32);

/// Key value of a native format: its dense index in the format table.
///
/// Panics for a format outside the table.
pub fn format_key(format: Option<TextureFormat>) -> u32 {
    table_index(format) as u32
}

/// Small discrete class for a sample count, independent of how large raw
/// sample counts get.
pub fn sample_count_class(sample_count: u32) -> Result<u32, CapsError> {
    match sample_count {
        1 => Ok(0),
        2 => Ok(1),
        4 => Ok(2),
        8 => Ok(3),
        16 => Ok(4),
        count => Err(CapsError::UnsupportedSampleCount { count }),
    }
}

/// 64-bit render pass shape used in graphics pipeline keys.
///
/// Upper half: color view format, color sample count, load-resolve bit.
/// Lower half: depth/stencil view format and sample count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderPassKey(pub u64);

impl RenderPassKey {
    pub fn pack(
        color_format: Option<TextureFormat>,
        color_samples: u32,
        loads_resolve: bool,
        depth_stencil_format: Option<TextureFormat>,
        depth_stencil_samples: u32,
    ) -> Self {
        let color_format = format_key(color_format);
        let depth_stencil_format = format_key(depth_stencil_format);
        assert!(
            color_format < 1 << FORMAT_KEY_BITS && depth_stencil_format < 1 << FORMAT_KEY_BITS,
            "format index exceeds its key budget"
        );
        assert!(
            color_samples < 1 << COLOR_SAMPLE_KEY_BITS,
            "color sample count {color_samples} exceeds its key budget"
        );
        assert!(
            depth_stencil_samples < 1 << DEPTH_STENCIL_SAMPLE_KEY_BITS,
            "depth/stencil sample count {depth_stencil_samples} exceeds its key budget"
        );

        let color = color_format << 16 | color_samples << 1 | loads_resolve as u32;
        let depth_stencil = depth_stencil_format << 16 | depth_stencil_samples;
        Self((color as u64) << 32 | depth_stencil as u64)
    }

    #[inline]
    pub fn color_half(self) -> u32 {
        (self.0 >> 32) as u32
    }

    #[inline]
    pub fn depth_stencil_half(self) -> u32 {
        self.0 as u32
    }
}

/// Pipeline cache key. Graphics and compute keys never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineKey {
    /// Render step, paint params, render pass low/high, write swizzle.
    Graphics([u32; 5]),
    /// Compute step only.
    Compute([u32; 1]),
}

impl PipelineKey {
    pub fn data(&self) -> &[u32] {
        match self {
            Self::Graphics(data) => data,
            Self::Compute(data) => data,
        }
    }
}

/// Kind of cached resource a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceType(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shareable {
    #[default]
    No,
    Yes,
}

/// Resource cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    pub resource_type: ResourceType,
    pub shareable: Shareable,
    pub data: [u32; 4],
}

impl ResourceKey {
    /// Texture key: width, height, view format, then sample class (3 bits),
    /// mipped (1 bit) and usage (28 bits).
    ///
    /// Mip level count is implied by dimensions and the mipped bit.
    pub fn texture(
        dimensions: UVec2,
        info: &TextureInfo,
        resource_type: ResourceType,
        shareable: Shareable,
    ) -> Self {
        assert!(
            dimensions.x > 0 && dimensions.y > 0,
            "texture keys need non-empty dimensions"
        );
        let view_format = info.view_format();
        assert!(view_format.is_some(), "texture keys need a defined format");

        let samples = match sample_count_class(info.sample_count) {
            Ok(class) => class,
            Err(err) => panic!("{err}"),
        };
        let mipped = (info.mipmapped == Mipmapped::Yes) as u32;
        let usage = info.usage.bits();
        assert!(samples < 1 << SAMPLE_CLASS_KEY_BITS);
        assert!(
            usage < 1 << USAGE_KEY_BITS,
            "usage {usage:#x} exceeds its key budget"
        );

        Self {
            resource_type,
            shareable,
            data: [
                dimensions.x,
                dimensions.y,
                format_key(view_format),
                samples | mipped << SAMPLE_CLASS_KEY_BITS | usage << (SAMPLE_CLASS_KEY_BITS + 1),
            ],
        }
    }
}
