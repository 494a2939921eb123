//! Portable pixel representations
//!
//! These are the backend-agnostic color types surfaces and images are
//! described with. Several of them can share one native format and differ
//! only in how channels are interpreted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ColorType {
    Unknown,
    /// Single channel, interpreted as alpha
    Alpha8,
    Rgb565,
    Argb4444,
    Rgba8888,
    /// RGBA storage with alpha ignored on read
    Rgb888x,
    Bgra8888,
    Rgba1010102,
    Bgra1010102,
    /// Single channel, replicated into RGB on read
    Gray8,
    RgbaF16,
    RgbaF32,
    R8G8Unorm,
    A16Float,
    R16G16Float,
    A16Unorm,
    R16G16Unorm,
    Srgba8888,
    /// Single channel, interpreted as red
    R8Unorm,
}

impl ColorType {
    pub const ALL: [ColorType; 19] = [
        ColorType::Unknown,
        ColorType::Alpha8,
        ColorType::Rgb565,
        ColorType::Argb4444,
        ColorType::Rgba8888,
        ColorType::Rgb888x,
        ColorType::Bgra8888,
        ColorType::Rgba1010102,
        ColorType::Bgra1010102,
        ColorType::Gray8,
        ColorType::RgbaF16,
        ColorType::RgbaF32,
        ColorType::R8G8Unorm,
        ColorType::A16Float,
        ColorType::R16G16Float,
        ColorType::A16Unorm,
        ColorType::R16G16Unorm,
        ColorType::Srgba8888,
        ColorType::R8Unorm,
    ];

    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}
