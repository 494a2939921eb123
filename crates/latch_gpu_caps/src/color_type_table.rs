//! Color type to native format resolution
//!
//! Each color type lists the native formats that may back it, best first.
//! The first candidate whose format record actually binds the color type
//! wins, so a device without an optional format falls through to the next
//! choice instead of failing.

use wgpu::TextureFormat;

use crate::format_table::FormatTable;
use crate::ColorType;

const PRIORITIES: &[(ColorType, &[TextureFormat])] = &[
    (ColorType::Alpha8, &[TextureFormat::R8Unorm]),
    (ColorType::Rgba8888, &[TextureFormat::Rgba8Unorm]),
    (
        ColorType::Rgb888x,
        &[TextureFormat::Rgba8Unorm, TextureFormat::Bgra8Unorm],
    ),
    (ColorType::Bgra8888, &[TextureFormat::Bgra8Unorm]),
    (ColorType::Gray8, &[TextureFormat::R8Unorm]),
    (ColorType::R8Unorm, &[TextureFormat::R8Unorm]),
    (ColorType::RgbaF16, &[TextureFormat::Rgba16Float]),
    (ColorType::A16Float, &[TextureFormat::R16Float]),
    (ColorType::R8G8Unorm, &[TextureFormat::Rg8Unorm]),
    (ColorType::Rgba1010102, &[TextureFormat::Rgb10a2Unorm]),
    (ColorType::R16G16Float, &[TextureFormat::Rg16Float]),
    (ColorType::A16Unorm, &[TextureFormat::R16Unorm]),
    (ColorType::R16G16Unorm, &[TextureFormat::Rg16Unorm]),
];

/// Candidate formats for `color_type`, best first. Empty when the color
/// type has no native counterpart at all.
pub fn candidates(color_type: ColorType) -> &'static [TextureFormat] {
    PRIORITIES
        .iter()
        .find(|(ct, _)| *ct == color_type)
        .map(|(_, formats)| *formats)
        .unwrap_or(&[])
}

/// Preferred native format per color type on one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTypeTable {
    formats: [Option<TextureFormat>; ColorType::COUNT],
}

impl ColorTypeTable {
    pub fn build(format_table: &FormatTable) -> Self {
        let mut formats = [None; ColorType::COUNT];
        for &(color_type, list) in PRIORITIES {
            formats[color_type.index()] = list
                .iter()
                .copied()
                .find(|&format| format_table.info(Some(format)).supports(color_type));
            if formats[color_type.index()].is_none() {
                tracing::trace!(?color_type, "no supported native format");
            }
        }
        Self { formats }
    }

    /// Native format backing `color_type`, or `None` if unsupported.
    #[inline]
    pub fn preferred_format(&self, color_type: ColorType) -> Option<TextureFormat> {
        self.formats[color_type.index()]
    }
}
