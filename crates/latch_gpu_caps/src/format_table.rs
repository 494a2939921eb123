//! Native format catalog
//!
//! [`FORMATS`] is the fixed list of every native format the engine uses.
//! The position of a format in that list is its dense index, which is also
//! the format value packed into pipeline and resource keys. The list ends
//! with `None`, the undefined format, which doubles as the scan terminator.
//!
//! Each entry owns a [`FormatInfo`] describing what the device can do with
//! it and which color types it can back. Some entries are only populated
//! when the device reports the matching optional feature.

use bitflags::bitflags;
use static_assertions::const_assert;
use wgpu::TextureFormat;

use crate::device::{DeviceFeature, DeviceQuery};
use crate::{ColorType, HostEnvironment, Swizzle};

/// Every native format we know about, roughly most used first. Ends with
/// the undefined format.
pub const FORMATS: [Option<TextureFormat>; FORMAT_COUNT] = [
    Some(TextureFormat::Rgba8Unorm),
    Some(TextureFormat::R8Unorm),
    Some(TextureFormat::R16Unorm),
    Some(TextureFormat::Bgra8Unorm),
    Some(TextureFormat::Rgba16Float),
    Some(TextureFormat::R16Float),
    Some(TextureFormat::Rg8Unorm),
    Some(TextureFormat::Rg16Unorm),
    Some(TextureFormat::Rgb10a2Unorm),
    Some(TextureFormat::Rg16Float),
    Some(TextureFormat::Stencil8),
    Some(TextureFormat::Depth16Unorm),
    Some(TextureFormat::Depth32Float),
    Some(TextureFormat::Depth24PlusStencil8),
    Some(TextureFormat::Bc1RgbaUnorm),
    Some(TextureFormat::Etc2Rgb8Unorm),
    Some(TextureFormat::NV12),
    None,
];

pub const FORMAT_COUNT: usize = 18;

/// Index of the undefined format.
pub const UNDEFINED_INDEX: usize = FORMAT_COUNT - 1;

// Pipeline and resource keys give the format index 16 bits.
const_assert!(FORMAT_COUNT <= 1 << 16);

/// Dense index of `format` in [`FORMATS`].
///
/// `None` maps to the terminator. Returns `None` for a format that is
/// not in the table.
pub fn format_index(format: Option<TextureFormat>) -> Option<usize> {
    for (i, entry) in FORMATS.iter().enumerate() {
        if *entry == format {
            return Some(i);
        }
        if entry.is_none() {
            break;
        }
    }
    None
}

/// Like [`format_index`], but a format missing from the table is fatal.
///
/// Used where the format can only have come from the table itself, so a
/// miss means the table and its users have drifted apart.
pub fn table_index(format: Option<TextureFormat>) -> usize {
    match format_index(format) {
        Some(i) => i,
        None => panic!("{format:?} is missing from the native format table"),
    }
}

bitflags! {
    /// What the device can do with a native format.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FormatFlags: u8 {
        const TEXTURABLE = 1 << 0;
        const RENDERABLE = 1 << 1;
        const MSAA = 1 << 2;
        const STORAGE = 1 << 3;
    }
}

bitflags! {
    /// What a color type may do when backed by a particular format.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ColorTypeFlags: u8 {
        const UPLOAD_DATA = 1 << 0;
        const RENDERABLE = 1 << 1;
    }
}

bitflags! {
    /// Channels stored by a format.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ChannelFlags: u8 {
        const RED = 1 << 0;
        const GREEN = 1 << 1;
        const BLUE = 1 << 2;
        const ALPHA = 1 << 3;
        const RG = Self::RED.bits() | Self::GREEN.bits();
        const RGB = Self::RG.bits() | Self::BLUE.bits();
        const RGBA = Self::RGB.bits() | Self::ALPHA.bits();
    }
}

/// Channels present in `format`. Depth/stencil formats have none.
pub fn format_channels(format: TextureFormat) -> ChannelFlags {
    match format {
        TextureFormat::R8Unorm | TextureFormat::R16Unorm | TextureFormat::R16Float => {
            ChannelFlags::RED
        }
        TextureFormat::Rg8Unorm | TextureFormat::Rg16Unorm | TextureFormat::Rg16Float => {
            ChannelFlags::RG
        }
        TextureFormat::Etc2Rgb8Unorm | TextureFormat::NV12 => ChannelFlags::RGB,
        TextureFormat::Rgba8Unorm
        | TextureFormat::Bgra8Unorm
        | TextureFormat::Rgba16Float
        | TextureFormat::Rgb10a2Unorm
        | TextureFormat::Bc1RgbaUnorm => ChannelFlags::RGBA,
        _ => ChannelFlags::empty(),
    }
}

/// One color type a format can back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTypeInfo {
    pub color_type: ColorType,
    pub flags: ColorTypeFlags,
    /// Applied when sampling the format as this color type.
    pub read_swizzle: Swizzle,
    /// Applied to shader output when rendering this color type.
    pub write_swizzle: Swizzle,
}

impl ColorTypeInfo {
    pub fn new(color_type: ColorType, flags: ColorTypeFlags) -> Self {
        Self {
            color_type,
            flags,
            read_swizzle: Swizzle::RGBA,
            write_swizzle: Swizzle::RGBA,
        }
    }

    pub fn with_read_swizzle(mut self, swizzle: Swizzle) -> Self {
        self.read_swizzle = swizzle;
        self
    }

    pub fn with_write_swizzle(mut self, swizzle: Swizzle) -> Self {
        self.write_swizzle = swizzle;
        self
    }
}

/// Capabilities of one native format on this device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatInfo {
    pub flags: FormatFlags,
    color_type_infos: Vec<ColorTypeInfo>,
}

impl FormatInfo {
    fn new(flags: FormatFlags, color_type_infos: Vec<ColorTypeInfo>) -> Self {
        debug_assert!(
            color_type_infos.iter().enumerate().all(|(i, a)| color_type_infos[..i]
                .iter()
                .all(|b| b.color_type != a.color_type)),
            "a color type may only be bound once per format"
        );
        Self {
            flags,
            color_type_infos,
        }
    }

    /// Bound color types, in the order they are considered.
    pub fn color_type_infos(&self) -> &[ColorTypeInfo] {
        &self.color_type_infos
    }

    pub fn color_type_info(&self, color_type: ColorType) -> Option<&ColorTypeInfo> {
        self.color_type_infos
            .iter()
            .find(|info| info.color_type == color_type)
    }

    pub fn supports(&self, color_type: ColorType) -> bool {
        self.color_type_info(color_type).is_some()
    }

    /// Highest sample count this format can be rendered at; 0 if never.
    pub fn max_render_target_sample_count(&self) -> u32 {
        if !self.flags.contains(FormatFlags::RENDERABLE) {
            0
        } else if self.flags.contains(FormatFlags::MSAA) {
            8
        } else {
            1
        }
    }
}

/// Per-device capability records for every entry of [`FORMATS`].
#[derive(Debug, Clone)]
pub struct FormatTable {
    infos: Vec<FormatInfo>,
}

impl FormatTable {
    /// Fill the table, gating entries on the device's optional features.
    pub fn build(device: &dyn DeviceQuery) -> Self {
        let mut table = Self {
            infos: vec![FormatInfo::default(); FORMAT_COUNT],
        };
        // R8 storage and 16-bit normalized formats are native extensions,
        // invisible from a browser.
        let native = device.host() == HostEnvironment::Native;
        let all = FormatFlags::all();
        let upload = ColorTypeFlags::UPLOAD_DATA;
        let upload_render = ColorTypeFlags::UPLOAD_DATA | ColorTypeFlags::RENDERABLE;
        let alpha_read = Swizzle::new("000r");
        let alpha_write = Swizzle::new("a000");

        table.set(
            TextureFormat::Rgba8Unorm,
            FormatInfo::new(
                all,
                vec![
                    ColorTypeInfo::new(ColorType::Rgba8888, upload_render),
                    ColorTypeInfo::new(ColorType::Rgb888x, upload)
                        .with_read_swizzle(Swizzle::RGB1),
                ],
            ),
        );

        let mut r8_flags = all;
        if !(native && device.has_feature(DeviceFeature::R8UnormStorage)) {
            r8_flags.remove(FormatFlags::STORAGE);
        }
        table.set(
            TextureFormat::R8Unorm,
            FormatInfo::new(
                r8_flags,
                vec![
                    ColorTypeInfo::new(ColorType::R8Unorm, upload_render),
                    ColorTypeInfo::new(ColorType::Alpha8, upload_render)
                        .with_read_swizzle(alpha_read)
                        .with_write_swizzle(alpha_write),
                    ColorTypeInfo::new(ColorType::Gray8, upload)
                        .with_read_swizzle(Swizzle::new("rrr1")),
                ],
            ),
        );

        let unorm16 = native && device.has_feature(DeviceFeature::Unorm16TextureFormats);
        if unorm16 {
            // No storage binding for 16-bit normalized formats yet.
            table.set(
                TextureFormat::R16Unorm,
                FormatInfo::new(
                    all - FormatFlags::STORAGE,
                    vec![ColorTypeInfo::new(ColorType::A16Unorm, upload_render)
                        .with_read_swizzle(alpha_read)
                        .with_write_swizzle(alpha_write)],
                ),
            );
        }

        table.set(
            TextureFormat::Bgra8Unorm,
            FormatInfo::new(
                all,
                vec![
                    ColorTypeInfo::new(ColorType::Bgra8888, upload_render),
                    ColorTypeInfo::new(ColorType::Rgb888x, upload),
                ],
            ),
        );
        table.set(
            TextureFormat::Rgba16Float,
            FormatInfo::new(
                all,
                vec![ColorTypeInfo::new(ColorType::RgbaF16, upload_render)],
            ),
        );
        table.set(
            TextureFormat::R16Float,
            FormatInfo::new(
                all,
                vec![ColorTypeInfo::new(ColorType::A16Float, upload_render)
                    .with_read_swizzle(alpha_read)
                    .with_write_swizzle(alpha_write)],
            ),
        );
        table.set(
            TextureFormat::Rg8Unorm,
            FormatInfo::new(
                all,
                vec![ColorTypeInfo::new(ColorType::R8G8Unorm, upload_render)],
            ),
        );
        if unorm16 {
            table.set(
                TextureFormat::Rg16Unorm,
                FormatInfo::new(
                    all,
                    vec![ColorTypeInfo::new(ColorType::R16G16Unorm, upload_render)],
                ),
            );
        }
        table.set(
            TextureFormat::Rgb10a2Unorm,
            FormatInfo::new(
                all,
                vec![ColorTypeInfo::new(ColorType::Rgba1010102, upload_render)],
            ),
        );
        table.set(
            TextureFormat::Rg16Float,
            FormatInfo::new(
                all,
                vec![ColorTypeInfo::new(ColorType::R16G16Float, upload_render)],
            ),
        );

        if device.has_feature(DeviceFeature::TextureCompressionEtc2) {
            table.set(
                TextureFormat::Etc2Rgb8Unorm,
                FormatInfo::new(
                    FormatFlags::TEXTURABLE,
                    vec![ColorTypeInfo::new(ColorType::Rgb888x, upload)],
                ),
            );
        }
        if device.has_feature(DeviceFeature::TextureCompressionBc) {
            table.set(
                TextureFormat::Bc1RgbaUnorm,
                FormatInfo::new(
                    FormatFlags::TEXTURABLE,
                    vec![ColorTypeInfo::new(ColorType::Rgba8888, upload)],
                ),
            );
        }

        // Depth/stencil: attachments only.
        for format in [
            TextureFormat::Stencil8,
            TextureFormat::Depth16Unorm,
            TextureFormat::Depth32Float,
            TextureFormat::Depth24PlusStencil8,
        ] {
            table.set(format, FormatInfo::new(FormatFlags::MSAA, Vec::new()));
        }

        if device.has_feature(DeviceFeature::MultiPlanarFormats) {
            // Sampled through YUV conversion only.
            table.set(
                TextureFormat::NV12,
                FormatInfo::new(
                    FormatFlags::TEXTURABLE,
                    vec![ColorTypeInfo::new(ColorType::Rgba8888, ColorTypeFlags::empty())],
                ),
            );
        }

        tracing::trace!(
            r8_storage = r8_flags.contains(FormatFlags::STORAGE),
            unorm16,
            "format table built"
        );
        table
    }

    fn set(&mut self, format: TextureFormat, info: FormatInfo) {
        let index = table_index(Some(format));
        self.infos[index] = info;
    }

    /// Record for `format`. Formats outside the table, and the undefined
    /// format, have no capabilities.
    pub fn info(&self, format: Option<TextureFormat>) -> &FormatInfo {
        let index = format_index(format).unwrap_or(UNDEFINED_INDEX);
        &self.infos[index]
    }

    /// Records paired with their formats, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Option<TextureFormat>, &FormatInfo)> {
        FORMATS.iter().copied().zip(self.infos.iter())
    }
}
