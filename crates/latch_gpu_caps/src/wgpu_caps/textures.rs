//! Default texture descriptors and texture validity checks

use glam::UVec2;
use wgpu::{TextureAspect, TextureFormat};

use super::WgpuCaps;
use crate::format_table::FormatFlags;
use crate::texture_info::is_multi_planar;
use crate::{
    ColorType, CompressionType, DepthStencilFlags, Discardable, Mipmapped, Renderable,
    TextureInfo, TextureUsage,
};

const SAMPLED_USAGE: TextureUsage = TextureUsage::TEXTURE_BINDING
    .union(TextureUsage::COPY_DST)
    .union(TextureUsage::COPY_SRC);

const STORAGE_USAGE: TextureUsage = TextureUsage::STORAGE_BINDING
    .union(TextureUsage::TEXTURE_BINDING)
    .union(TextureUsage::COPY_SRC);

fn format_from_compression(compression: CompressionType) -> Option<TextureFormat> {
    match compression {
        CompressionType::Etc2Rgb8Unorm => Some(TextureFormat::Etc2Rgb8Unorm),
        CompressionType::Bc1Rgba8Unorm => Some(TextureFormat::Bc1RgbaUnorm),
        CompressionType::Bc1Rgb8Unorm | CompressionType::None => None,
    }
}

fn format_from_depth_stencil(flags: DepthStencilFlags) -> Option<TextureFormat> {
    if flags == DepthStencilFlags::DEPTH_STENCIL {
        Some(TextureFormat::Depth24PlusStencil8)
    } else if flags == DepthStencilFlags::DEPTH {
        // Depth32Float would also do, at twice the memory.
        Some(TextureFormat::Depth16Unorm)
    } else if flags == DepthStencilFlags::STENCIL {
        Some(TextureFormat::Stencil8)
    } else {
        None
    }
}

/// The depth attachment of a pass must match the full texture size. A
/// chroma plane view of a 4:2:0 texture is half that size in each
/// dimension.
pub(super) fn depth_attachment_dimensions(info: &TextureInfo, color_dimensions: UVec2) -> UVec2 {
    match info.format {
        Some(format) if is_multi_planar(format) && info.aspect() == TextureAspect::Plane1 => {
            color_dimensions * 2
        }
        _ => color_dimensions,
    }
}

impl WgpuCaps {
    pub(super) fn texturable(&self, info: &TextureInfo) -> bool {
        info.is_valid()
            && info.usage.contains(TextureUsage::TEXTURE_BINDING)
            && info.is_view_consistent()
            && self.is_texturable_format(info.view_format())
    }

    pub(super) fn renderable(&self, info: &TextureInfo) -> bool {
        info.is_valid()
            && info.usage.contains(TextureUsage::RENDER_ATTACHMENT)
            && self.is_renderable_format(info.view_format(), info.sample_count)
    }

    pub(super) fn storage_capable(&self, info: &TextureInfo) -> bool {
        info.is_valid()
            && info.usage.contains(TextureUsage::STORAGE_BINDING)
            && info.sample_count == 1
            && self
                .format_info(info.view_format())
                .flags
                .contains(FormatFlags::STORAGE)
    }

    pub(super) fn sampled_texture(
        &self,
        color_type: ColorType,
        mipmapped: Mipmapped,
        renderable: Renderable,
    ) -> TextureInfo {
        let Some(format) = self.preferred_format(color_type) else {
            return TextureInfo::INVALID;
        };
        let mut usage = SAMPLED_USAGE;
        if renderable == Renderable::Yes {
            usage |= TextureUsage::RENDER_ATTACHMENT;
        }
        TextureInfo::new(format, 1, mipmapped, usage)
    }

    pub(super) fn sampled_copy(&self, info: &TextureInfo, mipmapped: Mipmapped) -> TextureInfo {
        if !info.is_valid() {
            return TextureInfo::INVALID;
        }
        TextureInfo {
            sample_count: 1,
            mipmapped,
            usage: SAMPLED_USAGE,
            ..*info
        }
    }

    pub(super) fn compressed_texture(
        &self,
        compression: CompressionType,
        mipmapped: Mipmapped,
    ) -> TextureInfo {
        match format_from_compression(compression) {
            Some(format) => TextureInfo::new(format, 1, mipmapped, SAMPLED_USAGE),
            None => TextureInfo::INVALID,
        }
    }

    pub(super) fn msaa_texture(
        &self,
        single_sampled: &TextureInfo,
        discardable: Discardable,
    ) -> TextureInfo {
        if self.default_msaa_samples <= 1 {
            return TextureInfo::INVALID;
        }
        let Some(format) = single_sampled.format else {
            return TextureInfo::INVALID;
        };
        let mut usage = TextureUsage::RENDER_ATTACHMENT;
        if discardable == Discardable::Yes && self.supports_transient_attachments() {
            usage |= TextureUsage::TRANSIENT_ATTACHMENT;
        }
        TextureInfo::new(format, self.default_msaa_samples, Mipmapped::No, usage)
    }

    pub(super) fn depth_stencil_texture(
        &self,
        flags: DepthStencilFlags,
        sample_count: u32,
    ) -> TextureInfo {
        let Some(format) = format_from_depth_stencil(flags) else {
            return TextureInfo::INVALID;
        };
        let mut usage = TextureUsage::RENDER_ATTACHMENT;
        if self.supports_transient_attachments() {
            usage |= TextureUsage::TRANSIENT_ATTACHMENT;
        }
        TextureInfo::new(format, sample_count, Mipmapped::No, usage)
    }

    pub(super) fn storage_texture(&self, color_type: ColorType) -> TextureInfo {
        let Some(format) = self.preferred_format(color_type) else {
            tracing::warn!(?color_type, "color type not supported for storage textures");
            return TextureInfo::INVALID;
        };
        if !self
            .format_info(Some(format))
            .flags
            .contains(FormatFlags::STORAGE)
        {
            return TextureInfo::INVALID;
        }
        TextureInfo::new(format, 1, Mipmapped::No, STORAGE_USAGE)
    }
}
