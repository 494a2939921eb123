//! Portable capability interface
//!
//! The renderer talks to whichever backend it runs on through [`Caps`].
//! Implementations are immutable once built and are queried concurrently.

use glam::UVec2;

use crate::format_table::{ChannelFlags, ColorTypeInfo};
use crate::probe::{ResourceBindingRequirements, ShaderCaps};
use crate::{
    ColorType, CompressionType, ComputePipelineDesc, DepthStencilFlags, Discardable,
    GraphicsPipelineDesc, Mipmapped, PipelineKey, RenderPassDesc, Renderable, ResourceKey,
    ResourceType, Shareable, TextureInfo,
};

pub trait Caps: Send + Sync {
    fn max_texture_size(&self) -> u32;

    /// Sample count for internally allocated MSAA targets; 1 when MSAA is
    /// off.
    fn default_msaa_samples(&self) -> u32;

    fn shader_caps(&self) -> &ShaderCaps;

    fn resource_binding_requirements(&self) -> &ResourceBindingRequirements;

    fn is_texturable(&self, info: &TextureInfo) -> bool;
    fn is_renderable(&self, info: &TextureInfo) -> bool;
    fn is_storage(&self, info: &TextureInfo) -> bool;

    fn channel_mask(&self, info: &TextureInfo) -> ChannelFlags;

    // Texture descriptors. Each returns `TextureInfo::INVALID` when the
    // request cannot be met on this device.

    fn default_sampled_texture_info(
        &self,
        color_type: ColorType,
        mipmapped: Mipmapped,
        renderable: Renderable,
    ) -> TextureInfo;

    fn texture_info_for_sampled_copy(&self, info: &TextureInfo, mipmapped: Mipmapped)
        -> TextureInfo;

    fn default_compressed_texture_info(
        &self,
        compression: CompressionType,
        mipmapped: Mipmapped,
    ) -> TextureInfo;

    fn default_msaa_texture_info(
        &self,
        single_sampled: &TextureInfo,
        discardable: Discardable,
    ) -> TextureInfo;

    fn default_depth_stencil_texture_info(
        &self,
        flags: DepthStencilFlags,
        sample_count: u32,
    ) -> TextureInfo;

    fn default_storage_texture_info(&self, color_type: ColorType) -> TextureInfo;

    fn depth_attachment_dimensions(&self, info: &TextureInfo, color_dimensions: UVec2) -> UVec2;

    fn color_type_info(&self, color_type: ColorType, info: &TextureInfo) -> Option<&ColorTypeInfo>;

    fn supports_write_pixels(&self, info: &TextureInfo) -> bool;
    fn supports_read_pixels(&self, info: &TextureInfo) -> bool;

    /// Color type to upload `src_color_type` data as; the flag reports
    /// whether the data must be expanded to RGB first.
    fn supported_write_pixels_color_type(
        &self,
        dst_color_type: ColorType,
        dst_info: &TextureInfo,
        src_color_type: ColorType,
    ) -> (ColorType, bool);

    fn supported_read_pixels_color_type(
        &self,
        src_color_type: ColorType,
        src_info: &TextureInfo,
        dst_color_type: ColorType,
    ) -> (ColorType, bool);

    // Cache keys

    fn make_graphics_pipeline_key(
        &self,
        pipeline: &GraphicsPipelineDesc,
        render_pass: &RenderPassDesc,
    ) -> PipelineKey;

    fn make_compute_pipeline_key(&self, pipeline: &ComputePipelineDesc) -> PipelineKey;

    fn build_key_for_texture(
        &self,
        dimensions: UVec2,
        info: &TextureInfo,
        resource_type: ResourceType,
        shareable: Shareable,
    ) -> ResourceKey;
}
