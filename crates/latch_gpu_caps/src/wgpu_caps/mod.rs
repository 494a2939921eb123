//! WebGPU capabilities
//!
//! [`WgpuCaps`] is built once per device: probe the device, fill the format
//! table, then resolve every color type to its preferred format. After
//! that it is read-only and can be shared across threads freely.

mod pipeline_keys;
mod textures;

use glam::UVec2;
use static_assertions::assert_impl_all;
use wgpu::TextureFormat;

use crate::caps::Caps;
use crate::color_type_table::ColorTypeTable;
use crate::device::DeviceQuery;
use crate::format_table::{ChannelFlags, ColorTypeInfo, FormatFlags, FormatInfo, FormatTable};
use crate::probe::{ProbedCaps, ResourceBindingRequirements, ShaderCaps};
use crate::{
    CapsOptions, ColorType, CompressionType, ComputePipelineDesc, DepthStencilFlags, Discardable,
    GraphicsPipelineDesc, Mipmapped, PipelineKey, RenderPassDesc, Renderable, ResourceKey,
    ResourceType, Shareable, TextureInfo,
};

/// Format every internally allocated MSAA target must render at the
/// default sample count.
const MSAA_REFERENCE_FORMAT: TextureFormat = TextureFormat::Rgba8Unorm;
const MAX_SAMPLE_COUNT: u32 = 16;

#[derive(Debug, Clone)]
pub struct WgpuCaps {
    probed: ProbedCaps,
    format_table: FormatTable,
    color_type_table: ColorTypeTable,
    default_msaa_samples: u32,
}

assert_impl_all!(WgpuCaps: Send, Sync, Caps);

impl WgpuCaps {
    pub fn new(device: &dyn DeviceQuery, options: &CapsOptions) -> Self {
        let probed = ProbedCaps::probe(device, options);
        let format_table = FormatTable::build(device);
        let color_type_table = ColorTypeTable::build(&format_table);
        let default_msaa_samples =
            resolve_msaa_samples(options.internal_msaa_sample_count, &format_table);

        tracing::debug!(
            device = ?probed.device_name,
            max_texture_size = probed.max_texture_size,
            default_msaa_samples,
            buffer_maps_are_async = probed.buffer_maps_are_async,
            storage_buffers = probed.storage_buffer_support,
            "device capabilities initialized"
        );

        Self {
            probed,
            format_table,
            color_type_table,
            default_msaa_samples,
        }
    }

    /// Scalar capabilities read from the device.
    pub fn probed(&self) -> &ProbedCaps {
        &self.probed
    }

    pub fn format_table(&self) -> &FormatTable {
        &self.format_table
    }

    pub fn format_info(&self, format: Option<TextureFormat>) -> &FormatInfo {
        self.format_table.info(format)
    }

    /// Native format backing `color_type`, or `None` when unsupported.
    pub fn preferred_format(&self, color_type: ColorType) -> Option<TextureFormat> {
        self.color_type_table.preferred_format(color_type)
    }

    pub fn is_texturable_format(&self, format: Option<TextureFormat>) -> bool {
        self.format_info(format)
            .flags
            .contains(FormatFlags::TEXTURABLE)
    }

    pub fn max_render_target_sample_count(&self, format: Option<TextureFormat>) -> u32 {
        self.format_info(format).max_render_target_sample_count()
    }

    pub fn is_renderable_format(&self, format: Option<TextureFormat>, sample_count: u32) -> bool {
        sample_count <= self.max_render_target_sample_count(format)
    }

    pub fn buffer_maps_are_async(&self) -> bool {
        self.probed.buffer_maps_are_async
    }

    pub fn allow_cpu_sync(&self) -> bool {
        self.probed.allow_cpu_sync
    }

    pub fn use_async_pipeline_creation(&self) -> bool {
        self.probed.use_async_pipeline_creation
    }

    pub fn supports_transient_attachments(&self) -> bool {
        self.probed.transient_attachment_support
    }

    pub fn supports_load_resolve_texture(&self) -> bool {
        self.probed.load_resolve_texture_support
    }

    pub fn storage_buffer_support(&self) -> bool {
        self.probed.storage_buffer_support
    }

    pub fn required_uniform_buffer_alignment(&self) -> u32 {
        self.probed.required_uniform_buffer_alignment
    }

    pub fn required_storage_buffer_alignment(&self) -> u32 {
        self.probed.required_storage_buffer_alignment
    }

    pub fn required_transfer_buffer_alignment(&self) -> u32 {
        self.probed.required_transfer_buffer_alignment
    }

    pub fn texture_data_row_bytes_alignment(&self) -> u32 {
        self.probed.texture_data_row_bytes_alignment
    }
}

/// Round the requested count down to a supported power of two, and turn
/// MSAA off if the reference format cannot render at that count.
fn resolve_msaa_samples(requested: u32, format_table: &FormatTable) -> u32 {
    let requested = requested.clamp(1, MAX_SAMPLE_COUNT);
    let samples = 1 << (31 - requested.leading_zeros());
    let max = format_table
        .info(Some(MSAA_REFERENCE_FORMAT))
        .max_render_target_sample_count();
    if samples > max {
        tracing::warn!(samples, max, "MSAA sample count not renderable, disabling MSAA");
        return 1;
    }
    samples
}

impl Caps for WgpuCaps {
    fn max_texture_size(&self) -> u32 {
        self.probed.max_texture_size
    }

    fn default_msaa_samples(&self) -> u32 {
        self.default_msaa_samples
    }

    fn shader_caps(&self) -> &ShaderCaps {
        &self.probed.shader
    }

    fn resource_binding_requirements(&self) -> &ResourceBindingRequirements {
        &self.probed.resource_binding
    }

    fn is_texturable(&self, info: &TextureInfo) -> bool {
        self.texturable(info)
    }

    fn is_renderable(&self, info: &TextureInfo) -> bool {
        self.renderable(info)
    }

    fn is_storage(&self, info: &TextureInfo) -> bool {
        self.storage_capable(info)
    }

    fn channel_mask(&self, info: &TextureInfo) -> ChannelFlags {
        info.view_format()
            .map(crate::format_table::format_channels)
            .unwrap_or_default()
    }

    fn default_sampled_texture_info(
        &self,
        color_type: ColorType,
        mipmapped: Mipmapped,
        renderable: Renderable,
    ) -> TextureInfo {
        self.sampled_texture(color_type, mipmapped, renderable)
    }

    fn texture_info_for_sampled_copy(
        &self,
        info: &TextureInfo,
        mipmapped: Mipmapped,
    ) -> TextureInfo {
        self.sampled_copy(info, mipmapped)
    }

    fn default_compressed_texture_info(
        &self,
        compression: CompressionType,
        mipmapped: Mipmapped,
    ) -> TextureInfo {
        self.compressed_texture(compression, mipmapped)
    }

    fn default_msaa_texture_info(
        &self,
        single_sampled: &TextureInfo,
        discardable: Discardable,
    ) -> TextureInfo {
        self.msaa_texture(single_sampled, discardable)
    }

    fn default_depth_stencil_texture_info(
        &self,
        flags: DepthStencilFlags,
        sample_count: u32,
    ) -> TextureInfo {
        self.depth_stencil_texture(flags, sample_count)
    }

    fn default_storage_texture_info(&self, color_type: ColorType) -> TextureInfo {
        self.storage_texture(color_type)
    }

    fn depth_attachment_dimensions(&self, info: &TextureInfo, color_dimensions: UVec2) -> UVec2 {
        textures::depth_attachment_dimensions(info, color_dimensions)
    }

    fn color_type_info(&self, color_type: ColorType, info: &TextureInfo) -> Option<&ColorTypeInfo> {
        let format = info.view_format()?;
        self.format_info(Some(format)).color_type_info(color_type)
    }

    fn supports_write_pixels(&self, info: &TextureInfo) -> bool {
        info.usage.contains(crate::TextureUsage::COPY_DST)
    }

    fn supports_read_pixels(&self, info: &TextureInfo) -> bool {
        info.usage.contains(crate::TextureUsage::COPY_SRC)
    }

    fn supported_write_pixels_color_type(
        &self,
        dst_color_type: ColorType,
        _dst_info: &TextureInfo,
        _src_color_type: ColorType,
    ) -> (ColorType, bool) {
        (dst_color_type, false)
    }

    fn supported_read_pixels_color_type(
        &self,
        src_color_type: ColorType,
        _src_info: &TextureInfo,
        _dst_color_type: ColorType,
    ) -> (ColorType, bool) {
        let format = self.preferred_format(src_color_type);
        if self.format_info(format).supports(src_color_type) {
            (src_color_type, false)
        } else {
            (ColorType::Unknown, false)
        }
    }

    fn make_graphics_pipeline_key(
        &self,
        pipeline: &GraphicsPipelineDesc,
        render_pass: &RenderPassDesc,
    ) -> PipelineKey {
        self.graphics_pipeline_key(pipeline, render_pass)
    }

    fn make_compute_pipeline_key(&self, pipeline: &ComputePipelineDesc) -> PipelineKey {
        pipeline_keys::compute_pipeline_key(pipeline)
    }

    fn build_key_for_texture(
        &self,
        dimensions: UVec2,
        info: &TextureInfo,
        resource_type: ResourceType,
        shareable: Shareable,
    ) -> ResourceKey {
        ResourceKey::texture(dimensions, info, resource_type, shareable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{bare_native_profile, browser_profile, full_native_profile};
    use crate::TextureUsage;

    #[test]
    fn msaa_request_is_rounded_to_power_of_two() {
        let table = FormatTable::build(&bare_native_profile());
        assert_eq!(resolve_msaa_samples(0, &table), 1);
        assert_eq!(resolve_msaa_samples(1, &table), 1);
        assert_eq!(resolve_msaa_samples(4, &table), 4);
        assert_eq!(resolve_msaa_samples(6, &table), 4);
        assert_eq!(resolve_msaa_samples(8, &table), 8);
        // Above the reference format's max.
        assert_eq!(resolve_msaa_samples(64, &table), 1);
    }

    #[test]
    fn caps_are_shareable_across_threads() {
        let caps = std::sync::Arc::new(WgpuCaps::new(
            &full_native_profile(),
            &CapsOptions::default(),
        ));
        let expected = caps.default_sampled_texture_info(
            ColorType::Rgba8888,
            Mipmapped::Yes,
            Renderable::Yes,
        );
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let caps = std::sync::Arc::clone(&caps);
                std::thread::spawn(move || {
                    caps.default_sampled_texture_info(
                        ColorType::Rgba8888,
                        Mipmapped::Yes,
                        Renderable::Yes,
                    )
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn preferred_formats_round_trip_through_catalog() {
        for profile in [full_native_profile(), bare_native_profile(), browser_profile()] {
            let caps = WgpuCaps::new(&profile, &CapsOptions::default());
            for ct in ColorType::ALL {
                if let Some(format) = caps.preferred_format(ct) {
                    assert!(caps.format_info(Some(format)).supports(ct), "{ct:?}");
                }
            }
        }
    }

    #[test]
    fn color_type_info_uses_view_format() {
        let caps = WgpuCaps::new(&full_native_profile(), &CapsOptions::default());
        let info = caps.default_sampled_texture_info(
            ColorType::Alpha8,
            Mipmapped::No,
            Renderable::No,
        );
        let ct_info = caps.color_type_info(ColorType::Alpha8, &info).unwrap();
        assert_eq!(ct_info.read_swizzle, crate::Swizzle::new("000r"));
        assert!(caps.color_type_info(ColorType::Rgba8888, &info).is_none());
        assert!(caps
            .color_type_info(ColorType::Alpha8, &TextureInfo::INVALID)
            .is_none());
    }

    #[test]
    fn read_pixels_color_type_falls_back_to_unknown() {
        let caps = WgpuCaps::new(&bare_native_profile(), &CapsOptions::default());
        let info = TextureInfo::INVALID;
        assert_eq!(
            caps.supported_read_pixels_color_type(ColorType::Gray8, &info, ColorType::Rgba8888),
            (ColorType::Gray8, false)
        );
        assert_eq!(
            caps.supported_read_pixels_color_type(ColorType::A16Unorm, &info, ColorType::Rgba8888),
            (ColorType::Unknown, false)
        );
        assert_eq!(
            caps.supported_write_pixels_color_type(ColorType::Bgra8888, &info, ColorType::Rgba8888),
            (ColorType::Bgra8888, false)
        );
    }

    #[test]
    fn pixel_transfer_support_follows_copy_usage() {
        let caps = WgpuCaps::new(&bare_native_profile(), &CapsOptions::default());
        let storage = caps.default_storage_texture_info(ColorType::Rgba8888);
        assert!(caps.supports_read_pixels(&storage));
        assert!(!caps.supports_write_pixels(&storage));
        let sampled = caps.default_sampled_texture_info(
            ColorType::Rgba8888,
            Mipmapped::No,
            Renderable::No,
        );
        assert!(sampled.usage.contains(TextureUsage::COPY_DST));
        assert!(caps.supports_write_pixels(&sampled));
    }

    #[test]
    fn channel_mask_follows_view_format() {
        let caps = WgpuCaps::new(&full_native_profile(), &CapsOptions::default());
        let gray = caps.default_sampled_texture_info(ColorType::Gray8, Mipmapped::No, Renderable::No);
        assert_eq!(caps.channel_mask(&gray), ChannelFlags::RED);
        assert_eq!(caps.channel_mask(&TextureInfo::INVALID), ChannelFlags::empty());
    }

    #[test]
    fn missing_limits_fall_back_to_default_size() {
        let caps = WgpuCaps::new(&browser_profile(), &CapsOptions::default());
        assert_eq!(
            caps.max_texture_size(),
            wgpu::Limits::default().max_texture_dimension_2d
        );
        assert!(caps.buffer_maps_are_async());
        assert!(!caps.allow_cpu_sync());
    }
}
