//! One-shot device probe
//!
//! Reads limits and optional features exactly once and turns them into
//! plain fields. Nothing here fails: a missing feature or an unavailable
//! query leaves the field at its documented default.

use crate::device::{DeviceFeature, DeviceQuery};
use crate::{CapsOptions, HostEnvironment};

/// Bytes; buffer-to-texture copies need rows padded to this.
pub const TEXTURE_DATA_ROW_BYTES_ALIGNMENT: u32 = 256;
pub const TRANSFER_BUFFER_ALIGNMENT: u32 = 4;
pub const UNIFORM_BUFFER_ALIGNMENT: u32 = 256;

/// Memory layout rules for a buffer address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    Std140,
    Std430,
}

/// How shader resources are laid out and bound on this backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceBindingRequirements {
    pub uniform_buffer_layout: Layout,
    /// WGSL packs everything outside the uniform address space as std430.
    pub storage_buffer_layout: Layout,
    pub separate_texture_and_sampler_binding: bool,
}

/// Shader features consulted when generating backend shader text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShaderCaps {
    /// WGSL has no infinities regardless of hardware.
    pub infinity_support: bool,
    pub shader_derivative_support: bool,
    pub dual_source_blending_support: bool,
    pub fb_fetch_support: bool,
}

/// Everything the probe derives from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbedCaps {
    pub device_name: Option<String>,
    pub max_texture_size: u32,
    pub required_transfer_buffer_alignment: u32,
    pub required_uniform_buffer_alignment: u32,
    pub required_storage_buffer_alignment: u32,
    pub texture_data_row_bytes_alignment: u32,
    pub resource_binding: ResourceBindingRequirements,
    pub storage_buffer_support: bool,
    pub storage_buffer_preferred: bool,
    pub draw_buffer_can_be_mapped: bool,
    pub compute_support: bool,
    pub clamp_to_border_support: bool,
    pub buffer_maps_are_async: bool,
    pub msaa_render_to_single_sampled_support: bool,
    pub transient_attachment_support: bool,
    pub load_resolve_texture_support: bool,
    pub allow_cpu_sync: bool,
    pub use_async_pipeline_creation: bool,
    pub allow_scoped_error_checks: bool,
    pub full_compressed_upload_size_must_align_to_block_dims: bool,
    pub shader: ShaderCaps,
}

impl ProbedCaps {
    pub fn probe(device: &dyn DeviceQuery, options: &CapsOptions) -> Self {
        let host = device.host();
        let native = host == HostEnvironment::Native;
        // Native extensions are invisible from the browser.
        let native_feature = |feature| native && device.has_feature(feature);

        let max_texture_size = match device.limits() {
            Some(limits) => limits.max_texture_dimension_2d,
            None => {
                let fallback = wgpu::Limits::default().max_texture_dimension_2d;
                tracing::warn!(fallback, "device limits unavailable, assuming defaults");
                fallback
            }
        };

        // Unknown backend could be D3D11, so stay pessimistic.
        let storage_buffers = device
            .backend()
            .map(|backend| backend.supports_storage_buffers())
            .unwrap_or(false);

        let mut caps = Self {
            device_name: device.adapter_name(),
            max_texture_size,
            required_transfer_buffer_alignment: TRANSFER_BUFFER_ALIGNMENT,
            required_uniform_buffer_alignment: UNIFORM_BUFFER_ALIGNMENT,
            required_storage_buffer_alignment: UNIFORM_BUFFER_ALIGNMENT,
            texture_data_row_bytes_alignment: TEXTURE_DATA_ROW_BYTES_ALIGNMENT,
            resource_binding: ResourceBindingRequirements {
                uniform_buffer_layout: Layout::Std140,
                storage_buffer_layout: Layout::Std430,
                separate_texture_and_sampler_binding: true,
            },
            storage_buffer_support: storage_buffers,
            storage_buffer_preferred: storage_buffers,
            draw_buffer_can_be_mapped: native_feature(DeviceFeature::BufferMapExtendedUsages),
            compute_support: true,
            clamp_to_border_support: false,
            buffer_maps_are_async: !native,
            msaa_render_to_single_sampled_support: native_feature(
                DeviceFeature::MsaaRenderToSingleSampled,
            ),
            transient_attachment_support: native_feature(DeviceFeature::TransientAttachments),
            load_resolve_texture_support: native_feature(DeviceFeature::LoadResolveTexture),
            allow_cpu_sync: options.allow_cpu_sync,
            use_async_pipeline_creation: options.use_async_pipeline_creation,
            allow_scoped_error_checks: true,
            full_compressed_upload_size_must_align_to_block_dims: true,
            shader: ShaderCaps {
                infinity_support: false,
                shader_derivative_support: true,
                dual_source_blending_support: native_feature(DeviceFeature::DualSourceBlending),
                fb_fetch_support: native_feature(DeviceFeature::FramebufferFetch),
            },
        };

        if !device.can_tick() {
            // Without a way to pump the device, waiting would never finish.
            // The synchronous-looking pipeline entry points are asynchronous
            // underneath and the host synchronizes on submit.
            caps.allow_cpu_sync = false;
            caps.use_async_pipeline_creation = false;
            caps.allow_scoped_error_checks = false;
        }

        caps
    }
}
