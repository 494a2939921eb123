//! Device feature and limit queries
//!
//! Capability construction never reads global state: everything it needs
//! to know about the device comes through a [`DeviceQuery`]. A live wgpu
//! device is wrapped by [`WgpuDeviceQuery`]; a [`DeviceProfile`] stands in
//! for a device that is described rather than opened.
//!
//! [`DeviceProfile`]: crate::DeviceProfile

use serde::{Deserialize, Serialize};

use crate::{BackendType, HostEnvironment};

/// Optional device features the capability tables depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceFeature {
    /// Buffers with map usage may carry vertex/index/uniform usage too.
    BufferMapExtendedUsages,
    MsaaRenderToSingleSampled,
    /// Memoryless render attachments.
    TransientAttachments,
    /// Render passes may load a resolve target by expanding it into the
    /// MSAA attachment.
    LoadResolveTexture,
    DualSourceBlending,
    FramebufferFetch,
    R8UnormStorage,
    Unorm16TextureFormats,
    TextureCompressionEtc2,
    TextureCompressionBc,
    MultiPlanarFormats,
}

impl DeviceFeature {
    pub const ALL: [DeviceFeature; 11] = [
        DeviceFeature::BufferMapExtendedUsages,
        DeviceFeature::MsaaRenderToSingleSampled,
        DeviceFeature::TransientAttachments,
        DeviceFeature::LoadResolveTexture,
        DeviceFeature::DualSourceBlending,
        DeviceFeature::FramebufferFetch,
        DeviceFeature::R8UnormStorage,
        DeviceFeature::Unorm16TextureFormats,
        DeviceFeature::TextureCompressionEtc2,
        DeviceFeature::TextureCompressionBc,
        DeviceFeature::MultiPlanarFormats,
    ];
}

/// Read-only view of a device, consulted once while capabilities are built.
///
/// A missing feature or an unavailable query is never an error; callers
/// fall back to documented defaults.
pub trait DeviceQuery {
    fn has_feature(&self, feature: DeviceFeature) -> bool;

    /// `None` when the host cannot report limits reliably.
    fn limits(&self) -> Option<wgpu::Limits>;

    /// `None` when the underlying native API is unknown.
    fn backend(&self) -> Option<BackendType>;

    fn host(&self) -> HostEnvironment;

    /// Whether the owner can pump the device and therefore block on it.
    fn can_tick(&self) -> bool;

    fn adapter_name(&self) -> Option<String> {
        None
    }
}

/// [`DeviceQuery`] over an opened wgpu device.
///
/// Passing the adapter enables backend detection and adapter-specific
/// format feature checks.
pub struct WgpuDeviceQuery<'a> {
    device: &'a wgpu::Device,
    adapter: Option<&'a wgpu::Adapter>,
}

impl<'a> WgpuDeviceQuery<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self {
            device,
            adapter: None,
        }
    }

    pub fn with_adapter(mut self, adapter: &'a wgpu::Adapter) -> Self {
        self.adapter = Some(adapter);
        self
    }

    fn supports_r8_storage(&self) -> bool {
        let Some(adapter) = self.adapter else {
            return false;
        };
        if !self
            .device
            .features()
            .contains(wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES)
        {
            return false;
        }
        adapter
            .get_texture_format_features(wgpu::TextureFormat::R8Unorm)
            .allowed_usages
            .contains(wgpu::TextureUsages::STORAGE_BINDING)
    }
}

/// wgpu feature bit answering `feature`, if wgpu exposes one.
pub fn wgpu_feature(feature: DeviceFeature) -> Option<wgpu::Features> {
    match feature {
        DeviceFeature::BufferMapExtendedUsages => Some(wgpu::Features::MAPPABLE_PRIMARY_BUFFERS),
        DeviceFeature::DualSourceBlending => Some(wgpu::Features::DUAL_SOURCE_BLENDING),
        DeviceFeature::Unorm16TextureFormats => Some(wgpu::Features::TEXTURE_FORMAT_16BIT_NORM),
        DeviceFeature::TextureCompressionEtc2 => Some(wgpu::Features::TEXTURE_COMPRESSION_ETC2),
        DeviceFeature::TextureCompressionBc => Some(wgpu::Features::TEXTURE_COMPRESSION_BC),
        DeviceFeature::MultiPlanarFormats => Some(wgpu::Features::TEXTURE_FORMAT_NV12),
        DeviceFeature::MsaaRenderToSingleSampled
        | DeviceFeature::TransientAttachments
        | DeviceFeature::LoadResolveTexture
        | DeviceFeature::FramebufferFetch
        | DeviceFeature::R8UnormStorage => None,
    }
}

impl DeviceQuery for WgpuDeviceQuery<'_> {
    fn has_feature(&self, feature: DeviceFeature) -> bool {
        if feature == DeviceFeature::R8UnormStorage {
            return self.supports_r8_storage();
        }
        wgpu_feature(feature)
            .map(|bits| self.device.features().contains(bits))
            .unwrap_or(false)
    }

    fn limits(&self) -> Option<wgpu::Limits> {
        Some(self.device.limits())
    }

    fn backend(&self) -> Option<BackendType> {
        self.adapter
            .and_then(|adapter| BackendType::from_wgpu(adapter.get_info().backend))
    }

    fn host(&self) -> HostEnvironment {
        HostEnvironment::current()
    }

    fn can_tick(&self) -> bool {
        !self.host().is_browser()
    }

    fn adapter_name(&self) -> Option<String> {
        self.adapter.map(|adapter| adapter.get_info().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_only_features_have_no_wgpu_bit() {
        assert_eq!(wgpu_feature(DeviceFeature::TransientAttachments), None);
        assert_eq!(wgpu_feature(DeviceFeature::LoadResolveTexture), None);
        assert_eq!(
            wgpu_feature(DeviceFeature::TextureCompressionBc),
            Some(wgpu::Features::TEXTURE_COMPRESSION_BC)
        );
    }

    #[test]
    fn feature_names_are_kebab_case() {
        let json = serde_json::to_string(&DeviceFeature::R8UnormStorage).unwrap();
        assert_eq!(json, "\"r8-unorm-storage\"");
    }
}
