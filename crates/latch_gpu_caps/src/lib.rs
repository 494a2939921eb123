//! Latch GPU Capabilities
//!
//! Answers what the renderer may do on one WebGPU device:
//! - Texture descriptors for portable color types
//! - Texturable/renderable/storage checks per format
//! - Pipeline and resource cache keys
//! - Device probing from a live wgpu device or a JSON profile

pub mod backend;
pub mod caps;
pub mod color_type;
pub mod color_type_table;
pub mod device;
pub mod error;
pub mod format_table;
pub mod keys;
pub mod options;
pub mod probe;
pub mod profile;
pub mod render_pass;
pub mod swizzle;
pub mod texture_info;
pub mod wgpu_caps;

#[cfg(test)]
mod test_support;

pub use backend::{BackendType, HostEnvironment};
pub use caps::Caps;
pub use color_type::ColorType;
pub use device::{DeviceFeature, DeviceQuery, WgpuDeviceQuery};
pub use error::CapsError;
pub use keys::{PipelineKey, RenderPassKey, ResourceKey, ResourceType, Shareable};
pub use options::CapsOptions;
pub use profile::DeviceProfile;
pub use render_pass::{
    AttachmentDesc, ComputePipelineDesc, GraphicsPipelineDesc, LoadOp, RenderPassDesc, StoreOp,
};
pub use swizzle::Swizzle;
pub use texture_info::{
    CompressionType, DepthStencilFlags, Discardable, Mipmapped, Renderable, TextureInfo,
    TextureUsage, ViewSpec,
};
pub use wgpu_caps::WgpuCaps;

pub use glam;
pub use wgpu;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn caps_build_from_json_profile() {
        let profile = DeviceProfile::from_json(
            r#"{
                "name": "integrated",
                "backend": "metal",
                "features": ["transient-attachments", "r8-unorm-storage"]
            }"#,
        )
        .unwrap();
        let caps = WgpuCaps::new(&profile, &CapsOptions::default());

        let storage = caps.default_storage_texture_info(ColorType::R8Unorm);
        assert!(caps.is_storage(&storage));
        let depth = caps.default_depth_stencil_texture_info(DepthStencilFlags::DEPTH, 1);
        assert!(depth.usage.contains(TextureUsage::TRANSIENT_ATTACHMENT));
        assert_eq!(caps.probed().device_name.as_deref(), Some("integrated"));
    }
}
