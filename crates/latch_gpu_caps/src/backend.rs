//! Backend identification
//!
//! The capability probe only needs a coarse idea of which native API sits
//! underneath WebGPU, and whether we are running inside a browser.

use serde::{Deserialize, Serialize};

/// Native graphics API backing the WebGPU device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendType {
    /// Metal (macOS, iOS)
    Metal,
    /// DirectX 11 (Windows)
    DirectX11,
    /// DirectX 12 (Windows)
    DirectX12,
    /// Vulkan (cross-platform)
    Vulkan,
    /// OpenGL / OpenGL ES
    OpenGL,
    /// Software or null device
    Software,
}

impl BackendType {
    /// Map a wgpu backend onto our coarse classification.
    ///
    /// Returns `None` for the browser backend: the page does not tell us
    /// which native API the browser picked.
    pub fn from_wgpu(backend: wgpu::Backend) -> Option<Self> {
        match backend {
            wgpu::Backend::Vulkan => Some(Self::Vulkan),
            wgpu::Backend::Metal => Some(Self::Metal),
            wgpu::Backend::Dx12 => Some(Self::DirectX12),
            wgpu::Backend::Gl => Some(Self::OpenGL),
            wgpu::Backend::Empty => Some(Self::Software),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    /// SSBOs trip FXC loop unrolling on D3D11.
    pub fn supports_storage_buffers(self) -> bool {
        self != Self::DirectX11
    }
}

/// Where the device lives.
///
/// A browser host cannot block on the GPU, maps buffers asynchronously and
/// does not expose the native extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostEnvironment {
    #[default]
    Native,
    Browser,
}

impl HostEnvironment {
    /// The host this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Browser
        } else {
            Self::Native
        }
    }

    pub fn is_browser(self) -> bool {
        self == Self::Browser
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_backend_is_unknown() {
        assert_eq!(BackendType::from_wgpu(wgpu::Backend::BrowserWebGpu), None);
        assert_eq!(
            BackendType::from_wgpu(wgpu::Backend::Dx12),
            Some(BackendType::DirectX12)
        );
    }

    #[test]
    fn only_d3d11_lacks_storage_buffers() {
        assert!(!BackendType::DirectX11.supports_storage_buffers());
        assert!(BackendType::Vulkan.supports_storage_buffers());
        assert!(BackendType::Metal.supports_storage_buffers());
    }
}
