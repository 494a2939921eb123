//! Described devices
//!
//! A [`DeviceProfile`] answers device queries from data instead of a live
//! device. Profiles are loaded from JSON so capability tables can be
//! evaluated for hardware that is not present.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::device::{DeviceFeature, DeviceQuery};
use crate::{BackendType, CapsError, HostEnvironment};

/// Device limits a profile may pin. Unset fields keep wgpu's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileLimits {
    pub max_texture_dimension_2d: Option<u32>,
    pub min_uniform_buffer_offset_alignment: Option<u32>,
    pub min_storage_buffer_offset_alignment: Option<u32>,
}

impl ProfileLimits {
    pub fn to_wgpu(self) -> wgpu::Limits {
        let mut limits = wgpu::Limits::default();
        if let Some(v) = self.max_texture_dimension_2d {
            limits.max_texture_dimension_2d = v;
        }
        if let Some(v) = self.min_uniform_buffer_offset_alignment {
            limits.min_uniform_buffer_offset_alignment = v;
        }
        if let Some(v) = self.min_storage_buffer_offset_alignment {
            limits.min_storage_buffer_offset_alignment = v;
        }
        limits
    }
}

/// A device described by data.
///
/// ```ignore
/// {
///   "name": "desktop-vulkan",
///   "backend": "vulkan",
///   "features": ["texture-compression-bc", "unorm16-texture-formats"],
///   "limits": { "max_texture_dimension_2d": 16384 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    pub name: String,
    pub backend: Option<BackendType>,
    pub host: HostEnvironment,
    pub features: BTreeSet<DeviceFeature>,
    /// `None` models a host whose limit query is unreliable.
    pub limits: Option<ProfileLimits>,
    pub can_tick: bool,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            backend: None,
            host: HostEnvironment::Native,
            features: BTreeSet::new(),
            limits: Some(ProfileLimits::default()),
            can_tick: true,
        }
    }
}

impl DeviceProfile {
    pub fn from_json(json: &str) -> Result<Self, CapsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CapsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_feature(mut self, feature: DeviceFeature) -> Self {
        self.features.insert(feature);
        self
    }

    pub fn without_feature(mut self, feature: DeviceFeature) -> Self {
        self.features.remove(&feature);
        self
    }
}

impl DeviceQuery for DeviceProfile {
    fn has_feature(&self, feature: DeviceFeature) -> bool {
        self.features.contains(&feature)
    }

    fn limits(&self) -> Option<wgpu::Limits> {
        self.limits.map(ProfileLimits::to_wgpu)
    }

    fn backend(&self) -> Option<BackendType> {
        self.backend
    }

    fn host(&self) -> HostEnvironment {
        self.host
    }

    fn can_tick(&self) -> bool {
        self.can_tick
    }

    fn adapter_name(&self) -> Option<String> {
        (!self.name.is_empty()).then(|| self.name.clone())
    }
}
