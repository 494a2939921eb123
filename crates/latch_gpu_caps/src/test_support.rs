//! Device profiles shared by the unit tests

use crate::device::DeviceFeature;
use crate::profile::ProfileLimits;
use crate::{BackendType, DeviceProfile, HostEnvironment};

/// Native Vulkan device with every optional feature.
pub(crate) fn full_native_profile() -> DeviceProfile {
    DeviceProfile {
        name: "test-native".to_string(),
        backend: Some(BackendType::Vulkan),
        host: HostEnvironment::Native,
        features: DeviceFeature::ALL.into_iter().collect(),
        limits: Some(ProfileLimits {
            max_texture_dimension_2d: Some(16384),
            ..Default::default()
        }),
        can_tick: true,
    }
}

/// Native Vulkan device with no optional features and default limits.
pub(crate) fn bare_native_profile() -> DeviceProfile {
    DeviceProfile {
        name: "test-bare".to_string(),
        backend: Some(BackendType::Vulkan),
        ..Default::default()
    }
}

/// Browser host: unknown backend, no reliable limits, no way to tick.
pub(crate) fn browser_profile() -> DeviceProfile {
    DeviceProfile {
        name: "test-browser".to_string(),
        backend: None,
        host: HostEnvironment::Browser,
        features: Default::default(),
        limits: None,
        can_tick: false,
    }
}
