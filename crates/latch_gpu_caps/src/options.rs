//! Runtime options supplied by the owning context

use serde::{Deserialize, Serialize};

/// Context-level knobs that shape the capability object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapsOptions {
    /// Sample count used for internally allocated MSAA targets. 1 disables
    /// MSAA.
    pub internal_msaa_sample_count: u32,
    /// Whether the context may wait on the GPU from the CPU.
    pub allow_cpu_sync: bool,
    pub use_async_pipeline_creation: bool,
}

impl Default for CapsOptions {
    fn default() -> Self {
        Self {
            internal_msaa_sample_count: 4,
            allow_cpu_sync: true,
            use_async_pipeline_creation: true,
        }
    }
}

impl CapsOptions {
    pub fn without_msaa() -> Self {
        Self {
            internal_msaa_sample_count: 1,
            ..Self::default()
        }
    }
}
