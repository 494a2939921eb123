use thiserror::Error;

/// Errors surfaced at the edges of the capability layer.
///
/// Unsupported texture requests are not errors: they come back as an
/// invalid [`TextureInfo`](crate::TextureInfo).
#[derive(Debug, Error)]
pub enum CapsError {
    #[error("failed to parse device profile: {0}")]
    Profile(#[from] serde_json::Error),

    #[error("invalid swizzle '{swizzle}': expected four of 'r', 'g', 'b', 'a', '0', '1'")]
    InvalidSwizzle { swizzle: String },

    #[error("unsupported sample count {count}: expected 1, 2, 4, 8 or 16")]
    UnsupportedSampleCount { count: u32 },
}
