//! Native texture descriptors
//!
//! A [`TextureInfo`] is either fully populated or the invalid sentinel
//! (no format). It splits the physical resource (format, samples, mips,
//! usage) from the view that is sampled or rendered through it, so that
//! one plane of a multi-planar texture can be described and validated.

use bitflags::bitflags;
use glam::UVec2;
use wgpu::{TextureAspect, TextureFormat};

bitflags! {
    /// Native texture usage bits, laid out as in WebGPU.
    ///
    /// `TRANSIENT_ATTACHMENT` and `STORAGE_ATTACHMENT` are native extensions
    /// that wgpu does not expose; they are dropped by [`TextureUsage::to_wgpu`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextureUsage: u32 {
        const COPY_SRC = 1 << 0;
        const COPY_DST = 1 << 1;
        const TEXTURE_BINDING = 1 << 2;
        const STORAGE_BINDING = 1 << 3;
        const RENDER_ATTACHMENT = 1 << 4;
        const TRANSIENT_ATTACHMENT = 1 << 5;
        const STORAGE_ATTACHMENT = 1 << 6;
    }
}

impl TextureUsage {
    pub fn to_wgpu(self) -> wgpu::TextureUsages {
        let mut out = wgpu::TextureUsages::empty();
        if self.contains(Self::COPY_SRC) {
            out |= wgpu::TextureUsages::COPY_SRC;
        }
        if self.contains(Self::COPY_DST) {
            out |= wgpu::TextureUsages::COPY_DST;
        }
        if self.contains(Self::TEXTURE_BINDING) {
            out |= wgpu::TextureUsages::TEXTURE_BINDING;
        }
        if self.contains(Self::STORAGE_BINDING) {
            out |= wgpu::TextureUsages::STORAGE_BINDING;
        }
        if self.contains(Self::RENDER_ATTACHMENT) {
            out |= wgpu::TextureUsages::RENDER_ATTACHMENT;
        }
        out
    }
}

bitflags! {
    /// Which depth/stencil aspects an attachment needs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DepthStencilFlags: u8 {
        const DEPTH = 1 << 0;
        const STENCIL = 1 << 1;
        const DEPTH_STENCIL = Self::DEPTH.bits() | Self::STENCIL.bits();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mipmapped {
    #[default]
    No,
    Yes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Renderable {
    #[default]
    No,
    Yes,
}

/// Whether an attachment's contents may be thrown away after the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Discardable {
    #[default]
    No,
    Yes,
}

/// Block compression schemes the engine can upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionType {
    None,
    Etc2Rgb8Unorm,
    Bc1Rgb8Unorm,
    Bc1Rgba8Unorm,
}

/// Expected single-plane format for each plane of the multi-planar formats
/// in the format table.
const PLANE_FORMATS: &[(TextureFormat, &[TextureFormat])] = &[(
    TextureFormat::NV12,
    &[TextureFormat::R8Unorm, TextureFormat::Rg8Unorm],
)];

/// True when `format` stores its texels across several planes.
pub fn is_multi_planar(format: TextureFormat) -> bool {
    PLANE_FORMATS.iter().any(|(f, _)| *f == format)
}

/// Single-plane format a view of `aspect` must use, or `None` when the
/// format is not multi-planar or has no such plane.
pub fn plane_format(format: TextureFormat, aspect: TextureAspect) -> Option<TextureFormat> {
    let plane = match aspect {
        TextureAspect::Plane0 => 0,
        TextureAspect::Plane1 => 1,
        TextureAspect::Plane2 => 2,
        _ => return None,
    };
    PLANE_FORMATS
        .iter()
        .find(|(f, _)| *f == format)
        .and_then(|(_, planes)| planes.get(plane).copied())
}

fn is_plane_aspect(aspect: TextureAspect) -> bool {
    matches!(
        aspect,
        TextureAspect::Plane0 | TextureAspect::Plane1 | TextureAspect::Plane2
    )
}

/// The view a texture is bound through.
///
/// `format: None` means "same as the physical format".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewSpec {
    pub aspect: TextureAspect,
    pub format: Option<TextureFormat>,
}

impl ViewSpec {
    pub const WHOLE: ViewSpec = ViewSpec {
        aspect: TextureAspect::All,
        format: None,
    };
}

impl Default for ViewSpec {
    fn default() -> Self {
        Self::WHOLE
    }
}

/// Fully described native texture, or the invalid sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureInfo {
    pub format: Option<TextureFormat>,
    pub view: ViewSpec,
    pub sample_count: u32,
    pub mipmapped: Mipmapped,
    pub usage: TextureUsage,
}

impl TextureInfo {
    /// The "unsupported" answer. Callers check [`TextureInfo::is_valid`].
    pub const INVALID: TextureInfo = TextureInfo {
        format: None,
        view: ViewSpec::WHOLE,
        sample_count: 1,
        mipmapped: Mipmapped::No,
        usage: TextureUsage::empty(),
    };

    pub fn new(
        format: TextureFormat,
        sample_count: u32,
        mipmapped: Mipmapped,
        usage: TextureUsage,
    ) -> Self {
        Self {
            format: Some(format),
            view: ViewSpec::WHOLE,
            sample_count,
            mipmapped,
            usage,
        }
    }

    /// Restrict the view to one plane, viewed as `view_format`.
    pub fn with_plane(mut self, aspect: TextureAspect, view_format: TextureFormat) -> Self {
        self.view = ViewSpec {
            aspect,
            format: Some(view_format),
        };
        self
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.format.is_some()
    }

    /// Format seen by shaders and attachments.
    #[inline]
    pub fn view_format(&self) -> Option<TextureFormat> {
        self.view.format.or(self.format)
    }

    #[inline]
    pub fn aspect(&self) -> TextureAspect {
        self.view.aspect
    }

    /// Checks the view against the physical format.
    ///
    /// A plane aspect is only allowed on a multi-planar format and its view
    /// format must be that plane's format. Non-planar aspects on a planar
    /// format, and plane aspects on a plain format, need no extra checks.
    pub fn is_view_consistent(&self) -> bool {
        let Some(format) = self.format else {
            return false;
        };
        if !is_multi_planar(format) || !is_plane_aspect(self.view.aspect) {
            return true;
        }
        match plane_format(format, self.view.aspect) {
            Some(expected) => self.view_format() == Some(expected),
            None => false,
        }
    }

    /// Build the wgpu descriptor for a texture of `dimensions`.
    ///
    /// Returns `None` for the invalid sentinel. Plane views are selected by
    /// aspect at view creation, so no extra view formats are declared.
    pub fn to_wgpu_descriptor<'a>(
        &self,
        dimensions: UVec2,
        label: Option<&'a str>,
    ) -> Option<wgpu::TextureDescriptor<'a>> {
        let format = self.format?;
        let mip_level_count = match self.mipmapped {
            Mipmapped::Yes => 32 - dimensions.max_element().max(1).leading_zeros(),
            Mipmapped::No => 1,
        };
        Some(wgpu::TextureDescriptor {
            label,
            size: wgpu::Extent3d {
                width: dimensions.x,
                height: dimensions.y,
                depth_or_array_layers: 1,
            },
            mip_level_count,
            sample_count: self.sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: self.usage.to_wgpu(),
            view_formats: &[],
        })
    }
}

impl Default for TextureInfo {
    fn default() -> Self {
        Self::INVALID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_invalid() {
        let info = TextureInfo::default();
        assert!(!info.is_valid());
        assert_eq!(info.view_format(), None);
        assert!(info.usage.is_empty());
    }

    #[test]
    fn view_format_falls_back_to_physical_format() {
        let info = TextureInfo::new(
            TextureFormat::Rgba8Unorm,
            1,
            Mipmapped::No,
            TextureUsage::TEXTURE_BINDING,
        );
        assert_eq!(info.view_format(), Some(TextureFormat::Rgba8Unorm));
    }

    #[test]
    fn nv12_plane_views_must_match_plane_format() {
        let nv12 = TextureInfo::new(
            TextureFormat::NV12,
            1,
            Mipmapped::No,
            TextureUsage::TEXTURE_BINDING,
        );
        assert!(nv12.is_view_consistent());

        let luma = nv12.with_plane(TextureAspect::Plane0, TextureFormat::R8Unorm);
        let chroma = nv12.with_plane(TextureAspect::Plane1, TextureFormat::Rg8Unorm);
        assert!(luma.is_view_consistent());
        assert!(chroma.is_view_consistent());

        let bad_luma = nv12.with_plane(TextureAspect::Plane0, TextureFormat::Rg8Unorm);
        let bad_chroma = nv12.with_plane(TextureAspect::Plane1, TextureFormat::R8Unorm);
        let no_third_plane = nv12.with_plane(TextureAspect::Plane2, TextureFormat::R8Unorm);
        assert!(!bad_luma.is_view_consistent());
        assert!(!bad_chroma.is_view_consistent());
        assert!(!no_third_plane.is_view_consistent());
    }

    #[test]
    fn usage_conversion_drops_native_only_bits() {
        let usage = TextureUsage::RENDER_ATTACHMENT | TextureUsage::TRANSIENT_ATTACHMENT;
        assert_eq!(usage.to_wgpu(), wgpu::TextureUsages::RENDER_ATTACHMENT);
    }

    #[test]
    fn wgpu_descriptor_counts_mips() {
        let info = TextureInfo::new(
            TextureFormat::Rgba8Unorm,
            1,
            Mipmapped::Yes,
            TextureUsage::TEXTURE_BINDING | TextureUsage::COPY_DST,
        );
        let desc = info
            .to_wgpu_descriptor(UVec2::new(256, 64), Some("atlas"))
            .unwrap();
        assert_eq!(desc.mip_level_count, 9);
        assert_eq!(desc.size.width, 256);
        assert_eq!(desc.format, TextureFormat::Rgba8Unorm);

        assert!(TextureInfo::INVALID
            .to_wgpu_descriptor(UVec2::new(1, 1), None)
            .is_none());
    }
}
