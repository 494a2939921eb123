//! Pipeline cache keys

use super::WgpuCaps;
use crate::{ComputePipelineDesc, GraphicsPipelineDesc, PipelineKey, RenderPassDesc, RenderPassKey};

impl WgpuCaps {
    /// Pack the parts of `render_pass` a pipeline has to be compiled
    /// against. The load-resolve bit is only set on devices that can load
    /// a resolve target, other devices emulate the load outside the
    /// pipeline.
    pub fn render_pass_key_for_pipeline(&self, render_pass: &RenderPassDesc) -> RenderPassKey {
        let color = &render_pass.color_attachment.texture_info;
        let depth_stencil = &render_pass.depth_stencil_attachment.texture_info;
        let loads_resolve =
            self.supports_load_resolve_texture() && render_pass.loads_resolve_attachment();

        RenderPassKey::pack(
            color.view_format(),
            color.sample_count,
            loads_resolve,
            depth_stencil.view_format(),
            depth_stencil.sample_count,
        )
    }

    pub(super) fn graphics_pipeline_key(
        &self,
        pipeline: &GraphicsPipelineDesc,
        render_pass: &RenderPassDesc,
    ) -> PipelineKey {
        let pass = self.render_pass_key_for_pipeline(render_pass);
        PipelineKey::Graphics([
            pipeline.render_step_id,
            pipeline.paint_params_id,
            pass.depth_stencil_half(),
            pass.color_half(),
            render_pass.write_swizzle.as_key() as u32,
        ])
    }
}

/// Workgroup size is compiled into the shader module and not keyed, so
/// one compute step must always be dispatched with the same size.
pub(super) fn compute_pipeline_key(pipeline: &ComputePipelineDesc) -> PipelineKey {
    PipelineKey::Compute([pipeline.compute_step_id])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::Caps;
    use crate::device::DeviceFeature;
    use crate::test_support::full_native_profile;
    use crate::{
        AttachmentDesc, CapsOptions, ColorType, DepthStencilFlags, Discardable, LoadOp,
        Mipmapped, Renderable, StoreOp, Swizzle,
    };

    fn msaa_pass(caps: &WgpuCaps, resolve_load: LoadOp) -> RenderPassDesc {
        let resolve =
            caps.default_sampled_texture_info(ColorType::Rgba8888, Mipmapped::No, Renderable::Yes);
        let color = caps.default_msaa_texture_info(&resolve, Discardable::Yes);
        let depth = caps.default_depth_stencil_texture_info(
            DepthStencilFlags::DEPTH_STENCIL,
            caps.default_msaa_samples(),
        );
        RenderPassDesc {
            color_attachment: AttachmentDesc::new(color, LoadOp::Clear, StoreOp::Discard),
            color_resolve_attachment: AttachmentDesc::new(resolve, resolve_load, StoreOp::Store),
            depth_stencil_attachment: AttachmentDesc::new(depth, LoadOp::Clear, StoreOp::Discard),
            write_swizzle: Swizzle::RGBA,
        }
    }

    fn caps() -> WgpuCaps {
        WgpuCaps::new(&full_native_profile(), &CapsOptions::default())
    }

    const STEP: GraphicsPipelineDesc = GraphicsPipelineDesc {
        render_step_id: 3,
        paint_params_id: 11,
    };

    #[test]
    fn render_pass_key_is_stable() {
        let caps = caps();
        let a = caps.render_pass_key_for_pipeline(&msaa_pass(&caps, LoadOp::Clear));
        let b = caps.render_pass_key_for_pipeline(&msaa_pass(&caps, LoadOp::Clear));
        assert_eq!(a, b);
        assert_eq!(
            caps.make_graphics_pipeline_key(&STEP, &msaa_pass(&caps, LoadOp::Clear)),
            caps.make_graphics_pipeline_key(&STEP, &msaa_pass(&caps, LoadOp::Clear))
        );
    }

    #[test]
    fn load_resolve_changes_only_lowest_color_bit() {
        let caps = caps();
        let cleared = caps.render_pass_key_for_pipeline(&msaa_pass(&caps, LoadOp::Clear));
        let loaded = caps.render_pass_key_for_pipeline(&msaa_pass(&caps, LoadOp::Load));
        assert_eq!(cleared.depth_stencil_half(), loaded.depth_stencil_half());
        assert_eq!(cleared.color_half() ^ loaded.color_half(), 1);
    }

    #[test]
    fn load_resolve_ignored_without_device_support() {
        let caps = WgpuCaps::new(
            &full_native_profile().without_feature(DeviceFeature::LoadResolveTexture),
            &CapsOptions::default(),
        );
        let cleared = caps.render_pass_key_for_pipeline(&msaa_pass(&caps, LoadOp::Clear));
        let loaded = caps.render_pass_key_for_pipeline(&msaa_pass(&caps, LoadOp::Load));
        assert_eq!(cleared, loaded);
    }

    #[test]
    fn graphics_key_layout() {
        let caps = caps();
        let mut pass = msaa_pass(&caps, LoadOp::Load);
        pass.write_swizzle = Swizzle::new("a000");
        let rp = caps.render_pass_key_for_pipeline(&pass);
        let key = caps.make_graphics_pipeline_key(&STEP, &pass);
        assert_eq!(
            key.data(),
            &[
                3,
                11,
                rp.depth_stencil_half(),
                rp.color_half(),
                Swizzle::new("a000").as_key() as u32
            ]
        );
    }

    #[test]
    fn write_swizzle_separates_graphics_keys() {
        let caps = caps();
        let plain = msaa_pass(&caps, LoadOp::Clear);
        let mut swizzled = plain;
        swizzled.write_swizzle = Swizzle::BGRA;
        assert_ne!(
            caps.make_graphics_pipeline_key(&STEP, &plain),
            caps.make_graphics_pipeline_key(&STEP, &swizzled)
        );
    }

    #[test]
    fn compute_keys_ignore_workgroup_size() {
        let caps = caps();
        let small = ComputePipelineDesc {
            compute_step_id: 5,
            workgroup_size: [8, 8, 1],
        };
        let large = ComputePipelineDesc {
            workgroup_size: [64, 1, 1],
            ..small
        };
        assert_eq!(
            caps.make_compute_pipeline_key(&small),
            caps.make_compute_pipeline_key(&large)
        );
        assert_eq!(caps.make_compute_pipeline_key(&small).data(), &[5]);
    }
}
