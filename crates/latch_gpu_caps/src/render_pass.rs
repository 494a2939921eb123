//! Render pass and pipeline descriptions
//!
//! Only the parts that decide pipeline compatibility are modelled here;
//! building the native objects happens elsewhere.

use crate::{Swizzle, TextureInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadOp {
    Load,
    #[default]
    Clear,
    Discard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StoreOp {
    #[default]
    Store,
    Discard,
}

/// One attachment slot. An invalid texture info means the slot is unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttachmentDesc {
    pub texture_info: TextureInfo,
    pub load_op: LoadOp,
    pub store_op: StoreOp,
}

impl AttachmentDesc {
    pub fn new(texture_info: TextureInfo, load_op: LoadOp, store_op: StoreOp) -> Self {
        Self {
            texture_info,
            load_op,
            store_op,
        }
    }

    pub fn is_used(&self) -> bool {
        self.texture_info.is_valid()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RenderPassDesc {
    pub color_attachment: AttachmentDesc,
    pub color_resolve_attachment: AttachmentDesc,
    pub depth_stencil_attachment: AttachmentDesc,
    /// Applied to fragment output before it reaches the color attachment.
    pub write_swizzle: Swizzle,
}

impl RenderPassDesc {
    /// True when the pass loads its resolve target's contents back into
    /// the MSAA color attachment.
    pub fn loads_resolve_attachment(&self) -> bool {
        self.color_resolve_attachment.is_used()
            && self.color_resolve_attachment.load_op == LoadOp::Load
    }
}

/// Identity of a graphics pipeline, independent of the pass it runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphicsPipelineDesc {
    pub render_step_id: u32,
    pub paint_params_id: u32,
}

/// Identity of a compute pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComputePipelineDesc {
    pub compute_step_id: u32,
    /// Baked into the shader text; not part of the pipeline key.
    pub workgroup_size: [u32; 3],
}
