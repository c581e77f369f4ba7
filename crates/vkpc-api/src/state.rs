//! Fixed-function state blocks of a graphics pipeline description

use crate::PixelFormat;
use bitflags::bitflags;
use serde::{Deserialize, Deserializer};

/// Step rate of a vertex input binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum VertexStepRate {
    /// Advance once per vertex.
    #[default]
    Vertex,
    /// Advance once per instance.
    Instance,
}

/// One vertex buffer binding.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VertexBinding {
    /// Binding index referenced by attributes.
    pub binding: u32,
    /// Byte stride between consecutive elements.
    pub stride: u32,
    /// Per-vertex or per-instance stepping.
    #[serde(default)]
    pub step_rate: VertexStepRate,
}

/// One vertex attribute.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VertexAttribute {
    /// Shader input location.
    pub location: u32,
    /// Binding index the attribute reads from.
    pub binding: u32,
    /// Byte offset within the binding's element.
    pub offset: u32,
    /// Attribute data format.
    pub format: PixelFormat,
}

/// Optional instance divisor override for one binding.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VertexBindingDivisor {
    pub binding: u32,
    pub divisor: u32,
}

/// Vertex input layout of a graphics pipeline.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VertexInputState {
    pub bindings: Vec<VertexBinding>,
    pub attributes: Vec<VertexAttribute>,
    /// Per-binding instance divisors, when the divisor extension is in use.
    #[serde(default)]
    pub divisors: Option<Vec<VertexBindingDivisor>>,
}

/// Blend configuration of one color target slot.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ColorTargetState {
    /// Format of the attachment, `Undefined` when the slot is unused.
    #[serde(default)]
    pub format: PixelFormat,
    #[serde(default)]
    pub blend_enable: bool,
    /// True when source alpha participates in the color blend (dual source).
    #[serde(default)]
    pub blend_src_alpha_to_color: bool,
}

impl Default for ColorTargetState {
    fn default() -> Self {
        ColorTargetState {
            format: PixelFormat::Undefined,
            blend_enable: false,
            blend_src_alpha_to_color: false,
        }
    }
}

/// Number of color target slots in a pipeline description.
pub const MAX_COLOR_TARGETS: usize = 8;

/// Color blend state across all target slots.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColorBlendState {
    #[serde(default)]
    pub alpha_to_coverage_enable: bool,
    #[serde(default)]
    pub dual_source_blend_enable: bool,
    #[serde(default)]
    pub targets: [ColorTargetState; MAX_COLOR_TARGETS],
}

/// Primitive topologies, in API numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PrimitiveTopology {
    PointList,
    LineList,
    LineStrip,
    #[default]
    TriangleList,
    TriangleStrip,
    TriangleFan,
    LineListWithAdjacency,
    LineStripWithAdjacency,
    TriangleListWithAdjacency,
    TriangleStripWithAdjacency,
    PatchList,
}

/// Input assembly state plus the device index of the build.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct InputAssemblyState {
    #[serde(default)]
    pub topology: PrimitiveTopology,
    #[serde(default)]
    pub patch_control_points: u32,
    /// Device index the pipeline is being built for.
    #[serde(default)]
    pub device_index: u32,
    #[serde(default)]
    pub disable_vertex_reuse: bool,
    #[serde(default)]
    pub switch_winding: bool,
    #[serde(default)]
    pub enable_multi_view: bool,
}

/// Viewport state.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ViewportState {
    #[serde(default)]
    pub depth_clip_enable: bool,
}

/// Polygon rasterization modes, in API numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PolygonMode {
    #[default]
    Fill,
    Line,
    Point,
}

bitflags! {
    /// Face culling flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CullModeFlags: u32 {
        const FRONT = 0x1;
        const BACK = 0x2;
    }
}

impl<'de> Deserialize<'de> for CullModeFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Manifests spell cull modes numerically, matching the API flag word.
        let bits = u32::deserialize(deserializer)?;
        Ok(CullModeFlags::from_bits_truncate(bits))
    }
}

/// Winding order that counts as front facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum FrontFace {
    #[default]
    CounterClockwise,
    Clockwise,
}

/// Rasterizer state.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RasterizerState {
    #[serde(default)]
    pub rasterizer_discard_enable: bool,
    #[serde(default)]
    pub inner_coverage: bool,
    #[serde(default)]
    pub per_sample_shading: bool,
    #[serde(default)]
    pub num_samples: u32,
    #[serde(default)]
    pub sample_pattern_idx: u32,
    #[serde(default)]
    pub usr_clip_plane_mask: u8,
    #[serde(default)]
    pub polygon_mode: PolygonMode,
    #[serde(default)]
    pub cull_mode: CullModeFlags,
    #[serde(default)]
    pub front_face: FrontFace,
    #[serde(default)]
    pub depth_bias_enable: bool,
}
