//! Fixed-function state records, middle-end numbering

use bitflags::bitflags;

/// Buffer data formats understood by the middle end.
///
/// Names follow the per-channel bit widths of the layout; `Bgr`-suffixed
/// variants are the channel-swapped forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufDataFormat {
    #[default]
    Invalid,
    Fmt4_4,
    Fmt4_4_4_4,
    Fmt4_4_4_4_Bgra,
    Fmt5_6_5,
    Fmt5_6_5_Bgr,
    Fmt5_6_5_1,
    Fmt5_6_5_1_Bgra,
    Fmt1_5_6_5,
    Fmt8,
    Fmt8_8,
    Fmt8_8_8,
    Fmt8_8_8_Bgr,
    Fmt8_8_8_8,
    Fmt8_8_8_8_Bgra,
    Fmt2_10_10_10,
    Fmt2_10_10_10_Bgra,
    Fmt16,
    Fmt16_16,
    Fmt16_16_16_16,
    Fmt32,
    Fmt32_32,
    Fmt32_32_32,
    Fmt32_32_32_32,
    Fmt64,
    Fmt64_64,
    Fmt64_64_64,
    Fmt64_64_64_64,
    Fmt10_11_11,
    Fmt5_9_9_9,
}

/// Buffer numeric formats understood by the middle end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufNumFormat {
    #[default]
    Unorm,
    Snorm,
    Uscaled,
    Sscaled,
    Uint,
    Sint,
    Float,
    Srgb,
}

/// Step rate of a vertex input, with the instance divisor made explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexInputRate {
    /// Fetch per vertex.
    Vertex,
    /// Fetch per instance, advancing once every `divisor` instances.
    Instance(u32),
}

impl Default for VertexInputRate {
    fn default() -> Self {
        VertexInputRate::Vertex
    }
}

/// One vertex input consumed by the vertex shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexInputDescription {
    pub location: u32,
    pub binding: u32,
    pub offset: u32,
    pub stride: u32,
    pub dfmt: BufDataFormat,
    pub nfmt: BufNumFormat,
    pub input_rate: VertexInputRate,
}

/// Number of color export slots the hardware exposes.
pub const MAX_COLOR_TARGETS: usize = 8;

/// Export format of one color target.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorExportFormat {
    pub dfmt: BufDataFormat,
    pub nfmt: BufNumFormat,
    pub blend_enable: bool,
    pub blend_src_alpha_to_color: bool,
}

/// Pipeline-wide color export state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorExportState {
    pub alpha_to_coverage_enable: bool,
    pub dual_source_blend_enable: bool,
}

/// Primitive topologies, middle-end numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
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

/// Input assembly state.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputAssemblyState {
    pub topology: PrimitiveTopology,
    pub patch_control_points: u32,
    pub disable_vertex_reuse: bool,
    pub switch_winding: bool,
    pub enable_multi_view: bool,
}

/// Viewport state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportState {
    pub depth_clip_enable: bool,
}

/// Polygon rasterization modes, middle-end numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolygonMode {
    #[default]
    Fill,
    Line,
    Point,
}

bitflags! {
    /// Face culling flags, middle-end numbering.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CullModeFlags: u32 {
        const FRONT = 0x1;
        const BACK = 0x2;
    }
}

/// Rasterizer state.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterizerState {
    pub rasterizer_discard_enable: bool,
    pub inner_coverage: bool,
    pub per_sample_shading: bool,
    pub num_samples: u32,
    pub sample_pattern_idx: u32,
    pub usr_clip_plane_mask: u8,
    pub polygon_mode: PolygonMode,
    pub cull_mode: CullModeFlags,
    pub front_face_clockwise: bool,
    pub depth_bias_enable: bool,
}
