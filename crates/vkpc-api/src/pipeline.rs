//! Pipeline build descriptions
//!
//! The top-level input of a compile: which shader stages are present, their
//! tuning options and resource mapping trees, pipeline-wide options, and the
//! fixed-function state of graphics pipelines. Descriptions can be built in
//! code or loaded from a YAML manifest.

use crate::resources::{ResourceMappingNode, StaticDescriptorValue};
use crate::state::{ColorBlendState, InputAssemblyState, RasterizerState, VertexInputState, ViewportState};
use serde::Deserialize;
use std::fmt;

/// Graphics IP version of the target GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct GfxIpVersion {
    pub major: u32,
    pub minor: u32,
    pub stepping: u32,
}

impl GfxIpVersion {
    /// Target name in the form `gfx<major><minor><stepping>`, e.g. "gfx1010"
    /// for 10.1.0. Stepping values 0xFFFA..=0xFFFF denote experimental
    /// targets and are rendered as a final hex letter, e.g. "gfx101A".
    pub fn target_name(&self) -> String {
        if self.stepping >= 0xFFFA {
            let letter = (b'A' + (self.stepping - 0xFFFA) as u8) as char;
            format!("gfx{}{}{}", self.major, self.minor, letter)
        } else {
            format!("gfx{}{}{}", self.major, self.minor, self.stepping)
        }
    }

    /// Abbreviated generation name.
    pub fn name_abbreviation(&self) -> &'static str {
        match self.major {
            6 => "SI",
            7 => "CI",
            8 => "VI",
            9 => "GFX9",
            _ => "UNKNOWN",
        }
    }
}

/// Shader stages in API numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ShaderStage {
    Vertex,
    TessControl,
    TessEval,
    Geometry,
    Fragment,
    Compute,
}

impl ShaderStage {
    /// All stages, in mask bit order.
    pub const ALL: [ShaderStage; 6] = [
        ShaderStage::Vertex,
        ShaderStage::TessControl,
        ShaderStage::TessEval,
        ShaderStage::Geometry,
        ShaderStage::Fragment,
        ShaderStage::Compute,
    ];

    /// The stage's bit in an activity mask.
    pub fn mask_bit(self) -> u32 {
        1 << self as u32
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::TessControl => "tess-control",
            ShaderStage::TessEval => "tess-eval",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Compute => "compute",
        };
        f.write_str(name)
    }
}

/// A 128-bit shader hash supplied by the client.
///
/// Both halves zero means "not supplied"; the compiler then falls back to a
/// hash derived from the shader module itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ShaderHash {
    #[serde(default)]
    pub lower: u64,
    #[serde(default)]
    pub upper: u64,
}

/// Pre-parsed shader module data attached to a stage.
///
/// The module content hash is computed when the module is first ingested,
/// outside this crate; only the value is carried here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShaderModuleData {
    /// 128-bit content hash of the module bytecode.
    pub hash: [u64; 2],
}

impl ShaderModuleData {
    /// Folds the 128-bit content hash to the 64-bit form used for shader
    /// identity when the client supplied no hash of its own.
    pub fn compact_hash(&self) -> u64 {
        self.hash[0] ^ self.hash[1]
    }
}

/// Wave break granularities for fragment shaders, in API numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum WaveBreakSize {
    #[default]
    None,
    Size8x8,
    Size16x16,
    Size32x32,
    DrawTime,
}

/// Per-shader tuning options.
///
/// Numeric limits use the external sentinel convention: 0 (and additionally
/// `u32::MAX` for the register limits) means "unset, use the global default".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShaderTuningOptions {
    /// Client-supplied shader hash; all zero when absent.
    #[serde(default)]
    pub client_hash: ShaderHash,
    #[serde(default)]
    pub trap_present: bool,
    #[serde(default)]
    pub debug_mode: bool,
    #[serde(default)]
    pub allow_re_z: bool,
    #[serde(default)]
    pub vgpr_limit: u32,
    #[serde(default)]
    pub sgpr_limit: u32,
    #[serde(default)]
    pub max_thread_groups_per_compute_unit: u32,
    #[serde(default)]
    pub wave_size: u32,
    #[serde(default)]
    pub wgp_mode: bool,
    /// When false, the global subgroup-size override is applied to the stage.
    #[serde(default)]
    pub allow_vary_wave_size: bool,
    #[serde(default)]
    pub wave_break_size: WaveBreakSize,
    #[serde(default)]
    pub enable_load_scalarizer: bool,
    #[serde(default)]
    pub scalar_threshold: u32,
    #[serde(default)]
    pub use_si_scheduler: bool,
    #[serde(default)]
    pub update_desc_in_elf: bool,
    #[serde(default)]
    pub unroll_threshold: u32,
}

/// Everything the compiler needs to know about one shader stage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineShaderInfo {
    /// Pre-parsed module data; `None` for a stage that carries no module.
    #[serde(default)]
    pub module: Option<ShaderModuleData>,
    #[serde(default)]
    pub options: ShaderTuningOptions,
    /// Top-level resource mapping nodes for the stage. Stages of one pipeline
    /// share a merged layout, so the first active stage's tree is
    /// authoritative.
    #[serde(default)]
    pub resource_nodes: Vec<ResourceMappingNode>,
    /// Static descriptor values for immutable bindings.
    #[serde(default)]
    pub static_descriptor_values: Vec<StaticDescriptorValue>,
}

/// Shadow descriptor table usage modes, in API numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ShadowDescriptorTableUsage {
    #[default]
    Auto,
    Enable,
    Disable,
}

/// Pipeline-wide options.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PipelineOptions {
    #[serde(default)]
    pub include_disassembly: bool,
    #[serde(default)]
    pub include_ir: bool,
    #[serde(default)]
    pub reconfig_workgroup_layout: bool,
    #[serde(default)]
    pub shadow_descriptor_table_usage: ShadowDescriptorTableUsage,
    #[serde(default)]
    pub shadow_descriptor_table_ptr_high: u32,
}

/// NGG subgroup sizing policies, in API numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum NggSubgroupSizingType {
    #[default]
    Auto,
    MaximumSize,
    HalfSize,
    OptimizeForVerts,
    OptimizeForPrims,
    Explicit,
}

/// NGG compaction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum NggCompactMode {
    #[default]
    Vertices,
    Subgroup,
}

/// Primitive shader (NGG) tuning state of a graphics pipeline.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NggState {
    #[serde(default)]
    pub enable_ngg: bool,
    #[serde(default)]
    pub enable_gs_use: bool,
    #[serde(default)]
    pub force_non_passthrough: bool,
    #[serde(default)]
    pub always_use_prim_shader_table: bool,
    #[serde(default)]
    pub compact_mode: NggCompactMode,
    #[serde(default)]
    pub enable_fast_launch: bool,
    #[serde(default)]
    pub enable_vertex_reuse: bool,
    #[serde(default)]
    pub enable_backface_culling: bool,
    #[serde(default)]
    pub enable_frustum_culling: bool,
    #[serde(default)]
    pub enable_box_filter_culling: bool,
    #[serde(default)]
    pub enable_sphere_culling: bool,
    #[serde(default)]
    pub enable_small_prim_filter: bool,
    #[serde(default)]
    pub enable_cull_distance_culling: bool,
    #[serde(default)]
    pub backface_exponent: u32,
    #[serde(default)]
    pub subgroup_sizing: NggSubgroupSizingType,
    #[serde(default)]
    pub verts_per_subgroup: u32,
    #[serde(default)]
    pub prims_per_subgroup: u32,
}

/// Build description of a graphics pipeline.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphicsPipelineDescription {
    #[serde(default)]
    pub options: PipelineOptions,
    #[serde(default)]
    pub vertex: Option<PipelineShaderInfo>,
    #[serde(default)]
    pub tess_control: Option<PipelineShaderInfo>,
    #[serde(default)]
    pub tess_eval: Option<PipelineShaderInfo>,
    #[serde(default)]
    pub geometry: Option<PipelineShaderInfo>,
    #[serde(default)]
    pub fragment: Option<PipelineShaderInfo>,
    #[serde(default)]
    pub vertex_input: Option<VertexInputState>,
    #[serde(default)]
    pub input_assembly: InputAssemblyState,
    #[serde(default)]
    pub viewport: ViewportState,
    #[serde(default)]
    pub rasterizer: RasterizerState,
    #[serde(default)]
    pub color_blend: ColorBlendState,
    #[serde(default)]
    pub ngg: NggState,
}

impl GraphicsPipelineDescription {
    /// The shader info of `stage`, if the description carries one.
    pub fn shader_info(&self, stage: ShaderStage) -> Option<&PipelineShaderInfo> {
        match stage {
            ShaderStage::Vertex => self.vertex.as_ref(),
            ShaderStage::TessControl => self.tess_control.as_ref(),
            ShaderStage::TessEval => self.tess_eval.as_ref(),
            ShaderStage::Geometry => self.geometry.as_ref(),
            ShaderStage::Fragment => self.fragment.as_ref(),
            ShaderStage::Compute => None,
        }
    }

    /// Bit mask of stages that carry a shader.
    pub fn stage_mask(&self) -> u32 {
        ShaderStage::ALL
            .iter()
            .filter(|stage| self.shader_info(**stage).is_some())
            .fold(0, |mask, stage| mask | stage.mask_bit())
    }

    /// Parses a description from YAML manifest content.
    pub fn from_yaml(content: &str) -> Result<Self, DescriptionError> {
        Ok(serde_norway::from_str(content)?)
    }

    /// Loads a description from a YAML manifest file.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, DescriptionError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

/// Build description of a compute pipeline.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComputePipelineDescription {
    #[serde(default)]
    pub options: PipelineOptions,
    pub compute: PipelineShaderInfo,
    /// Device index the pipeline is being built for.
    #[serde(default)]
    pub device_index: u32,
}

impl ComputePipelineDescription {
    /// Parses a description from YAML manifest content.
    pub fn from_yaml(content: &str) -> Result<Self, DescriptionError> {
        Ok(serde_norway::from_str(content)?)
    }

    /// Loads a description from a YAML manifest file.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, DescriptionError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

/// Errors from loading a pipeline description manifest.
#[derive(Debug, thiserror::Error)]
pub enum DescriptionError {
    #[error("failed to read description file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse description: {0}")]
    Parse(#[from] serde_norway::Error),
}
