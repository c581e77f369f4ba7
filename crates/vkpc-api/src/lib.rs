//! Client-facing pipeline description for the vkpc pipeline compiler
//!
//! This crate defines the API-shaped input consumed by the translator core:
//! pipeline build descriptions, per-stage shader info with tuning fields,
//! resource mapping node trees, static descriptor values, pixel formats and
//! fixed-function state blocks. Descriptions are plain data, owned by the
//! caller and readable from YAML manifests for standalone tooling.

mod formats;
mod pipeline;
mod resources;
mod state;

pub use formats::PixelFormat;
pub use pipeline::{
    ComputePipelineDescription, DescriptionError, GfxIpVersion, GraphicsPipelineDescription,
    NggCompactMode, NggState, NggSubgroupSizingType, PipelineOptions, PipelineShaderInfo,
    ShaderHash, ShaderModuleData, ShaderStage, ShaderTuningOptions, ShadowDescriptorTableUsage,
    WaveBreakSize,
};
pub use resources::{DescriptorKind, ResourceMappingKind, ResourceMappingNode, StaticDescriptorValue};
pub use state::{
    ColorBlendState, ColorTargetState, CullModeFlags, FrontFace, InputAssemblyState,
    MAX_COLOR_TARGETS, PolygonMode, PrimitiveTopology, RasterizerState, VertexAttribute,
    VertexBinding, VertexBindingDivisor, VertexInputState, VertexStepRate, ViewportState,
};
