//! Middle-end configuration surface of the vkpc pipeline compiler
//!
//! The code-generation middle end is configured through the [`Pipeline`]
//! object defined here: the front end pushes merged option records, the
//! flattened resource node table, vertex input descriptions and
//! fixed-function state into it before invoking code generation. All types
//! in this crate use the middle end's own numbering, which is deliberately
//! decoupled from the API numbering of the description crate.

mod options;
mod pipeline;
mod resources;
mod state;

pub use options::{NggFlags, NggSubgroupSizing, Options, ShaderOptions, ShadowDescriptorTableUsage, WaveBreak};
pub use pipeline::{Pipeline, ShaderStage};
pub use resources::{
    DescriptorType, ImmutableElement, ImmutableValue, NodeRange, ResourceNode, ResourceNodeKind,
    ResourceNodeTable,
};
pub use state::{
    BufDataFormat, BufNumFormat, ColorExportFormat, ColorExportState, CullModeFlags,
    InputAssemblyState, MAX_COLOR_TARGETS, PolygonMode, PrimitiveTopology, RasterizerState,
    VertexInputDescription, VertexInputRate, ViewportState,
};
