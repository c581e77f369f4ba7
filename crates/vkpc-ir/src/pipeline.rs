//! The middle-end pipeline object
//!
//! The front end configures code generation by pushing state into a
//! [`Pipeline`]. Setters mirror the order of a translation pass; getters
//! expose the accumulated state to the code generator and to tests.

use crate::options::{Options, ShaderOptions};
use crate::resources::ResourceNodeTable;
use crate::state::{
    ColorExportFormat, ColorExportState, InputAssemblyState, RasterizerState,
    VertexInputDescription, ViewportState,
};

/// Shader stages in middle-end numbering.
///
/// Compute leads because the middle end treats compute-only pipelines as the
/// degenerate single-stage case; the graphics stages follow in pipeline
/// order. This ordering differs from the API numbering on purpose, so stage
/// masks must be translated rather than copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Compute,
    Vertex,
    TessControl,
    TessEval,
    Geometry,
    Fragment,
}

impl ShaderStage {
    /// Number of stages.
    pub const COUNT: usize = 6;

    /// The stage's bit in a middle-end activity mask.
    pub fn mask_bit(self) -> u32 {
        1 << self as u32
    }

    /// The stage for a middle-end index, used when iterating masks.
    pub fn from_index(index: usize) -> Option<ShaderStage> {
        match index {
            0 => Some(ShaderStage::Compute),
            1 => Some(ShaderStage::Vertex),
            2 => Some(ShaderStage::TessControl),
            3 => Some(ShaderStage::TessEval),
            4 => Some(ShaderStage::Geometry),
            5 => Some(ShaderStage::Fragment),
            _ => None,
        }
    }
}

/// Accumulates the configuration of one pipeline compile.
#[derive(Debug, Default)]
pub struct Pipeline {
    stage_mask: u32,
    options: Options,
    shader_options: [Option<ShaderOptions>; ShaderStage::COUNT],
    user_data_nodes: ResourceNodeTable,
    vertex_inputs: Vec<VertexInputDescription>,
    color_export_formats: Vec<ColorExportFormat>,
    color_export_state: ColorExportState,
    input_assembly: InputAssemblyState,
    viewport: ViewportState,
    rasterizer: RasterizerState,
    device_index: u32,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline::default()
    }

    /// Sets the mask of active stages, in middle-end bit numbering.
    pub fn set_shader_stage_mask(&mut self, mask: u32) {
        self.stage_mask = mask;
    }

    pub fn shader_stage_mask(&self) -> u32 {
        self.stage_mask
    }

    /// Sets the pipeline-wide options.
    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Sets the merged options of one shader stage.
    pub fn set_shader_options(&mut self, stage: ShaderStage, options: ShaderOptions) {
        self.shader_options[stage as usize] = Some(options);
    }

    pub fn shader_options(&self, stage: ShaderStage) -> Option<&ShaderOptions> {
        self.shader_options[stage as usize].as_ref()
    }

    /// Sets the flattened user data node table.
    pub fn set_user_data_nodes(&mut self, nodes: ResourceNodeTable) {
        self.user_data_nodes = nodes;
    }

    pub fn user_data_nodes(&self) -> &ResourceNodeTable {
        &self.user_data_nodes
    }

    /// Sets the vertex inputs of a graphics pipeline.
    pub fn set_vertex_input_descriptions(&mut self, inputs: Vec<VertexInputDescription>) {
        self.vertex_inputs = inputs;
    }

    pub fn vertex_input_descriptions(&self) -> &[VertexInputDescription] {
        &self.vertex_inputs
    }

    /// Sets the color export formats and pipeline-wide export state.
    ///
    /// `formats` is indexed by target slot and only extends to the last
    /// exported slot; trailing unused slots are absent.
    pub fn set_color_export_state(&mut self, formats: Vec<ColorExportFormat>, state: ColorExportState) {
        self.color_export_formats = formats;
        self.color_export_state = state;
    }

    pub fn color_export_formats(&self) -> &[ColorExportFormat] {
        &self.color_export_formats
    }

    pub fn color_export_state(&self) -> &ColorExportState {
        &self.color_export_state
    }

    /// Sets the fixed-function graphics state blocks.
    pub fn set_graphics_state(
        &mut self,
        input_assembly: InputAssemblyState,
        viewport: ViewportState,
        rasterizer: RasterizerState,
    ) {
        self.input_assembly = input_assembly;
        self.viewport = viewport;
        self.rasterizer = rasterizer;
    }

    pub fn input_assembly_state(&self) -> &InputAssemblyState {
        &self.input_assembly
    }

    pub fn viewport_state(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn rasterizer_state(&self) -> &RasterizerState {
        &self.rasterizer
    }

    /// Sets the device index the pipeline is built for.
    pub fn set_device_index(&mut self, device_index: u32) {
        self.device_index = device_index;
    }

    pub fn device_index(&self) -> u32 {
        self.device_index
    }
}
