//! Per-compile pipeline context
//!
//! A [`PipelineContext`] wraps one pipeline description together with the
//! target GPU version and the externally computed identity hashes, and drives
//! the whole translation: option merging, resource node flattening and the
//! graphics state blocks, pushed into the middle end's [`ir::Pipeline`] in
//! one synchronous pass. The context borrows the description and holds no
//! state of its own beyond the hashes, so one context serves exactly one
//! compile.

use crate::options::{merge_pipeline_options, merge_shader_options};
use crate::resources::build_user_data_nodes;
use crate::state::{build_color_export_state, build_graphics_state, build_vertex_input_descriptions};
use crate::tuning::CompilerTuning;
use vkpc_api as api;
use vkpc_ir as ir;

/// First GPU generation with primitive shader (NGG) support.
const FIRST_NGG_MAJOR: u32 = 10;

/// The description a context was built from.
#[derive(Debug, Clone, Copy)]
pub enum PipelineBuildInfo<'a> {
    Graphics(&'a api::GraphicsPipelineDescription),
    Compute(&'a api::ComputePipelineDescription),
}

/// Translation context for one pipeline compile.
#[derive(Debug, Clone)]
pub struct PipelineContext<'a> {
    gfx_ip: api::GfxIpVersion,
    /// Identity hash of the whole pipeline, computed by the caller.
    pipeline_hash: u64,
    /// Hash used for cache lookups, computed by the caller.
    cache_hash: u64,
    build_info: PipelineBuildInfo<'a>,
}

impl<'a> PipelineContext<'a> {
    pub fn new(
        gfx_ip: api::GfxIpVersion,
        pipeline_hash: u64,
        cache_hash: u64,
        build_info: PipelineBuildInfo<'a>,
    ) -> Self {
        PipelineContext { gfx_ip, pipeline_hash, cache_hash, build_info }
    }

    pub fn gfx_ip(&self) -> api::GfxIpVersion {
        self.gfx_ip
    }

    pub fn is_graphics(&self) -> bool {
        matches!(self.build_info, PipelineBuildInfo::Graphics(_))
    }

    fn pipeline_options(&self) -> &api::PipelineOptions {
        match self.build_info {
            PipelineBuildInfo::Graphics(description) => &description.options,
            PipelineBuildInfo::Compute(description) => &description.options,
        }
    }

    /// Mask of active stages, in API bit numbering.
    pub fn stage_mask(&self) -> u32 {
        match self.build_info {
            PipelineBuildInfo::Graphics(description) => description.stage_mask(),
            PipelineBuildInfo::Compute(_) => api::ShaderStage::Compute.mask_bit(),
        }
    }

    /// The shader info of `stage`, if the stage is active.
    pub fn shader_info(&self, stage: api::ShaderStage) -> Option<&'a api::PipelineShaderInfo> {
        match self.build_info {
            PipelineBuildInfo::Graphics(description) => description.shader_info(stage),
            PipelineBuildInfo::Compute(description) => match stage {
                api::ShaderStage::Compute => Some(&description.compute),
                _ => None,
            },
        }
    }

    /// The first active stage's shader info, in API stage order.
    ///
    /// Stages of one pipeline share a merged resource layout, so the first
    /// active stage's mapping tree is authoritative for the whole pipeline.
    fn first_active_shader_info(&self) -> Option<&'a api::PipelineShaderInfo> {
        api::ShaderStage::ALL.iter().find_map(|stage| self.shader_info(*stage))
    }

    /// The 128-bit identity hash of one stage's shader.
    ///
    /// The client hash is used when both halves are nonzero; otherwise the
    /// hash falls back to the compacted module content hash in the lower
    /// half.
    pub fn shader_hash(&self, stage: api::ShaderStage) -> [u64; 2] {
        let Some(info) = self.shader_info(stage) else {
            return [0, 0];
        };
        let client = info.options.client_hash;
        if client.lower != 0 && client.upper != 0 {
            [client.lower, client.upper]
        } else if let Some(module) = &info.module {
            [module.compact_hash(), 0]
        } else {
            [0, 0]
        }
    }

    /// Pushes the whole translated description into the middle-end pipeline.
    pub fn apply_to_pipeline(&self, pipeline: &mut ir::Pipeline) {
        let tuning = CompilerTuning::get();

        // The API and middle-end stage bit numberings differ, so the mask is
        // translated bit by bit rather than copied.
        let stage_mask = self.stage_mask();
        let mut ir_stage_mask = 0;
        for stage in api::ShaderStage::ALL {
            if stage_mask & stage.mask_bit() != 0 {
                ir_stage_mask |= ir_shader_stage(stage).mask_bit();
            }
        }
        pipeline.set_shader_stage_mask(ir_stage_mask);

        let ngg = match self.build_info {
            PipelineBuildInfo::Graphics(description) if self.gfx_ip.major >= FIRST_NGG_MAJOR => {
                Some(&description.ngg)
            }
            _ => None,
        };
        pipeline.set_options(merge_pipeline_options(
            self.pipeline_hash,
            self.cache_hash,
            self.pipeline_options(),
            ngg,
            tuning,
        ));

        for stage in api::ShaderStage::ALL {
            let Some(info) = self.shader_info(stage) else {
                continue;
            };
            let options = merge_shader_options(self.shader_hash(stage), &info.options, tuning);
            pipeline.set_shader_options(ir_shader_stage(stage), options);
        }

        if let Some(info) = self.first_active_shader_info() {
            let nodes = build_user_data_nodes(&info.resource_nodes, &info.static_descriptor_values);
            tracing::debug!(
                gpu = self.gfx_ip.target_name(),
                top_level = nodes.top_level().len(),
                total = nodes.len(),
                "flattened user data nodes"
            );
            pipeline.set_user_data_nodes(nodes);
        }

        match self.build_info {
            PipelineBuildInfo::Graphics(description) => {
                if let Some(vertex_input) = &description.vertex_input {
                    pipeline.set_vertex_input_descriptions(build_vertex_input_descriptions(vertex_input));
                }

                let (formats, state) = build_color_export_state(&description.color_blend);
                pipeline.set_color_export_state(formats, state);

                let (input_assembly, viewport, rasterizer) = build_graphics_state(
                    &description.input_assembly,
                    &description.viewport,
                    &description.rasterizer,
                );
                pipeline.set_graphics_state(input_assembly, viewport, rasterizer);
                pipeline.set_device_index(description.input_assembly.device_index);
            }
            PipelineBuildInfo::Compute(description) => {
                pipeline.set_device_index(description.device_index);
            }
        }

        tracing::debug!(
            graphics = self.is_graphics(),
            stage_mask = ir_stage_mask,
            "pipeline state translated"
        );
    }
}

fn ir_shader_stage(stage: api::ShaderStage) -> ir::ShaderStage {
    match stage {
        api::ShaderStage::Vertex => ir::ShaderStage::Vertex,
        api::ShaderStage::TessControl => ir::ShaderStage::TessControl,
        api::ShaderStage::TessEval => ir::ShaderStage::TessEval,
        api::ShaderStage::Geometry => ir::ShaderStage::Geometry,
        api::ShaderStage::Fragment => ir::ShaderStage::Fragment,
        api::ShaderStage::Compute => ir::ShaderStage::Compute,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_info(lower: u64, upper: u64) -> api::PipelineShaderInfo {
        api::PipelineShaderInfo {
            options: api::ShaderTuningOptions {
                client_hash: api::ShaderHash { lower, upper },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn stage_mask_is_renumbered_for_the_middle_end() {
        let description = api::GraphicsPipelineDescription {
            vertex: Some(api::PipelineShaderInfo::default()),
            fragment: Some(api::PipelineShaderInfo::default()),
            ..Default::default()
        };
        let context =
            PipelineContext::new(api::GfxIpVersion::default(), 0, 0, PipelineBuildInfo::Graphics(&description));

        let mut pipeline = ir::Pipeline::new();
        context.apply_to_pipeline(&mut pipeline);

        // API has vertex at bit 0; the middle end has compute there.
        assert_eq!(
            pipeline.shader_stage_mask(),
            ir::ShaderStage::Vertex.mask_bit() | ir::ShaderStage::Fragment.mask_bit()
        );
    }

    #[test]
    fn compute_pipelines_activate_the_compute_stage() {
        let description = api::ComputePipelineDescription {
            compute: api::PipelineShaderInfo::default(),
            device_index: 2,
            ..Default::default()
        };
        let context =
            PipelineContext::new(api::GfxIpVersion::default(), 0, 0, PipelineBuildInfo::Compute(&description));
        assert!(!context.is_graphics());

        let mut pipeline = ir::Pipeline::new();
        context.apply_to_pipeline(&mut pipeline);
        assert_eq!(pipeline.shader_stage_mask(), ir::ShaderStage::Compute.mask_bit());
        assert_eq!(pipeline.device_index(), 2);
        assert!(pipeline.shader_options(ir::ShaderStage::Compute).is_some());
        assert!(pipeline.shader_options(ir::ShaderStage::Vertex).is_none());
    }

    #[test]
    fn shader_hash_prefers_a_full_client_hash() {
        let mut description = api::GraphicsPipelineDescription {
            vertex: Some(stage_info(0xAAAA, 0xBBBB)),
            fragment: Some(stage_info(0xCCCC, 0)),
            ..Default::default()
        };
        description.fragment.as_mut().unwrap().module =
            Some(api::ShaderModuleData { hash: [0x10, 0x01] });

        let context =
            PipelineContext::new(api::GfxIpVersion::default(), 0, 0, PipelineBuildInfo::Graphics(&description));

        // Both halves nonzero: taken verbatim.
        assert_eq!(context.shader_hash(api::ShaderStage::Vertex), [0xAAAA, 0xBBBB]);
        // Half-zero client hash falls back to the compacted module hash.
        assert_eq!(context.shader_hash(api::ShaderStage::Fragment), [0x10 ^ 0x01, 0]);
        // Inactive stage.
        assert_eq!(context.shader_hash(api::ShaderStage::Geometry), [0, 0]);
    }

    #[test]
    fn ngg_applies_only_to_graphics_on_supported_targets() {
        let description = api::GraphicsPipelineDescription {
            vertex: Some(api::PipelineShaderInfo::default()),
            ngg: api::NggState { enable_ngg: false, ..Default::default() },
            ..Default::default()
        };

        let gfx9 = api::GfxIpVersion { major: 9, minor: 0, stepping: 0 };
        let context = PipelineContext::new(gfx9, 0, 0, PipelineBuildInfo::Graphics(&description));
        let mut pipeline = ir::Pipeline::new();
        context.apply_to_pipeline(&mut pipeline);
        assert_eq!(pipeline.options().ngg_flags, ir::NggFlags::empty());

        let gfx10 = api::GfxIpVersion { major: 10, minor: 1, stepping: 0 };
        let context = PipelineContext::new(gfx10, 0, 0, PipelineBuildInfo::Graphics(&description));
        let mut pipeline = ir::Pipeline::new();
        context.apply_to_pipeline(&mut pipeline);
        assert_eq!(pipeline.options().ngg_flags, ir::NggFlags::DISABLE);
    }

    #[test]
    fn user_data_nodes_come_from_the_first_active_stage() {
        let mut fragment = api::PipelineShaderInfo::default();
        fragment.resource_nodes =
            vec![api::ResourceMappingNode::descriptor(api::DescriptorKind::Buffer, 0, 0, 0, 4)];
        let mut vertex = api::PipelineShaderInfo::default();
        vertex.resource_nodes = vec![
            api::ResourceMappingNode::descriptor(api::DescriptorKind::Buffer, 0, 0, 0, 4),
            api::ResourceMappingNode::descriptor(api::DescriptorKind::Buffer, 0, 1, 4, 4),
        ];

        let description = api::GraphicsPipelineDescription {
            vertex: Some(vertex),
            fragment: Some(fragment),
            ..Default::default()
        };
        let context =
            PipelineContext::new(api::GfxIpVersion::default(), 0, 0, PipelineBuildInfo::Graphics(&description));

        let mut pipeline = ir::Pipeline::new();
        context.apply_to_pipeline(&mut pipeline);
        // The vertex stage is first in API stage order, so its two-node tree
        // wins over the fragment stage's single node.
        assert_eq!(pipeline.user_data_nodes().top_level().len(), 2);
    }
}
