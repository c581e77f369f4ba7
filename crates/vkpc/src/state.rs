//! Fixed-function state translation
//!
//! Three small, independent translators for the graphics-only state blocks:
//! vertex input layout, color export targets, and the rasterizer and input
//! assembly records. All of them share one failure policy with the rest of
//! the crate: a description element that cannot be translated (unknown
//! binding, unsupported format) is dropped, never an error.

use crate::formats::{FormatUse, map_pixel_format};
use vkpc_api as api;
use vkpc_ir as ir;

#[derive(Clone, Copy)]
struct BindingSlot {
    stride: u32,
    input_rate: ir::VertexInputRate,
}

/// Translates the vertex input layout into per-attribute descriptions.
///
/// Bindings are gathered into a table indexed by binding number, sized to the
/// largest index seen; a gap in the numbering is a hole attributes cannot
/// reference. An attribute naming a missing binding, or carrying a format the
/// hardware cannot fetch, is skipped.
pub(crate) fn build_vertex_input_descriptions(
    vertex_input: &api::VertexInputState,
) -> Vec<ir::VertexInputDescription> {
    // Gather the bindings.
    let mut slots: Vec<Option<BindingSlot>> = Vec::new();
    for binding in &vertex_input.bindings {
        let index = binding.binding as usize;
        if index >= slots.len() {
            slots.resize(index + 1, None);
        }
        let input_rate = match binding.step_rate {
            api::VertexStepRate::Vertex => ir::VertexInputRate::Vertex,
            api::VertexStepRate::Instance => ir::VertexInputRate::Instance(1),
        };
        slots[index] = Some(BindingSlot { stride: binding.stride, input_rate });
    }

    // Apply the optional per-binding instance divisors. A divisor for an
    // out-of-range binding, or for one that steps per vertex, is ignored.
    if let Some(divisors) = &vertex_input.divisors {
        for divisor in divisors {
            let Some(Some(slot)) = slots.get_mut(divisor.binding as usize) else {
                continue;
            };
            if let ir::VertexInputRate::Instance(_) = slot.input_rate {
                slot.input_rate = ir::VertexInputRate::Instance(divisor.divisor);
            }
        }
    }

    // Gather the vertex inputs.
    let mut descriptions = Vec::with_capacity(vertex_input.attributes.len());
    for attribute in &vertex_input.attributes {
        let Some(Some(slot)) = slots.get(attribute.binding as usize) else {
            continue;
        };

        let (dfmt, nfmt) = map_pixel_format(attribute.format, FormatUse::VertexInput);
        if dfmt == ir::BufDataFormat::Invalid {
            continue;
        }

        descriptions.push(ir::VertexInputDescription {
            location: attribute.location,
            binding: attribute.binding,
            offset: attribute.offset,
            stride: slot.stride,
            dfmt,
            nfmt,
            input_rate: slot.input_rate,
        });
    }
    descriptions
}

/// Translates the color blend state into export formats plus the two
/// pipeline-wide flags.
///
/// The format vector is only as long as the last defined target slot;
/// undefined slots before it hold a default (invalid) entry.
pub(crate) fn build_color_export_state(
    color_blend: &api::ColorBlendState,
) -> (Vec<ir::ColorExportFormat>, ir::ColorExportState) {
    let state = ir::ColorExportState {
        alpha_to_coverage_enable: color_blend.alpha_to_coverage_enable,
        dual_source_blend_enable: color_blend.dual_source_blend_enable,
    };

    let mut formats: Vec<ir::ColorExportFormat> = Vec::new();
    for (target_index, target) in color_blend.targets.iter().enumerate() {
        if target.format == api::PixelFormat::Undefined {
            continue;
        }
        let (dfmt, nfmt) = map_pixel_format(target.format, FormatUse::ColorExport);
        formats.resize(target_index + 1, ir::ColorExportFormat::default());
        formats[target_index] = ir::ColorExportFormat {
            dfmt,
            nfmt,
            blend_enable: target.blend_enable,
            blend_src_alpha_to_color: target.blend_src_alpha_to_color,
        };
    }

    (formats, state)
}

fn primitive_topology(topology: api::PrimitiveTopology) -> ir::PrimitiveTopology {
    match topology {
        api::PrimitiveTopology::PointList => ir::PrimitiveTopology::PointList,
        api::PrimitiveTopology::LineList => ir::PrimitiveTopology::LineList,
        api::PrimitiveTopology::LineStrip => ir::PrimitiveTopology::LineStrip,
        api::PrimitiveTopology::TriangleList => ir::PrimitiveTopology::TriangleList,
        api::PrimitiveTopology::TriangleStrip => ir::PrimitiveTopology::TriangleStrip,
        api::PrimitiveTopology::TriangleFan => ir::PrimitiveTopology::TriangleFan,
        api::PrimitiveTopology::LineListWithAdjacency => ir::PrimitiveTopology::LineListWithAdjacency,
        api::PrimitiveTopology::LineStripWithAdjacency => ir::PrimitiveTopology::LineStripWithAdjacency,
        api::PrimitiveTopology::TriangleListWithAdjacency => ir::PrimitiveTopology::TriangleListWithAdjacency,
        api::PrimitiveTopology::TriangleStripWithAdjacency => ir::PrimitiveTopology::TriangleStripWithAdjacency,
        api::PrimitiveTopology::PatchList => ir::PrimitiveTopology::PatchList,
    }
}

fn polygon_mode(mode: api::PolygonMode) -> ir::PolygonMode {
    match mode {
        api::PolygonMode::Fill => ir::PolygonMode::Fill,
        api::PolygonMode::Line => ir::PolygonMode::Line,
        api::PolygonMode::Point => ir::PolygonMode::Point,
    }
}

/// Translates the input assembly, viewport and rasterizer records.
pub(crate) fn build_graphics_state(
    input_assembly: &api::InputAssemblyState,
    viewport: &api::ViewportState,
    rasterizer: &api::RasterizerState,
) -> (ir::InputAssemblyState, ir::ViewportState, ir::RasterizerState) {
    let input_assembly_state = ir::InputAssemblyState {
        topology: primitive_topology(input_assembly.topology),
        patch_control_points: input_assembly.patch_control_points,
        disable_vertex_reuse: input_assembly.disable_vertex_reuse,
        switch_winding: input_assembly.switch_winding,
        enable_multi_view: input_assembly.enable_multi_view,
    };

    let viewport_state = ir::ViewportState { depth_clip_enable: viewport.depth_clip_enable };

    let rasterizer_state = ir::RasterizerState {
        rasterizer_discard_enable: rasterizer.rasterizer_discard_enable,
        inner_coverage: rasterizer.inner_coverage,
        per_sample_shading: rasterizer.per_sample_shading,
        num_samples: rasterizer.num_samples,
        sample_pattern_idx: rasterizer.sample_pattern_idx,
        usr_clip_plane_mask: rasterizer.usr_clip_plane_mask,
        polygon_mode: polygon_mode(rasterizer.polygon_mode),
        cull_mode: ir::CullModeFlags::from_bits_truncate(rasterizer.cull_mode.bits()),
        front_face_clockwise: rasterizer.front_face != api::FrontFace::CounterClockwise,
        depth_bias_enable: rasterizer.depth_bias_enable,
    };

    (input_assembly_state, viewport_state, rasterizer_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{PixelFormat, VertexAttribute, VertexBinding, VertexBindingDivisor, VertexStepRate};

    fn binding(index: u32, stride: u32, step_rate: VertexStepRate) -> VertexBinding {
        VertexBinding { binding: index, stride, step_rate }
    }

    fn attribute(location: u32, binding: u32, offset: u32, format: PixelFormat) -> VertexAttribute {
        VertexAttribute { location, binding, offset, format }
    }

    #[test]
    fn attributes_resolve_their_binding() {
        let vertex_input = api::VertexInputState {
            bindings: vec![
                binding(0, 16, VertexStepRate::Vertex),
                binding(1, 8, VertexStepRate::Instance),
            ],
            attributes: vec![
                attribute(0, 0, 0, PixelFormat::R32G32B32A32Sfloat),
                attribute(1, 1, 0, PixelFormat::R16G16Sfloat),
            ],
            divisors: None,
        };

        let descriptions = build_vertex_input_descriptions(&vertex_input);
        assert_eq!(descriptions.len(), 2);
        assert_eq!(descriptions[0].stride, 16);
        assert_eq!(descriptions[0].dfmt, ir::BufDataFormat::Fmt32_32_32_32);
        assert_eq!(descriptions[0].input_rate, ir::VertexInputRate::Vertex);
        assert_eq!(descriptions[1].stride, 8);
        assert_eq!(descriptions[1].input_rate, ir::VertexInputRate::Instance(1));
    }

    #[test]
    fn attribute_naming_a_missing_binding_is_dropped() {
        let vertex_input = api::VertexInputState {
            bindings: vec![
                binding(0, 4, VertexStepRate::Vertex),
                binding(1, 4, VertexStepRate::Vertex),
                binding(2, 4, VertexStepRate::Vertex),
            ],
            attributes: vec![
                attribute(0, 5, 0, PixelFormat::R32Sfloat),
                attribute(1, 1, 0, PixelFormat::R32Sfloat),
            ],
            divisors: None,
        };

        let descriptions = build_vertex_input_descriptions(&vertex_input);
        assert_eq!(descriptions.len(), 1);
        assert_eq!(descriptions[0].location, 1);
    }

    #[test]
    fn attribute_in_a_binding_gap_is_dropped() {
        // Binding 1 is never declared, so the slot between 0 and 2 is a hole.
        let vertex_input = api::VertexInputState {
            bindings: vec![
                binding(0, 4, VertexStepRate::Vertex),
                binding(2, 4, VertexStepRate::Vertex),
            ],
            attributes: vec![attribute(0, 1, 0, PixelFormat::R32Sfloat)],
            divisors: None,
        };
        assert!(build_vertex_input_descriptions(&vertex_input).is_empty());
    }

    #[test]
    fn unsupported_attribute_format_is_dropped() {
        let vertex_input = api::VertexInputState {
            bindings: vec![binding(0, 4, VertexStepRate::Vertex)],
            attributes: vec![
                // sRGB formats cannot be fetched as vertex data.
                attribute(0, 0, 0, PixelFormat::R8G8B8A8Srgb),
                attribute(1, 0, 0, PixelFormat::R8G8B8A8Unorm),
            ],
            divisors: None,
        };

        let descriptions = build_vertex_input_descriptions(&vertex_input);
        assert_eq!(descriptions.len(), 1);
        assert_eq!(descriptions[0].location, 1);
    }

    #[test]
    fn divisors_override_instance_bindings_only() {
        let vertex_input = api::VertexInputState {
            bindings: vec![
                binding(0, 4, VertexStepRate::Vertex),
                binding(1, 4, VertexStepRate::Instance),
            ],
            attributes: vec![
                attribute(0, 0, 0, PixelFormat::R32Sfloat),
                attribute(1, 1, 0, PixelFormat::R32Sfloat),
            ],
            divisors: Some(vec![
                VertexBindingDivisor { binding: 0, divisor: 4 },
                VertexBindingDivisor { binding: 1, divisor: 4 },
                // Out of range, ignored.
                VertexBindingDivisor { binding: 9, divisor: 2 },
            ]),
        };

        let descriptions = build_vertex_input_descriptions(&vertex_input);
        assert_eq!(descriptions[0].input_rate, ir::VertexInputRate::Vertex);
        assert_eq!(descriptions[1].input_rate, ir::VertexInputRate::Instance(4));
    }

    #[test]
    fn undefined_trailing_target_shortens_the_format_array() {
        let mut color_blend = api::ColorBlendState::default();
        color_blend.targets[0].format = PixelFormat::R8G8B8A8Unorm;
        color_blend.targets[0].blend_enable = true;
        color_blend.targets[2].format = PixelFormat::R16G16B16A16Sfloat;
        // Slots 3..8 stay undefined and must not appear at all.

        let (formats, _) = build_color_export_state(&color_blend);
        assert_eq!(formats.len(), 3);
        assert_eq!(formats[0].dfmt, ir::BufDataFormat::Fmt8_8_8_8);
        assert!(formats[0].blend_enable);
        // The undefined slot in the middle holds a default entry.
        assert_eq!(formats[1].dfmt, ir::BufDataFormat::Invalid);
        assert_eq!(formats[2].dfmt, ir::BufDataFormat::Fmt16_16_16_16);
        assert_eq!(formats[2].nfmt, ir::BufNumFormat::Float);
    }

    #[test]
    fn all_undefined_targets_produce_an_empty_format_array() {
        let color_blend = api::ColorBlendState {
            alpha_to_coverage_enable: true,
            ..Default::default()
        };
        let (formats, state) = build_color_export_state(&color_blend);
        assert!(formats.is_empty());
        assert!(state.alpha_to_coverage_enable);
        assert!(!state.dual_source_blend_enable);
    }

    #[test]
    fn rasterizer_winding_derives_from_front_face() {
        let counter_clockwise = api::RasterizerState::default();
        let (_, _, rasterizer) = build_graphics_state(
            &api::InputAssemblyState::default(),
            &api::ViewportState::default(),
            &counter_clockwise,
        );
        assert!(!rasterizer.front_face_clockwise);

        let clockwise = api::RasterizerState {
            front_face: api::FrontFace::Clockwise,
            cull_mode: api::CullModeFlags::BACK,
            num_samples: 4,
            ..Default::default()
        };
        let (_, _, rasterizer) = build_graphics_state(
            &api::InputAssemblyState::default(),
            &api::ViewportState::default(),
            &clockwise,
        );
        assert!(rasterizer.front_face_clockwise);
        assert_eq!(rasterizer.cull_mode, ir::CullModeFlags::BACK);
        assert_eq!(rasterizer.num_samples, 4);
    }

    #[test]
    fn input_assembly_fields_copy_through() {
        let input_assembly = api::InputAssemblyState {
            topology: api::PrimitiveTopology::PatchList,
            patch_control_points: 4,
            enable_multi_view: true,
            ..Default::default()
        };
        let (ia, vp, _) = build_graphics_state(
            &input_assembly,
            &api::ViewportState { depth_clip_enable: true },
            &api::RasterizerState::default(),
        );
        assert_eq!(ia.topology, ir::PrimitiveTopology::PatchList);
        assert_eq!(ia.patch_control_points, 4);
        assert!(ia.enable_multi_view);
        assert!(vp.depth_clip_enable);
    }
}
