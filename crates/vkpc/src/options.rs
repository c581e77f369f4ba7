//! Option merge engine
//!
//! Resolves layered configuration into the middle end's option records: one
//! pipeline-wide [`ir::Options`] and one [`ir::ShaderOptions`] per active
//! stage. Sources, in priority order: explicit per-shader fields, then the
//! process-wide [`CompilerTuning`] defaults. A per-shader numeric field left
//! at its unset sentinel (0, and additionally `u32::MAX` for the register
//! limits) falls back to the tuning default.
//!
//! The API and middle-end enumerations for wave break, NGG subgroup sizing
//! and shadow table usage are parallel by contract; the conversions below are
//! exhaustive matches so a divergence fails to compile instead of silently
//! renumbering.

use crate::tuning::{CompilerTuning, MAX_SCALAR_THRESHOLD};
use vkpc_api as api;
use vkpc_ir as ir;

pub(crate) fn wave_break(size: api::WaveBreakSize) -> ir::WaveBreak {
    match size {
        api::WaveBreakSize::None => ir::WaveBreak::None,
        api::WaveBreakSize::Size8x8 => ir::WaveBreak::Size8x8,
        api::WaveBreakSize::Size16x16 => ir::WaveBreak::Size16x16,
        api::WaveBreakSize::Size32x32 => ir::WaveBreak::Size32x32,
        api::WaveBreakSize::DrawTime => ir::WaveBreak::DrawTime,
    }
}

pub(crate) fn ngg_subgroup_sizing(sizing: api::NggSubgroupSizingType) -> ir::NggSubgroupSizing {
    match sizing {
        api::NggSubgroupSizingType::Auto => ir::NggSubgroupSizing::Auto,
        api::NggSubgroupSizingType::MaximumSize => ir::NggSubgroupSizing::MaximumSize,
        api::NggSubgroupSizingType::HalfSize => ir::NggSubgroupSizing::HalfSize,
        api::NggSubgroupSizingType::OptimizeForVerts => ir::NggSubgroupSizing::OptimizeForVerts,
        api::NggSubgroupSizingType::OptimizeForPrims => ir::NggSubgroupSizing::OptimizeForPrims,
        api::NggSubgroupSizingType::Explicit => ir::NggSubgroupSizing::Explicit,
    }
}

pub(crate) fn shadow_descriptor_table_usage(
    usage: api::ShadowDescriptorTableUsage,
) -> ir::ShadowDescriptorTableUsage {
    match usage {
        api::ShadowDescriptorTableUsage::Auto => ir::ShadowDescriptorTableUsage::Auto,
        api::ShadowDescriptorTableUsage::Enable => ir::ShadowDescriptorTableUsage::Enable,
        api::ShadowDescriptorTableUsage::Disable => ir::ShadowDescriptorTableUsage::Disable,
    }
}

/// A register limit explicitly set by the client. Both 0 and `u32::MAX` mean
/// "unset".
fn explicit_register_limit(value: u32) -> Option<u32> {
    if value != 0 && value != u32::MAX { Some(value) } else { None }
}

/// A numeric field where only 0 means "unset".
fn explicit_nonzero(value: u32) -> Option<u32> {
    if value != 0 { Some(value) } else { None }
}

/// Builds the pipeline-wide option record.
///
/// `ngg` is the pipeline's NGG state when NGG applies, i.e. for a graphics
/// pipeline on a generation that has primitive shaders; `None` leaves every
/// NGG field untouched. When NGG applies but is disabled, only the disable
/// flag is set and the remaining NGG fields stay at their defaults.
pub(crate) fn merge_pipeline_options(
    pipeline_hash: u64,
    cache_hash: u64,
    options: &api::PipelineOptions,
    ngg: Option<&api::NggState>,
    tuning: &CompilerTuning,
) -> ir::Options {
    let mut merged = ir::Options {
        hash: [pipeline_hash, cache_hash],
        include_disassembly: tuning.include_disassembly || options.include_disassembly,
        include_ir: tuning.include_ir || options.include_ir,
        reconfig_workgroup_layout: options.reconfig_workgroup_layout,
        shadow_descriptor_table_usage: shadow_descriptor_table_usage(options.shadow_descriptor_table_usage),
        shadow_descriptor_table_ptr_high: options.shadow_descriptor_table_ptr_high,
        ..ir::Options::default()
    };

    if let Some(ngg) = ngg {
        if !ngg.enable_ngg {
            merged.ngg_flags |= ir::NggFlags::DISABLE;
        } else {
            let mut flags = ir::NggFlags::empty();
            flags.set(ir::NggFlags::ENABLE_GS_USE, ngg.enable_gs_use);
            flags.set(ir::NggFlags::FORCE_NON_PASSTHROUGH, ngg.force_non_passthrough);
            flags.set(
                ir::NggFlags::DONT_ALWAYS_USE_PRIM_SHADER_TABLE,
                !ngg.always_use_prim_shader_table,
            );
            flags.set(
                ir::NggFlags::COMPACT_SUBGROUP,
                ngg.compact_mode == api::NggCompactMode::Subgroup,
            );
            flags.set(ir::NggFlags::ENABLE_FAST_LAUNCH, ngg.enable_fast_launch);
            flags.set(ir::NggFlags::ENABLE_VERTEX_REUSE, ngg.enable_vertex_reuse);
            flags.set(ir::NggFlags::ENABLE_BACKFACE_CULLING, ngg.enable_backface_culling);
            flags.set(ir::NggFlags::ENABLE_FRUSTUM_CULLING, ngg.enable_frustum_culling);
            flags.set(ir::NggFlags::ENABLE_BOX_FILTER_CULLING, ngg.enable_box_filter_culling);
            flags.set(ir::NggFlags::ENABLE_SPHERE_CULLING, ngg.enable_sphere_culling);
            flags.set(ir::NggFlags::ENABLE_SMALL_PRIM_FILTER, ngg.enable_small_prim_filter);
            flags.set(
                ir::NggFlags::ENABLE_CULL_DISTANCE_CULLING,
                ngg.enable_cull_distance_culling,
            );
            merged.ngg_flags = flags;
            merged.ngg_backface_exponent = ngg.backface_exponent;
            merged.ngg_subgroup_sizing = ngg_subgroup_sizing(ngg.subgroup_sizing);
            merged.ngg_verts_per_subgroup = ngg.verts_per_subgroup;
            merged.ngg_prims_per_subgroup = ngg.prims_per_subgroup;
        }
    }

    merged
}

/// Builds the merged option record for one shader stage.
///
/// `hash` is the stage's resolved identity hash; the caller decides between
/// the client-supplied hash and the module content hash fallback.
pub(crate) fn merge_shader_options(
    hash: [u64; 2],
    options: &api::ShaderTuningOptions,
    tuning: &CompilerTuning,
) -> ir::ShaderOptions {
    let mut merged = ir::ShaderOptions {
        hash,
        trap_present: options.trap_present,
        debug_mode: options.debug_mode,
        allow_re_z: options.allow_re_z,
        vgpr_limit: explicit_register_limit(options.vgpr_limit).unwrap_or(tuning.vgpr_limit),
        sgpr_limit: explicit_register_limit(options.sgpr_limit).unwrap_or(tuning.sgpr_limit),
        max_thread_groups_per_compute_unit: explicit_nonzero(options.max_thread_groups_per_compute_unit)
            .unwrap_or(tuning.waves_per_eu),
        wave_size: options.wave_size,
        wgp_mode: options.wgp_mode,
        wave_break_size: wave_break(options.wave_break_size),
        use_si_scheduler: tuning.enable_si_scheduler || options.use_si_scheduler,
        update_desc_in_elf: options.update_desc_in_elf,
        unroll_threshold: options.unroll_threshold,
        ..ir::ShaderOptions::default()
    };

    // A shader that cannot vary its wave size gets the global subgroup size
    // so that the size it observes matches what the middle end picks.
    if !options.allow_vary_wave_size {
        merged.subgroup_size = tuning.subgroup_size;
    }

    merged.load_scalarizer_threshold = 0;
    if tuning.enable_load_scalarizer {
        merged.load_scalarizer_threshold = tuning.scalar_threshold;
    }
    if options.enable_load_scalarizer {
        merged.load_scalarizer_threshold =
            explicit_nonzero(options.scalar_threshold).unwrap_or(MAX_SCALAR_THRESHOLD);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_limits_fall_back_to_tuning_defaults() {
        let tuning = CompilerTuning { vgpr_limit: 128, sgpr_limit: 96, waves_per_eu: 4, ..CompilerTuning::default() };

        let unset = api::ShaderTuningOptions::default();
        let merged = merge_shader_options([1, 2], &unset, &tuning);
        assert_eq!(merged.hash, [1, 2]);
        assert_eq!(merged.vgpr_limit, 128);
        assert_eq!(merged.sgpr_limit, 96);
        assert_eq!(merged.max_thread_groups_per_compute_unit, 4);

        // u32::MAX is also "unset" for the register limits.
        let maxed = api::ShaderTuningOptions { vgpr_limit: u32::MAX, sgpr_limit: u32::MAX, ..Default::default() };
        let merged = merge_shader_options([0, 0], &maxed, &tuning);
        assert_eq!(merged.vgpr_limit, 128);
        assert_eq!(merged.sgpr_limit, 96);

        // Any explicit value wins.
        let explicit = api::ShaderTuningOptions {
            vgpr_limit: 24,
            sgpr_limit: 32,
            max_thread_groups_per_compute_unit: 8,
            ..Default::default()
        };
        let merged = merge_shader_options([0, 0], &explicit, &tuning);
        assert_eq!(merged.vgpr_limit, 24);
        assert_eq!(merged.sgpr_limit, 32);
        assert_eq!(merged.max_thread_groups_per_compute_unit, 8);
    }

    #[test]
    fn scalarizer_threshold_cascades() {
        // Off everywhere: threshold 0 disables the scalarizer.
        let merged =
            merge_shader_options([0, 0], &api::ShaderTuningOptions::default(), &CompilerTuning::default());
        assert_eq!(merged.load_scalarizer_threshold, 0);

        // Global enable uses the global threshold.
        let tuning =
            CompilerTuning { enable_load_scalarizer: true, scalar_threshold: 16, ..CompilerTuning::default() };
        let merged = merge_shader_options([0, 0], &api::ShaderTuningOptions::default(), &tuning);
        assert_eq!(merged.load_scalarizer_threshold, 16);

        // Per-shader enable overrides the global threshold.
        let options = api::ShaderTuningOptions {
            enable_load_scalarizer: true,
            scalar_threshold: 4,
            ..Default::default()
        };
        let merged = merge_shader_options([0, 0], &options, &tuning);
        assert_eq!(merged.load_scalarizer_threshold, 4);

        // Per-shader enable with no threshold means "always".
        let options = api::ShaderTuningOptions { enable_load_scalarizer: true, ..Default::default() };
        let merged = merge_shader_options([0, 0], &options, &CompilerTuning::default());
        assert_eq!(merged.load_scalarizer_threshold, MAX_SCALAR_THRESHOLD);
    }

    #[test]
    fn subgroup_size_applies_only_to_fixed_wave_stages() {
        let tuning = CompilerTuning::default();

        let fixed = api::ShaderTuningOptions::default();
        let merged = merge_shader_options([0, 0], &fixed, &tuning);
        assert_eq!(merged.subgroup_size, 64);

        let varying = api::ShaderTuningOptions { allow_vary_wave_size: true, ..Default::default() };
        let merged = merge_shader_options([0, 0], &varying, &tuning);
        assert_eq!(merged.subgroup_size, 0);
    }

    #[test]
    fn diagnostic_flags_are_or_of_global_and_pipeline() {
        let tuning = CompilerTuning { include_ir: true, ..CompilerTuning::default() };
        let options = api::PipelineOptions { include_disassembly: true, ..Default::default() };
        let merged = merge_pipeline_options(0xAB, 0xCD, &options, None, &tuning);
        assert_eq!(merged.hash, [0xAB, 0xCD]);
        assert!(merged.include_disassembly);
        assert!(merged.include_ir);
        assert_eq!(merged.ngg_flags, ir::NggFlags::empty());
    }

    #[test]
    fn disabled_ngg_sets_only_the_disable_flag() {
        let ngg = api::NggState { enable_ngg: false, backface_exponent: 3, ..Default::default() };
        let merged = merge_pipeline_options(
            0,
            0,
            &api::PipelineOptions::default(),
            Some(&ngg),
            &CompilerTuning::default(),
        );
        assert_eq!(merged.ngg_flags, ir::NggFlags::DISABLE);
        assert_eq!(merged.ngg_backface_exponent, 0);
    }

    #[test]
    fn enabled_ngg_translates_flags_and_fields() {
        let ngg = api::NggState {
            enable_ngg: true,
            enable_backface_culling: true,
            compact_mode: api::NggCompactMode::Subgroup,
            // Not always using the prim shader table is what sets a flag.
            always_use_prim_shader_table: false,
            backface_exponent: 2,
            subgroup_sizing: api::NggSubgroupSizingType::HalfSize,
            verts_per_subgroup: 256,
            prims_per_subgroup: 128,
            ..Default::default()
        };
        let merged = merge_pipeline_options(
            0,
            0,
            &api::PipelineOptions::default(),
            Some(&ngg),
            &CompilerTuning::default(),
        );
        assert_eq!(
            merged.ngg_flags,
            ir::NggFlags::ENABLE_BACKFACE_CULLING
                | ir::NggFlags::COMPACT_SUBGROUP
                | ir::NggFlags::DONT_ALWAYS_USE_PRIM_SHADER_TABLE
        );
        assert!(!merged.ngg_flags.contains(ir::NggFlags::DISABLE));
        assert_eq!(merged.ngg_backface_exponent, 2);
        assert_eq!(merged.ngg_subgroup_sizing, ir::NggSubgroupSizing::HalfSize);
        assert_eq!(merged.ngg_verts_per_subgroup, 256);
        assert_eq!(merged.ngg_prims_per_subgroup, 128);
    }

    #[test]
    fn enumeration_mappings_preserve_every_value() {
        let wave_breaks = [
            (api::WaveBreakSize::None, ir::WaveBreak::None),
            (api::WaveBreakSize::Size8x8, ir::WaveBreak::Size8x8),
            (api::WaveBreakSize::Size16x16, ir::WaveBreak::Size16x16),
            (api::WaveBreakSize::Size32x32, ir::WaveBreak::Size32x32),
            (api::WaveBreakSize::DrawTime, ir::WaveBreak::DrawTime),
        ];
        for (external, internal) in wave_breaks {
            assert_eq!(wave_break(external), internal);
        }

        let sizings = [
            (api::NggSubgroupSizingType::Auto, ir::NggSubgroupSizing::Auto),
            (api::NggSubgroupSizingType::MaximumSize, ir::NggSubgroupSizing::MaximumSize),
            (api::NggSubgroupSizingType::HalfSize, ir::NggSubgroupSizing::HalfSize),
            (api::NggSubgroupSizingType::OptimizeForVerts, ir::NggSubgroupSizing::OptimizeForVerts),
            (api::NggSubgroupSizingType::OptimizeForPrims, ir::NggSubgroupSizing::OptimizeForPrims),
            (api::NggSubgroupSizingType::Explicit, ir::NggSubgroupSizing::Explicit),
        ];
        for (external, internal) in sizings {
            assert_eq!(ngg_subgroup_sizing(external), internal);
        }
    }
}
