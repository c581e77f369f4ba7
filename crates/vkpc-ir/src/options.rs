//! Merged option records handed to the middle end

use bitflags::bitflags;

bitflags! {
    /// NGG (primitive shader) control flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NggFlags: u32 {
        /// NGG is disabled for the pipeline; no other NGG field is valid.
        const DISABLE = 1 << 0;
        const ENABLE_GS_USE = 1 << 1;
        const FORCE_NON_PASSTHROUGH = 1 << 2;
        const DONT_ALWAYS_USE_PRIM_SHADER_TABLE = 1 << 3;
        const COMPACT_SUBGROUP = 1 << 4;
        const ENABLE_FAST_LAUNCH = 1 << 5;
        const ENABLE_VERTEX_REUSE = 1 << 6;
        const ENABLE_BACKFACE_CULLING = 1 << 7;
        const ENABLE_FRUSTUM_CULLING = 1 << 8;
        const ENABLE_BOX_FILTER_CULLING = 1 << 9;
        const ENABLE_SPHERE_CULLING = 1 << 10;
        const ENABLE_SMALL_PRIM_FILTER = 1 << 11;
        const ENABLE_CULL_DISTANCE_CULLING = 1 << 12;
    }
}

/// NGG subgroup sizing policies, middle-end numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NggSubgroupSizing {
    #[default]
    Auto,
    MaximumSize,
    HalfSize,
    OptimizeForVerts,
    OptimizeForPrims,
    Explicit,
}

/// Shadow descriptor table usage, middle-end numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowDescriptorTableUsage {
    #[default]
    Auto,
    Enable,
    Disable,
}

/// Pipeline-wide options.
///
/// The NGG fields besides `ngg_flags` are only meaningful when
/// `ngg_flags` does not contain [`NggFlags::DISABLE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// `hash[0]` is the pipeline identity hash, `hash[1]` the cache hash.
    pub hash: [u64; 2],
    pub include_disassembly: bool,
    pub include_ir: bool,
    pub reconfig_workgroup_layout: bool,
    pub shadow_descriptor_table_usage: ShadowDescriptorTableUsage,
    pub shadow_descriptor_table_ptr_high: u32,
    pub ngg_flags: NggFlags,
    pub ngg_backface_exponent: u32,
    pub ngg_subgroup_sizing: NggSubgroupSizing,
    pub ngg_verts_per_subgroup: u32,
    pub ngg_prims_per_subgroup: u32,
}

/// Wave break granularities, middle-end numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaveBreak {
    #[default]
    None,
    Size8x8,
    Size16x16,
    Size32x32,
    DrawTime,
}

/// Per-stage shader options after merging.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShaderOptions {
    /// 128-bit shader identity hash.
    pub hash: [u64; 2],
    pub trap_present: bool,
    pub debug_mode: bool,
    pub allow_re_z: bool,
    pub vgpr_limit: u32,
    pub sgpr_limit: u32,
    pub max_thread_groups_per_compute_unit: u32,
    pub wave_size: u32,
    pub wgp_mode: bool,
    /// Wave size forced for stages that do not vary their wave size;
    /// 0 leaves the middle end free to choose.
    pub subgroup_size: u32,
    pub wave_break_size: WaveBreak,
    /// 0 disables the load scalarizer for the stage.
    pub load_scalarizer_threshold: u32,
    pub use_si_scheduler: bool,
    pub update_desc_in_elf: bool,
    pub unroll_threshold: u32,
}
