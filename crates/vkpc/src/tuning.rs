//! Process-wide tuning defaults
//!
//! These are the compiled-in fallbacks behind the per-shader tuning options:
//! a per-shader field left at its unset sentinel resolves to the value here.
//! The host installs one record before the first translation; afterwards the
//! record is read-only, so concurrent translations share it without locking.

use serde::Deserialize;
use std::sync::OnceLock;

/// Largest load-scalarizer threshold; effectively "always scalarize".
pub const MAX_SCALAR_THRESHOLD: u32 = u32::MAX;

/// Global tuning defaults, the equivalents of the driver's named options.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct CompilerTuning {
    /// Include disassembly in the output binary for every pipeline.
    pub include_disassembly: bool,
    /// Include middle-end IR in the output binary for every pipeline.
    pub include_ir: bool,
    /// Default VGPR limit; 0 leaves the limit to the middle end.
    pub vgpr_limit: u32,
    /// Default SGPR limit; 0 leaves the limit to the middle end.
    pub sgpr_limit: u32,
    /// Default maximum thread groups per compute unit.
    pub waves_per_eu: u32,
    /// Enable the load scalarizer for every shader.
    pub enable_load_scalarizer: bool,
    /// Load scalarizer vector-size threshold.
    pub scalar_threshold: u32,
    /// Enable the si-scheduler target option for every shader.
    pub enable_si_scheduler: bool,
    /// Subgroup size reported to shaders that cannot vary their wave size.
    pub subgroup_size: u32,
}

impl Default for CompilerTuning {
    fn default() -> Self {
        CompilerTuning {
            include_disassembly: false,
            include_ir: false,
            vgpr_limit: 0,
            sgpr_limit: 0,
            waves_per_eu: 0,
            enable_load_scalarizer: false,
            scalar_threshold: MAX_SCALAR_THRESHOLD,
            enable_si_scheduler: false,
            subgroup_size: 64,
        }
    }
}

static TUNING: OnceLock<CompilerTuning> = OnceLock::new();

impl CompilerTuning {
    /// Installs `self` as the process-wide tuning record.
    ///
    /// Must be called at most once, before any translation; installing twice
    /// is a host programming error and panics.
    pub fn install(self) {
        if TUNING.set(self).is_err() {
            panic!("compiler tuning installed twice");
        }
    }

    /// The installed tuning record, or the built-in defaults when the host
    /// never installed one.
    pub fn get() -> &'static CompilerTuning {
        TUNING.get_or_init(CompilerTuning::default)
    }
}
