//! Pipeline description lowering for the vkpc shader compiler
//!
//! This crate translates a client-supplied pipeline description
//! (`vkpc-api`) into the configuration surface of the code-generation
//! middle end (`vkpc-ir`): it merges layered tuning options, flattens the
//! resource binding tree into one contiguous node table, maps pixel formats
//! to the middle end's buffer formats, and copies the fixed-function state
//! blocks of graphics pipelines.
//!
//! Translation is synchronous and infallible: malformed description
//! elements are skipped per policy, and the remaining failure modes are
//! programming errors caught by assertions and exhaustive matches.

mod context;
mod formats;
mod options;
mod resources;
mod state;
mod tuning;

pub use context::{PipelineBuildInfo, PipelineContext};
pub use formats::{FormatUse, map_pixel_format};
pub use tuning::{CompilerTuning, MAX_SCALAR_THRESHOLD};
