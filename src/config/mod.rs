//! Assessment config compilation
//!
//! Turns one loaded config pair into one flat config per school:
//! 1. Module defaults, with each `fileList` entry filled from `fileElements`
//! 2. The school's own entry
//! 3. Module overrides
//! 4. `assessmentName`

mod compile;
mod merge;

pub use compile::{compile_school, expand_district, ASSESSMENT_NAME_KEY};
pub use merge::{fill_missing, overlay, overlay_layers};
