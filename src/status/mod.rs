//! Platform status effects: vocabulary, name parsing, descriptors.
//!
//! - `parse_status_name`: split `"Exhaustion +1"` into base and suffix
//! - `StatusRegistry`: the registered statuses and the status-effect factory
//! - `StatusDescriptor`: a name resolved against the registry

pub mod descriptor;
pub mod parse;
pub mod registry;

pub use descriptor::{ExhaustionChange, StatusDescriptor};
pub use parse::{parse_status_name, ParsedStatusName, StatusSuffix};
pub use registry::{StatusEffectConfig, StatusRegistry, STANDARD_TOKEN_PREFIX};
