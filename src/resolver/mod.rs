//! The issuing side: classification, exhaustion arithmetic, dispatch.
//!
//! - `classify`: what a name refers to
//! - `resolve_exhaustion_target`: where an exhaustion level moves
//! - `Resolver`: validates requests and relays commands to the applier

pub mod classify;
pub mod error;
pub mod exhaustion;
#[allow(clippy::module_inception)]
mod resolver;

pub use classify::{classify, Classification};
pub use error::ResolveError;
pub use exhaustion::resolve_exhaustion_target;
pub use resolver::{AddOptions, Dispatch, Resolver, ToggleOptions};
