pub mod error;
pub mod host;
pub mod math;
pub mod operations;
pub mod scene;

pub use error::{ReoriginError, Result};
pub use host::Host;
pub use operations::{Aggregation, CommandStatus, MoveOriginParams, MoveOriginToSelection, Scope};
pub use scene::Scene;
