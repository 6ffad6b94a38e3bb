//! lookout-events - the observation taxonomy, typed records, and the
//! exhaustiveness-checked dispatch contract of the lookout runtime.

pub mod dispatch;
pub mod error;
pub mod kind;
pub mod observation;
pub mod phase;

pub use dispatch::{DispatchTable, DispatchTableBuilder, Handler, HandlerResult};
pub use error::{Error, Result};
pub use kind::{compat, is_valid_kind, ObservationKind, RegistryVersion};
pub use observation::{Observation, ReplayCmdOutput};
pub use phase::{AgentState, ReplayPhase};
