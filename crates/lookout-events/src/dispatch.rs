//! Exhaustiveness-checked dispatch over observation kinds.
//!
//! Consumers that branch on kind build a [`DispatchTable`] at startup.
//! Construction fails with [`Error::MissingHandler`] unless every defined
//! kind has a handler, so adding a kind to the taxonomy breaks every
//! dispatcher loudly instead of being silently ignored. There is no
//! catch-all branch; unrecognized input must be rejected upstream with
//! [`crate::kind::is_valid_kind`], not papered over here.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::kind::ObservationKind;
use crate::observation::Observation;

/// What a handler produced for one observation.
#[derive(Clone, Debug, PartialEq)]
pub enum HandlerResult {
    Text(String),
    Json(serde_json::Value),
    Error(String),
}

impl HandlerResult {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn error(s: impl Into<String>) -> Self {
        Self::Error(s.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn to_content_string(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Json(v) => serde_json::to_string_pretty(v).unwrap_or_default(),
            Self::Error(e) => format!("Error: {}", e),
        }
    }
}

/// A kind-specific consumer of observations.
///
/// Handlers are synchronous with respect to the registry; a handler body
/// that needs blocking I/O or async work owns that concurrency itself.
pub trait Handler: Send + Sync {
    fn on_observation(&self, observation: &Observation) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(&Observation) -> HandlerResult + Send + Sync,
{
    fn on_observation(&self, observation: &Observation) -> HandlerResult {
        self(observation)
    }
}

/// Accumulates handlers before the exhaustiveness check.
#[derive(Default)]
pub struct DispatchTableBuilder {
    handlers: HashMap<ObservationKind, Arc<dyn Handler>>,
}

impl DispatchTableBuilder {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for `kind`. Replaces any existing handler for
    /// the same kind.
    pub fn on(mut self, kind: ObservationKind, handler: impl Handler + 'static) -> Self {
        self.handlers.insert(kind, Arc::new(handler));
        self
    }

    /// Check coverage of every defined kind and seal the table.
    /// The first missing kind, in declaration order, is reported.
    pub fn build(self) -> Result<DispatchTable> {
        for kind in ObservationKind::ALL {
            if !self.handlers.contains_key(&kind) {
                return Err(Error::MissingHandler(kind));
            }
        }
        Ok(DispatchTable {
            handlers: self.handlers,
        })
    }
}

/// A sealed, fully-populated mapping from kind to handler. Immutable and
/// cheap to share across threads.
pub struct DispatchTable {
    handlers: HashMap<ObservationKind, Arc<dyn Handler>>,
}

impl DispatchTable {
    pub fn builder() -> DispatchTableBuilder {
        DispatchTableBuilder::new()
    }

    /// Route `observation` to the handler registered for its kind.
    pub fn dispatch(&self, observation: &Observation) -> Result<HandlerResult> {
        let kind = observation.kind();
        tracing::debug!(kind = %kind, "dispatching observation");
        // build() guarantees coverage; a miss here is a builder bug.
        self.handlers
            .get(&kind)
            .map(|handler| handler.on_observation(observation))
            .ok_or(Error::MissingHandler(kind))
    }
}
