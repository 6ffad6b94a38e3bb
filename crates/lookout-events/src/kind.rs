//! The closed observation-kind taxonomy.
//!
//! Every observation record the runtime produces carries exactly one of
//! these tags. The wire strings are part of the persistence contract:
//! stored traces and inter-process messages embed them byte-for-byte, so
//! a shipped tag is never renamed or removed, only new tags are added.
//! Consumers branch on kinds through [`crate::dispatch::DispatchTable`],
//! never by ad hoc string comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The category of result an agent action or runtime event produced.
///
/// Tags say where an observation came from, not what its payload looks
/// like; payload shapes live in [`crate::observation::Observation`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ObservationKind {
    /// The contents of a file were retrieved.
    Read,
    /// The HTML contents of a URL were retrieved.
    Browse,
    /// The output of a shell command.
    Run,
    /// The output of an IPython cell.
    RunIpython,
    /// The output of an internally generated replay command.
    RunReplayInternal,
    /// The output of a tool-level replay command.
    RunReplayTool,
    /// A phase transition notice from the replay analysis process.
    ReplayUpdatePhase,
    /// A message from the user.
    Chat,
    /// The agent's internal state changed.
    AgentStateChanged,
    /// The result of a task delegated to another agent.
    Delegate,
}

impl ObservationKind {
    /// Every currently defined kind, in declaration order.
    pub const ALL: [ObservationKind; 10] = [
        Self::Read,
        Self::Browse,
        Self::Run,
        Self::RunIpython,
        Self::RunReplayInternal,
        Self::RunReplayTool,
        Self::ReplayUpdatePhase,
        Self::Chat,
        Self::AgentStateChanged,
        Self::Delegate,
    ];

    /// The stable wire string for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Browse => "browse",
            Self::Run => "run",
            Self::RunIpython => "run_ipython",
            Self::RunReplayInternal => "run_replay_internal",
            Self::RunReplayTool => "run_replay_tool",
            Self::ReplayUpdatePhase => "replay_update_phase",
            Self::Chat => "chat",
            Self::AgentStateChanged => "agent_state_changed",
            Self::Delegate => "delegate",
        }
    }

    /// The registry version that introduced this kind.
    pub const fn introduced_in(self) -> RegistryVersion {
        match self {
            Self::RunReplayTool => RegistryVersion::V2,
            _ => RegistryVersion::V1,
        }
    }

    /// The kinds defined as of `version`.
    pub fn in_version(version: RegistryVersion) -> impl Iterator<Item = ObservationKind> {
        Self::ALL
            .into_iter()
            .filter(move |kind| kind.introduced_in() <= version)
    }
}

impl fmt::Display for ObservationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObservationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::invalid_kind(s))
    }
}

/// True iff `token` exactly matches a defined wire string. Case-sensitive,
/// no trimming or normalization. Use this to validate data crossing a
/// boundary before trusting it.
pub fn is_valid_kind(token: &str) -> bool {
    ObservationKind::ALL
        .into_iter()
        .any(|kind| kind.as_str() == token)
}

/// Additive-only versions of the kind taxonomy.
///
/// V2 added `run_replay_tool`; the nine V1 strings are unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegistryVersion {
    V1,
    V2,
}

impl RegistryVersion {
    pub const CURRENT: RegistryVersion = RegistryVersion::V2;
}

impl fmt::Display for RegistryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("v1"),
            Self::V2 => f.write_str("v2"),
        }
    }
}

/// Forward mapping for historical persisted kind strings.
///
/// Old traces may carry tags that predate the current taxonomy. Each such
/// string maps forward to exactly one current kind and is never reused for
/// a different meaning. Strict boundary validation stays in
/// [`is_valid_kind`]; this shim is for migrating persisted data only.
pub mod compat {
    use super::ObservationKind;
    use crate::error::{Error, Result};

    /// Retired wire strings and the current kind each maps to.
    const LEGACY_ALIASES: &[(&str, ObservationKind)] =
        &[("message", ObservationKind::Chat)];

    /// Resolve a persisted kind string, current or historical, to a
    /// current kind. Unknown strings are an [`Error::InvalidKind`].
    pub fn canonical(token: &str) -> Result<ObservationKind> {
        if let Ok(kind) = token.parse::<ObservationKind>() {
            return Ok(kind);
        }
        LEGACY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == token)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| Error::invalid_kind(token))
    }
}
