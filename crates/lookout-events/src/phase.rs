//! Supporting taxonomies carried by observation payloads: the replay
//! debugging phase and the agent lifecycle state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The replay phases an agent can be in.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReplayPhase {
    /// The agent does not have access to a recording.
    Normal,
    /// The agent uses initial-analysis data and dedicated tools to
    /// analyze a replay recording.
    Analysis,
    /// The agent is confirming the analysis.
    ConfirmAnalysis,
    /// The agent finally edits the code.
    Edit,
}

/// Legal phase transitions. A phase absent from the table is terminal.
const PHASE_TRANSITIONS: &[(ReplayPhase, &[ReplayPhase])] = &[
    (ReplayPhase::Normal, &[ReplayPhase::Analysis]),
    (
        ReplayPhase::Analysis,
        &[ReplayPhase::ConfirmAnalysis, ReplayPhase::Edit],
    ),
    (ReplayPhase::ConfirmAnalysis, &[ReplayPhase::Edit]),
];

impl ReplayPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Analysis => "analysis",
            Self::ConfirmAnalysis => "confirm_analysis",
            Self::Edit => "edit",
        }
    }

    /// Whether the state machine allows moving from `self` to `next`.
    /// Self-transitions are not allowed; re-entering the current phase
    /// means the runtime sent a duplicate update.
    pub fn can_transition(self, next: ReplayPhase) -> bool {
        PHASE_TRANSITIONS
            .iter()
            .find(|(from, _)| *from == self)
            .is_some_and(|(_, targets)| targets.contains(&next))
    }
}

impl fmt::Display for ReplayPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Agent lifecycle states reported by `agent_state_changed` observations.
/// Same stability contract as observation kinds: wire strings are
/// additive-only.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    Loading,
    Running,
    AwaitingUserInput,
    Paused,
    Stopped,
    Finished,
    Error,
}

impl AgentState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Running => "running",
            Self::AwaitingUserInput => "awaiting_user_input",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
            Self::Finished => "finished",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
