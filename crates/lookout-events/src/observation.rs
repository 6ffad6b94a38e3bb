//! Typed observation records.
//!
//! One variant per observation kind; the wire format tags each record with
//! the kind string in an `"observation"` field, so a serialized record
//! always carries exactly one tag:
//!
//! ```json
//! { "observation": "run", "command": "ls", "exit_code": 0, "content": "..." }
//! ```
//!
//! Producers (execution backends, chat transport, the replay engine)
//! attach the kind once, at construction, through the helpers below; it is
//! never reassigned.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::kind::ObservationKind;
use crate::phase::{AgentState, ReplayPhase};

/// Shared output shape of the two replay command kinds.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReplayCmdOutput {
    pub command_id: i64,
    pub command: String,
    #[serde(default)]
    pub exit_code: i32,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub interpreter_details: String,
    pub content: String,
}

impl ReplayCmdOutput {
    pub fn is_error(&self) -> bool {
        self.exit_code != 0
    }
}

/// A record of what an action or runtime event produced.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "observation", rename_all = "snake_case")]
pub enum Observation {
    /// The contents of a file.
    Read { path: String, content: String },

    /// The HTML contents of a URL.
    Browse { url: String, content: String },

    /// The output of a shell command.
    Run {
        command: String,
        #[serde(default)]
        exit_code: i32,
        #[serde(default)]
        hidden: bool,
        content: String,
    },

    /// The output of an IPython cell.
    RunIpython { code: String, content: String },

    /// The output of an internally generated replay command, hidden from
    /// the agent.
    RunReplayInternal(ReplayCmdOutput),

    /// The output of a tool-level replay command, visible to the agent.
    RunReplayTool(ReplayCmdOutput),

    /// The replay analysis process moved to a new phase.
    ReplayUpdatePhase {
        new_phase: ReplayPhase,
        content: String,
    },

    /// A message from the user.
    Chat { content: String },

    /// The agent's internal state changed.
    AgentStateChanged { state: AgentState },

    /// The result of a task delegated to another agent.
    Delegate {
        #[serde(default)]
        outputs: serde_json::Map<String, Value>,
        content: String,
    },
}

impl Observation {
    /// The kind tag attached to this record.
    pub fn kind(&self) -> ObservationKind {
        match self {
            Self::Read { .. } => ObservationKind::Read,
            Self::Browse { .. } => ObservationKind::Browse,
            Self::Run { .. } => ObservationKind::Run,
            Self::RunIpython { .. } => ObservationKind::RunIpython,
            Self::RunReplayInternal(_) => ObservationKind::RunReplayInternal,
            Self::RunReplayTool(_) => ObservationKind::RunReplayTool,
            Self::ReplayUpdatePhase { .. } => ObservationKind::ReplayUpdatePhase,
            Self::Chat { .. } => ObservationKind::Chat,
            Self::AgentStateChanged { .. } => ObservationKind::AgentStateChanged,
            Self::Delegate { .. } => ObservationKind::Delegate,
        }
    }

    /// One-line human summary of the record.
    pub fn message(&self) -> String {
        match self {
            Self::Read { path, .. } => format!("I read the file {}.", path),
            Self::Browse { url, .. } => format!("I browsed {}.", url),
            Self::Run {
                command, exit_code, ..
            } => format!("Command `{}` executed with exit code {}.", command, exit_code),
            Self::RunIpython { .. } => "Code executed in IPython cell.".to_string(),
            Self::RunReplayInternal(out) | Self::RunReplayTool(out) => format!(
                "Command `{}` executed with exit code {}.",
                out.command, out.exit_code
            ),
            Self::ReplayUpdatePhase { new_phase, .. } => {
                format!("Replay phase changed to {}.", new_phase)
            }
            Self::Chat { content } => content.clone(),
            Self::AgentStateChanged { state } => format!("Agent state changed to {}.", state),
            Self::Delegate { .. } => "Delegated task finished.".to_string(),
        }
    }

    /// Raw output carried by the record, where one exists.
    pub fn content(&self) -> &str {
        match self {
            Self::Read { content, .. }
            | Self::Browse { content, .. }
            | Self::Run { content, .. }
            | Self::RunIpython { content, .. }
            | Self::ReplayUpdatePhase { content, .. }
            | Self::Chat { content }
            | Self::Delegate { content, .. } => content,
            Self::RunReplayInternal(out) | Self::RunReplayTool(out) => &out.content,
            Self::AgentStateChanged { .. } => "",
        }
    }

    // Producer helpers. Each backend attaches its kind exactly once here.

    pub fn read(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Read {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn browse(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Browse {
            url: url.into(),
            content: content.into(),
        }
    }

    pub fn run(command: impl Into<String>, exit_code: i32, content: impl Into<String>) -> Self {
        Self::Run {
            command: command.into(),
            exit_code,
            hidden: false,
            content: content.into(),
        }
    }

    pub fn run_ipython(code: impl Into<String>, content: impl Into<String>) -> Self {
        Self::RunIpython {
            code: code.into(),
            content: content.into(),
        }
    }

    pub fn replay_internal(output: ReplayCmdOutput) -> Self {
        Self::RunReplayInternal(output)
    }

    pub fn replay_tool(output: ReplayCmdOutput) -> Self {
        Self::RunReplayTool(output)
    }

    pub fn phase_update(new_phase: ReplayPhase, content: impl Into<String>) -> Self {
        Self::ReplayUpdatePhase {
            new_phase,
            content: content.into(),
        }
    }

    pub fn chat(content: impl Into<String>) -> Self {
        Self::Chat {
            content: content.into(),
        }
    }

    pub fn state_changed(state: AgentState) -> Self {
        Self::AgentStateChanged { state }
    }

    pub fn delegate(
        outputs: serde_json::Map<String, Value>,
        content: impl Into<String>,
    ) -> Self {
        Self::Delegate {
            outputs,
            content: content.into(),
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let content = self.content();
        if content.is_empty() {
            write!(f, "**{}** {}", self.kind(), self.message())
        } else {
            write!(f, "**{}** {}\n{}", self.kind(), self.message(), content)
        }
    }
}
