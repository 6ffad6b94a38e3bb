//! Human-readable rendering of observation records.
//!
//! The renderer is an exhaustive dispatch table over every observation
//! kind, built once at startup. Adding a kind to the taxonomy makes
//! [`ObservationRenderer::new`] fail until a handler is written for it,
//! which is the point: no record is ever silently skipped.

use lookout_events::{
    DispatchTable, HandlerResult, Observation, ObservationKind, Result,
};

/// Cap on inlined content, matching what fits on a terminal screen.
const MAX_CONTENT_CHARS: usize = 2000;

fn truncate(content: &str) -> String {
    if content.chars().count() <= MAX_CONTENT_CHARS {
        return content.to_string();
    }
    let head: String = content.chars().take(MAX_CONTENT_CHARS).collect();
    format!("{}\n... [truncated]", head)
}

fn block(header: String, content: &str) -> HandlerResult {
    if content.is_empty() {
        HandlerResult::text(header)
    } else {
        HandlerResult::text(format!("{}\n{}", header, truncate(content)))
    }
}

fn mismatch(kind: ObservationKind, obs: &Observation) -> HandlerResult {
    HandlerResult::error(format!(
        "handler for '{}' received a '{}' record",
        kind,
        obs.kind()
    ))
}

pub struct ObservationRenderer {
    table: DispatchTable,
}

impl ObservationRenderer {
    pub fn new() -> Result<Self> {
        let table = DispatchTable::builder()
            .on(ObservationKind::Read, |obs: &Observation| match obs {
                Observation::Read { path, content } => {
                    tracing::debug!(path = %path, "render read");
                    block(format!("[read] {}", path), content)
                }
                other => mismatch(ObservationKind::Read, other),
            })
            .on(ObservationKind::Browse, |obs: &Observation| match obs {
                Observation::Browse { url, content } => {
                    tracing::debug!(url = %url, "render browse");
                    block(format!("[browse] {}", url), content)
                }
                other => mismatch(ObservationKind::Browse, other),
            })
            .on(ObservationKind::Run, |obs: &Observation| match obs {
                Observation::Run {
                    command,
                    exit_code,
                    content,
                    ..
                } => {
                    tracing::debug!(command = %command, exit_code, "render run");
                    block(format!("[run] `{}` (exit {})", command, exit_code), content)
                }
                other => mismatch(ObservationKind::Run, other),
            })
            .on(ObservationKind::RunIpython, |obs: &Observation| match obs {
                Observation::RunIpython { code, content } => {
                    block(format!("[ipython] {}", code), content)
                }
                other => mismatch(ObservationKind::RunIpython, other),
            })
            .on(
                ObservationKind::RunReplayInternal,
                |obs: &Observation| match obs {
                    Observation::RunReplayInternal(out) => block(
                        format!(
                            "[replay:internal] `{}` (exit {})",
                            out.command, out.exit_code
                        ),
                        &out.content,
                    ),
                    other => mismatch(ObservationKind::RunReplayInternal, other),
                },
            )
            .on(
                ObservationKind::RunReplayTool,
                |obs: &Observation| match obs {
                    Observation::RunReplayTool(out) => block(
                        format!("[replay:tool] `{}` (exit {})", out.command, out.exit_code),
                        &out.content,
                    ),
                    other => mismatch(ObservationKind::RunReplayTool, other),
                },
            )
            .on(
                ObservationKind::ReplayUpdatePhase,
                |obs: &Observation| match obs {
                    Observation::ReplayUpdatePhase { new_phase, content } => {
                        tracing::info!(phase = %new_phase, "replay phase change");
                        block(format!("[replay:phase] -> {}", new_phase), content)
                    }
                    other => mismatch(ObservationKind::ReplayUpdatePhase, other),
                },
            )
            .on(ObservationKind::Chat, |obs: &Observation| match obs {
                Observation::Chat { content } => block("[chat]".to_string(), content),
                other => mismatch(ObservationKind::Chat, other),
            })
            .on(
                ObservationKind::AgentStateChanged,
                |obs: &Observation| match obs {
                    Observation::AgentStateChanged { state } => {
                        tracing::info!(state = %state, "agent state change");
                        HandlerResult::text(format!("[state] {}", state))
                    }
                    other => mismatch(ObservationKind::AgentStateChanged, other),
                },
            )
            .on(ObservationKind::Delegate, |obs: &Observation| match obs {
                Observation::Delegate { outputs, content } => {
                    let header = if outputs.is_empty() {
                        "[delegate]".to_string()
                    } else {
                        let keys: Vec<&str> = outputs.keys().map(String::as_str).collect();
                        format!("[delegate] outputs: {}", keys.join(", "))
                    };
                    block(header, content)
                }
                other => mismatch(ObservationKind::Delegate, other),
            })
            .build()?;
        Ok(Self { table })
    }

    /// Render one record to a display string.
    pub fn render(&self, observation: &Observation) -> Result<String> {
        Ok(self.table.dispatch(observation)?.to_content_string())
    }
}
