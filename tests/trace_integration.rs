//! Integration tests: a full session trace through store, registry, and
//! renderer.
//!
//! The fixture is a realistic replay-debugging session: the user reports
//! a bug with a recording link, the runtime runs the internal analysis
//! command, the replay phase advances, and the agent reads, browses,
//! runs commands, and finally reports a delegated fix.

use std::collections::HashSet;
use std::path::PathBuf;

use lookout_events::{compat, ObservationKind, ReplayPhase};
use lookout_trace::{ObservationRenderer, TraceStore};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn session_fixture_parses_and_every_kind_appears() {
    let store = TraceStore::open(fixture("session_trace.jsonl"));
    let records = store.read_all().unwrap();
    assert_eq!(records.len(), 10);

    let kinds: HashSet<ObservationKind> =
        records.iter().map(|r| r.observation.kind()).collect();
    assert_eq!(kinds.len(), ObservationKind::ALL.len());
}

#[test]
fn session_fixture_is_clean() {
    let report = TraceStore::open(fixture("session_trace.jsonl"))
        .check()
        .unwrap();
    assert!(report.is_clean());
    assert_eq!(report.records, 10);
}

#[test]
fn session_fixture_renders_end_to_end() {
    let store = TraceStore::open(fixture("session_trace.jsonl"));
    let renderer = ObservationRenderer::new().unwrap();
    for record in store.read_all().unwrap() {
        let rendered = renderer.render(&record.observation).unwrap();
        assert!(!rendered.is_empty());
    }
}

#[test]
fn session_fixture_phase_sequence_is_legal() {
    let store = TraceStore::open(fixture("session_trace.jsonl"));
    let mut phase = ReplayPhase::Normal;
    for record in store.read_all().unwrap() {
        if let lookout_events::Observation::ReplayUpdatePhase { new_phase, .. } =
            record.observation
        {
            assert!(
                phase.can_transition(new_phase),
                "illegal transition {} -> {}",
                phase,
                new_phase
            );
            phase = new_phase;
        }
    }
    assert_eq!(phase, ReplayPhase::Analysis);
}

#[test]
fn legacy_fixture_is_rejected_but_migratable() {
    let store = TraceStore::open(fixture("legacy_trace.jsonl"));
    let report = store.check().unwrap();
    assert_eq!(report.records, 1);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].line, 1);

    // The shim tells a migration pass where the historical tag lands.
    assert_eq!(compat::canonical("message").unwrap(), ObservationKind::Chat);
}
