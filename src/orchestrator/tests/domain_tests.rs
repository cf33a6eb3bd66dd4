//! Unit tests for orchestration domain types.

use crate::agent::domain::{AgentResult, CapabilityName};
use crate::orchestrator::domain::{
    DispatchState, EnvelopeStatus, FailureClass, FailureEnvelope, QUOTA_EXCEEDED_MESSAGE,
    ResponseEnvelope, RoutingSelection, classify_failure,
};
use rstest::rstest;
use serde_json::json;

fn name(raw: &str) -> CapabilityName {
    CapabilityName::new(raw).expect("valid name")
}

// ── Failure classification ─────────────────────────────────────────

#[rstest]
#[case("429 Too Many Requests: slow down", FailureClass::Quota)]
#[case("upstream returned status 429", FailureClass::Quota)]
#[case("Quota exceeded for metric generate_content", FailureClass::Quota)]
#[case("RESOURCE_EXHAUSTED: QUOTA", FailureClass::Quota)]
#[case("connection reset by peer", FailureClass::Other)]
#[case("generation backend error (503): overloaded", FailureClass::Other)]
#[case("", FailureClass::Other)]
fn failure_messages_are_classified(#[case] message: &str, #[case] expected: FailureClass) {
    assert_eq!(classify_failure(message), expected);
}

#[rstest]
fn quota_failure_uses_fixed_message() {
    let envelope =
        FailureEnvelope::classified(name("Code Generator"), FailureClass::Quota, "429 quota");

    assert_eq!(envelope.answer(), QUOTA_EXCEEDED_MESSAGE);
    assert_eq!(envelope.status(), EnvelopeStatus::ErrorQuotaExceeded);
    assert_eq!(envelope.agent().as_str(), "Code Generator");
}

#[rstest]
fn other_failure_embeds_raw_detail() {
    let envelope = FailureEnvelope::classified(
        name("Paper Analyzer"),
        FailureClass::Other,
        "connection reset",
    );

    assert!(envelope.answer().contains("connection reset"));
    assert_eq!(envelope.status(), EnvelopeStatus::Error);
}

// ── Envelope wire shape ────────────────────────────────────────────

#[rstest]
fn success_envelope_serialises_as_agent_result() {
    let envelope = ResponseEnvelope::Success(AgentResult::new(
        name("Paper Analyzer"),
        "A summary.",
        vec![Some("paper.pdf".to_owned()), None],
    ));

    let value = serde_json::to_value(&envelope).expect("envelope should serialise");

    assert_eq!(
        value,
        json!({"agent": "Paper Analyzer", "response": "A summary.", "sources": ["paper.pdf", null]})
    );
    assert_eq!(envelope.status(), EnvelopeStatus::Success);
}

#[rstest]
fn failure_envelope_serialises_status_in_snake_case() {
    let envelope = ResponseEnvelope::Failure(FailureEnvelope::classified(
        name("Code Generator"),
        FailureClass::Quota,
        "429",
    ));

    let value = serde_json::to_value(&envelope).expect("envelope should serialise");

    assert_eq!(value["status"], json!("error_quota_exceeded"));
    assert_eq!(value["agent"], json!("Code Generator"));
    assert!(value.get("sources").is_none());
}

// ── Routing selection parsing ──────────────────────────────────────

#[rstest]
#[case(r#"{"agent_name": "Code Generator", "reason": "code"}"#)]
#[case("```json\n{\"agent_name\": \"Code Generator\", \"reason\": \"code\"}\n```")]
#[case("Sure! {\"agent_name\": \"Code Generator\", \"reason\": \"code\"} Hope that helps.")]
fn selection_is_parsed_from_reply(#[case] reply: &str) {
    let selection = RoutingSelection::from_reply(reply).expect("selection should parse");

    assert_eq!(selection.agent_name, "Code Generator");
    assert_eq!(selection.reason, "code");
}

#[rstest]
#[case("Code Generator")]
#[case(r#"{"agent": "Code Generator"}"#)]
#[case("}{")]
#[case("")]
fn malformed_selection_is_rejected(#[case] reply: &str) {
    assert!(RoutingSelection::from_reply(reply).is_err());
}

// ── Dispatch state machine ─────────────────────────────────────────

#[rstest]
#[case(DispatchState::Routing, DispatchState::Dispatching)]
#[case(DispatchState::Dispatching, DispatchState::Succeeded)]
#[case(DispatchState::Dispatching, DispatchState::FailedQuota)]
#[case(DispatchState::Dispatching, DispatchState::FailedOther)]
fn allowed_transitions_succeed(#[case] from: DispatchState, #[case] to: DispatchState) {
    assert_eq!(from.transition_to(to), Ok(to));
}

#[rstest]
#[case(DispatchState::Routing, DispatchState::Succeeded)]
#[case(DispatchState::Dispatching, DispatchState::Routing)]
#[case(DispatchState::Succeeded, DispatchState::Dispatching)]
#[case(DispatchState::FailedQuota, DispatchState::FailedOther)]
fn disallowed_transitions_are_rejected(#[case] from: DispatchState, #[case] to: DispatchState) {
    let error = from.transition_to(to).expect_err("transition should be rejected");

    assert_eq!(error.from, from);
    assert_eq!(error.to, to);
}

#[rstest]
fn failure_classes_map_to_terminal_states() {
    assert_eq!(
        DispatchState::failed(FailureClass::Quota),
        DispatchState::FailedQuota
    );
    assert_eq!(
        DispatchState::failed(FailureClass::Other),
        DispatchState::FailedOther
    );
    assert!(DispatchState::FailedQuota.is_terminal());
    assert!(!DispatchState::Dispatching.is_terminal());
}
