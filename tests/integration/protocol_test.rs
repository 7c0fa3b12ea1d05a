//! Envelopes the dispatcher refuses

use assert_matches::assert_matches;
use serde_json::json;
use GeneraList::GeneraListError;

use crate::helpers::*;

#[tokio::test]
async fn test_foreign_application_is_rejected() {
    let ctx = TestContext::new();
    let mut raw = envelope_json("user-1", true, None, launch_request());
    raw["session"]["application"]["applicationId"] = json!("amzn1.ask.skill.someone-else");

    let result = ctx.dispatcher.handle(parse_envelope(raw)).await;
    assert_matches!(result, Err(GeneraListError::InvalidApplication { .. }));
    assert!(ctx.sessions.raw_fields("user-1").await.is_none());
}

#[tokio::test]
async fn test_unknown_intent_is_rejected() {
    let ctx = TestContext::new();
    let mut convo = ctx.conversation("user-1");

    let result = convo.try_send(bare("OrderPizzaIntent")).await;
    assert_matches!(result, Err(GeneraListError::UnknownIntent(name)) if name == "OrderPizzaIntent");
    assert!(ctx.sessions.raw_fields("user-1").await.is_none());
}

#[tokio::test]
async fn test_unsupported_request_type() {
    let ctx = TestContext::new();
    let mut convo = ctx.conversation("user-1");

    let result = convo
        .try_send(json!({ "type": "CanFulfillIntentRequest", "requestId": "req-1" }))
        .await;
    assert_matches!(result, Err(GeneraListError::UnsupportedRequest(_)));
}

#[tokio::test]
async fn test_intent_request_without_intent() {
    let ctx = TestContext::new();
    let mut convo = ctx.conversation("user-1");

    let result = convo.try_send(json!({ "type": "IntentRequest" })).await;
    assert_matches!(result, Err(GeneraListError::InvalidInput(_)));
}

#[tokio::test]
async fn test_short_request_types_are_accepted() {
    let ctx = TestContext::new();
    let mut convo = ctx.conversation("user-1");

    let response = tokio_test::assert_ok!(convo.try_send(json!({ "type": "Launch" })).await);
    assert!(!response.response.should_end_session);
}

#[tokio::test]
async fn test_first_contact_creates_session() {
    let ctx = TestContext::new();
    let mut convo = ctx.conversation("user-1");

    convo.send(launch_request()).await;
    let fields = ctx.sessions.raw_fields("user-1").await.unwrap();
    assert_eq!(fields.get("currentStep").map(String::as_str), Some("0"));
    assert!(fields.get("currentTask").is_none());
}
