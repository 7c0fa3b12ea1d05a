//! Store failures and session recovery

use std::sync::Arc;

use serde_json::json;
use GeneraList::models::UserList;

use crate::helpers::*;

const APOLOGY: &str = "Sorry, something went wrong on my end. Please try again later.";

#[tokio::test]
async fn test_put_failure_ends_turn() {
    let ctx = TestContext::with_list_store(Arc::new(FailingListStore::new(ListOperation::Put)));
    let mut convo = ctx.conversation("user-1");

    let response = convo.send(create_list("groceries")).await;
    assert_eq!(response.speech_text(), Some(APOLOGY));
    assert!(response.response.should_end_session);

    // the session is not committed after a failed list write
    assert!(ctx.sessions.raw_fields("user-1").await.is_none());
}

#[tokio::test]
async fn test_get_failure_ends_turn() {
    let ctx = TestContext::with_list_store(Arc::new(FailingListStore::new(ListOperation::Get)));
    let mut convo = ctx.conversation("user-1");

    let response = convo.send(load_list("groceries")).await;
    assert_eq!(response.speech_text(), Some(APOLOGY));
    assert!(response.response.should_end_session);
}

#[tokio::test]
async fn test_position_failure_keeps_previous_session() {
    let store = Arc::new(FailingListStore::new(ListOperation::UpdatePosition));
    store
        .seed(&UserList::new("user-1", "chores").with_items(vec!["dishes".to_string(), "laundry".to_string()]))
        .await;
    let ctx = TestContext::with_list_store(store);
    let mut convo = ctx.conversation("user-1");

    convo.send(load_list("chores")).await;
    let response = convo.send(bare("AMAZON.NextIntent")).await;
    assert_eq!(response.speech_text(), Some(APOLOGY));

    let fields = ctx.sessions.raw_fields("user-1").await.unwrap();
    assert_eq!(fields.get("currentTask").map(String::as_str), Some("PLAY"));
    assert_eq!(fields.get("currentStep").map(String::as_str), Some("0"));
}

#[tokio::test]
async fn test_list_names_failure_ends_turn() {
    let ctx = TestContext::with_list_store(Arc::new(FailingListStore::new(ListOperation::ListNames)));
    let mut convo = ctx.conversation("user-1");

    let response = convo.send(bare("ListListsIntent")).await;
    assert!(response.response.should_end_session);
    assert_eq!(response.speech_text(), Some(APOLOGY));
}

#[tokio::test]
async fn test_invalid_attributes_fall_back_to_store() {
    let ctx = TestContext::new();
    ctx.seed_list("user-1", "chores", &["dishes", "laundry", "vacuum"]).await;
    let mut convo = ctx.conversation("user-1");
    convo.send(load_list("chores")).await;
    convo.send(bare("AMAZON.NextIntent")).await;

    // a step past the end of the list cannot be trusted
    let broken = json!({
        "currentTask": "PLAY",
        "currentList": "chores",
        "currentStep": "7",
        "numberOfSteps": "3",
        "listItems": { "1": "dishes", "2": "laundry", "3": "vacuum" }
    });
    let envelope = parse_envelope(envelope_json("user-1", false, Some(broken), bare("AMAZON.NextIntent")));
    let response = ctx.dispatcher.handle(envelope).await.unwrap();
    assert_eq!(response.speech_text(), Some("Step 2: laundry"));
}

#[tokio::test]
async fn test_empty_attributes_fall_back_to_store() {
    let ctx = TestContext::new();
    ctx.seed_list("user-1", "chores", &["dishes", "laundry"]).await;
    let mut convo = ctx.conversation("user-1");
    convo.send(load_list("chores")).await;

    let envelope = parse_envelope(envelope_json("user-1", false, Some(json!({})), bare("AMAZON.NextIntent")));
    let response = ctx.dispatcher.handle(envelope).await.unwrap();
    assert_eq!(response.speech_text(), Some("Step 1: dishes"));
}

#[tokio::test]
async fn test_legacy_none_sentinel_is_idle() {
    let ctx = TestContext::new();
    let attributes = json!({
        "currentTask": "NONE",
        "currentList": "NONE",
        "currentStep": "0",
        "numberOfSteps": "0",
        "listItems": {}
    });

    let envelope = parse_envelope(envelope_json("user-1", false, Some(attributes), bare("AMAZON.NextIntent")));
    let response = ctx.dispatcher.handle(envelope).await.unwrap();
    assert_eq!(
        response.speech_text(),
        Some("There is no list loaded. Load a list first.")
    );
    assert!(response.session_attributes.current_task.is_none());
}
