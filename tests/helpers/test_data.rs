//! Test data helpers for building platform envelopes

use serde_json::{json, Map, Value};
use GeneraList::models::RequestEnvelope;

pub const TEST_APPLICATION_ID: &str = "amzn1.ask.skill.generalist-test";

/// Build a raw envelope around a request body
pub fn envelope_json(user_id: &str, is_new: bool, attributes: Option<Value>, request: Value) -> Value {
    let mut session = json!({
        "new": is_new,
        "sessionId": format!("session-{}", user_id),
        "application": { "applicationId": TEST_APPLICATION_ID },
        "user": { "userId": user_id }
    });
    if let Some(attributes) = attributes {
        session["attributes"] = attributes;
    }

    json!({
        "version": "1.0",
        "session": session,
        "request": request
    })
}

pub fn parse_envelope(value: Value) -> RequestEnvelope {
    serde_json::from_value(value).expect("test envelope should parse")
}

pub fn launch_request() -> Value {
    json!({ "type": "LaunchRequest", "requestId": "req-launch" })
}

pub fn session_ended_request(reason: &str) -> Value {
    json!({ "type": "SessionEndedRequest", "requestId": "req-ended", "reason": reason })
}

/// Intent request with the given slot values
pub fn intent_request(name: &str, slots: &[(&str, &str)]) -> Value {
    let slots: Map<String, Value> = slots
        .iter()
        .map(|(slot, value)| (slot.to_string(), json!({ "name": slot, "value": value })))
        .collect();

    json!({
        "type": "IntentRequest",
        "requestId": format!("req-{}", name),
        "intent": { "name": name, "slots": slots }
    })
}

pub fn create_list(name: &str) -> Value {
    intent_request("CreateListIntent", &[("listName", name)])
}

pub fn add_item(item: &str) -> Value {
    intent_request("AddItemIntent", &[("item", item)])
}

pub fn load_list(name: &str) -> Value {
    intent_request("LoadListIntent", &[("listName", name)])
}

pub fn delete_list(name: &str) -> Value {
    intent_request("DeleteListIntent", &[("listName", name)])
}

pub fn edit_list(name: &str) -> Value {
    intent_request("EditListIntent", &[("listName", name)])
}

/// Intent request without slots
pub fn bare(name: &str) -> Value {
    intent_request(name, &[])
}
