//! Creating a list and playing it back

use crate::helpers::*;

#[tokio::test]
async fn test_groceries_round_trip() {
    let ctx = TestContext::new();
    let mut convo = ctx.conversation("user-1");

    let welcome = convo.say(launch_request()).await;
    assert!(welcome.starts_with("Welcome to GeneraList"));

    assert_eq!(
        convo.say(create_list("Groceries")).await,
        "Created a new list called groceries. What is the first item?"
    );
    assert_eq!(convo.say(add_item("milk")).await, "Added milk as step 1 of groceries.");
    convo.send(add_item("eggs")).await;
    convo.send(add_item("bread")).await;

    let saved = convo.send(bare("SaveListIntent")).await;
    assert_eq!(
        saved.speech_text(),
        Some("Saved groceries with 3 steps. Say next to hear the first one.")
    );
    assert_eq!(saved.session_attributes.current_task.as_deref(), Some("PLAY"));
    assert_eq!(saved.session_attributes.current_step, "0");
    assert_eq!(saved.session_attributes.number_of_steps, "3");

    let stored = ctx.stored_list("user-1", "groceries").await.unwrap();
    assert_eq!(stored.items, vec!["milk", "eggs", "bread"]);
    assert_eq!(stored.current_step, 0);

    assert_eq!(convo.say(bare("AMAZON.NextIntent")).await, "Step 1: milk");
    assert_eq!(convo.say(bare("AMAZON.NextIntent")).await, "Step 2: eggs");
    assert_eq!(convo.say(bare("NextStepIntent")).await, "Step 3: bread");

    let end = convo.send(bare("AMAZON.NextIntent")).await;
    assert!(end.response.should_end_session);
    assert!(end.speech_text().unwrap().contains("last step of groceries"));
    assert!(end.reprompt_text().is_none());

    assert_eq!(ctx.stored_list("user-1", "groceries").await.unwrap().current_step, 3);
}

#[tokio::test]
async fn test_resume_after_stop() {
    let ctx = TestContext::new();
    ctx.seed_list("user-1", "chores", &["dishes", "laundry", "vacuum"]).await;
    let mut convo = ctx.conversation("user-1");

    assert_eq!(
        convo.say(load_list("Chores")).await,
        "Loaded chores with 3 steps. Say next to begin."
    );
    convo.send(bare("AMAZON.NextIntent")).await;
    convo.send(bare("AMAZON.NextIntent")).await;

    let bye = convo.send(bare("AMAZON.StopIntent")).await;
    assert_eq!(bye.speech_text(), Some("Goodbye."));
    assert!(bye.response.should_end_session);
    assert!(convo.is_new);

    let welcome = convo.say(launch_request()).await;
    assert_eq!(welcome, "Welcome back. Your list chores is loaded. Say next to continue.");
    assert_eq!(convo.say(bare("AMAZON.NextIntent")).await, "Step 3: vacuum");
}

#[tokio::test]
async fn test_load_resumes_persisted_position() {
    let ctx = TestContext::new();
    ctx.seed_list("user-1", "chores", &["dishes", "laundry", "vacuum"]).await;

    let mut first = ctx.conversation("user-1");
    first.send(load_list("chores")).await;
    first.send(bare("AMAZON.NextIntent")).await;
    first.send(bare("AMAZON.CancelIntent")).await;

    let mut second = ctx.conversation("user-1");
    assert_eq!(
        second.say(load_list("chores")).await,
        "Loaded chores. You are on step 1 of 3. Say next to continue."
    );
    assert_eq!(second.say(bare("AMAZON.NextIntent")).await, "Step 2: laundry");
}

#[tokio::test]
async fn test_step_counters_past_nine() {
    let ctx = TestContext::new();
    let items: Vec<String> = (1..=10).map(|n| format!("item {}", n)).collect();
    let item_refs: Vec<&str> = items.iter().map(String::as_str).collect();
    ctx.seed_list("user-1", "long", &item_refs).await;

    let mut convo = ctx.conversation("user-1");
    convo.send(load_list("long")).await;
    for _ in 0..9 {
        convo.send(bare("AMAZON.NextIntent")).await;
    }

    assert_eq!(convo.say(bare("AMAZON.NextIntent")).await, "Step 10: item 10");
    let fields = ctx.sessions.raw_fields("user-1").await.unwrap();
    assert_eq!(fields.get("currentStep").map(String::as_str), Some("10"));
    assert_eq!(fields.get("numberOfSteps").map(String::as_str), Some("10"));
}

#[tokio::test]
async fn test_previous_peek_and_start_over() {
    let ctx = TestContext::new();
    ctx.seed_list("user-1", "recipe", &["chop", "fry", "serve"]).await;
    let mut convo = ctx.conversation("user-1");

    convo.send(load_list("recipe")).await;
    convo.send(bare("AMAZON.NextIntent")).await;
    convo.send(bare("AMAZON.NextIntent")).await;

    assert_eq!(convo.say(bare("PeekNextIntent")).await, "Step 3 is serve.");
    assert_eq!(convo.say(bare("ReviewPreviousIntent")).await, "Step 1 is chop.");
    assert_eq!(ctx.stored_list("user-1", "recipe").await.unwrap().current_step, 2);

    assert_eq!(convo.say(bare("AMAZON.PreviousIntent")).await, "Step 1: chop");
    assert!(convo
        .say(bare("AMAZON.PreviousIntent"))
        .await
        .starts_with("You are at the beginning of recipe"));

    convo.send(bare("AMAZON.NextIntent")).await;
    convo.send(bare("AMAZON.NextIntent")).await;
    assert!(convo.say(bare("AMAZON.StartOverIntent")).await.starts_with("Starting recipe over"));
    assert_eq!(ctx.stored_list("user-1", "recipe").await.unwrap().current_step, 0);
    assert_eq!(convo.say(bare("AMAZON.NextIntent")).await, "Step 1: chop");
}

#[tokio::test]
async fn test_session_ended_keeps_progress() {
    let ctx = TestContext::new();
    let mut convo = ctx.conversation("user-1");

    convo.send(create_list("packing")).await;
    convo.send(add_item("socks")).await;

    let ended = convo.send(session_ended_request("USER_INITIATED")).await;
    assert!(ended.response.should_end_session);
    assert!(ended.speech_text().is_none());

    let fields = ctx.sessions.raw_fields("user-1").await.unwrap();
    assert_eq!(fields.get("currentTask").map(String::as_str), Some("CREATE"));
    assert_eq!(fields.get("currentList").map(String::as_str), Some("packing"));

    let welcome = convo.say(launch_request()).await;
    assert!(welcome.contains("still working on packing"));
    assert_eq!(convo.say(add_item("toothbrush")).await, "Added toothbrush as step 2 of packing.");
}
