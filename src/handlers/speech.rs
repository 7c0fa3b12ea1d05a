//! Speech rendering
//!
//! Turns state machine replies into the outbound envelope: spoken text, a
//! reprompt while the conversation stays open, and a simple display card.

use crate::models::{Card, OutputSpeech, Reprompt, ResponseBody, ResponseEnvelope, Session, SessionAttributes, Task};
use crate::models::envelope::RESPONSE_VERSION;
use crate::state::{ListAction, Reply};
use crate::utils::helpers::{join_for_speech, truncate_text};

const APOLOGY: &str = "Sorry, something went wrong on my end. Please try again later.";
const DEFAULT_REPROMPT: &str = "What would you like to do?";
/// Longest card body the platform displays
const CARD_LIMIT: usize = 8000;

/// Renders replies with a fixed card title
#[derive(Debug, Clone)]
pub struct SpeechRenderer {
    card_title: String,
}

impl SpeechRenderer {
    pub fn new(card_title: impl Into<String>) -> Self {
        Self {
            card_title: card_title.into(),
        }
    }

    /// Response for a completed turn
    pub fn respond(&self, session: &Session, reply: &Reply) -> ResponseEnvelope {
        let text = speech(reply);
        let should_end_session = reply.ends_session();
        let reprompt = (!should_end_session).then(|| Reprompt {
            output_speech: OutputSpeech::plain(reprompt(reply)),
        });

        envelope(
            session.to_attributes(),
            ResponseBody {
                card: Some(Card::simple(&self.card_title, truncate_text(&text, CARD_LIMIT))),
                output_speech: Some(OutputSpeech::plain(text)),
                reprompt,
                should_end_session,
            },
        )
    }

    /// Response for a turn that failed in a store. Ends the conversation so
    /// the next one starts from the persisted session.
    pub fn failure(&self) -> ResponseEnvelope {
        envelope(
            SessionAttributes::default(),
            ResponseBody {
                output_speech: Some(OutputSpeech::plain(APOLOGY)),
                should_end_session: true,
                ..ResponseBody::default()
            },
        )
    }
}

/// Response to a session-ended notification; the platform ignores its body
pub fn session_ended(session: &Session) -> ResponseEnvelope {
    envelope(
        session.to_attributes(),
        ResponseBody {
            should_end_session: true,
            ..ResponseBody::default()
        },
    )
}

fn envelope(session_attributes: SessionAttributes, response: ResponseBody) -> ResponseEnvelope {
    ResponseEnvelope {
        version: RESPONSE_VERSION.to_string(),
        session_attributes,
        response,
    }
}

fn steps(count: u32) -> String {
    if count == 1 {
        "1 step".to_string()
    } else {
        format!("{} steps", count)
    }
}

fn verb(action: ListAction) -> &'static str {
    match action {
        ListAction::Create => "create",
        ListAction::Load => "load",
        ListAction::Edit => "edit",
        ListAction::Delete => "delete",
    }
}

/// Spoken text for a reply
pub fn speech(reply: &Reply) -> String {
    match reply {
        Reply::Welcome { task: None, .. } | Reply::Welcome { list_name: None, .. } => {
            "Welcome to GeneraList. You can create a new list or load one you have saved.".to_string()
        }
        Reply::Welcome {
            task: Some(Task::Play),
            list_name: Some(name),
        } => format!("Welcome back. Your list {} is loaded. Say next to continue.", name),
        Reply::Welcome {
            task: Some(_),
            list_name: Some(name),
        } => format!(
            "Welcome back. You are still working on {}. Add an item or say save when you are done.",
            name
        ),
        Reply::Help { task: None } => "Say create a list called groceries to start a new list, or load groceries \
             to play one back. To hear your lists, ask what lists do I have."
            .to_string(),
        Reply::Help {
            task: Some(Task::Create | Task::Edit),
        } => "Say add, followed by an item, to put it at the end of the list. Say save when you are done, \
             or cancel to stop."
            .to_string(),
        Reply::Help { task: Some(Task::Play) } => "Say next or previous to move through the list. \
             Say start over to go back to the beginning."
            .to_string(),
        Reply::Goodbye => "Goodbye.".to_string(),
        Reply::AskListName(action) => format!("What is the name of the list you want to {}?", verb(*action)),
        Reply::AskItem { list_name } => format!("What item would you like to add to {}?", list_name),
        Reply::AlreadyCurrent { list_name } => format!("{} is already your current list.", list_name),
        Reply::ListExists { list_name } => format!(
            "You already have a list called {}. Delete it first if you want to start it again.",
            list_name
        ),
        Reply::Created { list_name } => format!("Created a new list called {}. What is the first item?", list_name),
        Reply::ItemAdded { list_name, step, item } => {
            format!("Added {} as step {} of {}.", item, step, list_name)
        }
        Reply::NotCreatingOrEditing => "You can only add items while creating or editing a list.".to_string(),
        Reply::Saved {
            list_name,
            number_of_steps,
        } => format!("Saved {} with {}. Say next to hear the first one.", list_name, steps(*number_of_steps)),
        Reply::NothingToSave => "There is nothing to save right now.".to_string(),
        Reply::CreateCancelled { list_name } => format!("Cancelled. The list {} was not kept.", list_name),
        Reply::EditCancelled { list_name } => format!("Stopped editing {}.", list_name),
        Reply::Cleared => "Okay.".to_string(),
        Reply::Loaded {
            list_name,
            number_of_steps,
            current_step: 0,
        } => format!("Loaded {} with {}. Say next to begin.", list_name, steps(*number_of_steps)),
        Reply::Loaded {
            list_name,
            number_of_steps,
            current_step,
        } => format!(
            "Loaded {}. You are on step {} of {}. Say next to continue.",
            list_name, current_step, number_of_steps
        ),
        Reply::AlreadyLoaded { list_name } => format!("{} is already loaded.", list_name),
        Reply::ListNotFound { list_name } => format!("I could not find a list called {}.", list_name),
        Reply::FinishTaskFirst { task, list_name } => {
            let doing = if *task == Task::Create { "creating" } else { "editing" };
            format!("You are still {} {}. Say save or cancel first.", doing, list_name)
        }
        Reply::EditStarted {
            list_name,
            number_of_steps,
        } => format!(
            "Editing {}, which has {}. New items go at the end.",
            list_name,
            steps(*number_of_steps)
        ),
        Reply::Step { step, item } => format!("Step {}: {}", step, item),
        Reply::EndOfList { list_name } => format!("That was the last step of {}. Goodbye.", list_name),
        Reply::BeginningOfList { list_name } => {
            format!("You are at the beginning of {}. Say next to hear the first step.", list_name)
        }
        Reply::NoListLoaded => "There is no list loaded. Load a list first.".to_string(),
        Reply::Peek { step, item } => format!("Step {} is {}.", step, item),
        Reply::AtEnd { list_name } => format!("There are no more steps in {}.", list_name),
        Reply::AtBeginning { list_name } => format!("There is no earlier step in {}.", list_name),
        Reply::StartedOver { list_name } => format!("Starting {} over. Say next to hear the first step.", list_name),
        Reply::Deleted { list_name } => format!("Deleted the list {}.", list_name),
        Reply::ListNames(names) if names.is_empty() => "You do not have any lists yet.".to_string(),
        Reply::ListNames(names) => format!("Your lists are {}.", join_for_speech(names)),
    }
}

fn reprompt(reply: &Reply) -> String {
    match reply {
        Reply::AskListName(_) => "Which list?".to_string(),
        Reply::Created { .. } | Reply::AskItem { .. } => "Say add, followed by an item.".to_string(),
        Reply::ItemAdded { .. } | Reply::EditStarted { .. } => {
            "Add another item, or say save when you are done.".to_string()
        }
        Reply::FinishTaskFirst { .. } => "Say save or cancel.".to_string(),
        Reply::Saved { .. }
        | Reply::Loaded { .. }
        | Reply::Step { .. }
        | Reply::Peek { .. }
        | Reply::BeginningOfList { .. }
        | Reply::StartedOver { .. } => "Say next to continue.".to_string(),
        _ => DEFAULT_REPROMPT.to_string(),
    }
}
