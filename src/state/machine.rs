//! Session state machine
//!
//! Pure decision logic: given the current session, an intent and whatever the
//! dispatcher fetched from the list store, produce the next session, the list
//! writes to apply and the reply to speak. Nothing in here performs I/O.
//!
//! The dispatcher asks [`required_lookup`] which record a turn needs, fetches
//! it, then calls [`transition`] with the result.

use crate::models::{Session, Task, UserList};
use crate::state::intent::Intent;

/// Store read a transition needs before it can run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    List(String),
    ListNames,
}

/// Result of a [`Lookup`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    Nothing,
    List(Option<UserList>),
    ListNames(Vec<String>),
}

impl Fetched {
    fn into_list(self) -> Option<UserList> {
        match self {
            Fetched::List(list) => list,
            _ => None,
        }
    }
}

/// List store write, applied before the session is persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PutList(UserList),
    UpdatePosition { list_name: String, current_step: u32 },
    DeleteList { list_name: String },
}

/// What the user is asked to name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Create,
    Load,
    Edit,
    Delete,
}

/// Response content of a turn. Rendered into speech by the handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Welcome { task: Option<Task>, list_name: Option<String> },
    Help { task: Option<Task> },
    Goodbye,
    AskListName(ListAction),
    AskItem { list_name: String },
    AlreadyCurrent { list_name: String },
    ListExists { list_name: String },
    Created { list_name: String },
    ItemAdded { list_name: String, step: u32, item: String },
    NotCreatingOrEditing,
    Saved { list_name: String, number_of_steps: u32 },
    NothingToSave,
    CreateCancelled { list_name: String },
    EditCancelled { list_name: String },
    Cleared,
    Loaded { list_name: String, number_of_steps: u32, current_step: u32 },
    AlreadyLoaded { list_name: String },
    ListNotFound { list_name: String },
    FinishTaskFirst { task: Task, list_name: String },
    EditStarted { list_name: String, number_of_steps: u32 },
    Step { step: u32, item: String },
    EndOfList { list_name: String },
    BeginningOfList { list_name: String },
    NoListLoaded,
    Peek { step: u32, item: String },
    AtEnd { list_name: String },
    AtBeginning { list_name: String },
    StartedOver { list_name: String },
    Deleted { list_name: String },
    ListNames(Vec<String>),
}

impl Reply {
    pub fn ends_session(&self) -> bool {
        matches!(self, Reply::Goodbye | Reply::EndOfList { .. })
    }
}

/// Outcome of one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub session: Session,
    pub effects: Vec<Effect>,
    pub reply: Reply,
}

impl Transition {
    fn new(session: Session, reply: Reply) -> Self {
        Self {
            session,
            effects: Vec::new(),
            reply,
        }
    }

    fn unchanged(session: &Session, reply: Reply) -> Self {
        Self::new(session.clone(), reply)
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// List named by an intent, falling back to the current list
fn target_list<'a>(session: &'a Session, explicit: &'a Option<String>) -> Option<&'a str> {
    explicit.as_deref().or_else(|| session.current_list())
}

/// The store read `transition` needs for this intent, if any
pub fn required_lookup(session: &Session, intent: &Intent) -> Option<Lookup> {
    match intent {
        Intent::Create { list_name: Some(name) } if !session.is_current_list(name) => {
            Some(Lookup::List(name.clone()))
        }
        Intent::Load { list_name: Some(name) } => match session.task() {
            Some(task) if task.is_staging() => None,
            Some(Task::Play) if session.is_current_list(name) => None,
            _ => Some(Lookup::List(name.clone())),
        },
        Intent::Edit { list_name } | Intent::Delete { list_name } => {
            target_list(session, list_name).map(|name| Lookup::List(name.to_string()))
        }
        Intent::ListLists => Some(Lookup::ListNames),
        _ => None,
    }
}

/// Reply for a launch request
pub fn launch(session: &Session) -> Transition {
    Transition::unchanged(
        session,
        Reply::Welcome {
            task: session.task(),
            list_name: session.current_list().map(str::to_string),
        },
    )
}

/// Apply an intent to a session
pub fn transition(session: &Session, intent: &Intent, fetched: Fetched) -> Transition {
    match intent {
        Intent::Create { list_name } => create(session, list_name.as_deref(), fetched.into_list()),
        Intent::Add { item } => add(session, item.as_deref()),
        Intent::Save => commit(session, Reply::NothingToSave),
        Intent::Stop => commit(session, Reply::Goodbye),
        Intent::Cancel => cancel(session),
        Intent::Load { list_name } => load(session, list_name.as_deref(), fetched.into_list()),
        Intent::Edit { list_name } => edit(session, target_list(session, list_name), fetched.into_list()),
        Intent::Next => next(session),
        Intent::Previous => previous(session),
        Intent::PeekNext => peek_next(session),
        Intent::ReviewPrevious => review_previous(session),
        Intent::StartOver => start_over(session),
        Intent::Delete { list_name } => delete(session, target_list(session, list_name), fetched.into_list()),
        Intent::Help => Transition::unchanged(session, Reply::Help { task: session.task() }),
        Intent::ListLists => {
            let names = match fetched {
                Fetched::ListNames(names) => names,
                _ => Vec::new(),
            };
            Transition::unchanged(session, Reply::ListNames(names))
        }
    }
}

fn create(session: &Session, list_name: Option<&str>, existing: Option<UserList>) -> Transition {
    let Some(name) = list_name else {
        return Transition::unchanged(session, Reply::AskListName(ListAction::Create));
    };
    if session.is_current_list(name) {
        return Transition::unchanged(session, Reply::AlreadyCurrent { list_name: name.to_string() });
    }
    if existing.is_some() {
        return Transition::unchanged(session, Reply::ListExists { list_name: name.to_string() });
    }

    let mut next = session.clone();
    next.begin(Task::Create, name, Vec::new(), 0);

    Transition::new(next, Reply::Created { list_name: name.to_string() })
        .with_effect(Effect::PutList(UserList::new(&session.user_id, name)))
}

fn add(session: &Session, item: Option<&str>) -> Transition {
    let list_name = match &session.activity {
        Some(activity) if activity.task.is_staging() => activity.list_name.clone(),
        _ => return Transition::unchanged(session, Reply::NotCreatingOrEditing),
    };
    let Some(item) = item else {
        return Transition::unchanged(session, Reply::AskItem { list_name });
    };

    let mut next = session.clone();
    next.items.push(item.to_string());
    next.current_step = next.number_of_steps();

    let list = UserList::new(&session.user_id, &list_name).with_items(next.items.clone());
    let step = next.current_step;

    Transition::new(
        next,
        Reply::ItemAdded {
            list_name,
            step,
            item: item.to_string(),
        },
    )
    .with_effect(Effect::PutList(list))
}

/// Save and stop both commit a staged list; outside of staging they differ
fn commit(session: &Session, otherwise: Reply) -> Transition {
    let list_name = match &session.activity {
        Some(activity) if activity.task.is_staging() => activity.list_name.clone(),
        _ => return Transition::unchanged(session, otherwise),
    };

    let mut next = session.clone();
    next.set_task(Task::Play);
    next.current_step = 0;

    let list = UserList::new(&session.user_id, &list_name).with_items(next.items.clone());
    let number_of_steps = next.number_of_steps();

    Transition::new(next, Reply::Saved { list_name, number_of_steps }).with_effect(Effect::PutList(list))
}

fn cancel(session: &Session) -> Transition {
    let mut next = session.clone();
    next.clear();

    match &session.activity {
        Some(activity) if activity.task == Task::Create => Transition::new(
            next,
            Reply::CreateCancelled {
                list_name: activity.list_name.clone(),
            },
        )
        .with_effect(Effect::DeleteList {
            list_name: activity.list_name.clone(),
        }),
        Some(activity) if activity.task == Task::Edit => Transition::new(
            next,
            Reply::EditCancelled {
                list_name: activity.list_name.clone(),
            },
        ),
        _ => Transition::new(next, Reply::Cleared),
    }
}

fn load(session: &Session, list_name: Option<&str>, found: Option<UserList>) -> Transition {
    let Some(name) = list_name else {
        return Transition::unchanged(session, Reply::AskListName(ListAction::Load));
    };

    match &session.activity {
        Some(activity) if activity.task.is_staging() => {
            return Transition::unchanged(
                session,
                Reply::FinishTaskFirst {
                    task: activity.task,
                    list_name: activity.list_name.clone(),
                },
            );
        }
        Some(activity) if activity.list_name == name => {
            return Transition::unchanged(session, Reply::AlreadyLoaded { list_name: name.to_string() });
        }
        _ => {}
    }

    let Some(list) = found else {
        return Transition::unchanged(session, Reply::ListNotFound { list_name: name.to_string() });
    };

    let number_of_steps = list.number_of_steps();
    let current_step = list.current_step.min(number_of_steps);
    let mut next = session.clone();
    next.begin(Task::Play, name, list.items, current_step);

    Transition::new(
        next,
        Reply::Loaded {
            list_name: name.to_string(),
            number_of_steps,
            current_step,
        },
    )
}

fn edit(session: &Session, target: Option<&str>, found: Option<UserList>) -> Transition {
    let Some(name) = target else {
        return Transition::unchanged(session, Reply::AskListName(ListAction::Edit));
    };
    let Some(list) = found else {
        return Transition::unchanged(session, Reply::ListNotFound { list_name: name.to_string() });
    };

    let number_of_steps = list.number_of_steps();
    let mut next = session.clone();
    next.begin(Task::Edit, name, list.items, number_of_steps);

    Transition::new(
        next,
        Reply::EditStarted {
            list_name: name.to_string(),
            number_of_steps,
        },
    )
}

/// Name of the list being played, or the reply refusing playback
fn playing_list(session: &Session) -> Result<String, Reply> {
    match &session.activity {
        None => Err(Reply::NoListLoaded),
        Some(activity) if activity.task.is_staging() => Err(Reply::FinishTaskFirst {
            task: activity.task,
            list_name: activity.list_name.clone(),
        }),
        Some(activity) => Ok(activity.list_name.clone()),
    }
}

/// Move the playback position and record the matching store update
fn move_to(session: &Session, list_name: String, step: u32, reply: Reply) -> Transition {
    let mut next = session.clone();
    next.current_step = step;

    Transition::new(next, reply).with_effect(Effect::UpdatePosition {
        list_name,
        current_step: step,
    })
}

fn spoken_item(session: &Session, step: u32) -> String {
    session.item(step).unwrap_or_default().to_string()
}

fn next(session: &Session) -> Transition {
    let list_name = match playing_list(session) {
        Ok(name) => name,
        Err(reply) => return Transition::unchanged(session, reply),
    };

    if session.current_step >= session.number_of_steps() {
        return Transition::unchanged(session, Reply::EndOfList { list_name });
    }

    let step = session.current_step + 1;
    let item = spoken_item(session, step);
    move_to(session, list_name, step, Reply::Step { step, item })
}

fn previous(session: &Session) -> Transition {
    let list_name = match playing_list(session) {
        Ok(name) => name,
        Err(reply) => return Transition::unchanged(session, reply),
    };

    if session.current_step < 2 {
        let reply = Reply::BeginningOfList {
            list_name: list_name.clone(),
        };
        if session.current_step == 0 {
            return Transition::unchanged(session, reply);
        }
        return move_to(session, list_name, 0, reply);
    }

    let step = session.current_step - 1;
    let item = spoken_item(session, step);
    move_to(session, list_name, step, Reply::Step { step, item })
}

fn peek_next(session: &Session) -> Transition {
    let list_name = match playing_list(session) {
        Ok(name) => name,
        Err(reply) => return Transition::unchanged(session, reply),
    };

    if session.current_step >= session.number_of_steps() {
        return Transition::unchanged(session, Reply::AtEnd { list_name });
    }

    let step = session.current_step + 1;
    Transition::unchanged(
        session,
        Reply::Peek {
            step,
            item: spoken_item(session, step),
        },
    )
}

fn review_previous(session: &Session) -> Transition {
    let list_name = match playing_list(session) {
        Ok(name) => name,
        Err(reply) => return Transition::unchanged(session, reply),
    };

    if session.current_step <= 1 {
        return Transition::unchanged(session, Reply::AtBeginning { list_name });
    }

    let step = session.current_step - 1;
    Transition::unchanged(
        session,
        Reply::Peek {
            step,
            item: spoken_item(session, step),
        },
    )
}

fn start_over(session: &Session) -> Transition {
    match playing_list(session) {
        Ok(list_name) => move_to(
            session,
            list_name.clone(),
            0,
            Reply::StartedOver { list_name },
        ),
        Err(reply) => Transition::unchanged(session, reply),
    }
}

fn delete(session: &Session, target: Option<&str>, found: Option<UserList>) -> Transition {
    let Some(name) = target else {
        return Transition::unchanged(session, Reply::AskListName(ListAction::Delete));
    };
    if found.is_none() {
        return Transition::unchanged(session, Reply::ListNotFound { list_name: name.to_string() });
    }

    let mut next = session.clone();
    if session.is_current_list(name) {
        next.clear();
    }

    Transition::new(next, Reply::Deleted { list_name: name.to_string() }).with_effect(Effect::DeleteList {
        list_name: name.to_string(),
    })
}
