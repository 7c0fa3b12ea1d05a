//! Request dispatcher
//!
//! One turn, end to end: authenticate the envelope, load the session, fetch
//! whatever list record the intent needs, run the state machine, write the
//! list effects, persist the session, render the reply.
//!
//! List writes always happen before the session write. A failure in either
//! store ends the turn with an apology and nothing further is written.

use tracing::{debug, warn};

use crate::handlers::speech::{self, SpeechRenderer};
use crate::middleware::{AuthMiddleware, LoggingMiddleware};
use crate::models::{RequestEnvelope, RequestKind, ResponseEnvelope, Session, SessionAttributes};
use crate::state::machine::{self, Effect, Fetched, Lookup};
use crate::state::{AppContext, Intent};
use crate::utils::errors::{GeneraListError, Result};
use crate::utils::logging::{log_store_failure, log_turn};

/// Routes platform envelopes through the state machine
#[derive(Debug, Clone)]
pub struct Dispatcher {
    ctx: AppContext,
    auth: AuthMiddleware,
    logging: LoggingMiddleware,
    speech: SpeechRenderer,
}

impl Dispatcher {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            auth: AuthMiddleware::new(&ctx.settings.skill),
            logging: LoggingMiddleware::default(),
            speech: SpeechRenderer::new(&ctx.settings.skill.card_title),
            ctx,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Handle one inbound envelope.
    ///
    /// Protocol errors (foreign application, unknown request or intent) are
    /// returned as `Err`. Store failures are not: they produce an apology
    /// response that ends the conversation.
    pub async fn handle(&self, envelope: RequestEnvelope) -> Result<ResponseEnvelope> {
        self.logging.log_request(&envelope);
        let user_id = envelope.session.user.user_id.trim().to_string();

        let (kind, intent) = match self.parse(&envelope) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.logging.log_error(&e, &user_id);
                return Err(e);
            }
        };

        let timer = self.logging.track_turn(&user_id);
        let result = self.run_turn(&user_id, &envelope, kind, intent.as_ref()).await;
        if let Some(timer) = timer {
            timer.complete(result.is_ok());
        }

        match result {
            Ok(response) => Ok(response),
            Err(e) if e.is_store_failure() => {
                let stage = intent.as_ref().map_or(kind.as_str(), Intent::name);
                log_store_failure(&user_id, stage, &e);
                Ok(self.speech.failure())
            }
            Err(e) => {
                self.logging.log_error(&e, &user_id);
                Err(e)
            }
        }
    }

    /// Validate the envelope and decode its request
    fn parse(&self, envelope: &RequestEnvelope) -> Result<(RequestKind, Option<Intent>)> {
        self.auth.verify(envelope)?;

        let kind = envelope.request.kind()?;
        let intent = match kind {
            RequestKind::Intent => {
                let payload = envelope
                    .request
                    .intent
                    .as_ref()
                    .ok_or_else(|| GeneraListError::InvalidInput("intent request without an intent".to_string()))?;
                Some(Intent::from_payload(payload)?)
            }
            RequestKind::Launch | RequestKind::SessionEnded => None,
        };

        Ok((kind, intent))
    }

    async fn run_turn(
        &self,
        user_id: &str,
        envelope: &RequestEnvelope,
        kind: RequestKind,
        intent: Option<&Intent>,
    ) -> Result<ResponseEnvelope> {
        let before = self.load_session(user_id, envelope).await?;

        let outcome = match (kind, intent) {
            (RequestKind::Intent, Some(intent)) => {
                let fetched = self.fetch(&before, intent).await?;
                machine::transition(&before, intent, fetched)
            }
            (RequestKind::SessionEnded, _) => {
                debug!(user_id = user_id, reason = ?envelope.request.reason, "Session ended by platform");
                self.persist_session(&before, &before).await?;
                log_turn(user_id, kind.as_str(), None, before.task_label(), before.task_label(), true);
                return Ok(speech::session_ended(&before));
            }
            _ => machine::launch(&before),
        };

        self.apply_effects(user_id, &outcome.effects).await?;
        self.persist_session(&before, &outcome.session).await?;

        log_turn(
            user_id,
            kind.as_str(),
            intent.map(Intent::name),
            before.task_label(),
            outcome.session.task_label(),
            outcome.reply.ends_session(),
        );

        Ok(self.speech.respond(&outcome.session, &outcome.reply))
    }

    /// Session for this turn: the store at the start of a conversation, the
    /// echoed attributes afterwards. Attributes that are missing or fail to
    /// validate fall back to the store.
    async fn load_session(&self, user_id: &str, envelope: &RequestEnvelope) -> Result<Session> {
        if !envelope.session.is_new {
            if let Some(value) = echoed_attributes(envelope) {
                let decoded = serde_json::from_value::<SessionAttributes>(value.clone())
                    .map_err(GeneraListError::from)
                    .and_then(|attributes| Session::from_attributes(user_id, &attributes));
                match decoded {
                    Ok(session) => return Ok(session),
                    Err(e) => warn!(user_id = user_id, error = %e, "Ignoring invalid session attributes"),
                }
            }
        }

        let stored = self.ctx.sessions.get(user_id).await?;
        Ok(stored.unwrap_or_else(|| Session::new(user_id)))
    }

    async fn fetch(&self, session: &Session, intent: &Intent) -> Result<Fetched> {
        let fetched = match machine::required_lookup(session, intent) {
            None => Fetched::Nothing,
            Some(Lookup::List(name)) => Fetched::List(self.ctx.lists.get(&session.user_id, &name).await?),
            Some(Lookup::ListNames) => Fetched::ListNames(self.ctx.lists.list_names(&session.user_id).await?),
        };
        Ok(fetched)
    }

    async fn apply_effects(&self, user_id: &str, effects: &[Effect]) -> Result<()> {
        for effect in effects {
            match effect {
                Effect::PutList(list) => self.ctx.lists.put(list).await?,
                Effect::UpdatePosition {
                    list_name,
                    current_step,
                } => {
                    self.ctx
                        .lists
                        .update_position(user_id, list_name, *current_step)
                        .await?
                }
                Effect::DeleteList { list_name } => {
                    if !self.ctx.lists.delete(user_id, list_name).await? {
                        debug!(user_id = user_id, list_name = %list_name, "List was already gone");
                    }
                }
            }
        }
        Ok(())
    }

    /// Write the session back, as a partial update when only the step moved
    async fn persist_session(&self, before: &Session, after: &Session) -> Result<()> {
        if let Some(patch) = after.patch_from(before) {
            if self.ctx.sessions.update(&after.user_id, &patch).await? {
                return Ok(());
            }
        }
        self.ctx.sessions.put(after).await
    }
}

/// Echoed attributes worth decoding; an empty object counts as absent
fn echoed_attributes(envelope: &RequestEnvelope) -> Option<&serde_json::Value> {
    envelope
        .session
        .attributes
        .as_ref()
        .filter(|value| value.as_object().is_some_and(|fields| !fields.is_empty()))
}
