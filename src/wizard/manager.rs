//! WizardManager — owns per-conversation wizard state and turns inbound
//! events into replies.
//!
//! Events for the same conversation are serialised by a per-session mutex;
//! different conversations are handled concurrently.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::channels::{Channel, IncomingEvent};
use crate::config::WizardSettings;
use crate::error::ChannelError;
use crate::submission::Submission;

use super::draft::Reporter;
use super::event::WizardEvent;
use super::machine::{transition, ActiveWizard, Outcome};
use super::prompts::render;
use super::state::WizardStep;

type Session = Arc<Mutex<Option<ActiveWizard>>>;

/// Coordinates the wizard across conversations.
pub struct WizardManager {
    channel: Arc<dyn Channel>,
    settings: WizardSettings,
    submission: Arc<Submission>,
    sessions: RwLock<HashMap<String, Session>>,
}

impl WizardManager {
    pub fn new(
        channel: Arc<dyn Channel>,
        settings: WizardSettings,
        submission: Arc<Submission>,
    ) -> Self {
        Self {
            channel,
            settings,
            submission,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Current step of a conversation, `None` when idle.
    pub async fn current_step(&self, chat_id: &str, user_id: &str) -> Option<WizardStep> {
        let session = self
            .sessions
            .read()
            .await
            .get(&session_key(chat_id, user_id))
            .cloned()?;
        let guard = session.lock().await;
        guard.as_ref().map(|w| w.step)
    }

    /// Number of conversations with an active wizard.
    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Handle one inbound event to completion.
    pub async fn handle(&self, event: IncomingEvent) -> Result<Outcome, ChannelError> {
        let Some(wizard_event) = WizardEvent::from_incoming(&event) else {
            tracing::debug!(chat_id = %event.chat_id, kind = ?event.kind, "Unhandled event");
            self.acknowledge(&event, None).await;
            return Ok(Outcome::Ignored);
        };

        let key = session_key(&event.chat_id, &event.user_id);
        let session = self.session(&key).await;

        let result = {
            let mut guard = session.lock().await;
            let reporter = Reporter::from(&event);
            let (next, outcome) = transition(guard.take(), wizard_event, &reporter, &self.settings);
            *guard = next;

            tracing::debug!(
                chat_id = %event.chat_id,
                step = ?guard.as_ref().map(|w| w.step),
                outcome = ?outcome,
                "Wizard event handled"
            );

            self.respond(&event, guard.as_ref(), &outcome)
                .await
                .map(|()| outcome)
        };

        self.release(&key, session).await;
        result
    }

    async fn respond(
        &self,
        event: &IncomingEvent,
        wizard: Option<&ActiveWizard>,
        outcome: &Outcome,
    ) -> Result<(), ChannelError> {
        let reply = render(outcome, wizard, &self.settings);
        self.acknowledge(event, reply.alert.as_deref()).await;

        let edit_target = event.editable_message_id();
        if let Some(message) = reply.message {
            let delivered = self
                .channel
                .deliver(&event.chat_id, message.editing(edit_target).into())
                .await;
            match delivered {
                Ok(()) => {}
                // A confirmed draft is already out of the session; it must
                // still go through the pipeline.
                Err(e) if matches!(outcome, Outcome::Submitted(_)) => {
                    tracing::warn!(chat_id = %event.chat_id, error = %e, "Failed to send progress message");
                }
                Err(e) => return Err(e),
            }
        }

        if let Outcome::Submitted(draft) = outcome {
            tracing::info!(
                chat_id = %event.chat_id,
                photos = draft.photos.len(),
                "Report confirmed"
            );
            let report = self.submission.submit(self.channel.as_ref(), draft).await;
            self.channel
                .deliver(&event.chat_id, report.user_message().editing(edit_target).into())
                .await?;
        }

        Ok(())
    }

    async fn acknowledge(&self, event: &IncomingEvent, alert: Option<&str>) {
        let Some(callback_id) = event.callback_id() else {
            return;
        };
        if let Err(e) = self.channel.acknowledge(callback_id, alert).await {
            tracing::warn!(chat_id = %event.chat_id, error = %e, "Failed to acknowledge button");
        }
    }

    async fn session(&self, key: &str) -> Session {
        if let Some(session) = self.sessions.read().await.get(key) {
            return Arc::clone(session);
        }
        let mut sessions = self.sessions.write().await;
        Arc::clone(sessions.entry(key.to_string()).or_default())
    }

    /// Drop an idle session nobody else is waiting on.
    async fn release(&self, key: &str, session: Session) {
        let mut sessions = self.sessions.write().await;
        // One reference in the map, one held here.
        if Arc::strong_count(&session) > 2 {
            return;
        }
        let idle = match session.try_lock() {
            Ok(guard) => guard.is_none(),
            Err(_) => false,
        };
        if idle {
            sessions.remove(key);
        }
    }
}

fn session_key(chat_id: &str, user_id: &str) -> String {
    format!("{chat_id}:{user_id}")
}
