// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event routing for the Courier relay.
//!
//! The [`Relay`] is the central coordinator: it gates every inbound event on
//! the access policy, reads and updates per-user session state, and forwards
//! plain text messages to the completion gateway. It holds no state of its
//! own between events beyond the injected session store.

pub mod access;
pub mod event;

use std::sync::Arc;

use courier_config::model::SessionConfig;
use courier_core::{CompletionGateway, CompletionRequest, CourierError, SessionStore, UserId};
use courier_models::ModelRegistry;
use courier_session::UserGates;
use tracing::{debug, info, warn};

pub use access::AccessPolicy;
pub use event::{MenuOption, RelayEvent, RelayReply};

/// Greeting sent in reply to `/start`.
pub const WELCOME_TEXT: &str =
    "Hello! Send me a message and I will process it with OpenRouter.";

/// Sent to accounts that fail the access gate.
pub const DENIED_TEXT: &str = "You are not authorized to use this bot.";

/// Confirmation sent in reply to `/clear`.
pub const CLEARED_TEXT: &str = "Conversation history cleared.";

/// Heading above the model menu.
pub const MENU_HEADING: &str = "Choose a model:";

/// Routes inbound events to their handlers.
///
/// One relay instance serves every user; all per-user state lives in the
/// injected [`SessionStore`].
pub struct Relay {
    store: Arc<dyn SessionStore>,
    gateway: Arc<dyn CompletionGateway>,
    registry: ModelRegistry,
    policy: AccessPolicy,
    gates: UserGates,
    keep_failed_turns: bool,
}

impl Relay {
    /// Creates a relay over the given store, gateway, registry, and policy.
    pub fn new(
        store: Arc<dyn SessionStore>,
        gateway: Arc<dyn CompletionGateway>,
        registry: ModelRegistry,
        policy: AccessPolicy,
        session: &SessionConfig,
    ) -> Self {
        info!(
            models = registry.len(),
            open_access = policy.is_open(),
            keep_failed_turns = session.keep_failed_turns,
            "relay initialized"
        );
        Self {
            store,
            gateway,
            registry,
            policy,
            gates: UserGates::new(),
            keep_failed_turns: session.keep_failed_turns,
        }
    }

    /// Handles one inbound event and returns the reply to deliver.
    ///
    /// Gateway failures are reported in the reply text, not as errors; an
    /// `Err` from this method is a defensive condition (e.g. a selector code
    /// that is not in the registry) that the channel should log, not show.
    pub async fn handle(&self, event: RelayEvent) -> Result<RelayReply, CourierError> {
        let user = event.user();
        if !self.policy.is_allowed(user) {
            debug!(%user, "rejected unauthorized event");
            return Ok(RelayReply::Text(DENIED_TEXT.to_string()));
        }

        match event {
            RelayEvent::Start { .. } => Ok(RelayReply::Text(WELCOME_TEXT.to_string())),

            RelayEvent::ClearHistory { user } => {
                self.store.clear(user).await;
                Ok(RelayReply::Text(CLEARED_TEXT.to_string()))
            }

            RelayEvent::ListModels { .. } => Ok(RelayReply::Menu {
                heading: MENU_HEADING.to_string(),
                options: self
                    .registry
                    .choices()
                    .iter()
                    .map(|choice| MenuOption {
                        code: choice.code,
                        label: choice.label.clone(),
                    })
                    .collect(),
            }),

            RelayEvent::SelectModel { user, code } => {
                let model = self.registry.resolve(code)?.to_string();
                self.store.set_selected_model(user, model.clone()).await;
                debug!(%user, model = model.as_str(), "model selected");
                Ok(RelayReply::MenuEdit(format!("Model set to {model}")))
            }

            RelayEvent::Text { user, body } => self.relay_text(user, body).await,
        }
    }

    /// Forwards a text message through the gateway and appends both turns.
    ///
    /// Holds the user's exchange gate for the whole sequence so concurrent
    /// dispatch cannot interleave one user's transcript.
    async fn relay_text(&self, user: UserId, body: String) -> Result<RelayReply, CourierError> {
        let _gate = self.gates.acquire(user).await;

        self.store.push_user_turn(user, body).await;
        let model = self.store.selected_model(user).await;
        let turns = self.store.transcript(user).await;

        debug!(%user, model = model.as_str(), turns = turns.len(), "forwarding transcript");

        match self.gateway.complete(CompletionRequest { model, turns }).await {
            Ok(reply) => {
                self.store
                    .push_assistant_turn(user, reply.content.clone())
                    .await?;
                Ok(RelayReply::Text(reply.content))
            }
            Err(e) => {
                warn!(%user, error = %e, "completion failed");
                if !self.keep_failed_turns {
                    self.store.discard_pending_turn(user).await;
                }
                Ok(RelayReply::Text(format!("Error: {e}")))
            }
        }
    }
}
