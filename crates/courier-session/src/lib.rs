// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory session state for the Courier relay.
//!
//! [`MemorySessionStore`] keeps per-user transcripts and model picks in
//! process memory for the lifetime of the process; nothing is persisted.
//! [`UserGates`] serializes exchanges per user so concurrent dispatch can
//! never interleave one user's transcript appends.

pub mod gates;

use std::collections::HashMap;

use async_trait::async_trait;
use courier_core::{CourierError, Role, SessionStore, Turn, UserId};
use tokio::sync::Mutex;
use tracing::debug;

pub use gates::UserGates;

/// Process-local [`SessionStore`] backed by mutex-guarded maps.
///
/// Transcripts and model picks have independent lifecycles: clearing a
/// user's history leaves their model pick in place. Transcripts grow
/// without bound within a process run; there is no truncation or
/// summarization, so a very long conversation eventually exceeds the
/// provider's context window and fails through the normal gateway error
/// path.
pub struct MemorySessionStore {
    default_model: String,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    transcripts: HashMap<UserId, Vec<Turn>>,
    models: HashMap<UserId, String>,
}

impl MemorySessionStore {
    /// Creates an empty store. `default_model` is returned for every user
    /// that never picked a model from the menu.
    pub fn new(default_model: impl Into<String>) -> Self {
        Self {
            default_model: default_model.into(),
            inner: Mutex::new(Inner::default()),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn transcript(&self, user: UserId) -> Vec<Turn> {
        self.inner
            .lock()
            .await
            .transcripts
            .get(&user)
            .cloned()
            .unwrap_or_default()
    }

    async fn push_user_turn(&self, user: UserId, text: String) {
        self.inner
            .lock()
            .await
            .transcripts
            .entry(user)
            .or_default()
            .push(Turn::user(text));
    }

    async fn push_assistant_turn(&self, user: UserId, text: String) -> Result<(), CourierError> {
        let mut inner = self.inner.lock().await;
        match inner.transcripts.get_mut(&user) {
            Some(turns) if turns.last().map(|t| t.role) == Some(Role::User) => {
                turns.push(Turn::assistant(text));
                Ok(())
            }
            _ => Err(CourierError::Internal(format!(
                "assistant turn for user {user} without a pending user turn"
            ))),
        }
    }

    async fn clear(&self, user: UserId) {
        let removed = self.inner.lock().await.transcripts.remove(&user);
        debug!(%user, existed = removed.is_some(), "transcript cleared");
    }

    async fn selected_model(&self, user: UserId) -> String {
        self.inner
            .lock()
            .await
            .models
            .get(&user)
            .cloned()
            .unwrap_or_else(|| self.default_model.clone())
    }

    async fn set_selected_model(&self, user: UserId, model: String) {
        self.inner.lock().await.models.insert(user, model);
    }

    async fn discard_pending_turn(&self, user: UserId) {
        let mut inner = self.inner.lock().await;
        let now_empty = match inner.transcripts.get_mut(&user) {
            Some(turns) => {
                if turns.last().map(|t| t.role) == Some(Role::User) {
                    turns.pop();
                }
                turns.is_empty()
            }
            None => false,
        };
        // An empty sequence and an absent entry must be indistinguishable;
        // drop the entry rather than keep an empty one around.
        if now_empty {
            inner.transcripts.remove(&user);
        }
    }
}
