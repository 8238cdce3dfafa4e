// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session store trait: per-user transcripts and model preferences.

use async_trait::async_trait;

use crate::error::CourierError;
use crate::types::{Turn, UserId};

/// Keyed store for per-user conversation state.
///
/// All operations are keyed by [`UserId`] and have no cross-user effect.
/// Implementations must keep every read-modify-write sequence atomic with
/// respect to other callers.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Returns the stored transcript, or an empty sequence if none exists.
    /// Reading never creates an entry.
    async fn transcript(&self, user: UserId) -> Vec<Turn>;

    /// Appends a user turn, lazily creating the transcript if absent.
    async fn push_user_turn(&self, user: UserId, text: String);

    /// Appends an assistant turn.
    ///
    /// Fails with an `Internal` error if the transcript does not end with a
    /// user turn; in practice this is always called right after a successful
    /// gateway exchange and should never fail.
    async fn push_assistant_turn(&self, user: UserId, text: String) -> Result<(), CourierError>;

    /// Removes the transcript entry entirely. No-op if none existed.
    async fn clear(&self, user: UserId);

    /// Returns the user's selected model, or the fixed default if none set.
    async fn selected_model(&self, user: UserId) -> String;

    /// Overwrites the user's model preference.
    async fn set_selected_model(&self, user: UserId, model: String);

    /// Drops a trailing user turn left behind by a failed exchange.
    /// No-op if the transcript is absent or ends with an assistant turn.
    async fn discard_pending_turn(&self, user: UserId);
}
