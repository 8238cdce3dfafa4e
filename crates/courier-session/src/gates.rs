// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user exchange serialization.
//!
//! The messaging framework may dispatch updates concurrently. Holding a
//! user's gate across the whole append -> complete -> append sequence keeps
//! that user's turns in arrival order while other users proceed unblocked.

use std::collections::HashMap;
use std::sync::Arc;

use courier_core::UserId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Hands out one mutex per user, created lazily on first use.
#[derive(Default)]
pub struct UserGates {
    inner: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl UserGates {
    /// Creates an empty gate set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the gate for `user`, waiting if an exchange is in flight.
    ///
    /// The returned guard must be held for the duration of the exchange.
    pub async fn acquire(&self, user: UserId) -> OwnedMutexGuard<()> {
        let gate = {
            let mut gates = self.inner.lock().await;
            gates
                .entry(user)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        gate.lock_owned().await
    }
}
