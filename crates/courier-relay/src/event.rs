// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound relay events and the replies they produce.
//!
//! Channel adapters translate platform updates into [`RelayEvent`] values
//! and render [`RelayReply`] values back into platform calls, so the relay
//! itself never touches platform types.

use courier_core::UserId;

/// An inbound event, already attributed to the account that sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// `/start`: greet the user.
    Start { user: UserId },
    /// `/clear`: drop the user's conversation history.
    ClearHistory { user: UserId },
    /// `/models`: present the model menu.
    ListModels { user: UserId },
    /// A menu button press carrying a selector code.
    SelectModel { user: UserId, code: char },
    /// A plain text message to forward to the model.
    Text { user: UserId, body: String },
}

impl RelayEvent {
    /// The account this event is attributed to.
    pub fn user(&self) -> UserId {
        match self {
            RelayEvent::Start { user }
            | RelayEvent::ClearHistory { user }
            | RelayEvent::ListModels { user }
            | RelayEvent::SelectModel { user, .. }
            | RelayEvent::Text { user, .. } => *user,
        }
    }
}

/// What the channel should do in response to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayReply {
    /// Send plain text to the originating conversation.
    Text(String),
    /// Present an inline choice menu.
    Menu {
        heading: String,
        options: Vec<MenuOption>,
    },
    /// Edit the menu message to confirm a model choice.
    MenuEdit(String),
}

/// One labeled option on the model menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub code: char,
    pub label: String,
}
