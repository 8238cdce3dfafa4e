// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Update-to-event extraction and menu construction.
//!
//! Translates Telegram messages and callback queries into channel-agnostic
//! [`RelayEvent`]s, and builds the inline keyboard for the model menu.

use courier_core::UserId;
use courier_relay::{MenuOption, RelayEvent};
use teloxide::types::{CallbackQuery, InlineKeyboardButton, InlineKeyboardMarkup, Message};

/// Extracts the sending account from a message.
///
/// Messages without a sender (e.g., channel posts) return `None` and are
/// ignored upstream.
pub fn sender(msg: &Message) -> Option<UserId> {
    msg.from.as_ref().map(|user| UserId(user.id.0))
}

/// Converts a plain message into a text relay event.
///
/// Returns `None` for non-text messages and for unrecognized commands
/// (anything starting with `/` that the command branch did not claim).
pub fn text_event(msg: &Message) -> Option<RelayEvent> {
    let user = sender(msg)?;
    let text = msg.text()?;
    if text.starts_with('/') {
        return None;
    }
    Some(RelayEvent::Text {
        user,
        body: text.to_string(),
    })
}

/// Converts a callback query into a model-selection event.
///
/// The callback data is the selector code the menu button was built with.
pub fn callback_event(query: &CallbackQuery) -> Option<RelayEvent> {
    let code = query.data.as_ref()?.chars().next()?;
    Some(RelayEvent::SelectModel {
        user: UserId(query.from.id.0),
        code,
    })
}

/// Builds the inline keyboard for the model menu, one button per row,
/// preserving the registry's declaration order.
pub fn model_menu(options: &[MenuOption]) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = options
        .iter()
        .map(|option| {
            vec![InlineKeyboardButton::callback(
                option.label.clone(),
                option.code.to_string(),
            )]
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a mock private chat message from JSON, matching the Telegram
    /// Bot API structure.
    fn make_private_message(user_id: u64, text: &str) -> Message {
        let json = serde_json::json!({
            "message_id": 1,
            "date": 1700000000i64,
            "chat": {
                "id": user_id as i64,
                "type": "private",
                "first_name": "Test",
            },
            "from": {
                "id": user_id,
                "is_bot": false,
                "first_name": "Test",
            },
            "text": text,
        });
        serde_json::from_value(json).expect("failed to deserialize mock message")
    }

    /// Build a mock message without a sender.
    fn make_no_sender_message(text: &str) -> Message {
        let json = serde_json::json!({
            "message_id": 1,
            "date": 1700000000i64,
            "chat": {
                "id": 12345i64,
                "type": "private",
                "first_name": "Test",
            },
            "text": text,
        });
        serde_json::from_value(json).expect("failed to deserialize mock message")
    }

    #[test]
    fn sender_reads_the_from_field() {
        let msg = make_private_message(12345, "hello");
        assert_eq!(sender(&msg), Some(UserId(12345)));
    }

    #[test]
    fn sender_is_none_for_channel_posts() {
        let msg = make_no_sender_message("hello");
        assert_eq!(sender(&msg), None);
    }

    #[test]
    fn text_event_wraps_plain_text() {
        let msg = make_private_message(42, "what is rust?");
        let event = text_event(&msg).unwrap();
        assert_eq!(
            event,
            RelayEvent::Text {
                user: UserId(42),
                body: "what is rust?".into(),
            }
        );
    }

    #[test]
    fn text_event_skips_unrecognized_commands() {
        let msg = make_private_message(42, "/unknown");
        assert!(text_event(&msg).is_none());
    }

    #[test]
    fn text_event_skips_messages_without_sender() {
        let msg = make_no_sender_message("hello");
        assert!(text_event(&msg).is_none());
    }

    #[test]
    fn model_menu_builds_one_button_per_option() {
        let options = vec![
            MenuOption {
                code: '1',
                label: "GPT-4o Mini".into(),
            },
            MenuOption {
                code: '8',
                label: "DeepSeek V3".into(),
            },
        ];
        let markup = model_menu(&options);
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[0].len(), 1);
        assert_eq!(markup.inline_keyboard[0][0].text, "GPT-4o Mini");
        assert_eq!(markup.inline_keyboard[1][0].text, "DeepSeek V3");
    }
}
