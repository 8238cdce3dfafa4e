// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end scenario tests for the relay pipeline.
//!
//! Each test builds the pipeline the way `courier serve` does -- config
//! parsed from TOML, registry and policy derived from it -- with the mock
//! gateway standing in for OpenRouter. Tests are independent and
//! order-insensitive.

use std::sync::Arc;

use courier_core::{Role, SessionStore};
use courier_models::ModelRegistry;
use courier_relay::{
    AccessPolicy, Relay, RelayEvent, RelayReply, CLEARED_TEXT, DENIED_TEXT, WELCOME_TEXT,
};
use courier_session::MemorySessionStore;
use courier_test_utils::MockGateway;

struct Pipeline {
    relay: Relay,
    store: Arc<MemorySessionStore>,
    gateway: Arc<MockGateway>,
}

/// Builds the relay from a TOML config string, as `serve` would.
fn pipeline(toml: &str) -> Pipeline {
    let config = courier_config::load_and_validate_str(toml).expect("config should be valid");
    let store = Arc::new(MemorySessionStore::new(
        config.openrouter.default_model.clone(),
    ));
    let gateway = Arc::new(MockGateway::new());
    let relay = Relay::new(
        store.clone(),
        gateway.clone(),
        ModelRegistry::from_config(&config.models).unwrap(),
        AccessPolicy::from_ids(&config.telegram.allowed_users),
        &config.session,
    );
    Pipeline {
        relay,
        store,
        gateway,
    }
}

fn text(user: u64, body: &str) -> RelayEvent {
    RelayEvent::Text {
        user: courier_core::UserId(user),
        body: body.to_string(),
    }
}

#[tokio::test]
async fn full_conversation_round_trip() {
    let p = pipeline("");
    p.gateway.push_reply("Rust is a systems language.").await;

    let reply = p.relay.handle(text(42, "What is Rust?")).await.unwrap();
    assert_eq!(
        reply,
        RelayReply::Text("Rust is a systems language.".to_string())
    );

    let transcript = p.store.transcript(courier_core::UserId(42)).await;
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role, Role::User);
    assert_eq!(transcript[1].role, Role::Assistant);
}

#[tokio::test]
async fn allow_list_scenario_admits_42_and_denies_7() {
    let p = pipeline(
        r#"
[telegram]
allowed_users = [42]
"#,
    );

    let reply = p
        .relay
        .handle(RelayEvent::Start {
            user: courier_core::UserId(42),
        })
        .await
        .unwrap();
    assert_eq!(reply, RelayReply::Text(WELCOME_TEXT.to_string()));

    let reply = p
        .relay
        .handle(RelayEvent::Start {
            user: courier_core::UserId(7),
        })
        .await
        .unwrap();
    assert_eq!(reply, RelayReply::Text(DENIED_TEXT.to_string()));

    // The denied account never gained any state.
    assert!(p.store.transcript(courier_core::UserId(7)).await.is_empty());
}

#[tokio::test]
async fn model_selection_flows_into_the_next_exchange() {
    let p = pipeline("");

    // The menu offers the configured choices in declared order.
    let RelayReply::Menu { options, .. } = p
        .relay
        .handle(RelayEvent::ListModels {
            user: courier_core::UserId(42),
        })
        .await
        .unwrap()
    else {
        panic!("expected menu");
    };
    assert_eq!(options.len(), 8);
    assert_eq!(options[0].code, '1');

    // Picking '8' rebinds the account to the mapped identifier.
    let reply = p
        .relay
        .handle(RelayEvent::SelectModel {
            user: courier_core::UserId(42),
            code: '8',
        })
        .await
        .unwrap();
    assert_eq!(
        reply,
        RelayReply::MenuEdit("Model set to deepseek/deepseek-chat".to_string())
    );

    p.gateway.push_reply("hello from deepseek").await;
    p.relay.handle(text(42, "hi")).await.unwrap();
    assert_eq!(
        p.gateway.requests().await[0].model,
        "deepseek/deepseek-chat"
    );
}

#[tokio::test]
async fn custom_model_table_from_config() {
    let p = pipeline(
        r#"
[openrouter]
default_model = "openai/gpt-4o"

[[models.choices]]
code = "x"
model = "mistralai/mistral-large"
label = "Mistral Large"
"#,
    );

    p.gateway.push_reply("default model reply").await;
    p.relay.handle(text(1, "hi")).await.unwrap();
    assert_eq!(p.gateway.requests().await[0].model, "openai/gpt-4o");

    p.relay
        .handle(RelayEvent::SelectModel {
            user: courier_core::UserId(1),
            code: 'x',
        })
        .await
        .unwrap();
    p.gateway.push_reply("mistral reply").await;
    p.relay.handle(text(1, "again")).await.unwrap();
    assert_eq!(
        p.gateway.requests().await[1].model,
        "mistralai/mistral-large"
    );
}

#[tokio::test]
async fn gateway_failure_surfaces_description_and_keeps_user_turn() {
    let p = pipeline("");
    p.gateway.push_failure("rate limited").await;

    let RelayReply::Text(notice) = p.relay.handle(text(42, "hello?")).await.unwrap() else {
        panic!("expected text reply");
    };
    assert!(notice.contains("rate limited"), "got: {notice}");

    let transcript = p.store.transcript(courier_core::UserId(42)).await;
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].role, Role::User);
}

#[tokio::test]
async fn rollback_policy_discards_failed_turn() {
    let p = pipeline(
        r#"
[session]
keep_failed_turns = false
"#,
    );
    p.gateway.push_failure("rate limited").await;

    p.relay.handle(text(42, "hello?")).await.unwrap();
    assert!(p.store.transcript(courier_core::UserId(42)).await.is_empty());
}

#[tokio::test]
async fn clear_starts_a_fresh_conversation() {
    let p = pipeline("");
    p.gateway.push_reply("first").await;
    p.relay.handle(text(42, "one")).await.unwrap();

    let reply = p
        .relay
        .handle(RelayEvent::ClearHistory {
            user: courier_core::UserId(42),
        })
        .await
        .unwrap();
    assert_eq!(reply, RelayReply::Text(CLEARED_TEXT.to_string()));

    p.gateway.push_reply("second").await;
    p.relay.handle(text(42, "two")).await.unwrap();

    // The post-clear exchange carried no stale context.
    let requests = p.gateway.requests().await;
    assert_eq!(requests[1].turns.len(), 1);
    assert_eq!(requests[1].turns[0].content, "two");
}
