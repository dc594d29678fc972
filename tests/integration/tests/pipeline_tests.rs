//! Dispatch pipeline tests feeding raw frames into the handler registry
//!
//! No socket involved; these exercise decode, materialization, caching,
//! and dispatch ordering directly.
//!
//! Run with: cargo test -p integration-tests --test pipeline_tests

use std::sync::Arc;
use std::time::Duration;

use accord_core::{Component, Snowflake};
use accord_gateway::events::GatewayEvent;
use integration_tests::{
    guild_json, member_json, message_json, user_json, Pipeline, RecordingListener,
};
use parking_lot::Mutex;
use serde_json::json;

async fn drain() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn test_message_update_carries_old_state() {
    let pipeline = Pipeline::new();
    let old_content: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&old_content);
    pipeline.dispatcher.on(move |event| {
        if let GatewayEvent::MessageUpdate(update) = event {
            *slot.lock() = update.old.as_ref().map(|m| m.content.clone());
        }
    });

    pipeline.feed("MESSAGE_CREATE", message_json("1", "42", "7", "before"));
    pipeline.feed(
        "MESSAGE_UPDATE",
        message_json("1", "42", "7", "after"),
    );
    drain().await;

    assert_eq!(old_content.lock().as_deref(), Some("before"));
    let cached = pipeline
        .cache
        .message(Snowflake::new(42), Snowflake::new(1))
        .unwrap();
    assert_eq!(cached.content, "after");
}

#[tokio::test]
async fn test_member_user_round_trip() {
    let pipeline = Pipeline::new();
    pipeline.feed("GUILD_MEMBER_ADD", member_json("10", "20", "alice"));
    drain().await;

    let member = pipeline
        .cache
        .member(Snowflake::new(10), Snowflake::new(20))
        .unwrap();
    let user = pipeline.cache.user(Snowflake::new(20)).unwrap();
    assert_eq!(member.user.as_ref().map(|u| u.id), Some(user.id));
    assert_eq!(user.username, "alice");

    // Guild scoping: the same user id under another guild is a miss.
    assert!(pipeline
        .cache
        .member(Snowflake::new(11), Snowflake::new(20))
        .is_none());
}

#[tokio::test]
async fn test_repeated_put_is_idempotent() {
    let pipeline = Pipeline::new();
    pipeline.feed("MESSAGE_CREATE", message_json("5", "42", "7", "same"));
    pipeline.feed("MESSAGE_CREATE", message_json("5", "42", "7", "same"));
    drain().await;

    assert_eq!(pipeline.cache.message_count(), 1);
    let cached = pipeline
        .cache
        .message(Snowflake::new(42), Snowflake::new(5))
        .unwrap();
    assert_eq!(cached.content, "same");
}

#[tokio::test]
async fn test_guild_delete_evicts_scoped_entities() {
    let pipeline = Pipeline::new();
    pipeline.feed("GUILD_CREATE", guild_json("10", "homebase"));
    pipeline.feed("GUILD_MEMBER_ADD", member_json("10", "20", "alice"));
    pipeline.feed(
        "GUILD_ROLE_CREATE",
        json!({ "guild_id": "10", "role": { "id": "30", "name": "admin" } }),
    );
    drain().await;
    assert!(pipeline.cache.guild(Snowflake::new(10)).is_some());

    pipeline.feed("GUILD_DELETE", json!({ "id": "10" }));
    drain().await;

    assert!(pipeline.cache.guild(Snowflake::new(10)).is_none());
    assert!(pipeline
        .cache
        .member(Snowflake::new(10), Snowflake::new(20))
        .is_none());
    assert!(pipeline
        .cache
        .role(Snowflake::new(10), Snowflake::new(30))
        .is_none());
    // The user itself is guild-independent and survives.
    assert!(pipeline.cache.user(Snowflake::new(20)).is_some());
}

#[tokio::test]
async fn test_bulk_delete_expands_to_single_deletes() {
    let pipeline = Pipeline::new();
    let listener = RecordingListener::new();
    pipeline.dispatcher.add_listener(listener.clone());

    pipeline.feed("MESSAGE_CREATE", message_json("1", "42", "7", "one"));
    pipeline.feed("MESSAGE_CREATE", message_json("2", "42", "7", "two"));
    pipeline.feed(
        "MESSAGE_DELETE_BULK",
        json!({ "ids": ["1", "2"], "channel_id": "42" }),
    );
    drain().await;

    let deletes = listener
        .names()
        .iter()
        .filter(|n| n.as_str() == "MessageDelete")
        .count();
    assert_eq!(deletes, 2);
    assert_eq!(pipeline.cache.message_count(), 0);
}

#[tokio::test]
async fn test_reaction_add_folds_into_cached_counts() {
    let pipeline = Pipeline::new();
    let listener = RecordingListener::new();
    pipeline.dispatcher.add_listener(listener.clone());

    pipeline.feed("MESSAGE_CREATE", message_json("1", "42", "7", "react"));
    for user in ["7", "8"] {
        pipeline.feed(
            "MESSAGE_REACTION_ADD",
            json!({
                "user_id": user,
                "channel_id": "42",
                "message_id": "1",
                "emoji": { "name": "👍" },
            }),
        );
    }
    drain().await;

    let names = listener.names();
    let generic = names.iter().position(|n| n.as_str() == "Reaction").unwrap();
    let specific = names.iter().position(|n| n.as_str() == "ReactionAdd").unwrap();
    assert!(generic < specific, "generic reaction event arrives first");

    let cached = pipeline
        .cache
        .message(Snowflake::new(42), Snowflake::new(1))
        .unwrap();
    assert_eq!(cached.reactions.len(), 1);
    assert_eq!(cached.reactions[0].count, 2);
}

#[tokio::test]
async fn test_reaction_remove_emote_strips_entry() {
    let pipeline = Pipeline::new();
    pipeline.feed("MESSAGE_CREATE", message_json("1", "42", "7", "react"));
    pipeline.feed(
        "MESSAGE_REACTION_ADD",
        json!({
            "user_id": "7",
            "channel_id": "42",
            "message_id": "1",
            "emoji": { "name": "👍" },
        }),
    );
    pipeline.feed(
        "MESSAGE_REACTION_REMOVE_EMOJI",
        json!({
            "channel_id": "42",
            "message_id": "1",
            "emoji": { "name": "👍" },
        }),
    );
    drain().await;

    let cached = pipeline
        .cache
        .message(Snowflake::new(42), Snowflake::new(1))
        .unwrap();
    assert!(cached.reactions.is_empty());
}

#[tokio::test]
async fn test_unknown_component_tag_is_omitted() {
    let pipeline = Pipeline::new();
    let rebuilt: Arc<Mutex<Vec<Component>>> = Arc::new(Mutex::new(Vec::new()));
    let slot = Arc::clone(&rebuilt);
    pipeline.dispatcher.on(move |event| {
        if let GatewayEvent::MessageCreate(create) = event {
            *slot.lock() = create.components.clone();
        }
    });

    let mut payload = message_json("9", "42", "7", "buttons");
    payload["components"] = json!([{
        "type": 1,
        "components": [
            { "type": 2, "style": 1, "custom_id": "ok" },
            { "type": 99 },
            { "type": 2, "style": 2, "custom_id": "cancel" }
        ]
    }]);
    pipeline.feed("MESSAGE_CREATE", payload);
    drain().await;

    let components = rebuilt.lock().clone();
    assert_eq!(components.len(), 1);
    let Component::ActionRow(row) = &components[0] else {
        panic!("expected an action row");
    };
    // The unknown tag drops out; its siblings survive.
    assert_eq!(row.components.len(), 2);
}

#[tokio::test]
async fn test_decode_error_drops_single_frame() {
    let pipeline = Pipeline::new();
    let listener = RecordingListener::new();
    pipeline.dispatcher.add_listener(listener.clone());

    // A message frame whose payload cannot decode (id missing).
    pipeline.feed("MESSAGE_CREATE", json!({ "content": "no id" }));
    pipeline.feed("MESSAGE_CREATE", message_json("3", "42", "7", "fine"));
    drain().await;

    assert!(listener.contains("MessageCreate"));
    assert_eq!(pipeline.cache.message_count(), 1);
}

#[tokio::test]
async fn test_user_update_old_snapshot() {
    let pipeline = Pipeline::new();
    let old_name: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&old_name);
    pipeline.dispatcher.on(move |event| {
        if let GatewayEvent::UserUpdate(update) = event {
            *slot.lock() = update.old.as_ref().map(|u| u.username.clone());
        }
    });

    pipeline.feed("USER_UPDATE", user_json("100", "old-name"));
    pipeline.feed("USER_UPDATE", user_json("100", "new-name"));
    drain().await;

    assert_eq!(old_name.lock().as_deref(), Some("old-name"));
    let cached = pipeline.cache.user(Snowflake::new(100)).unwrap();
    assert_eq!(cached.username, "new-name");
}
