// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gateway outages and delivery fallbacks

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test]
async fn unreachable_holder_gets_a_message_instead() {
    let world = World::new();
    world.gateway.fail_pokes(true);
    world.claim(&alice(), "f4", Some("0:01")).await.unwrap();

    world.pass_minutes(1).await;
    assert_eq!(world.gateway.pokes_to(&alice().id).len(), 1);
    let messages = world.gateway.messages_to(&alice().id);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("has expired"), "{}", messages[0]);
}

#[tokio::test]
async fn reconnect_keeps_everything_in_place() {
    let world = World::new();
    world.claim(&alice(), "f4", Some("1:00")).await.unwrap();
    world.enqueue(&bob(), "f4", None).await.unwrap();

    world.gateway.disconnect();
    world.claim(&carol(), "a1", Some("0:30")).await.unwrap();
    assert!(world.runtime.link_lost());

    world.gateway.fail_next_connects(2);
    assert!(world.runtime.reconnect().await);

    let connects = world
        .gateway
        .calls()
        .into_iter()
        .filter(|c| *c == GatewayCall::Connect)
        .count();
    assert_eq!(connects, 3);
    assert_eq!(
        world.gateway.last_board(),
        Some(
            "a1 - [00:30] Dragão Vermelho (Tier 2): Carol\nf4 - [01:00] Cobra Castelo (Tier 1): Alice | Next: Bob"
                .to_string()
        )
    );
}

#[tokio::test]
async fn commands_wait_out_a_reconnect() {
    let world = World::new();
    world.claim(&alice(), "f4", None).await.unwrap();
    world.gateway.disconnect();
    world.gateway.fail_next_connects(3);

    let bob = bob();
    let (reconnected, during) =
        tokio::join!(world.runtime.reconnect(), world.claim(&bob, "a1", None));
    assert!(reconnected);
    assert_eq!(rejection_kind(during), "unavailable");

    let reply = world.claim(&bob, "a1", Some("0:20")).await.unwrap();
    assert_eq!(claimed_minutes(&reply), 20);
}

#[tokio::test]
async fn claims_keep_expiring_while_the_link_is_down() {
    let world = World::new();
    world.claim(&alice(), "f4", Some("0:02")).await.unwrap();
    world.gateway.disconnect();

    world.pass_minutes(2).await;
    assert_eq!(world.runtime.counts().claims, 0);
    assert!(world.runtime.link_lost());

    world.runtime.reconnect().await;
    assert_eq!(world.gateway.last_board(), Some("No active claims".to_string()));
}
