// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Countdown and expiry of claims

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test]
async fn board_counts_down_each_minute() {
    let world = World::new();
    world.claim(&alice(), "f4", Some("1:01")).await.unwrap();

    world.pass_minutes(2).await;
    assert_eq!(
        world.board(),
        "f4 - [00:59] Cobra Castelo (Tier 1): Alice".to_string()
    );
    assert_eq!(
        world.gateway.last_board(),
        Some("f4 - [00:59] Cobra Castelo (Tier 1): Alice".to_string())
    );
}

#[tokio::test]
async fn holder_is_poked_when_claim_expires() {
    let world = World::new();
    world.claim(&alice(), "f4", Some("0:03")).await.unwrap();

    world.pass_minutes(2).await;
    assert!(world.gateway.pokes_to(&alice().id).is_empty());

    world.pass_minutes(1).await;
    let pokes = world.gateway.pokes_to(&alice().id);
    assert_eq!(pokes.len(), 1);
    assert!(pokes[0].contains("Cobra Castelo"), "{}", pokes[0]);
    assert_eq!(world.board(), "No active claims".to_string());
}

#[tokio::test]
async fn expiry_offers_the_respawn_to_the_next_in_line() {
    let world = World::new();
    world.claim(&alice(), "f4", Some("0:05")).await.unwrap();
    world.enqueue(&bob(), "f4", Some("0:45")).await.unwrap();

    world.pass_minutes(5).await;

    let messages = world.gateway.messages_to(&bob().id);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("is available for you"), "{}", messages[0]);
    assert!(messages[0].contains("Accept within 10 minutes"), "{}", messages[0]);
    assert_eq!(world.runtime.counts().offers, 1);
    assert_eq!(world.runtime.counts().queued, 0);
}

#[tokio::test]
async fn expired_respawn_can_be_claimed_again() {
    let world = World::new();
    world.claim(&alice(), "f4", Some("0:01")).await.unwrap();
    world.pass_minutes(1).await;

    let reply = world.claim(&bob(), "f4", Some("0:30")).await.unwrap();
    assert_eq!(claimed_minutes(&reply), 30);
}

#[tokio::test]
async fn claims_on_different_respawns_expire_independently() {
    let world = World::new();
    world.claim(&alice(), "f4", Some("0:02")).await.unwrap();
    world.claim(&alice(), "a1", Some("0:05")).await.unwrap();

    world.pass_minutes(2).await;
    assert_eq!(
        world.board(),
        "a1 - [00:03] Dragão Vermelho (Tier 2): Alice".to_string()
    );
    assert_eq!(world.gateway.pokes_to(&alice().id).len(), 1);
}
