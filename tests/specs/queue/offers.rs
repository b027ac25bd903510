// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Waiting in line and accepting offers

use crate::prelude::*;
use rc_core::{ClaimError, NotFound};
use similar_asserts::assert_eq;

/// Alice holds f4 for five minutes with Bob waiting for 45 minutes
async fn contested() -> World {
    let world = World::new();
    world.claim(&alice(), "f4", Some("0:05")).await.unwrap();
    world.enqueue(&bob(), "f4", Some("0:45")).await.unwrap();
    world
}

#[tokio::test]
async fn queueing_for_a_free_respawn_is_refused() {
    let world = World::new();
    assert_eq!(
        rejection_kind(world.enqueue(&bob(), "f4", None).await),
        "conflict"
    );
    assert_eq!(world.runtime.counts().queued, 0);
}

#[tokio::test]
async fn positions_follow_arrival_order() {
    let world = contested().await;
    let reply = world.enqueue(&carol(), "f4", None).await.unwrap();
    assert!(matches!(reply, Reply::Enqueued { position: 2, .. }));
}

#[tokio::test]
async fn accepted_offer_claims_for_the_desired_duration() {
    let world = contested().await;
    world.pass_minutes(5).await;

    let reply = world.accept(&bob()).await.unwrap();
    assert!(matches!(
        reply,
        Reply::Claimed {
            from_offer: true,
            ..
        }
    ));
    assert_eq!(claimed_minutes(&reply), 45);
    assert_eq!(
        world.board(),
        "f4 - [00:45] Cobra Castelo (Tier 1): Bob".to_string()
    );
}

#[tokio::test]
async fn offer_can_only_be_accepted_once() {
    let world = contested().await;
    world.pass_minutes(5).await;

    let bob = bob();
    let (first, second) = tokio::join!(world.accept(&bob), world.accept(&bob));
    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results.iter().any(|r| matches!(
        r,
        Err(RuntimeError::Claim(ClaimError::NotFound(NotFound::Offer)))
    )));
    assert_eq!(world.runtime.counts().claims, 1);
}

#[tokio::test]
async fn accepting_without_an_offer_is_not_found() {
    let world = contested().await;
    assert_eq!(rejection_kind(world.accept(&bob()).await), "not_found");
}

#[tokio::test]
async fn offered_respawn_is_reserved() {
    let world = contested().await;
    world.pass_minutes(5).await;

    assert_eq!(
        rejection_kind(world.claim(&carol(), "f4", None).await),
        "conflict"
    );
    let board = world.board();
    assert!(
        board.starts_with("f4 - [OFFER] reserved for Bob until "),
        "{}",
        board
    );
    assert!(board.ends_with(" UTC"), "{}", board);
}

#[tokio::test]
async fn lapsed_offer_passes_to_the_next_in_line() {
    let world = contested().await;
    world.enqueue(&carol(), "f4", Some("1:00")).await.unwrap();
    world.pass_minutes(5).await;
    assert_eq!(world.gateway.messages_to(&carol().id).len(), 0);

    world.pass_minutes(10).await;

    let to_bob = world.gateway.messages_to(&bob().id);
    assert_eq!(to_bob.len(), 2);
    assert!(to_bob[1].contains("expired"), "{}", to_bob[1]);

    let to_carol = world.gateway.messages_to(&carol().id);
    assert_eq!(to_carol.len(), 1);
    assert!(to_carol[0].contains("is available for you"), "{}", to_carol[0]);

    assert_eq!(rejection_kind(world.accept(&bob()).await), "not_found");
    let reply = world.accept(&carol()).await.unwrap();
    assert_eq!(claimed_minutes(&reply), 60);
}

#[tokio::test]
async fn lapsed_offer_with_nobody_waiting_frees_the_respawn() {
    let world = contested().await;
    world.pass_minutes(15).await;

    assert_eq!(world.board(), "No active claims".to_string());
    let reply = world.claim(&carol(), "f4", Some("0:20")).await.unwrap();
    assert_eq!(claimed_minutes(&reply), 20);
}

#[tokio::test]
async fn release_hands_off_immediately() {
    let world = contested().await;
    world.release(&alice(), "f4").await.unwrap();

    assert_eq!(world.gateway.messages_to(&bob().id).len(), 1);
    assert_eq!(world.runtime.counts().offers, 1);
}

#[tokio::test]
async fn leaving_the_line_moves_everyone_up() {
    let world = contested().await;
    world.enqueue(&carol(), "f4", None).await.unwrap();
    world
        .run(&bob(), Command::Leave { resource: code("f4") })
        .await
        .unwrap();

    match world
        .run(&alice(), Command::QueueStatus { resource: code("f4") })
        .await
        .unwrap()
    {
        Reply::Status(status) => {
            assert_eq!(status.waiting.len(), 1);
            assert_eq!(status.waiting[0].position, 1);
            assert_eq!(status.waiting[0].holder_name, "Carol".to_string());
        }
        other => panic!("unexpected reply: {:?}", other),
    }
}
