// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Claiming and releasing respawns

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test]
async fn second_holder_cannot_take_a_claimed_respawn() {
    let world = World::new();
    world.claim(&alice(), "f4", Some("2:30")).await.unwrap();

    let kind = rejection_kind(world.claim(&bob(), "f4", Some("1:00")).await);
    assert_eq!(kind, "conflict");
    assert_eq!(
        world.board(),
        "f4 - [02:30] Cobra Castelo (Tier 1): Alice".to_string()
    );
}

#[tokio::test]
async fn duration_grammar() {
    let cases: [(&str, Option<u32>); 6] = [
        ("2:30", Some(150)),
        ("1:05", Some(65)),
        ("01:05", Some(65)),
        ("2:31", None),
        ("25:00", None),
        ("1:5", None),
    ];

    for (input, expected) in cases {
        let world = World::new();
        let result = world.claim(&alice(), "f4", Some(input)).await;
        match expected {
            Some(minutes) => std::assert_eq!(claimed_minutes(&result.unwrap()), minutes, "{}", input),
            None => std::assert_eq!(rejection_kind(result), "validation", "{}", input),
        }
    }
}

#[tokio::test]
async fn omitted_duration_defaults_to_two_and_a_half_hours() {
    let world = World::new();
    let reply = world.claim(&alice(), "a1", None).await.unwrap();
    assert_eq!(claimed_minutes(&reply), 150);
}

#[tokio::test]
async fn codes_are_case_insensitive() {
    let world = World::new();
    world.claim(&alice(), "F4", None).await.unwrap();
    assert_eq!(rejection_kind(world.claim(&bob(), "f4", None).await), "conflict");
}

#[tokio::test]
async fn unknown_codes_are_described_generically() {
    let world = World::new();
    world.claim(&alice(), "zz", Some("0:30")).await.unwrap();
    assert_eq!(
        world.board(),
        "zz - [00:30] Respawn ZZ (Tier ?): Alice".to_string()
    );
}

#[tokio::test]
async fn released_respawn_can_be_claimed_by_anyone() {
    let world = World::new();
    world.claim(&alice(), "f4", None).await.unwrap();
    world.release(&alice(), "f4").await.unwrap();

    world.claim(&bob(), "f4", Some("0:10")).await.unwrap();
    assert_eq!(
        world.board(),
        "f4 - [00:10] Cobra Castelo (Tier 1): Bob".to_string()
    );
}

#[tokio::test]
async fn only_the_holder_can_release() {
    let world = World::new();
    world.claim(&alice(), "f4", None).await.unwrap();
    assert_eq!(rejection_kind(world.release(&bob(), "f4").await), "not_found");
}

#[tokio::test]
async fn reclaiming_restarts_the_countdown() {
    let world = World::new();
    world.claim(&alice(), "f4", Some("1:00")).await.unwrap();
    world.pass_minutes(10).await;

    let reply = world.claim(&alice(), "f4", Some("1:00")).await.unwrap();
    assert!(matches!(reply, Reply::Claimed { replaced: true, .. }));
    assert_eq!(
        world.board(),
        "f4 - [01:00] Cobra Castelo (Tier 1): Alice".to_string()
    );
}

#[tokio::test]
async fn list_claims_is_sorted_by_code() {
    let world = World::new();
    world.claim(&alice(), "x7", None).await.unwrap();
    world.claim(&bob(), "a1", None).await.unwrap();
    world.claim(&carol(), "f4", None).await.unwrap();

    match world.run(&alice(), Command::ListClaims).await.unwrap() {
        Reply::Claims { claims } => {
            let codes: Vec<String> = claims.iter().map(|c| c.resource.to_string()).collect();
            std::assert_eq!(codes, vec!["a1", "f4", "x7"]);
        }
        other => panic!("unexpected reply: {:?}", other),
    }
}

#[tokio::test]
async fn every_change_is_persisted() {
    let world = World::new();
    world.claim(&alice(), "f4", Some("1:00")).await.unwrap();
    world.enqueue(&bob(), "f4", Some("0:30")).await.unwrap();

    let store = world.store();
    let claims = store.load_claims().unwrap().unwrap();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].remaining_minutes, 60);
    assert!(claims[0].saved_at.is_some());

    let queue = store.load_queue().unwrap().unwrap();
    assert_eq!(queue.queue_entries.len(), 1);
    assert_eq!(queue.queue_entries[0].desired_minutes, 30);
}
