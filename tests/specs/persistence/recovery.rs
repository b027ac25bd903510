// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Surviving restarts: downtime compensation and hand-off after recovery

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test]
async fn downtime_is_subtracted_from_claims() {
    let world = World::new();
    world.claim(&alice(), "f4", Some("1:40")).await.unwrap();

    let (world, report) = world.crash_and_restart(30).await;
    assert_eq!(report.claims_restored, 1);
    assert_eq!(
        world.board(),
        "f4 - [01:10] Cobra Castelo (Tier 1): Alice".to_string()
    );

    // The countdown keeps going after recovery
    world.pass_minutes(1).await;
    assert_eq!(
        world.board(),
        "f4 - [01:09] Cobra Castelo (Tier 1): Alice".to_string()
    );
}

#[tokio::test]
async fn claim_that_lapsed_while_down_hands_off_once() {
    let world = World::new();
    world.claim(&alice(), "f4", Some("1:40")).await.unwrap();
    world.enqueue(&bob(), "f4", Some("0:45")).await.unwrap();

    let (world, report) = world.crash_and_restart(130).await;
    assert_eq!(report.claims_expired, 1);
    assert_eq!(report.claims_restored, 0);

    let to_bob = world.gateway.messages_to(&bob().id);
    assert_eq!(to_bob.len(), 1);
    assert!(to_bob[0].contains("is available for you"), "{}", to_bob[0]);
    assert_eq!(world.runtime.counts().offers, 1);
    assert_eq!(world.runtime.counts().queued, 0);

    let reply = world.accept(&bob()).await.unwrap();
    assert_eq!(claimed_minutes(&reply), 45);
}

#[tokio::test]
async fn lapsed_offer_is_dropped_and_the_line_moves_on() {
    let world = World::new();
    world.claim(&alice(), "f4", Some("0:05")).await.unwrap();
    world.enqueue(&bob(), "f4", None).await.unwrap();
    world.enqueue(&carol(), "f4", Some("0:30")).await.unwrap();
    world.pass_minutes(5).await;

    let (world, report) = world.crash_and_restart(15).await;
    assert_eq!(report.offers_dropped, 1);
    assert_eq!(report.entries_restored, 1);

    assert_eq!(rejection_kind(world.accept(&bob()).await), "not_found");
    assert_eq!(world.gateway.messages_to(&carol().id).len(), 1);
    let reply = world.accept(&carol()).await.unwrap();
    assert_eq!(claimed_minutes(&reply), 30);
}

#[tokio::test]
async fn pending_offer_survives_a_short_outage() {
    let world = World::new();
    world.claim(&alice(), "f4", Some("0:05")).await.unwrap();
    world.enqueue(&bob(), "f4", Some("0:45")).await.unwrap();
    world.pass_minutes(5).await;

    let (world, report) = world.crash_and_restart(3).await;
    assert_eq!(report.offers_restored, 1);
    // Recovery does not re-announce an offer that is still valid
    assert!(world.gateway.messages_to(&bob().id).is_empty());

    let reply = world.accept(&bob()).await.unwrap();
    assert_eq!(claimed_minutes(&reply), 45);
}

#[tokio::test]
async fn orderly_shutdown_preserves_claims_and_queue() {
    let world = World::new();
    world.claim(&alice(), "f4", Some("1:40")).await.unwrap();
    world.enqueue(&bob(), "f4", None).await.unwrap();

    let (world, report) = world.shutdown_and_restart(0).await;
    assert_eq!(report.claims_restored, 1);
    assert_eq!(report.entries_restored, 1);
    assert_eq!(
        world.board(),
        "f4 - [01:40] Cobra Castelo (Tier 1): Alice | Next: Bob".to_string()
    );
}

#[tokio::test]
async fn records_are_consumed_by_recovery() {
    let world = World::new();
    world.claim(&alice(), "f4", None).await.unwrap();

    let (world, _) = world.crash_and_restart(1).await;
    let store = world.store();
    assert_eq!(store.load_claims().unwrap(), None);
    assert_eq!(store.load_queue().unwrap(), None);
}

#[tokio::test]
async fn corrupt_record_starts_empty() {
    let world = World::new();
    world.claim(&alice(), "f4", None).await.unwrap();
    std::fs::write(world.store().claims_path(), "{not json").unwrap();

    let (world, report) = world.crash_and_restart(1).await;
    assert_eq!(report.claims_restored, 0);
    assert_eq!(world.board(), "No active claims".to_string());
    world.claim(&bob(), "f4", Some("0:10")).await.unwrap();
}

#[tokio::test]
async fn failed_persistence_does_not_block_commands() {
    let world = World::new();
    std::fs::remove_dir_all(world.dir.path()).unwrap();

    let reply = world.claim(&alice(), "f4", Some("0:10")).await.unwrap();
    assert_eq!(claimed_minutes(&reply), 10);
    assert_eq!(
        world.gateway.last_board(),
        Some("f4 - [00:10] Cobra Castelo (Tier 1): Alice".to_string())
    );
}
